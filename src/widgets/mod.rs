pub mod field_form;
pub mod pip_board;
