pub mod debounce;
pub mod log;
