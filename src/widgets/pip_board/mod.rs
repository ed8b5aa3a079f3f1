mod widget;

pub use widget::PipBoardWidget;
