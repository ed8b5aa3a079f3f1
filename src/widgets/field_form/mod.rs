mod widget;

pub use widget::FieldFormWidget;
