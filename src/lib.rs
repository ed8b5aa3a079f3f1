pub mod app;
pub mod catalog;
pub mod columns;
pub mod config;
pub mod error;
pub mod event;
pub mod favorites;
pub mod form;
pub mod presets;
pub mod search;
pub mod ui;
pub mod util;
pub mod widgets;

pub use config::FieldboardConfig;
pub use error::{FieldboardError, Result};
