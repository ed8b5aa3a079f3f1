pub mod empty_message;
pub mod help;
pub mod status;

/// Namespace for the shared paragraph builders; each file adds one
/// constructor in its own `impl` block.
pub struct UiComponent;
