/// Command and message handlers
pub mod handlers;
/// Admin notification rendering and delivery
pub mod notifier;
