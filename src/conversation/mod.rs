mod controller;
pub mod format;
mod inbound;
mod reply;
mod state;

pub use controller::ConversationController;
pub use inbound::{parse_callback, parse_message, Inbound};
pub use reply::{Button, PhotoSource, Reply, ReplySink, TextFormat};
pub use state::SelectionPolicy;

#[cfg(test)]
pub use inbound::{BotCommand, CallbackAction};
