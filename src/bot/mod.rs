//! Bot module for handling Telegram interactions
//!
//! - `message_handler`: commands, match requests and result delivery
//! - `ui_builder`: reply formatting and message splitting

pub mod message_handler;
pub mod ui_builder;

pub use message_handler::{message_handler, AppState};
pub use ui_builder::{split_message, TELEGRAM_MESSAGE_LIMIT};
