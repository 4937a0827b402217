mod chat;
mod command;

pub use chat::modify_chat_input;
pub use command::{resolve, split_command, Resolution};
