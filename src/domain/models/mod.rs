mod action;
mod author;
mod backend;
mod detection;
mod event;
mod message;
mod session;
mod slash_commands;
mod speech;
mod textarea;
mod upload;

pub use action::*;
pub use author::*;
pub use backend::*;
pub use detection::*;
pub use event::*;
pub use message::*;
pub use session::*;
pub use slash_commands::*;
pub use speech::*;
pub use textarea::*;
pub use upload::*;
