#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::Local;

use super::Author;

pub const THINKING_TEXT: &str = "AI is thinking";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MessageType {
    Normal,
    Error,
    /// Transient placeholder shown while a query is in flight.
    Thinking,
}

#[derive(Clone, Debug)]
pub struct Message {
    pub author: Author,
    pub text: String,
    pub timestamp: String,
    pub attached_image: Option<String>,
    mtype: MessageType,
}

fn now() -> String {
    return Local::now().format("%H:%M").to_string();
}

impl Message {
    pub fn new(author: Author, text: &str) -> Message {
        return Message::new_with_type(author, MessageType::Normal, text);
    }

    pub fn new_with_type(author: Author, mtype: MessageType, text: &str) -> Message {
        return Message {
            author,
            text: text.to_string().replace('\t', "  "),
            timestamp: now(),
            attached_image: None,
            mtype,
        };
    }

    pub fn thinking() -> Message {
        return Message::new_with_type(Author::Assistant, MessageType::Thinking, THINKING_TEXT);
    }

    pub fn with_image(mut self, image: Option<String>) -> Message {
        self.attached_image = image;
        return self;
    }

    pub fn message_type(&self) -> MessageType {
        return self.mtype;
    }

    pub fn is_thinking(&self) -> bool {
        return self.mtype == MessageType::Thinking;
    }
}
