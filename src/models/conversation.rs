use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    pub contact_name: String,
    pub contact_avatar: String,
    pub last_message: String,
    pub timestamp_label: String,
    pub unread_count: u32,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender: String,
    pub text: String,
    pub timestamp_label: String,
    pub read: bool,
}

impl Message {
    pub fn new(sender: impl Into<String>, text: impl Into<String>, timestamp_label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender: sender.into(),
            text: text.into(),
            timestamp_label: timestamp_label.into(),
            read: false,
        }
    }
}

impl Conversation {
    /// Appends a message and refreshes the preview fields.
    /// Messages sent by `reader` do not count as unread for them.
    pub fn push(&mut self, message: Message, reader: &str) {
        self.last_message = message.text.clone();
        self.timestamp_label = message.timestamp_label.clone();
        if !message.read && message.sender != reader {
            self.unread_count += 1;
        }
        self.messages.push(message);
    }

    pub fn mark_read(&mut self) {
        for message in &mut self.messages {
            message.read = true;
        }
        self.unread_count = 0;
    }
}
