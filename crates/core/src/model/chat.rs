use chrono::{DateTime, Utc};
use crate::model::ids::MessageId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Tutor,
}

/// One entry in a tutor conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub author: Author,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    #[must_use]
    pub fn new(
        id: MessageId,
        author: Author,
        content: impl Into<String>,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            author,
            content: content.into(),
            sent_at,
        }
    }

    #[must_use]
    pub fn is_from_user(&self) -> bool {
        self.author == Author::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn message_knows_its_author() {
        let asked = ChatMessage::new(MessageId::new(2), Author::User, "What is ATP?", fixed_now());
        let reply = ChatMessage::new(asked.id.next(), Author::Tutor, "Energy currency.", fixed_now());
        assert!(asked.is_from_user());
        assert!(!reply.is_from_user());
        assert_eq!(reply.id, MessageId::new(3));
        assert_eq!(reply.sent_at, asked.sent_at);
    }
}
