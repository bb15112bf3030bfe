use std::fmt;
use std::sync::Arc;

use study_core::model::{Author, ChatMessage, MessageId};

use crate::Clock;
use crate::error::ChatError;
use crate::pacing::Pacer;

/// Turns a learner's free text into a tutor reply.
pub trait TutorDispatcher: Send + Sync {
    fn respond(&self, user_text: &str) -> String;
}

pub const GREETING: &str = "Hello! I'm your AI tutor. I can help you understand any topic, answer \
your questions, and explain difficult concepts in simple terms. What would you like to learn about today?";

/// Suggested openers shown before the first message.
pub const QUICK_QUESTIONS: [&str; 4] = [
    "Explain photosynthesis in simple terms",
    "How do I solve quadratic equations?",
    "What caused World War I?",
    "Explain the difference between mitosis and meiosis",
];

//
// ─── KEYWORD TUTOR ─────────────────────────────────────────────────────────────
//

const PHOTOSYNTHESIS_REPLY: &str = "Great question about photosynthesis! 🌱\n\n\
Think of photosynthesis as a plant cooking its own food with sunlight. The ingredients are:\n\n\
• **Sunlight**, the energy source\n\
• **Water**, pulled up through the roots\n\
• **Carbon dioxide**, taken in from the air through stomata\n\n\
The kitchen is the chloroplast, and chlorophyll is the chef that captures the light. \
The recipe yields glucose for the plant and oxygen for us.\n\n\
Would you like me to go deeper into any part?";

const MATH_REPLY: &str = "Math can be tricky, but it gets easier with a method! 📐\n\n\
1. **Read carefully** and work out what is being asked\n\
2. **List** what you know and what you need to find\n\
3. **Pick the tool**, a formula or a technique\n\
4. **Go step by step**\n\
5. **Check** that the answer makes sense\n\n\
Which math topic should we break down together?";

const CHEMISTRY_REPLY: &str = "Chemistry is fascinating! 🧪\n\n\
It studies how atoms combine into everything around us, a bit like LEGO at molecular scale:\n\
• **Atoms** are letters\n\
• **Molecules** are words\n\
• **Reactions** rearrange words into new sentences\n\n\
Which chemistry concept would you like an example for?";

const PHYSICS_REPLY: &str = "Physics is all about how things work! ⚡\n\n\
It answers the everyday *why*: why things fall, why light bends, why magnets attract.\n\
• **Newton's laws** explain the push you feel in an accelerating car\n\
• **Energy** explains how a roller coaster keeps going\n\
• **Waves** explain how your phone gets a signal\n\n\
Which physics topic interests you?";

const HISTORY_REPLY: &str = "History is the story of humanity! 📚\n\n\
Try reading it as:\n\
• **Stories** with characters\n\
• **Cause and effect**\n\
• **Patterns** that repeat\n\n\
Knowing *why* something happened matters more than memorising *when*. \
Which period or event would you like to explore?";

const BIOLOGY_REPLY: &str = "Biology is the study of life, including you! 🧬\n\n\
• **Cells** are rooms in a house\n\
• **DNA** is the instruction manual\n\
• **Proteins** are the workers\n\
• **Organs** are departments in a company\n\n\
What part of biology would you like to dive into?";

const DEFAULT_REPLY: &str = "That's a great question! 🤔\n\n\
To give you the best explanation, could you add a bit more context?\n\
• Which part are you stuck on?\n\
• Is this for a particular subject or grade level?\n\
• What have you tried already?\n\n\
Ask about any subject: science, math, history, literature, or anything else you're studying!";

/// First matching entry wins.
const KEYWORD_TABLE: &[(&[&str], &str)] = &[
    (&["photosynthesis"], PHOTOSYNTHESIS_REPLY),
    (&["math", "calculus", "algebra"], MATH_REPLY),
    (&["chemistry"], CHEMISTRY_REPLY),
    (&["physics"], PHYSICS_REPLY),
    (&["history"], HISTORY_REPLY),
    (&["biology"], BIOLOGY_REPLY),
];

/// Canned replies picked by case-insensitive keyword lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordTutor;

impl TutorDispatcher for KeywordTutor {
    fn respond(&self, user_text: &str) -> String {
        let lowered = user_text.to_lowercase();
        KEYWORD_TABLE
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(*k)))
            .map_or(DEFAULT_REPLY, |(_, reply)| *reply)
            .to_string()
    }
}

//
// ─── CHAT SESSION ──────────────────────────────────────────────────────────────
//

/// One tutor conversation, seeded with the greeting.
pub struct ChatSession {
    tutor: Arc<dyn TutorDispatcher>,
    pacer: Pacer,
    clock: Clock,
    messages: Vec<ChatMessage>,
    next_id: MessageId,
    typing: bool,
}

impl ChatSession {
    #[must_use]
    pub fn new(tutor: Arc<dyn TutorDispatcher>, pacer: Pacer, clock: Clock) -> Self {
        let greeting = ChatMessage::new(MessageId::new(1), Author::Tutor, GREETING, clock.now());
        Self {
            tutor,
            pacer,
            clock,
            messages: vec![greeting],
            next_id: MessageId::new(2),
            typing: false,
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True while a reply is pending.
    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.typing
    }

    /// Post a learner message and wait for the tutor's reply.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::EmptyMessage` for blank input; nothing is recorded.
    pub async fn send(&mut self, text: &str) -> Result<&ChatMessage, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        self.push(Author::User, text.to_string());
        self.typing = true;
        log::debug!("tutor thinking about {} chars of input", text.len());

        self.pacer.tutor_pause().await;
        let reply = self.tutor.respond(text);

        self.typing = false;
        Ok(self.push(Author::Tutor, reply))
    }

    fn push(&mut self, author: Author, content: String) -> &ChatMessage {
        let id = self.next_id;
        self.next_id = id.next();
        self.messages
            .push(ChatMessage::new(id, author, content, self.clock.now()));
        &self.messages[self.messages.len() - 1]
    }
}

impl fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatSession")
            .field("messages_len", &self.messages.len())
            .field("next_id", &self.next_id)
            .field("typing", &self.typing)
            .finish_non_exhaustive()
    }
}
