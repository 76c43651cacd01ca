use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::deferred::DeferredSlot;
use crate::recommend::recommend;

const GREETING: &str = "Hi! I'm your VPN assistant. I can help you choose the perfect server for your needs. What would you like to use the VPN for?";

const FASTEST_REPLY: &str = "I recommend USA - New York (28ms) for the fastest connection speed.";
const NETFLIX_REPLY: &str = "For Netflix streaming, try USA - California or UK - London. Both work great with Netflix!";
const GAMING_REPLY: &str = "For gaming, USA - New York (28ms) or Germany - Frankfurt (32ms) offer the best ping times.";
const DEFAULT_REPLY: &str = "I can help you choose the best server for your needs. Try asking about Netflix, gaming, or the fastest server!";

/// Canned replies, checked in order. Longer phrases sit above the single
/// words they contain.
pub const CANNED_REPLIES: &[(&str, &str)] = &[
    ("fastest server", FASTEST_REPLY),
    ("netflix streaming", NETFLIX_REPLY),
    ("low ping gaming", GAMING_REPLY),
    ("netflix", NETFLIX_REPLY),
    ("gaming", GAMING_REPLY),
    ("speed", FASTEST_REPLY),
];

pub const QUICK_REPLIES: [&str; 3] = ["Fastest Server", "Netflix Streaming", "Low Ping Gaming"];

/// Max suggestions attached to a reply
const MAX_SUGGESTIONS: usize = 3;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ChatError {
    #[error("Message is empty")]
    EmptyMessage,
    #[error("Assistant is still typing")]
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

/// Canned answer for a message, first matching phrase wins
pub fn canned_reply(message: &str) -> &'static str {
    let lower = message.to_lowercase();
    CANNED_REPLIES
        .iter()
        .find(|(phrase, _)| lower.contains(phrase))
        .map(|(_, reply)| *reply)
        .unwrap_or(DEFAULT_REPLY)
}

#[derive(Default)]
struct Transcript {
    messages: Vec<ChatMessage>,
    typing: bool,
}

/// Chat session - アシスタントとの会話
///
/// Replies are keyword-matched, never generated. Each reply lands after a
/// fixed typing delay; input is refused while one is pending.
pub struct Assistant {
    catalog: Arc<Catalog>,
    transcript: Arc<RwLock<Transcript>>,
    next_id: Arc<AtomicU64>,
    slot: DeferredSlot,
    reply_delay: Duration,
}

impl Assistant {
    pub fn new(catalog: Arc<Catalog>, reply_delay: Duration) -> Self {
        let next_id = Arc::new(AtomicU64::new(1));
        let greeting = ChatMessage {
            id: next_id.fetch_add(1, Ordering::Relaxed),
            text: GREETING.to_string(),
            sender: Sender::Assistant,
            timestamp: Utc::now(),
            suggestions: Vec::new(),
        };
        Self {
            catalog,
            transcript: Arc::new(RwLock::new(Transcript {
                messages: vec![greeting],
                typing: false,
            })),
            next_id,
            slot: DeferredSlot::new(),
            reply_delay,
        }
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.transcript.read().messages.clone()
    }

    pub fn is_typing(&self) -> bool {
        self.transcript.read().typing
    }

    /// Post a user message. The reply is appended after the typing delay.
    pub fn send(&self, text: &str) -> Result<ChatMessage, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let mut transcript = self.transcript.write();
        if transcript.typing {
            return Err(ChatError::Busy);
        }

        let message = ChatMessage {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            text: text.to_string(),
            sender: Sender::User,
            timestamp: Utc::now(),
            suggestions: Vec::new(),
        };
        transcript.messages.push(message.clone());
        transcript.typing = true;

        let reply_text = canned_reply(text);
        let suggestions: Vec<String> = recommend(self.catalog.servers(), text)
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|r| r.server.label())
            .collect();
        debug!("💬 '{}' → {} suggestion(s)", text, suggestions.len());

        let shared = self.transcript.clone();
        let next_id = self.next_id.clone();
        self.slot.schedule(self.reply_delay, move |ticket| {
            let mut transcript = shared.write();
            if !ticket.is_current() {
                return;
            }
            transcript.messages.push(ChatMessage {
                id: next_id.fetch_add(1, Ordering::Relaxed),
                text: reply_text.to_string(),
                sender: Sender::Assistant,
                timestamp: Utc::now(),
                suggestions,
            });
            transcript.typing = false;
            info!("💬 Assistant replied");
        });

        Ok(message)
    }
}
