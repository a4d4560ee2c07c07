//! Inbound webhook payloads
//!
//! Decode target only. Every field is optional or defaulted since a single
//! `messaging` item carries exactly one of message, postback, delivery, read
//! or referral.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level webhook body (`{"object": "page", "entry": [...]}`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub object: Option<String>,
    #[serde(default)]
    pub entry: Vec<WebhookEntry>,
}

impl WebhookEvent {
    /// Decode a raw request body
    pub fn parse(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }

    /// All messaging items across every entry, in delivery order
    pub fn messaging(&self) -> impl Iterator<Item = &Messaging> {
        self.entry.iter().flat_map(|entry| entry.messaging.iter())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookEntry {
    pub id: Option<String>,
    /// Milliseconds since the epoch
    pub time: Option<i64>,
    #[serde(default)]
    pub messaging: Vec<Messaging>,
}

/// What a messaging item is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Message,
    /// A message the page itself sent, echoed back
    Echo,
    Postback,
    Delivery,
    Read,
    Referral,
    Unknown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Messaging {
    pub sender: Option<Participant>,
    pub recipient: Option<Participant>,
    /// Milliseconds since the epoch
    pub timestamp: Option<i64>,
    pub message: Option<ReceivedMessage>,
    pub postback: Option<Postback>,
    pub delivery: Option<Delivery>,
    pub read: Option<Read>,
    pub referral: Option<Referral>,
}

impl Messaging {
    pub fn kind(&self) -> EventKind {
        if let Some(message) = &self.message {
            if message.is_echo {
                EventKind::Echo
            } else {
                EventKind::Message
            }
        } else if self.postback.is_some() {
            EventKind::Postback
        } else if self.delivery.is_some() {
            EventKind::Delivery
        } else if self.read.is_some() {
            EventKind::Read
        } else if self.referral.is_some() {
            EventKind::Referral
        } else {
            EventKind::Unknown
        }
    }

    pub fn sender_id(&self) -> Option<&str> {
        self.sender.as_ref().map(|p| p.id.as_str())
    }

    /// `timestamp` as a UTC datetime. Missing or zero timestamps give `None`.
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        self.timestamp
            .filter(|ts| *ts > 0)
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Participant {
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Referral {
    #[serde(rename = "ref")]
    pub value: Option<String>,
    pub source: Option<String>,
    #[serde(rename = "type")]
    pub referral_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Read {
    pub watermark: Option<i64>,
    pub seq: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Delivery {
    #[serde(default)]
    pub mids: Vec<String>,
    pub watermark: Option<i64>,
    pub seq: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReceivedMessage {
    pub mid: Option<String>,
    pub seq: Option<i64>,
    pub text: Option<String>,
    #[serde(default)]
    pub is_echo: bool,
    pub app_id: Option<u64>,
    #[serde(default)]
    pub attachments: Vec<ReceivedAttachment>,
    pub quick_reply: Option<ReceivedQuickReply>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReceivedAttachment {
    #[serde(rename = "type")]
    pub attachment_type: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub payload: Option<ReceivedPayload>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReceivedPayload {
    pub url: Option<String>,
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coordinates {
    pub lat: f64,
    pub long: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReceivedQuickReply {
    #[serde(default)]
    pub payload: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Postback {
    pub payload: Option<String>,
    pub title: Option<String>,
    pub referral: Option<Referral>,
}
