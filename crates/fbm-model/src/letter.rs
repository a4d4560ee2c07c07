//! Outbound message envelope and body types

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::template::{Button, TemplateElement};

/// Messaging type tag required by the Send API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessagingType {
    /// Reply to a message the user sent
    #[default]
    Response,
    /// Proactive update sent inside the messaging window
    Update,
    /// Tagged message sent outside the messaging window
    MessageTag,
}

impl MessagingType {
    /// Map the numeric code (1, 2, 3) to a tag. Unknown codes fall back to
    /// `Response`.
    pub fn from_code(code: i32) -> Self {
        match code {
            2 => MessagingType::Update,
            3 => MessagingType::MessageTag,
            _ => MessagingType::Response,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            MessagingType::Response => 1,
            MessagingType::Update => 2,
            MessagingType::MessageTag => 3,
        }
    }

    /// Wire string for this tag
    pub fn as_str(self) -> &'static str {
        match self {
            MessagingType::Response => "RESPONSE",
            MessagingType::Update => "UPDATE",
            MessagingType::MessageTag => "MESSAGE_TAG",
        }
    }
}

impl fmt::Display for MessagingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts either the wire string (any case) or the numeric code.
/// Anything unrecognized becomes `Response`.
impl FromStr for MessagingType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i32>() {
            return Ok(Self::from_code(code));
        }
        Ok(match s.to_ascii_uppercase().as_str() {
            "UPDATE" => MessagingType::Update,
            "MESSAGE_TAG" => MessagingType::MessageTag,
            _ => MessagingType::Response,
        })
    }
}

/// Message recipient (page-scoped user id)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub id: String,
}

impl Recipient {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// A complete message to a Messenger user: who receives it and what it says.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Letter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messaging_type: Option<MessagingType>,
    pub recipient: Recipient,
    pub message: Message,
    /// Message tag, only meaningful with `MessagingType::MessageTag`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl Letter {
    pub fn new(recipient_id: impl Into<String>, message: Message) -> Self {
        Self {
            messaging_type: None,
            recipient: Recipient::new(recipient_id),
            message,
            tag: None,
        }
    }

    pub fn with_messaging_type(mut self, messaging_type: MessagingType) -> Self {
        self.messaging_type = Some(messaging_type);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// Body of a letter
///
/// Either `text` or `attachment` carries the content. Quick replies may ride
/// along with text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quick_replies: Vec<QuickReply>,
}

impl Message {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn attachment(attachment: Attachment) -> Self {
        Self {
            attachment: Some(attachment),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentType {
    Image,
    Audio,
    Video,
    File,
    Template,
}

/// Rich content wrapper; the payload shape depends on `attachment_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "type")]
    pub attachment_type: AttachmentType,
    pub payload: MessagePayload,
}

impl Attachment {
    /// Media attachment (image, audio, video, file) pointing at a URL
    pub fn media(attachment_type: AttachmentType, url: impl Into<String>) -> Self {
        Self {
            attachment_type,
            payload: MessagePayload {
                url: Some(url.into()),
                ..Default::default()
            },
        }
    }

    /// Generic template carrying one or more cards
    pub fn generic_template(elements: Vec<TemplateElement>) -> Self {
        Self {
            attachment_type: AttachmentType::Template,
            payload: MessagePayload {
                template_type: Some(TemplateType::Generic),
                elements,
                ..Default::default()
            },
        }
    }

    /// Button template: text with buttons below it
    pub fn button_template(text: impl Into<String>, buttons: Vec<Button>) -> Self {
        Self {
            attachment_type: AttachmentType::Template,
            payload: MessagePayload {
                template_type: Some(TemplateType::Button),
                text: Some(text.into()),
                buttons,
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    Generic,
    Button,
}

/// Attachment payload
///
/// Media attachments use `url`. Generic templates use `elements`, button
/// templates use `text` and `buttons`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessagePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_type: Option<TemplateType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<TemplateElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Button>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickReplyContentType {
    #[default]
    Text,
    Location,
    UserPhoneNumber,
    UserEmail,
}

/// Quick reply chip shown under a text message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickReply {
    pub content_type: QuickReplyContentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl QuickReply {
    pub fn text(title: impl Into<String>, payload: impl Into<String>) -> Self {
        let payload = payload.into();
        Self {
            content_type: QuickReplyContentType::Text,
            title: Some(title.into()),
            payload: (!payload.is_empty()).then_some(payload),
            image_url: None,
        }
    }

    /// Chip asking the user to share their location. Carries no title or payload.
    pub fn location() -> Self {
        Self {
            content_type: QuickReplyContentType::Location,
            ..Default::default()
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderActionState {
    TypingOn,
    TypingOff,
    MarkSeen,
}

impl SenderActionState {
    pub fn typing(on: bool) -> Self {
        if on {
            SenderActionState::TypingOn
        } else {
            SenderActionState::TypingOff
        }
    }
}

/// Typing or seen indicator. Has no message body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SenderAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messaging_type: Option<MessagingType>,
    pub recipient: Recipient,
    pub sender_action: SenderActionState,
}

impl SenderAction {
    pub fn new(recipient_id: impl Into<String>, state: SenderActionState) -> Self {
        Self {
            messaging_type: None,
            recipient: Recipient::new(recipient_id),
            sender_action: state,
        }
    }
}
