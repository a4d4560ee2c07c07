//! Share-button subtree
//!
//! A shared invite is a generic template whose cards carry `element_share`
//! buttons. Each share button embeds, under `share_contents`, the card the
//! person receiving the share will see.

use serde::{Deserialize, Serialize};

use crate::letter::{Attachment, AttachmentType, MessagingType, Recipient, TemplateType};
use crate::template::{ButtonType, TemplateElement};

/// Content forwarded when the share button is pressed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareContents {
    pub attachment: Attachment,
}

impl ShareContents {
    pub fn generic(elements: Vec<TemplateElement>) -> Self {
        Self {
            attachment: Attachment::generic_template(elements),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareButton {
    #[serde(rename = "type")]
    pub button_type: ButtonType,
    pub share_contents: ShareContents,
}

impl ShareButton {
    pub fn new(share_contents: ShareContents) -> Self {
        Self {
            button_type: ButtonType::ElementShare,
            share_contents,
        }
    }
}

/// Card shown to the sender, carrying share buttons
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SharedElement {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<ShareButton>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedPayload {
    pub template_type: TemplateType,
    pub elements: Vec<SharedElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedAttachment {
    #[serde(rename = "type")]
    pub attachment_type: AttachmentType,
    pub payload: SharedPayload,
}

impl SharedAttachment {
    pub fn generic(elements: Vec<SharedElement>) -> Self {
        Self {
            attachment_type: AttachmentType::Template,
            payload: SharedPayload {
                template_type: TemplateType::Generic,
                elements,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedMessage {
    pub attachment: SharedAttachment,
}

/// Envelope for a message carrying share buttons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedInvite {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messaging_type: Option<MessagingType>,
    pub recipient: Recipient,
    pub message: SharedMessage,
}

impl SharedInvite {
    pub fn new(recipient_id: impl Into<String>, attachment: SharedAttachment) -> Self {
        Self {
            messaging_type: None,
            recipient: Recipient::new(recipient_id),
            message: SharedMessage { attachment },
        }
    }
}
