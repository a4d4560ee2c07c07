//! fbm-model: Messenger Platform Send API data model
//!
//! Plain records mirroring the JSON the Graph API accepts on
//! `/me/messages`, plus the passive decode target for inbound webhooks.
//! Optional fields left empty are not written to the wire.

pub mod letter;
pub mod outbound;
pub mod share;
pub mod template;
pub mod user;
pub mod webhook;

pub use letter::{
    Attachment, AttachmentType, Letter, Message, MessagePayload, MessagingType, QuickReply,
    QuickReplyContentType, Recipient, SenderAction, SenderActionState, TemplateType,
};
pub use outbound::Outbound;
pub use share::{
    ShareButton, ShareContents, SharedAttachment, SharedElement, SharedInvite, SharedMessage,
    SharedPayload,
};
pub use template::{Button, ButtonType, DefaultAction, TemplateElement};
pub use user::User;
pub use webhook::{EventKind, Messaging, WebhookEntry, WebhookEvent};
