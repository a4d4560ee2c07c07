//! Message builders
//!
//! Turn plain strings into Send API bodies. Nothing here touches the network.

use fbm_model::{
    Attachment, AttachmentType, Button, Letter, Message, QuickReply, SenderAction,
    SenderActionState, ShareButton, ShareContents, SharedAttachment, SharedElement, SharedInvite,
    TemplateElement,
};

use crate::error::{MessengerError, Result};

/// One card of a share-content message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareCard {
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
}

/// Two-level share message.
///
/// `sender` is the card shown in the conversation, with a share button.
/// `recipient` is the card forwarded when that button is used, with one
/// `web_url` button labelled `button_title` that opens `destination_url`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareContent {
    pub sender: ShareCard,
    pub recipient: ShareCard,
    pub button_title: String,
    pub destination_url: String,
}

/// Plain text message. Blank text is rejected.
pub fn text_letter(recipient: &str, text: &str) -> Result<Letter> {
    if text.trim().is_empty() {
        return Err(MessengerError::EmptyText);
    }
    Ok(Letter::new(recipient, Message::text(text)))
}

/// Image attachment loaded from `url`
pub fn image_letter(recipient: &str, url: &str) -> Letter {
    media_letter(recipient, AttachmentType::Image, url)
}

/// Audio attachment loaded from `url`
pub fn audio_letter(recipient: &str, url: &str) -> Letter {
    media_letter(recipient, AttachmentType::Audio, url)
}

fn media_letter(recipient: &str, attachment_type: AttachmentType, url: &str) -> Letter {
    Letter::new(
        recipient,
        Message::attachment(Attachment::media(attachment_type, url)),
    )
}

/// `typing_on` when `on`, `typing_off` otherwise
pub fn typing_action(recipient: &str, on: bool) -> SenderAction {
    SenderAction::new(recipient, SenderActionState::typing(on))
}

/// Generic template carousel
pub fn generic_template_letter(recipient: &str, elements: Vec<TemplateElement>) -> Letter {
    Letter::new(
        recipient,
        Message::attachment(Attachment::generic_template(elements)),
    )
}

/// Button template: `text` above a row of buttons
pub fn button_letter(recipient: &str, text: &str, buttons: Vec<Button>) -> Letter {
    Letter::new(
        recipient,
        Message::attachment(Attachment::button_template(text, buttons)),
    )
}

/// One card titled `text` with a single button opening `url`
pub fn url_button_letter(recipient: &str, text: &str, button_title: &str, url: &str) -> Letter {
    let element = TemplateElement::new(text).with_buttons(vec![Button::web_url(button_title, url)]);
    generic_template_letter(recipient, vec![element])
}

/// One card with the native share button
pub fn share_letter(recipient: &str, title: &str, subtitle: &str) -> Letter {
    let mut element = TemplateElement::new(title).with_buttons(vec![Button::element_share()]);
    element.subtitle = optional(subtitle);
    generic_template_letter(recipient, vec![element])
}

/// Invite card the user can forward, carrying its own shared card
pub fn share_content_invite(recipient: &str, content: &ShareContent) -> SharedInvite {
    let mut forwarded = TemplateElement::new(&content.recipient.title).with_buttons(vec![
        Button::web_url(&content.button_title, &content.destination_url),
    ]);
    forwarded.subtitle = optional(&content.recipient.subtitle);
    forwarded.image_url = optional(&content.recipient.image_url);

    let shown = SharedElement {
        title: content.sender.title.clone(),
        subtitle: optional(&content.sender.subtitle),
        image_url: optional(&content.sender.image_url),
        item_url: None,
        buttons: vec![ShareButton::new(ShareContents::generic(vec![forwarded]))],
    };

    SharedInvite::new(recipient, SharedAttachment::generic(vec![shown]))
}

/// Text with quick reply chips. At least one option is required.
pub fn quick_reply_letter(recipient: &str, text: &str, options: Vec<QuickReply>) -> Result<Letter> {
    if options.is_empty() {
        return Err(MessengerError::NoQuickReplies);
    }

    let message = Message {
        text: Some(text.to_string()),
        quick_replies: options,
        ..Default::default()
    };
    Ok(Letter::new(recipient, message))
}

/// Text with a single "send location" chip
pub fn ask_location_letter(recipient: &str, text: &str) -> Letter {
    let message = Message {
        text: Some(text.to_string()),
        quick_replies: vec![QuickReply::location()],
        ..Default::default()
    };
    Letter::new(recipient, message)
}

fn optional(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
