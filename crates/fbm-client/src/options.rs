//! `#`-delimited option specs
//!
//! Buttons are written `buttonType#payload#url#buttonText` and quick replies
//! `title#payload`. Fields are mapped by position and the field count must
//! match exactly, so a `#` cannot appear inside a field. Empty payloads and
//! URLs are left out of the resulting record.

use fbm_model::{Button, ButtonType, QuickReply, TemplateElement};

use crate::error::{MessengerError, OptionParseError, Result};

const BUTTON_FIELDS: usize = 4;
const QUICK_REPLY_FIELDS: usize = 2;

/// Parse one `buttonType#payload#url#buttonText` spec
pub fn parse_button(spec: &str) -> std::result::Result<Button, OptionParseError> {
    let [kind, payload, url, text] = split_fields::<BUTTON_FIELDS>("button", spec)?;

    let button_type = ButtonType::from_wire(kind)
        .ok_or_else(|| OptionParseError::UnknownButtonType(kind.to_string()))?;

    Ok(Button {
        button_type,
        title: non_empty(text),
        payload: (!payload.trim().is_empty()).then(|| payload.to_string()),
        url: non_empty(url),
    })
}

/// Parse one `title#payload` spec into a text quick reply
pub fn parse_quick_reply(spec: &str) -> std::result::Result<QuickReply, OptionParseError> {
    let [title, payload] = split_fields::<QUICK_REPLY_FIELDS>("quick reply", spec)?;
    Ok(QuickReply::text(title, payload))
}

/// Split `spec` on `#` into exactly `N` fields
fn split_fields<'a, const N: usize>(
    kind: &'static str,
    spec: &'a str,
) -> std::result::Result<[&'a str; N], OptionParseError> {
    let parts: Vec<&str> = spec.split('#').collect();
    let found = parts.len();

    parts.try_into().map_err(|_| {
        if found < N {
            OptionParseError::TooFewSegments {
                kind,
                input: spec.to_string(),
                expected: N,
                found,
            }
        } else {
            OptionParseError::TooManySegments {
                kind,
                input: spec.to_string(),
                expected: N,
                found,
            }
        }
    })
}

/// Build a single-card generic template from button specs.
///
/// The subtitle and image URL are only set when longer than one character.
pub fn generate_button_elements<S: AsRef<str>>(
    title: &str,
    subtitle: &str,
    image_url: &str,
    options: &[S],
) -> std::result::Result<Vec<TemplateElement>, OptionParseError> {
    let buttons = options
        .iter()
        .map(|spec| parse_button(spec.as_ref()))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut element = TemplateElement::new(title).with_buttons(buttons);
    if subtitle.chars().count() > 1 {
        element.subtitle = Some(subtitle.to_string());
    }
    if image_url.chars().count() > 1 {
        element.image_url = Some(image_url.to_string());
    }

    Ok(vec![element])
}

/// Parse a list of `title#payload` specs. An empty list is an error.
pub fn generate_quick_reply_options<S: AsRef<str>>(options: &[S]) -> Result<Vec<QuickReply>> {
    if options.is_empty() {
        return Err(MessengerError::NoQuickReplies);
    }

    options
        .iter()
        .map(|spec| parse_quick_reply(spec.as_ref()).map_err(MessengerError::from))
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
