//! Template cards and buttons

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonType {
    WebUrl,
    Postback,
    ElementShare,
    PhoneNumber,
    AccountLink,
    AccountUnlink,
}

impl ButtonType {
    /// Look up a button type by its wire name (`web_url`, `postback`, ...)
    pub fn from_wire(name: &str) -> Option<Self> {
        match name.trim() {
            "web_url" => Some(ButtonType::WebUrl),
            "postback" => Some(ButtonType::Postback),
            "element_share" => Some(ButtonType::ElementShare),
            "phone_number" => Some(ButtonType::PhoneNumber),
            "account_link" => Some(ButtonType::AccountLink),
            "account_unlink" => Some(ButtonType::AccountUnlink),
            _ => None,
        }
    }
}

/// Action affordance attached to a template or card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    #[serde(rename = "type")]
    pub button_type: ButtonType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Button {
    pub fn web_url(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            button_type: ButtonType::WebUrl,
            title: Some(title.into()),
            payload: None,
            url: Some(url.into()),
        }
    }

    pub fn postback(title: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            button_type: ButtonType::Postback,
            title: Some(title.into()),
            payload: Some(payload.into()),
            url: None,
        }
    }

    /// Native share button. Messenger renders its own label.
    pub fn element_share() -> Self {
        Self {
            button_type: ButtonType::ElementShare,
            title: None,
            payload: None,
            url: None,
        }
    }
}

/// Action taken when the card itself is tapped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultAction {
    #[serde(rename = "type")]
    pub action_type: ButtonType,
    pub url: String,
}

impl DefaultAction {
    pub fn web_url(url: impl Into<String>) -> Self {
        Self {
            action_type: ButtonType::WebUrl,
            url: url.into(),
        }
    }
}

/// One card in a generic template
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateElement {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_action: Option<DefaultAction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Button>,
}

impl TemplateElement {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_item_url(mut self, item_url: impl Into<String>) -> Self {
        self.item_url = Some(item_url.into());
        self
    }

    pub fn with_default_action(mut self, action: DefaultAction) -> Self {
        self.default_action = Some(action);
        self
    }

    pub fn with_buttons(mut self, buttons: Vec<Button>) -> Self {
        self.buttons = buttons;
        self
    }
}
