//! Messenger Send API client

use fbm_model::{Button, Outbound, QuickReply, TemplateElement, User};
use reqwest::header::{CONNECTION, CONTENT_TYPE};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::builder::{self, ShareContent};
use crate::config::MessengerConfig;
use crate::error::{MessengerError, Result};
use crate::verify;

/// Profile fields requested by [`MessengerClient::get_user_data`]
pub const USER_FIELDS: &str = "first_name,last_name,profile_pic,locale,timezone,gender";

/// Reply to a successful send. Both fields are absent in dry-run mode or
/// when the platform answered with an empty body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SendResponse {
    pub recipient_id: Option<String>,
    pub message_id: Option<String>,
}

/// Send API client
///
/// Each call makes exactly one request and closes the connection afterwards.
#[derive(Clone)]
pub struct MessengerClient {
    client: Client,
    config: MessengerConfig,
}

impl MessengerClient {
    /// Create a client with a connection-closing HTTP client
    pub fn new(config: MessengerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &MessengerConfig {
        &self.config
    }

    /// POST any Send API body to `/me/messages`
    pub async fn send(&self, outbound: impl Into<Outbound>) -> Result<SendResponse> {
        let outbound: Outbound = outbound.into();
        let outbound = outbound.with_default_messaging_type(self.config.messaging_type);

        if outbound.recipient_id().trim().is_empty() {
            return Err(MessengerError::EmptyRecipient);
        }

        let payload = serde_json::to_string(&outbound)?;

        if self.config.dry_run {
            let pretty = serde_json::to_string_pretty(&outbound)?;
            info!(
                "Dry run, not sending {} to {}:\n{}",
                outbound.kind(),
                outbound.recipient_id(),
                pretty
            );
            return Ok(SendResponse::default());
        }

        let (request, called_url) = match self.config.endpoint_override() {
            Some(url) => (self.client.post(url), redact_access_token(url)),
            None => {
                let url = format!("{}/me/messages", self.config.api_base());
                let request = self
                    .client
                    .post(&url)
                    .query(&[("access_token", &self.config.access_token)]);
                (request, format!("{}?access_token=***", url))
            }
        };

        debug!(
            "Sending {} to {} via {}",
            outbound.kind(),
            outbound.recipient_id(),
            called_url
        );

        let response = request
            .header(CONTENT_TYPE, "application/json")
            .header(CONNECTION, "close")
            .body(payload.clone())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            error!("Send API error: {} - {}", status, body);
            return Err(MessengerError::Platform {
                status: status.as_u16(),
                status_line: status.to_string(),
                body,
                url: called_url,
                payload,
            });
        }

        let sent: SendResponse = serde_json::from_str(&body).unwrap_or_default();
        info!(
            "Message sent to {}: {:?}",
            outbound.recipient_id(),
            sent.message_id
        );

        Ok(sent)
    }

    /// Send a text message
    pub async fn send_text_message(&self, recipient: &str, text: &str) -> Result<SendResponse> {
        self.send(builder::text_letter(recipient, text)?).await
    }

    /// Send an image by URL
    pub async fn send_image_message(&self, recipient: &str, url: &str) -> Result<SendResponse> {
        self.send(builder::image_letter(recipient, url)).await
    }

    /// Send an audio clip by URL
    pub async fn send_audio_message(&self, recipient: &str, url: &str) -> Result<SendResponse> {
        self.send(builder::audio_letter(recipient, url)).await
    }

    /// Turn the typing indicator on or off
    pub async fn send_typing_message(&self, recipient: &str, on: bool) -> Result<SendResponse> {
        self.send(builder::typing_action(recipient, on)).await
    }

    /// Send a generic template
    pub async fn send_generic_template_message(
        &self,
        recipient: &str,
        elements: Vec<TemplateElement>,
    ) -> Result<SendResponse> {
        self.send(builder::generic_template_letter(recipient, elements))
            .await
    }

    /// Send a button template
    pub async fn send_button_message(
        &self,
        recipient: &str,
        text: &str,
        buttons: Vec<Button>,
    ) -> Result<SendResponse> {
        self.send(builder::button_letter(recipient, text, buttons))
            .await
    }

    /// Card with a button that opens an external page
    pub async fn send_url_button_message(
        &self,
        recipient: &str,
        text: &str,
        button_title: &str,
        url: &str,
    ) -> Result<SendResponse> {
        self.send(builder::url_button_letter(recipient, text, button_title, url))
            .await
    }

    /// Send a card with the share button
    pub async fn send_share_message(
        &self,
        recipient: &str,
        title: &str,
        subtitle: &str,
    ) -> Result<SendResponse> {
        self.send(builder::share_letter(recipient, title, subtitle))
            .await
    }

    /// Send an invite card with custom share contents
    pub async fn send_share_content(
        &self,
        recipient: &str,
        content: &ShareContent,
    ) -> Result<SendResponse> {
        self.send(builder::share_content_invite(recipient, content))
            .await
    }

    /// Send text with quick reply options
    pub async fn send_quick_reply(
        &self,
        recipient: &str,
        text: &str,
        options: Vec<QuickReply>,
    ) -> Result<SendResponse> {
        self.send(builder::quick_reply_letter(recipient, text, options)?)
            .await
    }

    /// Ask the user to share their location
    pub async fn send_ask_user_location(&self, recipient: &str, text: &str) -> Result<SendResponse> {
        self.send(builder::ask_location_letter(recipient, text)).await
    }

    /// Fetch the profile of a user who has messaged the page
    pub async fn get_user_data(&self, user_id: &str) -> Result<User> {
        if user_id.trim().is_empty() {
            return Err(MessengerError::EmptyUserId);
        }

        let url = format!("{}/{}", self.config.api_base(), user_id);

        debug!("Getting profile for user: {}", user_id);

        let response = self
            .client
            .get(&url)
            .header(CONNECTION, "close")
            .query(&[
                ("fields", USER_FIELDS),
                ("access_token", self.config.access_token.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            error!("Get profile failed: {} - {}", status, body);
            return Err(MessengerError::UserFetch {
                status: status.as_u16(),
                body,
            });
        }

        let user: User = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to decode profile of {}: {}", user_id, e);
            MessengerError::Json(e)
        })?;

        debug!("Got user profile: {:?}", user);
        Ok(user)
    }

    /// Check a webhook signature header against the configured app secret
    pub fn verify_signature(&self, body: &[u8], signature_header: &str) -> Result<bool> {
        let secret = self
            .config
            .app_secret
            .as_deref()
            .ok_or(MessengerError::AppSecretNotSet)?;

        Ok(verify::verify_signature_header(secret, body, signature_header))
    }
}

/// Mask the value of an `access_token` query parameter
fn redact_access_token(url: &str) -> String {
    let Some(start) = url.find("access_token=") else {
        return url.to_string();
    };
    let value_start = start + "access_token=".len();
    let value_end = url[value_start..]
        .find('&')
        .map(|i| value_start + i)
        .unwrap_or(url.len());

    format!("{}***{}", &url[..value_start], &url[value_end..])
}
