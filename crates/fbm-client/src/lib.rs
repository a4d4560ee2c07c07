//! fbm-client: Facebook Messenger Send API client
//!
//! Builds Send API bodies from plain values, POSTs them to
//! `/<version>/me/messages`, fetches user profiles and checks webhook
//! signatures.
//!
//! ```no_run
//! use fbm_client::{MessengerClient, MessengerConfig};
//!
//! # async fn run() -> fbm_client::Result<()> {
//! let client = MessengerClient::new(MessengerConfig::from_env()?)?;
//! client.send_typing_message("1234", true).await?;
//! client.send_text_message("1234", "Hello!").await?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod client;
pub mod config;
pub mod error;
pub mod options;
pub mod verify;

pub use builder::{ShareCard, ShareContent};
pub use client::{MessengerClient, SendResponse};
pub use config::MessengerConfig;
pub use error::{MessengerError, OptionParseError, Result};
pub use options::{
    generate_button_elements, generate_quick_reply_options, parse_button, parse_quick_reply,
};
pub use verify::{verify_signature, verify_signature_header, verify_signature_sha256};

pub use fbm_model as model;
