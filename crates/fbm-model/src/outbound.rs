//! The closed set of bodies that can be POSTed to `/me/messages`

use serde::Serialize;

use crate::letter::{Letter, MessagingType, SenderAction};
use crate::share::SharedInvite;

/// Any request body accepted by the Send API
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outbound {
    Letter(Letter),
    SenderAction(SenderAction),
    SharedInvite(SharedInvite),
}

impl Outbound {
    pub fn recipient_id(&self) -> &str {
        match self {
            Outbound::Letter(letter) => &letter.recipient.id,
            Outbound::SenderAction(action) => &action.recipient.id,
            Outbound::SharedInvite(invite) => &invite.recipient.id,
        }
    }

    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Outbound::Letter(_) => "letter",
            Outbound::SenderAction(_) => "sender_action",
            Outbound::SharedInvite(_) => "shared_invite",
        }
    }

    pub fn messaging_type(&self) -> Option<MessagingType> {
        match self {
            Outbound::Letter(letter) => letter.messaging_type,
            Outbound::SenderAction(action) => action.messaging_type,
            Outbound::SharedInvite(invite) => invite.messaging_type,
        }
    }

    /// Tag the body with `messaging_type` unless the caller already chose one
    pub fn with_default_messaging_type(mut self, messaging_type: MessagingType) -> Self {
        let slot = match &mut self {
            Outbound::Letter(letter) => &mut letter.messaging_type,
            Outbound::SenderAction(action) => &mut action.messaging_type,
            Outbound::SharedInvite(invite) => &mut invite.messaging_type,
        };
        slot.get_or_insert(messaging_type);
        self
    }
}

impl From<Letter> for Outbound {
    fn from(letter: Letter) -> Self {
        Outbound::Letter(letter)
    }
}

impl From<SenderAction> for Outbound {
    fn from(action: SenderAction) -> Self {
        Outbound::SenderAction(action)
    }
}

impl From<SharedInvite> for Outbound {
    fn from(invite: SharedInvite) -> Self {
        Outbound::SharedInvite(invite)
    }
}
