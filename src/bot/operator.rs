//! The operator: the Telegram user the bot answers for.

use teloxide::types::{Message, MessageEntityKind, MessageEntityRef, MessageKind, UserId};

/// Identity of the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    pub id: UserId,
    /// Username without `@`, used to match `@mentions`.
    pub username: Option<String>,
}

impl Operator {
    pub fn new(id: u64, username: Option<String>) -> Self {
        Self {
            id: UserId(id),
            username: username.map(|u| u.trim_start_matches('@').to_string()),
        }
    }

    /// Whether the operator sent this message.
    pub fn is_sender(&self, msg: &Message) -> bool {
        msg.from.as_ref().is_some_and(|u| u.id == self.id)
    }

    /// Whether a group message is aimed at the operator: a reply to one of
    /// their messages, a text mention, or an `@username` mention.
    pub fn is_mentioned(&self, msg: &Message) -> bool {
        let replied_to_operator = msg
            .reply_to_message()
            .is_some_and(|reply| self.is_sender(reply));
        if replied_to_operator {
            return true;
        }

        let entities = msg.parse_entities().or_else(|| msg.parse_caption_entities());
        entities.is_some_and(|entities| self.mentioned_in(&entities))
    }

    /// Whether any entity mentions the operator.
    pub fn mentioned_in(&self, entities: &[MessageEntityRef<'_>]) -> bool {
        entities.iter().any(|entity| match entity.kind() {
            MessageEntityKind::TextMention { user } => user.id == self.id,
            MessageEntityKind::Mention => self.username.as_deref().is_some_and(|username| {
                entity
                    .text()
                    .trim_start_matches('@')
                    .eq_ignore_ascii_case(username)
            }),
            _ => false,
        })
    }
}

/// Whether an incoming message should go through AFK handling.
///
/// Qualifies when it is a regular (non-service) message not sent by the
/// operator, arriving in a private chat or mentioning the operator in a group.
pub fn is_afk_candidate(msg: &Message, operator: &Operator) -> bool {
    if operator.is_sender(msg) || !matches!(msg.kind, MessageKind::Common(_)) {
        return false;
    }

    if msg.chat.is_private() {
        return true;
    }

    (msg.chat.is_group() || msg.chat.is_supergroup()) && operator.is_mentioned(msg)
}
