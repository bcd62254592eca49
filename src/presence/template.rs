//! Custom AFK notification template.

use thiserror::Error;

/// Storage namespace of the template.
pub const TEMPLATE_NAMESPACE: &str = "core.afk";

/// Storage key of the template.
pub const TEMPLATE_KEY: &str = "afk_msg";

/// Longest accepted template, in characters.
pub const MAX_TEMPLATE_CHARS: usize = 200;

pub const REASON_TOKEN: &str = "{reason}";
pub const LAST_SEEN_TOKEN: &str = "{last_seen}";

/// Why a template was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("command was not sent as a reply")]
    NoReply,
    #[error("replied message has no text or caption")]
    NoText,
    #[error("template is {0} characters long")]
    TooLong(usize),
    #[error("template has no {{reason}} placeholder")]
    MissingReason,
    #[error("template has no {{last_seen}} placeholder")]
    MissingLastSeen,
}

impl TemplateError {
    /// Translation key of the message shown to the operator.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Self::NoReply => "afk.template_no_reply",
            Self::NoText => "afk.template_no_text",
            Self::TooLong(_) => "afk.template_too_long",
            Self::MissingReason => "afk.template_no_reason",
            Self::MissingLastSeen => "afk.template_no_last_seen",
        }
    }
}

/// Validate the text of the message `setafkmsg` replied to.
///
/// `replied` is `None` when there was no reply at all, and `Some(None)` when
/// the replied message carries neither text nor caption.
pub fn validate_template(replied: Option<Option<&str>>) -> Result<&str, TemplateError> {
    let text = replied
        .ok_or(TemplateError::NoReply)?
        .filter(|t| !t.trim().is_empty())
        .ok_or(TemplateError::NoText)?;

    let len = text.chars().count();
    if len > MAX_TEMPLATE_CHARS {
        return Err(TemplateError::TooLong(len));
    }
    if !text.contains(REASON_TOKEN) {
        return Err(TemplateError::MissingReason);
    }
    if !text.contains(LAST_SEEN_TOKEN) {
        return Err(TemplateError::MissingLastSeen);
    }

    Ok(text)
}

/// Substitute both placeholders in one pass.
///
/// Substituted values are never expanded again, so a reason containing
/// `{last_seen}` is shown literally.
pub fn render_template(template: &str, reason: &str, last_seen: &str) -> String {
    template
        .split(LAST_SEEN_TOKEN)
        .map(|piece| piece.replace(REASON_TOKEN, reason))
        .collect::<Vec<_>>()
        .join(last_seen)
}
