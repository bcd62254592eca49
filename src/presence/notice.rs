//! Rendering of AFK notices and return summaries.

use crate::i18n::t;
use crate::utils::{away_for, html_escape, natural_time};

use super::template::render_template;
use super::{AwaySummary, Notice, Notification};

/// Render a notification. `custom` is only used for the greeting.
pub fn render_notice(notification: &Notification, elapsed_secs: u64, custom: Option<&str>) -> String {
    let reason = html_escape(&notification.reason);

    match (notification.notice, custom) {
        (Notice::Greeting, Some(template)) => {
            let text = render_template(template, &notification.reason, &away_for(elapsed_secs));
            t("afk.custom").replace("{text}", &html_escape(&text))
        }
        (Notice::Greeting | Notice::Reminder, _) => t("afk.notice")
            .replace("{last_seen}", &natural_time(elapsed_secs))
            .replace("{reason}", &reason),
        (Notice::Nag, _) => t("afk.nag").replace("{last_seen}", &natural_time(elapsed_secs)),
    }
}

/// Render the "while you were away" summary.
pub fn render_summary(summary: &AwaySummary, elapsed_secs: u64) -> String {
    t("afk.summary")
        .replace("{duration}", &away_for(elapsed_secs))
        .replace("{messages}", &summary.messages.to_string())
        .replace("{chats}", &summary.chats.to_string())
}
