//! AFK event handlers.
//!
//! Notify people who write to the operator while they are away, and end
//! away mode as soon as the operator sends anything.

use std::time::Duration;

use teloxide::prelude::*;
use teloxide::types::MessageId;
use tracing::{debug, info};

use crate::bot::{AppState, Messenger, ThrottledBot, delete_later};
use crate::database::KvStore;
use crate::presence::notice::{render_notice, render_summary};
use crate::presence::template::{TEMPLATE_KEY, TEMPLATE_NAMESPACE};
use crate::presence::{ChatKind, Notice};
use crate::plugins::afk::SUMMARY_TTL;
use crate::utils::elapsed_secs;

/// How long a notice stays in the sender's chat.
pub const NOTICE_TTL: Duration = Duration::from_secs(30);

/// Handle a direct message or a group mention while possibly away.
pub async fn incoming_message(bot: ThrottledBot, msg: Message, state: AppState) -> anyhow::Result<()> {
    let kind = if msg.chat.is_private() {
        ChatKind::Direct
    } else {
        ChatKind::Group
    };

    notify_sender(&bot, &state, msg.chat.id, kind).await
}

/// Handle any operator message that is not a command.
pub async fn operator_activity(bot: ThrottledBot, msg: Message, state: AppState) -> anyhow::Result<()> {
    auto_return(&bot, &state, msg.chat.id, msg.id).await
}

pub(crate) async fn notify_sender<M: Messenger>(
    messenger: &M,
    state: &AppState,
    chat_id: ChatId,
    kind: ChatKind,
) -> anyhow::Result<()> {
    // Counting happens under the tracker lock; sending happens after.
    let Some(notification) = state.presence.observe(kind, chat_id.0) else {
        return Ok(());
    };

    let custom = match notification.notice {
        Notice::Greeting => state.store.get_string(TEMPLATE_NAMESPACE, TEMPLATE_KEY).await?,
        Notice::Reminder | Notice::Nag => None,
    };

    let text = render_notice(&notification, elapsed_secs(notification.since), custom.as_deref());
    let sent = messenger.send_text(chat_id, text).await?;
    debug!("Sent {:?} AFK notice to chat {}", notification.notice, chat_id);

    delete_later(messenger.clone(), chat_id, vec![sent], NOTICE_TTL);
    Ok(())
}

pub(crate) async fn auto_return<M: Messenger>(
    messenger: &M,
    state: &AppState,
    chat_id: ChatId,
    message_id: MessageId,
) -> anyhow::Result<()> {
    let Some(summary) = state.presence.leave() else {
        return Ok(());
    };

    info!(
        "Operator is back (auto): {} messages from {} chats",
        summary.messages, summary.chats
    );

    let text = render_summary(&summary, elapsed_secs(summary.since));
    let reply = messenger.reply_text(chat_id, message_id, text).await?;
    delete_later(messenger.clone(), chat_id, vec![reply], SUMMARY_TTL);

    Ok(())
}
