//! AFK command handlers.
//!
//! Commands for entering and leaving away mode and managing the custom
//! notification template. Only the operator reaches these handlers.

use std::time::Duration;

use serde_json::Value;
use teloxide::prelude::*;
use teloxide::types::MessageId;
use tracing::info;

use crate::bot::{AppState, Messenger, ThrottledBot, delete_later};
use crate::database::KvStore;
use crate::i18n::t;
use crate::presence::notice::render_summary;
use crate::presence::template::{
    MAX_TEMPLATE_CHARS, TEMPLATE_KEY, TEMPLATE_NAMESPACE, TemplateError, validate_template,
};
use crate::utils::{elapsed_secs, html_escape, optional_arg};

/// How long the "while you were away" summary stays visible.
pub const SUMMARY_TTL: Duration = Duration::from_secs(5);

/// Handle /afk command - enter away mode.
///
/// Usage: /afk [reason]
pub async fn afk_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
    reason: String,
) -> anyhow::Result<()> {
    go_away(&bot, &state, msg.chat.id, msg.id, optional_arg(&reason)).await
}

/// Handle /unafk command - leave away mode.
pub async fn unafk_command(bot: ThrottledBot, msg: Message, state: AppState) -> anyhow::Result<()> {
    come_back(&bot, &state, msg.chat.id, msg.id).await
}

/// Handle /setafkmsg command - install the replied-to text as template.
pub async fn setafkmsg_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
) -> anyhow::Result<()> {
    let replied = msg
        .reply_to_message()
        .map(|reply| reply.text().or_else(|| reply.caption()));

    set_template(&bot, &state, msg.chat.id, msg.id, replied).await
}

/// Handle /afkmsg command - show the current template.
pub async fn afkmsg_command(bot: ThrottledBot, msg: Message, state: AppState) -> anyhow::Result<()> {
    show_template(&bot, &state, msg.chat.id, msg.id).await
}

/// Handle /resetafkmsg command - go back to the default notice.
pub async fn resetafkmsg_command(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
) -> anyhow::Result<()> {
    reset_template(&bot, &state, msg.chat.id, msg.id).await
}

pub(crate) async fn go_away<M: Messenger>(
    messenger: &M,
    state: &AppState,
    chat_id: ChatId,
    command_id: MessageId,
    reason: Option<String>,
) -> anyhow::Result<()> {
    state.presence.enter(reason, chrono::Utc::now());
    info!("Operator went AFK");

    messenger.remove_message(chat_id, command_id).await
}

pub(crate) async fn come_back<M: Messenger>(
    messenger: &M,
    state: &AppState,
    chat_id: ChatId,
    command_id: MessageId,
) -> anyhow::Result<()> {
    let Some(summary) = state.presence.leave() else {
        return messenger.remove_message(chat_id, command_id).await;
    };

    info!(
        "Operator is back: {} messages from {} chats",
        summary.messages, summary.chats
    );

    let text = render_summary(&summary, elapsed_secs(summary.since));
    let reply = messenger.reply_text(chat_id, command_id, text).await?;
    delete_later(messenger.clone(), chat_id, vec![reply, command_id], SUMMARY_TTL);

    Ok(())
}

fn template_error_text(err: &TemplateError) -> String {
    t(err.i18n_key()).replace("{max}", &MAX_TEMPLATE_CHARS.to_string())
}

pub(crate) async fn set_template<M: Messenger>(
    messenger: &M,
    state: &AppState,
    chat_id: ChatId,
    command_id: MessageId,
    replied: Option<Option<&str>>,
) -> anyhow::Result<()> {
    let template = match validate_template(replied) {
        Ok(template) => template,
        Err(err) => {
            info!("Rejected AFK template: {}", err);
            messenger
                .reply_text(chat_id, command_id, template_error_text(&err))
                .await?;
            return Ok(());
        }
    };

    state
        .store
        .set(TEMPLATE_NAMESPACE, TEMPLATE_KEY, Value::String(template.to_string()))
        .await?;
    info!("Custom AFK message updated");

    messenger
        .reply_text(
            chat_id,
            command_id,
            t("afk.template_set").replace("{text}", &html_escape(template)),
        )
        .await?;
    Ok(())
}

pub(crate) async fn show_template<M: Messenger>(
    messenger: &M,
    state: &AppState,
    chat_id: ChatId,
    command_id: MessageId,
) -> anyhow::Result<()> {
    let text = match state.store.get_string(TEMPLATE_NAMESPACE, TEMPLATE_KEY).await? {
        Some(template) => t("afk.template_current").replace("{text}", &html_escape(&template)),
        None => t("afk.template_none"),
    };

    messenger.reply_text(chat_id, command_id, text).await?;
    Ok(())
}

pub(crate) async fn reset_template<M: Messenger>(
    messenger: &M,
    state: &AppState,
    chat_id: ChatId,
    command_id: MessageId,
) -> anyhow::Result<()> {
    state.store.remove(TEMPLATE_NAMESPACE, TEMPLATE_KEY).await?;
    info!("Custom AFK message removed");

    messenger
        .reply_text(chat_id, command_id, t("afk.template_reset"))
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::bot::Operator;
    use crate::bot::messenger::testing::{Action, RecordingMessenger};
    use crate::database::MemoryStore;
    use crate::presence::ChatKind;

    use super::*;

    const CHAT: ChatId = ChatId(42);
    const COMMAND: MessageId = MessageId(7);

    fn state() -> AppState {
        AppState::new(Arc::new(MemoryStore::new()), Operator::new(42, Some("boss".to_string())))
    }

    async fn stored_template(state: &AppState) -> Option<String> {
        state
            .store
            .get_string(TEMPLATE_NAMESPACE, TEMPLATE_KEY)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_afk_enters_away_and_deletes_command() {
        let messenger = RecordingMessenger::new();
        let state = state();

        go_away(&messenger, &state, CHAT, COMMAND, Some("coding".to_string()))
            .await
            .unwrap();

        assert!(state.presence.is_away());
        assert_eq!(
            messenger.actions(),
            vec![Action::Deleted { chat_id: CHAT, id: COMMAND }]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_unafk_reports_summary_then_cleans_up() {
        let messenger = RecordingMessenger::new();
        let state = state();
        state.presence.enter(Some("coding".to_string()), chrono::Utc::now());

        for (kind, chat, times) in [
            (ChatKind::Group, 1, 3),
            (ChatKind::Group, 2, 1),
            (ChatKind::Direct, 3, 2),
        ] {
            for _ in 0..times {
                state.presence.observe(kind, chat);
            }
        }

        come_back(&messenger, &state, CHAT, COMMAND).await.unwrap();

        assert!(!state.presence.is_away());
        assert_eq!(state.presence.count(ChatKind::Group, 1), None);

        let texts = messenger.texts();
        assert_eq!(texts.len(), 1);
        assert!(texts[0].contains("received 6 messages from 3 chats"));
        assert!(messenger.deleted().is_empty());

        tokio::time::sleep(SUMMARY_TTL + Duration::from_millis(10)).await;
        let deleted = messenger.deleted();
        assert_eq!(deleted.len(), 2);
        assert!(deleted.contains(&COMMAND));
    }

    #[tokio::test]
    async fn test_unafk_when_present_only_deletes_command() {
        let messenger = RecordingMessenger::new();
        let state = state();

        come_back(&messenger, &state, CHAT, COMMAND).await.unwrap();

        assert_eq!(
            messenger.actions(),
            vec![Action::Deleted { chat_id: CHAT, id: COMMAND }]
        );
    }

    #[tokio::test]
    async fn test_set_template_persists_valid_text() {
        let messenger = RecordingMessenger::new();
        let state = state();

        set_template(&messenger, &state, CHAT, COMMAND, Some(Some("Out {last_seen}: {reason}")))
            .await
            .unwrap();

        assert_eq!(
            stored_template(&state).await.as_deref(),
            Some("Out {last_seen}: {reason}")
        );
        assert!(messenger.texts()[0].starts_with("AFK message set to:"));
    }

    #[tokio::test]
    async fn test_set_template_rejections_do_not_persist() {
        let too_long = format!("{{reason}}{{last_seen}}{}", "x".repeat(MAX_TEMPLATE_CHARS));
        let cases: [(Option<Option<&str>>, &str); 5] = [
            (None, "Reply to a message"),
            (Some(None), "Reply to a text or caption"),
            (Some(Some(too_long.as_str())), "too long"),
            (Some(Some("at {last_seen}")), "<code>{reason}</code>"),
            (Some(Some("for {reason}")), "<code>{last_seen}</code>"),
        ];

        for (replied, expected) in cases {
            let messenger = RecordingMessenger::new();
            let state = state();

            set_template(&messenger, &state, CHAT, COMMAND, replied)
                .await
                .unwrap();

            assert_eq!(stored_template(&state).await, None);
            let texts = messenger.texts();
            assert_eq!(texts.len(), 1);
            assert!(texts[0].contains(expected), "{:?} -> {}", replied, texts[0]);
        }
    }

    #[tokio::test]
    async fn test_rejection_keeps_previous_template() {
        let messenger = RecordingMessenger::new();
        let state = state();

        set_template(&messenger, &state, CHAT, COMMAND, Some(Some("A {reason} {last_seen}")))
            .await
            .unwrap();
        set_template(&messenger, &state, CHAT, COMMAND, Some(Some("B {reason}")))
            .await
            .unwrap();

        assert_eq!(
            stored_template(&state).await.as_deref(),
            Some("A {reason} {last_seen}")
        );
    }

    #[tokio::test]
    async fn test_show_and_reset_template() {
        let messenger = RecordingMessenger::new();
        let state = state();

        show_template(&messenger, &state, CHAT, COMMAND).await.unwrap();
        state
            .store
            .set(TEMPLATE_NAMESPACE, TEMPLATE_KEY, Value::String("<{reason}> {last_seen}".into()))
            .await
            .unwrap();
        show_template(&messenger, &state, CHAT, COMMAND).await.unwrap();
        reset_template(&messenger, &state, CHAT, COMMAND).await.unwrap();

        let texts = messenger.texts();
        assert!(texts[0].contains("No custom AFK message"));
        assert!(texts[1].contains("&lt;{reason}&gt; {last_seen}"));
        assert!(texts[2].contains("removed"));
        assert_eq!(stored_template(&state).await, None);
    }
}
