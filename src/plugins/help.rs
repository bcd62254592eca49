//! /help command plugin.
//!
//! Lists the AFK commands and how placeholders work.

use teloxide::prelude::*;
use teloxide::types::MessageId;

use crate::bot::{AppState, Messenger, ThrottledBot};
use crate::i18n::t;

/// Handle the /help command.
pub async fn help_command(bot: ThrottledBot, msg: Message, _state: AppState) -> anyhow::Result<()> {
    send_help(&bot, msg.chat.id, msg.id).await
}

pub(crate) async fn send_help<M: Messenger>(
    messenger: &M,
    chat_id: ChatId,
    reply_to: MessageId,
) -> anyhow::Result<()> {
    messenger.reply_text(chat_id, reply_to, t("help.afk")).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::bot::messenger::testing::RecordingMessenger;

    use super::*;

    #[tokio::test]
    async fn test_help_lists_commands() {
        let messenger = RecordingMessenger::new();

        send_help(&messenger, ChatId(1), MessageId(2)).await.unwrap();

        let text = &messenger.texts()[0];
        for command in ["/afk", "/brb", "/unafk", "/setafkmsg", "/afkmsg", "/resetafkmsg"] {
            assert!(text.contains(command), "missing {}", command);
        }
    }
}
