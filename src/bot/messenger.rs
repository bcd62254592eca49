//! Outgoing message operations.
//!
//! Handlers talk to Telegram through [`Messenger`] so the AFK flows can run
//! against a recording double in tests.

use std::time::Duration;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{MessageId, ParseMode, ReplyParameters};
use tracing::{debug, warn};

use super::dispatcher::ThrottledBot;

/// Send, reply to and delete messages. All text is HTML.
#[async_trait]
pub trait Messenger: Clone + Send + Sync + 'static {
    /// Post a new message to a chat.
    async fn send_text(&self, chat_id: ChatId, text: String) -> anyhow::Result<MessageId>;

    /// Post a message replying to `reply_to`.
    async fn reply_text(
        &self,
        chat_id: ChatId,
        reply_to: MessageId,
        text: String,
    ) -> anyhow::Result<MessageId>;

    /// Delete a message.
    async fn remove_message(&self, chat_id: ChatId, message_id: MessageId) -> anyhow::Result<()>;
}

#[async_trait]
impl Messenger for ThrottledBot {
    async fn send_text(&self, chat_id: ChatId, text: String) -> anyhow::Result<MessageId> {
        let sent = self
            .send_message(chat_id, text)
            .parse_mode(ParseMode::Html)
            .await?;
        Ok(sent.id)
    }

    async fn reply_text(
        &self,
        chat_id: ChatId,
        reply_to: MessageId,
        text: String,
    ) -> anyhow::Result<MessageId> {
        let sent = self
            .send_message(chat_id, text)
            .parse_mode(ParseMode::Html)
            .reply_parameters(ReplyParameters::new(reply_to))
            .await?;
        Ok(sent.id)
    }

    async fn remove_message(&self, chat_id: ChatId, message_id: MessageId) -> anyhow::Result<()> {
        self.delete_message(chat_id, message_id).await?;
        Ok(())
    }
}

/// Delete messages after `delay` in a background task.
///
/// Failures are logged and not retried. Pending deletions are lost on restart.
pub fn delete_later<M: Messenger>(
    messenger: M,
    chat_id: ChatId,
    message_ids: Vec<MessageId>,
    delay: Duration,
) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        for message_id in message_ids {
            match messenger.remove_message(chat_id, message_id).await {
                Ok(()) => debug!("Deleted message {} in chat {}", message_id.0, chat_id),
                Err(e) => warn!("Failed to delete message {} in chat {}: {}", message_id.0, chat_id, e),
            }
        }
    });
}

#[cfg(test)]
pub mod testing {
    //! Recording [`Messenger`] for handler tests.

    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    /// Something the handler asked the messenger to do.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Action {
        Sent { chat_id: ChatId, id: MessageId, text: String },
        Replied { chat_id: ChatId, id: MessageId, reply_to: MessageId, text: String },
        Deleted { chat_id: ChatId, id: MessageId },
    }

    #[derive(Clone, Default)]
    pub struct RecordingMessenger {
        actions: Arc<Mutex<Vec<Action>>>,
        next_id: Arc<Mutex<i32>>,
    }

    impl RecordingMessenger {
        pub fn new() -> Self {
            Self {
                actions: Arc::default(),
                next_id: Arc::new(Mutex::new(1000)),
            }
        }

        pub fn actions(&self) -> Vec<Action> {
            self.actions.lock().clone()
        }

        /// Texts of sent and replied messages, in order.
        pub fn texts(&self) -> Vec<String> {
            self.actions()
                .into_iter()
                .filter_map(|a| match a {
                    Action::Sent { text, .. } | Action::Replied { text, .. } => Some(text),
                    Action::Deleted { .. } => None,
                })
                .collect()
        }

        pub fn deleted(&self) -> Vec<MessageId> {
            self.actions()
                .into_iter()
                .filter_map(|a| match a {
                    Action::Deleted { id, .. } => Some(id),
                    _ => None,
                })
                .collect()
        }

        fn next_id(&self) -> MessageId {
            let mut next = self.next_id.lock();
            *next += 1;
            MessageId(*next)
        }
    }

    #[async_trait]
    impl Messenger for RecordingMessenger {
        async fn send_text(&self, chat_id: ChatId, text: String) -> anyhow::Result<MessageId> {
            let id = self.next_id();
            self.actions.lock().push(Action::Sent { chat_id, id, text });
            Ok(id)
        }

        async fn reply_text(
            &self,
            chat_id: ChatId,
            reply_to: MessageId,
            text: String,
        ) -> anyhow::Result<MessageId> {
            let id = self.next_id();
            self.actions
                .lock()
                .push(Action::Replied { chat_id, id, reply_to, text });
            Ok(id)
        }

        async fn remove_message(&self, chat_id: ChatId, message_id: MessageId) -> anyhow::Result<()> {
            self.actions
                .lock()
                .push(Action::Deleted { chat_id, id: message_id });
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingMessenger;
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_delete_later_waits_for_delay() {
        let messenger = RecordingMessenger::new();
        let chat = ChatId(5);

        delete_later(messenger.clone(), chat, vec![MessageId(1), MessageId(2)], Duration::from_secs(30));

        tokio::time::sleep(Duration::from_secs(29)).await;
        assert!(messenger.deleted().is_empty());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(messenger.deleted(), vec![MessageId(1), MessageId(2)]);
    }
}
