//! Plugin system for command handlers.
//!
//! Add new plugins by:
//! 1. Creating a new file in this directory
//! 2. Adding `pub mod your_plugin;` below
//! 3. Adding the handler to `command_handler()`

pub mod afk;
pub mod help;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot::{AppState, ThrottledBot};

/// All operator commands.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Show help")]
    Help,

    // AFK commands
    #[command(description = "Go AFK with an optional reason")]
    Afk(String),

    #[command(description = "Go AFK (alias)")]
    Brb(String),

    #[command(description = "Leave AFK mode")]
    Unafk,

    #[command(description = "Set custom AFK message (reply to it)")]
    Setafkmsg,

    #[command(description = "Show custom AFK message")]
    Afkmsg,

    #[command(description = "Remove custom AFK message")]
    Resetafkmsg,
}

/// Build the combined command handler.
pub fn command_handler() -> UpdateHandler<anyhow::Error> {
    use dptree::case;

    teloxide::filter_command::<Command, _>()
        .branch(case![Command::Help].endpoint(help::help_command))
        // AFK
        .branch(case![Command::Afk(reason)].endpoint(afk::afk_command))
        .branch(case![Command::Brb(reason)].endpoint(handle_brb))
        .branch(case![Command::Unafk].endpoint(afk::unafk_command))
        .branch(case![Command::Setafkmsg].endpoint(afk::setafkmsg_command))
        .branch(case![Command::Afkmsg].endpoint(afk::afkmsg_command))
        .branch(case![Command::Resetafkmsg].endpoint(afk::resetafkmsg_command))
}

/// Handle /brb command - alias for /afk.
async fn handle_brb(
    bot: ThrottledBot,
    msg: Message,
    state: AppState,
    reason: String,
) -> anyhow::Result<()> {
    afk::afk_command(bot, msg, state, reason).await
}
