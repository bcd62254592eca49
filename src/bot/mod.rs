//! Bot module - Core bot functionality.

pub mod dispatcher;
pub mod messenger;
pub mod operator;
mod runtime;
mod webhook;

pub use dispatcher::{AppState, ThrottledBot, build_dispatcher};
pub use messenger::{Messenger, delete_later};
pub use operator::Operator;
pub use runtime::run;
