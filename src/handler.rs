//! Two-layer message dispatch: global commands when a chat has no active
//! flow, flow input otherwise.

use std::str::FromStr;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info};

use crate::constants::{
    PROMPT_TITLE, REPLY_HELP, REPLY_HI, REPLY_POSTED, REPLY_STATUS, REPLY_UNKNOWN,
};
use crate::session::{advance, ChatId, Reply, SessionMap, SessionState, Step};
use crate::store::{Article, Poster};

enum Command {
    Help,
    SayHi,
    Status,
    Add,
    Unknown,
}

impl FromStr for Command {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "help" => Ok(Command::Help),
            "sayhi" => Ok(Command::SayHi),
            "status" => Ok(Command::Status),
            "add" => Ok(Command::Add),
            _ => Ok(Command::Unknown),
        }
    }
}

/// Extracts the command token from a message: first word, leading `/`
/// stripped, `@botname` suffix dropped.
fn command_token(text: &str) -> &str {
    let first = text.split_whitespace().next().unwrap_or("");
    let first = first.strip_prefix('/').unwrap_or(first);
    first.split('@').next().unwrap_or(first)
}

pub struct Handler<P: Poster> {
    sessions: Arc<RwLock<SessionMap>>,
    store: P,
}

impl<P: Poster> Handler<P> {
    pub fn new(store: P) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(SessionMap::new())),
            store,
        }
    }

    /// Routes one inbound message and returns the single reply to send.
    pub async fn handle_message(&self, chat_id: ChatId, text: &str) -> Reply {
        let active = { self.sessions.read().await.get(&chat_id).cloned() };
        match active {
            Some(state) => self.handle_flow(chat_id, state, text).await,
            None => self.handle_command(chat_id, text).await,
        }
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    /// Current flow state for a chat, if an add flow is in progress.
    pub async fn session_state(&self, chat_id: ChatId) -> Option<SessionState> {
        self.sessions.read().await.get(&chat_id).cloned()
    }

    async fn handle_flow(&self, chat_id: ChatId, state: SessionState, text: &str) -> Reply {
        match advance(state, text) {
            Step::Continue(next, reply) => {
                self.sessions.write().await.insert(chat_id, next);
                reply
            }
            Step::Post { title, content } => {
                self.sessions.write().await.remove(&chat_id);
                let article = Article { title, content };
                match self.store.post(&article).await {
                    Ok(()) => {
                        info!(chat_id, title = %article.title, "article posted");
                        Reply::remove_keyboard(REPLY_POSTED)
                    }
                    Err(e) => {
                        error!(chat_id, title = %article.title, error = %e, "post failed");
                        Reply::remove_keyboard(format!("⚠️ Error posting: {e}"))
                    }
                }
            }
            Step::Cancelled(reply) => {
                self.sessions.write().await.remove(&chat_id);
                info!(chat_id, "add flow cancelled");
                reply
            }
        }
    }

    async fn handle_command(&self, chat_id: ChatId, text: &str) -> Reply {
        let command = command_token(text).parse().unwrap_or(Command::Unknown);
        match command {
            Command::Help => Reply::remove_keyboard(REPLY_HELP),
            Command::SayHi => Reply::remove_keyboard(REPLY_HI),
            Command::Status => Reply::remove_keyboard(REPLY_STATUS),
            Command::Add => {
                self.sessions
                    .write()
                    .await
                    .insert(chat_id, SessionState::AwaitingTitle);
                info!(chat_id, "add flow started");
                Reply::remove_keyboard(PROMPT_TITLE)
            }
            Command::Unknown => Reply::remove_keyboard(REPLY_UNKNOWN),
        }
    }
}
