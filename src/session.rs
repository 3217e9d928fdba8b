//! The add-article conversation state machine.
//!
//! One session tracks one chat's progress through the flow
//! title → description → confirm/cancel. Sessions are keyed by chat id so
//! concurrent flows in different chats never touch each other; `Idle` is
//! represented by absence from the map.

use std::collections::HashMap;

use crate::constants::{BTN_CANCEL, BTN_POST, PROMPT_DESCRIPTION, REPLY_CANCELLED};
use crate::util::escape_html;

pub type ChatId = i64;
pub type SessionMap = HashMap<ChatId, SessionState>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    AwaitingTitle,
    AwaitingDescription {
        title: String,
    },
    AwaitingConfirmation {
        title: String,
        description: String,
    },
}

/// What the outbound message should do with the chat's reply keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardAction {
    None,
    Remove,
    /// Show the two-button post/cancel keyboard.
    ConfirmButtons,
}

/// The single outbound message produced for one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: KeyboardAction,
    pub markdown: bool,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: KeyboardAction::None,
            markdown: false,
        }
    }

    pub fn remove_keyboard(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: KeyboardAction::Remove,
            markdown: false,
        }
    }

    fn confirm(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: KeyboardAction::ConfirmButtons,
            markdown: true,
        }
    }
}

/// Outcome of feeding one message into an active session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Flow continues: store the new state and send the reply.
    Continue(SessionState, Reply),
    /// User confirmed: the session ends and the article should be posted.
    Post { title: String, content: String },
    /// User cancelled: the session ends.
    Cancelled(Reply),
}

/// Advances an active session by one inbound message.
///
/// Pure transition function: session bookkeeping and the store call are the
/// caller's job. The cancel label aborts from any flow state; the post label
/// only acts in `AwaitingConfirmation`, where it is the only text besides
/// cancel that moves the flow (anything else re-sends the prompt so the
/// buttons stay available).
pub fn advance(state: SessionState, text: &str) -> Step {
    if text == BTN_CANCEL {
        return Step::Cancelled(Reply::remove_keyboard(REPLY_CANCELLED));
    }

    match state {
        SessionState::AwaitingTitle => {
            let title = escape_html(text);
            Step::Continue(
                SessionState::AwaitingDescription { title },
                Reply::plain(PROMPT_DESCRIPTION),
            )
        }
        SessionState::AwaitingDescription { title } => {
            let description = text.to_string();
            let reply = confirmation_prompt(&title, &description);
            Step::Continue(
                SessionState::AwaitingConfirmation { title, description },
                reply,
            )
        }
        SessionState::AwaitingConfirmation { title, description } => {
            if text == BTN_POST {
                Step::Post {
                    title,
                    content: description,
                }
            } else {
                let reply = confirmation_prompt(&title, &description);
                Step::Continue(
                    SessionState::AwaitingConfirmation { title, description },
                    reply,
                )
            }
        }
    }
}

fn confirmation_prompt(title: &str, description: &str) -> Reply {
    Reply::confirm(format!(
        "Do you confirm add Post? \n title:*{title}* \n description: \n {description}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_html_escaped() {
        let step = advance(SessionState::AwaitingTitle, "A <b>bold</b> title");
        match step {
            Step::Continue(SessionState::AwaitingDescription { title }, reply) => {
                assert_eq!(title, "A &lt;b&gt;bold&lt;/b&gt; title");
                assert_eq!(reply.text, PROMPT_DESCRIPTION);
                assert_eq!(reply.keyboard, KeyboardAction::None);
            }
            other => panic!("unexpected step: {other:?}"),
        }
    }

    #[test]
    fn description_is_kept_verbatim() {
        let state = SessionState::AwaitingDescription {
            title: "T".into(),
        };
        match advance(state, "raw <text>") {
            Step::Continue(SessionState::AwaitingConfirmation { title, description }, reply) => {
                assert_eq!(title, "T");
                assert_eq!(description, "raw <text>");
                assert!(reply.text.contains("raw <text>"));
                assert_eq!(reply.keyboard, KeyboardAction::ConfirmButtons);
                assert!(reply.markdown);
            }
            other => panic!("unexpected step: {other:?}"),
        }
    }

    #[test]
    fn cancel_aborts_from_any_state() {
        for state in [
            SessionState::AwaitingTitle,
            SessionState::AwaitingDescription { title: "T".into() },
            SessionState::AwaitingConfirmation {
                title: "T".into(),
                description: "D".into(),
            },
        ] {
            match advance(state, BTN_CANCEL) {
                Step::Cancelled(reply) => {
                    assert_eq!(reply.keyboard, KeyboardAction::Remove);
                }
                other => panic!("unexpected step: {other:?}"),
            }
        }
    }

    #[test]
    fn stray_text_at_confirmation_resends_prompt() {
        let state = SessionState::AwaitingConfirmation {
            title: "T".into(),
            description: "D".into(),
        };
        match advance(state.clone(), "neither button") {
            Step::Continue(next, reply) => {
                assert_eq!(next, state);
                assert!(reply.text.contains("*T*"));
            }
            other => panic!("unexpected step: {other:?}"),
        }
    }
}
