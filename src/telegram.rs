//! Minimal Telegram Bot API client: just the three methods the bot needs.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::constants::{BTN_CANCEL, BTN_POST, LONG_POLL_TIMEOUT_SECS};
use crate::error::{Error, Result};
use crate::session::{KeyboardAction, Reply};

const API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
}

/// Envelope every Bot API response comes wrapped in.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct KeyboardButton {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    pub resize_keyboard: bool,
    pub one_time_keyboard: bool,
}

#[derive(Debug, Serialize)]
pub struct ReplyKeyboardRemove {
    pub remove_keyboard: bool,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ReplyMarkup {
    Keyboard(ReplyKeyboardMarkup),
    Remove(ReplyKeyboardRemove),
}

impl ReplyMarkup {
    pub fn from_action(action: KeyboardAction) -> Option<Self> {
        match action {
            KeyboardAction::None => None,
            KeyboardAction::Remove => Some(ReplyMarkup::Remove(ReplyKeyboardRemove {
                remove_keyboard: true,
            })),
            KeyboardAction::ConfirmButtons => Some(ReplyMarkup::Keyboard(ReplyKeyboardMarkup {
                keyboard: vec![vec![
                    KeyboardButton {
                        text: BTN_POST.to_string(),
                    },
                    KeyboardButton {
                        text: BTN_CANCEL.to_string(),
                    },
                ]],
                resize_keyboard: true,
                one_time_keyboard: true,
            })),
        }
    }
}

pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: format!("{API_BASE}/bot{api_key}"),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{method}", self.base_url)
    }

    /// Startup auth check; fails with `ChannelAuth` when the token is
    /// rejected.
    pub async fn get_me(&self) -> Result<User> {
        let resp: ApiResponse<User> = self
            .http
            .get(self.method_url("getMe"))
            .send()
            .await?
            .json()
            .await?;
        if !resp.ok {
            return Err(Error::ChannelAuth(
                resp.description.unwrap_or_else(|| "token rejected".into()),
            ));
        }
        resp.result
            .ok_or_else(|| Error::ChannelAuth("getMe returned no user".into()))
    }

    /// Long-polls for the next batch of updates after `offset`.
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>> {
        let params = json!({
            "offset": offset,
            "timeout": LONG_POLL_TIMEOUT_SECS,
        });
        let resp: ApiResponse<Vec<Update>> = self
            .http
            .post(self.method_url("getUpdates"))
            // Leave headroom over the server-side long-poll timeout.
            .timeout(Duration::from_secs(LONG_POLL_TIMEOUT_SECS + 10))
            .json(&params)
            .send()
            .await?
            .json()
            .await?;
        if !resp.ok {
            return Err(Error::ChannelApi {
                method: "getUpdates",
                description: resp.description.unwrap_or_default(),
            });
        }
        Ok(resp.result.unwrap_or_default())
    }

    pub async fn send_message(&self, chat_id: i64, reply: &Reply) -> Result<()> {
        let mut payload = json!({
            "chat_id": chat_id,
            "text": reply.text,
        });
        if reply.markdown {
            payload["parse_mode"] = json!("markdown");
        }
        if let Some(markup) = ReplyMarkup::from_action(reply.keyboard) {
            payload["reply_markup"] = serde_json::to_value(&markup).map_err(Error::Serialize)?;
        }
        let resp: ApiResponse<serde_json::Value> = self
            .http
            .post(self.method_url("sendMessage"))
            .json(&payload)
            .send()
            .await?
            .json()
            .await?;
        if !resp.ok {
            return Err(Error::ChannelSend(resp.description.unwrap_or_default()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_buttons_serialize_both_labels() {
        let markup = ReplyMarkup::from_action(KeyboardAction::ConfirmButtons).unwrap();
        let value = serde_json::to_value(&markup).unwrap();
        let row = &value["keyboard"][0];
        assert_eq!(row[0]["text"], BTN_POST);
        assert_eq!(row[1]["text"], BTN_CANCEL);
        assert_eq!(value["one_time_keyboard"], true);
    }

    #[test]
    fn remove_action_serializes_remove_keyboard() {
        let markup = ReplyMarkup::from_action(KeyboardAction::Remove).unwrap();
        let value = serde_json::to_value(&markup).unwrap();
        assert_eq!(value, serde_json::json!({ "remove_keyboard": true }));
    }

    #[test]
    fn no_markup_for_plain_replies() {
        assert!(ReplyMarkup::from_action(KeyboardAction::None).is_none());
    }
}
