//! The channel adapter: one long-poll receive loop, one reply per message.

use std::time::Duration;

use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::handler::Handler;
use crate::store::ArticleStore;
use crate::telegram::TelegramClient;

pub struct Bot {
    client: TelegramClient,
    handler: Handler<ArticleStore>,
}

impl Bot {
    /// Builds the bot and verifies the channel credential. Auth failures
    /// are fatal to startup.
    pub async fn new(config: &Config) -> Result<Self> {
        let client = TelegramClient::new(&config.bot_api_key);
        let me = client.get_me().await?;
        info!(
            username = me.username.as_deref().unwrap_or("<unnamed>"),
            id = me.id,
            "authorized"
        );
        let store = ArticleStore::new(&config.output_dir, &config.site_command);
        Ok(Self {
            client,
            handler: Handler::new(store),
        })
    }

    /// Receives updates strictly sequentially, forever. Messages without
    /// text are skipped; every send failure is logged and the loop
    /// continues.
    pub async fn run(&self) -> Result<()> {
        let mut offset = 0i64;
        loop {
            let updates = match self.client.get_updates(offset).await {
                Ok(updates) => updates,
                Err(e) => {
                    error!(error = %e, "get updates");
                    tokio::time::sleep(Duration::from_secs(1)).await;
                    continue;
                }
            };
            for update in updates {
                offset = offset.max(update.update_id + 1);
                let Some(message) = update.message else {
                    continue;
                };
                let Some(text) = message.text else {
                    continue;
                };
                let chat_id = message.chat.id;
                let reply = self.handler.handle_message(chat_id, &text).await;
                if let Err(e) = self.client.send_message(chat_id, &reply).await {
                    warn!(error = %e, chat_id, "send reply");
                }
            }
        }
    }
}
