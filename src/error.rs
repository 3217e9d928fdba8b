use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("config file not found: {}", .path.display())]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config parse error: {0}")]
    ConfigParse(#[source] serde_json::Error),

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("serialize article: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("{context}: {source}")]
    FileSystem {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("site generator command `{command}` failed: {status}")]
    ExternalProcess { command: String, status: ExitStatus },

    #[error("channel auth failed: {0}")]
    ChannelAuth(String),

    #[error("channel send failed: {0}")]
    ChannelSend(String),

    #[error("telegram {method} rejected: {description}")]
    ChannelApi {
        method: &'static str,
        description: String,
    },

    #[error("channel transport error: {0}")]
    Channel(#[from] reqwest::Error),

    #[error("title is empty after sanitization")]
    EmptyTitle,
}

pub type Result<T> = std::result::Result<T, Error>;
