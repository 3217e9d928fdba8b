//! Persists confirmed articles and triggers the site generator.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{error, warn};

use crate::constants::TITLE_PLACEHOLDER;
use crate::error::{Error, Result};

/// The finalized title + content pair produced by a completed flow.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub content: String,
}

/// Destination for confirmed articles. The dispatcher only knows this
/// trait, which keeps the flow testable without a filesystem.
#[async_trait]
pub trait Poster: Send + Sync {
    async fn post(&self, article: &Article) -> Result<()>;
}

pub struct ArticleStore {
    output_dir: PathBuf,
    site_command: String,
}

impl ArticleStore {
    pub fn new(output_dir: impl Into<PathBuf>, site_command: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            site_command: site_command.into(),
        }
    }

    pub fn artifact_path(&self, stem: &str) -> PathBuf {
        self.output_dir.join(format!("{stem}.json"))
    }

    async fn run_site_command(&self, title: &str) -> Result<()> {
        let command = self.site_command.replace(TITLE_PLACEHOLDER, title);
        let status = Command::new("bash")
            .arg("-c")
            .arg(&command)
            .status()
            .await
            .map_err(|source| Error::FileSystem {
                context: format!("spawn site command `{command}`"),
                source,
            })?;
        if !status.success() {
            return Err(Error::ExternalProcess { command, status });
        }
        Ok(())
    }
}

#[async_trait]
impl Poster for ArticleStore {
    async fn post(&self, article: &Article) -> Result<()> {
        let stem = sanitize_title(&article.title)?;

        // Non-fatal: if the directory is truly unusable, the create below
        // reports the real error.
        if let Err(e) = fs::create_dir_all(&self.output_dir).await {
            error!(error = %e, dir = %self.output_dir.display(), "create output directory");
        }

        let path = self.artifact_path(&stem);
        let payload = serde_json::to_vec(article).map_err(Error::Serialize)?;

        let mut file = fs::File::create(&path)
            .await
            .map_err(|source| Error::FileSystem {
                context: format!("create {}", path.display()),
                source,
            })?;
        file.write_all(&payload)
            .await
            .map_err(|source| Error::FileSystem {
                context: format!("write {}", path.display()),
                source,
            })?;
        file.sync_all().await.map_err(|source| Error::FileSystem {
            context: format!("flush {}", path.display()),
            source,
        })?;

        // The artifact stays on disk when the generator fails, for manual
        // reconciliation.
        if let Err(e) = self.run_site_command(&stem).await {
            warn!(artifact = %path.display(), "artifact left in place after generator failure");
            return Err(e);
        }
        Ok(())
    }
}

/// Turns a title into a filesystem-safe file stem. Titles become path
/// components and are substituted into a shell command, so path separators,
/// control characters and shell metacharacters are replaced and leading dots
/// stripped. An empty result fails the post before anything is written.
pub fn sanitize_title(title: &str) -> Result<String> {
    let cleaned: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '"' | '`' | '$' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.').trim();
    if cleaned.is_empty() {
        Err(Error::EmptyTitle)
    } else {
        Ok(cleaned.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::sanitize_title;
    use crate::error::Error;

    #[test]
    fn safe_titles_pass_through() {
        assert_eq!(sanitize_title("Hello").unwrap(), "Hello");
        assert_eq!(sanitize_title("My first post!").unwrap(), "My first post!");
    }

    #[test]
    fn separators_and_metacharacters_are_replaced() {
        assert_eq!(sanitize_title("a/b\\c").unwrap(), "a-b-c");
        assert_eq!(sanitize_title("x`y$z").unwrap(), "x-y-z");
        assert_eq!(sanitize_title("tab\tname").unwrap(), "tab-name");
    }

    #[test]
    fn leading_dots_are_stripped() {
        assert_eq!(sanitize_title("..hidden").unwrap(), "hidden");
        assert!(matches!(sanitize_title("..."), Err(Error::EmptyTitle)));
    }

    #[test]
    fn whitespace_only_is_rejected() {
        assert!(matches!(sanitize_title("   "), Err(Error::EmptyTitle)));
    }
}
