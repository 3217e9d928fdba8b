// Central constants: fixed reply strings, button labels and defaults.

/// Label on the confirmation keyboard button that posts the article.
pub const BTN_POST: &str = "Yes, Post content 🆗";
/// Label on the confirmation keyboard button that aborts the flow.
pub const BTN_CANCEL: &str = "No 🚫";

pub const PROMPT_TITLE: &str = "Write Post title:";
pub const PROMPT_DESCRIPTION: &str = "Please write Post description:";

pub const REPLY_POSTED: &str = "Successfully posted";
pub const REPLY_CANCELLED: &str = "Cancelled";
pub const REPLY_HI: &str = "Hi :)";
pub const REPLY_STATUS: &str = "I'm ok.";
pub const REPLY_HELP: &str =
    "I understand:\n /sayhi\n /status\n /add - add a new article to the website\n";
pub const REPLY_UNKNOWN: &str = "I don't know that command.";

/// Where article artifacts land unless the config overrides it.
pub const DEFAULT_OUTPUT_DIR: &str = "data/externalPost";
/// Shell command run after a successful write; `{title}` is substituted.
/// The generator picks the JSON artifact up from the output directory.
pub const DEFAULT_SITE_COMMAND: &str = "hugo new \"posts/{title}.md\"";
pub const TITLE_PLACEHOLDER: &str = "{title}";

/// Telegram getUpdates long-poll timeout, in seconds.
pub const LONG_POLL_TIMEOUT_SECS: u64 = 60;
