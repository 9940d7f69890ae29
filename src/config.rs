use std::env;
use std::path::PathBuf;

/// Category page watched on every run. Its product grid renders
/// client-side, which is why fetching goes through a real browser.
pub const CATEGORY_URL: &str = "https://online.nojima.co.jp/category/114/?searchCategoryCode=114&mode=image&pageSize=60&currentPage=1&alignmentSequence=8&searchDispFlg=true";

/// Seen-id file name, kept next to the executable.
pub const STATE_FILE: &str = "nojima_seen.json";

/// Upper bound of fully formatted listings in one notification.
pub const MAX_NOTIFY: usize = 5;

/// Runtime settings for one watch run.
#[derive(Debug, Clone)]
pub struct Config {
    pub category_url: String,
    pub state_path: PathBuf,
    pub max_notify: usize,
    /// LINE Messaging API channel access token.
    pub channel_token: Option<String>,
    /// LINE user id the push goes to.
    pub recipient: Option<String>,
    /// Also push a one-line extraction summary, even when nothing is new.
    pub force_summary: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            category_url: CATEGORY_URL.to_string(),
            state_path: default_state_path(),
            max_notify: MAX_NOTIFY,
            channel_token: None,
            recipient: None,
            force_summary: false,
        }
    }
}

impl Config {
    /// Pick up LINE credentials and debug flags from the environment.
    pub fn from_env() -> Self {
        Self {
            channel_token: non_empty_var("LINE_CHANNEL_ACCESS_TOKEN"),
            recipient: non_empty_var("LINE_USER_ID"),
            force_summary: env::var("FORCE_SUMMARY").map(|v| v == "1").unwrap_or(false),
            ..Self::default()
        }
    }
}

// An empty variable counts as unset.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn default_state_path() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(STATE_FILE)))
        .unwrap_or_else(|| PathBuf::from(STATE_FILE))
}
