use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions a watch run can end with.
///
/// Soft conditions (missing seen file, no price near an anchor, a href that
/// will not resolve) are handled inline and never surface here.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// A required LINE setting is absent from the environment.
    #[error("missing configuration: {0} is not set")]
    Config(&'static str),

    /// The category page could not be fetched or rendered.
    #[error("page fetch failed")]
    Fetch(#[source] anyhow::Error),

    /// The push request never produced a response.
    #[error("LINE push request failed")]
    PushRequest(#[from] reqwest::Error),

    /// The push endpoint answered with a non-success status.
    #[error("LINE push failed {status}: {body}")]
    Delivery {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The seen-id file could not be rewritten.
    #[error("failed to write seen ids to {path:?}")]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
