use std::path::PathBuf;

/// Failures that end the session. Rule violations are not among them: those
/// are reported to the player and the prompt comes back.
#[derive(Debug, thiserror::Error)]
pub enum PlayError {
    #[error("cannot read config {}: {source}", .path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),
}
