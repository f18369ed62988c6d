use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed '{kind}' event from host: {source}")]
    MalformedEvent {
        kind: String,
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {message}")]
    Config {
        message: String,
        value: Option<String>,
    },
}
