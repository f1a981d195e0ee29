use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("failed to initialize the sheets client: {0}")]
    ClientInit(String),

    #[error("authorization error: {0}")]
    Authorization(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
