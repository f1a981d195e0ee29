pub mod client;
pub mod types;

pub use client::{TerminalTokenClient, TokenClient};
pub use types::{AccessToken, Prompt, TokenResponse};
