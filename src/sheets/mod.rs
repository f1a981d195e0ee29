pub mod client;
pub mod error;
pub mod types;

pub use client::{RowSource, SheetsClient};
pub use error::LoadError;
pub use types::{Cell, Dataset, Row, ValueRange};
