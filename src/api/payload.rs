//! Request payload parsing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of a stock request: `{ "cantidad": <integer> }`.
///
/// For adjustments `cantidad` is a signed delta. For absolute sets it is the target.
/// Zero is accepted in both cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockUpdate {
    pub cantidad: i64,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The body is not valid JSON, or `cantidad` is missing or not an integer.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidPayload(err.to_string())
    }
}

/// Parses and validates a raw request body.
pub fn parse_stock_update(body: &[u8]) -> Result<StockUpdate, ApiError> {
    Ok(serde_json::from_slice(body)?)
}
