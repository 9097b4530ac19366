//! Common types and data structures

/// Single word/weight pair from the backend payload
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct WordEntry {
    pub name: String,
    pub weight: f64,
}

/// Error payload the backend may attach to a failed response
#[derive(serde::Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}
