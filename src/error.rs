// ⚠️ Error types
// Typed errors for the library; binaries wrap them in anyhow

use thiserror::Error;

// ============================================================================
// VALIDATION
// ============================================================================

/// Rejected user input at the record-creation / budget-entry boundary
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// TRACKER ERRORS
// ============================================================================

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TrackerResult<T> = Result<T, TrackerError>;

/// Currency lookup failures (no fallback rate, no partial conversion)
#[derive(Error, Debug)]
pub enum CurrencyError {
    #[error("Rate lookup failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rate service returned status {status} for base {base}")]
    Status { status: u16, base: String },

    #[error("Unsupported currency code: {0}")]
    UnsupportedCurrency(String),
}

/// Receipt text extraction failures
#[derive(Error, Debug)]
pub enum ReceiptError {
    #[error("Receipt image not found: {0}")]
    MissingImage(String),

    #[error("Failed to run OCR engine: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("OCR engine exited with status {code:?}: {stderr}")]
    Engine { code: Option<i32>, stderr: String },
}
