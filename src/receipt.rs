// 🧾🔍 Receipt Text Extraction
// Runs an OCR engine over a receipt image and hands back the raw text.
// Nothing is parsed back into ledger fields.

use crate::error::ReceiptError;
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

#[async_trait]
pub trait ReceiptTextExtractor: Send + Sync {
    async fn extract_text(&self, image: &Path) -> Result<String, ReceiptError>;
}

/// Shells out to the `tesseract` binary (`tesseract <image> stdout -l <lang>`)
#[derive(Debug, Clone)]
pub struct TesseractCli {
    pub program: String,
    pub language: String,
}

impl TesseractCli {
    pub fn new(program: impl Into<String>, language: impl Into<String>) -> Self {
        TesseractCli {
            program: program.into(),
            language: language.into(),
        }
    }
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self::new("tesseract", "eng")
    }
}

#[async_trait]
impl ReceiptTextExtractor for TesseractCli {
    async fn extract_text(&self, image: &Path) -> Result<String, ReceiptError> {
        if !image.is_file() {
            return Err(ReceiptError::MissingImage(image.display().to_string()));
        }

        tracing::debug!(image = %image.display(), program = %self.program, "running OCR");
        let output = Command::new(&self.program)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .await?;

        if !output.status.success() {
            return Err(ReceiptError::Engine {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        tracing::info!(image = %image.display(), chars = text.len(), "receipt text extracted");
        Ok(text)
    }
}
