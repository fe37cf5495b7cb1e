//! Input manager: resolves a path into a typed document ready for extraction

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::DocumentKind;
use crate::processing::document::{Document, DocumentRole};
use log::info;
use std::path::Path;
use tokio::fs;

#[derive(Default)]
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    pub async fn load_document(&self, path: &Path, role: DocumentRole) -> Result<Document> {
        if !path.exists() {
            return Err(ScreenerError::InvalidInput(
                format!("File does not exist: {}", path.display())
            ));
        }

        let kind = self.detect_kind(path)?;

        info!("Reading {} ({}) from {}", role, kind, path.display());
        let bytes = fs::read(path).await?;

        Ok(Document::new(bytes, kind, path.to_string_lossy().to_string(), role))
    }

    pub fn detect_kind(&self, path: &Path) -> Result<DocumentKind> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| ScreenerError::InvalidInput(
                format!("File has no extension: {}", path.display())
            ))?;

        DocumentKind::from_extension(extension).ok_or_else(|| {
            ScreenerError::UnsupportedFormat(format!(
                "Unsupported file type for: {} (expected {})",
                path.display(),
                DocumentKind::SUPPORTED_EXTENSIONS.join(" or ")
            ))
        })
    }
}
