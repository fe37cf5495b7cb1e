//! Error handling for the resume screener

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The bytes do not parse as the declared document kind, or carry no text layer
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Anything that goes wrong after extraction
    #[error("Analysis failed: {0}")]
    Analysis(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl ScreenerError {
    pub fn is_extraction(&self) -> bool {
        matches!(self, ScreenerError::Extraction(_))
    }
}

pub type Result<T> = std::result::Result<T, ScreenerError>;

/// Convert ZIP container errors (DOCX packages) to extraction failures
impl From<zip::result::ZipError> for ScreenerError {
    fn from(err: zip::result::ZipError) -> Self {
        ScreenerError::Extraction(format!("Invalid DOCX package: {}", err))
    }
}

/// Convert XML parse errors (DOCX body) to extraction failures
impl From<roxmltree::Error> for ScreenerError {
    fn from(err: roxmltree::Error) -> Self {
        ScreenerError::Extraction(format!("Malformed DOCX document XML: {}", err))
    }
}
