//! Document structures

use crate::error::Result;
use crate::input::file_detector::DocumentKind;
use crate::input::text_extractor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An uploaded document: raw bytes plus the kind it claims to be.
/// Lives only for the duration of one analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub bytes: Vec<u8>,
    pub kind: DocumentKind,
    pub source_name: String,
    pub role: DocumentRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentRole {
    JobDescription,
    Resume,
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentRole::JobDescription => write!(f, "job description"),
            DocumentRole::Resume => write!(f, "resume"),
        }
    }
}

impl Document {
    pub fn new(bytes: Vec<u8>, kind: DocumentKind, source_name: String, role: DocumentRole) -> Self {
        Self {
            bytes,
            kind,
            source_name,
            role,
        }
    }

    pub fn extract_text(&self) -> Result<String> {
        text_extractor::extract_text(self.kind, &self.bytes)
    }
}
