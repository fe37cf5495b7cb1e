//! Report structures handed to the formatters

use crate::processing::analyzer::MatchResult;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// One analysis result plus where and when it was produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    pub result: MatchResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: SystemTime,
    pub jd_file: String,
    pub resume_file: String,
    pub processing_time_ms: u64,
    pub tool_version: String,

    /// Distinct skill terms the matcher was built with
    pub vocabulary_size: usize,
}

impl AnalysisReport {
    pub fn new(
        result: MatchResult,
        jd_file: impl Into<String>,
        resume_file: impl Into<String>,
        processing_time_ms: u64,
        vocabulary_size: usize,
    ) -> Self {
        Self {
            metadata: ReportMetadata {
                generated_at: SystemTime::now(),
                jd_file: jd_file.into(),
                resume_file: resume_file.into(),
                processing_time_ms,
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                vocabulary_size,
            },
            result,
        }
    }

    /// Whole-number percentage, for badges and progress bars
    pub fn score_percentage(&self) -> u8 {
        self.result.similarity_score.round().clamp(0.0, 100.0) as u8
    }
}
