//! Resume screener library: compares a job description with a resume and
//! reports a bag-of-words similarity score plus a skill gap.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use error::{Result, ScreenerError};
pub use config::Config;
pub use processing::analyzer::{AnalysisEngine, MatchResult, MatchVerdict};
pub use processing::normalizer::{normalize, NormalizedText};
pub use processing::skills::{SkillGap, SkillMatcher, SkillSet, SkillVocabulary};
