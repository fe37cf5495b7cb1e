//! Text processing and analysis module

pub mod document;
pub mod normalizer;
pub mod similarity;
pub mod skills;
pub mod analyzer;
