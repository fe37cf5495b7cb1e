//! Analysis engine: extraction, normalization, similarity scoring, and skill gap

use crate::config::Config;
use crate::error::{Result, ScreenerError};
use crate::processing::document::{Document, DocumentRole};
use crate::processing::normalizer::{NormalizedText, TextNormalizer};
use crate::processing::similarity::SimilarityScorer;
use crate::processing::skills::{SkillGap, SkillMatcher, SkillSet, SkillVocabulary};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordinates every stage of one JD/resume comparison
pub struct AnalysisEngine {
    normalizer: TextNormalizer,
    scorer: SimilarityScorer,
    skill_matcher: SkillMatcher,
    settings: EngineSettings,
}

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub min_token_length: usize,
    pub preview_chars: usize,
    pub excellent_threshold: f64,
    pub good_threshold: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        let analysis = Config::default().analysis;
        Self {
            min_token_length: analysis.min_token_length,
            preview_chars: analysis.preview_chars,
            excellent_threshold: analysis.excellent_threshold,
            good_threshold: analysis.good_threshold,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Cosine similarity of the two documents, 0-100, two decimals
    pub similarity_score: f64,

    pub matched_skills: SkillSet,
    pub missing_skills: SkillSet,

    pub jd_skills: SkillSet,
    pub resume_skills: SkillSet,

    pub verdict: MatchVerdict,
    pub preview: TextPreview,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextPreview {
    pub resume_snippet: String,
    pub jd_snippet: String,
    pub resume_length: usize,
    pub jd_length: usize,
    pub truncated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchVerdict {
    Excellent,
    Good,
    Low,
}

impl MatchVerdict {
    pub fn from_score(score: f64, excellent_threshold: f64, good_threshold: f64) -> Self {
        if score >= excellent_threshold {
            MatchVerdict::Excellent
        } else if score >= good_threshold {
            MatchVerdict::Good
        } else {
            MatchVerdict::Low
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            MatchVerdict::Excellent => "Excellent match: candidate is highly recommended",
            MatchVerdict::Good => "Good match: review skills manually",
            MatchVerdict::Low => "Low match: profile does not fit well",
        }
    }
}

impl fmt::Display for MatchVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchVerdict::Excellent => write!(f, "Excellent"),
            MatchVerdict::Good => write!(f, "Good"),
            MatchVerdict::Low => write!(f, "Low"),
        }
    }
}

impl MatchResult {
    pub fn skill_gap(&self) -> SkillGap {
        SkillGap {
            matched: self.matched_skills.clone(),
            missing: self.missing_skills.clone(),
        }
    }
}

impl AnalysisEngine {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let settings = EngineSettings {
            min_token_length: config.analysis.min_token_length,
            preview_chars: config.analysis.preview_chars,
            excellent_threshold: config.analysis.excellent_threshold,
            good_threshold: config.analysis.good_threshold,
        };

        Self::with_vocabulary(config.vocabulary(), settings)
    }

    pub fn with_vocabulary(vocabulary: SkillVocabulary, settings: EngineSettings) -> Result<Self> {
        let skill_matcher = SkillMatcher::new(vocabulary)?;
        info!("Skill matcher ready with {} skills", skill_matcher.skill_count());

        Ok(Self {
            normalizer: TextNormalizer::new(),
            scorer: SimilarityScorer::new(settings.min_token_length),
            skill_matcher,
            settings,
        })
    }

    /// Full pipeline from raw documents; any extraction failure aborts the analysis
    pub fn analyze_documents(&self, jd: &Document, resume: &Document) -> Result<MatchResult> {
        Self::expect_role(jd, DocumentRole::JobDescription)?;
        Self::expect_role(resume, DocumentRole::Resume)?;

        info!("Extracting text from {} ({})", jd.source_name, jd.kind);
        let jd_text = jd.extract_text()?;

        info!("Extracting text from {} ({})", resume.source_name, resume.kind);
        let resume_text = resume.extract_text()?;

        self.analyze_texts(&jd_text, &resume_text)
    }

    /// Pipeline from already-extracted text
    pub fn analyze_texts(&self, jd_text: &str, resume_text: &str) -> Result<MatchResult> {
        let jd_clean = self.normalizer.normalize(jd_text);
        let resume_clean = self.normalizer.normalize(resume_text);

        let similarity_score = self.scorer.score(&jd_clean, &resume_clean);
        if !(0.0..=100.0).contains(&similarity_score) {
            return Err(ScreenerError::Analysis(format!(
                "Similarity score out of range: {}",
                similarity_score
            )));
        }
        info!("Similarity score: {:.2}%", similarity_score);

        let jd_skills = self.skill_matcher.extract_skills(&jd_clean);
        let resume_skills = self.skill_matcher.extract_skills(&resume_clean);
        let gap = SkillGap::between(&jd_skills, &resume_skills);
        debug!(
            "Skills: {} in job description, {} in resume, {} matched, {} missing",
            jd_skills.len(),
            resume_skills.len(),
            gap.matched.len(),
            gap.missing.len()
        );

        let verdict = MatchVerdict::from_score(
            similarity_score,
            self.settings.excellent_threshold,
            self.settings.good_threshold,
        );

        Ok(MatchResult {
            similarity_score,
            matched_skills: gap.matched,
            missing_skills: gap.missing,
            jd_skills,
            resume_skills,
            verdict,
            preview: self.preview(&jd_clean, &resume_clean),
        })
    }

    pub fn skill_matcher(&self) -> &SkillMatcher {
        &self.skill_matcher
    }

    fn preview(&self, jd: &NormalizedText, resume: &NormalizedText) -> TextPreview {
        let resume_snippet = resume.snippet(self.settings.preview_chars).to_string();
        let jd_snippet = jd.snippet(self.settings.preview_chars).to_string();
        let truncated = resume_snippet.len() < resume.as_str().len()
            || jd_snippet.len() < jd.as_str().len();

        TextPreview {
            resume_snippet,
            jd_snippet,
            resume_length: resume.char_count(),
            jd_length: jd.char_count(),
            truncated,
        }
    }

    fn expect_role(document: &Document, role: DocumentRole) -> Result<()> {
        if document.role != role {
            return Err(ScreenerError::InvalidInput(format!(
                "{} was supplied as the {}",
                document.source_name, role
            )));
        }
        Ok(())
    }
}
