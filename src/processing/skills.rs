//! Skill vocabulary and skill matching against normalized text

use crate::error::{Result, ScreenerError};
use crate::processing::normalizer::{normalize, NormalizedText};
use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Skill terms found in one document
pub type SkillSet = BTreeSet<String>;

const DEFAULT_SKILLS: &[&str] = &[
    // Programming languages
    "python", "java", "javascript", "typescript", "c", "go", "rust", "r", "scala",
    "kotlin", "swift", "php", "ruby", "matlab", "sql", "html", "css", "bash",

    // Data and analytics
    "excel", "tableau", "power bi", "pandas", "numpy", "scikit learn", "tensorflow",
    "pytorch", "keras", "spark", "hadoop", "machine learning", "deep learning",
    "data analysis", "data visualization", "statistics", "nlp",
    "natural language processing", "computer vision", "etl", "data mining", "big data",

    // Web and backend
    "react", "angular", "vue", "node js", "django", "flask", "spring", "rest api",
    "graphql", "mongodb", "mysql", "postgresql", "redis",

    // Cloud and delivery
    "aws", "azure", "gcp", "docker", "kubernetes", "git", "github", "jenkins", "linux",
    "ci cd", "terraform", "microservices",

    // Process and tooling
    "agile", "scrum", "jira", "testing", "unit testing", "selenium",

    // Soft skills
    "communication", "leadership", "teamwork", "problem solving", "critical thinking",
    "time management", "project management", "collaboration", "adaptability",
    "creativity", "presentation", "negotiation", "customer service",
    "attention to detail", "stakeholder management",

    // Business functions
    "marketing", "sales", "seo", "content writing", "accounting", "finance",
    "budgeting", "recruitment",
];

/// Ordered list of lowercase skill terms, fixed once analysis starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillVocabulary {
    terms: Vec<String>,
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_SKILLS.iter().copied())
    }
}

impl SkillVocabulary {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = Self { terms: Vec::new() };
        vocabulary.extend(terms);
        vocabulary
    }

    pub fn extend<I, S>(&mut self, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.terms.extend(
            terms
                .into_iter()
                .map(|term| Self::clean_term(term.as_ref()))
                .filter(|term| !term.is_empty()),
        );
    }

    pub fn contains(&self, term: &str) -> bool {
        let cleaned = Self::clean_term(term);
        self.terms.iter().any(|t| *t == cleaned)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.as_str())
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of distinct terms
    pub fn unique_count(&self) -> usize {
        self.terms.iter().collect::<HashSet<_>>().len()
    }

    fn clean_term(term: &str) -> String {
        term.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

/// Matched and missing skills of a resume relative to a job description
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SkillGap {
    pub matched: SkillSet,
    pub missing: SkillSet,
}

impl SkillGap {
    pub fn between(jd_skills: &SkillSet, resume_skills: &SkillSet) -> Self {
        Self {
            matched: jd_skills.intersection(resume_skills).cloned().collect(),
            missing: jd_skills.difference(resume_skills).cloned().collect(),
        }
    }

    /// Share of the job's skills the resume covers, 0-100; `None` when the job lists none
    pub fn coverage(&self) -> Option<f64> {
        let total = self.matched.len() + self.missing.len();
        if total == 0 {
            None
        } else {
            Some(self.matched.len() as f64 * 100.0 / total as f64)
        }
    }
}

/// Finds vocabulary terms in normalized text.
///
/// Single-word terms must appear as a whole token. Multi-word terms only need
/// to appear as a contiguous substring, so "power bi" also matches inside
/// "power bike". That looseness is accepted.
pub struct SkillMatcher {
    vocabulary: SkillVocabulary,
    single_word: HashMap<String, Vec<String>>,
    multi_word_matcher: Option<AhoCorasick>,
    multi_word_terms: Vec<Vec<String>>,
}

impl SkillMatcher {
    pub fn new(vocabulary: SkillVocabulary) -> Result<Self> {
        let mut single_word: HashMap<String, Vec<String>> = HashMap::new();
        let mut multi_word: HashMap<String, Vec<String>> = HashMap::new();

        for term in vocabulary.iter() {
            let pattern = Self::match_pattern(term);
            if pattern.is_empty() {
                continue;
            }

            let bucket = if pattern.contains(' ') {
                &mut multi_word
            } else {
                &mut single_word
            };
            let terms = bucket.entry(pattern).or_default();
            if !terms.iter().any(|t| t == term) {
                terms.push(term.to_string());
            }
        }

        let (patterns, multi_word_terms): (Vec<String>, Vec<Vec<String>>) =
            multi_word.into_iter().unzip();

        let multi_word_matcher = if patterns.is_empty() {
            None
        } else {
            let matcher = AhoCorasick::new(&patterns).map_err(|e| {
                ScreenerError::Analysis(format!("Failed to build skill matcher: {}", e))
            })?;
            Some(matcher)
        };

        Ok(Self {
            vocabulary,
            single_word,
            multi_word_matcher,
            multi_word_terms,
        })
    }

    pub fn extract_skills(&self, text: &NormalizedText) -> SkillSet {
        let mut found = SkillSet::new();

        let tokens: HashSet<&str> = text.words().collect();
        for token in &tokens {
            if let Some(terms) = self.single_word.get(*token) {
                found.extend(terms.iter().cloned());
            }
        }

        if let Some(matcher) = &self.multi_word_matcher {
            for mat in matcher.find_overlapping_iter(text.as_str()) {
                found.extend(self.multi_word_terms[mat.pattern().as_usize()].iter().cloned());
            }
        }

        found
    }

    pub fn skill_count(&self) -> usize {
        self.vocabulary.unique_count()
    }

    /// Terms are matched in the same normalized form as the documents
    fn match_pattern(term: &str) -> String {
        normalize(term).words().collect::<Vec<_>>().join(" ")
    }
}
