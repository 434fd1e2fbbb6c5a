use serde::{Deserialize, Serialize};

use crate::keywords::{extract_keywords, KeywordSet};
use crate::matcher::{KeywordMatcher, SubstringMatcher};
use crate::nlp::{HeuristicChunker, NounPhraseExtractor};
use crate::tier::Tier;

/// Weights of the five sub-scores in the final score.
pub const KEYWORD_WEIGHT: f64 = 0.35;
pub const SKILL_WEIGHT: f64 = 0.30;
pub const EXPERIENCE_WEIGHT: f64 = 0.20;
pub const FORMAT_WEIGHT: f64 = 0.10;
pub const DENSITY_WEIGHT: f64 = 0.05;

/// Format score used when no layout analysis is available.
pub const DEFAULT_FORMAT_SCORE: u8 = 95;

const EXPERIENCE_BASE: u8 = 50;
const TENURE_WORDS: &[&str] = &["years", "experience"];
const SENIORITY_WORDS: &[&str] = &["senior", "lead", "manager"];

/// Density (in percent) that earns a full density score.
const TARGET_DENSITY: f64 = 2.0;
const DENSITY_FLOOR: u8 = 30;
const DENSITY_COVERAGE_BOOST: u8 = 50;

/// Outcome of scoring one resume against one job description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub score: u8,
    pub keyword_score: u8,
    pub skill_score: u8,
    pub experience_score: u8,
    pub density_score: u8,
    pub format_score: u8,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Tier of each displayed metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricTiers {
    pub overall: Tier,
    pub keywords: Tier,
    pub skills: Tier,
    pub experience: Tier,
    pub density: Tier,
    pub format: Tier,
}

impl MatchResult {
    /// Result for a job description that yielded no keywords.
    pub fn empty() -> Self {
        Self {
            score: 0,
            keyword_score: 0,
            skill_score: 0,
            experience_score: 0,
            density_score: 0,
            format_score: 100,
            matched: Vec::new(),
            missing: Vec::new(),
        }
    }

    pub fn tier(&self) -> Tier {
        Tier::of(self.score)
    }

    pub fn tiers(&self) -> MetricTiers {
        MetricTiers {
            overall: Tier::of(self.score),
            keywords: Tier::of(self.keyword_score),
            skills: Tier::of(self.skill_score),
            experience: Tier::of(self.experience_score),
            density: Tier::of(self.density_score),
            format: Tier::of(self.format_score),
        }
    }
}

/// Rounds half up, so 0.5 becomes 1.
fn round_half_up(value: f64) -> u8 {
    (value + 0.5).floor().clamp(0.0, 100.0) as u8
}

fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    round_half_up(part as f64 / whole as f64 * 100.0)
}

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

/// Experience heuristic: tenure and seniority wording plus keyword coverage bonuses.
pub fn experience_score(resume_lower: &str, keyword_score: u8) -> u8 {
    let mut score = EXPERIENCE_BASE;
    if contains_any(resume_lower, TENURE_WORDS) {
        score += 10;
    }
    if contains_any(resume_lower, SENIORITY_WORDS) {
        score += 10;
    }
    if keyword_score > 50 {
        score += 20;
    }
    if keyword_score > 75 {
        score += 10;
    }
    score.min(100)
}

/// Keyword occurrences per hundred resume words.
pub fn keyword_density(
    resume_lower: &str,
    matched: &[String],
    matcher: &dyn KeywordMatcher,
) -> f64 {
    let total_words = resume_lower.split_whitespace().count();
    if total_words == 0 {
        return 0.0;
    }
    let occurrences: usize = matched
        .iter()
        .map(|k| matcher.occurrences(resume_lower, k))
        .sum();
    occurrences as f64 / total_words as f64 * 100.0
}

pub fn density_score(density: f64, keyword_score: u8) -> u8 {
    let score = round_half_up((density / TARGET_DENSITY * 100.0).min(100.0));
    if score < DENSITY_FLOOR && keyword_score > 50 {
        DENSITY_COVERAGE_BOOST
    } else {
        score
    }
}

pub fn final_score(
    keyword_score: u8,
    skill_score: u8,
    experience_score: u8,
    format_score: u8,
    density_score: u8,
) -> u8 {
    round_half_up(
        f64::from(keyword_score) * KEYWORD_WEIGHT
            + f64::from(skill_score) * SKILL_WEIGHT
            + f64::from(experience_score) * EXPERIENCE_WEIGHT
            + f64::from(format_score) * FORMAT_WEIGHT
            + f64::from(density_score) * DENSITY_WEIGHT,
    )
}

/// Scores resume text against an already extracted keyword set.
pub fn score_resume(
    resume_text: &str,
    keywords: &KeywordSet,
    matcher: &dyn KeywordMatcher,
) -> MatchResult {
    if keywords.is_empty() {
        return MatchResult::empty();
    }

    let resume = resume_text.to_lowercase();

    let (matched, missing): (Vec<String>, Vec<String>) = keywords
        .iter()
        .cloned()
        .partition(|k| matcher.contains(&resume, k));

    let keyword_score = percent(matched.len(), keywords.len());
    let experience_score = experience_score(&resume, keyword_score);

    let density = keyword_density(&resume, &matched, matcher);
    let density_score = density_score(density, keyword_score);

    let format_score = DEFAULT_FORMAT_SCORE;

    let technical = keywords.technical();
    let skill_score = if technical.is_empty() {
        keyword_score
    } else {
        let found = technical
            .iter()
            .filter(|t| matcher.contains(&resume, t))
            .count();
        percent(found, technical.len())
    };

    let score = final_score(
        keyword_score,
        skill_score,
        experience_score,
        format_score,
        density_score,
    );

    tracing::debug!(
        score,
        keyword_score,
        skill_score,
        experience_score,
        density,
        matched = matched.len(),
        missing = missing.len(),
        "scored resume"
    );

    MatchResult {
        score,
        keyword_score,
        skill_score,
        experience_score,
        density_score,
        format_score,
        matched,
        missing,
    }
}

/// Keyword extraction and scoring with pluggable phrase extraction and matching.
pub struct Analyzer {
    phrases: Box<dyn NounPhraseExtractor>,
    matcher: Box<dyn KeywordMatcher>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(Box::new(HeuristicChunker), Box::new(SubstringMatcher))
    }
}

impl Analyzer {
    pub fn new(phrases: Box<dyn NounPhraseExtractor>, matcher: Box<dyn KeywordMatcher>) -> Self {
        Self { phrases, matcher }
    }

    pub fn keywords(&self, job_description: &str) -> KeywordSet {
        extract_keywords(job_description, self.phrases.as_ref())
    }

    pub fn analyze(&self, resume_text: &str, job_description: &str) -> MatchResult {
        let keywords = self.keywords(job_description);
        score_resume(resume_text, &keywords, self.matcher.as_ref())
    }
}

/// Scores `resume_text` against `job_description` with the default backends.
pub fn analyze(resume_text: &str, job_description: &str) -> MatchResult {
    Analyzer::default().analyze(resume_text, job_description)
}
