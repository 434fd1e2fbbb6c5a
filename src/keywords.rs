//! Keyword extraction from a job description.
//!
//! A keyword set is the dictionary terms found in the description followed by
//! up to [`MAX_GENERIC_TERMS`] noun phrases that survive the stop-word filter.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::nlp::NounPhraseExtractor;

/// Known technology and skill terms, matched as substrings of the lowercased description.
pub const TECH_TERMS: &[&str] = &[
    "javascript", "typescript", "react", "angular", "vue", "node.js", "python", "java", "c++",
    "c#", "php", "ruby", "go", "rust", "swift", "kotlin", "sql", "mysql", "postgresql",
    "mongodb", "aws", "azure", "docker", "kubernetes", "jenkins", "git", "agile", "scrum",
    "html", "css", "sass", "less", "webpack", "babel", "rest api", "graphql",
    "machine learning", "ai", "data science", "analytics", "seo", "sem", "marketing", "sales",
    "management", "leadership", "communication", "problem solving", "teamwork",
];

/// Generic job-ad and HR vocabulary that never counts as a keyword.
pub const STOP_WORDS: &[&str] = &[
    // role and hiring boilerplate
    "experience", "years", "work", "job", "role", "team", "company", "candidate", "skills",
    "requirements", "responsibilities", "description", "qualification", "ability", "knowledge",
    "understanding", "proficiency", "opportunity", "environment", "degree", "bachelor",
    "master", "applicant", "position", "employment", "status", "gender", "race", "religion",
    "orientation", "disability", "veteran", "accommodation", "apply", "contact", "salary",
    "benefits", "location", "type", "full-time", "part-time", "contract", "remote", "hybrid",
    "onsite",
    // organizations and people
    "solutions", "systems", "applications", "services", "clients", "users", "needs",
    "support", "issues", "problems", "projects", "tasks", "duties", "area", "field",
    "industry", "sector", "market", "business", "organization", "firm", "agency", "bureau",
    "office", "department", "division", "unit", "branch", "section", "group", "crew", "staff",
    "personnel", "workforce", "employees", "workers", "members", "colleagues", "peers",
    "associates", "partners", "collaborators", "managers", "supervisors", "leaders",
    "directors", "executives", "officers", "administrators", "coordinators", "planners",
    "organizers", "developers", "engineers", "architects", "designers", "analysts",
    "consultants", "advisors", "specialists", "experts", "professionals", "practitioners",
    "technicians", "operators", "assistants", "helpers", "aides", "clerks", "secretaries",
    "receptionists", "attendants", "trainees", "interns", "apprentices", "students",
    "graduates", "recruits", "hires",
    // soft-skill filler
    "strong", "excellent", "good", "great", "proven", "track", "record", "demonstrated",
    "proficient", "hands-on", "successful", "detail", "oriented", "communication",
    "interpersonal", "verbal", "written", "command", "fluent", "native", "bilingual",
    "trilingual", "multilingual", "willingness", "flexible", "adaptable", "reliable",
    "dependable", "punctual", "motivated", "driven", "passionate", "enthusiastic", "energetic",
    "proactive", "initiative", "independent", "collaborative", "cooperative", "creative",
    "innovative", "analytical", "critical", "thinking", "problem-solving", "decision-making",
    "time", "management", "organizational", "prioritization", "multi-tasking", "leadership",
    "mentorship", "supervision", "coaching", "training", "development", "continuous",
    "improvement", "quality", "assurance", "control", "compliance", "standards", "procedures",
    "processes", "policies", "regulations", "guidelines", "protocols", "methodologies",
    "frameworks", "tools", "technologies", "platforms", "languages", "operating", "software",
    "hardware", "equipment", "instruments", "devices", "machinery", "vehicles", "materials",
    "supplies", "resources", "budget", "finance", "accounting", "marketing", "sales",
    "customer", "service", "client", "relations", "stakeholders", "vendors", "suppliers",
    "investors", "shareholders", "board", "committees", "task",
];

/// Noun phrases kept after filtering and deduplication.
pub const MAX_GENERIC_TERMS: usize = 10;

/// Shortest generic phrase worth keeping is one character longer than this.
const MIN_PHRASE_LEN: usize = 4;

static EDGE_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[.,]+|[.,]+$").expect("edge punctuation pattern is valid"));

static STOP_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOP_WORDS.iter().copied().collect());
static TECH_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| TECH_TERMS.iter().copied().collect());

/// Ordered, duplicate-free keywords derived from one job description.
///
/// Technical terms always come first; `technical_len` marks where they end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeywordSet {
    terms: Vec<String>,
    technical_len: usize,
}

impl KeywordSet {
    fn from_parts(technical: Vec<String>, generic: Vec<String>) -> Self {
        let mut seen = HashSet::new();
        let mut terms = Vec::with_capacity(technical.len() + generic.len());
        let mut technical_len = 0;

        for term in technical {
            if seen.insert(term.clone()) {
                terms.push(term);
                technical_len += 1;
            }
        }
        for term in generic {
            if seen.insert(term.clone()) {
                terms.push(term);
            }
        }

        Self {
            terms,
            technical_len,
        }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Dictionary terms found in the description, in dictionary order.
    pub fn technical(&self) -> &[String] {
        &self.terms[..self.technical_len]
    }

    /// Filtered noun phrases, in order of first appearance.
    pub fn generic(&self) -> &[String] {
        &self.terms[self.technical_len..]
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.terms.iter()
    }
}

impl<'a> IntoIterator for &'a KeywordSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

/// Dictionary terms that appear anywhere in `text`, in dictionary order.
pub fn technical_terms(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TECH_TERMS
        .iter()
        .filter(|term| lower.contains(*term))
        .map(|term| term.to_string())
        .collect()
}

/// Lowercases a raw phrase and strips one run of leading/trailing commas or periods.
pub fn normalize_phrase(phrase: &str) -> String {
    let lower = phrase.to_lowercase();
    EDGE_PUNCTUATION.replace_all(&lower, "").trim().to_string()
}

fn is_generic_keyword(term: &str) -> bool {
    term.chars().count() > MIN_PHRASE_LEN
        && !STOP_SET.contains(term)
        && !TECH_SET.contains(term)
        && !term.chars().all(|c| c.is_ascii_digit())
        && !term.contains('.')
}

/// Builds the keyword set for a job description.
pub fn extract_keywords(job_description: &str, phrases: &dyn NounPhraseExtractor) -> KeywordSet {
    let technical = technical_terms(job_description);

    let mut seen = HashSet::new();
    let generic: Vec<String> = phrases
        .noun_phrases(job_description)
        .iter()
        .map(|p| normalize_phrase(p))
        .filter(|t| is_generic_keyword(t))
        .filter(|t| seen.insert(t.clone()))
        .take(MAX_GENERIC_TERMS)
        .collect();

    tracing::debug!(
        technical = technical.len(),
        generic = generic.len(),
        "extracted job description keywords"
    );

    KeywordSet::from_parts(technical, generic)
}
