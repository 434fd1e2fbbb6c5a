//! # resume-analyzer
//!
//! Scores a resume against a job description the way applicant tracking
//! systems do: pull keywords out of the description, check which ones the
//! resume mentions, and fold coverage, skills, experience wording, keyword
//! density and formatting into one weighted score.
//!
//! ```
//! use resume_analyzer::{analyze, Tier};
//!
//! let result = analyze(
//!     "Senior engineer, 6 years of Python on AWS with Docker",
//!     "We need a Python developer with AWS and Docker experience",
//! );
//! assert!(result.matched.contains(&"python".to_string()));
//! assert_eq!(result.matched.len() + result.missing.len(), 5);
//! assert_ne!(result.tier(), Tier::Low);
//! ```
//!
//! The core ([`keywords`], [`scoring`], [`tier`]) is pure and synchronous.
//! Everything that touches files, the network or the terminal lives in the
//! collaborator modules and reports failures through [`AnalyzerError`].

pub mod config;
pub mod context;
pub mod dashboard;
pub mod error;
pub mod extract;
pub mod history;
pub mod job;
pub mod keywords;
pub mod matcher;
pub mod nlp;
pub mod report;
pub mod scoring;
pub mod scraper;
pub mod tier;

pub use error::AnalyzerError;
pub use keywords::{extract_keywords, KeywordSet};
pub use matcher::{KeywordMatcher, SubstringMatcher, WholeWordMatcher};
pub use nlp::{HeuristicChunker, NounPhraseExtractor};
pub use scoring::{analyze, Analyzer, MatchResult};
pub use tier::Tier;
