use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AnalyzerError, Result};
use crate::history::DEFAULT_RECENT_LIMIT;
use crate::matcher::MatchMode;
use crate::nlp::NlpBackend;

pub const DEFAULT_CONFIG_PATH: &str = "resume-analyzer.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub user: UserConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub matcher: MatchMode,
    #[serde(default)]
    pub nlp: NlpBackend,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HistoryConfig {
    #[serde(default = "default_history_path")]
    pub path: PathBuf,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_history_path(),
            limit: default_limit(),
        }
    }
}

fn default_history_path() -> PathBuf {
    PathBuf::from("analyses.csv")
}
fn default_limit() -> usize {
    DEFAULT_RECENT_LIMIT
}

/// Identity used when none is given on the command line.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub id: Option<String>,
}

impl Config {
    /// Loads `path`, or the defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| AnalyzerError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(&content).map_err(|e| AnalyzerError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_empty() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.analysis.matcher, MatchMode::Substring);
        assert_eq!(config.analysis.nlp, NlpBackend::Heuristic);
        assert_eq!(config.history.path, PathBuf::from("analyses.csv"));
        assert_eq!(config.history.limit, 5);
        assert!(config.user.id.is_none());
    }

    #[test]
    fn reads_all_sections() {
        let config = Config::parse(
            r#"
            [analysis]
            matcher = "whole-word"
            nlp = "pos-tagger"

            [history]
            path = "data/history.csv"
            limit = 20

            [user]
            id = "ada"
            "#,
        )
        .unwrap();
        assert_eq!(config.analysis.matcher, MatchMode::WholeWord);
        assert_eq!(config.analysis.nlp, NlpBackend::PosTagger);
        assert_eq!(config.history.path, PathBuf::from("data/history.csv"));
        assert_eq!(config.history.limit, 20);
        assert_eq!(config.user.id.as_deref(), Some("ada"));
    }

    #[test]
    fn rejects_unknown_matcher() {
        assert!(Config::parse("[analysis]\nmatcher = \"fuzzy\"").is_err());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.history.limit, DEFAULT_RECENT_LIMIT);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[history\nlimit = ").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, AnalyzerError::Config { .. }));
    }
}
