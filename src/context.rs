use crate::config::Config;
use crate::history::{AnalysisRecord, AnalysisStore, CsvAnalysisStore};
use crate::scoring::{Analyzer, MatchResult};

/// The signed-in user, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user_id: Option<String>,
}

impl Session {
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Command-line identity wins over the configured one; blank ids count as signed out.
    pub fn resolve(cli_user: Option<&str>, config: &Config) -> Self {
        cli_user
            .or(config.user.id.as_deref())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(Self::signed_in)
            .unwrap_or_default()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }
}

/// Everything a command needs, built once by the entry point.
pub struct AppContext {
    pub config: Config,
    pub session: Session,
    pub analyzer: Analyzer,
    pub store: Box<dyn AnalysisStore>,
}

impl AppContext {
    pub fn from_config(config: Config, session: Session) -> anyhow::Result<Self> {
        let analyzer = Analyzer::new(
            config.analysis.nlp.build()?,
            config.analysis.matcher.build(),
        );
        let store = Box::new(CsvAnalysisStore::new(config.history.path.clone()));
        Ok(Self {
            config,
            session,
            analyzer,
            store,
        })
    }

    /// Stores an analysis for the signed-in user. Returns `false` when nobody is signed in.
    pub fn record(
        &self,
        resume_name: &str,
        job_title: &str,
        result: &MatchResult,
    ) -> crate::error::Result<bool> {
        let Some(user_id) = self.session.user_id() else {
            tracing::info!("not signed in, analysis not saved to history");
            return Ok(false);
        };
        let record = AnalysisRecord::new(user_id, resume_name, job_title, result.clone());
        self.store.save(&record)?;
        Ok(true)
    }

    /// Most recent analyses of the signed-in user.
    pub fn history(&self, limit: usize) -> crate::error::Result<Vec<AnalysisRecord>> {
        match self.session.user_id() {
            Some(user_id) => self.store.recent(user_id, limit),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UserConfig;

    fn context(dir: &tempfile::TempDir, session: Session) -> AppContext {
        let mut config = Config::default();
        config.history.path = dir.path().join("analyses.csv");
        AppContext::from_config(config, session).unwrap()
    }

    #[test]
    fn cli_user_overrides_config() {
        let config = Config {
            user: UserConfig {
                id: Some("from-config".into()),
            },
            ..Config::default()
        };
        assert_eq!(Session::resolve(Some("ada"), &config).user_id(), Some("ada"));
        assert_eq!(Session::resolve(None, &config).user_id(), Some("from-config"));
        assert_eq!(Session::resolve(Some("  "), &Config::default()), Session::anonymous());
    }

    #[test]
    fn anonymous_sessions_do_not_persist() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir, Session::anonymous());
        let saved = ctx.record("cv.pdf", "Job Analysis", &MatchResult::empty()).unwrap();
        assert!(!saved);
        assert!(ctx.history(5).unwrap().is_empty());
        assert!(!dir.path().join("analyses.csv").exists());
    }

    #[test]
    fn signed_in_sessions_see_only_their_history() {
        let dir = tempfile::tempdir().unwrap();
        let ada = context(&dir, Session::signed_in("ada"));
        let grace = context(&dir, Session::signed_in("grace"));

        let result = ada.analyzer.analyze("Rust and Docker", "Rust, Docker, Kubernetes");
        assert!(ada.record("cv.pdf", "Platform", &result).unwrap());

        assert_eq!(ada.history(5).unwrap().len(), 1);
        assert!(grace.history(5).unwrap().is_empty());
    }
}
