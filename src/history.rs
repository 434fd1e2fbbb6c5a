//! Analysis history, one CSV row per analysis.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{AnalyzerError, Result};
use crate::scoring::MatchResult;
use crate::tier::Tier;

/// Number of analyses listed when no limit is given.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// One stored analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRecord {
    pub id: String,
    pub user_id: String,
    pub resume_name: String,
    pub job_title: String,
    pub result: MatchResult,
    pub created_at: DateTime<Utc>,
}

impl AnalysisRecord {
    pub fn new(user_id: &str, resume_name: &str, job_title: &str, result: MatchResult) -> Self {
        let created_at = Utc::now();
        Self {
            id: format!("{}-{}", user_id, created_at.format("%Y%m%d%H%M%S%3f")),
            user_id: user_id.to_string(),
            resume_name: resume_name.to_string(),
            job_title: job_title.to_string(),
            result,
            created_at,
        }
    }

    pub fn tier(&self) -> Tier {
        self.result.tier()
    }
}

/// Flat CSV layout of an [`AnalysisRecord`].
#[derive(Debug, Serialize, Deserialize)]
struct AnalysisRow {
    #[serde(rename = "Id")]
    id: String,
    #[serde(rename = "UserId")]
    user_id: String,
    #[serde(rename = "ResumeName")]
    resume_name: String,
    #[serde(rename = "JobTitle")]
    job_title: String,
    #[serde(rename = "TotalScore")]
    total_score: u8,
    #[serde(rename = "Keywords")]
    keywords: u8,
    #[serde(rename = "Skills")]
    skills: u8,
    #[serde(rename = "Formatting")]
    formatting: u8,
    #[serde(rename = "Experience")]
    experience: u8,
    #[serde(rename = "Density")]
    density: u8,
    #[serde(rename = "Matched")]
    matched: String,
    #[serde(rename = "Missing")]
    missing: String,
    #[serde(rename = "CreatedAt")]
    created_at: DateTime<Utc>,
}

/// Keyword lists are stored as a JSON array inside one CSV cell.
fn encode_list(items: &[String]) -> Result<String> {
    serde_json::to_string(items).map_err(AnalyzerError::persistence)
}

fn decode_list(field: &str) -> Result<Vec<String>> {
    if field.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(field).map_err(AnalyzerError::persistence)
}

impl TryFrom<&AnalysisRecord> for AnalysisRow {
    type Error = AnalyzerError;

    fn try_from(record: &AnalysisRecord) -> Result<Self> {
        let r = &record.result;
        Ok(Self {
            id: record.id.clone(),
            user_id: record.user_id.clone(),
            resume_name: record.resume_name.clone(),
            job_title: record.job_title.clone(),
            total_score: r.score,
            keywords: r.keyword_score,
            skills: r.skill_score,
            formatting: r.format_score,
            experience: r.experience_score,
            density: r.density_score,
            matched: encode_list(&r.matched)?,
            missing: encode_list(&r.missing)?,
            created_at: record.created_at,
        })
    }
}

impl TryFrom<AnalysisRow> for AnalysisRecord {
    type Error = AnalyzerError;

    fn try_from(row: AnalysisRow) -> Result<Self> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            resume_name: row.resume_name,
            job_title: row.job_title,
            result: MatchResult {
                score: row.total_score,
                keyword_score: row.keywords,
                skill_score: row.skills,
                experience_score: row.experience,
                density_score: row.density,
                format_score: row.formatting,
                matched: decode_list(&row.matched)?,
                missing: decode_list(&row.missing)?,
            },
            created_at: row.created_at,
        })
    }
}

/// Where analyses are kept. Reads are always scoped to one owner.
pub trait AnalysisStore {
    fn save(&self, record: &AnalysisRecord) -> Result<()>;

    /// Newest first, at most `limit` rows belonging to `user_id`.
    fn recent(&self, user_id: &str, limit: usize) -> Result<Vec<AnalysisRecord>>;
}

/// Append-only CSV file store.
#[derive(Debug, Clone)]
pub struct CsvAnalysisStore {
    path: PathBuf,
}

impl CsvAnalysisStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn needs_header(&self) -> bool {
        fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true)
    }
}

impl AnalysisStore for CsvAnalysisStore {
    fn save(&self, record: &AnalysisRecord) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(AnalyzerError::persistence)?;
        }

        let write_header = self.needs_header();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(AnalyzerError::persistence)?;

        let mut wtr = WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        wtr.serialize(AnalysisRow::try_from(record)?)
            .map_err(AnalyzerError::persistence)?;
        wtr.flush().map_err(AnalyzerError::persistence)?;

        tracing::info!(id = %record.id, path = %self.path.display(), "analysis saved to history");
        Ok(())
    }

    fn recent(&self, user_id: &str, limit: usize) -> Result<Vec<AnalysisRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path).map_err(AnalyzerError::persistence)?;
        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(file);

        let mut records = Vec::new();
        for row in rdr.deserialize::<AnalysisRow>() {
            let row = row.map_err(AnalyzerError::persistence)?;
            if row.user_id == user_id {
                records.push(AnalysisRecord::try_from(row)?);
            }
        }

        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit);
        Ok(records)
    }
}
