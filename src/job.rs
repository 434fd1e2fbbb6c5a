use std::path::PathBuf;

use anyhow::Context;

use crate::scraper;

/// Job descriptions shorter than this (after trimming) are not worth analyzing.
pub const MIN_JOB_DESCRIPTION_CHARS: usize = 10;

/// Where the job description comes from.
#[derive(Debug, Clone)]
pub enum JobSource {
    File(PathBuf),
    Text(String),
    Url(String),
}

impl JobSource {
    /// Loads the description, running file and network reads on the blocking pool.
    pub async fn load(self) -> anyhow::Result<String> {
        let text = match self {
            JobSource::Text(text) => text,
            JobSource::File(path) => {
                let display = path.display().to_string();
                tokio::task::spawn_blocking(move || std::fs::read_to_string(&path))
                    .await?
                    .with_context(|| format!("failed to read job description {display}"))?
            }
            JobSource::Url(url) => {
                let target = url.clone();
                tokio::task::spawn_blocking(move || scraper::scrape_job_url(&target))
                    .await?
                    .with_context(|| format!("failed to scrape job description from {url}"))?
            }
        };
        validate_job_description(&text)?;
        Ok(text)
    }
}

pub fn validate_job_description(text: &str) -> anyhow::Result<()> {
    if text.trim().chars().count() <= MIN_JOB_DESCRIPTION_CHARS {
        anyhow::bail!(
            "job description is too short (need more than {MIN_JOB_DESCRIPTION_CHARS} characters)"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_text_is_returned() {
        let text = tokio_test::block_on(
            JobSource::Text("Senior Rust engineer, Kubernetes".into()).load(),
        )
        .unwrap();
        assert_eq!(text, "Senior Rust engineer, Kubernetes");
    }

    #[test]
    fn file_source_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.md");
        std::fs::write(&path, "Python developer with AWS and Docker experience").unwrap();

        let text = tokio_test::block_on(JobSource::File(path).load()).unwrap();
        assert!(text.starts_with("Python developer"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = tokio_test::block_on(JobSource::File(dir.path().join("absent.txt")).load());
        assert!(result.is_err());
    }

    #[test]
    fn short_descriptions_are_rejected() {
        assert!(validate_job_description("   rust    ").is_err());
        assert!(validate_job_description("0123456789").is_err());
        assert!(validate_job_description("0123456789a").is_ok());
    }
}
