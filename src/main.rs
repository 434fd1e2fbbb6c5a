use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use resume_analyzer::config::{Config, DEFAULT_CONFIG_PATH};
use resume_analyzer::context::{AppContext, Session};
use resume_analyzer::dashboard;
use resume_analyzer::extract::{self, Document};
use resume_analyzer::job::JobSource;
use resume_analyzer::report;

const DEFAULT_JOB_TITLE: &str = "Job Analysis";

#[derive(Parser)]
#[command(name = "resume-analyzer", version, about = "Score a resume against a job description")]
struct Cli {
    /// TOML configuration file (optional)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Signed-in user; analyses are stored and listed per user
    #[arg(long, global = true, env = "RESUME_ANALYZER_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a resume (PDF, DOCX or text) against a job description
    Analyze(AnalyzeArgs),
    /// List the most recent analyses
    History {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Browse analysis history in a terminal dashboard
    Dashboard,
}

#[derive(Args)]
#[command(group(clap::ArgGroup::new("job_source").required(true).args(["job", "job_text", "job_url"])))]
struct AnalyzeArgs {
    /// Resume file
    #[arg(long)]
    resume: PathBuf,

    /// Job description file
    #[arg(long)]
    job: Option<PathBuf>,

    /// Job description text
    #[arg(long)]
    job_text: Option<String>,

    /// Job posting URL to scrape
    #[arg(long)]
    job_url: Option<String>,

    /// Title stored with the analysis
    #[arg(long, default_value = DEFAULT_JOB_TITLE)]
    job_title: String,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Do not store the analysis in history
    #[arg(long)]
    no_save: bool,
}

impl AnalyzeArgs {
    fn job_source(&self) -> JobSource {
        if let Some(path) = &self.job {
            JobSource::File(path.clone())
        } else if let Some(url) = &self.job_url {
            JobSource::Url(url.clone())
        } else {
            JobSource::Text(self.job_text.clone().unwrap_or_default())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::load(&cli.config)?;
    let session = Session::resolve(cli.user.as_deref(), &config);
    let ctx = AppContext::from_config(config, session)?;

    match cli.command {
        Command::Analyze(args) => run_analyze(&ctx, args).await,
        Command::History { limit } => {
            let limit = limit.unwrap_or(ctx.config.history.limit);
            let records = ctx.history(limit)?;
            print!("{}", report::render_history(&records, color_enabled()));
            Ok(())
        }
        Command::Dashboard => dashboard::run_dashboard(&ctx),
    }
}

async fn run_analyze(ctx: &AppContext, args: AnalyzeArgs) -> anyhow::Result<()> {
    let resume_path = args.resume.clone();
    let resume_text = tokio::task::spawn_blocking(move || {
        let document = Document::from_path(&resume_path)?;
        let text = extract::extract_text(&document)?;
        Ok::<_, resume_analyzer::AnalyzerError>((document.name, text))
    })
    .await?;
    let (resume_name, resume_text) =
        resume_text.with_context(|| format!("could not read resume {}", args.resume.display()))?;

    let job_description = args.job_source().load().await?;

    let result = ctx.analyzer.analyze(&resume_text, &job_description);
    tracing::info!(
        resume = %resume_name,
        score = result.score,
        tier = %result.tier(),
        "analysis complete"
    );

    if args.json {
        println!("{}", report::render_json(&result)?);
    } else {
        print!("{}", report::render_text(&result, color_enabled()));
    }

    if !args.no_save {
        // History is best effort; the report above is already out.
        if let Err(e) = ctx.record(&resume_name, &args.job_title, &result) {
            tracing::error!(error = %e, "error saving analysis to history");
        }
    }

    Ok(())
}

fn color_enabled() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}
