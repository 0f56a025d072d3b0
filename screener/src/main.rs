use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rank_core::extract::extract_resume_text;
use rank_core::{normalize_bytes, CandidateDetails, JobCriteria, Ranker, RankerConfig, Report};
use rayon::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};
use walkdir::WalkDir;

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "screener")]
#[command(about = "Rank PDF resumes against job criteria by TF-IDF similarity", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank resumes (PDF or plain text files, or directories of them)
    Rank {
        /// Resume files or directories
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Job role, e.g. "Software Engineer"
        #[arg(long, default_value = "")]
        role: String,
        /// Experience level, e.g. "2-5 years"
        #[arg(long, default_value = "")]
        experience: String,
        /// Required skill; repeat or comma-separate
        #[arg(long = "skill", value_delimiter = ',')]
        skills: Vec<String>,
        /// JSON ranker configuration
        #[arg(long)]
        config: Option<PathBuf>,
        /// Drop English stopwords before weighting
        #[arg(long, default_value_t = false)]
        stopwords: bool,
        /// Apply English stemming
        #[arg(long, default_value_t = false)]
        stem: bool,
        /// Use idf = ln(n/df) + 1 instead of the smoothed form
        #[arg(long, default_value_t = false)]
        no_smooth_idf: bool,
        /// Use tf = 1 + ln(count)
        #[arg(long, default_value_t = false)]
        sublinear_tf: bool,
        /// Drop tokens shorter than this
        #[arg(long)]
        min_token_len: Option<usize>,
        /// Only print the best N
        #[arg(long)]
        top: Option<usize>,
        /// Include name/email/phone columns
        #[arg(long, default_value_t = false)]
        details: bool,
        /// Print the full text of the top-ranked resume
        #[arg(long, default_value_t = false)]
        preview: bool,
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Print the normalized text and contact details of one resume
    Extract {
        path: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[derive(Debug)]
struct Resume {
    name: String,
    text: String,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank { inputs, role, experience, skills, config, stopwords, stem, no_smooth_idf, sublinear_tf, min_token_len, top, details, preview, format } => {
            let overrides = Overrides { stopwords, stem, no_smooth_idf, sublinear_tf, min_token_len };
            let config = build_config(config.as_deref(), &overrides)?;
            let skills = skills.into_iter().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect();
            let job = JobCriteria::new(role, experience, skills);
            rank_resumes(&inputs, &job, config, top, details, preview, format)
        }
        Commands::Extract { path } => {
            let resume = load_resume(&path)?;
            let details = CandidateDetails::extract(&resume.text);
            println!("Name:  {}\nEmail: {}\nPhone: {}\n", details.name, details.email, details.phone);
            println!("{}", resume.text);
            Ok(())
        }
    }
}

struct Overrides {
    stopwords: bool,
    stem: bool,
    no_smooth_idf: bool,
    sublinear_tf: bool,
    min_token_len: Option<usize>,
}

fn build_config(path: Option<&Path>, overrides: &Overrides) -> Result<RankerConfig> {
    let mut config = match path {
        Some(p) => {
            let json = fs::read_to_string(p).with_context(|| format!("reading config {}", p.display()))?;
            RankerConfig::from_json_str(&json)?
        }
        None => RankerConfig::default(),
    };
    if overrides.stopwords { config.tokenizer.remove_stopwords = true; }
    if overrides.stem { config.tokenizer.stem = true; }
    if overrides.no_smooth_idf { config.smooth_idf = false; }
    if overrides.sublinear_tf { config.sublinear_tf = true; }
    if let Some(n) = overrides.min_token_len { config.tokenizer.min_token_len = n; }
    config.validate()?;
    Ok(config)
}

fn rank_resumes(inputs: &[PathBuf], job: &JobCriteria, config: RankerConfig, top: Option<usize>, details: bool, preview: bool, format: Format) -> Result<()> {
    if job.is_empty() {
        bail!("no job criteria given; pass --role, --experience or --skill");
    }
    let files = collect_inputs(inputs)?;
    if files.is_empty() {
        bail!("no .pdf or .txt resumes found");
    }
    let resumes = load_resumes(&files)?;

    let query = job.to_query();
    let ranker = Ranker::new(config)?;
    let names: Vec<String> = resumes.iter().map(|r| r.name.clone()).collect();
    let texts: Vec<String> = resumes.into_iter().map(|r| r.text).collect();
    let ranking = ranker.score(&query, &texts);
    let mut report = Report::build(&query, &names, &texts, &ranking, details);
    tracing::info!(resumes = texts.len(), vocabulary = ranking.space.vocabulary().len(), "ranking complete");

    let best = report.top().map(|row| row.index);
    if let Some(n) = top { report.truncate(n); }

    match format {
        Format::Table => print!("{}", report.to_markdown()),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    if preview {
        if let Some(index) = best {
            println!("\n== Top ranked resume: {} ==\n{}", names[index], texts[index]);
        }
    }
    Ok(())
}

fn is_resume_file(p: &Path) -> bool {
    p.extension()
        .and_then(|s| s.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "pdf" | "txt"))
        .unwrap_or(false)
}

/// Expand directories into their resume files. Directory contents are sorted by
/// path so output is stable; explicitly listed files keep their order.
fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(input)
                .into_iter()
                .filter_map(|e| e.ok())
                .map(|e| e.into_path())
                .filter(|p| p.is_file() && is_resume_file(p))
                .collect();
            found.sort();
            files.extend(found);
        } else if input.is_file() {
            if !is_resume_file(input) {
                bail!("{} is not a .pdf or .txt file", input.display());
            }
            files.push(input.clone());
        } else {
            bail!("{} does not exist", input.display());
        }
    }
    Ok(files)
}

/// Extraction runs in parallel; `collect` keeps input order.
fn load_resumes(files: &[PathBuf]) -> Result<Vec<Resume>> {
    files.par_iter().map(|p| load_resume(p)).collect()
}

fn load_resume(path: &Path) -> Result<Resume> {
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or_default().to_string();
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let is_pdf = path.extension().and_then(|s| s.to_str()).map(|e| e.eq_ignore_ascii_case("pdf")).unwrap_or(false);
    let text = if is_pdf { extract_resume_text(&name, &bytes) } else { normalize_bytes(&bytes) };
    tracing::debug!(file = %path.display(), chars = text.len(), "loaded resume");
    Ok(Resume { name, text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rank_core::NO_READABLE_TEXT;
    use tempfile::tempdir;

    fn no_overrides() -> Overrides {
        Overrides { stopwords: false, stem: false, no_smooth_idf: false, sublinear_tf: false, min_token_len: None }
    }

    #[test]
    fn collects_sorted_resume_files_from_dirs() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "java").unwrap();
        fs::write(dir.path().join("a.PDF"), "not really").unwrap();
        fs::write(dir.path().join("notes.md"), "skip me").unwrap();
        let files = collect_inputs(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<_> = files.iter().map(|p| p.file_name().unwrap().to_str().unwrap().to_string()).collect();
        assert_eq!(names, vec!["a.PDF", "b.txt"]);
    }

    #[test]
    fn rejects_missing_and_unsupported_inputs() {
        let dir = tempdir().unwrap();
        assert!(collect_inputs(&[dir.path().join("nope.pdf")]).is_err());
        let md = dir.path().join("cv.md");
        fs::write(&md, "x").unwrap();
        assert!(collect_inputs(&[md]).is_err());
    }

    #[test]
    fn loads_text_and_broken_pdfs_in_order() {
        let dir = tempdir().unwrap();
        let txt = dir.path().join("jane.txt");
        let pdf = dir.path().join("broken.pdf");
        fs::write(&txt, "  Jane Doe\nRust developer \n").unwrap();
        fs::write(&pdf, "garbage").unwrap();
        let resumes = load_resumes(&[txt, pdf]).unwrap();
        assert_eq!(resumes[0].name, "jane.txt");
        assert_eq!(resumes[0].text, "Jane Doe\nRust developer");
        assert_eq!(resumes[1].text, NO_READABLE_TEXT);
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ranker.json");
        fs::write(&path, r#"{"sublinear_tf": true}"#).unwrap();
        let overrides = Overrides { stopwords: true, min_token_len: Some(2), ..no_overrides() };
        let cfg = build_config(Some(&path), &overrides).unwrap();
        assert!(cfg.sublinear_tf);
        assert!(cfg.tokenizer.remove_stopwords);
        assert_eq!(cfg.tokenizer.min_token_len, 2);
        assert!(cfg.smooth_idf);
    }

    #[test]
    fn zero_min_token_len_is_rejected() {
        let overrides = Overrides { min_token_len: Some(0), ..no_overrides() };
        assert!(build_config(None, &overrides).is_err());
    }

    #[test]
    fn empty_job_is_rejected_before_ranking() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "rust").unwrap();
        let err = rank_resumes(&[dir.path().to_path_buf()], &JobCriteria::default(), RankerConfig::default(), None, false, false, Format::Table).unwrap_err();
        assert!(err.to_string().contains("no job criteria"));
    }
}
