pub mod types;

pub use types::{BuildKind, Report};

use crate::ci::{CiSource, Provider};
use colored::Colorize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report file: {0}")]
    FileWrite(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// How the report is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Coloured terminal output, or markdown when written to a file
    Terminal,
    Json,
}

/// Report for a resolved CI source.
pub fn build(source: &CiSource) -> Report {
    let pull_request_id = Some(source.pull_request_id())
        .filter(|id| !id.is_empty())
        .map(str::to_string);
    let kind = if pull_request_id.is_some() {
        BuildKind::PullRequest
    } else {
        BuildKind::Branch
    };

    Report {
        provider: Some(source.provider()),
        kind,
        pull_request_id,
        repo_slug: Some(source.repo_slug().to_string()),
        repo_url: Some(source.repo_url().to_string()),
        request_sources: source.supported_request_sources().to_vec(),
    }
}

/// Report for a CI build that is not for a pull request.
pub fn branch_build(provider: Provider) -> Report {
    Report {
        provider: Some(provider),
        kind: BuildKind::Branch,
        pull_request_id: None,
        repo_slug: None,
        repo_url: None,
        request_sources: provider.supported_request_sources().to_vec(),
    }
}

/// Report for a run outside any known CI provider.
pub fn local() -> Report {
    Report {
        provider: None,
        kind: BuildKind::Local,
        pull_request_id: None,
        repo_slug: None,
        repo_url: None,
        request_sources: Vec::new(),
    }
}

/// Output the report to stdout, or as markdown to a file when a path is given.
#[instrument(skip(report), fields(kind = %report.kind))]
pub fn output(report: &Report, format: Format, output_path: Option<&Path>) -> Result<(), ReportError> {
    let rendered = match format {
        Format::Terminal => {
            if output_path.is_none() {
                debug!("writing report to terminal");
                print_terminal_report(report);
                return Ok(());
            }
            render_markdown(report)
        }
        Format::Json => serde_json::to_string_pretty(report)? + "\n",
    };

    match output_path {
        None => print!("{rendered}"),
        Some(path) => {
            debug!(path = %path.display(), "writing report to file");
            std::fs::write(path, rendered)?;
        }
    }
    Ok(())
}

fn print_terminal_report(report: &Report) {
    println!();
    match report.provider {
        Some(provider) => println!("CI provider: {}", provider.name().bold()),
        None => println!("CI provider: {}", "none detected".dimmed()),
    }
    println!("Build: {}", colorize_kind(report.kind));

    if let Some(id) = &report.pull_request_id {
        println!("Pull request: #{id}");
    }
    if let Some(slug) = &report.repo_slug {
        println!("Repository: {}", slug.cyan());
    }
    if let Some(url) = &report.repo_url {
        println!("Remote URL: {url}");
    }
    if !report.request_sources.is_empty() {
        println!("Request sources:");
        for source in &report.request_sources {
            println!("  • {source}");
        }
    }
    println!();
}

fn render_markdown(report: &Report) -> String {
    let mut md = String::new();
    match report.provider {
        Some(provider) => md.push_str(&format!("# {} build\n\n", provider.name())),
        None => md.push_str("# Local build\n\n"),
    }
    md.push_str(&format!("**Build:** {}\n\n", report.kind));

    if let Some(id) = &report.pull_request_id {
        md.push_str(&format!("**Pull request:** #{id}\n\n"));
    }
    if let Some(slug) = &report.repo_slug {
        md.push_str(&format!("**Repository:** `{slug}`\n\n"));
    }
    if let Some(url) = &report.repo_url {
        md.push_str(&format!("**Remote URL:** `{url}`\n\n"));
    }
    if !report.request_sources.is_empty() {
        md.push_str("## Request sources\n\n");
        for source in &report.request_sources {
            md.push_str(&format!("- {source}\n"));
        }
    }
    md
}

fn colorize_kind(kind: BuildKind) -> colored::ColoredString {
    match kind {
        BuildKind::PullRequest => "PULL REQUEST".green().bold(),
        BuildKind::Branch => "BRANCH".yellow().bold(),
        BuildKind::Local => "LOCAL".dimmed(),
    }
}
