mod ci;
mod config;
mod env;
mod git;
mod report;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use ci::{CiSource, Provider};
use report::Format;

/// ci-source — detects which CI provider is running the current build,
/// whether it is a pull request, and which repository it belongs to.
#[derive(Parser, Debug)]
#[command(name = "ci-source", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    detect: DetectArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Detect the CI provider and pull request from the environment (default)
    Detect(DetectArgs),

    /// Print the repository slug for a Git remote URL
    Slug {
        /// Remote URL (e.g., git@github.com:owner/repo.git)
        url: String,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
struct DetectArgs {
    /// Optional output file path; markdown unless --json is given
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,

    /// Fail unless the build is for a pull request
    #[arg(long)]
    require_pr: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Slug { url }) => {
            let slug = git::normalize(&url)?;
            debug!(url = %url, slug = %slug, "normalized remote URL");
            println!("{slug}");
            Ok(())
        }
        Some(Command::Detect(args)) => detect(args).await,
        None => detect(cli.detect).await,
    }
}

async fn detect(args: DetectArgs) -> Result<(), Box<dyn std::error::Error>> {
    info!("loading configuration");
    let config = config::Config::load()?;
    let env = env::Env::from_process();

    let format = if args.json { Format::Json } else { Format::Terminal };

    let order = config.providers();
    let built_report = match Provider::detect_pull_request(&env, order) {
        Some(provider) => {
            info!(provider = %provider, "pull request build detected");
            let mut resolver = git::GitCli::new(config.git_program());
            if let Some(dir) = &config.git.dir {
                resolver = resolver.in_dir(dir);
            }
            let source = CiSource::from_env(provider, &env, &resolver, config.remote()).await?;
            info!(slug = %source.repo_slug(), pr = %source.pull_request_id(), "resolved pull request");
            report::build(&source)
        }
        None => match Provider::detect(&env, order) {
            Some(provider) => {
                info!(provider = %provider, "CI build is not for a pull request");
                report::branch_build(provider)
            }
            None => {
                info!("no known CI provider detected");
                report::local()
            }
        },
    };

    if args.require_pr && built_report.kind != report::BuildKind::PullRequest {
        return Err(format!("not a pull request build ({})", built_report.kind).into());
    }

    report::output(&built_report, format, args.output.as_deref())?;
    info!(kind = %built_report.kind, "done");
    Ok(())
}
