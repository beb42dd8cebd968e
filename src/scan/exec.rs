use super::prompt::ask_year;
use super::repos::{list_repositories, ListOptions};
use super::report::Reporter;
use super::tree::Aggregator;
use crate::cli::ScanArgs;
use crate::config::{ScanOptions, Settings};
use crate::github::{GitHubClient, SyncTransport};
use crate::model::{ExtensionTally, RepositoryDescriptor, RepositoryReport, ScanOutput, SCHEMA_VERSION};
use crate::term::Console;
use anyhow::Context;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    pub repositories: Vec<RepositoryReport>,
    pub overall: ExtensionTally,
}

pub fn exec(args: ScanArgs) -> anyhow::Result<()> {
    let console = if args.json {
        Console::stderr()
    } else {
        Console::stdout()
    };

    let mut settings = Settings::load(&args.env_file)
        .with_context(|| format!("Failed to load settings from {}", args.env_file.display()))?;
    if let Some(url) = &args.api_url {
        settings = settings.with_api_url(url.clone());
    }
    tracing::info!(user = %settings.username, api = %settings.api_url, "settings loaded");

    let year = match args.year {
        Some(year) => Some(year),
        None => ask_year(&mut std::io::stdin().lock(), &console),
    };
    let options = ScanOptions {
        year,
        limit: args.limit,
        max_depth: args.max_depth,
        output: args.output.clone(),
    };

    let client = GitHubClient::new(settings);

    console.info("Fetching repositories...");
    let repos = with_spinner("Fetching repositories...", args.json, || {
        list_repositories(
            &client,
            ListOptions {
                year: options.year,
                limit: options.limit,
            },
            &console,
        )
    });

    if repos.is_empty() {
        console.notice("No repositories found for the specified criteria.");
        if args.json {
            print_json(&ScanSummary::default(), options.year)?;
        }
        return Ok(());
    }

    let reporter = Reporter::new(&options.output, &console);
    let summary = scan_repositories(&client, &repos, &options, &reporter, &console);
    reporter.record_overall(&summary.overall, repos.len());

    if args.json {
        print_json(&summary, options.year)?;
    }
    Ok(())
}

/// Walks every repository in order, writing each block and folding the overall tally.
pub fn scan_repositories<T: SyncTransport>(
    client: &GitHubClient<T>,
    repos: &[RepositoryDescriptor],
    options: &ScanOptions,
    reporter: &Reporter<'_>,
    console: &Console,
) -> ScanSummary {
    let aggregator = Aggregator::new(client, console, options.max_depth);
    let mut summary = ScanSummary::default();

    for repo in repos {
        console.blank();
        console.repo(&format!("Processing repository: {}", repo.name));
        let result = aggregator.aggregate_repository(repo);
        console.repo_total(&format!("Total lines in {}: {}", repo.name, result.total_lines));
        summary.overall.merge(&result.tally);

        match reporter.record_repository(&repo.name, &result) {
            Ok(()) => console.success(&format!(
                "Summary written to {} for repository: {}",
                reporter.output().display(),
                repo.name
            )),
            Err(e) => console.error(&format!(
                "Unable to write summary for {} to {}: {e}",
                repo.name,
                reporter.output().display()
            )),
        }

        summary.repositories.push(RepositoryReport {
            name: repo.name.clone(),
            owner: repo.owner.clone(),
            total_lines: result.total_lines,
            tally: result.tally,
        });
    }

    summary
}

fn with_spinner<R>(message: &'static str, hidden: bool, work: impl FnOnce() -> R) -> R {
    if hidden {
        return work();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    let out = work();
    pb.finish_and_clear();
    out
}

pub fn scan_output(summary: &ScanSummary, year: Option<i32>) -> ScanOutput {
    ScanOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        year,
        repository_count: summary.repositories.len(),
        repositories: summary.repositories.clone(),
        overall: summary.overall.clone(),
    }
}

fn print_json(summary: &ScanSummary, year: Option<i32>) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&scan_output(summary, year))?);
    Ok(())
}
