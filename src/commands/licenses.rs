//! Harvest license files for every Go dependency of a repository.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};

use crate::batch::{join_batch, ItemOutcome};
use crate::cli::LicensesArgs;
use crate::deps;
use crate::github::{GithubClient, LicenseFetch};
use crate::repo::RepoId;

/// Returns `true` when every dependency ended up with a license on disk.
pub async fn run(args: LicensesArgs) -> Result<bool> {
    println!("Retrieving Go dependencies and saving licenses to disk...");

    let dependencies = deps::enumerate(&args.repo_dir).await?;
    if dependencies.is_empty() {
        println!("No dependencies; nothing to do.");
        return Ok(true);
    }

    std::fs::create_dir_all(&args.licenses_dir).with_context(|| {
        format!(
            "failed to create licenses directory {}",
            args.licenses_dir.display()
        )
    })?;

    let client = GithubClient::new(args.github_token, args.user_agent)?;

    let pb = ProgressBar::new(dependencies.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let client = &client;
    let pb = &pb;
    let licenses_dir = args.licenses_dir.as_path();

    let report = join_batch(dependencies, args.concurrency, |dep| async move {
        let repo = RepoId::from_project_root(&dep.project_root);
        let outcome = persist_license(client, licenses_dir, &repo).await;
        match &outcome {
            ItemOutcome::Skipped => {
                pb.println(format!("{} {}: already on disk.", "→".cyan(), repo.slug()));
            }
            ItemOutcome::Done => {
                pb.println(format!("{} {}: retrieved from GitHub.", "✓".green(), repo.slug()));
            }
            ItemOutcome::Failed { reason, .. } => {
                pb.println(format!("{} {}: {}", "✗".red(), repo.slug(), reason));
            }
        }
        pb.inc(1);
        outcome
    })
    .await;

    pb.finish_and_clear();

    if report.all_succeeded() {
        println!("{}", "Done.".green());
        return Ok(true);
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(["Dependency", "Reason"]);
    for (item, reason) in &report.failures {
        table.add_row([item.as_str(), reason.as_str()]);
    }
    println!("{table}");

    eprintln!(
        "{} some licenses could not be found.",
        "ERROR:".red().bold()
    );
    Ok(false)
}

/// Fetch and persist one repository's license, unless it is already cached.
///
/// The on-disk check runs before any network call, so re-runs never re-fetch
/// a license that is already present.
async fn persist_license(
    client: &GithubClient,
    licenses_dir: &Path,
    repo: &RepoId,
) -> ItemOutcome {
    let license_path = licenses_dir.join(repo.license_file_name());
    if license_path.exists() {
        return ItemOutcome::Skipped;
    }

    match client.fetch_raw_license(repo).await {
        Ok(LicenseFetch::Found(text)) => match tokio::fs::write(&license_path, text).await {
            Ok(()) => ItemOutcome::Done,
            Err(err) => ItemOutcome::Failed {
                item: repo.slug(),
                reason: format!("could not write license file: {err}"),
            },
        },
        Ok(LicenseFetch::Missing(status)) => ItemOutcome::Failed {
            item: repo.slug(),
            reason: format!("not found (HTTP {status})"),
        },
        Err(err) => ItemOutcome::Failed {
            item: repo.slug(),
            reason: err.to_string(),
        },
    }
}
