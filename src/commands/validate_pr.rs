//! Require a merge-classification label on the current pull request.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::cli::ValidatePrArgs;
use crate::github::{GithubClient, PullRequest};

/// Labels that classify a PR for the changelog. At least one is required.
const REQUIRED_LABELS: [&str; 4] = ["breaking", "enhancement", "bug", "devops"];

/// Returns `true` when the run is not a PR or the PR carries a required label.
pub async fn run(args: ValidatePrArgs) -> Result<bool> {
    let client = GithubClient::new(args.github_token, args.user_agent)?;

    let pr = match args.pr_number {
        Some(number) => Some(client.pull_request(&args.org, &args.repo, number).await?),
        // No PR number; this may still be a PR from a branch in the same org.
        None => match &args.branch {
            Some(branch) => {
                client
                    .pull_request_for_branch(&args.org, &args.repo, &args.base, branch)
                    .await?
            }
            None => None,
        },
    };

    let Some(pr) = pr else {
        println!("Not a PR; nothing to do.");
        return Ok(true);
    };

    validate(&pr, &args.record_file)
}

fn validate(pr: &PullRequest, record_file: &std::path::Path) -> Result<bool> {
    println!("Validating PR...");
    println!("PR number: {}", pr.number);

    // Later pipeline steps read the PR number back from this file.
    std::fs::write(record_file, pr.number.to_string())
        .with_context(|| format!("failed to record PR number to {}", record_file.display()))?;

    if has_required_label(&pr.label_names()) {
        println!("{} PR carries a required label.", "✓".green());
        Ok(true)
    } else {
        eprintln!(
            "{} PR is missing a required label ({}).",
            "ERROR:".red().bold(),
            REQUIRED_LABELS.join(", ")
        );
        Ok(false)
    }
}

fn has_required_label(labels: &[String]) -> bool {
    labels
        .iter()
        .any(|label| REQUIRED_LABELS.contains(&label.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::Label;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_allowed_label_passes() {
        assert!(has_required_label(&labels(&["bug"])));
        assert!(has_required_label(&labels(&["documentation", "devops"])));
    }

    #[test]
    fn test_unlisted_labels_fail() {
        assert!(!has_required_label(&labels(&["documentation"])));
        assert!(!has_required_label(&labels(&[])));
    }

    #[test]
    fn test_validate_records_pr_number() {
        let dir = tempfile::tempdir().unwrap();
        let record = dir.path().join("prnum.txt");
        let pr = PullRequest {
            number: 42,
            labels: vec![Label {
                name: "enhancement".to_string(),
            }],
        };

        assert!(validate(&pr, &record).unwrap());
        assert_eq!(std::fs::read_to_string(&record).unwrap(), "42");
    }

    #[test]
    fn test_validate_fails_without_required_label() {
        let dir = tempfile::tempdir().unwrap();
        let record = dir.path().join("prnum.txt");
        let pr = PullRequest {
            number: 7,
            labels: vec![Label {
                name: "documentation".to_string(),
            }],
        };

        // The number is still recorded; only the verdict fails.
        assert!(!validate(&pr, &record).unwrap());
        assert_eq!(std::fs::read_to_string(&record).unwrap(), "7");
    }
}
