use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "ci-deputy",
    about = "CI chores for Go projects: licenses, PR labels, dependency reporting",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Save the license of every Go dependency to a directory
    Licenses(LicensesArgs),
    /// Check that the current pull request carries a required label
    ValidatePr(ValidatePrArgs),
    /// Report the Go dependency manifest to WhiteSource
    Submit(SubmitArgs),
}

#[derive(Args, Debug)]
pub struct LicensesArgs {
    /// Go repository to enumerate dependencies from
    pub repo_dir: PathBuf,

    /// Directory license files are written to
    pub licenses_dir: PathBuf,

    /// GitHub API token
    #[arg(long, env = "CHANGELOG_GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: String,

    /// User-Agent sent on GitHub API requests
    #[arg(long, env = "BOT_GIT_USERNAME")]
    pub user_agent: String,

    /// Maximum number of license fetches in flight at once
    #[arg(long, default_value_t = 16, value_name = "N")]
    pub concurrency: usize,
}

#[derive(Args, Debug)]
pub struct ValidatePrArgs {
    /// Repository owner
    #[arg(long, env = "CIRCLE_PROJECT_USERNAME")]
    pub org: String,

    /// Repository name
    #[arg(long, env = "CIRCLE_PROJECT_REPONAME")]
    pub repo: String,

    /// Pull request number, when the CI run has one
    #[arg(long, env = "CIRCLE_PR_NUMBER")]
    pub pr_number: Option<u64>,

    /// Branch to search for an open PR when no number is available
    #[arg(long, env = "CIRCLE_BRANCH")]
    pub branch: Option<String>,

    /// Base branch PRs are searched against
    #[arg(long, default_value = "edge")]
    pub base: String,

    /// File the validated PR number is recorded to
    #[arg(long, default_value = "prnum.txt", value_name = "FILE")]
    pub record_file: PathBuf,

    /// GitHub API token
    #[arg(long, env = "CHANGELOG_GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: String,

    /// User-Agent sent on GitHub API requests
    #[arg(long, env = "BOT_GIT_USERNAME")]
    pub user_agent: String,
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Go repository to enumerate dependencies from
    pub repo_dir: PathBuf,

    /// Project name reported in the manifest coordinates
    #[arg(long, env = "WHITESOURCE_PROJECT_NAME")]
    pub project_name: String,

    /// Project version reported in the manifest coordinates
    #[arg(long, env = "WHITESOURCE_PROJECT_VERSION")]
    pub project_version: String,

    /// WhiteSource organization token
    #[arg(long, env = "WHITESOURCE_ORG_TOKEN", hide_env_values = true)]
    pub org_token: String,

    /// WhiteSource product token
    #[arg(long, env = "WHITESOURCE_PRODUCT_TOKEN", hide_env_values = true)]
    pub product_token: String,

    /// Submission endpoint
    #[arg(
        long,
        env = "WHITESOURCE_ENDPOINT",
        default_value = "https://saas.whitesourcesoftware.com/agent"
    )]
    pub endpoint: String,
}
