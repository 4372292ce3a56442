//! Build the Go dependency manifest and report it to WhiteSource.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

use crate::cli::SubmitArgs;
use crate::deps;
use crate::models::DependencyDescriptor;
use crate::repo::RepoId;

// The payload imitates a request file produced by WhiteSource's own
// filesystem agent, so the service accepts it without a plugin install.
const AGENT: &str = "fs-agent";
const AGENT_VERSION: &str = "2.7.0";
const PLUGIN_VERSION: &str = "18.5.1";

/// Envelope submitted as the `diff` form field (as a one-element array).
#[derive(Debug, Serialize)]
pub struct UpdateRequest {
    coordinates: Coordinates,
    dependencies: Vec<ManifestRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Coordinates {
    artifact_id: String,
    version: String,
}

/// One dependency in the filesystem-agent request schema.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestRecord {
    group_id: String,
    artifact_id: String,
    system_path: String,
    optional: bool,
    children: Vec<ManifestRecord>,
    exclusions: Vec<String>,
    licenses: Vec<String>,
    copyrights: Vec<String>,
    dependency_type: String,
    checksums: BTreeMap<String, String>,
    commit: String,
    /// Omitted entirely for branch-pinned dependencies.
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

impl ManifestRecord {
    fn from_descriptor(dep: &DependencyDescriptor, repo_dir: &Path) -> Self {
        let repo = RepoId::from_project_root(&dep.project_root);
        ManifestRecord {
            group_id: repo.owner,
            artifact_id: dep.project_root.clone(),
            system_path: repo_dir.join("Gopkg.lock").display().to_string(),
            optional: false,
            children: Vec::new(),
            exclusions: Vec::new(),
            licenses: Vec::new(),
            copyrights: Vec::new(),
            dependency_type: "GO".to_string(),
            checksums: BTreeMap::new(),
            commit: dep.revision.clone(),
            version: dep.pinned_version().map(str::to_string),
        }
    }
}

pub async fn run(args: SubmitArgs) -> Result<bool> {
    println!("Retrieving Go dependencies and assembling WhiteSource API payload...");

    let dependencies = deps::enumerate(&args.repo_dir).await?;
    if dependencies.is_empty() {
        println!("No dependencies; nothing to do.");
        return Ok(true);
    }

    let request = build_request(
        &dependencies,
        &args.repo_dir,
        &args.project_name,
        &args.project_version,
    );
    for dep in &dependencies {
        println!(
            "{} {} (version: {})",
            dep.project_root,
            dep.revision,
            dep.pinned_version().unwrap_or("none")
        );
    }

    println!();
    println!("Submitting payload to WhiteSource...");

    let diff = format!("[{}]", serde_json::to_string(&request)?);
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
        .to_string();
    let form = [
        ("type", "UPDATE"),
        ("agent", AGENT),
        ("agentVersion", AGENT_VERSION),
        ("pluginVersion", PLUGIN_VERSION),
        ("token", args.org_token.as_str()),
        ("product", args.product_token.as_str()),
        ("timeStamp", timestamp.as_str()),
        ("diff", diff.as_str()),
    ];

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("failed to build HTTP client")?;
    let body = client
        .post(&args.endpoint)
        .form(&form)
        .send()
        .await
        .context("WhiteSource submission failed")?
        .text()
        .await
        .context("failed to read WhiteSource response")?;

    match decode_response(&body) {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(true)
        }
        Err(err) => {
            // Show the raw body so the pipeline log has something to go on.
            eprintln!("{body}");
            eprintln!("{} {err:#}", "ERROR:".red().bold());
            Ok(false)
        }
    }
}

fn build_request(
    dependencies: &[DependencyDescriptor],
    repo_dir: &Path,
    project_name: &str,
    project_version: &str,
) -> UpdateRequest {
    UpdateRequest {
        coordinates: Coordinates {
            artifact_id: project_name.to_string(),
            version: project_version.to_string(),
        },
        dependencies: dependencies
            .iter()
            .map(|dep| ManifestRecord::from_descriptor(dep, repo_dir))
            .collect(),
    }
}

/// Parse the submission response. The service double-encodes its `data`
/// field as a JSON document inside a string; decode it when possible and
/// leave it as the original string otherwise. A body that is not JSON at
/// all fails the run.
fn decode_response(body: &str) -> Result<Value> {
    let mut response: Value =
        serde_json::from_str(body).context("WhiteSource returned a non-JSON response")?;

    let nested = response
        .get("data")
        .and_then(Value::as_str)
        .and_then(|data| serde_json::from_str::<Value>(data).ok());
    if let Some(nested) = nested {
        response["data"] = nested;
    }

    Ok(response)
}
