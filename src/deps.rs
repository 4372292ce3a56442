//! Dependency enumeration via the `dep` command-line tool.

use std::path::Path;

use anyhow::{bail, Context, Result};
use tokio::process::Command;

use crate::models::DependencyDescriptor;

/// Run `dep status -json` in `repo_dir` and parse the reported dependencies.
///
/// `dep` writing anything to stderr is treated the same as a non-zero exit:
/// the run cannot trust a partial or complaining status report.
pub async fn enumerate(repo_dir: &Path) -> Result<Vec<DependencyDescriptor>> {
    let output = Command::new("dep")
        .args(["status", "-json"])
        .current_dir(repo_dir)
        .output()
        .await
        .context("failed to run `dep status -json`")?;

    if !output.status.success() {
        bail!(
            "`dep status -json` exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        bail!("`dep status -json` reported: {}", stderr.trim());
    }

    parse_status(&output.stdout)
}

fn parse_status(stdout: &[u8]) -> Result<Vec<DependencyDescriptor>> {
    serde_json::from_slice(stdout).context("malformed `dep status -json` output")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_output() {
        let stdout = br#"[
            {
                "ProjectRoot": "github.com/gorilla/websocket",
                "Constraint": "^1.2.0",
                "Version": "v1.2.0",
                "Revision": "ea4d1f681babbce9545c9c5f3d5194a789c89f5b"
            },
            {
                "ProjectRoot": "golang.org/x/text",
                "Constraint": "branch master",
                "Version": "branch master",
                "Revision": "e19ae1496984b1c655b8044a65c0300a3c878dd3"
            }
        ]"#;

        let deps = parse_status(stdout).unwrap();
        assert_eq!(deps.len(), 2);
        assert_eq!(deps[0].project_root, "github.com/gorilla/websocket");
        assert_eq!(deps[0].pinned_version(), Some("v1.2.0"));
        assert_eq!(deps[1].project_root, "golang.org/x/text");
        assert_eq!(deps[1].pinned_version(), None);
    }

    #[test]
    fn test_parse_empty_list() {
        assert!(parse_status(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_garbage_is_fatal() {
        assert!(parse_status(b"not json").is_err());
    }
}
