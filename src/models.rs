use serde::Deserialize;

/// One dependency as reported by `dep status -json`.
///
/// `dep` emits more fields than these; only the ones the subcommands consume
/// are deserialized.
#[derive(Debug, Clone, Deserialize)]
pub struct DependencyDescriptor {
    /// Import path of the dependency's source root, e.g. `github.com/foo/bar`.
    #[serde(rename = "ProjectRoot")]
    pub project_root: String,
    /// Resolved VCS revision.
    #[serde(rename = "Revision")]
    pub revision: String,
    /// Resolved version. `dep` reports `branch <name>` for branch-pinned
    /// dependencies and may leave this empty.
    #[serde(rename = "Version", default)]
    pub version: Option<String>,
}

impl DependencyDescriptor {
    /// The release version, or `None` when the dependency floats on a branch
    /// (`branch master` and friends) or has no version at all.
    pub fn pinned_version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .filter(|v| !v.is_empty() && !v.starts_with("branch "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(version: Option<&str>) -> DependencyDescriptor {
        DependencyDescriptor {
            project_root: "github.com/foo/bar".to_string(),
            revision: "abc123".to_string(),
            version: version.map(str::to_string),
        }
    }

    #[test]
    fn test_branch_version_is_floating() {
        assert_eq!(descriptor(Some("branch master")).pinned_version(), None);
        assert_eq!(descriptor(Some("branch dev")).pinned_version(), None);
    }

    #[test]
    fn test_tagged_version_is_preserved() {
        assert_eq!(descriptor(Some("v1.2.3")).pinned_version(), Some("v1.2.3"));
    }

    #[test]
    fn test_absent_or_empty_version_is_floating() {
        assert_eq!(descriptor(None).pinned_version(), None);
        assert_eq!(descriptor(Some("")).pinned_version(), None);
    }
}
