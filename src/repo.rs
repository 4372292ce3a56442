/// GitHub owner/repository pair derived from a Go import path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    /// Derive the hosting owner and repository name from a dependency's
    /// source-root import path.
    ///
    /// Vanity import paths that redirect to GitHub are rewritten to their
    /// canonical `github.com/...` form first, then the owner is the segment
    /// after the host and the name is the final segment.
    pub fn from_project_root(project_root: &str) -> Self {
        let canonical = canonicalize(project_root);

        let after_host = canonical
            .split_once('/')
            .map(|(_, rest)| rest)
            .unwrap_or(canonical.as_str());
        let owner = after_host.split('/').next().unwrap_or_default().to_string();
        let name = canonical
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();

        RepoId { owner, name }
    }

    /// `owner/name`, as used in GitHub API paths and log lines.
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// File name the license is cached under in the output directory.
    pub fn license_file_name(&self) -> String {
        format!("{}--{}", self.owner, self.name)
    }
}

/// Rewrite known vanity import paths to their canonical GitHub location.
fn canonicalize(project_root: &str) -> String {
    if let Some(rest) = project_root.strip_prefix("golang.org/x/") {
        return format!("github.com/golang/{rest}");
    }
    if project_root == "google.golang.org/appengine" {
        return "github.com/golang/appengine".to_string();
    }
    project_root.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_github_path() {
        let repo = RepoId::from_project_root("github.com/foo/bar");
        assert_eq!(repo.owner, "foo");
        assert_eq!(repo.name, "bar");
    }

    #[test]
    fn test_golang_x_alias_is_remapped() {
        let repo = RepoId::from_project_root("golang.org/x/text");
        assert_eq!(repo.owner, "golang");
        assert_eq!(repo.name, "text");
    }

    #[test]
    fn test_appengine_special_case() {
        let repo = RepoId::from_project_root("google.golang.org/appengine");
        assert_eq!(repo.owner, "golang");
        assert_eq!(repo.name, "appengine");
    }

    #[test]
    fn test_slug_and_license_file_name() {
        let repo = RepoId::from_project_root("github.com/foo/bar");
        assert_eq!(repo.slug(), "foo/bar");
        assert_eq!(repo.license_file_name(), "foo--bar");
    }

    #[test]
    fn test_nested_path_takes_final_segment() {
        let repo = RepoId::from_project_root("github.com/foo/bar/baz");
        assert_eq!(repo.owner, "foo");
        assert_eq!(repo.name, "baz");
    }
}
