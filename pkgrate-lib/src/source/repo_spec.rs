use crate::Result;
use core::fmt::{Display, Formatter};
use ohno::bail;
use std::sync::Arc;
use url::Url;

/// Coordinates of a repository on the hosting service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSpec {
    owner: Arc<str>,
    repo: Arc<str>,
}

impl RepoSpec {
    /// Create coordinates from an owner and repository name.
    pub fn new(owner: &str, repo: &str) -> Result<Self> {
        let owner = owner.trim();
        let repo = repo.trim().trim_end_matches(".git");

        if owner.is_empty() || repo.is_empty() {
            bail!("empty owner or repository name in '{owner}/{repo}'");
        }

        if !owner.chars().all(is_name_char) {
            bail!("invalid repository owner '{owner}'");
        }

        if !repo.chars().all(is_name_char) || repo == "." || repo == ".." {
            bail!("invalid repository name '{repo}'");
        }

        Ok(Self {
            owner: Arc::from(owner),
            repo: Arc::from(repo),
        })
    }

    /// Parse a package identifier.
    ///
    /// Accepts `owner/name`, a repository URL such as
    /// `https://github.com/owner/name/tree/main`, and the `git+https://` and
    /// `git://` forms found in package manifests. Extra path segments past the
    /// repository name are ignored.
    pub fn parse(identifier: &str) -> Result<Self> {
        let identifier = identifier.trim();

        if !identifier.contains("://") {
            let mut parts = identifier.split('/');
            let (Some(owner), Some(repo), None) = (parts.next(), parts.next(), parts.next()) else {
                bail!("invalid package identifier '{identifier}': expected 'owner/name' or a repository URL");
            };
            return Self::new(owner, repo);
        }

        let without_prefix = identifier.strip_prefix("git+").unwrap_or(identifier);
        let Ok(url) = Url::parse(without_prefix) else {
            bail!("invalid repository URL '{identifier}'");
        };

        Self::from_url(&url)
    }

    /// Extract coordinates from a repository URL.
    pub fn from_url(url: &Url) -> Result<Self> {
        let path_segments: Vec<_> = url.path_segments().map(Iterator::collect).unwrap_or_default();

        let [owner, repo, ..] = path_segments.as_slice() else {
            bail!("invalid repository URL format: {url}");
        };

        Self::new(owner, repo)
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

impl Display for RepoSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
