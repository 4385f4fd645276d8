use crate::Result;
use crate::source::RepoSpec;
use core::fmt::{Display, Formatter};

/// A request to rate one package, resolved to repository coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRatingRequest {
    identifier: String,
    repo: RepoSpec,
}

impl PackageRatingRequest {
    /// A request for a known owner and repository name.
    pub fn new(owner: &str, name: &str) -> Result<Self> {
        let repo = RepoSpec::new(owner, name)?;
        Ok(Self {
            identifier: repo.to_string(),
            repo,
        })
    }

    /// A request for a package identifier: `owner/name` or a repository URL.
    pub fn parse(identifier: &str) -> Result<Self> {
        Ok(Self {
            identifier: identifier.trim().to_string(),
            repo: RepoSpec::parse(identifier)?,
        })
    }

    /// The identifier as the caller gave it.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[must_use]
    pub const fn repo(&self) -> &RepoSpec {
        &self.repo
    }
}

impl Display for PackageRatingRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        if self.identifier == self.repo.to_string() {
            write!(f, "{}", self.repo)
        } else {
            write!(f, "{} ({})", self.identifier, self.repo)
        }
    }
}
