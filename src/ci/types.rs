use serde::Serialize;
use std::fmt;

use super::providers::Provider;

/// Code hosts a pull request can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RequestSource {
    GitHub,
    GitLab,
    BitbucketCloud,
    BitbucketServer,
    Vsts,
}

impl fmt::Display for RequestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestSource::GitHub => "GitHub",
            RequestSource::GitLab => "GitLab",
            RequestSource::BitbucketCloud => "Bitbucket Cloud",
            RequestSource::BitbucketServer => "Bitbucket Server",
            RequestSource::Vsts => "VSTS",
        };
        write!(f, "{name}")
    }
}

/// The build being run, as described by its CI provider.
/// Built once by `CiSource::from_env` and never changed afterwards.
#[derive(Debug, Clone)]
pub struct CiSource {
    pub(super) provider: Provider,
    /// Empty when the build is not for a pull request
    pub(super) pull_request_id: String,
    /// Canonical `owner/path.../repo`
    pub(super) repo_slug: String,
    /// Remote URL exactly as configured
    pub(super) repo_url: String,
}

impl CiSource {
    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn pull_request_id(&self) -> &str {
        &self.pull_request_id
    }

    pub fn repo_slug(&self) -> &str {
        &self.repo_slug
    }

    pub fn repo_url(&self) -> &str {
        &self.repo_url
    }

    pub fn supported_request_sources(&self) -> &'static [RequestSource] {
        self.provider.supported_request_sources()
    }
}
