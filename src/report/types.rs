use serde::Serialize;

use crate::ci::{Provider, RequestSource};

/// What kind of build the environment describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildKind {
    /// Not running under a known CI provider
    Local,
    /// CI build of a branch or tag
    Branch,
    /// CI build of a pull/merge request
    PullRequest,
}

impl std::fmt::Display for BuildKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildKind::Local => write!(f, "LOCAL"),
            BuildKind::Branch => write!(f, "BRANCH"),
            BuildKind::PullRequest => write!(f, "PULL REQUEST"),
        }
    }
}

/// Everything detected about the current build.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Detected provider, None outside CI
    pub provider: Option<Provider>,
    pub kind: BuildKind,
    /// PR number as exported by the provider
    pub pull_request_id: Option<String>,
    /// Canonical repository slug
    pub repo_slug: Option<String>,
    /// Remote URL the slug was derived from
    pub repo_url: Option<String>,
    /// Code hosts the provider can build pull requests for
    pub request_sources: Vec<RequestSource>,
}
