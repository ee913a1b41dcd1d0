use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::RequestSource;
use crate::env::Env;

/// Environment variables a provider uses to describe the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderVars {
    /// Present whenever the build runs under this provider
    pub ci_marker: &'static str,
    /// Pull/merge request number, set only on PR builds
    pub pr_number: &'static str,
    /// Git remote URL of the repository being built
    pub remote_url: &'static str,
}

/// CI providers this tool knows how to recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Appcircle,
    Bitrise,
    Buildkite,
}

impl Provider {
    /// Default probe order.
    pub const ALL: [Provider; 3] = [Provider::Appcircle, Provider::Bitrise, Provider::Buildkite];

    pub fn vars(self) -> ProviderVars {
        match self {
            Provider::Appcircle => ProviderVars {
                ci_marker: "AC_APPCIRCLE",
                pr_number: "AC_PULL_NUMBER",
                remote_url: "AC_GIT_URL",
            },
            Provider::Bitrise => ProviderVars {
                ci_marker: "BITRISE_IO",
                pr_number: "BITRISE_PULL_REQUEST",
                remote_url: "GIT_REPOSITORY_URL",
            },
            Provider::Buildkite => ProviderVars {
                ci_marker: "BUILDKITE",
                pr_number: "BUILDKITE_PULL_REQUEST",
                remote_url: "BUILDKITE_REPO",
            },
        }
    }

    /// Human-readable name (e.g., "Appcircle")
    pub fn name(self) -> &'static str {
        match self {
            Provider::Appcircle => "Appcircle",
            Provider::Bitrise => "Bitrise",
            Provider::Buildkite => "Buildkite",
        }
    }

    /// Code hosts whose pull requests this provider can build.
    pub fn supported_request_sources(self) -> &'static [RequestSource] {
        match self {
            Provider::Appcircle | Provider::Bitrise => &[
                RequestSource::GitHub,
                RequestSource::GitLab,
                RequestSource::BitbucketCloud,
                RequestSource::BitbucketServer,
            ],
            Provider::Buildkite => &[
                RequestSource::GitHub,
                RequestSource::GitLab,
                RequestSource::BitbucketServer,
                RequestSource::Vsts,
            ],
        }
    }

    pub fn is_ci(self, env: &Env) -> bool {
        env.is_set(self.vars().ci_marker)
    }

    pub fn is_pull_request(self, env: &Env) -> bool {
        self.is_ci(env) && self.pull_request_id(env).is_some()
    }

    /// PR number as exported by the provider, `None` outside a PR build.
    pub fn pull_request_id(self, env: &Env) -> Option<&str> {
        let value = env.get(self.vars().pr_number)?;
        match self {
            // Buildkite exports the literal "false" on branch builds.
            Provider::Buildkite if value == "false" => None,
            _ => Some(value),
        }
    }

    /// First provider in `order` whose CI marker is set.
    pub fn detect(env: &Env, order: &[Provider]) -> Option<Provider> {
        order.iter().copied().find(|p| p.is_ci(env))
    }

    /// First provider in `order` for which this build is a pull request.
    pub fn detect_pull_request(env: &Env, order: &[Provider]) -> Option<Provider> {
        order.iter().copied().find(|p| p.is_pull_request(env))
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = match self {
            Provider::Appcircle => "appcircle",
            Provider::Bitrise => "bitrise",
            Provider::Buildkite => "buildkite",
        };
        write!(f, "{id}")
    }
}
