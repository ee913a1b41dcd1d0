pub mod providers;
pub mod types;

pub use providers::Provider;
pub use types::{CiSource, RequestSource};

use thiserror::Error;
use tracing::{debug, instrument};

use crate::env::Env;
use crate::git::{self, GitError, RemoteResolver, SlugError};

#[derive(Debug, Error)]
pub enum CiError {
    #[error("Invalid repository URL: {0}")]
    Slug(#[from] SlugError),

    #[error("{provider}: {var} is not set and the local git remote could not be read")]
    MissingRemote {
        provider: Provider,
        var: &'static str,
        source: GitError,
    },
}

impl CiSource {
    /// Describe the current build from the environment.
    ///
    /// The repository URL comes from the provider's URL variable, falling back
    /// to the `remote` of the local git checkout when the provider leaves it out.
    #[instrument(skip(env, resolver), fields(provider = %provider))]
    pub async fn from_env(
        provider: Provider,
        env: &Env,
        resolver: &dyn RemoteResolver,
        remote: &str,
    ) -> Result<CiSource, CiError> {
        let vars = provider.vars();

        let repo_url = match env.get(vars.remote_url) {
            Some(url) => url.to_string(),
            None => {
                debug!(var = vars.remote_url, remote, "remote URL not exported, asking git");
                resolver
                    .remote_url(remote)
                    .await
                    .map_err(|source| CiError::MissingRemote {
                        provider,
                        var: vars.remote_url,
                        source,
                    })?
            }
        };

        let repo_slug = git::normalize(&repo_url)?;
        let pull_request_id = provider.pull_request_id(env).unwrap_or_default().to_string();
        debug!(slug = %repo_slug, pr = %pull_request_id, "resolved CI source");

        Ok(CiSource {
            provider,
            pull_request_id,
            repo_slug,
            repo_url,
        })
    }
}
