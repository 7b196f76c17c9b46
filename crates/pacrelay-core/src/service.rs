use std::{path::PathBuf, time::Duration};

use pacrelay_config::config::Config;
use pacrelay_dl::{
    github::{read_releases, GithubClient, GithubRelease},
    http_client::ClientConfig,
};
use tracing::{debug, error};

use crate::{
    repo::{RepoGenerator, Snapshot},
    response::{assemble, Resource, Response},
    RepoResult,
};

/// Where release listings come from.
#[derive(Debug)]
pub enum ReleaseSource {
    Github(GithubClient),
    /// A saved copy of the API's JSON response.
    File(PathBuf),
}

/// Answers resource requests, fetching the release listing per request.
#[derive(Debug)]
pub struct RepoService {
    generator: RepoGenerator,
    source: ReleaseSource,
}

impl RepoService {
    pub fn new(config: Config, source: ReleaseSource) -> RepoResult<Self> {
        Ok(Self {
            generator: RepoGenerator::new(config)?,
            source,
        })
    }

    /// Service backed by the GitHub API described in `config`. The
    /// configured timeout applies unless `client_config` sets one.
    pub fn github(config: Config, mut client_config: ClientConfig) -> RepoResult<Self> {
        if client_config.timeout.is_none() {
            client_config.timeout = config.timeout.map(Duration::from_secs);
        }
        let client = GithubClient::new(
            config.api_url(),
            config.token.as_ref().map(|t| t.expose().to_string()),
            &client_config,
        );
        Self::new(config, ReleaseSource::Github(client))
    }

    pub fn generator(&self) -> &RepoGenerator {
        &self.generator
    }

    pub fn config(&self) -> &Config {
        self.generator.config()
    }

    /// Retrieves the release listing. A single attempt; failures abort.
    pub fn fetch(&self) -> RepoResult<Vec<GithubRelease>> {
        let config = self.config();
        let releases = match &self.source {
            ReleaseSource::Github(client) => {
                client.fetch_releases(&config.project, config.releases_per_page())?
            }
            ReleaseSource::File(path) => read_releases(path)?,
        };
        debug!("Loaded {} releases", releases.len());
        Ok(releases)
    }

    pub fn snapshot(&self) -> RepoResult<Snapshot> {
        let releases = self.fetch()?;
        Ok(self.generator.snapshot(&releases))
    }

    /// Resolves `name` into a response, propagating failures.
    pub fn respond(&self, name: &str) -> RepoResult<Response> {
        let resource = Resource::parse(name, &self.config().repository);
        if !resource.needs_releases() {
            return Ok(Response::placeholder());
        }
        let snapshot = self.snapshot()?;
        assemble(&self.generator, &resource, &snapshot)
    }

    /// Like [`respond`](Self::respond) but renders failures as an error
    /// response.
    pub fn handle(&self, name: &str) -> Response {
        self.respond(name).unwrap_or_else(|err| {
            error!("Failed to serve {}: {}", name, err);
            Response::error(&err)
        })
    }
}
