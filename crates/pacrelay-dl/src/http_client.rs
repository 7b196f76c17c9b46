use std::time::Duration;

use ureq::{Agent, Proxy};

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub user_agent: Option<String>,
    pub proxy: Option<Proxy>,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    /// Creates a default ClientConfig with a user agent of `pacrelay/<version>`
    /// and no proxy or timeout.
    fn default() -> Self {
        Self {
            user_agent: Some(concat!("pacrelay/", env!("CARGO_PKG_VERSION")).into()),
            proxy: None,
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Builds an HTTP `Agent` configured from this `ClientConfig`.
    ///
    /// Non-success statuses are returned as responses rather than errors so
    /// callers can report the status together with the URL.
    pub fn build(&self) -> Agent {
        let mut config = ureq::Agent::config_builder()
            .proxy(self.proxy.clone())
            .timeout_global(self.timeout)
            .http_status_as_error(false);

        if let Some(user_agent) = &self.user_agent {
            config = config.user_agent(user_agent);
        }

        config.build().into()
    }
}
