//! Configuration for the confinator demo application.
//!
//! Every field is a [`Var`], so the flag set can write parsed values straight
//! into it. [`Upstream`] is not a built-in type; `main` registers a handler
//! for it before binding.

use std::any::Any;
use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Duration;

use confinator::{Confinator, FlagSet, Header, Value, ValueError, Var};
use serde::Serialize;

/// Root configuration for the demo application.
#[derive(Serialize, Debug)]
pub struct DemoConfig {
    /// Application name shown in the banner.
    pub name: Var<String>,
    /// Enable verbose output.
    pub verbose: Var<bool>,
    /// Address to listen on.
    pub listen: Var<Option<IpAddr>>,
    /// Port to listen on.
    pub port: Var<u64>,
    /// How long to wait on the upstream.
    pub timeout: Var<Duration>,
    /// Peers to gossip with.
    pub peers: Var<Vec<String>>,
    /// Retry back-off steps, in milliseconds.
    pub backoff: Var<Vec<usize>>,
    /// Free-form labels.
    pub labels: Var<HashMap<String, String>>,
    /// Headers added to upstream requests.
    pub headers: Var<Header>,
    /// Where requests are forwarded.
    pub upstream: Var<Upstream>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            name: Var::new("confinator-demo".into()),
            verbose: Var::default(),
            listen: Var::new("127.0.0.1".parse().ok()),
            port: Var::new(8080),
            timeout: Var::new(Duration::from_secs(30)),
            peers: Var::default(),
            backoff: Var::default(),
            labels: Var::default(),
            headers: Var::default(),
            upstream: Var::new(Upstream {
                scheme: "http".into(),
                authority: "localhost:9000".into(),
            }),
        }
    }
}

impl DemoConfig {
    pub fn bind(&self, cf: &Confinator, fs: &mut FlagSet) {
        cf.bind(fs, &self.name, "name", "Application name shown in the banner.");
        cf.bind(fs, &self.verbose, "verbose", "Enable verbose output.");
        cf.bind(fs, &self.listen, "listen", "Address to listen on.");
        cf.bind(fs, &self.port, "port", "Port to listen on.");
        cf.bind(fs, &self.timeout, "timeout", "Upstream timeout, e.g. 1m30s.");
        cf.bind(fs, &self.peers, "peer", "Peer to gossip with (repeatable).");
        cf.bind(fs, &self.backoff, "backoff", "Retry back-off step in ms (repeatable).");
        cf.bind(fs, &self.labels, "label", "key:value label (repeatable).");
        cf.bind(fs, &self.headers, "header", "Name:value upstream header (repeatable).");
        cf.bind(fs, &self.upstream, "upstream", "Upstream URL, scheme://authority.");
    }
}

/// `scheme://authority`, e.g. `https://api.example.com`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Upstream {
    pub scheme: String,
    pub authority: String,
}

/// Flag value for [`Upstream`]. Text without `://` is taken as an authority
/// with the `http` scheme.
pub struct UpstreamValue {
    var: Var<Upstream>,
}

impl UpstreamValue {
    pub fn new(var: &Var<Upstream>) -> Self {
        Self { var: var.clone() }
    }
}

impl Value for UpstreamValue {
    fn set(&mut self, token: &str) -> Result<(), ValueError> {
        let (scheme, authority) = token.split_once("://").unwrap_or(("http", token));
        self.var.set(Upstream {
            scheme: scheme.to_string(),
            authority: authority.to_string(),
        });
        Ok(())
    }

    fn render(&self) -> String {
        let upstream = self.var.read();
        format!("{}://{}", upstream.scheme, upstream.authority)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
