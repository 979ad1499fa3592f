#[cfg(test)]
pub mod test {
    use std::any::Any;
    use std::collections::HashMap;
    use std::time::Duration;

    use crate::error::ValueError;
    use crate::flagset::{FlagSet, Value};
    use crate::registry::Confinator;
    use crate::var::Var;

    /// A typical service config, one `Var` per field.
    #[derive(Debug, Default)]
    pub struct ServerConfig {
        pub host: Var<String>,
        pub port: Var<u64>,
        pub verbose: Var<bool>,
        pub timeout: Var<Duration>,
        pub tags: Var<Vec<String>>,
        pub labels: Var<HashMap<String, String>>,
    }

    impl ServerConfig {
        pub fn bind(&self, cf: &Confinator, fs: &mut FlagSet) {
            cf.bind(fs, &self.host, "host", "The application host.");
            cf.bind(fs, &self.port, "port", "The port number.");
            cf.bind(fs, &self.verbose, "verbose", "Enable debug output.");
            cf.bind(fs, &self.timeout, "timeout", "Request timeout.");
            cf.bind(fs, &self.tags, "tag", "Tag to attach (repeatable).");
            cf.bind(fs, &self.labels, "label", "key:value label (repeatable).");
        }
    }

    #[test]
    fn server_config_binds_every_field() {
        let cf = Confinator::new();
        let mut fs = FlagSet::new("server");
        let config = ServerConfig::default();
        config.host.set("localhost".into());
        config.bind(&cf, &mut fs);
        assert_eq!(fs.len(), 6);
        assert_eq!(fs.lookup("host").unwrap().default_value(), "localhost");
    }

    // -- A type the registry does not know out of the box ---------------------

    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct Endpoint {
        pub host: String,
        pub port: u16,
    }

    impl Endpoint {
        pub fn new(host: &str, port: u16) -> Self {
            Self {
                host: host.to_string(),
                port,
            }
        }
    }

    /// `host:port` flag value for [`Endpoint`].
    pub struct EndpointValue {
        var: Var<Endpoint>,
    }

    impl EndpointValue {
        pub fn new(var: &Var<Endpoint>) -> Self {
            Self { var: var.clone() }
        }
    }

    impl Value for EndpointValue {
        fn set(&mut self, token: &str) -> Result<(), ValueError> {
            let (host, port) = token.rsplit_once(':').unwrap_or((token, "0"));
            let port = port.parse::<u16>()?;
            self.var.set(Endpoint::new(host, port));
            Ok(())
        }

        fn render(&self) -> String {
            let endpoint = self.var.read();
            format!("{}:{}", endpoint.host, endpoint.port)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }
}
