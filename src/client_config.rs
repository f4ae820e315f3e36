//! Client configuration.
//!
//! A [`ClientConfig`] is assembled once by the caller and consumed when the
//! client is constructed. Nothing in it changes afterwards.

use std::path::PathBuf;

/// Default location of the transport private key, relative to the working directory.
pub const DEFAULT_KEY_PATH: &str = "../keys/agent2-key.pem";

/// Default location of the transport certificate, relative to the working directory.
pub const DEFAULT_CERT_PATH: &str = "../keys/agent2-cert.pem";

/// User-Agent sent unless the caller overrides it.
pub const DEFAULT_USER_AGENT: &str = concat!("kdsvc-rpc/", env!("CARGO_PKG_VERSION"));

/// Locations of the private key and certificate presented on encrypted transports.
///
/// Both files are PEM encoded. They are read only when the base address uses
/// the `https` scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityFiles {
    pub key_path: PathBuf,
    pub cert_path: PathBuf,
}

impl IdentityFiles {
    pub fn new(key_path: impl Into<PathBuf>, cert_path: impl Into<PathBuf>) -> Self {
        Self {
            key_path: key_path.into(),
            cert_path: cert_path.into(),
        }
    }
}

impl Default for IdentityFiles {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_PATH, DEFAULT_CERT_PATH)
    }
}

/// Client configuration and connection parameters.
///
/// # Example
///
/// ```
/// use kdsvc_rpc::ClientConfig;
///
/// let config = ClientConfig::new("http://erp.example.com/k3cloud/")
///     .with_header("X-Tenant", "acme")
///     .with_serialized_exchanges(true);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // ---
    /// Base server address, scheme + host + port + optional path prefix.
    ///
    /// Blocking-style service paths are resolved relative to it, so a prefix
    /// such as `/k3cloud/` needs its trailing slash.
    pub base_url: String,

    /// Header overrides merged over the defaults. Later entries win.
    pub headers: Vec<(String, String)>,

    /// Identity material for encrypted transports.
    pub identity: IdentityFiles,

    /// Value of the `User-Agent` header.
    pub user_agent: String,

    /// Hold an exchange gate from session read to session write so that
    /// blocking-style exchanges observe each other's cookies in issue order.
    ///
    /// The core imposes no timeout, so a blocking-style exchange that never
    /// completes holds the gate and stalls every later one on this client and
    /// its clones. Bound calls with `RpcClient::execute_with_timeout`, which
    /// releases the gate when the deadline elapses.
    ///
    /// Default: `true`
    pub serialize_exchanges: bool,

    /// Attach the session cookie to non-blocking-style exchanges.
    ///
    /// Default: `true`
    pub async_cookies: bool,

    /// Let the HTTP transport pick up proxies from the environment.
    ///
    /// Default: `true`
    pub use_system_proxy: bool,
}

impl ClientConfig {
    /// Create a configuration for the given base server address.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            headers: Vec::new(),
            identity: IdentityFiles::default(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            serialize_exchanges: true,
            async_cookies: true,
            use_system_proxy: true,
        }
    }

    /// Add a header override. Overrides win over the default headers.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Read the transport identity from non-default locations.
    pub fn with_identity_files(mut self, identity: IdentityFiles) -> Self {
        self.identity = identity;
        self
    }

    /// Set the `User-Agent` header value.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Enable or disable the exchange gate for blocking-style exchanges.
    ///
    /// With the gate disabled, concurrently issued exchanges race on the
    /// session cookie and the last response to complete wins.
    ///
    /// With the gate enabled, an exchange that hangs blocks all later
    /// blocking-style exchanges until it completes or is cancelled; use
    /// `RpcClient::execute_with_timeout` to put a bound on it.
    pub fn with_serialized_exchanges(mut self, enabled: bool) -> Self {
        self.serialize_exchanges = enabled;
        self
    }

    /// Enable or disable the session cookie on non-blocking-style exchanges.
    pub fn with_async_cookies(mut self, enabled: bool) -> Self {
        self.async_cookies = enabled;
        self
    }

    /// Ignore `HTTP_PROXY`/`HTTPS_PROXY` style environment settings.
    pub fn without_system_proxy(mut self) -> Self {
        self.use_system_proxy = false;
        self
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_defaults() {
        // ---
        let config = ClientConfig::new("http://host/k3cloud/");

        assert_eq!(config.base_url, "http://host/k3cloud/");
        assert!(config.headers.is_empty());
        assert_eq!(config.identity.key_path, PathBuf::from(DEFAULT_KEY_PATH));
        assert_eq!(config.identity.cert_path, PathBuf::from(DEFAULT_CERT_PATH));
        assert!(config.user_agent.starts_with("kdsvc-rpc/"));
        assert!(config.serialize_exchanges);
        assert!(config.async_cookies);
        assert!(config.use_system_proxy);
    }

    #[test]
    fn test_builder_methods() {
        // ---
        let config = ClientConfig::new("https://host/")
            .with_header("Accept-Language", "zh-CN")
            .with_identity_files(IdentityFiles::new("k.pem", "c.pem"))
            .with_user_agent("erp-sync")
            .with_serialized_exchanges(false)
            .with_async_cookies(false)
            .without_system_proxy();

        assert_eq!(
            config.headers,
            vec![("Accept-Language".to_owned(), "zh-CN".to_owned())]
        );
        assert_eq!(config.identity, IdentityFiles::new("k.pem", "c.pem"));
        assert_eq!(config.user_agent, "erp-sync");
        assert!(!config.serialize_exchanges);
        assert!(!config.async_cookies);
        assert!(!config.use_system_proxy);
    }
}
