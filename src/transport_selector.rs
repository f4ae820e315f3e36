//! Transport selection.
//!
//! Inspects the base server address to choose between the plain and the
//! encrypted transport, composes the default request headers, and loads the
//! transport identity when encryption is selected. All failures here happen
//! at client construction time.

use std::fmt;
use std::path::Path;

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT_CHARSET, CONNECTION, CONTENT_TYPE, USER_AGENT,
};
use url::Url;

use crate::{ClientConfig, IdentityFiles, Result, RpcError, TransportKind};

/// `Content-Type` of every request body.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// PEM encoded private key followed by its certificate.
#[derive(Clone)]
pub struct IdentityPem(Vec<u8>);

impl IdentityPem {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for IdentityPem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityPem")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}

/// Outcome of transport selection for one client.
#[derive(Debug, Clone)]
pub struct TransportSelection {
    pub kind: TransportKind,
    pub base_url: Url,
    /// Defaults merged with the caller's overrides.
    pub headers: HeaderMap,
    /// Present exactly when `kind` is [`TransportKind::Encrypted`].
    pub identity: Option<IdentityPem>,
    pub use_system_proxy: bool,
}

/// Select the transport for `config`.
///
/// # Errors
///
/// Returns error if:
/// - the base address does not parse or is neither `http` nor `https`
/// - a header override is not a valid header
/// - the address is `https` and the key or certificate file cannot be read
pub fn select(config: &ClientConfig) -> Result<TransportSelection> {
    // ---
    let (base_url, kind) = resolve_base_url(&config.base_url)?;
    let headers = default_headers(&config.user_agent, &config.headers)?;

    let identity = match kind {
        TransportKind::Encrypted => Some(load_identity(&config.identity)?),
        TransportKind::Plain => None,
    };

    tracing::debug!(?kind, base_url = %base_url, "transport selected");

    Ok(TransportSelection {
        kind,
        base_url,
        headers,
        identity,
        use_system_proxy: config.use_system_proxy,
    })
}

/// Parse the base address and derive the transport kind from its scheme.
///
/// # Errors
///
/// Returns `RpcError::InvalidUrl` or `RpcError::UnsupportedScheme`.
pub fn resolve_base_url(raw: &str) -> Result<(Url, TransportKind)> {
    // ---
    let url = Url::parse(raw)?;

    let kind = match url.scheme() {
        "https" => TransportKind::Encrypted,
        "http" => TransportKind::Plain,
        other => return Err(RpcError::UnsupportedScheme(other.to_owned())),
    };

    Ok((url, kind))
}

/// Default request headers with the caller's overrides applied on top.
///
/// # Errors
///
/// Returns `RpcError::InvalidHeader` for an override that is not valid HTTP.
pub fn default_headers(user_agent: &str, overrides: &[(String, String)]) -> Result<HeaderMap> {
    // ---
    let mut headers = HeaderMap::new();
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    headers.insert(ACCEPT_CHARSET, HeaderValue::from_static("utf-8"));
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent)
            .map_err(|_| RpcError::InvalidHeader(format!("User-Agent: {user_agent}")))?,
    );

    for (name, value) in overrides {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| RpcError::InvalidHeader(name.clone()))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| RpcError::InvalidHeader(format!("{name}: {value}")))?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}

/// Read the private key and certificate.
///
/// # Errors
///
/// Returns `RpcError::Credentials` naming the first file that could not be read.
pub fn load_identity(files: &IdentityFiles) -> Result<IdentityPem> {
    // ---
    let mut pem = read_credential(&files.key_path)?;
    if !pem.ends_with(b"\n") {
        pem.push(b'\n');
    }
    pem.extend(read_credential(&files.cert_path)?);

    tracing::debug!(
        key = %files.key_path.display(),
        cert = %files.cert_path.display(),
        "transport identity loaded"
    );

    Ok(IdentityPem(pem))
}

fn read_credential(path: &Path) -> Result<Vec<u8>> {
    // ---
    std::fs::read(path).map_err(|source| RpcError::Credentials {
        path: path.to_path_buf(),
        source,
    })
}
