//! Client construction

use std::sync::Arc;

use chat_cache::EntityCacheConfig;
use chat_common::ClientConfig;
use tokio_tungstenite::tungstenite::http::uri::{InvalidUri, Uri};

use super::Client;
use crate::error::{ClientError, ClientResult};
use crate::protocol::{FrameCodec, SerdeJsonCodec};
use crate::transport::{Dialer, TungsteniteDialer};

/// Builder for [`Client`]
///
/// Defaults to the tungstenite dialer, the JSON codec and a fully enabled
/// unbounded cache.
pub struct ClientBuilder {
    config: ClientConfig,
    dialer: Option<Arc<dyn Dialer>>,
    codec: Option<Arc<dyn FrameCodec>>,
    cache: EntityCacheConfig,
}

impl ClientBuilder {
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            dialer: None,
            codec: None,
            cache: EntityCacheConfig::unlimited(),
        }
    }

    /// Use a custom dialer
    #[must_use]
    pub fn dialer(mut self, dialer: Arc<dyn Dialer>) -> Self {
        self.dialer = Some(dialer);
        self
    }

    /// Use a custom frame codec
    #[must_use]
    pub fn codec(mut self, codec: Arc<dyn FrameCodec>) -> Self {
        self.codec = Some(codec);
        self
    }

    /// Cache capacity policy
    #[must_use]
    pub fn cache_config(mut self, cache: EntityCacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// Build the client
    ///
    /// # Errors
    /// Returns `InvalidEndpoint` if the gateway URL is not a `ws`/`wss` URL
    pub fn build(self) -> ClientResult<Client> {
        validate_endpoint(&self.config.gateway_url)?;

        Ok(Client::from_parts(
            self.config,
            self.dialer.unwrap_or_else(|| Arc::new(TungsteniteDialer)),
            self.codec.unwrap_or_else(|| Arc::new(SerdeJsonCodec)),
            self.cache,
        ))
    }
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("config", &self.config)
            .field("custom_dialer", &self.dialer.is_some())
            .field("custom_codec", &self.codec.is_some())
            .field("cache", &self.cache)
            .finish()
    }
}

fn validate_endpoint(url: &str) -> ClientResult<()> {
    let invalid = |reason: String| ClientError::InvalidEndpoint {
        url: url.to_string(),
        reason,
    };

    let uri: Uri = url.parse().map_err(|e: InvalidUri| invalid(e.to_string()))?;
    match uri.scheme_str() {
        Some("ws" | "wss") => {}
        Some(other) => return Err(invalid(format!("unsupported scheme {other}"))),
        None => return Err(invalid("missing scheme".to_string())),
    }
    if uri.host().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    Ok(())
}
