//! Request engine shared by every route

use std::fmt;
use std::sync::Arc;

use chat_common::ClientConfig;
use chat_core::Token;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, HttpError, HttpResult};
use crate::options::{RequestBody, RequestOptions};
use crate::route::Route;

struct Inner {
    http: reqwest::Client,
    token: Token,
    api_url: Url,
    upload_url: Url,
    user_agent: HeaderValue,
}

/// Authenticated client for the REST API and the upload service
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<Inner>,
}

impl HttpClient {
    /// Client with a default connection pool
    pub fn new(config: &ClientConfig) -> HttpResult<Self> {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Client reusing an existing `reqwest` pool
    pub fn with_http_client(config: &ClientConfig, http: reqwest::Client) -> HttpResult<Self> {
        let user_agent =
            HeaderValue::from_str(&config.user_agent).map_err(|e| HttpError::InvalidHeader {
                name: USER_AGENT.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                token: config.token.clone(),
                api_url: parse_base(&config.api_url)?,
                upload_url: parse_base(&config.upload_url)?,
                user_agent,
            }),
        })
    }

    pub fn api_url(&self) -> &Url {
        &self.inner.api_url
    }

    pub fn upload_url(&self) -> &Url {
        &self.inner.upload_url
    }

    /// Call an API route and return the raw response body
    pub async fn request(&self, route: &Route, options: RequestOptions) -> HttpResult<Vec<u8>> {
        self.send(&self.inner.api_url, route, options).await
    }

    /// Call an API route and decode the JSON response
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        route: &Route,
        options: RequestOptions,
    ) -> HttpResult<T> {
        let body = self.request(route, options).await?;
        decode(&body)
    }

    /// Call an API route that answers without a body
    pub async fn request_none(&self, route: &Route, options: RequestOptions) -> HttpResult<()> {
        self.request(route, options.manual_accept()).await?;
        Ok(())
    }

    pub(crate) async fn request_upload<T: DeserializeOwned>(
        &self,
        route: &Route,
        options: RequestOptions,
    ) -> HttpResult<T> {
        let body = self.send(&self.inner.upload_url, route, options).await?;
        decode(&body)
    }

    async fn send(&self, base: &Url, route: &Route, options: RequestOptions) -> HttpResult<Vec<u8>> {
        let url = base
            .join(route.relative_path())
            .map_err(|e| HttpError::InvalidUrl {
                url: format!("{base}{}", route.relative_path()),
                reason: e.to_string(),
            })?;

        let mut headers = HeaderMap::new();
        if !options.manual_accept {
            headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        }
        headers.insert(USER_AGENT, self.inner.user_agent.clone());
        if matches!(options.body, Some(RequestBody::Json(_))) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        headers.extend(options.headers);

        if !options.unauthenticated {
            let token = &self.inner.token;
            let invalid = |reason: String| HttpError::InvalidHeader {
                name: token.header_name().to_string(),
                reason,
            };
            let name = HeaderName::from_bytes(token.header_name().as_bytes())
                .map_err(|e| invalid(e.to_string()))?;
            let mut value =
                HeaderValue::from_str(token.as_str()).map_err(|e| invalid(e.to_string()))?;
            value.set_sensitive(true);
            headers.insert(name, value);
        }

        let mut request = self
            .inner
            .http
            .request(route.method.clone(), url)
            .headers(headers);
        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        request = match options.body {
            Some(RequestBody::Json(bytes) | RequestBody::Raw(bytes)) => request.body(bytes),
            Some(RequestBody::Multipart(form)) => request.multipart(form),
            None => request,
        };

        tracing::debug!(route = %route, "sending request");
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let err = ApiError::from_response(status.as_u16(), &body);
            tracing::warn!(route = %route, status = status.as_u16(), error = %err, "request rejected");
            return Err(err.into());
        }

        tracing::trace!(route = %route, status = status.as_u16(), bytes = body.len(), "response received");
        Ok(body.to_vec())
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("api_url", &self.inner.api_url.as_str())
            .field("upload_url", &self.inner.upload_url.as_str())
            .field("token_kind", &self.inner.token.kind)
            .finish()
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> HttpResult<T> {
    serde_json::from_slice(body).map_err(HttpError::Decode)
}

/// Parse a service base URL, forcing a trailing slash so routes join below it
fn parse_base(raw: &str) -> HttpResult<Url> {
    let invalid = |reason: String| HttpError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{echo_router, MockServer};
    use reqwest::Method;
    use serde_json::Value;

    #[test]
    fn test_parse_base_adds_trailing_slash() {
        let url = parse_base("https://api.example.test/v1").unwrap();
        assert_eq!(url.as_str(), "https://api.example.test/v1/");
        assert_eq!(
            url.join("users/@me").unwrap().as_str(),
            "https://api.example.test/v1/users/@me"
        );
    }

    #[test]
    fn test_parse_base_rejects_other_schemes() {
        assert!(matches!(
            parse_base("ws://api.example.test/"),
            Err(HttpError::InvalidUrl { .. })
        ));
        assert!(matches!(
            parse_base("not a url"),
            Err(HttpError::InvalidUrl { .. })
        ));
    }

    #[tokio::test]
    async fn test_default_headers() {
        let server = MockServer::start(echo_router()).await;
        let client = server.client();

        let echo: Value = client
            .request_json(&Route::new(Method::GET, "/echo"), RequestOptions::new())
            .await
            .unwrap();

        assert_eq!(echo["method"], "GET");
        assert_eq!(echo["headers"]["x-bot-token"], "secret");
        assert_eq!(echo["headers"]["accept"], "application/json");
        assert!(echo["headers"]["user-agent"]
            .as_str()
            .unwrap()
            .starts_with("chat-client/"));
    }

    #[tokio::test]
    async fn test_unauthenticated_and_manual_accept() {
        let server = MockServer::start(echo_router()).await;
        let client = server.client();

        let options = RequestOptions::new().unauthenticated().manual_accept();
        let echo: Value = client
            .request_json(&Route::new(Method::GET, "/echo"), options)
            .await
            .unwrap();

        assert!(echo["headers"].get("x-bot-token").is_none());
        // reqwest falls back to its own `*/*`
        assert_ne!(echo["headers"]["accept"], "application/json");
    }

    #[tokio::test]
    async fn test_json_body_and_query() {
        let server = MockServer::start(echo_router()).await;
        let client = server.client();

        let options = RequestOptions::new()
            .json(&serde_json::json!({ "name": "general" }))
            .unwrap()
            .query("leave_silently", "true");
        let echo: Value = client
            .request_json(&Route::new(Method::PATCH, "/echo"), options)
            .await
            .unwrap();

        assert_eq!(echo["method"], "PATCH");
        assert_eq!(echo["headers"]["content-type"], "application/json");
        assert_eq!(echo["query"], "leave_silently=true");
        assert_eq!(echo["body"], r#"{"name":"general"}"#);
    }

    #[tokio::test]
    async fn test_caller_headers_override_defaults() {
        let server = MockServer::start(echo_router()).await;
        let client = server.client();

        let options =
            RequestOptions::new().header(ACCEPT, HeaderValue::from_static("image/png"));
        let echo: Value = client
            .request_json(&Route::new(Method::GET, "/echo"), options)
            .await
            .unwrap();

        assert_eq!(echo["headers"]["accept"], "image/png");
    }

    #[tokio::test]
    async fn test_error_status_decodes_api_error() {
        let server = MockServer::start(echo_router()).await;
        let client = server.client();

        let err = client
            .request(&Route::new(Method::GET, "/forbidden"), RequestOptions::new())
            .await
            .unwrap_err();

        let api = err.api().expect("api error");
        assert_eq!(api.status, 403);
        assert_eq!(api.kind, "MissingPermission");
        assert_eq!(api.permission, "ViewChannel");
    }

    #[tokio::test]
    async fn test_request_none_ignores_empty_body() {
        let server = MockServer::start(echo_router()).await;
        let client = server.client();

        client
            .request_none(&Route::new(Method::DELETE, "/empty"), RequestOptions::new())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_undecodable_success_body() {
        let server = MockServer::start(echo_router()).await;
        let client = server.client();

        let err = client
            .request_json::<Value>(&Route::new(Method::DELETE, "/empty"), RequestOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, HttpError::Decode(_)));
    }
}
