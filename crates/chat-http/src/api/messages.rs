use chat_core::{Message, Ulid};
use reqwest::header::{HeaderName, HeaderValue};

use super::params::{EditMessage, SendMessage};
use crate::client::HttpClient;
use crate::error::{HttpError, HttpResult};
use crate::options::RequestOptions;
use crate::route::Route;

const IDEMPOTENCY_KEY: &str = "idempotency-key";

impl HttpClient {
    pub async fn send_message(&self, channel: &Ulid, params: &SendMessage) -> HttpResult<Message> {
        let mut options = RequestOptions::new().json(params)?;
        if let Some(key) = &params.idempotency_key {
            let value = HeaderValue::from_str(key).map_err(|e| HttpError::InvalidHeader {
                name: IDEMPOTENCY_KEY.to_string(),
                reason: e.to_string(),
            })?;
            options = options.header(HeaderName::from_static(IDEMPOTENCY_KEY), value);
        }
        self.request_json(&Route::send_message(channel), options)
            .await
    }

    pub async fn fetch_message(&self, channel: &Ulid, message: &Ulid) -> HttpResult<Message> {
        self.request_json(&Route::fetch_message(channel, message), RequestOptions::new())
            .await
    }

    pub async fn edit_message(
        &self,
        channel: &Ulid,
        message: &Ulid,
        params: &EditMessage,
    ) -> HttpResult<Message> {
        let options = RequestOptions::new().json(params)?;
        self.request_json(&Route::edit_message(channel, message), options)
            .await
    }

    pub async fn delete_message(&self, channel: &Ulid, message: &Ulid) -> HttpResult<()> {
        self.request_none(&Route::delete_message(channel, message), RequestOptions::new())
            .await
    }
}
