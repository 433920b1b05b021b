use chat_core::{CustomEmoji, Ulid, Webhook};

use crate::client::HttpClient;
use crate::error::HttpResult;
use crate::options::RequestOptions;
use crate::route::Route;

impl HttpClient {
    pub async fn fetch_emoji(&self, emoji: &Ulid) -> HttpResult<CustomEmoji> {
        self.request_json(&Route::fetch_emoji(emoji), RequestOptions::new())
            .await
    }

    pub async fn fetch_webhook(&self, webhook: &Ulid) -> HttpResult<Webhook> {
        self.request_json(&Route::fetch_webhook(webhook), RequestOptions::new())
            .await
    }
}
