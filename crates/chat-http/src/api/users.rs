use chat_core::{Ulid, User};

use crate::client::HttpClient;
use crate::error::HttpResult;
use crate::options::RequestOptions;
use crate::route::Route;

impl HttpClient {
    /// The account the credential belongs to
    pub async fn fetch_self(&self) -> HttpResult<User> {
        self.request_json(&Route::fetch_self(), RequestOptions::new())
            .await
    }

    pub async fn fetch_user(&self, user: &Ulid) -> HttpResult<User> {
        self.request_json(&Route::fetch_user(user), RequestOptions::new())
            .await
    }
}
