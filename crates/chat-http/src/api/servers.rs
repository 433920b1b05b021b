use chat_core::{Member, Server, Ulid};

use crate::client::HttpClient;
use crate::error::HttpResult;
use crate::options::RequestOptions;
use crate::route::Route;

impl HttpClient {
    pub async fn fetch_server(&self, server: &Ulid) -> HttpResult<Server> {
        self.request_json(&Route::fetch_server(server), RequestOptions::new())
            .await
    }

    pub async fn fetch_member(&self, server: &Ulid, user: &Ulid) -> HttpResult<Member> {
        self.request_json(&Route::fetch_member(server, user), RequestOptions::new())
            .await
    }
}
