use chat_core::{Channel, Ulid};

use super::params::EditChannel;
use crate::client::HttpClient;
use crate::error::HttpResult;
use crate::options::RequestOptions;
use crate::route::Route;

impl HttpClient {
    pub async fn fetch_channel(&self, channel: &Ulid) -> HttpResult<Channel> {
        self.request_json(&Route::fetch_channel(channel), RequestOptions::new())
            .await
    }

    pub async fn edit_channel(&self, channel: &Ulid, params: &EditChannel) -> HttpResult<Channel> {
        let options = RequestOptions::new().json(params)?;
        self.request_json(&Route::edit_channel(channel), options)
            .await
    }

    /// Delete a server channel, leave a group or close a DM
    ///
    /// `leave_silently` suppresses the "user left" system message in groups.
    pub async fn delete_channel(
        &self,
        channel: &Ulid,
        leave_silently: Option<bool>,
    ) -> HttpResult<()> {
        let mut options = RequestOptions::new();
        if let Some(silent) = leave_silently {
            options = options.query("leave_silently", silent.to_string());
        }
        self.request_none(&Route::delete_channel(channel), options)
            .await
    }
}
