//! Replies "Pong!" to every `!ping`
//!
//! Run with:
//! ```bash
//! CHAT_TOKEN=... cargo run -p chat-client --bin pingpong
//! ```
//!
//! Configuration is loaded from environment variables (see `ClientConfig`
//! and `TracingConfig`).

use anyhow::Context;
use chat_client::{
    try_init_tracing_with_config, Client, ClientConfig, HttpClient, Message, SendMessage,
    TracingConfig,
};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let log_config = TracingConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Warning: {e}, using default log settings");
        TracingConfig::default()
    });
    if let Err(e) = try_init_tracing_with_config(&log_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "pingpong stopped");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = ClientConfig::from_env().context("failed to load configuration")?;
    let http = HttpClient::new(&config).context("failed to build REST client")?;
    let client = Client::builder(config)
        .build()
        .context("failed to build gateway client")?;

    client.events().authenticated.listen(|_| info!("Authenticated"));
    client.events().message.listen(move |message: &Message| {
        if message.content() != "!ping" {
            return;
        }
        let http = http.clone();
        let channel = message.channel.clone();
        let reply = SendMessage::content("Pong!").reply_to(message.id.clone());
        tokio::spawn(async move {
            if let Err(e) = http.send_message(&channel, &reply).await {
                warn!(channel = %channel, error = %e, "failed to reply");
            }
        });
    });

    let ready = client.open().await.context("failed to open gateway")?;
    info!(
        users = ready.users.len(),
        servers = ready.servers.len(),
        channels = ready.channels.len(),
        "Bot is running"
    );

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    info!("Shutting down");
    client.close().await?;
    Ok(())
}
