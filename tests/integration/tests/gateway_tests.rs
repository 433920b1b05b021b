//! Gateway Integration Tests
//!
//! Drive the real WebSocket dialer against an in-process mock gateway.
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use std::time::Duration;

use anyhow::{Context, Result};
use chat_client::gateway::events::PongEvent;
use chat_client::{Client, ClientError, ConnectionState, ReadyEvent, Ulid};
use integration_tests::{capture, fixtures, test_config, GatewayPeer, MockGateway, TIMEOUT};

const MESSAGE_ID: &str = "01H000000000000000MESSAGE1";

fn id(s: &str) -> Ulid {
    Ulid::from_raw(s)
}

/// Open `client` against `gateway`, answering the handshake
async fn open(client: &Client, gateway: &mut MockGateway) -> Result<(ReadyEvent, GatewayPeer)> {
    let opening = tokio::spawn({
        let client = client.clone();
        async move { client.open().await }
    });
    let peer = gateway.accept_ready(&fixtures::ready()).await?;
    let ready = opening.await??;
    Ok((ready, peer))
}

async fn wait_for_state(client: &Client, state: ConnectionState) -> Result<()> {
    tokio::time::timeout(TIMEOUT, async {
        while client.state() != state {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .with_context(|| format!("state {state} never reached"))
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn test_ready_populates_cache() -> Result<()> {
    let mut gateway = MockGateway::start().await?;
    let client = Client::builder(test_config(&gateway, None)).build()?;

    let (ready, _peer) = open(&client, &mut gateway).await?;

    assert_eq!(ready.users.len(), 2);
    assert_eq!(client.state(), ConnectionState::Ready);

    let cache = client.cache();
    assert_eq!(cache.user(&id(fixtures::USER_ID)).context("user")?.username, "alice");
    assert!(cache.server(&id(fixtures::SERVER_ID)).is_some());
    assert!(cache.channel(&id(fixtures::CHANNEL_ID)).is_some());
    assert!(cache
        .member(&id(fixtures::SERVER_ID), &id(fixtures::USER_ID))
        .is_some());

    client.close().await?;
    Ok(())
}

#[tokio::test]
async fn test_message_lifecycle_end_to_end() -> Result<()> {
    let mut gateway = MockGateway::start().await?;
    let client = Client::builder(test_config(&gateway, None)).build()?;
    let (_, peer) = open(&client, &mut gateway).await?;

    let channel = id(fixtures::CHANNEL_ID);
    let message_id = id(MESSAGE_ID);
    let mut created = capture(&client.events().message);
    let mut updated = capture(&client.events().message_update);
    let mut deleted = capture(&client.events().message_delete);

    peer.send(&fixtures::message_frame(MESSAGE_ID, fixtures::USER_ID, "hello"))?;
    let message = created.next().await?;
    assert_eq!(message.content(), "hello");
    let cached = client
        .cache()
        .message(&channel, &message_id)
        .context("message not cached")?;
    assert_eq!(cached.content, "hello");
    assert!(cached.edited.is_none());

    peer.send(&fixtures::message_update(MESSAGE_ID, "edited"))?;
    let update = updated.next().await?;
    assert_eq!(update.data.content.as_deref(), Some("edited"));
    let cached = client
        .cache()
        .message(&channel, &message_id)
        .context("message dropped on update")?;
    assert_eq!(cached.content, "edited");
    assert!(cached.edited.is_some());

    peer.send(&fixtures::message_delete(MESSAGE_ID))?;
    let delete = deleted.next().await?;
    assert_eq!(delete.id, message_id);
    assert!(client.cache().message(&channel, &message_id).is_none());

    client.close().await?;
    Ok(())
}

#[tokio::test]
async fn test_update_subscriber_sees_patched_cache() -> Result<()> {
    let mut gateway = MockGateway::start().await?;
    let client = Client::builder(test_config(&gateway, None)).build()?;
    let (_, peer) = open(&client, &mut gateway).await?;

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let cache = client.cache().clone();
    client.events().message_update.listen(move |update| {
        let content = cache
            .message(&update.channel, &update.id)
            .map(|m| m.content);
        let _ = tx.send(content);
    });

    peer.send(&fixtures::message_frame(MESSAGE_ID, fixtures::USER_ID, "before"))?;
    peer.send(&fixtures::message_update(MESSAGE_ID, "after"))?;

    let seen = tokio::time::timeout(TIMEOUT, rx.recv()).await?.context("no update")?;
    assert_eq!(seen.as_deref(), Some("after"));

    client.close().await?;
    Ok(())
}

// ============================================================================
// Heartbeat Tests
// ============================================================================

#[tokio::test]
async fn test_heartbeat_measures_latency() -> Result<()> {
    let mut gateway = MockGateway::start().await?;
    let config = test_config(&gateway, None).with_heartbeat_interval(Duration::from_millis(50));
    let client = Client::builder(config).build()?;
    let (_, mut peer) = open(&client, &mut gateway).await?;
    let mut pongs = capture(&client.events().pong);

    let ping = peer.recv_type("Ping").await?;
    peer.send(&fixtures::pong(&ping["data"]))?;

    let pong: PongEvent = pongs.next().await?;
    assert_eq!(pong.data, ping["data"]);
    assert!(pong.latency.is_some());
    assert!(client.latency().is_some());

    client.close().await?;
    Ok(())
}

// ============================================================================
// Reconnect Tests
// ============================================================================

#[tokio::test]
async fn test_reconnect_is_transparent() -> Result<()> {
    let mut gateway = MockGateway::start().await?;
    let client = Client::builder(test_config(&gateway, None)).build()?;
    let (_, peer) = open(&client, &mut gateway).await?;

    let mut errors = capture(&client.events().error);
    let mut readies = capture(&client.events().ready);
    let mut created = capture(&client.events().message);

    peer.hang_up();
    let error = errors.next().await?;
    assert!(error.is_transport(), "unexpected error {error}");

    // The client redials on its own and the new session works as before
    let mut peer = gateway.accept_ready(&fixtures::ready()).await?;
    readies.next().await?;
    wait_for_state(&client, ConnectionState::Ready).await?;

    peer.send(&fixtures::message_frame(MESSAGE_ID, fixtures::USER_ID, "again"))?;
    assert_eq!(created.next().await?.content(), "again");
    assert!(client
        .cache()
        .message(&id(fixtures::CHANNEL_ID), &id(MESSAGE_ID))
        .is_some());

    client.begin_typing(&id(fixtures::CHANNEL_ID)).await?;
    let typing = peer.recv_type("BeginTyping").await?;
    assert_eq!(typing["channel"], fixtures::CHANNEL_ID);

    client.close().await?;
    Ok(())
}

// ============================================================================
// Close Tests
// ============================================================================

#[tokio::test]
async fn test_close_sends_normal_close_frame() -> Result<()> {
    let mut gateway = MockGateway::start().await?;
    let client = Client::builder(test_config(&gateway, None)).build()?;
    let (_, mut peer) = open(&client, &mut gateway).await?;

    client.close().await?;

    assert_eq!(peer.recv_close().await?, Some(1000));
    assert_eq!(client.state(), ConnectionState::Closed);
    gateway
        .expect_no_connection(Duration::from_millis(300))
        .await?;
    assert!(matches!(client.open().await, Err(ClientError::Closed)));
    Ok(())
}

#[tokio::test]
async fn test_close_during_reconnect_wait_suppresses_redial() -> Result<()> {
    let mut gateway = MockGateway::start().await?;
    let config = test_config(&gateway, None).with_reconnect_delay(Duration::from_millis(300));
    let client = Client::builder(config).build()?;
    let (_, peer) = open(&client, &mut gateway).await?;
    let mut errors = capture(&client.events().error);

    peer.hang_up();
    errors.next().await?;
    client.close().await?;

    gateway
        .expect_no_connection(Duration::from_millis(600))
        .await?;
    assert_eq!(client.state(), ConnectionState::Closed);
    Ok(())
}
