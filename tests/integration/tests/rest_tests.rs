//! REST Integration Tests
//!
//! Run with: cargo test -p integration-tests --test rest_tests

use anyhow::Result;
use chat_client::{Client, HttpClient, Message, SendMessage};
use integration_tests::{capture, fixtures, test_config, MockApi, MockGateway};

#[tokio::test]
async fn test_fetch_self() -> Result<()> {
    let gateway = MockGateway::start().await?;
    let api = MockApi::start().await?;
    let http = HttpClient::new(&test_config(&gateway, Some(&api)))?;

    let me = http.fetch_self().await?;
    assert_eq!(me.id.as_str(), fixtures::SELF_ID);
    assert_eq!(me.username, "bot");
    Ok(())
}

#[tokio::test]
async fn test_ping_is_answered_over_rest() -> Result<()> {
    let mut gateway = MockGateway::start().await?;
    let api = MockApi::start().await?;
    let config = test_config(&gateway, Some(&api));
    let http = HttpClient::new(&config)?;
    let client = Client::builder(config).build()?;

    client.events().message.listen(move |message: &Message| {
        if message.content() != "!ping" {
            return;
        }
        let http = http.clone();
        let channel = message.channel.clone();
        let reply = SendMessage::content("Pong!").reply_to(message.id.clone());
        tokio::spawn(async move {
            let _ = http.send_message(&channel, &reply).await;
        });
    });
    let mut created = capture(&client.events().message);

    let opening = tokio::spawn({
        let client = client.clone();
        async move { client.open().await }
    });
    let peer = gateway.accept_ready(&fixtures::ready()).await?;
    opening.await??;

    peer.send(&fixtures::message_frame(
        "01H000000000000000MESSAGE1",
        fixtures::USER_ID,
        "hello",
    ))?;
    peer.send(&fixtures::message_frame(
        "01H000000000000000MESSAGE2",
        fixtures::USER_ID,
        "!ping",
    ))?;
    created.next().await?;
    created.next().await?;

    let sent = api.wait_for_sent(1).await?;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].channel, fixtures::CHANNEL_ID);
    assert_eq!(sent[0].token.as_deref(), Some("test-token"));
    assert_eq!(sent[0].body["content"], "Pong!");
    assert_eq!(
        sent[0].body["replies"][0]["id"],
        "01H000000000000000MESSAGE2"
    );

    client.close().await?;
    Ok(())
}
