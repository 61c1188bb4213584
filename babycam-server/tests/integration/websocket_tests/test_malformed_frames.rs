use anyhow::Result;
use serde_json::json;
use std::time::Duration;

use crate::integration::init_tracing;
use crate::utils::{TestClient, spawn_server};

#[tokio::test]
async fn test_malformed_frames_are_ignored() -> Result<()> {
    init_tracing();

    let addr = spawn_server().await?;
    let mut client = TestClient::connect(addr).await?;

    client.send_raw("not json at all").await?;
    client.send_raw(r#"{"event":"no:such:event","data":{}}"#).await?;
    client.send_raw(r#"{"data":{"mode":"local"}}"#).await?;
    client
        .send_raw(r#"{"event":"signal:offer","data":{"description":{"type":"offer"}}}"#)
        .await?;
    client
        .send_raw(r#"{"event":"signal:offer","data":{"to":"not-a-uuid","description":{}}}"#)
        .await?;
    client.emit("host:leave", json!(null)).await?;

    assert!(client.is_silent_for(Duration::from_millis(200)).await);

    // The connection is still usable afterwards.
    let ack = client.request("host:join", json!({"mode": "local"})).await?;
    assert_eq!(ack["ok"], true);

    Ok(())
}

#[tokio::test]
async fn test_odd_field_types_are_tolerated() -> Result<()> {
    init_tracing();

    let addr = spawn_server().await?;
    let mut client = TestClient::connect(addr).await?;

    let ack = client
        .request(
            "host:join",
            json!({"mode": "secure", "roomId": 42, "accessKey": ["x"]}),
        )
        .await?;
    assert_eq!(ack["ok"], false);
    assert_eq!(ack["error"], "room_invalid");

    let ack = client.request("viewer:join", json!({"roomId": null})).await?;
    assert_eq!(ack["ok"], true);
    assert_eq!(ack["secure"], false);

    Ok(())
}
