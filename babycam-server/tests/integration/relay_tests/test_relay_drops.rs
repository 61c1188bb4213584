use babycam_core::{ConnectionId, SignalKind};
use serde_json::json;

use crate::integration::{create_test_coordinator, init_tracing};
use crate::utils::{KEY, local_host, secure_host, viewer};

#[tokio::test]
async fn test_relay_across_rooms_is_dropped() {
    init_tracing();

    let (coordinator, signaling) = create_test_coordinator();
    let local_host_id = ConnectionId::new();
    let secure_host_id = ConnectionId::new();
    let viewer_id = ConnectionId::new();

    coordinator
        .claim_host(local_host_id.clone(), local_host(), None)
        .await
        .unwrap();
    coordinator
        .claim_host(secure_host_id.clone(), secure_host("nursery", KEY), None)
        .await
        .unwrap();
    coordinator
        .claim_viewer(viewer_id.clone(), viewer("local", None), None)
        .await
        .unwrap();
    signaling.clear().await;

    coordinator
        .relay(
            secure_host_id.clone(),
            viewer_id.clone(),
            SignalKind::Offer,
            json!({"type": "offer", "sdp": "x"}),
        )
        .await
        .unwrap();
    coordinator
        .relay(
            viewer_id.clone(),
            secure_host_id.clone(),
            SignalKind::Answer,
            json!({"type": "answer", "sdp": "y"}),
        )
        .await
        .unwrap();
    coordinator.room_count().await.unwrap();

    assert_eq!(signaling.total().await, 0);
}

#[tokio::test]
async fn test_relay_from_or_to_unbound_is_dropped() {
    init_tracing();

    let (coordinator, signaling) = create_test_coordinator();
    let host = ConnectionId::new();
    let stranger = ConnectionId::new();

    coordinator.claim_host(host.clone(), local_host(), None).await.unwrap();

    coordinator
        .relay(stranger.clone(), host.clone(), SignalKind::Offer, json!({}))
        .await
        .unwrap();
    coordinator
        .relay(host.clone(), stranger.clone(), SignalKind::Offer, json!({}))
        .await
        .unwrap();
    coordinator
        .relay(host.clone(), ConnectionId::new(), SignalKind::Candidate, json!({}))
        .await
        .unwrap();
    coordinator.room_count().await.unwrap();

    assert_eq!(signaling.total().await, 0);
}

#[tokio::test]
async fn test_relay_to_departed_viewer_is_dropped() {
    init_tracing();

    let (coordinator, signaling) = create_test_coordinator();
    let host = ConnectionId::new();
    let viewer_id = ConnectionId::new();

    coordinator.claim_host(host.clone(), local_host(), None).await.unwrap();
    coordinator
        .claim_viewer(viewer_id.clone(), viewer("local", None), None)
        .await
        .unwrap();
    coordinator.disconnect(viewer_id.clone()).await.unwrap();
    signaling.clear().await;

    coordinator
        .relay(host.clone(), viewer_id.clone(), SignalKind::Offer, json!({"sdp": "x"}))
        .await
        .unwrap();
    coordinator.room_count().await.unwrap();

    assert!(signaling.events_for(&viewer_id).await.is_empty());
    assert_eq!(signaling.total().await, 0);
}
