use babycam_core::{ConnectionId, RoomId, ServerEvent};

use crate::integration::{create_test_coordinator, init_tracing};
use crate::utils::{local_host, viewer};

#[tokio::test]
async fn test_host_disconnect_notifies_viewers() {
    init_tracing();

    let (coordinator, signaling) = create_test_coordinator();
    let host = ConnectionId::new();
    let viewer_a = ConnectionId::new();
    let viewer_b = ConnectionId::new();

    coordinator.claim_host(host.clone(), local_host(), None).await.unwrap();
    coordinator
        .claim_viewer(viewer_a.clone(), viewer("local", None), None)
        .await
        .unwrap();
    coordinator
        .claim_viewer(viewer_b.clone(), viewer("local", None), None)
        .await
        .unwrap();
    signaling.clear().await;

    coordinator.disconnect(host.clone()).await.unwrap();

    assert_eq!(signaling.events_for(&viewer_a).await, vec![ServerEvent::HostLeft]);
    assert_eq!(signaling.events_for(&viewer_b).await, vec![ServerEvent::HostLeft]);
    assert!(signaling.events_for(&host).await.is_empty());

    // Viewers keep the room alive until the last one goes.
    let snapshot = coordinator
        .room_snapshot(RoomId::local())
        .await
        .unwrap()
        .expect("viewers keep the room");
    assert_eq!(snapshot.host, None);
    assert_eq!(snapshot.viewers.len(), 2);

    coordinator.disconnect(viewer_a).await.unwrap();
    assert_eq!(coordinator.room_count().await.unwrap(), 1);

    coordinator.disconnect(viewer_b).await.unwrap();
    assert_eq!(coordinator.room_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_viewer_disconnect_notifies_host() {
    init_tracing();

    let (coordinator, signaling) = create_test_coordinator();
    let host = ConnectionId::new();
    let viewer_id = ConnectionId::new();

    coordinator.claim_host(host.clone(), local_host(), None).await.unwrap();
    coordinator
        .claim_viewer(viewer_id.clone(), viewer("local", None), None)
        .await
        .unwrap();
    signaling.clear().await;

    coordinator.disconnect(viewer_id.clone()).await.unwrap();

    assert_eq!(
        signaling.events_for(&host).await,
        vec![ServerEvent::ViewerLeft { viewer_id }]
    );
}

#[tokio::test]
async fn test_disconnect_of_unbound_connection_is_silent() {
    init_tracing();

    let (coordinator, signaling) = create_test_coordinator();

    coordinator.disconnect(ConnectionId::new()).await.unwrap();

    assert_eq!(signaling.total().await, 0);
    assert_eq!(coordinator.room_count().await.unwrap(), 0);
}
