use babycam_core::{ConnectionId, HostMode, RoomId, ServerEvent, ViewerJoinRequest};

use crate::integration::{create_test_coordinator, init_tracing};
use crate::utils::{local_host, viewer};

#[tokio::test]
async fn test_local_host_and_viewer() {
    init_tracing();

    let (coordinator, signaling) = create_test_coordinator();
    let host = ConnectionId::new();
    let viewer_id = ConnectionId::new();

    let ack = coordinator
        .claim_host(host.clone(), local_host(), None)
        .await
        .expect("coordinator running");
    assert!(ack.ok);
    assert_eq!(ack.viewer_count, Some(0));
    assert_eq!(ack.mode, Some(HostMode::Local));

    let snapshot = coordinator
        .room_snapshot(RoomId::local())
        .await
        .unwrap()
        .expect("local room exists");
    assert_eq!(snapshot.host, Some(host.clone()));

    let ack = coordinator
        .claim_viewer(viewer_id.clone(), viewer("local", None), None)
        .await
        .unwrap();
    assert!(ack.ok);
    assert_eq!(ack.host_online, Some(true));
    assert_eq!(ack.host_id, Some(host.clone()));
    assert_eq!(ack.secure, Some(false));

    assert_eq!(
        signaling.events_for(&host).await,
        vec![ServerEvent::ViewerJoined {
            viewer_id: viewer_id.clone()
        }]
    );
    assert!(signaling.events_for(&viewer_id).await.is_empty());
}

#[tokio::test]
async fn test_viewer_without_room_lands_in_local() {
    init_tracing();

    let (coordinator, _signaling) = create_test_coordinator();
    let viewer_id = ConnectionId::new();

    let ack = coordinator
        .claim_viewer(viewer_id.clone(), ViewerJoinRequest::default(), None)
        .await
        .unwrap();
    assert!(ack.ok);
    assert_eq!(ack.host_online, Some(false));
    assert_eq!(ack.host_id, None);

    let snapshot = coordinator
        .room_snapshot(RoomId::local())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(snapshot.viewers, vec![viewer_id]);
}
