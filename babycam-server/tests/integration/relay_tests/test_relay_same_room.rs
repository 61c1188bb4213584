use babycam_core::{ConnectionId, ServerEvent, SignalKind};
use serde_json::json;

use crate::integration::{create_test_coordinator, init_tracing};
use crate::utils::{local_host, viewer};

#[tokio::test]
async fn test_relay_same_room() {
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

    let offer = json!({"type": "offer", "sdp": "v=0\r\no=- 1 2 IN IP4 0.0.0.0\r\n"});
    let answer = json!({"type": "answer", "sdp": "v=0\r\n"});
    let candidate = json!({"candidate": "candidate:1 1 udp 2122260223 10.0.0.2 54321 typ host", "sdpMid": "0", "sdpMLineIndex": 0});

    coordinator
        .relay(host.clone(), viewer_id.clone(), SignalKind::Offer, offer.clone())
        .await
        .unwrap();
    coordinator
        .relay(viewer_id.clone(), host.clone(), SignalKind::Answer, answer.clone())
        .await
        .unwrap();
    coordinator
        .relay(host.clone(), viewer_id.clone(), SignalKind::Candidate, candidate.clone())
        .await
        .unwrap();
    coordinator.room_count().await.unwrap();

    assert_eq!(
        signaling.events_for(&viewer_id).await,
        vec![
            ServerEvent::Offer {
                from: host.clone(),
                description: offer,
            },
            ServerEvent::Candidate {
                from: host.clone(),
                candidate,
            },
        ]
    );
    assert_eq!(
        signaling.events_for(&host).await,
        vec![ServerEvent::Answer {
            from: viewer_id,
            description: answer,
        }]
    );
}

#[tokio::test]
async fn test_relay_preserves_order() {
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

    for i in 0..20 {
        coordinator
            .relay(
                host.clone(),
                viewer_id.clone(),
                SignalKind::Candidate,
                json!({"candidate": format!("candidate:{}", i)}),
            )
            .await
            .unwrap();
    }
    coordinator.room_count().await.unwrap();

    let received: Vec<_> = signaling
        .events_for(&viewer_id)
        .await
        .into_iter()
        .map(|event| match event {
            ServerEvent::Candidate { candidate, .. } => candidate["candidate"].clone(),
            other => panic!("unexpected event {:?}", other),
        })
        .collect();
    let expected: Vec<_> = (0..20).map(|i| json!(format!("candidate:{}", i))).collect();
    assert_eq!(received, expected);
}
