pub mod claim_tests;
pub mod relay_tests;

use babycam_server::CoordinatorHandle;
use std::sync::Arc;
use tracing::Level;

use crate::utils::MockSignalingOutput;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn create_test_coordinator() -> (CoordinatorHandle, MockSignalingOutput) {
    let signaling = MockSignalingOutput::new_stored_only();
    let coordinator = CoordinatorHandle::spawn(Arc::new(signaling.clone()));

    (coordinator, signaling)
}
