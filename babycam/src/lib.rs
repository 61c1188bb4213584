pub use babycam_core::ConnectionId;

pub mod model {
    pub use babycam_core::model::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use babycam_server::*;
}
