mod config_handler;
mod router;

pub use config_handler::*;
pub use router::*;
