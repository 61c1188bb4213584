mod coordinator;
mod coordinator_command;
mod coordinator_handle;
mod registry;
mod room;

pub use coordinator::*;
pub use coordinator_command::*;
pub use coordinator_handle::*;
pub use registry::*;
pub use room::*;
