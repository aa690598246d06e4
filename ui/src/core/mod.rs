//! Platform-agnostic core: the session state machine and everything it
//! consumes. Nothing here renders; views read the models in `presentation`.

pub mod blob;
pub mod download;
pub mod format;
pub mod gateway;
pub mod platform;
pub mod presentation;
pub mod resources;
pub mod session;
pub mod surface;
