// HTTP routes
pub mod health;
pub mod root;
pub mod verify;

pub use health::*;
pub use root::*;
pub use verify::*;
