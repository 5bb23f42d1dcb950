pub mod team;
pub mod session;
pub mod messages;
pub mod errors;

// Re-export all types
pub use team::*;
pub use session::*;
pub use messages::*;
pub use errors::*;
