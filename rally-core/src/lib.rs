pub mod deck;
pub mod ledger;
pub mod engine;
pub mod history;

// Re-export main components
pub use deck::*;
pub use ledger::*;
pub use engine::*;
pub use history::*;
