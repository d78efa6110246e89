/// Domain module containing the journaling business rules and data types
/// 
/// This module defines the core entities (Reading, DailyEntry, AppState,
/// StreakInfo) together with the date helpers they are keyed by. Nothing in
/// here touches the network, the store, or the system clock except
/// `dates::today`.

pub mod dates;
pub mod reading;
pub mod entry;
pub mod state;
pub mod streak;

// Re-export public types for easy access
pub use reading::*;
pub use entry::*;
pub use state::*;
pub use streak::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },
    
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
