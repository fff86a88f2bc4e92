//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init, add) and shared utilities (open_db)
//! - `forecast` - The forecast command (text summary or JSON)
//! - `income` - Income-source management commands
//! - `serve` - Web server command
//! - `status` - Database status command

pub mod core;
pub mod forecast;
pub mod income;
pub mod serve;
pub mod status;

// Re-export command functions for main.rs
pub use core::*;
pub use forecast::*;
pub use income::*;
pub use serve::*;
pub use status::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max.saturating_sub(3)])
    }
}
