pub mod protocol;

// Re-export for easier access
pub use protocol::Protocol;
