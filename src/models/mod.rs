//! Data models for Shelfmark

pub mod book;
pub mod session;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookStatus, CatalogSummary, CreateBook, Transition};
pub use session::Session;
pub use user::User;
