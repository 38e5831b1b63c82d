//! tablero-core: Core library for the tablero Kanban board
//!
//! Provides the board data model, the in-memory board store, and the
//! alternate content-feed board source. No database, no daemon - one
//! in-process aggregate behind a lock.

pub mod board;
pub mod config;
pub mod error;
pub mod feed;
pub mod id;
pub mod seed;
pub mod session;
pub mod source;
pub mod store;

pub use board::{
    Attachment, Board, CheckItem, CheckItemState, CheckItemUpdate, Checklist, ChecklistUpdate,
    Column, ColumnUpdate, Comment, Member, Task, TaskUpdate,
};
pub use config::Config;
pub use error::Error;
pub use feed::FeedClient;
pub use id::generate_id;
pub use seed::demo_board;
pub use session::{AuthBridge, AuthState, Session};
pub use source::BoardSource;
pub use store::BoardStore;

/// Result type for tablero operations
pub type Result<T> = std::result::Result<T, Error>;
