//! Board source selection
//!
//! A store is seeded from exactly one source, chosen at construction time:
//! an in-memory board or a snapshot fetched from the remote content feed.
//! Mutations always run against the in-memory aggregate afterwards.

use crate::board::Board;
use crate::feed::FeedClient;
use crate::Result;

/// Where the initial board comes from
pub enum BoardSource {
    /// Caller-supplied board (demo seed or hand-built)
    Seed(Board),
    /// Snapshot mapped from the remote content feed
    Feed(FeedClient),
}

impl BoardSource {
    /// Resolve the source into a board
    pub async fn resolve(self) -> Result<Board> {
        match self {
            BoardSource::Seed(board) => Ok(board),
            BoardSource::Feed(client) => client.fetch_board().await,
        }
    }
}
