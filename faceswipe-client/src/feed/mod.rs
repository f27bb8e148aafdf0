pub mod filter;
pub mod session;

pub use session::{FeedService, FeedSession, LikeOutcome};
