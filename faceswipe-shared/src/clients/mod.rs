pub mod blob;
pub mod identity;
pub mod likes;
pub mod profiles;

pub use blob::{BlobStore, MemoryBlobStore};
pub use identity::{IdentityProvider, MemoryIdentityProvider};
pub use likes::{LikeStore, LikeSubscription, MemoryLikeStore};
pub use profiles::{MemoryProfileStore, ProfileStore};
