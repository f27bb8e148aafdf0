pub mod like;
pub mod profile;

pub use like::{like_key, LikeRecord, NewLike};
pub use profile::{Gender, NewProfile, UpdateProfile, UserProfile};
