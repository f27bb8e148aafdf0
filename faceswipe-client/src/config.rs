use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Cards rendered on top of each other in the feed view.
    #[serde(default = "default_stack_depth")]
    pub stack_depth: usize,
    /// Size of the realtime liked-by window behind the badge.
    #[serde(default = "default_notification_limit")]
    pub notification_limit: usize,
    /// Entries in the "recent likes" list on the profile page.
    #[serde(default = "default_recent_likes_limit")]
    pub recent_likes_limit: usize,
    #[serde(default = "default_avatar_prefix")]
    pub avatar_prefix: String,
}

fn default_stack_depth() -> usize { 3 }
fn default_notification_limit() -> usize { 10 }
fn default_recent_likes_limit() -> usize { 5 }
fn default_avatar_prefix() -> String { "profilePics".into() }

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("FACESWIPE").separator("__"))
            .build()?;
        Ok(config.try_deserialize().unwrap_or_else(|_| Self::default()))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            stack_depth: default_stack_depth(),
            notification_limit: default_notification_limit(),
            recent_likes_limit: default_recent_likes_limit(),
            avatar_prefix: default_avatar_prefix(),
        }
    }
}
