use crate::config::Config;

const YOUTUBE_EMBED: &str = "https://www.youtube.com/embed";

/// Turns backend asset paths (thumbnails, avatars, lesson files) into
/// absolute URLs.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    base_url: String,
}

impl AssetResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api().base_url())
    }

    /// `/`-relative paths get the base URL prepended; absolute URLs, data
    /// URIs and empty strings pass through.
    pub fn resolve(&self, url: &str) -> String {
        if url.starts_with('/') && !url.starts_with("//") {
            format!("{}{}", self.base_url, url)
        } else {
            url.to_string()
        }
    }
}

pub fn youtube_embed_url(video_id: &str) -> String {
    format!("{YOUTUBE_EMBED}/{video_id}")
}
