mod format;
pub use format::{format_duration, title_from_slug};

mod urls;
pub use urls::{AssetResolver, youtube_embed_url};
