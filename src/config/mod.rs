use serde::Deserialize;

static CONFIG: OnceCell<Config> = OnceCell::const_new();

mod config_dir;
pub use config_dir::{find_config_file, read_config};

mod error;
pub use error::{ConfigError, ConfigResult};
use tokio::sync::OnceCell;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    api: Api,
    #[serde(default)]
    catalog: Catalog,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Api {
    base_url: String,
    #[serde(default = "default_prefix")]
    prefix: String,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    #[serde(default = "default_page_size")]
    page_size: u32,
    #[serde(default)]
    schema: CatalogSchema,
}

/// Shape of the catalog list endpoint exposed by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSchema {
    /// `{content, page, size, totalElements, totalPages, last}` with 0-indexed pages.
    #[default]
    Paged,
    /// `{courses, page, limit, totalCourses, totalPages}` with 1-indexed pages.
    Legacy,
}

fn default_prefix() -> String {
    String::from("/api/v1")
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> u32 {
    6
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            schema: CatalogSchema::default(),
        }
    }
}

impl Config {
    #[tracing::instrument]
    pub async fn get_or_init(use_local: bool) -> &'static Config {
        CONFIG
            .get_or_init(|| async {
                match Self::load(use_local) {
                    Ok(c) => c,
                    Err(e) => {
                        if !matches!(e, error::ConfigError::ConfigNotFound) {
                            crate::error::log_error(&e);
                        }
                        tracing::error!("Config not found.");
                        std::process::exit(1);
                    }
                }
            })
            .await
    }

    pub fn load(use_local: bool) -> ConfigResult<Self> {
        let bytes = read_config(use_local)?;
        let text = String::from_utf8_lossy(&bytes);
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.catalog.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "catalog.page_size",
                reason: String::from("must be at least 1"),
            });
        }

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: "api.base_url",
                reason: format!("`{}` is not an http(s) url", self.api.base_url),
            });
        }

        Ok(())
    }

    #[inline]
    pub fn api(&self) -> &Api {
        &self.api
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl Api {
    /// Origin of the backend, used to resolve `/`-relative asset urls.
    #[inline]
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Root of the REST surface, e.g. `http://host/api/v1`.
    pub fn endpoint(&self) -> String {
        let prefix = self.prefix.trim_matches('/');
        if prefix.is_empty() {
            self.base_url().to_string()
        } else {
            format!("{}/{}", self.base_url(), prefix)
        }
    }

    #[inline]
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }
}

impl Catalog {
    #[inline]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    #[inline]
    pub fn schema(&self) -> CatalogSchema {
        self.schema
    }
}
