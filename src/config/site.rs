use crate::app::pages::appointment::{DEFAULT_SCHEDULER_SCRIPT_URL, DEFAULT_SCHEDULER_URL};
use crate::app::pages::blog::DEFAULT_BLOG_CATEGORIES;
use crate::app::pages::home::{
    HomeLimits, DEFAULT_BLOG_LIMIT, DEFAULT_FAQ_LIMIT, DEFAULT_TESTIMONIAL_LIMIT,
};
use crate::core::detail::{DEFAULT_RELATED_FETCH_LIMIT, DEFAULT_RELATED_MAX};
use crate::core::ConfigProvider;
use crate::utils::error::{ContentError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub listing: ListingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Required; checked by validation rather than parsing.
    #[serde(default)]
    pub endpoint: String,
    pub api_key: Option<String>,
    /// Unset means requests may wait indefinitely.
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSection {
    #[serde(default = "default_blog_categories")]
    pub blog_categories: Vec<String>,
    #[serde(default = "default_scheduler_url")]
    pub scheduler_url: String,
    #[serde(default = "default_scheduler_script_url")]
    pub scheduler_script_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    #[serde(default = "default_related_fetch_limit")]
    pub related_fetch_limit: usize,
    #[serde(default = "default_related_max")]
    pub related_max: usize,
    #[serde(default = "default_home_faq_limit")]
    pub home_faq_limit: usize,
    #[serde(default = "default_home_blog_limit")]
    pub home_blog_limit: usize,
    #[serde(default = "default_home_testimonial_limit")]
    pub home_testimonial_limit: usize,
}

fn default_blog_categories() -> Vec<String> {
    DEFAULT_BLOG_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

fn default_scheduler_url() -> String {
    DEFAULT_SCHEDULER_URL.to_string()
}

fn default_scheduler_script_url() -> String {
    DEFAULT_SCHEDULER_SCRIPT_URL.to_string()
}

fn default_related_fetch_limit() -> usize {
    DEFAULT_RELATED_FETCH_LIMIT
}

fn default_related_max() -> usize {
    DEFAULT_RELATED_MAX
}

fn default_home_faq_limit() -> usize {
    DEFAULT_FAQ_LIMIT
}

fn default_home_blog_limit() -> usize {
    DEFAULT_BLOG_LIMIT
}

fn default_home_testimonial_limit() -> usize {
    DEFAULT_TESTIMONIAL_LIMIT
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            blog_categories: default_blog_categories(),
            scheduler_url: default_scheduler_url(),
            scheduler_script_url: default_scheduler_script_url(),
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            related_fetch_limit: default_related_fetch_limit(),
            related_max: default_related_max(),
            home_faq_limit: default_home_faq_limit(),
            home_blog_limit: default_home_blog_limit(),
            home_testimonial_limit: default_home_testimonial_limit(),
        }
    }
}

impl ListingConfig {
    pub fn home_limits(&self) -> HomeLimits {
        HomeLimits {
            faqs: self.home_faq_limit,
            posts: self.home_blog_limit,
            testimonials: self.home_testimonial_limit,
        }
    }
}

impl SiteConfig {
    /// Defaults everywhere except the store endpoint.
    pub fn for_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            store: StoreConfig {
                endpoint: endpoint.into(),
                api_key: None,
                request_timeout_seconds: None,
            },
            site: SiteSection::default(),
            listing: ListingConfig::default(),
        }
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ContentError::IoError)?;
        tracing::debug!("Loaded site config from {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ContentError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CMS_API_KEY})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ContentError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for SiteConfig {
    fn store_endpoint(&self) -> &str {
        &self.store.endpoint
    }

    /// Empty keys and keys still holding an unset `${VAR}` count as absent.
    fn api_key(&self) -> Option<&str> {
        self.store
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !key.starts_with("${"))
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.store.request_timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        if self.store.endpoint.trim().is_empty() {
            return Err(ContentError::MissingConfigError {
                field: "store.endpoint".to_string(),
            });
        }
        validation::validate_url("store.endpoint", &self.store.endpoint)?;
        if let Some(timeout) = self.store.request_timeout_seconds {
            validation::validate_positive_number("store.request_timeout_seconds", timeout as usize, 1)?;
        }

        validation::validate_url("site.scheduler_url", &self.site.scheduler_url)?;
        validation::validate_url("site.scheduler_script_url", &self.site.scheduler_script_url)?;
        for category in &self.site.blog_categories {
            validation::validate_non_empty_string("site.blog_categories", category)?;
        }

        let listing = &self.listing;
        validation::validate_positive_number("listing.related_fetch_limit", listing.related_fetch_limit, 1)?;
        validation::validate_range(
            "listing.related_max",
            listing.related_max,
            1,
            listing.related_fetch_limit,
        )?;
        validation::validate_positive_number("listing.home_faq_limit", listing.home_faq_limit, 1)?;
        validation::validate_positive_number("listing.home_blog_limit", listing.home_blog_limit, 1)?;
        validation::validate_positive_number(
            "listing.home_testimonial_limit",
            listing.home_testimonial_limit,
            1,
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = SiteConfig::from_toml_str(
            r#"
[store]
endpoint = "https://cms.example.com/api"
"#,
        )
        .unwrap();

        assert_eq!(config.listing.related_fetch_limit, 4);
        assert_eq!(config.listing.related_max, 3);
        assert_eq!(config.site.blog_categories[0], "All");
        assert_eq!(config.site.scheduler_url, DEFAULT_SCHEDULER_URL);
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.api_key(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("LACTONOURISH_TEST_KEY", "secret-token");
        let config = SiteConfig::from_toml_str(
            r#"
[store]
endpoint = "https://cms.example.com/api"
api_key = "${LACTONOURISH_TEST_KEY}"
request_timeout_seconds = 10
"#,
        )
        .unwrap();
        assert_eq!(config.api_key(), Some("secret-token"));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_unset_env_var_means_no_key() {
        let config = SiteConfig::from_toml_str(
            r#"
[store]
endpoint = "https://cms.example.com/api"
api_key = "${LACTONOURISH_SURELY_UNSET_VARIABLE}"
"#,
        )
        .unwrap();
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_validation_failures() {
        let mut config = SiteConfig::for_endpoint("ftp://cms.example.com");
        assert!(config.validate().is_err());

        config.store.endpoint = "https://cms.example.com".to_string();
        config.listing.related_max = 5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("listing.related_max"));

        config.listing.related_max = 3;
        config.site.blog_categories.push("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_endpoint() {
        let config = SiteConfig::from_toml_str("[listing]\nrelated_max = 2\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ContentError::MissingConfigError { ref field } if field == "store.endpoint"
        ));

        let config = SiteConfig::from_toml_str("[store]\nendpoint = \"  \"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ContentError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_invalid_toml() {
        let err = SiteConfig::from_toml_str("[store\nendpoint = 1").unwrap_err();
        assert!(matches!(err, ContentError::ConfigValidationError { .. }));
    }
}
