//! Harness configuration.
//!
//! Defaults target the public Swag Labs deployment; everything can be
//! overridden through the builder or environment variables
//! (`SWAGCHECK_BASE_URL`, `SWAGCHECK_HEADFUL`, `CHROMIUM_PATH`).

use std::time::Duration;

/// Default base URL of the storefront under test
pub const DEFAULT_BASE_URL: &str = "https://www.saucedemo.com";

/// Default timeout for suspending operations (10 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval for waits (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Username with full access to the storefront
pub const STANDARD_USER: &str = "standard_user";

/// Username the application refuses to log in
pub const LOCKED_OUT_USER: &str = "locked_out_user";

/// Password shared by all sample accounts
pub const PASSWORD: &str = "secret_sauce";

/// Harness configuration
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Base URL of the application under test
    pub base_url: String,
    /// Run the browser headless
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
    /// Timeout applied to every suspending operation
    pub timeout: Duration,
    /// Polling interval for waits
    pub poll_interval: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            chromium_path: None,
            sandbox: true,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl HarnessConfig {
    /// Create a configuration with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration from the environment.
    ///
    /// Recognised variables: `SWAGCHECK_BASE_URL`, `SWAGCHECK_HEADFUL`
    /// (any non-empty value disables headless mode), `CHROMIUM_PATH`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("SWAGCHECK_BASE_URL") {
            if !url.is_empty() {
                config.base_url = url;
            }
        }
        if std::env::var("SWAGCHECK_HEADFUL").is_ok_and(|v| !v.is_empty()) {
            config.headless = false;
        }
        if let Ok(path) = std::env::var("CHROMIUM_PATH") {
            if !path.is_empty() {
                config.chromium_path = Some(path);
            }
        }
        config
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    /// Set the operation timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The base URL joined with a path fragment
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HarnessConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.headless);
        assert!(config.sandbox);
        assert_eq!(config.timeout, Duration::from_millis(DEFAULT_TIMEOUT_MS));
    }

    #[test]
    fn test_builder_chain() {
        let config = HarnessConfig::new()
            .with_base_url("http://localhost:3000/")
            .with_headless(false)
            .with_viewport(800, 600)
            .with_no_sandbox()
            .with_timeout(Duration::from_secs(3));
        assert_eq!(config.base_url, "http://localhost:3000/");
        assert!(!config.headless);
        assert_eq!(config.viewport_width, 800);
        assert!(!config.sandbox);
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_url_join_handles_slashes() {
        let config = HarnessConfig::new().with_base_url("http://localhost:3000/");
        assert_eq!(config.url("/cart.html"), "http://localhost:3000/cart.html");
        assert_eq!(config.url("cart.html"), "http://localhost:3000/cart.html");
    }

    #[test]
    fn test_chromium_path() {
        let config = HarnessConfig::new().with_chromium_path("/usr/bin/chromium");
        assert_eq!(config.chromium_path.as_deref(), Some("/usr/bin/chromium"));
    }
}
