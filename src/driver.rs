//! Browser driver: the locator-provider boundary.
//!
//! Wraps a dedicated Chromium instance (Chrome DevTools Protocol via
//! chromiumoxide) behind the narrow set of primitives the page objects are
//! allowed to use: count matches, click, fill, select an option, read
//! text/attributes/computed style, visibility and enablement predicates, and
//! bounded waits. Every suspending call carries the configured timeout; on
//! expiry it fails with [`HarnessError::Timeout`] and performs no rollback.
//!
//! One `Driver` means one browser process, so concurrently running sessions
//! share no profile, cookie jar, or storage.

use std::time::{Duration, Instant};

use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::HarnessConfig;
use crate::locator::{js_string, Locator};
use crate::result::{HarnessError, HarnessResult};

/// Wrapper around the element-or-null outcome of an attribute read, so a
/// missing element and a missing attribute stay distinguishable.
#[derive(Debug, Deserialize)]
struct AttrRead {
    value: Option<String>,
}

/// Driver for one browser instance and the single page it controls.
#[derive(Debug)]
pub struct Driver {
    browser: CdpBrowser,
    page: CdpPage,
    handler: tokio::task::JoinHandle<()>,
    timeout: Duration,
    poll_interval: Duration,
}

impl Driver {
    /// Launch a dedicated browser and open a blank page.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser cannot be launched or the page
    /// cannot be created.
    pub async fn launch(config: &HarnessConfig) -> HarnessResult<Self> {
        let mut builder = CdpConfig::builder()
            .window_size(config.viewport_width, config.viewport_height);

        if !config.headless {
            builder = builder.with_head();
        }
        if !config.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder
            .build()
            .map_err(|e| HarnessError::BrowserLaunch {
                message: e.to_string(),
            })?;

        let (browser, mut handler) =
            CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| HarnessError::BrowserLaunch {
                    message: e.to_string(),
                })?;

        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| HarnessError::Page {
                message: e.to_string(),
            })?;

        Ok(Self {
            browser,
            page,
            handler: handle,
            timeout: config.timeout,
            poll_interval: config.poll_interval,
        })
    }

    /// Close the browser and stop its event handler.
    pub async fn close(mut self) -> HarnessResult<()> {
        let result = self.browser.close().await;
        self.handler.abort();
        result.map_err(|e| HarnessError::BrowserLaunch {
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// The configured timeout for suspending operations
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The configured polling interval for waits
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Navigate to a URL.
    pub async fn goto(&self, url: &str) -> HarnessResult<()> {
        debug!(url, "goto");
        let nav = self.page.goto(url);
        tokio::time::timeout(self.timeout, nav)
            .await
            .map_err(|_| HarnessError::Timeout {
                ms: self.timeout.as_millis() as u64,
                waited_for: format!("navigation to {url}"),
            })?
            .map_err(|e| HarnessError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// Reload the current document.
    pub async fn reload(&self) -> HarnessResult<()> {
        let url = self.current_url().await?;
        self.goto(&url).await
    }

    /// Read the current location.
    pub async fn current_url(&self) -> HarnessResult<String> {
        self.eval("window.location.href".to_string()).await
    }

    /// Evaluate a JS expression and deserialize its value.
    async fn eval<T: DeserializeOwned>(&self, js: String) -> HarnessResult<T> {
        let eval = self.page.evaluate(js);
        let result = tokio::time::timeout(self.timeout, eval)
            .await
            .map_err(|_| HarnessError::Timeout {
                ms: self.timeout.as_millis() as u64,
                waited_for: "script evaluation".to_string(),
            })?
            .map_err(|e| HarnessError::Page {
                message: e.to_string(),
            })?;
        result.into_value().map_err(|e| HarnessError::Page {
            message: e.to_string(),
        })
    }

    /// Evaluate an element-scoped action that yields `null` when the
    /// element does not resolve.
    async fn eval_on_element<T: DeserializeOwned>(
        &self,
        locator: &Locator,
        js: String,
    ) -> HarnessResult<T> {
        let value: Option<T> = self.eval(js).await?;
        value.ok_or_else(|| HarnessError::ElementNotFound {
            selector: locator.description(),
        })
    }

    /// Count elements matching the locator.
    pub async fn count(&self, locator: &Locator) -> HarnessResult<usize> {
        self.eval(locator.to_count_expr()).await
    }

    /// Click the referenced element.
    pub async fn click(&self, locator: &Locator) -> HarnessResult<()> {
        debug!(locator = %locator, "click");
        let _: bool = self
            .eval_on_element(locator, click_js(&locator.to_element_expr()))
            .await?;
        Ok(())
    }

    /// Replace the value of the referenced input with `text`.
    pub async fn fill(&self, locator: &Locator, text: &str) -> HarnessResult<()> {
        debug!(locator = %locator, "fill");
        let _: bool = self
            .eval_on_element(locator, fill_js(&locator.to_element_expr(), text))
            .await?;
        Ok(())
    }

    /// Select an option of the referenced `<select>` by value.
    pub async fn select_option(&self, locator: &Locator, value: &str) -> HarnessResult<()> {
        debug!(locator = %locator, value, "select option");
        let _: bool = self
            .eval_on_element(locator, select_js(&locator.to_element_expr(), value))
            .await?;
        Ok(())
    }

    /// Read the trimmed inner text of the referenced element.
    pub async fn inner_text(&self, locator: &Locator) -> HarnessResult<String> {
        self.eval_on_element(locator, inner_text_js(&locator.to_element_expr()))
            .await
    }

    /// Read the trimmed inner text of every match, in document order.
    pub async fn all_inner_texts(&self, locator: &Locator) -> HarnessResult<Vec<String>> {
        self.eval(locator.to_all_texts_expr()).await
    }

    /// Read an attribute of the referenced element (`None` when the
    /// attribute is absent).
    pub async fn attribute(
        &self,
        locator: &Locator,
        name: &str,
    ) -> HarnessResult<Option<String>> {
        let read: AttrRead = self
            .eval_on_element(locator, attribute_js(&locator.to_element_expr(), name))
            .await?;
        Ok(read.value)
    }

    /// Read a computed style property of the referenced element.
    pub async fn computed_style(
        &self,
        locator: &Locator,
        property: &str,
    ) -> HarnessResult<String> {
        self.eval_on_element(locator, computed_style_js(&locator.to_element_expr(), property))
            .await
    }

    /// Whether the referenced element resolves and is rendered visible.
    /// A missing element is reported as not visible, not as an error.
    pub async fn is_visible(&self, locator: &Locator) -> HarnessResult<bool> {
        self.eval(is_visible_js(&locator.to_element_expr())).await
    }

    /// Whether the referenced element is enabled.
    pub async fn is_enabled(&self, locator: &Locator) -> HarnessResult<bool> {
        self.eval_on_element(locator, is_enabled_js(&locator.to_element_expr()))
            .await
    }

    /// Wait until the referenced element is visible.
    pub async fn wait_for_visible(&self, locator: &Locator) -> HarnessResult<()> {
        let start = Instant::now();
        while start.elapsed() < self.timeout {
            if self.is_visible(locator).await? {
                return Ok(());
            }
            tokio::time::sleep(self.poll_interval).await;
        }
        Err(HarnessError::Timeout {
            ms: self.timeout.as_millis() as u64,
            waited_for: format!("visible {locator}"),
        })
    }

    /// Wait until the referenced element is gone or hidden.
    pub async fn wait_for_hidden(&self, locator: &Locator) -> HarnessResult<()> {
        let start = Instant::now();
        while start.elapsed() < self.timeout {
            if !self.is_visible(locator).await? {
                return Ok(());
            }
            tokio::time::sleep(self.poll_interval).await;
        }
        Err(HarnessError::Timeout {
            ms: self.timeout.as_millis() as u64,
            waited_for: format!("hidden {locator}"),
        })
    }

    /// Wait until the current location satisfies `predicate`, returning
    /// the matching URL.
    pub async fn wait_for_url<F>(&self, what: &str, predicate: F) -> HarnessResult<String>
    where
        F: Fn(&str) -> bool,
    {
        let start = Instant::now();
        loop {
            let url = self.current_url().await?;
            if predicate(&url) {
                return Ok(url);
            }
            if start.elapsed() >= self.timeout {
                return Err(HarnessError::Timeout {
                    ms: self.timeout.as_millis() as u64,
                    waited_for: format!("url matching {what}"),
                });
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

// ---------------------------------------------------------------------------
// JS builders. Kept as plain functions so the generated scripts are unit
// testable without a browser.
// ---------------------------------------------------------------------------

fn click_js(element_expr: &str) -> String {
    format!(
        "(() => {{ const el = {element_expr}; if (!el) return null; \
         el.scrollIntoView({{ block: 'center' }}); el.click(); return true; }})()"
    )
}

/// React re-renders controlled inputs from state, so the value is written
/// through the native setter and followed by bubbling input/change events.
fn fill_js(element_expr: &str, text: &str) -> String {
    let text = js_string(text);
    format!(
        "(() => {{ const el = {element_expr}; if (!el) return null; \
         const proto = el instanceof HTMLTextAreaElement \
             ? HTMLTextAreaElement.prototype : HTMLInputElement.prototype; \
         Object.getOwnPropertyDescriptor(proto, 'value').set.call(el, {text}); \
         el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
         el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
         return true; }})()"
    )
}

fn select_js(element_expr: &str, value: &str) -> String {
    let value = js_string(value);
    format!(
        "(() => {{ const el = {element_expr}; if (!el) return null; \
         Object.getOwnPropertyDescriptor(HTMLSelectElement.prototype, 'value')\
         .set.call(el, {value}); \
         el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
         return true; }})()"
    )
}

fn inner_text_js(element_expr: &str) -> String {
    format!("(() => {{ const el = {element_expr}; return el ? el.innerText.trim() : null; }})()")
}

fn attribute_js(element_expr: &str, name: &str) -> String {
    let name = js_string(name);
    format!(
        "(() => {{ const el = {element_expr}; if (!el) return null; \
         return {{ value: el.getAttribute({name}) }}; }})()"
    )
}

fn computed_style_js(element_expr: &str, property: &str) -> String {
    let property = js_string(property);
    format!(
        "(() => {{ const el = {element_expr}; if (!el) return null; \
         return window.getComputedStyle(el).getPropertyValue({property}); }})()"
    )
}

fn is_visible_js(element_expr: &str) -> String {
    format!(
        "(() => {{ const el = {element_expr}; if (!el) return false; \
         const r = el.getBoundingClientRect(); \
         const s = window.getComputedStyle(el); \
         return r.width > 0 && r.height > 0 && s.visibility !== 'hidden'; }})()"
    )
}

fn is_enabled_js(element_expr: &str) -> String {
    format!("(() => {{ const el = {element_expr}; return el ? !el.disabled : null; }})()")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::Locator;

    fn expr() -> String {
        Locator::data_test("login-button").to_element_expr()
    }

    mod js_builder_tests {
        use super::*;

        #[test]
        fn test_click_returns_null_on_missing_element() {
            let js = click_js(&expr());
            assert!(js.contains("if (!el) return null"));
            assert!(js.contains("el.click()"));
            assert!(js.contains("scrollIntoView"));
        }

        #[test]
        fn test_fill_uses_native_setter_and_events() {
            let js = fill_js(&expr(), "standard_user");
            assert!(js.contains("HTMLInputElement.prototype"));
            assert!(js.contains("\"standard_user\""));
            assert!(js.contains("new Event('input'"));
            assert!(js.contains("new Event('change'"));
        }

        #[test]
        fn test_fill_escapes_text() {
            let js = fill_js(&expr(), "O\"Brien");
            assert!(js.contains("\"O\\\"Brien\""));
        }

        #[test]
        fn test_select_dispatches_change() {
            let js = select_js(&expr(), "lohi");
            assert!(js.contains("HTMLSelectElement.prototype"));
            assert!(js.contains("\"lohi\""));
            assert!(js.contains("new Event('change'"));
        }

        #[test]
        fn test_inner_text_trims() {
            let js = inner_text_js(&expr());
            assert!(js.contains("innerText.trim()"));
        }

        #[test]
        fn test_attribute_wraps_result() {
            let js = attribute_js(&expr(), "alt");
            assert!(js.contains("{ value: el.getAttribute(\"alt\") }"));
        }

        #[test]
        fn test_visible_checks_rect_and_style() {
            let js = is_visible_js(&expr());
            assert!(js.contains("getBoundingClientRect"));
            assert!(js.contains("visibility !== 'hidden'"));
            assert!(js.contains("return false"));
        }

        #[test]
        fn test_enabled_reads_disabled_flag() {
            let js = is_enabled_js(&expr());
            assert!(js.contains("!el.disabled"));
        }

        #[test]
        fn test_computed_style_property_embedded() {
            let js = computed_style_js(&expr(), "font-family");
            assert!(js.contains("getPropertyValue(\"font-family\")"));
        }
    }
}
