//! Locator abstraction for element references.
//!
//! A [`Locator`] is a declarative reference to an element (or collection of
//! elements) in the live document: a base selector, an optional index into
//! the matched collection, and an optional descendant selector scoped to the
//! indexed element. Locators compile to DOM query expressions that the
//! driver evaluates over CDP; nothing in the harness touches markup through
//! any other route.
//!
//! The storefront exposes two hook conventions, both first-class here:
//! `data-test` attributes for controls and CSS classes for widgets.

use serde::{Deserialize, Serialize};

/// Selector for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    /// CSS selector (e.g. `.inventory_item`)
    Css(String),
    /// `data-test` attribute hook (e.g. `login-button`)
    DataTest(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a `data-test` attribute selector
    #[must_use]
    pub fn data_test(id: impl Into<String>) -> Self {
        Self::DataTest(id.into())
    }

    /// Render as a CSS selector string
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Css(s) => s.clone(),
            Self::DataTest(id) => format!("[data-test=\"{id}\"]"),
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_css())
    }
}

/// A declarative element reference: base selector, optional index,
/// optional descendant scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    selector: Selector,
    nth: Option<usize>,
    within: Option<Selector>,
}

impl Locator {
    /// Create a locator from a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::from_selector(Selector::css(selector))
    }

    /// Create a locator from a `data-test` hook
    #[must_use]
    pub fn data_test(id: impl Into<String>) -> Self {
        Self::from_selector(Selector::data_test(id))
    }

    /// Create a locator from a selector
    #[must_use]
    pub fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            nth: None,
            within: None,
        }
    }

    /// Narrow to the i-th match of the base selector
    #[must_use]
    pub const fn nth(mut self, index: usize) -> Self {
        self.nth = Some(index);
        self
    }

    /// Narrow to a descendant of the (indexed) base element
    #[must_use]
    pub fn within(mut self, selector: Selector) -> Self {
        self.within = Some(selector);
        self
    }

    /// Get the base selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Human-readable description for error messages
    #[must_use]
    pub fn description(&self) -> String {
        let mut out = self.selector.to_css();
        if let Some(i) = self.nth {
            out.push_str(&format!("[{i}]"));
        }
        if let Some(ref inner) = self.within {
            out.push(' ');
            out.push_str(&inner.to_css());
        }
        out
    }

    /// Compile to a JS expression evaluating to the referenced element
    /// or `null`.
    #[must_use]
    pub fn to_element_expr(&self) -> String {
        let base = js_string(&self.selector.to_css());
        let index = self.nth.unwrap_or(0);
        match self.within {
            Some(ref inner) => {
                let inner = js_string(&inner.to_css());
                format!(
                    "(() => {{ const b = document.querySelectorAll({base})[{index}]; \
                     return b ? b.querySelector({inner}) : null; }})()"
                )
            }
            None => format!("(document.querySelectorAll({base})[{index}] || null)"),
        }
    }

    /// Compile to a JS expression counting matches at the locator's
    /// terminal scope.
    #[must_use]
    pub fn to_count_expr(&self) -> String {
        let base = js_string(&self.selector.to_css());
        match (self.nth, &self.within) {
            (_, Some(inner)) => {
                let index = self.nth.unwrap_or(0);
                let inner = js_string(&inner.to_css());
                format!(
                    "(() => {{ const b = document.querySelectorAll({base})[{index}]; \
                     return b ? b.querySelectorAll({inner}).length : 0; }})()"
                )
            }
            (Some(index), None) => {
                format!("(document.querySelectorAll({base})[{index}] ? 1 : 0)")
            }
            (None, None) => format!("document.querySelectorAll({base}).length"),
        }
    }

    /// Compile to a JS expression collecting the trimmed inner text of
    /// every match of the base selector, in document order.
    #[must_use]
    pub fn to_all_texts_expr(&self) -> String {
        let base = js_string(&self.selector.to_css());
        format!(
            "Array.from(document.querySelectorAll({base})).map(e => e.innerText.trim())"
        )
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Embed text as a JS string literal.
pub(crate) fn js_string(text: &str) -> String {
    // serde_json escaping is valid JS for any input, unlike {:?}
    serde_json::to_string(text).unwrap_or_else(|_| String::from("\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    mod selector_tests {
        use super::*;

        #[test]
        fn test_css_selector() {
            let selector = Selector::css(".inventory_item");
            assert_eq!(selector.to_css(), ".inventory_item");
        }

        #[test]
        fn test_data_test_selector() {
            let selector = Selector::data_test("login-button");
            assert_eq!(selector.to_css(), "[data-test=\"login-button\"]");
        }

        #[test]
        fn test_display_matches_css() {
            assert_eq!(
                Selector::data_test("checkout").to_string(),
                "[data-test=\"checkout\"]"
            );
        }
    }

    mod locator_tests {
        use super::*;

        #[test]
        fn test_simple_element_expr() {
            let expr = Locator::css(".complete-header").to_element_expr();
            assert!(expr.contains("querySelectorAll"));
            assert!(expr.contains(".complete-header"));
            assert!(expr.contains("[0]"));
        }

        #[test]
        fn test_nth_element_expr() {
            let expr = Locator::css(".inventory_item").nth(3).to_element_expr();
            assert!(expr.contains("[3]"));
        }

        #[test]
        fn test_within_element_expr() {
            let expr = Locator::css(".cart_item")
                .nth(1)
                .within(Selector::css(".inventory_item_name"))
                .to_element_expr();
            assert!(expr.contains(".cart_item"));
            assert!(expr.contains("[1]"));
            assert!(expr.contains("querySelector("));
            assert!(expr.contains(".inventory_item_name"));
        }

        #[test]
        fn test_count_expr_plain() {
            let expr = Locator::css(".cart_item").to_count_expr();
            assert!(expr.ends_with(".length"));
        }

        #[test]
        fn test_count_expr_nth_is_zero_or_one() {
            let expr = Locator::css(".cart_item").nth(2).to_count_expr();
            assert!(expr.contains("? 1 : 0"));
        }

        #[test]
        fn test_all_texts_expr() {
            let expr = Locator::css(".inventory_item_name").to_all_texts_expr();
            assert!(expr.contains("Array.from"));
            assert!(expr.contains("innerText.trim()"));
        }

        #[test]
        fn test_description() {
            let locator = Locator::css(".inventory_item")
                .nth(2)
                .within(Selector::css("button.btn_inventory"));
            assert_eq!(locator.description(), ".inventory_item[2] button.btn_inventory");
        }
    }

    mod js_string_tests {
        use super::*;

        #[test]
        fn test_plain_text() {
            assert_eq!(js_string("hello"), "\"hello\"");
        }

        #[test]
        fn test_quotes_escaped() {
            assert_eq!(js_string("a\"b"), "\"a\\\"b\"");
        }

        #[test]
        fn test_data_test_selector_round_trip() {
            let embedded = js_string(&Selector::data_test("firstName").to_css());
            assert_eq!(embedded, "\"[data-test=\\\"firstName\\\"]\"");
        }
    }
}
