//! Domain model: products, prices, cart state, sort options, and the
//! closed error-kind enumerations for the application's own error texts.
//!
//! `CartState` is the authoritative record of what a session has selected
//! for purchase. The cart badge and the per-item toggle labels rendered by
//! the application are derived views that must reconcile against it (see
//! [`crate::invariants`]).

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::result::{HarnessError, HarnessResult};

/// Label of a per-item toggle when the item is not in the cart
pub const ADD_TO_CART_LABEL: &str = "Add to cart";

/// Label of a per-item toggle when the item is in the cart
pub const REMOVE_LABEL: &str = "Remove";

/// A price in whole cents. Money arithmetic is exact; display is `$X.YY`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Price {
    cents: i64,
}

fn price_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$(\d+)\.(\d{2})").expect("static pattern"))
}

impl Price {
    /// Create a price from whole cents
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// The amount in whole cents
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.cents
    }

    /// Parse a displayed price such as `$29.99`.
    pub fn parse(text: &str) -> HarnessResult<Self> {
        let trimmed = text.trim();
        let normalized = trimmed.strip_prefix('$').unwrap_or(trimmed);
        let mut parts = normalized.splitn(2, '.');
        let dollars = parts.next().unwrap_or_default();
        let cents = parts.next().unwrap_or_default();
        if dollars.is_empty()
            || cents.len() != 2
            || !dollars.bytes().all(|b| b.is_ascii_digit())
            || !cents.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(HarnessError::PriceFormat {
                text: text.to_string(),
            });
        }
        let dollars: i64 = dollars.parse().map_err(|_| HarnessError::PriceFormat {
            text: text.to_string(),
        })?;
        let cents: i64 = cents.parse().map_err(|_| HarnessError::PriceFormat {
            text: text.to_string(),
        })?;
        Ok(Self::from_cents(dollars * 100 + cents))
    }

    /// Extract the first `$X.YY` amount embedded in a longer label,
    /// e.g. `Item total: $53.98`.
    pub fn find_in(text: &str) -> HarnessResult<Self> {
        let captures = price_pattern()
            .captures(text)
            .ok_or_else(|| HarnessError::PriceFormat {
                text: text.to_string(),
            })?;
        let dollars: i64 = captures[1].parse().map_err(|_| HarnessError::PriceFormat {
            text: text.to_string(),
        })?;
        let cents: i64 = captures[2].parse().map_err(|_| HarnessError::PriceFormat {
            text: text.to_string(),
        })?;
        Ok(Self::from_cents(dollars * 100 + cents))
    }
}

impl std::ops::Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_cents(self.cents + rhs.cents)
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), std::ops::Add::add)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${}.{:02}", self.cents / 100, self.cents % 100)
    }
}

/// A catalog entry as read from the rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Display name (unique within the catalog)
    pub name: String,
    /// Display description
    pub description: String,
    /// Display price
    pub price: Price,
    /// Image alt text, when read from the details screen
    pub image_alt: Option<String>,
}

/// Ordered collection of products selected for purchase. Quantity is
/// always 1 per product; the application has no quantity controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    entries: Vec<Product>,
}

impl CartState {
    /// Create an empty cart
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct products in the cart
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cart holds nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The expected badge reading: `None` when empty (the badge is absent,
    /// not "0"), otherwise the distinct-product count.
    #[must_use]
    pub fn badge(&self) -> Option<usize> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.len())
        }
    }

    /// Append a product
    pub fn add(&mut self, product: Product) {
        self.entries.push(product);
    }

    /// Remove the entry at `index`, shifting subsequent entries down
    pub fn remove_at(&mut self, index: usize) -> Option<Product> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    /// Remove the entry with the given name; returns whether one existed
    pub fn remove_by_name(&mut self, name: &str) -> bool {
        match self.entries.iter().position(|p| p.name == name) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether a product with the given name is in the cart
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|p| p.name == name)
    }

    /// The entries in insertion order
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.entries
    }

    /// Sum of entry prices
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.entries.iter().map(|p| p.price).sum()
    }

    /// The toggle label the catalog should show for a product, derived
    /// from cart membership
    #[must_use]
    pub fn expected_toggle(&self, name: &str) -> &'static str {
        if self.contains(name) {
            REMOVE_LABEL
        } else {
            ADD_TO_CART_LABEL
        }
    }
}

/// Catalog sort orders offered by the sort selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOption {
    /// Name (A to Z)
    NameAscending,
    /// Name (Z to A)
    NameDescending,
    /// Price (low to high)
    PriceAscending,
    /// Price (high to low)
    PriceDescending,
}

impl SortOption {
    /// Every option, in the order the selector lists them
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::NameAscending,
            Self::NameDescending,
            Self::PriceAscending,
            Self::PriceDescending,
        ]
    }

    /// The `<option>` value understood by the sort selector
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::NameAscending => "az",
            Self::NameDescending => "za",
            Self::PriceAscending => "lohi",
            Self::PriceDescending => "hilo",
        }
    }

    /// The option's display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NameAscending => "Name (A to Z)",
            Self::NameDescending => "Name (Z to A)",
            Self::PriceAscending => "Price (low to high)",
            Self::PriceDescending => "Price (high to low)",
        }
    }

    /// Whether this option orders by product name
    #[must_use]
    pub const fn by_name(self) -> bool {
        matches!(self, Self::NameAscending | Self::NameDescending)
    }

    /// Whether this option orders ascending
    #[must_use]
    pub const fn ascending(self) -> bool {
        matches!(self, Self::NameAscending | Self::PriceAscending)
    }
}

impl std::fmt::Display for SortOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Login failures, keyed off the application's displayed message so tests
/// assert on kinds instead of exact wording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// No username was supplied
    UsernameRequired,
    /// No password was supplied
    PasswordRequired,
    /// Credentials matched no account
    BadCredentials,
    /// The account exists but is locked out
    LockedOut,
    /// Unrecognised message, preserved verbatim
    Other(String),
}

impl LoginError {
    /// Classify a displayed login error message
    #[must_use]
    pub fn from_message(message: &str) -> Self {
        match message {
            "Epic sadface: Username is required" => Self::UsernameRequired,
            "Epic sadface: Password is required" => Self::PasswordRequired,
            "Epic sadface: Username and password do not match any user in this service" => {
                Self::BadCredentials
            }
            "Epic sadface: Sorry, this user has been locked out." => Self::LockedOut,
            other => Self::Other(other.to_string()),
        }
    }

    /// The message the application displays for this kind
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::UsernameRequired => "Epic sadface: Username is required",
            Self::PasswordRequired => "Epic sadface: Password is required",
            Self::BadCredentials => {
                "Epic sadface: Username and password do not match any user in this service"
            }
            Self::LockedOut => "Epic sadface: Sorry, this user has been locked out.",
            Self::Other(message) => message,
        }
    }
}

impl std::fmt::Display for LoginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Checkout form validation failures. The application validates in a fixed
/// order and surfaces one error at a time: first name, then last name,
/// then postal code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// First name missing
    FirstNameRequired,
    /// Last name missing
    LastNameRequired,
    /// Postal code missing
    PostalCodeRequired,
    /// Unrecognised message, preserved verbatim
    Other(String),
}

impl CheckoutError {
    /// Classify a displayed checkout error message
    #[must_use]
    pub fn from_message(message: &str) -> Self {
        match message {
            "Error: First Name is required" => Self::FirstNameRequired,
            "Error: Last Name is required" => Self::LastNameRequired,
            "Error: Postal Code is required" => Self::PostalCodeRequired,
            other => Self::Other(other.to_string()),
        }
    }

    /// The message the application displays for this kind
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::FirstNameRequired => "Error: First Name is required",
            Self::LastNameRequired => "Error: Last Name is required",
            Self::PostalCodeRequired => "Error: Postal Code is required",
            Self::Other(message) => message,
        }
    }
}

impl std::fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, cents: i64) -> Product {
        Product {
            name: name.to_string(),
            description: format!("{name} description"),
            price: Price::from_cents(cents),
            image_alt: None,
        }
    }

    mod price_tests {
        use super::*;

        #[test]
        fn test_parse_with_dollar_sign() {
            assert_eq!(Price::parse("$29.99").unwrap(), Price::from_cents(2999));
        }

        #[test]
        fn test_parse_without_dollar_sign() {
            assert_eq!(Price::parse("7.99").unwrap(), Price::from_cents(799));
        }

        #[test]
        fn test_parse_rejects_garbage() {
            assert!(Price::parse("free").is_err());
            assert!(Price::parse("$9.9").is_err());
            assert!(Price::parse("").is_err());
            assert!(Price::parse("$.99").is_err());
        }

        #[test]
        fn test_find_in_summary_label() {
            let price = Price::find_in("Item total: $53.98").unwrap();
            assert_eq!(price, Price::from_cents(5398));
        }

        #[test]
        fn test_find_in_rejects_label_without_amount() {
            assert!(Price::find_in("Item total:").is_err());
        }

        #[test]
        fn test_add_is_exact() {
            let total = Price::from_cents(2999) + Price::from_cents(999);
            assert_eq!(total, Price::from_cents(3998));
        }

        #[test]
        fn test_sum() {
            let total: Price = [799, 999, 1599]
                .into_iter()
                .map(Price::from_cents)
                .sum();
            assert_eq!(total, Price::from_cents(3397));
        }

        #[test]
        fn test_display_pads_cents() {
            assert_eq!(Price::from_cents(705).to_string(), "$7.05");
            assert_eq!(Price::from_cents(5398).to_string(), "$53.98");
        }

        #[test]
        fn test_display_round_trips_parse() {
            let price = Price::from_cents(4999);
            assert_eq!(Price::parse(&price.to_string()).unwrap(), price);
        }

        #[test]
        fn test_ordering() {
            assert!(Price::from_cents(799) < Price::from_cents(2999));
        }
    }

    mod cart_tests {
        use super::*;

        #[test]
        fn test_empty_cart_badge_absent() {
            let cart = CartState::new();
            assert!(cart.is_empty());
            assert_eq!(cart.badge(), None);
        }

        #[test]
        fn test_badge_counts_distinct_items() {
            let mut cart = CartState::new();
            cart.add(product("Sauce Labs Backpack", 2999));
            cart.add(product("Sauce Labs Bike Light", 999));
            assert_eq!(cart.badge(), Some(2));
        }

        #[test]
        fn test_remove_at_shifts_indices() {
            let mut cart = CartState::new();
            cart.add(product("a", 100));
            cart.add(product("b", 200));
            cart.add(product("c", 300));
            let removed = cart.remove_at(1).unwrap();
            assert_eq!(removed.name, "b");
            assert_eq!(cart.products()[1].name, "c");
        }

        #[test]
        fn test_remove_at_out_of_range() {
            let mut cart = CartState::new();
            assert!(cart.remove_at(0).is_none());
        }

        #[test]
        fn test_remove_by_name() {
            let mut cart = CartState::new();
            cart.add(product("a", 100));
            assert!(cart.remove_by_name("a"));
            assert!(!cart.remove_by_name("a"));
            assert!(cart.is_empty());
        }

        #[test]
        fn test_subtotal() {
            let mut cart = CartState::new();
            cart.add(product("a", 2999));
            cart.add(product("b", 999));
            assert_eq!(cart.subtotal(), Price::from_cents(3998));
        }

        #[test]
        fn test_expected_toggle_follows_membership() {
            let mut cart = CartState::new();
            assert_eq!(cart.expected_toggle("a"), ADD_TO_CART_LABEL);
            cart.add(product("a", 100));
            assert_eq!(cart.expected_toggle("a"), REMOVE_LABEL);
            cart.clear();
            assert_eq!(cart.expected_toggle("a"), ADD_TO_CART_LABEL);
        }
    }

    mod sort_option_tests {
        use super::*;

        #[test]
        fn test_select_values() {
            assert_eq!(SortOption::NameAscending.value(), "az");
            assert_eq!(SortOption::NameDescending.value(), "za");
            assert_eq!(SortOption::PriceAscending.value(), "lohi");
            assert_eq!(SortOption::PriceDescending.value(), "hilo");
        }

        #[test]
        fn test_labels() {
            assert_eq!(SortOption::NameAscending.label(), "Name (A to Z)");
            assert_eq!(SortOption::PriceDescending.label(), "Price (high to low)");
        }

        #[test]
        fn test_axis_and_direction() {
            assert!(SortOption::NameAscending.by_name());
            assert!(!SortOption::PriceAscending.by_name());
            assert!(SortOption::PriceAscending.ascending());
            assert!(!SortOption::NameDescending.ascending());
        }

        #[test]
        fn test_all_lists_four_distinct_options() {
            let all = SortOption::all();
            assert_eq!(all.len(), 4);
            for (i, a) in all.iter().enumerate() {
                for b in &all[i + 1..] {
                    assert_ne!(a, b);
                }
            }
        }
    }

    mod login_error_tests {
        use super::*;

        #[test]
        fn test_known_messages_classify() {
            assert_eq!(
                LoginError::from_message("Epic sadface: Username is required"),
                LoginError::UsernameRequired
            );
            assert_eq!(
                LoginError::from_message("Epic sadface: Password is required"),
                LoginError::PasswordRequired
            );
            assert_eq!(
                LoginError::from_message(
                    "Epic sadface: Username and password do not match any user in this service"
                ),
                LoginError::BadCredentials
            );
            assert_eq!(
                LoginError::from_message("Epic sadface: Sorry, this user has been locked out."),
                LoginError::LockedOut
            );
        }

        #[test]
        fn test_unknown_message_preserved() {
            let error = LoginError::from_message("Epic sadface: new wording");
            assert_eq!(error, LoginError::Other("Epic sadface: new wording".to_string()));
            assert_eq!(error.message(), "Epic sadface: new wording");
        }

        #[test]
        fn test_message_round_trips() {
            for kind in [
                LoginError::UsernameRequired,
                LoginError::PasswordRequired,
                LoginError::BadCredentials,
                LoginError::LockedOut,
            ] {
                assert_eq!(LoginError::from_message(kind.message()), kind);
            }
        }
    }

    mod checkout_error_tests {
        use super::*;

        #[test]
        fn test_known_messages_classify() {
            assert_eq!(
                CheckoutError::from_message("Error: First Name is required"),
                CheckoutError::FirstNameRequired
            );
            assert_eq!(
                CheckoutError::from_message("Error: Last Name is required"),
                CheckoutError::LastNameRequired
            );
            assert_eq!(
                CheckoutError::from_message("Error: Postal Code is required"),
                CheckoutError::PostalCodeRequired
            );
        }

        #[test]
        fn test_message_round_trips() {
            for kind in [
                CheckoutError::FirstNameRequired,
                CheckoutError::LastNameRequired,
                CheckoutError::PostalCodeRequired,
            ] {
                assert_eq!(CheckoutError::from_message(kind.message()), kind);
            }
        }
    }
}
