//! Session and screen model.
//!
//! A [`Session`] is one browser, one user identity, one current [`Screen`],
//! and one authoritative [`CartState`]. The screen value changes only
//! through [`Session::transition`], which waits for the destination URL and
//! so keeps the recorded screen in lockstep with the page actually rendered.
//! Page-object operations declare the screen they are valid from via
//! [`Session::require`] and fail fast when called out of order.
//!
//! Sessions share nothing: tests may run any number of them in parallel
//! without synchronisation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::HarnessConfig;
use crate::driver::Driver;
use crate::model::CartState;
use crate::result::{HarnessError, HarnessResult};

/// The application view currently rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    /// The login form at the bare origin
    LoggedOut,
    /// The catalog
    Inventory,
    /// A single item opened from catalog index `i`
    ItemDetails(usize),
    /// The cart
    Cart,
    /// Checkout step one (buyer information)
    CheckoutInfo,
    /// Checkout step two (order summary)
    CheckoutOverview,
    /// Order confirmation
    CheckoutComplete,
}

impl Screen {
    /// URL fragment identifying this screen, or `None` for the bare origin
    #[must_use]
    pub const fn url_fragment(self) -> Option<&'static str> {
        match self {
            Self::LoggedOut => None,
            Self::Inventory => Some("inventory.html"),
            Self::ItemDetails(_) => Some("inventory-item.html"),
            Self::Cart => Some("cart.html"),
            Self::CheckoutInfo => Some("checkout-step-one.html"),
            Self::CheckoutOverview => Some("checkout-step-two.html"),
            Self::CheckoutComplete => Some("checkout-complete.html"),
        }
    }

    /// Whether a live URL corresponds to this screen
    #[must_use]
    pub fn matches_url(self, url: &str) -> bool {
        match self.url_fragment() {
            Some(fragment) => url.contains(fragment),
            // The login form lives at the origin with no page fragment.
            None => !url.contains(".html"),
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LoggedOut => write!(f, "LoggedOut"),
            Self::Inventory => write!(f, "Inventory"),
            Self::ItemDetails(i) => write!(f, "ItemDetails({i})"),
            Self::Cart => write!(f, "Cart"),
            Self::CheckoutInfo => write!(f, "CheckoutInfo"),
            Self::CheckoutOverview => write!(f, "CheckoutOverview"),
            Self::CheckoutComplete => write!(f, "CheckoutComplete"),
        }
    }
}

/// One browser context bound to one user identity.
#[derive(Debug)]
pub struct Session {
    driver: Driver,
    config: HarnessConfig,
    screen: Screen,
    cart: CartState,
    identity: Option<String>,
}

impl Session {
    /// Launch a fresh session: its own browser, empty cart, logged out.
    pub async fn launch(config: HarnessConfig) -> HarnessResult<Self> {
        let driver = Driver::launch(&config).await?;
        Ok(Self {
            driver,
            config,
            screen: Screen::LoggedOut,
            cart: CartState::new(),
            identity: None,
        })
    }

    /// Tear the session down, closing its browser.
    pub async fn close(self) -> HarnessResult<()> {
        self.driver.close().await
    }

    /// The locator-provider boundary
    #[must_use]
    pub const fn driver(&self) -> &Driver {
        &self.driver
    }

    /// The harness configuration this session was launched with
    #[must_use]
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// The screen the session believes is rendered
    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.screen
    }

    /// The authoritative cart record
    #[must_use]
    pub const fn cart(&self) -> &CartState {
        &self.cart
    }

    /// Mutable access to the cart record (page objects only)
    pub fn cart_mut(&mut self) -> &mut CartState {
        &mut self.cart
    }

    /// The authenticated username, if any
    #[must_use]
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub(crate) fn set_identity(&mut self, identity: Option<String>) {
        self.identity = identity;
    }

    /// Fail unless the session is on `expected`.
    pub fn require(&self, expected: Screen) -> HarnessResult<()> {
        if self.screen == expected {
            Ok(())
        } else {
            Err(HarnessError::WrongScreen {
                expected: expected.to_string(),
                actual: self.screen.to_string(),
            })
        }
    }

    /// Fail unless the session is on some item-details screen; returns the
    /// catalog index the item was opened from.
    pub fn require_item_details(&self) -> HarnessResult<usize> {
        match self.screen {
            Screen::ItemDetails(index) => Ok(index),
            other => Err(HarnessError::WrongScreen {
                expected: "ItemDetails".to_string(),
                actual: other.to_string(),
            }),
        }
    }

    /// Record a screen change after waiting for the destination URL.
    ///
    /// On timeout the screen value is left unchanged and the document is in
    /// whatever state it actually reached; callers must not assume rollback.
    pub async fn transition(&mut self, to: Screen) -> HarnessResult<()> {
        let url = self
            .driver
            .wait_for_url(&to.to_string(), |u| to.matches_url(u))
            .await?;
        debug!(from = %self.screen, to = %to, %url, "screen transition");
        self.screen = to;
        Ok(())
    }

    /// Cross-check the recorded screen against the live URL.
    pub async fn verify_screen(&self) -> HarnessResult<()> {
        let url = self.driver.current_url().await?;
        if self.screen.matches_url(&url) {
            Ok(())
        } else {
            Err(HarnessError::assertion(format!(
                "session records screen {} but the document is at {url}",
                self.screen
            )))
        }
    }
}
