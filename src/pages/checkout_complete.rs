//! The order confirmation screen.

use crate::locator::Locator;
use crate::result::HarnessResult;
use crate::session::{Screen, Session};

/// Header text shown after a successful order
pub const CONFIRMATION_HEADER: &str = "Thank you for your order!";

/// Page object for the confirmation screen
#[derive(Debug, Clone)]
pub struct CheckoutCompletePage {
    header: Locator,
    back_home_button: Locator,
}

impl Default for CheckoutCompletePage {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutCompletePage {
    /// Build the page object
    #[must_use]
    pub fn new() -> Self {
        Self {
            header: Locator::css(".complete-header"),
            back_home_button: Locator::data_test("back-to-products"),
        }
    }

    /// The displayed confirmation message
    pub async fn header(&self, session: &Session) -> HarnessResult<String> {
        session.require(Screen::CheckoutComplete)?;
        session.driver().inner_text(&self.header).await
    }

    /// Return to the catalog
    pub async fn back_home(&self, session: &mut Session) -> HarnessResult<()> {
        session.require(Screen::CheckoutComplete)?;
        session.driver().click(&self.back_home_button).await?;
        session.transition(Screen::Inventory).await
    }
}
