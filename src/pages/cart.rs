//! The cart screen.

use crate::locator::{Locator, Selector};
use crate::result::HarnessResult;
use crate::session::{Screen, Session};

/// Page object for the cart
#[derive(Debug, Clone)]
pub struct CartPage {
    items: Locator,
    continue_shopping_button: Locator,
    checkout_button: Locator,
}

impl Default for CartPage {
    fn default() -> Self {
        Self::new()
    }
}

impl CartPage {
    /// Build the page object
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Locator::css(".cart_item"),
            continue_shopping_button: Locator::data_test("continue-shopping"),
            checkout_button: Locator::data_test("checkout"),
        }
    }

    fn item_part(&self, index: usize, part: &str) -> Locator {
        self.items.clone().nth(index).within(Selector::css(part))
    }

    /// Number of cart rows rendered
    pub async fn item_count(&self, session: &Session) -> HarnessResult<usize> {
        session.require(Screen::Cart)?;
        session.driver().count(&self.items).await
    }

    /// Display name of the i-th row
    pub async fn item_name(&self, session: &Session, index: usize) -> HarnessResult<String> {
        session.require(Screen::Cart)?;
        session
            .driver()
            .inner_text(&self.item_part(index, ".inventory_item_name"))
            .await
    }

    /// Display description of the i-th row
    pub async fn item_description(
        &self,
        session: &Session,
        index: usize,
    ) -> HarnessResult<String> {
        session.require(Screen::Cart)?;
        session
            .driver()
            .inner_text(&self.item_part(index, ".inventory_item_desc"))
            .await
    }

    /// Displayed quantity of the i-th row (always "1" in this application)
    pub async fn item_quantity(&self, session: &Session, index: usize) -> HarnessResult<String> {
        session.require(Screen::Cart)?;
        session
            .driver()
            .inner_text(&self.item_part(index, ".cart_quantity"))
            .await
    }

    /// Remove the i-th row. The displayed count drops by exactly one and
    /// subsequent indices shift down.
    pub async fn remove_item(&self, session: &mut Session, index: usize) -> HarnessResult<()> {
        session.require(Screen::Cart)?;
        let name = self.item_name(session, index).await?;
        session
            .driver()
            .click(&self.item_part(index, "button.cart_button"))
            .await?;
        session.cart_mut().remove_by_name(&name);
        Ok(())
    }

    /// Back to the catalog, cart state preserved
    pub async fn continue_shopping(&self, session: &mut Session) -> HarnessResult<()> {
        session.require(Screen::Cart)?;
        session.driver().click(&self.continue_shopping_button).await?;
        session.transition(Screen::Inventory).await
    }

    /// Proceed to checkout step one. Whether an empty cart may proceed is
    /// the application's decision, not this layer's.
    pub async fn checkout(&self, session: &mut Session) -> HarnessResult<()> {
        session.require(Screen::Cart)?;
        session.driver().click(&self.checkout_button).await?;
        session.transition(Screen::CheckoutInfo).await
    }
}
