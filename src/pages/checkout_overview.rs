//! Checkout step two: the read-only order summary.

use crate::locator::{Locator, Selector};
use crate::model::Price;
use crate::result::HarnessResult;
use crate::session::{Screen, Session};

/// Page object for the order summary
#[derive(Debug, Clone)]
pub struct CheckoutOverviewPage {
    items: Locator,
    subtotal_label: Locator,
    tax_label: Locator,
    total_label: Locator,
    finish_button: Locator,
    cancel_button: Locator,
}

impl Default for CheckoutOverviewPage {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutOverviewPage {
    /// Build the page object
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Locator::css(".cart_item"),
            subtotal_label: Locator::css(".summary_subtotal_label"),
            tax_label: Locator::css(".summary_tax_label"),
            total_label: Locator::css(".summary_total_label"),
            finish_button: Locator::data_test("finish"),
            cancel_button: Locator::data_test("cancel"),
        }
    }

    /// Number of summary rows rendered
    pub async fn item_count(&self, session: &Session) -> HarnessResult<usize> {
        session.require(Screen::CheckoutOverview)?;
        session.driver().count(&self.items).await
    }

    /// Display name of the i-th summary row
    pub async fn item_name(&self, session: &Session, index: usize) -> HarnessResult<String> {
        session.require(Screen::CheckoutOverview)?;
        let locator = self
            .items
            .clone()
            .nth(index)
            .within(Selector::css(".inventory_item_name"));
        session.driver().inner_text(&locator).await
    }

    /// The raw subtotal label, e.g. `Item total: $53.98`
    pub async fn subtotal_label(&self, session: &Session) -> HarnessResult<String> {
        session.require(Screen::CheckoutOverview)?;
        session.driver().inner_text(&self.subtotal_label).await
    }

    /// The raw tax label, e.g. `Tax: $4.32`
    pub async fn tax_label(&self, session: &Session) -> HarnessResult<String> {
        session.require(Screen::CheckoutOverview)?;
        session.driver().inner_text(&self.tax_label).await
    }

    /// The raw total label, e.g. `Total: $58.30`
    pub async fn total_label(&self, session: &Session) -> HarnessResult<String> {
        session.require(Screen::CheckoutOverview)?;
        session.driver().inner_text(&self.total_label).await
    }

    /// The subtotal amount parsed out of its label
    pub async fn subtotal(&self, session: &Session) -> HarnessResult<Price> {
        let label = self.subtotal_label(session).await?;
        Price::find_in(&label)
    }

    /// The tax amount parsed out of its label
    pub async fn tax(&self, session: &Session) -> HarnessResult<Price> {
        let label = self.tax_label(session).await?;
        Price::find_in(&label)
    }

    /// The total amount parsed out of its label
    pub async fn total(&self, session: &Session) -> HarnessResult<Price> {
        let label = self.total_label(session).await?;
        Price::find_in(&label)
    }

    /// Place the order: the cart empties and the session moves to the
    /// confirmation screen.
    pub async fn finish(&self, session: &mut Session) -> HarnessResult<()> {
        session.require(Screen::CheckoutOverview)?;
        session.driver().click(&self.finish_button).await?;
        session.transition(Screen::CheckoutComplete).await?;
        session.cart_mut().clear();
        Ok(())
    }

    /// Abandon the summary; back to the catalog with the cart unchanged
    pub async fn cancel(&self, session: &mut Session) -> HarnessResult<()> {
        session.require(Screen::CheckoutOverview)?;
        session.driver().click(&self.cancel_button).await?;
        session.transition(Screen::Inventory).await
    }
}
