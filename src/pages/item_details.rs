//! The single-item details screen, reached by selecting a catalog entry.

use crate::locator::Locator;
use crate::model::{Price, Product};
use crate::result::HarnessResult;
use crate::session::{Screen, Session};

/// Page object for the item details screen
#[derive(Debug, Clone)]
pub struct ItemDetailsPage {
    name: Locator,
    description: Locator,
    price: Locator,
    image: Locator,
    toggle_button: Locator,
    back_button: Locator,
}

impl Default for ItemDetailsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemDetailsPage {
    /// Build the page object
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: Locator::css(".inventory_details_name"),
            description: Locator::css(".inventory_details_desc"),
            price: Locator::css(".inventory_details_price"),
            image: Locator::css(".inventory_details_img"),
            toggle_button: Locator::css("button.btn_inventory"),
            back_button: Locator::data_test("back-to-products"),
        }
    }

    /// Display name
    pub async fn name(&self, session: &Session) -> HarnessResult<String> {
        session.require_item_details()?;
        session.driver().inner_text(&self.name).await
    }

    /// Display description
    pub async fn description(&self, session: &Session) -> HarnessResult<String> {
        session.require_item_details()?;
        session.driver().inner_text(&self.description).await
    }

    /// Displayed price text, e.g. `$29.99`
    pub async fn price_text(&self, session: &Session) -> HarnessResult<String> {
        session.require_item_details()?;
        session.driver().inner_text(&self.price).await
    }

    /// Parsed price
    pub async fn price(&self, session: &Session) -> HarnessResult<Price> {
        let text = self.price_text(session).await?;
        Price::parse(&text)
    }

    /// Image alt text descriptor (`None` when the attribute is missing)
    pub async fn image_alt(&self, session: &Session) -> HarnessResult<Option<String>> {
        session.require_item_details()?;
        session.driver().attribute(&self.image, "alt").await
    }

    /// Visibility predicates, used to detect rendering regressions
    pub async fn is_name_visible(&self, session: &Session) -> HarnessResult<bool> {
        session.require_item_details()?;
        session.driver().is_visible(&self.name).await
    }

    /// Whether the description is rendered
    pub async fn is_description_visible(&self, session: &Session) -> HarnessResult<bool> {
        session.require_item_details()?;
        session.driver().is_visible(&self.description).await
    }

    /// Whether the price is rendered
    pub async fn is_price_visible(&self, session: &Session) -> HarnessResult<bool> {
        session.require_item_details()?;
        session.driver().is_visible(&self.price).await
    }

    /// Whether the image is rendered
    pub async fn is_image_visible(&self, session: &Session) -> HarnessResult<bool> {
        session.require_item_details()?;
        session.driver().is_visible(&self.image).await
    }

    /// Computed font family of the name
    pub async fn name_font_family(&self, session: &Session) -> HarnessResult<String> {
        session.require_item_details()?;
        session.driver().computed_style(&self.name, "font-family").await
    }

    /// Computed font family of the description
    pub async fn description_font_family(&self, session: &Session) -> HarnessResult<String> {
        session.require_item_details()?;
        session
            .driver()
            .computed_style(&self.description, "font-family")
            .await
    }

    /// Computed font family of the price
    pub async fn price_font_family(&self, session: &Session) -> HarnessResult<String> {
        session.require_item_details()?;
        session.driver().computed_style(&self.price, "font-family").await
    }

    /// Current label of the cart toggle ("Add to cart" or "Remove")
    pub async fn toggle_label(&self, session: &Session) -> HarnessResult<String> {
        session.require_item_details()?;
        session.driver().inner_text(&self.toggle_button).await
    }

    /// Read the displayed item as a [`Product`]
    pub async fn product(&self, session: &Session) -> HarnessResult<Product> {
        Ok(Product {
            name: self.name(session).await?,
            description: self.description(session).await?,
            price: self.price(session).await?,
            image_alt: self.image_alt(session).await?,
        })
    }

    /// Put the displayed item in the cart. The mutation acts on the same
    /// product as the catalog toggle, so catalog state must reflect it
    /// after returning. Valid only while the toggle reads "Add to cart".
    pub async fn add_to_cart(&self, session: &mut Session) -> HarnessResult<()> {
        session.require_item_details()?;
        let product = self.product(session).await?;
        session.driver().click(&self.toggle_button).await?;
        session.cart_mut().add(product);
        Ok(())
    }

    /// Take the displayed item out of the cart. Valid only while the
    /// toggle reads "Remove".
    pub async fn remove_from_cart(&self, session: &mut Session) -> HarnessResult<()> {
        session.require_item_details()?;
        let name = self.name(session).await?;
        session.driver().click(&self.toggle_button).await?;
        session.cart_mut().remove_by_name(&name);
        Ok(())
    }

    /// Return to the catalog
    pub async fn back_to_products(&self, session: &mut Session) -> HarnessResult<()> {
        session.require_item_details()?;
        session.driver().click(&self.back_button).await?;
        session.transition(Screen::Inventory).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_button_uses_data_test_hook() {
        let page = ItemDetailsPage::new();
        assert_eq!(page.back_button.description(), "[data-test=\"back-to-products\"]");
    }
}
