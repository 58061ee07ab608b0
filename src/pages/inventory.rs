//! The catalog screen and its satellite controls: sort selector, sidebar
//! menu, cart badge and link.

use crate::locator::{Locator, Selector};
use crate::model::{Price, Product, SortOption};
use crate::result::{HarnessError, HarnessResult};
use crate::session::{Screen, Session};

/// The link texts the sidebar menu is expected to offer, in display order
pub const MENU_ITEMS: [&str; 4] = ["All Items", "About", "Logout", "Reset App State"];

/// Page object for the catalog
#[derive(Debug, Clone)]
pub struct InventoryPage {
    items: Locator,
    item_names: Locator,
    item_prices: Locator,
    cart_link: Locator,
    cart_badge: Locator,
    sort_select: Locator,
    menu_button: Locator,
    menu: Locator,
    menu_links: Locator,
    all_items_link: Locator,
    about_link: Locator,
    logout_link: Locator,
    reset_link: Locator,
    close_menu_button: Locator,
}

impl Default for InventoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryPage {
    /// Build the page object
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Locator::css(".inventory_item"),
            item_names: Locator::css(".inventory_item_name"),
            item_prices: Locator::css(".inventory_item_price"),
            cart_link: Locator::css(".shopping_cart_link"),
            cart_badge: Locator::css(".shopping_cart_badge"),
            sort_select: Locator::data_test("product-sort-container"),
            menu_button: Locator::css("#react-burger-menu-btn"),
            menu: Locator::css(".bm-menu"),
            menu_links: Locator::css(".bm-item-list a"),
            all_items_link: Locator::css("#inventory_sidebar_link"),
            about_link: Locator::css("#about_sidebar_link"),
            logout_link: Locator::css("#logout_sidebar_link"),
            reset_link: Locator::css("#reset_sidebar_link"),
            close_menu_button: Locator::css("#react-burger-cross-btn"),
        }
    }

    fn item_part(&self, index: usize, part: &str) -> Locator {
        self.items.clone().nth(index).within(Selector::css(part))
    }

    /// Number of catalog entries rendered
    pub async fn item_count(&self, session: &Session) -> HarnessResult<usize> {
        session.require(Screen::Inventory)?;
        session.driver().count(&self.items).await
    }

    /// Display name of the i-th entry
    pub async fn item_name(&self, session: &Session, index: usize) -> HarnessResult<String> {
        session.require(Screen::Inventory)?;
        session
            .driver()
            .inner_text(&self.item_part(index, ".inventory_item_name"))
            .await
    }

    /// Display description of the i-th entry
    pub async fn item_description(
        &self,
        session: &Session,
        index: usize,
    ) -> HarnessResult<String> {
        session.require(Screen::Inventory)?;
        session
            .driver()
            .inner_text(&self.item_part(index, ".inventory_item_desc"))
            .await
    }

    /// Price of the i-th entry
    pub async fn item_price(&self, session: &Session, index: usize) -> HarnessResult<Price> {
        session.require(Screen::Inventory)?;
        let text = session
            .driver()
            .inner_text(&self.item_part(index, ".inventory_item_price"))
            .await?;
        Price::parse(&text)
    }

    /// Every display name, in on-screen order
    pub async fn item_names(&self, session: &Session) -> HarnessResult<Vec<String>> {
        session.require(Screen::Inventory)?;
        session.driver().all_inner_texts(&self.item_names).await
    }

    /// Every price, in on-screen order
    pub async fn item_prices(&self, session: &Session) -> HarnessResult<Vec<Price>> {
        session.require(Screen::Inventory)?;
        let texts = session.driver().all_inner_texts(&self.item_prices).await?;
        texts.iter().map(|t| Price::parse(t)).collect()
    }

    /// Current label of the i-th entry's cart toggle
    /// ("Add to cart" or "Remove")
    pub async fn toggle_label(&self, session: &Session, index: usize) -> HarnessResult<String> {
        session.require(Screen::Inventory)?;
        session
            .driver()
            .inner_text(&self.item_part(index, "button.btn_inventory"))
            .await
    }

    /// Read the i-th entry as a [`Product`]
    pub async fn product_at(&self, session: &Session, index: usize) -> HarnessResult<Product> {
        let name = self.item_name(session, index).await?;
        let description = self.item_description(session, index).await?;
        let price = self.item_price(session, index).await?;
        Ok(Product {
            name,
            description,
            price,
            image_alt: None,
        })
    }

    /// Put the i-th entry in the cart. Valid only while its toggle reads
    /// "Add to cart"; calling it in the other state is a caller error.
    pub async fn add_to_cart(&self, session: &mut Session, index: usize) -> HarnessResult<()> {
        session.require(Screen::Inventory)?;
        let product = self.product_at(session, index).await?;
        session
            .driver()
            .click(&self.item_part(index, "button.btn_inventory"))
            .await?;
        session.cart_mut().add(product);
        Ok(())
    }

    /// Take the i-th entry out of the cart. Valid only while its toggle
    /// reads "Remove".
    pub async fn remove_from_cart(
        &self,
        session: &mut Session,
        index: usize,
    ) -> HarnessResult<()> {
        session.require(Screen::Inventory)?;
        let name = self.item_name(session, index).await?;
        session
            .driver()
            .click(&self.item_part(index, "button.btn_inventory"))
            .await?;
        session.cart_mut().remove_by_name(&name);
        Ok(())
    }

    /// Open the i-th entry's details screen
    pub async fn open_item(&self, session: &mut Session, index: usize) -> HarnessResult<()> {
        session.require(Screen::Inventory)?;
        session
            .driver()
            .click(&self.item_part(index, ".inventory_item_name"))
            .await?;
        session.transition(Screen::ItemDetails(index)).await
    }

    /// Open the cart screen
    pub async fn open_cart(&self, session: &mut Session) -> HarnessResult<()> {
        session.require(Screen::Inventory)?;
        session.driver().click(&self.cart_link).await?;
        session.transition(Screen::Cart).await
    }

    /// The displayed badge count, or `None` when no badge is rendered.
    /// This is the authoritative cross-check for cart cardinality.
    pub async fn cart_badge(&self, session: &Session) -> HarnessResult<Option<usize>> {
        session.require(Screen::Inventory)?;
        if session.driver().count(&self.cart_badge).await? == 0 {
            return Ok(None);
        }
        let text = session.driver().inner_text(&self.cart_badge).await?;
        let count = text
            .parse()
            .map_err(|_| HarnessError::assertion(format!("badge shows non-numeric text {text:?}")))?;
        Ok(Some(count))
    }

    /// Reorder the catalog. Does not touch the cart.
    pub async fn sort_by(&self, session: &Session, option: SortOption) -> HarnessResult<()> {
        session.require(Screen::Inventory)?;
        session
            .driver()
            .select_option(&self.sort_select, option.value())
            .await
    }

    /// Open the sidebar menu and wait for it to finish sliding in
    pub async fn open_menu(&self, session: &Session) -> HarnessResult<()> {
        session.require(Screen::Inventory)?;
        session.driver().click(&self.menu_button).await?;
        session.driver().wait_for_visible(&self.menu).await
    }

    /// Close the sidebar menu
    pub async fn close_menu(&self, session: &Session) -> HarnessResult<()> {
        session.require(Screen::Inventory)?;
        session.driver().click(&self.close_menu_button).await?;
        session.driver().wait_for_hidden(&self.menu).await
    }

    /// Whether the sidebar menu is currently shown
    pub async fn is_menu_visible(&self, session: &Session) -> HarnessResult<bool> {
        session.driver().is_visible(&self.menu).await
    }

    /// The sidebar link texts, in display order. The menu must be open.
    pub async fn menu_items(&self, session: &Session) -> HarnessResult<Vec<String>> {
        session.require(Screen::Inventory)?;
        session.driver().all_inner_texts(&self.menu_links).await
    }

    /// Sidebar "All Items": re-render the catalog without changing screen.
    /// The menu must be open.
    pub async fn all_items(&self, session: &mut Session) -> HarnessResult<()> {
        session.require(Screen::Inventory)?;
        session.driver().click(&self.all_items_link).await?;
        session.transition(Screen::Inventory).await
    }

    /// Where the sidebar "About" entry points. The link leaves the
    /// application entirely, so the harness reads its target instead of
    /// following it. The menu must be open.
    pub async fn about_href(&self, session: &Session) -> HarnessResult<Option<String>> {
        session.require(Screen::Inventory)?;
        session.driver().attribute(&self.about_link, "href").await
    }

    /// Sidebar "Logout": invalidate the session's authentication and return
    /// to the login form. The menu must be open. The cart record survives
    /// logout, matching the application's persisted cart.
    pub async fn logout(&self, session: &mut Session) -> HarnessResult<()> {
        session.require(Screen::Inventory)?;
        session.driver().click(&self.logout_link).await?;
        session.transition(Screen::LoggedOut).await?;
        session.set_identity(None);
        Ok(())
    }

    /// Sidebar "Reset App State": empty the cart without changing screen.
    /// The menu must be open.
    pub async fn reset_app_state(&self, session: &mut Session) -> HarnessResult<()> {
        session.require(Screen::Inventory)?;
        session.driver().click(&self.reset_link).await?;
        session.cart_mut().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_part_scopes_to_indexed_entry() {
        let page = InventoryPage::new();
        let locator = page.item_part(2, "button.btn_inventory");
        assert_eq!(locator.description(), ".inventory_item[2] button.btn_inventory");
    }

    #[test]
    fn test_expected_menu_items() {
        assert_eq!(MENU_ITEMS.len(), 4);
        assert_eq!(MENU_ITEMS[3], "Reset App State");
    }
}
