//! Test scenarios: sequences of page-object calls plus invariant
//! assertions. Each function drives one flow end to end over a caller-owned
//! [`Session`] and fails fast on the first violated expectation; the
//! external test harness decides how sessions are created, parallelised,
//! and reported.

use tracing::info;

use crate::config::{LOCKED_OUT_USER, PASSWORD, STANDARD_USER};
use crate::invariants::{
    expect_eq, expect_rejection, expect_true, reconcile_cart, verify_sorted, verify_totals,
};
use crate::model::{
    CheckoutError, LoginError, SortOption, ADD_TO_CART_LABEL, REMOVE_LABEL,
};
use crate::pages::{
    CartPage, CheckoutCompletePage, CheckoutInfoPage, CheckoutOverviewPage, InventoryPage,
    ItemDetailsPage, LoginPage, CONFIRMATION_HEADER, MENU_ITEMS,
};
use crate::result::{HarnessError, HarnessResult};
use crate::session::{Screen, Session};

/// Open the entry URL and authenticate as the standard user.
pub async fn sign_in(session: &mut Session) -> HarnessResult<()> {
    let login = LoginPage::new();
    login.open(session).await?;
    let outcome = login.login(session, STANDARD_USER, PASSWORD).await?;
    expect_true("standard user login accepted", outcome.is_logged_in())
}

/// The standard user reaches a populated catalog.
pub async fn successful_login(session: &mut Session) -> HarnessResult<()> {
    info!("scenario: successful login");
    sign_in(session).await?;
    session.verify_screen().await?;
    let inventory = InventoryPage::new();
    let count = inventory.item_count(session).await?;
    expect_true("catalog shows at least one item", count > 0)
}

/// The locked-out user is refused with the lockout message.
pub async fn locked_out_login(session: &mut Session) -> HarnessResult<()> {
    info!("scenario: locked out login");
    let login = LoginPage::new();
    login.open(session).await?;
    let outcome = login.login(session, LOCKED_OUT_USER, PASSWORD).await?;
    expect_eq(
        "lockout rejection",
        &outcome.rejection(),
        &Some(LoginError::LockedOut),
    )?;
    session.require(Screen::LoggedOut)
}

/// An invalid credential combination is refused with the expected kind and
/// the session stays on the login form.
pub async fn invalid_login(
    session: &mut Session,
    username: &str,
    password: &str,
    expected: &LoginError,
) -> HarnessResult<()> {
    info!(username, "scenario: invalid login");
    let login = LoginPage::new();
    login.open(session).await?;
    let outcome = login.login(session, username, password).await?;
    expect_eq(
        "login rejection kind",
        &outcome.rejection(),
        &Some(expected.clone()),
    )?;
    session.require(Screen::LoggedOut)
}

/// Every per-item toggle runs Add → Remove → Add and shows the matching
/// label at each step, both on the catalog and on the details screen, with
/// the derived views reconciling after every mutation.
pub async fn toggle_roundtrip(session: &mut Session) -> HarnessResult<()> {
    info!("scenario: toggle roundtrip");
    sign_in(session).await?;
    let inventory = InventoryPage::new();
    let details = ItemDetailsPage::new();

    let count = inventory.item_count(session).await?;
    for index in 0..count {
        let label = inventory.toggle_label(session, index).await?;
        expect_eq("initial toggle", &label.as_str(), &ADD_TO_CART_LABEL)?;

        inventory.add_to_cart(session, index).await?;
        let label = inventory.toggle_label(session, index).await?;
        expect_eq("toggle after add", &label.as_str(), &REMOVE_LABEL)?;
        reconcile_cart(session, &inventory).await?;

        inventory.remove_from_cart(session, index).await?;
        let label = inventory.toggle_label(session, index).await?;
        expect_eq("toggle after remove", &label.as_str(), &ADD_TO_CART_LABEL)?;
        reconcile_cart(session, &inventory).await?;

        // The details toggle acts on the same product.
        inventory.open_item(session, index).await?;
        let label = details.toggle_label(session).await?;
        expect_eq("details toggle", &label.as_str(), &ADD_TO_CART_LABEL)?;
        details.add_to_cart(session).await?;
        let label = details.toggle_label(session).await?;
        expect_eq("details toggle after add", &label.as_str(), &REMOVE_LABEL)?;
        details.remove_from_cart(session).await?;
        let label = details.toggle_label(session).await?;
        expect_eq("details toggle after remove", &label.as_str(), &ADD_TO_CART_LABEL)?;
        details.back_to_products(session).await?;
        reconcile_cart(session, &inventory).await?;
    }
    Ok(())
}

/// An added item shows up in the cart with quantity 1, removal shifts the
/// rows down, and the item can be re-added after continuing shopping.
pub async fn cart_display_and_removal(session: &mut Session) -> HarnessResult<()> {
    info!("scenario: cart display and removal");
    sign_in(session).await?;
    let inventory = InventoryPage::new();
    let cart = CartPage::new();

    let first_name = inventory.item_name(session, 0).await?;
    inventory.add_to_cart(session, 0).await?;
    inventory.open_cart(session).await?;

    expect_eq("cart rows", &cart.item_count(session).await?, &1)?;
    expect_eq("cart row name", &cart.item_name(session, 0).await?, &first_name)?;
    expect_eq(
        "cart row quantity",
        &cart.item_quantity(session, 0).await?.as_str(),
        &"1",
    )?;

    cart.remove_item(session, 0).await?;
    expect_eq("cart rows after removal", &cart.item_count(session).await?, &0)?;
    expect_true("cart record empty after removal", session.cart().is_empty())?;

    cart.continue_shopping(session).await?;
    reconcile_cart(session, &inventory).await?;
    inventory.add_to_cart(session, 0).await?;
    inventory.open_cart(session).await?;
    expect_eq("cart rows after re-add", &cart.item_count(session).await?, &1)
}

/// The two-item checkout: strict validation on the empty form, summary
/// contents and totals arithmetic, confirmation header, and the cyclic
/// return to the catalog with an emptied cart.
pub async fn two_item_checkout(session: &mut Session) -> HarnessResult<()> {
    info!("scenario: two item checkout");
    sign_in(session).await?;
    let inventory = InventoryPage::new();
    let cart = CartPage::new();
    let info_page = CheckoutInfoPage::new();
    let overview = CheckoutOverviewPage::new();
    let complete = CheckoutCompletePage::new();

    inventory.add_to_cart(session, 0).await?;
    inventory.add_to_cart(session, 1).await?;
    reconcile_cart(session, &inventory).await?;
    let expected_subtotal = session.cart().subtotal();

    inventory.open_cart(session).await?;
    cart.checkout(session).await?;

    let outcome = info_page.submit(session).await?;
    expect_rejection(outcome, &CheckoutError::FirstNameRequired)?;

    info_page.enter_info(session, "John", "Doe", "12345").await?;
    let outcome = info_page.submit(session).await?;
    expect_true("checkout info accepted", outcome.advanced())?;

    expect_eq("summary rows", &overview.item_count(session).await?, &2)?;
    let subtotal_label = overview.subtotal_label(session).await?;
    expect_true(
        "subtotal label carries the item price sum",
        subtotal_label.contains(&expected_subtotal.to_string()),
    )?;
    verify_totals(session, &overview).await?;

    overview.finish(session).await?;
    expect_eq(
        "confirmation header",
        &complete.header(session).await?.as_str(),
        &CONFIRMATION_HEADER,
    )?;

    complete.back_home(session).await?;
    session.require(Screen::Inventory)?;
    session.verify_screen().await?;
    reconcile_cart(session, &inventory).await
}

/// Submitting the checkout form surfaces exactly one error at a time, in
/// the order first name, last name, postal code; a complete form advances.
pub async fn checkout_validation_order(session: &mut Session) -> HarnessResult<()> {
    info!("scenario: checkout validation order");
    sign_in(session).await?;
    let inventory = InventoryPage::new();
    let cart = CartPage::new();
    let info_page = CheckoutInfoPage::new();

    inventory.add_to_cart(session, 0).await?;
    inventory.open_cart(session).await?;
    cart.checkout(session).await?;

    let outcome = info_page.submit(session).await?;
    expect_rejection(outcome, &CheckoutError::FirstNameRequired)?;

    info_page.enter_info(session, "John", "", "").await?;
    let outcome = info_page.submit(session).await?;
    expect_rejection(outcome, &CheckoutError::LastNameRequired)?;

    info_page.enter_info(session, "John", "Doe", "").await?;
    let outcome = info_page.submit(session).await?;
    expect_rejection(outcome, &CheckoutError::PostalCodeRequired)?;

    info_page.enter_info(session, "John", "Doe", "12345").await?;
    let outcome = info_page.submit(session).await?;
    expect_true("complete form advances", outcome.advanced())?;
    session.require(Screen::CheckoutOverview)
}

/// Cancel edges: checkout info cancels back to the cart, the summary
/// cancels back to the catalog, and the cart record survives both.
pub async fn cancel_edges(session: &mut Session) -> HarnessResult<()> {
    info!("scenario: cancel edges");
    sign_in(session).await?;
    let inventory = InventoryPage::new();
    let cart = CartPage::new();
    let info_page = CheckoutInfoPage::new();
    let overview = CheckoutOverviewPage::new();

    inventory.open_cart(session).await?;
    cart.checkout(session).await?;
    info_page.cancel(session).await?;
    session.require(Screen::Cart)?;
    session.verify_screen().await?;

    cart.checkout(session).await?;
    info_page.enter_info(session, "John", "Doe", "12345").await?;
    let outcome = info_page.submit(session).await?;
    expect_true("checkout info accepted", outcome.advanced())?;
    overview.cancel(session).await?;
    session.require(Screen::Inventory)?;
    session.verify_screen().await?;
    reconcile_cart(session, &inventory).await
}

/// Sorting reorders the catalog exactly as the selected option demands and
/// leaves the cart untouched.
pub async fn sort_catalog(session: &mut Session, option: SortOption) -> HarnessResult<()> {
    info!(option = %option, "scenario: sort catalog");
    sign_in(session).await?;
    let inventory = InventoryPage::new();

    let names_before = inventory.item_names(session).await?;
    let prices_before = inventory.item_prices(session).await?;

    inventory.sort_by(session, option).await?;

    if option.by_name() {
        let names_after = inventory.item_names(session).await?;
        verify_sorted(option.label(), &names_before, &names_after, option.ascending())?;
    } else {
        let prices_after = inventory.item_prices(session).await?;
        verify_sorted(option.label(), &prices_before, &prices_after, option.ascending())?;
    }
    expect_true("sorting leaves the cart empty", session.cart().is_empty())?;
    reconcile_cart(session, &inventory).await
}

/// The sidebar offers exactly the expected entries.
pub async fn sidebar_menu_lists_expected_items(session: &mut Session) -> HarnessResult<()> {
    info!("scenario: sidebar menu entries");
    sign_in(session).await?;
    let inventory = InventoryPage::new();

    inventory.open_menu(session).await?;
    expect_true(
        "sidebar menu visible after opening",
        inventory.is_menu_visible(session).await?,
    )?;
    let items = inventory.menu_items(session).await?;
    expect_eq(
        "sidebar menu entries",
        &items,
        &MENU_ITEMS.iter().map(|s| (*s).to_string()).collect::<Vec<_>>(),
    )
}

/// Reset App State empties the cart: the badge disappears at once and the
/// toggles reconcile after the catalog re-renders.
pub async fn reset_app_state_clears_cart(session: &mut Session) -> HarnessResult<()> {
    info!("scenario: reset app state");
    sign_in(session).await?;
    let inventory = InventoryPage::new();

    inventory.add_to_cart(session, 0).await?;
    expect_eq("badge before reset", &inventory.cart_badge(session).await?, &Some(1))?;

    inventory.open_menu(session).await?;
    inventory.reset_app_state(session).await?;
    expect_eq("badge after reset", &inventory.cart_badge(session).await?, &None)?;

    // The application leaves stale toggle labels until the catalog
    // re-renders from the emptied cart.
    session.driver().reload().await?;
    session.transition(Screen::Inventory).await?;
    reconcile_cart(session, &inventory).await
}

/// Logout invalidates the session and brings the login control back.
pub async fn logout_returns_to_login(session: &mut Session) -> HarnessResult<()> {
    info!("scenario: logout");
    sign_in(session).await?;
    let inventory = InventoryPage::new();
    let login = LoginPage::new();

    inventory.open_menu(session).await?;
    inventory.logout(session).await?;

    session.require(Screen::LoggedOut)?;
    session.verify_screen().await?;
    expect_true("identity cleared on logout", session.identity().is_none())?;
    expect_true(
        "login control visible again",
        login.is_login_button_visible(session).await?,
    )
}

/// Every catalog entry's details screen renders its name, description,
/// price, and image, carries alt text, and reports a font for each text
/// block. Issues are collected per item and reported together.
pub async fn item_details_rendering(session: &mut Session) -> HarnessResult<()> {
    info!("scenario: item details rendering");
    sign_in(session).await?;
    let inventory = InventoryPage::new();
    let details = ItemDetailsPage::new();

    let count = inventory.item_count(session).await?;
    expect_true("catalog shows at least one item", count > 0)?;

    let mut issues = Vec::new();
    for index in 0..count {
        let item_name = inventory.item_name(session, index).await?;
        inventory.open_item(session, index).await?;

        if !details.is_name_visible(session).await? {
            issues.push(format!("{item_name}: name not visible"));
        }
        if !details.is_description_visible(session).await? {
            issues.push(format!("{item_name}: description not visible"));
        }
        if !details.is_price_visible(session).await? {
            issues.push(format!("{item_name}: price not visible"));
        }
        if !details.is_image_visible(session).await? {
            issues.push(format!("{item_name}: image not visible"));
        }
        match details.image_alt(session).await? {
            Some(alt) if !alt.trim().is_empty() => {}
            _ => issues.push(format!("{item_name}: image missing alt text")),
        }
        for (what, font) in [
            ("name", details.name_font_family(session).await?),
            ("description", details.description_font_family(session).await?),
            ("price", details.price_font_family(session).await?),
        ] {
            if font.trim().is_empty() {
                issues.push(format!("{item_name}: {what} reports no font"));
            }
        }
        if details.name(session).await? != item_name {
            issues.push(format!("{item_name}: details show a different name"));
        }

        details.back_to_products(session).await?;
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(HarnessError::assertion(format!(
            "rendering issues:\n{}",
            issues.join("\n")
        )))
    }
}
