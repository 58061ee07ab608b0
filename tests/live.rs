//! Live-browser scenario suite.
//!
//! These tests drive the real storefront and need a Chromium install plus
//! network access, so they are ignored by default:
//!
//! ```text
//! cargo test --test live -- --ignored
//! ```
//!
//! `SWAGCHECK_BASE_URL` retargets the suite, `SWAGCHECK_HEADFUL` shows the
//! browser, `CHROMIUM_PATH` picks the executable. Every test launches its
//! own session; sessions share nothing and may run in parallel.

use swagcheck::{scenarios, HarnessConfig, LoginError, Session, SortOption, STANDARD_USER};

async fn launch() -> Session {
    swagcheck::init_tracing();
    Session::launch(HarnessConfig::from_env())
        .await
        .expect("launch browser session")
}

#[tokio::test]
#[ignore = "requires Chromium and network access to the storefront"]
async fn standard_user_reaches_the_catalog() {
    let mut session = launch().await;
    let result = scenarios::successful_login(&mut session).await;
    session.close().await.expect("close session");
    result.expect("scenario");
}

#[tokio::test]
#[ignore = "requires Chromium and network access to the storefront"]
async fn locked_out_user_is_refused() {
    let mut session = launch().await;
    let result = scenarios::locked_out_login(&mut session).await;
    session.close().await.expect("close session");
    result.expect("scenario");
}

#[tokio::test]
#[ignore = "requires Chromium and network access to the storefront"]
async fn invalid_credentials_show_the_expected_message() {
    let cases = [
        ("invalid_user", "secret_sauce", LoginError::BadCredentials),
        (STANDARD_USER, "wrong_password", LoginError::BadCredentials),
        ("", "", LoginError::UsernameRequired),
        (STANDARD_USER, "", LoginError::PasswordRequired),
    ];
    let mut session = launch().await;
    let mut result = Ok(());
    for (username, password, expected) in cases {
        result = scenarios::invalid_login(&mut session, username, password, &expected).await;
        if result.is_err() {
            break;
        }
    }
    session.close().await.expect("close session");
    result.expect("scenario");
}

#[tokio::test]
#[ignore = "requires Chromium and network access to the storefront"]
async fn cart_toggles_roundtrip_on_catalog_and_details() {
    let mut session = launch().await;
    let result = scenarios::toggle_roundtrip(&mut session).await;
    session.close().await.expect("close session");
    result.expect("scenario");
}

#[tokio::test]
#[ignore = "requires Chromium and network access to the storefront"]
async fn cart_displays_and_removes_items() {
    let mut session = launch().await;
    let result = scenarios::cart_display_and_removal(&mut session).await;
    session.close().await.expect("close session");
    result.expect("scenario");
}

#[tokio::test]
#[ignore = "requires Chromium and network access to the storefront"]
async fn two_item_checkout_completes() {
    let mut session = launch().await;
    let result = scenarios::two_item_checkout(&mut session).await;
    session.close().await.expect("close session");
    result.expect("scenario");
}

#[tokio::test]
#[ignore = "requires Chromium and network access to the storefront"]
async fn checkout_validates_fields_in_order() {
    let mut session = launch().await;
    let result = scenarios::checkout_validation_order(&mut session).await;
    session.close().await.expect("close session");
    result.expect("scenario");
}

#[tokio::test]
#[ignore = "requires Chromium and network access to the storefront"]
async fn cancel_edges_return_to_cart_and_catalog() {
    let mut session = launch().await;
    let result = scenarios::cancel_edges(&mut session).await;
    session.close().await.expect("close session");
    result.expect("scenario");
}

#[tokio::test]
#[ignore = "requires Chromium and network access to the storefront"]
async fn every_sort_option_orders_the_catalog() {
    for option in SortOption::all() {
        let mut session = launch().await;
        let result = scenarios::sort_catalog(&mut session, option).await;
        session.close().await.expect("close session");
        result.expect("scenario");
    }
}

#[tokio::test]
#[ignore = "requires Chromium and network access to the storefront"]
async fn sidebar_menu_offers_expected_entries() {
    let mut session = launch().await;
    let result = scenarios::sidebar_menu_lists_expected_items(&mut session).await;
    session.close().await.expect("close session");
    result.expect("scenario");
}

#[tokio::test]
#[ignore = "requires Chromium and network access to the storefront"]
async fn reset_app_state_clears_the_cart() {
    let mut session = launch().await;
    let result = scenarios::reset_app_state_clears_cart(&mut session).await;
    session.close().await.expect("close session");
    result.expect("scenario");
}

#[tokio::test]
#[ignore = "requires Chromium and network access to the storefront"]
async fn logout_restores_the_login_form() {
    let mut session = launch().await;
    let result = scenarios::logout_returns_to_login(&mut session).await;
    session.close().await.expect("close session");
    result.expect("scenario");
}

#[tokio::test]
#[ignore = "requires Chromium and network access to the storefront"]
async fn item_details_render_completely() {
    let mut session = launch().await;
    let result = scenarios::item_details_rendering(&mut session).await;
    session.close().await.expect("close session");
    result.expect("scenario");
}
