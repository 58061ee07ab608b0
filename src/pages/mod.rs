//! Page objects: one module per application screen.
//!
//! Each page object bundles the locators for its screen and exposes
//! intention-revealing operations. There is no shared base type; every
//! operation takes the [`crate::Session`] it acts on, validates the screen
//! it is valid from, and records the screen it leads to.

mod cart;
mod checkout_complete;
mod checkout_info;
mod checkout_overview;
mod inventory;
mod item_details;
mod login;

pub use cart::CartPage;
pub use checkout_complete::{CheckoutCompletePage, CONFIRMATION_HEADER};
pub use checkout_info::{CheckoutInfoPage, SubmitOutcome};
pub use checkout_overview::CheckoutOverviewPage;
pub use inventory::{InventoryPage, MENU_ITEMS};
pub use item_details::ItemDetailsPage;
pub use login::{LoginOutcome, LoginPage};
