//! swagcheck: end-to-end UI regression harness for the Swag Labs storefront.
//!
//! The harness gives test authors a stable, typed vocabulary for driving the
//! storefront through a browser and asserting on its visible state, while
//! insulating tests from the underlying markup:
//!
//! ```text
//! Scenario ──► Page Object ──► Driver (CDP) ──► live document
//!    ▲              │
//!    └── invariant checks ◄── typed values / screen transitions
//! ```
//!
//! A [`Session`] owns one browser, one [`Screen`] value, and the
//! authoritative cart record. Page objects validate the screen they are
//! called from and record the screen they lead to, so the navigation state
//! machine is checked on every step.
//!
//! # Example
//!
//! ```no_run
//! use swagcheck::{scenarios, HarnessConfig, Session};
//!
//! #[tokio::main]
//! async fn main() -> swagcheck::HarnessResult<()> {
//!     let mut session = Session::launch(HarnessConfig::from_env()).await?;
//!     scenarios::two_item_checkout(&mut session).await?;
//!     session.close().await
//! }
//! ```

#![warn(missing_docs)]

mod config;
mod driver;
mod locator;
mod model;
mod result;
mod session;

/// Invariant checks re-verified across screen transitions
pub mod invariants;

/// Page objects, one per application screen
pub mod pages;

/// End-to-end scenarios composed from page-object calls
pub mod scenarios;

pub use config::{
    HarnessConfig, DEFAULT_BASE_URL, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS,
    LOCKED_OUT_USER, PASSWORD, STANDARD_USER,
};
pub use driver::Driver;
pub use locator::{Locator, Selector};
pub use model::{
    CartState, CheckoutError, LoginError, Price, Product, SortOption, ADD_TO_CART_LABEL,
    REMOVE_LABEL,
};
pub use result::{HarnessError, HarnessResult};
pub use session::{Screen, Session};

/// Install a global tracing subscriber honouring `RUST_LOG`. Safe to call
/// more than once; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
