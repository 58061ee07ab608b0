//! Invariant checks the scenarios re-verify across screen transitions:
//! sort order, cart cardinality and toggle reconciliation, totals
//! arithmetic, and validation ordering.
//!
//! The cart record in the session is authoritative; the badge and the
//! per-item toggle labels are derived views. [`reconcile_cart`] re-checks
//! both after every mutating operation a scenario performs.

use crate::model::CheckoutError;
use crate::pages::{CheckoutOverviewPage, InventoryPage, SubmitOutcome};
use crate::result::{HarnessError, HarnessResult};
use crate::session::Session;

/// Fail with a descriptive assertion error unless `actual == expected`.
pub fn expect_eq<T: PartialEq + std::fmt::Debug>(
    context: &str,
    actual: &T,
    expected: &T,
) -> HarnessResult<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(HarnessError::assertion(format!(
            "{context}: expected {expected:?}, observed {actual:?}"
        )))
    }
}

/// Fail with a descriptive assertion error unless `condition` holds.
pub fn expect_true(context: &str, condition: bool) -> HarnessResult<()> {
    if condition {
        Ok(())
    } else {
        Err(HarnessError::assertion(context.to_string()))
    }
}

/// Check that `after` is exactly the stable sort of `before` in the given
/// direction. Stability on ties comes with the comparison: equal elements
/// keep their pre-sort relative order.
pub fn verify_sorted<T>(
    context: &str,
    before: &[T],
    after: &[T],
    ascending: bool,
) -> HarnessResult<()>
where
    T: Ord + Clone + std::fmt::Debug,
{
    let mut expected = before.to_vec();
    if ascending {
        expected.sort();
    } else {
        expected.sort_by(|a, b| b.cmp(a));
    }
    if after == expected.as_slice() {
        Ok(())
    } else {
        Err(HarnessError::assertion(format!(
            "{context}: expected order {expected:?}, observed {after:?}"
        )))
    }
}

/// Check the rejected submission carries the expected validation kind.
/// An advance, or a different message, is a validation mismatch.
pub fn expect_rejection(
    outcome: SubmitOutcome,
    expected: &CheckoutError,
) -> HarnessResult<()> {
    match outcome {
        SubmitOutcome::Rejected(actual) if &actual == expected => Ok(()),
        SubmitOutcome::Rejected(actual) => Err(HarnessError::ValidationMismatch {
            expected: expected.message().to_string(),
            actual: Some(actual.message().to_string()),
        }),
        SubmitOutcome::Advanced => Err(HarnessError::ValidationMismatch {
            expected: expected.message().to_string(),
            actual: None,
        }),
    }
}

/// Reconcile the derived views on the catalog against the authoritative
/// cart record: the badge equals the distinct-item count (absent when the
/// cart is empty) and every per-item toggle label follows cart membership.
///
/// Valid only while the session is on the catalog.
pub async fn reconcile_cart(
    session: &Session,
    inventory: &InventoryPage,
) -> HarnessResult<()> {
    let badge = inventory.cart_badge(session).await?;
    expect_eq("cart badge vs cart record", &badge, &session.cart().badge())?;

    let names = inventory.item_names(session).await?;
    for (index, name) in names.iter().enumerate() {
        let label = inventory.toggle_label(session, index).await?;
        let expected = session.cart().expected_toggle(name);
        if label != expected {
            return Err(HarnessError::assertion(format!(
                "toggle for {name:?} reads {label:?} but the cart record implies {expected:?}"
            )));
        }
    }
    Ok(())
}

/// Check the order summary's arithmetic: `total == subtotal + tax`, and the
/// displayed subtotal equals the sum of prices in the cart record.
pub async fn verify_totals(
    session: &Session,
    overview: &CheckoutOverviewPage,
) -> HarnessResult<()> {
    let subtotal = overview.subtotal(session).await?;
    let tax = overview.tax(session).await?;
    let total = overview.total(session).await?;

    expect_eq("total vs subtotal + tax", &total, &(subtotal + tax))?;
    expect_eq(
        "displayed subtotal vs cart record",
        &subtotal,
        &session.cart().subtotal(),
    )
}
