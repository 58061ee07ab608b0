//! Checkout step one: buyer information and its strict validation order.

use std::time::Instant;

use crate::locator::Locator;
use crate::model::CheckoutError;
use crate::result::{HarnessError, HarnessResult};
use crate::session::{Screen, Session};

/// Result of submitting the buyer information form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// All three fields were accepted; the session moved to the summary
    Advanced,
    /// The first missing field was rejected; the session stayed on step one
    Rejected(CheckoutError),
}

impl SubmitOutcome {
    /// Whether the submission advanced to the summary
    #[must_use]
    pub const fn advanced(&self) -> bool {
        matches!(self, Self::Advanced)
    }

    /// The rejection kind, if the submission failed
    #[must_use]
    pub fn rejection(self) -> Option<CheckoutError> {
        match self {
            Self::Advanced => None,
            Self::Rejected(error) => Some(error),
        }
    }
}

/// Page object for the buyer information form
#[derive(Debug, Clone)]
pub struct CheckoutInfoPage {
    first_name: Locator,
    last_name: Locator,
    postal_code: Locator,
    continue_button: Locator,
    cancel_button: Locator,
    error: Locator,
}

impl Default for CheckoutInfoPage {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutInfoPage {
    /// Build the page object
    #[must_use]
    pub fn new() -> Self {
        Self {
            first_name: Locator::data_test("firstName"),
            last_name: Locator::data_test("lastName"),
            postal_code: Locator::data_test("postalCode"),
            continue_button: Locator::data_test("continue"),
            cancel_button: Locator::data_test("cancel"),
            error: Locator::data_test("error"),
        }
    }

    /// Populate the form. Any subset may be empty; empty strings clear the
    /// corresponding field.
    pub async fn enter_info(
        &self,
        session: &Session,
        first: &str,
        last: &str,
        postal: &str,
    ) -> HarnessResult<()> {
        session.require(Screen::CheckoutInfo)?;
        let driver = session.driver();
        driver.fill(&self.first_name, first).await?;
        driver.fill(&self.last_name, last).await?;
        driver.fill(&self.postal_code, postal).await?;
        Ok(())
    }

    /// Submit the form. The application validates first name, then last
    /// name, then postal code, surfacing only the first violation; when all
    /// three are non-empty the session advances to the summary.
    pub async fn submit(&self, session: &mut Session) -> HarnessResult<SubmitOutcome> {
        session.require(Screen::CheckoutInfo)?;
        session.driver().click(&self.continue_button).await?;

        let start = Instant::now();
        loop {
            let url = session.driver().current_url().await?;
            if Screen::CheckoutOverview.matches_url(&url) {
                session.transition(Screen::CheckoutOverview).await?;
                return Ok(SubmitOutcome::Advanced);
            }
            if session.driver().is_visible(&self.error).await? {
                let message = session.driver().inner_text(&self.error).await?;
                return Ok(SubmitOutcome::Rejected(CheckoutError::from_message(&message)));
            }
            if start.elapsed() >= session.driver().timeout() {
                return Err(HarnessError::Timeout {
                    ms: session.driver().timeout().as_millis() as u64,
                    waited_for: "checkout submission to advance or show an error".to_string(),
                });
            }
            tokio::time::sleep(session.driver().poll_interval()).await;
        }
    }

    /// The displayed validation error, or `None` when no error is shown
    pub async fn error_message(&self, session: &Session) -> HarnessResult<Option<String>> {
        if session.driver().is_visible(&self.error).await? {
            Ok(Some(session.driver().inner_text(&self.error).await?))
        } else {
            Ok(None)
        }
    }

    /// Abandon checkout, discarding the form; back to the cart
    pub async fn cancel(&self, session: &mut Session) -> HarnessResult<()> {
        session.require(Screen::CheckoutInfo)?;
        session.driver().click(&self.cancel_button).await?;
        session.transition(Screen::Cart).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_outcome_accessors() {
        assert!(SubmitOutcome::Advanced.advanced());
        let rejected = SubmitOutcome::Rejected(CheckoutError::LastNameRequired);
        assert!(!rejected.advanced());
        assert_eq!(rejected.rejection(), Some(CheckoutError::LastNameRequired));
    }
}
