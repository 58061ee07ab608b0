//! The login screen.

use std::time::Instant;

use crate::locator::Locator;
use crate::model::LoginError;
use crate::result::{HarnessError, HarnessResult};
use crate::session::{Screen, Session};

/// Result of a login attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials accepted; the session moved to the catalog
    LoggedIn,
    /// Credentials refused; the session stayed on the login form
    Rejected(LoginError),
}

impl LoginOutcome {
    /// Whether the attempt succeeded
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn)
    }

    /// The rejection kind, if the attempt failed
    #[must_use]
    pub fn rejection(self) -> Option<LoginError> {
        match self {
            Self::LoggedIn => None,
            Self::Rejected(error) => Some(error),
        }
    }
}

/// Page object for the login form
#[derive(Debug, Clone)]
pub struct LoginPage {
    username: Locator,
    password: Locator,
    login_button: Locator,
    error: Locator,
}

impl Default for LoginPage {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginPage {
    /// Build the page object
    #[must_use]
    pub fn new() -> Self {
        Self {
            username: Locator::data_test("username"),
            password: Locator::data_test("password"),
            login_button: Locator::data_test("login-button"),
            error: Locator::data_test("error"),
        }
    }

    /// Load the entry URL. Leaves the session logged out on the login form.
    pub async fn open(&self, session: &mut Session) -> HarnessResult<()> {
        let url = session.config().url("");
        session.driver().goto(&url).await?;
        session.driver().wait_for_visible(&self.login_button).await?;
        session.set_identity(None);
        session.transition(Screen::LoggedOut).await
    }

    /// Submit credentials. On success the session moves to the catalog; on
    /// failure it stays logged out and the outcome carries the classified
    /// error.
    pub async fn login(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
    ) -> HarnessResult<LoginOutcome> {
        session.require(Screen::LoggedOut)?;
        let driver = session.driver();
        driver.fill(&self.username, username).await?;
        driver.fill(&self.password, password).await?;
        driver.click(&self.login_button).await?;

        let start = Instant::now();
        loop {
            let url = session.driver().current_url().await?;
            if Screen::Inventory.matches_url(&url) {
                session.transition(Screen::Inventory).await?;
                session.set_identity(Some(username.to_string()));
                return Ok(LoginOutcome::LoggedIn);
            }
            if session.driver().is_visible(&self.error).await? {
                let message = session.driver().inner_text(&self.error).await?;
                return Ok(LoginOutcome::Rejected(LoginError::from_message(&message)));
            }
            if start.elapsed() >= session.driver().timeout() {
                return Err(HarnessError::Timeout {
                    ms: session.driver().timeout().as_millis() as u64,
                    waited_for: "login to succeed or show an error".to_string(),
                });
            }
            tokio::time::sleep(session.driver().poll_interval()).await;
        }
    }

    /// The displayed auth/validation error, or `None` when no error is shown
    pub async fn error_message(&self, session: &Session) -> HarnessResult<Option<String>> {
        if session.driver().is_visible(&self.error).await? {
            Ok(Some(session.driver().inner_text(&self.error).await?))
        } else {
            Ok(None)
        }
    }

    /// Whether the login control is visible (used to confirm logout)
    pub async fn is_login_button_visible(&self, session: &Session) -> HarnessResult<bool> {
        session.driver().is_visible(&self.login_button).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locators_follow_data_test_convention() {
        let page = LoginPage::new();
        assert_eq!(page.username.description(), "[data-test=\"username\"]");
        assert_eq!(page.login_button.description(), "[data-test=\"login-button\"]");
    }

    #[test]
    fn test_outcome_rejection_accessor() {
        let outcome = LoginOutcome::Rejected(LoginError::LockedOut);
        assert!(!outcome.is_logged_in());
        assert_eq!(outcome.rejection(), Some(LoginError::LockedOut));
        assert_eq!(LoginOutcome::LoggedIn.rejection(), None);
    }
}
