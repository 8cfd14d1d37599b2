use crate::db::{Store, StoreError, User};

/// Login state for one interactive flow, owned by the controller that drives
/// it. Initialized on login, cleared on logout; no process-wide state.
#[derive(Debug, Default)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    #[must_use]
    pub const fn new() -> Self {
        Self { user: None }
    }

    /// Authenticate and bind the session to the matched user. Returns the
    /// user on success; leaves the session cleared on a failed match.
    pub async fn login(
        &mut self,
        store: &Store,
        username: &str,
        password: &str,
    ) -> Result<Option<&User>, StoreError> {
        self.user = store.login_user(username, password).await?;
        Ok(self.user.as_ref())
    }

    pub fn logout(&mut self) {
        self.user = None;
    }

    #[must_use]
    pub fn current(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
