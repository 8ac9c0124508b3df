use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use super::provider::{AuthError, IdentityProvider, SessionUser};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Constructed, persisted session not yet restored
    Created,
    Active,
    /// Torn down by sign-out; a new sign-in makes it active again
    Closed,
}

/// Process-wide session, created once at application start and handed
/// explicitly to whoever needs it (the API client, the auth UI).
///
/// Clones share the same provider, phase and listeners.
#[derive(Clone)]
pub struct SessionContext {
    provider: Rc<dyn IdentityProvider>,
    phase: Rc<Cell<SessionPhase>>,
    on_end: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl SessionContext {
    pub fn new(provider: Rc<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            phase: Rc::new(Cell::new(SessionPhase::Created)),
            on_end: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Runs `listener` whenever the session ends, by sign-out or because the
    /// provider no longer accepts it
    pub fn on_session_end(&self, listener: impl Fn() + 'static) {
        self.on_end.borrow_mut().push(Rc::new(listener));
    }

    fn end(&self) {
        self.provider.sign_out();
        self.phase.set(SessionPhase::Closed);
        let listeners = self.on_end.borrow().clone();
        for listener in listeners {
            listener();
        }
    }

    /// Restores the persisted session on first call; later calls only
    /// report the current user
    pub fn initialize(&self) -> Option<SessionUser> {
        if self.phase.get() != SessionPhase::Created {
            return self.current_user();
        }

        self.phase.set(SessionPhase::Active);
        let user = self.provider.restore();
        match &user {
            Some(user) => log::info!("Restored session for {}", user.uid),
            None => log::debug!("No persisted session"),
        }
        user
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase.get()
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        match self.phase.get() {
            SessionPhase::Closed => None,
            _ => self.provider.current_user(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    pub async fn id_token(&self, user: &SessionUser) -> Result<String, AuthError> {
        if self.phase.get() == SessionPhase::Closed {
            return Err(AuthError::NoSession);
        }
        match self.provider.id_token(user).await {
            Err(e @ (AuthError::SessionExpired | AuthError::UserDisabled)) => {
                log::warn!("Session ended by the identity provider: {}", e);
                self.end();
                Err(e)
            }
            result => result,
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SessionUser, AuthError> {
        let user = self.provider.sign_in(email, password).await?;
        self.phase.set(SessionPhase::Active);
        log::info!("Signed in as {}", user.uid);
        Ok(user)
    }

    pub fn sign_out(&self) {
        self.end();
        log::info!("Signed out");
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("phase", &self.phase.get())
            .finish_non_exhaustive()
    }
}
