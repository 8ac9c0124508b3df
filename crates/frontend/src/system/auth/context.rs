use leptos::prelude::*;

use super::provider::{AuthError, SessionUser};
use super::session::SessionContext;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<SessionUser>,
}

/// Reactive view of the session for components
#[derive(Clone, Copy)]
pub struct AuthContext {
    state: RwSignal<AuthState>,
    session: StoredValue<SessionContext, LocalStorage>,
}

impl AuthContext {
    pub fn user(&self) -> Option<SessionUser> {
        self.state.with(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(|s| s.user.is_some())
    }

    pub async fn sign_in(&self, email: String, password: String) -> Result<(), AuthError> {
        let session = self.session.get_value();
        let user = session.sign_in(&email, &password).await?;
        self.state.set(AuthState { user: Some(user) });
        Ok(())
    }

    /// The session-end listener clears the state
    pub fn sign_out(&self) {
        self.session.get_value().sign_out();
    }
}

/// Keeps `state` empty once the session ends, including when the identity
/// provider rejects it mid-request
fn bind_session(session: &SessionContext, state: RwSignal<AuthState>) {
    session.on_session_end(move || state.set(AuthState::default()));
}

/// Initializes `session` and exposes it to the component tree
#[component]
pub fn AuthProvider(session: SessionContext, children: Children) -> impl IntoView {
    let user = session.initialize();
    let state = RwSignal::new(AuthState { user });
    bind_session(&session, state);

    provide_context(AuthContext {
        state,
        session: StoredValue::new_local(session),
    });

    children()
}

/// Hook to access auth state
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthProvider not found in component tree")
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::testing::{sample_user, StubIdentity};

    fn bound(identity: StubIdentity) -> (Owner, SessionContext, RwSignal<AuthState>) {
        let owner = Owner::new();
        owner.set();
        let session = SessionContext::new(Rc::new(identity));
        let state = RwSignal::new(AuthState {
            user: session.initialize(),
        });
        bind_session(&session, state);
        (owner, session, state)
    }

    #[test]
    fn test_sign_out_clears_state() {
        let (_owner, session, state) = bound(StubIdentity::signed_in(sample_user(), "t"));
        assert_eq!(state.get_untracked().user, Some(sample_user()));

        session.sign_out();

        assert_eq!(state.get_untracked(), AuthState::default());
    }

    #[tokio::test]
    async fn test_expired_session_clears_state() {
        let (_owner, session, state) =
            bound(StubIdentity::failing(sample_user(), AuthError::SessionExpired));

        let _ = session.id_token(&sample_user()).await;

        assert_eq!(state.get_untracked().user, None);
    }
}
