pub mod context;
pub mod firebase;
pub mod guard;
pub mod provider;
pub mod session;
pub mod storage;

pub use context::{use_auth, AuthContext, AuthProvider, AuthState};
pub use guard::RequireAuth;
pub use provider::{AuthError, IdentityProvider, SessionUser};
pub use session::{SessionContext, SessionPhase};
