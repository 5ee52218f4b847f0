// Session context - the bearer token shared by outgoing backend requests
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session has been signed out")]
    Invalidated,
}

#[derive(Debug)]
enum SessionState {
    Active(Option<String>),
    Invalidated,
}

/// Injected into every client that talks to the backend. Logout
/// invalidates it instead of clearing ambient storage.
#[derive(Debug)]
pub struct Session {
    state: RwLock<SessionState>,
}

impl Session {
    pub fn new(token: Option<String>) -> Self {
        Self {
            state: RwLock::new(SessionState::Active(token)),
        }
    }

    pub async fn sign_in(&self, token: String) {
        *self.state.write().await = SessionState::Active(Some(token));
    }

    pub async fn invalidate(&self) {
        *self.state.write().await = SessionState::Invalidated;
        tracing::info!("session invalidated");
    }

    pub async fn is_active(&self) -> bool {
        matches!(*self.state.read().await, SessionState::Active(_))
    }

    /// Token to attach, if any. Fails once the session is invalidated.
    pub async fn bearer(&self) -> Result<Option<String>, SessionError> {
        match &*self.state.read().await {
            SessionState::Active(token) => Ok(token.clone()),
            SessionState::Invalidated => Err(SessionError::Invalidated),
        }
    }
}
