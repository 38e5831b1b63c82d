//! Session identity and auth-state bridging
//!
//! The store never talks to an identity provider. It is handed an opaque
//! [`Session`] at construction and stamps its `user_id` onto everything it
//! authors. Bridging the provider's asynchronous sign-in/sign-out stream
//! into sessions is the surrounding application's job, via [`AuthBridge`].

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::board::Member;

/// Opaque current-user identity supplied by the caller context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Identity-provider user id
    pub user_id: String,

    /// Display name, when the provider exposes one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Avatar URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Session {
    /// Session with an id only
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: None,
            avatar: None,
        }
    }

    /// Session with profile data from the provider
    pub fn with_profile(
        user_id: impl Into<String>,
        name: Option<String>,
        avatar: Option<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            name,
            avatar,
        }
    }

    /// Project this identity into a board member
    pub fn member(&self) -> Member {
        Member {
            id: self.user_id.clone(),
            name: self.name.clone().unwrap_or_else(|| self.user_id.clone()),
            avatar: self.avatar.clone(),
        }
    }
}

/// Authentication state as reported by the external provider
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthState {
    #[default]
    SignedOut,
    SignedIn(Session),
}

impl AuthState {
    /// Current session, if signed in
    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::SignedOut => None,
            AuthState::SignedIn(session) => Some(session),
        }
    }
}

/// Subscription bridge between an identity provider's state-change stream
/// and the rest of the application
///
/// The provider adapter pushes transitions; any number of consumers
/// subscribe and observe the latest state. Dropping the bridge ends the
/// stream for all subscribers.
pub struct AuthBridge {
    tx: watch::Sender<AuthState>,
}

impl AuthBridge {
    /// New bridge, starting signed out
    pub fn new() -> Self {
        let (tx, _) = watch::channel(AuthState::SignedOut);
        Self { tx }
    }

    /// Record a sign-in reported by the provider
    pub fn signed_in(&self, session: Session) {
        self.tx.send_replace(AuthState::SignedIn(session));
    }

    /// Record a sign-out reported by the provider
    pub fn signed_out(&self) {
        self.tx.send_replace(AuthState::SignedOut);
    }

    /// Latest observed state
    pub fn current(&self) -> AuthState {
        self.tx.borrow().clone()
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.tx.subscribe()
    }
}

impl Default for AuthBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_falls_back_to_user_id() {
        let anon = Session::new("u-1");
        assert_eq!(anon.member().name, "u-1");

        let named = Session::with_profile("u-2", Some("Anika".into()), None);
        assert_eq!(named.member().name, "Anika");
        assert_eq!(named.member().id, "u-2");
    }

    #[tokio::test]
    async fn test_bridge_transitions() {
        let bridge = AuthBridge::new();
        let mut rx = bridge.subscribe();
        assert_eq!(bridge.current(), AuthState::SignedOut);

        bridge.signed_in(Session::new("u-1"));
        rx.changed().await.unwrap();
        assert_eq!(
            rx.borrow().session().map(|s| s.user_id.clone()),
            Some("u-1".to_string())
        );

        bridge.signed_out();
        rx.changed().await.unwrap();
        assert!(rx.borrow().session().is_none());
    }
}
