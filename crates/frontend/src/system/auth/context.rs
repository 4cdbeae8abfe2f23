use contracts::system::auth::{SessionResponse, SignUpRequest, UserInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::api::{self, AuthApiError};
use super::listeners::{ListenerRegistry, Subscription};
use super::storage;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<UserInfo>,
}

impl AuthState {
    /// Tokens found in localStorage; the user is looked up afterwards.
    fn from_storage() -> Self {
        Self {
            access_token: storage::get_access_token(),
            refresh_token: storage::get_refresh_token(),
            user: None,
        }
    }

    fn from_session(session: SessionResponse) -> Self {
        Self {
            access_token: Some(session.access_token),
            refresh_token: Some(session.refresh_token),
            user: Some(session.user),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Reaction to the backend rejecting the current access token.
pub trait SessionExpiry {
    fn session_expired(&self);
}

/// Session shared with the whole tree by [`SessionProvider`].
#[derive(Clone)]
pub struct SessionContext {
    state: RwSignal<AuthState>,
    listeners: ListenerRegistry<AuthState>,
    /// Set while an expiry is being handled.
    renewing: Arc<AtomicBool>,
}

impl SessionContext {
    fn new(initial: AuthState) -> Self {
        Self {
            state: RwSignal::new(initial),
            listeners: ListenerRegistry::new(),
            renewing: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn state(&self) -> ReadSignal<AuthState> {
        self.state.read_only()
    }

    pub fn is_signed_in(&self) -> bool {
        self.state.with(AuthState::is_signed_in)
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.state.with(|s| s.user.clone())
    }

    /// Calls `listener` after every session change until the subscription is dropped.
    pub fn subscribe(
        &self,
        listener: impl Fn(&AuthState) + Send + Sync + 'static,
    ) -> Subscription {
        self.listeners.subscribe(listener)
    }

    fn replace(&self, next: AuthState) {
        self.state.try_set(next.clone());
        self.listeners.emit(&next);
    }

    pub async fn sign_in(&self, username: String, password: String) -> Result<(), AuthApiError> {
        let session = api::sign_in(username, password).await?;
        log::info!("signed in as {}", session.user.username);
        self.replace(AuthState::from_session(session));
        Ok(())
    }

    pub async fn sign_up(&self, request: SignUpRequest) -> Result<(), AuthApiError> {
        let session = api::sign_up(request).await?;
        log::info!("account {} created", session.user.username);
        self.replace(AuthState::from_session(session));
        Ok(())
    }

    /// Revokes the refresh token and forgets the session. A failed
    /// revocation still signs out locally.
    pub async fn sign_out(&self) {
        let refresh = self.state.with_untracked(|s| s.refresh_token.clone());
        if let Some(token) = refresh {
            if let Err(e) = api::sign_out(token).await {
                log::warn!("sign-out request failed: {}", e);
            }
        }
        self.replace(AuthState::default());
    }

    /// Validates the stored access token and falls back to a refresh.
    async fn restore(&self) {
        let current = self.state.get_untracked();
        if let Some(token) = &current.access_token {
            match api::get_session_user(token).await {
                Ok(user) => {
                    self.replace(AuthState {
                        user: Some(user),
                        ..current
                    });
                    return;
                }
                Err(e) => log::info!("stored access token rejected: {}", e),
            }
        }

        let Some(refresh) = current.refresh_token.clone() else {
            if current.is_signed_in() {
                self.replace(AuthState::default());
            }
            return;
        };
        if !self.refresh(refresh).await {
            self.replace(AuthState::default());
        }
    }

    /// Trades `refresh_token` for a new access token. `false` if the session is gone.
    async fn refresh(&self, refresh_token: String) -> bool {
        let access_token = match api::refresh_token(refresh_token.clone()).await {
            Ok(response) => response.access_token,
            Err(e) => {
                log::warn!("token refresh failed: {}", e);
                return false;
            }
        };
        match api::get_session_user(&access_token).await {
            Ok(user) => {
                self.replace(AuthState {
                    access_token: Some(access_token),
                    refresh_token: Some(refresh_token),
                    user: Some(user),
                });
                true
            }
            Err(e) => {
                log::warn!("session lookup after refresh failed: {}", e);
                false
            }
        }
    }
}

impl SessionExpiry for SessionContext {
    /// Tries one refresh; without a new access token the session is cleared
    /// and the route guard sends the browser to sign-in.
    fn session_expired(&self) {
        if self.renewing.swap(true, Ordering::SeqCst) {
            return;
        }
        let session = self.clone();
        spawn_local(async move {
            let refresh = session.state.with_untracked(|s| s.refresh_token.clone());
            let renewed = match refresh {
                Some(token) => session.refresh(token).await,
                None => false,
            };
            if !renewed {
                log::info!("session expired, signing out");
                session.replace(AuthState::default());
            }
            session.renewing.store(false, Ordering::SeqCst);
        });
    }
}

/// Hook to access the session
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionProvider not found in component tree")
}

/// Owns the session for its children and keeps localStorage in sync with it.
#[component]
pub fn SessionProvider(children: Children) -> impl IntoView {
    let session = SessionContext::new(AuthState::from_storage());

    let storage_sync = session.subscribe(|state| {
        match (&state.access_token, &state.refresh_token) {
            (Some(access), Some(refresh)) => storage::save_tokens(access, refresh),
            _ => storage::clear_tokens(),
        }
        match &state.user {
            Some(user) => log::debug!("session user: {}", user.username),
            None => log::debug!("session cleared"),
        }
    });
    on_cleanup(move || drop(storage_sync));

    provide_context(session.clone());

    spawn_local(async move {
        session.restore().await;
    });

    children()
}
