//! The live session: one per process, explicitly constructed and shared.
//!
//! ```text
//! Uninitialized ──initialize──▶ Loading ──▶ Authenticated | Anonymous
//!                     Authenticated ──logout / expiry──▶ Anonymous
//! ```
//!
//! `initialize`, `login` and `logout` are the only writers. Consumers read
//! point-in-time [`SessionSnapshot`]s, which may be stale as soon as the next
//! login or logout happens.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use quill_core::{Identity, OwnedResource};
use serde::Serialize;

use crate::claims::ClaimSet;
use crate::codec::{self, DecodeError};
use crate::credential::Credential;
use crate::error::AuthError;
use crate::policy::{self, AccessDecision};
use crate::token_store::TokenStore;

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Uninitialized,
    Loading,
    Authenticated,
    Anonymous,
}

impl SessionPhase {
    /// Whether authorization answers derived from this phase are final.
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        matches!(self, Self::Authenticated | Self::Anonymous)
    }
}

/// Why a previously held token was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Eviction {
    Expired,
    Malformed,
}

impl From<&DecodeError> for Eviction {
    fn from(error: &DecodeError) -> Self {
        match error {
            DecodeError::Expired { .. } => Self::Expired,
            DecodeError::Malformed { .. } => Self::Malformed,
        }
    }
}

/// Read-only view of the session handed to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub is_authenticated: bool,
    pub is_admin: bool,
    pub identity: Option<Identity>,
    pub expires_at: Option<DateTime<Utc>>,
    /// Set when the last token was dropped at load or on expiry; cleared by
    /// login and logout.
    pub last_eviction: Option<Eviction>,
}

impl SessionSnapshot {
    /// Decide whether this session may mutate `resource`.
    ///
    /// `Undetermined` until the manager has finished initializing.
    #[must_use]
    pub fn authorize<R: OwnedResource + ?Sized>(&self, resource: &R) -> AccessDecision {
        if !self.phase.is_resolved() {
            return AccessDecision::Undetermined;
        }
        AccessDecision::from(policy::can_mutate(
            self.identity.as_ref(),
            resource.author_username(),
            self.is_admin,
        ))
    }
}

/// Credential and identity always travel together.
#[derive(Debug)]
struct ActiveSession {
    credential: Credential,
    claims: ClaimSet,
    identity: Identity,
}

impl ActiveSession {
    fn new(credential: Credential, claims: ClaimSet) -> Self {
        let identity = claims.to_identity();
        Self {
            credential,
            claims,
            identity,
        }
    }
}

#[derive(Debug)]
struct SessionState {
    phase: SessionPhase,
    active: Option<ActiveSession>,
    last_eviction: Option<Eviction>,
}

impl SessionState {
    fn snapshot(&self) -> SessionSnapshot {
        let identity = self.active.as_ref().map(|a| a.identity.clone());
        SessionSnapshot {
            phase: self.phase,
            is_authenticated: self.active.is_some(),
            is_admin: identity.as_ref().is_some_and(Identity::is_admin),
            identity,
            expires_at: self.active.as_ref().and_then(|a| a.claims.expires_at),
            last_eviction: self.last_eviction,
        }
    }

    fn anonymize(&mut self, eviction: Option<Eviction>) {
        self.active = None;
        self.phase = SessionPhase::Anonymous;
        self.last_eviction = eviction;
    }
}

pub struct SessionManager {
    store: Box<dyn TokenStore>,
    state: RwLock<SessionState>,
    clock: Clock,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("store", &self.store.name())
            .field("state", &self.read_state())
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    #[must_use]
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self::with_clock(store, Utc::now)
    }

    /// Build a manager whose expiry checks use `clock` instead of the wall clock.
    #[must_use]
    pub fn with_clock(
        store: impl TokenStore + 'static,
        clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static,
    ) -> Self {
        Self {
            store: Box::new(store),
            state: RwLock::new(SessionState {
                phase: SessionPhase::Uninitialized,
                active: None,
                last_eviction: None,
            }),
            clock: Box::new(clock),
        }
    }

    #[must_use]
    pub fn store(&self) -> &dyn TokenStore {
        self.store.as_ref()
    }

    /// Restore the persisted session, once.
    ///
    /// Never fails: a missing, expired or unreadable token all resolve to
    /// `Anonymous`, and a bad token is purged from the store. Later calls
    /// return the current snapshot without touching the store.
    pub fn initialize(&self) -> SessionSnapshot {
        {
            let mut state = self.write_state();
            if state.phase != SessionPhase::Uninitialized {
                return state.snapshot();
            }
            state.phase = SessionPhase::Loading;
        }

        let persisted = self.store.load();

        let mut state = self.write_state();
        if state.phase != SessionPhase::Loading {
            // A login or logout landed while the store was being read; it wins.
            return state.snapshot();
        }

        match persisted {
            None => {
                tracing::debug!("no persisted session");
                state.anonymize(None);
            }
            Some(token) => {
                let credential = Credential::new(token);
                match codec::decode_at(credential.expose(), (self.clock)()) {
                    Ok(claims) => {
                        tracing::debug!(user = %claims.subject, "restored persisted session");
                        state.active = Some(ActiveSession::new(credential, claims));
                        state.phase = SessionPhase::Authenticated;
                        state.last_eviction = None;
                    }
                    Err(error) => {
                        self.purge(&error);
                        state.anonymize(Some(Eviction::from(&error)));
                    }
                }
            }
        }

        state.snapshot()
    }

    /// Adopt `token` as the session credential.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Decode` if the token is malformed or expired, and
    /// `AuthError::TokenStoreError` if it cannot be persisted. In both cases
    /// neither the store nor the in-memory session is changed.
    pub fn login(&self, token: impl Into<String>) -> Result<SessionSnapshot, AuthError> {
        let credential = Credential::new(token);
        let claims = codec::decode_at(credential.expose(), (self.clock)())?;

        let mut state = self.write_state();
        self.store.store(credential.expose())?;
        tracing::debug!(user = %claims.subject, "logged in");
        state.active = Some(ActiveSession::new(credential, claims));
        state.phase = SessionPhase::Authenticated;
        state.last_eviction = None;
        Ok(state.snapshot())
    }

    /// Drop the session from memory and from the store. Cannot fail; a store
    /// error is logged and the in-memory session is still cleared.
    pub fn logout(&self) -> SessionSnapshot {
        let mut state = self.write_state();
        if let Err(error) = self.store.clear() {
            tracing::warn!(%error, "failed to clear persisted session");
        }
        state.anonymize(None);
        tracing::debug!("logged out");
        state.snapshot()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.read_state().snapshot()
    }

    /// The credential to use right now.
    ///
    /// Re-resolved on every call. A session whose token has expired since it
    /// was adopted is evicted here, so the caller gets `None`.
    #[must_use]
    pub fn credential(&self) -> Option<Credential> {
        let now = (self.clock)();
        {
            let state = self.read_state();
            let active = state.active.as_ref()?;
            if !active.claims.is_expired_at(now) {
                return Some(active.credential.clone());
            }
        }

        let mut state = self.write_state();
        let still_expired = state
            .active
            .as_ref()
            .is_some_and(|active| active.claims.is_expired_at(now));
        if still_expired {
            tracing::info!("session token expired; logging out");
            if let Err(error) = self.store.clear() {
                tracing::warn!(%error, "failed to purge expired session");
            }
            state.anonymize(Some(Eviction::Expired));
            return None;
        }
        // Replaced by a fresh login between the two locks.
        state.active.as_ref().map(|a| a.credential.clone())
    }

    fn purge(&self, error: &DecodeError) {
        match error {
            DecodeError::Expired { expired_at } => {
                tracing::info!(expired_at = %expired_at, "persisted session expired; purging");
            }
            DecodeError::Malformed { reason } => {
                tracing::warn!(%reason, "persisted session token unreadable; purging");
            }
        }
        if let Err(error) = self.store.clear() {
            tracing::warn!(%error, "failed to purge persisted session");
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
