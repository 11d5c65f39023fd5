//! Operator authentication.
//!
//! The operator shares one password. [`OperatorGate`] exchanges it for an
//! [`OperatorSession`], and every operator operation on the
//! [`CatalogClient`](crate::clients::CatalogClient) takes `&OperatorSession`.
//! A session can only be obtained through the gate.

use crate::clock::Clock;
use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No operator password is configured.
    #[error("Operator login is disabled")]
    Disabled,

    #[error("Invalid password")]
    InvalidPassword,
}

/// Proof that the caller logged in as the operator.
#[derive(Debug, Clone)]
pub struct OperatorSession {
    authenticated_at: NaiveDateTime,
}

impl OperatorSession {
    pub fn authenticated_at(&self) -> NaiveDateTime {
        self.authenticated_at
    }
}

/// Checks operator passwords against the configured secret.
#[derive(Clone)]
pub struct OperatorGate {
    secret: Option<String>,
}

impl std::fmt::Debug for OperatorGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorGate")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl OperatorGate {
    /// An empty secret disables operator login entirely.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        Self {
            secret: (!secret.is_empty()).then_some(secret),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.secret.is_some()
    }

    pub fn login(&self, password: &str, clock: &dyn Clock) -> Result<OperatorSession, AuthError> {
        let Some(secret) = &self.secret else {
            warn!("Operator login attempted but no password is configured");
            return Err(AuthError::Disabled);
        };
        if !constant_time_eq(secret.as_bytes(), password.as_bytes()) {
            warn!("Operator login rejected");
            return Err(AuthError::InvalidPassword);
        }
        let session = OperatorSession {
            authenticated_at: clock.now(),
        };
        info!(authenticated_at = %session.authenticated_at, "Operator logged in");
        Ok(session)
    }
}

/// Compares every byte regardless of where the first difference is.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let len = a.len().max(b.len());
    let mut diff = a.len() ^ b.len();
    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        diff |= usize::from(x ^ y);
    }
    diff == 0
}
