/// Route guard for the protected subtree
use crate::auth::{AuthState, AuthStore};
use crate::notices::{Notice, NoticeBoard};
use serde::Serialize;
use tracing::{debug, info};

pub const LOGIN_PATH: &str = "/login";

/// Where a successful login lands; the remembered `from` path is not consulted
pub const HOME_PATH: &str = "/launches";

/// Navigation state attached to a redirect
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectState {
    pub from: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect { to: &'static str, state: RedirectState },
    /// A logout redirect is already underway: render nothing
    Suppress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardOutcome {
    pub decision: GuardDecision,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard;

impl RouteGuard {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, auth: AuthState, requested_path: &str) -> GuardOutcome {
        if auth.is_authenticated {
            return GuardOutcome {
                decision: GuardDecision::Allow,
                notice: None,
            };
        }

        if auth.logout_initiated {
            debug!("Suppressing guard redirect for {} during logout", requested_path);
            return GuardOutcome {
                decision: GuardDecision::Suppress,
                notice: None,
            };
        }

        GuardOutcome {
            decision: GuardDecision::Redirect {
                to: LOGIN_PATH,
                state: RedirectState {
                    from: requested_path.to_string(),
                },
            },
            notice: Some(Notice::access_denied()),
        }
    }

    /// Evaluate against the live auth state and post any notice
    pub fn check(
        &self,
        auth: &AuthStore,
        notices: &NoticeBoard,
        requested_path: &str,
    ) -> GuardDecision {
        let outcome = self.evaluate(auth.snapshot(), requested_path);
        if let Some(notice) = outcome.notice {
            info!("Access denied to {}, redirecting to {}", requested_path, LOGIN_PATH);
            notices.push(notice);
        }
        outcome.decision
    }
}
