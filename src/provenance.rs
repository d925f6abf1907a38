//! Build-provenance fields
//!
//! Every generated header records when it was built and by whom. These two
//! entries are injected after all merging and replace any same-named entry
//! from config files or the command line.

use crate::config::ProvenanceConfig;
use crate::params::ParamDict;
use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

/// Environment variables consulted for the user name, in order.
const USER_ENV_VARS: [&str; 4] = ["LOGNAME", "USER", "LNAME", "USERNAME"];

/// Fallback when neither the environment nor the account database names a user.
pub const UNKNOWN_USER: &str = "unknown";

/// Build timestamp and user captured for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    /// Milliseconds since the Unix epoch (UTC)
    pub timestamp_ms: u128,
    /// Invoking user name
    pub user: String,
}

impl Provenance {
    /// Capture the current time and user.
    pub fn capture() -> Self {
        Self { timestamp_ms: now_millis(SystemTime::now()), user: current_user() }
    }

    /// Write both fields into `params`, moving them to the end.
    pub fn inject(&self, params: &mut ParamDict, keys: &ProvenanceConfig) {
        params.insert_last(keys.date_key.as_str(), self.timestamp_ms.to_string());
        params.insert_last(keys.user_key.as_str(), self.user.as_str());
    }
}

fn now_millis(time: SystemTime) -> u128 {
    time.duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

/// Look up the invoking user.
///
/// `LOGNAME`, `USER`, `LNAME` and `USERNAME` are checked in that order. When
/// none holds a non-empty value, the account database is asked for the name
/// of the current process owner. Returns [`UNKNOWN_USER`] only if that lookup
/// fails as well.
pub fn current_user() -> String {
    resolve_user(|var| env::var(var).ok(), account_user)
}

fn account_user() -> Option<String> {
    match whoami::fallible::username() {
        Ok(user) => Some(user),
        Err(err) => {
            tracing::debug!("account database lookup failed: {}", err);
            None
        }
    }
}

fn resolve_user<E, A>(env_lookup: E, account_lookup: A) -> String
where
    E: Fn(&str) -> Option<String>,
    A: FnOnce() -> Option<String>,
{
    let from_env = USER_ENV_VARS.iter().find_map(|var| env_lookup(var).filter(|u| !u.is_empty()));
    if let Some(user) = from_env {
        return user;
    }

    if let Some(user) = account_lookup().filter(|u| !u.is_empty()) {
        tracing::debug!("no user name in environment; using account name '{}'", user);
        return user;
    }

    tracing::warn!("no user name found; recording '{}'", UNKNOWN_USER);
    UNKNOWN_USER.to_string()
}
