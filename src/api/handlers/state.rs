//! Per-process handler state.

use super::{AuthError, Operation};
use crate::store::{StoreClient, User};
use tracing::warn;

/// What a failed store lookup means to signup.
///
/// Login always surfaces a failed lookup as a 500 so an outage is never
/// reported as a credential rejection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LookupPolicy {
    /// Surface the failure as a 500.
    #[default]
    Strict,
    /// Signup treats the failure as "no record" and proceeds to the write.
    Lenient,
}

#[derive(Debug, Clone)]
pub struct AppState {
    store: StoreClient,
    lookup: LookupPolicy,
}

impl AppState {
    #[must_use]
    pub fn new(store: StoreClient, lookup: LookupPolicy) -> Self {
        Self { store, lookup }
    }

    #[must_use]
    pub fn store(&self) -> &StoreClient {
        &self.store
    }

    #[must_use]
    pub fn lookup_policy(&self) -> LookupPolicy {
        self.lookup
    }

    /// Look up the record for `key` on behalf of `operation`.
    ///
    /// # Errors
    /// Returns a store error when the lookup fails, unless `operation` is
    /// signup under [`LookupPolicy::Lenient`].
    pub async fn find_user(
        &self,
        operation: Operation,
        key: &str,
    ) -> Result<Option<User>, AuthError> {
        match self.store.get(key).await {
            Ok(user) => Ok(user),
            Err(err) => match (operation, self.lookup) {
                (Operation::Login, _) | (_, LookupPolicy::Strict) => Err(err.into()),
                (Operation::Signup, LookupPolicy::Lenient) => {
                    warn!("Store lookup failed, treating {} as absent: {}", key, err);

                    Ok(None)
                }
            },
        }
    }
}
