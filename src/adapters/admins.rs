//! Administrator set backed by configuration

use crate::adapters::traits::AdminDirectory;
use crate::domain::ids::UserId;
use std::collections::BTreeSet;
use std::sync::{PoisonError, RwLock};

/// Administrator directory holding an explicit set of user ids
///
/// Membership can change at runtime; every check reads the current set.
#[derive(Debug, Default)]
pub struct StaticAdmins {
    admins: RwLock<BTreeSet<UserId>>,
}

impl StaticAdmins {
    /// Create a directory from a list of user ids
    pub fn new(admins: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            admins: RwLock::new(admins.into_iter().collect()),
        }
    }

    // A set insert or remove cannot be left half done, so a poisoned lock
    // still guards a valid set.

    /// Grant administrator rights
    pub fn grant(&self, user_id: UserId) {
        self.admins
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user_id);
    }

    /// Revoke administrator rights
    pub fn revoke(&self, user_id: UserId) {
        self.admins
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&user_id);
    }
}

impl AdminDirectory for StaticAdmins {
    fn is_admin(&self, user_id: UserId) -> bool {
        self.admins
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&user_id)
    }
}
