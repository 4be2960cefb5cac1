//! User profiles (`users/{uid}`) and profile stats (`users/{uid}/stats`).

use ascend_core::error::DataError;
use ascend_core::model::{UserProfile, UserStats};
use ascend_core::store::Fields;
use chrono::NaiveDate;
use serde_json::Value;
use crate::Repository;
use crate::paths::{self, LAST_CHECK_IN, STATS};
use crate::record;

impl Repository {
    /// Create the user's node with a username and email.
    ///
    /// This is a full set, as at registration: anything already stored under
    /// `users/{uid}` is replaced. Use [`Repository::update_user`] to change
    /// profile fields of an existing user.
    pub async fn write_user(&self, uid: &str, username: &str, email: &str) -> Result<(), DataError> {
        let profile = UserProfile {
            username: username.to_string(),
            email: email.to_string(),
        };
        let value = record::encode(&profile)?;
        Ok(self.store().set(&paths::user(uid)?, value).await?)
    }

    /// The profile, or `None` if the user has never been written.
    pub async fn read_user(&self, uid: &str) -> Result<Option<UserProfile>, DataError> {
        let path = paths::user(uid)?;
        match self.store().get(&path).await? {
            Some(value) => record::decode(&path, value).map(Some),
            None => Ok(None),
        }
    }

    pub async fn update_user(&self, uid: &str, fields: Fields) -> Result<(), DataError> {
        self.merge(&paths::user(uid)?, fields).await
    }

    /// Delete the user and everything stored under them.
    pub async fn delete_user(&self, uid: &str) -> Result<(), DataError> {
        self.delete(&paths::user(uid)?).await
    }

    /// Profile stats; empty when none are stored.
    pub async fn read_stats(&self, uid: &str) -> Result<UserStats, DataError> {
        let path = paths::user_collection(uid, STATS)?;
        match self.store().get(&path).await? {
            Some(value) => record::decode(&path, value),
            None => Ok(UserStats::default()),
        }
    }

    pub async fn update_stats(&self, uid: &str, fields: Fields) -> Result<(), DataError> {
        self.merge(&paths::user_collection(uid, STATS)?, fields).await
    }

    /// The local date of the user's last daily check-in, if any.
    pub async fn read_last_check_in(&self, uid: &str) -> Result<Option<NaiveDate>, DataError> {
        let path = paths::user_collection(uid, STATS)?.child(LAST_CHECK_IN)?;
        Ok(match self.store().get(&path).await? {
            Some(Value::String(day)) => day.parse().ok(),
            _ => None,
        })
    }

    pub async fn record_check_in(&self, uid: &str, day: NaiveDate) -> Result<(), DataError> {
        let path = paths::user_collection(uid, STATS)?.child(LAST_CHECK_IN)?;
        Ok(self.store().set(&path, Value::String(day.to_string())).await?)
    }
}
