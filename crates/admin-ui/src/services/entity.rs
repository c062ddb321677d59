//! Generic record service
//!
//! Wraps a [`Repository`] so that every mutation made from a page is
//! recorded in the [`ActivityLog`] and traced, whether it succeeds or not.

use std::fmt;
use std::sync::Arc;

use hotelier_data::{DataResult, MemoryStore, Record, Repository};

use crate::models::{ActivityAction, ConsoleResult};
use crate::utils::ActivityLog;

pub struct EntityService<T: Record> {
    repository: Arc<dyn Repository<T>>,
    activity: ActivityLog,
}

impl<T: Record> Clone for EntityService<T> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            activity: self.activity.clone(),
        }
    }
}

impl<T: Record> fmt::Debug for EntityService<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityService").field("kind", &T::KIND).finish()
    }
}

impl<T: Record> EntityService<T> {
    pub fn new(repository: Arc<dyn Repository<T>>, activity: ActivityLog) -> Self {
        Self { repository, activity }
    }

    /// Service over an in-memory store seeded with `records`.
    pub fn in_memory(records: Vec<T>, activity: ActivityLog) -> Self {
        Self::new(Arc::new(MemoryStore::with_records(records)), activity)
    }

    /// All records, or an empty list when the store is unavailable.
    pub fn list(&self) -> Vec<T> {
        self.repository.list().unwrap_or_else(|err| {
            tracing::error!(kind = T::KIND, "failed to list records: {err}");
            Vec::new()
        })
    }

    pub fn get(&self, id: &str) -> ConsoleResult<T> {
        Ok(self.repository.get(id)?)
    }

    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.list().into_iter().find(|record| predicate(record))
    }

    pub fn count(&self) -> usize {
        self.repository.len().unwrap_or(0)
    }

    pub fn create(&self, record: T, actor: &str) -> ConsoleResult<T> {
        let result = self.repository.insert(record);
        let target = result.as_ref().map(|r| r.id().to_owned()).unwrap_or_default();
        self.audit(actor, ActivityAction::Create, &target, None, result)
    }

    pub fn update(&self, record: T, actor: &str) -> ConsoleResult<T> {
        let target = record.id().to_owned();
        let result = self.repository.update(record);
        self.audit(actor, ActivityAction::Update, &target, None, result)
    }

    pub fn delete(&self, id: &str, actor: &str) -> ConsoleResult<T> {
        let result = self.repository.remove(id);
        self.audit(actor, ActivityAction::Delete, id, None, result)
    }

    /// Applies `change` in place; the store keeps the old record when the
    /// change fails or leaves it invalid.
    pub fn change(
        &self,
        id: &str,
        actor: &str,
        action: ActivityAction,
        detail: Option<String>,
        mut change: impl FnMut(&mut T) -> DataResult<()>,
    ) -> ConsoleResult<T> {
        let result = self.repository.modify(id, &mut change);
        self.audit(actor, action, id, detail, result)
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    fn audit(
        &self,
        actor: &str,
        action: ActivityAction,
        target: &str,
        detail: Option<String>,
        result: DataResult<T>,
    ) -> ConsoleResult<T> {
        match result {
            Ok(record) => {
                tracing::info!(kind = T::KIND, id = record.id(), %action, "record changed");
                self.activity.log_success(actor, action, T::KIND, record.id(), detail);
                Ok(record)
            }
            Err(err) => {
                tracing::warn!(kind = T::KIND, id = target, %action, "record change rejected: {err}");
                self.activity.log_failure(actor, action, T::KIND, target, &err.to_string());
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use hotelier_data::{DataError, Hotel, HotelStatus};

    use super::*;
    use crate::models::ConsoleError;

    fn hotel(name: &str) -> Hotel {
        Hotel {
            id: String::new(),
            name: name.to_owned(),
            city: "杭州".to_owned(),
            address: "西湖区 1 号".to_owned(),
            star_rating: 4,
            phone: "0571-88888888".to_owned(),
            status: HotelStatus::Active,
        }
    }

    fn service() -> EntityService<Hotel> {
        EntityService::in_memory(Vec::new(), ActivityLog::default())
    }

    #[test]
    fn test_create_logs_activity() {
        let service = service();
        let created = service.create(hotel("湖畔酒店"), "admin").unwrap();

        assert!(created.id.starts_with("htl-"));
        assert_eq!(service.count(), 1);
        let entry = &service.activity().latest(1)[0];
        assert!(entry.success);
        assert_eq!(entry.action, ActivityAction::Create);
        assert_eq!(entry.target_id, created.id);
        assert_eq!(entry.target_type, "Hotel");
    }

    #[test]
    fn test_invalid_create_is_logged_as_failure() {
        let service = service();
        let err = service.create(hotel(""), "admin").unwrap_err();

        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert_eq!(service.count(), 0);
        let entry = &service.activity().latest(1)[0];
        assert!(!entry.success);
        assert!(entry.error_message.is_some());
    }

    #[test]
    fn test_change_rolls_back_failed_transition() {
        let service = service();
        let created = service.create(hotel("湖畔酒店"), "admin").unwrap();

        let err = service
            .change(&created.id, "admin", ActivityAction::StatusChange, None, |_| {
                Err(DataError::illegal_transition("Hotel", "active", "archived"))
            })
            .unwrap_err();
        assert!(matches!(err, ConsoleError::Data(DataError::IllegalTransition { .. })));

        let toggled = service
            .change(&created.id, "admin", ActivityAction::StatusChange, None, |h| {
                h.status = h.status.toggled();
                Ok(())
            })
            .unwrap();
        assert_eq!(toggled.status, HotelStatus::Inactive);
        assert_eq!(service.get(&created.id).unwrap().status, HotelStatus::Inactive);
    }

    #[test]
    fn test_delete_unknown_is_not_found() {
        let service = service();
        let err = service.delete("htl-missing", "admin").unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert_eq!(service.activity().latest(1)[0].target_id, "htl-missing");
    }
}
