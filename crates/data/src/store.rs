//! Store abstraction for console records
//!
//! Pages never own their collections. They receive a [`Repository`] per
//! record type so that the in-memory [`MemoryStore`] can later be swapped
//! for a persistent backend without touching rendering code.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{DataError, DataResult};
use crate::record::{Record, new_id};

pub trait Repository<T: Record>: Send + Sync {
    /// All records in insertion order.
    fn list(&self) -> DataResult<Vec<T>>;

    fn get(&self, id: &str) -> DataResult<T>;

    /// Validates and appends a record, generating an id when it has none.
    fn insert(&self, record: T) -> DataResult<T>;

    /// Validates and replaces the record with the same id, keeping its position.
    fn update(&self, record: T) -> DataResult<T>;

    fn remove(&self, id: &str) -> DataResult<T>;

    /// Applies `change` to a copy of the record and stores it if it still validates.
    fn modify(&self, id: &str, change: &mut dyn FnMut(&mut T) -> DataResult<()>) -> DataResult<T>;

    fn len(&self) -> DataResult<usize> {
        self.list().map(|records| records.len())
    }

    fn is_empty(&self) -> DataResult<bool> {
        self.len().map(|len| len == 0)
    }
}

/// `Vec`-backed store shared by cloning.
#[derive(Debug)]
pub struct MemoryStore<T> {
    records: Arc<RwLock<Vec<T>>>,
}

impl<T> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Store pre-filled with `records`; records without an id get one.
    pub fn with_records(records: Vec<T>) -> Self {
        let records = records
            .into_iter()
            .map(|mut record| {
                if record.id().is_empty() {
                    record.set_id(new_id(T::ID_PREFIX));
                }
                record
            })
            .collect();
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    fn read(&self) -> DataResult<RwLockReadGuard<'_, Vec<T>>> {
        self.records
            .read()
            .map_err(|_| DataError::Poisoned { kind: T::KIND })
    }

    fn write(&self) -> DataResult<RwLockWriteGuard<'_, Vec<T>>> {
        self.records
            .write()
            .map_err(|_| DataError::Poisoned { kind: T::KIND })
    }

    fn ensure_valid(record: &T) -> DataResult<()> {
        let result = record.validate();
        if result.is_valid() {
            Ok(())
        } else {
            Err(DataError::Invalid { kind: T::KIND, result })
        }
    }
}

impl<T: Record> Repository<T> for MemoryStore<T> {
    fn list(&self) -> DataResult<Vec<T>> {
        Ok(self.read()?.clone())
    }

    fn get(&self, id: &str) -> DataResult<T> {
        self.read()?
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .ok_or_else(|| DataError::not_found(T::KIND, id))
    }

    fn insert(&self, mut record: T) -> DataResult<T> {
        if record.id().is_empty() {
            record.set_id(new_id(T::ID_PREFIX));
        }
        Self::ensure_valid(&record)?;

        let mut records = self.write()?;
        if records.iter().any(|existing| existing.id() == record.id()) {
            return Err(DataError::Duplicate {
                kind: T::KIND,
                id: record.id().to_owned(),
            });
        }
        records.push(record.clone());
        tracing::debug!(kind = T::KIND, id = record.id(), "record inserted");
        Ok(record)
    }

    fn update(&self, record: T) -> DataResult<T> {
        Self::ensure_valid(&record)?;

        let mut records = self.write()?;
        let slot = records
            .iter_mut()
            .find(|existing| existing.id() == record.id())
            .ok_or_else(|| DataError::not_found(T::KIND, record.id()))?;
        *slot = record.clone();
        tracing::debug!(kind = T::KIND, id = record.id(), "record updated");
        Ok(record)
    }

    fn remove(&self, id: &str) -> DataResult<T> {
        let mut records = self.write()?;
        let index = records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| DataError::not_found(T::KIND, id))?;
        tracing::debug!(kind = T::KIND, id, "record removed");
        Ok(records.remove(index))
    }

    fn modify(&self, id: &str, change: &mut dyn FnMut(&mut T) -> DataResult<()>) -> DataResult<T> {
        let mut records = self.write()?;
        let slot = records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| DataError::not_found(T::KIND, id))?;

        let mut draft = slot.clone();
        change(&mut draft)?;
        Self::ensure_valid(&draft)?;
        *slot = draft.clone();
        Ok(draft)
    }

    fn len(&self) -> DataResult<usize> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{FieldError, ValidationResult};

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: String,
        text: String,
    }

    impl Note {
        fn new(text: &str) -> Self {
            Self {
                id: String::new(),
                text: text.to_owned(),
            }
        }
    }

    impl Record for Note {
        const KIND: &'static str = "Note";
        const ID_PREFIX: &'static str = "note";

        fn id(&self) -> &str {
            &self.id
        }

        fn set_id(&mut self, id: String) {
            self.id = id;
        }

        fn validate(&self) -> ValidationResult {
            let mut result = ValidationResult::success();
            result.check(!self.text.is_empty(), || FieldError::required("text"));
            result
        }
    }

    #[test]
    fn test_insert_assigns_id_and_appends() {
        let store = MemoryStore::new();
        let first = store.insert(Note::new("first")).unwrap();
        let second = store.insert(Note::new("second")).unwrap();

        assert!(first.id.starts_with("note-"));
        assert_ne!(first.id, second.id);
        let texts: Vec<String> = store.list().unwrap().into_iter().map(|n| n.text).collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn test_insert_rejects_invalid_and_duplicate() {
        let store = MemoryStore::new();
        let err = store.insert(Note::new("")).unwrap_err();
        assert_eq!(err.validation().unwrap().error_for("text"), Some("Field 'text' is required"));

        let note = store.insert(Note::new("once")).unwrap();
        let err = store.insert(note.clone()).unwrap_err();
        assert_eq!(
            err,
            DataError::Duplicate {
                kind: "Note",
                id: note.id
            }
        );
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_update_keeps_position() {
        let store = MemoryStore::with_records(vec![Note::new("a"), Note::new("b"), Note::new("c")]);
        let mut middle = store.list().unwrap()[1].clone();
        middle.text = "B".to_owned();
        store.update(middle).unwrap();

        let texts: Vec<String> = store.list().unwrap().into_iter().map(|n| n.text).collect();
        assert_eq!(texts, vec!["a", "B", "c"]);
    }

    #[test]
    fn test_update_and_remove_unknown_id() {
        let store: MemoryStore<Note> = MemoryStore::new();
        let mut ghost = Note::new("ghost");
        ghost.id = "note-missing".to_owned();

        assert!(matches!(store.update(ghost).unwrap_err(), DataError::NotFound { .. }));
        assert!(matches!(store.remove("note-missing").unwrap_err(), DataError::NotFound { .. }));
        assert!(matches!(store.get("note-missing").unwrap_err(), DataError::NotFound { .. }));
    }

    #[test]
    fn test_modify_rolls_back_invalid_change() {
        let store = MemoryStore::with_records(vec![Note::new("keep")]);
        let id = store.list().unwrap()[0].id.clone();

        let err = store
            .modify(&id, &mut |note| {
                note.text.clear();
                Ok(())
            })
            .unwrap_err();
        assert!(err.validation().is_some());
        assert_eq!(store.get(&id).unwrap().text, "keep");

        let changed = store
            .modify(&id, &mut |note| {
                note.text.push('!');
                Ok(())
            })
            .unwrap();
        assert_eq!(changed.text, "keep!");
        assert_eq!(store.get(&id).unwrap().text, "keep!");
    }

    #[test]
    fn test_clones_share_records() {
        let store = MemoryStore::new();
        let shared = store.clone();
        let note = store.insert(Note::new("shared")).unwrap();

        assert_eq!(shared.get(&note.id).unwrap(), note);
        shared.remove(&note.id).unwrap();
        assert!(store.is_empty().unwrap());
    }
}
