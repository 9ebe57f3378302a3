use std::cell::RefCell;
use std::collections::HashMap;

use crate::{CorruptState, Gallery, ImageRef, StorageError};

pub const GALLERY_STORAGE_KEY: &str = "popcorn-saga.gallery";

/// Synchronous string key-value storage scoped to this client.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn delete(&self, key: &str);
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::rc::Rc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) {
        (**self).delete(key)
    }
}

/// In-memory store, mainly for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail.
    pub fn read_only() -> Self {
        Self {
            items: RefCell::new(HashMap::new()),
            read_only: true,
        }
    }

    pub fn with_item(self, key: &str, value: &str) -> Self {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Write("store is read-only".to_string()));
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// What startup found under [`GALLERY_STORAGE_KEY`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryLoad {
    Empty,
    Restored(Gallery),
    /// The stored value was corrupt and has been deleted.
    Discarded(CorruptState),
}

impl GalleryLoad {
    pub fn into_gallery(self) -> Gallery {
        match self {
            GalleryLoad::Restored(gallery) => gallery,
            GalleryLoad::Empty | GalleryLoad::Discarded(_) => Gallery::new(),
        }
    }
}

fn parse_gallery(raw: &str) -> Result<Gallery, CorruptState> {
    let entries: Vec<ImageRef> = serde_json::from_str(raw).map_err(|err| CorruptState {
        reason: err.to_string(),
    })?;
    Ok(Gallery::from_entries(entries))
}

pub fn load_gallery<S: KeyValueStore + ?Sized>(store: &S) -> GalleryLoad {
    let Some(raw) = store.get(GALLERY_STORAGE_KEY) else {
        return GalleryLoad::Empty;
    };
    match parse_gallery(&raw) {
        Ok(gallery) if gallery.is_empty() => GalleryLoad::Empty,
        Ok(gallery) => GalleryLoad::Restored(gallery),
        Err(corrupt) => {
            store.delete(GALLERY_STORAGE_KEY);
            GalleryLoad::Discarded(corrupt)
        }
    }
}

pub fn save_gallery<S: KeyValueStore + ?Sized>(
    store: &S,
    gallery: &Gallery,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(gallery.entries())
        .map_err(|err| StorageError::Encode(err.to_string()))?;
    store.set(GALLERY_STORAGE_KEY, &raw)
}

pub fn clear_gallery<S: KeyValueStore + ?Sized>(store: &S) {
    store.delete(GALLERY_STORAGE_KEY);
}
