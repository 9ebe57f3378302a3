use popcorn_saga_core::{KeyValueStore, StorageError};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

/// `window.localStorage`, looked up on every access so a page without
/// storage (private mode, sandboxed iframe) degrades to an empty gallery.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserStore;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn js_err(error: JsValue) -> String {
    if let Some(value) = error.as_string() {
        return value;
    }
    if let Ok(json) = js_sys::JSON::stringify(&error) {
        if let Some(value) = json.as_string() {
            return value;
        }
    }
    "unknown js error".to_string()
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(storage) = local_storage() else {
                gloo::console::log!("storage: unavailable on read");
                return None;
            };
            storage.get_item(key).ok().flatten()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(storage) = local_storage() else {
                return Err(StorageError::Unavailable);
            };
            storage
                .set_item(key, value)
                .map_err(|err| StorageError::Write(js_err(err)))
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, value);
            Err(StorageError::Unavailable)
        }
    }

    fn delete(&self, key: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(storage) = local_storage() {
                if storage.remove_item(key).is_err() {
                    gloo::console::warn!("storage: remove failed", key);
                }
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
        }
    }
}
