//! `window.localStorage` behind the core's `KvStore` seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! Settings persistence goes through `chatbot::ConfigStore`; this type only
//! moves strings. Private browsing and sandboxed iframes may have no storage
//! at all, which surfaces as `StoreError::Unavailable` and falls back to
//! defaults upstream.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use chatbot::store::{KvStore, StoreError};

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Result<web_sys::Storage, StoreError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(StoreError::Unavailable)
}

impl KvStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .get_item(key)
                .map_err(|e| StoreError::Read(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Err(StoreError::Unavailable)
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .set_item(key, value)
                .map_err(|e| StoreError::Write(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
            Err(StoreError::Unavailable)
        }
    }
}
