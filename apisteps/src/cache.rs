use crate::{data::CacheValue, error::Error};
use std::{collections::HashMap, fmt::Debug, sync::RwLock};

/// Key-value storage shared by all steps of a scenario.
pub trait Cache: Debug {
    fn save(&self, key: &str, value: CacheValue) -> Result<(), Error>;
    fn get_saved(&self, key: &str) -> Result<CacheValue, Error>;
    /// Point-in-time copy of every entry.
    fn all(&self) -> Result<HashMap<String, CacheValue>, Error>;
    fn reset(&self) -> Result<(), Error>;
}

#[derive(Debug, Default)]
pub struct ConcurrentCache {
    data: RwLock<HashMap<String, CacheValue>>,
}

impl ConcurrentCache {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }
}

impl Cache for ConcurrentCache {
    fn save(&self, key: &str, value: CacheValue) -> Result<(), Error> {
        self.data.write()?.insert(key.to_string(), value);
        Ok(())
    }

    fn get_saved(&self, key: &str) -> Result<CacheValue, Error> {
        self.data
            .read()?
            .get(key)
            .cloned()
            .ok_or_else(|| Error::CacheMiss(key.to_string()))
    }

    fn all(&self) -> Result<HashMap<String, CacheValue>, Error> {
        Ok(self.data.read()?.clone())
    }

    fn reset(&self) -> Result<(), Error> {
        self.data.write()?.clear();
        Ok(())
    }
}
