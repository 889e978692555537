/// Durable key-value medium holding named string slots.
///
/// The store only ever reads or overwrites whole slots; there are no partial
/// writes. Implementations:
/// - [`crate::db::SqliteKv`] - one row per slot in the workspace database
/// - `MemoryKv` - for tests
pub trait KvStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;

    /// Writes several slots as one unit. The default writes them in order;
    /// media that can do better should make it all-or-nothing.
    fn set_all(&mut self, entries: &[(&str, &str)]) -> anyhow::Result<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub use memory::MemoryKv;

#[cfg(test)]
mod memory {
    use super::KvStore;
    use anyhow::anyhow;
    use std::collections::HashMap;

    #[derive(Debug, Default)]
    pub struct MemoryKv {
        slots: HashMap<String, String>,
        fail_writes: bool,
    }

    impl MemoryKv {
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes every subsequent `set` fail, simulating a full or read-only medium.
        pub fn fail_writes(&mut self, fail: bool) {
            self.fail_writes = fail;
        }

        pub fn raw(&self, key: &str) -> Option<&str> {
            self.slots.get(key).map(String::as_str)
        }
    }

    impl KvStore for MemoryKv {
        fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
            Ok(self.slots.get(key).cloned())
        }

        fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
            if self.fail_writes {
                return Err(anyhow!("write rejected for slot {}", key));
            }
            self.slots.insert(key.to_string(), value.to_string());
            Ok(())
        }
    }
}
