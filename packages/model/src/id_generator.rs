use crc32fast::Hasher;
use std::collections::HashSet;

/// Derive a short id seed from an arbitrary key using CRC32
pub fn seed_from_key(key: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential id generator for component nodes
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    /// Generator whose seed is the CRC32 digest of `key`
    pub fn new(key: &str) -> Self {
        Self {
            seed: seed_from_key(key),
            count: 0,
        }
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Next sequential id
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// Next sequential id that is not in `taken`; the result is added to
    /// `taken` so repeated calls never hand out the same id twice
    pub fn fresh_id(&mut self, taken: &mut HashSet<String>) -> String {
        loop {
            let id = self.new_id();
            if taken.insert(id.clone()) {
                return id;
            }
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
