use async_trait::async_trait;
use field_catalog::{ProfileError, ProfileRecord};
use parking_lot::RwLock;

/// Read side of the saved profile. One snapshot is taken per pass.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn snapshot(&self) -> Result<ProfileRecord, ProfileError>;

    async fn get(&self, keys: &[&str]) -> Result<ProfileRecord, ProfileError> {
        Ok(self.snapshot().await?.subset(keys))
    }
}

/// Profile held in memory; the embedding application swaps it on save.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    record: RwLock<ProfileRecord>,
}

impl MemoryProfileStore {
    pub fn new(record: ProfileRecord) -> Self {
        Self {
            record: RwLock::new(record),
        }
    }

    pub fn replace(&self, record: ProfileRecord) {
        *self.record.write() = record;
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn snapshot(&self) -> Result<ProfileRecord, ProfileError> {
        Ok(self.record.read().clone())
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, filled: usize);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, _filled: usize) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subset_reads() {
        let store = MemoryProfileStore::new(
            ProfileRecord::new()
                .with("phone", "555")
                .with("email", "a@example.com"),
        );
        let subset = store.get(&["phone"]).await.unwrap();
        assert_eq!(subset.text("phone").as_deref(), Some("555"));
        assert!(subset.get("email").is_none());

        store.replace(ProfileRecord::new());
        assert!(store.snapshot().await.unwrap().is_empty());
    }
}
