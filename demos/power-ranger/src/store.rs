//! Ranger persistence

use crate::models::{Appearance, Color, PowerRanger, Season};
use genz_rs::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Storage for power rangers
#[async_trait]
pub trait RangerStore: Send + Sync + 'static {
    async fn find_all(&self) -> Vec<PowerRanger>;

    async fn find_by_id(&self, id: u32) -> Option<PowerRanger>;

    /// Rangers whose name contains `name`, ignoring case
    async fn search(&self, name: &str) -> Vec<PowerRanger>;

    /// Store a new ranger with no seasons; ids continue from the last one
    async fn create(&self, name: String) -> PowerRanger;

    async fn update(&self, id: u32, name: String) -> Option<PowerRanger>;

    /// Remove a ranger, returning it
    async fn delete(&self, id: u32) -> Option<PowerRanger>;

    /// Remove every listed ranger, returning how many were removed
    async fn delete_many(&self, ids: &[u32]) -> usize;
}

/// In-memory store, ordered by insertion
#[derive(Clone, Default)]
pub struct MemoryStore {
    rangers: Arc<RwLock<Vec<PowerRanger>>>,
}

impl MemoryStore {
    pub fn new(rangers: Vec<PowerRanger>) -> Self {
        Self {
            rangers: Arc::new(RwLock::new(rangers)),
        }
    }

    /// The six original rangers
    pub fn seeded() -> Self {
        use Color::*;
        use Season::*;

        let ranger = |id: u32, name: &str, seasons: &[(Season, Color)]| PowerRanger {
            id,
            name: name.to_string(),
            seasons: seasons
                .iter()
                .map(|&(season, color)| Appearance { season, color })
                .collect(),
        };

        Self::new(vec![
            ranger(1, "Jason Lee Scott", &[(One, Red), (Two, Red), (Zeo, Gold)]),
            ranger(2, "Trini Kwan", &[(One, Yellow), (Two, Yellow)]),
            ranger(3, "Zack Taylor", &[(One, Black), (Two, Black)]),
            ranger(4, "Kimberly Hart", &[(One, Pink), (Two, Pink), (Three, Pink)]),
            ranger(5, "Billy Cranston", &[(One, Blue), (Two, Blue), (Three, Blue)]),
            ranger(
                6,
                "Tommy Oliver",
                &[(One, Green), (Two, White), (Three, White), (Zeo, Red)],
            ),
        ])
    }
}

#[async_trait]
impl RangerStore for MemoryStore {
    async fn find_all(&self) -> Vec<PowerRanger> {
        self.rangers.read().await.clone()
    }

    async fn find_by_id(&self, id: u32) -> Option<PowerRanger> {
        self.rangers.read().await.iter().find(|r| r.id == id).cloned()
    }

    async fn search(&self, name: &str) -> Vec<PowerRanger> {
        let needle = name.to_lowercase();
        self.rangers
            .read()
            .await
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    async fn create(&self, name: String) -> PowerRanger {
        let mut rangers = self.rangers.write().await;
        let id = rangers.last().map_or(1, |r| r.id + 1);
        let ranger = PowerRanger {
            id,
            name,
            seasons: Vec::new(),
        };
        rangers.push(ranger.clone());
        ranger
    }

    async fn update(&self, id: u32, name: String) -> Option<PowerRanger> {
        let mut rangers = self.rangers.write().await;
        let ranger = rangers.iter_mut().find(|r| r.id == id)?;
        ranger.name = name;
        Some(ranger.clone())
    }

    async fn delete(&self, id: u32) -> Option<PowerRanger> {
        let mut rangers = self.rangers.write().await;
        let index = rangers.iter().position(|r| r.id == id)?;
        Some(rangers.remove(index))
    }

    async fn delete_many(&self, ids: &[u32]) -> usize {
        let mut rangers = self.rangers.write().await;
        let before = rangers.len();
        rangers.retain(|r| !ids.contains(&r.id));
        before - rangers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_ignores_case() {
        let store = MemoryStore::seeded();
        let found = store.search("KIM").await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Kimberly Hart");
        assert_eq!(store.search("o").await.len(), 4);
    }

    #[tokio::test]
    async fn create_continues_from_the_last_id() {
        let store = MemoryStore::seeded();
        let ranger = store.create("Rocky DeSantos".to_string()).await;
        assert_eq!(ranger.id, 7);
        assert!(ranger.seasons.is_empty());

        let empty = MemoryStore::default();
        assert_eq!(empty.create("Aisha Campbell".to_string()).await.id, 1);
    }

    #[tokio::test]
    async fn update_and_delete_missing_rangers() {
        let store = MemoryStore::seeded();
        assert!(store.update(42, "Nobody".to_string()).await.is_none());
        assert!(store.delete(42).await.is_none());

        let renamed = store.update(3, "Zack".to_string()).await.unwrap();
        assert_eq!(renamed.name, "Zack");
        assert_eq!(store.find_by_id(3).await.unwrap().name, "Zack");
    }

    #[tokio::test]
    async fn deletes_remove_rangers() {
        let store = MemoryStore::seeded();
        assert_eq!(store.delete(1).await.map(|r| r.id), Some(1));
        assert_eq!(store.delete_many(&[2, 3, 99]).await, 2);
        assert_eq!(store.find_all().await.len(), 3);
    }
}
