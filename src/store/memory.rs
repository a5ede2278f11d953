//! In-memory document store for tests and single-process development

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::{Bson, Document};

use super::DocumentStore;
use crate::error::{Error, Result};

type Collections = HashMap<String, Vec<Document>>;

/// Mutex-guarded map of `db -> collection -> documents`.
///
/// Matches MongoDB's lazy-creation semantics (inserting into a missing
/// collection creates it) and mirrors its "already exists" error text so
/// handler messages are backend-independent.
#[derive(Default)]
pub struct MemoryStore {
    databases: Mutex<HashMap<String, Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create_collection(&self, db: &str, name: &str) -> Result<()> {
        let mut databases = self.databases.lock().unwrap();
        let collections = databases.entry(db.to_string()).or_default();
        if collections.contains_key(name) {
            return Err(Error::Store(format!(
                "collection '{db}.{name}' already exists"
            )));
        }
        collections.insert(name.to_string(), Vec::new());
        Ok(())
    }

    async fn collection_names(&self, db: &str) -> Result<Vec<String>> {
        let databases = self.databases.lock().unwrap();
        Ok(databases
            .get(db)
            .map(|collections| collections.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn insert_item(&self, db: &str, collection: &str, document: Document) -> Result<Bson> {
        let id = document.get("_id").cloned().unwrap_or(Bson::Null);
        let mut databases = self.databases.lock().unwrap();
        databases
            .entry(db.to_string())
            .or_default()
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(id)
    }

    async fn find_item(&self, db: &str, collection: &str, id: &Bson) -> Result<Option<Document>> {
        let databases = self.databases.lock().unwrap();
        Ok(databases
            .get(db)
            .and_then(|collections| collections.get(collection))
            .and_then(|documents| {
                documents
                    .iter()
                    .find(|document| document.get("_id") == Some(id))
                    .cloned()
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn duplicate_collection_is_rejected() {
        let store = MemoryStore::new();
        store.create_collection("db", "things").await.unwrap();

        let err = store.create_collection("db", "things").await.unwrap_err();
        assert!(err.to_string().contains("already exists"));

        assert_eq!(
            store.collection_names("db").await.unwrap(),
            vec!["things".to_string()]
        );
    }

    #[tokio::test]
    async fn insert_then_find_by_id() {
        let store = MemoryStore::new();
        let document = doc! { "_id": "abc", "name": "widget" };

        let id = store.insert_item("db", "things", document).await.unwrap();
        assert_eq!(id, Bson::String("abc".to_string()));

        let found = store.find_item("db", "things", &id).await.unwrap().unwrap();
        assert_eq!(found.get("name"), Some(&Bson::String("widget".to_string())));
    }

    #[tokio::test]
    async fn missing_database_lists_no_collections() {
        let store = MemoryStore::new();
        assert!(store.collection_names("nowhere").await.unwrap().is_empty());
    }
}
