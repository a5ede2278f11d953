//! MongoDB-backed document store

use async_trait::async_trait;
use mongodb::bson::{doc, Bson, Document};
use mongodb::{Client, Database};
use tracing::debug;

use super::DocumentStore;
use crate::error::Result;

/// Document store backed by a MongoDB deployment.
///
/// One client (with the driver's own connection pool) per process; databases
/// are resolved by name on each call and created lazily by the server.
pub struct MongoStore {
    client: Client,
}

impl MongoStore {
    /// Connect using the configured URL
    pub async fn connect(url: &str) -> Result<Self> {
        let client = Client::with_uri_str(url).await?;
        Ok(Self { client })
    }

    fn database(&self, db: &str) -> Database {
        self.client.database(db)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn create_collection(&self, db: &str, name: &str) -> Result<()> {
        // The server rejects an existing name with NamespaceExists.
        self.database(db).create_collection(name).await?;
        debug!("created collection {db}.{name}");
        Ok(())
    }

    async fn collection_names(&self, db: &str) -> Result<Vec<String>> {
        Ok(self.database(db).list_collection_names().await?)
    }

    async fn insert_item(&self, db: &str, collection: &str, document: Document) -> Result<Bson> {
        let result = self
            .database(db)
            .collection::<Document>(collection)
            .insert_one(document)
            .await?;
        Ok(result.inserted_id)
    }

    async fn find_item(&self, db: &str, collection: &str, id: &Bson) -> Result<Option<Document>> {
        Ok(self
            .database(db)
            .collection::<Document>(collection)
            .find_one(doc! { "_id": id.clone() })
            .await?)
    }
}
