//! Document-store seam
//!
//! The handlers only need four operations, so the trait surfaces exactly
//! those. Backends follow the document-database convention of creating
//! databases and collections lazily on first write.

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use async_trait::async_trait;
use mongodb::bson::{Bson, Document};

use crate::error::Result;

/// Storage backend for items and collections
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create `name` inside `db`; errors if the collection already exists
    async fn create_collection(&self, db: &str, name: &str) -> Result<()>;

    /// Names of the collections currently present in `db`
    async fn collection_names(&self, db: &str) -> Result<Vec<String>>;

    /// Insert `document` into `db.collection` and return the generated `_id`
    async fn insert_item(&self, db: &str, collection: &str, document: Document) -> Result<Bson>;

    /// Fetch a document from `db.collection` by its `_id`
    async fn find_item(&self, db: &str, collection: &str, id: &Bson) -> Result<Option<Document>>;
}
