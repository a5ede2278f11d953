//! Request and storage models
//!
//! Both records arrive as HTTP request bodies and double as storage
//! documents; every field is optional and validated inline by the handlers.

use mongodb::bson::{doc, spec::BinarySubtype, Binary, Document};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A document to be stored in a named collection of a named database
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    pub db_name: Option<String>,
    pub collection_name: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Client-supplied UUID; correlation token for notification channels and
    /// the storage primary key
    pub redis_id: Option<String>,
}

/// A request to create a named collection inside a named database
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Collection {
    pub db_name: Option<String>,
    pub collection_name: Option<String>,
    pub redis_id: Option<String>,
}

impl Item {
    /// Storage form of the item: all request fields (absent ones stored as
    /// null) plus an `_id` holding the 16-byte binary encoding of `key`
    pub fn to_storage_document(&self, key: Uuid) -> Document {
        doc! {
            "_id": binary_key(key),
            "db_name": self.db_name.clone(),
            "collection_name": self.collection_name.clone(),
            "name": self.name.clone(),
            "description": self.description.clone(),
            "redis_id": self.redis_id.clone(),
        }
    }
}

/// Convert a UUID to the binary primary-key form used in storage
pub fn binary_key(key: Uuid) -> Binary {
    Binary {
        subtype: BinarySubtype::Uuid,
        bytes: key.into_bytes().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Bson;

    #[test]
    fn storage_document_keys_on_uuid_bytes() {
        let key = Uuid::new_v4();
        let item = Item {
            collection_name: Some("things".to_string()),
            name: Some("widget".to_string()),
            redis_id: Some(key.to_string()),
            ..Default::default()
        };

        let document = item.to_storage_document(key);
        match document.get("_id") {
            Some(Bson::Binary(binary)) => {
                assert_eq!(binary.subtype, BinarySubtype::Uuid);
                assert_eq!(binary.bytes, key.into_bytes().to_vec());
            }
            other => panic!("expected binary _id, got {:?}", other),
        }
        assert_eq!(document.get("name"), Some(&Bson::String("widget".to_string())));
    }

    #[test]
    fn absent_fields_stored_as_null() {
        let key = Uuid::new_v4();
        let document = Item::default().to_storage_document(key);
        assert_eq!(document.get("db_name"), Some(&Bson::Null));
        assert_eq!(document.get("description"), Some(&Bson::Null));
    }
}
