//! Member document schema
//!
//! Stores intern identities referenced by the endorsement edges.

use bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::IntoIndexes;

/// Collection name for members
pub const MEMBER_COLLECTION: &str = "members";

/// Member document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MemberDoc {
    /// MongoDB document ID
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Unique intern identifier
    #[serde(rename = "internId")]
    pub intern_id: String,

    /// Display name
    pub name: String,

    /// Insert timestamp
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,

    /// Last update timestamp
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

impl MemberDoc {
    /// Create a new member document with insert timestamps set
    pub fn new(intern_id: String, name: String) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            intern_id,
            name,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

impl IntoIndexes for MemberDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![
            // Unique index on internId
            (
                doc! { "internId": 1 },
                Some(
                    IndexOptions::builder()
                        .unique(true)
                        .name("intern_id_unique".to_string())
                        .build(),
                ),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_serializes_with_wire_field_names() {
        let member = MemberDoc::new("W1".to_string(), "Alice".to_string());
        let json = serde_json::to_value(&member).unwrap();

        assert_eq!(json["internId"], "W1");
        assert_eq!(json["name"], "Alice");
        assert!(json.get("_id").is_none());
        assert!(json.get("intern_id").is_none());
    }

    #[test]
    fn test_member_indexes_include_unique_intern_id() {
        let indices = MemberDoc::into_indices();
        assert_eq!(indices.len(), 1);

        let (keys, opts) = &indices[0];
        assert_eq!(keys.get_i32("internId").unwrap(), 1);
        assert_eq!(opts.as_ref().unwrap().unique, Some(true));
    }
}
