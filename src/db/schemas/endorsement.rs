//! Endorsement edge document schema
//!
//! A directed, sequenced edge from a parent member to a child member.
//! Name fields are denormalized copies taken from the member list at seed
//! time; there is no re-propagation on rename.

use bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::IntoIndexes;

/// Collection name for endorsement edges
pub const ENDORSEMENT_COLLECTION: &str = "endorsements";

/// Edge action tag
///
/// De-Endorse is modeled for completeness but never emitted by the seeder.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndorseAction {
    Endorse,
    #[serde(rename = "De-Endorse")]
    DeEndorse,
}

/// Endorsement document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EndorsementDoc {
    /// MongoDB document ID
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    #[serde(rename = "parentId")]
    pub parent_id: String,

    #[serde(rename = "parentName")]
    pub parent_name: String,

    #[serde(rename = "childId")]
    pub child_id: String,

    #[serde(rename = "childName")]
    pub child_name: String,

    /// Edge action tag
    pub action: EndorseAction,

    /// Authoritative display/traversal order, assigned at seed time
    pub order: i64,

    /// Synthetic timestamp derived from the order counter at seed time
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
}

impl IntoIndexes for EndorsementDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![
            // The read endpoint sorts ascending by order
            (
                doc! { "order": 1 },
                Some(IndexOptions::builder().name("order_asc".to_string()).build()),
            ),
        ]
    }
}

/// Wire projection of an endorsement edge
///
/// Omits the document ID and timestamp fields; this is the shape the tree
/// renderer consumes from GET /api/endorsements.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EndorsementView {
    #[serde(rename = "parentId")]
    pub parent_id: String,

    #[serde(rename = "parentName")]
    pub parent_name: String,

    #[serde(rename = "childId")]
    pub child_id: String,

    #[serde(rename = "childName")]
    pub child_name: String,

    pub action: EndorseAction,

    pub order: i64,
}

impl From<EndorsementDoc> for EndorsementView {
    fn from(doc: EndorsementDoc) -> Self {
        Self {
            parent_id: doc.parent_id,
            parent_name: doc.parent_name,
            child_id: doc.child_id,
            child_name: doc.child_name,
            action: doc.action,
            order: doc.order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_doc() -> EndorsementDoc {
        EndorsementDoc {
            id: Some(ObjectId::new()),
            parent_id: "W1".to_string(),
            parent_name: "Alice".to_string(),
            child_id: "W2".to_string(),
            child_name: "Bob".to_string(),
            action: EndorseAction::Endorse,
            order: 1,
            created_at: Some(DateTime::now()),
        }
    }

    #[test]
    fn test_action_tag_strings() {
        assert_eq!(
            serde_json::to_string(&EndorseAction::Endorse).unwrap(),
            "\"Endorse\""
        );
        assert_eq!(
            serde_json::to_string(&EndorseAction::DeEndorse).unwrap(),
            "\"De-Endorse\""
        );

        let parsed: EndorseAction = serde_json::from_str("\"De-Endorse\"").unwrap();
        assert_eq!(parsed, EndorseAction::DeEndorse);
    }

    #[test]
    fn test_view_omits_id_and_timestamps() {
        let view = EndorsementView::from(sample_doc());
        let json = serde_json::to_value(&view).unwrap();

        assert!(json.get("_id").is_none());
        assert!(json.get("createdAt").is_none());
        assert_eq!(json["parentId"], "W1");
        assert_eq!(json["parentName"], "Alice");
        assert_eq!(json["childId"], "W2");
        assert_eq!(json["childName"], "Bob");
        assert_eq!(json["action"], "Endorse");
        assert_eq!(json["order"], 1);
    }
}
