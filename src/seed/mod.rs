//! Seed loader for the endorsement network
//!
//! Clears both collections, inserts the member fixture verbatim, then
//! derives endorsement edges: every member that is neither the root nor the
//! child of an indirect link becomes a direct child of the root; the
//! indirect links are emitted afterwards, continuing the same order counter.

pub mod fixtures;

use bson::doc;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use tracing::info;

use crate::db::schemas::{
    EndorseAction, EndorsementDoc, MemberDoc, ENDORSEMENT_COLLECTION, MEMBER_COLLECTION,
};
use crate::db::MongoClient;
use crate::types::ApiError;
use fixtures::{IndirectLink, MemberFixture};

/// Name used when an id (the root, in practice) is absent from the member list
const UNKNOWN_NAME: &str = "Unknown";

/// 2024-01-01T00:00:00Z, the base for synthetic edge timestamps
const SYNTHETIC_EPOCH_SECS: i64 = 1_704_067_200;

/// Fixture file locations for a seed run
#[derive(Debug, Clone)]
pub struct FixturePaths {
    pub config: PathBuf,
    pub members: PathBuf,
    pub indirect: PathBuf,
}

/// Counts reported after a successful seed run
#[derive(Debug, Clone, Copy)]
pub struct SeedSummary {
    pub member_count: u64,
    pub endorsement_count: u64,
}

/// Synthetic creation timestamp for an edge, derived from its order counter
/// so that creation order is deterministic regardless of insert wall-clock.
fn synthetic_created_at(order: i64) -> bson::DateTime {
    bson::DateTime::from_millis((SYNTHETIC_EPOCH_SECS + order) * 1000)
}

/// Derive the full edge list from the fixtures
///
/// Pure function: direct root edges first (member-list order), then the
/// indirect links (fixture order), sharing one order counter that starts at
/// 1. Fails if an indirect link references an id absent from the member
/// list; the root itself may be absent and falls back to the Unknown name.
pub fn build_endorsements(
    root_id: &str,
    members: &[MemberFixture],
    indirect_links: &[IndirectLink],
) -> Result<Vec<EndorsementDoc>, ApiError> {
    let name_by_id: HashMap<&str, &str> = members
        .iter()
        .map(|m| (m.intern_id.as_str(), m.name.as_str()))
        .collect();

    let root_name = name_by_id.get(root_id).copied().unwrap_or(UNKNOWN_NAME);

    // Exclusion list: children named here get their parent from the link,
    // everyone else defaults to a direct edge from the root
    let indirect_children: HashSet<&str> = indirect_links
        .iter()
        .map(|link| link.child_id.as_str())
        .collect();

    let mut order: i64 = 1;
    let mut endorsements = Vec::new();

    // Direct endorsements from the root
    for member in members {
        if member.intern_id == root_id || indirect_children.contains(member.intern_id.as_str()) {
            continue;
        }

        endorsements.push(EndorsementDoc {
            id: None,
            parent_id: root_id.to_string(),
            parent_name: root_name.to_string(),
            child_id: member.intern_id.clone(),
            child_name: member.name.clone(),
            action: EndorseAction::Endorse,
            order,
            created_at: Some(synthetic_created_at(order)),
        });
        order += 1;
    }

    // Indirect endorsements; both endpoints must be known members
    for link in indirect_links {
        let parent_name = name_by_id.get(link.parent_id.as_str()).ok_or_else(|| {
            ApiError::Validation(format!(
                "Invalid indirect link: unknown parentId '{}'",
                link.parent_id
            ))
        })?;
        let child_name = name_by_id.get(link.child_id.as_str()).ok_or_else(|| {
            ApiError::Validation(format!(
                "Invalid indirect link: unknown childId '{}'",
                link.child_id
            ))
        })?;

        endorsements.push(EndorsementDoc {
            id: None,
            parent_id: link.parent_id.clone(),
            parent_name: parent_name.to_string(),
            child_id: link.child_id.clone(),
            child_name: child_name.to_string(),
            action: EndorseAction::Endorse,
            order,
            created_at: Some(synthetic_created_at(order)),
        });
        order += 1;
    }

    Ok(endorsements)
}

/// Run a full seed: clear both collections, insert members, derive and
/// insert edges, log a summary with a sample of the inserted edges.
///
/// Any fixture or validation error aborts the run. The clear step runs
/// before member loading, so a failed run can leave the store empty.
pub async fn run(mongo: &MongoClient, paths: &FixturePaths) -> Result<SeedSummary, ApiError> {
    info!("Seeding started");

    let root_id = fixtures::load_root_id(&paths.config)?;
    let indirect_links = fixtures::load_indirect_links(&paths.indirect)?;

    let members_col = mongo.collection::<MemberDoc>(MEMBER_COLLECTION).await?;
    let endorsements_col = mongo
        .collection::<EndorsementDoc>(ENDORSEMENT_COLLECTION)
        .await?;

    // Idempotent reset
    members_col.delete_many(doc! {}).await?;
    endorsements_col.delete_many(doc! {}).await?;

    let members = fixtures::load_members(&paths.members)?;
    info!("Loaded {} members from JSON", members.len());

    let member_docs: Vec<MemberDoc> = members
        .iter()
        .map(|m| MemberDoc::new(m.intern_id.clone(), m.name.clone()))
        .collect();
    let inserted = members_col.insert_many(member_docs).await?;
    info!("Inserted {} members", inserted.inserted_ids.len());

    let endorsements = build_endorsements(&root_id, &members, &indirect_links)?;
    if !endorsements.is_empty() {
        let inserted = endorsements_col.insert_many(endorsements).await?;
        info!("Inserted {} endorsements", inserted.inserted_ids.len());
    } else {
        info!("No endorsements to insert");
    }

    // Report counts and a sample for operator verification
    let member_count = members_col.count(doc! {}).await?;
    let endorsement_count = endorsements_col.count(doc! {}).await?;
    info!(member_count, endorsement_count, "Seed summary");

    let sample = endorsements_col
        .find_sorted_limit(doc! {}, doc! { "order": 1 }, 5)
        .await?;
    for edge in &sample {
        info!(
            order = edge.order,
            "  {} ({}) -> {} ({})",
            edge.parent_id,
            edge.parent_name,
            edge.child_id,
            edge.child_name
        );
    }

    info!("Seeding completed successfully");

    Ok(SeedSummary {
        member_count,
        endorsement_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str, name: &str) -> MemberFixture {
        MemberFixture {
            intern_id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn link(parent: &str, child: &str) -> IndirectLink {
        IndirectLink {
            parent_id: parent.to_string(),
            child_id: child.to_string(),
        }
    }

    #[test]
    fn test_direct_edges_for_non_root_members() {
        let members = vec![member("W1", "A"), member("W2", "B"), member("W3", "C")];
        let edges = build_endorsements("W1", &members, &[]).unwrap();

        assert_eq!(edges.len(), 2);
        for edge in &edges {
            assert_eq!(edge.parent_id, "W1");
            assert_eq!(edge.parent_name, "A");
            assert_eq!(edge.action, EndorseAction::Endorse);
        }
        assert_eq!(edges[0].child_id, "W2");
        assert_eq!(edges[1].child_id, "W3");
    }

    #[test]
    fn test_order_is_contiguous_from_one() {
        let members = vec![
            member("W1", "A"),
            member("W2", "B"),
            member("W3", "C"),
            member("W4", "D"),
        ];
        let links = vec![link("W2", "W4")];
        let edges = build_endorsements("W1", &members, &links).unwrap();

        let orders: Vec<i64> = edges.iter().map(|e| e.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn test_indirect_children_excluded_from_direct_set() {
        // Worked example: root W1, indirect W2 -> W3
        let members = vec![member("W1", "A"), member("W2", "B"), member("W3", "C")];
        let links = vec![link("W2", "W3")];
        let edges = build_endorsements("W1", &members, &links).unwrap();

        assert_eq!(edges.len(), 2);

        assert_eq!(edges[0].parent_id, "W1");
        assert_eq!(edges[0].parent_name, "A");
        assert_eq!(edges[0].child_id, "W2");
        assert_eq!(edges[0].child_name, "B");
        assert_eq!(edges[0].order, 1);

        assert_eq!(edges[1].parent_id, "W2");
        assert_eq!(edges[1].parent_name, "B");
        assert_eq!(edges[1].child_id, "W3");
        assert_eq!(edges[1].child_name, "C");
        assert_eq!(edges[1].order, 2);
    }

    #[test]
    fn test_indirect_edges_follow_all_direct_edges() {
        let members = vec![
            member("W1", "A"),
            member("W2", "B"),
            member("W3", "C"),
            member("W4", "D"),
            member("W5", "E"),
        ];
        // Fixture order deliberately differs from member order
        let links = vec![link("W3", "W5"), link("W2", "W4")];
        let edges = build_endorsements("W1", &members, &links).unwrap();

        // Direct: W2, W3 (member order); indirect: W3->W5, W2->W4 (fixture order)
        let pairs: Vec<(&str, &str)> = edges
            .iter()
            .map(|e| (e.parent_id.as_str(), e.child_id.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("W1", "W2"), ("W1", "W3"), ("W3", "W5"), ("W2", "W4")]
        );
    }

    #[test]
    fn test_unknown_root_name_falls_back_to_sentinel() {
        let members = vec![member("W2", "B")];
        let edges = build_endorsements("W1", &members, &[]).unwrap();

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].parent_name, "Unknown");
        assert_eq!(edges[0].child_name, "B");
    }

    #[test]
    fn test_unknown_indirect_child_fails_whole_build() {
        let members = vec![member("W1", "A"), member("W2", "B")];
        let links = vec![link("W2", "W9")];
        let err = build_endorsements("W1", &members, &links).unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
        assert!(err.to_string().contains("W9"));
    }

    #[test]
    fn test_unknown_indirect_parent_fails_whole_build() {
        let members = vec![member("W1", "A"), member("W2", "B")];
        let links = vec![link("W9", "W2")];
        let err = build_endorsements("W1", &members, &links).unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
        assert!(err.to_string().contains("W9"));
    }

    #[test]
    fn test_root_only_member_list_yields_no_edges() {
        let members = vec![member("W1", "A")];
        let edges = build_endorsements("W1", &members, &[]).unwrap();
        assert!(edges.is_empty());
    }

    #[test]
    fn test_synthetic_timestamps_track_the_counter() {
        let members = vec![member("W1", "A"), member("W2", "B"), member("W3", "C")];
        let edges = build_endorsements("W1", &members, &[]).unwrap();

        let t1 = edges[0].created_at.unwrap().timestamp_millis();
        let t2 = edges[1].created_at.unwrap().timestamp_millis();
        assert_eq!(t2 - t1, 1000);
        assert_eq!(t1, (SYNTHETIC_EPOCH_SECS + 1) * 1000);
    }
}
