//! Database schemas for the endorsement network
//!
//! Defines MongoDB document structures for members and endorsement edges.

mod endorsement;
mod member;

pub use endorsement::{
    EndorseAction, EndorsementDoc, EndorsementView, ENDORSEMENT_COLLECTION,
};
pub use member::{MemberDoc, MEMBER_COLLECTION};
