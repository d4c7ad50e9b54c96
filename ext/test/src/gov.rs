//! `cosmos.gov.v1` queries.

use crate::PageRequest;
use rpcgate::{FieldDescriptor, QueryRequest};
use serde::{Deserialize, Deserializer, Serialize};

/// `ProposalStatus` variants, by name and number.
pub const PROPOSAL_STATUS: &[(&str, i32)] = &[
    ("PROPOSAL_STATUS_UNSPECIFIED", 0),
    ("PROPOSAL_STATUS_DEPOSIT_PERIOD", 1),
    ("PROPOSAL_STATUS_VOTING_PERIOD", 2),
    ("PROPOSAL_STATUS_PASSED", 3),
    ("PROPOSAL_STATUS_REJECTED", 4),
    ("PROPOSAL_STATUS_FAILED", 5),
];

fn proposal_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    crate::json::enumeration(deserializer, PROPOSAL_STATUS)
}

/// A single proposal by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryProposalRequest {
    #[serde(deserialize_with = "crate::json::uint64")]
    pub proposal_id: u64,
}

impl QueryRequest for QueryProposalRequest {
    const TYPE_NAME: &'static str = "cosmos.gov.v1.QueryProposalRequest";

    fn fields() -> Vec<FieldDescriptor<Self>> {
        vec![FieldDescriptor::uint64("proposal_id", "proposal_id", |m: &mut Self, v| {
            m.proposal_id = v;
        })]
    }
}

/// Proposals filtered by status, voter and depositor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryProposalsRequest {
    /// A `PROPOSAL_STATUS` number. Bodies may give it by name.
    #[serde(deserialize_with = "proposal_status")]
    pub proposal_status: i32,
    pub voter: String,
    pub depositor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageRequest>,
}

impl QueryRequest for QueryProposalsRequest {
    const TYPE_NAME: &'static str = "cosmos.gov.v1.QueryProposalsRequest";

    fn fields() -> Vec<FieldDescriptor<Self>> {
        vec![
            FieldDescriptor::enumeration(
                "proposal_status",
                "proposal_status",
                PROPOSAL_STATUS,
                |m: &mut Self, v| m.proposal_status = v,
            ),
            FieldDescriptor::string("voter", "voter", |m: &mut Self, v| m.voter = v),
            FieldDescriptor::string("depositor", "depositor", |m: &mut Self, v| m.depositor = v),
            FieldDescriptor::message("pagination", "pagination"),
        ]
    }
}
