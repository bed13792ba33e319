//! Raw-data links for resource identifiers.
//!
//! Every card can link to the JSON it was rendered from. The identifier
//! alone decides which endpoint serves it.

use crate::endpoint::{as_revenue_bill_id, EndpointResolver, ResourceKind};
use crate::error::DispatchError;

/// Ordered classification rules; the first pattern contained in the id wins.
const RAW_RULES: &[(&str, ResourceKind, bool)] = &[
    ("urn:ngsi-ld:customerbill:urn:ngsi-ld:product", ResourceKind::CustomerBill, true),
    ("urn:ngsi-ld:revenuebill:urn:ngsi-ld:product", ResourceKind::Bill, false),
    ("urn:ngsi-ld:customer-bill", ResourceKind::CustomerBill, false),
    ("urn:ngsi-ld:product", ResourceKind::Subscription, false),
    ("urn:ngsi-ld:plan", ResourceKind::Plan, false),
];

/// A classified identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTarget {
    pub kind: ResourceKind,
    /// The id to resolve, possibly rewritten.
    pub id: String,
}

/// Picks the resource serving the raw data of `id`.
pub fn classify_raw(id: &str) -> Result<RawTarget, DispatchError> {
    RAW_RULES
        .iter()
        .find(|(pattern, _, _)| id.contains(pattern))
        .map(|&(_, kind, rewrite)| RawTarget {
            kind,
            id: if rewrite {
                as_revenue_bill_id(id)
            } else {
                id.to_string()
            },
        })
        .ok_or_else(|| DispatchError::UnclassifiedRawId(id.to_string()))
}

impl EndpointResolver {
    /// URL of the raw JSON behind `id`.
    pub fn raw_url(&self, id: &str) -> Result<String, DispatchError> {
        let target = classify_raw(id)?;
        self.try_resolve(target.kind, Some(&target.id))
    }
}
