//! Endpoint resolution for backend resources.
//!
//! Every resource the front end shows maps to one GET endpoint under a
//! common base URL. [`ResourceKind`] names the resources; [`EndpointResolver`]
//! builds their URLs.
//!
//! ```rust
//! use revlane_dispatch::{EndpointResolver, ResourceKind};
//!
//! let resolver = EndpointResolver::default();
//! assert_eq!(
//!     resolver.resolve(ResourceKind::Subscriptions, Some("urn:ngsi-ld:plan:1")).as_deref(),
//!     Some("http://localhost:8580/revenue/plans/urn:ngsi-ld:plan:1/subscriptions")
//! );
//! ```

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::DispatchError;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8580/revenue/";

/// Backend resources, named by their tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Plans,
    Plan,
    Subscriptions,
    Subscription,
    Statements,
    Bills,
    Bill,
    CustomerBill,
    Acbrs,
    Acbr,
    Organizations,
    OrganizationTransactions,
    PurchasedProducts,
    SoldProducts,
}

impl ResourceKind {
    pub const ALL: &'static [ResourceKind] = &[
        ResourceKind::Plans,
        ResourceKind::Plan,
        ResourceKind::Subscriptions,
        ResourceKind::Subscription,
        ResourceKind::Statements,
        ResourceKind::Bills,
        ResourceKind::Bill,
        ResourceKind::CustomerBill,
        ResourceKind::Acbrs,
        ResourceKind::Acbr,
        ResourceKind::Organizations,
        ResourceKind::OrganizationTransactions,
        ResourceKind::PurchasedProducts,
        ResourceKind::SoldProducts,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            ResourceKind::Plans => "plans",
            ResourceKind::Plan => "plan",
            ResourceKind::Subscriptions => "subscriptions",
            ResourceKind::Subscription => "subscription",
            ResourceKind::Statements => "statements",
            ResourceKind::Bills => "bills",
            ResourceKind::Bill => "bill",
            ResourceKind::CustomerBill => "customerBill",
            ResourceKind::Acbrs => "acbrs",
            ResourceKind::Acbr => "acbr",
            ResourceKind::Organizations => "organizations",
            ResourceKind::OrganizationTransactions => "organizationTransactions",
            ResourceKind::PurchasedProducts => "purchasedProducts",
            ResourceKind::SoldProducts => "soldProducts",
        }
    }

    /// Whether the endpoint embeds a resource id.
    pub fn requires_id(self) -> bool {
        !matches!(self, ResourceKind::Plans | ResourceKind::Organizations)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ResourceKind {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| DispatchError::UnknownResource(s.to_string()))
    }
}

/// Persisted customer bills carry `customerbill` in their id where the
/// revenue-sharing bill endpoints expect `revenuebill`.
pub fn as_revenue_bill_id(id: &str) -> String {
    id.replacen("customerbill", "revenuebill", 1)
}

/// Builds endpoint URLs under a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointResolver {
    base_url: String,
}

impl Default for EndpointResolver {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl EndpointResolver {
    /// Creates a resolver for `base_url`, which must be an absolute URL.
    /// A trailing `/` is added when missing.
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(base_url.trim())?;
        let mut base_url = parsed.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves a resource tag, logging tags that name no resource.
    pub fn resolve_tag(&self, tag: &str, id: Option<&str>) -> Option<String> {
        match tag.parse::<ResourceKind>() {
            Ok(kind) => self.resolve(kind, id),
            Err(err) => {
                tracing::error!(tag, id, "{}", err);
                None
            }
        }
    }

    /// The URL for `kind`, or `None` (logged) when the kind needs an id and
    /// none was given.
    pub fn resolve(&self, kind: ResourceKind, id: Option<&str>) -> Option<String> {
        match self.try_resolve(kind, id) {
            Ok(url) => Some(url),
            Err(err) => {
                tracing::error!(resource = kind.tag(), "{}", err);
                None
            }
        }
    }

    /// Like [`resolve`](Self::resolve), but returns the failure.
    pub fn try_resolve(&self, kind: ResourceKind, id: Option<&str>) -> Result<String, DispatchError> {
        let id = match (kind.requires_id(), id) {
            (false, _) => "",
            (true, Some(id)) if !id.is_empty() => id,
            (true, _) => {
                return Err(DispatchError::UnresolvedEndpoint {
                    tag: kind.tag().to_string(),
                    id: id.map(str::to_string),
                })
            }
        };

        let path = match kind {
            ResourceKind::Plans => "plans".to_string(),
            ResourceKind::Plan => format!("plans/{}", id),
            ResourceKind::Subscriptions => format!("plans/{}/subscriptions", id),
            ResourceKind::Subscription => format!("subscriptions/{}", id),
            ResourceKind::Statements => format!("subscriptions/{}/statements", id),
            ResourceKind::Bills => format!("subscriptions/{}/bills", id),
            ResourceKind::Bill => format!("bills/{}", id),
            ResourceKind::CustomerBill if id.contains("product") => {
                format!("bills/{}/cb", as_revenue_bill_id(id))
            }
            ResourceKind::CustomerBill => format!("dev/customerbills/{}", id),
            ResourceKind::Acbrs if id.contains("product") => {
                format!("bills/{}/acbr", as_revenue_bill_id(id))
            }
            ResourceKind::Acbrs => format!("dev/customerbills/{}/acbr", id),
            ResourceKind::Acbr => {
                tracing::error!(
                    id,
                    "retrieval of a single ACBR is not supported, showing all ACBRs of its bill"
                );
                format!("bills/{}/acbr", as_revenue_bill_id(id))
            }
            ResourceKind::Organizations => "dev/organizations".to_string(),
            ResourceKind::OrganizationTransactions => {
                format!("dev/organizations/{}/customerbills", id)
            }
            ResourceKind::PurchasedProducts => format!("dev/organizations/{}/purchasedProducts", id),
            ResourceKind::SoldProducts => format!("dev/organizations/{}/soldProducts", id),
        };
        Ok(format!("{}{}", self.base_url, path))
    }
}
