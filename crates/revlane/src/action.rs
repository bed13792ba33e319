//! User-triggered drill-down actions.

use std::fmt;
use std::str::FromStr;

use revlane_dispatch::ResourceKind;
use serde::{Deserialize, Serialize};

/// A drill-down the user can trigger from the menu or from a card.
///
/// Actions are named in kebab-case; the same names appear in the
/// `data-action` attributes of the built-in templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Plans,
    Organizations,
    Plan,
    RawPlan,
    Subscriptions,
    Statements,
    Bills,
    CustomerBills,
    CustomerBill,
    Acbrs,
    Transactions,
    PurchasedProducts,
    SoldProducts,
    Raw,
}

impl Action {
    pub const ALL: &'static [Action] = &[
        Action::Plans,
        Action::Organizations,
        Action::Plan,
        Action::RawPlan,
        Action::Subscriptions,
        Action::Statements,
        Action::Bills,
        Action::CustomerBills,
        Action::CustomerBill,
        Action::Acbrs,
        Action::Transactions,
        Action::PurchasedProducts,
        Action::SoldProducts,
        Action::Raw,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Plans => "plans",
            Action::Organizations => "organizations",
            Action::Plan => "plan",
            Action::RawPlan => "raw-plan",
            Action::Subscriptions => "subscriptions",
            Action::Statements => "statements",
            Action::Bills => "bills",
            Action::CustomerBills => "customer-bills",
            Action::CustomerBill => "customer-bill",
            Action::Acbrs => "acbrs",
            Action::Transactions => "transactions",
            Action::PurchasedProducts => "purchased-products",
            Action::SoldProducts => "sold-products",
            Action::Raw => "raw",
        }
    }

    /// The resource fetched to carry out this action.
    ///
    /// `CustomerBills` fetches the subscription's revenue bills and then one
    /// customer bill per revenue bill; `Raw` resolves its resource from the
    /// identifier.
    pub fn resource(self) -> Option<ResourceKind> {
        match self {
            Action::Plans => Some(ResourceKind::Plans),
            Action::Organizations => Some(ResourceKind::Organizations),
            Action::Plan | Action::RawPlan => Some(ResourceKind::Plan),
            Action::Subscriptions => Some(ResourceKind::Subscriptions),
            Action::Statements => Some(ResourceKind::Statements),
            Action::Bills | Action::CustomerBills => Some(ResourceKind::Bills),
            Action::CustomerBill => Some(ResourceKind::CustomerBill),
            Action::Acbrs => Some(ResourceKind::Acbrs),
            Action::Transactions => Some(ResourceKind::OrganizationTransactions),
            Action::PurchasedProducts => Some(ResourceKind::PurchasedProducts),
            Action::SoldProducts => Some(ResourceKind::SoldProducts),
            Action::Raw => None,
        }
    }

    /// Whether the action needs the id of the object it was triggered on.
    pub fn needs_object_id(self) -> bool {
        !matches!(self, Action::Plans | Action::Organizations)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown action name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action \"{0}\"")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .copied()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), *action);
        }
    }

    #[test]
    fn test_serde_names_match_as_str() {
        for action in Action::ALL {
            let json = serde_json::to_string(action).unwrap();
            assert_eq!(json, format!("\"{}\"", action.as_str()));
        }
    }

    #[test]
    fn test_unknown_action() {
        let err = "delete".parse::<Action>().unwrap_err();
        assert_eq!(err.to_string(), "unknown action \"delete\"");
    }

    #[test]
    fn test_menu_actions_need_no_id() {
        assert!(!Action::Plans.needs_object_id());
        assert!(!Action::Organizations.needs_object_id());
        assert!(Action::Bills.needs_object_id());
        assert!(Action::Raw.needs_object_id());
    }
}
