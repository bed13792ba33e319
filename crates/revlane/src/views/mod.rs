//! Views: how each resource is laid out in the lanes.
//!
//! Every view follows the same steps: discard the lanes right of the
//! click, push a lane, append the rendered cards. Collections go through
//! [`ListView`]; single objects through [`show_detail`].
//!
//! | View | Card template | Empty message |
//! |------|---------------|---------------|
//! | [`show_plans`] | `plan_short_summary` | |
//! | [`show_organizations`] | `organization` | |
//! | [`show_plan`] | `plan_summary` | |
//! | [`show_subscriptions`] | `subscription_short_summary` | No subscriptions found |
//! | [`show_statements`] | `statement_short_summary` | No statements found |
//! | [`show_bills`] | `bill_short_summary` | No bills found |
//! | [`show_customer_bills`] | `cb_summary` | No customer bills found |
//! | [`show_products`] | `product` | No products found |
//! | [`show_customer_bill`] | `cb_summary` | |
//! | [`show_acbrs`] | `acbr_short_summary` | No acbrs found |

mod detail_view;
mod list_view;

pub use detail_view::{append_customer_bill, show_customer_bill, show_detail, show_plan};
pub use list_view::{
    show_acbrs, show_bills, show_customer_bills, show_organizations, show_plans, show_products,
    show_statements, show_subscriptions, ListView, ACBRS, BILLS, CUSTOMER_BILLS, ORGANIZATIONS,
    PLANS, PRODUCTS, STATEMENTS, SUBSCRIPTIONS,
};
pub(crate) use list_view::json_kind;
