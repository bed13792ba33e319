//! Collection views: one lane of cards, one card per element.

use revlane_render::{message_node, Renderer};
use serde_json::Value;

use crate::lanes::{LaneHandle, LaneStack, Origin};

/// How a collection is shown in its lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListView {
    /// Label the lane is pushed with.
    pub label: &'static str,
    /// Schema key each element is rendered under.
    pub item_key: &'static str,
    /// Shown instead of cards when the collection is empty.
    pub empty_message: Option<&'static str>,
}

impl ListView {
    pub const fn new(label: &'static str, item_key: &'static str) -> Self {
        Self {
            label,
            item_key,
            empty_message: None,
        }
    }

    pub const fn empty_message(mut self, message: &'static str) -> Self {
        self.empty_message = Some(message);
        self
    }

    /// Replaces the lanes right of `origin` with one lane showing `data`.
    ///
    /// `data` must be a JSON array. Anything else is logged and leaves the
    /// new lane empty.
    pub fn show(
        &self,
        lanes: &mut LaneStack,
        renderer: &Renderer,
        data: &Value,
        origin: Origin,
    ) -> LaneHandle {
        lanes.clean_after(origin);
        let handle = lanes.push_lane(self.label);

        let Some(items) = data.as_array() else {
            tracing::error!(
                view = self.label,
                "expected a list, got {}",
                json_kind(data)
            );
            return handle;
        };

        if items.is_empty() {
            if let Some(message) = self.empty_message {
                lanes.add_to_current_lane(message_node(message));
            }
            return handle;
        }

        for item in items {
            if let Some(node) = renderer.render_json(self.item_key, item) {
                lanes.add_to_current_lane(node);
            }
        }
        handle
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub const PLANS: ListView = ListView::new("Plans", "plan_short_summary");
pub const ORGANIZATIONS: ListView = ListView::new("Organizations", "organization");
pub const SUBSCRIPTIONS: ListView =
    ListView::new("Subscriptions", "subscription_short_summary").empty_message("No subscriptions found");
pub const STATEMENTS: ListView =
    ListView::new("Statements", "statement_short_summary").empty_message("No statements found");
pub const BILLS: ListView =
    ListView::new("Bills", "bill_short_summary").empty_message("No bills found");
pub const CUSTOMER_BILLS: ListView =
    ListView::new("Customer Bills", "cb_summary").empty_message("No customer bills found");
pub const PRODUCTS: ListView =
    ListView::new("Products", "product").empty_message("No products found");
pub const ACBRS: ListView =
    ListView::new("ACBRs", "acbr_short_summary").empty_message("No acbrs found");

pub fn show_plans(lanes: &mut LaneStack, renderer: &Renderer, data: &Value, origin: Origin) {
    PLANS.show(lanes, renderer, data, origin);
}

pub fn show_organizations(lanes: &mut LaneStack, renderer: &Renderer, data: &Value, origin: Origin) {
    ORGANIZATIONS.show(lanes, renderer, data, origin);
}

pub fn show_subscriptions(lanes: &mut LaneStack, renderer: &Renderer, data: &Value, origin: Origin) {
    SUBSCRIPTIONS.show(lanes, renderer, data, origin);
}

pub fn show_statements(lanes: &mut LaneStack, renderer: &Renderer, data: &Value, origin: Origin) {
    STATEMENTS.show(lanes, renderer, data, origin);
}

pub fn show_bills(lanes: &mut LaneStack, renderer: &Renderer, data: &Value, origin: Origin) {
    BILLS.show(lanes, renderer, data, origin);
}

pub fn show_customer_bills(lanes: &mut LaneStack, renderer: &Renderer, data: &Value, origin: Origin) {
    CUSTOMER_BILLS.show(lanes, renderer, data, origin);
}

/// Purchased and sold products of an organization.
pub fn show_products(lanes: &mut LaneStack, renderer: &Renderer, data: &Value, origin: Origin) {
    PRODUCTS.show(lanes, renderer, data, origin);
}

pub fn show_acbrs(lanes: &mut LaneStack, renderer: &Renderer, data: &Value, origin: Origin) {
    ACBRS.show(lanes, renderer, data, origin);
}

#[cfg(test)]
mod tests {
    use super::*;
    use revlane_render::TemplateRegistry;
    use serde_json::json;

    fn renderer() -> Renderer {
        Renderer::new(TemplateRegistry::with_builtins().unwrap())
    }

    #[test]
    fn test_list_pushes_one_lane_with_one_card_per_item() {
        let mut lanes = LaneStack::new();
        show_plans(
            &mut lanes,
            &renderer(),
            &json!([{"id": "p1", "name": "Gold"}, {"id": "p2", "name": "Silver"}]),
            Origin::Menu,
        );
        assert_eq!(lanes.len(), 1);
        let lane = lanes.lane(0).unwrap();
        assert_eq!(lane.label(), "Plans");
        assert_eq!(lane.len(), 2);
    }

    #[test]
    fn test_empty_list_shows_message() {
        let mut lanes = LaneStack::new();
        show_bills(&mut lanes, &renderer(), &json!([]), Origin::Menu);
        let lane = lanes.lane(0).unwrap();
        assert_eq!(lane.len(), 1);
        let (_, node) = lane.fragments().next().unwrap();
        assert_eq!(node.text_content(), "No bills found");
    }

    #[test]
    fn test_empty_plans_show_nothing() {
        let mut lanes = LaneStack::new();
        show_plans(&mut lanes, &renderer(), &json!([]), Origin::Menu);
        assert_eq!(lanes.len(), 1);
        assert!(lanes.lane(0).unwrap().is_empty());
    }

    #[test]
    fn test_non_list_leaves_empty_lane() {
        let mut lanes = LaneStack::new();
        show_acbrs(&mut lanes, &renderer(), &json!({"error": "boom"}), Origin::Menu);
        assert_eq!(lanes.len(), 1);
        assert!(lanes.lane(0).unwrap().is_empty());
    }

    #[test]
    fn test_items_rendering_nothing_are_skipped() {
        let mut lanes = LaneStack::new();
        show_products(&mut lanes, &renderer(), &json!([[], {"id": "x"}, null]), Origin::Menu);
        assert_eq!(lanes.lane(0).unwrap().len(), 1);
    }

    #[test]
    fn test_show_from_node_replaces_lanes_right_of_it() {
        let r = renderer();
        let mut lanes = LaneStack::new();
        show_plans(&mut lanes, &r, &json!([{"id": "p1"}]), Origin::Menu);
        let (plan, _) = lanes.lane(0).unwrap().fragments().next().unwrap();
        show_subscriptions(&mut lanes, &r, &json!([]), Origin::Node(plan));
        show_statements(&mut lanes, &r, &json!([]), Origin::Menu);
        assert_eq!(lanes.len(), 1);

        show_plans(&mut lanes, &r, &json!([{"id": "p1"}]), Origin::Menu);
        let (plan, _) = lanes.lane(0).unwrap().fragments().next().unwrap();
        show_subscriptions(&mut lanes, &r, &json!([]), Origin::Node(plan));
        show_subscriptions(&mut lanes, &r, &json!([]), Origin::Node(plan));
        assert_eq!(lanes.len(), 2);
        assert_eq!(lanes.lane(1).unwrap().label(), "Subscriptions");
    }
}
