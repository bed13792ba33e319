//! Single-object views.

use revlane_render::Renderer;
use serde_json::Value;

use crate::lanes::{LaneStack, Origin};

/// Replaces the lanes right of `origin` with one lane holding a single
/// card rendered under `key`.
pub fn show_detail(
    lanes: &mut LaneStack,
    renderer: &Renderer,
    label: &str,
    key: &str,
    data: &Value,
    origin: Origin,
) {
    lanes.clean_after(origin);
    lanes.push_lane(label);
    if let Some(node) = renderer.render_json(key, data) {
        lanes.add_to_current_lane(node);
    }
}

pub fn show_plan(lanes: &mut LaneStack, renderer: &Renderer, data: &Value, origin: Origin) {
    show_detail(lanes, renderer, "Plan", "plan_summary", data, origin);
}

pub fn show_customer_bill(lanes: &mut LaneStack, renderer: &Renderer, data: &Value, origin: Origin) {
    show_detail(lanes, renderer, "Customer Bill", "cb_summary", data, origin);
}

/// Adds one customer bill to the current lane, without touching the lanes.
pub fn append_customer_bill(lanes: &mut LaneStack, renderer: &Renderer, data: &Value) {
    if let Some(node) = renderer.render_json("cb_summary", data) {
        lanes.add_to_current_lane(node);
    }
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
    fn test_show_plan_renders_summary() {
        let mut lanes = LaneStack::new();
        show_plan(
            &mut lanes,
            &renderer(),
            &json!({"id": "urn:ngsi-ld:plan:1", "name": "Gold", "description": "Best"}),
            Origin::Menu,
        );
        let lane = lanes.current_lane().unwrap();
        assert_eq!(lane.len(), 1);
        let (id, node) = lane.fragments().next().unwrap();
        assert_eq!(lanes.object_id(id), Some("urn:ngsi-ld:plan:1"));
        assert!(node.text_content().contains("Best"));
    }

    #[test]
    fn test_append_customer_bill_keeps_lanes() {
        let r = renderer();
        let mut lanes = LaneStack::new();
        lanes.push_lane("a");
        lanes.push_lane("b");
        append_customer_bill(&mut lanes, &r, &json!({"id": "cb1", "billNo": "1"}));
        append_customer_bill(&mut lanes, &r, &json!({"id": "cb2", "billNo": "2"}));
        assert_eq!(lanes.len(), 2);
        assert_eq!(lanes.current_lane().unwrap().len(), 2);
    }

    #[test]
    fn test_append_without_lane_is_dropped() {
        let mut lanes = LaneStack::new();
        append_customer_bill(&mut lanes, &renderer(), &json!({"id": "cb1"}));
        assert!(lanes.is_empty());
    }
}
