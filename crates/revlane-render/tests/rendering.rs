use insta::assert_snapshot;
use proptest::prelude::*;
use revlane_render::{Node, Renderer, TemplateRegistry};
use serde_json::{json, Value};

fn builtin_renderer() -> Renderer {
    Renderer::new(TemplateRegistry::with_builtins().unwrap())
}

fn list_renderer() -> Renderer {
    let mut registry = TemplateRegistry::new();
    registry
        .add_container(
            r#"<templates>
                 <section name="plans_template"><h2>Plans</h2><div name="content"/></section>
                 <article name="plans_item_template"><h3 name="name"/><p name="description"/></article>
               </templates>"#,
        )
        .unwrap();
    Renderer::new(registry)
}

fn mixed_element() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z ]{1,8}".prop_map(Value::String),
        any::<i32>().prop_map(|n| json!(n)),
        Just(Value::Null),
        Just(json!([])),
        any::<bool>().prop_map(Value::Bool),
        ("[a-z]{0,4}", "[a-z]{1,6}").prop_map(|(id, name)| json!({"id": id, "name": name})),
    ]
}

fn element_children(node: &Node) -> usize {
    node.as_element()
        .map(|el| el.children().iter().filter(|c| c.as_element().is_some()).count())
        .unwrap_or(0)
}

// =========================================================================
// Built-in templates
// =========================================================================

#[test]
fn test_builtin_plan_short_summary() {
    let node = builtin_renderer()
        .render_json(
            "plan_short_summary",
            &json!({
                "id": "urn:ngsi-ld:plan:1",
                "name": "Gold",
                "description": null,
                "lifecycleStatus": "active",
                "validFor": {"startDateTime": "2023-01-01T00:00:00Z"}
            }),
        )
        .unwrap();

    assert_snapshot!(node.to_html(), @r#"<div name="plan_short_summary_template" class="tmfbox plan" data-action="plan" objectId="urn:ngsi-ld:plan:1"><div class="title"><span name="name"><span>Gold</span></span></div><div name="lifecycleStatus" class="status"><span>active</span></div><div name="validFor" use_template="period"><span name="period_template" class="period"><span name="startDateTime"><span>2023-01-01</span></span> → </span></div></div>"#);
}

#[test]
fn test_builtin_cb_summary_keeps_object_id() {
    let node = builtin_renderer()
        .render_json(
            "cb_summary",
            &json!({"id": "urn:ngsi-ld:customer-bill:7", "billNo": "CB-7", "state": "settled"}),
        )
        .unwrap();
    let el = node.as_element().unwrap();
    assert_eq!(el.attr("objectId"), Some("urn:ngsi-ld:customer-bill:7"));
    assert_eq!(el.attr("data-action"), Some("acbrs"));
    assert!(el.named("billNo").is_some());
    assert!(el.named("billDate").is_none());
    assert!(el.named("relatedParty").is_none());
}

#[test]
fn test_builtin_list_items_sit_directly_in_ul() {
    let node = builtin_renderer()
        .render_json(
            "cb_summary",
            &json!({
                "billNo": "CB-1",
                "relatedParty": [
                    {"name": "Acme", "role": "provider"},
                    {"name": "Bob", "role": "customer"}
                ]
            }),
        )
        .unwrap();
    let list = node.as_element().unwrap().named("parties_template").unwrap();
    assert_eq!(list.tag(), "ul");
    let tags: Vec<&str> = list
        .children()
        .iter()
        .filter_map(|c| c.as_element())
        .map(|el| el.tag())
        .collect();
    assert_eq!(tags, ["li", "li"]);
}

// =========================================================================
// Scenarios
// =========================================================================

#[test]
fn test_date_under_any_key() {
    let node = builtin_renderer()
        .render_json("plan_summary", &json!("2023-05-01T12:00:00Z"))
        .unwrap();
    assert_eq!(node.text_content(), "2023-05-01");
}

#[test]
fn test_list_with_container_templates() {
    let node = list_renderer()
        .render_json(
            "plans",
            &json!([
                {"id": "a", "name": "Gold", "description": "Top tier"},
                {"id": "b", "name": "Silver", "description": null}
            ]),
        )
        .unwrap();

    assert_snapshot!(node.to_html(), @r#"<section name="plans_template"><h2>Plans</h2><div name="content"><article name="plans_item_template" objectId="a"><h3 name="name"><span>Gold</span></h3><p name="description"><span>Top tier</span></p></article><article name="plans_item_template" objectId="b"><h3 name="name"><span>Silver</span></h3></article></div></section>"#);
}

#[test]
fn test_nested_empty_arrays_collapse() {
    let mut registry = TemplateRegistry::new();
    registry
        .add_inline("bill", r#"<div><h3>Bill</h3><ul name="revenueItems"/></div>"#)
        .unwrap();
    let node = Renderer::new(registry)
        .render_json("bill", &json!({"revenueItems": []}))
        .unwrap();
    assert_eq!(node.to_html(), "<div><h3>Bill</h3></div>");
}

// =========================================================================
// Properties
// =========================================================================

proptest! {
    #[test]
    fn test_array_renders_one_child_per_element(items in prop::collection::vec("[a-zA-Z0-9 ]{1,12}", 1..20)) {
        let data = Value::Array(items.iter().cloned().map(Value::String).collect());
        let node = Renderer::default().render_json("things", &data).unwrap();
        prop_assert_eq!(element_children(&node), items.len());
    }

    #[test]
    fn test_array_children_are_rendered_items_in_order(
        items in prop::collection::vec(mixed_element(), 1..12),
    ) {
        let mut registry = TemplateRegistry::new();
        registry.add_inline("k", r#"<section><h4>K</h4><ul name="content"/></section>"#).unwrap();
        registry.add_inline("k_item", r#"<li><span name="text"/><b name="name"/></li>"#).unwrap();
        let r = Renderer::new(registry);

        let node = r.render_json("k", &Value::Array(items.clone())).unwrap();
        let content = node.as_element().unwrap().named("content").unwrap();
        let expected: Vec<Node> = items.iter().filter_map(|i| r.render_json("k_item", i)).collect();
        let skipped = items
            .iter()
            .filter(|i| matches!(i, Value::Null | Value::Bool(_)) || **i == json!([]))
            .count();

        prop_assert_eq!(content.children().len(), items.len() - skipped);
        prop_assert_eq!(content.children(), expected.as_slice());
    }

    #[test]
    fn test_empty_array_renders_nothing(key in "[a-z_]{1,16}") {
        prop_assert!(builtin_renderer().render_json(&key, &json!([])).is_none());
    }

    #[test]
    fn test_null_fields_leave_no_placeholder(
        present in "[a-z]{1,8}",
        absent in "[A-Z]{1,8}",
    ) {
        let mut registry = TemplateRegistry::new();
        registry
            .add_inline(
                "card",
                &format!(r#"<div><p name="{present}"/><p name="{absent}"/></div>"#),
            )
            .unwrap();
        let data = json!({ present.clone(): "x", absent.clone(): null });
        let node = Renderer::new(registry).render_json("card", &data).unwrap();
        let el = node.as_element().unwrap();
        prop_assert!(el.named(&present).is_some());
        prop_assert!(el.named(&absent).is_none());
    }
}
