//! A browsing session: the lanes plus everything needed to fill them.
//!
//! [`Session::perform`] carries out one [`Action`]: resolve the endpoint,
//! fetch the JSON, hand it to the matching view. Failures along the way
//! are logged and leave the lanes as they were; only an identifier whose
//! raw data cannot be located is reported back to the caller.

use futures::stream::{FuturesUnordered, StreamExt};
use revlane_dispatch::{DispatchError, EndpointResolver, Fetcher, ResourceKind};
use revlane_render::{message_node, Node, Renderer};
use serde_json::Value;

use crate::action::Action;
use crate::lanes::{LaneStack, NodeId, Origin};
use crate::views::{self, json_kind};

/// Where an action was triggered, and on which object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Click {
    pub origin: Origin,
    /// Overrides the `objectId` of the origin fragment.
    pub object_id: Option<String>,
}

impl Click {
    /// A click on a menu entry.
    pub fn menu() -> Self {
        Self {
            origin: Origin::Menu,
            object_id: None,
        }
    }

    /// A click on a fragment; the object id is read from the fragment.
    pub fn on(node: NodeId) -> Self {
        Self {
            origin: Origin::Node(node),
            object_id: None,
        }
    }

    pub fn with_object_id(mut self, id: impl Into<String>) -> Self {
        self.object_id = Some(id.into());
        self
    }
}

/// What performing an action led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The lanes were updated.
    Shown,
    /// Nothing changed; the reason was logged.
    Skipped,
    /// The raw JSON lives at `url`; the caller decides how to open it.
    OpenRaw { url: String, target: String },
}

/// Owns the lanes, the renderer, the resolver and the fetcher.
pub struct Session<F> {
    lanes: LaneStack,
    renderer: Renderer,
    resolver: EndpointResolver,
    fetcher: F,
}

impl<F: Fetcher> Session<F> {
    /// Creates a session with the standard menu.
    pub fn new(renderer: Renderer, resolver: EndpointResolver, fetcher: F) -> Self {
        let mut lanes = LaneStack::new();
        seed_menu(&mut lanes);
        Self {
            lanes,
            renderer,
            resolver,
            fetcher,
        }
    }

    pub fn lanes(&self) -> &LaneStack {
        &self.lanes
    }

    pub fn lanes_mut(&mut self) -> &mut LaneStack {
        &mut self.lanes
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn resolver(&self) -> &EndpointResolver {
        &self.resolver
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// The full page for the current state.
    pub fn page(&self) -> Node {
        self.lanes.to_node()
    }

    /// First fragment of the rightmost lane.
    pub fn first_in_current_lane(&self) -> Option<NodeId> {
        self.lanes
            .current_lane()?
            .fragments()
            .next()
            .map(|(id, _)| id)
    }

    /// Performs `action` as if triggered by `click`.
    pub async fn perform(&mut self, action: Action, click: Click) -> Result<Outcome, DispatchError> {
        let object_id = click.object_id.clone().or_else(|| match click.origin {
            Origin::Node(id) => self.lanes.object_id(id).map(str::to_string),
            Origin::Menu => None,
        });
        tracing::debug!(action = action.as_str(), object_id = object_id.as_deref(), "perform");

        if action.needs_object_id() && object_id.is_none() {
            let err = DispatchError::MissingObjectId(action.as_str().to_string());
            tracing::error!("{}", err);
            return Ok(Outcome::Skipped);
        }

        match action {
            Action::Raw => {
                let id = object_id.unwrap_or_default();
                let url = self.resolver.raw_url(&id)?;
                Ok(Outcome::OpenRaw { url, target: id })
            }
            Action::RawPlan => {
                let id = object_id.unwrap_or_default();
                match self.resolver.resolve(ResourceKind::Plan, Some(&id)) {
                    Some(url) => Ok(Outcome::OpenRaw { url, target: id }),
                    None => Ok(Outcome::Skipped),
                }
            }
            _ => {
                let Some(kind) = action.resource() else {
                    return Ok(Outcome::Skipped);
                };
                let Some(data) = self.fetch(kind, object_id.as_deref()).await else {
                    return Ok(Outcome::Skipped);
                };
                self.show(action, &data, click.origin).await;
                Ok(Outcome::Shown)
            }
        }
    }

    async fn fetch(&self, kind: ResourceKind, id: Option<&str>) -> Option<Value> {
        let url = self.resolver.resolve(kind, id)?;
        match self.fetcher.get_json(&url).await {
            Ok(data) => Some(data),
            Err(err) => {
                tracing::error!(resource = kind.tag(), "{}", err);
                None
            }
        }
    }

    async fn show(&mut self, action: Action, data: &Value, origin: Origin) {
        let lanes = &mut self.lanes;
        let renderer = &self.renderer;
        match action {
            Action::Plans => views::show_plans(lanes, renderer, data, origin),
            Action::Organizations => views::show_organizations(lanes, renderer, data, origin),
            Action::Plan => views::show_plan(lanes, renderer, data, origin),
            Action::Subscriptions => views::show_subscriptions(lanes, renderer, data, origin),
            Action::Statements => views::show_statements(lanes, renderer, data, origin),
            Action::Bills => views::show_bills(lanes, renderer, data, origin),
            Action::CustomerBills => self.fetch_and_add_customer_bills(data, origin).await,
            Action::CustomerBill => views::show_customer_bill(lanes, renderer, data, origin),
            Action::Acbrs => views::show_acbrs(lanes, renderer, data, origin),
            Action::Transactions => views::show_customer_bills(lanes, renderer, data, origin),
            Action::PurchasedProducts | Action::SoldProducts => {
                views::show_products(lanes, renderer, data, origin)
            }
            Action::Raw | Action::RawPlan => {}
        }
    }

    /// Shows the customer bill of every revenue bill in `revenue_bills`.
    ///
    /// The lane is pushed right away; the customer bills are fetched
    /// concurrently and appended as each one arrives.
    pub async fn fetch_and_add_customer_bills(&mut self, revenue_bills: &Value, origin: Origin) {
        self.lanes.clean_after(origin);
        self.lanes.push_lane(views::CUSTOMER_BILLS.label);

        let Some(bills) = revenue_bills.as_array() else {
            tracing::error!("expected a list of revenue bills, got {}", json_kind(revenue_bills));
            return;
        };
        if bills.is_empty() {
            if let Some(message) = views::CUSTOMER_BILLS.empty_message {
                self.lanes.add_to_current_lane(message_node(message));
            }
            return;
        }

        let urls: Vec<String> = bills
            .iter()
            .filter_map(|bill| {
                let id = bill.get("id").and_then(Value::as_str);
                self.resolver.resolve(ResourceKind::CustomerBill, id)
            })
            .collect();

        let fetcher = &self.fetcher;
        let mut pending: FuturesUnordered<_> = urls
            .into_iter()
            .map(|url| async move {
                let result = fetcher.get_json(&url).await;
                (url, result)
            })
            .collect();

        while let Some((url, result)) = pending.next().await {
            match result {
                Ok(customer_bill) => {
                    views::append_customer_bill(&mut self.lanes, &self.renderer, &customer_bill)
                }
                Err(err) => tracing::error!(url = url.as_str(), "{}", err),
            }
        }
    }
}

fn seed_menu(lanes: &mut LaneStack) {
    lanes.add_menu_group("Revenue Sharing");
    lanes.add_menu_entry("Plans", Some(Action::Plans));
    lanes.add_menu_entry("Subscriptions", None);

    lanes.add_menu_group("TMF 632 Party");
    lanes.add_menu_entry("Organizations", Some(Action::Organizations));
    for label in [
        "Individuals",
        "Service Specs",
        "Resource Specs",
        "Product Specs",
        "Product offerings",
        "Product offering prices",
    ] {
        lanes.add_menu_entry(label, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lanes::MenuItem;
    use revlane_dispatch::MemoryFetcher;
    use revlane_render::TemplateRegistry;

    fn session() -> Session<MemoryFetcher> {
        Session::new(
            Renderer::new(TemplateRegistry::with_builtins().unwrap()),
            EndpointResolver::default(),
            MemoryFetcher::new(),
        )
    }

    #[test]
    fn test_menu_is_seeded() {
        let s = session();
        let menu = s.lanes().menu();
        assert_eq!(menu[0], MenuItem::Group("Revenue Sharing".into()));
        let enabled: Vec<_> = menu
            .iter()
            .filter_map(|item| match item {
                MenuItem::Entry { label, action: Some(_) } => Some(label.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(enabled, vec!["Plans", "Organizations"]);
        assert_eq!(menu.len(), 11);
    }

    #[tokio::test]
    async fn test_missing_object_id_is_skipped() {
        let mut s = session();
        let outcome = s.perform(Action::Bills, Click::menu()).await.unwrap();
        assert_eq!(outcome, Outcome::Skipped);
        assert!(s.lanes().is_empty());
        assert!(s.fetcher().requests().is_empty());
    }

    #[tokio::test]
    async fn test_raw_plan_skips_fetch() {
        let mut s = session();
        let outcome = s
            .perform(Action::RawPlan, Click::menu().with_object_id("urn:ngsi-ld:plan:1"))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::OpenRaw {
                url: "http://localhost:8580/revenue/plans/urn:ngsi-ld:plan:1".into(),
                target: "urn:ngsi-ld:plan:1".into(),
            }
        );
        assert!(s.fetcher().requests().is_empty());
    }

    #[tokio::test]
    async fn test_unclassified_raw_is_an_error() {
        let mut s = session();
        let err = s
            .perform(Action::Raw, Click::menu().with_object_id("something-else"))
            .await
            .unwrap_err();
        assert!(err.is_user_visible());
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_lanes_untouched() {
        let mut s = session();
        let outcome = s.perform(Action::Plans, Click::menu()).await.unwrap();
        assert_eq!(outcome, Outcome::Skipped);
        assert!(s.lanes().is_empty());
    }
}
