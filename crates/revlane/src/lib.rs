//! # Revlane - lane-based drill-down over revenue-sharing data
//!
//! Revlane shows billing data as a row of lanes. The leftmost column is a
//! fixed menu; each drill-down (plan → subscriptions → bills → ACBRs)
//! pushes a lane to the right, and clicking in an earlier lane discards
//! everything right of it.
//!
//! - [`lanes`]: the [`LaneStack`](lanes::LaneStack) and its page layout
//! - [`views`]: which template each resource is rendered with
//! - [`session`]: resolve, fetch, render, place
//! - [`config`], [`output`], [`cli`]: the binary's plumbing
//!
//! Rendering lives in `revlane-render`, endpoints and fetching in
//! `revlane-dispatch`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use revlane::session::{Click, Session};
//! use revlane::Action;
//! use revlane_dispatch::{EndpointResolver, HttpFetcher, DEFAULT_TIMEOUT};
//! use revlane_render::{Renderer, TemplateRegistry};
//!
//! let mut session = Session::new(
//!     Renderer::new(TemplateRegistry::with_builtins()?),
//!     EndpointResolver::default(),
//!     HttpFetcher::new(DEFAULT_TIMEOUT)?,
//! );
//! session.perform(Action::Plans, Click::menu()).await?;
//! println!("{}", session.page());
//! ```

pub mod action;
pub mod cli;
pub mod config;
pub mod env;
pub mod lanes;
pub mod output;
pub mod session;
pub mod views;

pub use action::Action;
pub use lanes::{LaneStack, NodeId, Origin};
pub use output::{OutputDestination, OutputMode};
pub use session::{Click, Outcome, Session};
