//! Command-line interface.
//!
//! ```text
//! revlane [--base-url URL] [--templates PATH]... [--config FILE]
//!         [--output html|text|json] [--out FILE] [--then ACTION[=ID]]... <COMMAND>
//! ```
//!
//! The command opens the first lane, as if picked from the menu. Each
//! `--then` step is a click on the first card of the rightmost lane.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use revlane_dispatch::{DispatchError, Fetcher};

use crate::action::{Action, UnknownAction};
use crate::config::Overrides;
use crate::output::OutputMode;
use crate::session::{Click, Outcome, Session};

#[derive(Debug, Parser)]
#[command(name = "revlane", version, about = "Browse revenue-sharing billing data lane by lane")]
pub struct Cli {
    /// Backend base URL
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Template container file or directory (repeatable, first wins)
    #[arg(long = "templates", global = true, value_name = "PATH")]
    pub templates: Vec<PathBuf>,

    /// YAML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum)]
    pub output: Option<OutputMode>,

    /// Write the page to FILE instead of stdout
    #[arg(long, global = true, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Follow-up drill-down from the first card of the rightmost lane
    #[arg(long = "then", global = true, value_name = "ACTION[=ID]")]
    pub then: Vec<Step>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            config: self.config.clone(),
            base_url: self.base_url.clone(),
            templates: self.templates.clone(),
            timeout_secs: self.timeout,
            output: self.output,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// All revenue-sharing plans
    Plans,
    /// All organizations
    Organizations,
    /// One plan in detail
    Plan { id: String },
    /// Subscriptions to a plan
    Subscriptions { id: String },
    /// Statements of a subscription
    Statements { id: String },
    /// Revenue bills of a subscription
    Bills { id: String },
    /// Customer bills of a subscription, one per revenue bill
    CustomerBills { id: String },
    /// One customer bill
    CustomerBill { id: String },
    /// Applied customer billing rates of a bill
    Acbrs { id: String },
    /// Customer bills of an organization
    Transactions { id: String },
    /// Products an organization bought
    PurchasedProducts { id: String },
    /// Products an organization sells
    SoldProducts { id: String },
    /// Print the URL of the raw JSON behind an identifier
    Raw { id: String },
}

impl Command {
    pub fn action(&self) -> (Action, Option<&str>) {
        match self {
            Command::Plans => (Action::Plans, None),
            Command::Organizations => (Action::Organizations, None),
            Command::Plan { id } => (Action::Plan, Some(id)),
            Command::Subscriptions { id } => (Action::Subscriptions, Some(id)),
            Command::Statements { id } => (Action::Statements, Some(id)),
            Command::Bills { id } => (Action::Bills, Some(id)),
            Command::CustomerBills { id } => (Action::CustomerBills, Some(id)),
            Command::CustomerBill { id } => (Action::CustomerBill, Some(id)),
            Command::Acbrs { id } => (Action::Acbrs, Some(id)),
            Command::Transactions { id } => (Action::Transactions, Some(id)),
            Command::PurchasedProducts { id } => (Action::PurchasedProducts, Some(id)),
            Command::SoldProducts { id } => (Action::SoldProducts, Some(id)),
            Command::Raw { id } => (Action::Raw, Some(id)),
        }
    }
}

/// A `--then` step: an action, optionally on an explicit object id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub action: Action,
    pub object_id: Option<String>,
}

impl FromStr for Step {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (action, object_id) = match s.split_once('=') {
            Some((action, id)) => (action, Some(id.to_string()).filter(|id| !id.is_empty())),
            None => (s, None),
        };
        Ok(Step {
            action: action.trim().parse()?,
            object_id,
        })
    }
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// The lanes hold the result; render the page.
    Page,
    /// A raw-data URL to show instead of the page.
    Raw(String),
}

/// Runs the command and then every step against `session`.
pub async fn execute<F: Fetcher>(
    session: &mut Session<F>,
    command: &Command,
    steps: &[Step],
) -> Result<Report, DispatchError> {
    let (action, id) = command.action();
    let mut click = Click::menu();
    if let Some(id) = id {
        click = click.with_object_id(id);
    }
    if let Outcome::OpenRaw { url, .. } = session.perform(action, click).await? {
        return Ok(Report::Raw(url));
    }

    for step in steps {
        let Some(origin) = session.first_in_current_lane() else {
            tracing::warn!(action = step.action.as_str(), "no card to continue from, stopping");
            break;
        };
        let mut click = Click::on(origin);
        if let Some(id) = &step.object_id {
            click = click.with_object_id(id.as_str());
        }
        if let Outcome::OpenRaw { url, .. } = session.perform(step.action, click).await? {
            return Ok(Report::Raw(url));
        }
    }
    Ok(Report::Page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_command_and_steps() {
        let cli = Cli::try_parse_from([
            "revlane",
            "--output",
            "text",
            "subscriptions",
            "urn:ngsi-ld:plan:1",
            "--then",
            "bills",
            "--then",
            "acbrs=urn:ngsi-ld:customer-bill:2",
        ])
        .unwrap();
        assert_eq!(cli.output, Some(OutputMode::Text));
        assert_eq!(
            cli.command.action(),
            (Action::Subscriptions, Some("urn:ngsi-ld:plan:1"))
        );
        assert_eq!(
            cli.then,
            vec![
                Step { action: Action::Bills, object_id: None },
                Step {
                    action: Action::Acbrs,
                    object_id: Some("urn:ngsi-ld:customer-bill:2".into())
                },
            ]
        );
    }

    #[test]
    fn test_unknown_step_action_is_rejected() {
        assert!(Cli::try_parse_from(["revlane", "plans", "--then", "delete=1"]).is_err());
    }

    #[test]
    fn test_templates_repeat() {
        let cli = Cli::try_parse_from([
            "revlane",
            "--templates",
            "a.xhtml",
            "--templates",
            "dir",
            "plans",
        ])
        .unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.templates, vec![PathBuf::from("a.xhtml"), PathBuf::from("dir")]);
    }
}
