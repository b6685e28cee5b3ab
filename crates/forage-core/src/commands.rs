//! Chat command parsing and dispatch.
//!
//! Commands are single lines starting with `!`:
//!
//! - `!er <zone>...` ranks with the balanced policy.
//! - `!er_by <policy> <zone>...` ranks with an explicit policy.
//! - `!er_list` lists zone numbers.
//! - `!er_help` shows usage.
//!
//! Each reply is one outgoing message.

use forage_catalog::{Catalog, list_areas};
use tracing::error;

use crate::config::EngineConfig;
use crate::pipeline::recommend;
use crate::ranking::Policy;

/// Usage text shown by `!er_help` and whenever a route is missing.
pub const HELP_TEXT: &str = "Use `!er_list` to display each area's number.\n\
    Then use `!er [area #1] [area #2]...` to calculate the best options for your given path.\n\
    E.g. `!er 2 14 15`";

/// Reply sent when a request fails for reasons the user cannot fix.
pub const CALCULATION_FAILED: &str = "ERROR - Something went wrong while calculating the route";

/// Reply to a `!`-prefixed command nobody handles.
pub const UNKNOWN_COMMAND: &str = "Unknown command";

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Rank craftables along a route.
    Recommend {
        /// Policy name as typed.
        policy: String,
        /// Zone index tokens as typed.
        zones: Vec<String>,
    },
    /// List zone numbers.
    ListAreas,
    /// Show usage.
    Help,
    /// A `!` command with an unrecognized name.
    Unknown(String),
}

impl Command {
    /// Parse a chat line. Lines that are not commands give `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next()?.strip_prefix('!')?;

        let command = match name {
            "er" => Self::Recommend {
                policy: Policy::default().to_string(),
                zones: tokens.map(str::to_owned).collect(),
            },
            "er_by" => match tokens.next() {
                Some(policy) => Self::Recommend {
                    policy: policy.to_owned(),
                    zones: tokens.map(str::to_owned).collect(),
                },
                None => Self::Help,
            },
            "er_list" => Self::ListAreas,
            "er_help" => Self::Help,
            other => Self::Unknown(other.to_owned()),
        };
        Some(command)
    }
}

/// Run a command against the current catalog and return the replies in
/// send order.
pub fn execute(command: &Command, catalog: &Catalog, config: &EngineConfig) -> Vec<String> {
    match command {
        Command::Recommend { policy, zones } => {
            if zones.is_empty() {
                return vec![HELP_TEXT.to_owned()];
            }
            match recommend(catalog, config, policy, zones.iter().map(String::as_str)) {
                Ok(outcome) => {
                    let mut replies: Vec<String> = outcome
                        .errors
                        .iter()
                        .map(|msg| format!("ERROR - {msg}"))
                        .collect();
                    replies.extend(outcome.sections);
                    if outcome.show_help {
                        replies.push(HELP_TEXT.to_owned());
                    }
                    replies
                }
                Err(e) => {
                    error!(error = %e, policy = %policy, zones = ?zones, "recommendation failed");
                    vec![CALCULATION_FAILED.to_owned()]
                }
            }
        }
        Command::ListAreas => vec![list_areas(catalog)],
        Command::Help => vec![HELP_TEXT.to_owned()],
        Command::Unknown(_) => vec![UNKNOWN_COMMAND.to_owned()],
    }
}
