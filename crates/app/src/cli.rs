//! Command line definitions

use std::path::PathBuf;

use clap::Parser;
use restcheck_application::{Scenario, UnknownScenario};
use thiserror::Error;

/// restcheck - API contract suite for CRUD-style REST services
#[derive(Parser, Debug)]
#[command(
    name = "restcheck",
    version,
    about = "API contract suite for CRUD-style REST services",
    long_about = "Runs the posts and users scenarios against a JSONPlaceholder-style \
                  service.\n\nFailed scenarios are appended to the failure log and \
                  evidence is written under the report directory."
)]
pub struct Cli {
    /// YAML config file (defaults to $RESTCHECK_CONFIG, then built-in defaults)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Only run scenarios carrying this tag (e.g. smoke)
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Print the scenario catalog and exit
    #[arg(long)]
    pub list: bool,

    /// Scenarios to run, by name or identifier (default: all)
    #[arg(value_name = "SCENARIO")]
    pub scenarios: Vec<String>,
}

/// Why the command line selects nothing runnable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// A name that is not in the catalog.
    #[error(transparent)]
    Unknown(#[from] UnknownScenario),

    /// The filters leave no scenario to run.
    #[error("no scenario matches tag '{0}'")]
    NoMatch(String),
}

impl Cli {
    /// Resolves the scenarios to run, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::Unknown` for a name that is not in the
    /// catalog and `SelectionError::NoMatch` when the tag filter leaves
    /// nothing to run.
    pub fn selection(&self) -> Result<Vec<Scenario>, SelectionError> {
        let named = self
            .scenarios
            .iter()
            .map(|name| name.parse::<Scenario>())
            .collect::<Result<Vec<_>, _>>()?;

        let selected: Vec<_> = Scenario::all()
            .iter()
            .copied()
            .filter(|scenario| named.is_empty() || named.contains(scenario))
            .filter(|scenario| {
                self.tag
                    .as_deref()
                    .is_none_or(|tag| scenario.metadata().has_tag(tag))
            })
            .collect();

        match (&self.tag, selected.is_empty()) {
            (Some(tag), true) => Err(SelectionError::NoMatch(tag.clone())),
            _ => Ok(selected),
        }
    }
}
