use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Kitchen waste tracker: dashboards and next-day cook quantities from the waste log.
#[derive(Parser, Debug)]
#[command(name = "waste_forecast")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the kitchen state JSON file.
    #[arg(short, long, default_value = "kitchen_state.json")]
    pub file: PathBuf,

    /// Forecast policy JSON file (defaults apply when omitted).
    #[arg(short, long)]
    pub policy: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today.
    #[arg(long)]
    pub today: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show waste totals, trend and period comparisons.
    Dashboard {
        /// Range driving the totals and trend: day, week or month.
        #[arg(long, default_value = "week")]
        view: String,

        /// Last day of the range (defaults to today).
        #[arg(long)]
        anchor: Option<String>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,

        /// Also write trend and breakdown to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Recommend cook quantities for one day (defaults to tomorrow).
    Plan {
        /// Day to plan for.
        #[arg(long)]
        target: Option<String>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,

        /// Also write recommendations to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// List registered items.
    Items {
        /// Hide inactive items.
        #[arg(long)]
        active_only: bool,
    },

    /// Register a new item.
    AddItem {
        name: String,

        /// Unit of measure: pieces or kg.
        #[arg(long, default_value = "pieces")]
        unit: String,
    },

    /// Rename, re-unit or (de)activate an item.
    UpdateItem {
        id: u32,

        #[arg(long)]
        name: Option<String>,

        /// Unit of measure: pieces or kg.
        #[arg(long)]
        unit: Option<String>,

        #[arg(long, action = clap::ArgAction::Set)]
        active: Option<bool>,
    },

    /// Activate or deactivate an item.
    SetActive {
        id: u32,

        #[arg(long, action = clap::ArgAction::Set)]
        active: bool,
    },

    /// Record waste entries interactively.
    Log,

    /// List waste records, newest first.
    Waste {
        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,

        #[arg(long)]
        item: Option<u32>,

        #[arg(long, default_value = "50")]
        limit: usize,

        #[arg(long, default_value = "0")]
        offset: usize,
    },

    /// Write the effective forecast policy to a JSON file.
    WritePolicy { path: PathBuf },
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan {
            target: None,
            json: false,
            csv: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_item_args() {
        let cli = Cli::try_parse_from([
            "waste_forecast",
            "update-item",
            "3",
            "--unit",
            "kg",
            "--active",
            "false",
        ])
        .unwrap();

        match cli.command {
            Some(Command::UpdateItem {
                id,
                name,
                unit,
                active,
            }) => {
                assert_eq!(id, 3);
                assert_eq!(name, None);
                assert_eq!(unit.as_deref(), Some("kg"));
                assert_eq!(active, Some(false));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_no_subcommand_defaults_to_plan() {
        let cli = Cli::try_parse_from(["waste_forecast"]).unwrap();
        assert!(matches!(
            cli.command.unwrap_or_default(),
            Command::Plan { target: None, .. }
        ));
    }
}
