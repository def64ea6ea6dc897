use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shape_redemption_utils::{InputState, RedemptionView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn render(&self, view: &RedemptionView) -> Result<String, serde_json::Error> {
        match self {
            OutputFormat::Text => Ok(view.to_string().trim_end().to_string()),
            OutputFormat::Json => serde_json::to_string_pretty(view),
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Pool component address, overrides the configured default
    #[arg(long, global = true)]
    pub component_address: Option<String>,
    /// Ledger state version to evaluate at
    #[arg(long, global = true)]
    pub state_version: Option<String>,
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub lower_price_bound: Option<String>,
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub upper_price_bound: Option<String>,
    /// How results are printed
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Check the redemption value of one position
    Single {
        #[arg(short, long)]
        nft_id: String,
    },
    /// Check several positions in one request
    Batch {
        /// Repeat for each position
        #[arg(short, long = "nft-id", required = true)]
        nft_ids: Vec<String>,
    },
    /// Edit inputs and run checks from a prompt
    Interactive,
}

impl Args {
    /// Writes the command line values over the configured starting input.
    pub fn apply_to(&self, input: &mut InputState) {
        if let Some(address) = &self.component_address {
            input.set_component_address(address.clone());
        }
        if let Some(version) = &self.state_version {
            input.set_state_version(version.clone());
        }
        if let Some(lower) = &self.lower_price_bound {
            input.set_lower_price_bound(lower.clone());
        }
        if let Some(upper) = &self.upper_price_bound {
            input.set_upper_price_bound(upper.clone());
        }

        match &self.command {
            Command::Single { nft_id } => {
                input.set_single_nft_id(nft_id.clone());
            }
            Command::Batch { nft_ids } => {
                input.set_batch_nft_ids(nft_ids.clone());
            }
            Command::Interactive => {}
        }
    }
}
