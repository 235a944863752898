use clap::{Args, Parser, Subcommand};
use loanboard::model::{AmountField, MoveDirection, PresetCategory};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "loanboard", bin_name = "loanboard", version)]
#[command(
    about = "Loan catalog editor with gist mirroring and a storefront renderer",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $LOANBOARD_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List products in display order
    #[command(alias = "ls")]
    List,

    /// Add a product
    Add(ProductArgs),

    /// Edit a product; unspecified fields keep their values
    Edit {
        /// Product number, as shown by `list`
        index: String,

        #[command(flatten)]
        fields: ProductArgs,
    },

    /// Show one product and its preset picks
    Show {
        index: String,
    },

    /// Delete a product
    #[command(alias = "rm")]
    Delete {
        index: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Move a product one place up or down
    #[command(alias = "mv")]
    Move {
        index: String,

        /// up or down
        #[arg(allow_negative_numbers = true)]
        direction: MoveDirection,
    },

    /// Manage the preset pick-lists
    Presets {
        #[command(subcommand)]
        action: Option<PresetCommands>,
    },

    /// Show or change remote settings
    Settings {
        /// api-url, token, file-name or storefront-url
        key: Option<String>,

        value: Option<String>,
    },

    /// Catalog and sync status
    Status,

    /// Push the catalog to the remote gist now
    Push,

    /// Render the published catalog as an HTML page
    Storefront {
        /// Published document URL (defaults to the storefront-url setting)
        #[arg(long)]
        url: Option<String>,

        /// Write the page to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Keep refreshing until Ctrl-C
        #[arg(short, long)]
        watch: bool,

        /// Refresh interval in seconds
        #[arg(long, default_value_t = 300, value_name = "SECS")]
        interval: u64,
    },
}

/// Product fields. Preset picks are 1-based numbers from `presets list`.
#[derive(Args, Debug, Default, Clone)]
pub struct ProductArgs {
    #[arg(long)]
    pub name: Option<String>,

    /// Image URL
    #[arg(long)]
    pub image: Option<String>,

    /// Target link
    #[arg(long)]
    pub link: Option<String>,

    #[arg(long, value_name = "N")]
    pub amount: Option<usize>,

    #[arg(long, value_name = "N")]
    pub procedure: Option<usize>,

    #[arg(long, value_name = "N")]
    pub period: Option<usize>,

    #[arg(long, value_name = "N")]
    pub age: Option<usize>,

    #[arg(long, value_name = "N")]
    pub promotion: Option<usize>,

    #[arg(long, value_name = "N")]
    pub discount: Option<usize>,
}

impl ProductArgs {
    /// Preset picks given on the command line, in category order.
    pub fn picks(&self) -> Vec<(PresetCategory, usize)> {
        [
            (PresetCategory::Amount, self.amount),
            (PresetCategory::Procedure, self.procedure),
            (PresetCategory::Period, self.period),
            (PresetCategory::Age, self.age),
            (PresetCategory::Promotion, self.promotion),
            (PresetCategory::Discount, self.discount),
        ]
        .into_iter()
        .filter_map(|(category, pick)| pick.map(|n| (category, n)))
        .collect()
    }
}

#[derive(Subcommand, Debug)]
pub enum PresetCommands {
    /// List every category
    #[command(alias = "ls")]
    List,

    /// Append a placeholder preset to a category
    Add { category: PresetCategory },

    /// Change one preset
    Set {
        category: PresetCategory,

        number: usize,

        value: String,

        /// Which half of an amount preset to change: value or unit
        #[arg(long)]
        field: Option<AmountField>,
    },

    /// Remove one preset
    #[command(alias = "remove")]
    Rm {
        category: PresetCategory,
        number: usize,
    },

    /// Interactive preset manager; changes apply on `save`
    Edit,
}
