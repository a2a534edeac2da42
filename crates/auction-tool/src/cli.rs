use {batch_auction::Limits, clap::Parser, std::path::PathBuf};

#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
    /// The log filter.
    #[arg(long, env, default_value = "warn,batch_auction=debug,auction_tool=debug")]
    pub log: String,

    /// Output log events as JSON.
    #[arg(long, env)]
    pub log_json: bool,

    #[clap(flatten)]
    pub limits: LimitArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Bounds on the size of numeric literals accepted in documents.
#[derive(clap::Args, Debug)]
pub struct LimitArgs {
    /// Maximum number of digits of an integer amount.
    #[arg(long, env, default_value_t = Limits::DEFAULT.max_bigint_digits)]
    pub max_bigint_digits: usize,

    /// Maximum number of digits before the decimal point of a decimal.
    #[arg(long, env, default_value_t = Limits::DEFAULT.max_decimal_integer_digits)]
    pub max_decimal_integer_digits: usize,

    /// Maximum number of digits after the decimal point of a decimal.
    #[arg(long, env, default_value_t = Limits::DEFAULT.max_decimal_scale)]
    pub max_decimal_scale: usize,
}

impl From<&LimitArgs> for Limits {
    fn from(args: &LimitArgs) -> Self {
        Self {
            max_bigint_digits: args.max_bigint_digits,
            max_decimal_integer_digits: args.max_decimal_integer_digits,
            max_decimal_scale: args.max_decimal_scale,
        }
    }
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Write the OpenAPI document describing both document kinds.
    Describe {
        /// File to write to instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Validate a problem or a solution.
    Validate {
        path: PathBuf,

        /// Problem the solution settles. Enables the checks that relate a
        /// solution to its auction.
        #[arg(long)]
        problem: Option<PathBuf>,
    },
    /// Print the canonical serialization of a document.
    Normalize {
        path: PathBuf,

        /// Order every keyed map by key.
        #[arg(long)]
        sort_keys: bool,
    },
}
