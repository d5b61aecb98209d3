use crate::errors;
use std::path::PathBuf;
use structopt::StructOpt;

/// Options for the demo runner.
#[derive(StructOpt, Debug)]
#[structopt(
    name = "multi-assert",
    about = "Run the bundled multi-assert scenarios and print their reports."
)]
pub struct Opts {
    /// Report configuration file (TOML). Without it the MULTI_ASSERT_*
    /// environment variables are used.
    #[structopt(short, long, parse(from_os_str))]
    pub config: Option<PathBuf>,

    /// When to colour reports: auto, always, never.
    #[structopt(long, default_value = "auto")]
    pub color: ColorOpt,

    /// Only run one kind of scenario: sync, async, parallel.
    #[structopt(short, long)]
    pub only: Option<OnlyOpt>,

    /// Worker threads for the async runtime. Defaults to the number of CPUs.
    #[structopt(short, long)]
    pub jobs: Option<usize>,

    /// Log more. Repeat for more detail.
    #[structopt(short, long, parse(from_occurrences))]
    pub verbose: u8,
}

impl Opts {
    /// Log filter used when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "multi_assert=warn",
            1 => "multi_assert=info",
            2 => "multi_assert=debug",
            _ => "multi_assert=trace",
        }
    }
}

/// Possible values for the --color flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorOpt {
    /// Colour when writing to a terminal.
    Auto,
    Always,
    Never,
}

impl std::str::FromStr for ColorOpt {
    type Err = errors::OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ColorOpt::Auto),
            "always" => Ok(ColorOpt::Always),
            "never" => Ok(ColorOpt::Never),
            _ => Err(errors::OptionError(
                "Must be one of auto, always, never.".to_string(),
            )),
        }
    }
}

/// Possible values for the --only flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnlyOpt {
    /// Checks run one after another.
    Sync,
    /// Checks polled together on one task.
    Async,
    /// Checks spawned as separate tasks.
    Parallel,
}

impl std::str::FromStr for OnlyOpt {
    type Err = errors::OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sync" => Ok(OnlyOpt::Sync),
            "async" => Ok(OnlyOpt::Async),
            "parallel" => Ok(OnlyOpt::Parallel),
            _ => Err(errors::OptionError(
                "Must be one of sync, async, parallel.".to_string(),
            )),
        }
    }
}
