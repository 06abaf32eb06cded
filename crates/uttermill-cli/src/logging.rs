use log::LevelFilter;
use stderrlog::Timestamp;

/// Levels reachable with `-v`, in increasing verbosity.
const LEVELS: [LevelFilter; 6] = [
    LevelFilter::Off,
    LevelFilter::Error,
    LevelFilter::Warn,
    LevelFilter::Info,
    LevelFilter::Debug,
    LevelFilter::Trace,
];

/// Timestamp precision for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogTimestamps {
    /// No timestamps.
    Off,

    /// Whole seconds.
    Sec,

    /// Milliseconds.
    Ms,
}

/// Logging setup arg group.
///
/// Each command picks its own default level; `-v` raises it one step per use.
#[derive(clap::Args, Debug)]
pub struct LogArgs {
    /// Silence log messages.
    #[clap(short, long)]
    pub quiet: bool,

    /// Raise the log level above the command default (-v, -vv, ...).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Timestamp log lines.
    #[arg(long, value_enum, default_value = "off")]
    timestamps: LogTimestamps,
}

impl LogArgs {
    /// The effective level for a command whose default is `default`.
    pub fn level(
        &self,
        default: LevelFilter,
    ) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Off;
        }
        let base = LEVELS.iter().position(|&l| l == default).unwrap_or(0);
        LEVELS[(base + self.verbose as usize).min(LEVELS.len() - 1)]
    }

    /// Install the stderr logger for the library and this binary.
    pub fn setup_logging(
        &self,
        default: LevelFilter,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let timestamp = match self.timestamps {
            LogTimestamps::Off => Timestamp::Off,
            LogTimestamps::Sec => Timestamp::Second,
            LogTimestamps::Ms => Timestamp::Millisecond,
        };

        stderrlog::new()
            .module("uttermill")
            .verbosity(self.level(default))
            .timestamp(timestamp)
            .init()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(clap::Parser, Debug)]
    struct Cli {
        #[command(flatten)]
        logging: LogArgs,
    }

    fn parse(args: &[&str]) -> LogArgs {
        Cli::try_parse_from(std::iter::once("uttermill").chain(args.iter().copied()))
            .unwrap()
            .logging
    }

    #[test]
    fn test_default_level_per_command() {
        let logging = parse(&[]);
        assert_eq!(logging.level(LevelFilter::Info), LevelFilter::Info);
        assert_eq!(logging.level(LevelFilter::Warn), LevelFilter::Warn);
        assert_eq!(logging.timestamps, LogTimestamps::Off);
    }

    #[test]
    fn test_verbose_steps_and_clamps() {
        let logging = parse(&["-v"]);
        assert_eq!(logging.level(LevelFilter::Warn), LevelFilter::Info);

        let logging = parse(&["-vvvvvv"]);
        assert_eq!(logging.level(LevelFilter::Warn), LevelFilter::Trace);
    }

    #[test]
    fn test_quiet_wins() {
        let logging = parse(&["-q", "-vv", "--timestamps", "ms"]);
        assert_eq!(logging.level(LevelFilter::Info), LevelFilter::Off);
        assert_eq!(logging.timestamps, LogTimestamps::Ms);
    }
}
