use clap::Parser;

use crate::Wiring;

/// Bounded producer/consumer pipeline over directory paths.
#[derive(Clone, Debug, Default, Parser)]
#[command(name = "dirpipe")]
#[command(about = "Send directory paths through a bounded queue and report each one.")]
pub struct Cli {
    /// Paths to send. Default: the built-in list (or `paths` from .dirpipe.toml).
    #[arg(value_name = "PATH")]
    pub paths: Vec<String>,

    /// Queue capacity. 0 makes every push wait for a matching receive.
    #[arg(long, short = 'c', value_parser = clap::value_parser!(usize))]
    pub capacity: Option<usize>,

    /// Who closes the queue: the orchestrator's producer wrapper, or the producer itself.
    #[arg(long, value_enum)]
    pub wiring: Option<Wiring>,

    /// Consume with a fixed worker pool instead of one task per item. No value: all available threads.
    #[arg(long, short = 'w', num_args = 0..=1, default_missing_value = "0", value_parser = clap::value_parser!(usize))]
    pub workers: Option<usize>,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,

    /// Print the run report as JSON on stderr when done.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub summary: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args() {
        let cli = Cli::try_parse_from(["dirpipe"]).unwrap();
        assert!(cli.paths.is_empty());
        assert!(cli.capacity.is_none());
        assert!(cli.workers.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "dirpipe",
            "/srv",
            "/opt",
            "-c",
            "5",
            "--wiring",
            "callee-signals",
            "-w",
        ])
        .unwrap();
        assert_eq!(cli.paths, vec!["/srv", "/opt"]);
        assert_eq!(cli.capacity, Some(5));
        assert_eq!(cli.wiring, Some(Wiring::CalleeSignals));
        assert_eq!(cli.workers, Some(0));
    }
}
