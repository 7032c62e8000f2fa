//! Defines command-line interface options using `clap` for the sqminmax tool.

use clap::Parser;

/// Sequential vs. parallel sum of squares, minimum and maximum over a random byte array
#[derive(Parser, Debug)]
#[command(
    version,
    name = "sqminmax",
    about = "Benchmark a divide-and-conquer reduction over a random i8 array"
)]
pub struct Args {
    /// Number of elements in the array (must be a positive integer)
    #[arg(value_name = "ARRAY_SIZE", value_parser = parse_array_size)]
    pub array_size: usize,

    /// Number of partitions / threads, including the calling thread. Defaults to number of CPU cores.
    #[arg(short = 't', long, env = "SQMINMAX_THREADS", value_parser = parse_thread_count)]
    pub threads: Option<usize>,

    /// Seed for the random array, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Enable verbose (debug) logging.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

fn parse_positive(s: &str, what: &str) -> Result<usize, String> {
    let value: i128 = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid {what} '{s}': expected a positive integer"))?;
    if value < 0 {
        return Err(format!("{what} cannot be negative"));
    }
    if value == 0 {
        return Err(format!("{what} must be a positive integer"));
    }
    usize::try_from(value).map_err(|_| format!("{what} {value} is too large"))
}

fn parse_array_size(s: &str) -> Result<usize, String> {
    parse_positive(s, "Array size")
}

fn parse_thread_count(s: &str) -> Result<usize, String> {
    parse_positive(s, "Thread count")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_size_and_flags() {
        let args = Args::try_parse_from(["sqminmax", "1000", "-t", "4", "--seed", "9"]).unwrap();
        assert_eq!(args.array_size, 1000);
        assert_eq!(args.threads, Some(4));
        assert_eq!(args.seed, Some(9));
        assert!(!args.verbose);
    }

    #[test]
    fn rejects_bad_sizes() {
        assert!(Args::try_parse_from(["sqminmax"]).is_err());
        assert!(Args::try_parse_from(["sqminmax", "abc"]).is_err());
        assert!(Args::try_parse_from(["sqminmax", "0"]).is_err());
        assert!(Args::try_parse_from(["sqminmax", "--", "-5"]).is_err());
    }

    #[test]
    fn parse_positive_messages() {
        assert_eq!(parse_array_size("-5"), Err("Array size cannot be negative".to_string()));
        assert_eq!(parse_thread_count("0"), Err("Thread count must be a positive integer".to_string()));
        assert_eq!(parse_array_size(" 12 "), Ok(12));
    }
}
