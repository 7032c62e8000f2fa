//! Entry point for the sqminmax tool.
//! Parses the array size, synthesizes the array, and reports sequential vs. parallel timings.

use clap::Parser;
use log::{debug, LevelFilter};

use sq_min_max::benchmark::run_benchmark;
use sq_min_max::cli::Args;
use sq_min_max::data::DataSource;
use sq_min_max::parallel::{get_parallel_info, ParallelConfig};

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments; usage errors exit here
    let args = Args::parse();
    init_logging(args.verbose);

    get_parallel_info().log_info();
    let aggregator = ParallelConfig::new(args.threads).build_aggregator()?;

    println!(
        "Initializing array (size = {}) with random values\n",
        args.array_size
    );
    let source = DataSource::from_seed(args.seed);
    debug!("Data source: {:?}", source);
    let data = source.generate(args.array_size);

    let report = run_benchmark(&data, &aggregator)?;
    print!("{}", report.render());

    report.verify()?;
    Ok(())
}
