use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use fqbench_lib::benchmark;
use fqbench_lib::cli::{BenchmarkConfig, CombineConfig, PrepareConfig};
use fqbench_lib::prepare::SizeSpec;

#[derive(Parser)]
#[command(name = "fqbench")]
#[command(author = "fqbench Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "FASTQ chunk preparation and compressor benchmarking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove identifiers from a FASTQ file and optionally divide it into chunks
    Prepare(PrepareArgs),
    /// Benchmark a FASTQ file against predefined compressors, CSV to stdout
    Benchmark(BenchmarkArgs),
    /// Write one record holding a base range of the concatenated sequences
    Combine(CombineArgs),
}

#[derive(Parser)]
struct PrepareArgs {
    /// Input FASTQ file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Desired length of a single sequence (0 = keep source records)
    #[arg(long, default_value = "0")]
    seq_length: usize,

    /// Desired size of a chunk in bytes, with optional k/M/G suffix
    #[arg(long, value_name = "SIZE")]
    size: Option<SizeSpec>,

    /// Index of the chunk to output
    #[arg(long, default_value = "0")]
    chunk: usize,

    /// Output FASTQ file (default: derived from the input file name)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Parser)]
struct BenchmarkArgs {
    /// Input FASTQ file
    #[arg(value_name = "FILE", required_unless_present = "list")]
    input: Option<PathBuf>,

    /// Remove the intermediate files
    #[arg(long)]
    remove: bool,

    /// Directory for compressed and decompressed files
    #[arg(long, default_value = "out")]
    output_dir: PathBuf,

    /// Print the compressor command lines and exit
    #[arg(long)]
    list: bool,
}

#[derive(Parser)]
struct CombineArgs {
    /// Input FASTQ file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// First base of the range
    #[arg(long, default_value = "0")]
    start: usize,

    /// End of the range (exclusive)
    #[arg(long, default_value = "500000")]
    end: usize,

    /// Identifier of the output record (default: input path)
    #[arg(long)]
    label: Option<String>,

    /// Output FASTQ file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl PrepareArgs {
    fn into_config(self) -> PrepareConfig {
        PrepareConfig {
            input: self.input,
            output: self.output,
            seq_length: self.seq_length,
            size: self.size,
            chunk: self.chunk,
        }
    }
}

impl BenchmarkArgs {
    fn into_config(self) -> BenchmarkConfig {
        BenchmarkConfig {
            input: self.input.unwrap_or_default(),
            output_dir: self.output_dir,
            remove: self.remove,
        }
    }
}

impl CombineArgs {
    fn into_config(self) -> CombineConfig {
        CombineConfig {
            input: self.input,
            output: self.output,
            label: self.label,
            start: self.start,
            end: self.end,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if std::env::var("FQBENCH_NO_BANNER").is_err() {
        eprintln!("fqbench v{} - FASTQ preparation and compressor benchmark", env!("CARGO_PKG_VERSION"));
        eprintln!();
    }

    match cli.command {
        Commands::Prepare(args) => {
            let config = args.into_config();
            println!("Output file path: {}", config.output_path().display());
            fqbench_lib::prepare::prepare(&config)?;
        }
        Commands::Benchmark(args) => {
            let roster = benchmark::default_roster();
            if args.list {
                benchmark::list_roster(&roster, std::io::stdout().lock())?;
                return Ok(());
            }
            let config = args.into_config();
            benchmark::run_benchmark(
                &config,
                &roster,
                std::io::stdout().lock(),
                std::io::stderr().lock(),
            )?;
        }
        Commands::Combine(args) => {
            info!("Combining records...");
            fqbench_lib::combine::combine(&args.into_config())?;
        }
    }

    Ok(())
}
