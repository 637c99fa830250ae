use std::io::{self, BufRead, BufWriter, Write};
use std::process::ExitCode;

use clap::Parser;
use countmin_topk::TopK;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Reads whitespace-separated words from stdin and prints the most frequent.
#[derive(Parser, Debug)]
#[command(name = "countmin-topk")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of heavy hitters to track
    k: usize,

    /// Sketch width (defaults to max(100, k ln k))
    #[arg(long, requires = "depth")]
    width: Option<usize>,

    /// Sketch depth (defaults to max(3, ln k))
    #[arg(long, requires = "width")]
    depth: Option<usize>,

    /// Print each eviction as it happens
    #[arg(long)]
    evictions: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let stdout = io::stdout();
    match run(&args, io::stdin().lock(), BufWriter::new(stdout.lock())) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run<R: BufRead, W: Write>(
    args: &Args,
    input: R,
    mut out: W,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut topk = match (args.width, args.depth) {
        (Some(width), Some(depth)) => TopK::with_dimensions(args.k, width, depth)?,
        _ => TopK::new(args.k)?,
    };
    let dims = topk.dimensions();
    info!(k = args.k, width = dims.width, depth = dims.depth, "tracking heavy hitters");

    let mut words = 0u64;
    // Lines are read as bytes so one malformed line cannot end the run.
    for line in input.split(b'\n') {
        let line = line?;
        let line = String::from_utf8_lossy(&line);
        for word in line.split_whitespace() {
            words += 1;
            if let Some(evicted) = topk.add(word) {
                if args.evictions {
                    writeln!(out, "evicted {} for {}", evicted, word)?;
                }
            }
        }
    }
    info!(words, tracked = topk.len(), "finished reading input");

    for node in topk.list() {
        writeln!(out, "{} {}", node.key, node.frequency)?;
    }
    out.flush()?;
    Ok(())
}
