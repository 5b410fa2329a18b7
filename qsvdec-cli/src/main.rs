//! qsvdec CLI entrypoint.
//!
//! ```bash
//! qsvdec --input out.264
//! qsvdec --input out.264 --seed 42 --max-chunk 4096
//! RUST_LOG=debug qsvdec --input out.264
//! ```
//!
//! Per-call progress goes to stderr via `tracing`; the final counters line
//! goes to stdout and is the program's only contract output:
//!
//! ```text
//! es count = <N>, totalSize=<N>, totalDecSize=<N>
//! ```

use std::fs::File;
use std::io::{BufReader, IsTerminal};
use std::path::PathBuf;

use clap::Parser;

use qsvdec::decoder::DEFAULT_CONV_OPT;
use qsvdec::error::DecodeError;
use qsvdec::harness::{DEFAULT_MAX_CHUNK, DecodeStats, RandomChunks, run_decode_loop};
use qsvdec::qsv::QsvDecoder;

#[derive(Parser, Debug)]
#[command(
    name = "qsvdec",
    version,
    about = "Fragmentation test harness for the Intel QSV H.264 decoder",
    after_help = "Examples:\n  qsvdec --input out.264\n  qsvdec --input out.264 --seed 42 --max-chunk 4096\n  RUST_LOG=debug qsvdec --input out.264"
)]
struct Cli {
    /// Raw H.264 elementary stream file (no container).
    #[arg(short = 'i', long = "input")]
    input: PathBuf,

    /// Exclusive upper bound for the random chunk length in bytes.
    #[arg(long = "max-chunk", default_value_t = DEFAULT_MAX_CHUNK)]
    max_chunk: usize,

    /// PRNG seed for reproducible chunk sizing.
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Conversion option forwarded verbatim to getFrame.
    #[arg(long = "conv-opt", default_value_t = DEFAULT_CONV_OPT)]
    conv_opt: i32,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    // Initialization failure is the one fault that aborts: the native
    // contract forbids decoding after a nonzero initialize status.
    let mut decoder = match QsvDecoder::new() {
        Ok(decoder) => decoder,
        Err(err) => {
            tracing::error!(error = %err, code = err.error_code(), "Decoder initialization failed");
            std::process::exit(err.error_code() as i32);
        }
    };

    let chunks = match cli.seed {
        Some(seed) => RandomChunks::seeded(cli.max_chunk, seed),
        None => RandomChunks::new(cli.max_chunk),
    };

    // Host-level faults do not abort: the run is reported with whatever
    // counters accumulated, including none.
    let stats = match File::open(&cli.input) {
        Ok(file) => run_decode_loop(&mut decoder, BufReader::new(file), chunks, cli.conv_opt),
        Err(err) => {
            let err = DecodeError::from(err);
            tracing::error!(
                error = %err,
                code = err.error_code(),
                input = %cli.input.display(),
                "Failed to open input"
            );
            DecodeStats::default()
        }
    };

    println!("{stats}");
}

fn init_tracing() {
    let ansi_enabled = std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(ansi_enabled)
        .init();
}
