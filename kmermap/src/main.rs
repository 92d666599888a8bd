use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use kmermap::index::{self, GenomeIndex, IndexMeta};
use kmermap::mappability::{OutputKind, SearchParams};
use kmermap::output::{OutputDispatcher, OutputFormats};
use kmermap::pipeline::{self, RunConfig};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(
    name = "kmermap",
    author,
    version,
    about = "k-mer mappability and frequency with up to 4 mismatches",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the index of one or more FASTA files (directories are expanded)
    Index {
        /// FASTA files or directories containing FASTA files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Output prefix; the index is written to <PREFIX>.idx
        #[arg(short, long, default_value = "ref")]
        output: PathBuf,
    },
    /// Compute mappability or frequency of every k-mer of the indexed sequences
    Map(MapArgs),
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("formats")
        .required(true)
        .multiple(true)
        .args(["raw", "txt", "wig", "bed", "csv"])
))]
struct MapArgs {
    /// Index prefix (or path to the .idx file)
    #[arg(short = 'I', long = "index")]
    index: PathBuf,
    /// Output directory, created if missing
    #[arg(short = 'O', long = "output")]
    outdir: PathBuf,
    /// k-mer length
    #[arg(short = 'K', long = "length")]
    k: usize,
    /// Number of mismatches (0..=4)
    #[arg(short = 'E', long = "errors", default_value_t = 0)]
    errors: u8,
    /// Also search the reverse complement of every k-mer
    #[arg(short = 'c', long = "reverse-complement")]
    reverse_complement: bool,
    /// Count source files containing the k-mer instead of occurrences
    #[arg(long = "exclude-pseudo")]
    exclude_pseudo: bool,
    /// Store frequencies as 8-bit values (max 255)
    #[arg(long = "frequency-small", conflicts_with = "frequency_large")]
    frequency_small: bool,
    /// Store frequencies as 16-bit values (max 65535)
    #[arg(long = "frequency-large")]
    frequency_large: bool,
    /// Raw little-endian binary output
    #[arg(short = 'r', long = "raw")]
    raw: bool,
    /// Plain text output
    #[arg(short = 't', long = "txt")]
    txt: bool,
    /// Wig and chrom.sizes output
    #[arg(short = 'w', long = "wig")]
    wig: bool,
    /// Bed output
    #[arg(short = 'b', long = "bed")]
    bed: bool,
    /// Detailed csv listing the locations of every k-mer (slow, large)
    #[arg(short = 'd', long = "csv")]
    csv: bool,
    /// Worker threads (default: all available)
    #[arg(short = 'T', long = "threads")]
    threads: Option<usize>,
    /// Memory-map the index file instead of reading it through a buffer
    #[arg(short = 'm', long = "memory-mapping")]
    memory_mapping: bool,
    /// Debug logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
    /// Extra windows searched together per batch
    #[arg(long = "overlap", hide = true)]
    overlap: Option<usize>,
}

fn init_logger(verbose: bool) {
    let level = if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Index { inputs, output } => {
            init_logger(false);
            run_index(&inputs, &output)
        }
        Commands::Map(args) => {
            init_logger(args.verbose);
            run_map(args)
        }
    }
}

fn run_index(inputs: &[PathBuf], prefix: &Path) -> Result<()> {
    let t0 = std::time::Instant::now();
    let mut idx = GenomeIndex::build_from_paths(inputs)?;
    let input_files = idx.meta.input_files.clone();
    idx.set_meta(IndexMeta {
        input_files,
        build_args: Some(std::env::args().collect::<Vec<_>>().join(" ")),
        build_timestamp: Some(chrono::Utc::now().to_rfc3339()),
    });

    log::info!("sequences: {}", idx.num_sequences());
    log::info!("total_len: {}", idx.directory.iter().map(|e| e.length).sum::<u64>());

    let out_path = index::index_path(prefix);
    idx.save_to_file(&out_path)?;
    log::info!("Index saved: {} ({:.2}s)", out_path.display(), t0.elapsed().as_secs_f64());
    Ok(())
}

fn resolve_index(path: &Path) -> PathBuf {
    if path.is_file() {
        path.to_path_buf()
    } else {
        index::index_path(path)
    }
}

fn run_map(args: MapArgs) -> Result<()> {
    let formats = OutputFormats { raw: args.raw, txt: args.txt, wig: args.wig, bed: args.bed, csv: args.csv };
    if !formats.any() {
        bail!("choose at least one output format (--raw, --txt, --wig, --bed, --csv)");
    }

    let kind = if args.frequency_small {
        OutputKind::FrequencySmall
    } else if args.frequency_large {
        OutputKind::FrequencyLarge
    } else {
        OutputKind::Mappability
    };
    let threads = args
        .threads
        .unwrap_or_else(|| std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get));

    let mut params = SearchParams::new(args.k, args.errors)
        .with_reverse_complement(args.reverse_complement)
        .with_exclude_pseudo(args.exclude_pseudo)
        .with_threads(threads);
    if let Some(overlap) = args.overlap {
        params = params.with_overlap(overlap);
    }
    params.validate()?;

    if !args.outdir.exists() {
        log::warn!("output directory '{}' does not exist, creating it", args.outdir.display());
        std::fs::create_dir_all(&args.outdir)
            .with_context(|| format!("cannot create output directory '{}'", args.outdir.display()))?;
    }

    let index_file = resolve_index(&args.index);
    let t0 = std::time::Instant::now();
    let idx = if args.memory_mapping {
        GenomeIndex::load_mapped(&index_file)?
    } else {
        GenomeIndex::load_from_file(&index_file)?
    };
    log::info!(
        "Index loaded{}: {} ({} sequences, {:.2}s)",
        if args.memory_mapping { " (mmap)" } else { "" },
        index_file.display(),
        idx.num_sequences(),
        t0.elapsed().as_secs_f64()
    );

    let config = RunConfig {
        params,
        kind,
        record_locations: formats.needs_locations(),
        progress: std::io::stderr().is_terminal(),
    };
    let mut dispatcher = OutputDispatcher::new(&args.outdir, formats);
    let n = pipeline::run(&idx, &config, &mut dispatcher)?;
    log::info!("Done: {} segment(s), {} file(s) written", n, dispatcher.written().len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn frequency_widths_conflict() {
        let r = Cli::try_parse_from([
            "kmermap", "map", "-I", "x", "-O", "o", "-K", "4", "-r", "--frequency-small", "--frequency-large",
        ]);
        assert!(r.is_err());
    }

    #[test]
    fn memory_mapping_flag() {
        let cli = Cli::try_parse_from(["kmermap", "map", "-I", "x", "-O", "o", "-K", "4", "-r", "-m"]).unwrap();
        let Commands::Map(args) = cli.command else { panic!("expected map") };
        assert!(args.memory_mapping);
    }

    #[test]
    fn an_output_format_is_required() {
        assert!(Cli::try_parse_from(["kmermap", "map", "-I", "x", "-O", "o", "-K", "4"]).is_err());
        assert!(Cli::try_parse_from(["kmermap", "map", "-I", "x", "-O", "o", "-K", "4", "-w", "-b"]).is_ok());
    }
}
