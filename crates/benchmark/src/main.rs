//! Pagefill benchmark CLI

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;

use pagefill::{Margins, PageOptions};
use pagefill_benchmark::{BenchmarkConfig, BenchmarkRunner, ItemSet, SetKind, SyntheticGenerator};

#[derive(Parser)]
#[command(name = "pagefill-bench")]
#[command(about = "Benchmark runner for the pagefill page packer")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Paginate an item set and report per-page statistics
    Run {
        /// JSON item set written by `generate`; a synthetic set is used if omitted
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Kind of synthetic set
        #[arg(short, long, value_enum, default_value = "mixed")]
        kind: KindArg,

        /// Number of synthetic items
        #[arg(short = 'n', long, default_value = "100")]
        count: usize,

        /// Random seed for reproducibility
        #[arg(short, long, default_value = "42")]
        seed: u64,

        #[command(flatten)]
        page: PageArgs,

        /// Number of runs (the fastest is reported)
        #[arg(short, long, default_value = "1")]
        runs: usize,

        /// Include placement coordinates in the JSON output
        #[arg(long)]
        placements: bool,

        /// Output file for results (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a synthetic item set as JSON
    Generate {
        /// Kind of synthetic set
        #[arg(short, long, value_enum, default_value = "mixed")]
        kind: KindArg,

        /// Number of items
        #[arg(short = 'n', long, default_value = "100")]
        count: usize,

        /// Random seed for reproducibility
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Page width the sizes are drawn against
        #[arg(long, default_value = "2480")]
        width: i64,

        /// Page height the sizes are drawn against
        #[arg(long, default_value = "3508")]
        height: i64,

        /// Output file; prints to stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct PageArgs {
    /// Page width
    #[arg(long, default_value = "2480")]
    width: i64,

    /// Page height
    #[arg(long, default_value = "3508")]
    height: i64,

    /// Margin on all four sides
    #[arg(long, default_value = "0")]
    margin: i64,

    /// Horizontal and vertical spacing between items
    #[arg(long, default_value = "10")]
    spacing: i64,

    /// Allow 90 degree rotation
    #[arg(long)]
    rotate: bool,

    /// Deepest search frame that retries on backtrack
    #[arg(short, long, default_value = "0")]
    depth: usize,
}

impl PageArgs {
    fn options(&self) -> PageOptions {
        PageOptions::new(self.width, self.height)
            .with_margins(Margins::uniform(self.margin))
            .with_spacing(self.spacing, self.spacing)
            .with_auto_rotate(self.rotate)
            .with_branching_depth_limit(self.depth)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    /// Sizes drawn from one range
    Uniform,
    /// Mostly small items with a few large ones
    Mixed,
    /// Long thin items
    Strips,
}

impl From<KindArg> for SetKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Uniform => SetKind::Uniform,
            KindArg::Mixed => SetKind::Mixed,
            KindArg::Strips => SetKind::Strips,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            file,
            kind,
            count,
            seed,
            page,
            runs,
            placements,
            output,
        } => {
            let set: ItemSet = match file {
                Some(path) => {
                    let json = fs::read_to_string(&path)?;
                    serde_json::from_str(&json)?
                }
                None => SyntheticGenerator::with_seed(seed).generate(
                    kind.into(),
                    count,
                    page.width,
                    page.height,
                ),
            };

            let config = BenchmarkConfig::new()
                .with_options(page.options())
                .with_runs_per_set(runs)
                .with_placements(placements);

            let result = BenchmarkRunner::new(config).run_set(&set)?;
            result.print_summary();

            if let Some(path) = output {
                result.save_json(&path)?;
                println!("Results saved to: {}", path.display());
            } else {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
        }

        Commands::Generate {
            kind,
            count,
            seed,
            width,
            height,
            output,
        } => {
            let set = SyntheticGenerator::with_seed(seed).generate(kind.into(), count, width, height);
            let json = serde_json::to_string_pretty(&set)?;

            match output {
                Some(path) => {
                    fs::write(&path, json)?;
                    println!("Generated {} items ({}) to: {}", set.len(), set.name, path.display());
                }
                None => println!("{}", json),
            }
        }
    }

    Ok(())
}
