use std::collections::HashSet;
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rand::prelude::*;
use rayon::prelude::*;

use hllsketch::{HyperLogLog, Sketch};

type BoxError = Box<dyn Error + Send + Sync>;

/// Run hyperloglog evaluation experiments.
#[derive(Parser)]
#[command(name = "evl")]
struct Cli {
    /// Number of worker threads.
    #[arg(short, long, default_value_t = 1)]
    jobs: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Insert random distinct strings and record estimations at the given
    /// cardinalities, one file per run.
    Cardinalities {
        #[arg(short, long)]
        precision: u8,
        #[arg(short, long)]
        runs: usize,
        #[arg(short, long, value_delimiter = ',', required = true)]
        cardinalities: Vec<usize>,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Estimate the number of distinct lines of each input file.
    Lines {
        #[arg(short, long)]
        precision: u8,
        #[arg(required = true)]
        input: Vec<PathBuf>,
    },
}

struct Estimation(u64, f64);

impl fmt::Display for Estimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.3}", self.0, self.1)
    }
}

// Runs evaluation experiments over random distinct strings.
fn cardinalities(
    precision: u8,
    runs: usize,
    cardinalities: &[usize],
    output: &Path,
) -> Result<(), BoxError> {
    let mut cardinalities = cardinalities.to_vec();
    cardinalities.sort_unstable();

    (0..runs).into_par_iter().try_for_each(|r| -> Result<(), BoxError> {
        let mut hll = Sketch::new(precision)?;

        let mut rng = rand::thread_rng();

        let mut seen = HashSet::new();

        let mut estimations = Vec::with_capacity(cardinalities.len());

        for cardinality in &cardinalities {
            while seen.len() < *cardinality {
                let value = format!("{:016x}", rng.gen::<u64>());

                hll.insert(&value);

                seen.insert(value);
            }

            estimations.push(Estimation(seen.len() as u64, hll.count()));
        }

        let filename = format!("est-p{}-r{}.dat", precision, r);

        save(&estimations, &output.join(filename))
    })
}

// Estimates the distinct lines of every file in `input`.
fn lines(precision: u8, input: &[PathBuf]) -> Result<(), BoxError> {
    let counts = input
        .par_iter()
        .map(|file| -> Result<_, BoxError> {
            let mut hll = Sketch::new(precision)?;

            let reader = BufReader::new(File::open(file)?);

            for line in reader.lines() {
                hll.insert(&line?);
            }

            Ok((file, hll.count()))
        })
        .collect::<Result<Vec<_>, BoxError>>()?;

    let stdout = io::stdout();
    let mut writer = stdout.lock();

    for (file, count) in counts {
        writeln!(writer, "{} {:.3}", file.display(), count)?;
    }

    Ok(())
}

// Saves the `values` into the file at `path`.
fn save<T>(values: &[T], path: &Path) -> Result<(), BoxError>
where
    T: fmt::Display,
{
    let mut writer = BufWriter::new(File::create(path)?);

    for val in values {
        writeln!(writer, "{}", val)?;
    }

    writer.flush()?;

    Ok(())
}

fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();

    rayon::ThreadPoolBuilder::new()
        .num_threads(cli.jobs)
        .build_global()?;

    match cli.command {
        Command::Cardinalities {
            precision,
            runs,
            cardinalities: cards,
            output,
        } => cardinalities(precision, runs, &cards, &output),
        Command::Lines { precision, input } => lines(precision, &input),
    }
}
