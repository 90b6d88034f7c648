//! Correctness and speedup check of the parallel sorter against the sequential one.
//!
//! Runs in two phases:
//!
//! 1. Correctness: `correctness_runs` rounds over freshly drawn inputs, where the
//!    sequential sorter, the parallel sorter and `slice::sort_unstable` must agree.
//! 2. Performance: `runs` timed rounds of the parallel sorter followed by `runs` timed
//!    rounds of the sequential sorter on `bench_size` elements each. The mean parallel
//!    time multiplied by `min_speedup` must stay below the mean sequential time.

use std::time::{Duration, Instant};

use clap::Parser;
use lomuto_quicksort::{
    ParallelConfig, ParallelQuicksort, SortError, DEFAULT_BLOCK_THRESHOLD, DEFAULT_WORKERS,
};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

/// Inputs are drawn uniformly from `0..=MAX_VALUE`.
pub const MAX_VALUE: i32 = 2_000_000_000;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Sort(#[from] SortError),

    #[error("correctness run {run}: sequential, parallel and reference sort disagree")]
    Mismatch { run: u32 },

    #[error(
        "parallel sort too slow: mean {parallel:?} x {min_speedup} is not below sequential mean \
         {sequential:?}"
    )]
    TooSlow {
        parallel: Duration,
        sequential: Duration,
        min_speedup: f64,
    },
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "quicksort-bench",
    about = "Compare sequential and fork-join parallel Lomuto quicksort"
)]
pub struct HarnessArgs {
    /// Worker pool size of the parallel sorter.
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    pub threads: usize,

    /// Partitions spanning fewer index steps are sorted without forking.
    #[arg(long, default_value_t = DEFAULT_BLOCK_THRESHOLD)]
    pub block: usize,

    /// Worker thread stack size in bytes.
    #[arg(long)]
    pub stack_size: Option<usize>,

    /// Number of correctness rounds.
    #[arg(long, default_value_t = 20)]
    pub correctness_runs: u32,

    /// Elements per correctness round.
    #[arg(long, default_value_t = 100_000)]
    pub correctness_size: usize,

    /// Number of timed rounds per sorter.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pub runs: u32,

    /// Elements per timed round.
    #[arg(long, default_value_t = 100_000_000)]
    pub bench_size: usize,

    /// Required factor between mean sequential and mean parallel time.
    #[arg(long, default_value_t = 3.0)]
    pub min_speedup: f64,

    /// Seed for the input generator, drawn from the OS if absent.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl HarnessArgs {
    pub fn parallel_config(&self) -> ParallelConfig {
        let config = ParallelConfig::new(self.block, self.threads);
        match self.stack_size {
            Some(stack_size) => config.with_stack_size(stack_size),
            None => config,
        }
    }
}

/// Wall-clock durations of the timed rounds.
#[derive(Debug, Clone, Default)]
pub struct Timings {
    pub parallel: Vec<Duration>,
    pub sequential: Vec<Duration>,
}

impl Timings {
    pub fn mean_parallel(&self) -> Duration {
        mean(&self.parallel)
    }

    pub fn mean_sequential(&self) -> Duration {
        mean(&self.sequential)
    }

    /// `sequential / parallel`, `0.0` while either side has no measurement.
    pub fn speedup(&self) -> f64 {
        let parallel = self.mean_parallel().as_secs_f64();
        let sequential = self.mean_sequential().as_secs_f64();
        if parallel == 0.0 || sequential == 0.0 {
            return 0.0;
        }

        sequential / parallel
    }
}

fn mean(durations: &[Duration]) -> Duration {
    if durations.is_empty() {
        return Duration::ZERO;
    }

    durations.iter().sum::<Duration>() / durations.len() as u32
}

pub struct Harness {
    args: HarnessArgs,
    sorter: ParallelQuicksort,
    rng: StdRng,
    dist: Uniform<i32>,
}

impl Harness {
    pub fn new(args: HarnessArgs) -> Result<Self, HarnessError> {
        let sorter = ParallelQuicksort::new(args.parallel_config())?;
        let rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            args,
            sorter,
            rng,
            dist: Uniform::new_inclusive(0, MAX_VALUE),
        })
    }

    pub fn run(&mut self) -> Result<Timings, HarnessError> {
        self.check_correctness()?;
        println!("Correctness passed\n");

        let timings = self.measure()?;
        self.check_speedup(&timings)?;
        println!("Performance passed, perform = {:.3}", timings.speedup());

        Ok(timings)
    }

    pub fn check_correctness(&mut self) -> Result<(), HarnessError> {
        tracing::info!(
            runs = self.args.correctness_runs,
            size = self.args.correctness_size,
            "checking correctness"
        );

        let mut seq = vec![0; self.args.correctness_size];
        for run in 0..self.args.correctness_runs {
            self.fill(&mut seq);
            let mut par = seq.clone();
            let mut reference = seq.clone();

            lomuto_quicksort::sort(&mut seq);
            self.sorter.sort(&mut par)?;
            reference.sort_unstable();

            if seq != par || par != reference {
                return Err(HarnessError::Mismatch { run });
            }
        }

        Ok(())
    }

    /// Times the parallel rounds first, then the sequential ones, refilling the same
    /// buffer with fresh values before every round.
    pub fn measure(&mut self) -> Result<Timings, HarnessError> {
        tracing::info!(
            runs = self.args.runs,
            size = self.args.bench_size,
            workers = self.sorter.config().workers,
            block_threshold = self.sorter.config().block_threshold,
            "measuring"
        );

        let mut data = vec![0; self.args.bench_size];
        let mut timings = Timings::default();

        for run in 1..=self.args.runs {
            self.fill(&mut data);
            let start = Instant::now();
            let stats = self.sorter.sort(&mut data)?;
            let elapsed = start.elapsed();

            tracing::debug!(run, forks = stats.forks, "parallel run finished");
            println!("Par time, run {run}: {} seconds.", elapsed.as_secs_f64());
            timings.parallel.push(elapsed);
        }
        println!("Parallel mid time: {}", timings.mean_parallel().as_secs_f64());

        for run in 1..=self.args.runs {
            self.fill(&mut data);
            let start = Instant::now();
            lomuto_quicksort::sort(&mut data);
            let elapsed = start.elapsed();

            println!("Seq time, run {run}: {} seconds.", elapsed.as_secs_f64());
            timings.sequential.push(elapsed);
        }
        println!("Sequence mid time: {}", timings.mean_sequential().as_secs_f64());

        Ok(timings)
    }

    pub fn check_speedup(&self, timings: &Timings) -> Result<(), HarnessError> {
        let parallel = timings.mean_parallel();
        let sequential = timings.mean_sequential();

        if parallel.as_secs_f64() * self.args.min_speedup < sequential.as_secs_f64() {
            return Ok(());
        }

        Err(HarnessError::TooSlow {
            parallel,
            sequential,
            min_speedup: self.args.min_speedup,
        })
    }

    fn fill(&mut self, data: &mut [i32]) {
        for val in data.iter_mut() {
            *val = self.dist.sample(&mut self.rng);
        }
    }
}
