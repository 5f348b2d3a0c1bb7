// Lookup latency of a single marked key, BTreeMap vs HashMap.
//
// For every configured capacity and target:
// * populate a fresh container with `capacity` random keys plus a marked key,
// * time one lookup of the marked key,
// * drop the container, and repeat until the iteration's time is up.
//
// Warmup iterations are discarded, measurement iterations are averaged
// and printed as a results table on stdout. Logs go to stderr.

use std::{
    env, io,
    process::ExitCode,
    time::Duration,
};

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use lookup_bench::{
    fork, render_json, render_table, BenchConfig, BenchError, Driver, Target, TimeUnit,
};

#[derive(Parser, Debug)]
#[command(name = "lookup-bench", about = "Single-key lookup latency, BTreeMap vs HashMap")]
struct Args {
    /// Entries per container, comma separated to sweep several sizes.
    #[arg(long, value_delimiter = ',', default_value = "10", allow_negative_numbers = true)]
    capacity: Vec<i64>,

    #[arg(long, default_value_t = 3)]
    warmup_iterations: usize,

    /// Minimum duration of a warmup iteration, in milliseconds.
    #[arg(long, default_value_t = 5_000)]
    warmup_ms: u64,

    #[arg(long, default_value_t = 5)]
    measurement_iterations: usize,

    /// Minimum duration of a measurement iteration, in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    measurement_ms: u64,

    /// Isolated child processes per target, 0 runs in-process.
    #[arg(long, default_value_t = 1)]
    forks: usize,

    /// Reporting unit: ns, us, ms or s.
    #[arg(long, default_value = "ns")]
    time_unit: TimeUnit,

    /// Targets to run, tree and/or hash. Defaults to both.
    #[arg(long)]
    target: Vec<Target>,

    /// Seed the random source for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Print both containers after every population.
    #[arg(long)]
    debug: bool,

    /// Print results as JSON lines instead of a table.
    #[arg(long)]
    json: bool,

    #[arg(long, hide = true)]
    fork_child: bool,
}

impl Args {
    fn configs(&self) -> Result<Vec<BenchConfig>, BenchError> {
        let mut configs = vec![];
        for capacity in self.capacity.iter() {
            let config = BenchConfig {
                capacity: BenchConfig::checked_capacity(*capacity)?,
                warmup_iterations: self.warmup_iterations,
                warmup_duration: Duration::from_millis(self.warmup_ms),
                measurement_iterations: self.measurement_iterations,
                measurement_duration: Duration::from_millis(self.measurement_ms),
                fork_count: self.forks,
                time_unit: self.time_unit,
                debug: self.debug,
                seed: self.seed,
            };
            config.validate()?;
            configs.push(config);
        }
        Ok(configs)
    }

    fn targets(&self) -> Vec<Target> {
        if self.target.is_empty() {
            Target::ALL.to_vec()
        } else {
            self.target.clone()
        }
    }
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let res = if args.fork_child {
        run_child(&args)
    } else {
        run(&args)
    };
    match res {
        Ok(code) => code,
        Err(err @ BenchError::Config(_)) => {
            error!(target: "lookup_bench", %err, "startup failed");
            ExitCode::from(2)
        }
        Err(err) => {
            error!(target: "lookup_bench", %err, "benchmark failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode, BenchError> {
    let configs = args.configs()?;
    let targets = args.targets();
    let exe = if args.forks > 0 {
        let exe = env::current_exe().map_err(|err| BenchError::Fork(err.to_string()))?;
        Some(exe)
    } else {
        None
    };

    let (mut reports, mut failed) = (vec![], false);
    for config in configs.iter() {
        for target in targets.iter().cloned() {
            let res = match exe.as_ref() {
                Some(exe) => fork::run_forked(exe, config, target),
                None => Driver::new(config.clone()).and_then(|mut d| d.run(target)),
            };
            match res {
                Ok(report) => reports.push(report),
                Err(err) => {
                    error!(
                        target: "lookup_bench",
                        bench = target.name(),
                        capacity = config.capacity,
                        %err,
                        "target aborted"
                    );
                    failed = true;
                }
            }
        }
    }

    if args.json {
        for report in reports.iter() {
            println!("{}", render_json(report));
        }
    } else if !reports.is_empty() {
        print!("{}", render_table(&reports));
        if args.debug {
            for r in reports.iter() {
                r.samples.pretty_print(&format!("{}:{} ", r.target, r.capacity));
            }
        }
    }
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

// Child mode: one capacity, one target, scores to stdout.
fn run_child(args: &Args) -> Result<ExitCode, BenchError> {
    let configs = args.configs()?;
    let targets = args.targets();
    let (config, target) = match (configs.as_slice(), targets.as_slice()) {
        ([config], [target]) => (config.clone(), *target),
        _ => {
            let msg = "fork child takes exactly one capacity and one target".to_string();
            return Err(BenchError::Config(msg));
        }
    };

    let samples = Driver::new(config)?.measure(target)?;
    let stdout = io::stdout();
    fork::emit_child_samples(&samples, &mut stdout.lock())
        .map_err(|err| BenchError::Fork(err.to_string()))?;
    Ok(ExitCode::SUCCESS)
}
