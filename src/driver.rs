use std::{
    fmt,
    hint::black_box,
    str::FromStr,
    time::{Duration, Instant},
};

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, error, info};

use crate::config::{BenchConfig, TimeUnit};
use crate::error::BenchError;
use crate::fixture::Fixture;
use crate::key::MapKey;
use crate::stats::Samples;

/// Benchmark targets, one per container under test.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Target {
    Tree,
    Hash,
}

impl Target {
    pub const ALL: [Target; 2] = [Target::Tree, Target::Hash];

    /// Name as it appears in the results table.
    pub fn name(&self) -> &'static str {
        match self {
            Target::Tree => "lookup.tree",
            Target::Hash => "lookup.hash",
        }
    }

    /// Name accepted on the command line.
    pub fn short_name(&self) -> &'static str {
        match self {
            Target::Tree => "tree",
            Target::Hash => "hash",
        }
    }

    fn marked(&self, fixture: &Fixture) -> MapKey {
        match self {
            Target::Tree => fixture.tree().marked,
            Target::Hash => fixture.hash().marked,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Target {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Target, BenchError> {
        match s {
            "tree" | "lookup.tree" => Ok(Target::Tree),
            "hash" | "lookup.hash" => Ok(Target::Hash),
            _ => Err(BenchError::Config(format!("unknown target {:?}", s))),
        }
    }
}

/// Lifecycle of a single target's run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    Idle,
    WarmingUp,
    Measuring,
    Reporting,
}

/// Aggregated outcome for one target at one capacity.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub target: Target,
    pub capacity: usize,
    pub time_unit: TimeUnit,
    pub samples: Samples,
}

impl Report {
    pub fn new(target: Target, config: &BenchConfig, samples: Samples) -> Report {
        Report {
            target,
            capacity: config.capacity,
            time_unit: config.time_unit,
            samples,
        }
    }

    /// Benchmark mode, always average time per operation.
    pub fn mode(&self) -> &'static str {
        "avgt"
    }

    /// Number of measurement iterations that make up the score.
    pub fn count(&self) -> usize {
        self.samples.samples()
    }

    /// Mean latency, in the configured unit.
    pub fn score(&self) -> f64 {
        self.time_unit.from_nanos(self.samples.mean())
    }

    /// Error margin, in the configured unit.
    pub fn error(&self) -> Option<f64> {
        self.samples.error().map(|e| self.time_unit.from_nanos(e))
    }

    pub fn units(&self) -> String {
        format!("{}/op", self.time_unit.label())
    }
}

/// Driver runs warmup and measurement iterations for a target and
/// aggregates the per-iteration scores.
///
/// Every invocation builds a fresh [`Fixture`], times exactly one lookup
/// of the marked key, and resets the fixture. An iteration repeats
/// invocations until its minimum duration has elapsed.
pub struct Driver {
    config: BenchConfig,
    phase: Phase,
    rng: Option<StdRng>,
}

impl Driver {
    pub fn new(config: BenchConfig) -> Result<Driver, BenchError> {
        config.validate()?;
        let rng = config.seed.map(StdRng::seed_from_u64);
        Ok(Driver {
            config,
            phase: Phase::Idle,
            rng,
        })
    }

    #[inline]
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Warmup, measure and report `target`. The first failure aborts the
    /// target's run, nothing is retried.
    pub fn run(&mut self, target: Target) -> Result<Report, BenchError> {
        let samples = self.measure(target)?;

        self.transition(target, Phase::Reporting);
        let report = Report::new(target, &self.config, samples);
        info!(
            target: "lookup_bench",
            bench = target.name(),
            capacity = self.config.capacity,
            score = report.score(),
            units = %report.units(),
            "result"
        );
        self.transition(target, Phase::Idle);
        Ok(report)
    }

    /// Warmup and measure `target`, returning the measurement iteration
    /// scores in nanoseconds per operation. Warmup scores are discarded.
    pub fn measure(&mut self, target: Target) -> Result<Samples, BenchError> {
        match self.do_measure(target) {
            Ok(samples) => Ok(samples),
            Err(err) => {
                error!(target: "lookup_bench", bench = target.name(), %err, "run aborted");
                self.transition(target, Phase::Idle);
                Err(err)
            }
        }
    }

    fn do_measure(&mut self, target: Target) -> Result<Samples, BenchError> {
        let (n, dur) = (self.config.warmup_iterations, self.config.warmup_duration);
        self.transition(target, Phase::WarmingUp);
        for i in 1..=n {
            let score = self.iteration(target, dur)?;
            debug!(target: "lookup_bench", bench = target.name(), i, n, score, "warmup");
        }

        let (n, dur) = (
            self.config.measurement_iterations,
            self.config.measurement_duration,
        );
        self.transition(target, Phase::Measuring);
        let mut samples = Samples::new();
        for i in 1..=n {
            let score = self.iteration(target, dur)?;
            debug!(target: "lookup_bench", bench = target.name(), i, n, score, "iteration");
            samples.sample(score);
        }
        Ok(samples)
    }

    /// Run invocations until `min_duration` has elapsed, at least one.
    /// Return the average timed lookup latency in nanoseconds.
    pub fn iteration(&mut self, target: Target, min_duration: Duration) -> Result<f64, BenchError> {
        let start = Instant::now();
        let (mut ops, mut elapsed) = (0_u64, Duration::ZERO);
        loop {
            elapsed += self.invoke(target)?;
            ops += 1;
            if start.elapsed() >= min_duration {
                break;
            }
        }
        Ok(elapsed.as_nanos() as f64 / ops as f64)
    }

    /// Setup, one timed lookup, teardown. Return the lookup latency.
    pub fn invoke(&mut self, target: Target) -> Result<Duration, BenchError> {
        let capacity = self.config.capacity;
        let mut fixture = match self.rng.as_mut() {
            Some(rng) => Fixture::setup(capacity, rng)?,
            None => Fixture::setup(capacity, &mut StdRng::from_entropy())?,
        };
        if self.config.debug {
            fixture.pretty_print();
        }

        let fixture_ref = black_box(&fixture);
        let (value, elapsed) = match target {
            Target::Tree => {
                let start = Instant::now();
                let value = fixture_ref.tree_lookup();
                (value, start.elapsed())
            }
            Target::Hash => {
                let start = Instant::now();
                let value = fixture_ref.hash_lookup();
                (value, start.elapsed())
            }
        };
        black_box(value);

        if value.is_none() {
            let key = target.marked(&fixture);
            let target = target.name().to_string();
            return Err(BenchError::InvariantViolation { target, key });
        }
        fixture.reset();
        Ok(elapsed)
    }

    fn transition(&mut self, target: Target, next: Phase) {
        debug!(target: "lookup_bench", bench = target.name(), from = ?self.phase, to = ?next, "phase");
        if let Phase::WarmingUp | Phase::Measuring = next {
            info!(target: "lookup_bench", bench = target.name(), phase = ?next, "start");
        }
        self.phase = next;
    }
}
