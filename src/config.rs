use std::{fmt, str::FromStr, time::Duration};

use crate::error::BenchError;

/// Unit in which scores are reported.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TimeUnit {
    #[default]
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
}

impl TimeUnit {
    /// Convert a value in nanoseconds into this unit.
    pub fn from_nanos(&self, nanos: f64) -> f64 {
        match self {
            TimeUnit::Nanoseconds => nanos,
            TimeUnit::Microseconds => nanos / 1_000.0,
            TimeUnit::Milliseconds => nanos / 1_000_000.0,
            TimeUnit::Seconds => nanos / 1_000_000_000.0,
        }
    }

    /// Short label, as used on the command line.
    pub fn label(&self) -> &'static str {
        match self {
            TimeUnit::Nanoseconds => "ns",
            TimeUnit::Microseconds => "us",
            TimeUnit::Milliseconds => "ms",
            TimeUnit::Seconds => "s",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for TimeUnit {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<TimeUnit, BenchError> {
        match s {
            "ns" | "nanoseconds" => Ok(TimeUnit::Nanoseconds),
            "us" | "microseconds" => Ok(TimeUnit::Microseconds),
            "ms" | "milliseconds" => Ok(TimeUnit::Milliseconds),
            "s" | "seconds" => Ok(TimeUnit::Seconds),
            _ => Err(BenchError::Config(format!("unknown time unit {:?}", s))),
        }
    }
}

/// Run parameters consumed by the [`Driver`](crate::Driver).
#[derive(Clone, Debug, PartialEq)]
pub struct BenchConfig {
    /// Number of random entries in each container, before the marked key.
    pub capacity: usize,
    pub warmup_iterations: usize,
    /// Minimum wall time of one warmup iteration.
    pub warmup_duration: Duration,
    pub measurement_iterations: usize,
    /// Minimum wall time of one measurement iteration.
    pub measurement_duration: Duration,
    /// Number of isolated child processes per target, zero to run
    /// in-process.
    pub fork_count: usize,
    pub time_unit: TimeUnit,
    /// Dump both containers after every population.
    pub debug: bool,
    /// Seed a single random source for the whole run. When None every
    /// invocation draws from a fresh entropy-seeded source.
    pub seed: Option<u64>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            capacity: 10,
            warmup_iterations: 3,
            warmup_duration: Duration::from_secs(5),
            measurement_iterations: 5,
            measurement_duration: Duration::from_secs(10),
            fork_count: 1,
            time_unit: TimeUnit::Nanoseconds,
            debug: false,
            seed: None,
        }
    }
}

impl BenchConfig {
    /// Convert a signed capacity as supplied by the invoker, negative
    /// values are rejected.
    pub fn checked_capacity(capacity: i64) -> Result<usize, BenchError> {
        if capacity < 0 {
            let msg = format!("capacity must be >= 0, got {}", capacity);
            return Err(BenchError::Config(msg));
        }
        usize::try_from(capacity)
            .map_err(|_| BenchError::Config(format!("capacity {} too large", capacity)))
    }

    pub fn validate(&self) -> Result<(), BenchError> {
        if self.measurement_iterations == 0 {
            let msg = "measurement iterations must be >= 1".to_string();
            return Err(BenchError::Config(msg));
        }
        Ok(())
    }

    /// Configuration for the `fork`-th child, 1-based. A seeded run gives
    /// every fork its own seed so that forks measure different key streams
    /// while the run as a whole stays reproducible.
    pub fn for_fork(&self, fork: usize) -> BenchConfig {
        BenchConfig {
            seed: self.seed.map(|seed| seed.wrapping_add(fork as u64)),
            ..self.clone()
        }
    }

    /// Render this configuration back into command line arguments, used
    /// to launch forked children with identical parameters.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "--capacity".to_string(),
            self.capacity.to_string(),
            "--warmup-iterations".to_string(),
            self.warmup_iterations.to_string(),
            "--warmup-ms".to_string(),
            self.warmup_duration.as_millis().to_string(),
            "--measurement-iterations".to_string(),
            self.measurement_iterations.to_string(),
            "--measurement-ms".to_string(),
            self.measurement_duration.as_millis().to_string(),
            "--time-unit".to_string(),
            self.time_unit.label().to_string(),
        ];
        if self.debug {
            args.push("--debug".to_string());
        }
        if let Some(seed) = self.seed {
            args.push("--seed".to_string());
            args.push(seed.to_string());
        }
        args
    }
}
