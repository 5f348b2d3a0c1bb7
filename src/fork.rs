use std::{
    io::{self, BufRead, BufReader, Write},
    path::Path,
    process::{Child, Command, Stdio},
};

use tracing::{error, info};

use crate::config::BenchConfig;
use crate::driver::{Report, Target};
use crate::error::BenchError;
use crate::stats::Samples;

/// Hidden flag that switches the binary into child mode.
pub const FORK_CHILD_FLAG: &str = "--fork-child";

const ITERATION_PREFIX: &str = "iteration ";

/// Run `target` in `config.fork_count` isolated child processes of `exe`,
/// one after the other, and aggregate every child's measurement scores
/// into a single report. Any failing child aborts the target.
pub fn run_forked(exe: &Path, config: &BenchConfig, target: Target) -> Result<Report, BenchError> {
    let forks = config.fork_count;
    let mut samples = Samples::new();
    for fork in 1..=forks {
        info!(target: "lookup_bench", bench = target.name(), fork, forks, "spawning fork");
        let mut child = Command::new(exe)
            .args(config.for_fork(fork).to_args())
            .arg("--target")
            .arg(target.short_name())
            .arg(FORK_CHILD_FLAG)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|err| BenchError::Fork(format!("{}: {}", exe.display(), err)))?;

        let fork_samples = match stream_child(&mut child) {
            Ok(fork_samples) => fork_samples,
            Err(err) => {
                // reap the child, its exit status no longer matters.
                child.kill().ok();
                child.wait().ok();
                return Err(err);
            }
        };
        let status = child
            .wait()
            .map_err(|err| BenchError::Fork(format!("fork {} of {}: {}", fork, forks, err)))?;

        if !status.success() {
            let msg = format!("fork {} of {} for {}: {}", fork, forks, target, status);
            error!(target: "lookup_bench", bench = target.name(), fork, "{}", msg);
            return Err(BenchError::Fork(msg));
        }
        if fork_samples.samples() != config.measurement_iterations {
            let msg = format!(
                "fork {} of {} for {}: expected {} iterations, got {}",
                fork,
                forks,
                target,
                config.measurement_iterations,
                fork_samples.samples()
            );
            return Err(BenchError::Fork(msg));
        }
        samples.merge(fork_samples);
    }
    Ok(Report::new(target, config, samples))
}

fn stream_child(child: &mut Child) -> Result<Samples, BenchError> {
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| BenchError::Fork("child stdout not captured".to_string()))?;
    let out = io::stdout();
    let mut out = out.lock();
    read_child_output(BufReader::new(stdout), &mut out)
}

/// Write one line per measurement score, the child half of the protocol
/// read back by [`read_child_output`].
pub fn emit_child_samples<W: Write>(samples: &Samples, w: &mut W) -> io::Result<()> {
    for score in samples.scores().iter() {
        writeln!(w, "{}{}", ITERATION_PREFIX, score)?;
    }
    w.flush()
}

/// Read a child's stdout line by line as it is produced. Score lines are
/// collected, every other line is debug output and goes to `out` right
/// away, so memory stays flat however much the child prints.
pub fn read_child_output<R, W>(reader: R, out: &mut W) -> Result<Samples, BenchError>
where
    R: BufRead,
    W: Write,
{
    let fork_err = |err: io::Error| BenchError::Fork(format!("child output: {}", err));

    let mut samples = Samples::new();
    for line in reader.lines() {
        let line = line.map_err(fork_err)?;
        match line.strip_prefix(ITERATION_PREFIX) {
            Some(score) => {
                let score: f64 = score.trim().parse().map_err(|_| {
                    BenchError::Fork(format!("malformed score line {:?}", line))
                })?;
                samples.sample(score);
            }
            None => writeln!(out, "{}", line).map_err(fork_err)?,
        }
    }
    out.flush().map_err(fork_err)?;
    Ok(samples)
}
