// Two-sided 99.9% Student-t critical values, indexed by degrees of freedom.
const T_999: [f64; 30] = [
    636.619, 31.599, 12.924, 8.610, 6.869, 5.959, 5.408, 5.041, 4.781, 4.587, //
    4.437, 4.318, 4.221, 4.140, 4.073, 4.015, 3.965, 3.922, 3.883, 3.850, //
    3.819, 3.792, 3.768, 3.745, 3.725, 3.707, 3.690, 3.674, 3.659, 3.646,
];

/// Samples accumulates per-iteration scores, in nanoseconds per
/// operation, and computes mean, min, max and error margin over them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Samples {
    scores: Vec<f64>,
}

impl Samples {
    pub fn new() -> Samples {
        Default::default()
    }

    pub fn sample(&mut self, score: f64) {
        self.scores.push(score)
    }

    /// Fold scores from another run, say a separate fork, into this one.
    pub fn merge(&mut self, other: Samples) {
        self.scores.extend(other.scores)
    }

    /// Return number of scores sampled.
    pub fn samples(&self) -> usize {
        self.scores.len()
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Return minimum score, None if nothing was sampled.
    pub fn min(&self) -> Option<f64> {
        self.scores.iter().cloned().fold(None, |acc, s| match acc {
            Some(m) if m <= s => Some(m),
            _ => Some(s),
        })
    }

    /// Return maximum score, None if nothing was sampled.
    pub fn max(&self) -> Option<f64> {
        self.scores.iter().cloned().fold(None, |acc, s| match acc {
            Some(m) if m >= s => Some(m),
            _ => Some(s),
        })
    }

    /// Return the average score.
    pub fn mean(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        self.scores.iter().sum::<f64>() / self.scores.len() as f64
    }

    /// Sample standard deviation, None with fewer than two scores.
    pub fn stddev(&self) -> Option<f64> {
        let n = self.scores.len();
        if n < 2 {
            return None;
        }
        let mean = self.mean();
        let ss: f64 = self.scores.iter().map(|s| (s - mean) * (s - mean)).sum();
        Some((ss / (n - 1) as f64).sqrt())
    }

    /// Half-width of the 99.9% confidence interval around [`mean`].
    ///
    /// [`mean`]: Samples::mean
    pub fn error(&self) -> Option<f64> {
        let stddev = self.stddev()?;
        let n = self.scores.len();
        Some(t_critical(n - 1) * stddev / (n as f64).sqrt())
    }

    /// Pretty print score statistics in human readable format, useful in logs.
    pub fn pretty_print(&self, prefix: &str) {
        println!(
            "{}score (min, avg, max): {:?}",
            prefix,
            (self.min(), self.mean(), self.max())
        );
        if let (Some(err), Some(sd)) = (self.error(), self.stddev()) {
            println!("{}  error (99.9%) = {:.3}, stdev = {:.3}", prefix, err, sd);
        }
    }

    /// Convert score statistics to JSON format, useful for plotting.
    pub fn json(&self) -> String {
        let ss: Vec<String> = self.scores.iter().map(|s| format!("{}", s)).collect();
        let strs = [
            format!("\"samples\": {}", self.samples()),
            format!("\"mean\": {}", self.mean()),
            format!("\"min\": {}", json_opt(self.min())),
            format!("\"max\": {}", json_opt(self.max())),
            format!("\"error\": {}", json_opt(self.error())),
            format!("\"scores\": [{}]", ss.join(", ")),
        ];
        ("{ ".to_string() + strs.join(", ").as_str() + " }").to_string()
    }
}

fn t_critical(dof: usize) -> f64 {
    match dof {
        0 => f64::NAN,
        n if n <= T_999.len() => T_999[n - 1],
        n if n <= 40 => 3.551,
        n if n <= 60 => 3.460,
        n if n <= 120 => 3.373,
        _ => 3.291,
    }
}

fn json_opt(val: Option<f64>) -> String {
    match val {
        Some(val) => format!("{}", val),
        None => "null".to_string(),
    }
}
