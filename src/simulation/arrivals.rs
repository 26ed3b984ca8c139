//! Arrival generation
//!
//! Arrival times are drawn independently and uniformly from a half-open window and
//! then sorted. The generator consumes one value from the uniform source per
//! employee, so a fixed seed reproduces the same sequence bit for bit.

use crate::simulation::{SimulationError, SimulationResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Source of uniform samples in `[0, 1)`
pub trait UniformSource {
    /// Next sample in `[0, 1)`
    fn next_unit(&mut self) -> f64;
}

impl<R: Rng + ?Sized> UniformSource for R {
    fn next_unit(&mut self) -> f64 {
        // Standard distribution for f64 is [0, 1)
        self.gen::<f64>()
    }
}

/// Create the seeded generator used for arrival sequences
pub fn seeded_source(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Half-open time window `[start, end)` in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrivalWindow {
    /// Inclusive start
    pub start: f64,
    /// Exclusive end
    pub end: f64,
}

impl ArrivalWindow {
    /// Create a window; validity is checked by [`ArrivalGenerator::new`]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Window length in seconds
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Whether `time` lies inside the window
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time < self.end
    }

    fn validate(&self) -> SimulationResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(SimulationError::invalid_parameter(format!(
                "arrival window bounds must be finite, got [{}, {})",
                self.start, self.end
            )));
        }
        if self.start < 0.0 {
            return Err(SimulationError::invalid_parameter(format!(
                "arrival window cannot start before time zero, got {}",
                self.start
            )));
        }
        if self.end <= self.start {
            return Err(SimulationError::invalid_parameter(format!(
                "arrival window end ({}) must be after its start ({})",
                self.end, self.start
            )));
        }
        Ok(())
    }
}

/// Produces sorted uniform arrival times for a fixed number of employees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrivalGenerator {
    count: usize,
    window: ArrivalWindow,
}

impl ArrivalGenerator {
    /// Create a generator for `count` employees arriving in `window`
    pub fn new(count: usize, window: ArrivalWindow) -> SimulationResult<Self> {
        if count == 0 {
            return Err(SimulationError::invalid_parameter("employee count must be at least 1"));
        }
        window.validate()?;
        Ok(Self { count, window })
    }

    /// Number of arrivals produced per call to [`ArrivalGenerator::generate`]
    pub fn count(&self) -> usize {
        self.count
    }

    /// The arrival window
    pub fn window(&self) -> ArrivalWindow {
        self.window
    }

    /// Draw `count` arrival times and return them in ascending order
    #[instrument(skip(self, source), fields(count = self.count, start = self.window.start, end = self.window.end))]
    pub fn generate<S: UniformSource + ?Sized>(&self, source: &mut S) -> Vec<f64> {
        let length = self.window.length();
        let mut arrivals: Vec<f64> = (0..self.count)
            .map(|_| {
                let time = self.window.start + source.next_unit() * length;
                // Rounding can land exactly on `end` for windows far from zero
                if time < self.window.end {
                    time
                } else {
                    just_below(self.window.end)
                }
            })
            .collect();

        // Stable sort keeps generation order among identical times
        arrivals.sort_by(f64::total_cmp);

        debug!(
            first = arrivals.first().copied(),
            last = arrivals.last().copied(),
            "generated arrival sequence"
        );
        arrivals
    }

    /// Draw a sequence from a fresh generator seeded with `seed`
    pub fn generate_seeded(&self, seed: u64) -> Vec<f64> {
        let mut source = seeded_source(seed);
        self.generate(&mut source)
    }
}

/// Largest representable value strictly below a positive finite `value`
fn just_below(value: f64) -> f64 {
    debug_assert!(value.is_finite() && value > 0.0);
    f64::from_bits(value.to_bits() - 1)
}
