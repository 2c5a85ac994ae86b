//! Fixed-step clock
//!
//! requestAnimationFrame does not fire at a constant rate (120 Hz displays,
//! throttled tabs, dropped frames). The simulation always advances in whole
//! ticks of [`SIM_DT`]; this accumulator decides how many ticks a frame owes.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Default)]
pub struct FixedTimestep {
    accumulator: f32,
    /// Timestamp of the previous frame in milliseconds
    last_time: Option<f64>,
}

impl FixedTimestep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a frame timestamp (ms, as passed to requestAnimationFrame) and
    /// return the number of ticks to simulate
    pub fn advance_to(&mut self, time_ms: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.last_time = Some(time_ms);
        self.advance(dt)
    }

    /// Feed an elapsed duration (seconds) and return the ticks owed
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        ticks
    }

    /// Forget timing history (after restart or a long pause)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }
}
