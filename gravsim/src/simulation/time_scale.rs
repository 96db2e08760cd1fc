//! Runtime-adjustable time multiplier
//!
//! `TimeScale` is a cloneable handle to one shared `f64`. Every clone sees
//! the same value, so the control channel (stdin listener, viewer keys) can
//! hold one handle while the stepper reads another. The value is stored as
//! raw bits in an `AtomicU64`: a read always observes one whole value.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::{ensure_positive, SimResult};

#[derive(Debug, Clone)]
pub struct TimeScale {
    bits: Arc<AtomicU64>,
}

impl TimeScale {
    pub fn new(initial: f64) -> SimResult<Self> {
        let initial = ensure_positive("time_scale", initial)?;
        Ok(Self {
            bits: Arc::new(AtomicU64::new(initial.to_bits())),
        })
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Replace the multiplier. Non-finite and non-positive values are
    /// rejected and the current value stays in effect.
    pub fn set(&self, value: f64) -> SimResult<()> {
        let value = ensure_positive("time_scale", value)?;
        self.bits.store(value.to_bits(), Ordering::Release);
        Ok(())
    }
}
