//! Reusable analysis context owning the working buffers.

use crate::{error::EcgError, LEADS, MAX_SAMPLES, SAMPLING_RATE_HZ};

/// Acquisition parameters, copied into the context on creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnalysisParams {
    pub sampling_rate_hz: f64,
    pub leads: usize,
    /// Amplification of the filtered copy. `0.0` means unset.
    pub gain: f64,
    /// Initial detection threshold, in integrated energy of the raw signal
    /// (squared amplitude per sample). Scaled by `gain²` before use and
    /// adapted like the default threshold afterwards.
    pub r_threshold_hint: Option<f64>,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            sampling_rate_hz: SAMPLING_RATE_HZ as f64,
            leads: LEADS,
            gain: 1.0,
            r_threshold_hint: None,
        }
    }
}

impl AnalysisParams {
    pub fn effective_gain(&self) -> f64 {
        if self.gain.is_finite() && self.gain != 0.0 {
            self.gain
        } else {
            1.0
        }
    }

    /// Starting threshold in the units of the amplified energy signal.
    pub fn initial_threshold(&self) -> Option<f64> {
        let gain = self.effective_gain();
        self.r_threshold_hint
            .filter(|h| h.is_finite() && *h > 0.0)
            .map(|h| h * gain * gain)
    }
}

/// Owns the four stage buffers of the QRS enhancement chain.
///
/// Buffers are reserved once at creation and never grow. A context serves
/// one analysis at a time; use one context per thread.
#[derive(Debug)]
pub struct AnalysisContext {
    pub(crate) params: AnalysisParams,
    pub(crate) capacity: usize,

    pub(crate) high_passed: Vec<f64>,
    pub(crate) derived: Vec<f64>,
    pub(crate) squared: Vec<f64>,
    pub(crate) integrated: Vec<f64>,
}

fn reserve(capacity: usize) -> Result<Vec<f64>, EcgError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(capacity)?;
    buf.resize(capacity, 0.0);
    Ok(buf)
}

impl AnalysisContext {
    /// Create a context able to analyse up to [`MAX_SAMPLES`] samples.
    pub fn new(params: &AnalysisParams) -> Result<Self, EcgError> {
        Self::with_capacity(params, MAX_SAMPLES)
    }

    /// Create a context with an explicit sample capacity.
    ///
    /// Either every buffer is reserved or none is kept.
    pub fn with_capacity(params: &AnalysisParams, capacity: usize) -> Result<Self, EcgError> {
        let high_passed = reserve(capacity)?;
        let derived = reserve(capacity)?;
        let squared = reserve(capacity)?;
        let integrated = reserve(capacity)?;

        log::debug!(
            "Analysis context ready: {} samples, {} Hz, {} leads",
            capacity,
            params.sampling_rate_hz,
            params.leads
        );

        Ok(AnalysisContext {
            params: *params,
            capacity,
            high_passed,
            derived,
            squared,
            integrated,
        })
    }

    pub fn params(&self) -> &AnalysisParams {
        &self.params
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Release the working buffers.
    pub fn destroy(self) {
        log::debug!("Releasing analysis context");
    }
}
