//! Pan-Tompkins R-peak detection over a complete recording.
//!
//! raw -> high-pass -> derivative -> square -> moving window integration ->
//! adaptive peak picking (refined on the raw waveform) -> RR intervals

use crate::{
    context::AnalysisContext,
    error::EcgError,
    filters,
    results::{Intervals, Peaks},
    signal::{refine_peak, LocalMaxima},
    threshold::AdaptiveThreshold,
};

pub const HIGH_PASS_WINDOW_S: f64 = 0.150;
pub const INTEGRATION_WINDOW_S: f64 = 0.150;
/// Shortest accepted beat-to-beat gap, 240 bpm.
pub const REFRACTORY_S: f64 = 0.250;

/// Window sizes in samples for one sampling rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Windows {
    pub high_pass: usize,
    pub integration: usize,
    pub refractory: usize,
    /// Half-width of the raw-signal search around a detection. Kept below
    /// half the refractory distance so refined peaks stay strictly ordered.
    pub refine_half: usize,
}

impl Windows {
    pub fn for_rate(sampling_rate_hz: f64) -> Result<Self, EcgError> {
        if !(sampling_rate_hz.is_finite() && sampling_rate_hz > 0.0) {
            return Err(EcgError::InvalidParameter(format!(
                "sampling rate must be positive, got {sampling_rate_hz}"
            )));
        }

        let samples = |seconds: f64| (seconds * sampling_rate_hz).round() as usize;
        let windows = Windows {
            high_pass: samples(HIGH_PASS_WINDOW_S),
            integration: samples(INTEGRATION_WINDOW_S),
            refractory: samples(REFRACTORY_S),
            refine_half: samples(REFRACTORY_S).saturating_sub(1) / 2,
        };

        if windows.high_pass == 0 || windows.integration == 0 || windows.refractory == 0 {
            return Err(EcgError::InvalidParameter(format!(
                "sampling rate of {sampling_rate_hz} Hz is too low for the detection windows"
            )));
        }
        Ok(windows)
    }
}

/// Energy below this level, relative to the signal amplitude, is rounding
/// residue of the moving sums rather than QRS activity.
fn numerical_floor(signal: &[f64], gain: f64) -> f64 {
    let scale = signal.iter().fold(0.0f64, |m, v| m.max(v.abs())) * gain.abs();
    let residue = 1.0e3 * f64::EPSILON * scale;
    residue * residue
}

impl AnalysisContext {
    /// Detect R-peaks in the first `n_samples` samples of `signal` and,
    /// when requested, derive the RR intervals.
    ///
    /// Outputs are only written once every precondition holds; on error
    /// `peaks` and `intervals` keep their previous content.
    pub fn analyze(
        &mut self,
        signal: &[f64],
        n_samples: usize,
        lead_idx: usize,
        peaks: &mut Peaks,
        intervals: Option<&mut Intervals>,
    ) -> Result<(), EcgError> {
        if signal.is_empty() {
            return Err(EcgError::NullArgument);
        }
        if n_samples == 0 || n_samples > self.capacity {
            return Err(EcgError::InvalidParameter(format!(
                "sample count {n_samples} outside 1..={}",
                self.capacity
            )));
        }
        if n_samples > signal.len() {
            return Err(EcgError::InvalidParameter(format!(
                "sample count {n_samples} exceeds the {} samples provided",
                signal.len()
            )));
        }
        if lead_idx >= self.params.leads {
            return Err(EcgError::InvalidParameter(format!(
                "lead index {lead_idx} outside 0..{}",
                self.params.leads
            )));
        }
        let windows = Windows::for_rate(self.params.sampling_rate_hz)?;

        let n = n_samples;
        let signal = &signal[..n];
        let gain = self.params.effective_gain();

        filters::high_pass(signal, &mut self.high_passed[..n], windows.high_pass);
        filters::apply_gain(&mut self.high_passed[..n], gain);
        filters::derivative(&self.high_passed[..n], &mut self.derived[..n]);
        filters::square(&self.derived[..n], &mut self.squared[..n]);
        filters::window_integrate(&self.squared[..n], &mut self.integrated[..n], windows.integration);

        let energy = &self.integrated[..n];
        if let Some(bad) = energy.iter().position(|e| !e.is_finite()) {
            return Err(EcgError::Failed(format!(
                "integrated energy is not finite from sample {bad}"
            )));
        }

        let max_energy = energy.iter().fold(0.0f64, |m, &e| m.max(e));
        log::debug!(
            "Lead {lead_idx}: {n} samples, windows {windows:?}, peak energy {max_energy:.3e}"
        );

        peaks.r.clear();
        if max_energy > numerical_floor(signal, gain) {
            detect_peaks(energy, signal, &windows, self.params.initial_threshold(), peaks);
        } else {
            log::debug!("Lead {lead_idx}: no QRS energy above the numerical floor");
        }

        if let Some(intervals) = intervals {
            intervals.fill_from_peaks(peaks.as_slice(), self.params.sampling_rate_hz);

            match (intervals.mean_rr(), intervals.mean_heart_rate_bpm()) {
                (Some(rr), Some(bpm)) => log::info!(
                    "Lead {lead_idx}: {} R-peaks, {} RR intervals, mean RR {rr:.3} s, {bpm:.1} bpm",
                    peaks.len(),
                    intervals.len()
                ),
                _ => log::info!("Lead {lead_idx}: {} R-peaks, no plausible RR interval", peaks.len()),
            }
        } else {
            log::info!("Lead {lead_idx}: {} R-peaks", peaks.len());
        }

        Ok(())
    }
}

/// Single forward pass of adaptive peak picking over the integrated energy.
fn detect_peaks(
    energy: &[f64],
    signal: &[f64],
    windows: &Windows,
    initial_threshold: Option<f64>,
    peaks: &mut Peaks,
) {
    let max_energy = energy.iter().fold(0.0f64, |m, &e| m.max(e));
    let mut threshold = AdaptiveThreshold::from_max(max_energy, initial_threshold);

    let mut last_accepted: Option<usize> = None;

    for i in LocalMaxima::new(energy) {
        let e = energy[i];
        let refractory = last_accepted.is_some_and(|last| i - last < windows.refractory);

        // Too close to the previous beat, or too weak: feeds the noise level
        if refractory || !threshold.passes(e) {
            threshold.observe_noise(e);
            continue;
        }

        let r = refine_peak(signal, i, windows.refine_half);
        if peaks.r.push(r).is_err() {
            log::warn!(
                "Beat capacity of {} reached at sample {i}, ignoring the rest of the record",
                peaks.len()
            );
            break;
        }
        threshold.observe_signal(e);
        last_accepted = Some(i);

        log::trace!("R-peak at {r} (energy peak {i}), threshold {:.3e}", threshold.threshold);
    }
}
