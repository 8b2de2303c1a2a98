use heapless::Vec;

use crate::{history::RrHistory, MAX_BEATS, MAX_RR_HISTORY};

/// Sample indices of the detected R-peaks, strictly increasing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Peaks {
    pub r: Vec<usize, MAX_BEATS>,
}

impl Peaks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.r.len()
    }

    pub fn is_empty(&self) -> bool {
        self.r.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.r
    }

    pub fn is_full(&self) -> bool {
        self.r.is_full()
    }
}

/// Plausible RR intervals in seconds, in beat order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Intervals {
    pub rr: Vec<f64, MAX_BEATS>,
}

impl Intervals {
    /// Shortest interval kept (300 bpm).
    pub const MIN_RR_S: f64 = 0.2;
    /// Longest interval kept (30 bpm).
    pub const MAX_RR_S: f64 = 2.0;
    /// At most one interval fewer than the peak capacity.
    pub const CAPACITY: usize = MAX_BEATS - 1;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rr.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.rr
    }

    /// Rebuild from consecutive peak pairs, dropping implausible gaps.
    ///
    /// Pairs that are not in ascending order are skipped.
    pub fn fill_from_peaks(&mut self, peaks: &[usize], sampling_rate_hz: f64) {
        self.rr.clear();

        for pair in peaks.windows(2) {
            let Some(gap) = pair[1].checked_sub(pair[0]) else {
                log::debug!("Skipping out-of-order peaks {} and {}", pair[0], pair[1]);
                continue;
            };
            let rr = gap as f64 / sampling_rate_hz;
            if !(Self::MIN_RR_S..=Self::MAX_RR_S).contains(&rr) {
                log::debug!("Dropping implausible RR of {rr:.3} s at sample {}", pair[1]);
                continue;
            }
            if self.rr.len() >= Self::CAPACITY || self.rr.push(rr).is_err() {
                break;
            }
        }
    }

    pub fn mean_rr(&self) -> Option<f64> {
        if self.rr.is_empty() {
            None
        } else {
            Some(self.rr.iter().sum::<f64>() / self.rr.len() as f64)
        }
    }

    pub fn mean_heart_rate_bpm(&self) -> Option<f64> {
        self.mean_rr().map(|rr| 60.0 / rr)
    }

    /// Heart rate over the last few retained intervals.
    pub fn recent_heart_rate_bpm(&self) -> Option<f64> {
        let mut history: RrHistory<MAX_RR_HISTORY> = RrHistory::new();
        history.extend(self.rr.iter().copied());
        history.mean().map(|rr| 60.0 / rr)
    }
}
