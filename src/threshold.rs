//! Running signal/noise estimates driving the detection threshold.

/// Weight given to each new observation.
pub const ALPHA: f64 = 0.125;

/// Position of the threshold between the noise and signal estimates.
pub const THRESHOLD_RATIO: f64 = 0.25;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdaptiveThreshold {
    pub signal_peak: f64,
    pub noise_peak: f64,
    pub threshold: f64,
}

impl AdaptiveThreshold {
    /// Seed the estimates from the largest integrated energy of the record.
    ///
    /// A positive `initial` replaces the starting threshold; the first
    /// update recomputes it from the estimates as usual.
    pub fn from_max(max_energy: f64, initial: Option<f64>) -> Self {
        let mut t = AdaptiveThreshold {
            signal_peak: 0.25 * max_energy,
            noise_peak: 0.125 * max_energy,
            threshold: 0.0,
        };
        t.update_threshold();

        if let Some(initial) = initial.filter(|v| v.is_finite() && *v > 0.0) {
            t.threshold = initial;
        }
        t
    }

    fn update_threshold(&mut self) {
        self.threshold = self.noise_peak + THRESHOLD_RATIO * (self.signal_peak - self.noise_peak);
    }

    pub fn observe_noise(&mut self, energy: f64) {
        self.noise_peak = (1.0 - ALPHA) * self.noise_peak + ALPHA * energy;
        self.update_threshold();
    }

    pub fn observe_signal(&mut self, energy: f64) {
        self.signal_peak = (1.0 - ALPHA) * self.signal_peak + ALPHA * energy;
        self.update_threshold();
    }

    pub fn passes(&self, energy: f64) -> bool {
        energy >= self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_from_max() {
        let t = AdaptiveThreshold::from_max(8.0, None);

        assert_eq!(t.signal_peak, 2.0);
        assert_eq!(t.noise_peak, 1.0);
        assert_eq!(t.threshold, 1.25);
    }

    #[test]
    fn noise_pulls_threshold_down() {
        let mut t = AdaptiveThreshold::from_max(8.0, None);
        t.observe_noise(0.0);

        assert_eq!(t.noise_peak, 0.875);
        assert_eq!(t.threshold, 0.875 + 0.25 * (2.0 - 0.875));
    }

    #[test]
    fn signal_pushes_threshold_up() {
        let mut t = AdaptiveThreshold::from_max(8.0, None);
        t.observe_signal(10.0);

        assert_eq!(t.signal_peak, 3.0);
        assert_eq!(t.threshold, 1.5);
        assert!(t.passes(1.5));
        assert!(!t.passes(1.49));
    }

    #[test]
    fn initial_threshold_adapts_away() {
        let mut t = AdaptiveThreshold::from_max(8.0, Some(20.0));
        assert_eq!(t.threshold, 20.0);
        assert!(!t.passes(8.0));

        t.observe_noise(8.0);
        assert_eq!(t.noise_peak, 1.875);
        assert_eq!(t.threshold, 1.875 + 0.25 * (2.0 - 1.875));
        assert!(t.passes(8.0));
    }

    #[test]
    fn non_positive_initial_is_ignored() {
        assert_eq!(AdaptiveThreshold::from_max(8.0, Some(-3.0)).threshold, 1.25);
        assert_eq!(AdaptiveThreshold::from_max(8.0, Some(0.0)).threshold, 1.25);
        assert_eq!(AdaptiveThreshold::from_max(8.0, Some(f64::NAN)).threshold, 1.25);
    }
}
