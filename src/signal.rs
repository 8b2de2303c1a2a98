//! Peak candidates on the integrated energy and their refinement on the raw
//! waveform.

/// Indices of local maxima of an energy signal.
///
/// A sample qualifies when it rises strictly above its left neighbour and is
/// not exceeded by its right neighbour, so a flat top yields its first
/// sample. The first and last samples are never reported.
pub struct LocalMaxima<'a> {
    data: &'a [f64],
    idx: usize,
}

impl<'a> LocalMaxima<'a> {
    pub fn new(data: &'a [f64]) -> Self {
        LocalMaxima { data, idx: 1 }
    }
}

impl<'a> Iterator for LocalMaxima<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.idx + 1 < self.data.len() {
            let i = self.idx;
            self.idx += 1;

            let e = self.data[i];
            if e > self.data[i - 1] && e >= self.data[i + 1] {
                return Some(i);
            }
        }
        None
    }
}

/// Move a coarse detection onto the largest raw sample within
/// `[idx - half_win, idx + half_win]`, clamped to the signal.
///
/// Ties resolve to the earliest sample. Returns `idx` unchanged for an empty
/// signal.
pub fn refine_peak(signal: &[f64], idx: usize, half_win: usize) -> usize {
    if signal.is_empty() {
        return idx;
    }

    let last = signal.len() - 1;
    let lo = idx.saturating_sub(half_win).min(last);
    let hi = idx.saturating_add(half_win).min(last);

    let mut best = lo;
    for i in lo + 1..=hi {
        if signal[i] > signal[best] {
            best = i;
        }
    }
    best
}
