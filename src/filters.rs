//! Stateless moving-sum filters used by the QRS enhancement chain.
//!
//! Every transform reads `x` and writes `y` over the first
//! `min(x.len(), y.len())` samples. Empty input is a no-op.

/// Running mean over a trailing window of `win` samples.
///
/// The window grows from one sample at the start of the signal, so the first
/// `win - 1` outputs average over fewer samples. A `win` of zero is treated
/// as one.
fn sliding_mean(x: &[f64], n: usize, win: usize, mut emit: impl FnMut(usize, f64)) {
    let win = win.max(1);

    let mut sum = 0.0;
    let mut w = 0usize;

    for i in 0..n {
        sum += x[i];
        w += 1;

        if w > win {
            sum -= x[i - win];
            w -= 1;
        }

        emit(i, sum / w as f64);
    }
}

#[inline]
fn span(x: &[f64], y: &[f64]) -> usize {
    x.len().min(y.len())
}

/// Trailing moving average, O(1) per sample regardless of `win`.
pub fn moving_average(x: &[f64], y: &mut [f64], win: usize) {
    let n = span(x, y);
    sliding_mean(x, n, win, |i, mean| y[i] = mean);
}

/// Baseline removal: `y = x - moving_average(x)`, in a single pass.
pub fn high_pass(x: &[f64], y: &mut [f64], win: usize) {
    let n = span(x, y);
    sliding_mean(x, n, win, |i, mean| y[i] = x[i] - mean);
}

/// First-order backward difference with `y[0] = 0`.
pub fn derivative(x: &[f64], y: &mut [f64]) {
    let n = span(x, y);
    if n == 0 {
        return;
    }

    y[0] = 0.0;
    for i in 1..n {
        y[i] = x[i] - x[i - 1];
    }
}

pub fn square(x: &[f64], y: &mut [f64]) {
    for (out, v) in y.iter_mut().zip(x) {
        *out = v * v;
    }
}

/// Moving window integration. Same kernel as [`moving_average`].
pub fn window_integrate(x: &[f64], y: &mut [f64], win: usize) {
    moving_average(x, y, win);
}

/// Multiply the signal in place.
pub fn apply_gain(x: &mut [f64], gain: f64) {
    for v in x.iter_mut() {
        *v *= gain;
    }
}

/// Subtract the arithmetic mean in place.
pub fn remove_dc(x: &mut [f64]) {
    if x.is_empty() {
        return;
    }

    let mean = x.iter().sum::<f64>() / x.len() as f64;
    for v in x.iter_mut() {
        *v -= mean;
    }
}
