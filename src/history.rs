//! Tiny ring of the most recent RR intervals

#[derive(Copy, Clone, Debug)]
pub struct RrHistory<const COUNT: usize> {
    data: [f64; COUNT],
    next: usize,
    len: usize,
}

impl<const COUNT: usize> Default for RrHistory<COUNT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const COUNT: usize> RrHistory<COUNT> {
    pub fn new() -> Self {
        RrHistory {
            data: [0.0; COUNT],
            next: 0,
            len: 0,
        }
    }

    /// Record an interval, overwriting the oldest one once full.
    pub fn add(&mut self, rr: f64) {
        if COUNT == 0 {
            return;
        }
        self.data[self.next] = rr;
        self.next = wrap_next::<COUNT>(self.next);
        self.len = (self.len + 1).min(COUNT);
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Intervals from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let start = if self.len < COUNT { 0 } else { self.next };
        (0..self.len).map(move |k| self.data[(start + k) % COUNT])
    }

    pub fn mean(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.iter().sum::<f64>() / self.len as f64)
        }
    }
}

impl<const COUNT: usize> Extend<f64> for RrHistory<COUNT> {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for rr in iter {
            self.add(rr);
        }
    }
}

#[inline]
fn wrap_next<const COUNT: usize>(n: usize) -> usize {
    let n1 = n + 1;
    if n1 >= COUNT {
        0
    } else {
        n1
    }
}
