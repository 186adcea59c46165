use std::collections::VecDeque;

/// Mean of the most recent `window` values.
///
/// Used only for progress display of the per-batch training loss.
#[derive(Debug, Clone)]
pub struct RollingMean {
    window: usize,
    values: VecDeque<f64>,
}

impl RollingMean {
    /// Panics if `window == 0`.
    pub fn new(window: usize) -> RollingMean {
        assert!(window > 0, "rolling window must hold at least one value");
        RollingMean { window, values: VecDeque::with_capacity(window) }
    }

    pub fn push(&mut self, value: f64) {
        if self.values.len() == self.window {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    /// `None` until the first value arrives.
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn empty_has_no_mean() {
        assert_eq!(RollingMean::new(3).mean(), None);
    }

    #[test]
    fn keeps_only_trailing_window() {
        let mut r = RollingMean::new(3);
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            r.push(v);
        }
        assert_eq!(r.len(), 3);
        assert_abs_diff_eq!(r.mean().unwrap(), 4.0);
    }

    #[test]
    fn partial_window_averages_what_it_has() {
        let mut r = RollingMean::new(10);
        r.push(0.2);
        r.push(0.4);
        assert_abs_diff_eq!(r.mean().unwrap(), 0.3);
    }
}
