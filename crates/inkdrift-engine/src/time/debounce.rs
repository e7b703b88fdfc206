use std::time::{Duration, Instant};

/// Holds the latest value of a bursty stream until it has been quiet for a
/// fixed interval.
///
/// Each [`push`](Debounce::push) replaces the pending value and restarts the
/// quiet period. [`poll`](Debounce::poll) hands the value out once, after the
/// period has elapsed with no further pushes.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    quiet: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debounce<T> {
    pub fn new(quiet: Duration) -> Self {
        Self { quiet, pending: None }
    }

    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, at)) if now.saturating_duration_since(*at) >= self.quiet => {
                self.pending.take().map(|(v, _)| v)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(100);

    #[test]
    fn nothing_pending_polls_none() {
        let mut d: Debounce<u32> = Debounce::new(QUIET);
        assert_eq!(d.poll(Instant::now()), None);
    }

    #[test]
    fn value_released_after_quiet_period() {
        let mut d = Debounce::new(QUIET);
        let t0 = Instant::now();
        d.push(1, t0);
        assert_eq!(d.poll(t0 + Duration::from_millis(50)), None);
        assert_eq!(d.poll(t0 + QUIET), Some(1));
        assert_eq!(d.poll(t0 + QUIET * 2), None);
    }

    #[test]
    fn burst_collapses_to_last_value() {
        let mut d = Debounce::new(QUIET);
        let t0 = Instant::now();
        for i in 0..10u64 {
            d.push(i, t0 + Duration::from_millis(i * 20));
        }
        // last push at 180ms; 250ms is only 70ms after it
        assert_eq!(d.poll(t0 + Duration::from_millis(250)), None);
        assert_eq!(d.poll(t0 + Duration::from_millis(280)), Some(9));
    }
}
