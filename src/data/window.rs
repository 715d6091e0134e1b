//! Bounded history of recent samples.

use std::collections::VecDeque;

use super::sample::Sample;
use crate::error::ConfigError;

/// Default number of samples kept on the graph.
pub const DEFAULT_CAPACITY: usize = 200;

/// Fixed-capacity, chronologically ordered buffer of samples.
///
/// Pushing past capacity evicts the oldest sample, so the buffer always
/// holds the most recent `capacity` measurements, oldest first.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl Default for SlidingWindow {
    fn default() -> Self {
        Self {
            samples: VecDeque::with_capacity(DEFAULT_CAPACITY),
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl SlidingWindow {
    /// Create an empty window holding at most `capacity` samples.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::invalid("capacity", "must be at least 1"));
        }
        Ok(Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Append a sample, returning the evicted one if the window was full.
    pub fn push(&mut self, sample: Sample) -> Option<Sample> {
        let evicted = if self.samples.len() >= self.capacity {
            self.samples.pop_front()
        } else {
            None
        };
        self.samples.push_back(sample);
        evicted
    }

    /// Samples in chronological order (oldest first).
    pub fn samples(&self) -> impl DoubleEndedIterator<Item = &Sample> + ExactSizeIterator + '_ {
        self.samples.iter()
    }

    /// Most recent sample, if any.
    pub fn latest(&self) -> Option<Sample> {
        self.samples.back().copied()
    }

    /// Latencies of the successful samples only.
    pub fn latencies(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().filter_map(Sample::value)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: f64) -> Sample {
        Sample::Latency(v)
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            SlidingWindow::new(0),
            Err(ConfigError::Invalid {
                field: "capacity",
                ..
            })
        ));
    }

    #[test]
    fn test_push_below_capacity_keeps_everything() {
        let mut window = SlidingWindow::new(3).unwrap();
        assert!(window.is_empty());
        assert_eq!(window.push(ms(1.0)), None);
        assert_eq!(window.push(Sample::Failed), None);
        assert_eq!(window.len(), 2);
        assert_eq!(window.latest(), Some(Sample::Failed));
    }

    #[test]
    fn test_push_past_capacity_evicts_oldest() {
        let mut window = SlidingWindow::new(2).unwrap();
        window.push(ms(1.0));
        window.push(ms(2.0));
        assert_eq!(window.push(ms(3.0)), Some(ms(1.0)));
        assert_eq!(window.push(Sample::Failed), Some(ms(2.0)));

        let kept: Vec<Sample> = window.samples().copied().collect();
        assert_eq!(kept, vec![ms(3.0), Sample::Failed]);
    }

    #[test]
    fn test_keeps_last_n_for_any_capacity() {
        for capacity in 1..=7 {
            let mut window = SlidingWindow::new(capacity).unwrap();
            let pushed: Vec<Sample> = (0..20)
                .map(|i| if i % 4 == 3 { Sample::Failed } else { ms(i as f64) })
                .collect();
            for s in &pushed {
                window.push(*s);
            }

            assert_eq!(window.len(), capacity);
            assert_eq!(window.capacity(), capacity);
            let kept: Vec<Sample> = window.samples().copied().collect();
            assert_eq!(kept, pushed[pushed.len() - capacity..].to_vec());
        }
    }

    #[test]
    fn test_latencies_skip_failures() {
        let mut window = SlidingWindow::new(4).unwrap();
        window.push(ms(5.0));
        window.push(Sample::Failed);
        window.push(ms(7.5));
        let values: Vec<f64> = window.latencies().collect();
        assert_eq!(values, vec![5.0, 7.5]);
    }
}
