//! Frame statistics

use std::time::Instant;

/// Counters updated on every `render_one_frame`
#[derive(Clone, Debug)]
pub struct FrameStats {
    pub frames_rendered: u64,
    pub frames_skipped: u64,
    /// Visible entities in the scenes drawn by the last rendered frame
    pub last_visible_entities: usize,
    first_frame: Option<Instant>,
    last_frame: Option<Instant>,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameStats {
    pub fn new() -> Self {
        Self {
            frames_rendered: 0,
            frames_skipped: 0,
            last_visible_entities: 0,
            first_frame: None,
            last_frame: None,
        }
    }

    pub(crate) fn record_rendered(&mut self, visible_entities: usize, now: Instant) {
        self.frames_rendered += 1;
        self.last_visible_entities = visible_entities;
        self.first_frame.get_or_insert(now);
        self.last_frame = Some(now);
    }

    pub(crate) fn record_skipped(&mut self) {
        self.frames_skipped += 1;
    }

    /// Average rendered frames per second between the first and last frame
    pub fn average_fps(&self) -> Option<f64> {
        let (first, last) = (self.first_frame?, self.last_frame?);
        let secs = last.duration_since(first).as_secs_f64();
        if self.frames_rendered < 2 || secs <= 0.0 {
            return None;
        }
        Some((self.frames_rendered - 1) as f64 / secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_counters() {
        let mut stats = FrameStats::new();
        let t0 = Instant::now();
        stats.record_rendered(1, t0);
        stats.record_skipped();
        assert_eq!(stats.frames_rendered, 1);
        assert_eq!(stats.frames_skipped, 1);
        assert_eq!(stats.last_visible_entities, 1);
    }

    #[test]
    fn test_average_fps() {
        let mut stats = FrameStats::new();
        let t0 = Instant::now();
        assert_eq!(stats.average_fps(), None);

        for i in 0..11 {
            stats.record_rendered(0, t0 + Duration::from_millis(100 * i));
        }
        // 10 intervals over one second
        let fps = stats.average_fps().unwrap();
        assert!((fps - 10.0).abs() < 1e-6);
    }
}
