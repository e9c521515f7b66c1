//! Frame rate counter and its overlay text

use glam::Vec2;

use super::vertex::colors;
use super::{Surface, TextStyle};

const WINDOW: usize = 60;

const FPS_POS: Vec2 = Vec2::new(900.0, 30.0);

/// Frames per second over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame timestamp in milliseconds and return the current rate
    pub fn record(&mut self, time: f64) -> u32 {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % WINDOW;

        // Slot after the newest holds the oldest timestamp once the ring is full
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time - oldest;
            if elapsed > 0.0 {
                self.fps = (WINDOW as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
        self.fps
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Draw the frame rate in the top right corner of the UI layer
pub fn draw_fps<S: Surface>(fps: u32, surface: &mut S) {
    let style = TextStyle {
        size_px: 16.0,
        color: colors::SCORE_TEXT,
        font_family: "monospace",
    };
    surface.fill_text(&format!("FPS: {}", fps), FPS_POS, &style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::VertexBatch;

    #[test]
    fn test_zero_until_window_fills() {
        let mut counter = FpsCounter::new();
        for i in 1..WINDOW {
            assert_eq!(counter.record(i as f64 * 16.0), 0);
        }
    }

    #[test]
    fn test_steady_rate() {
        let mut counter = FpsCounter::new();
        // Timestamps start above zero, as requestAnimationFrame's do
        for i in 1..=200 {
            counter.record(i as f64 * 1000.0 / 60.0);
        }
        // 60 frames span 59 intervals of 1/60 s
        assert_eq!(counter.fps(), 61);

        for i in 201..=400 {
            counter.record(i as f64 * 20.0);
        }
        assert_eq!(counter.fps(), 51);
    }

    #[test]
    fn test_fps_text_run() {
        let mut batch = VertexBatch::new();
        draw_fps(58, &mut batch);
        let runs = batch.text_runs();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "FPS: 58");
        assert_eq!(runs[0].pos, FPS_POS);
    }
}
