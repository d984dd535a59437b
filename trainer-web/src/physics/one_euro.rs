//! One Euro smoothing for keypoint frames
//!
//! The rep latch uses a single threshold, so a joint hovering at the
//! threshold flickers in and out of the rep. Hosts that see this run frames
//! through `KeypointSmoother` before validating. Nothing in the validator
//! applies it on its own.

use std::collections::HashMap;
use std::f32::consts::PI;

use super::state::{Keypoint, Keypoints};

/// Default minimum cutoff (Hz)
pub const DEFAULT_MIN_CUTOFF: f32 = 1.0;
/// Default speed coefficient
pub const DEFAULT_BETA: f32 = 0.05;

/// Adaptive low-pass filter for one scalar signal
#[derive(Clone, Debug)]
pub struct OneEuroFilter {
    /// Cutoff at rest (Hz); lower = smoother when still
    min_cutoff: f32,
    /// How fast the cutoff opens up with speed
    beta: f32,
    /// Cutoff for the derivative estimate (Hz)
    d_cutoff: f32,
    last: Option<Sample>,
}

#[derive(Clone, Copy, Debug)]
struct Sample {
    value: f32,
    rate: f32,
    t: f64,
}

impl OneEuroFilter {
    pub fn new(min_cutoff: f32, beta: f32) -> Self {
        Self {
            min_cutoff,
            beta,
            d_cutoff: 1.0,
            last: None,
        }
    }

    fn alpha(dt: f32, cutoff: f32) -> f32 {
        let r = 2.0 * PI * cutoff * dt;
        r / (r + 1.0)
    }

    /// Filter `x` sampled at `t` seconds.
    ///
    /// The first sample passes through. A timestamp that does not advance
    /// returns the previous output unchanged.
    pub fn filter(&mut self, t: f64, x: f32) -> f32 {
        let Some(prev) = self.last else {
            self.last = Some(Sample { value: x, rate: 0.0, t });
            return x;
        };

        let dt = (t - prev.t) as f32;
        if dt <= 0.0 {
            return prev.value;
        }

        let a_d = Self::alpha(dt, self.d_cutoff);
        let rate = a_d * ((x - prev.value) / dt) + (1.0 - a_d) * prev.rate;

        let a = Self::alpha(dt, self.min_cutoff + self.beta * rate.abs());
        let value = a * x + (1.0 - a) * prev.value;

        self.last = Some(Sample { value, rate, t });
        value
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for OneEuroFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CUTOFF, DEFAULT_BETA)
    }
}

/// Pair of filters for a 2D position
#[derive(Clone, Debug, Default)]
pub struct OneEuroFilter2D {
    pub x: OneEuroFilter,
    pub y: OneEuroFilter,
}

impl OneEuroFilter2D {
    pub fn new(min_cutoff: f32, beta: f32) -> Self {
        Self {
            x: OneEuroFilter::new(min_cutoff, beta),
            y: OneEuroFilter::new(min_cutoff, beta),
        }
    }

    pub fn filter(&mut self, t: f64, pos: (f32, f32)) -> (f32, f32) {
        (self.x.filter(t, pos.0), self.y.filter(t, pos.1))
    }
}

/// Per-keypoint smoothing across frames.
///
/// Keypoints that drop out of a frame lose their filter state, so a joint
/// that reappears elsewhere is not dragged from its old position.
#[derive(Clone, Debug)]
pub struct KeypointSmoother {
    min_cutoff: f32,
    beta: f32,
    filters: HashMap<String, OneEuroFilter2D>,
}

impl KeypointSmoother {
    pub fn new(min_cutoff: f32, beta: f32) -> Self {
        Self {
            min_cutoff,
            beta,
            filters: HashMap::new(),
        }
    }

    /// Smoothed copy of `frame`; scores pass through untouched.
    /// Non-finite coordinates bypass the filter.
    pub fn smooth(&mut self, t: f64, frame: &Keypoints) -> Keypoints {
        self.filters.retain(|name, _| frame.contains_key(name));
        let (min_cutoff, beta) = (self.min_cutoff, self.beta);

        frame
            .iter()
            .map(|(name, kp)| {
                if !(kp.x.is_finite() && kp.y.is_finite()) {
                    return (name.clone(), kp.clone());
                }
                let filter = self
                    .filters
                    .entry(name.clone())
                    .or_insert_with(|| OneEuroFilter2D::new(min_cutoff, beta));
                let (x, y) = filter.filter(t, kp.position());
                (
                    name.clone(),
                    Keypoint {
                        name: kp.name.clone(),
                        x,
                        y,
                        score: kp.score,
                    },
                )
            })
            .collect()
    }

    pub fn reset(&mut self) {
        self.filters.clear();
    }

    pub fn tracked(&self) -> usize {
        self.filters.len()
    }
}

impl Default for KeypointSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CUTOFF, DEFAULT_BETA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::frame_from;

    #[test]
    fn test_first_sample_passes_through() {
        let mut filter = OneEuroFilter::default();
        assert_eq!(filter.filter(0.0, 5.0), 5.0);
    }

    #[test]
    fn test_attenuates_jump() {
        let mut filter = OneEuroFilter::default();
        filter.filter(0.0, 0.0);
        let out = filter.filter(1.0 / 30.0, 1.0);
        assert!(out > 0.0 && out < 1.0);
    }

    #[test]
    fn test_stalled_clock_holds_value() {
        let mut filter = OneEuroFilter::default();
        filter.filter(1.0, 2.0);
        assert_eq!(filter.filter(1.0, 10.0), 2.0);
    }

    #[test]
    fn test_smoother_drops_missing_keypoints() {
        let mut smoother = KeypointSmoother::default();
        let both = frame_from(vec![
            Keypoint::new("left_knee", 0.5, 0.5, 0.9),
            Keypoint::new("left_hip", 0.5, 0.3, 0.9),
        ]);
        smoother.smooth(0.0, &both);
        assert_eq!(smoother.tracked(), 2);

        let knee_only = frame_from(vec![Keypoint::new("left_knee", 0.6, 0.5, 0.4)]);
        let out = smoother.smooth(1.0 / 30.0, &knee_only);
        assert_eq!(smoother.tracked(), 1);
        assert_eq!(out["left_knee"].score, 0.4);
        assert!(out["left_knee"].x > 0.5 && out["left_knee"].x < 0.6);
    }
}
