//! Rep detection
//!
//! Two-state latch on a single trigger joint. A rep is counted on the
//! Unlatched → Latched edge only, so holding the bottom of a squat for
//! twenty frames is still one rep. The same threshold releases the latch;
//! there is no hysteresis band, so jittery input should be smoothed first.

use crate::exercise::RepTrigger;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LatchState {
    #[default]
    Unlatched,
    Latched,
}

#[derive(Clone, Debug)]
pub struct RepDetector {
    trigger: RepTrigger,
    state: LatchState,
    /// Only ever incremented
    rep_count: u32,
}

impl RepDetector {
    pub fn new(trigger: RepTrigger) -> Self {
        Self {
            trigger,
            state: LatchState::Unlatched,
            rep_count: 0,
        }
    }

    /// Feed the trigger joint's angle for one frame.
    ///
    /// Returns true only on the frame a rep is counted. A missing angle
    /// (occluded joint) leaves the latch where it is.
    pub fn update(&mut self, angle: Option<f32>) -> bool {
        let Some(angle) = angle else {
            return false;
        };

        let triggered = self.trigger.is_satisfied_by(angle);
        match (self.state, triggered) {
            (LatchState::Unlatched, true) => {
                self.state = LatchState::Latched;
                self.rep_count = self.rep_count.saturating_add(1);
                log::debug!(
                    "Rep {} on {} at {:.1}°",
                    self.rep_count,
                    self.trigger.joint,
                    angle
                );
                true
            }
            (LatchState::Latched, false) => {
                self.state = LatchState::Unlatched;
                false
            }
            _ => false,
        }
    }

    pub fn rep_count(&self) -> u32 {
        self.rep_count
    }

    pub fn state(&self) -> LatchState {
        self.state
    }

    pub fn trigger(&self) -> &RepTrigger {
        &self.trigger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::Direction;

    fn elbow_below_50() -> RepDetector {
        RepDetector::new(RepTrigger::new("left_elbow", Direction::Below, 50.0))
    }

    #[test]
    fn test_single_edge_per_rep() {
        let mut detector = elbow_below_50();
        let events: Vec<bool> = [90.0, 90.0, 40.0, 40.0, 90.0]
            .into_iter()
            .map(|a| detector.update(Some(a)))
            .collect();
        assert_eq!(events, vec![false, false, true, false, false]);
        assert_eq!(detector.rep_count(), 1);
        assert_eq!(detector.state(), LatchState::Unlatched);
    }

    #[test]
    fn test_missing_angle_keeps_latch() {
        let mut detector = elbow_below_50();
        assert!(detector.update(Some(30.0)));
        assert!(!detector.update(None));
        assert_eq!(detector.state(), LatchState::Latched);
        // Still latched, so reappearing below threshold is not a new rep
        assert!(!detector.update(Some(30.0)));
        assert_eq!(detector.rep_count(), 1);
    }

    #[test]
    fn test_missing_angle_never_counts() {
        let mut detector = elbow_below_50();
        for _ in 0..5 {
            assert!(!detector.update(None));
        }
        assert_eq!(detector.rep_count(), 0);
        assert_eq!(detector.state(), LatchState::Unlatched);
    }

    #[test]
    fn test_above_direction() {
        let mut detector =
            RepDetector::new(RepTrigger::new("left_shoulder", Direction::Above, 150.0));
        assert!(!detector.update(Some(100.0)));
        assert!(detector.update(Some(160.0)));
        assert!(!detector.update(Some(170.0)));
        assert!(!detector.update(Some(150.0)));
        assert!(detector.update(Some(155.0)));
        assert_eq!(detector.rep_count(), 2);
    }

    #[test]
    fn test_zero_degrees_is_a_real_angle() {
        let mut detector = elbow_below_50();
        assert!(detector.update(Some(0.0)));
    }
}
