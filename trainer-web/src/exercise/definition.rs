//! Exercise definition schema
//!
//! One immutable definition per exercise id, shared read-only by every
//! session validating that exercise.

use serde::{Deserialize, Serialize};

use super::checkpoints::{standard_triple, JointTriple};
use crate::error::{TrainerError, TrainerResult};

/// Acceptable angle band for one joint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IdealAngle {
    pub joint: String,
    /// Lower bound in degrees (inclusive)
    pub min: f32,
    /// Upper bound in degrees (inclusive)
    pub max: f32,
    /// Target angle, carried for coaching overlays
    pub perfect: f32,
}

impl IdealAngle {
    pub fn new(joint: &str, min: f32, max: f32, perfect: f32) -> Self {
        Self {
            joint: joint.to_string(),
            min,
            max,
            perfect,
        }
    }

    /// True when `angle` lies outside `[min, max]`
    pub fn is_violated_by(&self, angle: f32) -> bool {
        angle < self.min || angle > self.max
    }
}

/// Which side of the threshold counts as "in the rep"
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Above,
    Below,
}

/// Rep-trigger rule: one joint crossing one threshold
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RepTrigger {
    pub joint: String,
    pub direction: Direction,
    /// Threshold in degrees
    pub threshold: f32,
}

impl RepTrigger {
    pub fn new(joint: &str, direction: Direction, threshold: f32) -> Self {
        Self {
            joint: joint.to_string(),
            direction,
            threshold,
        }
    }

    /// Strict comparison; an angle equal to the threshold never triggers
    pub fn is_satisfied_by(&self, angle: f32) -> bool {
        match self.direction {
            Direction::Above => angle > self.threshold,
            Direction::Below => angle < self.threshold,
        }
    }
}

/// Named three-point measurement overriding the standard joint table
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormCheckpoint {
    /// Angle name, as used in `idealAngles` / `repTrigger`
    pub name: String,
    /// Keypoint names: [start, vertex, end]
    #[serde(rename = "joint")]
    pub points: [String; 3],
}

impl FormCheckpoint {
    pub fn new(name: &str, start: &str, vertex: &str, end: &str) -> Self {
        Self {
            name: name.to_string(),
            points: [start.to_string(), vertex.to_string(), end.to_string()],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDefinition {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Ordered; form errors are reported in this order
    pub ideal_angles: Vec<IdealAngle>,
    pub rep_trigger: RepTrigger,
    #[serde(default)]
    pub form_checkpoints: Vec<FormCheckpoint>,
}

impl ExerciseDefinition {
    pub fn new(id: &str, ideal_angles: Vec<IdealAngle>, rep_trigger: RepTrigger) -> Self {
        Self {
            id: id.to_string(),
            name: String::new(),
            ideal_angles,
            rep_trigger,
            form_checkpoints: Vec::new(),
        }
    }

    pub fn with_checkpoint(mut self, checkpoint: FormCheckpoint) -> Self {
        self.form_checkpoints.push(checkpoint);
        self
    }

    /// Resolve every measured joint (ideal angles, then the trigger) to the
    /// keypoint triple that measures it, in first-seen order without duplicates.
    pub fn measured_joints(&self) -> TrainerResult<Vec<JointTriple>> {
        let names = self
            .ideal_angles
            .iter()
            .map(|band| band.joint.as_str())
            .chain(std::iter::once(self.rep_trigger.joint.as_str()));

        let mut joints: Vec<JointTriple> = Vec::new();
        for name in names {
            if joints.iter().any(|j| j.joint == name) {
                continue;
            }
            joints.push(self.resolve_triple(name)?);
        }
        Ok(joints)
    }

    fn resolve_triple(&self, joint: &str) -> TrainerResult<JointTriple> {
        if let Some(checkpoint) = self.form_checkpoints.iter().find(|c| c.name == joint) {
            let [start, vertex, end] = &checkpoint.points;
            return Ok(JointTriple::new(joint, start, vertex, end));
        }
        standard_triple(joint).ok_or_else(|| {
            TrainerError::invalid(
                &self.id,
                format!("no keypoint triple measures joint '{}'", joint),
            )
        })
    }

    /// Schema checks applied on registration
    pub fn validate(&self) -> TrainerResult<()> {
        if self.id.trim().is_empty() {
            return Err(TrainerError::invalid(&self.id, "empty exercise id"));
        }

        for band in &self.ideal_angles {
            if band.joint.is_empty() {
                return Err(TrainerError::invalid(&self.id, "ideal angle with empty joint"));
            }
            if !(band.min.is_finite() && band.max.is_finite() && band.perfect.is_finite()) {
                return Err(TrainerError::invalid(
                    &self.id,
                    format!("non-finite band for '{}'", band.joint),
                ));
            }
            if band.min > band.max {
                return Err(TrainerError::invalid(
                    &self.id,
                    format!("min {} > max {} for '{}'", band.min, band.max, band.joint),
                ));
            }
            if band.perfect < band.min || band.perfect > band.max {
                return Err(TrainerError::invalid(
                    &self.id,
                    format!("perfect angle {} outside band for '{}'", band.perfect, band.joint),
                ));
            }
        }

        if !self.rep_trigger.threshold.is_finite() {
            return Err(TrainerError::invalid(&self.id, "non-finite rep threshold"));
        }

        for checkpoint in &self.form_checkpoints {
            if checkpoint.points.iter().any(|p| p.is_empty()) {
                return Err(TrainerError::invalid(
                    &self.id,
                    format!("checkpoint '{}' names an empty keypoint", checkpoint.name),
                ));
            }
        }

        self.measured_joints().map(|_| ())
    }
}
