//! Constraint cost across the four constraint kinds.
//!
//! Each kind folds the structural properties of its active constraints into an impact
//! in `0..=100`; the impacts are then weighted into a single constraint score.

use serde::{Deserialize, Serialize};

use rigscore_rig_core::{
    ConstraintData, PathConstraintData, PhysicsConstraintData, PositionMode, Rig, RotateMode,
    SpacingMode,
};

use crate::active::ActiveComponentSet;
use crate::scoring::{constraint_score, ik_impact, path_impact, physics_impact, transform_impact};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IkMetrics {
    pub count: usize,
    pub total_bones: usize,
    pub max_chain_length: usize,
    pub impact: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformMetrics {
    pub count: usize,
    pub total_bones: usize,
    pub max_chain_length: usize,
    /// Mix channels with positive influence, summed over constraints.
    pub affected_channels: usize,
    pub impact: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathMetrics {
    pub count: usize,
    pub total_bones: usize,
    pub max_chain_length: usize,
    pub mode_complexity: usize,
    pub impact: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicsMetrics {
    pub count: usize,
    pub affected_channels: usize,
    /// `Σ affected_channels * (1 + iteration_factor)`.
    pub weighted_channels: f64,
    pub max_iteration_factor: f64,
    pub impact: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintMetrics {
    pub ik: IkMetrics,
    pub transform: TransformMetrics,
    pub path: PathMetrics,
    pub physics: PhysicsMetrics,
    pub score: f64,
}

/// Positioning, spacing and rotation modes each add work per constrained bone.
pub fn path_mode_complexity(c: &PathConstraintData) -> usize {
    let position = match c.position_mode {
        PositionMode::Fixed => 0,
        PositionMode::Percent => 1,
    };
    let spacing = match c.spacing_mode {
        SpacingMode::Length | SpacingMode::Fixed => 0,
        SpacingMode::Percent => 1,
        SpacingMode::Proportional => 2,
    };
    let rotate = match c.rotate_mode {
        RotateMode::Tangent => 0,
        RotateMode::Chain => 1,
        RotateMode::ChainScale => 2,
    };
    position + spacing + rotate
}

/// How lively the spring is, in `[0, 1]`: mean of low damping, strength and inertia.
pub fn iteration_factor(c: &PhysicsConstraintData) -> f64 {
    let undamped = (1.0 - c.damping as f64).clamp(0.0, 1.0);
    let strength = (c.strength as f64 / 100.0).clamp(0.0, 1.0);
    let inertia = (c.inertia as f64).clamp(0.0, 1.0);
    (undamped + strength + inertia) / 3.0
}

pub fn analyze_constraints(rig: &Rig, active: &ActiveComponentSet) -> ConstraintMetrics {
    let mut m = ConstraintMetrics::default();

    for data in &rig.constraints {
        if !active.constraints(data.kind()).contains(data.name()) {
            continue;
        }
        match data {
            ConstraintData::Ik(c) => {
                m.ik.count += 1;
                m.ik.total_bones += c.bones.len();
                m.ik.max_chain_length = m.ik.max_chain_length.max(c.bones.len());
            }
            ConstraintData::Transform(c) => {
                m.transform.count += 1;
                m.transform.total_bones += c.bones.len();
                m.transform.max_chain_length = m.transform.max_chain_length.max(c.bones.len());
                m.transform.affected_channels += c.mix.active_channels();
            }
            ConstraintData::Path(c) => {
                m.path.count += 1;
                m.path.total_bones += c.bones.len();
                m.path.max_chain_length = m.path.max_chain_length.max(c.bones.len());
                m.path.mode_complexity += path_mode_complexity(c);
            }
            ConstraintData::Physics(c) => {
                let channels = c.channels.enabled_count();
                let factor = iteration_factor(c);
                m.physics.count += 1;
                m.physics.affected_channels += channels;
                m.physics.weighted_channels += channels as f64 * (1.0 + factor);
                m.physics.max_iteration_factor = m.physics.max_iteration_factor.max(factor);
            }
        }
    }

    m.ik.impact = ik_impact(m.ik.count, m.ik.total_bones, m.ik.max_chain_length);
    m.transform.impact = transform_impact(
        m.transform.count,
        m.transform.total_bones,
        m.transform.affected_channels,
    );
    m.path.impact = path_impact(m.path.count, m.path.total_bones, m.path.mode_complexity);
    m.physics.impact = physics_impact(m.physics.count, m.physics.weighted_channels);
    m.score = constraint_score(
        m.ik.impact,
        m.transform.impact,
        m.path.impact,
        m.physics.impact,
    );
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rigscore_rig_core::{
        BoneData, ConstraintKind, IkConstraintData, PhysicsChannels, TransformConstraintData,
        TransformMix,
    };

    fn rig() -> Rig {
        let mut rig = Rig::new("c");
        for name in ["root", "upper", "lower", "target", "hair"] {
            rig.bones.push(BoneData::new(name, Some(0)));
        }
        rig.bones[0].parent = None;
        rig.constraints.push(ConstraintData::Ik(IkConstraintData::new(
            "leg",
            vec![1, 2],
            3,
        )));
        let mut t = TransformConstraintData::new("copy", vec![2], 1);
        t.mix = TransformMix {
            rotate: 1.0,
            x: 0.5,
            ..TransformMix::default()
        };
        rig.constraints.push(ConstraintData::Transform(t));
        let mut p = PhysicsConstraintData::new("hair", 4);
        p.channels = PhysicsChannels {
            x: 1.0,
            rotate: 1.0,
            ..PhysicsChannels::default()
        };
        p.damping = 0.5;
        p.strength = 50.0;
        p.inertia = 0.5;
        rig.constraints.push(ConstraintData::Physics(p));
        rig
    }

    #[test]
    fn inactive_constraints_cost_nothing() {
        let m = analyze_constraints(&rig(), &ActiveComponentSet::new());
        assert_eq!(m.ik.count, 0);
        assert_eq!(m.score, 100.0);
    }

    #[test]
    fn impacts_follow_structure() {
        let rig = rig();
        let mut active = ActiveComponentSet::new();
        active.insert_constraint(ConstraintKind::Ik, "leg");
        active.insert_constraint(ConstraintKind::Transform, "copy");
        active.insert_constraint(ConstraintKind::Physics, "hair");

        let m = analyze_constraints(&rig, &active);
        assert_eq!(m.ik.total_bones, 2);
        assert_eq!(m.ik.max_chain_length, 2);
        assert_eq!(m.transform.affected_channels, 2);
        assert_eq!(m.physics.affected_channels, 2);
        assert_relative_eq!(m.physics.max_iteration_factor, 0.5, epsilon = 1e-9);
        assert_relative_eq!(m.physics.weighted_channels, 3.0, epsilon = 1e-9);

        let ik = 20.0 + 3f64.log2() * 10.0;
        let transform = 15.0 + 8.0 + 10.0;
        let physics = 30.0 + 15.0;
        assert_relative_eq!(m.ik.impact, ik, epsilon = 1e-9);
        assert_relative_eq!(m.transform.impact, transform, epsilon = 1e-9);
        assert_relative_eq!(m.physics.impact, physics, epsilon = 1e-9);
        let expected = 100.0 - (ik * 0.20 + transform * 0.15 + physics * 0.40) * 0.5;
        assert_relative_eq!(m.score, expected, epsilon = 1e-9);
    }

    #[test]
    fn path_modes_add_complexity() {
        let mut c = PathConstraintData::new("rail", vec![1], 0);
        assert_eq!(path_mode_complexity(&c), 1);
        c.spacing_mode = SpacingMode::Proportional;
        c.rotate_mode = RotateMode::ChainScale;
        assert_eq!(path_mode_complexity(&c), 5);
    }
}
