//! The set of rig components an animation exercises.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use rigscore_rig_core::ConstraintKind;

/// Identifies an attachment placed in a particular slot (`slot:attachment`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AttachmentKey {
    pub slot: String,
    pub attachment: String,
}

impl AttachmentKey {
    pub fn new(slot: impl Into<String>, attachment: impl Into<String>) -> Self {
        Self {
            slot: slot.into(),
            attachment: attachment.into(),
        }
    }
}

impl fmt::Display for AttachmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.slot, self.attachment)
    }
}

/// Union of every slot, mesh, clipping mask, bone and constraint that was visible or
/// had non-zero influence at any sample, plus everything the animation keys directly.
///
/// Membership only grows: nothing inserted during a pass is ever removed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveComponentSet {
    pub slots: BTreeSet<String>,
    pub meshes: BTreeSet<AttachmentKey>,
    pub clipping: BTreeSet<AttachmentKey>,
    pub bones: BTreeSet<String>,
    pub ik_constraints: BTreeSet<String>,
    pub transform_constraints: BTreeSet<String>,
    pub path_constraints: BTreeSet<String>,
    pub physics_constraints: BTreeSet<String>,
    pub has_clipping: bool,
    pub has_blend_modes: bool,
    pub has_ik: bool,
    pub has_transform: bool,
    pub has_path: bool,
    pub has_physics: bool,
    /// Pose snapshots folded in by the dynamic pass.
    pub samples_taken: usize,
}

impl ActiveComponentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_constraint(&mut self, kind: ConstraintKind, name: &str) {
        let set = match kind {
            ConstraintKind::Ik => {
                self.has_ik = true;
                &mut self.ik_constraints
            }
            ConstraintKind::Transform => {
                self.has_transform = true;
                &mut self.transform_constraints
            }
            ConstraintKind::Path => {
                self.has_path = true;
                &mut self.path_constraints
            }
            ConstraintKind::Physics => {
                self.has_physics = true;
                &mut self.physics_constraints
            }
        };
        if !set.contains(name) {
            set.insert(name.to_string());
        }
    }

    pub fn constraints(&self, kind: ConstraintKind) -> &BTreeSet<String> {
        match kind {
            ConstraintKind::Ik => &self.ik_constraints,
            ConstraintKind::Transform => &self.transform_constraints,
            ConstraintKind::Path => &self.path_constraints,
            ConstraintKind::Physics => &self.physics_constraints,
        }
    }

    pub fn constraint_count(&self) -> usize {
        ConstraintKind::ALL
            .iter()
            .map(|k| self.constraints(*k).len())
            .sum()
    }

    /// Mesh ids rendered as `slot:attachment`.
    pub fn mesh_ids(&self) -> Vec<String> {
        self.meshes.iter().map(ToString::to_string).collect()
    }

    /// Fold `other` into `self`.
    pub fn union_with(&mut self, other: &ActiveComponentSet) {
        self.slots.extend(other.slots.iter().cloned());
        self.meshes.extend(other.meshes.iter().cloned());
        self.clipping.extend(other.clipping.iter().cloned());
        self.bones.extend(other.bones.iter().cloned());
        for kind in ConstraintKind::ALL {
            for name in other.constraints(kind) {
                self.insert_constraint(kind, name);
            }
        }
        self.has_clipping |= other.has_clipping;
        self.has_blend_modes |= other.has_blend_modes;
        self.samples_taken += other.samples_taken;
    }

    /// Every member of `self` is also a member of `other`.
    pub fn is_subset_of(&self, other: &ActiveComponentSet) -> bool {
        self.slots.is_subset(&other.slots)
            && self.meshes.is_subset(&other.meshes)
            && self.clipping.is_subset(&other.clipping)
            && self.bones.is_subset(&other.bones)
            && ConstraintKind::ALL
                .iter()
                .all(|k| self.constraints(*k).is_subset(other.constraints(*k)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_insert_sets_flag() {
        let mut set = ActiveComponentSet::new();
        assert!(!set.has_physics);
        set.insert_constraint(ConstraintKind::Physics, "hair");
        set.insert_constraint(ConstraintKind::Physics, "hair");
        assert!(set.has_physics);
        assert_eq!(set.physics_constraints.len(), 1);
        assert_eq!(set.constraint_count(), 1);
    }

    #[test]
    fn union_is_monotonic() {
        let mut a = ActiveComponentSet::new();
        a.slots.insert("arm".into());
        let mut b = ActiveComponentSet::new();
        b.meshes.insert(AttachmentKey::new("arm", "sleeve"));
        b.insert_constraint(ConstraintKind::Ik, "reach");

        let before = a.clone();
        a.union_with(&b);
        assert!(before.is_subset_of(&a));
        assert!(b.is_subset_of(&a));
        assert!(a.has_ik);
        assert_eq!(a.mesh_ids(), vec!["arm:sleeve".to_string()]);
    }
}
