//! Rig-wide skeleton structure. Computed once per rig, independent of any animation.

use serde::{Deserialize, Serialize};

use rigscore_rig_core::Rig;

use crate::scoring::bone_score;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RigStructureMetrics {
    pub total_bones: usize,
    pub root_bones: usize,
    pub leaf_bones: usize,
    /// Deepest bone below a root (roots are depth 0).
    pub max_depth: usize,
    pub slot_count: usize,
    pub animation_count: usize,
    pub score: f64,
}

/// Deepest level reachable from `roots`, walked with an explicit stack.
fn deepest_level(children: &[Vec<usize>], roots: &[usize]) -> usize {
    let mut deepest = 0;
    let mut stack: Vec<(usize, usize)> = roots.iter().map(|r| (*r, 0)).collect();
    while let Some((bone, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        stack.extend(children[bone].iter().map(|c| (*c, depth + 1)));
    }
    deepest
}

pub fn analyze_rig_structure(rig: &Rig) -> RigStructureMetrics {
    let n = rig.bones.len();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut roots = Vec::new();

    for (index, bone) in rig.bones.iter().enumerate() {
        match bone.parent {
            None => roots.push(index),
            Some(parent) if parent < n && parent != index => children[parent].push(index),
            Some(parent) => {
                log::warn!(
                    "bone '{}' has invalid parent #{parent}, treated as root",
                    bone.name
                );
                roots.push(index);
            }
        }
    }

    let max_depth = deepest_level(&children, &roots);

    RigStructureMetrics {
        total_bones: n,
        root_bones: roots.len(),
        leaf_bones: children.iter().filter(|c| c.is_empty()).count(),
        max_depth,
        slot_count: rig.slots.len(),
        animation_count: rig.animations.len(),
        score: bone_score(n, max_depth),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigscore_rig_core::BoneData;

    #[test]
    fn thirty_flat_bones_score_85() {
        let mut rig = Rig::new("flat");
        for i in 0..30 {
            rig.bones.push(BoneData::new(format!("b{i}"), None));
        }
        let m = analyze_rig_structure(&rig);
        assert_eq!(m.total_bones, 30);
        assert_eq!(m.root_bones, 30);
        assert_eq!(m.max_depth, 0);
        assert_eq!(m.score, 85.0);
    }

    #[test]
    fn depth_follows_longest_branch() {
        let mut rig = Rig::new("tree");
        rig.bones.push(BoneData::new("root", None));
        rig.bones.push(BoneData::new("spine", Some(0)));
        rig.bones.push(BoneData::new("neck", Some(1)));
        rig.bones.push(BoneData::new("head", Some(2)));
        rig.bones.push(BoneData::new("tail", Some(0)));
        let m = analyze_rig_structure(&rig);
        assert_eq!(m.max_depth, 3);
        assert_eq!(m.root_bones, 1);
        assert_eq!(m.leaf_bones, 2);
    }

    #[test]
    fn empty_rig_has_full_score() {
        let m = analyze_rig_structure(&Rig::new("none"));
        assert_eq!(m.total_bones, 0);
        assert_eq!(m.score, 100.0);
    }

    #[test]
    fn long_chain_is_walked_without_recursion() {
        let mut rig = Rig::new("chain");
        rig.bones.push(BoneData::new("b0", None));
        for i in 1..100_000 {
            rig.bones.push(BoneData::new(format!("b{i}"), Some(i - 1)));
        }
        let m = analyze_rig_structure(&rig);
        assert_eq!(m.max_depth, 99_999);
        assert_eq!(m.root_bones, 1);
        assert_eq!(m.leaf_bones, 1);
        assert_eq!(m.score, 0.0);
    }

    #[test]
    fn dangling_parent_becomes_root() {
        let mut rig = Rig::new("broken");
        rig.bones.push(BoneData::new("a", Some(9)));
        let m = analyze_rig_structure(&rig);
        assert_eq!(m.root_bones, 1);
    }
}
