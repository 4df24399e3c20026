//! Mesh cost: how many deformable meshes an animation shows and how heavy they are.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use rigscore_rig_core::{Animation, Rig, TimelineTarget};

use crate::active::{ActiveComponentSet, AttachmentKey};
use crate::scoring::mesh_score;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshMetrics {
    pub active_mesh_count: usize,
    pub total_vertices: usize,
    pub max_vertices: usize,
    pub weighted_mesh_count: usize,
    pub deformed_mesh_count: usize,
    pub linked_mesh_count: usize,
    pub score: f64,
}

/// Meshes targeted by a deform timeline of `animation`.
fn deform_targets(rig: &Rig, animation: &Animation) -> HashSet<AttachmentKey> {
    animation
        .timelines
        .iter()
        .filter_map(|tl| match &tl.target {
            TimelineTarget::Deform { slot, attachment } => rig
                .slot(*slot)
                .map(|s| AttachmentKey::new(&s.name, attachment)),
            _ => None,
        })
        .collect()
}

pub fn analyze_meshes(
    rig: &Rig,
    animation: &Animation,
    active: &ActiveComponentSet,
) -> MeshMetrics {
    let deformed = deform_targets(rig, animation);
    let mut m = MeshMetrics::default();

    for key in &active.meshes {
        let Some(mesh) = rig
            .find_slot(&key.slot)
            .and_then(|(index, _)| rig.attachment(index, &key.attachment))
            .and_then(|att| att.as_mesh())
        else {
            log::warn!("mesh '{key}' no longer resolves to a mesh attachment, skipped");
            continue;
        };
        m.active_mesh_count += 1;
        m.total_vertices += mesh.vertex_count;
        m.max_vertices = m.max_vertices.max(mesh.vertex_count);
        if mesh.bone_weight_count > 0 {
            m.weighted_mesh_count += 1;
        }
        if mesh.parent_mesh.is_some() {
            m.linked_mesh_count += 1;
        }
        if deformed.contains(key) {
            m.deformed_mesh_count += 1;
        }
    }

    m.score = mesh_score(
        m.active_mesh_count,
        m.total_vertices,
        m.deformed_mesh_count,
        m.weighted_mesh_count,
    );
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rigscore_rig_core::{Attachment, BoneData, SlotData, Timeline};

    #[test]
    fn counts_vertices_weights_and_deforms() {
        let mut rig = Rig::new("m");
        rig.bones.push(BoneData::new("root", None));
        let mut body = SlotData::new("body", 0);
        body.attachments.insert("torso".into(), Attachment::mesh(200, 80));
        body.attachments
            .insert("torso-alt".into(), Attachment::linked_mesh(100, "torso"));
        rig.slots.push(body);

        let mut anim = Animation::new("breathe", 1.0);
        anim.timelines.push(Timeline::new(TimelineTarget::Deform {
            slot: 0,
            attachment: "torso".into(),
        }));

        let mut active = ActiveComponentSet::new();
        active.meshes.insert(AttachmentKey::new("body", "torso"));
        active.meshes.insert(AttachmentKey::new("body", "torso-alt"));
        active.meshes.insert(AttachmentKey::new("body", "missing"));

        let m = analyze_meshes(&rig, &anim, &active);
        assert_eq!(m.active_mesh_count, 2);
        assert_eq!(m.total_vertices, 300);
        assert_eq!(m.max_vertices, 200);
        assert_eq!(m.weighted_mesh_count, 1);
        assert_eq!(m.deformed_mesh_count, 1);
        assert_eq!(m.linked_mesh_count, 1);
        let expected = 100.0 - (2.0f64 / 15.0 + 1.0).log2() * 15.0 - 10.0 - 1.5 - 2.0;
        assert_relative_eq!(m.score, expected, epsilon = 1e-9);
    }
}
