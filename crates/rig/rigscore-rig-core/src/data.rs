//! Canonical rig data model.
//!
//! All entities reference each other by index into the owning [`Rig`] vectors
//! (bones, slots, constraints). Indexes are not validated on construction: consumers
//! must treat an out-of-range reference as stale data and skip it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

fn one() -> f32 {
    1.0
}

/// Local 2D transform (degrees for rotation and shear).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transform2 {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub rotation: f32,
    #[serde(default = "one")]
    pub scale_x: f32,
    #[serde(default = "one")]
    pub scale_y: f32,
    #[serde(default)]
    pub shear_x: f32,
    #[serde(default)]
    pub shear_y: f32,
}

impl Default for Transform2 {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            shear_x: 0.0,
            shear_y: 0.0,
        }
    }
}

/// A node of the bone tree. Parents precede their children in [`Rig::bones`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoneData {
    pub name: String,
    #[serde(default)]
    pub parent: Option<usize>,
    #[serde(default)]
    pub local: Transform2,
    #[serde(default)]
    pub length: f32,
}

impl BoneData {
    pub fn new(name: impl Into<String>, parent: Option<usize>) -> Self {
        Self {
            name: name.into(),
            parent,
            local: Transform2::default(),
            length: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum BlendMode {
    #[default]
    Normal,
    Additive,
    Multiply,
    Screen,
}

impl BlendMode {
    #[inline]
    pub fn is_normal(self) -> bool {
        matches!(self, BlendMode::Normal)
    }
}

/// Draw-order entry bound to one bone. `attachments` is the slot's skin table keyed by
/// attachment name; `attachment` names the one shown in the setup pose.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SlotData {
    pub name: String,
    pub bone: usize,
    #[serde(default)]
    pub blend_mode: BlendMode,
    #[serde(default)]
    pub attachment: Option<String>,
    #[serde(default = "one")]
    pub alpha: f32,
    #[serde(default)]
    pub attachments: IndexMap<String, Attachment>,
}

impl SlotData {
    pub fn new(name: impl Into<String>, bone: usize) -> Self {
        Self {
            name: name.into(),
            bone,
            blend_mode: BlendMode::Normal,
            attachment: None,
            alpha: 1.0,
            attachments: IndexMap::new(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegionAttachment {
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeshAttachment {
    pub vertex_count: usize,
    /// Number of bone influences across all vertices; zero for unweighted meshes.
    #[serde(default)]
    pub bone_weight_count: usize,
    /// Name of the mesh this one is linked to (shares its vertices).
    #[serde(default)]
    pub parent_mesh: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClippingAttachment {
    pub vertex_count: usize,
    #[serde(default)]
    pub end_slot: Option<usize>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBoxAttachment {
    pub vertex_count: usize,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PathAttachment {
    pub vertex_count: usize,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub constant_speed: bool,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum AttachmentKind {
    Region,
    Mesh,
    Clipping,
    BoundingBox,
    Path,
}

/// Visual content assigned to a slot.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Attachment {
    Region(RegionAttachment),
    Mesh(MeshAttachment),
    Clipping(ClippingAttachment),
    BoundingBox(BoundingBoxAttachment),
    Path(PathAttachment),
}

impl Attachment {
    pub fn region() -> Self {
        Attachment::Region(RegionAttachment::default())
    }

    pub fn mesh(vertex_count: usize, bone_weight_count: usize) -> Self {
        Attachment::Mesh(MeshAttachment {
            vertex_count,
            bone_weight_count,
            parent_mesh: None,
        })
    }

    pub fn linked_mesh(vertex_count: usize, parent: impl Into<String>) -> Self {
        Attachment::Mesh(MeshAttachment {
            vertex_count,
            bone_weight_count: 0,
            parent_mesh: Some(parent.into()),
        })
    }

    pub fn clipping(vertex_count: usize) -> Self {
        Attachment::Clipping(ClippingAttachment {
            vertex_count,
            end_slot: None,
        })
    }

    pub fn bounding_box(vertex_count: usize) -> Self {
        Attachment::BoundingBox(BoundingBoxAttachment { vertex_count })
    }

    pub fn path(vertex_count: usize) -> Self {
        Attachment::Path(PathAttachment {
            vertex_count,
            closed: false,
            constant_speed: true,
        })
    }

    pub fn kind(&self) -> AttachmentKind {
        match self {
            Attachment::Region(_) => AttachmentKind::Region,
            Attachment::Mesh(_) => AttachmentKind::Mesh,
            Attachment::Clipping(_) => AttachmentKind::Clipping,
            Attachment::BoundingBox(_) => AttachmentKind::BoundingBox,
            Attachment::Path(_) => AttachmentKind::Path,
        }
    }

    /// World-vertex count (a region is always a quad).
    pub fn vertex_count(&self) -> usize {
        match self {
            Attachment::Region(_) => 4,
            Attachment::Mesh(m) => m.vertex_count,
            Attachment::Clipping(c) => c.vertex_count,
            Attachment::BoundingBox(b) => b.vertex_count,
            Attachment::Path(p) => p.vertex_count,
        }
    }

    pub fn as_mesh(&self) -> Option<&MeshAttachment> {
        match self {
            Attachment::Mesh(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_clipping(&self) -> Option<&ClippingAttachment> {
        match self {
            Attachment::Clipping(c) => Some(c),
            _ => None,
        }
    }
}

/// Six-channel influence of a transform constraint.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransformMix {
    #[serde(default)]
    pub rotate: f32,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub scale_x: f32,
    #[serde(default)]
    pub scale_y: f32,
    #[serde(default)]
    pub shear_y: f32,
}

impl TransformMix {
    pub fn uniform(v: f32) -> Self {
        Self {
            rotate: v,
            x: v,
            y: v,
            scale_x: v,
            scale_y: v,
            shear_y: v,
        }
    }

    pub fn from_channels(c: [f32; 6]) -> Self {
        Self {
            rotate: c[0],
            x: c[1],
            y: c[2],
            scale_x: c[3],
            scale_y: c[4],
            shear_y: c[5],
        }
    }

    pub fn channels(&self) -> [f32; 6] {
        [
            self.rotate,
            self.x,
            self.y,
            self.scale_x,
            self.scale_y,
            self.shear_y,
        ]
    }

    /// Number of channels with positive influence.
    pub fn active_channels(&self) -> usize {
        self.channels().iter().filter(|m| **m > 0.0).count()
    }
}

/// Three-channel influence of a path constraint.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PathMix {
    #[serde(default)]
    pub rotate: f32,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

impl PathMix {
    pub fn uniform(v: f32) -> Self {
        Self {
            rotate: v,
            x: v,
            y: v,
        }
    }

    pub fn from_channels(c: [f32; 3]) -> Self {
        Self {
            rotate: c[0],
            x: c[1],
            y: c[2],
        }
    }

    pub fn channels(&self) -> [f32; 3] {
        [self.rotate, self.x, self.y]
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PositionMode {
    Fixed,
    #[default]
    Percent,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SpacingMode {
    #[default]
    Length,
    Fixed,
    Percent,
    Proportional,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RotateMode {
    #[default]
    Tangent,
    Chain,
    ChainScale,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IkConstraintData {
    pub name: String,
    pub bones: Vec<usize>,
    pub target: usize,
    #[serde(default = "one")]
    pub mix: f32,
    #[serde(default)]
    pub softness: f32,
    #[serde(default)]
    pub stretch: bool,
}

impl IkConstraintData {
    pub fn new(name: impl Into<String>, bones: Vec<usize>, target: usize) -> Self {
        Self {
            name: name.into(),
            bones,
            target,
            mix: 1.0,
            softness: 0.0,
            stretch: false,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransformConstraintData {
    pub name: String,
    pub bones: Vec<usize>,
    pub source: usize,
    #[serde(default)]
    pub mix: TransformMix,
    #[serde(default)]
    pub local: bool,
    #[serde(default)]
    pub relative: bool,
}

impl TransformConstraintData {
    pub fn new(name: impl Into<String>, bones: Vec<usize>, source: usize) -> Self {
        Self {
            name: name.into(),
            bones,
            source,
            mix: TransformMix::uniform(1.0),
            local: false,
            relative: false,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PathConstraintData {
    pub name: String,
    pub bones: Vec<usize>,
    /// Slot holding the path attachment to follow.
    pub target: usize,
    #[serde(default)]
    pub position_mode: PositionMode,
    #[serde(default)]
    pub spacing_mode: SpacingMode,
    #[serde(default)]
    pub rotate_mode: RotateMode,
    #[serde(default)]
    pub mix: PathMix,
}

impl PathConstraintData {
    pub fn new(name: impl Into<String>, bones: Vec<usize>, target: usize) -> Self {
        Self {
            name: name.into(),
            bones,
            target,
            position_mode: PositionMode::Percent,
            spacing_mode: SpacingMode::Length,
            rotate_mode: RotateMode::Tangent,
            mix: PathMix::uniform(1.0),
        }
    }
}

/// Per-channel physics influence (zero disables the channel).
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhysicsChannels {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub rotate: f32,
    #[serde(default)]
    pub scale_x: f32,
    #[serde(default)]
    pub shear_x: f32,
}

impl PhysicsChannels {
    pub fn enabled_count(&self) -> usize {
        [self.x, self.y, self.rotate, self.scale_x, self.shear_x]
            .iter()
            .filter(|c| **c != 0.0)
            .count()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhysicsConstraintData {
    pub name: String,
    pub bone: usize,
    #[serde(default)]
    pub channels: PhysicsChannels,
    #[serde(default = "one")]
    pub inertia: f32,
    #[serde(default)]
    pub strength: f32,
    #[serde(default = "one")]
    pub damping: f32,
    #[serde(default = "one")]
    pub mass_inverse: f32,
    #[serde(default)]
    pub wind: f32,
    #[serde(default)]
    pub gravity: f32,
    /// Simulation step in seconds.
    #[serde(default = "PhysicsConstraintData::default_step")]
    pub step: f32,
    #[serde(default = "one")]
    pub mix: f32,
}

impl PhysicsConstraintData {
    fn default_step() -> f32 {
        1.0 / 60.0
    }

    pub fn new(name: impl Into<String>, bone: usize) -> Self {
        Self {
            name: name.into(),
            bone,
            channels: PhysicsChannels {
                rotate: 1.0,
                ..PhysicsChannels::default()
            },
            inertia: 1.0,
            strength: 100.0,
            damping: 1.0,
            mass_inverse: 1.0,
            wind: 0.0,
            gravity: 0.0,
            step: Self::default_step(),
            mix: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum ConstraintKind {
    Ik,
    Transform,
    Path,
    Physics,
}

impl ConstraintKind {
    pub const ALL: [ConstraintKind; 4] = [
        ConstraintKind::Ik,
        ConstraintKind::Transform,
        ConstraintKind::Path,
        ConstraintKind::Physics,
    ];
}

/// A rule adjusting bone transforms each frame.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ConstraintData {
    Ik(IkConstraintData),
    Transform(TransformConstraintData),
    Path(PathConstraintData),
    Physics(PhysicsConstraintData),
}

impl ConstraintData {
    pub fn name(&self) -> &str {
        match self {
            ConstraintData::Ik(c) => &c.name,
            ConstraintData::Transform(c) => &c.name,
            ConstraintData::Path(c) => &c.name,
            ConstraintData::Physics(c) => &c.name,
        }
    }

    pub fn kind(&self) -> ConstraintKind {
        match self {
            ConstraintData::Ik(_) => ConstraintKind::Ik,
            ConstraintData::Transform(_) => ConstraintKind::Transform,
            ConstraintData::Path(_) => ConstraintKind::Path,
            ConstraintData::Physics(_) => ConstraintKind::Physics,
        }
    }

    /// Bones whose transforms this constraint writes.
    pub fn bones(&self) -> &[usize] {
        match self {
            ConstraintData::Ik(c) => &c.bones,
            ConstraintData::Transform(c) => &c.bones,
            ConstraintData::Path(c) => &c.bones,
            ConstraintData::Physics(c) => std::slice::from_ref(&c.bone),
        }
    }
}

macro_rules! constraint_from {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(impl From<$ty> for ConstraintData {
            fn from(c: $ty) -> Self {
                ConstraintData::$variant(c)
            }
        })*
    };
}

constraint_from! {
    Ik => IkConstraintData,
    Transform => TransformConstraintData,
    Path => PathConstraintData,
    Physics => PhysicsConstraintData,
}

/// Keyframe payload. Untagged: numbers are scalars, arrays are multi-channel values and
/// strings/null name an attachment.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum KeyValue {
    Scalar(f32),
    Channels(Vec<f32>),
    Attachment(Option<String>),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Keyframe {
    pub time: f32,
    pub value: KeyValue,
}

/// The entity and property a timeline drives.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TimelineTarget {
    Attachment { slot: usize },
    Alpha { slot: usize },
    Deform { slot: usize, attachment: String },
    Rotate { bone: usize },
    Translate { bone: usize },
    Scale { bone: usize },
    Shear { bone: usize },
    Ik { constraint: usize },
    Transform { constraint: usize },
    PathMix { constraint: usize },
    PathPosition { constraint: usize },
    PathSpacing { constraint: usize },
    Physics { constraint: usize },
    DrawOrder,
    Event,
}

impl TimelineTarget {
    /// Constraint index and the kind the timeline expects, for constraint timelines.
    pub fn constraint(&self) -> Option<(usize, ConstraintKind)> {
        match *self {
            TimelineTarget::Ik { constraint } => Some((constraint, ConstraintKind::Ik)),
            TimelineTarget::Transform { constraint } => {
                Some((constraint, ConstraintKind::Transform))
            }
            TimelineTarget::PathMix { constraint }
            | TimelineTarget::PathPosition { constraint }
            | TimelineTarget::PathSpacing { constraint } => {
                Some((constraint, ConstraintKind::Path))
            }
            TimelineTarget::Physics { constraint } => Some((constraint, ConstraintKind::Physics)),
            _ => None,
        }
    }
}

/// A keyframe track bound to one property of one entity.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Timeline {
    pub target: TimelineTarget,
    #[serde(default)]
    pub keys: Vec<Keyframe>,
}

impl Timeline {
    pub fn new(target: TimelineTarget) -> Self {
        Self {
            target,
            keys: Vec::new(),
        }
    }

    pub fn with_key(mut self, time: f32, value: KeyValue) -> Self {
        self.keys.push(Keyframe { time, value });
        self
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Animation {
    pub name: String,
    /// Duration in seconds.
    pub duration: f32,
    #[serde(default)]
    pub timelines: Vec<Timeline>,
}

impl Animation {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
            timelines: Vec::new(),
        }
    }
}

/// The full skeletal-animation data set.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Rig {
    pub name: String,
    #[serde(default)]
    pub bones: Vec<BoneData>,
    #[serde(default)]
    pub slots: Vec<SlotData>,
    #[serde(default)]
    pub constraints: Vec<ConstraintData>,
    #[serde(default)]
    pub animations: Vec<Animation>,
}

impl Rig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn bone(&self, index: usize) -> Option<&BoneData> {
        self.bones.get(index)
    }

    #[inline]
    pub fn slot(&self, index: usize) -> Option<&SlotData> {
        self.slots.get(index)
    }

    #[inline]
    pub fn constraint(&self, index: usize) -> Option<&ConstraintData> {
        self.constraints.get(index)
    }

    pub fn animation(&self, name: &str) -> Option<&Animation> {
        self.animations.iter().find(|a| a.name == name)
    }

    pub fn find_slot(&self, name: &str) -> Option<(usize, &SlotData)> {
        self.slots.iter().enumerate().find(|(_, s)| s.name == name)
    }

    pub fn find_bone(&self, name: &str) -> Option<usize> {
        self.bones.iter().position(|b| b.name == name)
    }

    /// Attachment `name` from the skin table of slot `slot`.
    pub fn attachment(&self, slot: usize, name: &str) -> Option<&Attachment> {
        self.slots.get(slot)?.attachments.get(name)
    }

    /// Iterate a bone and all of its ancestors, nearest first.
    ///
    /// Stops at a dangling parent index and after `bones.len()` steps, so corrupt
    /// parent cycles terminate.
    pub fn bone_chain(&self, bone: usize) -> BoneChain<'_> {
        BoneChain {
            rig: self,
            next: self.bones.get(bone).map(|_| bone),
            remaining: self.bones.len(),
        }
    }
}

pub struct BoneChain<'a> {
    rig: &'a Rig,
    next: Option<usize>,
    remaining: usize,
}

impl Iterator for BoneChain<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next?;
        self.remaining -= 1;
        self.next = self
            .rig
            .bones
            .get(current)
            .and_then(|b| b.parent)
            .filter(|p| *p < self.rig.bones.len());
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_rig() -> Rig {
        let mut rig = Rig::new("chain");
        rig.bones.push(BoneData::new("root", None));
        rig.bones.push(BoneData::new("hip", Some(0)));
        rig.bones.push(BoneData::new("knee", Some(1)));
        rig
    }

    #[test]
    fn bone_chain_walks_to_root() {
        let rig = chain_rig();
        let chain: Vec<usize> = rig.bone_chain(2).collect();
        assert_eq!(chain, vec![2, 1, 0]);
        assert_eq!(rig.bone_chain(9).count(), 0);
    }

    #[test]
    fn bone_chain_terminates_on_cycles() {
        let mut rig = chain_rig();
        rig.bones[0].parent = Some(2);
        assert_eq!(rig.bone_chain(2).count(), 3);
    }

    #[test]
    fn attachment_vertex_counts() {
        assert_eq!(Attachment::region().vertex_count(), 4);
        assert_eq!(Attachment::mesh(120, 40).vertex_count(), 120);
        assert_eq!(Attachment::clipping(6).kind(), AttachmentKind::Clipping);
        assert!(Attachment::bounding_box(8).as_mesh().is_none());
    }

    #[test]
    fn tagged_attachment_json() {
        let json = r#"{"type":"mesh","vertexCount":32,"boneWeightCount":12}"#;
        let att: Attachment = serde_json::from_str(json).expect("parse mesh");
        assert_eq!(att, Attachment::mesh(32, 12));

        let tl: Timeline =
            serde_json::from_str(r#"{"target":{"type":"deform","slot":1,"attachment":"sleeve"}}"#)
                .expect("parse timeline");
        assert!(tl.keys.is_empty());
        assert_eq!(
            tl.target,
            TimelineTarget::Deform {
                slot: 1,
                attachment: "sleeve".into()
            }
        );
    }

    #[test]
    fn key_values_are_untagged() {
        let keys: Vec<Keyframe> = serde_json::from_str(
            r#"[{"time":0,"value":0.5},{"time":1,"value":[1,0,0]},{"time":2,"value":"eye"},{"time":3,"value":null}]"#,
        )
        .expect("parse keys");
        assert_eq!(keys[0].value, KeyValue::Scalar(0.5));
        assert_eq!(keys[1].value, KeyValue::Channels(vec![1.0, 0.0, 0.0]));
        assert_eq!(keys[2].value, KeyValue::Attachment(Some("eye".into())));
        assert_eq!(keys[3].value, KeyValue::Attachment(None));
    }

    #[test]
    fn constraint_timeline_kinds() {
        assert_eq!(
            TimelineTarget::PathSpacing { constraint: 3 }.constraint(),
            Some((3, ConstraintKind::Path))
        );
        assert_eq!(TimelineTarget::Alpha { slot: 0 }.constraint(), None);
        let physics = ConstraintData::Physics(PhysicsConstraintData::new("hair", 4));
        assert_eq!(physics.bones(), &[4]);
        assert_eq!(physics.kind(), ConstraintKind::Physics);
    }
}
