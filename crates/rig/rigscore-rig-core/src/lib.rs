//! rigscore rig core
//!
//! Read-only description of a skeletal-animation rig (bones, slots, attachments,
//! constraints, animations) together with the narrow capability surface the analysis
//! engine uses to drive an external pose evaluator.
//!
//! Nothing here evaluates animation curves or simulates constraints; hosts implement
//! [`PoseEvaluator`] on top of their runtime of choice.

pub mod data;
pub mod error;
pub mod pose;

pub use data::{
    Animation, Attachment, AttachmentKind, BlendMode, BoneData, BoundingBoxAttachment,
    ClippingAttachment, ConstraintData, ConstraintKind, IkConstraintData, KeyValue, Keyframe,
    MeshAttachment, PathAttachment, PathConstraintData, PathMix, PhysicsChannels,
    PhysicsConstraintData, PositionMode, RegionAttachment, Rig, RotateMode, SlotData,
    SpacingMode, Timeline, TimelineTarget, Transform2, TransformConstraintData, TransformMix,
};
pub use error::PoseError;
pub use pose::{BonePose, ConstraintMix, ConstraintPose, Pose, PoseEvaluator, SlotPose, TrackEntry};
