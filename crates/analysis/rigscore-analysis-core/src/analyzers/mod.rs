//! Domain analyzers: each reduces an [`ActiveComponentSet`](crate::ActiveComponentSet)
//! (or, for blend modes, its own higher-rate sampling pass) into a metrics record
//! carrying a 0..=100 score.

pub mod blend;
pub mod clipping;
pub mod constraints;
pub mod mesh;
pub mod structure;

pub use blend::{analyze_blend_modes, BlendModeMetrics};
pub use clipping::{analyze_clipping, ClippingMetrics};
pub use constraints::{
    analyze_constraints, iteration_factor, path_mode_complexity, ConstraintMetrics, IkMetrics,
    PathMetrics, PhysicsMetrics, TransformMetrics,
};
pub use mesh::{analyze_meshes, MeshMetrics};
pub use structure::{analyze_rig_structure, RigStructureMetrics};
