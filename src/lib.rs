pub mod animation;
pub mod checkbox;
pub mod color;
pub mod geometry;
pub mod layer;
pub mod path;
pub mod shapes;
pub mod transform;

// The host-facing seam and the reference host
pub mod renderer;

pub mod prelude {
    pub use crate::animation::{
        AnimatedProperty, AnimationBuilder, AnimationDescriptor, AnimationValue, FillMode,
        Keyframe, TimingFunction,
    };
    pub use crate::checkbox::{AnimationType, CheckBox, CheckBoxConfig};
    pub use crate::color::Color;
    pub use crate::geometry::{Point, Rect};
    pub use crate::layer::{LayerKind, Layers, ShapeLayer};
    pub use crate::path::{Path, PathCmd};
    pub use crate::renderer::{
        Completion, RecordingRenderer, RenderCommand, Renderer, Snapshot, SnapshotError,
    };
    pub use crate::shapes::{BoxType, CheckMarkKind, PathGenerator};
    pub use crate::transform::Transform;
}
