//! The seam between the checkbox and whatever draws it.
//!
//! The checkbox never rasterizes or times anything itself. It attaches
//! [`ShapeLayer`]s, detaches them, and hands [`AnimationDescriptor`]s to a
//! [`Renderer`], which owns compositing and playback and reports back through
//! the [`Completion`] closure passed with each animation.
//!
//! [`RecordingRenderer`] is a complete in-process host: it records every
//! command, plays animations on a manual clock and can be captured into a
//! [`Snapshot`] for SVG or PNG output.

mod commands;
mod recording;
mod snapshot;

pub use commands::RenderCommand;
pub use recording::RecordingRenderer;
pub use snapshot::{Result, Snapshot, SnapshotError};

use crate::animation::{AnimatedProperty, AnimationDescriptor, AnimationValue};
use crate::layer::{LayerKind, ShapeLayer};
use crate::path::Path;

/// Called by the host once an animation stops. `finished` is false when the
/// animation was interrupted before reaching its end. The host passes itself
/// so the closure can attach or detach layers.
pub type Completion = Box<dyn FnOnce(bool, &mut dyn Renderer)>;

pub trait Renderer {
    /// Show `layer` in slot `kind`, replacing whatever the slot held.
    fn attach(&mut self, kind: LayerKind, layer: ShapeLayer);

    /// Remove the layer in slot `kind`, if any.
    fn detach(&mut self, kind: LayerKind);

    /// Start `animation` on the layer in slot `kind`. An animation of the
    /// same property already running on that layer is replaced.
    fn play(
        &mut self,
        kind: LayerKind,
        animation: AnimationDescriptor,
        on_complete: Option<Completion>,
    );
}

/// Presentation values of a layer at one instant, after animations.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerAppearance {
    pub opacity: f32,
    /// Uniform scale around the layer centre
    pub scale: f32,
    pub stroke_end: f32,
    /// Path override from a running morph
    pub path: Option<Path>,
}

impl Default for LayerAppearance {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            scale: 1.0,
            stroke_end: 1.0,
            path: None,
        }
    }
}

impl LayerAppearance {
    /// Overwrite the presented value of `property`.
    pub fn apply(&mut self, property: AnimatedProperty, value: AnimationValue) {
        match (property, value) {
            (AnimatedProperty::Path, AnimationValue::Path(path)) => self.path = Some(path),
            (property, value) => {
                let Some(v) = value.as_scalar() else {
                    return;
                };
                match property {
                    AnimatedProperty::StrokeEnd => self.stroke_end = v,
                    AnimatedProperty::Opacity => self.opacity = v,
                    AnimatedProperty::Transform => self.scale = v,
                    AnimatedProperty::Path => {}
                }
            }
        }
    }

    /// Nothing of the layer can be seen.
    pub fn is_invisible(&self) -> bool {
        self.opacity <= 0.0 || self.scale.abs() <= 1e-3
    }
}

/// One attached layer as it would be composited at a given instant.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerFrame {
    pub kind: LayerKind,
    pub layer: ShapeLayer,
    pub appearance: LayerAppearance,
}

impl LayerFrame {
    /// The path actually drawn, honouring a running morph.
    pub fn path(&self) -> &Path {
        self.appearance.path.as_ref().unwrap_or(&self.layer.path)
    }
}
