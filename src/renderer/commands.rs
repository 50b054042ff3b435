//! Command log entries of the recording renderer.

use crate::animation::AnimatedProperty;
use crate::layer::LayerKind;

/// A single operation a checkbox asked its renderer to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderCommand {
    /// A layer was attached (or replaced) in a slot.
    Attach(LayerKind),
    /// A present layer was removed from its slot.
    Detach(LayerKind),
    /// An animation was started on a layer.
    Play {
        /// Target layer slot
        layer: LayerKind,
        /// The animated property
        property: AnimatedProperty,
        /// Whether a completion closure was handed over with it
        completes: bool,
    },
}

impl RenderCommand {
    pub fn is_play(&self) -> bool {
        matches!(self, RenderCommand::Play { .. })
    }

    /// The layer slot the command targets.
    pub fn layer(&self) -> LayerKind {
        match *self {
            RenderCommand::Attach(kind) | RenderCommand::Detach(kind) => kind,
            RenderCommand::Play { layer, .. } => layer,
        }
    }
}
