use std::collections::BTreeMap;
use std::time::Duration;

use super::{Completion, LayerAppearance, LayerFrame, RenderCommand, Renderer};
use crate::animation::{AnimatedProperty, AnimationDescriptor};
use crate::layer::{LayerKind, Layers, ShapeLayer};

/// An animation handed to the renderer, with its playback bookkeeping.
struct RunningAnimation {
    layer: LayerKind,
    descriptor: AnimationDescriptor,
    /// Clock value when the animation was handed over
    started_at: Duration,
    completion: Option<Completion>,
    /// Reached its end; kept only while it holds a value
    completed: bool,
}

impl RunningAnimation {
    fn end(&self) -> Duration {
        self.started_at + self.descriptor.end_time()
    }

    fn presents_on(&self, kind: LayerKind) -> bool {
        self.layer == kind
    }
}

/// In-process host renderer driven by a manual clock.
///
/// Records every command it receives, keeps the attached layers, and plays
/// animations when the clock is advanced, invoking completion closures in
/// the order the animations end.
#[derive(Default)]
pub struct RecordingRenderer {
    clock: Duration,
    layers: BTreeMap<LayerKind, ShapeLayer>,
    animations: Vec<RunningAnimation>,
    commands: Vec<RenderCommand>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current playback time.
    pub fn now(&self) -> Duration {
        self.clock
    }

    pub fn layer(&self, kind: LayerKind) -> Option<&ShapeLayer> {
        self.layers.get(&kind)
    }

    pub fn attached(&self) -> Layers {
        self.layers
            .keys()
            .fold(Layers::empty(), |acc, kind| acc | kind.flag())
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Animations currently presented on `kind`, in the order they were played.
    pub fn animations_on(&self, kind: LayerKind) -> Vec<&AnimationDescriptor> {
        self.animations
            .iter()
            .filter(|a| a.presents_on(kind))
            .map(|a| &a.descriptor)
            .collect()
    }

    /// Animations that have not reached their end yet.
    pub fn running_count(&self) -> usize {
        self.animations.iter().filter(|a| !a.completed).count()
    }

    /// Move the clock forward, completing every animation that ends on the way.
    pub fn advance(&mut self, dt: Duration) {
        self.clock += dt;
        self.complete_due();
    }

    /// Jump to the end of the longest running animation.
    pub fn finish_all(&mut self) {
        let last_end = self
            .animations
            .iter()
            .filter(|a| !a.completed)
            .map(RunningAnimation::end)
            .max();
        if let Some(end) = last_end {
            self.clock = self.clock.max(end);
        }
        self.complete_due();
    }

    /// Stop every running animation early, reporting `finished == false`.
    pub fn interrupt_all(&mut self) {
        let mut completions = Vec::new();
        self.animations.retain_mut(|a| {
            if a.completed {
                return true;
            }
            if let Some(completion) = a.completion.take() {
                completions.push(completion);
            }
            false
        });
        for completion in completions {
            completion(false, self);
        }
    }

    fn complete_due(&mut self) {
        // One at a time: a completion may attach, detach or play.
        while let Some(index) = self.next_due() {
            let animation = &mut self.animations[index];
            animation.completed = true;
            let completion = animation.completion.take();
            if !animation.descriptor.fill_mode.holds_final_value() {
                self.animations.remove(index);
            }
            if let Some(completion) = completion {
                completion(true, self);
            }
        }
    }

    fn next_due(&self) -> Option<usize> {
        self.animations
            .iter()
            .enumerate()
            .filter(|(_, a)| !a.completed && a.end() <= self.clock)
            .min_by_key(|(_, a)| a.end())
            .map(|(i, _)| i)
    }

    /// Drop every animation of a layer that left the tree. Running ones
    /// report `finished == false` right away; held values die with the layer.
    fn orphan(&mut self, kind: LayerKind) {
        let mut completions = Vec::new();
        self.animations.retain_mut(|a| {
            if a.layer != kind {
                return true;
            }
            if let Some(completion) = a.completion.take() {
                completions.push(completion);
            }
            false
        });
        for completion in completions {
            completion(false, self);
        }
    }

    /// Presentation values of `kind` at the current clock.
    pub fn appearance(&self, kind: LayerKind) -> LayerAppearance {
        let mut appearance = LayerAppearance::default();
        for animation in self.animations.iter().filter(|a| a.presents_on(kind)) {
            let elapsed = self.clock.saturating_sub(animation.started_at);
            if let Some(value) = animation.descriptor.sample(elapsed) {
                appearance.apply(animation.descriptor.property, value);
            }
        }
        appearance
    }

    /// Every attached layer with its presentation values, bottom first.
    pub fn frame(&self) -> Vec<LayerFrame> {
        self.layers
            .iter()
            .map(|(kind, layer)| LayerFrame {
                kind: *kind,
                layer: layer.clone(),
                appearance: self.appearance(*kind),
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn attach(&mut self, kind: LayerKind, layer: ShapeLayer) {
        log::debug!("attach {:?} ({} commands)", kind, layer.path.commands().len());
        self.orphan(kind);
        self.layers.insert(kind, layer);
        self.commands.push(RenderCommand::Attach(kind));
    }

    fn detach(&mut self, kind: LayerKind) {
        if self.layers.remove(&kind).is_some() {
            log::debug!("detach {:?}", kind);
            self.orphan(kind);
            self.commands.push(RenderCommand::Detach(kind));
        }
    }

    fn play(
        &mut self,
        kind: LayerKind,
        animation: AnimationDescriptor,
        on_complete: Option<Completion>,
    ) {
        if !self.layers.contains_key(&kind) {
            log::warn!(
                "dropping {} animation for missing layer {:?}",
                animation.property.key(),
                kind
            );
            return;
        }

        let property: AnimatedProperty = animation.property;
        log::debug!(
            "play {} on {:?} for {:?} after {:?}",
            property.key(),
            kind,
            animation.duration,
            animation.delay
        );
        self.commands.push(RenderCommand::Play {
            layer: kind,
            property,
            completes: on_complete.is_some(),
        });

        let replaced = self
            .animations
            .iter()
            .position(|a| a.presents_on(kind) && a.descriptor.property == property)
            .map(|i| self.animations.remove(i));

        self.animations.push(RunningAnimation {
            layer: kind,
            descriptor: animation,
            started_at: self.clock,
            completion: on_complete,
            completed: false,
        });

        if let Some(completion) = replaced.and_then(|mut old| old.completion.take()) {
            completion(false, self);
        }
    }
}
