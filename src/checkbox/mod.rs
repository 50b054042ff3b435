//! The checkbox control.
//!
//! [`CheckBox`] owns the on/off state and the configuration, rebuilds its
//! layers through a [`PathGenerator`] and hands them, together with the
//! transition animations, to a [`Renderer`]. It never keeps a reference to the
//! renderer: every operation that draws takes it as an argument, and
//! animation completions receive it from the host.

mod animations;
mod config;

pub use config::{AnimationType, CheckBoxConfig};

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::color::Color;
use crate::geometry::Rect;
use crate::layer::{LayerKind, Layers, ShapeLayer};
use crate::path::Path;
use crate::renderer::{Completion, Renderer};
use crate::shapes::{BoxType, CheckMarkKind, PathGenerator};

use animations::TransitionPlan;

/// Called after a tap with the new state.
pub type TapCallback = Rc<dyn Fn(bool)>;
/// Called once a transition animation has run to its end.
pub type SettledCallback = Rc<dyn Fn()>;

/// Durations below this are treated as "not animated".
const MIN_ANIMATION_SECS: f32 = 0.0001;

/// What the host currently holds, shared with animation completions.
#[derive(Debug, Default)]
struct LayerSlots {
    attached: Layers,
    /// The off box was attached with a path that has no height
    degenerate_off_box: bool,
}

impl LayerSlots {
    fn contains(&self, kind: LayerKind) -> bool {
        self.attached.contains(kind.flag())
    }

    fn attach(&mut self, kind: LayerKind, layer: ShapeLayer, renderer: &mut dyn Renderer) {
        if kind == LayerKind::OffBox {
            self.degenerate_off_box = layer.is_degenerate();
        }
        self.attached.insert(kind.flag());
        renderer.attach(kind, layer);
    }

    fn detach(&mut self, kind: LayerKind, renderer: &mut dyn Renderer) {
        if self.contains(kind) {
            self.attached.remove(kind.flag());
            renderer.detach(kind);
        }
    }
}

/// An animated on/off checkbox.
///
/// ```
/// use tickbox::prelude::*;
///
/// let mut renderer = RecordingRenderer::new();
/// let mut checkbox = CheckBox::new()
///     .box_type(BoxType::Square)
///     .animation_type(AnimationType::Stroke);
///
/// checkbox.layout(40.0, &mut renderer);
/// checkbox.handle_tap(&mut renderer);
/// assert!(checkbox.is_on());
///
/// renderer.finish_all();
/// assert_eq!(checkbox.attached_layers(), Layers::all());
/// ```
pub struct CheckBox {
    config: CheckBoxConfig,
    paths: PathGenerator,
    on: Rc<Cell<bool>>,
    slots: Rc<RefCell<LayerSlots>>,
    on_tap: Option<TapCallback>,
    on_animation_settled: Option<SettledCallback>,
    laid_out: bool,
}

impl Default for CheckBox {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckBox {
    pub fn new() -> Self {
        Self::with_config(CheckBoxConfig::default())
    }

    pub fn with_config(config: CheckBoxConfig) -> Self {
        let paths = PathGenerator::new(0.0, config.line_width, config.box_type);
        Self {
            config,
            paths,
            on: Rc::new(Cell::new(false)),
            slots: Rc::new(RefCell::new(LayerSlots::default())),
            on_tap: None,
            on_animation_settled: None,
            laid_out: false,
        }
    }

    pub fn box_type(mut self, box_type: BoxType) -> Self {
        self.config.box_type = box_type;
        self.paths.box_type = box_type;
        self
    }

    pub fn animation_type(mut self, animation_type: AnimationType) -> Self {
        self.config.animation_type = animation_type;
        self
    }

    pub fn line_width(mut self, width: f32) -> Self {
        self.config.line_width = width;
        self.paths.line_width = width;
        self
    }

    pub fn animation_duration(mut self, duration: Duration) -> Self {
        self.config.animation_duration = duration;
        self
    }

    pub fn hide_box(mut self, hide: bool) -> Self {
        self.config.hide_box = hide;
        self
    }

    pub fn fill_color(mut self, color: Color) -> Self {
        self.config.fill_color = color;
        self
    }

    pub fn check_color(mut self, color: Color) -> Self {
        self.config.check_color = color;
        self
    }

    pub fn tint_color(mut self, color: Color) -> Self {
        self.config.tint_color = color;
        self
    }

    pub fn on_tint_color(mut self, color: Color) -> Self {
        self.config.on_tint_color = color;
        self
    }

    /// Initial state, applied on the first draw.
    pub fn on(self, on: bool) -> Self {
        self.on.set(on);
        self
    }

    pub fn on_tap<F: Fn(bool) + 'static>(mut self, callback: F) -> Self {
        self.on_tap = Some(Rc::new(callback));
        self
    }

    pub fn on_animation_settled<F: Fn() + 'static>(mut self, callback: F) -> Self {
        self.on_animation_settled = Some(Rc::new(callback));
        self
    }

    pub fn config(&self) -> &CheckBoxConfig {
        &self.config
    }

    pub fn paths(&self) -> &PathGenerator {
        &self.paths
    }

    pub fn is_on(&self) -> bool {
        self.on.get()
    }

    pub fn size(&self) -> f32 {
        self.paths.size
    }

    /// Layers this checkbox has handed to the renderer and not removed since.
    pub fn attached_layers(&self) -> Layers {
        self.slots.borrow().attached
    }

    /// Take the side of the (square) view. A new size rebuilds every layer.
    pub fn layout(&mut self, size: f32, renderer: &mut dyn Renderer) {
        if !size.is_finite() || size < 0.0 {
            log::warn!("ignoring invalid checkbox size {}", size);
            return;
        }
        if self.laid_out && size == self.paths.size {
            return;
        }
        log::debug!("checkbox layout {} -> {}", self.paths.size, size);
        self.laid_out = true;
        self.paths.size = size;
        self.reload(renderer);
    }

    /// Redraw the current state without animation.
    pub fn draw(&mut self, renderer: &mut dyn Renderer) {
        self.set_on(self.is_on(), false, renderer);
    }

    /// Remove every layer and draw again from scratch.
    pub fn reload(&mut self, renderer: &mut dyn Renderer) {
        {
            let mut slots = self.slots.borrow_mut();
            for kind in LayerKind::ALL {
                slots.detach(kind, renderer);
            }
            slots.degenerate_off_box = false;
        }
        self.draw(renderer);
    }

    pub fn set_on(&mut self, on: bool, animated: bool, renderer: &mut dyn Renderer) {
        log::debug!(
            "checkbox {} ({})",
            if on { "on" } else { "off" },
            if animated { "animated" } else { "immediate" }
        );
        self.on.set(on);
        self.draw_entire(renderer);

        if on {
            if animated {
                self.add_on_animation(renderer);
            }
        } else if animated {
            self.add_off_animation(renderer);
        } else {
            let mut slots = self.slots.borrow_mut();
            slots.detach(LayerKind::OnBox, renderer);
            slots.detach(LayerKind::CheckMark, renderer);
        }
    }

    /// Flip the state with animation.
    pub fn toggle(&mut self, renderer: &mut dyn Renderer) {
        self.set_on(!self.is_on(), true, renderer);
    }

    /// A tap on the view: toggles with animation, then reports the new state
    /// to the tap callback before any animation has completed.
    pub fn handle_tap(&mut self, renderer: &mut dyn Renderer) {
        self.toggle(renderer);
        if let Some(on_tap) = &self.on_tap {
            on_tap(self.is_on());
        }
    }

    pub fn set_box_type(&mut self, box_type: BoxType, renderer: &mut dyn Renderer) {
        self.config.box_type = box_type;
        self.paths.box_type = box_type;
        self.reload(renderer);
    }

    pub fn set_line_width(&mut self, width: f32, renderer: &mut dyn Renderer) {
        self.config.line_width = width;
        self.paths.line_width = width;
        self.reload(renderer);
    }

    pub fn set_hide_box(&mut self, hide: bool, renderer: &mut dyn Renderer) {
        self.config.hide_box = hide;
        self.reload(renderer);
    }

    pub fn set_fill_color(&mut self, color: Color, renderer: &mut dyn Renderer) {
        self.config.fill_color = color;
        self.reload(renderer);
    }

    pub fn set_check_color(&mut self, color: Color, renderer: &mut dyn Renderer) {
        self.config.check_color = color;
        self.reload(renderer);
    }

    pub fn set_tint_color(&mut self, color: Color, renderer: &mut dyn Renderer) {
        self.config.tint_color = color;
        self.reload(renderer);
    }

    pub fn set_on_tint_color(&mut self, color: Color, renderer: &mut dyn Renderer) {
        self.config.on_tint_color = color;
        self.reload(renderer);
    }

    /// Takes effect with the next transition.
    pub fn set_animation_type(&mut self, animation_type: AnimationType) {
        self.config.animation_type = animation_type;
    }

    /// Takes effect with the next transition.
    pub fn set_animation_duration(&mut self, duration: Duration) {
        self.config.animation_duration = duration;
    }

    fn frame(&self) -> Rect {
        Rect::square(self.paths.size)
    }

    fn off_box_layer(&self) -> ShapeLayer {
        ShapeLayer::new(self.frame(), self.paths.box_path())
            .stroke(self.config.tint_color, self.config.line_width)
    }

    fn on_box_layer(&self) -> ShapeLayer {
        ShapeLayer::new(self.frame(), self.paths.box_path())
            .fill(self.config.fill_color)
            .stroke(self.config.on_tint_color, self.config.line_width)
    }

    fn check_mark_layer(&self, path: Path) -> ShapeLayer {
        ShapeLayer::new(self.frame(), path)
            .stroke(self.config.check_color, self.config.line_width)
            .rounded()
    }

    fn draw_entire(&self, renderer: &mut dyn Renderer) {
        let on = self.is_on();
        let mut slots = self.slots.borrow_mut();

        if !self.config.hide_box {
            if !slots.contains(LayerKind::OffBox) || slots.degenerate_off_box {
                slots.attach(LayerKind::OffBox, self.off_box_layer(), renderer);
            }
            if on {
                slots.attach(LayerKind::OnBox, self.on_box_layer(), renderer);
            }
        }
        if on {
            let check_mark = self.paths.check_mark_path(CheckMarkKind::Short);
            slots.attach(LayerKind::CheckMark, self.check_mark_layer(check_mark), renderer);
        }
    }

    fn animation_disabled(&self) -> bool {
        self.config.animation_duration.as_secs_f32() < MIN_ANIMATION_SECS
    }

    fn add_on_animation(&self, renderer: &mut dyn Renderer) {
        if !self.slots.borrow().contains(LayerKind::CheckMark) {
            log::debug!("no checkmark layer, skipping on animation");
            return;
        }
        if self.animation_disabled() {
            return;
        }
        let plan = animations::on_transition(&self.config, &self.paths);
        self.play(plan, renderer);
    }

    fn add_off_animation(&self, renderer: &mut dyn Renderer) {
        if !self.slots.borrow().contains(LayerKind::CheckMark) {
            log::debug!("no checkmark layer, skipping off animation");
            return;
        }
        if self.animation_disabled() {
            let mut slots = self.slots.borrow_mut();
            slots.detach(LayerKind::OnBox, renderer);
            slots.detach(LayerKind::CheckMark, renderer);
            return;
        }
        let plan = animations::off_transition(&self.config, &self.paths);
        self.play(plan, renderer);
    }

    fn play(&self, mut plan: TransitionPlan, renderer: &mut dyn Renderer) {
        if let Some(path) = plan.check_mark_path.take() {
            self.slots.borrow_mut().attach(
                LayerKind::CheckMark,
                self.check_mark_layer(path),
                renderer,
            );
        }
        if let Some(settling) = plan.completing() {
            log::debug!(
                "{:?} transition settles with {} on {:?}",
                self.config.animation_type,
                settling.descriptor.property.key(),
                settling.layer
            );
        }
        for planned in plan.animations {
            let completion = planned.completes.then(|| self.completion());
            renderer.play(planned.layer, planned.descriptor, completion);
        }
    }

    fn completion(&self) -> Completion {
        let on = Rc::clone(&self.on);
        let slots = Rc::clone(&self.slots);
        let settled = self.on_animation_settled.clone();

        Box::new(move |finished: bool, renderer: &mut dyn Renderer| {
            if !finished {
                log::debug!("checkbox transition interrupted");
                return;
            }
            if !on.get() {
                let mut slots = slots.borrow_mut();
                slots.detach(LayerKind::OnBox, renderer);
                slots.detach(LayerKind::CheckMark, renderer);
            }
            if let Some(settled) = settled {
                settled();
            }
        })
    }
}
