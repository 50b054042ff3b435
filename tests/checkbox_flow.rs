use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use tickbox::prelude::*;

const SIZE: f32 = 40.0;

const ALL_TYPES: [AnimationType; 6] = [
    AnimationType::Stroke,
    AnimationType::Fill,
    AnimationType::Bounce,
    AnimationType::Flat,
    AnimationType::OneStroke,
    AnimationType::Fade,
];

struct Observed {
    taps: Rc<RefCell<Vec<bool>>>,
    settled: Rc<Cell<u32>>,
}

fn observed_checkbox(animation_type: AnimationType) -> (CheckBox, Observed) {
    let _ = env_logger::builder().is_test(true).try_init();

    let taps = Rc::new(RefCell::new(Vec::new()));
    let settled = Rc::new(Cell::new(0));

    let tap_log = Rc::clone(&taps);
    let settle_count = Rc::clone(&settled);
    let checkbox = CheckBox::new()
        .animation_type(animation_type)
        .on_tap(move |on| tap_log.borrow_mut().push(on))
        .on_animation_settled(move || settle_count.set(settle_count.get() + 1));

    (checkbox, Observed { taps, settled })
}

#[test]
fn test_tap_reports_on_immediately_and_settles_once() {
    let (mut checkbox, observed) = observed_checkbox(AnimationType::Bounce);
    let mut renderer = RecordingRenderer::new();
    checkbox.layout(SIZE, &mut renderer);
    assert!(!checkbox.is_on());

    checkbox.handle_tap(&mut renderer);
    assert_eq!(*observed.taps.borrow(), vec![true]);
    assert_eq!(observed.settled.get(), 0);
    assert!(renderer.running_count() > 0);

    renderer.advance(Duration::from_millis(100));
    assert_eq!(observed.settled.get(), 0);

    renderer.finish_all();
    assert_eq!(observed.settled.get(), 1);

    // Nothing left to complete.
    renderer.advance(Duration::from_secs(5));
    assert_eq!(observed.settled.get(), 1);
}

#[test]
fn test_every_animation_type_settles_once_per_transition() {
    for animation_type in ALL_TYPES {
        let (mut checkbox, observed) = observed_checkbox(animation_type);
        let mut renderer = RecordingRenderer::new();
        checkbox.layout(SIZE, &mut renderer);

        checkbox.handle_tap(&mut renderer);
        renderer.finish_all();
        assert_eq!(observed.settled.get(), 1, "{:?} on", animation_type);
        assert_eq!(renderer.attached(), Layers::all(), "{:?} on", animation_type);

        checkbox.handle_tap(&mut renderer);
        renderer.finish_all();
        assert_eq!(observed.settled.get(), 2, "{:?} off", animation_type);
        assert_eq!(renderer.attached(), Layers::OFF_BOX, "{:?} off", animation_type);
        assert_eq!(*observed.taps.borrow(), vec![true, false]);
    }
}

#[test]
fn test_immediate_off_removes_layers_without_animation() {
    let mut renderer = RecordingRenderer::new();
    let mut checkbox = CheckBox::new();
    checkbox.layout(SIZE, &mut renderer);
    checkbox.set_on(true, true, &mut renderer);
    renderer.finish_all();
    renderer.take_commands();

    checkbox.set_on(false, false, &mut renderer);
    let commands = renderer.take_commands();
    assert!(commands.iter().all(|c| !c.is_play()));
    assert!(commands.contains(&RenderCommand::Detach(LayerKind::OnBox)));
    assert!(commands.contains(&RenderCommand::Detach(LayerKind::CheckMark)));
    assert_eq!(renderer.attached(), Layers::OFF_BOX);
    assert_eq!(checkbox.attached_layers(), Layers::OFF_BOX);
}

#[test]
fn test_retap_during_animation_keeps_layers_until_off_ends() {
    for animation_type in ALL_TYPES {
        let (mut checkbox, observed) = observed_checkbox(animation_type);
        let mut renderer = RecordingRenderer::new();
        checkbox.layout(SIZE, &mut renderer);

        checkbox.handle_tap(&mut renderer);
        renderer.advance(Duration::from_millis(200));
        checkbox.handle_tap(&mut renderer);

        // Past the end of the interrupted on transition, before the off one ends.
        renderer.advance(Duration::from_millis(310));
        assert_eq!(renderer.attached(), Layers::all(), "{:?} midway", animation_type);
        assert_eq!(checkbox.attached_layers(), Layers::all(), "{:?}", animation_type);
        assert_eq!(observed.settled.get(), 0, "{:?} midway", animation_type);

        renderer.finish_all();
        assert!(!checkbox.is_on());
        assert_eq!(renderer.attached(), Layers::OFF_BOX, "{:?}", animation_type);
        // The interrupted on transition does not count as settled.
        assert_eq!(observed.settled.get(), 1, "{:?}", animation_type);
    }
}

#[test]
fn test_one_stroke_retap_settles_at_off_end() {
    let (mut checkbox, observed) = observed_checkbox(AnimationType::OneStroke);
    let mut renderer = RecordingRenderer::new();
    checkbox.layout(SIZE, &mut renderer);

    checkbox.handle_tap(&mut renderer);
    renderer.advance(Duration::from_millis(200));
    checkbox.handle_tap(&mut renderer);

    // The off transition ends 500 ms after the second tap.
    renderer.advance(Duration::from_millis(490));
    assert_eq!(renderer.attached(), Layers::all());
    assert_eq!(observed.settled.get(), 0);

    renderer.advance(Duration::from_millis(10));
    assert_eq!(renderer.attached(), Layers::OFF_BOX);
    assert_eq!(observed.settled.get(), 1);

    renderer.finish_all();
    assert_eq!(observed.settled.get(), 1);
}

#[test]
fn test_bounce_presents_overshoot_midway() {
    let mut renderer = RecordingRenderer::new();
    let mut checkbox = CheckBox::new().animation_type(AnimationType::Bounce);
    checkbox.layout(SIZE, &mut renderer);
    checkbox.set_on(true, true, &mut renderer);

    renderer.advance(Duration::from_millis(250));
    let scale = renderer.appearance(LayerKind::CheckMark).scale;
    assert!((scale - 1.35).abs() < 1e-3, "scale {}", scale);

    renderer.finish_all();
    assert_eq!(renderer.appearance(LayerKind::CheckMark).scale, 1.0);
}

#[test]
fn test_settled_on_snapshot_paints_fill() {
    let mut renderer = RecordingRenderer::new();
    let mut checkbox = CheckBox::new();
    checkbox.layout(SIZE, &mut renderer);
    checkbox.set_on(true, true, &mut renderer);
    renderer.finish_all();

    let pixmap = Snapshot::capture(&renderer, SIZE).rasterize(1.0).unwrap();
    let pixel = pixmap.pixel(8, 20).unwrap();
    assert_eq!(pixel.alpha(), 255);
    assert_eq!((pixel.red(), pixel.green(), pixel.blue()), (47, 123, 255));

    checkbox.set_on(false, false, &mut renderer);
    let pixmap = Snapshot::capture(&renderer, SIZE).rasterize(1.0).unwrap();
    assert_eq!(pixmap.pixel(8, 20).unwrap().alpha(), 0);
}

#[test]
fn test_snapshot_png_written_to_disk() {
    let mut renderer = RecordingRenderer::new();
    let mut checkbox = CheckBox::new().box_type(BoxType::Square).on(true);
    checkbox.layout(SIZE, &mut renderer);

    let path = std::env::temp_dir().join(format!("tickbox-{}.png", std::process::id()));
    Snapshot::capture(&renderer, SIZE)
        .save_png(&path, 2.0)
        .unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
    std::fs::remove_file(&path).unwrap();
}
