//! Still images of a checkbox.
//!
//! A [`Snapshot`] is a list of [`LayerFrame`]s, typically captured from a
//! [`RecordingRenderer`] at some point of an animation. It serializes to a
//! standalone SVG document and rasterizes through resvg.

use std::fmt::Write;

use resvg::tiny_skia::{Pixmap, Transform as PixmapTransform};
use resvg::usvg;
use thiserror::Error;

use super::{LayerFrame, RecordingRenderer};
use crate::color::Color;
use crate::geometry::Point;
use crate::layer::{LineCap, LineJoin};
use crate::transform::Transform;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to parse generated SVG: {0}")]
    Svg(#[from] usvg::Error),
    #[error("Cannot allocate a {width}x{height} pixmap")]
    Allocation { width: u32, height: u32 },
    #[error("Failed to encode PNG: {0}")]
    Encode(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SnapshotError>;

#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Side of the square canvas in logical pixels
    pub size: f32,
    pub layers: Vec<LayerFrame>,
}

impl Snapshot {
    pub fn new(size: f32, layers: Vec<LayerFrame>) -> Self {
        Self { size, layers }
    }

    /// Capture what `renderer` presents at its current clock.
    pub fn capture(renderer: &RecordingRenderer, size: f32) -> Self {
        Self::new(size, renderer.frame())
    }

    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{s}" height="{s}" viewBox="0 0 {s} {s}">"#,
            s = self.size
        );
        for frame in &self.layers {
            if frame.appearance.is_invisible() || frame.path().is_empty() {
                continue;
            }
            let _ = writeln!(svg, "{}", layer_element(frame));
        }
        svg.push_str("</svg>\n");
        svg
    }

    /// Render at `scale` device pixels per logical pixel.
    pub fn rasterize(&self, scale: f32) -> Result<Pixmap> {
        let side = (self.size * scale).ceil().max(0.0) as u32;
        let mut pixmap = Pixmap::new(side, side).ok_or(SnapshotError::Allocation {
            width: side,
            height: side,
        })?;

        let svg = self.to_svg();
        let tree = usvg::Tree::from_data(svg.as_bytes(), &usvg::Options::default())?;
        resvg::render(
            &tree,
            PixmapTransform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );
        Ok(pixmap)
    }

    pub fn save_png(&self, path: impl AsRef<std::path::Path>, scale: f32) -> Result<()> {
        let pixmap = self.rasterize(scale)?;
        let data = pixmap
            .encode_png()
            .map_err(|e| SnapshotError::Encode(e.to_string()))?;
        std::fs::write(path, data)?;
        Ok(())
    }
}

fn layer_element(frame: &LayerFrame) -> String {
    let layer = &frame.layer;
    let appearance = &frame.appearance;
    let path = frame.path();

    let local_center = Point::new(layer.frame.width / 2.0, layer.frame.height / 2.0);
    let transform = Transform::translate(layer.frame.x, layer.frame.y)
        .then(&Transform::scale_about(appearance.scale, local_center));
    let [a, b, c, d, e, f] = transform.svg_matrix();

    let mut element = String::new();
    let _ = write!(
        element,
        r#"<g opacity="{}" transform="matrix({} {} {} {} {} {})"><path d="{}" {} {}/></g>"#,
        appearance.opacity.clamp(0.0, 1.0),
        a,
        b,
        c,
        d,
        e,
        f,
        path.svg_data(),
        paint_attr("fill", layer.fill),
        stroke_attrs(frame),
    );
    element
}

fn paint_attr(name: &str, color: Color) -> String {
    if color.is_transparent() {
        return format!(r#"{}="none""#, name);
    }
    let (r, g, b) = color.to_rgb8();
    format!(
        r#"{name}="rgb({r},{g},{b})" {name}-opacity="{a}""#,
        name = name,
        r = r,
        g = g,
        b = b,
        a = color.a.clamp(0.0, 1.0)
    )
}

fn stroke_attrs(frame: &LayerFrame) -> String {
    let layer = &frame.layer;
    let stroke_end = frame.appearance.stroke_end.clamp(0.0, 1.0);
    if layer.line_width <= 0.0 || stroke_end <= 0.0 {
        return paint_attr("stroke", Color::TRANSPARENT);
    }

    let mut attrs = format!(
        r#"{} stroke-width="{}" stroke-linecap="{}" stroke-linejoin="{}""#,
        paint_attr("stroke", layer.stroke),
        layer.line_width,
        match layer.line_cap {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        },
        match layer.line_join {
            LineJoin::Miter => "miter",
            LineJoin::Round => "round",
            LineJoin::Bevel => "bevel",
        },
    );

    // A partially drawn stroke is a dash covering the first part of the path.
    if stroke_end < 1.0 {
        let length = frame.path().length();
        if length > 0.0 {
            let _ = write!(
                attrs,
                r#" stroke-dasharray="{} {}""#,
                length * stroke_end,
                length
            );
        }
    }
    attrs
}
