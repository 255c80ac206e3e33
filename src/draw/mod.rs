//! The drawing primitives the visualizer needs from a rendering backend.
//!
//! Drawing a curve is never really the hard part, so the crate only asks for lines
//! and points. Everything it draws is tagged with a [`Layer`] and backends decide
//! how each layer looks.
//!
//! Use different crate features to get ready made backends:
//! - `draw-svg` to collect the drawing into an svg document
use crate::curve::BezierCurve;
use crate::point::Point2D;

/// What a primitive belongs to
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// The control polygon
    Input,

    /// The generated curve
    Result,

    /// Steps which finished animating
    Steps,

    /// Steps which are still being animated
    Animation,
}

/// Minimal drawing context.
pub trait Canvas {
    /// Draw a straight line
    fn line(&mut self, layer: Layer, from: Point2D, to: Point2D);

    /// Draw a point marker.
    ///
    /// `scale` is `1` for a full sized marker and may briefly exceed it while animating.
    fn point(&mut self, layer: Layer, center: Point2D, scale: f64);
}

/// Draw a generated curve on different "drawing contexts" with ease.
pub trait DrawCurve {
    /// Add the curve's polyline, as positioned after its last sync, to the drawing context.
    fn add_curve(&mut self, curve: &BezierCurve, controls: &[Point2D]);
}

/// Draws consecutive `points` as connected lines
pub fn draw_polyline<C: Canvas + ?Sized>(
    canvas: &mut C,
    layer: Layer,
    points: impl IntoIterator<Item = Point2D>,
) {
    let mut points = points.into_iter();
    let Some(mut previous) = points.next() else {
        return;
    };
    for point in points {
        canvas.line(layer, previous, point);
        previous = point;
    }
}

/// A single recorded drawing call
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// See [`Canvas::line`]
    Line {
        /// Layer drawn to
        layer: Layer,
        /// Start of the line
        from: Point2D,
        /// End of the line
        to: Point2D,
    },

    /// See [`Canvas::point`]
    Point {
        /// Layer drawn to
        layer: Layer,
        /// Position of the marker
        center: Point2D,
        /// Size relative to a full marker
        scale: f64,
    },
}

impl DrawCommand {
    /// Layer the command draws to
    pub fn layer(&self) -> Layer {
        match self {
            DrawCommand::Line { layer, .. } | DrawCommand::Point { layer, .. } => *layer,
        }
    }
}

/// Records the drawing calls, e.g. to replay them on another backend later
impl Canvas for Vec<DrawCommand> {
    fn line(&mut self, layer: Layer, from: Point2D, to: Point2D) {
        self.push(DrawCommand::Line { layer, from, to });
    }

    fn point(&mut self, layer: Layer, center: Point2D, scale: f64) {
        self.push(DrawCommand::Point {
            layer,
            center,
            scale,
        });
    }
}

impl DrawCurve for Vec<DrawCommand> {
    fn add_curve(&mut self, curve: &BezierCurve, controls: &[Point2D]) {
        draw_polyline(self, Layer::Result, curve.result_positions(controls));
    }
}

#[cfg(feature = "draw-svg")]
pub mod svg;
