//! Draw the visualizer into an svg

use crate::curve::BezierCurve;
use crate::draw::{draw_polyline, Canvas, DrawCurve, Layer};
use crate::point::Point2D;
use std::fmt::{self, Display, Formatter, Write};
use std::marker::PhantomData;

const SLATE_50: &str = "#f8fafc";
const SLATE_950: &str = "#020617";
const YELLOW_400: &str = "#facc15";

/// `(min_x, min_y, width, height)`
pub type Rect = (f64, f64, f64, f64);

/// Collects everything drawn into an svg document, printed through [`Display`].
pub struct SvgCanvas {
    /// Visible area
    pub view_box: Rect,

    /// Stroke width of every line
    pub line_width: f64,

    /// Radius of a full sized point marker
    pub point_radius: f64,

    elements: Vec<Box<dyn Display>>,
}

impl SvgCanvas {
    /// Creates an empty drawing
    pub fn new(view_box: Rect) -> Self {
        SvgCanvas {
            view_box,
            line_width: 2.0,
            point_radius: 6.0,
            elements: Vec::new(),
        }
    }

    /// Adds an arbitrary element, e.g. a [`SvgPath`]'s output wrapped in a `<path>`
    pub fn add_elem<E: Display + 'static>(&mut self, elem: E) {
        self.elements.push(Box::new(elem));
    }

    /// Number of elements drawn so far
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether nothing was drawn yet
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Removes everything drawn
    pub fn clear(&mut self) {
        self.elements.clear();
    }
}

fn stroke(layer: Layer) -> &'static str {
    match layer {
        Layer::Result => YELLOW_400,
        Layer::Input | Layer::Steps | Layer::Animation => SLATE_50,
    }
}

impl Canvas for SvgCanvas {
    fn line(&mut self, layer: Layer, from: Point2D, to: Point2D) {
        let width = self.line_width;
        self.add_elem(Line {
            from,
            to,
            width,
            color: stroke(layer),
        });
    }

    fn point(&mut self, layer: Layer, center: Point2D, scale: f64) {
        let radius = self.point_radius * scale.max(0.0);
        // Ring with a dot in its middle
        for (factor, color) in [(1.0, stroke(layer)), (0.8, SLATE_950), (0.4, stroke(layer))] {
            self.add_elem(Circle {
                center,
                radius: radius * factor,
                color,
            });
        }
    }
}

impl DrawCurve for SvgCanvas {
    fn add_curve(&mut self, curve: &BezierCurve, controls: &[Point2D]) {
        draw_polyline(self, Layer::Result, curve.result_positions(controls));
    }
}

impl Display for SvgCanvas {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (x, y, width, height) = self.view_box;
        writeln!(
            f,
            "<svg viewBox=\"{} {} {} {}\" xmlns=\"http://www.w3.org/2000/svg\">",
            x, y, width, height
        )?;
        writeln!(
            f,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            x, y, width, height, SLATE_950
        )?;
        for elem in self.elements.iter() {
            elem.fmt(f)?;
        }
        writeln!(f, "</svg>")
    }
}

struct Line {
    from: Point2D,
    to: Point2D,
    width: f64,
    color: &'static str,
}

impl Display for Line {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
            self.from.x, self.from.y, self.to.x, self.to.y, self.color, self.width
        )
    }
}

struct Circle {
    center: Point2D,
    radius: f64,
    color: &'static str,
}

impl Display for Circle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"/>",
            self.center.x, self.center.y, self.radius, self.color
        )
    }
}

/// Helper trait implemented by [`Absolute`] and [`Relative`] to choose
/// how the coordinates are interpreted in the svg's path.
pub trait CoordRepr {
    /// Character to use for the MoveTo command
    const M: &'static str;

    /// Character to use for the LineTo command
    const L: &'static str;

    /// Whether every point is written relative to its predecessor
    const RELATIVE: bool;
}

/// Interpret the svg path's coordinates as absolute.
pub struct Absolute;
impl CoordRepr for Absolute {
    const M: &'static str = "M";
    const L: &'static str = "L";
    const RELATIVE: bool = false;
}

/// Interpret the svg path's coordinates as relative.
pub struct Relative;
impl CoordRepr for Relative {
    const M: &'static str = "m";
    const L: &'static str = "l";
    const RELATIVE: bool = true;
}

/// This type wraps a mutable String reference and implements [`DrawCurve`] on it.
/// The [`DrawCurve::add_curve`] writes the curve's polyline to the string
/// using the path commands used in a svg `<path>`'s d attribute
///
/// ```
/// # use nbezier_viz::{Algorithm, BezierCurve, Point2D};
/// use nbezier_viz::draw::DrawCurve;
/// use nbezier_viz::draw::svg::SvgAbsolutePath;
///
/// let controls = [Point2D::new(0.0, 0.0), Point2D::new(1.0, 2.0), Point2D::new(2.0, 0.0)];
/// let mut curve = BezierCurve::new();
/// curve.generate(&controls, 1, Algorithm::DivideAndConquer);
///
/// let mut d = String::new();
/// SvgAbsolutePath::from(&mut d).add_curve(&curve, &controls);
/// assert_eq!(d, "M 0,0 L 1,1 L 2,0");
/// ```
pub struct SvgPath<'s, R: CoordRepr>(&'s mut String, PhantomData<&'s R>);

/// Wrapper for writing a curve to a svg's path using absolute coordinates
pub type SvgAbsolutePath<'s> = SvgPath<'s, Absolute>;

/// Wrapper for writing a curve to a svg's path using relative coordinates
pub type SvgRelativePath<'s> = SvgPath<'s, Relative>;

impl<'s, R: CoordRepr> From<&'s mut String> for SvgPath<'s, R> {
    fn from(string: &'s mut String) -> Self {
        SvgPath(string, PhantomData)
    }
}

impl<'s, R: CoordRepr> SvgPath<'s, R> {
    /// Writes `points` as a single polyline
    pub fn add_polyline(&mut self, points: impl IntoIterator<Item = Point2D>) {
        let mut previous: Option<Point2D> = None;
        for point in points {
            let (command, written) = match previous {
                None => (R::M, point),
                Some(previous) if R::RELATIVE => (R::L, point - previous),
                Some(_) => (R::L, point),
            };
            if previous.is_some() {
                self.0.push(' ');
            }
            let _ = write!(self.0, "{} {},{}", command, written.x, written.y);
            previous = Some(point);
        }
    }
}

impl<'s, R: CoordRepr> DrawCurve for SvgPath<'s, R> {
    fn add_curve(&mut self, curve: &BezierCurve, controls: &[Point2D]) {
        self.add_polyline(curve.result_positions(controls));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path() {
        let mut d = String::new();
        SvgRelativePath::from(&mut d).add_polyline([
            Point2D::new(1.0, 1.0),
            Point2D::new(3.0, 1.0),
            Point2D::new(3.0, 4.0),
        ]);
        assert_eq!(d, "m 1,1 l 2,0 l 0,3");
    }

    #[test]
    fn canvas_document() {
        let mut svg = SvgCanvas::new((0.0, 0.0, 100.0, 100.0));
        assert!(svg.is_empty());
        svg.line(Layer::Result, Point2D::new(0.0, 0.0), Point2D::new(10.0, 5.0));
        svg.point(Layer::Steps, Point2D::new(10.0, 5.0), 0.5);
        assert_eq!(svg.len(), 4);

        let document = svg.to_string();
        assert!(document.starts_with("<svg viewBox=\"0 0 100 100\""));
        assert!(document.contains(
            "<line x1=\"0\" y1=\"0\" x2=\"10\" y2=\"5\" stroke=\"#facc15\" stroke-width=\"2\"/>"
        ));
        assert!(document.contains("<circle cx=\"10\" cy=\"5\" r=\"3\" fill=\"#f8fafc\"/>"));
        assert!(document.trim_end().ends_with("</svg>"));

        svg.clear();
        assert!(svg.is_empty());
    }
}
