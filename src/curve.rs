//! The curve engine turning control points into a polyline approximating their bezier curve.
//!
//! Every point computed along the way is stored as a [`SyncablePoint`](crate::syncable::SyncablePoint)
//! in the curve's [`PointArena`]. The points of the final polyline are listed in
//! [`BezierCurve::result`], everything else which has to be kept around to resync
//! the result after a control point moved is listed in [`BezierCurve::waste`].

use crate::error::CurveError;
use crate::point::Point2D;
use crate::steps::{Step, StepSequence};
use crate::syncable::{Derivation, NodeId, PointArena, PointRef, Polygon};
use serde::{Deserialize, Serialize};
use smallvec::smallvec;
use std::fmt;

/// Minimum number of control points the visualizer asks for before generating
pub const MIN_CONTROL_POINTS: usize = 3;

/// The three interchangeable ways of generating a curve
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Algorithm {
    /// Recursive de castlejau subdivision at `t = 0.5`.
    ///
    /// `iterations` subdivisions yield `2^iterations` segments.
    #[default]
    DivideAndConquer,

    /// De castlejau evaluation at evenly spaced samples.
    ///
    /// `iterations` samples yield `iterations + 1` segments.
    BruteForce,

    /// Evaluation of the bernstein polynomials at evenly spaced samples.
    ///
    /// `iterations` samples yield `iterations + 1` segments.
    Formulated,
}

impl Algorithm {
    /// All algorithms ordered by id
    pub const ALL: [Algorithm; 3] = [
        Algorithm::DivideAndConquer,
        Algorithm::BruteForce,
        Algorithm::Formulated,
    ];

    /// Numeric id used by the option file and selectors
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Human readable name
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::DivideAndConquer => "divide and conquer",
            Algorithm::BruteForce => "brute force",
            Algorithm::Formulated => "brute force formulated",
        }
    }
}

impl TryFrom<u8> for Algorithm {
    type Error = CurveError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Algorithm::ALL
            .get(id as usize)
            .copied()
            .ok_or(CurveError::UnknownAlgorithm(id))
    }
}

impl From<Algorithm> for u8 {
    fn from(algorithm: Algorithm) -> Self {
        algorithm.id()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Generation counter of a [`BezierCurve`].
///
/// Changes whenever the curve is cleared, so work scheduled for an older
/// generation can tell it is outdated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Epoch(u64);

impl Epoch {
    fn next(self) -> Self {
        Epoch(self.0.wrapping_add(1))
    }
}

/// Checks what the engine silently assumes about its input.
///
/// The algorithms themselves work for two or more points,
/// asking for three is the visualizer's policy.
pub fn check_preconditions(points: usize, iterations: usize) -> Result<(), CurveError> {
    if points < MIN_CONTROL_POINTS {
        return Err(CurveError::NotEnoughPoints {
            required: MIN_CONTROL_POINTS,
            actual: points,
        });
    }
    if iterations < 1 {
        return Err(CurveError::InvalidIterations(iterations));
    }
    Ok(())
}

/// Parameter of the `k`-th of `samples` evenly spaced interior samples
fn sample_parameter(k: usize, samples: usize) -> f64 {
    (k + 1) as f64 / (samples + 1) as f64
}

/// Sink for the steps an algorithm visits
trait Record {
    const ACTIVE: bool;
    fn record(&mut self, step: Step);
}

impl Record for () {
    const ACTIVE: bool = false;
    fn record(&mut self, _: Step) {}
}

impl Record for Vec<Step> {
    const ACTIVE: bool = true;
    fn record(&mut self, step: Step) {
        self.push(step);
    }
}

/// Polyline approximation of a bezier curve whose points stay linked to the control points.
///
/// The control points themselves are owned by the caller and passed into every
/// method reading positions. They may move between calls, but must not be
/// removed or reordered without [`clear`](BezierCurve::clear)ing the curve.
#[derive(Clone, Debug, Default)]
pub struct BezierCurve {
    arena: PointArena,
    waste: Vec<NodeId>,
    result: Vec<PointRef>,
    epoch: Epoch,
}

impl BezierCurve {
    /// Creates an empty curve
    pub fn new() -> Self {
        BezierCurve::default()
    }

    /// Drops all generated points and starts a new [`Epoch`]
    pub fn clear(&mut self) {
        self.arena.clear();
        self.waste.clear();
        self.result.clear();
        self.epoch = self.epoch.next();
        log::trace!("cleared curve, now at {:?}", self.epoch);
    }

    /// Current generation
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Storage of every derived point
    pub fn arena(&self) -> &PointArena {
        &self.arena
    }

    /// Intermediate points in construction order
    pub fn waste(&self) -> &[NodeId] {
        &self.waste
    }

    /// The polyline's points from the curve's start to its end
    pub fn result(&self) -> &[PointRef] {
        &self.result
    }

    /// Whether nothing was generated since the last clear
    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }

    /// Position of any handle as of the last sync
    pub fn position(&self, controls: &[Point2D], point: PointRef) -> Point2D {
        self.arena.position(controls, point)
    }

    /// Positions of all result points as of the last sync
    pub fn result_positions(&self, controls: &[Point2D]) -> Vec<Point2D> {
        self.result
            .iter()
            .map(|&point| self.position(controls, point))
            .collect()
    }

    /// Consecutive pairs of result points
    pub fn segments<'a>(
        &'a self,
        controls: &'a [Point2D],
    ) -> impl Iterator<Item = (Point2D, Point2D)> + 'a {
        self.result.windows(2).map(move |pair| {
            (
                self.position(controls, pair[0]),
                self.position(controls, pair[1]),
            )
        })
    }

    /// Resyncs every point after control points moved.
    ///
    /// All waste points are synced before the result points and both in construction
    /// order, so every point sees its parents' new positions.
    /// `on_refresh` is called once per result point, in curve order.
    pub fn refresh(&mut self, controls: &[Point2D], mut on_refresh: impl FnMut(&Point2D)) {
        for &id in &self.waste {
            self.arena.sync(controls, id);
        }
        for &point in &self.result {
            if let PointRef::Derived(id) = point {
                self.arena.sync(controls, id);
            }
            on_refresh(&self.arena.position(controls, point));
        }
    }

    /// Resyncs a single point from its parents' current positions.
    ///
    /// Control points are always up to date and are left alone.
    pub fn sync_point(&mut self, controls: &[Point2D], point: PointRef) {
        if let PointRef::Derived(id) = point {
            self.arena.sync(controls, id);
        }
    }

    /// Generates the curve of `controls` using `algorithm`.
    ///
    /// For [`Algorithm::DivideAndConquer`] `iterations` is the number of subdivisions,
    /// for the others the number of interior samples.
    ///
    /// The new points are appended to the ones already present,
    /// call [`clear`](BezierCurve::clear) first to replace a previous curve.
    /// `controls` must hold at least two points, see [`check_preconditions`].
    pub fn generate(&mut self, controls: &[Point2D], iterations: usize, algorithm: Algorithm) {
        self.run(controls, iterations, algorithm, &mut ());
        log::debug!(
            "generated {} result and {} waste points using {}",
            self.result.len(),
            self.waste.len(),
            algorithm
        );
    }

    /// Generates the same curve as [`generate`](BezierCurve::generate) while recording
    /// the order in which `algorithm` visits its points and lines.
    ///
    /// The returned sequence is tied to the curve's current [`Epoch`].
    pub fn generate_with_steps(
        &mut self,
        controls: &[Point2D],
        iterations: usize,
        algorithm: Algorithm,
    ) -> StepSequence {
        let mut steps = Vec::new();
        self.run(controls, iterations, algorithm, &mut steps);
        log::debug!("recorded {} steps using {}", steps.len(), algorithm);
        StepSequence::new(self.epoch, steps)
    }

    fn run<R: Record>(
        &mut self,
        controls: &[Point2D],
        iterations: usize,
        algorithm: Algorithm,
        steps: &mut R,
    ) {
        let p: Polygon = (0..controls.len()).map(PointRef::Control).collect();

        self.result.push(p[0]);
        match algorithm {
            Algorithm::DivideAndConquer => self.divide_and_conquer(controls, &p, iterations, steps),
            Algorithm::BruteForce => self.brute_force(controls, &p, iterations, steps),
            Algorithm::Formulated => self.formulated(controls, &p, iterations, steps),
        }
        self.result.push(p[p.len() - 1]);
    }

    /// Builds the full de castlejau triangle of `p` combining neighbours with `rule`.
    ///
    /// Returns the new points row by row, starting with the row directly derived from `p`
    /// and ending with the single apex.
    fn build_triangle(
        &mut self,
        controls: &[Point2D],
        p: &[PointRef],
        rule: impl Fn(PointRef, PointRef) -> Derivation,
    ) -> Vec<NodeId> {
        let length = p.len();
        let mut flat = Vec::with_capacity(length * length.saturating_sub(1) / 2);

        for pair in p.windows(2) {
            flat.push(self.arena.push(controls, rule(pair[0], pair[1])));
        }

        // Every further row combines the previous one and is one point shorter
        let mut row_start = 0;
        for i in 2..length {
            for j in 0..length - i {
                let a = PointRef::Derived(flat[row_start + j]);
                let b = PointRef::Derived(flat[row_start + j + 1]);
                flat.push(self.arena.push(controls, rule(a, b)));
            }
            row_start += length - i + 1;
        }

        flat
    }

    /// Splits the control polygon `p` at `t = 0.5`.
    ///
    /// Returns the left and right sub polygons, both in curve order, and every midpoint
    /// created on the way in construction order.
    /// The last point of `left` and the first of `right` is the curve's point at `0.5`.
    pub fn generate_left_right(
        &mut self,
        controls: &[Point2D],
        p: &[PointRef],
    ) -> (Polygon, Polygon, Vec<NodeId>) {
        let flat = self.build_triangle(controls, p, Derivation::Center);
        let length = p.len();

        // Row `x` of the triangle starts at `x * (2 * (length - 1) + 1 - x) / 2`.
        // Counting back from the apex, row `x` ends at `apex - x * (x + 1) / 2`.
        let apex = flat.len().saturating_sub(1);
        let mut left: Polygon = smallvec![p[0]];
        let mut right = Polygon::with_capacity(length);
        for x in 0..length - 1 {
            left.push(PointRef::Derived(flat[x * (2 * (length - 1) + 1 - x) / 2]));
            right.push(PointRef::Derived(flat[apex - x * (x + 1) / 2]));
        }
        right.push(p[length - 1]);

        (left, right, flat)
    }

    fn divide_and_conquer<R: Record>(
        &mut self,
        controls: &[Point2D],
        p: &[PointRef],
        iterations: usize,
        steps: &mut R,
    ) {
        if iterations == 0 {
            return;
        }

        let (left, right, flat) = self.generate_left_right(controls, p);
        self.record_triangle(p.len(), &flat, steps);
        self.waste.extend_from_slice(&flat);

        let last = p.len() - 1;
        self.divide_and_conquer(controls, &left, iterations - 1, steps);
        if iterations == 1 {
            steps.record(Step::Line(left[0], left[last]));
            steps.record(Step::Line(left[last], right[last]));
        }
        self.result.push(left[last]);
        self.divide_and_conquer(controls, &right, iterations - 1, steps);
    }

    fn brute_force<R: Record>(
        &mut self,
        controls: &[Point2D],
        p: &[PointRef],
        samples: usize,
        steps: &mut R,
    ) {
        let mut curve_points = Vec::with_capacity(samples);
        for k in 0..samples {
            let t = sample_parameter(k, samples);
            let flat = self.build_triangle(controls, p, |a, b| Derivation::Lerp(a, b, t));
            self.record_triangle(p.len(), &flat, steps);
            self.waste.extend_from_slice(&flat);
            if let Some(&apex) = flat.last() {
                curve_points.push(PointRef::Derived(apex));
            }
        }

        self.result.extend_from_slice(&curve_points);
        Self::record_polyline(p, &curve_points, steps);
    }

    fn formulated<R: Record>(
        &mut self,
        controls: &[Point2D],
        p: &[PointRef],
        samples: usize,
        steps: &mut R,
    ) {
        let mut curve_points = Vec::with_capacity(samples);
        for k in 0..samples {
            let t = sample_parameter(k, samples);
            let point = PointRef::Derived(self.arena.formulated(controls, p, t));
            steps.record(Step::Point(point));
            curve_points.push(point);
        }

        self.result.extend_from_slice(&curve_points);
        Self::record_polyline(p, &curve_points, steps);
    }

    /// Points of a triangle in construction order, each preceded by the line
    /// it sits on unless that line is part of the input polygon.
    fn record_triangle<R: Record>(&self, input_len: usize, flat: &[NodeId], steps: &mut R) {
        if !R::ACTIVE {
            return;
        }
        let first_row = input_len.saturating_sub(1);
        for (i, &id) in flat.iter().enumerate() {
            if i >= first_row {
                if let Some((a, b)) = self.arena.get(id).derivation().parents() {
                    steps.record(Step::Line(a, b));
                }
            }
            steps.record(Step::Point(PointRef::Derived(id)));
        }
    }

    /// Lines from the start through every curve point to the end
    fn record_polyline<R: Record>(p: &[PointRef], curve_points: &[PointRef], steps: &mut R) {
        if !R::ACTIVE {
            return;
        }
        let (Some(&first), Some(&last)) = (p.first(), p.last()) else {
            return;
        };
        let mut previous = first;
        for &point in curve_points.iter().chain(Some(&last)) {
            steps.record(Step::Line(previous, point));
            previous = point;
        }
    }
}
