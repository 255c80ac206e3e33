//! Points whose position is derived from other points.
//!
//! A [`SyncablePoint`] remembers *how* it was computed (its [`Derivation`]) and which
//! points it was computed from. Moving a control point therefore only requires
//! re-running these rules via [`PointArena::sync`] instead of rebuilding the curve.
//!
//! Parents are referenced through [`PointRef`] handles:
//! - [`PointRef::Control`] indexes into the caller owned list of control points
//! - [`PointRef::Derived`] indexes into the [`PointArena`] the point lives in
//!
//! A derived point may only reference arena entries created before itself.
//! Syncing the arena front to back thus always sees up to date parents.

use crate::math::bernstein;
use crate::point::{lerp_point, midpoint, Point2D};
use smallvec::{smallvec, SmallVec};

/// Index of a derived point inside a [`PointArena`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position inside the arena, which is also the point's construction order
    pub fn index(self) -> usize {
        self.0
    }
}

/// Non owning handle to a point a [`SyncablePoint`] can be derived from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointRef {
    /// One of the caller's control points, by its position in the control list
    Control(usize),

    /// A point derived earlier and stored in the same arena
    Derived(NodeId),
}

/// Control polygon as a list of handles.
///
/// Cubic curves and lower are kept on the stack.
pub type Polygon = SmallVec<[PointRef; 4]>;

/// Rule used to (re)compute a [`SyncablePoint`]'s position
#[derive(Clone, Debug, PartialEq)]
pub enum Derivation {
    /// Midpoint of two points
    Center(PointRef, PointRef),

    /// Linear interpolation between two points at a fixed parameter
    Lerp(PointRef, PointRef, f64),

    /// Bernstein weighted sum over a whole control polygon at a fixed parameter
    Formulated(Polygon, f64),
}

impl Derivation {
    /// Both parents for the two parent variants
    pub fn parents(&self) -> Option<(PointRef, PointRef)> {
        match self {
            Derivation::Center(a, b) | Derivation::Lerp(a, b, _) => Some((*a, *b)),
            Derivation::Formulated(..) => None,
        }
    }

    fn references(&self) -> Polygon {
        match self {
            Derivation::Center(a, b) | Derivation::Lerp(a, b, _) => smallvec![*a, *b],
            Derivation::Formulated(points, _) => points.clone(),
        }
    }
}

/// Read only view used to look up parent positions
#[derive(Copy, Clone)]
pub struct Resolver<'a> {
    controls: &'a [Point2D],
    derived: &'a [SyncablePoint],
}

impl<'a> Resolver<'a> {
    /// Combine the caller's control points with (a prefix of) an arena
    pub fn new(controls: &'a [Point2D], derived: &'a [SyncablePoint]) -> Self {
        Resolver { controls, derived }
    }

    /// Current position of `point`.
    ///
    /// Panics if the handle doesn't belong to this view.
    pub fn position(&self, point: PointRef) -> Point2D {
        match point {
            PointRef::Control(index) => self.controls[index],
            PointRef::Derived(id) => self.derived[id.0].position,
        }
    }
}

/// A point derived from other points, recomputable on demand.
#[derive(Clone, Debug, PartialEq)]
pub struct SyncablePoint {
    derivation: Derivation,
    position: Point2D,
}

impl SyncablePoint {
    /// Creates the point and computes its initial position
    pub fn new(derivation: Derivation, resolver: &Resolver) -> Self {
        let position = derive(&derivation, resolver);
        SyncablePoint {
            derivation,
            position,
        }
    }

    /// Position as of the last sync
    pub fn position(&self) -> Point2D {
        self.position
    }

    /// The rule this point follows
    pub fn derivation(&self) -> &Derivation {
        &self.derivation
    }

    /// Recompute the position from the parents' current positions.
    ///
    /// Idempotent as long as the parents don't move.
    pub fn sync(&mut self, resolver: &Resolver) {
        self.position = derive(&self.derivation, resolver);
    }

    /// New, unlinked point between the two parents at `t`.
    ///
    /// Only used to animate the line a point is constructed on.
    /// Formulated points don't sit on a single line and return `None`.
    pub fn progress_point(&self, resolver: &Resolver, t: f64) -> Option<Point2D> {
        let (a, b) = self.derivation.parents()?;
        Some(lerp_point(&resolver.position(a), &resolver.position(b), t))
    }
}

fn derive(derivation: &Derivation, resolver: &Resolver) -> Point2D {
    match derivation {
        Derivation::Center(a, b) => midpoint(&resolver.position(*a), &resolver.position(*b)),
        Derivation::Lerp(a, b, t) => {
            lerp_point(&resolver.position(*a), &resolver.position(*b), *t)
        }
        Derivation::Formulated(points, t) => {
            let n = points.len().saturating_sub(1);
            points
                .iter()
                .enumerate()
                .fold(Point2D::zeros(), |sum, (i, p)| {
                    sum + resolver.position(*p) * bernstein(n, i, *t)
                })
        }
    }
}

/// Storage for derived points in construction order.
#[derive(Clone, Debug, Default)]
pub struct PointArena {
    nodes: Vec<SyncablePoint>,
}

impl PointArena {
    /// Creates an empty arena
    pub fn new() -> Self {
        PointArena::default()
    }

    /// Number of stored points
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no point is stored
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Removes all points, invalidating every [`NodeId`] handed out so far
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// The point behind `id`
    pub fn get(&self, id: NodeId) -> &SyncablePoint {
        &self.nodes[id.0]
    }

    /// Iterates all points in construction order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SyncablePoint)> {
        self.nodes.iter().enumerate().map(|(i, p)| (NodeId(i), p))
    }

    /// Lookup view over the whole arena
    pub fn resolver<'a>(&'a self, controls: &'a [Point2D]) -> Resolver<'a> {
        Resolver::new(controls, &self.nodes)
    }

    /// Current position of any handle
    pub fn position(&self, controls: &[Point2D], point: PointRef) -> Point2D {
        self.resolver(controls).position(point)
    }

    /// Adds a new point following `derivation` and computes its position.
    pub fn push(&mut self, controls: &[Point2D], derivation: Derivation) -> NodeId {
        let id = NodeId(self.nodes.len());
        debug_assert!(
            derivation.references().iter().all(|r| match r {
                PointRef::Derived(parent) => parent.0 < id.0,
                PointRef::Control(index) => *index < controls.len(),
            }),
            "parents must exist before their children"
        );
        let point = SyncablePoint::new(derivation, &self.resolver(controls));
        self.nodes.push(point);
        id
    }

    /// Shorthand for pushing a [`Derivation::Center`]
    pub fn center(&mut self, controls: &[Point2D], a: PointRef, b: PointRef) -> NodeId {
        self.push(controls, Derivation::Center(a, b))
    }

    /// Shorthand for pushing a [`Derivation::Lerp`]
    pub fn lerp(&mut self, controls: &[Point2D], a: PointRef, b: PointRef, t: f64) -> NodeId {
        self.push(controls, Derivation::Lerp(a, b, t))
    }

    /// Shorthand for pushing a [`Derivation::Formulated`]
    pub fn formulated(&mut self, controls: &[Point2D], points: &[PointRef], t: f64) -> NodeId {
        self.push(controls, Derivation::Formulated(points.iter().copied().collect(), t))
    }

    /// Re-derive a single point from its parents' current positions.
    ///
    /// The parents themselves are not synced.
    pub fn sync(&mut self, controls: &[Point2D], id: NodeId) {
        // Parents always live in front of their children
        let (earlier, rest) = self.nodes.split_at_mut(id.0);
        rest[0].sync(&Resolver::new(controls, earlier));
    }

    /// Re-derive every point in construction order
    pub fn sync_all(&mut self, controls: &[Point2D]) {
        for i in 0..self.nodes.len() {
            self.sync(controls, NodeId(i));
        }
    }

    /// Shorthand for [`SyncablePoint::progress_point`] on a stored point
    pub fn progress_point(&self, controls: &[Point2D], id: NodeId, t: f64) -> Option<Point2D> {
        self.get(id).progress_point(&self.resolver(controls), t)
    }
}
