//! Frame driven animation of the steps a [`StepPlayer`](crate::steps::StepPlayer) emits.
//!
//! Lines grow from their first toward their second point, points pop up with a slight
//! overshoot. Each item keeps following the points it belongs to while animating, so
//! dragging control points mid animation looks right.

use crate::curve::{BezierCurve, Epoch};
use crate::draw::{Canvas, Layer};
use crate::math::{ease_out_back_cubic, ease_out_quart, saturate};
use crate::point::Point2D;
use crate::syncable::{Derivation, PointRef, SyncablePoint};
use std::time::Duration;

/// Called once an item finished animating
pub type OnFinished = Box<dyn FnOnce()>;

struct Animatable<T> {
    target: T,
    epoch: Epoch,
    progress: f64,
    on_finished: OnFinished,
}

impl<T> Animatable<T> {
    fn new(target: T, epoch: Epoch, on_finished: impl FnOnce() + 'static) -> Self {
        Animatable {
            target,
            epoch,
            progress: 0.0,
            on_finished: Box::new(on_finished),
        }
    }

    fn is_done(&self) -> bool {
        self.progress >= 1.0
    }
}

/// Drops the items of other generations without running their callbacks, returns how many
fn discard_outdated<T>(items: &mut Vec<Animatable<T>>, epoch: Epoch) -> usize {
    let before = items.len();
    items.retain(|item| item.epoch == epoch);
    before - items.len()
}

/// Removes the finished items and runs their callbacks in the order they were added
fn finish<T>(items: &mut Vec<Animatable<T>>) {
    let (done, running): (Vec<_>, Vec<_>) = items.drain(..).partition(Animatable::is_done);
    *items = running;
    for item in done {
        (item.on_finished)();
    }
}

/// In flight line and point animations.
pub struct CurveAnimator {
    lines: Vec<Animatable<(PointRef, PointRef)>>,
    points: Vec<Animatable<PointRef>>,
    step_duration: f64,
}

impl CurveAnimator {
    /// Creates an idle animator whose items take `step_duration` seconds each
    pub fn new(step_duration: f64) -> Self {
        CurveAnimator {
            lines: Vec::new(),
            points: Vec::new(),
            step_duration: step_duration.max(f64::EPSILON),
        }
    }

    /// Seconds a single item takes
    pub fn step_duration(&self) -> f64 {
        self.step_duration
    }

    /// Changes the duration, items already in flight speed up or slow down accordingly
    pub fn set_step_duration(&mut self, step_duration: f64) {
        self.step_duration = step_duration.max(f64::EPSILON);
    }

    /// Starts popping up `point`, a handle of the curve generation `epoch`
    pub fn animate_point_step(
        &mut self,
        epoch: Epoch,
        point: PointRef,
        on_finished: impl FnOnce() + 'static,
    ) {
        self.points.push(Animatable::new(point, epoch, on_finished));
    }

    /// Starts growing a line from `from` toward `to`, handles of the curve generation `epoch`
    pub fn animate_line_step(
        &mut self,
        epoch: Epoch,
        from: PointRef,
        to: PointRef,
        on_finished: impl FnOnce() + 'static,
    ) {
        self.lines.push(Animatable::new((from, to), epoch, on_finished));
    }

    /// Number of `(lines, points)` still animating
    pub fn in_flight(&self) -> (usize, usize) {
        (self.lines.len(), self.points.len())
    }

    /// Whether nothing is animating
    pub fn is_idle(&self) -> bool {
        self.lines.is_empty() && self.points.is_empty()
    }

    /// Drops every item without calling its callback.
    ///
    /// Items of an outdated curve generation are dropped by [`update`](CurveAnimator::update)
    /// anyway, this just does it right away.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.points.clear();
    }

    /// Advances every item by `elapsed` and draws its current state onto [`Layer::Animation`].
    ///
    /// Lines are drawn before points. Items reaching the end are removed afterwards,
    /// again lines first, and their callbacks run exactly once.
    /// Items started for another [`Epoch`] than `curve`'s are dropped silently.
    pub fn update<C: Canvas + ?Sized>(
        &mut self,
        elapsed: Duration,
        curve: &mut BezierCurve,
        controls: &[Point2D],
        canvas: &mut C,
    ) {
        let epoch = curve.epoch();
        let outdated = discard_outdated(&mut self.lines, epoch)
            + discard_outdated(&mut self.points, epoch);
        if outdated > 0 {
            log::debug!("dropped {} animations of an outdated curve", outdated);
        }

        let delta = elapsed.as_secs_f64() / self.step_duration;

        for line in self.lines.iter_mut() {
            let (a, b) = line.target;
            curve.sync_point(controls, a);
            curve.sync_point(controls, b);
            line.progress += delta;

            let eased = ease_out_quart(saturate(line.progress));
            // Unlinked point between both ends, it only lives for this frame
            let resolver = curve.arena().resolver(controls);
            let tip = SyncablePoint::new(Derivation::Center(a, b), &resolver);
            if let Some(to) = tip.progress_point(&resolver, eased) {
                canvas.line(Layer::Animation, resolver.position(a), to);
            }
        }

        for point in self.points.iter_mut() {
            curve.sync_point(controls, point.target);
            point.progress += delta;

            let eased = ease_out_back_cubic(saturate(point.progress));
            canvas.point(Layer::Animation, curve.position(controls, point.target), eased);
        }

        finish(&mut self.lines);
        finish(&mut self.points);
    }
}

impl Default for CurveAnimator {
    fn default() -> Self {
        CurveAnimator::new(crate::options::STEP_DURATION_SECS)
    }
}
