//! Replaying an algorithm's internal steps on a timeline.
//!
//! [`BezierCurve::generate_with_steps`] records the points and lines an algorithm
//! visits into a [`StepSequence`]. A [`StepPlayer`] hands them out again one at a
//! time, each after a fixed delay measured on whatever clock the caller advances it
//! with (usually the frame time).
//!
//! Sequences remember the [`Epoch`] of the curve they were recorded on.
//! Once that curve is cleared, a player silently drops its remaining steps
//! instead of emitting points which no longer exist.

use crate::curve::{BezierCurve, Epoch};
use crate::syncable::PointRef;
use std::collections::VecDeque;
use std::time::Duration;

/// Something an algorithm did which is worth showing
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// A point was constructed
    Point(PointRef),

    /// A line between two points was constructed, drawn from the first toward the second
    Line(PointRef, PointRef),
}

/// Recorded steps of one generation, in visiting order
#[derive(Clone, Debug)]
pub struct StepSequence {
    epoch: Epoch,
    steps: VecDeque<Step>,
}

impl StepSequence {
    pub(crate) fn new(epoch: Epoch, steps: Vec<Step>) -> Self {
        StepSequence {
            epoch,
            steps: steps.into(),
        }
    }

    /// Generation of the curve the steps belong to
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Number of steps left
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether all steps were consumed
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether `curve` is still in the generation the steps were recorded in
    pub fn is_current(&self, curve: &BezierCurve) -> bool {
        curve.epoch() == self.epoch
    }

    fn discard(&mut self) {
        self.steps.clear();
    }
}

impl Iterator for StepSequence {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        self.steps.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.steps.len(), Some(self.steps.len()))
    }
}

impl ExactSizeIterator for StepSequence {}

/// Emits a [`StepSequence`] one step per `delay`.
///
/// The first step is due immediately, every further one `delay` after its predecessor.
/// Time only passes when the caller says so through [`poll`](StepPlayer::poll)
/// or [`advance`](StepPlayer::advance).
#[derive(Clone, Debug)]
pub struct StepPlayer {
    sequence: StepSequence,
    delay: Duration,
    waited: Duration,
    started: bool,
}

impl StepPlayer {
    /// Prepares to play `sequence`
    pub fn new(sequence: StepSequence, delay: Duration) -> Self {
        StepPlayer {
            sequence,
            delay,
            waited: Duration::ZERO,
            started: false,
        }
    }

    /// Time between two steps
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Changes the time between two steps, effective for the next one
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Number of steps not emitted yet
    pub fn remaining(&self) -> usize {
        self.sequence.len()
    }

    /// Whether every step was emitted or discarded
    pub fn is_finished(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Lets `elapsed` pass and returns the steps which became due.
    ///
    /// Returns nothing, and discards all remaining steps, once `curve`
    /// moved on to a newer generation.
    pub fn poll(&mut self, elapsed: Duration, curve: &BezierCurve) -> Vec<Step> {
        if !self.sequence.is_current(curve) {
            if !self.sequence.is_empty() {
                log::debug!(
                    "dropping {} steps of outdated {:?}",
                    self.sequence.len(),
                    self.sequence.epoch()
                );
                self.sequence.discard();
            }
            return Vec::new();
        }

        self.waited += elapsed;
        let mut due = Vec::new();
        while !self.sequence.is_empty() {
            if self.started {
                if self.waited < self.delay {
                    break;
                }
                self.waited -= self.delay;
            } else {
                self.started = true;
                self.waited = Duration::ZERO;
            }
            due.extend(self.sequence.next());
        }
        due
    }

    /// Callback flavoured [`poll`](StepPlayer::poll).
    ///
    /// Calls `on_point` for every due [`Step::Point`] and `on_line` for every due
    /// [`Step::Line`] in order and returns how many steps were emitted.
    pub fn advance(
        &mut self,
        elapsed: Duration,
        curve: &BezierCurve,
        mut on_point: impl FnMut(PointRef),
        mut on_line: impl FnMut(PointRef, PointRef),
    ) -> usize {
        let due = self.poll(elapsed, curve);
        for step in &due {
            match *step {
                Step::Point(point) => on_point(point),
                Step::Line(from, to) => on_line(from, to),
            }
        }
        due.len()
    }
}
