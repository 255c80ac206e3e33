//! The visualizer's application state, driven by user actions and frame ticks.
//!
//! A [`Visualizer`] owns the control points, the [`Options`], one [`BezierCurve`] and
//! everything needed to replay its steps. Frontends translate their input events into
//! calls of the action methods and call [`Visualizer::tick`] once per frame with a
//! [`Canvas`] to draw on.

use crate::animator::CurveAnimator;
use crate::curve::{check_preconditions, BezierCurve};
use crate::draw::{draw_polyline, Canvas, Layer};
use crate::error::{ConfigError, CurveError};
use crate::options::Options;
use crate::point::Point2D;
use crate::steps::{Step, StepPlayer};
use crate::syncable::PointRef;
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// What is currently shown on top of the control points
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum VisualizationState {
    /// Only the control points
    #[default]
    Idle,

    /// The generated curve
    Curve,

    /// The algorithm's steps, animated one after another
    Steps,
}

/// Steps which finished animating and stay on screen
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SettledSteps {
    /// Constructed points
    pub points: Vec<PointRef>,

    /// Constructed lines
    pub lines: Vec<(PointRef, PointRef)>,
}

impl SettledSteps {
    fn clear(&mut self) {
        self.points.clear();
        self.lines.clear();
    }
}

/// Name shown next to the control point at `index`
pub fn point_name(index: usize) -> String {
    format!("P{}", index)
}

/// Interactive visualizer state
pub struct Visualizer {
    controls: Vec<Point2D>,
    options: Options,
    curve: BezierCurve,
    animator: CurveAnimator,
    player: Option<StepPlayer>,
    settled: Rc<RefCell<SettledSteps>>,
    state: VisualizationState,
    last_generation: Option<Duration>,
}

impl Default for Visualizer {
    fn default() -> Self {
        let options = Options::default();
        Visualizer {
            controls: Vec::new(),
            animator: CurveAnimator::new(options.step_duration_secs),
            options,
            curve: BezierCurve::new(),
            player: None,
            settled: Rc::default(),
            state: VisualizationState::Idle,
            last_generation: None,
        }
    }
}

impl Visualizer {
    /// Creates a visualizer without control points
    pub fn new(options: Options) -> Result<Self, ConfigError> {
        let mut visualizer = Visualizer::default();
        visualizer.set_options(options)?;
        Ok(visualizer)
    }

    /// Current control points
    pub fn controls(&self) -> &[Point2D] {
        &self.controls
    }

    /// Current options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The curve, possibly empty
    pub fn curve(&self) -> &BezierCurve {
        &self.curve
    }

    /// What is being shown
    pub fn state(&self) -> VisualizationState {
        self.state
    }

    /// Time the last [`visualize_curve`](Visualizer::visualize_curve) took to generate
    pub fn last_generation(&self) -> Option<Duration> {
        self.last_generation
    }

    /// Steps which finished animating
    pub fn settled_steps(&self) -> Ref<'_, SettledSteps> {
        self.settled.borrow()
    }

    /// Whether steps are still waiting to be emitted or animating
    pub fn is_animating(&self) -> bool {
        self.player.as_ref().is_some_and(|p| !p.is_finished()) || !self.animator.is_idle()
    }

    /// Validates and applies new options.
    ///
    /// A running step replay keeps its delay, the animation duration changes immediately.
    pub fn set_options(&mut self, options: Options) -> Result<(), ConfigError> {
        options.validate()?;
        self.animator.set_step_duration(options.step_duration_secs);
        self.options = options;
        Ok(())
    }

    /// Appends a control point and returns its index
    pub fn add_point(&mut self, point: Point2D) -> usize {
        self.controls.push(point);
        if self.state != VisualizationState::Idle {
            self.reset();
        }
        log::debug!("added {} at {:?}", point_name(self.controls.len() - 1), point);
        self.controls.len() - 1
    }

    /// Moves a control point. The curve follows on the next tick if dynamic updates are on.
    pub fn move_point(&mut self, index: usize, point: Point2D) -> Result<(), CurveError> {
        let len = self.controls.len();
        let control = self
            .controls
            .get_mut(index)
            .ok_or(CurveError::NoSuchPoint { index, len })?;
        *control = point;
        Ok(())
    }

    /// Removes a control point, the following ones shift down by one
    pub fn remove_point(&mut self, index: usize) -> Result<Point2D, CurveError> {
        if index >= self.controls.len() {
            return Err(CurveError::NoSuchPoint {
                index,
                len: self.controls.len(),
            });
        }
        let point = self.controls.remove(index);
        if self.state != VisualizationState::Idle {
            self.reset();
        }
        log::debug!("removed {}", point_name(index));
        Ok(point)
    }

    /// Drops the curve and all steps, keeping the control points
    pub fn reset(&mut self) {
        self.state = VisualizationState::Idle;
        self.curve.clear();
        self.animator.clear();
        self.player = None;
        self.settled.borrow_mut().clear();
    }

    /// Generates and shows the curve using the configured algorithm and iterations
    pub fn visualize_curve(&mut self) -> Result<(), CurveError> {
        check_preconditions(self.controls.len(), self.options.iterations)?;
        self.reset();

        let start = Instant::now();
        self.curve.generate(
            &self.controls,
            self.options.iterations,
            self.options.algorithm,
        );
        let elapsed = start.elapsed();
        self.last_generation = Some(elapsed);
        self.state = VisualizationState::Curve;

        log::info!(
            "generated {} segments using {} in {:?}",
            self.curve.result().len() - 1,
            self.options.algorithm,
            elapsed
        );
        Ok(())
    }

    /// Generates the curve and starts replaying its steps
    pub fn show_steps(&mut self) -> Result<(), CurveError> {
        check_preconditions(self.controls.len(), self.options.iterations)?;
        self.reset();

        let sequence = self.curve.generate_with_steps(
            &self.controls,
            self.options.iterations,
            self.options.algorithm,
        );
        log::info!(
            "showing {} steps of {}, one every {:?}",
            sequence.len(),
            self.options.algorithm,
            self.options.step_delay()
        );
        self.player = Some(StepPlayer::new(sequence, self.options.step_delay()));
        self.state = VisualizationState::Steps;
        Ok(())
    }

    /// Labelled result points, empty unless
    /// [`show_result_coordinates`](Options::show_result_coordinates) is set.
    ///
    /// Only the points between the curve's ends are labelled, the ends are control points.
    pub fn result_coordinates(&self) -> Vec<(String, Point2D)> {
        if !self.options.show_result_coordinates || self.state != VisualizationState::Curve {
            return Vec::new();
        }
        let positions = self.curve.result_positions(&self.controls);
        let interior = positions.get(1..positions.len().saturating_sub(1)).unwrap_or_default();
        interior
            .iter()
            .enumerate()
            .map(|(i, &point)| (format!("Q{}", i), point))
            .collect()
    }

    /// Advances the visualizer by one frame which took `elapsed` and draws it onto `canvas`
    pub fn tick<C: Canvas + ?Sized>(&mut self, elapsed: Duration, canvas: &mut C) {
        self.emit_due_steps(elapsed);

        if self.options.dynamic_update && self.state != VisualizationState::Idle {
            self.curve.refresh(&self.controls, |_| {});
        }

        self.animator
            .update(elapsed, &mut self.curve, &self.controls, canvas);

        if self.options.show_input_lines {
            draw_polyline(canvas, Layer::Input, self.controls.iter().copied());
        }

        match self.state {
            VisualizationState::Idle => {}
            VisualizationState::Curve => {
                draw_polyline(canvas, Layer::Result, self.curve.result_positions(&self.controls));
            }
            VisualizationState::Steps => {
                let settled = self.settled.borrow();
                for &(a, b) in &settled.lines {
                    canvas.line(
                        Layer::Steps,
                        self.curve.position(&self.controls, a),
                        self.curve.position(&self.controls, b),
                    );
                }
                for &point in &settled.points {
                    canvas.point(Layer::Steps, self.curve.position(&self.controls, point), 1.0);
                }
            }
        }
    }

    /// Hands the steps which became due to the animator
    fn emit_due_steps(&mut self, elapsed: Duration) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        let epoch = self.curve.epoch();
        for step in player.poll(elapsed, &self.curve) {
            let settled = Rc::clone(&self.settled);
            match step {
                Step::Point(point) => self.animator.animate_point_step(epoch, point, move || {
                    settled.borrow_mut().points.push(point)
                }),
                Step::Line(from, to) => {
                    self.animator.animate_line_step(epoch, from, to, move || {
                        settled.borrow_mut().lines.push((from, to))
                    })
                }
            }
        }
        if player.is_finished() {
            log::debug!("all steps emitted");
            self.player = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Algorithm;
    use crate::draw::DrawCommand;

    fn s_shape() -> Visualizer {
        let mut visualizer = Visualizer::new(Options {
            iterations: 1,
            ..Options::default()
        })
        .unwrap();
        for (x, y) in [(0.0, 0.0), (0.0, 100.0), (100.0, 100.0), (100.0, 0.0)] {
            visualizer.add_point(Point2D::new(x, y));
        }
        visualizer
    }

    fn count(commands: &[DrawCommand], layer: Layer) -> usize {
        commands.iter().filter(|c| c.layer() == layer).count()
    }

    #[test]
    fn needs_three_points() {
        let mut visualizer = Visualizer::default();
        visualizer.add_point(Point2D::new(0.0, 0.0));
        visualizer.add_point(Point2D::new(1.0, 1.0));
        assert_eq!(
            visualizer.visualize_curve(),
            Err(CurveError::NotEnoughPoints {
                required: 3,
                actual: 2
            })
        );
        assert!(visualizer.show_steps().is_err());
        assert_eq!(visualizer.state(), VisualizationState::Idle);
    }

    #[test]
    fn visualize_and_draw() {
        let mut visualizer = s_shape();
        visualizer.visualize_curve().unwrap();
        assert_eq!(visualizer.state(), VisualizationState::Curve);
        assert!(visualizer.last_generation().is_some());
        assert_eq!(
            visualizer.curve().result_positions(visualizer.controls()),
            vec![
                Point2D::new(0.0, 0.0),
                Point2D::new(50.0, 75.0),
                Point2D::new(100.0, 0.0)
            ]
        );

        let mut canvas: Vec<DrawCommand> = Vec::new();
        visualizer.tick(Duration::from_millis(16), &mut canvas);
        assert_eq!(count(&canvas, Layer::Input), 3);
        assert_eq!(count(&canvas, Layer::Result), 2);
    }

    #[test]
    fn curve_follows_dragged_points() {
        let mut visualizer = s_shape();
        visualizer.visualize_curve().unwrap();
        visualizer.move_point(1, Point2D::new(0.0, 200.0)).unwrap();

        let mut canvas: Vec<DrawCommand> = Vec::new();
        visualizer.tick(Duration::from_millis(16), &mut canvas);
        let moved = visualizer.curve().result_positions(visualizer.controls());
        assert_eq!(moved[1], Point2D::new(50.0, 112.5));

        let mut options = visualizer.options().clone();
        options.dynamic_update = false;
        visualizer.set_options(options).unwrap();
        visualizer.move_point(1, Point2D::new(0.0, 100.0)).unwrap();
        visualizer.tick(Duration::from_millis(16), &mut canvas);
        assert_eq!(
            visualizer.curve().result_positions(visualizer.controls())[1],
            Point2D::new(50.0, 112.5)
        );
    }

    #[test]
    fn editing_points_resets() {
        let mut visualizer = s_shape();
        visualizer.visualize_curve().unwrap();
        assert_eq!(visualizer.add_point(Point2D::new(50.0, 50.0)), 4);
        assert_eq!(visualizer.state(), VisualizationState::Idle);
        assert!(visualizer.curve().is_empty());

        visualizer.visualize_curve().unwrap();
        assert_eq!(visualizer.remove_point(4), Ok(Point2D::new(50.0, 50.0)));
        assert_eq!(visualizer.state(), VisualizationState::Idle);

        assert_eq!(
            visualizer.remove_point(9),
            Err(CurveError::NoSuchPoint { index: 9, len: 4 })
        );
        assert!(visualizer.move_point(4, Point2D::zeros()).is_err());
        assert_eq!(point_name(3), "P3");
    }

    #[test]
    fn steps_settle_after_animating() {
        let mut visualizer = s_shape();
        let mut options = visualizer.options().clone();
        options.step_delay_ms = 0.0;
        options.step_duration_secs = 0.1;
        visualizer.set_options(options).unwrap();
        visualizer.show_steps().unwrap();
        assert_eq!(visualizer.state(), VisualizationState::Steps);
        assert!(visualizer.is_animating());

        let mut canvas: Vec<DrawCommand> = Vec::new();
        visualizer.tick(Duration::from_millis(16), &mut canvas);
        // Everything was emitted at once and is animating now
        assert_eq!(count(&canvas, Layer::Animation), 11);
        assert_eq!(count(&canvas, Layer::Steps), 0);

        canvas.clear();
        visualizer.tick(Duration::from_millis(200), &mut canvas);
        assert!(!visualizer.is_animating());
        {
            let settled = visualizer.settled_steps();
            assert_eq!(settled.points.len(), 6);
            assert_eq!(settled.lines.len(), 5);
        }

        canvas.clear();
        visualizer.tick(Duration::from_millis(16), &mut canvas);
        assert_eq!(count(&canvas, Layer::Steps), 11);
        assert_eq!(count(&canvas, Layer::Animation), 0);
    }

    #[test]
    fn reset_stops_steps() {
        let mut visualizer = s_shape();
        visualizer.show_steps().unwrap();
        let mut canvas: Vec<DrawCommand> = Vec::new();
        visualizer.tick(Duration::from_millis(16), &mut canvas);

        visualizer.reset();
        assert!(!visualizer.is_animating());
        canvas.clear();
        visualizer.tick(Duration::from_secs(5), &mut canvas);
        assert_eq!(count(&canvas, Layer::Animation), 0);
        assert_eq!(visualizer.settled_steps().points.len(), 0);
    }

    #[test]
    fn labelled_results() {
        let mut visualizer = s_shape();
        let options = Options {
            iterations: 2,
            algorithm: Algorithm::BruteForce,
            show_result_coordinates: true,
            ..Options::default()
        };
        visualizer.set_options(options).unwrap();
        assert!(visualizer.result_coordinates().is_empty());

        visualizer.visualize_curve().unwrap();
        // One label per segment but the last, the curve's end is P3
        let labels = visualizer.result_coordinates();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].0, "Q0");
        assert_eq!(labels[1].0, "Q1");
        let end = Point2D::new(100.0, 0.0);
        assert!(labels.iter().all(|(_, point)| *point != end));
        let sample = visualizer.curve().result_positions(visualizer.controls())[1];
        assert_eq!(labels[0].1, sample);
    }

    #[test]
    fn rejects_invalid_options() {
        let options = Options {
            step_duration_secs: -1.0,
            ..Options::default()
        };
        assert!(Visualizer::new(options).is_err());
    }
}
