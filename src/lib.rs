#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod animator;
pub mod app;
pub mod curve;
pub mod draw;
pub mod error;
pub mod math;
pub mod options;
pub mod point;
pub mod steps;
pub mod syncable;

pub use crate::animator::CurveAnimator;
pub use crate::app::{VisualizationState, Visualizer};
pub use crate::curve::{check_preconditions, Algorithm, BezierCurve, Epoch};
pub use crate::error::{ConfigError, CurveError};
pub use crate::options::Options;
pub use crate::point::Point2D;
pub use crate::steps::{Step, StepPlayer, StepSequence};
pub use crate::syncable::{NodeId, PointRef};
