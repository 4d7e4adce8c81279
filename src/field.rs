//! 2D vector fields that drive particle motion.
//!
//! A field maps a position to a velocity. Fields are pure: no state, no
//! failure modes, defined over the whole plane.
//!
//! # Field Types
//!
//! | Variant | Velocity at `(x, y)` | Motion |
//! |---------|----------------------|--------|
//! | [`VectorField::Circular`] | `(y, -x)` | Clockwise circles around the origin |
//! | [`VectorField::Spiral`] | `(x - y, x + y)` | Counter-clockwise spiral out of the centre |
//! | [`VectorField::Hyperbolic`] | `(x, -y)` | Saddle flow along hyperbolas |
//! | [`VectorField::Linear`] | `M * p` | Any linear field |
//! | [`VectorField::Custom`] | `f(p)` | Arbitrary closure |
//!
//! # Example
//!
//! ```
//! use fieldtrace::{Vec2, VectorField};
//!
//! let v = VectorField::Circular.evaluate(Vec2::new(1.0, 0.0));
//! assert_eq!(v, Vec2::new(0.0, -1.0));
//! ```

use glam::{Mat2, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Step used for finite-difference derivatives.
const DERIVATIVE_STEP: f32 = 1e-3;

/// A 2D velocity field.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorField {
    /// Position rotated by -90 degrees: `(y, -x)`.
    ///
    /// Velocity is always perpendicular to the position, so particles orbit
    /// the origin at a constant radius (up to integration error).
    #[default]
    Circular,

    /// Outward spiral from the centre: `(x - y, x + y)`.
    Spiral,

    /// Saddle flow: `(x, -y)`.
    ///
    /// Particles stream in along the y axis and out along the x axis.
    Hyperbolic,

    /// Linear field `matrix * p`.
    ///
    /// `glam::Mat2` is column-major, so `Mat2::from_cols(a, b) * p == a * p.x + b * p.y`.
    Linear {
        /// Field matrix.
        matrix: Mat2,
    },

    /// Arbitrary field function. Not serializable.
    #[serde(skip)]
    Custom(Arc<dyn Fn(Vec2) -> Vec2 + Send + Sync>),
}

impl VectorField {
    /// Build a custom field from a closure.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(Vec2) -> Vec2 + Send + Sync + 'static,
    {
        VectorField::Custom(Arc::new(f))
    }

    /// Velocity at `position`.
    #[inline]
    pub fn evaluate(&self, position: Vec2) -> Vec2 {
        match self {
            VectorField::Circular => Vec2::new(position.y, -position.x),
            VectorField::Spiral => Vec2::new(position.x - position.y, position.x + position.y),
            VectorField::Hyperbolic => Vec2::new(position.x, -position.y),
            VectorField::Linear { matrix } => *matrix * position,
            VectorField::Custom(f) => f(position),
        }
    }

    /// The matrix of a linear field, if this field is linear.
    ///
    /// Every built-in variant is linear; only `Custom` returns `None`.
    pub fn matrix(&self) -> Option<Mat2> {
        match self {
            VectorField::Circular => Some(Mat2::from_cols(Vec2::new(0.0, -1.0), Vec2::new(1.0, 0.0))),
            VectorField::Spiral => Some(Mat2::from_cols(Vec2::new(1.0, 1.0), Vec2::new(-1.0, 1.0))),
            VectorField::Hyperbolic => Some(Mat2::from_cols(Vec2::new(1.0, 0.0), Vec2::new(0.0, -1.0))),
            VectorField::Linear { matrix } => Some(*matrix),
            VectorField::Custom(_) => None,
        }
    }

    /// Divergence `dFx/dx + dFy/dy` at `position` (central differences).
    pub fn divergence_at(&self, position: Vec2) -> f32 {
        let (dfdx, dfdy) = self.partials(position);
        dfdx.x + dfdy.y
    }

    /// Scalar curl `dFy/dx - dFx/dy` at `position` (central differences).
    pub fn curl_at(&self, position: Vec2) -> f32 {
        let (dfdx, dfdy) = self.partials(position);
        dfdx.y - dfdy.x
    }

    /// Short human-readable name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            VectorField::Circular => "circular",
            VectorField::Spiral => "spiral",
            VectorField::Hyperbolic => "hyperbolic",
            VectorField::Linear { .. } => "linear",
            VectorField::Custom(_) => "custom",
        }
    }

    fn partials(&self, p: Vec2) -> (Vec2, Vec2) {
        let h = DERIVATIVE_STEP;
        let dx = Vec2::new(h, 0.0);
        let dy = Vec2::new(0.0, h);
        let dfdx = (self.evaluate(p + dx) - self.evaluate(p - dx)) / (2.0 * h);
        let dfdy = (self.evaluate(p + dy) - self.evaluate(p - dy)) / (2.0 * h);
        (dfdx, dfdy)
    }
}

impl fmt::Debug for VectorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorField::Circular => f.write_str("Circular"),
            VectorField::Spiral => f.write_str("Spiral"),
            VectorField::Hyperbolic => f.write_str("Hyperbolic"),
            VectorField::Linear { matrix } => f.debug_struct("Linear").field("matrix", matrix).finish(),
            VectorField::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
