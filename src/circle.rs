use std::f64::consts::PI;

use crate::error::{is_positive, Result, ShapeError};
use crate::shape::{Shape, ShapeRef};

/// A circle with a strictly positive radius.
///
/// Equality compares radii exactly; there is no tolerance and no notion of
/// equality with other variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    radius: f64,
}

impl Circle {
    pub fn new(radius: f64) -> Result<Self> {
        validate_radius(radius)?;
        Ok(Circle { radius })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Replaces the radius, leaving the circle untouched on failure.
    pub fn set_radius(&mut self, radius: f64) -> Result<()> {
        validate_radius(radius)?;
        self.radius = radius;
        Ok(())
    }

    /// Area of a circle of the given radius, without building one.
    pub fn area_for_radius(radius: f64) -> f64 {
        PI * radius * radius
    }
}

fn validate_radius(radius: f64) -> Result<()> {
    if is_positive(radius) {
        Ok(())
    } else {
        Err(ShapeError::InvalidRadius(radius))
    }
}

impl Default for Circle {
    fn default() -> Self {
        Circle { radius: 1.0 }
    }
}

impl Shape for Circle {
    fn area(&self) -> f64 {
        Circle::area_for_radius(self.radius)
    }

    fn perimeter(&self) -> f64 {
        2.0 * PI * self.radius
    }

    fn name(&self) -> &'static str {
        "Circle"
    }
}

impl ShapeRef for Circle {
    fn shape(&self) -> Option<&dyn Shape> {
        Some(self)
    }
}
