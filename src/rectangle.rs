use crate::error::{is_positive, Result, ShapeError};
use crate::shape::{Shape, ShapeRef};

/// An axis-aligned rectangle; a square is a rectangle with equal sides.
#[derive(Debug, Clone, Copy)]
pub struct Rectangle {
    width: f64,
    height: f64,
}

impl Rectangle {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        validate_dimensions(width, height)?;
        Ok(Rectangle { width, height })
    }

    pub fn square(side: f64) -> Result<Self> {
        Rectangle::new(side, side)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Replaces both dimensions or neither.
    pub fn set_dimensions(&mut self, width: f64, height: f64) -> Result<()> {
        validate_dimensions(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Exact comparison of the two sides.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }
}

fn validate_dimensions(width: f64, height: f64) -> Result<()> {
    if is_positive(width) && is_positive(height) {
        Ok(())
    } else {
        Err(ShapeError::InvalidDimensions { width, height })
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        Rectangle {
            width: 1.0,
            height: 1.0,
        }
    }
}

impl Shape for Rectangle {
    fn area(&self) -> f64 {
        self.width * self.height
    }

    fn perimeter(&self) -> f64 {
        2.0 * (self.width + self.height)
    }

    fn name(&self) -> &'static str {
        if self.is_square() {
            "Square"
        } else {
            "Rectangle"
        }
    }
}

impl ShapeRef for Rectangle {
    fn shape(&self) -> Option<&dyn Shape> {
        Some(self)
    }
}
