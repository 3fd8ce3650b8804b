use std::fmt;

/// Decimal places used by [`Describe::describe`].
pub const DEFAULT_PRECISION: usize = 2;

/// The capability set shared by every shape variant.
///
/// Variants supply the three measurements; the printable summary comes from
/// [`Describe`].
pub trait Shape: fmt::Debug {
    /// Closed-form area, never negative.
    fn area(&self) -> f64;

    /// Closed-form perimeter, never negative.
    fn perimeter(&self) -> f64;

    /// Human-readable variant label, computed from the current state.
    fn name(&self) -> &'static str;
}

/// One-line summary of any shape, built from its measurements.
///
/// Implemented once for every [`Shape`]; variants cannot override it.
pub trait Describe {
    fn describe(&self) -> String;

    fn describe_with(&self, precision: usize) -> String;
}

impl<S: Shape + ?Sized> Describe for S {
    fn describe(&self) -> String {
        self.describe_with(DEFAULT_PRECISION)
    }

    fn describe_with(&self, precision: usize) -> String {
        format!(
            "Shape: {} | Area: {:.prec$} | Perimeter: {:.prec$}",
            self.name(),
            self.area(),
            self.perimeter(),
            prec = precision
        )
    }
}

/// Anything that may hold a shape: a concrete variant, a boxed shape, a
/// reference to one, or an empty slot.
pub trait ShapeRef {
    fn shape(&self) -> Option<&dyn Shape>;
}

impl ShapeRef for Box<dyn Shape> {
    fn shape(&self) -> Option<&dyn Shape> {
        Some(self.as_ref())
    }
}

impl<T: ShapeRef> ShapeRef for Option<T> {
    fn shape(&self) -> Option<&dyn Shape> {
        self.as_ref().and_then(|inner| inner.shape())
    }
}

impl<T: ShapeRef + ?Sized> ShapeRef for &T {
    fn shape(&self) -> Option<&dyn Shape> {
        (**self).shape()
    }
}
