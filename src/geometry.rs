//! Aggregate measurements over sequences of shapes.
//!
//! Empty slots are holes to skip, never errors.

use log::trace;

use crate::collection::ShapeSlot;
use crate::shape::{Shape, ShapeRef};

/// Sum of the areas of every present shape; 0 for an empty sequence.
pub fn total_area(shapes: &[ShapeSlot]) -> f64 {
    let total: f64 = shapes.iter().flatten().map(|shape| shape.area()).sum();
    trace!("total area of {} slots: {}", shapes.len(), total);
    total
}

/// The shape with the strictly greatest perimeter, first one on ties.
///
/// The running maximum starts at 0, so a shape whose perimeter is 0 is never
/// returned. Valid constructors cannot produce one.
pub fn largest_perimeter(shapes: &[ShapeSlot]) -> Option<&dyn Shape> {
    let mut largest: Option<&dyn Shape> = None;
    let mut max_perimeter = 0.0;

    for shape in shapes.iter().flatten() {
        let perimeter = shape.perimeter();
        if perimeter > max_perimeter {
            max_perimeter = perimeter;
            largest = Some(&**shape);
        }
    }

    trace!("largest perimeter: {}", max_perimeter);
    largest
}

/// Sum of present areas divided by the number of elements, holes included.
///
/// Works over any homogeneous sequence: concrete variants, boxed shapes,
/// references, or optional slots. 0 for an empty sequence.
pub fn average_area<T: ShapeRef>(shapes: &[T]) -> f64 {
    if shapes.is_empty() {
        return 0.0;
    }
    let sum: f64 = shapes
        .iter()
        .filter_map(|item| item.shape())
        .map(|shape| shape.area())
        .sum();
    sum / shapes.len() as f64
}
