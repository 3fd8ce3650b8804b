use colored::Colorize;

use crate::collection::ShapeCollection;
use crate::geometry::{average_area, largest_perimeter, total_area};
use crate::shape::{Describe, Shape};

/// Renders report lines, optionally with terminal colors.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    pub precision: usize,
    pub color: bool,
}

impl Renderer {
    pub fn new(precision: usize, color: bool) -> Self {
        Renderer { precision, color }
    }

    pub fn heading(&self, title: &str) -> String {
        let line = format!("=== {} ===", title.to_uppercase());
        if self.color {
            line.bold().cyan().to_string()
        } else {
            line
        }
    }

    pub fn shape(&self, shape: &dyn Shape) -> String {
        shape.describe_with(self.precision)
    }

    pub fn value(&self, label: &str, value: f64) -> String {
        format!("{}: {:.prec$}", label, value, prec = self.precision)
    }

    pub fn error(&self, message: &str) -> String {
        let line = format!("Caught error: {}", message);
        if self.color {
            line.red().to_string()
        } else {
            line
        }
    }

    pub fn summary(&self, summary: &Summary) -> Vec<String> {
        let mut lines = vec![
            format!("Shapes: {} ({} present)", summary.slots, summary.present),
            self.value("Total area of all shapes", summary.total_area),
        ];
        match &summary.largest {
            Some(description) => lines.push(format!("Shape with largest perimeter: {}", description)),
            None => lines.push("Shape with largest perimeter: none".to_string()),
        }
        lines.push(self.value("Average area", summary.average_area));
        lines
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::new(crate::shape::DEFAULT_PRECISION, false)
    }
}

/// The utility measurements of one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub slots: usize,
    pub present: usize,
    pub total_area: f64,
    pub average_area: f64,
    /// Description of the shape with the largest perimeter.
    pub largest: Option<String>,
}

impl Summary {
    pub fn of(shapes: &ShapeCollection, precision: usize) -> Self {
        Summary {
            slots: shapes.len(),
            present: shapes.present_count(),
            total_area: total_area(shapes),
            average_area: average_area(&shapes[..]),
            largest: largest_perimeter(shapes).map(|shape| shape.describe_with(precision)),
        }
    }
}
