//! Shapes - trait objects, a factory and aggregate utilities
//!
//! A small polymorphism exercise: every shape variant implements the
//! [`Shape`] capability set, a [`ShapeFactory`] builds boxed shapes from a
//! kind or a one-line description, and [`geometry`] measures whole
//! collections. The [`tour`] module is a narrated walk through ownership,
//! borrowing and smart pointers.
//!
//! ```
//! use shapes::{geometry, ShapeCollection, ShapeFactory};
//!
//! let shapes: ShapeCollection = ["circle 3", "rectangle 4 5"]
//!     .into_iter()
//!     .map(ShapeFactory::create_from_description)
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(geometry::total_area(&shapes), std::f64::consts::PI * 3.0 * 3.0 + 20.0);
//! ```
//!
//! Run the driver with:
//! ```bash
//! cargo run --bin shapes -- demo
//! ```

pub mod circle;
pub mod collection;
pub mod config;
pub mod error;
pub mod factory;
pub mod geometry;
pub mod rectangle;
pub mod report;
pub mod shape;
pub mod tour;

pub use circle::Circle;
pub use collection::{ShapeCollection, ShapeSlot};
pub use config::{ConfigError, Settings};
pub use error::{Result, ShapeError};
pub use factory::{ShapeFactory, ShapeKind};
pub use rectangle::Rectangle;
pub use shape::{Describe, Shape, ShapeRef};
