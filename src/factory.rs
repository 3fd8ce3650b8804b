//! Construction of boxed shapes from an enumerated kind or from a one-line
//! textual description such as `circle 3.5` or `rectangle 2.0 8.0`.

use std::fmt;
use std::str::{FromStr, SplitWhitespace};

use log::debug;

use crate::circle::Circle;
use crate::collection::ShapeCollection;
use crate::error::{Result, ShapeError};
use crate::rectangle::Rectangle;
use crate::shape::Shape;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Square,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Circle, ShapeKind::Rectangle, ShapeKind::Square];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Square => "square",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self> {
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ShapeError::UnknownKind(s.to_string()))
    }
}

/// Stateless constructor of shapes behind a `Box<dyn Shape>`.
pub struct ShapeFactory;

impl ShapeFactory {
    /// Same as [`ShapeFactory::create_shape`] with a second parameter of 0.
    ///
    /// Only meaningful for circles and squares; a rectangle built this way
    /// fails validation on its zero height.
    pub fn create(kind: ShapeKind, param1: f64) -> Result<Box<dyn Shape>> {
        ShapeFactory::create_shape(kind, param1, 0.0)
    }

    /// `param1` is the radius, the width, or the side of the square.
    /// `param2` is the height and is ignored by the other kinds.
    pub fn create_shape(kind: ShapeKind, param1: f64, param2: f64) -> Result<Box<dyn Shape>> {
        let shape: Box<dyn Shape> = match kind {
            ShapeKind::Circle => Box::new(Circle::new(param1)?),
            ShapeKind::Rectangle => Box::new(Rectangle::new(param1, param2)?),
            ShapeKind::Square => Box::new(Rectangle::square(param1)?),
        };
        debug!("created {} as {}", kind, shape.name());
        Ok(shape)
    }

    /// Parses `<shape> <param>[ <param>]` with whitespace-separated tokens.
    ///
    /// The shape name is case-sensitive (`circle` or `rectangle`). Missing and
    /// malformed numbers are errors; tokens after the last parameter are
    /// ignored.
    pub fn create_from_description(text: &str) -> Result<Box<dyn Shape>> {
        let mut tokens = Tokens::new(text);
        let name = tokens.next().ok_or(ShapeError::EmptyDescription)?;

        let shape: Box<dyn Shape> = match name {
            "circle" => {
                let radius = tokens.number("circle", "radius")?;
                tokens.finish("circle");
                Box::new(Circle::new(radius)?)
            }
            "rectangle" => {
                let width = tokens.number("rectangle", "width")?;
                let height = tokens.number("rectangle", "height")?;
                tokens.finish("rectangle");
                Box::new(Rectangle::new(width, height)?)
            }
            other => return Err(ShapeError::UnknownShape(other.to_string())),
        };

        debug!("parsed {:?} into {:?}", text, shape);
        Ok(shape)
    }

    /// Builds a collection from descriptions, stopping at the first failure.
    pub fn create_collection<I, S>(descriptions: I) -> Result<ShapeCollection>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        descriptions
            .into_iter()
            .map(|text| ShapeFactory::create_from_description(text.as_ref()))
            .collect()
    }
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Tokens {
            inner: text.split_whitespace(),
        }
    }

    fn next(&mut self) -> Option<&'a str> {
        self.inner.next()
    }

    fn number(&mut self, shape: &'static str, parameter: &'static str) -> Result<f64> {
        let token = self
            .next()
            .ok_or(ShapeError::MissingParameter { shape, parameter })?;
        token.parse().map_err(|source| ShapeError::MalformedNumber {
            parameter,
            token: token.to_string(),
            source,
        })
    }

    fn finish(self, shape: &'static str) {
        let rest: Vec<&str> = self.inner.collect();
        if !rest.is_empty() {
            debug!("ignoring surplus tokens after {}: {:?}", shape, rest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("square".parse::<ShapeKind>(), Ok(ShapeKind::Square));
        assert_eq!(
            "Square".parse::<ShapeKind>(),
            Err(ShapeError::UnknownKind("Square".into()))
        );
        for kind in ShapeKind::ALL {
            assert_eq!(kind.to_string().parse::<ShapeKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_create_by_kind() {
        let circle = ShapeFactory::create(ShapeKind::Circle, 7.0).unwrap();
        assert_eq!(circle.name(), "Circle");
        assert_eq!(circle.area(), Circle::area_for_radius(7.0));

        let rect = ShapeFactory::create_shape(ShapeKind::Rectangle, 5.0, 10.0).unwrap();
        assert_eq!(rect.name(), "Rectangle");
        assert_eq!(rect.area(), 50.0);
    }

    #[test]
    fn test_square_uses_single_side() {
        let square = ShapeFactory::create(ShapeKind::Square, 4.0).unwrap();
        assert_eq!(square.name(), "Square");
        assert_eq!(square.area(), 16.0);
        assert_eq!(square.perimeter(), 16.0);

        // second parameter ignored
        let square = ShapeFactory::create_shape(ShapeKind::Square, 4.0, 9.0).unwrap();
        assert_eq!(square.area(), 16.0);
    }

    #[test]
    fn test_rectangle_default_height_fails() {
        assert_eq!(
            ShapeFactory::create(ShapeKind::Rectangle, 5.0).unwrap_err(),
            ShapeError::InvalidDimensions {
                width: 5.0,
                height: 0.0
            }
        );
    }

    #[test]
    fn test_construction_failures_propagate() {
        assert_eq!(
            ShapeFactory::create(ShapeKind::Circle, -1.0).unwrap_err(),
            ShapeError::InvalidRadius(-1.0)
        );
        assert!(ShapeFactory::create(ShapeKind::Square, 0.0).is_err());
    }

    #[test]
    fn test_description_circle() {
        let shape = ShapeFactory::create_from_description("circle 3.5").unwrap();
        assert_eq!(shape.name(), "Circle");
        assert_eq!(shape.area(), Circle::area_for_radius(3.5));
    }

    #[test]
    fn test_description_rectangle() {
        let shape = ShapeFactory::create_from_description("rectangle 2.0 8.0").unwrap();
        assert_eq!(shape.name(), "Rectangle");
        assert_eq!(shape.area(), 16.0);
        assert_eq!(shape.perimeter(), 20.0);
    }

    #[test]
    fn test_description_tolerates_whitespace() {
        let shape = ShapeFactory::create_from_description("  rectangle\t3 \n 3\n").unwrap();
        assert_eq!(shape.name(), "Square");
    }

    #[test]
    fn test_description_unknown_shape() {
        let err = ShapeFactory::create_from_description("triangle 1 2").unwrap_err();
        assert_eq!(err, ShapeError::UnknownShape("triangle".into()));
        assert!(err.is_invalid_argument());

        let err = ShapeFactory::create_from_description("Circle 1").unwrap_err();
        assert_eq!(err, ShapeError::UnknownShape("Circle".into()));
    }

    #[test]
    fn test_description_parse_failures() {
        assert_eq!(
            ShapeFactory::create_from_description("   ").unwrap_err(),
            ShapeError::EmptyDescription
        );
        assert_eq!(
            ShapeFactory::create_from_description("rectangle 2").unwrap_err(),
            ShapeError::MissingParameter {
                shape: "rectangle",
                parameter: "height"
            }
        );
        assert!(matches!(
            ShapeFactory::create_from_description("circle big").unwrap_err(),
            ShapeError::MalformedNumber { parameter: "radius", ref token, .. } if token == "big"
        ));
    }

    #[test]
    fn test_description_ignores_surplus_tokens() {
        let circle = ShapeFactory::create_from_description("circle 3.5 9").unwrap();
        assert_eq!(circle.name(), "Circle");
        assert_eq!(circle.area(), Circle::area_for_radius(3.5));

        let rect = ShapeFactory::create_from_description("rectangle 2 8 1").unwrap();
        assert_eq!(rect.area(), 16.0);
        assert_eq!(rect.perimeter(), 20.0);

        // surplus tokens are not parsed
        assert!(ShapeFactory::create_from_description("circle 1 oops").is_ok());
    }

    #[test]
    fn test_create_collection() {
        let shapes = ShapeFactory::create_collection(["circle 3", "rectangle 4 5"]).unwrap();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes.get(1).map(|s| s.area()), Some(20.0));

        let err = ShapeFactory::create_collection(vec![
            "circle 1".to_string(),
            "hexagon 2".to_string(),
            "circle".to_string(),
        ])
        .unwrap_err();
        assert_eq!(err, ShapeError::UnknownShape("hexagon".into()));
    }

    #[test]
    fn test_description_values_are_validated() {
        assert_eq!(
            ShapeFactory::create_from_description("circle -2").unwrap_err(),
            ShapeError::InvalidRadius(-2.0)
        );
        assert!(ShapeFactory::create_from_description("rectangle 1 nan").is_err());
    }
}
