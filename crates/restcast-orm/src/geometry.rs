//! Spatial values and their GeoJSON form

use serde_json::{Value, json};
use std::fmt;

/// A planar coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
	pub x: f64,
	pub y: f64,
}

impl Coord {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	fn to_json(self) -> Value {
		json!([self.x, self.y])
	}
}

impl From<(f64, f64)> for Coord {
	fn from((x, y): (f64, f64)) -> Self {
		Self::new(x, y)
	}
}

/// Value held by a geometry field
///
/// # Examples
///
/// ```
/// use restcast_orm::{Coord, Geometry};
/// use serde_json::json;
///
/// let point = Geometry::point(Coord::new(2.35, 48.85)).with_srid(4326);
/// assert_eq!(point.srid(), Some(4326));
/// assert_eq!(point.to_geojson(), json!({"type": "Point", "coordinates": [2.35, 48.85]}));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
	shape: Shape,
	srid: Option<u32>,
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
	Point(Coord),
	LineString(Vec<Coord>),
	/// Exterior ring first, then holes
	Polygon(Vec<Vec<Coord>>),
	MultiPoint(Vec<Coord>),
}

impl Geometry {
	pub fn new(shape: Shape) -> Self {
		Self { shape, srid: None }
	}

	pub fn point(coord: Coord) -> Self {
		Self::new(Shape::Point(coord))
	}

	pub fn line_string(coords: impl IntoIterator<Item = Coord>) -> Self {
		Self::new(Shape::LineString(coords.into_iter().collect()))
	}

	pub fn polygon(rings: impl IntoIterator<Item = Vec<Coord>>) -> Self {
		Self::new(Shape::Polygon(rings.into_iter().collect()))
	}

	pub fn multi_point(coords: impl IntoIterator<Item = Coord>) -> Self {
		Self::new(Shape::MultiPoint(coords.into_iter().collect()))
	}

	/// Attach a spatial reference identifier
	pub fn with_srid(mut self, srid: u32) -> Self {
		self.srid = Some(srid);
		self
	}

	pub fn srid(&self) -> Option<u32> {
		self.srid
	}

	pub fn shape(&self) -> &Shape {
		&self.shape
	}

	/// GeoJSON type name
	pub fn geom_type(&self) -> &'static str {
		match self.shape {
			Shape::Point(_) => "Point",
			Shape::LineString(_) => "LineString",
			Shape::Polygon(_) => "Polygon",
			Shape::MultiPoint(_) => "MultiPoint",
		}
	}

	/// GeoJSON object for this geometry, as primitives
	pub fn to_geojson(&self) -> Value {
		let coordinates = match &self.shape {
			Shape::Point(c) => c.to_json(),
			Shape::LineString(cs) | Shape::MultiPoint(cs) => coords_json(cs),
			Shape::Polygon(rings) => Value::Array(rings.iter().map(|r| coords_json(r)).collect()),
		};
		json!({
			"type": self.geom_type(),
			"coordinates": coordinates,
		})
	}
}

fn coords_json(coords: &[Coord]) -> Value {
	Value::Array(coords.iter().map(|c| c.to_json()).collect())
}

impl fmt::Display for Geometry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if let Some(srid) = self.srid {
			write!(f, "SRID={};", srid)?;
		}
		write!(f, "{}", self.to_geojson())
	}
}
