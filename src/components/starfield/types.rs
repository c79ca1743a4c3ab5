//! Data structures for the pre-generated star candidate asset.

use serde::Deserialize;

/// Dimensions of the source (SVG) coordinate space the candidates live in.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct SvgSize {
	/// Source space width in SVG units.
	pub width: f64,
	/// Source space height in SVG units.
	pub height: f64,
}

/// A single candidate star position in source coordinates.
///
/// Candidates are produced offline by sampling along the map's region
/// boundaries, so transforming one into canvas space yields a point on
/// the drawn outline.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct CandidatePoint {
	/// X coordinate in source (SVG) space.
	pub x: f64,
	/// Y coordinate in source (SVG) space.
	pub y: f64,
}

/// Complete candidate asset: coordinate space metadata plus the point list.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarAsset {
	/// Asset format version. Currently 1.
	pub version: u32,
	/// Coordinate space identifier. The generator emits "svg".
	pub coord_space: String,
	/// Dimensions of the coordinate space `stars` are expressed in.
	pub svg_size: SvgSize,
	/// Number of points the generator was asked for. May differ from
	/// `stars.len()` if generation fell short.
	pub total: usize,
	/// The candidate points themselves.
	pub stars: Vec<CandidatePoint>,
}
