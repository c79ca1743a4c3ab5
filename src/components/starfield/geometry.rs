//! Map geometry: loading and parsing the region silhouettes.
//!
//! The map asset is an SVG of named regional boundaries. Only paths whose
//! name belongs to one of the two landmass groups are kept; each survives
//! as a [`kurbo::BezPath`] in source coordinates, ready for the pure
//! winding-number membership test used by the field builder.

use kurbo::{Affine, BezPath, Point, Shape};
use log::{info, warn};
use roxmltree::Document;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// Region names making up the southern landmass.
pub const SOUTH_REGIONS: [&str; 7] = [
	"Southland",
	"Marlborough District",
	"Nelson City",
	"Tasman District",
	"West Coast",
	"Otago",
	"Canterbury",
];

/// Region names making up the northern landmass.
pub const NORTH_REGIONS: [&str; 9] = [
	"Auckland",
	"Waikato",
	"Wellington",
	"Manawatu-Wanganui",
	"Taranaki",
	"Northland",
	"Bay of Plenty",
	"Gisborne District",
	"Hawke's Bay",
];

/// Source-space dimensions assumed when neither asset carries them.
pub const DEFAULT_SOURCE_SIZE: (f64, f64) = (1000.0, 1330.0);

/// Which landmass a region belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Landmass {
	North,
	South,
}

fn classify(name: &str) -> Option<Landmass> {
	if NORTH_REGIONS.contains(&name) {
		Some(Landmass::North)
	} else if SOUTH_REGIONS.contains(&name) {
		Some(Landmass::South)
	} else {
		None
	}
}

/// A single named closed region in source coordinates.
#[derive(Clone, Debug)]
pub struct RegionShape {
	/// Region name as given in the map document.
	pub name: String,
	/// Landmass grouping the name matched.
	pub group: Landmass,
	/// Closed outline in source (SVG) coordinates.
	pub path: BezPath,
}

/// All region shapes parsed from the map document.
#[derive(Clone, Debug, Default)]
pub struct MapShapes {
	/// Kept regions, in document order.
	pub regions: Vec<RegionShape>,
	/// Source-space dimensions from the document's viewBox, if present.
	pub source_size: Option<(f64, f64)>,
}

impl MapShapes {
	/// Parse region shapes out of SVG text.
	///
	/// Any failure degrades to fewer (or zero) shapes rather than an
	/// error: a broken map asset costs visual richness, not the page.
	pub fn parse(text: &str) -> Self {
		let doc = match Document::parse(text) {
			Ok(doc) => doc,
			Err(e) => {
				warn!("southern-sky: failed to parse map document: {e}");
				return Self::default();
			}
		};
		let root = doc.root_element();
		let source_size = parse_source_size(&root);

		let mut regions = Vec::new();
		for node in root.descendants() {
			if !node.is_element() || !node.has_tag_name("path") {
				continue;
			}
			let Some(name) = node.attribute("name").or_else(|| node.attribute("id")) else {
				continue;
			};
			let Some(group) = classify(name) else {
				continue;
			};
			let Some(d) = node.attribute("d") else {
				warn!("southern-sky: region '{name}' has no path data, skipping");
				continue;
			};
			match BezPath::from_svg(d) {
				Ok(path) if !path.elements().is_empty() => {
					regions.push(RegionShape {
						name: name.to_string(),
						group,
						path,
					});
				}
				Ok(_) => {}
				Err(e) => {
					warn!("southern-sky: bad path data for region '{name}': {e}");
				}
			}
		}

		let north = regions.iter().filter(|r| r.group == Landmass::North).count();
		info!(
			"southern-sky: parsed {} region shapes ({} north, {} south)",
			regions.len(),
			north,
			regions.len() - north
		);

		Self {
			regions,
			source_size,
		}
	}

	/// Whether any region shapes were parsed.
	pub fn is_empty(&self) -> bool {
		self.regions.is_empty()
	}

	/// Map every region into canvas space under one placement transform.
	///
	/// The same transform must be used to place outline candidates, so
	/// membership and placement agree for any canvas size.
	pub fn place(&self, transform: Affine) -> PlacedRegions {
		PlacedRegions {
			paths: self
				.regions
				.iter()
				.map(|r| transform * r.path.clone())
				.collect(),
		}
	}
}

/// Region outlines in canvas space, ready for membership tests.
#[derive(Clone, Debug, Default)]
pub struct PlacedRegions {
	paths: Vec<BezPath>,
}

impl PlacedRegions {
	/// True when no region geometry is available.
	pub fn is_empty(&self) -> bool {
		self.paths.is_empty()
	}

	/// Whether a canvas-space point lies inside any region of either
	/// landmass (non-zero winding).
	pub fn contains(&self, x: f64, y: f64) -> bool {
		let pt = Point::new(x, y);
		self.paths.iter().any(|p| p.contains(pt))
	}
}

fn parse_source_size(root: &roxmltree::Node<'_, '_>) -> Option<(f64, f64)> {
	if let Some(vb) = root.attribute("viewBox") {
		let nums: Vec<f64> = vb
			.split_whitespace()
			.filter_map(|s| s.parse().ok())
			.collect();
		if let &[_, _, w, h] = nums.as_slice() {
			if w > 0.0 && h > 0.0 {
				return Some((w, h));
			}
		}
	}
	let w = root.attribute("width").and_then(|s| s.parse().ok())?;
	let h = root.attribute("height").and_then(|s| s.parse().ok())?;
	(w > 0.0 && h > 0.0).then_some((w, h))
}

/// Fetch a static asset as text, resolving to `None` on any failure.
pub async fn fetch_text(url: &str) -> Option<String> {
	let window = web_sys::window()?;
	let response = match JsFuture::from(window.fetch_with_str(url)).await {
		Ok(value) => value,
		Err(e) => {
			warn!("southern-sky: fetch of {url} failed: {e:?}");
			return None;
		}
	};
	let response: Response = response.dyn_into().ok()?;
	if !response.ok() {
		warn!(
			"southern-sky: fetch of {url} returned HTTP {}",
			response.status()
		);
		return None;
	}
	match JsFuture::from(response.text().ok()?).await {
		Ok(value) => value.as_string(),
		Err(e) => {
			warn!("southern-sky: reading body of {url} failed: {e:?}");
			None
		}
	}
}
