//! Scroll-driven starfield that morphs into the map of New Zealand.
//!
//! Renders a full-viewport canvas of twinkling stars behind the page content:
//! - A random scatter on load, with occasional shooting-star streaks
//! - Scrolling toward the experience section pulls one star population onto
//!   the country's outline, then a second into the region interiors
//! - Geometry assets (outline candidates and region shapes) are fetched at
//!   mount; without them the field degrades to a plain scatter
//!
//! # Example
//!
//! ```ignore
//! use southern_sky::components::starfield::{StarfieldCanvas, Theme};
//!
//! view! {
//!     <StarfieldCanvas anchor_id="experience" theme=Some(Theme::aurora()) />
//! }
//! ```

mod component;
mod field;
mod geometry;
mod progress;
mod render;
mod sprites;
mod state;
mod streaks;
pub mod theme;
mod types;

pub use component::StarfieldCanvas;
pub use field::{DeviceTier, PopulationPreset};
pub use sprites::SpriteCache;
pub use theme::Theme;
pub use types::{CandidatePoint, StarAsset, SvgSize};
