//! Leptos component wrapping the starfield canvas.
//!
//! The component mounts a fixed, full-viewport canvas behind the page
//! content, fetches the star candidate and map geometry assets, and runs
//! an animation loop via `requestAnimationFrame`. Window scroll drives the
//! morph progress; window resize re-fits the map and rebuilds the field.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use super::field::{self, DeviceTier};
use super::geometry::{self, DEFAULT_SOURCE_SIZE, MapShapes};
use super::progress::ScrollTriggers;
use super::render;
use super::sprites::SpriteCache;
use super::state::StarfieldState;
use super::theme::Theme;
use super::types::StarAsset;

/// Remote geometry, filled in as fetches complete.
#[derive(Default)]
struct GeometryStore {
	stars: Option<StarAsset>,
	shapes: Option<MapShapes>,
}

impl GeometryStore {
	/// Source-space dimensions, preferring the candidate asset's own
	/// metadata over the map document's viewBox.
	fn source_size(&self) -> (f64, f64) {
		self.stars
			.as_ref()
			.map(|a| (a.svg_size.width, a.svg_size.height))
			.filter(|&(w, h)| w > 0.0 && h > 0.0)
			.or_else(|| self.shapes.as_ref().and_then(|s| s.source_size))
			.unwrap_or(DEFAULT_SOURCE_SIZE)
	}
}

/// Bundles animation state with visual configuration and loaded geometry.
struct StarfieldContext {
	state: StarfieldState,
	theme: Theme,
	sprites: SpriteCache,
	geometry: GeometryStore,
}

/// Rebuild the star field from whatever geometry has arrived so far.
///
/// The new population is built aside and swapped in whole, so a frame
/// rendered mid-rebuild still sees a consistent field.
fn rebuild_field(c: &mut StarfieldContext) {
	let candidates = c
		.geometry
		.stars
		.as_ref()
		.map(|a| a.stars.as_slice())
		.unwrap_or(&[]);
	let empty = MapShapes::default();
	let shapes = c.geometry.shapes.as_ref().unwrap_or(&empty);
	let points = field::build_field(
		candidates,
		c.geometry.source_size(),
		shapes,
		c.state.width,
		c.state.height,
		c.state.tier,
		&mut rand::thread_rng(),
	);
	info!(
		"southern-sky: field rebuilt with {} stars at {}x{}",
		points.len(),
		c.state.width,
		c.state.height
	);
	c.state.replace_points(points);
}

/// Derive the two scroll trigger ranges from the current document layout.
fn measure_triggers(document: &Document, window: &Window, anchor_id: &str) -> ScrollTriggers {
	let scroll_y = window.scroll_y().unwrap_or(0.0);
	let viewport_h = window
		.inner_height()
		.ok()
		.and_then(|v| v.as_f64())
		.unwrap_or(0.0);
	let doc_h = document
		.document_element()
		.map(|el| el.scroll_height() as f64)
		.unwrap_or(viewport_h);
	let anchor_mid = document.get_element_by_id(anchor_id).map(|el| {
		let rect = el.get_bounding_client_rect();
		rect.top() + scroll_y + rect.height() / 2.0
	});
	if anchor_mid.is_none() {
		warn!("southern-sky: no element with id \"{anchor_id}\"; scroll morph disabled");
	}
	ScrollTriggers::from_anchor(anchor_mid, viewport_h, doc_h)
}

/// Renders the scroll-driven starfield on a full-viewport canvas.
///
/// The canvas is fixed behind the page content and ignores pointer events.
/// Stars begin as a random scatter and morph into the map outline, then
/// its interior, as the user scrolls toward the element named by
/// `anchor_id`. Both geometry assets are fetched at mount; until they
/// arrive (or if they never do) the component degrades to a plain
/// twinkling scatter.
#[component]
pub fn StarfieldCanvas(
	#[prop(default = "nz_stars.json")] stars_url: &'static str,
	#[prop(default = "nz.svg")] map_url: &'static str,
	#[prop(default = "experience")] anchor_id: &'static str,
	#[prop(default = None)] theme: Option<Theme>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<StarfieldContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let scroll_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let raf_id: Rc<Cell<i32>> = Rc::new(Cell::new(0));
	let (context_init, animate_init, scroll_cb_init, resize_cb_init, raf_id_init) = (
		context.clone(),
		animate.clone(),
		scroll_cb.clone(),
		resize_cb.clone(),
		raf_id.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if context_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();
		let document = window.document().unwrap();

		let (w, h) = (
			window.inner_width().unwrap().as_f64().unwrap(),
			window.inner_height().unwrap().as_f64().unwrap(),
		);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		let tier = DeviceTier::detect();
		let theme = theme.clone().unwrap_or_default();
		info!("southern-sky: starting with theme \"{}\" on {tier:?}", theme.name);

		*context_init.borrow_mut() = Some(StarfieldContext {
			state: StarfieldState::new(w, h, tier),
			theme,
			sprites: SpriteCache::new(),
			geometry: GeometryStore::default(),
		});
		if let Some(ref mut c) = *context_init.borrow_mut() {
			let scroll_y = window.scroll_y().unwrap_or(0.0);
			c.state
				.set_triggers(measure_triggers(&document, &window, anchor_id), scroll_y);
			// First field has no geometry yet: a pure scatter.
			rebuild_field(c);
		}

		let context_stars = context_init.clone();
		spawn_local(async move {
			let started = js_sys::Date::now();
			let Some(text) = geometry::fetch_text(stars_url).await else {
				warn!("southern-sky: star candidates unavailable at {stars_url}");
				return;
			};
			match serde_json::from_str::<StarAsset>(&text) {
				Ok(asset) => {
					if let Some(ref mut c) = *context_stars.borrow_mut() {
						info!(
							"southern-sky: loaded {} outline candidates in {:.0}ms",
							asset.stars.len(),
							js_sys::Date::now() - started
						);
						c.geometry.stars = Some(asset);
						rebuild_field(c);
					}
				}
				Err(e) => warn!("southern-sky: star candidate JSON invalid: {e}"),
			}
		});

		let context_map = context_init.clone();
		spawn_local(async move {
			let Some(text) = geometry::fetch_text(map_url).await else {
				warn!("southern-sky: map geometry unavailable at {map_url}");
				return;
			};
			let shapes = MapShapes::parse(&text);
			if shapes.is_empty() {
				warn!("southern-sky: map document contained no usable regions");
				return;
			}
			if let Some(ref mut c) = *context_map.borrow_mut() {
				c.geometry.shapes = Some(shapes);
				rebuild_field(c);
			}
		});

		let context_scroll = context_init.clone();
		*scroll_cb_init.borrow_mut() = Some(Closure::new(move || {
			let win: Window = web_sys::window().unwrap();
			let y = win.scroll_y().unwrap_or(0.0);
			if let Some(ref mut c) = *context_scroll.borrow_mut() {
				c.state.set_scroll(y);
			}
		}));
		if let Some(ref cb) = *scroll_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("scroll", cb.as_ref().unchecked_ref());
		}

		let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let win: Window = web_sys::window().unwrap();
			let (nw, nh) = (
				win.inner_width().unwrap().as_f64().unwrap(),
				win.inner_height().unwrap().as_f64().unwrap(),
			);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			let Some(doc) = win.document() else {
				return;
			};
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.state.resize(nw, nh);
				let scroll_y = win.scroll_y().unwrap_or(0.0);
				c.state
					.set_triggers(measure_triggers(&doc, &win, anchor_id), scroll_y);
				rebuild_field(c);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (context_anim, animate_inner, raf_inner) = (
			context_init.clone(),
			animate_init.clone(),
			raf_id_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			{
				let mut guard = context_anim.borrow_mut();
				// Teardown cleared the context; the loop ends here.
				let Some(ref mut c) = *guard else {
					return;
				};
				let dt = 0.016;
				let mut rng = rand::thread_rng();
				c.state.tick(dt, &mut rng);
				render::render(&c.state, &ctx, &c.theme, &mut c.sprites, &document);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Ok(id) = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref())
				{
					raf_inner.set(id);
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				raf_id_init.set(id);
			}
		}
	});

	// `on_cleanup` demands a `Send + Sync` closure, which the `Rc` handles
	// cannot satisfy; a `LocalStorage` slot's handle can, so park them there
	// and take them back out when the cleanup actually runs.
	let cleanup_state = StoredValue::new_local((
		context.clone(),
		animate.clone(),
		scroll_cb.clone(),
		resize_cb.clone(),
		raf_id.clone(),
	));
	on_cleanup(move || {
		let (context_drop, animate_drop, scroll_drop, resize_drop, raf_drop) =
			cleanup_state.get_value();
		if let Some(window) = web_sys::window() {
			if let Some(ref cb) = *scroll_drop.borrow() {
				let _ = window
					.remove_event_listener_with_callback("scroll", cb.as_ref().unchecked_ref());
			}
			if let Some(ref cb) = *resize_drop.borrow() {
				let _ = window
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
			let _ = window.cancel_animation_frame(raf_drop.get());
		}
		{
			let mut guard = context_drop.borrow_mut();
			if let Some(ref mut c) = *guard {
				c.sprites.clear();
			}
			*guard = None;
		}
		*animate_drop.borrow_mut() = None;
		*scroll_drop.borrow_mut() = None;
		*resize_drop.borrow_mut() = None;
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="starfield-canvas"
			style="position: fixed; inset: 0; z-index: 0; display: block; pointer-events: none;"
		/>
	}
}
