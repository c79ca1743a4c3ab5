//! Leptos components.

pub mod starfield;
