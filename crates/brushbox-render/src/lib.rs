//! Brushbox Render Library
//!
//! A display-list implementation of the core [`Surface`](brushbox_core::Surface)
//! trait. Every primitive the scene issues is turned into a kurbo path in
//! surface coordinates and recorded, ready to be replayed by a GPU or
//! canvas backend, or inspected in tests.

mod display_list;
mod path_surface;

pub use display_list::{DisplayList, DrawCommand};
pub use path_surface::{PathSurface, RenderError};
