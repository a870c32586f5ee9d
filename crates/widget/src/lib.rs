//! Widget presentation layer.
//!
//! The UI is reached only through the [`UiSink`](sink::UiSink) trait.
//! [`Document`](document::Document) is the in-process implementation
//! backed by the embedded markup; [`StateProjector`](projector::StateProjector)
//! turns hub readings into element updates.

pub mod assets;
pub mod document;
pub mod projector;
pub mod sink;

pub use document::{Document, ElementState};
pub use projector::{Projection, StateProjector, WidgetBinding};
pub use sink::{UiElement, UiSink};
