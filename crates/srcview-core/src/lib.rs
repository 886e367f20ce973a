//! Highlighting and line-state engine of the srcview source viewer
//!
//! - [`LineStateStore`]: sparse breakpoint and current-line flags
//! - [`GutterModel`]: line-number labels, markers and gutter width
//! - [`DocumentEngine`]: owns the loaded text and ties the pieces together

pub mod engine;
pub mod events;
pub mod gutter;
pub mod line_state;

pub use engine::{DocumentEngine, StyledSegment};
pub use events::EngineEvent;
pub use gutter::{FontMetrics, GutterLine, GutterModel, GutterWidth, Marker, MarkerRect};
pub use line_state::{LineState, LineStateStore};
