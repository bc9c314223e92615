pub mod config;
pub mod constants;
pub mod controller;
pub mod decoration;
pub mod error;
pub mod filters;
pub mod font;
pub mod slots;
pub mod spacing;
pub mod style;

pub use config::Config;
pub use controller::{CodeBoxController, MeasureHost, MeasureSpec, SharedDecoration};
pub use decoration::{DecorationCallback, Segment, UnderlineDecoration};
pub use error::LayoutError;
pub use filters::{accepts_all, is_satisfied, reconcile, InputFilter, InputRule};
pub use font::FontMeasurer;
pub use slots::{slot, slots, EdgeInsets, LayoutGeometry, Slot};
pub use spacing::{justifying_spacing, GlyphMetrics};
pub use style::{calibrate, TextStyle, Typeface};
