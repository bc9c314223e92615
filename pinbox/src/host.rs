/// Simulated host view and a synthetic text style for the demo
///
/// Stands in for a real UI framework: answers measurement requests from a
/// fixed natural size, stores the filter list, and counts relayout requests.

use log::debug;

use pinbox_core::{EdgeInsets, InputFilter, MeasureHost, MeasureSpec, TextStyle, Typeface};

pub struct SimulatedHost {
    natural_width: u32,
    natural_height: u32,
    baseline: u32,
    insets: EdgeInsets,
    filters: Vec<InputFilter>,
}

impl SimulatedHost {
    pub fn new() -> Self {
        Self {
            natural_width: 60,
            natural_height: 44,
            baseline: 34,
            insets: EdgeInsets {
                start: 4,
                top: 6,
                end: 4,
                bottom: 6,
            },
            filters: Vec::new(),
        }
    }

    pub fn push_filter(&mut self, filter: InputFilter) {
        self.filters.push(filter);
    }

    pub fn filter_list(&self) -> &[InputFilter] {
        &self.filters
    }
}

impl MeasureHost for SimulatedHost {
    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> (u32, u32) {
        let w = match width {
            MeasureSpec::Unspecified => self.natural_width,
            MeasureSpec::AtMost(size) => self.natural_width.min(size),
            MeasureSpec::Exactly(size) => size,
        };
        let h = match height {
            MeasureSpec::Unspecified => self.natural_height,
            MeasureSpec::AtMost(size) => self.natural_height.min(size),
            MeasureSpec::Exactly(size) => size,
        };
        debug!("host measured {}x{}", w, h);
        (w, h)
    }

    fn insets(&self) -> EdgeInsets {
        self.insets
    }

    fn baseline(&self) -> u32 {
        self.baseline
    }

    fn filters(&self) -> Vec<InputFilter> {
        self.filters.clone()
    }

    fn set_filters(&mut self, filters: Vec<InputFilter>) {
        debug!("host filter list reassigned ({} filters)", filters.len());
        self.filters = filters;
    }

    fn request_layout(&mut self) {
        debug!("host relayout requested");
    }

    fn invalidate(&mut self) {
        debug!("host redraw requested");
    }
}

/// Fixed-metrics style used when no system font can be loaded
pub struct SyntheticStyle {
    font_size: f32,
    typeface: Typeface,
    letter_spacing: f32,
}

impl SyntheticStyle {
    pub fn new(font_size: f32) -> Self {
        Self {
            font_size,
            typeface: Typeface::Named("default".to_string()),
            letter_spacing: 0.0,
        }
    }
}

impl TextStyle for SyntheticStyle {
    fn typeface(&self) -> Typeface {
        self.typeface.clone()
    }

    fn set_typeface(&mut self, typeface: Typeface) {
        self.typeface = typeface;
    }

    fn letter_spacing(&self) -> f32 {
        self.letter_spacing
    }

    fn set_letter_spacing(&mut self, em: f32) {
        self.letter_spacing = em;
    }

    fn measure_reference_glyph(&self) -> f32 {
        // Typical monospace aspect ratio
        0.6 * self.font_size + self.letter_spacing * self.font_size
    }
}
