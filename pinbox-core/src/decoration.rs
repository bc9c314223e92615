/// Decoration callback surface and the reference underline renderer
///
/// The controller pushes geometry and slot-count changes to an attached
/// decoration through [`DecorationCallback`]; the two notifications are
/// separate so a renderer can tell "the box got wider" apart from "the box
/// now represents a different number of characters".

use log::debug;

use crate::constants::BASELINE_GAP_PX;
use crate::error::LayoutError;
use crate::slots::{slots, EdgeInsets, LayoutGeometry};

/// Capability implemented by a background/decoration renderer
pub trait DecorationCallback {
    /// Fired when a measurement pass resolves a new usable geometry
    fn on_measure_changed(&mut self, width: u32, height: u32, insets: EdgeInsets);

    /// Fired when the number of input slots changes
    fn on_code_length_changed(&mut self, length: usize);
}

/// One horizontal line to draw beneath a character slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start_x: f32,
    pub end_x: f32,
    pub y: f32,
}

/// Resolved geometry held by the underline renderer between callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Measured {
    width: u32,
    start: u32,
    total_height: u32,
}

/// Reference renderer: one underline tick per slot
///
/// Draws `count` horizontal marks near the bottom of the usable rectangle,
/// each inset by `padding` from its slot edges. Until both a measurement and
/// a code length have arrived, nothing is drawn.
pub struct UnderlineDecoration {
    measured: Option<Measured>,
    count: Option<usize>,
    padding: f32,
    dirty: bool,
}

impl UnderlineDecoration {
    pub fn new(padding: f32) -> Result<Self, LayoutError> {
        if !(padding >= 0.0) {
            return Err(LayoutError::InvalidPadding(padding));
        }
        Ok(Self {
            measured: None,
            count: None,
            padding,
            dirty: false,
        })
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    /// Change the slot padding; negative values fail fast
    pub fn set_padding(&mut self, padding: f32) -> Result<(), LayoutError> {
        if !(padding >= 0.0) {
            return Err(LayoutError::InvalidPadding(padding));
        }
        if self.padding != padding {
            self.padding = padding;
            self.dirty = true;
        }
        Ok(())
    }

    /// Whether a redraw is pending; reading clears the flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Compute the line segments to draw for the current state
    ///
    /// With zero slots the degenerate fallback is a single bare line spanning
    /// the whole available width. With zero padding the adjoining per-slot
    /// marks merge into the same single line, which is behaviorally
    /// equivalent to drawing each slot back-to-back.
    pub fn segments(&self) -> Vec<Segment> {
        let (measured, count) = match (self.measured, self.count) {
            (Some(m), Some(c)) if m.width > 0 => (m, c),
            _ => return Vec::new(),
        };

        let y = measured.total_height as f32 - BASELINE_GAP_PX;
        let x = measured.start as f32;

        if count == 0 || self.padding == 0.0 {
            return vec![Segment {
                start_x: x,
                end_x: x + measured.width as f32,
                y,
            }];
        }

        let geometry = LayoutGeometry {
            available_width: measured.width,
            slot_count: count,
            insets: EdgeInsets {
                start: measured.start,
                ..EdgeInsets::default()
            },
        };

        slots(&geometry, self.padding)
            .map(|slot| Segment {
                start_x: slot.start_x,
                end_x: slot.end_x,
                y,
            })
            .collect()
    }
}

impl DecorationCallback for UnderlineDecoration {
    fn on_measure_changed(&mut self, width: u32, height: u32, insets: EdgeInsets) {
        let measured = Measured {
            width,
            start: insets.start,
            total_height: insets.top + height + insets.bottom,
        };
        if self.measured != Some(measured) {
            debug!("underline geometry changed: {:?}", measured);
            self.measured = Some(measured);
            self.dirty = true;
        }
    }

    fn on_code_length_changed(&mut self, length: usize) {
        if self.count != Some(length) {
            self.count = Some(length);
            self.dirty = true;
        }
    }
}
