/// Letter-spacing justification for a fixed-length monospace string
///
/// Given two calibration measurements of the reference glyph (advance at
/// letter spacing 0.0 em and 1.0 em), solves algebraically for the extra
/// spacing that makes exactly `slot_count` glyphs fill the available width
/// edge-to-edge.

use crate::constants::EDGE_INSET_PX;

/// Calibration samples for the reference monospace glyph
///
/// Both fields are pixel advances of the same glyph under the reference
/// typeface, measured at letter spacing 0.0 and 1.0 em. Recomputed on demand
/// each time spacing must be derived; never cached across typeface changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    pub em_at_zero_spacing: f32,
    pub em_at_unit_spacing: f32,
}

impl GlyphMetrics {
    /// Pixel width contributed by one em of letter spacing
    ///
    /// Strictly positive for any real font: spacing increases the advance.
    pub fn spacing_span(&self) -> f32 {
        self.em_at_unit_spacing - self.em_at_zero_spacing
    }
}

/// Compute the letter spacing (em units) that justifies `slot_count` glyphs
/// across `available_width_px`
///
/// A small fixed inset is reserved at the edge for the cursor. The result is
/// clamped to 0.0 when the available width is smaller than the natural
/// unspaced text width; negative letter spacing is never requested.
///
/// `slot_count == 0` is handled as a distinct case and yields 0.0; callers
/// must branch on zero slots before relying on the value.
pub fn justifying_spacing(
    available_width_px: f32,
    slot_count: usize,
    metrics: &GlyphMetrics,
) -> f32 {
    if slot_count == 0 {
        return 0.0;
    }

    let em1 = metrics.em_at_zero_spacing;
    let count = slot_count as f32;

    let usable_width = available_width_px - EDGE_INSET_PX;
    let per_char_extra_px = (usable_width - count * em1) / count;

    // Calibration ratio converting pixels of extra advance to em units
    let em_per_px = 1.0 / metrics.spacing_span();

    let spacing_ems = per_char_extra_px * em_per_px;

    if spacing_ems >= 0.0 {
        spacing_ems
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> GlyphMetrics {
        GlyphMetrics {
            em_at_zero_spacing: 8.0,
            em_at_unit_spacing: 22.0,
        }
    }

    #[test]
    fn test_spacing_never_negative() {
        // Width far too small for four glyphs - must clamp, not go negative
        let m = metrics();
        for width in [0.0, 1.0, 10.0, 4.0 * 8.0, 4.0 * 8.0 + EDGE_INSET_PX] {
            let spacing = justifying_spacing(width, 4, &m);
            assert!(spacing >= 0.0, "width {} gave {}", width, spacing);
        }
    }

    #[test]
    fn test_spacing_round_trip() {
        // Forward advance formula: width = inset + n*em1 + n*(em2-em1)*s
        let m = metrics();
        let expected = 0.75_f32;
        let count = 6;
        let width = EDGE_INSET_PX
            + count as f32 * m.em_at_zero_spacing
            + count as f32 * m.spacing_span() * expected;

        let spacing = justifying_spacing(width, count, &m);
        assert!((spacing - expected).abs() < 1e-5, "got {}", spacing);
    }

    #[test]
    fn test_spacing_exact_fit_is_zero() {
        // Width exactly the natural unspaced text width plus the edge inset
        let m = metrics();
        let width = EDGE_INSET_PX + 4.0 * m.em_at_zero_spacing;
        assert_eq!(justifying_spacing(width, 4, &m), 0.0);
    }

    #[test]
    fn test_zero_slots_is_handled() {
        // No slots configured yet - explicit zero, no arithmetic fault
        assert_eq!(justifying_spacing(100.0, 0, &metrics()), 0.0);
    }

    #[test]
    fn test_spacing_span() {
        assert_eq!(metrics().spacing_span(), 14.0);
    }
}
