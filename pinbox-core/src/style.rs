/// Text style capability: the shared paint the host measures and draws with
///
/// Calibration and desired-width measurement need to temporarily force a
/// typeface or letter spacing onto the shared style, take a measurement, and
/// put the prior value back before anything else reads it. The scoped helpers
/// below guarantee the restore on exit, including early returns from the
/// closure body.

use crate::spacing::GlyphMetrics;

/// Logical typeface selection on the shared style
///
/// Calibration always forces `Monospace`; the spacing algebra assumes the
/// reference glyph advance is invariant under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Typeface {
    Monospace,
    Named(String),
}

/// The measurement/paint provider the controller is composed with
///
/// `typeface` and `letter_spacing` are shared mutable state: they drive both
/// measurement and the host's rendering, so every temporary mutation must be
/// scoped.
pub trait TextStyle {
    fn typeface(&self) -> Typeface;
    fn set_typeface(&mut self, typeface: Typeface);

    /// Current letter spacing in em units
    fn letter_spacing(&self) -> f32;
    fn set_letter_spacing(&mut self, em: f32);

    /// Pixel advance of the reference glyph under the current typeface and
    /// letter spacing
    fn measure_reference_glyph(&self) -> f32;
}

/// Run `compute` with the typeface temporarily replaced, restoring the prior
/// typeface afterwards
pub fn with_typeface<S, T>(style: &mut S, typeface: Typeface, compute: impl FnOnce(&mut S) -> T) -> T
where
    S: TextStyle + ?Sized,
{
    let prior = style.typeface();
    style.set_typeface(typeface);
    let result = compute(style);
    style.set_typeface(prior);
    result
}

/// Run `compute` with the letter spacing temporarily replaced, restoring the
/// prior spacing afterwards
pub fn with_letter_spacing<S, T>(style: &mut S, em: f32, compute: impl FnOnce(&mut S) -> T) -> T
where
    S: TextStyle + ?Sized,
{
    let prior = style.letter_spacing();
    style.set_letter_spacing(em);
    let result = compute(style);
    style.set_letter_spacing(prior);
    result
}

/// Measure the two calibration samples under the reference typeface
///
/// Leaves the style exactly as found. Called fresh on every spacing
/// derivation; the samples are never cached across typeface changes.
pub fn calibrate<S>(style: &mut S) -> GlyphMetrics
where
    S: TextStyle + ?Sized,
{
    with_typeface(style, Typeface::Monospace, |style| {
        let em_at_zero_spacing =
            with_letter_spacing(style, 0.0, |style| style.measure_reference_glyph());
        let em_at_unit_spacing =
            with_letter_spacing(style, 1.0, |style| style.measure_reference_glyph());

        GlyphMetrics {
            em_at_zero_spacing,
            em_at_unit_spacing,
        }
    })
}
