/// Code-box composition root
///
/// Orchestrates spacing, slot geometry and filter reconciliation over the
/// host view's measure/draw callbacks. All externally observable effects are
/// change-gated: an unchanged code length triggers no filter reassignment and
/// no decoration callback, and geometry is only pushed when it differs from
/// the last notified value.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};

use crate::config::Config;
use crate::constants::MAX_DEFERRED_PASSES;
use crate::decoration::DecorationCallback;
use crate::error::LayoutError;
use crate::filters::{reconcile, InputFilter};
use crate::slots::EdgeInsets;
use crate::spacing::justifying_spacing;
use crate::style::{calibrate, with_letter_spacing, with_typeface, TextStyle, Typeface};

/// Width/height constraint handed down by the host layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureSpec {
    /// The host imposes no bound; the box may take its desired size
    Unspecified,
    /// The box may take up to the given size
    AtMost(u32),
    /// The box must take exactly the given size
    Exactly(u32),
}

/// The host view the controller is composed with
///
/// Covers the measurement pass, the filter list, and invalidation/relayout
/// scheduling. Implementations are expected to call back into the controller
/// from their own measure/pre-draw/filter hooks.
pub trait MeasureHost {
    /// The host's own measurement (the base-class pass); may be called twice
    /// within one layout when the controller negotiates a wider box
    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> (u32, u32);

    /// Compound padding around the text area
    fn insets(&self) -> EdgeInsets;

    /// Distance from the top of the measured box to the text baseline
    fn baseline(&self) -> u32;

    fn filters(&self) -> Vec<InputFilter>;
    fn set_filters(&mut self, filters: Vec<InputFilter>);

    fn request_layout(&mut self);
    fn invalidate(&mut self);
}

/// Decorations are shared with the host's draw path, single-threaded
pub type SharedDecoration = Rc<RefCell<dyn DecorationCallback>>;

pub struct CodeBoxController {
    code_length: usize,
    min_letter_spacing: f32,
    unpadded_width: Option<u32>,
    last_geometry: Option<(u32, u32, EdgeInsets)>,
    deferred_passes: u32,
    decoration: Option<SharedDecoration>,
}

impl CodeBoxController {
    /// Build a controller from configuration
    ///
    /// A code length of zero is rejected here as well as in the setter: zero
    /// is a valid degenerate state for slot rendering, but never a valid
    /// length-filter target.
    pub fn new(config: &Config) -> Result<Self, LayoutError> {
        if config.input.code_length == 0 {
            return Err(LayoutError::InvalidCodeLength(config.input.code_length));
        }

        Ok(Self {
            code_length: config.input.code_length,
            min_letter_spacing: config.input.min_letter_spacing,
            unpadded_width: None,
            last_geometry: None,
            deferred_passes: 0,
            decoration: None,
        })
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }

    pub fn min_letter_spacing(&self) -> f32 {
        self.min_letter_spacing
    }

    /// Change the number of input slots
    ///
    /// Setting the current value again is a complete no-op: no filter
    /// reassignment, no decoration callback, no relayout. Zero fails fast and
    /// leaves every piece of prior state untouched.
    pub fn set_code_length(
        &mut self,
        length: usize,
        host: &mut dyn MeasureHost,
    ) -> Result<(), LayoutError> {
        if length == self.code_length {
            return Ok(());
        }
        if length == 0 {
            return Err(LayoutError::InvalidCodeLength(length));
        }

        self.code_length = length;
        self.sync_filters(host);

        if let Some(decoration) = &self.decoration {
            decoration.borrow_mut().on_code_length_changed(length);
        }

        host.request_layout();
        host.invalidate();
        Ok(())
    }

    /// Change the spacing floor used for desired-width measurement
    pub fn set_min_letter_spacing(&mut self, value: f32, host: &mut dyn MeasureHost) {
        if self.min_letter_spacing != value {
            self.min_letter_spacing = value;
            host.request_layout();
            host.invalidate();
        }
    }

    /// Bring the host's filter list in line with the current code length
    ///
    /// Also the hook the host calls whenever external code assigns filters.
    /// Reassigns at most once: a satisfied list reconciles to `None`, so the
    /// reassignment this triggers cannot loop back into another one.
    pub fn sync_filters(&self, host: &mut dyn MeasureHost) {
        if let Some(new) = reconcile(&host.filters(), self.code_length) {
            debug!("reassigning {} filters for code length {}", new.len(), self.code_length);
            host.set_filters(new);
        }
    }

    /// Attach a decoration renderer, immediately pushing the current slot
    /// count to it
    pub fn set_decoration(&mut self, decoration: SharedDecoration) {
        decoration.borrow_mut().on_code_length_changed(self.code_length);
        self.decoration = Some(decoration);
    }

    pub fn decoration(&self) -> Option<&SharedDecoration> {
        self.decoration.as_ref()
    }

    /// Natural width the box asks for: all slots at the minimum spacing
    pub fn desired_width(&self, style: &mut dyn TextStyle) -> u32 {
        let char_width = with_letter_spacing(style, self.min_letter_spacing, |style| {
            with_typeface(style, Typeface::Monospace, |style| {
                style.measure_reference_glyph()
            })
        });
        (char_width * self.code_length as f32).ceil() as u32
    }

    /// Run one measurement pass
    ///
    /// Performs the host's base measurement, widens to the desired width with
    /// an `Exactly` re-measure when the host granted less (clamped to an
    /// `AtMost` bound), then derives the unpadded geometry and notifies the
    /// decoration if it changed. Returns the final measured size.
    pub fn on_measure(
        &mut self,
        host: &mut dyn MeasureHost,
        style: &mut dyn TextStyle,
        width_spec: MeasureSpec,
        height_spec: MeasureSpec,
    ) -> (u32, u32) {
        let (mut measured_width, mut measured_height) = host.measure(width_spec, height_spec);
        let insets = host.insets();

        let negotiable = match width_spec {
            MeasureSpec::Unspecified => true,
            MeasureSpec::AtMost(size) => measured_width < size,
            MeasureSpec::Exactly(_) => false,
        };

        if negotiable {
            let mut desired = self.desired_width(style) + insets.start + insets.end;

            if desired > measured_width {
                if let MeasureSpec::AtMost(size) = width_spec {
                    desired = desired.min(size);
                }

                let (w, h) = host.measure(MeasureSpec::Exactly(desired), height_spec);
                measured_width = w;
                measured_height = h;
            }
        }

        // Bottom inset reaches from the baseline to the box edge; the top
        // inset mirrors it so the underline row tracks the text baseline
        let inset_bottom = measured_height.saturating_sub(host.baseline());
        let inset_top = (insets.top + inset_bottom).saturating_sub(insets.bottom);

        let unpadded_width = measured_width.saturating_sub(insets.start + insets.end);
        let unpadded_height = measured_height.saturating_sub(inset_top + inset_bottom);

        self.unpadded_width = Some(unpadded_width);

        let resolved = EdgeInsets {
            start: insets.start,
            top: inset_top,
            end: insets.end,
            bottom: inset_bottom,
        };

        if self.last_geometry != Some((unpadded_width, unpadded_height, resolved)) {
            self.last_geometry = Some((unpadded_width, unpadded_height, resolved));
            if let Some(decoration) = &self.decoration {
                decoration
                    .borrow_mut()
                    .on_measure_changed(unpadded_width, unpadded_height, resolved);
            }
        }

        (measured_width, measured_height)
    }

    /// Decide whether the current pass may draw
    ///
    /// Corrects the shared style toward its final state: the reference
    /// monospace typeface and the justifying letter spacing for the measured
    /// width. Whenever either knob needed a correction the pass is deferred
    /// so the host re-measures with the new style. Converges in at most two
    /// passes; an explicit ceiling guards against host font substitution
    /// oscillating the metrics, after which the box draws anyway.
    pub fn on_pre_draw(&mut self, style: &mut dyn TextStyle) -> bool {
        let mut ready = true;

        if style.typeface() != Typeface::Monospace {
            style.set_typeface(Typeface::Monospace);
            ready = false;
        }

        if let Some(width) = self.unpadded_width {
            let metrics = calibrate(style);
            let spacing = justifying_spacing(width as f32, self.code_length, &metrics);

            if style.letter_spacing() != spacing {
                style.set_letter_spacing(spacing);
                ready = false;
            }
        }

        if ready {
            self.deferred_passes = 0;
            return true;
        }

        self.deferred_passes += 1;
        if self.deferred_passes >= MAX_DEFERRED_PASSES {
            warn!(
                "pre-draw did not stabilize after {} passes, drawing anyway",
                self.deferred_passes
            );
            self.deferred_passes = 0;
            return true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::constants::EDGE_INSET_PX;

    struct MockHost {
        natural_width: u32,
        natural_height: u32,
        baseline: u32,
        insets: EdgeInsets,
        filters: Vec<InputFilter>,
        measure_calls: Vec<MeasureSpec>,
        set_filters_calls: usize,
        layout_requests: usize,
        invalidations: usize,
    }

    impl MockHost {
        fn new() -> Self {
            Self {
                natural_width: 50,
                natural_height: 40,
                baseline: 30,
                insets: EdgeInsets {
                    start: 4,
                    top: 6,
                    end: 4,
                    bottom: 6,
                },
                filters: Vec::new(),
                measure_calls: Vec::new(),
                set_filters_calls: 0,
                layout_requests: 0,
                invalidations: 0,
            }
        }
    }

    impl MeasureHost for MockHost {
        fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> (u32, u32) {
            self.measure_calls.push(width);
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
            self.set_filters_calls += 1;
            self.filters = filters;
        }

        fn request_layout(&mut self) {
            self.layout_requests += 1;
        }

        fn invalidate(&mut self) {
            self.invalidations += 1;
        }
    }

    /// Synthetic style: 10 px glyph plus 16 px per em of letter spacing
    struct MockStyle {
        typeface: Typeface,
        letter_spacing: f32,
    }

    impl MockStyle {
        fn new() -> Self {
            Self {
                typeface: Typeface::Named("Serif".to_string()),
                letter_spacing: 0.0,
            }
        }
    }

    impl TextStyle for MockStyle {
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
            10.0 + self.letter_spacing * 16.0
        }
    }

    #[derive(Default)]
    struct CountingDecoration {
        measure_calls: Vec<(u32, u32, EdgeInsets)>,
        length_calls: Vec<usize>,
    }

    impl DecorationCallback for CountingDecoration {
        fn on_measure_changed(&mut self, width: u32, height: u32, insets: EdgeInsets) {
            self.measure_calls.push((width, height, insets));
        }

        fn on_code_length_changed(&mut self, length: usize) {
            self.length_calls.push(length);
        }
    }

    fn controller() -> CodeBoxController {
        CodeBoxController::new(&Config::default()).unwrap()
    }

    fn attach_counting(controller: &mut CodeBoxController) -> Rc<RefCell<CountingDecoration>> {
        let decoration = Rc::new(RefCell::new(CountingDecoration::default()));
        controller.set_decoration(decoration.clone());
        decoration
    }

    #[test]
    fn test_zero_code_length_config_is_rejected() {
        let mut config = Config::default();
        config.input.code_length = 0;
        assert!(matches!(
            CodeBoxController::new(&config),
            Err(LayoutError::InvalidCodeLength(0))
        ));
    }

    #[test]
    fn test_unchanged_code_length_is_fully_gated() {
        let mut ctrl = controller();
        let deco = attach_counting(&mut ctrl);
        deco.borrow_mut().length_calls.clear();
        let mut host = MockHost::new();

        ctrl.set_code_length(4, &mut host).unwrap();

        assert_eq!(host.set_filters_calls, 0);
        assert_eq!(host.layout_requests, 0);
        assert_eq!(host.invalidations, 0);
        assert!(deco.borrow().length_calls.is_empty());
    }

    #[test]
    fn test_zero_code_length_fails_and_preserves_state() {
        let mut ctrl = controller();
        let deco = attach_counting(&mut ctrl);
        deco.borrow_mut().length_calls.clear();
        let mut host = MockHost::new();
        host.filters = vec![InputFilter::MaxLength(4)];

        let err = ctrl.set_code_length(0, &mut host).unwrap_err();

        assert_eq!(err, LayoutError::InvalidCodeLength(0));
        assert_eq!(ctrl.code_length(), 4);
        assert_eq!(host.set_filters_calls, 0);
        assert_eq!(host.layout_requests, 0);
        assert!(deco.borrow().length_calls.is_empty());
    }

    #[test]
    fn test_code_length_change_reassigns_filters_once() {
        let mut ctrl = controller();
        let deco = attach_counting(&mut ctrl);
        let mut host = MockHost::new();
        host.filters = vec![InputFilter::MaxLength(4)];

        ctrl.set_code_length(6, &mut host).unwrap();

        assert_eq!(host.set_filters_calls, 1);
        assert!(crate::filters::is_satisfied(&host.filters, 6));
        assert_eq!(deco.borrow().length_calls.last(), Some(&6));
        assert_eq!(host.layout_requests, 1);

        // The reassignment the host observed must not trigger another one
        ctrl.sync_filters(&mut host);
        assert_eq!(host.set_filters_calls, 1);
    }

    #[test]
    fn test_attaching_decoration_pushes_code_length() {
        let mut ctrl = controller();
        let deco = attach_counting(&mut ctrl);
        assert_eq!(deco.borrow().length_calls, vec![4]);
    }

    #[test]
    fn test_desired_width_uses_minimum_spacing() {
        let ctrl = controller();
        let mut style = MockStyle::new();

        // 10 px glyph + 1.0 em * 16 px, four slots
        assert_eq!(ctrl.desired_width(&mut style), 104);
        // Measurement must not leak into the shared style
        assert_eq!(style.letter_spacing(), 0.0);
        assert_ne!(style.typeface(), Typeface::Monospace);
    }

    #[test]
    fn test_on_measure_widens_with_exact_remeasure() {
        let mut ctrl = controller();
        let mut host = MockHost::new();
        let mut style = MockStyle::new();

        let (w, _) = ctrl.on_measure(
            &mut host,
            &mut style,
            MeasureSpec::AtMost(200),
            MeasureSpec::Unspecified,
        );

        // desired 104 + insets 8, granted in full under the 200 bound
        assert_eq!(w, 112);
        assert_eq!(host.measure_calls.len(), 2);
        assert_eq!(host.measure_calls[1], MeasureSpec::Exactly(112));
    }

    #[test]
    fn test_on_measure_clamps_to_at_most_bound() {
        let mut ctrl = controller();
        let mut host = MockHost::new();
        let mut style = MockStyle::new();

        let (w, _) = ctrl.on_measure(
            &mut host,
            &mut style,
            MeasureSpec::AtMost(80),
            MeasureSpec::Unspecified,
        );

        assert_eq!(w, 80);
        assert_eq!(host.measure_calls[1], MeasureSpec::Exactly(80));
    }

    #[test]
    fn test_on_measure_exact_width_is_not_negotiated() {
        let mut ctrl = controller();
        let mut host = MockHost::new();
        let mut style = MockStyle::new();

        let (w, _) = ctrl.on_measure(
            &mut host,
            &mut style,
            MeasureSpec::Exactly(60),
            MeasureSpec::Unspecified,
        );

        assert_eq!(w, 60);
        assert_eq!(host.measure_calls.len(), 1);
    }

    #[test]
    fn test_geometry_notification_is_change_gated() {
        let mut ctrl = controller();
        let deco = attach_counting(&mut ctrl);
        let mut host = MockHost::new();
        let mut style = MockStyle::new();

        for _ in 0..3 {
            ctrl.on_measure(
                &mut host,
                &mut style,
                MeasureSpec::AtMost(200),
                MeasureSpec::Unspecified,
            );
        }

        assert_eq!(deco.borrow().measure_calls.len(), 1);
        let (width, _, insets) = deco.borrow().measure_calls[0];
        assert_eq!(width, 112 - 8);
        assert_eq!(insets.start, 4);
    }

    #[test]
    fn test_pre_draw_stabilizes_in_two_passes() {
        let mut ctrl = controller();
        let mut host = MockHost::new();
        let mut style = MockStyle::new();

        ctrl.on_measure(
            &mut host,
            &mut style,
            MeasureSpec::AtMost(200),
            MeasureSpec::Unspecified,
        );

        // First pass corrects typeface and spacing, second finds both final
        assert!(!ctrl.on_pre_draw(&mut style));
        assert!(ctrl.on_pre_draw(&mut style));
        assert_eq!(style.typeface(), Typeface::Monospace);

        // Spacing inverts the forward formula for the measured width
        let width = (112 - 8) as f32;
        let expected = (width - EDGE_INSET_PX - 4.0 * 10.0) / 4.0 / 16.0;
        assert!((style.letter_spacing() - expected).abs() < 1e-5);
    }

    #[test]
    fn test_pre_draw_ceiling_forces_a_draw() {
        /// Adversarial style whose typeface assignment never sticks
        struct Oscillating(MockStyle);

        impl TextStyle for Oscillating {
            fn typeface(&self) -> Typeface {
                Typeface::Named("Substituted".to_string())
            }

            fn set_typeface(&mut self, _typeface: Typeface) {}

            fn letter_spacing(&self) -> f32 {
                self.0.letter_spacing()
            }

            fn set_letter_spacing(&mut self, em: f32) {
                self.0.set_letter_spacing(em);
            }

            fn measure_reference_glyph(&self) -> f32 {
                self.0.measure_reference_glyph()
            }
        }

        let mut ctrl = controller();
        let mut style = Oscillating(MockStyle::new());

        assert!(!ctrl.on_pre_draw(&mut style));
        assert!(!ctrl.on_pre_draw(&mut style));
        // Third deferred pass hits the ceiling and draws anyway
        assert!(ctrl.on_pre_draw(&mut style));
    }

    #[test]
    fn test_min_letter_spacing_setter_is_gated() {
        let mut ctrl = controller();
        let mut host = MockHost::new();

        ctrl.set_min_letter_spacing(1.0, &mut host);
        assert_eq!(host.layout_requests, 0);

        ctrl.set_min_letter_spacing(0.5, &mut host);
        assert_eq!(host.layout_requests, 1);
        assert_eq!(ctrl.min_letter_spacing(), 0.5);
    }
}
