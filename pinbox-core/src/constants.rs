/// Layout constants shared across spacing, measurement and decoration
///
/// These values must be synchronized between:
/// - Spacing calculation (the usable width the justified text may fill)
/// - Decoration rendering (where the underline marks sit)
///
/// Changing them will shift both the computed letter spacing and the visual
/// position of the slot marks.

/// Horizontal breathing room in pixels reserved for the cursor at the box edge
pub const EDGE_INSET_PX: f32 = 2.0;

/// Distance in pixels between the bottom edge and the underline marks
pub const BASELINE_GAP_PX: f32 = 7.0;

/// Default number of input slots
pub const DEFAULT_CODE_LENGTH: usize = 4;

/// Default minimum letter spacing (em units) used for desired-width measurement
pub const DEFAULT_MIN_LETTER_SPACING: f32 = 1.0;

/// Maximum number of deferred pre-draw passes before drawing anyway
/// Guards against font-substitution oscillation in the host framework
pub const MAX_DEFERRED_PASSES: u32 = 3;
