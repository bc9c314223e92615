/// Slot geometry for per-character decoration marks
///
/// Partitions the usable drawing width into `slot_count` equal slots, each
/// shrunk symmetrically by a padding, used to position underline segments
/// beneath each character position. Slots are derived at draw time and never
/// stored; all math is f32 and slots need not fall on pixel boundaries.

/// Insets subtracted from the measured box to reach the usable drawing area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeInsets {
    pub start: u32,
    pub top: u32,
    pub end: u32,
    pub bottom: u32,
}

/// Usable drawing rectangle for decorations plus the configured slot count
///
/// Mutated only by the controller in response to a measurement pass;
/// immutable value otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutGeometry {
    pub available_width: u32,
    pub slot_count: usize,
    pub insets: EdgeInsets,
}

/// One equal-width partition of the available width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub start_x: f32,
    pub end_x: f32,
}

impl Slot {
    pub fn width(&self) -> f32 {
        self.end_x - self.start_x
    }
}

/// Compute slot `index` within the geometry
///
/// Requires `index < slot_count`; callers must branch on zero slots before
/// invoking the per-slot formula (use [`slots`], whose iterator is simply
/// empty in that case). If the padding would consume the entire slot, the
/// slot collapses to the full step width with no shrink.
pub fn slot(index: usize, geometry: &LayoutGeometry, padding: f32) -> Slot {
    debug_assert!(index < geometry.slot_count);
    debug_assert!(padding >= 0.0);

    let step = geometry.available_width as f32 / geometry.slot_count as f32;
    let origin = geometry.insets.start as f32 + step * index as f32;

    if 2.0 * padding >= step {
        return Slot {
            start_x: origin,
            end_x: origin + step,
        };
    }

    let start_x = origin + padding;
    Slot {
        start_x,
        end_x: start_x + (step - 2.0 * padding),
    }
}

/// Iterate all slots of the geometry: lazy, finite, restartable
///
/// Yields `slot_count` elements; empty when no code length is configured yet,
/// in which case callers render a single full-width fallback mark instead.
pub fn slots(geometry: &LayoutGeometry, padding: f32) -> SlotIter {
    SlotIter {
        geometry: *geometry,
        padding,
        index: 0,
    }
}

#[derive(Debug, Clone)]
pub struct SlotIter {
    geometry: LayoutGeometry,
    padding: f32,
    index: usize,
}

impl Iterator for SlotIter {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        if self.index >= self.geometry.slot_count {
            return None;
        }
        let s = slot(self.index, &self.geometry, self.padding);
        self.index += 1;
        Some(s)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.geometry.slot_count - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SlotIter {}
