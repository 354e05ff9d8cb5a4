//! Drawing progress threaded through the layout pass.
//!
//! [`BandCursor`] is a value: every step consumes the cursor it was given
//! and returns the next one. Nothing else carries state between steps.

use crate::scene::Band;

/// Band list sized up front to the number of inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct BandList {
    bands: Vec<Band>,
    capacity: usize,
}

impl BandList {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bands: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends the next band down.
    ///
    /// # Panics
    ///
    /// Panics if more bands are pushed than there are inputs.
    pub fn push(&mut self, band: Band) {
        assert!(
            self.bands.len() < self.capacity,
            "band list is full ({} bands)",
            self.capacity
        );
        self.bands.push(band);
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    /// Band `k`, top to bottom.
    ///
    /// # Panics
    ///
    /// Panics if `k` is out of range.
    pub fn band(&self, k: usize) -> &Band {
        assert!(k < self.bands.len(), "band {k} of {}", self.bands.len());
        &self.bands[k]
    }

    /// Bottom of the lowest band, or zero before any band exists.
    pub fn last_lower(&self) -> f32 {
        self.bands.last().map(Band::lower).unwrap_or(0.0)
    }

    pub fn as_slice(&self) -> &[Band] {
        &self.bands
    }

    pub fn into_vec(self) -> Vec<Band> {
        self.bands
    }
}

/// Layout progress.
///
/// - `pos_top`: x where the next loss bends off the top edge.
/// - `pos_bot`: x reached along the bottom edge.
/// - `lim_top`: current top of the flow, lowered by every loss.
/// - `top_edge`: x where the not-yet-stroked part of the top edge begins.
#[derive(Debug, Clone, PartialEq)]
pub struct BandCursor {
    pos_top: f32,
    pos_bot: f32,
    lim_top: f32,
    top_edge: f32,
    bands: BandList,
}

impl BandCursor {
    pub fn new(pos_top: f32, pos_bot: f32, lim_top: f32, top_edge: f32, bands: BandList) -> Self {
        Self {
            pos_top,
            pos_bot,
            lim_top,
            top_edge,
            bands,
        }
    }

    pub fn pos_top(&self) -> f32 {
        self.pos_top
    }

    pub fn pos_bot(&self) -> f32 {
        self.pos_bot
    }

    pub fn lim_top(&self) -> f32 {
        self.lim_top
    }

    pub fn top_edge(&self) -> f32 {
        self.top_edge
    }

    pub fn bands(&self) -> &BandList {
        &self.bands
    }

    /// Appends a band and moves the bottom cursor to `pos_bot`.
    pub fn with_band(mut self, band: Band, pos_bot: f32) -> Self {
        self.bands.push(band);
        self.pos_bot = pos_bot;
        self
    }

    pub fn with_pos_top(mut self, pos_top: f32) -> Self {
        self.pos_top = pos_top;
        self
    }

    /// Removes a loss of thickness `width` that bent off at `x0` and whose
    /// next neighbour may start at `next_pos_top`.
    pub fn after_loss(mut self, width: f32, x0: f32, next_pos_top: f32) -> Self {
        self.lim_top -= width;
        self.top_edge = x0;
        self.pos_top = next_pos_top;
        self
    }

    pub fn into_bands(self) -> Vec<Band> {
        self.bands.into_vec()
    }
}
