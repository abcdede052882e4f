//! Chunk streaming: wraps chunks that drift too far from the viewer.
//!
//! Each chunk behaves like a tile on a torus. When the viewer gets more than
//! half the pool extent away from a chunk on X or Z, the chunk jumps one full
//! extent towards the viewer and is rebuilt there. Memory stays at one pool
//! no matter how far the viewer travels.

use glam::Vec3;

use crate::chunk::{ChunkBuilder, ChunkId};
use crate::pool::{ChunkPool, PoolLayout};

/// Result of a single streaming tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StreamingReport {
    /// Chunks relocated and rebuilt this tick.
    pub relocated: u32,
    /// Chunks that needed to move but whose rebuild failed. They stay in
    /// place and are retried next tick.
    pub failed: u32,
    /// Ids of relocated chunks, in pool order.
    pub moved: Vec<ChunkId>,
}

/// Decides and applies chunk relocations around the viewer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StreamingController {
    extent: f32,
    threshold: f32,
}

impl StreamingController {
    /// Controller for a pool with the given layout.
    ///
    /// The layout's extent must be non-zero; configuration validation
    /// rejects anything else.
    pub fn new(layout: &PoolLayout) -> Self {
        let extent = layout.extent() as f32;
        Self {
            extent,
            threshold: extent / 2.0,
        }
    }

    /// Distance from a chunk, per axis, beyond which it wraps.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Distance a wrapping chunk jumps.
    pub fn extent(&self) -> f32 {
        self.extent
    }

    /// Offset to apply on one axis: `+extent`, `-extent`, or zero.
    ///
    /// Exactly reaching the threshold does not wrap.
    pub fn wrap_offset(&self, viewer: f32, anchor: f32) -> f32 {
        let distance = viewer - anchor;
        if distance > self.threshold {
            self.extent
        } else if distance < -self.threshold {
            -self.extent
        } else {
            0.0
        }
    }

    /// Run one streaming pass over the pool.
    ///
    /// X and Z are evaluated independently; a chunk that must wrap on both
    /// axes moves diagonally with a single rebuild.
    pub fn tick(
        &self,
        viewer: Vec3,
        pool: &mut ChunkPool,
        builder: &mut ChunkBuilder,
    ) -> StreamingReport {
        let mut report = StreamingReport::default();

        for chunk in pool.iter_mut() {
            let anchor = chunk.anchor();
            let dx = self.wrap_offset(viewer.x, anchor.x);
            let dz = self.wrap_offset(viewer.z, anchor.z);
            if dx == 0.0 && dz == 0.0 {
                continue;
            }

            match chunk.relocate(dx, dz, builder) {
                Ok(()) => {
                    tracing::trace!(
                        chunk = chunk.id().0,
                        x = chunk.anchor().x,
                        z = chunk.anchor().z,
                        "chunk relocated"
                    );
                    report.relocated += 1;
                    report.moved.push(chunk.id());
                }
                Err(e) => {
                    tracing::warn!(chunk = chunk.id().0, "chunk rebuild failed, retrying next tick: {e}");
                    report.failed += 1;
                }
            }
        }

        report
    }
}
