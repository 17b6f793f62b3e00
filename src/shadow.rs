//! Shadow Cascade Matrix Tracking
//!
//! During its shadow sub-passes the backend computes a view and projection
//! matrix per cascade. The shading stages later need those as a single
//! world-to-shadow-UV transform per cascade. [`ShadowMatrixTracker`] captures
//! them: the backend reports each cascade through a cloneable
//! [`ShadowCaptureSink`], and the orchestrator applies the queued captures on
//! the render thread once per active frame.
//!
//! The cascade count is fixed engine-wide at [`SHADOW_CASCADES`]; a capture
//! outside that range is a logic error and panics. Captures for lights other
//! than the designated sun are dropped. Matrices from a previous frame stay
//! readable until overwritten, since a shadow pass always produces the same
//! fixed cascade count.

use glam::{Mat4, Vec4};

/// Number of shadow cascades, fixed engine-wide.
pub const SHADOW_CASCADES: usize = 3;

/// Maps clip space `[-1,1]²` to shadow-map UV space `[0,1]²` with a Y flip.
pub const CLIP_TO_UV: Mat4 = Mat4::from_cols(
    Vec4::new(0.5, 0.0, 0.0, 0.0),
    Vec4::new(0.0, -0.5, 0.0, 0.0),
    Vec4::new(0.0, 0.0, 1.0, 0.0),
    Vec4::new(0.5, 0.5, 0.0, 1.0),
);

/// Identity of a light in the backend's scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightId(pub u64);

/// One cascade capture as reported by the backend's shadow sub-pass.
#[derive(Debug, Clone, Copy)]
pub struct ShadowCapture {
    pub light: LightId,
    pub cascade: usize,
    pub view: Mat4,
    pub projection: Mat4,
}

/// Write end of the capture channel, handed to the backend.
///
/// Cloneable and cheap to call from inside a shadow sub-pass; sends never
/// block.
#[derive(Clone)]
pub struct ShadowCaptureSink {
    tx: flume::Sender<ShadowCapture>,
}

impl ShadowCaptureSink {
    /// Reports the view and projection matrices of one shadow cascade.
    pub fn cascade_captured(&self, light: LightId, cascade: usize, view: Mat4, projection: Mat4) {
        // If the tracker is gone (shutdown), the capture is simply dropped.
        let _ = self.tx.send(ShadowCapture {
            light,
            cascade,
            view,
            projection,
        });
    }
}

/// Tracks the world-to-shadow-UV matrix of each cascade.
pub struct ShadowMatrixTracker {
    sun: LightId,
    rx: flume::Receiver<ShadowCapture>,
    matrices: [Mat4; SHADOW_CASCADES],
}

impl ShadowMatrixTracker {
    /// Creates a tracker filtering for the given sun light, plus the sink the
    /// backend reports captures through.
    #[must_use]
    pub fn new(sun: LightId) -> (Self, ShadowCaptureSink) {
        let (tx, rx) = flume::unbounded();
        (
            Self {
                sun,
                rx,
                matrices: [Mat4::IDENTITY; SHADOW_CASCADES],
            },
            ShadowCaptureSink { tx },
        )
    }

    /// Applies all queued captures.
    ///
    /// Called by the orchestrator on the render thread during active frames;
    /// idle ticks leave the matrix set untouched.
    pub fn pump(&mut self) {
        while let Ok(capture) = self.rx.try_recv() {
            self.apply(capture);
        }
    }

    fn apply(&mut self, capture: ShadowCapture) {
        // Other lights may run shadow passes too; only the sun's cascades
        // feed the shading stages.
        if capture.light != self.sun {
            return;
        }
        assert!(
            capture.cascade < SHADOW_CASCADES,
            "shadow cascade index {} out of range (fixed cascade count {})",
            capture.cascade,
            SHADOW_CASCADES
        );
        self.matrices[capture.cascade] = CLIP_TO_UV * capture.projection * capture.view;
    }

    /// The world-to-shadow-UV matrix of one cascade.
    ///
    /// # Panics
    ///
    /// Panics if `cascade >= SHADOW_CASCADES`.
    #[must_use]
    pub fn matrix(&self, cascade: usize) -> Mat4 {
        self.matrices[cascade]
    }

    /// All cascade matrices, indexed by cascade.
    #[must_use]
    pub fn matrices(&self) -> &[Mat4; SHADOW_CASCADES] {
        &self.matrices
    }

    /// The designated sun light whose cascades are tracked.
    #[must_use]
    pub fn sun(&self) -> LightId {
        self.sun
    }
}
