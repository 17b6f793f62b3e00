//! Frame Statistics
//!
//! Snapshots of the previous frame's pipeline invocations, for profiling
//! overlays and tooling.

use crate::backend::RenderStats;
use crate::shadow::SHADOW_CASCADES;

/// Statistics of the most recently completed frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LastFrameStats {
    pub left: RenderStats,
    /// Present only when the frame was rendered in stereo.
    pub right: Option<RenderStats>,
    /// Per-cascade shadow pass stats; all zero when shadow casting is off.
    pub shadow: [RenderStats; SHADOW_CASCADES],
}

/// Counters accumulated since subsystem initialization.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningFrameStats {
    /// Frames actually rendered (idle ticks excluded).
    pub frame_count: u64,
    /// Monotonic time fed to animation, in seconds.
    pub time_since_start: f32,
}
