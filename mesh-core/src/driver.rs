//! Frame-capped animation driver.
//!
//! [`Driver`] owns the current mesh and advances it from frame callbacks.
//! The host does the actual event delivery: it calls
//! [`Driver::on_bounds_changed`] whenever the container is resized and
//! [`Driver::on_frame`] whenever a frame requested through the
//! [`FrameScheduler`] fires. Callbacks may fire faster than
//! `settings.fps`; the driver only re-simulates once the frame interval
//! has elapsed.
//!
//! Lifecycle:
//!
//! ```text
//! Unattached --attach--> AwaitingBounds --due frame, bounds known--> Running
//!      \                       |                                        |
//!       \---------------------detach--------------------------------detach
//!                              v
//!                          Detached (terminal)
//! ```

use crate::{
    config::Settings,
    mesh::{Mesh, build_mesh},
    motion::tick_mesh,
    render::{Surface, render},
    types::{Bounds, FrameHandle, Millis},
};
use rand::Rng;
use tracing::{debug, trace, warn};

/// Subscription to container resize notifications.
///
/// While subscribed, the host forwards each new size to
/// [`Driver::on_bounds_changed`].
pub trait BoundsSource {
    fn subscribe(&mut self);
    fn unsubscribe(&mut self);
}

/// One-shot "call me before the next repaint" requests.
///
/// When a requested frame fires, the host calls [`Driver::on_frame`]
/// with the frame timestamp.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel(&mut self, handle: FrameHandle);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Created, not yet attached.
    Unattached,
    /// Attached, but no mesh yet because no usable bounds have arrived.
    AwaitingBounds,
    /// A mesh exists and is ticked on every due frame.
    Running,
    /// Torn down. A detached driver never runs again.
    Detached,
}

/// What a single [`Driver::on_frame`] call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The driver is not attached; nothing was touched.
    Ignored,
    /// Less than one frame interval since the last tick.
    Skipped,
    /// Due, but the bounds are still unknown or empty.
    Idle,
    /// A fresh mesh was built for new bounds.
    Rebuilt,
    /// The existing mesh advanced by one tick.
    Ticked,
}

/// Frame-capped owner of the current mesh.
///
/// ### Fields
/// - `settings` - Session settings; never change after construction.
/// - `bounds_source` / `scheduler` - Host capabilities used on attach/detach and per frame.
/// - `rng` - Randomness for building and ticking meshes.
/// - `bounds` - Latest container size reported by the host.
/// - `mesh` - Mesh built for `mesh.bounds`; dropped as soon as it no longer fits.
/// - `last_tick` - Timestamp of the last simulated frame.
/// - `pending` - The single outstanding frame request, if any.
pub struct Driver<B, F, R> {
    settings: Settings,
    bounds_source: B,
    scheduler: F,
    rng: R,

    phase: Phase,
    bounds: Option<Bounds>,
    mesh: Option<Mesh>,
    last_tick: Option<Millis>,
    pending: Option<FrameHandle>,
}

impl<B, F, R> Driver<B, F, R>
where
    B: BoundsSource,
    F: FrameScheduler,
    R: Rng,
{
    pub fn new(settings: Settings, bounds_source: B, scheduler: F, rng: R) -> Self {
        Self {
            settings,
            bounds_source,
            scheduler,
            rng,
            phase: Phase::Unattached,
            bounds: None,
            mesh: None,
            last_tick: None,
            pending: None,
        }
    }

    /// Subscribes to resize notifications and requests the first frame.
    ///
    /// Only valid once, from [`Phase::Unattached`]; later calls are
    /// ignored.
    pub fn attach(&mut self) {
        if self.phase != Phase::Unattached {
            warn!(phase = ?self.phase, "attach ignored");
            return;
        }

        self.bounds_source.subscribe();
        self.pending = Some(self.scheduler.request_frame());
        self.phase = Phase::AwaitingBounds;
        debug!(fps = self.settings.fps, vertices = self.settings.vertex_count, "mesh driver attached");
    }

    /// Releases the resize subscription and cancels the outstanding frame.
    pub fn detach(&mut self) {
        if self.phase == Phase::Detached {
            return;
        }

        if self.is_attached() {
            self.bounds_source.unsubscribe();
        }
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }

        self.mesh = None;
        self.bounds = None;
        self.phase = Phase::Detached;
        debug!("mesh driver detached");
    }

    /// Records the new container size.
    ///
    /// The mesh is not rebuilt here; the next due frame notices that the
    /// bounds differ from the mesh's and rebuilds it then.
    pub fn on_bounds_changed(&mut self, width: f32, height: f32) {
        if !self.is_attached() {
            return;
        }
        self.bounds = Some(Bounds::new(width, height));
    }

    /// Handles a fired frame callback at time `now` (milliseconds).
    ///
    /// Re-simulates if a full frame interval has passed since the last
    /// tick (or nothing has ticked yet), then always requests the next
    /// frame so exactly one request is outstanding.
    pub fn on_frame(&mut self, now: Millis) -> FrameOutcome {
        if !self.is_attached() {
            return FrameOutcome::Ignored;
        }

        // The request that brought us here has fired.
        self.pending = None;

        let outcome = if self.is_due(now) {
            self.simulate(now)
        } else {
            FrameOutcome::Skipped
        };

        self.pending = Some(self.scheduler.request_frame());
        outcome
    }

    /// Draws the current mesh, if any, onto `surface`.
    ///
    /// This is independent of ticking: callers may draw on every repaint.
    pub fn draw(&self, surface: &mut impl Surface) {
        if !self.is_attached() {
            return;
        }
        if let Some(mesh) = &self.mesh {
            render(mesh, &self.settings, surface);
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.phase, Phase::AwaitingBounds | Phase::Running)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    pub fn last_tick(&self) -> Option<Millis> {
        self.last_tick
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn bounds_source(&self) -> &B {
        &self.bounds_source
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    fn is_due(&self, now: Millis) -> bool {
        match self.last_tick {
            None => true,
            Some(last) => now - last > self.settings.frame_interval_ms(),
        }
    }

    fn simulate(&mut self, now: Millis) -> FrameOutcome {
        let Some(bounds) = self.bounds.filter(|b| !b.is_empty()) else {
            // A collapsed container invalidates whatever was built before it.
            if self.mesh.take().is_some() {
                debug!("bounds collapsed, mesh dropped");
            }
            self.last_tick = None;
            self.phase = Phase::AwaitingBounds;
            return FrameOutcome::Idle;
        };

        let outcome = match self.mesh.take() {
            Some(mesh) if mesh.bounds == bounds => {
                self.mesh = Some(tick_mesh(&mesh, &self.settings, &mut self.rng));
                trace!(now, "mesh ticked");
                FrameOutcome::Ticked
            }
            _ => {
                let mesh = build_mesh(bounds.width, bounds.height, &self.settings, &mut self.rng);
                debug!(
                    width = bounds.width,
                    height = bounds.height,
                    vertices = mesh.len(),
                    "mesh rebuilt"
                );
                self.mesh = Some(mesh);
                FrameOutcome::Rebuilt
            }
        };

        self.last_tick = Some(now);
        self.phase = Phase::Running;
        outcome
    }
}
