use glam::Vec2;

/// Frame-callback timestamp in milliseconds, on whatever clock the host uses.
pub type Millis = f64;

/// Opaque token returned by a [`crate::driver::FrameScheduler`] for one
/// outstanding frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Size of the container the mesh lives in, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// `true` when either side has no positive extent, so nothing can be
    /// placed inside it.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}
