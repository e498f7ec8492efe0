//! Rendering collaborator.
//!
//! The command server never talks to a graphics library directly. Commands
//! and window resizes go through the [`Graphics`] trait; the binary wires in
//! [`TraceGraphics`], tests wire in [`Recorder`].

/// Pixel rectangle the scene is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Perspective frustum, `glFrustum` argument order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

/// Half-extent, in world units, of the shorter window side.
const HALF_EXTENT: f32 = 10.0;
const NEAR: f32 = 1.0;
const FAR: f32 = 100.0;

/// Viewport and projection for a window of `width` x `height` pixels.
///
/// The shorter side always spans 20 world units; the longer side grows with
/// the aspect ratio. The near plane sees a tenth of that.
pub fn projection_for(width: u32, height: u32) -> (Viewport, Frustum) {
    let w = width.max(1);
    let h = height.max(1);
    let (wf, hf) = (w as f32, h as f32);

    let (half_w, half_h) = if w < h {
        (HALF_EXTENT, HALF_EXTENT * hf / wf)
    } else {
        (HALF_EXTENT * wf / hf, HALF_EXTENT)
    };

    let viewport = Viewport { x: 0, y: 0, width: w, height: h };
    let frustum = Frustum {
        left: -half_w / 10.0,
        right: half_w / 10.0,
        bottom: -half_h / 10.0,
        top: half_h / 10.0,
        near: NEAR,
        far: FAR,
    };
    (viewport, frustum)
}

// =============================================================================
// GRAPHICS TRAIT
// =============================================================================

/// The rendering API commands drive.
pub trait Graphics {
    /// The window changed size.
    fn reshape(&mut self, viewport: Viewport, frustum: Frustum);
    /// Open a primitive block (`GL_TRIANGLES`, ...).
    fn begin(&mut self, mode: u32);
    fn end(&mut self);
    fn vertex(&mut self, v: [f32; 4]);
    fn color(&mut self, rgba: [f32; 4]);
    fn clear(&mut self, mask: u32);
    fn flush(&mut self);
    fn swap_buffers(&mut self);
}

/// Backend that only logs each call at `trace` level.
#[derive(Debug, Default)]
pub struct TraceGraphics {
    frames: u64,
}

impl TraceGraphics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Graphics for TraceGraphics {
    fn reshape(&mut self, viewport: Viewport, frustum: Frustum) {
        tracing::debug!(?viewport, ?frustum, "reshape");
    }

    fn begin(&mut self, mode: u32) {
        tracing::trace!(mode, "begin");
    }

    fn end(&mut self) {
        tracing::trace!("end");
    }

    fn vertex(&mut self, v: [f32; 4]) {
        tracing::trace!(?v, "vertex");
    }

    fn color(&mut self, rgba: [f32; 4]) {
        tracing::trace!(?rgba, "color");
    }

    fn clear(&mut self, mask: u32) {
        tracing::trace!("clear {mask:#x}");
    }

    fn flush(&mut self) {
        tracing::trace!("flush");
    }

    fn swap_buffers(&mut self) {
        self.frames += 1;
        tracing::trace!(frame = self.frames, "swap");
    }
}

// =============================================================================
// RECORDER
// =============================================================================

/// One call made against a [`Recorder`].
#[derive(Debug, Clone, PartialEq)]
pub enum GraphicsCall {
    Reshape(Viewport, Frustum),
    Begin(u32),
    End,
    Vertex([f32; 4]),
    Color([f32; 4]),
    Clear(u32),
    Flush,
    SwapBuffers,
}

/// Backend that records every call, in order.
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<GraphicsCall>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Graphics for Recorder {
    fn reshape(&mut self, viewport: Viewport, frustum: Frustum) {
        self.calls.push(GraphicsCall::Reshape(viewport, frustum));
    }

    fn begin(&mut self, mode: u32) {
        self.calls.push(GraphicsCall::Begin(mode));
    }

    fn end(&mut self) {
        self.calls.push(GraphicsCall::End);
    }

    fn vertex(&mut self, v: [f32; 4]) {
        self.calls.push(GraphicsCall::Vertex(v));
    }

    fn color(&mut self, rgba: [f32; 4]) {
        self.calls.push(GraphicsCall::Color(rgba));
    }

    fn clear(&mut self, mask: u32) {
        self.calls.push(GraphicsCall::Clear(mask));
    }

    fn flush(&mut self) {
        self.calls.push(GraphicsCall::Flush);
    }

    fn swap_buffers(&mut self) {
        self.calls.push(GraphicsCall::SwapBuffers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_wide_window() {
        let (viewport, f) = projection_for(400, 200);
        assert_eq!(viewport, Viewport { x: 0, y: 0, width: 400, height: 200 });
        assert_eq!((f.left, f.right), (-2.0, 2.0));
        assert_eq!((f.bottom, f.top), (-1.0, 1.0));
        assert_eq!((f.near, f.far), (1.0, 100.0));
    }

    #[test]
    fn test_projection_tall_window() {
        let (_, f) = projection_for(200, 400);
        assert_eq!((f.left, f.right), (-1.0, 1.0));
        assert_eq!((f.bottom, f.top), (-2.0, 2.0));
    }

    #[test]
    fn test_projection_square_window() {
        let (_, f) = projection_for(500, 500);
        assert_eq!((f.left, f.right, f.bottom, f.top), (-1.0, 1.0, -1.0, 1.0));
    }

    #[test]
    fn test_projection_zero_size_clamped() {
        let (viewport, f) = projection_for(0, 0);
        assert_eq!((viewport.width, viewport.height), (1, 1));
        assert!(f.left.is_finite() && f.top.is_finite());
    }

    #[test]
    fn test_trace_backend_counts_frames() {
        let mut gfx = TraceGraphics::new();
        gfx.swap_buffers();
        gfx.swap_buffers();
        assert_eq!(gfx.frames(), 2);
    }
}
