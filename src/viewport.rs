//! Viewport transform state for the preview surface
//!
//! A single authoritative zoom factor and pan offset, applied as one
//! combined translate-then-scale transform. Mouse drag, two-finger touch
//! and the discrete zoom buttons all funnel into the same state; the zoom
//! clamp is enforced at the one `set_zoom` choke point so no gesture
//! sequence can push the factor out of range.

pub const ZOOM_MIN: f32 = 0.25;
pub const ZOOM_MAX: f32 = 3.0;
pub const ZOOM_STEP: f32 = 0.1;

/// A point or offset in preview-surface coordinates (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    fn distance(self, other: Point) -> f32 {
        let d = self.sub(other);
        (d.x * d.x + d.y * d.y).sqrt()
    }
}

/// Distance and zoom captured the instant the second finger touched.
/// Pinch zoom is computed against these, not the live values.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PinchBaseline {
    distance: f32,
    zoom: f32,
}

/// Zoom/pan/fullscreen state for the rendered surface
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    zoom: f32,
    pan: Point,
    /// Pointer position minus pan at press time; `Some` while panning
    pan_start: Option<Point>,
    pinch: Option<PinchBaseline>,
    fullscreen: bool,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Point::default(),
            pan_start: None,
            pinch: None,
            fullscreen: false,
        }
    }
}

impl ViewportState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn is_panning(&self) -> bool {
        self.pan_start.is_some()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// The combined transform: translate by pan, then scale by zoom
    pub fn transform_css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.pan.x, self.pan.y, self.zoom
        )
    }

    /// The single mutation point for the zoom factor; always clamps
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// Adjust zoom by a delta (the step buttons pass ±[`ZOOM_STEP`])
    pub fn adjust_zoom(&mut self, delta: f32) {
        self.set_zoom(self.zoom + delta);
    }

    /// Begin a pointer drag pan at this position
    pub fn begin_pan(&mut self, pointer: Point) {
        self.pan_start = Some(pointer.sub(self.pan));
    }

    /// Continue a drag; no-op unless a pan is active
    pub fn pan_to(&mut self, pointer: Point) {
        if let Some(start) = self.pan_start {
            self.pan = pointer.sub(start);
        }
    }

    /// End the drag. No inertia.
    pub fn end_pan(&mut self) {
        self.pan_start = None;
    }

    /// Touch points went down
    pub fn touch_start(&mut self, points: &[Point]) {
        match points {
            [p] => {
                self.pinch = None;
                self.begin_pan(*p);
            }
            [a, b, ..] => {
                // Second finger landed: freeze the pinch baseline
                self.pan_start = None;
                self.pinch = Some(PinchBaseline {
                    distance: a.distance(*b),
                    zoom: self.zoom,
                });
            }
            [] => {}
        }
    }

    /// Touch points moved
    pub fn touch_move(&mut self, points: &[Point]) {
        match points {
            [p] => self.pan_to(*p),
            [a, b, ..] => {
                if let Some(baseline) = self.pinch {
                    if baseline.distance > f32::EPSILON {
                        let ratio = a.distance(*b) / baseline.distance;
                        self.set_zoom(baseline.zoom * ratio);
                    }
                }
            }
            [] => {}
        }
    }

    /// Touch points lifted; `remaining` are the points still down.
    /// Going from two fingers to one re-baselines the pan from the current
    /// position so the surface does not jump.
    pub fn touch_end(&mut self, remaining: &[Point]) {
        match remaining {
            [p] => {
                self.pinch = None;
                self.begin_pan(*p);
            }
            [] => {
                self.pinch = None;
                self.end_pan();
            }
            _ => {}
        }
    }

    /// Return zoom and pan to identity
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan = Point::default();
        self.pan_start = None;
        self.pinch = None;
    }

    /// Fullscreen changes layout only, never zoom/pan
    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    pub fn exit_fullscreen(&mut self) {
        self.fullscreen = false;
    }
}
