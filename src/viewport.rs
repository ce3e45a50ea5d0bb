//! Viewport controller: clamped zoom, coalesced panning and animated fits.
//!
//! The controller is the only writer of the [`Viewport`]. Pans are batched
//! through a [`Mailbox`] and applied once per animation frame; zooms apply
//! immediately. Animated zoom-to-location is advanced by [`ViewportController::tick`]
//! and is cancelled by any other viewport write.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use tracing::trace;

use crate::camera::{Point, Viewport};
use crate::config::EditorConfig;
use crate::geom::Rect;
use crate::mailbox::Mailbox;

/// Options for [`ViewportController::zoom_to_location`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomOptions {
    pub animate: bool,
    /// Animation length in seconds.
    pub duration_secs: f64,
}

impl Default for ZoomOptions {
    fn default() -> Self {
        Self { animate: false, duration_secs: crate::consts::DEFAULT_ANIMATION_SECS }
    }
}

/// An in-flight interpolation between two viewports.
#[derive(Debug, Clone, Copy)]
struct ViewAnimation {
    from: Viewport,
    to: Viewport,
    duration_ms: f64,
    /// Set on the first tick so the animation starts at the first frame it is seen.
    start_ms: Option<f64>,
}

/// Owns pan/zoom state for one editor session.
#[derive(Debug, Clone)]
pub struct ViewportController {
    viewport: Viewport,
    width: f64,
    height: f64,
    min_zoom: f64,
    max_zoom: f64,
    fit_padding: f64,
    zoom_step: f64,
    pending_pan: Mailbox<Point>,
    animation: Option<ViewAnimation>,
}

impl ViewportController {
    #[must_use]
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            viewport: Viewport::default(),
            width: 0.0,
            height: 0.0,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            fit_padding: config.fit_padding,
            zoom_step: config.zoom_step,
            pending_pan: Mailbox::new(),
            animation: None,
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        self.viewport.screen_to_world(screen)
    }

    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        self.viewport.world_to_screen(world)
    }

    // --- Writes ---

    /// Overwrite the viewport directly, clamping zoom.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.animation = None;
        self.viewport = Viewport { zoom: self.clamp_zoom(viewport.zoom), ..viewport };
    }

    /// Record new container dimensions. Returns `true` if they changed, in
    /// which case the viewport is reset to the centered default view.
    pub fn set_size(&mut self, width: f64, height: f64) -> bool {
        if (self.width - width).abs() < f64::EPSILON && (self.height - height).abs() < f64::EPSILON {
            return false;
        }
        self.width = width;
        self.height = height;
        self.pending_pan.clear();
        self.set_viewport(self.default_view());
        true
    }

    /// Multiply zoom by `factor` around `center` (screen space) so the world
    /// point under `center` stays put.
    pub fn zoom(&mut self, factor: f64, center: Point) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let old = self.viewport;
        let new_zoom = self.clamp_zoom(old.zoom * factor);
        let ratio = new_zoom / old.zoom;
        self.set_viewport(Viewport {
            x: center.x - (center.x - old.x) * ratio,
            y: center.y - (center.y - old.y) * ratio,
            zoom: new_zoom,
        });
    }

    /// Queue a pan by `(dx, dy)` screen pixels for the next frame.
    ///
    /// Returns `true` when the host must schedule an animation frame.
    pub fn pan(&mut self, dx: f64, dy: f64) -> bool {
        self.pending_pan.post_with(Point::new(dx, dy), Point::add)
    }

    /// Apply the accumulated pan. Returns `true` if the viewport moved.
    pub fn flush_pan(&mut self) -> bool {
        let Some(delta) = self.pending_pan.take() else {
            return false;
        };
        if delta.x.abs() < f64::EPSILON && delta.y.abs() < f64::EPSILON {
            return false;
        }
        trace!(dx = delta.x, dy = delta.y, "viewport: flushing coalesced pan");
        let vp = self.viewport;
        self.set_viewport(Viewport { x: vp.x + delta.x, y: vp.y + delta.y, ..vp });
        true
    }

    /// Fit `bounds` (typically the union of all drawers) into the container.
    /// With no bounds, fall back to the centered default view.
    pub fn zoom_to_fit(&mut self, bounds: Option<Rect>) {
        let target = match bounds {
            Some(rect) => self.fit_view(&rect),
            None => self.default_view(),
        };
        self.set_viewport(target);
    }

    /// Center on `(x, y)`; with a size, fit that rectangle, otherwise bump
    /// zoom by one step.
    ///
    /// Returns `true` when an animation was started and the host must
    /// schedule frames.
    pub fn zoom_to_location(
        &mut self,
        x: f64,
        y: f64,
        width: Option<f64>,
        height: Option<f64>,
        options: ZoomOptions,
    ) -> bool {
        let target = match (width, height) {
            (Some(w), Some(h)) => self.fit_view(&Rect::new(x, y, w, h)),
            _ => self.centered_on(Point::new(x, y), self.viewport.zoom * self.zoom_step),
        };
        if !options.animate || options.duration_secs <= 0.0 {
            self.set_viewport(target);
            return false;
        }
        self.animation = Some(ViewAnimation {
            from: self.viewport,
            to: target,
            duration_ms: options.duration_secs * 1000.0,
            start_ms: None,
        });
        true
    }

    /// Advance the running animation to `now_ms`. Returns `true` while more
    /// frames are needed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let Some(mut anim) = self.animation else {
            return false;
        };
        let start = *anim.start_ms.get_or_insert(now_ms);
        let t = ((now_ms - start) / anim.duration_ms).clamp(0.0, 1.0);
        let eased = ease_out_cubic(t);
        self.viewport = Viewport {
            x: lerp(anim.from.x, anim.to.x, eased),
            y: lerp(anim.from.y, anim.to.y, eased),
            zoom: lerp(anim.from.zoom, anim.to.zoom, eased),
        };
        trace!(t, zoom = self.viewport.zoom, "viewport: animation tick");
        if t >= 1.0 {
            self.animation = None;
            return false;
        }
        self.animation = Some(anim);
        true
    }

    // --- Helpers ---

    fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.min(self.max_zoom).max(self.min_zoom)
    }

    fn default_view(&self) -> Viewport {
        Viewport { x: self.width / 2.0, y: self.height / 2.0, zoom: self.clamp_zoom(1.0) }
    }

    fn centered_on(&self, world: Point, zoom: f64) -> Viewport {
        let zoom = self.clamp_zoom(zoom);
        Viewport { x: self.width / 2.0 - world.x * zoom, y: self.height / 2.0 - world.y * zoom, zoom }
    }

    fn fit_view(&self, rect: &Rect) -> Viewport {
        let padded = rect.inflate(self.fit_padding);
        let zoom = (self.width / padded.width)
            .min(self.height / padded.height)
            .min(self.max_zoom)
            .max(self.min_zoom);
        self.centered_on(rect.center(), zoom)
    }
}

/// `1 - (1 - t)^3`: fast start, gentle landing.
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
