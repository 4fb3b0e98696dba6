//! Mapping between data space and canvas pixels.
//!
//! Canvas y grows downward while data y grows upward; the transform flips it. Scrolling is a
//! pixel offset accumulated by the caller and applied on top of the configured [`Axes`].

use eframe::epaint::{Pos2, Rect, Vec2};

pub mod layout;

#[derive(Clone, Copy, PartialEq, Debug)]
/// Data-space bounds of the plot.
pub struct Axes {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl Axes {
    #[must_use]
    pub fn new(x_min: f32, x_max: f32, y_min: f32, y_max: f32) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    #[must_use]
    pub fn span(&self) -> Vec2 {
        Vec2::new(self.x_max - self.x_min, self.y_max - self.y_min)
    }
}

impl Default for Axes {
    fn default() -> Self {
        Self::new(-5., 5., -0.25, 1.)
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CoordinateTransform {
    canvas: Rect,
    plot: Rect,
    axes: Axes,
    /// Pixels per data unit along each axis.
    aspect: Vec2,
    origin: Pos2,
    scroll: Vec2,
}

impl Default for CoordinateTransform {
    fn default() -> Self {
        Self {
            canvas: Rect::NOTHING,
            plot: Rect::NOTHING,
            axes: Axes::default(),
            aspect: Vec2::splat(1.),
            origin: Pos2::ZERO,
            scroll: Vec2::ZERO,
        }
    }
}

impl CoordinateTransform {
    /// Must be called again whenever the canvas or the axes change.
    pub fn set_aspect_ratio(&mut self, canvas: Rect, plot: Rect, axes: Axes) {
        let span = axes.span();
        self.canvas = canvas;
        self.plot = plot;
        self.axes = axes;
        self.aspect = Vec2::new(plot.width().abs() / span.x, plot.height().abs() / span.y);
    }

    /// `origin` is the canvas' top-left corner shifted by `scroll`.
    pub fn set_canvas_origin(&mut self, origin: Pos2, scroll: Vec2) {
        self.origin = origin;
        self.scroll = scroll;
    }

    #[must_use]
    pub fn aspect_ratio(&self) -> Vec2 {
        self.aspect
    }

    #[must_use]
    /// The data bounds actually visible in the plot rectangle once the scroll is applied.
    pub fn scrolled_axes(&self) -> Axes {
        let shift = self.to_plot(self.scroll);
        Axes::new(
            self.axes.x_min - shift.x,
            self.axes.x_max - shift.x,
            self.axes.y_min + shift.y,
            self.axes.y_max + shift.y,
        )
    }

    #[must_use]
    pub fn to_canvas(&self, point: Pos2) -> Pos2 {
        let scaled = self.scale_to_canvas(Vec2::new(
            point.x - self.axes.x_min,
            point.y - self.axes.y_min,
        ));
        Pos2::new(
            self.origin.x + (self.plot.left() - self.canvas.left()) + scaled.x,
            self.origin.y + (self.plot.bottom() - self.canvas.top()) - scaled.y,
        )
    }

    #[must_use]
    /// Data-space extent to pixels, without any offset.
    pub fn scale_to_canvas(&self, delta: Vec2) -> Vec2 {
        Vec2::new(delta.x * self.aspect.x, delta.y * self.aspect.y)
    }

    #[must_use]
    /// Inverse of [`Self::scale_to_canvas`].
    pub fn to_plot(&self, delta: Vec2) -> Vec2 {
        Vec2::new(self.scale_x_to_plot(delta.x), self.scale_y_to_plot(delta.y))
    }

    #[must_use]
    pub fn scale_x_to_plot(&self, dx: f32) -> f32 {
        dx / self.aspect.x
    }

    #[must_use]
    pub fn scale_y_to_plot(&self, dy: f32) -> f32 {
        dy / self.aspect.y
    }
}
