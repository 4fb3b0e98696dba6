//! Per-frame geometry of the plot canvas, in canvas pixels.

use eframe::epaint::{Pos2, Rect, Vec2};

use super::{Axes, CoordinateTransform};
use crate::numerics::histogram::Histogram;

#[derive(Clone, PartialEq, Debug)]
/// One gridline with its axis tick and label.
pub struct GridLine {
    pub line: [Pos2; 2],
    pub tick: [Pos2; 2],
    /// Data value at the line.
    pub value: f32,
}

impl GridLine {
    /// Where the label is anchored: the outer end of the tick.
    #[must_use]
    pub fn label_anchor(&self) -> Pos2 {
        self.tick[1]
    }

    #[must_use]
    pub fn label(&self) -> String {
        format!("{:.*}", PlotLayout::LABEL_DECIMALS, self.value)
    }
}

#[derive(Clone, PartialEq, Debug)]
/// The canvas, split into a plot rectangle and margins holding the axes.
pub struct PlotLayout {
    pub canvas: Rect,
    pub plot: Rect,
    pub transform: CoordinateTransform,
    axis_gap: f32,
    scroll: Vec2,
}

impl PlotLayout {
    pub const DEFAULT_AXIS_GAP: f32 = 50.;
    /// Points on the density curve.
    pub const CURVE_STEPS: usize = 1000;
    pub const TICK_LENGTH: f32 = 10.;
    pub const LABEL_DECIMALS: usize = 2;

    #[must_use]
    pub fn new(canvas: Rect, axes: Axes, axis_gap: f32, scroll: Vec2) -> Self {
        let plot = Self::plot_rect(canvas, axis_gap);
        let mut transform = CoordinateTransform::default();
        transform.set_aspect_ratio(canvas, plot, axes);
        transform.set_canvas_origin(canvas.left_top() + scroll, scroll);
        Self {
            canvas,
            plot,
            transform,
            axis_gap,
            scroll,
        }
    }

    #[must_use]
    /// Two gaps of margin left and below for labels, one gap above and right.
    pub fn plot_rect(canvas: Rect, axis_gap: f32) -> Rect {
        Rect::from_min_max(
            canvas.left_top() + Vec2::new(2. * axis_gap, axis_gap),
            canvas.right_bottom() - Vec2::new(axis_gap, 2. * axis_gap),
        )
    }

    #[must_use]
    pub fn x_axis_line(&self) -> [Pos2; 2] {
        let (c, g) = (self.canvas, self.axis_gap);
        [
            Pos2::new(c.left() + 2. * g, c.bottom() - g),
            Pos2::new(c.right() - g, c.bottom() - g),
        ]
    }

    #[must_use]
    pub fn y_axis_line(&self) -> [Pos2; 2] {
        let (c, g) = (self.canvas, self.axis_gap);
        [
            Pos2::new(c.left() + g, c.bottom() - 2. * g),
            Pos2::new(c.left() + g, c.top() + g),
        ]
    }

    #[must_use]
    /// Vertical gridlines `gap` data units apart, following the scroll. Left to right.
    pub fn vertical_grid(&self, gap: f32) -> Vec<GridLine> {
        let step = self.transform.scale_to_canvas(Vec2::new(gap, 0.)).x;
        if !(step > 0. && step.is_finite()) {
            return Vec::new();
        }
        let x_min = self.transform.scrolled_axes().x_min;
        let tick_y = self.x_axis_line()[0].y;

        let offset = self.scroll.x % step;
        let mut x = self.plot.left() + offset;
        if offset < 0. {
            x += step;
        }
        let mut lines = Vec::new();
        while x <= self.plot.right() {
            lines.push(GridLine {
                line: [Pos2::new(x, self.plot.top()), Pos2::new(x, self.plot.bottom())],
                tick: [Pos2::new(x, tick_y), Pos2::new(x, tick_y + Self::TICK_LENGTH)],
                value: self.transform.scale_x_to_plot(x - self.plot.left()) + x_min,
            });
            x += step;
        }
        lines
    }

    #[must_use]
    /// Horizontal gridlines `gap` data units apart, following the scroll. Bottom to top.
    pub fn horizontal_grid(&self, gap: f32) -> Vec<GridLine> {
        let step = self.transform.scale_to_canvas(Vec2::new(0., gap)).y;
        if !(step > 0. && step.is_finite()) {
            return Vec::new();
        }
        let y_min = self.transform.scrolled_axes().y_min;
        let tick_x = self.y_axis_line()[0].x;

        let offset = -self.scroll.y % step;
        let mut y = self.plot.bottom() - offset;
        if offset < 0. {
            y -= step;
        }
        let mut lines = Vec::new();
        while y >= self.plot.top() {
            lines.push(GridLine {
                line: [Pos2::new(self.plot.left(), y), Pos2::new(self.plot.right(), y)],
                tick: [Pos2::new(tick_x, y), Pos2::new(tick_x - Self::TICK_LENGTH, y)],
                value: y_min - self.transform.scale_y_to_plot(y - self.plot.bottom()),
            });
            y -= step;
        }
        lines
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    /// `density` sampled at [`Self::CURVE_STEPS`] evenly spaced points across the visible
    /// x-range, in canvas pixels.
    pub fn curve(&self, density: impl Fn(f64) -> f64) -> Vec<Pos2> {
        let axes = self.transform.scrolled_axes();
        let step = (axes.x_max - axes.x_min) / Self::CURVE_STEPS as f32;
        (0..Self::CURVE_STEPS)
            .map(|i| {
                let x = axes.x_min + i as f32 * step;
                let y = density(f64::from(x)) as f32;
                self.transform.to_canvas(Pos2::new(x, y))
            })
            .collect()
    }

    #[must_use]
    /// One rectangle per inner bin of `histogram`, in canvas pixels.
    pub fn bars(&self, histogram: &Histogram) -> Vec<Rect> {
        histogram
            .bars()
            .map(|bar| {
                Rect::from_two_pos(
                    self.transform.to_canvas(Pos2::new(bar.lower, bar.height)),
                    self.transform.to_canvas(Pos2::new(bar.upper, 0.)),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use eframe::epaint::{Pos2, Rect, Vec2};
    use itertools::Itertools;

    use super::PlotLayout;
    use crate::numerics::histogram::Histogram;
    use crate::plot::Axes;

    fn canvas() -> Rect {
        Rect::from_min_max(Pos2::ZERO, Pos2::new(800., 600.))
    }

    fn layout(scroll: Vec2) -> PlotLayout {
        PlotLayout::new(canvas(), Axes::new(0., 10., 0., 1.), 50., scroll)
    }

    #[test]
    fn margins() {
        let layout = layout(Vec2::ZERO);
        assert_eq!(
            layout.plot,
            Rect::from_min_max(Pos2::new(100., 50.), Pos2::new(750., 500.))
        );
        assert_eq!(layout.x_axis_line(), [Pos2::new(100., 550.), Pos2::new(750., 550.)]);
        assert_eq!(layout.y_axis_line(), [Pos2::new(50., 500.), Pos2::new(50., 50.)]);
    }

    #[test]
    fn unscrolled_grid_starts_at_the_axes() {
        let layout = layout(Vec2::ZERO);
        let vertical = layout.vertical_grid(1.);
        assert_eq!(vertical.len(), 11);
        assert_eq!(
            vertical.iter().map(|l| l.label()).collect_vec(),
            (0..=10).map(|i| format!("{i}.00")).collect_vec()
        );
        assert_relative_eq!(vertical[0].line[0].x, 100.);
        assert_eq!(vertical[3].tick, [Pos2::new(295., 550.), Pos2::new(295., 560.)]);

        let horizontal = layout.horizontal_grid(0.25);
        assert_eq!(horizontal.len(), 5);
        assert_relative_eq!(horizontal[0].line[0].y, 500.);
        assert_relative_eq!(horizontal[4].value, 1., max_relative = 1e-6);
        assert_eq!(horizontal[2].label(), "0.50");
        assert_eq!(horizontal[1].label_anchor(), Pos2::new(40., 387.5));
    }

    #[test]
    fn grid_follows_the_scroll() {
        // 65 px per unit along x: a 100 px drag to the right moves 35 px past a gridline.
        let right = layout(Vec2::new(100., 0.));
        let vertical = right.vertical_grid(1.);
        assert_relative_eq!(vertical[0].line[0].x, 135.);
        assert_relative_eq!(vertical[0].value, -1., max_relative = 1e-5);

        let left = layout(Vec2::new(-35., 0.));
        let vertical = left.vertical_grid(1.);
        assert_relative_eq!(vertical[0].line[0].x, 130.);
        assert!(vertical.iter().all(|l| l.line[0].x <= left.plot.right()));
    }

    #[test]
    fn degenerate_gaps_produce_no_grid() {
        let layout = layout(Vec2::ZERO);
        assert!(layout.vertical_grid(0.).is_empty());
        assert!(layout.horizontal_grid(-1.).is_empty());
    }

    #[test]
    fn curve_spans_the_visible_range() {
        let layout = layout(Vec2::ZERO);
        let curve = layout.curve(|_| 0.5);
        assert_eq!(curve.len(), PlotLayout::CURVE_STEPS);
        assert_relative_eq!(curve[0].x, 100.);
        assert!(curve.last().unwrap().x < 750.);
        assert!(curve.iter().all(|p| (p.y - 275.).abs() < 1e-3));
    }

    #[test]
    fn bars_stand_on_the_x_axis() {
        let layout = layout(Vec2::ZERO);
        let data = [0.5, 1.5, 1.7, 12.];
        let histogram = Histogram::from_data(&data, 10, 0., 10.);
        let bars = layout.bars(&histogram);
        assert_eq!(bars.len(), 10);
        assert!(bars.iter().all(|b| (b.bottom() - 500.).abs() < 1e-3));
        assert_relative_eq!(bars[1].height(), 0.5 * 450., max_relative = 1e-5);
        assert_relative_eq!(bars[0].left(), 100.);
        assert_relative_eq!(bars[0].width(), 65., max_relative = 1e-5);
    }
}
