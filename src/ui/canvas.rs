use eframe::egui::{Align2, CursorIcon, PointerButton, Sense, Ui};
use eframe::epaint::{Color32, FontId, Shape, Stroke, Vec2};

use random_samples::numerics::histogram::Histogram;
use random_samples::numerics::Rational;
use random_samples::plot::layout::PlotLayout;
use random_samples::plot::Axes;

const AXIS_COLOR: Color32 = Color32::from_rgb(102, 102, 255);
const GRID_COLOR: Color32 = Color32::from_rgba_premultiplied(102, 102, 102, 128);
const FONT_SIZE: f32 = 14.;
/// Space between a tick and its label.
const TICK_GAP: f32 = 2.;

#[derive(Clone, PartialEq, Debug)]
/// Plot settings that persist across frames.
pub(super) struct PlotView {
    pub axes: Axes,
    pub grid_gaps: Vec2,
    pub scroll: Vec2,
    pub bins: usize,
    pub curve_color: Color32,
    pub histogram_color: Color32,
}

impl Default for PlotView {
    fn default() -> Self {
        Self {
            axes: Axes::default(),
            grid_gaps: Vec2::new(1., 0.25),
            scroll: Vec2::ZERO,
            bins: Histogram::DEFAULT_BINS,
            curve_color: Color32::from_rgb(230, 60, 60),
            histogram_color: Color32::from_rgba_unmultiplied(80, 140, 220, 160),
        }
    }
}

impl PlotView {
    /// Whether the axes span a positive range in both directions.
    pub fn has_valid_axes(&self) -> bool {
        let Axes {
            x_min,
            x_max,
            y_min,
            y_max,
        } = self.axes;
        x_min < x_max
            && y_min < y_max
            && !approx::relative_eq!(x_min, x_max)
            && !approx::relative_eq!(y_min, y_max)
    }
}

/// Paint the histogram of `data` and the curve of `density` over the remaining space of `ui`.
/// Dragging with the secondary button pans the view.
pub(super) fn plot_canvas(
    ui: &mut Ui,
    view: &mut PlotView,
    density: impl Fn(f64) -> f64,
    data: &[Rational],
) {
    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::drag());
    if response.dragged_by(PointerButton::Secondary) {
        view.scroll += response.drag_delta();
        ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
    }

    painter.rect_filled(response.rect, 0., Color32::WHITE);
    if !view.has_valid_axes() {
        painter.text(
            response.rect.center(),
            Align2::CENTER_CENTER,
            "Axis limits must span a positive range",
            FontId::proportional(FONT_SIZE),
            AXIS_COLOR,
        );
        return;
    }

    let layout = PlotLayout::new(
        response.rect,
        view.axes,
        PlotLayout::DEFAULT_AXIS_GAP,
        view.scroll,
    );
    let visible = layout.transform.scrolled_axes();
    let histogram = Histogram::from_data(data, view.bins, visible.x_min, visible.x_max);
    let vertical = layout.vertical_grid(view.grid_gaps.x);
    let horizontal = layout.horizontal_grid(view.grid_gaps.y);

    painter.rect_stroke(layout.plot, 0., Stroke::new(1., Color32::from_black_alpha(128)));

    let font = FontId::proportional(FONT_SIZE);
    let axis = Stroke::new(2., AXIS_COLOR);
    for line in &vertical {
        painter.line_segment(line.tick, axis);
        painter.text(
            line.label_anchor() + Vec2::new(0., TICK_GAP),
            Align2::CENTER_TOP,
            line.label(),
            font.clone(),
            AXIS_COLOR,
        );
    }
    for line in &horizontal {
        painter.line_segment(line.tick, axis);
        painter.text(
            line.label_anchor() - Vec2::new(TICK_GAP, 0.),
            Align2::RIGHT_CENTER,
            line.label(),
            font.clone(),
            AXIS_COLOR,
        );
    }
    painter.line_segment(layout.x_axis_line(), axis);
    painter.line_segment(layout.y_axis_line(), axis);

    let plot_painter = painter.with_clip_rect(layout.plot);
    for line in vertical.iter().chain(&horizontal) {
        plot_painter.line_segment(line.line, Stroke::new(1., GRID_COLOR));
    }
    for bar in layout.bars(&histogram) {
        plot_painter.rect_filled(bar, 0., view.histogram_color);
    }
    plot_painter.add(Shape::line(
        layout.curve(density),
        Stroke::new(2., view.curve_color),
    ));
}
