mod canvas;

use eframe::egui::emath::Numeric;
use eframe::egui::{
    Align, Button, CentralPanel, CollapsingHeader, ComboBox, Context, DragValue, Grid, Layout,
    SidePanel, TextStyle, Ui,
};
use eframe::epaint::Vec2;
use egui_extras::{Column, TableBuilder};
use random_samples::catalog::DistributionCatalog;
use random_samples::distribution::Parameters;
use random_samples::file_io;
use random_samples::numerics::statistics::Statistic;
use random_samples::numerics::Rational;
use random_samples::sampling::SamplingManager;
use random_samples::Error;
use tracing::warn;

use self::canvas::PlotView;

pub struct RandomSamples {
    catalog: DistributionCatalog,
    selected: usize,
    sample_count: usize,
    sample_size: usize,
    statistic: Statistic,
    /// Values of `statistic` over the current table.
    statistic_values: Vec<Rational>,
    view: PlotView,
    status: Option<String>,
}

/// A labelled drag value on its own grid row.
fn number_input<N: Numeric>(ui: &mut Ui, label: &str, value: &mut N, speed: f64) -> bool {
    ui.label(label);
    let changed = ui.add(DragValue::new(value).speed(speed)).changed();
    ui.end_row();
    changed
}

impl RandomSamples {
    const DEFAULT_DISTRIBUTION: &'static str = "normal";
    const DEFAULT_SAMPLE_COUNT: usize = 1000;
    const DEFAULT_SAMPLE_SIZE: usize = 1;
    const MAX_SAMPLE_COUNT: usize = 1_000_000;
    const TABLE_ROWS: usize = 100;

    #[must_use]
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut style = (*cc.egui_ctx.style()).clone();
        style.spacing.item_spacing.y = 5.;
        style.spacing.combo_width = 160.;
        cc.egui_ctx.set_style(style);

        let catalog = DistributionCatalog::new();
        let selected = catalog
            .position(Self::DEFAULT_DISTRIBUTION)
            .unwrap_or_default();
        let mut app = Self {
            catalog,
            selected,
            sample_count: Self::DEFAULT_SAMPLE_COUNT,
            sample_size: Self::DEFAULT_SAMPLE_SIZE,
            statistic: Statistic::Mean,
            statistic_values: Vec::new(),
            view: PlotView::default(),
            status: None,
        };
        app.regenerate();
        app
    }

    fn sampler(&self) -> Option<&dyn SamplingManager> {
        self.catalog.get(self.selected)
    }

    fn report(&mut self, err: &Error) {
        warn!(%err, distribution = self.selected, "operation failed");
        self.status = Some(err.to_string());
    }

    fn regenerate(&mut self) {
        let Some(sampler) = self.catalog.get_mut(self.selected) else {
            return;
        };
        let result = sampler
            .set_sampler_config(self.sample_count, self.sample_size)
            .and_then(|()| sampler.generate_samples());
        match result {
            Ok(()) => {
                self.status = None;
                self.refresh_statistic();
            }
            Err(err) => {
                self.statistic_values.clear();
                self.report(&err);
            }
        }
    }

    fn refresh_statistic(&mut self) {
        let Some(sampler) = self.sampler() else {
            return;
        };
        match sampler.sample_function_results(self.statistic.name()) {
            Ok(values) => self.statistic_values = values,
            Err(err) => {
                self.statistic_values.clear();
                self.report(&err);
            }
        }
    }

    /// Inputs for the selected distribution's parameters. Returns whether valid new values
    /// were applied.
    fn parameter_inputs(&mut self, ui: &mut Ui) -> bool {
        let Some(sampler) = self.catalog.get_mut(self.selected) else {
            return false;
        };
        let names = sampler.parameter_names();
        let mut parameters = sampler.parameters();
        let changed = Grid::new("parameters")
            .num_columns(2)
            .show(ui, |ui| match &mut parameters {
                Parameters::IntegerPair(a, b) => {
                    number_input(ui, names[0], a, 0.1) | number_input(ui, names[1], b, 0.1)
                }
                Parameters::RealPair(a, b) => {
                    number_input(ui, names[0], a, 0.01) | number_input(ui, names[1], b, 0.01)
                }
                Parameters::Real(a) => number_input(ui, names[0], a, 0.01),
                Parameters::Probability(p) => number_input(ui, names[0], p, 0.005),
                Parameters::IntegerAndProbability(n, p) => {
                    number_input(ui, names[0], n, 0.1) | number_input(ui, names[1], p, 0.005)
                }
            })
            .inner;
        if !changed {
            return false;
        }
        match sampler.set_parameters(parameters) {
            Ok(()) => true,
            Err(err) => {
                self.report(&err);
                false
            }
        }
    }

    fn sampling_controls(&mut self, ui: &mut Ui) {
        let mut regenerate = false;

        let selected_name = self.catalog.name(self.selected).unwrap_or_default();
        ComboBox::from_label("Distribution")
            .selected_text(selected_name)
            .show_ui(ui, |ui| {
                for (i, name) in self.catalog.names().enumerate() {
                    regenerate |= ui.selectable_value(&mut self.selected, i, name).changed();
                }
            });

        regenerate |= self.parameter_inputs(ui);

        Grid::new("sampler_config").num_columns(2).show(ui, |ui| {
            for (label, value) in [
                ("Number of samples:", &mut self.sample_count),
                ("Sample size:", &mut self.sample_size),
            ] {
                ui.label(label);
                regenerate |= ui
                    .add(DragValue::new(value).clamp_range(1..=Self::MAX_SAMPLE_COUNT))
                    .changed();
                ui.end_row();
            }
        });

        if ui
            .button("(Re-)generate samples")
            .on_hover_text("Draw a fresh table with the current settings")
            .clicked()
        {
            regenerate = true;
        }
        if regenerate {
            self.regenerate();
        }

        let mut statistic_changed = false;
        ComboBox::from_label("Statistic")
            .selected_text(self.statistic.name())
            .show_ui(ui, |ui| {
                for statistic in Statistic::ALL {
                    statistic_changed |= ui
                        .selectable_value(&mut self.statistic, statistic, statistic.name())
                        .changed();
                }
            });
        if statistic_changed {
            self.refresh_statistic();
        }
    }

    fn plot_controls(&mut self, ui: &mut Ui) {
        CollapsingHeader::new("Histogram")
            .default_open(true)
            .show(ui, |ui| {
                Grid::new("histogram").num_columns(2).show(ui, |ui| {
                    ui.label("Number of bins:");
                    ui.add(DragValue::new(&mut self.view.bins).clamp_range(1..=1000));
                    ui.end_row();
                });
            });

        CollapsingHeader::new("Axis Limits")
            .default_open(true)
            .show(ui, |ui| {
                Grid::new("axes").num_columns(2).show(ui, |ui| {
                    let axes = &mut self.view.axes;
                    number_input(ui, "X-axis lower limit:", &mut axes.x_min, 0.05);
                    number_input(ui, "X-axis upper limit:", &mut axes.x_max, 0.05);
                    number_input(ui, "Y-axis lower limit:", &mut axes.y_min, 0.01);
                    number_input(ui, "Y-axis upper limit:", &mut axes.y_max, 0.01);
                    number_input(ui, "X-axis grid gap:", &mut self.view.grid_gaps.x, 0.01);
                    number_input(ui, "Y-axis grid gap:", &mut self.view.grid_gaps.y, 0.01);
                });
                ui.horizontal(|ui| {
                    if ui.button("Reset view").clicked() {
                        self.view.scroll = Vec2::ZERO;
                    }
                });
            });

        CollapsingHeader::new("Colors")
            .default_open(true)
            .show(ui, |ui| {
                Grid::new("colors").num_columns(2).show(ui, |ui| {
                    ui.label("Curve:");
                    ui.color_edit_button_srgba(&mut self.view.curve_color);
                    ui.end_row();
                    ui.label("Histogram:");
                    ui.color_edit_button_srgba(&mut self.view.histogram_color);
                    ui.end_row();
                });
            });
    }

    fn export(&mut self, ui: &mut Ui) {
        let Some(sampler) = self.sampler() else {
            return;
        };
        let generated = sampler.table_shape().0 > 0;
        if !ui
            .add_enabled(generated, Button::new("Export"))
            .on_hover_text(format!("Write the table to {}", file_io::DEFAULT_PATH))
            .clicked()
        {
            return;
        }
        match file_io::write_to_file(sampler, file_io::DEFAULT_PATH) {
            Ok(()) => self.status = Some(format!("Wrote {}", file_io::DEFAULT_PATH)),
            Err(err) => self.report(&err),
        }
    }

    fn table(&self, ui: &mut Ui) {
        let Some(sampler) = self.sampler() else {
            return;
        };
        let (rows, columns) = sampler.table_shape();
        if rows == 0 {
            ui.label("No samples generated.");
            return;
        }
        let first_statistic = columns - Statistic::ALL.len();

        let row_height = ui.text_style_height(&TextStyle::Body) + ui.spacing().item_spacing.y;
        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .column(Column::auto_with_initial_suggestion(40.))
            .columns(Column::auto(), Statistic::ALL.len())
            .header(row_height, |mut header| {
                header.col(|ui| {
                    ui.strong("Sample");
                });
                for statistic in Statistic::ALL {
                    header.col(|ui| {
                        ui.strong(statistic.name());
                    });
                }
            })
            .body(|body| {
                body.rows(row_height, (rows - 1).min(Self::TABLE_ROWS), |index, mut row| {
                    row.col(|ui| {
                        ui.label((index + 1).to_string());
                    });
                    for column in first_statistic..columns {
                        row.col(|ui| {
                            ui.monospace(sampler.cell_text(column, index + 1).unwrap_or_default());
                        });
                    }
                });
            });
    }

    fn controls(&mut self, ui: &mut Ui) {
        ui.heading("Random Samples");
        ui.separator();

        CollapsingHeader::new("Random Samples")
            .default_open(true)
            .show(ui, |ui| self.sampling_controls(ui));

        self.plot_controls(ui);

        CollapsingHeader::new("Table")
            .default_open(false)
            .show(ui, |ui| {
                self.table(ui);
                self.export(ui);
            });

        if let Some(status) = &self.status {
            ui.separator();
            ui.label(status.as_str());
        }
    }
}

impl eframe::App for RandomSamples {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        SidePanel::right("controls")
            .min_width(ctx.available_rect().width() * 0.3)
            .resizable(false)
            .show(ctx, |ui| self.controls(ui));

        CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Controls:");
                ui.code("right-drag");
                ui.label("to pan.");
            });
            let Some(sampler) = self.catalog.get(self.selected) else {
                return;
            };
            canvas::plot_canvas(
                ui,
                &mut self.view,
                |x| sampler.density(x),
                &self.statistic_values,
            );
        });
    }
}
