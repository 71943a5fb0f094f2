/*!
 * Desktop dashboard for ghg-dashboard - World Bank greenhouse-gas emissions explorer
 *
 * - Pick countries and a year range; data is refetched for every change
 * - Switch between time series, averages, year-over-year change and a sortable table
 * - Export the current view as CSV/JSON or save it as an SVG/PNG chart
 *
 * Platform support: Windows, macOS, Linux
 */

use anyhow::Result;
use eframe::egui::{self, Color32};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};
use ghg_dashboard::format::{NO_DATA, format_number, format_value};
use ghg_dashboard::models::UNIT;
use ghg_dashboard::projection::{
    AggregateResult, CountryDeltas, CountrySeries, SortKey, TableSort,
};
use ghg_dashboard::viz::{self, ChartOptions, util::contiguous_runs};
use ghg_dashboard::{
    Client, Config, Country, FetchError, FilterState, LoadState, Observation, ObservationStore,
    Projection, RequestToken, ViewMode, storage, view,
};
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::load(None)?;
    let app = DashboardApp::new(config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 720.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Greenhouse Gas Emissions Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Greenhouse Gas Emissions Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

/// Result of one background fetch, tagged with the token it was started for.
struct FetchOutcome {
    token: RequestToken,
    result: Result<Vec<Observation>, FetchError>,
}

/// Main application state
struct DashboardApp {
    config: Config,
    client: Client,

    // Filter & view
    filter: FilterState,
    /// Filter of the most recent fetch request; `None` before the first one.
    requested: Option<FilterState>,
    /// Token of a started fetch whose request has not been sent yet.
    pending: Option<RequestToken>,
    view_mode: ViewMode,
    table_sort: TableSort,

    store: ObservationStore,

    // UI state
    status_message: String,
    error_message: String,

    // Background fetches report here; stale ones are dropped by the store.
    result_tx: mpsc::Sender<FetchOutcome>,
    result_rx: mpsc::Receiver<FetchOutcome>,
}

impl DashboardApp {
    fn new(config: Config) -> Result<Self> {
        let client = Client::from_config(&config)?;
        let filter = config.default_filter()?;
        let (result_tx, result_rx) = mpsc::channel();
        Ok(Self {
            config,
            client,
            filter,
            requested: None,
            pending: None,
            view_mode: ViewMode::default(),
            table_sort: TableSort::default(),
            store: ObservationStore::new(),
            status_message: String::new(),
            error_message: String::new(),
            result_tx,
            result_rx,
        })
    }

    /// Invalidate the store as soon as the filter changes, then send the request.
    ///
    /// The request itself waits while a pointer button is held so dragging a year does
    /// not fire one per frame.
    fn maybe_refetch(&mut self, ctx: &egui::Context) {
        if self.requested.as_ref() != Some(&self.filter) {
            self.requested = Some(self.filter.clone());
            self.status_message.clear();
            self.error_message.clear();
            self.pending = self.store.begin_fetch(&self.filter);
        }
        if ctx.input(|i| i.pointer.any_down()) {
            return;
        }
        let Some(token) = self.pending.take() else {
            return;
        };
        let client = self.client.clone();
        let sender = self.result_tx.clone();
        let ctx = ctx.clone();
        thread::spawn(move || {
            let result = client.fetch(token.filter());
            let _ = sender.send(FetchOutcome { token, result });
            ctx.request_repaint();
        });
    }

    fn check_fetch_results(&mut self) {
        while let Ok(outcome) = self.result_rx.try_recv() {
            self.store.complete(&outcome.token, outcome.result);
        }
    }

    fn filters_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Greenhouse Gas Emissions Dashboard");
        ui.add_space(6.0);

        ui.horizontal_wrapped(|ui| {
            ui.label("Select Countries:");
            for country in Country::ALL {
                let mut selected = self.filter.contains(country);
                if ui.checkbox(&mut selected, country.label()).changed() {
                    self.filter.toggle_country(country);
                }
            }
        });

        ui.horizontal(|ui| {
            let bounds = self.config.min_year..=self.config.max_year;
            let range = self.filter.range();

            ui.label("Start Year");
            let mut start = range.start();
            if ui
                .add(egui::DragValue::new(&mut start).range(bounds.clone()))
                .changed()
            {
                self.filter.set_start_year(self.config.clamp_year(start));
            }
            ui.label("End Year");
            let mut end = range.end();
            if ui
                .add(egui::DragValue::new(&mut end).range(bounds))
                .changed()
            {
                self.filter.set_end_year(self.config.clamp_year(end));
            }
        });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            for mode in ViewMode::ALL {
                ui.selectable_value(&mut self.view_mode, mode, mode.button_label());
            }
        });
        ui.add_space(4.0);
    }

    fn content_ui(&mut self, ui: &mut egui::Ui) {
        match self.store.state().clone() {
            LoadState::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading data...");
                });
            }
            LoadState::Failed(message) => {
                ui.colored_label(Color32::RED, message);
            }
            LoadState::NoSelection => {
                ui.colored_label(Color32::GRAY, "No countries selected.");
            }
            LoadState::Empty => {
                ui.colored_label(Color32::GRAY, "No data for selected countries.");
            }
            LoadState::Populated => self.view_ui(ui),
        }
    }

    fn view_ui(&mut self, ui: &mut egui::Ui) {
        let Some(filter) = self.store.filter().cloned() else {
            return;
        };
        let projection = view::project(
            self.view_mode,
            self.store.observations(),
            &filter,
            self.table_sort,
        );

        ui.horizontal(|ui| {
            ui.strong(self.view_mode.title(filter.range()));
            if let Some(at) = self.store.fetched_at() {
                ui.weak(format!("updated {}", at.format("%H:%M:%S UTC")));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(self.view_mode.is_chart(), egui::Button::new("Save chart…"))
                    .clicked()
                {
                    self.save_chart(&projection, &filter);
                }
                if ui.button("Export…").clicked() {
                    self.export_view(&projection);
                }
            });
        });

        if !self.status_message.is_empty() {
            ui.colored_label(Color32::DARK_GREEN, &self.status_message);
        }
        if !self.error_message.is_empty() {
            ui.colored_label(Color32::RED, &self.error_message);
        }
        ui.add_space(6.0);

        let locale = self.config.locale.clone();
        match &projection {
            Projection::Chart(series) => time_series_plot(ui, series),
            Projection::Yoy(deltas) => year_over_year_plot(ui, deltas),
            Projection::Aggregated(results) => aggregate_plot(ui, results, &locale),
            Projection::Table(rows) => table_ui(ui, rows, &mut self.table_sort, &locale),
        }
    }

    fn export_view(&mut self, projection: &Projection) {
        let Some(path) = rfd::FileDialog::new()
            .set_directory(default_dir())
            .set_file_name("ghg_view.csv")
            .add_filter("CSV", &["csv"])
            .add_filter("JSON", &["json"])
            .save_file()
        else {
            return;
        };
        match storage::save_projection(projection, &path) {
            Ok(()) => self.report_saved(&path),
            Err(err) => self.error_message = format!("Failed to export: {err:#}"),
        }
    }

    fn save_chart(&mut self, projection: &Projection, filter: &FilterState) {
        let Some(path) = rfd::FileDialog::new()
            .set_directory(default_dir())
            .set_file_name("ghg_chart.svg")
            .add_filter("SVG", &["svg"])
            .add_filter("PNG", &["png"])
            .save_file()
        else {
            return;
        };
        let opts = ChartOptions {
            locale: self.config.locale.clone(),
            ..ChartOptions::default()
        };
        match viz::plot_projection(projection, filter, &path, &opts) {
            Ok(()) => self.report_saved(&path),
            Err(err) => self.error_message = format!("Failed to create chart: {err:#}"),
        }
    }

    fn report_saved(&mut self, path: &std::path::Path) {
        self.error_message.clear();
        self.status_message = format!("Saved {}", path.display());
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply completed background fetches
        self.check_fetch_results();

        egui::TopBottomPanel::top("filters").show(ctx, |ui| self.filters_ui(ui));
        self.maybe_refetch(ctx);
        egui::CentralPanel::default().show(ctx, |ui| self.content_ui(ui));

        // Keep the spinner animating, and send a deferred request once the pointer is released
        if self.store.is_loading() {
            ctx.request_repaint();
        }
    }
}

fn default_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn country_color32(country: Country) -> Color32 {
    let (r, g, b, a) = country.rgba();
    Color32::from_rgba_unmultiplied(r, g, b, (a * 255.0).round() as u8)
}

type PlotLine = (String, Color32, Vec<(i32, Option<f64>)>);

fn line_plot(ui: &mut egui::Ui, id: &str, y_label: String, lines: Vec<PlotLine>) {
    Plot::new(id)
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label(y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (name, color, points) in &lines {
                // Missing years break the line
                for run in contiguous_runs(points) {
                    let pts: Vec<[f64; 2]> = run.iter().map(|&(x, y)| [x, y]).collect();
                    plot_ui.line(
                        Line::new(PlotPoints::from(pts.clone()))
                            .name(name)
                            .color(*color)
                            .width(2.0),
                    );
                    plot_ui.points(Points::new(pts).name(name).color(*color).radius(2.5));
                }
            }
        });
}

fn time_series_plot(ui: &mut egui::Ui, series: &[CountrySeries]) {
    let lines = series
        .iter()
        .map(|s| {
            (
                s.country.code().to_string(),
                country_color32(s.country),
                s.points.iter().map(|p| (p.year, p.value)).collect(),
            )
        })
        .collect();
    line_plot(ui, "time_series", format!("Emissions ({UNIT})"), lines);
}

fn year_over_year_plot(ui: &mut egui::Ui, deltas: &[CountryDeltas]) {
    if deltas.iter().all(|d| d.points.is_empty()) {
        ui.label("Select at least two years to see year-over-year changes.");
        return;
    }
    let lines = deltas
        .iter()
        .map(|d| {
            (
                format!("{} (YoY Diff)", d.country.code()),
                country_color32(d.country),
                d.points.iter().map(|p| (p.year, p.delta)).collect(),
            )
        })
        .collect();
    line_plot(ui, "year_over_year", format!("YoY Emissions Change ({UNIT})"), lines);
}

fn aggregate_plot(ui: &mut egui::Ui, results: &[AggregateResult], locale: &str) {
    let labels: Vec<String> = results.iter().map(|r| r.country.code().to_string()).collect();
    let bars: Vec<Bar> = results
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let hover = if r.has_data() {
                format!("{} {UNIT} (avg)", format_number(r.mean, locale))
            } else {
                "No Data / 0".to_string()
            };
            Bar::new(i as f64, r.mean)
                .name(format!("{}: {hover}", r.country.code()))
                .fill(country_color32(r.country))
                .width(0.7)
        })
        .collect();

    Plot::new("aggregated")
        .x_axis_label("Country")
        .y_axis_label(format!("Avg Emissions ({UNIT})"))
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            let i = mark.value.round();
            if (mark.value - i).abs() < 1e-6 && i >= 0.0 && (i as usize) < labels.len() {
                labels[i as usize].clone()
            } else {
                String::new()
            }
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(format!("Avg Emissions ({UNIT})")));
        });
}

fn table_ui(ui: &mut egui::Ui, rows: &[Observation], sort: &mut TableSort, locale: &str) {
    if rows.is_empty() {
        ui.colored_label(Color32::GRAY, "No data for selected countries.");
        return;
    }
    let columns = [
        (SortKey::Country, "Country".to_string()),
        (SortKey::Year, "Year".to_string()),
        (SortKey::Value, format!("Emissions ({UNIT})")),
    ];
    egui::ScrollArea::vertical().show(ui, |ui| {
        egui::Grid::new("emissions_table")
            .striped(true)
            .num_columns(3)
            .min_col_width(120.0)
            .show(ui, |ui| {
                for (key, title) in &columns {
                    if ui.button(format!("{title} {}", sort.marker(*key))).clicked() {
                        sort.toggle(*key);
                    }
                }
                ui.end_row();
                for r in rows {
                    ui.label(r.country.as_str());
                    ui.label(r.year.to_string());
                    let cell = format_value(r.value, locale);
                    if cell == NO_DATA {
                        ui.weak(cell);
                    } else {
                        ui.label(cell);
                    }
                    ui.end_row();
                }
            });
    });
}
