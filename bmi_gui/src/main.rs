mod chart_view;
mod handlers;

use libadwaita as adw;
use adw::prelude::*;
use adw::Application;
use bmi_core::{Config, Field, JsonFileStore};
use gtk4 as gtk;
use handlers::{
    AppState, CalcOutcome, HistoryOutcome, INPUT_ERROR_TITLE, NO_DATA_TEXT, NO_DATA_TITLE,
};
use std::cell::RefCell;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;
use tracing::Level;

fn init_logging(data_dir: &Path) {
    let log_path = data_dir.join("bmi_gui.log");
    let _ = std::fs::create_dir_all(data_dir);

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(move || -> Box<dyn Write + Send> {
            match std::fs::File::options()
                .create(true)
                .append(true)
                .open(&log_path)
            {
                Ok(f) => Box::new(f),
                Err(_) => Box::new(std::io::stderr()),
            }
        })
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() -> glib::ExitCode {
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let data_dir = config.data.data_dir.clone();
    init_logging(&data_dir);
    if let Some(e) = config_error {
        tracing::warn!("Config load failed: {}; using defaults.", e);
    }

    let state = Rc::new(RefCell::new(AppState {
        store: Box::new(JsonFileStore::new(config.history_path(&data_dir))),
        threshold: config.guidance.loss_threshold,
    }));

    let app = Application::builder()
        .application_id("com.bmitracker.gui")
        .build();

    app.connect_activate(move |app| {
        build_main_window(app, state.clone());
    });

    app.run()
}

fn build_main_window(app: &Application, state: Rc<RefCell<AppState>>) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .default_width(360)
        .default_height(360)
        .title("BMI Calculator")
        .build();

    let content = gtk::Box::new(gtk::Orientation::Vertical, 12);
    content.set_margin_top(12);
    content.set_margin_bottom(12);
    content.set_margin_start(12);
    content.set_margin_end(12);
    window.set_content(Some(&content));

    let grid = gtk::Grid::new();
    grid.set_row_spacing(6);
    grid.set_column_spacing(10);
    content.append(&grid);

    let weight_label = gtk::Label::new(Some("Weight (kg):"));
    weight_label.set_xalign(0.0);
    let weight_entry = gtk::Entry::new();
    weight_entry.set_hexpand(true);
    grid.attach(&weight_label, 0, 0, 1, 1);
    grid.attach(&weight_entry, 1, 0, 1, 1);

    let height_label = gtk::Label::new(Some("Height (m):"));
    height_label.set_xalign(0.0);
    let height_entry = gtk::Entry::new();
    height_entry.set_hexpand(true);
    grid.attach(&height_label, 0, 1, 1, 1);
    grid.attach(&height_entry, 1, 1, 1, 1);

    let calculate = gtk::Button::with_label("Calculate BMI");
    content.append(&calculate);

    let result_label = gtk::Label::new(None);
    result_label.set_wrap(true);
    result_label.set_max_width_chars(40);
    result_label.set_xalign(0.0);
    result_label.set_justify(gtk::Justification::Left);
    content.append(&result_label);

    let view_history = gtk::Button::with_label("View History Graph");
    content.append(&view_history);

    {
        let state = state.clone();
        let window = window.clone();
        let weight_entry = weight_entry.clone();
        let height_entry = height_entry.clone();
        let result_label = result_label.clone();
        calculate.connect_clicked(move |_| {
            let now = chrono::Local::now().naive_local();
            let outcome = handlers::on_calculate(
                &mut state.borrow_mut(),
                weight_entry.text().as_str(),
                height_entry.text().as_str(),
                now,
            );
            match outcome {
                Ok(CalcOutcome::Shown(text)) => {
                    result_label.set_text(&text);
                    result_label.add_css_class("accent");
                }
                Ok(CalcOutcome::InvalidInput { detail, field }) => {
                    match field {
                        Some(Field::Weight) => weight_entry.grab_focus(),
                        Some(Field::Height) => height_entry.grab_focus(),
                        None => false,
                    };
                    show_message(&window, gtk::MessageType::Error, INPUT_ERROR_TITLE, &detail);
                }
                Err(err) => {
                    tracing::error!("Failed to record reading: {}", err);
                    show_message(
                        &window,
                        gtk::MessageType::Error,
                        "Save Failed",
                        &err.to_string(),
                    );
                }
            }
        });
    }

    {
        let state = state.clone();
        let window = window.clone();
        view_history.connect_clicked(move |_| {
            match handlers::on_view_history(&state.borrow()) {
                Ok(HistoryOutcome::Chart(series)) => chart_view::present(&window, series),
                Ok(HistoryOutcome::NoData) => {
                    show_message(&window, gtk::MessageType::Info, NO_DATA_TITLE, NO_DATA_TEXT);
                }
                Err(err) => {
                    tracing::error!("Failed to load history: {}", err);
                    show_message(&window, gtk::MessageType::Info, NO_DATA_TITLE, NO_DATA_TEXT);
                }
            }
        });
    }

    window.present();
}

fn show_message(
    parent: &adw::ApplicationWindow,
    kind: gtk::MessageType,
    title: &str,
    body: &str,
) {
    let dialog = gtk::MessageDialog::builder()
        .transient_for(parent)
        .modal(true)
        .message_type(kind)
        .buttons(gtk::ButtonsType::Ok)
        .text(title)
        .secondary_text(body)
        .build();
    dialog.connect_response(|dialog, _| dialog.close());
    dialog.present();
}
