//! History chart window drawn with cairo.

use libadwaita as adw;
use adw::prelude::*;
use bmi_core::chart::{ChartSeries, PlotLayout, TITLE, X_AXIS_LABEL, Y_AXIS_LABEL};
use bmi_core::BmiCategory;
use gtk4 as gtk;
use gtk::cairo;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

const MARKER_RADIUS: f64 = 4.0;

pub fn present(parent: &adw::ApplicationWindow, series: ChartSeries) {
    let area = gtk::DrawingArea::new();
    area.set_content_width(1000);
    area.set_content_height(500);
    area.set_hexpand(true);
    area.set_vexpand(true);

    area.set_draw_func(move |_, cr, width, height| {
        if let Err(err) = draw(cr, &series, width as f64, height as f64) {
            tracing::error!("Failed to draw history chart: {}", err);
        }
    });

    let window = gtk::Window::builder()
        .transient_for(parent)
        .title(TITLE)
        .default_width(1000)
        .default_height(500)
        .child(&area)
        .build();
    window.present();
}

fn reference_colour(category: BmiCategory) -> (f64, f64, f64) {
    match category {
        BmiCategory::Underweight | BmiCategory::Normal => (0.2, 0.4, 0.8),
        BmiCategory::Overweight => (0.9, 0.6, 0.0),
        BmiCategory::Obese => (0.8, 0.1, 0.1),
    }
}

fn draw(
    cr: &cairo::Context,
    series: &ChartSeries,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    cr.set_source_rgb(1.0, 1.0, 1.0);
    cr.paint()?;

    let Some(layout) = PlotLayout::compute(series, width, height) else {
        return Ok(());
    };
    let area = layout.area;
    let bottom = area.y + area.height;

    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    cr.set_line_width(1.0);

    // Grid and y tick labels
    cr.set_font_size(11.0);
    for tick in &layout.y_ticks {
        cr.set_source_rgb(0.88, 0.88, 0.88);
        cr.move_to(area.x, tick.pos);
        cr.line_to(area.x + area.width, tick.pos);
        cr.stroke()?;

        let text = format!("{:.1}", tick.value);
        let extents = cr.text_extents(&text)?;
        cr.set_source_rgb(0.2, 0.2, 0.2);
        cr.move_to(area.x - extents.x_advance() - 6.0, tick.pos + extents.height() / 2.0);
        cr.show_text(&text)?;
    }

    // Vertical grid and rotated date labels
    for label in &layout.x_labels {
        cr.set_source_rgb(0.88, 0.88, 0.88);
        cr.move_to(label.x, area.y);
        cr.line_to(label.x, bottom);
        cr.stroke()?;

        let extents = cr.text_extents(&label.text)?;
        cr.save()?;
        cr.translate(label.x, bottom + 8.0);
        cr.rotate(-FRAC_PI_4);
        cr.set_source_rgb(0.2, 0.2, 0.2);
        cr.move_to(-extents.x_advance(), extents.height() / 2.0);
        cr.show_text(&label.text)?;
        cr.restore()?;
    }

    // Category boundaries
    cr.set_dash(&[6.0, 4.0], 0.0);
    for line in &layout.reference_lines {
        let (r, g, b) = reference_colour(line.category);
        cr.set_source_rgb(r, g, b);
        cr.move_to(area.x, line.tick.pos);
        cr.line_to(area.x + area.width, line.tick.pos);
        cr.stroke()?;
    }
    cr.set_dash(&[], 0.0);

    // Axes
    cr.set_source_rgb(0.0, 0.0, 0.0);
    cr.rectangle(area.x, area.y, area.width, area.height);
    cr.stroke()?;

    // Series
    cr.set_source_rgb(0.0, 0.5, 0.0);
    cr.set_line_width(2.0);
    for (i, point) in layout.points.iter().enumerate() {
        if i == 0 {
            cr.move_to(point.x, point.y);
        } else {
            cr.line_to(point.x, point.y);
        }
    }
    cr.stroke()?;

    for point in &layout.points {
        cr.new_sub_path();
        cr.arc(point.x, point.y, MARKER_RADIUS, 0.0, 2.0 * PI);
        cr.fill()?;
    }

    // Title and axis labels
    cr.set_source_rgb(0.0, 0.0, 0.0);
    cr.set_font_size(16.0);
    let extents = cr.text_extents(TITLE)?;
    cr.move_to(area.x + (area.width - extents.x_advance()) / 2.0, area.y - 16.0);
    cr.show_text(TITLE)?;

    cr.set_font_size(12.0);
    let extents = cr.text_extents(X_AXIS_LABEL)?;
    cr.move_to(area.x + (area.width - extents.x_advance()) / 2.0, height - 8.0);
    cr.show_text(X_AXIS_LABEL)?;

    let extents = cr.text_extents(Y_AXIS_LABEL)?;
    cr.save()?;
    cr.translate(16.0, area.y + (area.height + extents.x_advance()) / 2.0);
    cr.rotate(-FRAC_PI_2);
    cr.move_to(0.0, 0.0);
    cr.show_text(Y_AXIS_LABEL)?;
    cr.restore()?;

    Ok(())
}
