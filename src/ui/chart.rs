use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use brewery_dashboard::data::summary::SummaryStatistics;

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Type breakdown chart (central panel)
// ---------------------------------------------------------------------------

/// Bar per brewery type in the filtered result, largest first.
pub fn type_breakdown(ui: &mut Ui, summary: &SummaryStatistics, colors: &ColorMap) {
    if summary.type_breakdown.is_empty() {
        return;
    }

    Plot::new("type_breakdown")
        .legend(Legend::default())
        .height(160.0)
        .y_axis_label("Breweries")
        .show_x(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            // One chart per type so each gets its own legend entry.
            for (i, (brewery_type, count)) in summary.type_breakdown.iter().enumerate() {
                let color = colors.color_for(brewery_type);
                let bar = Bar::new(i as f64, *count as f64)
                    .width(0.7)
                    .fill(color);
                let chart = BarChart::new(vec![bar])
                    .name(brewery_type.label())
                    .color(color);
                plot_ui.bar_chart(chart);
            }
        });
}
