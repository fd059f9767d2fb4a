//! The eframe/egui implementation for the live power chart.
//!
//! Three stacked plots (voltage, current, power) share the store's time
//! axis, mirroring the instrument's front panel: panning or zooming one
//! plot moves the other two with it, and the axis labels show elapsed time
//! as `HH:MM:SS` rather than raw day fractions. The GUI owns scheduling:
//! each frame runs one acquisition tick, then renders whatever the store
//! holds. It never mutates measurement data.

use crate::acquisition::Acquisition;
use egui::Color32;
use egui_plot::{Line, Plot, PlotPoints};
use log::error;
use std::time::Duration;

/// A rendered series: store accessor plus presentation.
struct Channel {
    name: &'static str,
    unit: &'static str,
    color: Color32,
}

const CHANNELS: [Channel; 3] = [
    Channel {
        name: "voltage",
        unit: "V",
        color: Color32::from_rgb(0x1f, 0x77, 0xb4),
    },
    Channel {
        name: "current",
        unit: "A",
        color: Color32::from_rgb(0xd6, 0x27, 0x28),
    },
    Channel {
        name: "power",
        unit: "W",
        color: Color32::from_rgb(0xff, 0x7f, 0x0e),
    },
];

/// Render a day-fraction time value as `HH:MM:SS` for the x axis.
fn format_elapsed(day_fraction: f64) -> String {
    let secs = (day_fraction * 86_400.0).round() as i64;
    let sign = if secs < 0 { "-" } else { "" };
    let secs = secs.abs();
    format!(
        "{sign}{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

pub struct Gui {
    acquisition: Acquisition,
    tick_interval: Duration,
}

impl Gui {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        acquisition: Acquisition,
        tick_interval: Duration,
    ) -> Self {
        Self {
            acquisition,
            tick_interval,
        }
    }
}

impl eframe::App for Gui {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Decode/append first, then render the updated series.
        if let Err(err) = self.acquisition.tick() {
            error!("Acquisition tick failed: {}", err);
        }

        egui::TopBottomPanel::top("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Power Chart");
                ui.separator();
                let store = self.acquisition.store();
                ui.label(format!(
                    "{} samples ({} accepted this run, {} duplicates dropped)",
                    store.len(),
                    self.acquisition.accepted(),
                    self.acquisition.duplicates()
                ));
                if let (Some(v), Some(i), Some(p)) = (
                    store.voltage().last(),
                    store.current().last(),
                    store.power().last(),
                ) {
                    ui.separator();
                    ui.label(format!("{v:.1} V  {i:.3} A  {p:.2} W"));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let spacing = ui.spacing().item_spacing.y;
            let plot_height =
                (ui.available_height() / CHANNELS.len() as f32 - spacing * 2.0).max(60.0);
            let store = self.acquisition.store();
            let time = store.time();

            for channel in &CHANNELS {
                let values = match channel.name {
                    "voltage" => store.voltage(),
                    "current" => store.current(),
                    _ => store.power(),
                };
                ui.label(format!("{} [{}]", channel.name, channel.unit));
                let line = Line::new(PlotPoints::from_iter(
                    time.iter().zip(values).map(|(&t, &v)| [t, v]),
                ))
                .color(channel.color);
                Plot::new(channel.name)
                    .height(plot_height)
                    .link_axis(egui::Id::new("time"), true, false)
                    .x_axis_formatter(|mark, _range| format_elapsed(mark.value))
                    .show(ui, |plot_ui| {
                        plot_ui.line(line);
                    });
            }
        });

        ctx.request_repaint_after(self.tick_interval);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.acquisition.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_day_fractions_as_clock_time() {
        assert_eq!(format_elapsed(5.0 / 86_400.0), "00:00:05");
        assert_eq!(format_elapsed(0.0), "00:00:00");
        // 1 h 30 m is exactly 0.0625 days.
        assert_eq!(format_elapsed(0.0625), "01:30:00");
        assert_eq!(format_elapsed(1.0), "24:00:00");
    }

    #[test]
    fn formats_panned_negative_times() {
        assert_eq!(format_elapsed(-5.0 / 86_400.0), "-00:00:05");
    }
}
