// src/ui/automated_checks.rs
use eframe::egui;

use crate::android::unified_results::failure_counts_by_rule;
use crate::android::{InstanceResultStatus, UnifiedResult};
use crate::state::AppState;

fn status_text(status: InstanceResultStatus) -> egui::RichText {
    match status {
        InstanceResultStatus::Pass => egui::RichText::new("Pass").color(egui::Color32::GREEN),
        InstanceResultStatus::Fail => egui::RichText::new("Fail").color(egui::Color32::RED),
        InstanceResultStatus::Unknown => egui::RichText::new("Needs review").color(egui::Color32::YELLOW),
    }
}

pub fn show_automated_checks_view(ui: &mut egui::Ui, state: &AppState) {
    let android = &state.android;
    let Some(scan) = &android.scan else {
        ui.heading("Automated checks");
        ui.label("No scan loaded. Use File → Import Android scan.");
        ui.add_space(8.0);
        ui.strong("Checked rules");
        for rule in state.rule_provider.rules() {
            ui.label(format!("{}: {}", rule.rule_id, rule.rule_description));
        }
        return;
    };

    ui.heading(format!("Automated checks: {}", scan.app_identifier));
    ui.label(format!(
        "{} · scanned {}",
        scan.device_name,
        scan.scan_timestamp.format("%Y-%m-%d %H:%M UTC")
    ));
    ui.add_space(8.0);

    let failures = failure_counts_by_rule(&android.unified_results);
    let total_failures: usize = failures.values().sum();
    ui.label(format!(
        "{} failure(s) across {} rule(s)",
        total_failures,
        failures.len()
    ));
    ui.separator();

    if android.unified_rules.is_empty() {
        ui.label("No results for known rules");
        return;
    }

    egui::ScrollArea::vertical()
        .id_source("automated_checks_scroll")
        .show(ui, |ui| {
            for rule in &android.unified_rules {
                let count = failures.get(rule.id.as_str()).copied().unwrap_or(0);
                egui::CollapsingHeader::new(format!("{} ({})", rule.id, count))
                    .id_source(("automated_check_rule", &rule.id))
                    .default_open(count > 0)
                    .show(ui, |ui| {
                        ui.label(&rule.description);
                        ui.add_space(4.0);
                        for result in android.results_for_rule(&rule.id) {
                            show_result(ui, result);
                        }
                    });
            }
        });
}

fn show_result(ui: &mut egui::Ui, result: &UnifiedResult) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(status_text(result.status));
            if let Some(descriptors) = &result.descriptors {
                ui.monospace(&descriptors.class_name);
                if let Some(text) = descriptors.text.as_ref().or(descriptors.content_description.as_ref()) {
                    ui.label(format!("\"{}\"", text));
                }
                let bounds = descriptors.bounds;
                ui.weak(format!("{}×{} at ({}, {})", bounds.width(), bounds.height(), bounds.left, bounds.top));
            }
        });
        ui.label(&result.resolution.how_to_fix_summary);
    });
}
