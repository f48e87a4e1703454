use crate::model::{Priority, Task, TaskFilter, TaskId, TaskStats};
use crate::ui::theme;
use egui::{Color32, RichText, Ui};
use egui_phosphor::regular as icons;

/// Actions that the sidebar can request.
pub enum SidebarAction {
    None,
    Edit(TaskId),
    ToggleCompleted(TaskId),
}

/// Render the left panel: counters, filters, and this week's task list.
///
/// The filter is edited in place; `visible` is the already-filtered list.
pub fn show_sidebar(
    stats: TaskStats,
    categories: &[String],
    visible: &[Task],
    filter: &mut TaskFilter,
    ui: &mut Ui,
) -> SidebarAction {
    let mut action = SidebarAction::None;

    ui.add_space(4.0);
    show_stats(stats, ui);
    ui.add_space(6.0);
    ui.separator();

    // ── Filters ─────────────────────────────────────────────────────
    ui.horizontal(|ui| {
        ui.label(RichText::new("Filters").strong().color(theme::TEXT_PRIMARY));
        let active = filter.active_count();
        if active > 0 {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .small_button(format!("{} Clear ({})", icons::X, active))
                    .clicked()
                {
                    filter.clear();
                }
            });
        }
    });

    ui.add(
        egui::TextEdit::singleline(&mut filter.search)
            .hint_text(format!("{} Search...", icons::MAGNIFYING_GLASS))
            .desired_width(f32::INFINITY),
    );

    ui.add_space(2.0);
    ui.horizontal_wrapped(|ui| {
        for p in Priority::all() {
            let selected = filter.priorities.contains(p);
            let text = RichText::new(format!("{} {}", p.icon(), p.label()))
                .size(11.0)
                .color(theme::priority_color(*p));
            if ui.selectable_label(selected, text).clicked() {
                filter.toggle_priority(*p);
            }
        }
    });

    ui.horizontal(|ui| {
        for (value, label) in [(None, "All"), (Some(false), "Pending"), (Some(true), "Done")] {
            if ui
                .selectable_label(filter.completed == value, RichText::new(label).size(11.0))
                .clicked()
            {
                filter.completed = value;
            }
        }
    });

    if !categories.is_empty() {
        ui.horizontal_wrapped(|ui| {
            for c in categories {
                let selected = filter.categories.contains(c);
                if ui
                    .selectable_label(selected, RichText::new(format!("# {c}")).size(11.0))
                    .clicked()
                {
                    filter.toggle_category(c);
                }
            }
        });
    }

    ui.add_space(6.0);
    ui.separator();

    // ── This week ───────────────────────────────────────────────────
    ui.horizontal(|ui| {
        ui.label(RichText::new("This week").strong().color(theme::TEXT_PRIMARY));
        ui.label(
            RichText::new(format!("({})", visible.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(2.0);

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if visible.is_empty() {
                ui.label(RichText::new("Nothing scheduled").italics().color(theme::TEXT_DIM));
            }
            for (i, task) in visible.iter().enumerate() {
                let frame = egui::Frame {
                    fill: if i % 2 == 0 { theme::BG_PANEL } else { theme::BG_DARK },
                    rounding: egui::Rounding::same(4.0),
                    inner_margin: egui::Margin::symmetric(6.0, 4.0),
                    ..Default::default()
                };

                let frame_resp = frame.show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 6.0;

                        let mut done = task.completed;
                        if ui.checkbox(&mut done, "").changed() {
                            action = SidebarAction::ToggleCompleted(task.id);
                        }

                        let (dot_rect, _) =
                            ui.allocate_exact_size(egui::vec2(6.0, 6.0), egui::Sense::hover());
                        ui.painter().circle_filled(dot_rect.center(), 3.0, task.color);

                        let name = RichText::new(&task.title).size(12.0);
                        let name = if task.completed {
                            name.strikethrough().color(theme::TEXT_DIM)
                        } else {
                            name.color(theme::TEXT_PRIMARY)
                        };
                        ui.add(egui::Label::new(name).truncate());

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(
                                RichText::new(task.priority.icon())
                                    .size(11.0)
                                    .color(theme::priority_color(task.priority)),
                            );
                            ui.label(
                                RichText::new(task.start.format("%a %H:%M").to_string())
                                    .size(10.0)
                                    .color(theme::TEXT_SECONDARY),
                            );
                        });
                    });
                });

                let row_click = ui.interact(
                    frame_resp.response.rect,
                    egui::Id::new(("sidebar-row", task.id)),
                    egui::Sense::click(),
                );
                if row_click.clicked() {
                    action = SidebarAction::Edit(task.id);
                }
                ui.add_space(1.0);
            }
        });

    action
}

fn show_stats(stats: TaskStats, ui: &mut Ui) {
    ui.columns(4, |cols| {
        stat(&mut cols[0], "Total", stats.total, theme::TEXT_PRIMARY);
        stat(&mut cols[1], "Done", stats.completed, theme::priority_color(Priority::Low));
        stat(&mut cols[2], "Pending", stats.pending, theme::TEXT_SECONDARY);
        stat(
            &mut cols[3],
            "Urgent",
            stats.high_priority_pending,
            theme::priority_color(Priority::High),
        );
    });
}

fn stat(ui: &mut Ui, label: &str, value: usize, color: Color32) {
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(value.to_string()).size(18.0).strong().color(color));
        ui.label(RichText::new(label).size(9.5).color(theme::TEXT_DIM));
    });
}
