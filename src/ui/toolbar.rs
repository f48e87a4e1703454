use crate::engine::Command;
use crate::model::Week;
use crate::ui::theme;
use egui::{menu, Color32, RichText, Ui};
use egui_phosphor::regular as icons;

pub enum ToolbarAction {
    None,
    Navigate(Command),
    NewTask,
}

/// Render the top bar: week navigation on the left, title in the middle,
/// new-task button on the right.
pub fn show_toolbar(week: Week, ui: &mut Ui) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    menu::bar(ui, |ui| {
        ui.spacing_mut().item_spacing.x = 4.0;

        if ui
            .button(RichText::new(icons::CARET_LEFT).size(14.0))
            .on_hover_text("Previous week")
            .clicked()
        {
            action = ToolbarAction::Navigate(Command::PrevWeek);
        }
        if ui.button("Today").clicked() {
            action = ToolbarAction::Navigate(Command::GoTo(chrono::Local::now().date_naive()));
        }
        if ui
            .button(RichText::new(icons::CARET_RIGHT).size(14.0))
            .on_hover_text("Next week")
            .clicked()
        {
            action = ToolbarAction::Navigate(Command::NextWeek);
        }

        ui.add_space(12.0);
        ui.label(
            RichText::new(week_title(&week))
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let btn = egui::Button::new(
                RichText::new(format!("{}  New Task", icons::PLUS))
                    .color(Color32::WHITE)
                    .size(12.0),
            )
            .fill(theme::ACCENT)
            .rounding(egui::Rounding::same(5.0));
            if ui.add(btn).clicked() {
                action = ToolbarAction::NewTask;
            }
        });
    });

    action
}

/// "20 - 26 Jan 2025", or "27 Jan - 2 Feb 2025" across a month boundary.
fn week_title(week: &Week) -> String {
    let first = week.start();
    let last = week.last_day();
    if first.format("%m%Y").to_string() == last.format("%m%Y").to_string() {
        format!("{} - {}", first.format("%-d"), last.format("%-d %b %Y"))
    } else if first.format("%Y").to_string() == last.format("%Y").to_string() {
        format!("{} - {}", first.format("%-d %b"), last.format("%-d %b %Y"))
    } else {
        format!("{} - {}", first.format("%-d %b %Y"), last.format("%-d %b %Y"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn week_of(y: i32, m: u32, d: u32) -> Week {
        Week::containing(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn title_shortens_shared_month_and_year() {
        assert_eq!(week_title(&week_of(2025, 1, 22)), "20 - 26 Jan 2025");
        assert_eq!(week_title(&week_of(2025, 1, 29)), "27 Jan - 2 Feb 2025");
        assert_eq!(week_title(&week_of(2024, 12, 31)), "30 Dec 2024 - 5 Jan 2025");
    }
}
