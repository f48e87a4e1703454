use chrono::Duration;
use std::time::Instant;

use crate::config::AppSettings;
use crate::engine::{Command, Planner, PlannerEvent};
use crate::model::filter::categories;
use crate::model::interval::midnight;
use crate::model::{Priority, Task, TaskBoard, TaskId, TaskStats, Week};
use crate::ui;
use crate::ui::sidebar::SidebarAction;
use crate::ui::task_form::{FormAction, TaskForm};
use crate::ui::toolbar::ToolbarAction;

/// Main application state.
pub struct PlannerApp {
    pub planner: Planner,
    pub settings: AppSettings,
    /// Open create/edit dialog, if any.
    pub form: Option<TaskForm>,
    pub status_message: String,
}

impl PlannerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: AppSettings) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        ui::theme::apply_theme(&cc.egui_ctx);

        Self::with_settings(settings, Week::current())
    }

    fn with_settings(settings: AppSettings, week: Week) -> Self {
        let tasks = if settings.load_sample_tasks {
            sample_tasks(&week, &settings)
        } else {
            Vec::new()
        };
        tracing::info!(tasks = tasks.len(), week = %week.start(), "planner ready");

        Self {
            planner: Planner::new(TaskBoard::new(tasks), week)
                .with_debounce(settings.click_debounce()),
            settings,
            form: None,
            status_message: "Ready".to_string(),
        }
    }

    /// Feed one command to the planner and react to what it reports.
    pub fn dispatch(&mut self, command: Command) {
        let events = self.planner.handle(command, Instant::now());
        for event in events {
            self.on_event(event);
        }
    }

    fn on_event(&mut self, event: PlannerEvent) {
        match event {
            PlannerEvent::Committed { id, start, end } => {
                let title = self
                    .planner
                    .board()
                    .get(id)
                    .map(|t| t.title.clone())
                    .unwrap_or_default();
                self.status_message = format!(
                    "Updated '{}' ({} - {})",
                    title,
                    start.format("%a %-d %b %H:%M"),
                    end.format("%a %-d %b %H:%M")
                );
            }
            PlannerEvent::EditRequested(id) => {
                self.form = self.planner.board().get(id).map(TaskForm::edit);
            }
            PlannerEvent::DeleteRequested(id) => self.delete_task(id),
            PlannerEvent::EmptyCellClicked { day, .. } => {
                self.form = Some(TaskForm::quick_create(day, self.next_color()));
            }
            PlannerEvent::WeekChanged(week) => {
                self.status_message = format!("Week of {}", week.start().format("%-d %b %Y"));
            }
        }
    }

    fn next_color(&self) -> egui::Color32 {
        self.settings.palette_color(self.planner.board().len())
    }

    /// New-task button: one hour at 09:00 today, or on the first visible day
    /// when today is not in view.
    fn open_new_task(&mut self) {
        let week = self.planner.week();
        let today = chrono::Local::now().date_naive();
        let day = if week.contains_day(today) {
            today
        } else {
            week.start()
        };
        let start = midnight(day) + Duration::hours(9);
        self.form = Some(TaskForm::create(
            start,
            start + Duration::hours(1),
            self.next_color(),
        ));
    }

    fn delete_task(&mut self, id: TaskId) {
        if let Some(task) = self.planner.delete_task(id) {
            self.status_message = format!("Deleted '{}'", task.title);
        }
    }

    fn apply_form_action(&mut self, action: FormAction) {
        match action {
            FormAction::None => {}
            FormAction::Cancel => self.form = None,
            FormAction::Save(task) => {
                let title = task.title.clone();
                let editing = self.form.as_ref().and_then(TaskForm::editing).is_some();
                if editing {
                    self.planner.update_task(task);
                    self.status_message = format!("Saved '{}'", title);
                } else {
                    self.planner.add_task(task);
                    self.status_message = format!("Added '{}'", title);
                }
                self.form = None;
            }
            FormAction::Delete(id) => {
                self.delete_task(id);
                self.form = None;
            }
        }
    }
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top panel: week navigation
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| ui::toolbar::show_toolbar(self.planner.week(), ui))
            .inner;
        match toolbar_action {
            ToolbarAction::None => {}
            ToolbarAction::Navigate(command) => self.dispatch(command),
            ToolbarAction::NewTask => self.open_new_task(),
        }

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    let count = if self.planner.board().is_empty() {
                        "No tasks".to_string()
                    } else {
                        format!("Tasks: {}", self.planner.board().len())
                    };
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(count)
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: stats, filters, task list
        let stats = TaskStats::collect(self.planner.board().tasks());
        let known_categories = categories(self.planner.board().tasks());
        let visible = self.planner.visible_tasks();
        let sidebar_action = egui::SidePanel::left("sidebar")
            .resizable(true)
            .default_width(280.0)
            .min_width(220.0)
            .show(ctx, |ui| {
                ui::sidebar::show_sidebar(
                    stats,
                    &known_categories,
                    &visible,
                    &mut self.planner.filter,
                    ui,
                )
            })
            .inner;
        match sidebar_action {
            SidebarAction::None => {}
            SidebarAction::Edit(id) => self.form = self.planner.board().get(id).map(TaskForm::edit),
            SidebarAction::ToggleCompleted(id) => self.planner.toggle_completed(id),
        }

        // Central panel: the week grid
        let grid_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        let interactive = self.form.is_none();
        let commands = egui::CentralPanel::default()
            .frame(grid_frame)
            .show(ctx, |ui| ui::week_grid::show_week_grid(&self.planner, interactive, ui))
            .inner;
        for command in commands {
            self.dispatch(command);
        }

        // Dialog
        if let Some(form) = &mut self.form {
            let action = ui::task_form::show_task_form(form, &self.settings.task_palette, ctx);
            self.apply_form_action(action);
        }

        if self.planner.suppressing_clicks(Instant::now()) {
            ctx.request_repaint_after(self.settings.click_debounce());
        }
    }
}

/// Demo content placed relative to `week` so it is always on screen.
fn sample_tasks(week: &Week, settings: &AppSettings) -> Vec<Task> {
    let at = |day: i64, hour: i64| midnight(week.day(day)) + Duration::hours(hour);
    let make = |n: usize, title: &str, start, end, priority, category: Option<&str>| {
        let mut task = Task::new(title, start, end);
        task.color = settings.palette_color(n);
        task.priority = priority;
        task.category = category.map(str::to_string);
        task
    };

    let (work, personal) = (Some("work"), Some("personal"));
    let mut planning = make(0, "Sprint planning", at(0, 9), at(0, 12), Priority::High, work);
    planning.description = Some("Agree on scope for the week".to_string());
    let mut review = make(1, "Design review", at(1, 0), at(3, 0), Priority::Medium, work);
    review.completed = true;

    vec![
        planning,
        review,
        make(2, "Write report", at(2, 8), at(4, 18), Priority::High, work),
        make(3, "Dentist", at(3, 15), at(3, 16), Priority::Low, personal),
        make(4, "Release", at(4, 0), at(5, 0), Priority::High, work),
        make(5, "Hiking trip", at(5, 7), at(7, 0), Priority::Low, personal),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{DragPayload, Grip};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn app() -> PlannerApp {
        let week = Week::containing(NaiveDate::from_ymd_opt(2025, 1, 22).unwrap());
        PlannerApp::with_settings(AppSettings::default(), week)
    }

    fn click(app: &mut PlannerApp, payload: DragPayload) {
        app.dispatch(Command::PointerDown(payload));
        app.dispatch(Command::PointerUp);
    }

    #[test]
    fn sample_tasks_are_valid_and_on_screen() {
        let app = app();
        let tasks = app.planner.board().tasks();
        assert_eq!(tasks.len(), 6);
        assert!(tasks.iter().all(Task::has_valid_interval));
        assert_eq!(app.planner.visible_tasks().len(), tasks.len());
    }

    #[test]
    fn sample_tasks_can_be_disabled() {
        let settings = AppSettings {
            load_sample_tasks: false,
            ..Default::default()
        };
        let app = PlannerApp::with_settings(settings, Week::current());
        assert!(app.planner.board().is_empty());
    }

    #[test]
    fn empty_cell_click_opens_a_whole_day_form_and_saves_a_task() {
        let mut app = PlannerApp::with_settings(
            AppSettings {
                load_sample_tasks: false,
                ..Default::default()
            },
            Week::containing(NaiveDate::from_ymd_opt(2025, 1, 22).unwrap()),
        );
        let day = app.planner.week().day(2);
        click(&mut app, DragPayload::TimeSlot { day, hour: 0 });

        let mut form = app.form.clone().unwrap();
        assert_eq!(form.start(), midnight(day));
        assert_eq!(form.end(), midnight(day + Duration::days(1)));

        form.title = "Offsite".into();
        let task = form.to_task().unwrap();
        app.apply_form_action(FormAction::Save(task));
        assert!(app.form.is_none());
        assert_eq!(app.planner.board().len(), 1);
        assert_eq!(app.planner.board().tasks()[0].title, "Offsite");
    }

    #[test]
    fn clicking_a_bar_edits_it_in_place() {
        let mut app = app();
        let first = app.planner.board().tasks()[0].clone();
        click(
            &mut app,
            DragPayload::Task {
                id: first.id,
                grip: Grip::Body,
            },
        );

        let mut form = app.form.clone().unwrap();
        assert_eq!(form.editing(), Some(first.id));
        form.title = "Renamed".into();
        let edited = form.to_task().unwrap();
        app.apply_form_action(FormAction::Save(edited));

        assert_eq!(app.planner.board().len(), 6);
        assert_eq!(app.planner.board().get(first.id).map(|t| t.title.as_str()), Some("Renamed"));
    }

    #[test]
    fn delete_command_removes_the_task() {
        let mut app = app();
        let id = app.planner.board().tasks()[3].id;
        app.dispatch(Command::Delete(id));
        assert!(app.planner.board().get(id).is_none());
        assert_eq!(app.status_message, "Deleted 'Dentist'");
    }
}
