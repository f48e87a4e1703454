use crate::model::interval::midnight;
use crate::model::{Priority, Task, TaskId};
use crate::ui::theme;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use egui::{Color32, Context, RichText, Ui, Window};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("start must be before end")]
    StartNotBeforeEnd,
}

/// Editable copy of a task, split into the pieces the widgets bind to.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    /// `None` while creating.
    editing: Option<TaskId>,
    pub title: String,
    pub description: String,
    pub category: String,
    pub start_date: NaiveDate,
    pub start_hour: u32,
    pub start_minute: u32,
    pub end_date: NaiveDate,
    pub end_hour: u32,
    pub end_minute: u32,
    pub priority: Priority,
    pub color: Color32,
    pub completed: bool,
    pub error: Option<FormError>,
}

pub enum FormAction {
    None,
    Cancel,
    Save(Task),
    Delete(TaskId),
}

impl TaskForm {
    pub fn create(start: NaiveDateTime, end: NaiveDateTime, color: Color32) -> Self {
        Self {
            editing: None,
            title: String::new(),
            description: String::new(),
            category: String::new(),
            start_date: start.date(),
            start_hour: start.hour(),
            start_minute: start.minute(),
            end_date: end.date(),
            end_hour: end.hour(),
            end_minute: end.minute(),
            priority: Priority::default(),
            color,
            completed: false,
            error: None,
        }
    }

    /// Whole-day task on `day`, as opened from an empty grid cell.
    pub fn quick_create(day: NaiveDate, color: Color32) -> Self {
        Self::create(midnight(day), midnight(day + Duration::days(1)), color)
    }

    pub fn edit(task: &Task) -> Self {
        Self {
            editing: Some(task.id),
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            category: task.category.clone().unwrap_or_default(),
            priority: task.priority,
            completed: task.completed,
            ..Self::create(task.start, task.end, task.color)
        }
    }

    pub fn editing(&self) -> Option<TaskId> {
        self.editing
    }

    pub fn start(&self) -> NaiveDateTime {
        at_time(self.start_date, self.start_hour, self.start_minute)
    }

    pub fn end(&self) -> NaiveDateTime {
        at_time(self.end_date, self.end_hour, self.end_minute)
    }

    /// Build the task this form describes. Edits keep their id.
    pub fn to_task(&self) -> Result<Task, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::EmptyTitle);
        }
        let mut task = Task::new(title, self.start(), self.end());
        if !task.has_valid_interval() {
            return Err(FormError::StartNotBeforeEnd);
        }
        if let Some(id) = self.editing {
            task.id = id;
        }
        task.description = non_empty(&self.description);
        task.category = non_empty(&self.category);
        task.priority = self.priority;
        task.color = self.color;
        task.completed = self.completed;
        Ok(task)
    }
}

fn at_time(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    let time = NaiveTime::from_hms_opt(hour.min(23), minute.min(59), 0).unwrap_or(NaiveTime::MIN);
    date.and_time(time)
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Render the create/edit dialog. Escape cancels.
pub fn show_task_form(form: &mut TaskForm, palette: &[Color32], ctx: &Context) -> FormAction {
    let mut action = FormAction::None;
    let title = if form.editing.is_some() {
        "Edit Task"
    } else {
        "New Task"
    };

    Window::new(RichText::new(title).strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([380.0, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = Color32::from_rgb(20, 20, 28);
            ui.add_space(4.0);

            egui::Grid::new("task_form_grid")
                .num_columns(2)
                .striped(false)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    field_label(ui, "Title");
                    ui.add_sized(
                        [250.0, 24.0],
                        egui::TextEdit::singleline(&mut form.title).hint_text("Task title..."),
                    );
                    ui.end_row();

                    field_label(ui, "Start");
                    datetime_row(
                        ui,
                        "form_start",
                        &mut form.start_date,
                        &mut form.start_hour,
                        &mut form.start_minute,
                    );
                    ui.end_row();

                    field_label(ui, "End");
                    datetime_row(
                        ui,
                        "form_end",
                        &mut form.end_date,
                        &mut form.end_hour,
                        &mut form.end_minute,
                    );
                    ui.end_row();

                    field_label(ui, "Priority");
                    let selected = format!("{} {}", form.priority.icon(), form.priority.label());
                    egui::ComboBox::from_id_salt("form_priority")
                        .selected_text(selected)
                        .width(140.0)
                        .show_ui(ui, |ui| {
                            for p in Priority::all() {
                                ui.selectable_value(
                                    &mut form.priority,
                                    *p,
                                    format!("{} {}", p.icon(), p.label()),
                                );
                            }
                        });
                    ui.end_row();

                    field_label(ui, "Category");
                    ui.add_sized(
                        [250.0, 24.0],
                        egui::TextEdit::singleline(&mut form.category).hint_text("optional"),
                    );
                    ui.end_row();

                    field_label(ui, "Color");
                    ui.horizontal_wrapped(|ui| {
                        for color in palette {
                            color_swatch(ui, &mut form.color, *color);
                        }
                    });
                    ui.end_row();

                    field_label(ui, "Notes");
                    ui.add_sized(
                        [250.0, 60.0],
                        egui::TextEdit::multiline(&mut form.description),
                    );
                    ui.end_row();

                    ui.label("");
                    ui.checkbox(&mut form.completed, "Completed");
                    ui.end_row();
                });

            if let Some(err) = form.error {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("{} {}", egui_phosphor::regular::WARNING, err))
                        .color(theme::TEXT_ERROR),
                );
            }

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let save = egui::Button::new(RichText::new("Save").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 28.0], save).clicked() {
                    match form.to_task() {
                        Ok(task) => action = FormAction::Save(task),
                        Err(err) => form.error = Some(err),
                    }
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    action = FormAction::Cancel;
                }
                if let Some(id) = form.editing {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let delete = egui::Button::new(
                            RichText::new(format!("{} Delete", egui_phosphor::regular::TRASH))
                                .color(theme::TEXT_ERROR),
                        )
                        .frame(false);
                        if ui.add(delete).clicked() {
                            action = FormAction::Delete(id);
                        }
                    });
                }
            });
            ui.add_space(2.0);
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        action = FormAction::Cancel;
    }
    action
}

fn field_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).color(theme::TEXT_SECONDARY));
}

fn datetime_row(ui: &mut Ui, salt: &str, date: &mut NaiveDate, hour: &mut u32, minute: &mut u32) {
    ui.horizontal(|ui| {
        ui.add(egui_extras::DatePickerButton::new(date).id_salt(salt));
        ui.add(egui::DragValue::new(hour).range(0..=23).suffix("h"));
        ui.add(egui::DragValue::new(minute).range(0..=59).speed(5.0).suffix("m"));
    });
}

fn color_swatch(ui: &mut Ui, current: &mut Color32, color: Color32) {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(20.0, 20.0), egui::Sense::click());
    ui.painter().rect_filled(rect, 4.0, color);
    if *current == color {
        ui.painter()
            .rect_stroke(rect.expand(1.5), 5.0, egui::Stroke::new(2.0, Color32::WHITE));
    }
    if response.clicked() {
        *current = color;
    }
}
