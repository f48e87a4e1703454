use crate::engine::rows::columns;
use crate::engine::{Command, DragMode, DragPayload, GridRect, Grip, Planner};
use crate::model::interval::clamp_to_window;
use crate::model::{Task, TaskId, Week, DAYS_IN_WEEK};
use crate::ui::theme;
use chrono::{Datelike, Weekday};
use egui::{Color32, CursorIcon, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};

const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const ROW_GAP: f32 = theme::ROW_GAP;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const HANDLE_WIDTH: f32 = theme::HANDLE_WIDTH;

/// Screen areas of one rendered bar, used for hit testing.
#[derive(Debug, Clone, Copy)]
struct BarHit {
    id: TaskId,
    body: Rect,
    delete: Option<Rect>,
}

impl BarHit {
    fn start_handle(&self) -> Rect {
        Rect::from_min_max(
            self.body.left_top(),
            Pos2::new(self.body.left() + HANDLE_WIDTH, self.body.bottom()),
        )
    }

    fn end_handle(&self) -> Rect {
        Rect::from_min_max(
            Pos2::new(self.body.right() - HANDLE_WIDTH, self.body.top()),
            self.body.right_bottom(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Hit {
    Delete(TaskId),
    Payload(DragPayload),
}

/// Render the week grid and translate this frame's pointer input into
/// planner commands. Pass `interactive = false` while a modal is open.
pub fn show_week_grid(planner: &Planner, interactive: bool, ui: &mut Ui) -> Vec<Command> {
    let week = planner.week();
    let (tasks, layout) = planner.layout();

    let available = ui.available_size();
    let rows_height = layout.row_count as f32 * (ROW_HEIGHT + ROW_GAP) + ROW_GAP;
    let height = (HEADER_HEIGHT + rows_height + ROW_HEIGHT)
        .max(available.y)
        .max(theme::MIN_GRID_HEIGHT);

    let mut commands = Vec::new();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .drag_to_scroll(false)
        .show(ui, |ui| {
            let size = Vec2::new(ui.available_width(), height);
            let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
            let canvas = response.rect;
            let grid = Rect::from_min_max(
                Pos2::new(canvas.left(), canvas.top() + HEADER_HEIGHT),
                canvas.right_bottom(),
            );
            let col_width = grid.width() / DAYS_IN_WEEK as f32;

            painter.rect_filled(canvas, 0.0, theme::BG_DARK);
            draw_day_header(&painter, canvas, &week, col_width);
            draw_columns(&painter, grid, col_width);

            let hover = ui.input(|i| i.pointer.hover_pos());
            if let Some(pos) = hover.filter(|p| grid.contains(*p)) {
                let col = ((pos.x - grid.left()) / col_width).floor().max(0.0);
                let cell = Rect::from_min_size(
                    Pos2::new(grid.left() + col * col_width, grid.top()),
                    Vec2::new(col_width, grid.height()),
                );
                painter.rect_filled(cell, 0.0, theme::BG_CELL_HOVER);
            }

            // A dragged task is drawn at its preview position.
            let session = planner.active_session();
            let mut hits = Vec::with_capacity(layout.placements.len());
            for (task, placement) in tasks.iter().zip(&layout.placements) {
                let (first_col, last_col) = match planner.preview_for(task.id) {
                    Some(preview) => columns(
                        &clamp_to_window(&preview, week.start_instant(), week.end_exclusive()),
                        &week,
                    ),
                    None => (placement.first_col, placement.last_col),
                };
                let body = Rect::from_min_max(
                    Pos2::new(
                        grid.left() + first_col as f32 * col_width + theme::BAR_INSET,
                        grid.top() + ROW_GAP + placement.row as f32 * (ROW_HEIGHT + ROW_GAP),
                    ),
                    Pos2::new(
                        grid.left() + (last_col + 1) as f32 * col_width - theme::BAR_INSET,
                        grid.top() + ROW_GAP + placement.row as f32 * (ROW_HEIGHT + ROW_GAP)
                            + ROW_HEIGHT,
                    ),
                );
                let active_mode = session.filter(|s| s.task_id == task.id).map(|s| s.mode);
                let hovered = hover.is_some_and(|p| body.contains(p));
                let delete = draw_task_bar(&painter, task, body, active_mode, hovered);
                hits.push(BarHit {
                    id: task.id,
                    body,
                    delete,
                });
            }

            match session {
                Some(s) => {
                    let icon = match s.mode {
                        DragMode::Move => CursorIcon::Grabbing,
                        DragMode::ResizeStart | DragMode::ResizeEnd => CursorIcon::ResizeHorizontal,
                    };
                    ui.ctx().set_cursor_icon(icon);
                }
                None => match hover.and_then(|pos| hit_test(&hits, grid, &week, pos)) {
                    Some(Hit::Payload(DragPayload::Task {
                        grip: Grip::StartEdge | Grip::EndEdge,
                        ..
                    })) => ui.ctx().set_cursor_icon(CursorIcon::ResizeHorizontal),
                    Some(Hit::Payload(DragPayload::Task { .. })) => {
                        ui.ctx().set_cursor_icon(CursorIcon::Grab)
                    }
                    Some(Hit::Delete(_)) => ui.ctx().set_cursor_icon(CursorIcon::PointingHand),
                    _ => {}
                },
            }

            if interactive {
                let geometry =
                    (grid.width() > 0.0).then(|| GridRect::new(grid.left(), grid.width()));
                collect_pointer_commands(planner, &hits, grid, geometry, &week, ui, &mut commands);
            }
        });

    commands
}

fn collect_pointer_commands(
    planner: &Planner,
    hits: &[BarHit],
    grid: Rect,
    geometry: Option<GridRect>,
    week: &Week,
    ui: &Ui,
    commands: &mut Vec<Command>,
) {
    let (pressed, released, down, dragging, moved, pos) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.primary_down(),
            i.pointer.is_decidedly_dragging(),
            i.pointer.delta() != Vec2::ZERO,
            i.pointer.interact_pos(),
        )
    });
    let tracking = planner.is_tracking();

    if pressed && !tracking {
        if let Some(pos) = pos.filter(|p| ui.clip_rect().contains(*p)) {
            match hit_test(hits, grid, week, pos) {
                Some(Hit::Delete(id)) => commands.push(Command::Delete(id)),
                Some(Hit::Payload(payload)) => commands.push(Command::PointerDown(payload)),
                None => {}
            }
        }
    }

    // Small jitter between press and release still counts as a click.
    if (tracking || pressed) && dragging && moved {
        if let Some(pos) = pos {
            commands.push(Command::PointerMove {
                grid: geometry,
                x: pos.x,
            });
        }
    }

    if released {
        commands.push(Command::PointerUp);
    } else if tracking && !down {
        commands.push(Command::PointerLost);
    }
}

/// Edge handles win over the body; the delete button wins over both.
fn hit_test(hits: &[BarHit], grid: Rect, week: &Week, pos: Pos2) -> Option<Hit> {
    // Later bars are painted on top.
    for bar in hits.iter().rev() {
        if bar.delete.is_some_and(|r| r.contains(pos)) {
            return Some(Hit::Delete(bar.id));
        }
        let grip = if bar.start_handle().contains(pos) {
            Grip::StartEdge
        } else if bar.end_handle().contains(pos) {
            Grip::EndEdge
        } else if bar.body.contains(pos) {
            Grip::Body
        } else {
            continue;
        };
        return Some(Hit::Payload(DragPayload::Task { id: bar.id, grip }));
    }

    if !grid.contains(pos) || grid.width() <= 0.0 {
        return None;
    }
    let col_width = grid.width() / DAYS_IN_WEEK as f32;
    let col = ((pos.x - grid.left()) / col_width).floor() as i64;
    let col = col.clamp(0, DAYS_IN_WEEK as i64 - 1);
    Some(Hit::Payload(DragPayload::TimeSlot {
        day: week.day(col),
        hour: 0,
    }))
}

fn draw_day_header(painter: &egui::Painter, canvas: Rect, week: &Week, col_width: f32) {
    painter.rect_filled(
        Rect::from_min_size(canvas.min, Vec2::new(canvas.width(), HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(canvas.left(), canvas.top() + HEADER_HEIGHT),
            Pos2::new(canvas.right(), canvas.top() + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let today = chrono::Local::now().date_naive();
    for (i, day) in week.days().iter().enumerate() {
        let x = canvas.left() + i as f32 * col_width;
        let cell = Rect::from_min_size(
            Pos2::new(x, canvas.top()),
            Vec2::new(col_width, HEADER_HEIGHT),
        );
        if *day == today {
            painter.rect_filled(
                cell.shrink(2.0),
                Rounding {
                    nw: 6.0,
                    ne: 6.0,
                    sw: 0.0,
                    se: 0.0,
                },
                theme::BG_TODAY,
            );
        }
        let name_color = if day.weekday() == Weekday::Sun {
            theme::TEXT_DIM
        } else {
            theme::TEXT_SECONDARY
        };
        painter.text(
            Pos2::new(cell.center().x, cell.top() + 14.0),
            egui::Align2::CENTER_CENTER,
            day.format("%a").to_string(),
            theme::font_header(),
            name_color,
        );
        painter.text(
            Pos2::new(cell.center().x, cell.top() + 33.0),
            egui::Align2::CENTER_CENTER,
            day.format("%-d").to_string(),
            theme::font_day_number(),
            theme::TEXT_PRIMARY,
        );
    }
}

fn draw_columns(painter: &egui::Painter, grid: Rect, col_width: f32) {
    for i in 1..DAYS_IN_WEEK {
        let x = grid.left() + i as f32 * col_width;
        painter.line_segment(
            [Pos2::new(x, grid.top()), Pos2::new(x, grid.bottom())],
            Stroke::new(0.5, theme::GRID_LINE),
        );
    }
}

/// Paint one bar. Returns the delete button rect if one was drawn.
fn draw_task_bar(
    painter: &egui::Painter,
    task: &Task,
    bar_rect: Rect,
    active: Option<DragMode>,
    hovered: bool,
) -> Option<Rect> {
    let rounding = Rounding::same(theme::BAR_ROUNDING);
    let fill = if active.is_some() {
        task.color.gamma_multiply(0.8)
    } else {
        task.color
    };

    // Soft shadow, stronger while dragging
    let shadow_alpha = if active.is_some() { 70 } else { 35 };
    painter.rect_filled(
        bar_rect.translate(Vec2::new(1.0, 2.0)),
        rounding,
        Color32::from_black_alpha(shadow_alpha),
    );
    painter.rect_filled(bar_rect, rounding, fill);
    if active.is_some() {
        painter.rect_stroke(bar_rect, rounding, Stroke::new(2.0, theme::BORDER_ACCENT));
    }

    // Edge handles
    let left = Rect::from_min_max(
        bar_rect.left_top(),
        Pos2::new(bar_rect.left() + HANDLE_WIDTH, bar_rect.bottom()),
    );
    let right = Rect::from_min_max(
        Pos2::new(bar_rect.right() - HANDLE_WIDTH, bar_rect.top()),
        bar_rect.right_bottom(),
    );
    let handle_fill = |mode| {
        if active == Some(mode) {
            theme::HANDLE_ACTIVE
        } else {
            theme::HANDLE_COLOR
        }
    };
    painter.rect_filled(
        left,
        Rounding {
            nw: theme::BAR_ROUNDING,
            sw: theme::BAR_ROUNDING,
            ne: 0.0,
            se: 0.0,
        },
        handle_fill(DragMode::ResizeStart),
    );
    painter.rect_filled(
        right,
        Rounding {
            nw: 0.0,
            sw: 0.0,
            ne: theme::BAR_ROUNDING,
            se: theme::BAR_ROUNDING,
        },
        handle_fill(DragMode::ResizeEnd),
    );

    let content = Rect::from_min_max(
        Pos2::new(left.right() + 4.0, bar_rect.top()),
        Pos2::new(right.left() - 2.0, bar_rect.bottom()),
    );

    let delete = (hovered && active.is_none() && content.width() > 60.0).then(|| {
        Rect::from_center_size(
            Pos2::new(content.right() - theme::DELETE_BUTTON / 2.0, content.center().y),
            Vec2::splat(theme::DELETE_BUTTON),
        )
    });
    if let Some(r) = delete {
        painter.rect_filled(r, Rounding::same(3.0), Color32::from_white_alpha(50));
        painter.text(
            r.center(),
            egui::Align2::CENTER_CENTER,
            egui_phosphor::regular::TRASH,
            theme::font_small(),
            theme::TEXT_ON_BAR,
        );
    }

    // Title and date range, clipped to the bar
    if content.width() > 20.0 {
        let clipped = painter.with_clip_rect(content);
        let title_color = if task.completed {
            theme::TEXT_ON_BAR.gamma_multiply(0.6)
        } else {
            theme::TEXT_ON_BAR
        };
        let title = if task.completed {
            format!("{} {}", egui_phosphor::regular::CHECK, task.title)
        } else {
            task.title.clone()
        };
        clipped.text(
            Pos2::new(content.left(), content.top() + 11.0),
            egui::Align2::LEFT_CENTER,
            title,
            theme::font_bar(),
            title_color,
        );
        clipped.text(
            Pos2::new(content.left(), content.bottom() - 9.0),
            egui::Align2::LEFT_CENTER,
            format!(
                "{} - {}",
                task.start.format("%-d %b"),
                task.end.format("%-d %b")
            ),
            theme::font_small(),
            Color32::from_white_alpha(200),
        );
    }

    delete
}
