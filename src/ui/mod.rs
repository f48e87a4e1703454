pub mod sidebar;
pub mod task_form;
pub mod theme;
pub mod toolbar;
pub mod week_grid;
