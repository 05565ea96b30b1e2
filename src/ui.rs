use crate::board::TaskBoard;
use crate::models::{Task, TaskSort, TaskStats, TaskStatus};
use crate::surface::HeatmapContainer;
use crate::validation::{DESCRIPTION_MAX, PASSWORD_MIN, TITLE_MAX, USERNAME_MAX, USERNAME_MIN};
use chrono::NaiveDateTime;
use maud::{html, Markup, PreEscaped, DOCTYPE};

const SORT_OPTIONS: &[(&str, &str)] = &[
    ("created_at_desc", "Newest first"),
    ("created_at_asc", "Oldest first"),
    ("status_desc", "Pending first"),
    ("status_asc", "Completed first"),
    ("title_asc", "Title A-Z"),
    ("title_desc", "Title Z-A"),
];

fn page(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                main.app { (content) }
            }
        }
    }
}

pub fn render_dashboard(board: &TaskBoard, calendar: &HeatmapContainer) -> Markup {
    page(
        "Tasks",
        html! {
            header.header {
                h1 { "Tasks" }
                (stats(board.stats()))
                form method="post" action="/logout" {
                    button.btn.secondary type="submit" { "Sign out" }
                }
            }
            section.card {
                h2 { "New task" }
                (new_task_form())
            }
            @if let Some(task) = board.editing_task() {
                section.card.editing {
                    h2 { "Edit task" }
                    (edit_task_form(task, board.sort()))
                }
            }
            section.card {
                div.list-header {
                    h2 { "Your tasks" }
                    (sort_form(board.sort()))
                }
                @if board.is_empty() {
                    p.empty-state # "emptyState" { "No tasks yet. Add the first one above." }
                } @else {
                    div # "tasksList" {
                        @for task in board.tasks() {
                            (task_item(task, board.sort()))
                        }
                    }
                }
            }
            section.card {
                h2 { "Productivity" }
                (heatmap(calendar))
            }
        },
    )
}

pub fn render_login() -> Markup {
    page(
        "Sign in",
        html! {
            section.card.auth {
                h1 { "Sign in" }
                form.task-form method="post" action="/login" {
                    input type="text" name="username" placeholder="Username" autocomplete="username" required;
                    input type="password" name="password" placeholder="Password" autocomplete="current-password" required;
                    button.btn type="submit" { "Sign in" }
                }
                p { "No account yet? " a href="/register" { "Register" } }
            }
        },
    )
}

pub fn render_register() -> Markup {
    page(
        "Register",
        html! {
            section.card.auth {
                h1 { "Register" }
                form.task-form method="post" action="/register" {
                    input type="text" name="username" placeholder="Username"
                        minlength=(USERNAME_MIN) maxlength=(USERNAME_MAX) required;
                    input type="email" name="email" placeholder="Email" required;
                    input type="password" name="password" placeholder="Password" minlength=(PASSWORD_MIN) required;
                    input type="password" name="confirm_password" placeholder="Repeat password" required;
                    button.btn type="submit" { "Create account" }
                }
                p { "Already registered? " a href="/login" { "Sign in" } }
            }
        },
    )
}

pub fn heatmap(container: &HeatmapContainer) -> Markup {
    html! {
        div.calendar-heatmap # "calendarHeatmap" {
            @for column in container.columns() {
                div.week {
                    @for day in &column.days {
                        div class=(day.class_attr()) title=(day.title) style=[day.hidden.then_some("visibility: hidden")] {}
                    }
                }
            }
        }
    }
}

pub fn task_item(task: &Task, sort: TaskSort) -> Markup {
    let toggle_text = match task.status.toggled() {
        TaskStatus::Pending => "Reopen",
        TaskStatus::Completed => "Complete",
    };
    let description = task.description.as_deref().filter(|text| !text.is_empty());

    html! {
        div class={ "task-item " (task.status.as_str()) } data-task-id=(task.id) {
            div.task-body {
                h3.task-title { (task.title) }
                @if let Some(description) = description {
                    p.task-description { (description) }
                }
                div.task-meta {
                    span class={ "status-badge " (task.status.as_str()) } { (status_label(task.status)) }
                    span.created { (format_created(&task.created_at)) }
                }
            }
            div.task-actions {
                form method="post" action={ "/tasks/" (task.id) "/toggle" } {
                    button.btn type="submit" title=(toggle_text) { (toggle_text) }
                }
                a.btn href={ "/?sort=" (sort.as_param()) "&edit=" (task.id) } { "Edit" }
                form method="post" action={ "/tasks/" (task.id) "/delete" } {
                    button.btn.danger type="submit" { "Delete" }
                }
            }
        }
    }
}

fn stats(stats: TaskStats) -> Markup {
    html! {
        div.stats {
            div.stat { span.stat-value # "totalTasks" { (stats.total) } span.stat-label { "Total" } }
            div.stat { span.stat-value # "pendingTasks" { (stats.pending) } span.stat-label { "In progress" } }
            div.stat { span.stat-value # "completedTasks" { (stats.completed) } span.stat-label { "Completed" } }
        }
    }
}

fn new_task_form() -> Markup {
    html! {
        form.task-form method="post" action="/tasks" {
            input type="text" name="title" placeholder="Title" maxlength=(TITLE_MAX) required;
            textarea name="description" placeholder="Description (optional)" maxlength=(DESCRIPTION_MAX) {}
            button.btn type="submit" { "Add task" }
        }
    }
}

fn edit_task_form(task: &Task, sort: TaskSort) -> Markup {
    html! {
        form.task-form method="post" action={ "/tasks/" (task.id) } {
            input type="text" name="title" value=(task.title) maxlength=(TITLE_MAX) required;
            textarea name="description" maxlength=(DESCRIPTION_MAX) {
                (task.description.as_deref().unwrap_or_default())
            }
            select name="status" {
                @for status in [TaskStatus::Pending, TaskStatus::Completed] {
                    option value=(status.as_str()) selected[status == task.status] { (status_label(status)) }
                }
            }
            button.btn type="submit" { "Save" }
            a.btn href={ "/?sort=" (sort.as_param()) } { "Cancel" }
        }
    }
}

fn sort_form(sort: TaskSort) -> Markup {
    let current = sort.as_param();
    html! {
        form.sort-form method="get" action="/" {
            select name="sort" # "sortBy" {
                @for (value, label) in SORT_OPTIONS {
                    option value=(value) selected[*value == current] { (label) }
                }
            }
            button.btn type="submit" { "Sort" }
        }
    }
}

fn status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Completed => "Completed",
        TaskStatus::Pending => "In progress",
    }
}

/// Backend timestamps are `YYYY-MM-DD HH:MM:SS`; anything else is shown as-is.
fn format_created(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map(|created| created.format("%d.%m.%Y %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

const CSS: &str = r#"
:root {
  --bg: #f4f6fb;
  --ink: #1f2933;
  --muted: #6b7280;
  --card: #ffffff;
  --accent: #3b82f6;
  --danger: #ef4444;
  --heat-0: #ebedf0;
  --heat-1: #9be9a8;
  --heat-2: #40c463;
  --heat-3: #30a14e;
  --heat-4: #216e39;
}

* { box-sizing: border-box; }

body {
  margin: 0;
  background: var(--bg);
  color: var(--ink);
  font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
}

.app { max-width: 960px; margin: 0 auto; padding: 32px 16px; display: grid; gap: 20px; }
.header { display: flex; justify-content: space-between; align-items: center; flex-wrap: wrap; gap: 16px; }
.card { background: var(--card); border-radius: 16px; padding: 20px 24px; box-shadow: 0 8px 24px rgba(15, 23, 42, 0.08); }
.stats { display: flex; gap: 16px; }
.stat { display: grid; text-align: center; }
.stat-value { font-size: 1.6rem; font-weight: 600; }
.stat-label { color: var(--muted); font-size: 0.85rem; }

.task-form { display: grid; gap: 10px; }
.task-form input, .task-form textarea, .task-form select { font: inherit; padding: 8px 10px; border: 1px solid #d1d5db; border-radius: 8px; }
.list-header { display: flex; justify-content: space-between; align-items: center; gap: 12px; }
.sort-form { display: flex; gap: 8px; }

.btn { font: inherit; padding: 6px 12px; border-radius: 8px; border: 1px solid var(--accent); background: var(--accent); color: #fff; cursor: pointer; text-decoration: none; }
.btn.danger { background: var(--danger); border-color: var(--danger); }
.btn.secondary { background: transparent; color: var(--accent); }
.auth { max-width: 420px; width: 100%; margin: 48px auto 0; }

.task-item { display: flex; justify-content: space-between; gap: 16px; padding: 14px 0; border-top: 1px solid #e5e7eb; }
.task-item.completed .task-title { text-decoration: line-through; color: var(--muted); }
.task-title { margin: 0 0 4px; font-size: 1.05rem; }
.task-description { margin: 0 0 6px; color: var(--muted); white-space: pre-wrap; }
.task-meta { display: flex; gap: 12px; font-size: 0.85rem; color: var(--muted); }
.task-actions { display: flex; flex-direction: column; gap: 6px; }
.status-badge { padding: 2px 8px; border-radius: 999px; background: #fef3c7; }
.status-badge.completed { background: #dcfce7; }
.empty-state { color: var(--muted); text-align: center; }

.calendar-heatmap { display: flex; gap: 3px; overflow-x: auto; padding-bottom: 4px; }
.week { display: grid; grid-template-rows: repeat(7, 12px); gap: 3px; }
.day { width: 12px; height: 12px; border-radius: 2px; background: var(--heat-0); }
.day.heat-1 { background: var(--heat-1); }
.day.heat-2 { background: var(--heat-2); }
.day.heat-3 { background: var(--heat-3); }
.day.heat-4 { background: var(--heat-4); }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heatmap::build_grid_at;
    use crate::models::DailyCount;
    use crate::surface::render_heatmap;
    use chrono::NaiveDate;

    fn task(id: i64, title: &str, status: TaskStatus) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: Some("<img src=x onerror=alert(1)>".to_string()),
            status,
            created_at: "2024-01-02 10:30:00".to_string(),
            updated_at: "2024-01-02 10:30:00".to_string(),
        }
    }

    #[test]
    fn user_content_is_escaped() {
        let html = task_item(&task(1, "<script>alert('x')</script>", TaskStatus::Pending), TaskSort::default())
            .into_string();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn task_item_shows_status_and_date() {
        let html = task_item(&task(4, "Report", TaskStatus::Completed), TaskSort::parse("title_asc"))
            .into_string();
        assert!(html.contains("task-item completed"));
        assert!(html.contains("02.01.2024 10:30"));
        assert!(html.contains("/tasks/4/toggle"));
        assert!(html.contains("Reopen"));
        assert!(html.contains("/?sort=title_asc&amp;edit=4"));
    }

    #[test]
    fn heatmap_markup_has_one_column_per_week() {
        let mut counts = DailyCount::new();
        counts.insert("2024-01-01".into(), 4);
        counts.insert("2024-01-02".into(), 1);
        let grid = build_grid_at(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), &counts, 2);
        let mut container = HeatmapContainer::default();
        render_heatmap(&grid, &mut container);

        let html = heatmap(&container).into_string();
        assert_eq!(html.matches(r#"class="week""#).count(), 1);
        assert_eq!(html.matches(r#"class="day"#).count(), 3);
        assert_eq!(html.matches("visibility: hidden").count(), 1);
        assert!(html.contains(r#"class="day heat-4" title="01.01.2024: 4 completed""#));
        assert!(html.contains(r#"class="day heat-1""#));
    }

    #[test]
    fn empty_container_renders_empty_heatmap() {
        let html = heatmap(&HeatmapContainer::default()).into_string();
        assert!(html.contains("calendarHeatmap"));
        assert!(!html.contains("class=\"week\""));
    }

    #[test]
    fn dashboard_shows_edit_form_for_edited_task() {
        let mut board = TaskBoard::default();
        board.replace_tasks(vec![task(3, "Plan sprint", TaskStatus::Pending)]);

        let html = render_dashboard(&board, &HeatmapContainer::default()).into_string();
        assert!(!html.contains("Edit task"));

        board.begin_edit(3);
        let html = render_dashboard(&board, &HeatmapContainer::default()).into_string();
        assert!(html.contains("Edit task"));
        assert!(html.contains(r#"action="/tasks/3""#));
        assert!(html.contains(r#"value="Plan sprint""#));
    }

    #[test]
    fn dashboard_shows_empty_state() {
        let html = render_dashboard(&TaskBoard::default(), &HeatmapContainer::default()).into_string();
        assert!(html.contains("emptyState"));
        assert!(html.contains(r#"id="totalTasks""#));
        assert!(!html.contains("tasksList"));
    }

    #[test]
    fn task_item_offers_completion_for_pending_tasks() {
        let html = task_item(&task(5, "Draft", TaskStatus::Pending), TaskSort::default()).into_string();
        assert!(html.contains(">Complete<"));
        assert!(!html.contains("Reopen"));
    }

    #[test]
    fn dashboard_has_sign_out() {
        let html = render_dashboard(&TaskBoard::default(), &HeatmapContainer::default()).into_string();
        assert!(html.contains(r#"action="/logout""#));
    }

    #[test]
    fn auth_pages_post_to_their_routes() {
        let login = render_login().into_string();
        assert!(login.contains(r#"action="/login""#));
        assert!(login.contains(r#"name="username""#));
        assert!(login.contains(r#"href="/register""#));

        let register = render_register().into_string();
        assert!(register.contains(r#"action="/register""#));
        assert!(register.contains(r#"name="confirm_password""#));
        assert!(register.contains(r#"name="email""#));
    }

    #[test]
    fn unparsable_timestamps_pass_through() {
        assert_eq!(format_created("yesterday"), "yesterday");
    }
}
