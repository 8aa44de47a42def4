use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

pub mod layout;

use crate::app::{App, DetailState, Focus, InputMode, ListKind, StatusLevel, TextForm};
use crate::nav::sidebar::SidebarRow;
use crate::nav::{Page, Route};

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.size();

    match app.current_route() {
        Route::Login => draw_login(f, size, app),
        Route::AdmissionForm => draw_admission_form(f, size, app),
        Route::NotFound(path) => draw_not_found(f, size, app, &path),
        Route::Dashboard(Page::Home, _) => draw_home(f, size, app),
        Route::Dashboard(page, _) => draw_dashboard(f, size, app, page),
    }

    if app.help_open {
        draw_help_popup(f, size);
    }
}

// === Login ===

fn draw_login(f: &mut Frame, area: Rect, app: &App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let form_area = layout::centered(outer[0], 52, 12);
    f.render_widget(Clear, form_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Khuddam Console · Admin Sign In ");
    let inner = block.inner(form_area);
    f.render_widget(block, form_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let masked: String = "*".repeat(app.login.password.chars().count());
    f.render_widget(
        form_field("Email", &app.login.email, !app.login.focus_password),
        rows[1],
    );
    f.render_widget(
        form_field("Password", &masked, app.login.focus_password),
        rows[2],
    );

    if app.login.submitting {
        f.render_widget(
            Paragraph::new("Signing in…").style(Style::default().fg(Color::Yellow)),
            rows[4],
        );
    } else if let Some(error) = app.login.error.as_deref() {
        f.render_widget(
            Paragraph::new(error).style(Style::default().fg(Color::Red)),
            rows[4],
        );
    }

    f.render_widget(
        Paragraph::new("Tab switch field · Enter sign in · F2 admission form · Esc quit")
            .style(Style::default().fg(Color::DarkGray)),
        rows[5],
    );

    draw_status_line(f, outer[1], app);
}

fn form_field<'a>(label: &'a str, value: &'a str, focused: bool) -> Paragraph<'a> {
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let cursor = if focused { "_" } else { "" };
    Paragraph::new(Line::from(vec![
        Span::styled(format!("{label:>10}: "), label_style),
        Span::raw(format!("{value}{cursor}")),
    ]))
}

// === Public admission form ===

fn draw_admission_form(f: &mut Frame, area: Rect, app: &App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let form_area = layout::centered(outer[0], 60, 13);
    f.render_widget(Clear, form_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" New Admission · Public Form ");
    let inner = block.inner(form_area);
    f.render_widget(block, form_area);

    let mut lines = vec![Line::from("")];
    lines.extend(form_lines(&app.admission_draft));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tab next field · Enter submit · Esc back",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(Paragraph::new(lines), inner);

    draw_status_line(f, outer[1], app);
}

fn form_lines<'a>(form: &'a TextForm) -> Vec<Line<'a>> {
    form.fields()
        .enumerate()
        .map(|(idx, (label, value))| {
            let focused = idx == form.focus();
            let label_style = if focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let cursor = if focused { "_" } else { "" };
            Line::from(vec![
                Span::styled(format!("{label:>30}: "), label_style),
                Span::raw(format!("{value}{cursor}")),
            ])
        })
        .collect()
}

// === Landing view ===

fn draw_home(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(f, chunks[0], app);

    let summary = app.home_summary();
    let activity = app.recent_activity();
    let meetings = app.upcoming_meetings();
    let session_lines = app.session_lines();
    let dashboard = app.dashboard.clone();
    dashboard.render_with_data(f, chunks[1], &summary, &activity, &meetings, &session_lines);

    draw_status_line(f, chunks[2], app);
    draw_command_line(f, chunks[3], app);
}

// === Dashboard views ===

fn draw_dashboard(f: &mut Frame, area: Rect, app: &mut App, page: Page) {
    let areas = layout::areas(area);

    draw_header(f, areas.header, app);
    draw_sidebar(f, areas.sidebar_tree, areas.sidebar_session, app);
    draw_list_panel(f, areas.list, app, page);
    draw_detail_panel(f, areas.details, app, page);
    draw_status_line(f, areas.status_line, app);
    draw_command_line(f, areas.command_line, app);
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let session = if app.session.is_authenticated() {
        Span::styled("session: admin", Style::default().fg(Color::Green))
    } else {
        Span::styled("session: anonymous", Style::default().fg(Color::Red))
    };
    let line = Line::from(vec![
        Span::styled(
            " Khuddam Console ",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::styled(app.breadcrumb(), Style::default().fg(Color::Cyan)),
        Span::raw(" │ "),
        Span::raw(format!("api: {}", app.ctx.api_endpoint)),
        Span::raw(" │ "),
        Span::raw(format!("mode: {}", app.data_mode.label())),
        Span::raw(" │ "),
        session,
    ]);
    let widget = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn draw_sidebar(f: &mut Frame, tree_area: Rect, session_area: Rect, app: &App) {
    let focused = app.focus == Focus::Sidebar;
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let current_page = app.current_page();
    let rows = app.sidebar_rows();
    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let cursor_here = focused && idx == app.sidebar_cursor;
            let (text, mut style) = match row {
                SidebarRow::Header(section) => {
                    let marker = if app.sidebar.expanded() == Some(*section) {
                        "▾"
                    } else {
                        "▸"
                    };
                    (
                        format!("{marker} {}", section.title()),
                        Style::default().add_modifier(Modifier::BOLD),
                    )
                }
                SidebarRow::Item(_, item) => {
                    let active = current_page == Some(item.page);
                    let style = if active {
                        Style::default().fg(Color::Cyan)
                    } else {
                        Style::default()
                    };
                    (format!("    {}", item.label), style)
                }
            };
            if cursor_here {
                style = style.add_modifier(Modifier::REVERSED);
            }
            ListItem::new(text).style(style)
        })
        .collect();

    let widget = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Navigation"),
    );
    f.render_widget(widget, tree_area);

    let session_lines: Vec<Line> = app
        .session_lines()
        .into_iter()
        .map(Line::from)
        .collect();
    let session_widget = Paragraph::new(session_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title("Session"),
    );
    f.render_widget(session_widget, session_area);
}

fn draw_list_panel(f: &mut Frame, area: Rect, app: &App, page: Page) {
    let focused = app.focus == Focus::List;
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let filter_suffix = app
        .active_filter
        .as_ref()
        .map(|filter| format!(" · filter: {}", filter.raw))
        .unwrap_or_default();
    let title = format!("{}{filter_suffix}", page.title());

    let lines = list_lines(app, page);
    if lines.is_empty() {
        let widget = Paragraph::new("No records match")
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(title),
            );
        f.render_widget(widget, area);
        return;
    }

    let items: Vec<ListItem> = lines.into_iter().map(ListItem::new).collect();
    let mut state = ListState::default();
    state.select(Some(app.current_selection()));
    let widget = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        );
    f.render_stateful_widget(widget, area, &mut state);
}

fn list_lines(app: &App, page: Page) -> Vec<String> {
    match app.list_kind() {
        Some(ListKind::Students) => app
            .filtered_student_indices()
            .into_iter()
            .filter_map(|idx| app.students.get(idx))
            .map(|student| {
                let today = if page == Page::MarkAttendance {
                    match app.today_status(&student.id) {
                        Some(status) => format!("  [{}]", status.label()),
                        None => "  [unmarked]".to_string(),
                    }
                } else {
                    String::new()
                };
                format!(
                    "{:<8} {:<20} {:<10} {}/{}{today}",
                    student.id, student.name, student.class, student.section, student.roll_no
                )
            })
            .collect(),
        Some(ListKind::Attendance) => app
            .filtered_attendance_indices()
            .into_iter()
            .filter_map(|idx| app.attendance.get(idx))
            .map(|record| {
                format!(
                    "{}  {:<8} {:<20} {}",
                    record.date,
                    record.student_id,
                    record.student_name,
                    record.status.label()
                )
            })
            .collect(),
        Some(ListKind::Admissions) => app
            .filtered_admission_indices()
            .into_iter()
            .filter_map(|idx| app.admissions.get(idx))
            .map(|admission| {
                format!(
                    "{:<8} {:<20} {:<10} {}",
                    admission.id,
                    admission.applicant_name,
                    admission.requested_class,
                    admission.status.label()
                )
            })
            .collect(),
        Some(ListKind::Quizzes) => app
            .filtered_quiz_indices()
            .into_iter()
            .filter_map(|idx| app.quizzes.get(idx))
            .map(|quiz| {
                format!(
                    "{:<8} {}  {:<10} {} ({} marks)",
                    quiz.id, quiz.scheduled_on, quiz.class, quiz.title, quiz.total_marks
                )
            })
            .collect(),
        Some(ListKind::Assignments) => app
            .filtered_assignment_indices()
            .into_iter()
            .filter_map(|idx| app.assignments.get(idx))
            .map(|assignment| {
                format!(
                    "{:<8} due {}  {:<10} {} ({})",
                    assignment.id,
                    assignment.due_on,
                    assignment.class,
                    assignment.title,
                    assignment.status.label()
                )
            })
            .collect(),
        Some(ListKind::Meetings) => app
            .filtered_meeting_indices()
            .into_iter()
            .filter_map(|idx| app.meetings.get(idx))
            .map(|meeting| {
                format!(
                    "{:<8} {}  {:<10} {}",
                    meeting.id,
                    meeting.starts_at.format("%m-%d %H:%M"),
                    meeting.class,
                    meeting.topic
                )
            })
            .collect(),
        Some(ListKind::Results) => app
            .filtered_result_indices()
            .into_iter()
            .filter_map(|idx| app.results.get(idx))
            .map(|row| {
                format!(
                    "{:<8} {:<20} {:<16} {:>3}/{:<3} ({:.0}%)",
                    row.student_id,
                    row.student_name,
                    row.subject,
                    row.obtained,
                    row.total,
                    row.percentage()
                )
            })
            .collect(),
        None => Vec::new(),
    }
}

fn draw_detail_panel(f: &mut Frame, area: Rect, app: &App, page: Page) {
    let focused = app.focus == Focus::Details;
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title("Details");

    let lines: Vec<Line> = match page {
        Page::StudentDetail => student_detail_lines(app),
        Page::ScheduleMeeting => {
            let mut lines = vec![
                Line::from(Span::styled(
                    "Schedule a Zoom session",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ];
            lines.extend(form_lines(&app.meeting_draft));
            lines.push(Line::from(""));
            lines.push(hint_line("Tab next field · Enter schedule · Esc back"));
            lines
        }
        Page::AdmissionDetail => match app.admission_detail_missing() {
            Some(id) => not_found_lines(&format!("No admission matches {id}")),
            None => match app.admission_detail() {
                Some(admission) => field_grid(&admission.detail_fields()),
                None => vec![hint_line("Select an admission")],
            },
        },
        Page::AllStudents | Page::MarkAttendance => match app.selected_student() {
            Some(student) => {
                let mut lines = field_grid(&student.detail_fields());
                if page == Page::MarkAttendance {
                    lines.push(Line::from(""));
                    let today = app
                        .today_status(&student.id)
                        .map(|status| status.label().to_string())
                        .unwrap_or_else(|| "unmarked".to_string());
                    lines.push(Line::from(format!("Today: {today}")));
                    lines.push(hint_line("p present · a absent · l leave"));
                }
                lines
            }
            None => vec![hint_line("Select a student")],
        },
        Page::AttendanceReport => match app.selected_attendance() {
            Some(record) => field_grid(&record.detail_fields()),
            None => vec![hint_line("Select a record")],
        },
        Page::AdmissionList => match app.selected_admission() {
            Some(admission) => field_grid(&admission.detail_fields()),
            None => vec![hint_line("Select an admission")],
        },
        Page::QuizList => match app.selected_quiz() {
            Some(quiz) => field_grid(&quiz.detail_fields()),
            None => vec![hint_line("Select a quiz")],
        },
        Page::AssignmentList => match app.selected_assignment() {
            Some(assignment) => field_grid(&assignment.detail_fields()),
            None => vec![hint_line("Select an assignment")],
        },
        Page::MeetingList => match app.selected_meeting() {
            Some(meeting) => field_grid(&meeting.detail_fields()),
            None => vec![hint_line("Select a meeting")],
        },
        Page::ResultList => match app.selected_result() {
            Some(row) => field_grid(&row.detail_fields()),
            None => vec![hint_line("Select a result")],
        },
        Page::Home => Vec::new(),
    };

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    f.render_widget(widget, area);
}

fn student_detail_lines(app: &App) -> Vec<Line<'static>> {
    match &app.student_detail {
        DetailState::Idle => vec![hint_line("Open a student from All Students")],
        DetailState::Loading => vec![Line::from(Span::styled(
            format!(
                "Loading student {}…",
                app.student_detail_id().unwrap_or_default()
            ),
            Style::default().fg(Color::Yellow),
        ))],
        DetailState::Ready(student) => field_grid(&student.detail_fields()),
        DetailState::NotFound => not_found_lines(&format!(
            "No student matches {}",
            app.student_detail_id().unwrap_or_default()
        )),
        DetailState::Failed(message) => vec![
            Line::from(Span::styled(
                format!("Fetch failed: {message}"),
                Style::default().fg(Color::Red),
            )),
            Line::from(""),
            hint_line("Esc to go back"),
        ],
    }
}

fn not_found_lines(message: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        hint_line("Esc to go back"),
    ]
}

fn field_grid(fields: &[(&'static str, String)]) -> Vec<Line<'static>> {
    fields
        .iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{label:>16}  "),
                    Style::default().fg(Color::Gray),
                ),
                Span::raw(value.clone()),
            ])
        })
        .collect()
}

fn hint_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::DarkGray),
    ))
}

// === Not found ===

fn draw_not_found(f: &mut Frame, area: Rect, app: &App, path: &str) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let box_area = layout::centered(outer[0], 50, 7);
    let block = Block::default().borders(Borders::ALL).title(" Not Found ");
    let inner = block.inner(box_area);
    f.render_widget(block, box_area);

    let lines = vec![
        Line::from(""),
        Line::from(format!("No view at {path}")),
        Line::from(""),
        hint_line("Esc to go back"),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);

    draw_status_line(f, outer[1], app);
}

// === Footer ===

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let Some((text, level)) = app.status_text() else {
        f.render_widget(Paragraph::new(""), area);
        return;
    };
    let style = match level {
        StatusLevel::Info => Style::default().fg(Color::Green),
        StatusLevel::Warn => Style::default().fg(Color::Yellow),
        StatusLevel::Error => Style::default().fg(Color::Red),
    };
    f.render_widget(Paragraph::new(text).style(style), area);
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App) {
    let line = if app.input_mode == InputMode::Command {
        Line::from(vec![
            Span::styled(":", Style::default().fg(Color::Cyan)),
            Span::raw(app.command.input.clone()),
            Span::raw("_"),
        ])
    } else {
        Line::from(Span::styled(
            "/ command · ? help · q quit",
            Style::default().fg(Color::DarkGray),
        ))
    };
    f.render_widget(Paragraph::new(line), area);
}

// === Help ===

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup = layout::centered(area, 56, 18);
    f.render_widget(Clear, popup);

    let block = Block::default().borders(Borders::ALL).title(" Help ");
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let lines = vec![
        Line::from("j/k or ↑/↓    move selection"),
        Line::from("h/l           move focus between panes"),
        Line::from("Tab           cycle focus"),
        Line::from("Enter         open detail / activate sidebar row"),
        Line::from("Esc           go back"),
        Line::from("/             command bar (:students, :go /path, …)"),
        Line::from("r             refresh current data"),
        Line::from("e             export current list (CSV)"),
        Line::from("y             copy selected record id"),
        Line::from("p/a/l         mark attendance (Mark Attendance view)"),
        Line::from("1-7           jump to section"),
        Line::from("q             quit"),
        Line::from(""),
        Line::from("Commands: students, attendance, admissions, quizzes,"),
        Line::from("assignments, zoom, results, student <id>, logout,"),
        Line::from("export [csv|json], mode [fixture|api], refresh"),
        Line::from(""),
        Line::from("? or Esc to close"),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}
