//! Dashboard module - panel-based landing view

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::core::{Action, Context, Module, NavigateTarget, NotifyLevel};
use crate::nav::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardPanel {
    Summary,
    Activity,
    Meetings,
    Session,
}

/// Counts shown on the landing view, computed by the app each frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct HomeSummary {
    pub students: usize,
    pub active_students: usize,
    pub pending_admissions: usize,
    pub present_today: usize,
    pub absent_today: usize,
    pub open_assignments: usize,
    pub scheduled_quizzes: usize,
}

#[derive(Debug, Clone)]
pub enum ActivityKind {
    Admission(String),
    Attendance(String),
}

#[derive(Debug, Clone)]
pub struct ActivityItem {
    pub kind: ActivityKind,
    pub display: String,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    active_panel: DashboardPanel,
    selected_activity: usize,
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            active_panel: DashboardPanel::Summary,
            selected_activity: 0,
        }
    }

    pub fn active_panel(&self) -> DashboardPanel {
        self.active_panel
    }

    pub fn selected_activity(&self) -> usize {
        self.selected_activity
    }

    pub fn next_panel(&mut self) {
        self.active_panel = match self.active_panel {
            DashboardPanel::Summary => DashboardPanel::Activity,
            DashboardPanel::Activity => DashboardPanel::Meetings,
            DashboardPanel::Meetings => DashboardPanel::Session,
            DashboardPanel::Session => DashboardPanel::Summary,
        };
    }

    pub fn prev_panel(&mut self) {
        self.active_panel = match self.active_panel {
            DashboardPanel::Summary => DashboardPanel::Session,
            DashboardPanel::Activity => DashboardPanel::Summary,
            DashboardPanel::Meetings => DashboardPanel::Activity,
            DashboardPanel::Session => DashboardPanel::Meetings,
        };
    }

    pub fn move_selection(&mut self, down: bool, len: usize) {
        if len == 0 {
            self.selected_activity = 0;
            return;
        }
        if down {
            if self.selected_activity + 1 < len {
                self.selected_activity += 1;
            }
        } else if self.selected_activity > 0 {
            self.selected_activity -= 1;
        }
    }

    /// Render the four landing panels with data prepared by the app.
    pub fn render_with_data(
        &self,
        f: &mut Frame,
        area: Rect,
        summary: &HomeSummary,
        activity: &[ActivityItem],
        meetings: &[String],
        session_lines: &[String],
    ) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);
        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        self.render_summary(f, top[0], summary);
        self.render_activity(f, top[1], activity);
        self.render_meetings(f, bottom[0], meetings);
        self.render_session(f, bottom[1], session_lines);
    }

    fn panel_block(&self, title: &'static str, panel: DashboardPanel) -> Block<'static> {
        let style = if self.active_panel == panel {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title(title)
    }

    fn render_summary(&self, f: &mut Frame, area: Rect, summary: &HomeSummary) {
        let lines = vec![
            Line::from(format!(
                "Students        {} ({} active)",
                summary.students, summary.active_students
            )),
            Line::from(format!("Pending admissions   {}", summary.pending_admissions)),
            Line::from(format!(
                "Attendance today     {} present / {} absent",
                summary.present_today, summary.absent_today
            )),
            Line::from(format!("Open assignments     {}", summary.open_assignments)),
            Line::from(format!("Scheduled quizzes    {}", summary.scheduled_quizzes)),
        ];
        let widget =
            Paragraph::new(lines).block(self.panel_block("Overview", DashboardPanel::Summary));
        f.render_widget(widget, area);
    }

    fn render_activity(&self, f: &mut Frame, area: Rect, activity: &[ActivityItem]) {
        let items: Vec<ListItem> = activity
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let style = if self.active_panel == DashboardPanel::Activity
                    && idx == self.selected_activity
                {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                ListItem::new(item.display.clone()).style(style)
            })
            .collect();
        let widget =
            List::new(items).block(self.panel_block("Recent Activity", DashboardPanel::Activity));
        f.render_widget(widget, area);
    }

    fn render_meetings(&self, f: &mut Frame, area: Rect, meetings: &[String]) {
        let items: Vec<ListItem> = meetings
            .iter()
            .map(|line| ListItem::new(line.clone()))
            .collect();
        let widget =
            List::new(items).block(self.panel_block("Upcoming Zoom", DashboardPanel::Meetings));
        f.render_widget(widget, area);
    }

    fn render_session(&self, f: &mut Frame, area: Rect, session_lines: &[String]) {
        let lines: Vec<Line> = session_lines
            .iter()
            .map(|line| Line::from(line.clone()))
            .collect();
        let widget =
            Paragraph::new(lines).block(self.panel_block("Session", DashboardPanel::Session));
        f.render_widget(widget, area);
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for Dashboard {
    fn id(&self) -> &'static str {
        "dashboard"
    }

    fn handle_key(&mut self, key: crossterm::event::KeyEvent, ctx: &mut Context) -> Action {
        use crossterm::event::KeyCode;

        match key.code {
            KeyCode::Tab => {
                self.next_panel();
                Action::None
            }
            KeyCode::BackTab => {
                self.prev_panel();
                Action::None
            }
            KeyCode::Enter => match self.active_panel {
                DashboardPanel::Summary => {
                    Action::Navigate(NavigateTarget::Page(Page::AllStudents))
                }
                DashboardPanel::Activity => {
                    Action::Navigate(NavigateTarget::Page(Page::AdmissionList))
                }
                DashboardPanel::Meetings => {
                    Action::Navigate(NavigateTarget::Page(Page::MeetingList))
                }
                DashboardPanel::Session => Action::Notify(
                    format!(
                        "Endpoint {} · mode {}",
                        ctx.api_endpoint,
                        ctx.data_mode.label()
                    ),
                    NotifyLevel::Info,
                ),
            },
            _ => Action::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_cycle_is_closed() {
        let mut dashboard = Dashboard::new();
        let start = dashboard.active_panel();
        for _ in 0..4 {
            dashboard.next_panel();
        }
        assert_eq!(dashboard.active_panel(), start);
        dashboard.next_panel();
        dashboard.prev_panel();
        assert_eq!(dashboard.active_panel(), start);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut dashboard = Dashboard::new();
        dashboard.move_selection(true, 2);
        dashboard.move_selection(true, 2);
        assert_eq!(dashboard.selected_activity(), 1);
        dashboard.move_selection(false, 2);
        dashboard.move_selection(false, 2);
        assert_eq!(dashboard.selected_activity(), 0);
        dashboard.move_selection(true, 0);
        assert_eq!(dashboard.selected_activity(), 0);
    }
}
