//! Sidebar expansion state machine.
//!
//! At most one section is expanded at a time. Two inputs move the
//! state: a user toggle on a section header, and a route change. A
//! route under `/dashboard/<slug>/...` whose slug resolves to a section
//! forces that section open, overriding any earlier toggle; a route
//! that resolves to nothing leaves the state alone.

use super::slug::{self, ItemSpec, Section};
use super::{path_of, Route};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SidebarState {
    expanded: Option<Section>,
}

/// One visible row of the rendered sidebar tree.
#[derive(Debug, Clone, Copy)]
pub enum SidebarRow {
    Header(Section),
    Item(Section, &'static ItemSpec),
}

impl SidebarState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expanded(&self) -> Option<Section> {
        self.expanded
    }

    /// User toggle: collapse if the section is already open, otherwise
    /// open it (implicitly collapsing whatever else was open).
    pub fn toggle(&mut self, section: Section) {
        if self.expanded == Some(section) {
            self.expanded = None;
        } else {
            self.expanded = Some(section);
        }
    }

    /// Route-driven derivation: the first path segment after
    /// `/dashboard/` picks the section. An unmatched segment (or a
    /// route outside the dashboard) leaves the state unchanged.
    pub fn sync_to_path(&mut self, path: &str) {
        if let Some(section) = section_of_path(path) {
            self.expanded = Some(section);
        }
    }

    pub fn sync_to_route(&mut self, route: &Route) {
        self.sync_to_path(&path_of(route));
    }

    /// Flattened rows for rendering: every section header, plus the
    /// items of the expanded section beneath its header.
    pub fn visible_rows(&self) -> Vec<SidebarRow> {
        let mut rows = Vec::new();
        for spec in slug::NAV {
            rows.push(SidebarRow::Header(spec.section));
            if self.expanded == Some(spec.section) {
                for item in spec.items {
                    rows.push(SidebarRow::Item(spec.section, item));
                }
            }
        }
        rows
    }
}

fn section_of_path(path: &str) -> Option<Section> {
    let mut segments = path.split('/').filter(|segment| !segment.is_empty());
    if segments.next() != Some("dashboard") {
        return None;
    }
    let section_segment = segments.next()?;
    slug::section_by_slug(section_segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_collapsed() {
        assert_eq!(SidebarState::new().expanded(), None);
    }

    #[test]
    fn test_toggle_expands_and_collapses() {
        let mut state = SidebarState::new();
        state.toggle(Section::Attendance);
        assert_eq!(state.expanded(), Some(Section::Attendance));
        state.toggle(Section::Attendance);
        assert_eq!(state.expanded(), None);
    }

    #[test]
    fn test_toggle_collapses_the_other_section() {
        let mut state = SidebarState::new();
        state.toggle(Section::Students);
        state.toggle(Section::Zoom);
        assert_eq!(state.expanded(), Some(Section::Zoom));
    }

    #[test]
    fn test_route_forces_matching_section_open() {
        let mut state = SidebarState::new();
        state.toggle(Section::Results);
        state.sync_to_path("/dashboard/students/student-details");
        assert_eq!(state.expanded(), Some(Section::Students));
        // Deeper segments do not matter, only the first one.
        state.sync_to_path("/dashboard/zoom/schedule-meeting/whatever");
        assert_eq!(state.expanded(), Some(Section::Zoom));
    }

    #[test]
    fn test_unmatched_route_leaves_state_unchanged() {
        let mut state = SidebarState::new();
        state.toggle(Section::Quizzes);
        state.sync_to_path("/dashboard/payroll/overview");
        assert_eq!(state.expanded(), Some(Section::Quizzes));
        state.sync_to_path("/");
        assert_eq!(state.expanded(), Some(Section::Quizzes));
        state.sync_to_path("/dashboard");
        assert_eq!(state.expanded(), Some(Section::Quizzes));
    }

    #[test]
    fn test_at_most_one_section_expanded() {
        let mut state = SidebarState::new();
        let inputs = [
            "/dashboard/students/all-students",
            "/dashboard/attendance/mark-attendance",
            "/dashboard/unknown/x",
            "/dashboard/zoom/meeting-list",
        ];
        for path in inputs {
            state.sync_to_path(path);
            let expanded = slug::NAV
                .iter()
                .filter(|spec| state.expanded() == Some(spec.section))
                .count();
            assert!(expanded <= 1);
        }
    }

    #[test]
    fn test_visible_rows_include_expanded_items() {
        let mut state = SidebarState::new();
        assert_eq!(state.visible_rows().len(), Section::ALL.len());
        state.toggle(Section::Students);
        let rows = state.visible_rows();
        assert_eq!(rows.len(), Section::ALL.len() + 2);
        assert!(matches!(rows[1], SidebarRow::Item(Section::Students, _)));
    }
}
