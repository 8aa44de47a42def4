use std::time::{Duration, Instant};

use chrono::Local;

use crate::api::{ApiEvent, ApiRequest};
use crate::core::{Action, Command, Context, DataMode, NavigateTarget, NotifyLevel, Selected};
use crate::domain::{
    Admission, AdmissionStatus, AssignmentStatus, Assignment, AttendanceRecord, AttendanceStatus,
    Quiz, ResultRow, Student, StudentStatus, ZoomMeeting,
};
use crate::modules::dashboard::{ActivityItem, ActivityKind, Dashboard, HomeSummary};
use crate::modules::export::{self, ExportFormat};
use crate::nav::sidebar::SidebarRow;
use crate::nav::{self, Page, Route, Section, SidebarState};
use crate::store::{FixtureSet, SessionStore};

/// Which pane receives j/k/Enter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    List,
    Details,
    Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub since: Instant,
}

#[derive(Debug, Default, Clone)]
pub struct CommandBar {
    pub input: String,
    pub last: Option<String>,
}

/// The admin session. Lifecycle is explicit: `login` persists the
/// token, `logout` wipes it. The guard and the views only ever ask
/// `is_authenticated`.
#[derive(Debug)]
pub struct Session {
    token: Option<String>,
    store: Option<SessionStore>,
}

impl Session {
    /// Restore from the persistent store, if one is available.
    pub fn new(store: Option<SessionStore>) -> Self {
        let token = store
            .as_ref()
            .and_then(|store| store.load_token().ok())
            .flatten();
        Self { token, store }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Store the token in memory and persist it. A persistence failure
    /// leaves the in-memory session valid; the caller decides how loud
    /// to be about it.
    pub fn login(&mut self, token: String) -> anyhow::Result<()> {
        self.token = Some(token.clone());
        if let Some(store) = self.store.as_ref() {
            store.save_token(&token)?;
        }
        Ok(())
    }

    /// Clear the in-memory token and wipe persisted session state.
    pub fn logout(&mut self) -> anyhow::Result<()> {
        self.token = None;
        if let Some(store) = self.store.as_ref() {
            store.clear()?;
        }
        Ok(())
    }
}

/// Login form state. Submission is blocked locally while a required
/// field is empty; no request leaves the client in that case.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub focus_password: bool,
    pub submitting: bool,
    pub error: Option<String>,
}

/// A small editable field grid shared by the admission and meeting forms.
#[derive(Debug, Clone)]
pub struct TextForm {
    labels: &'static [&'static str],
    values: Vec<String>,
    focus: usize,
}

impl TextForm {
    pub fn new(labels: &'static [&'static str]) -> Self {
        Self {
            labels,
            values: vec![String::new(); labels.len()],
            focus: 0,
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.labels
            .iter()
            .copied()
            .zip(self.values.iter().map(String::as_str))
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn value(&self, idx: usize) -> &str {
        self.values.get(idx).map(String::as_str).unwrap_or("")
    }

    pub fn input_char(&mut self, ch: char) {
        if let Some(value) = self.values.get_mut(self.focus) {
            value.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(value) = self.values.get_mut(self.focus) {
            value.pop();
        }
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.labels.len();
    }

    pub fn prev_field(&mut self) {
        self.focus = (self.focus + self.labels.len() - 1) % self.labels.len();
    }

    pub fn reset(&mut self) {
        for value in &mut self.values {
            value.clear();
        }
        self.focus = 0;
    }
}

pub const ADMISSION_FORM_FIELDS: &[&str] =
    &["Applicant Name", "Father Name", "Requested Class", "Contact"];

pub const MEETING_FORM_FIELDS: &[&str] = &[
    "Topic",
    "Class",
    "Starts At (YYYY-MM-DD HH:MM)",
    "Duration (minutes)",
];

/// Fetch lifecycle of the student detail view.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetailState {
    #[default]
    Idle,
    Loading,
    Ready(Box<Student>),
    NotFound,
    Failed(String),
}

/// Which list the list panel is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Students,
    Attendance,
    Admissions,
    Quizzes,
    Assignments,
    Meetings,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    Name,
    Father,
    Class,
    Section,
    Roll,
    Status,
    Id,
    Date,
    Subject,
    Term,
}

#[derive(Debug, Clone)]
pub enum FilterToken {
    KeyValue(FilterKey, String),
    Free(String),
}

#[derive(Debug, Clone)]
pub struct FilterState {
    pub raw: String,
    pub tokens: Vec<FilterToken>,
}

impl FilterState {
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let mut tokens = Vec::new();
        for part in trimmed.split_whitespace() {
            if let Some((key, value)) = part.split_once(':') {
                if let Some(key) = parse_filter_key(key) {
                    tokens.push(FilterToken::KeyValue(key, value.to_lowercase()));
                } else {
                    tokens.push(FilterToken::Free(part.to_lowercase()));
                }
            } else {
                tokens.push(FilterToken::Free(part.to_lowercase()));
            }
        }
        Some(Self {
            raw: trimmed.to_string(),
            tokens,
        })
    }
}

fn parse_filter_key(key: &str) -> Option<FilterKey> {
    match key.to_lowercase().as_str() {
        "name" => Some(FilterKey::Name),
        "father" | "parent" => Some(FilterKey::Father),
        "class" => Some(FilterKey::Class),
        "section" | "sec" => Some(FilterKey::Section),
        "roll" => Some(FilterKey::Roll),
        "status" => Some(FilterKey::Status),
        "id" => Some(FilterKey::Id),
        "date" => Some(FilterKey::Date),
        "subject" | "sub" => Some(FilterKey::Subject),
        "term" => Some(FilterKey::Term),
        _ => None,
    }
}

fn contains_case_insensitive(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Everything the App needs at construction time.
pub struct AppOptions {
    pub fixtures: FixtureSet,
    pub session_store: Option<SessionStore>,
    pub data_mode: DataMode,
    pub api_endpoint: String,
}

#[derive(Debug)]
pub struct App {
    /// Shared context for modules
    pub ctx: Context,
    pub session: Session,
    route_stack: Vec<Route>,
    pub sidebar: SidebarState,
    pub sidebar_cursor: usize,
    pub focus: Focus,
    pub input_mode: InputMode,
    pub data_mode: DataMode,
    pub dashboard: Dashboard,

    pub login: LoginForm,
    pub admission_draft: TextForm,
    pub meeting_draft: TextForm,

    fixtures: FixtureSet,
    pub students: Vec<Student>,
    pub attendance: Vec<AttendanceRecord>,
    pub admissions: Vec<Admission>,
    pub quizzes: Vec<Quiz>,
    pub assignments: Vec<Assignment>,
    pub meetings: Vec<ZoomMeeting>,
    pub results: Vec<ResultRow>,

    pub selected_student: usize,
    pub selected_attendance: usize,
    pub selected_admission: usize,
    pub selected_quiz: usize,
    pub selected_assignment: usize,
    pub selected_meeting: usize,
    pub selected_result: usize,

    pub active_filter: Option<FilterState>,
    pub command: CommandBar,
    pub status: Option<StatusMessage>,

    pub student_detail: DetailState,
    student_detail_id: Option<String>,
    admission_detail_id: Option<String>,

    pub help_open: bool,
    pub should_quit: bool,

    pending_requests: Vec<ApiRequest>,
}

impl App {
    pub fn new(options: AppOptions) -> Self {
        let AppOptions {
            fixtures,
            session_store,
            data_mode,
            api_endpoint,
        } = options;

        let session = Session::new(session_store);
        let mut ctx = Context::new();
        ctx.api_endpoint = api_endpoint;
        ctx.data_mode = data_mode;
        ctx.authenticated = session.is_authenticated();

        let mut app = Self {
            ctx,
            session,
            route_stack: vec![Route::Login],
            sidebar: SidebarState::new(),
            sidebar_cursor: 0,
            focus: Focus::List,
            input_mode: InputMode::Normal,
            data_mode,
            dashboard: Dashboard::new(),
            login: LoginForm::default(),
            admission_draft: TextForm::new(ADMISSION_FORM_FIELDS),
            meeting_draft: TextForm::new(MEETING_FORM_FIELDS),
            students: fixtures.students.clone(),
            attendance: fixtures.attendance.clone(),
            admissions: fixtures.admissions.clone(),
            quizzes: fixtures.quizzes.clone(),
            assignments: fixtures.assignments.clone(),
            meetings: fixtures.meetings.clone(),
            results: fixtures.results.clone(),
            fixtures,
            selected_student: 0,
            selected_attendance: 0,
            selected_admission: 0,
            selected_quiz: 0,
            selected_assignment: 0,
            selected_meeting: 0,
            selected_result: 0,
            active_filter: None,
            command: CommandBar::default(),
            status: None,
            student_detail: DetailState::Idle,
            student_detail_id: None,
            admission_detail_id: None,
            help_open: false,
            should_quit: false,
            pending_requests: Vec::new(),
        };
        app.clamp_all_selections();
        app
    }

    // === Routing ===

    pub fn current_route(&self) -> Route {
        self.route_stack.last().cloned().unwrap_or(Route::Login)
    }

    pub fn current_page(&self) -> Option<Page> {
        self.current_route().page()
    }

    /// The path string of the current route, shown in the header.
    pub fn breadcrumb(&self) -> String {
        nav::path_of(&self.current_route())
    }

    /// Guarded navigation. Every attempt re-evaluates the guard; a
    /// protected target without a session resolves to the login route
    /// and the attempt is discarded.
    pub fn navigate(&mut self, route: Route) {
        let was_protected = route.requires_session();
        let resolved = nav::resolve(route, self.session.is_authenticated());
        if was_protected && resolved == Route::Login {
            self.set_status("Sign in to open the dashboard", StatusLevel::Warn);
        }
        self.enter_route(resolved);
    }

    pub fn navigate_path(&mut self, path: &str) {
        self.navigate(nav::parse_path(path));
    }

    fn enter_route(&mut self, route: Route) {
        if self.current_route() == route {
            return;
        }

        // The sidebar derives its expansion from the new route; paths
        // outside the dashboard leave it untouched.
        self.sidebar.sync_to_route(&route);

        match &route {
            Route::Dashboard(Page::StudentDetail, arg) => {
                self.open_student_detail(arg.clone());
            }
            Route::Dashboard(Page::AdmissionDetail, arg) => {
                self.admission_detail_id = arg.clone();
            }
            _ => {}
        }

        self.input_mode = match &route {
            Route::AdmissionForm | Route::Dashboard(Page::ScheduleMeeting, _) => InputMode::Form,
            _ => InputMode::Normal,
        };
        self.focus = Focus::List;
        self.route_stack.push(route);
    }

    /// Replace the whole stack, used after login and on hard resets.
    fn reset_stack_to(&mut self, route: Route) {
        self.route_stack.clear();
        self.route_stack.push(Route::Login);
        if route != Route::Login {
            self.enter_route(route);
        }
    }

    pub fn go_back(&mut self) {
        if self.route_stack.len() > 1 {
            self.route_stack.pop();
            let route = self.current_route();
            self.input_mode = match route {
                Route::AdmissionForm | Route::Dashboard(Page::ScheduleMeeting, _) => {
                    InputMode::Form
                }
                _ => InputMode::Normal,
            };
        }
    }

    // === Session lifecycle ===

    pub fn submit_login(&mut self) {
        let email = self.login.email.trim().to_string();
        let password = self.login.password.trim().to_string();
        if email.is_empty() || password.is_empty() {
            self.login.error = Some("Email and password are required".to_string());
            self.login.submitting = false;
            return;
        }
        self.login.error = None;
        self.login.submitting = true;
        match self.data_mode {
            // The fixture variant runs without a backend; any complete
            // credential pair opens a local session.
            DataMode::Fixture => self.apply_login_ok("fixture-session".to_string()),
            DataMode::Api => self.queue_request(ApiRequest::Login { email, password }),
        }
    }

    pub fn apply_login_ok(&mut self, token: String) {
        self.login.submitting = false;
        if let Err(err) = self.session.login(token) {
            self.set_status(
                format!("Session persistence failed: {err}"),
                StatusLevel::Warn,
            );
        }
        self.ctx.authenticated = true;
        self.login = LoginForm::default();
        self.reset_stack_to(Route::Dashboard(Page::Home, None));
        if self.data_mode == DataMode::Api {
            self.queue_request(ApiRequest::FetchStudents);
        }
        self.set_status("Signed in", StatusLevel::Info);
    }

    pub fn apply_login_failed(&mut self, message: String) {
        self.login.submitting = false;
        self.login.error = Some(message);
    }

    pub fn logout(&mut self) {
        if let Err(err) = self.session.logout() {
            self.set_status(format!("Session clear failed: {err}"), StatusLevel::Warn);
        }
        self.ctx.authenticated = false;
        self.queue_request(ApiRequest::SetToken(None));
        self.reset_stack_to(Route::Login);
        self.set_status("Signed out", StatusLevel::Info);
    }

    /// The 403 path: wipe persisted session state first, then hard
    /// reset every piece of view state and land on the login route. The
    /// view that triggered the request never sees the response.
    pub fn expire_session(&mut self) {
        if let Err(err) = self.session.logout() {
            tracing::warn!(%err, "failed to clear session store on 403");
        }
        self.hard_reset();
        self.set_status("Session expired, signed out", StatusLevel::Warn);
    }

    /// The in-process equivalent of a full page reload.
    fn hard_reset(&mut self) {
        self.ctx = {
            let mut ctx = Context::new();
            ctx.api_endpoint = std::mem::take(&mut self.ctx.api_endpoint);
            ctx.data_mode = self.data_mode;
            ctx
        };
        self.route_stack = vec![Route::Login];
        self.sidebar = SidebarState::new();
        self.sidebar_cursor = 0;
        self.focus = Focus::List;
        self.input_mode = InputMode::Normal;
        self.dashboard = Dashboard::new();
        self.login = LoginForm::default();
        self.admission_draft.reset();
        self.meeting_draft.reset();
        self.reload_from_fixtures();
        self.active_filter = None;
        self.command = CommandBar::default();
        self.status = None;
        self.student_detail = DetailState::Idle;
        self.student_detail_id = None;
        self.admission_detail_id = None;
        self.help_open = false;
        self.pending_requests.clear();
    }

    fn reload_from_fixtures(&mut self) {
        self.students = self.fixtures.students.clone();
        self.attendance = self.fixtures.attendance.clone();
        self.admissions = self.fixtures.admissions.clone();
        self.quizzes = self.fixtures.quizzes.clone();
        self.assignments = self.fixtures.assignments.clone();
        self.meetings = self.fixtures.meetings.clone();
        self.results = self.fixtures.results.clone();
        self.clamp_all_selections();
    }

    // === API plumbing ===

    fn queue_request(&mut self, request: ApiRequest) {
        self.pending_requests.push(request);
    }

    pub fn take_api_requests(&mut self) -> Vec<ApiRequest> {
        std::mem::take(&mut self.pending_requests)
    }

    pub fn apply_api_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::LoginOk { token } => self.apply_login_ok(token),
            ApiEvent::LoginFailed { message } => self.apply_login_failed(message),
            ApiEvent::StudentsReady { students } => {
                let count = students.len();
                self.students = students;
                self.clamp_all_selections();
                self.set_status(format!("Loaded {count} students"), StatusLevel::Info);
            }
            ApiEvent::StudentReady { id, student } => {
                // Responses for a detail view we already left are stale.
                if self.student_detail_id.as_deref() != Some(id.as_str()) {
                    return;
                }
                self.student_detail = match student {
                    Some(student) => DetailState::Ready(student),
                    None => DetailState::NotFound,
                };
            }
            ApiEvent::RequestFailed { what, message } => {
                if what == "student record" && self.student_detail == DetailState::Loading {
                    self.student_detail = DetailState::Failed(message.clone());
                }
                self.set_status(format!("{what} failed: {message}"), StatusLevel::Error);
            }
            ApiEvent::SessionExpired => self.expire_session(),
        }
    }

    // === Student detail ===

    fn open_student_detail(&mut self, arg: Option<String>) {
        let id = arg.or_else(|| self.selected_student().map(|student| student.id.clone()));
        let Some(id) = id else {
            self.student_detail = DetailState::Idle;
            self.student_detail_id = None;
            return;
        };
        self.student_detail_id = Some(id.clone());
        match self.data_mode {
            DataMode::Fixture => {
                self.student_detail = match self
                    .students
                    .iter()
                    .find(|student| student.id == id)
                    .cloned()
                {
                    Some(student) => DetailState::Ready(Box::new(student)),
                    None => DetailState::NotFound,
                };
            }
            DataMode::Api => {
                self.student_detail = DetailState::Loading;
                self.queue_request(ApiRequest::FetchStudent { id });
            }
        }
    }

    pub fn student_detail_id(&self) -> Option<&str> {
        self.student_detail_id.as_deref()
    }

    /// The admission shown on the detail page: the deep-linked id if
    /// one was given, else the list selection.
    pub fn admission_detail(&self) -> Option<&Admission> {
        match self.admission_detail_id.as_deref() {
            Some(id) => self.admissions.iter().find(|admission| admission.id == id),
            None => self.selected_admission(),
        }
    }

    pub fn admission_detail_missing(&self) -> Option<&str> {
        match self.admission_detail_id.as_deref() {
            Some(id) if !self.admissions.iter().any(|a| a.id == id) => Some(id),
            _ => None,
        }
    }

    // === Data mode / refresh ===

    pub fn set_data_mode(&mut self, mode: DataMode) {
        if self.data_mode == mode {
            return;
        }
        self.data_mode = mode;
        self.ctx.data_mode = mode;
        match mode {
            DataMode::Fixture => {
                self.reload_from_fixtures();
                self.set_status("Switched to fixture data", StatusLevel::Info);
            }
            DataMode::Api => {
                if self.session.is_authenticated() {
                    self.queue_request(ApiRequest::SetToken(
                        self.session.token().map(str::to_string),
                    ));
                    self.queue_request(ApiRequest::FetchStudents);
                }
                self.set_status("Switched to live API data", StatusLevel::Info);
            }
        }
    }

    pub fn refresh(&mut self) {
        match self.data_mode {
            DataMode::Fixture => {
                self.reload_from_fixtures();
                self.set_status("Reloaded fixture data", StatusLevel::Info);
            }
            DataMode::Api => {
                self.queue_request(ApiRequest::FetchStudents);
                self.set_status("Refreshing from API…", StatusLevel::Info);
            }
        }
    }

    // === Status line ===

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    pub fn on_tick(&mut self) {
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > Duration::from_secs(3) {
                self.status = None;
            }
        }
        self.clamp_all_selections();
    }

    // === Sidebar ===

    pub fn sidebar_rows(&self) -> Vec<SidebarRow> {
        self.sidebar.visible_rows()
    }

    pub fn sidebar_move(&mut self, down: bool) {
        let len = self.sidebar_rows().len();
        if len == 0 {
            return;
        }
        if down {
            self.sidebar_cursor = (self.sidebar_cursor + 1).min(len - 1);
        } else {
            self.sidebar_cursor = self.sidebar_cursor.saturating_sub(1);
        }
    }

    /// Enter/Space on the sidebar: headers toggle, items navigate.
    pub fn sidebar_activate(&mut self) {
        let rows = self.sidebar_rows();
        match rows.get(self.sidebar_cursor) {
            Some(SidebarRow::Header(section)) => {
                self.sidebar.toggle(*section);
                self.clamp_sidebar_cursor();
            }
            Some(SidebarRow::Item(_, item)) => {
                self.navigate(Route::Dashboard(item.page, None));
            }
            None => {}
        }
    }

    pub fn jump_to_section(&mut self, section: Section) {
        match nav::slug::landing_page(section) {
            Some(page) => self.navigate(Route::Dashboard(page, None)),
            None => self.set_status("Section has no views", StatusLevel::Warn),
        }
    }

    fn clamp_sidebar_cursor(&mut self) {
        let len = self.sidebar_rows().len();
        if len == 0 {
            self.sidebar_cursor = 0;
        } else if self.sidebar_cursor >= len {
            self.sidebar_cursor = len - 1;
        }
    }

    // === Command bar ===

    pub fn enter_command(&mut self) {
        self.input_mode = InputMode::Command;
        self.focus = Focus::Command;
        self.command.input.clear();
    }

    pub fn exit_command(&mut self) {
        self.input_mode = match self.current_route() {
            Route::AdmissionForm | Route::Dashboard(Page::ScheduleMeeting, _) => InputMode::Form,
            _ => InputMode::Normal,
        };
        self.focus = Focus::List;
        self.command.input.clear();
    }

    pub fn apply_command_bar(&mut self) {
        let input = self.command.input.trim().to_string();
        if input.is_empty() {
            self.exit_command();
            return;
        }

        let cmd = crate::core::parse_command(&input);
        if !matches!(cmd, Command::Unknown(_)) {
            self.command.last = Some(input);
            self.exit_command();
            self.apply_command(cmd);
            self.clamp_all_selections();
            return;
        }

        let lowered = input.to_lowercase();
        if matches!(lowered.as_str(), "clear" | "reset" | "none") {
            self.active_filter = None;
            self.command.last = Some(input);
            self.set_status("Filter cleared", StatusLevel::Info);
            self.exit_command();
            self.clamp_all_selections();
            return;
        }
        if let Some(filter) = FilterState::parse(&input) {
            self.command.last = Some(filter.raw.clone());
            self.active_filter = Some(filter);
            self.set_status(format!("Filter applied: {input}"), StatusLevel::Info);
            self.exit_command();
            self.clamp_all_selections();
        } else {
            self.set_status("Filter ignored: empty input", StatusLevel::Warn);
            self.exit_command();
        }
    }

    pub fn apply_command(&mut self, cmd: Command) {
        match cmd {
            Command::Go(path) => self.navigate_path(&path),
            Command::Section(section) => self.jump_to_section(section),
            Command::Student(id) => {
                self.navigate(Route::Dashboard(Page::StudentDetail, Some(id)))
            }
            Command::Logout => self.logout(),
            Command::ExportCsv => {
                let action = export::export_current_view(self, ExportFormat::Csv);
                self.apply_action(action);
            }
            Command::ExportJson => {
                let action = export::export_current_view(self, ExportFormat::Json);
                self.apply_action(action);
            }
            Command::Mode(mode) => self.set_data_mode(mode),
            Command::Refresh => self.refresh(),
            Command::Help => self.help_open = true,
            Command::Quit => self.should_quit = true,
            Command::Unknown(input) => {
                self.set_status(format!("Unknown command: {input}"), StatusLevel::Warn)
            }
        }
    }

    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(target) => match target {
                NavigateTarget::Back => self.go_back(),
                NavigateTarget::Home => self.navigate(Route::Dashboard(Page::Home, None)),
                NavigateTarget::Page(page) => self.navigate(Route::Dashboard(page, None)),
                NavigateTarget::Path(path) => self.navigate_path(&path),
                NavigateTarget::Student(id) => {
                    self.navigate(Route::Dashboard(Page::StudentDetail, Some(id)))
                }
            },
            Action::Copy(text) => {
                self.ctx.set_clipboard(text);
            }
            Action::Notify(text, level) => {
                let level = match level {
                    NotifyLevel::Info => StatusLevel::Info,
                    NotifyLevel::Warn => StatusLevel::Warn,
                    NotifyLevel::Error => StatusLevel::Error,
                };
                self.set_status(text, level);
            }
            Action::Logout => self.logout(),
            Action::Quit => self.should_quit = true,
        }
    }

    // === Lists, filters, selection ===

    pub fn list_kind(&self) -> Option<ListKind> {
        match self.current_page()? {
            Page::Home => None,
            Page::AllStudents | Page::StudentDetail | Page::MarkAttendance => {
                Some(ListKind::Students)
            }
            Page::AttendanceReport => Some(ListKind::Attendance),
            Page::AdmissionList | Page::AdmissionDetail => Some(ListKind::Admissions),
            Page::QuizList => Some(ListKind::Quizzes),
            Page::AssignmentList => Some(ListKind::Assignments),
            Page::ScheduleMeeting | Page::MeetingList => Some(ListKind::Meetings),
            Page::ResultList => Some(ListKind::Results),
        }
    }

    pub fn list_len(&self) -> usize {
        match self.list_kind() {
            Some(ListKind::Students) => self.filtered_student_indices().len(),
            Some(ListKind::Attendance) => self.filtered_attendance_indices().len(),
            Some(ListKind::Admissions) => self.filtered_admission_indices().len(),
            Some(ListKind::Quizzes) => self.filtered_quiz_indices().len(),
            Some(ListKind::Assignments) => self.filtered_assignment_indices().len(),
            Some(ListKind::Meetings) => self.filtered_meeting_indices().len(),
            Some(ListKind::Results) => self.filtered_result_indices().len(),
            None => 0,
        }
    }

    pub fn current_selection(&self) -> usize {
        match self.list_kind() {
            Some(ListKind::Students) => self.selected_student,
            Some(ListKind::Attendance) => self.selected_attendance,
            Some(ListKind::Admissions) => self.selected_admission,
            Some(ListKind::Quizzes) => self.selected_quiz,
            Some(ListKind::Assignments) => self.selected_assignment,
            Some(ListKind::Meetings) => self.selected_meeting,
            Some(ListKind::Results) => self.selected_result,
            None => 0,
        }
    }

    pub fn set_list_selection(&mut self, index: usize) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        let index = index.min(len - 1);
        match self.list_kind() {
            Some(ListKind::Students) => self.selected_student = index,
            Some(ListKind::Attendance) => self.selected_attendance = index,
            Some(ListKind::Admissions) => self.selected_admission = index,
            Some(ListKind::Quizzes) => self.selected_quiz = index,
            Some(ListKind::Assignments) => self.selected_assignment = index,
            Some(ListKind::Meetings) => self.selected_meeting = index,
            Some(ListKind::Results) => self.selected_result = index,
            None => {}
        }
    }

    pub fn move_selection_up(&mut self) {
        let current = self.current_selection();
        if current > 0 {
            self.set_list_selection(current - 1);
        }
    }

    pub fn move_selection_down(&mut self) {
        let current = self.current_selection();
        if current + 1 < self.list_len() {
            self.set_list_selection(current + 1);
        }
    }

    /// Enter on a list row opens the record's detail route where one
    /// exists; otherwise it moves focus to the detail pane.
    pub fn enter_detail(&mut self) {
        match self.current_page() {
            Some(Page::AllStudents) => {
                if let Some(id) = self.selected_student().map(|student| student.id.clone()) {
                    self.navigate(Route::Dashboard(Page::StudentDetail, Some(id)));
                }
            }
            Some(Page::AdmissionList) => {
                if let Some(id) = self.selected_admission().map(|admission| admission.id.clone())
                {
                    self.navigate(Route::Dashboard(Page::AdmissionDetail, Some(id)));
                }
            }
            _ => self.focus = Focus::Details,
        }
    }

    pub fn filtered_student_indices(&self) -> Vec<usize> {
        self.students
            .iter()
            .enumerate()
            .filter(|(_, student)| self.matches_student(student))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn filtered_attendance_indices(&self) -> Vec<usize> {
        self.attendance
            .iter()
            .enumerate()
            .filter(|(_, record)| self.matches_attendance(record))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn filtered_admission_indices(&self) -> Vec<usize> {
        self.admissions
            .iter()
            .enumerate()
            .filter(|(_, admission)| self.matches_admission(admission))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn filtered_quiz_indices(&self) -> Vec<usize> {
        self.quizzes
            .iter()
            .enumerate()
            .filter(|(_, quiz)| self.matches_quiz(quiz))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn filtered_assignment_indices(&self) -> Vec<usize> {
        self.assignments
            .iter()
            .enumerate()
            .filter(|(_, assignment)| self.matches_assignment(assignment))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn filtered_meeting_indices(&self) -> Vec<usize> {
        self.meetings
            .iter()
            .enumerate()
            .filter(|(_, meeting)| self.matches_meeting(meeting))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn filtered_result_indices(&self) -> Vec<usize> {
        self.results
            .iter()
            .enumerate()
            .filter(|(_, row)| self.matches_result(row))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn selected_student(&self) -> Option<&Student> {
        self.filtered_student_indices()
            .get(self.selected_student)
            .and_then(|idx| self.students.get(*idx))
    }

    pub fn selected_attendance(&self) -> Option<&AttendanceRecord> {
        self.filtered_attendance_indices()
            .get(self.selected_attendance)
            .and_then(|idx| self.attendance.get(*idx))
    }

    pub fn selected_admission(&self) -> Option<&Admission> {
        self.filtered_admission_indices()
            .get(self.selected_admission)
            .and_then(|idx| self.admissions.get(*idx))
    }

    pub fn selected_quiz(&self) -> Option<&Quiz> {
        self.filtered_quiz_indices()
            .get(self.selected_quiz)
            .and_then(|idx| self.quizzes.get(*idx))
    }

    pub fn selected_assignment(&self) -> Option<&Assignment> {
        self.filtered_assignment_indices()
            .get(self.selected_assignment)
            .and_then(|idx| self.assignments.get(*idx))
    }

    pub fn selected_meeting(&self) -> Option<&ZoomMeeting> {
        self.filtered_meeting_indices()
            .get(self.selected_meeting)
            .and_then(|idx| self.meetings.get(*idx))
    }

    pub fn selected_result(&self) -> Option<&ResultRow> {
        self.filtered_result_indices()
            .get(self.selected_result)
            .and_then(|idx| self.results.get(*idx))
    }

    pub fn filtered_students_cloned(&self) -> Vec<Student> {
        self.filtered_student_indices()
            .into_iter()
            .filter_map(|idx| self.students.get(idx).cloned())
            .collect()
    }

    pub fn filtered_attendance_cloned(&self) -> Vec<AttendanceRecord> {
        self.filtered_attendance_indices()
            .into_iter()
            .filter_map(|idx| self.attendance.get(idx).cloned())
            .collect()
    }

    pub fn filtered_admissions_cloned(&self) -> Vec<Admission> {
        self.filtered_admission_indices()
            .into_iter()
            .filter_map(|idx| self.admissions.get(idx).cloned())
            .collect()
    }

    pub fn filtered_results_cloned(&self) -> Vec<ResultRow> {
        self.filtered_result_indices()
            .into_iter()
            .filter_map(|idx| self.results.get(idx).cloned())
            .collect()
    }

    fn clamp_all_selections(&mut self) {
        let students = self.filtered_student_indices().len();
        let attendance = self.filtered_attendance_indices().len();
        let admissions = self.filtered_admission_indices().len();
        let quizzes = self.filtered_quiz_indices().len();
        let assignments = self.filtered_assignment_indices().len();
        let meetings = self.filtered_meeting_indices().len();
        let results = self.filtered_result_indices().len();

        Self::clamp_selection(&mut self.selected_student, students);
        Self::clamp_selection(&mut self.selected_attendance, attendance);
        Self::clamp_selection(&mut self.selected_admission, admissions);
        Self::clamp_selection(&mut self.selected_quiz, quizzes);
        Self::clamp_selection(&mut self.selected_assignment, assignments);
        Self::clamp_selection(&mut self.selected_meeting, meetings);
        Self::clamp_selection(&mut self.selected_result, results);
        self.clamp_sidebar_cursor();
    }

    fn clamp_selection(selection: &mut usize, len: usize) {
        if len == 0 {
            *selection = 0;
        } else if *selection >= len {
            *selection = len - 1;
        }
    }

    fn matches_student(&self, student: &Student) -> bool {
        let Some(filter) = self.active_filter.as_ref() else {
            return true;
        };
        filter.tokens.iter().all(|token| match token {
            FilterToken::KeyValue(key, value) => match key {
                FilterKey::Name => contains_case_insensitive(&student.name, value),
                FilterKey::Father => contains_case_insensitive(&student.father_name, value),
                FilterKey::Class => contains_case_insensitive(&student.class, value),
                FilterKey::Section => contains_case_insensitive(&student.section, value),
                FilterKey::Roll => student.roll_no.eq_ignore_ascii_case(value),
                FilterKey::Status => student.status.label() == value,
                FilterKey::Id => contains_case_insensitive(&student.id, value),
                _ => false,
            },
            FilterToken::Free(value) => {
                contains_case_insensitive(&student.name, value)
                    || contains_case_insensitive(&student.father_name, value)
                    || contains_case_insensitive(&student.class, value)
                    || contains_case_insensitive(&student.id, value)
            }
        })
    }

    fn matches_attendance(&self, record: &AttendanceRecord) -> bool {
        let Some(filter) = self.active_filter.as_ref() else {
            return true;
        };
        filter.tokens.iter().all(|token| match token {
            FilterToken::KeyValue(key, value) => match key {
                FilterKey::Name => contains_case_insensitive(&record.student_name, value),
                FilterKey::Id => contains_case_insensitive(&record.student_id, value),
                FilterKey::Date => record.date.to_string().contains(value),
                FilterKey::Status => record.status.label() == value,
                _ => false,
            },
            FilterToken::Free(value) => {
                contains_case_insensitive(&record.student_name, value)
                    || contains_case_insensitive(&record.student_id, value)
                    || record.date.to_string().contains(value)
                    || record.status.label().contains(value.as_str())
            }
        })
    }

    fn matches_admission(&self, admission: &Admission) -> bool {
        let Some(filter) = self.active_filter.as_ref() else {
            return true;
        };
        filter.tokens.iter().all(|token| match token {
            FilterToken::KeyValue(key, value) => match key {
                FilterKey::Name => contains_case_insensitive(&admission.applicant_name, value),
                FilterKey::Father => contains_case_insensitive(&admission.father_name, value),
                FilterKey::Class => contains_case_insensitive(&admission.requested_class, value),
                FilterKey::Status => admission.status.label() == value,
                FilterKey::Id => contains_case_insensitive(&admission.id, value),
                FilterKey::Date => admission.submitted_on.to_string().contains(value),
                _ => false,
            },
            FilterToken::Free(value) => {
                contains_case_insensitive(&admission.applicant_name, value)
                    || contains_case_insensitive(&admission.requested_class, value)
                    || contains_case_insensitive(&admission.id, value)
                    || admission.status.label().contains(value.as_str())
            }
        })
    }

    fn matches_quiz(&self, quiz: &Quiz) -> bool {
        let Some(filter) = self.active_filter.as_ref() else {
            return true;
        };
        filter.tokens.iter().all(|token| match token {
            FilterToken::KeyValue(key, value) => match key {
                FilterKey::Name => contains_case_insensitive(&quiz.title, value),
                FilterKey::Class => contains_case_insensitive(&quiz.class, value),
                FilterKey::Subject => contains_case_insensitive(&quiz.subject, value),
                FilterKey::Date => quiz.scheduled_on.to_string().contains(value),
                FilterKey::Id => contains_case_insensitive(&quiz.id, value),
                _ => false,
            },
            FilterToken::Free(value) => {
                contains_case_insensitive(&quiz.title, value)
                    || contains_case_insensitive(&quiz.class, value)
                    || contains_case_insensitive(&quiz.subject, value)
            }
        })
    }

    fn matches_assignment(&self, assignment: &Assignment) -> bool {
        let Some(filter) = self.active_filter.as_ref() else {
            return true;
        };
        filter.tokens.iter().all(|token| match token {
            FilterToken::KeyValue(key, value) => match key {
                FilterKey::Name => contains_case_insensitive(&assignment.title, value),
                FilterKey::Class => contains_case_insensitive(&assignment.class, value),
                FilterKey::Subject => contains_case_insensitive(&assignment.subject, value),
                FilterKey::Status => assignment.status.label() == value,
                FilterKey::Date => assignment.due_on.to_string().contains(value),
                FilterKey::Id => contains_case_insensitive(&assignment.id, value),
                _ => false,
            },
            FilterToken::Free(value) => {
                contains_case_insensitive(&assignment.title, value)
                    || contains_case_insensitive(&assignment.class, value)
                    || contains_case_insensitive(&assignment.subject, value)
            }
        })
    }

    fn matches_meeting(&self, meeting: &ZoomMeeting) -> bool {
        let Some(filter) = self.active_filter.as_ref() else {
            return true;
        };
        filter.tokens.iter().all(|token| match token {
            FilterToken::KeyValue(key, value) => match key {
                FilterKey::Name => contains_case_insensitive(&meeting.topic, value),
                FilterKey::Class => contains_case_insensitive(&meeting.class, value),
                FilterKey::Date => meeting.starts_at.to_string().contains(value),
                FilterKey::Id => contains_case_insensitive(&meeting.id, value),
                _ => false,
            },
            FilterToken::Free(value) => {
                contains_case_insensitive(&meeting.topic, value)
                    || contains_case_insensitive(&meeting.class, value)
                    || contains_case_insensitive(&meeting.host, value)
            }
        })
    }

    fn matches_result(&self, row: &ResultRow) -> bool {
        let Some(filter) = self.active_filter.as_ref() else {
            return true;
        };
        filter.tokens.iter().all(|token| match token {
            FilterToken::KeyValue(key, value) => match key {
                FilterKey::Name => contains_case_insensitive(&row.student_name, value),
                FilterKey::Id => contains_case_insensitive(&row.student_id, value),
                FilterKey::Class => contains_case_insensitive(&row.class, value),
                FilterKey::Subject => contains_case_insensitive(&row.subject, value),
                FilterKey::Term => contains_case_insensitive(&row.term, value),
                _ => false,
            },
            FilterToken::Free(value) => {
                contains_case_insensitive(&row.student_name, value)
                    || contains_case_insensitive(&row.subject, value)
                    || contains_case_insensitive(&row.class, value)
            }
        })
    }

    // === Attendance marking ===

    pub fn today_status(&self, student_id: &str) -> Option<AttendanceStatus> {
        let today = Local::now().date_naive();
        self.attendance
            .iter()
            .find(|record| record.student_id == student_id && record.date == today)
            .map(|record| record.status)
    }

    /// Upsert today's attendance for the selected student. Local-only
    /// in both modes; the backend has no attendance write surface here.
    pub fn set_today_attendance(&mut self, status: AttendanceStatus) {
        let Some((id, name)) = self
            .selected_student()
            .map(|student| (student.id.clone(), student.name.clone()))
        else {
            self.set_status("Select a student first", StatusLevel::Warn);
            return;
        };
        let today = Local::now().date_naive();
        match self
            .attendance
            .iter_mut()
            .find(|record| record.student_id == id && record.date == today)
        {
            Some(record) => record.status = status,
            None => self.attendance.push(AttendanceRecord {
                student_id: id,
                student_name: name.clone(),
                date: today,
                status,
                remarks: String::new(),
            }),
        }
        self.set_status(
            format!("Marked {} {}", name, status.label()),
            StatusLevel::Info,
        );
    }

    // === Forms ===

    pub fn submit_admission_form(&mut self) {
        let missing = self
            .admission_draft
            .fields()
            .any(|(_, value)| value.trim().is_empty());
        if missing {
            self.set_status("All admission fields are required", StatusLevel::Warn);
            return;
        }
        let admission = Admission {
            id: next_id("A", self.admissions.iter().map(|a| a.id.as_str())),
            applicant_name: self.admission_draft.value(0).trim().to_string(),
            father_name: self.admission_draft.value(1).trim().to_string(),
            requested_class: self.admission_draft.value(2).trim().to_string(),
            contact: self.admission_draft.value(3).trim().to_string(),
            submitted_on: Local::now().date_naive(),
            status: AdmissionStatus::Pending,
        };
        let id = admission.id.clone();
        self.admissions.push(admission);
        self.admission_draft.reset();
        // Submission is recorded locally; the online submit endpoint is
        // intentionally not wired.
        self.set_status(format!("Admission {id} recorded locally"), StatusLevel::Info);
    }

    pub fn submit_meeting_form(&mut self) {
        let topic = self.meeting_draft.value(0).trim().to_string();
        let class = self.meeting_draft.value(1).trim().to_string();
        let starts_raw = self.meeting_draft.value(2).trim().to_string();
        let duration_raw = self.meeting_draft.value(3).trim().to_string();
        if topic.is_empty() || class.is_empty() || starts_raw.is_empty() || duration_raw.is_empty()
        {
            self.set_status("All meeting fields are required", StatusLevel::Warn);
            return;
        }
        let Ok(starts_at) =
            chrono::NaiveDateTime::parse_from_str(&starts_raw, "%Y-%m-%d %H:%M")
        else {
            self.set_status("Starts At must be YYYY-MM-DD HH:MM", StatusLevel::Warn);
            return;
        };
        let Ok(duration_minutes) = duration_raw.parse::<u32>() else {
            self.set_status("Duration must be a number of minutes", StatusLevel::Warn);
            return;
        };
        let id = next_id("Z", self.meetings.iter().map(|m| m.id.as_str()));
        self.meetings.push(ZoomMeeting {
            join_link: format!("https://zoom.us/j/9112000{}", &id[2..]),
            id: id.clone(),
            topic,
            class,
            starts_at,
            duration_minutes,
            host: "Admin Office".to_string(),
        });
        self.meeting_draft.reset();
        self.set_status(format!("Meeting {id} scheduled"), StatusLevel::Info);
        self.navigate(Route::Dashboard(Page::MeetingList, None));
    }

    // === Landing view data ===

    pub fn home_summary(&self) -> HomeSummary {
        let today = Local::now().date_naive();
        HomeSummary {
            students: self.students.len(),
            active_students: self
                .students
                .iter()
                .filter(|student| student.status == StudentStatus::Active)
                .count(),
            pending_admissions: self
                .admissions
                .iter()
                .filter(|admission| admission.status == AdmissionStatus::Pending)
                .count(),
            present_today: self
                .attendance
                .iter()
                .filter(|record| {
                    record.date == today && record.status == AttendanceStatus::Present
                })
                .count(),
            absent_today: self
                .attendance
                .iter()
                .filter(|record| record.date == today && record.status == AttendanceStatus::Absent)
                .count(),
            open_assignments: self
                .assignments
                .iter()
                .filter(|assignment| assignment.status == AssignmentStatus::Open)
                .count(),
            scheduled_quizzes: self.quizzes.len(),
        }
    }

    pub fn recent_activity(&self) -> Vec<ActivityItem> {
        let mut items = Vec::new();
        for admission in self.admissions.iter().rev().take(4) {
            items.push(ActivityItem {
                kind: ActivityKind::Admission(admission.id.clone()),
                display: format!(
                    "admission {} · {} ({})",
                    admission.id,
                    admission.applicant_name,
                    admission.status.label()
                ),
            });
        }
        for record in self.attendance.iter().rev().take(4) {
            items.push(ActivityItem {
                kind: ActivityKind::Attendance(record.student_id.clone()),
                display: format!(
                    "attendance {} · {} {}",
                    record.date, record.student_name, record.status.label()
                ),
            });
        }
        items
    }

    pub fn upcoming_meetings(&self) -> Vec<String> {
        let mut meetings: Vec<&ZoomMeeting> = self.meetings.iter().collect();
        meetings.sort_by_key(|meeting| meeting.starts_at);
        meetings
            .iter()
            .take(5)
            .map(|meeting| {
                format!(
                    "{} · {} ({} min)",
                    meeting.starts_at.format("%m-%d %H:%M"),
                    meeting.topic,
                    meeting.duration_minutes
                )
            })
            .collect()
    }

    pub fn session_lines(&self) -> Vec<String> {
        vec![
            format!("Endpoint  {}", self.ctx.api_endpoint),
            format!("Mode      {}", self.data_mode.label()),
            format!(
                "Session   {}",
                if self.session.is_authenticated() {
                    "authenticated"
                } else {
                    "anonymous"
                }
            ),
        ]
    }

    /// Text the 'y' key copies: the key field of the selected record.
    pub fn copy_payload(&self) -> Option<String> {
        match self.list_kind()? {
            ListKind::Students => self.selected_student().map(|s| s.id.clone()),
            ListKind::Attendance => self.selected_attendance().map(|r| r.student_id.clone()),
            ListKind::Admissions => self.selected_admission().map(|a| a.id.clone()),
            ListKind::Quizzes => self.selected_quiz().map(|q| q.id.clone()),
            ListKind::Assignments => self.selected_assignment().map(|a| a.id.clone()),
            ListKind::Meetings => self.selected_meeting().map(|m| m.join_link.clone()),
            ListKind::Results => self.selected_result().map(|r| r.student_id.clone()),
        }
    }

    /// Sync context with app state
    pub fn sync_context(&mut self) {
        self.ctx.data_mode = self.data_mode;
        self.ctx.authenticated = self.session.is_authenticated();
        self.ctx.selected = match self.list_kind() {
            Some(ListKind::Students) => self
                .selected_student()
                .map(|student| Selected::Student(student.id.clone()))
                .unwrap_or(Selected::None),
            Some(ListKind::Admissions) => self
                .selected_admission()
                .map(|admission| Selected::Admission(admission.id.clone()))
                .unwrap_or(Selected::None),
            Some(ListKind::Meetings) => self
                .selected_meeting()
                .map(|meeting| Selected::Meeting(meeting.id.clone()))
                .unwrap_or(Selected::None),
            _ => Selected::None,
        };
    }
}

/// Next "P-NNNN" style id for locally created records.
fn next_id<'a>(prefix: &str, existing: impl Iterator<Item = &'a str>) -> String {
    let max = existing
        .filter_map(|id| id.rsplit('-').next())
        .filter_map(|digits| digits.parse::<u64>().ok())
        .max()
        .unwrap_or(1000);
    format!("{prefix}-{}", max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DataMode;

    fn test_app(mode: DataMode) -> App {
        App::new(AppOptions {
            fixtures: FixtureSet::builtin(),
            session_store: None,
            data_mode: mode,
            api_endpoint: "http://localhost:8000".to_string(),
        })
    }

    fn login(app: &mut App) {
        app.login.email = "admin@khuddam.org".to_string();
        app.login.password = "secret".to_string();
        app.submit_login();
        if let Some(ApiRequest::Login { .. }) = app.take_api_requests().first() {
            app.apply_login_ok("tok123".to_string());
        }
    }

    #[test]
    fn test_guard_blocks_dashboard_without_session() {
        let mut app = test_app(DataMode::Fixture);
        app.navigate_path("/dashboard/students/all-students");
        assert_eq!(app.current_route(), Route::Login);
    }

    #[test]
    fn test_login_with_empty_password_is_local() {
        let mut app = test_app(DataMode::Api);
        app.login.email = "admin@khuddam.org".to_string();
        app.submit_login();
        assert!(app.take_api_requests().is_empty());
        assert!(app.login.error.is_some());
        assert!(!app.login.submitting);
        assert_eq!(app.current_route(), Route::Login);
    }

    #[test]
    fn test_login_success_lands_on_dashboard() {
        let mut app = test_app(DataMode::Api);
        login(&mut app);
        assert_eq!(app.session.token(), Some("tok123"));
        assert_eq!(app.current_route(), Route::Dashboard(Page::Home, None));
    }

    #[test]
    fn test_deep_link_expands_matching_section() {
        let mut app = test_app(DataMode::Fixture);
        login(&mut app);
        app.navigate_path("/dashboard/zoom/meeting-list");
        assert_eq!(app.sidebar.expanded(), Some(Section::Zoom));
        assert_eq!(
            app.current_route(),
            Route::Dashboard(Page::MeetingList, None)
        );
    }

    #[test]
    fn test_session_expiry_hard_resets_without_view_error() {
        let mut app = test_app(DataMode::Api);
        login(&mut app);
        app.navigate(Route::Dashboard(Page::StudentDetail, Some("S-1001".to_string())));
        assert_eq!(app.student_detail, DetailState::Loading);
        app.take_api_requests();

        app.apply_api_event(ApiEvent::SessionExpired);
        assert!(!app.session.is_authenticated());
        assert_eq!(app.current_route(), Route::Login);
        // The request's own error path was suppressed, not rendered.
        assert_eq!(app.student_detail, DetailState::Idle);
    }

    #[test]
    fn test_stale_student_response_is_dropped() {
        let mut app = test_app(DataMode::Api);
        login(&mut app);
        app.navigate(Route::Dashboard(Page::StudentDetail, Some("S-1001".to_string())));
        app.go_back();
        app.navigate(Route::Dashboard(Page::StudentDetail, Some("S-1002".to_string())));

        let stale = app.students[0].clone();
        app.apply_api_event(ApiEvent::StudentReady {
            id: "S-1001".to_string(),
            student: Some(Box::new(stale)),
        });
        assert_eq!(app.student_detail, DetailState::Loading);
    }

    #[test]
    fn test_fixture_detail_not_found() {
        let mut app = test_app(DataMode::Fixture);
        login(&mut app);
        app.navigate(Route::Dashboard(Page::StudentDetail, Some("S-9999".to_string())));
        assert_eq!(app.student_detail, DetailState::NotFound);
    }

    #[test]
    fn test_filter_narrows_student_list() {
        let mut app = test_app(DataMode::Fixture);
        login(&mut app);
        app.navigate_path("/dashboard/students/all-students");
        let all = app.filtered_student_indices().len();
        app.active_filter = FilterState::parse("class:Hifz-1");
        let narrowed = app.filtered_student_indices().len();
        assert!(narrowed > 0);
        assert!(narrowed < all);
        for idx in app.filtered_student_indices() {
            assert_eq!(app.students[idx].class, "Hifz-1");
        }
    }

    #[test]
    fn test_mark_attendance_upserts_today() {
        let mut app = test_app(DataMode::Fixture);
        login(&mut app);
        app.navigate_path("/dashboard/attendance/mark-attendance");
        let id = app.selected_student().map(|s| s.id.clone());
        app.set_today_attendance(AttendanceStatus::Leave);
        app.set_today_attendance(AttendanceStatus::Present);
        let id = id.expect("fixture student selected");
        assert_eq!(app.today_status(&id), Some(AttendanceStatus::Present));
        let today = Local::now().date_naive();
        let count = app
            .attendance
            .iter()
            .filter(|r| r.student_id == id && r.date == today)
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_next_id_advances() {
        let ids = ["A-2001", "A-2004", "A-2002"];
        assert_eq!(next_id("A", ids.into_iter()), "A-2005");
        assert_eq!(next_id("Z", std::iter::empty()), "Z-1001");
    }
}
