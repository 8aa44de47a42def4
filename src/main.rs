use std::fs;
use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use khuddam_console::api::{ApiBridge, HttpBackend};
use khuddam_console::app::{App, AppOptions, Focus, InputMode, StatusLevel};
use khuddam_console::config;
use khuddam_console::core::{Command, DataMode, Module};
use khuddam_console::domain::AttendanceStatus;
use khuddam_console::nav::{Page, Route, Section};
use khuddam_console::store::{FixtureSet, SessionStore};
use khuddam_console::ui;

#[derive(Debug, Parser)]
#[command(
    name = "khuddam-console",
    version,
    about = "Khuddam Console: an administrative TUI for the Khuddam student portal"
)]
struct Args {
    /// Backend API base URL (e.g. http://localhost:8000)
    #[arg(long)]
    api: Option<String>,

    /// Extra fixture roots scanned for record JSON files
    #[arg(long)]
    fixtures: Vec<String>,

    /// Record source: "fixture" or "api"
    #[arg(long)]
    data_mode: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = config::load();
    init_logging();

    let api_base = config::resolve_api_base(args.api.as_deref(), &config);
    let data_mode = args
        .data_mode
        .as_deref()
        .and_then(config::parse_data_mode)
        .or_else(|| config.parsed_data_mode())
        .unwrap_or(DataMode::Fixture);

    let fixture_roots = config::fixture_roots(&args.fixtures, &config);
    let fixtures = FixtureSet::scan_roots(&fixture_roots);
    let session_store = open_session_store();

    let mut app = App::new(AppOptions {
        fixtures,
        session_store,
        data_mode,
        api_endpoint: api_base.clone(),
    });

    // Install the one shared API client up front; every request of this
    // process goes through it, restored session included.
    let token = app.session.token().map(str::to_string);
    let bridge = ApiBridge::new(Box::new(HttpBackend::new(api_base)), token);

    // A restored session skips the login screen; the guard re-checks on
    // every later navigation anyway.
    if app.session.is_authenticated() {
        app.navigate(Route::Dashboard(Page::Home, None));
        if data_mode == DataMode::Api {
            app.apply_command(Command::Refresh);
        }
    }

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, bridge);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

fn init_logging() {
    let Some(path) = config::log_file_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = fs::OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn open_session_store() -> Option<SessionStore> {
    let path = config::session_db_path()?;
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    match SessionStore::open(&path) {
        Ok(store) => Some(store),
        Err(err) => {
            tracing::warn!(%err, "session store disabled");
            None
        }
    }
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    bridge: ApiBridge,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        pump_api(&mut app, &bridge);
        app.sync_context();
        terminal.draw(|f| ui::draw(f, &mut app))?;
        if app.should_quit {
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                handle_key(&mut app, key);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }

        pump_api(&mut app, &bridge);
    }
}

/// Drain worker events into the app, then flush queued requests back.
fn pump_api(app: &mut App, bridge: &ApiBridge) {
    for event in bridge.poll_events() {
        app.apply_api_event(event);
    }
    for request in app.take_api_requests() {
        if let Err(err) = bridge.send(request) {
            app.set_status(format!("API worker unavailable: {err}"), StatusLevel::Error);
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.help_open {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.help_open = false;
        }
        return;
    }

    match app.current_route() {
        Route::Login => return handle_login_keys(app, key),
        Route::AdmissionForm => return handle_admission_form_keys(app, key),
        _ => {}
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Command => handle_command_mode(app, key),
        InputMode::Form => handle_form_mode(app, key),
    }
}

fn handle_login_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Enter => app.submit_login(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login.focus_password = !app.login.focus_password;
        }
        KeyCode::F(2) => app.navigate(Route::AdmissionForm),
        KeyCode::Backspace => {
            if app.login.focus_password {
                app.login.password.pop();
            } else {
                app.login.email.pop();
            }
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            if app.login.focus_password {
                app.login.password.push(ch);
            } else {
                app.login.email.push(ch);
            }
        }
        _ => {}
    }
}

fn handle_admission_form_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.go_back(),
        KeyCode::Enter => app.submit_admission_form(),
        KeyCode::Tab | KeyCode::Down => app.admission_draft.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.admission_draft.prev_field(),
        KeyCode::Backspace => app.admission_draft.backspace(),
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            app.admission_draft.input_char(ch);
        }
        _ => {}
    }
}

/// Form mode only applies to the meeting scheduler inside the dashboard.
fn handle_form_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.go_back(),
        KeyCode::Enter => app.submit_meeting_form(),
        KeyCode::Tab | KeyCode::Down => app.meeting_draft.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.meeting_draft.prev_field(),
        KeyCode::Backspace => app.meeting_draft.backspace(),
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            app.meeting_draft.input_char(ch);
        }
        _ => {}
    }
}

fn handle_command_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.exit_command(),
        KeyCode::Enter => app.apply_command_bar(),
        KeyCode::Backspace => {
            app.command.input.pop();
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            app.command.input.push(ch);
        }
        _ => {}
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    // Attendance marking wins over focus keys on its own view.
    if app.current_page() == Some(Page::MarkAttendance) && app.focus == Focus::List {
        let marked = match key.code {
            KeyCode::Char('p') => Some(AttendanceStatus::Present),
            KeyCode::Char('a') => Some(AttendanceStatus::Absent),
            KeyCode::Char('l') => Some(AttendanceStatus::Leave),
            _ => None,
        };
        if let Some(status) = marked {
            app.set_today_attendance(status);
            return;
        }
    }

    let on_home = app.current_page() == Some(Page::Home);

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.help_open = true,
        KeyCode::Char('/') => app.enter_command(),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('e') => app.apply_command(Command::ExportCsv),
        KeyCode::Char('y') => handle_copy_to_clipboard(app),
        KeyCode::Char('h') => focus_left(app),
        KeyCode::Char('l') => focus_right(app),
        KeyCode::Tab => {
            if on_home {
                let action = app.dashboard.handle_key(key, &mut app.ctx);
                app.apply_action(action);
            } else {
                cycle_focus(app);
            }
        }
        KeyCode::Enter => {
            if on_home {
                let action = app.dashboard.handle_key(key, &mut app.ctx);
                app.apply_action(action);
            } else {
                match app.focus {
                    Focus::Sidebar => app.sidebar_activate(),
                    Focus::List => app.enter_detail(),
                    Focus::Details | Focus::Command => {}
                }
            }
        }
        KeyCode::Char(' ') => {
            if app.focus == Focus::Sidebar {
                app.sidebar_activate();
            }
        }
        KeyCode::Esc => app.go_back(),
        KeyCode::Up | KeyCode::Char('k') => {
            if on_home {
                let len = app.recent_activity().len();
                app.dashboard.move_selection(false, len);
            } else {
                handle_nav_up(app);
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if on_home {
                let len = app.recent_activity().len();
                app.dashboard.move_selection(true, len);
            } else {
                handle_nav_down(app);
            }
        }
        KeyCode::Char(ch @ '1'..='7') => {
            let idx = ch as usize - '1' as usize;
            if let Some(section) = Section::ALL.get(idx).copied() {
                app.jump_to_section(section);
            }
        }
        _ => {}
    }
}

fn cycle_focus(app: &mut App) {
    app.focus = match app.focus {
        Focus::Sidebar => Focus::List,
        Focus::List => Focus::Details,
        Focus::Details | Focus::Command => Focus::Sidebar,
    };
}

fn focus_left(app: &mut App) {
    app.focus = match app.focus {
        Focus::Sidebar => Focus::Sidebar,
        Focus::List => Focus::Sidebar,
        Focus::Details | Focus::Command => Focus::List,
    };
}

fn focus_right(app: &mut App) {
    app.focus = match app.focus {
        Focus::Sidebar => Focus::List,
        Focus::List | Focus::Command => Focus::Details,
        Focus::Details => Focus::Details,
    };
}

fn handle_nav_up(app: &mut App) {
    match app.focus {
        Focus::Sidebar => app.sidebar_move(false),
        Focus::List | Focus::Details => app.move_selection_up(),
        Focus::Command => {}
    }
}

fn handle_nav_down(app: &mut App) {
    match app.focus {
        Focus::Sidebar => app.sidebar_move(true),
        Focus::List | Focus::Details => app.move_selection_down(),
        Focus::Command => {}
    }
}

fn handle_copy_to_clipboard(app: &mut App) {
    use arboard::Clipboard;

    let Some(text) = app.copy_payload() else {
        app.set_status("Nothing to copy", StatusLevel::Warn);
        return;
    };

    match Clipboard::new() {
        Ok(mut clipboard) => {
            if clipboard.set_text(text.clone()).is_ok() {
                app.ctx.set_clipboard(text.clone());
                app.set_status(format!("Copied: {text}"), StatusLevel::Info);
            } else {
                app.set_status("Failed to copy to clipboard", StatusLevel::Error);
            }
        }
        Err(_) => {
            app.set_status("Clipboard not available", StatusLevel::Error);
        }
    }
}
