use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info, warn};

use crate::action::{Action, Direction};
use crate::config::{Config, KeybindsConfig, MIN_INTERVAL_SECS, clamp_interval, parse_key};
use crate::format::format_bytes;
use crate::ranking::{Selection, SelectionMode, SortKey, rank};
use crate::system::collector::SnapshotSource;
use crate::system::delta::{SamplingState, derive};
use crate::system::kill::{KillResult, KillSignal, Terminator};
use crate::system::process::ProcessRow;
use crate::system::snapshot::SystemSample;
use crate::ui::theme::Theme;

/// Title, summary, column header and status bar.
pub const RESERVED_LINES: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    /// Only observable while a termination request is being dispatched.
    Terminating,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Help,
}

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub kill: KeyCode,
    pub force_kill: KeyCode,
    pub sort_cpu: KeyCode,
    pub sort_memory: KeyCode,
    pub sort_pid: KeyCode,
    pub cycle_sort: KeyCode,
    pub faster: KeyCode,
    pub slower: KeyCode,
    pub refresh: KeyCode,
    pub cycle_theme: KeyCode,
    pub help: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            kill: parse_key(&kb.kill).unwrap_or(KeyCode::Char('k')),
            force_kill: parse_key(&kb.force_kill).unwrap_or(KeyCode::Char('K')),
            sort_cpu: parse_key(&kb.sort_cpu).unwrap_or(KeyCode::Char('c')),
            sort_memory: parse_key(&kb.sort_memory).unwrap_or(KeyCode::Char('m')),
            sort_pid: parse_key(&kb.sort_pid).unwrap_or(KeyCode::Char('p')),
            cycle_sort: parse_key(&kb.cycle_sort).unwrap_or(KeyCode::Char('s')),
            faster: parse_key(&kb.faster).unwrap_or(KeyCode::Char('+')),
            slower: parse_key(&kb.slower).unwrap_or(KeyCode::Char('-')),
            refresh: parse_key(&kb.refresh).unwrap_or(KeyCode::Char('r')),
            cycle_theme: parse_key(&kb.cycle_theme).unwrap_or(KeyCode::Char('t')),
            help: parse_key(&kb.help).unwrap_or(KeyCode::Char('?')),
        }
    }

    /// Returns (key_label, description) pairs for all configurable keybinds.
    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        let mut entries = vec![
            (key_label(self.quit), "Quit"),
            (key_label(self.sort_cpu), "Sort by CPU"),
            (key_label(self.sort_memory), "Sort by memory"),
            (key_label(self.sort_pid), "Sort by PID"),
            (key_label(self.cycle_sort), "Cycle sort key"),
            (key_label(self.faster), "Faster refresh"),
            (key_label(self.slower), "Slower refresh"),
            (key_label(self.kill), "Kill process (SIGTERM)"),
            (key_label(self.force_kill), "Force kill (SIGKILL)"),
            (key_label(self.refresh), "Refresh now"),
            (key_label(self.cycle_theme), "Cycle theme"),
            (key_label(self.help), "Toggle help"),
        ];
        entries.push(("↑↓".to_string(), "Move selection"));
        entries.push(("PgUp/PgDn".to_string(), "Page"));
        entries.push(("Home/End".to_string(), "First / last"));
        entries.push(("Ctrl+C".to_string(), "Quit (always)"));
        entries
    }
}

fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        _ => "?".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub ok: bool,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, ok: bool) -> Self {
        Self {
            text: text.into(),
            ok,
        }
    }
}

/// Everything the renderer needs for one frame.
#[derive(Debug)]
pub struct TableView<'a> {
    pub title: String,
    pub summary: String,
    pub status: Option<&'a StatusMessage>,
    pub rows: &'a [ProcessRow],
    /// Index of the selected row within `rows`.
    pub selected: Option<usize>,
}

pub struct App {
    pub state: LoopState,
    source: Box<dyn SnapshotSource>,
    terminator: Box<dyn Terminator>,
    sampling: SamplingState,
    pub rows: Vec<ProcessRow>,
    pub system: SystemSample,
    pub skipped: usize,
    pub sort_key: SortKey,
    pub selection: Selection,
    pub interval_secs: u64,
    pub status_message: Option<StatusMessage>,
    pub input_mode: InputMode,
    pub keybinds: ResolvedKeybinds,
    pub theme: Theme,
    page_size: usize,
}

impl App {
    /// Builds the app and takes the first snapshot. That snapshot only seeds
    /// the delta baseline, so every CPU column starts at zero.
    pub fn new(
        config: Config,
        mut source: Box<dyn SnapshotSource>,
        terminator: Box<dyn Terminator>,
    ) -> Self {
        let sort_key = SortKey::from_str_config(&config.general.default_sort);
        let selection_mode = SelectionMode::from_str_config(&config.general.selection);

        let snapshot = source.capture();
        let (rows, sampling) = derive(
            SamplingState::default(),
            &snapshot.system,
            &snapshot.processes,
        );
        let rows = rank(rows, sort_key);
        let mut selection = Selection::new(selection_mode);
        selection.reconcile(&rows);

        App {
            state: LoopState::Running,
            source,
            terminator,
            sampling,
            rows,
            system: snapshot.system,
            skipped: snapshot.skipped,
            sort_key,
            selection,
            interval_secs: clamp_interval(config.general.interval_secs),
            status_message: None,
            input_mode: InputMode::Normal,
            keybinds: ResolvedKeybinds::from_config(&config.keybinds),
            theme: Theme::from_config(&config.colors.theme),
            page_size: 1,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state != LoopState::Stopped
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// One sampling cycle: capture, derive, rank, reconcile the cursor.
    pub fn refresh_data(&mut self) {
        let snapshot = self.source.capture();
        let previous = std::mem::take(&mut self.sampling);
        let (rows, next) = derive(previous, &snapshot.system, &snapshot.processes);
        self.sampling = next;
        self.system = snapshot.system;
        self.skipped = snapshot.skipped;
        self.rows = rank(rows, self.sort_key);
        self.selection.reconcile(&self.rows);
        // A status line is only shown until the next sampling cycle.
        self.status_message = None;

        debug!(
            rows = self.rows.len(),
            skipped = self.skipped,
            selected = self.selection.index(),
            "sampling cycle complete"
        );
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.input_mode {
            InputMode::Normal => self.map_key_normal(key),
            InputMode::Help => self.map_key_help(key),
        }
    }

    fn map_key_normal(&self, key: KeyEvent) -> Action {
        let code = key.code;
        let kb = &self.keybinds;

        // Navigation keys are hardwired (not configurable)
        match code {
            KeyCode::Up => return Action::Navigate(Direction::Up),
            KeyCode::Down => return Action::Navigate(Direction::Down),
            KeyCode::PageUp => return Action::Navigate(Direction::PageUp),
            KeyCode::PageDown => return Action::Navigate(Direction::PageDown),
            KeyCode::Home => return Action::Navigate(Direction::Home),
            KeyCode::End => return Action::Navigate(Direction::End),
            _ => {}
        }

        if code == kb.quit {
            return Action::Quit;
        }
        if code == kb.kill {
            return self.selected_pid().map_or(Action::None, Action::Kill);
        }
        if code == kb.force_kill {
            return self.selected_pid().map_or(Action::None, Action::ForceKill);
        }
        if code == kb.sort_cpu {
            return Action::SetSort(SortKey::Cpu);
        }
        if code == kb.sort_memory {
            return Action::SetSort(SortKey::Memory);
        }
        if code == kb.sort_pid {
            return Action::SetSort(SortKey::Pid);
        }
        if code == kb.cycle_sort {
            return Action::CycleSort;
        }
        if code == kb.faster {
            return Action::FasterRefresh;
        }
        if code == kb.slower {
            return Action::SlowerRefresh;
        }
        if code == kb.refresh {
            return Action::Refresh;
        }
        if code == kb.cycle_theme {
            return Action::CycleTheme;
        }
        if code == kb.help {
            return Action::ToggleHelp;
        }

        Action::None
    }

    fn map_key_help(&self, key: KeyEvent) -> Action {
        let code = key.code;
        // In help mode, only the help key and Esc dismiss, everything else is ignored
        if code == self.keybinds.help || code == KeyCode::Esc {
            return Action::ToggleHelp;
        }
        Action::None
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => {
                info!("quit requested");
                self.state = LoopState::Stopped;
            }
            Action::Navigate(dir) => self.navigate(dir),
            Action::Kill(pid) => self.terminate(pid, KillSignal::Term),
            Action::ForceKill(pid) => self.terminate(pid, KillSignal::Kill),
            Action::SetSort(key) => self.set_sort(key),
            Action::CycleSort => self.set_sort(self.sort_key.next()),
            Action::FasterRefresh => {
                self.interval_secs = self
                    .interval_secs
                    .saturating_sub(1)
                    .max(MIN_INTERVAL_SECS);
                info!(interval_secs = self.interval_secs, "interval changed");
            }
            Action::SlowerRefresh => {
                self.interval_secs = clamp_interval(self.interval_secs.saturating_add(1));
                info!(interval_secs = self.interval_secs, "interval changed");
            }
            Action::CycleTheme => {
                self.theme = self.theme.next();
            }
            Action::ToggleHelp => {
                self.input_mode = if self.input_mode == InputMode::Help {
                    InputMode::Normal
                } else {
                    InputMode::Help
                };
            }
            Action::Refresh => self.refresh_data(),
            Action::None => {}
        }
    }

    fn navigate(&mut self, direction: Direction) {
        let rows = &self.rows;
        match direction {
            Direction::Up => self.selection.move_up(rows),
            Direction::Down => self.selection.move_down(rows),
            Direction::PageUp => self.selection.page_up(rows, self.page_size),
            Direction::PageDown => self.selection.page_down(rows, self.page_size),
            Direction::Home => self.selection.home(rows),
            Direction::End => self.selection.end(rows),
        }
    }

    fn set_sort(&mut self, key: SortKey) {
        if key == self.sort_key {
            return;
        }
        info!(sort = key.label(), "sort changed");
        self.sort_key = key;
        let rows = std::mem::take(&mut self.rows);
        self.rows = rank(rows, key);
        self.selection.reconcile(&self.rows);
    }

    fn terminate(&mut self, pid: u32, signal: KillSignal) {
        self.state = LoopState::Terminating;
        info!(pid, signal = signal.name(), "termination requested");

        let result = self.terminator.terminate(pid, signal);
        if !result.is_success() {
            warn!(pid, message = %result.message(), "termination failed");
        }
        self.set_kill_status(&result);

        self.state = LoopState::Running;
    }

    fn set_kill_status(&mut self, result: &KillResult) {
        self.status_message = Some(StatusMessage::new(result.message(), result.is_success()));
    }

    pub fn selected_pid(&self) -> Option<u32> {
        self.selection.selected(&self.rows).map(|r| r.pid)
    }

    pub fn show_help(&self) -> bool {
        self.input_mode == InputMode::Help
    }

    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        self.keybinds.help_entries()
    }

    /// Records the terminal height so paging moves by one screenful.
    pub fn on_resize(&mut self, height: u16) {
        self.page_size = visible_rows(height).max(1);
    }

    pub fn table_view(&self, height: u16) -> TableView<'_> {
        let page = visible_rows(height);
        let selected = self.selection.index();
        let offset = (selected + 1).saturating_sub(page);
        let end = offset.saturating_add(page).min(self.rows.len());
        let start = offset.min(end);
        let visible = &self.rows[start..end];

        TableView {
            title: format!(
                "sysmon  interval {}s  sort {}",
                self.interval_secs,
                self.sort_key.label()
            ),
            summary: format!(
                "ticks {}  mem {}  procs {}  cpus {}  skipped {}",
                self.system.total_cpu_ticks,
                format_bytes(self.system.total_memory_bytes),
                self.rows.len(),
                self.system.cpu_count,
                self.skipped,
            ),
            status: self.status_message.as_ref(),
            rows: visible,
            selected: (!visible.is_empty()).then(|| selected - start),
        }
    }
}

fn visible_rows(height: u16) -> usize {
    height.saturating_sub(RESERVED_LINES) as usize
}
