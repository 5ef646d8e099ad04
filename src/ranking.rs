use std::cmp::Ordering;

use crate::system::process::ProcessRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Cpu,
    Memory,
    Pid,
}

impl SortKey {
    pub fn next(self) -> Self {
        match self {
            SortKey::Cpu => SortKey::Memory,
            SortKey::Memory => SortKey::Pid,
            SortKey::Pid => SortKey::Cpu,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Cpu => "CPU",
            SortKey::Memory => "MEM",
            SortKey::Pid => "PID",
        }
    }

    pub fn from_str_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "mem" | "memory" => SortKey::Memory,
            "pid" => SortKey::Pid,
            _ => SortKey::Cpu,
        }
    }
}

/// Orders rows by `key`. The sort is stable, so equal keys keep the order in
/// which the rows arrived.
pub fn rank(mut rows: Vec<ProcessRow>, key: SortKey) -> Vec<ProcessRow> {
    let _rank_span = tracing::debug_span!("ranking.rank", rows = rows.len()).entered();

    match key {
        SortKey::Cpu => rows.sort_by(|a, b| {
            b.cpu_percent
                .partial_cmp(&a.cpu_percent)
                .unwrap_or(Ordering::Equal)
        }),
        SortKey::Memory => rows.sort_by(|a, b| {
            b.mem_percent
                .partial_cmp(&a.mem_percent)
                .unwrap_or(Ordering::Equal)
        }),
        SortKey::Pid => rows.sort_by_key(|r| r.pid),
    }
    rows
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Keep the cursor at the same row index across re-ranks.
    #[default]
    Position,
    /// Follow the selected pid across re-ranks while it stays alive.
    Pid,
}

impl SelectionMode {
    pub fn from_str_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pid" | "process" => SelectionMode::Pid,
            _ => SelectionMode::Position,
        }
    }
}

/// Cursor into the ranked row list.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    index: usize,
    pid: Option<u32>,
    mode: SelectionMode,
}

impl Selection {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            index: 0,
            pid: None,
            mode,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn selected<'a>(&self, rows: &'a [ProcessRow]) -> Option<&'a ProcessRow> {
        rows.get(self.index)
    }

    pub fn move_up(&mut self, rows: &[ProcessRow]) {
        self.index = self.index.saturating_sub(1);
        self.remember(rows);
    }

    pub fn move_down(&mut self, rows: &[ProcessRow]) {
        self.index = clamp_index(self.index.saturating_add(1), rows.len());
        self.remember(rows);
    }

    pub fn page_up(&mut self, rows: &[ProcessRow], page: usize) {
        self.index = self.index.saturating_sub(page.max(1));
        self.remember(rows);
    }

    pub fn page_down(&mut self, rows: &[ProcessRow], page: usize) {
        self.index = clamp_index(self.index.saturating_add(page.max(1)), rows.len());
        self.remember(rows);
    }

    pub fn home(&mut self, rows: &[ProcessRow]) {
        self.index = 0;
        self.remember(rows);
    }

    pub fn end(&mut self, rows: &[ProcessRow]) {
        self.index = rows.len().saturating_sub(1);
        self.remember(rows);
    }

    /// Re-anchors the cursor after the row list was rebuilt or re-sorted.
    pub fn reconcile(&mut self, rows: &[ProcessRow]) {
        if self.mode == SelectionMode::Pid
            && let Some(pid) = self.pid
            && let Some(found) = rows.iter().position(|r| r.pid == pid)
        {
            self.index = found;
            return;
        }
        self.index = clamp_index(self.index, rows.len());
        self.remember(rows);
    }

    fn remember(&mut self, rows: &[ProcessRow]) {
        self.pid = rows.get(self.index).map(|r| r.pid);
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}
