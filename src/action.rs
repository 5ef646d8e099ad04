use crate::ranking::SortKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Navigate(Direction),
    Kill(u32),
    ForceKill(u32),
    SetSort(SortKey),
    CycleSort,
    FasterRefresh,
    SlowerRefresh,
    CycleTheme,
    ToggleHelp,
    Refresh,
    None,
}
