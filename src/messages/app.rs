use crate::app::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Bootstrap,
    Reload,
    UiFocusNext,
    UiFocusPrev,
    ToggleShowSongs,
    DismissNotice,
    SearchInputChar { c: char },
    SearchInputBackspace,
    SearchClear,
    EntriesMoveUp,
    EntriesMoveDown,
    EntriesPlaySelected,
    EntriesDeleteSelected,
    CatalogMoveUp,
    CatalogMoveDown,
    CatalogAddSelected,
    CatalogNextPage,
    CatalogPrevPage,
    PlaybackStop,
    Quit,
}

#[derive(Debug)]
pub enum AppEvent {
    State(Box<App>),
    Toast(String),
}
