//! Page view state and the actions that change it.

use glyphveil_core::{AnimationSpeed, Tab, Theme};

/// Number of gallery slots.
pub const GALLERY_SLOTS: usize = 6;
/// Gallery slots per row.
pub const GALLERY_COLUMNS: usize = 3;

/// Page section with keyboard focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    Hero,
    Gallery,
}

/// Everything the views need to know about the page, as a plain value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    pub tab: Tab,
    pub theme: Theme,
    pub speed: AnimationSpeed,
    pub section: Section,
    /// Selected gallery slot.
    pub gallery_cursor: usize,
    /// Gallery slot shown in the modal viewer.
    pub modal: Option<usize>,
}

/// User intent, decoded from input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectTab(Tab),
    ToggleTheme,
    CycleSpeed,
    NextSection,
    /// Move the gallery cursor by `(columns, rows)`.
    MoveGallery(isize, isize),
    OpenModal,
    CloseModal,
}

impl ViewState {
    pub fn new(theme: Theme, speed: AnimationSpeed) -> Self {
        Self {
            theme,
            speed,
            ..Self::default()
        }
    }
}

/// Apply `action` to `state`.
///
/// While the modal is open only closing it and switching themes do
/// anything.
pub fn update(state: ViewState, action: Action) -> ViewState {
    if state.modal.is_some() {
        return match action {
            Action::CloseModal => ViewState {
                modal: None,
                ..state
            },
            Action::ToggleTheme => ViewState {
                theme: state.theme.toggle(),
                ..state
            },
            _ => state,
        };
    }

    match action {
        Action::SelectTab(tab) => ViewState {
            tab,
            section: Section::Hero,
            ..state
        },
        Action::ToggleTheme => ViewState {
            theme: state.theme.toggle(),
            ..state
        },
        Action::CycleSpeed => ViewState {
            speed: state.speed.next(),
            ..state
        },
        Action::NextSection => ViewState {
            section: match state.section {
                Section::Hero => Section::Gallery,
                Section::Gallery => Section::Hero,
            },
            ..state
        },
        Action::MoveGallery(dx, dy) if state.section == Section::Gallery => ViewState {
            gallery_cursor: move_cursor(state.gallery_cursor, dx, dy),
            ..state
        },
        Action::OpenModal if state.section == Section::Gallery => ViewState {
            modal: Some(state.gallery_cursor),
            ..state
        },
        Action::MoveGallery(..) | Action::OpenModal | Action::CloseModal => state,
    }
}

/// Move within the gallery grid, clamping at the edges.
fn move_cursor(cursor: usize, dx: isize, dy: isize) -> usize {
    let rows = GALLERY_SLOTS.div_ceil(GALLERY_COLUMNS) as isize;
    let cols = GALLERY_COLUMNS as isize;
    let col = (cursor as isize % cols + dx).clamp(0, cols - 1);
    let row = (cursor as isize / cols + dy).clamp(0, rows - 1);
    ((row * cols + col) as usize).min(GALLERY_SLOTS - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_gallery() -> ViewState {
        update(ViewState::default(), Action::NextSection)
    }

    #[test]
    fn test_select_tab() {
        let state = update(in_gallery(), Action::SelectTab(Tab::Download));
        assert_eq!(state.tab, Tab::Download);
        assert_eq!(state.section, Section::Hero);
    }

    #[test]
    fn test_toggle_theme() {
        let state = update(ViewState::default(), Action::ToggleTheme);
        assert_eq!(state.theme, Theme::Light);
    }

    #[test]
    fn test_gallery_cursor_clamps() {
        let mut state = in_gallery();
        state = update(state, Action::MoveGallery(-1, 0));
        assert_eq!(state.gallery_cursor, 0);
        state = update(state, Action::MoveGallery(5, 0));
        assert_eq!(state.gallery_cursor, 2);
        state = update(state, Action::MoveGallery(0, 1));
        assert_eq!(state.gallery_cursor, 5);
        state = update(state, Action::MoveGallery(0, 1));
        assert_eq!(state.gallery_cursor, 5);
    }

    #[test]
    fn test_gallery_keys_ignored_on_hero() {
        let state = update(ViewState::default(), Action::MoveGallery(1, 0));
        assert_eq!(state.gallery_cursor, 0);
        let state = update(state, Action::OpenModal);
        assert_eq!(state.modal, None);
    }

    #[test]
    fn test_modal_blocks_other_actions() {
        let mut state = update(in_gallery(), Action::MoveGallery(1, 1));
        state = update(state, Action::OpenModal);
        assert_eq!(state.modal, Some(4));

        let blocked = update(state, Action::SelectTab(Tab::Help));
        assert_eq!(blocked, state);
        let blocked = update(state, Action::MoveGallery(1, 0));
        assert_eq!(blocked, state);

        let themed = update(state, Action::ToggleTheme);
        assert_eq!(themed.theme, Theme::Light);
        assert_eq!(themed.modal, Some(4));

        let closed = update(state, Action::CloseModal);
        assert_eq!(closed.modal, None);
        assert_eq!(closed.gallery_cursor, 4);
    }
}
