pub mod date_input;
pub mod dropdown;
pub mod number_picker;
pub mod text_input;

pub use date_input::{DateInput, DateInputState};
pub use dropdown::{Dropdown, DropdownState};
pub use number_picker::{NumberFormat, NumberPicker, NumberPickerState, NumberRange};
pub use text_input::{TextInput, TextInputState};

use ratatui::{
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};

/// What a control did with a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyHandleResult<T> {
    /// The key means nothing to this control
    Ignored,
    /// Consumed without changing the value
    Handled,
    /// The control's value changed
    Changed(T),
}

impl<T> KeyHandleResult<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> KeyHandleResult<U> {
        match self {
            Self::Ignored => KeyHandleResult::Ignored,
            Self::Handled => KeyHandleResult::Handled,
            Self::Changed(value) => KeyHandleResult::Changed(f(value)),
        }
    }
}

fn field_block(label: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    Block::new()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(label)
}

fn placeholder_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC)
}

fn cursor_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}
