use std::fmt::Display;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, StatefulWidget, Widget},
};

use super::{KeyHandleResult, cursor_style, field_block};

/// Picks one of a fixed set of options. When open, the options are listed
/// inline and the highlighted one is selected with Enter.
#[derive(Debug, Clone)]
pub struct Dropdown<'a, T> {
    pub label: &'a str,
    pub options: &'a [T],
    pub value: T,
    pub is_focused: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DropdownState {
    pub open: bool,
    pub highlighted: usize,
}

impl DropdownState {
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn handle_key<T: Copy + PartialEq>(
        &mut self,
        key: KeyEvent,
        value: T,
        options: &[T],
    ) -> KeyHandleResult<T> {
        if options.is_empty() {
            return KeyHandleResult::Ignored;
        }
        let current = options.iter().position(|o| *o == value).unwrap_or(0);

        if !self.open {
            return match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.open = true;
                    self.highlighted = current;
                    KeyHandleResult::Handled
                }
                KeyCode::Left => {
                    KeyHandleResult::Changed(options[(current + options.len() - 1) % options.len()])
                }
                KeyCode::Right => KeyHandleResult::Changed(options[(current + 1) % options.len()]),
                _ => KeyHandleResult::Ignored,
            };
        }

        match key.code {
            KeyCode::Up | KeyCode::Left => {
                self.highlighted = self.highlighted.saturating_sub(1);
                KeyHandleResult::Handled
            }
            KeyCode::Down | KeyCode::Right => {
                self.highlighted = (self.highlighted + 1).min(options.len() - 1);
                KeyHandleResult::Handled
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.open = false;
                KeyHandleResult::Changed(options[self.highlighted.min(options.len() - 1)])
            }
            KeyCode::Esc => {
                self.open = false;
                KeyHandleResult::Handled
            }
            // An open list keeps the focus until it is closed
            _ => KeyHandleResult::Handled,
        }
    }
}

impl<T: Copy + PartialEq + Display> StatefulWidget for Dropdown<'_, T> {
    type State = DropdownState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = field_block(self.label, self.is_focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let line = if state.open {
            let mut spans = vec![];
            for (idx, option) in self.options.iter().enumerate() {
                if idx > 0 {
                    spans.push(Span::raw(" │ "));
                }
                let mut style = Style::default();
                if *option == self.value {
                    style = style.add_modifier(Modifier::BOLD);
                }
                if idx == state.highlighted {
                    style = style.patch(cursor_style());
                }
                spans.push(Span::styled(option.to_string(), style));
            }
            Line::from(spans)
        } else {
            Line::from(vec![Span::raw(self.value.to_string()), Span::raw(" ▾")])
        };

        Paragraph::new(line).render(inner, buf);
    }
}
