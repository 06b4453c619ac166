use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, StatefulWidget, Widget},
};

use super::{KeyHandleResult, cursor_style, field_block, placeholder_style};

#[derive(Debug, Clone, Default)]
pub struct TextInput<'a> {
    pub label: &'a str,
    pub placeholder: &'a str,
    pub is_focused: bool,
}

/// Editable text with a cursor. Positions are counted in chars, not bytes.
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    pub input: String,
    pub cursor_position: usize,
}

impl TextInputState {
    /// Replaces the text, keeping the cursor inside it.
    pub fn set_input(&mut self, input: &str) {
        if self.input != input {
            self.input = input.to_string();
        }
        self.cursor_position = self.cursor_position.min(self.len());
    }

    fn len(&self) -> usize {
        self.input.chars().count()
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_idx)
            .map_or(self.input.len(), |(idx, _)| idx)
    }

    /// Edits the text; input longer than `max_len` chars is refused.
    pub fn handle_key(&mut self, key: KeyEvent, max_len: usize) -> KeyHandleResult<String> {
        match key.code {
            KeyCode::Char(c) => {
                if self.len() >= max_len {
                    return KeyHandleResult::Handled;
                }
                let offset = self.byte_offset(self.cursor_position);
                self.input.insert(offset, c);
                self.cursor_position += 1;
                KeyHandleResult::Changed(self.input.clone())
            }
            KeyCode::Backspace => {
                if self.cursor_position == 0 {
                    return KeyHandleResult::Handled;
                }
                self.cursor_position -= 1;
                let offset = self.byte_offset(self.cursor_position);
                self.input.remove(offset);
                KeyHandleResult::Changed(self.input.clone())
            }
            KeyCode::Delete => {
                if self.cursor_position >= self.len() {
                    return KeyHandleResult::Handled;
                }
                let offset = self.byte_offset(self.cursor_position);
                self.input.remove(offset);
                KeyHandleResult::Changed(self.input.clone())
            }
            KeyCode::Left => {
                self.cursor_position = self.cursor_position.saturating_sub(1);
                KeyHandleResult::Handled
            }
            KeyCode::Right => {
                self.cursor_position = (self.cursor_position + 1).min(self.len());
                KeyHandleResult::Handled
            }
            KeyCode::Home => {
                self.cursor_position = 0;
                KeyHandleResult::Handled
            }
            KeyCode::End => {
                self.cursor_position = self.len();
                KeyHandleResult::Handled
            }
            _ => KeyHandleResult::Ignored,
        }
    }
}

impl StatefulWidget for TextInput<'_> {
    type State = TextInputState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = field_block(self.label, self.is_focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let line = if !self.is_focused {
            if state.input.is_empty() {
                Line::from(Span::styled(self.placeholder, placeholder_style()))
            } else {
                Line::from(state.input.as_str())
            }
        } else {
            let offset = state.byte_offset(state.cursor_position);
            let (before, rest) = state.input.split_at(offset);
            let mut rest = rest.chars();
            let under_cursor = rest.next().map_or(" ".to_string(), String::from);

            Line::from(vec![
                Span::raw(before.to_string()),
                Span::styled(under_cursor, cursor_style()),
                Span::raw(rest.as_str().to_string()),
            ])
        };

        Paragraph::new(line).render(inner, buf);
    }
}
