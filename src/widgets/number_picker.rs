use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, StatefulWidget, Widget},
};

use super::{KeyHandleResult, cursor_style, field_block, placeholder_style};
use crate::criteria::format_gbp;

// u32::MAX has 10 digits
const MAX_DIGITS: usize = 10;

/// Allowed values of a stepper: `min`, `min + step`, ... up to `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberRange {
    pub min: u32,
    pub max: Option<u32>,
    pub step: u32,
}

impl NumberRange {
    /// Snaps `value` down onto the step grid and into bounds.
    pub fn clamp(&self, value: u32) -> u32 {
        let step = self.step.max(1);
        let value = value.max(self.min);
        let value = self.min + (value - self.min) / step * step;

        match self.max {
            Some(max) => value.min(max),
            None => value,
        }
    }

    pub fn increment(&self, current: Option<u32>) -> u32 {
        match current {
            None => self.clamp(self.min),
            Some(value) => self.clamp(value.saturating_add(self.step)),
        }
    }

    pub fn decrement(&self, current: Option<u32>) -> u32 {
        match current {
            None => self.clamp(self.min),
            Some(value) => self.clamp(value.saturating_sub(self.step)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumberFormat {
    #[default]
    Plain,
    Currency,
}

impl NumberFormat {
    pub fn format(self, value: u32) -> String {
        match self {
            Self::Plain => value.to_string(),
            Self::Currency => format_gbp(value),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NumberPicker<'a> {
    pub label: &'a str,
    pub placeholder: &'a str,
    pub value: Option<u32>,
    pub format: NumberFormat,
    pub is_focused: bool,
}

/// Typed digits are held in `buffer` until [`NumberPickerState::commit`].
#[derive(Debug, Clone, Default)]
pub struct NumberPickerState {
    pub buffer: Option<String>,
}

impl NumberPickerState {
    /// Takes the typed value, if any. An empty buffer commits as unset.
    pub fn commit(&mut self, range: &NumberRange) -> Option<Option<u32>> {
        let buffer = self.buffer.take()?;
        Some(parse_buffer(&buffer, range))
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        value: Option<u32>,
        range: &NumberRange,
    ) -> KeyHandleResult<Option<u32>> {
        match key.code {
            KeyCode::Up | KeyCode::Char('+') => {
                let base = self.commit(range).unwrap_or(value);
                KeyHandleResult::Changed(Some(range.increment(base)))
            }
            KeyCode::Down | KeyCode::Char('-') => {
                let base = self.commit(range).unwrap_or(value);
                KeyHandleResult::Changed(Some(range.decrement(base)))
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let buffer = self.buffer.get_or_insert_with(String::new);
                if buffer.len() < MAX_DIGITS {
                    buffer.push(c);
                }
                KeyHandleResult::Handled
            }
            KeyCode::Backspace => {
                let buffer = self
                    .buffer
                    .get_or_insert_with(|| value.map(|v| v.to_string()).unwrap_or_default());
                buffer.pop();
                KeyHandleResult::Handled
            }
            KeyCode::Delete => {
                self.buffer = None;
                KeyHandleResult::Changed(None)
            }
            _ => KeyHandleResult::Ignored,
        }
    }
}

fn parse_buffer(buffer: &str, range: &NumberRange) -> Option<u32> {
    if buffer.is_empty() {
        return None;
    }
    let value = buffer.parse::<u64>().unwrap_or(u64::MAX);
    let value = u32::try_from(value).unwrap_or(u32::MAX);
    Some(range.clamp(value))
}

impl StatefulWidget for NumberPicker<'_> {
    type State = NumberPickerState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = field_block(self.label, self.is_focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let line = match (&state.buffer, self.value) {
            (Some(buffer), _) => Line::from(vec![
                Span::raw(buffer.clone()),
                Span::styled(" ", cursor_style()),
            ]),
            (None, Some(value)) => Line::from(self.format.format(value)),
            (None, None) => Line::from(Span::styled(self.placeholder, placeholder_style())),
        };

        Paragraph::new(line).render(inner, buf);
    }
}
