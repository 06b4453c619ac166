use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, StatefulWidget, Widget},
};

use super::{KeyHandleResult, cursor_style, field_block, placeholder_style};
use crate::criteria::iso_date::FORMAT;

const DATE_LEN: usize = "YYYY-MM-DD".len();

/// A calendar date that may not be later than `max`.
#[derive(Debug, Clone)]
pub struct DateInput<'a> {
    pub label: &'a str,
    pub placeholder: &'a str,
    pub value: Option<NaiveDate>,
    pub max: NaiveDate,
    pub is_focused: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DateInputState {
    pub buffer: Option<String>,
}

impl DateInputState {
    /// Takes the typed date, if any.
    ///
    /// Returns `None` when nothing was typed or the text is not a valid
    /// `YYYY-MM-DD` date; the caller keeps its previous value then.
    pub fn commit(&mut self, max: NaiveDate) -> Option<Option<NaiveDate>> {
        let buffer = self.buffer.take()?;
        if buffer.is_empty() {
            return Some(None);
        }

        match NaiveDate::parse_from_str(&buffer, FORMAT) {
            Ok(date) => Some(Some(date.min(max))),
            Err(err) => {
                tracing::debug!(input = %buffer, %err, "rejected date input");
                None
            }
        }
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        value: Option<NaiveDate>,
        max: NaiveDate,
    ) -> KeyHandleResult<Option<NaiveDate>> {
        match key.code {
            KeyCode::Up => {
                let base = self.commit(max).unwrap_or(value);
                let next = base.map_or(max, |date| date.succ_opt().unwrap_or(date));
                KeyHandleResult::Changed(Some(next.min(max)))
            }
            KeyCode::Down => {
                let base = self.commit(max).unwrap_or(value);
                let prev = base.map_or(max, |date| date.pred_opt().unwrap_or(date));
                KeyHandleResult::Changed(Some(prev.min(max)))
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
                let buffer = self.buffer.get_or_insert_with(String::new);
                if buffer.len() < DATE_LEN {
                    buffer.push(c);
                }
                KeyHandleResult::Handled
            }
            KeyCode::Backspace => {
                let buffer = self.buffer.get_or_insert_with(|| {
                    value
                        .map(|date| date.format(FORMAT).to_string())
                        .unwrap_or_default()
                });
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

impl StatefulWidget for DateInput<'_> {
    type State = DateInputState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = field_block(self.label, self.is_focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let line = match (&state.buffer, self.value) {
            (Some(buffer), _) => Line::from(vec![
                Span::raw(buffer.clone()),
                Span::styled(" ", cursor_style()),
            ]),
            (None, Some(date)) => Line::from(date.format(FORMAT).to_string()),
            (None, None) => Line::from(vec![
                Span::styled(self.placeholder, placeholder_style()),
                Span::styled(format!(" (max {})", self.max.format(FORMAT)), placeholder_style()),
            ]),
        };

        Paragraph::new(line).render(inner, buf);
    }
}
