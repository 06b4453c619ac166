use std::fmt;

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, StatefulWidget, Widget},
};

use crate::criteria::{
    BEDROOMS_MAX, Field, ListingType, POSTCODE_MAX_LEN, PRICE_STEP, PropertyType, SearchCriteria,
};
use crate::widgets::{
    DateInput, DateInputState, Dropdown, DropdownState, KeyHandleResult, NumberFormat,
    NumberPicker, NumberPickerState, NumberRange, TextInput, TextInputState,
};

pub const PRICE_RANGE: NumberRange = NumberRange {
    min: 0,
    max: None,
    step: PRICE_STEP,
};

pub const BEDROOMS_RANGE: NumberRange = NumberRange {
    min: 0,
    max: Some(BEDROOMS_MAX),
    step: 1,
};

const POSTCODE_HINT: &str = "Enter first part of postcode (e.g., BR1, NW1)";

/// A new value for exactly one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    PropertyType(PropertyType),
    ListingType(ListingType),
    MinPrice(Option<u32>),
    MaxPrice(Option<u32>),
    MinBedrooms(Option<u32>),
    MaxBedrooms(Option<u32>),
    DateFrom(Option<NaiveDate>),
    DateTo(Option<NaiveDate>),
    Postcode(String),
}

impl FieldEdit {
    pub fn field(&self) -> Field {
        match self {
            Self::PropertyType(_) => Field::PropertyType,
            Self::ListingType(_) => Field::ListingType,
            Self::MinPrice(_) => Field::MinPrice,
            Self::MaxPrice(_) => Field::MaxPrice,
            Self::MinBedrooms(_) => Field::MinBedrooms,
            Self::MaxBedrooms(_) => Field::MaxBedrooms,
            Self::DateFrom(_) => Field::DateFrom,
            Self::DateTo(_) => Field::DateTo,
            Self::Postcode(_) => Field::Postcode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(Field),
    Search,
    Reset,
}

impl Focus {
    const ORDER: [Focus; 11] = [
        Self::Field(Field::PropertyType),
        Self::Field(Field::ListingType),
        Self::Field(Field::MinPrice),
        Self::Field(Field::MaxPrice),
        Self::Field(Field::MinBedrooms),
        Self::Field(Field::MaxBedrooms),
        Self::Field(Field::DateFrom),
        Self::Field(Field::DateTo),
        Self::Field(Field::Postcode),
        Self::Search,
        Self::Reset,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone, Default)]
struct Controls {
    property_type: DropdownState,
    listing_type: DropdownState,
    min_price: NumberPickerState,
    max_price: NumberPickerState,
    min_bedrooms: NumberPickerState,
    max_bedrooms: NumberPickerState,
    date_from: DateInputState,
    date_to: DateInputState,
    postcode: TextInputState,
}

/// The property search form.
///
/// Owns the [`SearchCriteria`] being edited. Each control writes only its
/// own field; submitting hands a copy of the whole record to the
/// `on_search` callback and leaves the record as it was.
pub struct SearchForm {
    criteria: SearchCriteria,
    focus: Focus,
    today: NaiveDate,
    controls: Controls,
    on_search: Box<dyn FnMut(SearchCriteria)>,
}

impl fmt::Debug for SearchForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchForm")
            .field("criteria", &self.criteria)
            .field("focus", &self.focus)
            .field("today", &self.today)
            .field("controls", &self.controls)
            .finish_non_exhaustive()
    }
}

impl SearchForm {
    /// `today` is the latest date either date field accepts.
    pub fn new(today: NaiveDate, on_search: impl FnMut(SearchCriteria) + 'static) -> Self {
        Self {
            criteria: SearchCriteria::default(),
            focus: Focus::Field(Field::PropertyType),
            today,
            controls: Controls::default(),
            on_search: Box::new(on_search),
        }
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Whether a dropdown list is open and will consume `Esc`.
    pub fn is_dropdown_open(&self) -> bool {
        self.controls.property_type.open || self.controls.listing_type.open
    }

    /// Sets one field, applying the same limits the field's control does.
    pub fn edit(&mut self, edit: FieldEdit) {
        tracing::trace!(field = ?edit.field(), "field edited");
        let criteria = &mut self.criteria;
        match edit {
            FieldEdit::PropertyType(value) => criteria.property_type = value,
            FieldEdit::ListingType(value) => criteria.listing_type = value,
            FieldEdit::MinPrice(value) => {
                criteria.min_price = value.map(|v| PRICE_RANGE.clamp(v))
            }
            FieldEdit::MaxPrice(value) => {
                criteria.max_price = value.map(|v| PRICE_RANGE.clamp(v))
            }
            FieldEdit::MinBedrooms(value) => {
                criteria.min_bedrooms = value.map(|v| BEDROOMS_RANGE.clamp(v))
            }
            FieldEdit::MaxBedrooms(value) => {
                criteria.max_bedrooms = value.map(|v| BEDROOMS_RANGE.clamp(v))
            }
            FieldEdit::DateFrom(value) => {
                criteria.date_from = value.map(|d| d.min(self.today));
                tracing::debug!(date_from = ?criteria.date_from, "date from selected");
            }
            FieldEdit::DateTo(value) => {
                criteria.date_to = value.map(|d| d.min(self.today));
                tracing::debug!(date_to = ?criteria.date_to, "date to selected");
            }
            FieldEdit::Postcode(value) => {
                criteria.postcode = value.chars().take(POSTCODE_MAX_LEN).collect();
                self.controls.postcode.set_input(&criteria.postcode);
            }
        }
    }

    /// Hands a snapshot of the current criteria to the search callback.
    pub fn submit(&mut self) {
        self.commit_pending();
        let snapshot = self.criteria.clone();
        tracing::debug!(criteria = ?snapshot, "search submitted");
        (self.on_search)(snapshot);
    }

    /// Restores every field to its default. Does not search.
    pub fn reset(&mut self) {
        self.criteria = SearchCriteria::default();
        self.controls = Controls::default();
        tracing::debug!("search form reset");
    }

    pub fn focus_next(&mut self) {
        self.commit_pending();
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.commit_pending();
        self.focus = self.focus.prev();
    }

    /// Applies half-typed numbers and dates, as leaving a field would.
    fn commit_pending(&mut self) {
        self.controls.property_type.close();
        self.controls.listing_type.close();

        let edits = [
            self.controls.min_price.commit(&PRICE_RANGE).map(FieldEdit::MinPrice),
            self.controls.max_price.commit(&PRICE_RANGE).map(FieldEdit::MaxPrice),
            self.controls
                .min_bedrooms
                .commit(&BEDROOMS_RANGE)
                .map(FieldEdit::MinBedrooms),
            self.controls
                .max_bedrooms
                .commit(&BEDROOMS_RANGE)
                .map(FieldEdit::MaxBedrooms),
            self.controls.date_from.commit(self.today).map(FieldEdit::DateFrom),
            self.controls.date_to.commit(self.today).map(FieldEdit::DateTo),
        ];

        for edit in edits.into_iter().flatten() {
            self.edit(edit);
        }
    }

    /// Returns `false` when the key was not used, so the caller may act on it.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('r') {
                self.reset();
                return true;
            }
            return false;
        }

        let result = match self.focus {
            Focus::Field(field) => self.handle_field_key(field, key),
            Focus::Search | Focus::Reset => KeyHandleResult::Ignored,
        };

        match result {
            KeyHandleResult::Changed(edit) => {
                self.edit(edit);
                true
            }
            KeyHandleResult::Handled => true,
            KeyHandleResult::Ignored => match key.code {
                KeyCode::Tab | KeyCode::Down => {
                    self.focus_next();
                    true
                }
                KeyCode::BackTab | KeyCode::Up => {
                    self.focus_prev();
                    true
                }
                KeyCode::Left | KeyCode::Right => {
                    match self.focus {
                        Focus::Search => self.focus = Focus::Reset,
                        Focus::Reset => self.focus = Focus::Search,
                        Focus::Field(_) => return false,
                    }
                    true
                }
                KeyCode::Enter => {
                    match self.focus {
                        Focus::Reset => self.reset(),
                        _ => self.submit(),
                    }
                    true
                }
                _ => false,
            },
        }
    }

    fn handle_field_key(&mut self, field: Field, key: KeyEvent) -> KeyHandleResult<FieldEdit> {
        let criteria = &self.criteria;
        let controls = &mut self.controls;
        match field {
            Field::PropertyType => controls
                .property_type
                .handle_key(key, criteria.property_type, &PropertyType::ALL)
                .map(FieldEdit::PropertyType),
            Field::ListingType => controls
                .listing_type
                .handle_key(key, criteria.listing_type, &ListingType::ALL)
                .map(FieldEdit::ListingType),
            Field::MinPrice => controls
                .min_price
                .handle_key(key, criteria.min_price, &PRICE_RANGE)
                .map(FieldEdit::MinPrice),
            Field::MaxPrice => controls
                .max_price
                .handle_key(key, criteria.max_price, &PRICE_RANGE)
                .map(FieldEdit::MaxPrice),
            Field::MinBedrooms => controls
                .min_bedrooms
                .handle_key(key, criteria.min_bedrooms, &BEDROOMS_RANGE)
                .map(FieldEdit::MinBedrooms),
            Field::MaxBedrooms => controls
                .max_bedrooms
                .handle_key(key, criteria.max_bedrooms, &BEDROOMS_RANGE)
                .map(FieldEdit::MaxBedrooms),
            Field::DateFrom => controls
                .date_from
                .handle_key(key, criteria.date_from, self.today)
                .map(FieldEdit::DateFrom),
            Field::DateTo => controls
                .date_to
                .handle_key(key, criteria.date_to, self.today)
                .map(FieldEdit::DateTo),
            Field::Postcode => controls
                .postcode
                .handle_key(key, POSTCODE_MAX_LEN)
                .map(FieldEdit::Postcode),
        }
    }

    fn is_focused(&self, field: Field) -> bool {
        self.focus == Focus::Field(field)
    }

    fn number_picker(
        &self,
        field: Field,
        value: Option<u32>,
        format: NumberFormat,
    ) -> NumberPicker<'static> {
        NumberPicker {
            label: field.label(),
            placeholder: field.placeholder(),
            value,
            format,
            is_focused: self.is_focused(field),
        }
    }

    fn date_input(&self, field: Field, value: Option<NaiveDate>) -> DateInput<'static> {
        DateInput {
            label: field.label(),
            placeholder: field.placeholder(),
            value,
            max: self.today,
            is_focused: self.is_focused(field),
        }
    }

    fn render_actions(&self, area: Rect, buf: &mut Buffer) {
        let button = |label: &'static str, focused: bool| {
            let style = if focused {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Cyan)
            };
            Span::styled(label, style)
        };

        Paragraph::new(Line::from(vec![
            button("[ Search Properties ]", self.focus == Focus::Search),
            Span::raw("  "),
            button("[ Reset ]", self.focus == Focus::Reset),
        ]))
        .centered()
        .render(area, buf);
    }
}

impl Widget for &mut SearchForm {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [
            property_type_area,
            listing_type_area,
            price_area,
            bedrooms_area,
            dates_area,
            postcode_area,
            hint_area,
            actions_area,
        ] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]);
        let [min_price_area, max_price_area] = halves.areas(price_area);
        let [min_bedrooms_area, max_bedrooms_area] = halves.areas(bedrooms_area);
        let [date_from_area, date_to_area] = halves.areas(dates_area);

        let property_type = Dropdown {
            label: Field::PropertyType.label(),
            options: &PropertyType::ALL,
            value: self.criteria.property_type,
            is_focused: self.is_focused(Field::PropertyType),
        };
        let listing_type = Dropdown {
            label: Field::ListingType.label(),
            options: &ListingType::ALL,
            value: self.criteria.listing_type,
            is_focused: self.is_focused(Field::ListingType),
        };
        let min_price = self.number_picker(
            Field::MinPrice,
            self.criteria.min_price,
            NumberFormat::Currency,
        );
        let max_price = self.number_picker(
            Field::MaxPrice,
            self.criteria.max_price,
            NumberFormat::Currency,
        );
        let min_bedrooms = self.number_picker(
            Field::MinBedrooms,
            self.criteria.min_bedrooms,
            NumberFormat::Plain,
        );
        let max_bedrooms = self.number_picker(
            Field::MaxBedrooms,
            self.criteria.max_bedrooms,
            NumberFormat::Plain,
        );
        let date_from = self.date_input(Field::DateFrom, self.criteria.date_from);
        let date_to = self.date_input(Field::DateTo, self.criteria.date_to);
        let postcode = TextInput {
            label: Field::Postcode.label(),
            placeholder: Field::Postcode.placeholder(),
            is_focused: self.is_focused(Field::Postcode),
        };

        self.render_actions(actions_area, buf);

        let controls = &mut self.controls;
        property_type.render(property_type_area, buf, &mut controls.property_type);
        listing_type.render(listing_type_area, buf, &mut controls.listing_type);
        min_price.render(min_price_area, buf, &mut controls.min_price);
        max_price.render(max_price_area, buf, &mut controls.max_price);
        min_bedrooms.render(min_bedrooms_area, buf, &mut controls.min_bedrooms);
        max_bedrooms.render(max_bedrooms_area, buf, &mut controls.max_bedrooms);
        date_from.render(date_from_area, buf, &mut controls.date_from);
        date_to.render(date_to_area, buf, &mut controls.date_to);
        postcode.render(postcode_area, buf, &mut controls.postcode);

        Paragraph::new(Span::styled(
            POSTCODE_HINT,
            Style::default().fg(Color::DarkGray),
        ))
        .render(hint_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use test_case::test_case;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// A form whose searches are recorded in the returned list.
    fn recording_form() -> (SearchForm, Rc<RefCell<Vec<SearchCriteria>>>) {
        let searches = Rc::new(RefCell::new(vec![]));
        let sink = searches.clone();
        let form = SearchForm::new(today(), move |criteria| sink.borrow_mut().push(criteria));
        (form, searches)
    }

    fn sample_edit(field: Field) -> FieldEdit {
        match field {
            Field::PropertyType => FieldEdit::PropertyType(PropertyType::House),
            Field::ListingType => FieldEdit::ListingType(ListingType::Sale),
            Field::MinPrice => FieldEdit::MinPrice(Some(150_000)),
            Field::MaxPrice => FieldEdit::MaxPrice(Some(350_000)),
            Field::MinBedrooms => FieldEdit::MinBedrooms(Some(2)),
            Field::MaxBedrooms => FieldEdit::MaxBedrooms(Some(5)),
            Field::DateFrom => FieldEdit::DateFrom(NaiveDate::from_ymd_opt(2024, 1, 1)),
            Field::DateTo => FieldEdit::DateTo(NaiveDate::from_ymd_opt(2024, 5, 1)),
            Field::Postcode => FieldEdit::Postcode("SW19".to_string()),
        }
    }

    fn flat_to_rent_in_br1() -> SearchCriteria {
        SearchCriteria {
            property_type: PropertyType::Flat,
            listing_type: ListingType::Rent,
            min_price: Some(200_000),
            max_price: Some(400_000),
            postcode: "BR1".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn starts_with_defaults() {
        let (form, searches) = recording_form();
        let criteria = form.criteria();

        assert_eq!(criteria.property_type, PropertyType::Any);
        assert_eq!(criteria.listing_type, ListingType::Any);
        assert_eq!(criteria.min_price, None);
        assert_eq!(criteria.max_price, None);
        assert_eq!(criteria.min_bedrooms, None);
        assert_eq!(criteria.max_bedrooms, None);
        assert_eq!(criteria.date_from, None);
        assert_eq!(criteria.date_to, None);
        assert_eq!(criteria.postcode, "");
        assert!(searches.borrow().is_empty());
    }

    #[test_case(Field::PropertyType)]
    #[test_case(Field::ListingType)]
    #[test_case(Field::MinPrice)]
    #[test_case(Field::MaxPrice)]
    #[test_case(Field::MinBedrooms)]
    #[test_case(Field::MaxBedrooms)]
    #[test_case(Field::DateFrom)]
    #[test_case(Field::DateTo)]
    #[test_case(Field::Postcode)]
    fn edit_changes_only_its_field(field: Field) {
        let (mut form, _) = recording_form();
        for other in Field::ALL.into_iter().filter(|f| *f != field) {
            form.edit(sample_edit(other));
        }
        let before = form.criteria().clone();

        let edit = sample_edit(field);
        assert_eq!(edit.field(), field);
        form.edit(edit);

        let mut expected = before;
        match field {
            Field::PropertyType => expected.property_type = PropertyType::House,
            Field::ListingType => expected.listing_type = ListingType::Sale,
            Field::MinPrice => expected.min_price = Some(150_000),
            Field::MaxPrice => expected.max_price = Some(350_000),
            Field::MinBedrooms => expected.min_bedrooms = Some(2),
            Field::MaxBedrooms => expected.max_bedrooms = Some(5),
            Field::DateFrom => expected.date_from = NaiveDate::from_ymd_opt(2024, 1, 1),
            Field::DateTo => expected.date_to = NaiveDate::from_ymd_opt(2024, 5, 1),
            Field::Postcode => expected.postcode = "SW19".to_string(),
        }
        assert_eq!(form.criteria(), &expected);
    }

    #[test]
    fn submit_passes_snapshot_once() {
        let (mut form, searches) = recording_form();
        form.edit(FieldEdit::MinBedrooms(Some(3)));
        let before = form.criteria().clone();

        form.submit();

        assert_eq!(searches.borrow().as_slice(), &[before.clone()]);
        assert_eq!(form.criteria(), &before);

        form.edit(FieldEdit::MinBedrooms(Some(4)));
        assert_eq!(searches.borrow()[0].min_bedrooms, Some(3));
    }

    #[test]
    fn submit_with_defaults_still_searches() {
        let (mut form, searches) = recording_form();

        form.submit();

        assert_eq!(searches.borrow().as_slice(), &[SearchCriteria::default()]);
    }

    #[test]
    fn reset_restores_defaults_without_searching() {
        let (mut form, searches) = recording_form();
        for field in Field::ALL {
            form.edit(sample_edit(field));
        }

        form.reset();

        assert_eq!(form.criteria(), &SearchCriteria::default());
        assert!(searches.borrow().is_empty());
    }

    #[test]
    fn inverted_ranges_are_not_rejected() {
        let (mut form, searches) = recording_form();
        form.edit(FieldEdit::MinPrice(Some(500_000)));
        form.edit(FieldEdit::MaxPrice(Some(100_000)));
        form.edit(FieldEdit::MinBedrooms(Some(6)));
        form.edit(FieldEdit::MaxBedrooms(Some(1)));

        form.submit();

        let searches = searches.borrow();
        assert_eq!(searches.len(), 1);
        assert_eq!(searches[0].min_price, Some(500_000));
        assert_eq!(searches[0].max_price, Some(100_000));
        assert_eq!(searches[0].min_bedrooms, Some(6));
        assert_eq!(searches[0].max_bedrooms, Some(1));
    }

    #[test]
    fn flat_to_rent_scenario_then_reset() {
        let (mut form, searches) = recording_form();
        form.edit(FieldEdit::PropertyType(PropertyType::Flat));
        form.edit(FieldEdit::ListingType(ListingType::Rent));
        form.edit(FieldEdit::MinPrice(Some(200_000)));
        form.edit(FieldEdit::MaxPrice(Some(400_000)));
        form.edit(FieldEdit::Postcode("BR1".to_string()));

        form.submit();

        assert_eq!(searches.borrow().as_slice(), &[flat_to_rent_in_br1()]);
        assert_eq!(
            serde_json::to_value(&searches.borrow()[0]).unwrap(),
            serde_json::json!({
                "type": "flat",
                "listingType": "rent",
                "minPrice": 200000,
                "maxPrice": 400000,
                "minBedrooms": null,
                "maxBedrooms": null,
                "dateFrom": "",
                "dateTo": "",
                "postcode": "BR1",
            })
        );

        form.reset();

        assert_eq!(form.criteria(), &SearchCriteria::default());
        assert_eq!(searches.borrow().len(), 1);
    }

    #[test]
    fn flat_to_rent_scenario_by_keyboard() {
        let (mut form, searches) = recording_form();
        let press = |form: &mut SearchForm, codes: &[KeyCode]| {
            for code in codes {
                form.handle_key(key(*code));
            }
        };
        let type_str = |form: &mut SearchForm, s: &str| {
            for c in s.chars() {
                form.handle_key(key(KeyCode::Char(c)));
            }
        };

        // property type: open, move to "flat", select
        press(&mut form, &[KeyCode::Enter, KeyCode::Down, KeyCode::Down, KeyCode::Enter, KeyCode::Tab]);
        // listing type: cycle any -> sale -> rent
        press(&mut form, &[KeyCode::Right, KeyCode::Right, KeyCode::Tab]);
        type_str(&mut form, "200000");
        press(&mut form, &[KeyCode::Tab]);
        type_str(&mut form, "400000");
        press(&mut form, &[KeyCode::Tab, KeyCode::Tab, KeyCode::Tab, KeyCode::Tab, KeyCode::Tab]);
        assert_eq!(form.focus(), Focus::Field(Field::Postcode));
        type_str(&mut form, "BR1");
        press(&mut form, &[KeyCode::Enter]);

        assert_eq!(searches.borrow().as_slice(), &[flat_to_rent_in_br1()]);

        press(&mut form, &[KeyCode::Tab, KeyCode::Tab, KeyCode::Enter]);

        assert_eq!(form.focus(), Focus::Reset);
        assert_eq!(form.criteria(), &SearchCriteria::default());
        assert_eq!(searches.borrow().len(), 1);
    }

    #[test]
    fn submit_commits_typed_number() {
        let (mut form, searches) = recording_form();
        form.focus = Focus::Field(Field::MinBedrooms);
        form.handle_key(key(KeyCode::Char('3')));
        assert_eq!(form.criteria().min_bedrooms, None);

        form.handle_key(key(KeyCode::Enter));

        assert_eq!(form.criteria().min_bedrooms, Some(3));
        assert_eq!(searches.borrow()[0].min_bedrooms, Some(3));
    }

    #[test]
    fn edit_applies_control_limits() {
        let (mut form, _) = recording_form();
        form.edit(FieldEdit::MinPrice(Some(123_456)));
        form.edit(FieldEdit::MaxBedrooms(Some(42)));
        form.edit(FieldEdit::DateTo(NaiveDate::from_ymd_opt(2099, 1, 1)));
        form.edit(FieldEdit::Postcode("ABCDEFGHIJKLMNOP".to_string()));

        let criteria = form.criteria();
        assert_eq!(criteria.min_price, Some(120_000));
        assert_eq!(criteria.max_bedrooms, Some(10));
        assert_eq!(criteria.date_to, Some(today()));
        assert_eq!(criteria.postcode, "ABCDEFGHIJ");
    }

    #[test]
    fn ctrl_r_resets_from_any_field() {
        let (mut form, searches) = recording_form();
        form.edit(FieldEdit::Postcode("NW1".to_string()));
        form.focus = Focus::Field(Field::DateFrom);

        assert!(form.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)));

        assert_eq!(form.criteria(), &SearchCriteria::default());
        assert!(searches.borrow().is_empty());
    }

    #[test]
    fn escape_is_left_to_caller_unless_dropdown_open() {
        let (mut form, _) = recording_form();

        assert!(!form.handle_key(key(KeyCode::Esc)));

        form.handle_key(key(KeyCode::Enter));
        assert!(form.is_dropdown_open());
        assert!(form.handle_key(key(KeyCode::Esc)));
        assert!(!form.is_dropdown_open());
    }

    #[test_case(Focus::Field(Field::PropertyType) => Focus::Field(Field::ListingType))]
    #[test_case(Focus::Field(Field::Postcode) => Focus::Search)]
    #[test_case(Focus::Reset => Focus::Field(Field::PropertyType))]
    fn focus_order(focus: Focus) -> Focus {
        focus.next()
    }

    #[test]
    fn renders_labels_and_placeholders() {
        let (mut form, _) = recording_form();
        form.edit(FieldEdit::MinPrice(Some(200_000)));
        let area = Rect::new(0, 0, 80, 22);
        let mut buf = Buffer::empty(area);

        form.render(area, &mut buf);

        let text: String = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");
        for field in Field::ALL {
            assert!(text.contains(field.label()), "missing {}", field.label());
        }
        assert!(text.contains("£200,000"));
        assert!(text.contains("Max price"));
        assert!(text.contains("Search Properties"));
        assert!(text.contains(POSTCODE_HINT));
    }
}
