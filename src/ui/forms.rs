use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::controller::FormValues;

/// Input controls in the order focus visits them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum FormField {
    #[default]
    EmployeeId,
    ProductName,
    Category,
    Completed,
    Quality,
}

impl FormField {
    pub(crate) const ALL: [FormField; 5] = [
        FormField::EmployeeId,
        FormField::ProductName,
        FormField::Category,
        FormField::Completed,
        FormField::Quality,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            FormField::EmployeeId => "Employee ID",
            FormField::ProductName => "Product Name",
            FormField::Category => "Product Category",
            FormField::Completed => "Products Completed",
            FormField::Quality => "Product Quality",
        }
    }

    /// Fixed-choice fields are changed with the arrow keys, not typed into.
    pub(crate) fn is_selector(self) -> bool {
        matches!(self, FormField::Category | FormField::Quality)
    }

    pub(crate) fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Following field, or `None` after the last one.
    pub(crate) fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// Preceding field, or `None` before the first one.
    pub(crate) fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }
}

/// Width reserved for field labels so values line up.
pub(crate) const LABEL_WIDTH: usize = 20;

/// Editable state behind the input panel.
#[derive(Default, Clone)]
pub(crate) struct RecordForm {
    pub(crate) values: FormValues,
    pub(crate) active: FormField,
}

impl RecordForm {
    pub(crate) fn focus(&mut self, field: FormField) {
        self.active = field;
    }

    /// Append a character to the active text field. Selectors ignore typing.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.text_mut(self.active) {
            Some(value) => {
                value.push(ch);
                true
            }
            None => false,
        }
    }

    /// Remove the last character from the active text field.
    pub(crate) fn backspace(&mut self) {
        if let Some(value) = self.text_mut(self.active) {
            value.pop();
        }
    }

    /// Step the active selector forward or backward through its options.
    pub(crate) fn cycle_option(&mut self, forward: bool) -> bool {
        match self.active {
            FormField::Category => {
                let current = self.values.category;
                self.values.category = if forward { current.next() } else { current.previous() };
                true
            }
            FormField::Quality => {
                let current = self.values.quality;
                self.values.quality = if forward { current.next() } else { current.previous() };
                true
            }
            _ => false,
        }
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::EmployeeId => Some(&mut self.values.employee_id),
            FormField::ProductName => Some(&mut self.values.product_name),
            FormField::Completed => Some(&mut self.values.completed),
            FormField::Category | FormField::Quality => None,
        }
    }

    fn display_value(&self, field: FormField) -> String {
        match field {
            FormField::EmployeeId => self.values.employee_id.clone(),
            FormField::ProductName => self.values.product_name.clone(),
            FormField::Completed => self.values.completed.clone(),
            FormField::Category => self.values.category.to_string(),
            FormField::Quality => self.values.quality.to_string(),
        }
    }

    /// Render one labelled line of the input panel.
    pub(crate) fn build_line(&self, field: FormField, focused: bool) -> Line<'static> {
        let is_active = focused && self.active == field;
        let value = self.display_value(field);

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        let label = format!("{:<width$}", format!("{}:", field.label()), width = LABEL_WIDTH);
        let mut spans = vec![Span::raw(label)];

        if field.is_selector() {
            spans.push(Span::styled(format!("< {value} >"), style));
        } else if value.is_empty() {
            spans.push(Span::styled("<required>", style));
        } else {
            spans.push(Span::styled(value, style));
        }

        Line::from(spans)
    }

    /// Character count of a text field, used to place the cursor.
    pub(crate) fn value_len(&self, field: FormField) -> usize {
        match field {
            FormField::EmployeeId => self.values.employee_id.chars().count(),
            FormField::ProductName => self.values.product_name.chars().count(),
            FormField::Completed => self.values.completed.chars().count(),
            FormField::Category | FormField::Quality => 0,
        }
    }
}
