use std::sync::Arc;

use crate::core::TextMeasurer;
use crate::render::Renderer;

use super::RaceChart;

/// Formats a bar value (and axis tick values) for display.
pub type ValueFormatterFn = Arc<dyn Fn(f64) -> String + Send + Sync>;

/// Rounds to the nearest integer and groups thousands with `,`.
///
/// `1234567.4` becomes `"1,234,567"`. Non-finite input is printed as-is.
#[must_use]
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = value.round();
    if rounded == 0.0 {
        return "0".to_owned();
    }

    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

pub(super) fn default_value_formatter() -> ValueFormatterFn {
    Arc::new(format_thousands)
}

impl<R: Renderer> RaceChart<R> {
    /// Replaces the value formatter. Takes effect on the next render.
    pub fn set_value_formatter(&mut self, formatter: ValueFormatterFn) {
        self.core.presentation.value_formatter = formatter;
    }

    /// Restores the default thousands-separator formatter.
    pub fn clear_value_formatter(&mut self) {
        self.core.presentation.value_formatter = default_value_formatter();
    }

    /// Replaces the text measurer used for margin layout.
    pub fn set_text_measurer(&mut self, measurer: impl TextMeasurer + 'static) {
        self.core.presentation.measurer = Box::new(measurer);
        self.core.presentation.layout.clear_label_width_cache();
    }

    #[must_use]
    pub fn format_value(&self, value: f64) -> String {
        (self.core.presentation.value_formatter)(value)
    }
}
