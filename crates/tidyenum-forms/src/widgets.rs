//! Widget types for form fields.

use std::fmt;

/// The built-in widget types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetType {
    /// `<input type="text">`.
    TextInput,
    /// `<input type="number">`.
    NumberInput,
    /// `<input type="hidden">`.
    HiddenInput,
    /// `<textarea>`.
    Textarea,
    /// `<select>`.
    Select,
    /// A set of `<input type="radio">` elements.
    RadioSelect,
}

impl WidgetType {
    /// Returns `true` for widgets that render a list of choices.
    pub const fn is_choice_widget(self) -> bool {
        matches!(self, Self::Select | Self::RadioSelect)
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TextInput => "TextInput",
            Self::NumberInput => "NumberInput",
            Self::HiddenInput => "HiddenInput",
            Self::Textarea => "Textarea",
            Self::Select => "Select",
            Self::RadioSelect => "RadioSelect",
        };
        write!(f, "{name}")
    }
}
