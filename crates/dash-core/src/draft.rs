use thiserror::Error;

use super::ids::IdGenerator;
use super::ids::IdKind;
use super::state::Widget;

pub const PLACEHOLDER_WIDGET_TEXT: &str = "Placeholder widget";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{0} name must not be empty")]
    EmptyName(&'static str),
}

/// User input for a new category, validated before any store operation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    name: String,
}

impl CategoryDraft {
    pub fn new(name: &str) -> Result<Self, InputError> {
        Ok(Self {
            name: non_empty(name, "category")?,
        })
    }

    /// Returns the `(id, name)` pair expected by `add_category`.
    pub fn into_parts(self, ids: &mut IdGenerator) -> (String, String) {
        (ids.next(IdKind::Category), self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetDraft {
    name: String,
    text: String,
}

impl WidgetDraft {
    pub fn new(name: &str, text: &str) -> Result<Self, InputError> {
        let name = non_empty(name, "widget")?;
        let text = match text.trim() {
            "" => PLACEHOLDER_WIDGET_TEXT.to_string(),
            text => text.to_string(),
        };
        Ok(Self { name, text })
    }

    pub fn into_widget(self, category_id: &str, ids: &mut IdGenerator) -> Widget {
        Widget {
            id: ids.next(IdKind::Widget),
            name: self.name,
            text: self.text,
            category_id: category_id.to_string(),
        }
    }
}

fn non_empty(value: &str, what: &'static str) -> Result<String, InputError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyName(what));
    }
    Ok(trimmed.to_string())
}
