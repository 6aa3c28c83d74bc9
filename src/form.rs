//! Add-stream form
//!
//! Field state and validation for the "add custom stream" action. On a
//! successful submit the caller inserts the entry into the catalog and
//! calls the filter controller's refresh entry point.

use crate::catalog::{parse_tags_attr, Catalog, Visibility};

const MAX_TITLE_LEN: usize = 80;
const MAX_TAGS: usize = 8;

/// The form's focusable fields, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Streamer,
    Description,
    Tags,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Title => FormField::Streamer,
            FormField::Streamer => FormField::Description,
            FormField::Description => FormField::Tags,
            FormField::Tags => FormField::Title,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Streamer => "Streamer",
            FormField::Description => "Description",
            FormField::Tags => "Tags",
        }
    }
}

/// A validation failure tied to one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

/// In-progress form state
#[derive(Debug, Clone, Default)]
pub struct AddStreamForm {
    pub title: String,
    pub streamer: String,
    pub description: String,
    /// Comma-separated, parsed on submit
    pub tags: String,
    pub visibility: Visibility,
    pub focus: FormField,
    pub errors: Vec<FieldError>,
}

impl AddStreamForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all fields and errors
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Move focus to the next field
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    /// Flip the visibility toggle
    pub fn toggle_visibility(&mut self) {
        self.visibility = match self.visibility {
            Visibility::Public => Visibility::Private,
            Visibility::Private => Visibility::Public,
        };
    }

    fn focused_value_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Title => &mut self.title,
            FormField::Streamer => &mut self.streamer,
            FormField::Description => &mut self.description,
            FormField::Tags => &mut self.tags,
        }
    }

    /// Append a typed character to the focused field
    pub fn input_char(&mut self, c: char) {
        self.focused_value_mut().push(c);
    }

    /// Delete the last character of the focused field
    pub fn backspace(&mut self) {
        self.focused_value_mut().pop();
    }

    /// The first error for a field, if any
    pub fn error_for(&self, field: FormField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Validate the current field values. On success the errors list is
    /// cleared; on failure it is replaced with the new findings.
    pub fn validate(&mut self) -> bool {
        let mut errors = Vec::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push(FieldError {
                field: FormField::Title,
                message: "Title is required".to_string(),
            });
        } else if title.chars().count() > MAX_TITLE_LEN {
            errors.push(FieldError {
                field: FormField::Title,
                message: format!("Title must be at most {} characters", MAX_TITLE_LEN),
            });
        }

        let streamer = self.streamer.trim();
        if streamer.is_empty() {
            errors.push(FieldError {
                field: FormField::Streamer,
                message: "Streamer name is required".to_string(),
            });
        } else if !streamer
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            errors.push(FieldError {
                field: FormField::Streamer,
                message: "Streamer name may only use letters, digits, _ and -".to_string(),
            });
        }

        let tags = parse_tags_attr(Some(&self.tags));
        if tags.len() > MAX_TAGS {
            errors.push(FieldError {
                field: FormField::Tags,
                message: format!("At most {} tags allowed", MAX_TAGS),
            });
        }
        for tag in &tags {
            if !tag
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
            {
                errors.push(FieldError {
                    field: FormField::Tags,
                    message: format!("Invalid tag '{}': use letters, digits and -", tag),
                });
                break;
            }
        }

        self.errors = errors;
        self.errors.is_empty()
    }

    /// Validate and, on success, insert the new entry into the catalog.
    /// Returns the new entry's id, or None when validation failed.
    pub fn submit(&mut self, catalog: &mut Catalog) -> Option<u64> {
        if !self.validate() {
            log::debug!("Add-stream form rejected: {} errors", self.errors.len());
            return None;
        }
        let id = catalog.add(
            self.title.trim(),
            self.streamer.trim(),
            self.description.trim(),
            Some(self.visibility.name()),
            Some(&self.tags),
            0,
        );
        self.reset();
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> AddStreamForm {
        AddStreamForm {
            title: "Night Owls".to_string(),
            streamer: "owl_cast".to_string(),
            description: "".to_string(),
            tags: "chill, music".to_string(),
            ..AddStreamForm::default()
        }
    }

    #[test]
    fn test_valid_form_passes() {
        let mut form = filled_form();
        assert!(form.validate());
        assert!(form.errors.is_empty());
    }

    #[test]
    fn test_empty_title_rejected() {
        let mut form = filled_form();
        form.title = "   ".to_string();
        assert!(!form.validate());
        assert!(form.error_for(FormField::Title).is_some());
    }

    #[test]
    fn test_streamer_charset_rejected() {
        let mut form = filled_form();
        form.streamer = "owl cast!".to_string();
        assert!(!form.validate());
        assert!(form.error_for(FormField::Streamer).is_some());
    }

    #[test]
    fn test_bad_tag_rejected() {
        let mut form = filled_form();
        form.tags = "ok, no spaces here".to_string();
        assert!(!form.validate());
        assert!(form.error_for(FormField::Tags).is_some());
    }

    #[test]
    fn test_submit_inserts_and_resets() {
        let mut catalog = Catalog::new();
        let mut form = filled_form();
        form.toggle_visibility(); // public -> private
        let id = form.submit(&mut catalog).expect("valid form");
        let entry = catalog.get(id).unwrap();
        assert_eq!(entry.title, "Night Owls");
        assert_eq!(entry.visibility, Visibility::Private);
        assert_eq!(entry.tags, vec!["chill", "music"]);
        assert!(form.title.is_empty()); // form cleared for next use
    }

    #[test]
    fn test_submit_rejects_without_inserting() {
        let mut catalog = Catalog::new();
        let mut form = AddStreamForm::new();
        assert!(form.submit(&mut catalog).is_none());
        assert!(catalog.entries().is_empty());
    }
}
