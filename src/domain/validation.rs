//! Per-field validation messages reported by the server.

use std::collections::BTreeMap;

/// Mapping from field name to the messages the server reported for it.
///
/// Held only while a form is in its invalid state and replaced wholesale on
/// every failed submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message for a field.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Returns the first message for a field, the one forms display.
    #[must_use]
    pub fn first(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// Returns every message for a field.
    #[must_use]
    pub fn messages(&self, field: &str) -> &[String] {
        self.fields.get(field).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Iterates field names in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for ValidationErrors
where
    K: Into<String>,
    V: IntoIterator,
    V::Item: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let fields = iter
            .into_iter()
            .map(|(field, messages)| {
                (
                    field.into(),
                    messages.into_iter().map(Into::into).collect::<Vec<String>>(),
                )
            })
            .filter(|(_, messages)| !messages.is_empty())
            .collect();

        Self { fields }
    }
}
