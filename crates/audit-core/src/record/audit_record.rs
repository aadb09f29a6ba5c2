//! AuditRecord - a formatted record ready for the platform's embed renderer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One labelled field of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordField {
    pub label: String,
    pub value: String,
    pub inline: bool,
}

impl RecordField {
    pub fn new(label: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            inline,
        }
    }

    pub fn inline(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(label, value, true)
    }

    pub fn block(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(label, value, false)
    }

    /// Fields whose value is empty or whitespace are not rendered
    pub fn has_value(&self) -> bool {
        !self.value.trim().is_empty()
    }
}

/// Structured record: created by the formatter, consumed once by delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub title: String,
    pub description: Option<String>,
    /// 24-bit RGB accent color
    pub color: u32,
    pub fields: Vec<RecordField>,
    pub footer: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl AuditRecord {
    /// Label of the annotation added to records delivered outside the audit channel
    pub const FALLBACK_LABEL: &'static str = "⚠️ Warning";
    pub const FALLBACK_NOTICE: &'static str =
        "Audit channel unavailable - delivered via fallback channel";

    pub fn new(title: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            description: None,
            color,
            fields: Vec::new(),
            footer: None,
            timestamp: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    #[must_use]
    pub fn timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.timestamp = Some(at);
        self
    }

    #[must_use]
    pub fn field(mut self, field: RecordField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn push_field(&mut self, field: RecordField) {
        self.fields.push(field);
    }

    /// Append the visible "delivered via fallback" annotation
    pub fn annotate_fallback(&mut self) {
        self.push_field(RecordField::block(
            Self::FALLBACK_LABEL,
            Self::FALLBACK_NOTICE,
        ));
    }

    pub fn is_fallback_annotated(&self) -> bool {
        self.fields.iter().any(|f| f.label == Self::FALLBACK_LABEL)
    }

    /// Value of the first field with the given label
    pub fn field_value(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }

    /// All text a reader sees, for search and assertions
    pub fn text(&self) -> String {
        let mut text = self.title.clone();
        if let Some(description) = &self.description {
            text.push('\n');
            text.push_str(description);
        }
        for field in &self.fields {
            text.push('\n');
            text.push_str(&field.label);
            text.push_str(": ");
            text.push_str(&field.value);
        }
        if let Some(footer) = &self.footer {
            text.push('\n');
            text.push_str(footer);
        }
        text
    }
}
