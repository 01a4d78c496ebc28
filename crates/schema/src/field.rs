//! Field types and display formatting
//!
//! Fields come from schema extraction over live document databases, so the
//! declared type is a best-effort label. Unknown labels are preserved
//! verbatim for display rather than collapsed into a catch-all.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum number of sample values kept per field
pub const MAX_SAMPLE_VALUES: usize = 5;

/// Maximum characters of a string sample value shown before truncation
pub const SAMPLE_STRING_MAX_LEN: usize = 30;

// ============================================================================
// Field Type
// ============================================================================

/// Declared type of a document field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Date,
    ObjectId,
    Array,
    Object,
    Mixed,
    /// Unknown upstream type, preserved verbatim for display
    Other(String),
}

impl FieldType {
    /// Parse an upstream type label
    pub fn parse(label: &str) -> Self {
        match label {
            "String" => FieldType::String,
            "Number" => FieldType::Number,
            "Boolean" => FieldType::Boolean,
            "Date" => FieldType::Date,
            "ObjectId" => FieldType::ObjectId,
            "Array" => FieldType::Array,
            "Object" => FieldType::Object,
            "Mixed" => FieldType::Mixed,
            other => FieldType::Other(other.to_string()),
        }
    }

    /// Get the display label for this type (the badge text on node cards)
    pub fn display_name(&self) -> &str {
        match self {
            FieldType::String => "String",
            FieldType::Number => "Number",
            FieldType::Boolean => "Boolean",
            FieldType::Date => "Date",
            FieldType::ObjectId => "ObjectId",
            FieldType::Array => "Array",
            FieldType::Object => "Object",
            FieldType::Mixed => "Mixed",
            FieldType::Other(label) => label,
        }
    }

    /// Get the glyph shown next to the field name
    pub fn glyph(&self) -> &'static str {
        match self {
            FieldType::String => "\"\"",
            FieldType::Number => "#",
            FieldType::Boolean => "✓",
            FieldType::Date => "📅",
            FieldType::ObjectId => "🔑",
            FieldType::Array => "[]",
            FieldType::Object => "{}",
            FieldType::Mixed => "?",
            FieldType::Other(_) => "•",
        }
    }
}

impl Default for FieldType {
    fn default() -> Self {
        FieldType::Mixed
    }
}

impl From<String> for FieldType {
    fn from(label: String) -> Self {
        FieldType::parse(&label)
    }
}

impl From<FieldType> for String {
    fn from(ty: FieldType) -> Self {
        ty.display_name().to_string()
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Field
// ============================================================================

/// A single field of a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name (renderer tolerates duplicates within a collection)
    pub name: String,
    /// Declared field type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Small bounded list of sample values, display only
    #[serde(default, rename = "sampleValues")]
    pub sample_values: Vec<Value>,
    /// Whether this field was extracted from a nested document
    #[serde(default, rename = "isNested")]
    pub is_nested: bool,
}

impl Field {
    /// Create a new field with no samples
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            sample_values: Vec::new(),
            is_nested: false,
        }
    }

    /// Formatted sample values ready for display
    pub fn formatted_samples(&self) -> Vec<String> {
        self.sample_values.iter().map(format_sample_value).collect()
    }
}

// ============================================================================
// Sample Value Formatting
// ============================================================================

/// Format a heterogeneous sample value for display.
///
/// Strings are quoted and truncated, arrays and objects are summarized
/// rather than dumped, so a pathological sample cannot blow up a node card.
pub fn format_sample_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => if *b { "true" } else { "false" }.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            let truncated: String = s.chars().take(SAMPLE_STRING_MAX_LEN).collect();
            if s.chars().count() > SAMPLE_STRING_MAX_LEN {
                format!("\"{truncated}...\"")
            } else {
                format!("\"{truncated}\"")
            }
        }
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(_) => "{...}".to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
