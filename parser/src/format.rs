use crate::ParseError;
use regex::{Captures, Regex};
use serde::Deserialize;

/// A named line layout: one regex plus the field each capture group fills.
#[derive(Debug, Clone)]
pub struct FormatTemplate {
    name: String,
    pattern: Regex,
    fields: Vec<String>,
}

impl FormatTemplate {
    /// Compile a template. The pattern is used as written, so callers that
    /// need start-of-line anchoring must include it.
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        fields: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, ParseError> {
        Ok(Self {
            name: name.into(),
            pattern: Regex::new(pattern)?,
            fields: fields.into_iter().map(Into::into).collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Number of capture groups, not counting the implicit whole match.
    pub fn group_count(&self) -> usize {
        self.pattern.captures_len() - 1
    }

    pub fn matches(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }

    pub fn captures<'l>(&self, line: &'l str) -> Option<FieldCaptures<'_, 'l>> {
        self.pattern.captures(line).map(|caps| FieldCaptures {
            fields: &self.fields,
            caps,
        })
    }
}

/// Captures of one line, addressed by field name instead of group index.
pub struct FieldCaptures<'t, 'l> {
    fields: &'t [String],
    caps: Captures<'l>,
}

impl<'t, 'l> FieldCaptures<'t, 'l> {
    /// Value bound to `field`. Fields the template does not declare, groups
    /// that did not participate and empty captures all read as `None`.
    pub fn get(&self, field: &str) -> Option<&'l str> {
        let index = self.fields.iter().position(|f| f == field)?;
        self.caps
            .get(index + 1)
            .map(|m| m.as_str())
            .filter(|value| !value.is_empty())
    }
}

/// Operator-supplied template, as found in `NGINX_LOG_FORMAT`.
/// Example: `{"pattern": "^(\\S+) (\\d+)$", "fields": ["ip", "status"]}`
#[derive(Debug, Deserialize)]
pub struct CustomFormatSpec {
    pub pattern: String,
    pub fields: Vec<String>,
}

impl CustomFormatSpec {
    pub fn from_json(spec: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(spec)?)
    }

    /// Build the template, anchoring the pattern at line start. The wrapping
    /// group is non-capturing so group numbering is unchanged. The pattern
    /// must compile on its own first, or an unbalanced `)` could close the
    /// wrapper and leave later alternatives unanchored.
    pub fn into_template(self, name: &str) -> Result<FormatTemplate, ParseError> {
        Regex::new(&self.pattern)?;
        let anchored = format!("^(?:{})", self.pattern);
        FormatTemplate::new(name, &anchored, self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lookup_by_name() {
        let template = FormatTemplate::new("t", r"^(\S+) (\d+)( x)?$", ["ip", "status", "tail"]).unwrap();
        let caps = template.captures("1.2.3.4 200").unwrap();

        assert_eq!(caps.get("ip"), Some("1.2.3.4"));
        assert_eq!(caps.get("status"), Some("200"));
        assert_eq!(caps.get("tail"), None);
        assert_eq!(caps.get("bytes"), None);
    }

    #[test]
    fn test_more_fields_than_groups() {
        let template = FormatTemplate::new("t", r"^(\S+)", ["ip", "status"]).unwrap();
        assert_eq!(template.group_count(), 1);

        let caps = template.captures("1.2.3.4 200").unwrap();
        assert_eq!(caps.get("ip"), Some("1.2.3.4"));
        assert_eq!(caps.get("status"), None);
    }

    #[test]
    fn test_custom_spec_is_anchored() {
        let spec = CustomFormatSpec::from_json(r#"{"pattern": "(\\d+) OK", "fields": ["status"]}"#).unwrap();
        let template = spec.into_template("custom").unwrap();

        assert_eq!(template.pattern(), r"^(?:(\d+) OK)");
        assert_eq!(template.group_count(), 1);
        assert!(template.matches("200 OK"));
        assert!(!template.matches("status 200 OK"));
    }

    #[test]
    fn test_custom_spec_rejects_bad_json() {
        let err = CustomFormatSpec::from_json(r#"{"pattern": 5}"#).unwrap_err();
        assert!(matches!(err, ParseError::InvalidSpec(_)));
    }

    #[test]
    fn test_custom_spec_rejects_unbalanced_group() {
        let spec = CustomFormatSpec::from_json(r#"{"pattern": "foo)|(bar", "fields": ["ip"]}"#).unwrap();
        let err = spec.into_template("custom").unwrap_err();
        assert!(matches!(err, ParseError::InvalidPattern(_)));
    }

    #[test]
    fn test_custom_spec_rejects_bad_pattern() {
        let spec = CustomFormatSpec::from_json(r#"{"pattern": "(unclosed", "fields": []}"#).unwrap();
        let err = spec.into_template("custom").unwrap_err();
        assert!(matches!(err, ParseError::InvalidPattern(_)));
    }
}
