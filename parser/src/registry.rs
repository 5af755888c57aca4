use crate::format::{CustomFormatSpec, FormatTemplate};
use crate::formats::{builtin_formats, CUSTOM_FORMAT};
use crate::ParseError;
use tracing::{debug, info, warn};

/// FormatRegistry - the catalog of line layouts known to this process
///
/// Holds the built-in layouts plus at most one operator-supplied `custom`
/// template. It is filled once at start-up and then shared read-only.
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    builtins: Vec<FormatTemplate>,
    custom: Option<FormatTemplate>,
}

impl FormatRegistry {
    /// Create a registry holding only the built-in layouts.
    pub fn new() -> Result<Self, ParseError> {
        let builtins = builtin_formats()?;

        info!(
            "Registered {} log formats: {}",
            builtins.len(),
            builtins.iter().map(|f| f.name()).collect::<Vec<_>>().join(", ")
        );

        Ok(Self {
            builtins,
            custom: None,
        })
    }

    /// Create a registry and register `custom_spec` when one is configured.
    /// A bad spec only produces a warning.
    pub fn with_custom(custom_spec: Option<&str>) -> Result<Self, ParseError> {
        let mut registry = Self::new()?;
        if let Some(spec) = custom_spec {
            registry.register_custom(spec);
        }
        Ok(registry)
    }

    /// Register the custom template, logging the outcome. Returns whether the
    /// template was accepted; on failure the registry is left as it was.
    pub fn register_custom(&mut self, spec: &str) -> bool {
        match self.try_register_custom(spec) {
            Ok(()) => {
                info!("Custom log format loaded");
                true
            }
            Err(e) => {
                warn!("Failed to parse custom log format: {}", e);
                false
            }
        }
    }

    /// Parse a JSON `{"pattern", "fields"}` spec and store it under the
    /// reserved `custom` name, replacing any previous custom template.
    pub fn try_register_custom(&mut self, spec: &str) -> Result<(), ParseError> {
        let template = CustomFormatSpec::from_json(spec)?.into_template(CUSTOM_FORMAT)?;

        if template.group_count() != template.fields().len() {
            warn!(
                "Custom log format has {} capture groups but {} field names",
                template.group_count(),
                template.fields().len()
            );
        }
        debug!("Custom log format pattern: {}", template.pattern());

        self.custom = Some(template);
        Ok(())
    }

    pub fn has_custom(&self) -> bool {
        self.custom.is_some()
    }

    /// Get template by name
    pub fn lookup(&self, name: &str) -> Option<&FormatTemplate> {
        let result = self.templates().find(|t| t.name() == name);
        if result.is_none() {
            warn!("Log format not found: {}", name);
        }
        result
    }

    /// Templates in detection order: custom first, then built-ins as
    /// registered.
    pub fn templates(&self) -> impl Iterator<Item = &FormatTemplate> {
        self.custom.iter().chain(self.builtins.iter())
    }

    pub fn names_in_precedence_order(&self) -> Vec<&str> {
        self.templates().map(|t| t.name()).collect()
    }
}
