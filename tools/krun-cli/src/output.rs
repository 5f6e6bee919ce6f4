use crate::error::RunError;
use krun_gen::GeneratedResource;
use std::io::Write;

pub use crate::types::OutputFormat;

/// Output formatting interface
pub trait Formatter {
    fn format(&self, resource: &GeneratedResource) -> Result<String, RunError>;
}

pub struct JsonFormatter;
pub struct YamlFormatter;
pub struct NameFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, resource: &GeneratedResource) -> Result<String, RunError> {
        serde_json::to_string_pretty(resource)
            .map_err(|e| RunError::Format(e.to_string()))
    }
}

impl Formatter for YamlFormatter {
    fn format(&self, resource: &GeneratedResource) -> Result<String, RunError> {
        serde_yaml::to_string(resource)
            .map(|s| s.trim_end().to_string())
            .map_err(|e| RunError::Format(e.to_string()))
    }
}

impl Formatter for NameFormatter {
    fn format(&self, resource: &GeneratedResource) -> Result<String, RunError> {
        Ok(resource.short_name())
    }
}

/// Get formatter for the specified output format
pub fn get_formatter(format: &OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Yaml => Box::new(YamlFormatter),
        OutputFormat::Name => Box::new(NameFormatter),
    }
}

/// Write `resource` in `format`, or a `<kind>/<name> created` line when no
/// format was requested.
pub fn write_resource(
    out: &mut dyn Write,
    resource: &GeneratedResource,
    format: Option<&OutputFormat>,
    dry_run: bool,
) -> Result<(), RunError> {
    let text = match format {
        Some(format) => get_formatter(format).format(resource)?,
        None if dry_run => format!("{} created (dry run)", resource.short_name()),
        None => format!("{} created", resource.short_name()),
    };
    writeln!(out, "{}", text)?;
    Ok(())
}
