use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a serializable response as JSON.
///
/// `Text` has no generic rendering; commands print their own summary and
/// only reach here for the JSON formats.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json | OutputFormat::Text => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a response: `text` lines for the text format, JSON otherwise.
pub fn output<T: Serialize>(
    value: &T,
    text: &[String],
    format: OutputFormat,
) -> anyhow::Result<()> {
    if format == OutputFormat::Text {
        for line in text {
            println!("{line}");
        }
        return Ok(());
    }
    println!("{}", render(value, format)?);
    Ok(())
}
