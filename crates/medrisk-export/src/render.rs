use medrisk_core::models::report::RiskReport;
use serde::Serialize;
use tera::{Context, Tera};

use crate::error::ExportError;
use crate::templates::{REPORT_HTML, REPORT_HTML_NAME, REPORT_MARKDOWN, REPORT_MARKDOWN_NAME};

/// Render a Tera template with any serializable value as its context.
///
/// The value's top-level fields become template variables. Templates whose
/// name ends in `.html` are autoescaped.
pub fn render_template<T: Serialize>(
    template_name: &str,
    template_content: &str,
    value: &T,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(value)?;
    let context =
        Context::from_value(value).map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    Ok(tera.render(template_name, &context)?)
}

/// The report as Markdown, ready for [`crate::docx::generate_docx`].
pub fn report_markdown(report: &RiskReport) -> Result<String, ExportError> {
    render_template(REPORT_MARKDOWN_NAME, REPORT_MARKDOWN, report)
}

/// The report as an HTML email body.
pub fn report_html(report: &RiskReport) -> Result<String, ExportError> {
    render_template(REPORT_HTML_NAME, REPORT_HTML, report)
}
