//! Built-in report templates (Tera syntax).
//!
//! The Markdown template feeds DOCX generation and uses the subset that
//! [`crate::docx::generate_docx`] understands. The HTML template is an email
//! body and is rendered with autoescaping.

pub const REPORT_MARKDOWN_NAME: &str = "risk_report.md";
pub const REPORT_HTML_NAME: &str = "risk_report.html";

pub const REPORT_MARKDOWN: &str = r#"# Health Risk Report
**Prepared for:** {{ user_name }}
**Report date:** {{ report_date }}
**Overall risk score:** {{ overall_risk_score }}%
**Next assessment:** in {{ next_assessment_date }}

## Risk Breakdown
{%- for disease, a in risk_assessments %}
### {{ disease | replace(from="_", to=" ") | title }}
**Risk score:** {{ a.risk_score }}% ({{ a.risk_level | replace(from="_", to=" ") }} risk, {{ a.confidence }} confidence)
**Contributing factors**
{%- for factor in a.contributing_factors %}
- {{ factor }}
{%- endfor %}
**Recommendations**
{%- for rec in a.recommendations %}
- {{ rec }}
{%- endfor %}
{%- endfor %}
{% if priority_actions %}
## Priority Actions
{%- for p in priority_actions %}
- **{{ p.urgency | upper }}:** {{ p.action }}
{%- endfor %}
{% endif %}
## Detailed Recommendations
{%- for section, items in detailed_recommendations %}{% if items %}
### {{ section | title }}
{%- for item in items %}
- {{ item }}
{%- endfor %}
{%- endif %}{% endfor %}
{% if key_risk_factors %}
## Key Risk Factors
{%- for k in key_risk_factors %}
- **{{ k.factor }}** ({{ k.severity | replace(from="_", to=" ") }}{% if k.modifiable %}, modifiable{% endif %})
{%- endfor %}
{% endif %}
## Data Completeness
{%- for category, pct in data_completeness %}
- {{ category | replace(from="_", to=" ") | title }}: {{ pct }}%
{%- endfor %}
"#;

pub const REPORT_HTML: &str = r#"<h2>Health Risk Report - {{ report_date }}</h2>
<p>Prepared for {{ user_name }}</p>
<p><strong>Overall Risk Score:</strong> {{ overall_risk_score }}%</p>
<h3>Risk Breakdown</h3>
<ul>
{%- for disease, a in risk_assessments %}
<li><strong>{{ disease | replace(from="_", to=" ") | title }}:</strong> {{ a.risk_score }}% ({{ a.risk_level }})</li>
{%- endfor %}
</ul>
{%- if priority_actions %}
<h3>Priority Actions</h3>
<ul>
{%- for p in priority_actions %}
<li>{{ p.action }} - <em>{{ p.urgency }}</em></li>
{%- endfor %}
</ul>
{%- endif %}
<h3>Detailed Recommendations</h3>
{%- for section, items in detailed_recommendations %}
<h4>{{ section | title }}</h4>
<ul>
{%- for item in items %}
<li>{{ item }}</li>
{%- endfor %}
</ul>
{%- endfor %}
<p>Next assessment recommended in {{ next_assessment_date }}.</p>
"#;
