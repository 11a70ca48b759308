use jiff::Timestamp;
use medrisk_core::features::name;
use medrisk_core::models::disease::RiskScores;
use medrisk_core::models::report::RiskReport;
use medrisk_core::models::user::UserContext;
use medrisk_export::docx::{generate_docx, report_docx};
use medrisk_export::render::{render_template, report_html, report_markdown};
use medrisk_export::styles::DocumentStyles;
use medrisk_export::ExportError;
use medrisk_features::FeatureEngineer;
use medrisk_scoring::ScoringEngine;

fn report(user_name: &str) -> RiskReport {
    let mut features = FeatureEngineer::new().default_vector();
    features.insert(name::GLUCOSE_LATEST, 131.0);
    features.insert(name::SMOKING, 1.0);

    let scores: RiskScores = [
        ("diabetes".to_string(), 0.8),
        ("liver_disease".to_string(), 0.1),
        ("mental_health".to_string(), 0.35),
    ]
    .into_iter()
    .collect();
    let user = UserContext {
        id: "u-1".into(),
        name: user_name.into(),
        email: "export@example.com".into(),
    };

    ScoringEngine::default()
        .generate_report_at(
            &scores,
            &features,
            &user,
            Timestamp::from_second(1_768_000_000).unwrap(),
        )
        .unwrap()
}

#[test]
fn markdown_covers_every_section() {
    let md = report_markdown(&report("Ada")).unwrap();

    assert!(md.starts_with("# Health Risk Report"));
    assert!(md.contains("**Prepared for:** Ada"));
    assert!(md.contains("### Diabetes"));
    assert!(md.contains("### Liver Disease"));
    assert!(md.contains("(very high risk"));
    assert!(md.contains("- **HIGH:** Consult a healthcare provider for diabetes assessment"));
    assert!(md.contains("- **MEDIUM:** Monitor mental health risk factors"));
    assert!(md.contains("## Key Risk Factors"));
    assert!(md.contains("- **Smoking** (very high, modifiable)"));
    assert!(md.contains("- Lab Data: "));
}

#[test]
fn html_body_is_escaped() {
    let html = report_html(&report("<script>alert(1)</script>")).unwrap();
    assert!(html.contains("<h3>Risk Breakdown</h3>"));
    assert!(html.contains("<strong>Diabetes:</strong> 80"));
    assert!(html.contains("very_high"));
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn docx_is_a_zip_package() {
    let bytes = report_docx(&report("Ada"), &DocumentStyles::default()).unwrap();
    assert!(bytes.len() > 100);
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn docx_accepts_unclosed_bold_and_page_breaks() {
    let bytes = generate_docx(
        "# Title\n**unclosed bold\n---\n#### not a heading\n- item",
        &DocumentStyles::default(),
    )
    .unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn broken_template_is_a_parse_error() {
    let err = render_template("bad.md", "{% for x in %}", &serde_json::json!({})).unwrap_err();
    assert!(matches!(err, ExportError::TemplateParse(_)));
}

#[test]
fn margins_convert_to_twips() {
    let styles = DocumentStyles {
        margin_inches: 0.75,
        ..DocumentStyles::default()
    };
    assert_eq!(styles.margin_twips(), 1080);
    assert_eq!(styles.heading_size(1), 18);
    assert_eq!(styles.heading_size(9), 12);
}
