use anyhow::Result;
use test_utils::chart_fixture;
use test_utils::image_url_fixture;

use super::ChartData;
use super::ChartKind;
use super::MediaBody;
use super::MediaContent;
use super::MediaDraft;
use super::MediaKind;

#[test]
fn it_parses_media_kinds() {
    assert_eq!(MediaKind::parse("spreadsheet"), Some(MediaKind::Spreadsheet));
    assert_eq!(MediaKind::parse("image"), Some(MediaKind::Image));
    assert_eq!(MediaKind::parse("gif"), None);
}

#[test]
fn it_parses_chart_kinds() {
    assert_eq!(ChartKind::parse("line-chart"), Some(ChartKind::LineChart));
    assert_eq!(ChartKind::parse("table"), Some(ChartKind::Table));
    assert_eq!(ChartKind::parse("pie"), None);
    assert_eq!(ChartKind::default(), ChartKind::BarChart);
}

#[test]
fn it_exposes_kind_and_payload() {
    let media = MediaContent::from_draft("m1", MediaDraft::image(image_url_fixture(), None));
    assert_eq!(media.kind(), MediaKind::Image);
    assert_eq!(media.payload(), image_url_fixture());

    let media = MediaContent::from_draft("m2", MediaDraft::code("let a = 1;", Some("rust")));
    assert_eq!(media.kind(), MediaKind::Code);
    assert_eq!(media.payload(), "let a = 1;");
}

#[test]
fn it_normalizes_text_drafts() {
    let draft = MediaDraft::text("  hello  ").normalize().unwrap();
    assert_eq!(
        draft.body,
        MediaBody::Text {
            text: "hello".to_string()
        }
    );
}

#[test]
fn it_drops_blank_text_drafts() {
    assert!(MediaDraft::text(" \n\t ").normalize().is_none());
    assert!(MediaDraft::text("").normalize().is_none());
}

#[test]
fn it_keeps_media_drafts_with_empty_payloads() {
    let draft = MediaDraft::document("", None).normalize();
    assert!(draft.is_some());
}

#[test]
fn it_passes_extra_fields_through() {
    let draft = MediaDraft::image(image_url_fixture(), Some("Desk"))
        .with_extra("credit", serde_json::json!("unsplash"));
    let media = MediaContent::from_draft("m1", draft);

    assert_eq!(media.extra["credit"], serde_json::json!("unsplash"));
}

#[test]
fn it_parses_chart_data() -> Result<()> {
    let media = MediaContent::from_draft(
        "m1",
        MediaDraft::spreadsheet(chart_fixture(), ChartKind::BarChart, Some("Sales")),
    );
    let chart = media.chart_data()?;

    assert_eq!(chart.labels, vec!["Jan", "Feb", "Mar"]);
    assert_eq!(chart.datasets.len(), 2);
    assert_eq!(chart.datasets[0].border_width, Some(1.0));
    assert_eq!(chart.datasets[1].background_color, None);

    return Ok(());
}

#[test]
fn it_fails_chart_data_for_other_kinds() {
    let media = MediaContent::from_draft("m1", MediaDraft::text("hi"));
    assert!(media.chart_data().is_err());
}

#[test]
fn it_fails_chart_data_for_malformed_payloads() {
    assert!(ChartData::parse("{not json").is_err());
}

#[test]
fn it_exports_chart_data_as_csv() -> Result<()> {
    let chart = ChartData::parse(chart_fixture())?;
    insta::assert_snapshot!(chart.to_csv(), @r###"
    Jan,Feb,Mar
    65,59,80
    28,48.5,40
    "###);

    return Ok(());
}

#[test]
fn it_serializes_media_with_kind_tag() -> Result<()> {
    let media = MediaContent::from_draft("m1", MediaDraft::code("x", Some("rust")));
    let value = serde_json::to_value(&media)?;

    assert_eq!(
        value,
        serde_json::json!({"id": "m1", "kind": "code", "source": "x", "language": "rust"})
    );

    let parsed: MediaContent = serde_json::from_value(value)?;
    assert_eq!(parsed, media);

    return Ok(());
}
