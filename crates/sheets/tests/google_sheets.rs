//! Integration tests for [`GoogleSheetsBackend`] driven through
//! [`ReportSheet`] against a mock Sheets API.

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use groupsweep_core::CoreError;
use groupsweep_sheets::{GoogleSheetsBackend, ReportSheet, SheetError};

const SPREADSHEET: &str = "/v4/spreadsheets/sid";

fn report(server: &MockServer) -> ReportSheet {
    let backend =
        GoogleSheetsBackend::new(server.uri(), "token", "sid", "Report", Duration::from_secs(5))
            .unwrap();
    ReportSheet::new(Arc::new(backend))
}

fn spreadsheet_with(titles: &[(&str, i64)]) -> ResponseTemplate {
    let sheets: Vec<_> = titles
        .iter()
        .map(|(title, id)| json!({ "properties": { "sheetId": id, "title": title } }))
        .collect();
    ResponseTemplate::new(200).set_body_json(json!({ "sheets": sheets }))
}

async fn mount_ok(server: &MockServer, verb: &str, p: &str) {
    Mock::given(method(verb))
        .and(path(p))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn reset_clears_existing_tab_and_writes_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SPREADSHEET))
        .and(query_param("fields", "sheets.properties"))
        .respond_with(spreadsheet_with(&[("Sheet1", 0), ("Report", 7)]))
        .mount(&server)
        .await;

    mount_ok(&server, "POST", "/v4/spreadsheets/sid/values/'Report':clear").await;

    Mock::given(method("PUT"))
        .and(path("/v4/spreadsheets/sid/values/'Report'!A1"))
        .and(query_param("valueInputOption", "RAW"))
        .and(body_partial_json(json!({
            "values": [["Group Name", "Members", "Owners", "Creation Date", "Email Address"]]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets/sid:batchUpdate"))
        .and(body_partial_json(json!({
            "requests": [
                { "repeatCell": { "range": { "sheetId": 7, "endRowIndex": 1 } } },
                { "updateSheetProperties": { "properties": { "gridProperties": { "frozenRowCount": 1 } } } }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    report(&server).reset().await.unwrap();
}

#[tokio::test]
async fn reset_adds_missing_tab() {
    let server = MockServer::start().await;

    // First lookup: tab absent. Later lookups see it.
    Mock::given(method("GET"))
        .and(path(SPREADSHEET))
        .respond_with(spreadsheet_with(&[("Sheet1", 0)]))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SPREADSHEET))
        .respond_with(spreadsheet_with(&[("Sheet1", 0), ("Report", 9)]))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets/sid:batchUpdate"))
        .and(body_partial_json(json!({
            "requests": [{ "addSheet": { "properties": { "title": "Report" } } }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets/sid:batchUpdate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    mount_ok(&server, "POST", "/v4/spreadsheets/sid/values/'Report':clear").await;
    mount_ok(&server, "PUT", "/v4/spreadsheets/sid/values/'Report'!A1").await;

    report(&server).reset().await.unwrap();
}

#[tokio::test]
async fn append_row_uses_append_with_insert_rows() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets/sid/values/'Report'!A:E:append"))
        .and(query_param("valueInputOption", "RAW"))
        .and(query_param("insertDataOption", "INSERT_ROWS"))
        .and(body_partial_json(json!({
            "values": [["Old", "0", "0", "2020-02-02", "old@example.com"]]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let row = groupsweep_core::ReportRow {
        name: "Old".into(),
        members: "0".into(),
        owners: "0".into(),
        creation_date: "2020-02-02".into(),
        email: "old@example.com".into(),
        status: None,
    };
    report(&server).append_row(&row).await.unwrap();
}

#[tokio::test]
async fn read_all_rows_parses_value_range() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SPREADSHEET))
        .respond_with(spreadsheet_with(&[("Report", 7)]))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sid/values/'Report'!A2:F"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": "Report!A2:F3",
            "majorDimension": "ROWS",
            "values": [
                ["A", "0", "0", "2020-01-01", "a@example.com"],
                ["B", "0", "0", "2020-01-02", "b@example.com", "Failed to delete"]
            ]
        })))
        .mount(&server)
        .await;

    let rows = report(&server).read_all_rows().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].row.email, "a@example.com");
    assert!(rows[0].row.status.is_none());
    assert_eq!(rows[1].index, 2);
    assert_eq!(rows[1].row.status.as_deref(), Some("Failed to delete"));
}

#[tokio::test]
async fn read_all_rows_of_missing_tab_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SPREADSHEET))
        .respond_with(spreadsheet_with(&[("Sheet1", 0)]))
        .mount(&server)
        .await;

    assert_matches!(
        report(&server).read_all_rows().await,
        Err(SheetError::Core(CoreError::NotFound { entity: "sheet", .. }))
    );
}

#[tokio::test]
async fn annotate_writes_status_cell() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v4/spreadsheets/sid/values/'Report'!F4"))
        .and(body_partial_json(json!({ "values": [["Deleted at 2024-01-01 10:00:00"]] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    report(&server)
        .annotate(3, "Deleted at 2024-01-01 10:00:00")
        .await
        .unwrap();
}

#[tokio::test]
async fn api_failure_surfaces_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SPREADSHEET))
        .respond_with(ResponseTemplate::new(404).set_body_string("Requested entity was not found."))
        .mount(&server)
        .await;

    let err = report(&server).reset().await.unwrap_err();
    assert_matches!(err, SheetError::Api { status: 404, .. });
}
