//! Sheets v4 REST backend.
//!
//! All value writes use `valueInputOption=RAW` so dates and counts are
//! stored exactly as rendered. Ranges are addressed in A1 notation with the
//! tab name quoted.

use std::time::Duration;

use async_trait::async_trait;
use groupsweep_core::report::column_letter;
use groupsweep_core::CoreError;
use reqwest::Url;
use serde::Deserialize;
use serde_json::json;

use crate::backend::SheetBackend;
use crate::error::SheetError;

/// Production Sheets API host.
pub const DEFAULT_API_URL: &str = "https://sheets.googleapis.com";

/// Backend bound to one tab of one spreadsheet.
pub struct GoogleSheetsBackend {
    client: reqwest::Client,
    api_url: String,
    access_token: String,
    spreadsheet_id: String,
    sheet_name: String,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetResponse {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    sheet_id: i64,
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Quote a tab name for A1 notation (`it's` → `'it''s'`).
pub fn quote_sheet_name(name: &str) -> String {
    format!("'{}'", name.replace('\'', "''"))
}

/// Render a cell value returned by the API as text.
fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl GoogleSheetsBackend {
    pub fn new(
        api_url: impl Into<String>,
        access_token: impl Into<String>,
        spreadsheet_id: impl Into<String>,
        sheet_name: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SheetError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            spreadsheet_id: spreadsheet_id.into(),
            sheet_name: sheet_name.into(),
        })
    }

    /// `{api}/v4/spreadsheets/{id}[:method]` followed by `segments`, each
    /// percent-encoded as a single path segment.
    fn url(&self, method: Option<&str>, segments: &[&str]) -> Result<Url, SheetError> {
        let spreadsheet = match method {
            Some(method) => format!("{}:{method}", self.spreadsheet_id),
            None => self.spreadsheet_id.clone(),
        };
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| SheetError::Layout(format!("Invalid Sheets API URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| SheetError::Layout("Sheets API URL cannot be a base".into()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", spreadsheet.as_str()])
            .extend(segments);
        Ok(url)
    }

    fn range(&self, a1: &str) -> String {
        format!("{}!{a1}", quote_sheet_name(&self.sheet_name))
    }

    /// Numeric id of the tab, or `None` when it does not exist.
    async fn find_sheet_id(&self) -> Result<Option<i64>, SheetError> {
        let mut url = self.url(None, &[])?;
        url.query_pairs_mut().append_pair("fields", "sheets.properties");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let spreadsheet: SpreadsheetResponse = Self::parse_response(response).await?;

        Ok(spreadsheet
            .sheets
            .into_iter()
            .find(|s| s.properties.title == self.sheet_name)
            .map(|s| s.properties.sheet_id))
    }

    async fn require_sheet_id(&self) -> Result<i64, SheetError> {
        self.find_sheet_id().await?.ok_or_else(|| {
            SheetError::Core(CoreError::NotFound {
                entity: "sheet",
                key: self.sheet_name.clone(),
            })
        })
    }

    async fn batch_update(&self, requests: serde_json::Value) -> Result<(), SheetError> {
        let url = self.url(Some("batchUpdate"), &[])?;

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&json!({ "requests": requests }))
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn put_values(&self, a1: &str, rows: Vec<Vec<String>>) -> Result<(), SheetError> {
        let range = self.range(a1);
        let mut url = self.url(None, &["values", &range])?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let response = self
            .client
            .put(url)
            .bearer_auth(&self.access_token)
            .json(&json!({ "range": range, "majorDimension": "ROWS", "values": rows }))
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    // ---- private helpers ----

    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, SheetError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(SheetError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, SheetError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl SheetBackend for GoogleSheetsBackend {
    fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    async fn ensure_sheet(&self) -> Result<(), SheetError> {
        if self.find_sheet_id().await?.is_some() {
            return Ok(());
        }

        tracing::info!(sheet = %self.sheet_name, "Creating report sheet");
        self.batch_update(json!([
            { "addSheet": { "properties": { "title": self.sheet_name } } }
        ]))
        .await
    }

    async fn clear(&self) -> Result<(), SheetError> {
        let range = quote_sheet_name(&self.sheet_name);
        let url = self.url(None, &["values", &format!("{range}:clear")])?;

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&json!({}))
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn write_row(&self, row: usize, cells: &[String]) -> Result<(), SheetError> {
        if row == 0 {
            return Err(SheetError::Layout("row 0 (rows are 1-based)".into()));
        }
        self.put_values(&format!("A{row}"), vec![cells.to_vec()]).await
    }

    async fn append_row(&self, cells: &[String]) -> Result<(), SheetError> {
        let last = column_letter(cells.len().max(1));
        let range = self.range(&format!("A:{last}"));
        let mut url = self.url(None, &["values", &format!("{range}:append")])?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "RAW")
            .append_pair("insertDataOption", "INSERT_ROWS");

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&json!({ "majorDimension": "ROWS", "values": [cells] }))
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn read_rows(
        &self,
        first_row: usize,
        columns: usize,
    ) -> Result<Vec<Vec<String>>, SheetError> {
        if first_row == 0 || columns == 0 {
            return Err(SheetError::Layout(format!(
                "row {first_row}, {columns} columns (positions are 1-based)"
            )));
        }
        self.require_sheet_id().await?;

        let range = self.range(&format!("A{first_row}:{}", column_letter(columns)));
        let mut url = self.url(None, &["values", &range])?;
        url.query_pairs_mut().append_pair("majorDimension", "ROWS");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let values: ValueRange = Self::parse_response(response).await?;

        Ok(values
            .values
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect())
    }

    async fn write_cell(&self, row: usize, column: usize, value: &str) -> Result<(), SheetError> {
        if row == 0 || column == 0 {
            return Err(SheetError::Layout(format!(
                "row {row}, column {column} (positions are 1-based)"
            )));
        }
        let a1 = format!("{}{row}", column_letter(column));
        self.put_values(&a1, vec![vec![value.to_string()]]).await
    }

    async fn format_header(&self, columns: usize) -> Result<(), SheetError> {
        let sheet_id = self.require_sheet_id().await?;
        self.batch_update(json!([
            {
                "repeatCell": {
                    "range": {
                        "sheetId": sheet_id,
                        "startRowIndex": 0,
                        "endRowIndex": 1,
                        "startColumnIndex": 0,
                        "endColumnIndex": columns
                    },
                    "cell": { "userEnteredFormat": { "textFormat": { "bold": true } } },
                    "fields": "userEnteredFormat.textFormat.bold"
                }
            },
            {
                "updateSheetProperties": {
                    "properties": {
                        "sheetId": sheet_id,
                        "gridProperties": { "frozenRowCount": 1 }
                    },
                    "fields": "gridProperties.frozenRowCount"
                }
            }
        ]))
        .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
