//! Integration tests for `GoogleSheetsClient` and `SheetWriter` against a
//! mocked Sheets v4 API.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shelfscan_core::{ProductRecord, SiteId};
use shelfscan_sheets::{GoogleSheetsClient, RowSchema, RowStore, SheetWriter, SheetsError, WriteMode};

const SHEET_ID: &str = "sheet-123";

fn test_client(server: &MockServer) -> GoogleSheetsClient {
    GoogleSheetsClient::new(&server.uri(), SHEET_ID, "test-token", 5)
        .expect("failed to build test GoogleSheetsClient")
}

fn values_path(range: &str) -> String {
    format!("/v4/spreadsheets/{SHEET_ID}/values/{range}")
}

fn record(name: &str) -> ProductRecord {
    let mut record = ProductRecord::empty(SiteId::Amazon, "https://www.amazon.com/dp/B0001");
    record.name = name.to_string();
    record.price_raw = "$19.99".to_string();
    record.price = "19.99".to_string();
    record
}

#[tokio::test]
async fn append_posts_raw_rows_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(values_path("%27Compras%27!A1:append")))
        .and(header("authorization", "Bearer test-token"))
        .and(query_param("valueInputOption", "RAW"))
        .and(query_param("insertDataOption", "INSERT_ROWS"))
        .and(body_partial_json(json!({
            "majorDimension": "ROWS",
            "values": [["a", "b"], ["c", "d"]]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"updates": {"updatedRows": 2}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let written = test_client(&server)
        .append_rows(
            "Compras",
            &[
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string(), "d".to_string()],
            ],
        )
        .await
        .expect("append succeeds");

    assert_eq!(written, 2);
}

#[tokio::test]
async fn write_rows_at_puts_exact_range() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(values_path("%27Compras%27!A6:B7")))
        .and(query_param("valueInputOption", "RAW"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"updatedRows": 2})))
        .expect(1)
        .mount(&server)
        .await;

    let written = test_client(&server)
        .write_rows_at(
            "Compras",
            6,
            &[
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string(), "d".to_string()],
            ],
        )
        .await
        .unwrap();

    assert_eq!(written, 2);
}

#[tokio::test]
async fn write_row_batch_sends_one_range_per_row() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/v4/spreadsheets/{SHEET_ID}/values:batchUpdate")))
        .and(body_partial_json(json!({
            "valueInputOption": "RAW",
            "data": [
                {"range": "'Compras'!A3:B3", "values": [["x", "y"]]},
                {"range": "'Compras'!A9:B9", "values": [["z", "w"]]}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"totalUpdatedRows": 2})))
        .expect(1)
        .mount(&server)
        .await;

    let written = test_client(&server)
        .write_row_batch(
            "Compras",
            &[
                (3, vec!["x".to_string(), "y".to_string()]),
                (9, vec!["z".to_string(), "w".to_string()]),
            ],
        )
        .await
        .unwrap();

    assert_eq!(written, 2);
}

#[tokio::test]
async fn read_column_skips_blank_cells_and_keeps_row_numbers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(values_path("%27Compras%27!H3:H")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": "Compras!H3:H1000",
            "majorDimension": "ROWS",
            "values": [
                ["https://www.amazon.com/dp/B0001"],
                [],
                ["   "],
                [" https://www.ebay.com/itm/2 "]
            ]
        })))
        .mount(&server)
        .await;

    let cells = test_client(&server)
        .read_column("Compras", "H", 3)
        .await
        .unwrap();

    assert_eq!(
        cells,
        vec![
            (3, "https://www.amazon.com/dp/B0001".to_string()),
            (6, "https://www.ebay.com/itm/2".to_string()),
        ]
    );
}

#[tokio::test]
async fn used_row_count_of_empty_sheet_is_zero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(values_path("%27Compras%27")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"range": "Compras!A1:Z1000"})))
        .mount(&server)
        .await;

    let used = test_client(&server).used_row_count("Compras").await.unwrap();
    assert_eq!(used, 0);
}

#[tokio::test]
async fn api_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {"code": 403, "message": "The caller does not have permission", "status": "PERMISSION_DENIED"}
        })))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .used_row_count("Compras")
        .await
        .unwrap_err();

    match err {
        SheetsError::Api {
            status, message, ..
        } => {
            assert_eq!(status, 403);
            assert_eq!(message, "The caller does not have permission");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn fixed_header_writer_reads_used_rows_then_writes_below() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(values_path("%27Compras%27")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "values": [["title"], [], [], [], ["header"], ["row 6"], ["row 7"]]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(values_path("%27Compras%27!A8:E8")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"updatedRows": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let writer = SheetWriter::new(
        test_client(&server),
        "Compras",
        RowSchema::Basic,
        WriteMode::FixedHeader { header_row: 5 },
    );
    let written = writer.write(&[record("Widget")]).await.unwrap();
    assert_eq!(written, 1);
}

#[tokio::test]
async fn header_row_is_written_at_row_five() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(values_path("%27Compras%27!A5:AM5")))
        .and(body_partial_json(json!({"range": "'Compras'!A5:AM5"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"updatedRows": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let writer = SheetWriter::new(
        test_client(&server),
        "Compras",
        RowSchema::Detailed,
        WriteMode::Append,
    );
    assert_eq!(writer.write_header().await.unwrap(), 1);
}
