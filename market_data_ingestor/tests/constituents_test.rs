use std::time::Duration;

use market_data_ingestor::constituents::{ConstituentError, ConstituentScraper};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BOARD: &str = r#"<html><body><table><tbody>
<tr><td>ACB</td><td>24.1</td></tr>
<tr><td>BID*</td><td>45.0</td></tr>
<tr><td>VN30</td><td>1320</td></tr>
</tbody></table></body></html>"#;

fn scraper(server: &MockServer, suffix: bool) -> ConstituentScraper {
    ConstituentScraper::new(
        format!("{}/board", server.uri()),
        suffix,
        Duration::from_secs(5),
        "findash-test",
    )
    .expect("scraper")
}

#[tokio::test]
async fn fetches_board_with_yahoo_suffix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/board"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BOARD))
        .mount(&server)
        .await;

    assert_eq!(scraper(&server, true).fetch().await.unwrap(), vec!["ACB.VN", "BID.VN"]);
    assert_eq!(scraper(&server, false).fetch().await.unwrap(), vec!["ACB", "BID"]);
}

#[tokio::test]
async fn empty_board_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let err = scraper(&server, true).fetch().await.unwrap_err();
    assert!(matches!(err, ConstituentError::Empty { .. }));
}

#[tokio::test]
async fn server_error_is_reported_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = scraper(&server, true).fetch().await.unwrap_err();
    assert!(matches!(err, ConstituentError::Status { status: 503, .. }));
}
