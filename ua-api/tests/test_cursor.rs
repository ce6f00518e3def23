//! Device token cursor traversal against scripted listing pages.

mod common;

use common::{mock_client, page_response, page_url, token_of, BASE_URL};
use reqwest::Method;
use ua_api::{CursorState, RawResponse};
use ua_core::error::AirshipError;

/// Scripted pages of the given sizes, each linking to the next.
fn paged(sizes: &[usize]) -> Vec<RawResponse> {
    sizes
        .iter()
        .enumerate()
        .map(|(i, size)| {
            let next = (i + 1 < sizes.len()).then(|| page_url(i + 2));
            page_response(&format!("p{}", i + 1), *size, 100 + i as u64, next.as_deref())
        })
        .collect()
}

#[tokio::test]
async fn test_traversal_yields_every_record_in_page_order() {
    for sizes in [vec![3], vec![2, 2], vec![1, 4, 2], vec![5, 1, 1, 3]] {
        let (client, transport) = mock_client(paged(&sizes));
        let mut cursor = client.device_tokens();

        let mut seen = Vec::new();
        while cursor.has_next().await.unwrap() {
            seen.push(token_of(cursor.current().unwrap()).to_string());
            cursor.advance();
        }

        let expected: Vec<String> = sizes
            .iter()
            .enumerate()
            .flat_map(|(p, size)| (0..*size).map(move |i| format!("p{}-{i}", p + 1)))
            .collect();
        assert_eq!(seen, expected);
        assert_eq!(cursor.state(), CursorState::Exhausted);
        assert_eq!(transport.request_count(), sizes.len());
    }
}

#[tokio::test]
async fn test_pages_are_fetched_in_order_from_origin() {
    let (client, transport) = mock_client(paged(&[1, 1, 1]));
    let records = client.device_tokens().collect_remaining().await.unwrap();
    assert_eq!(records.len(), 3);

    let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(
        urls,
        vec![format!("{BASE_URL}/device_tokens/"), page_url(2), page_url(3)]
    );
    assert!(transport.requests().iter().all(|r| r.method == Method::GET));
}

#[tokio::test]
async fn test_nothing_is_fetched_until_first_access() {
    let (client, transport) = mock_client(paged(&[2]));
    let cursor = client.device_tokens();
    assert_eq!(cursor.state(), CursorState::Fresh);
    assert_eq!(cursor.reported_count(), None);
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_next_page_is_fetched_only_at_boundary() {
    let (client, transport) = mock_client(paged(&[2, 2]));
    let mut cursor = client.device_tokens();

    assert!(cursor.has_next().await.unwrap());
    cursor.advance();
    assert!(cursor.has_next().await.unwrap());
    assert_eq!(transport.request_count(), 1);

    cursor.advance();
    assert_eq!(transport.request_count(), 1, "advance must not fetch");

    assert!(cursor.has_next().await.unwrap());
    assert_eq!(transport.request_count(), 2);
    assert_eq!(token_of(cursor.current().unwrap()), "p2-0");
    assert_eq!(cursor.buffered(), 4);
}

#[tokio::test]
async fn test_empty_first_page_is_immediately_exhausted() {
    let (client, transport) = mock_client(vec![page_response("p1", 0, 0, None)]);
    let mut cursor = client.device_tokens();

    assert!(!cursor.has_next().await.unwrap());
    assert_eq!(cursor.state(), CursorState::Exhausted);
    assert!(!cursor.has_next().await.unwrap());
    assert_eq!(transport.request_count(), 1);
    assert_eq!(cursor.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_empty_intermediate_page_is_skipped() {
    let (client, _) = mock_client(paged(&[1, 0, 2]));
    let records = client.device_tokens().collect_remaining().await.unwrap();
    let tokens: Vec<&str> = records.iter().map(token_of).collect();
    assert_eq!(tokens, vec!["p1-0", "p3-0", "p3-1"]);
}

#[tokio::test]
async fn test_count_reflects_latest_page_not_a_sum() {
    let (client, _) = mock_client(vec![
        page_response("p1", 2, 50, Some(&page_url(2))),
        page_response("p2", 2, 7, None),
    ]);
    let mut cursor = client.device_tokens();

    assert_eq!(cursor.count().await.unwrap(), 50);
    cursor.advance();
    cursor.advance();
    assert!(cursor.has_next().await.unwrap());
    assert_eq!(cursor.count().await.unwrap(), 7);
    assert_eq!(cursor.reported_count(), Some(7));
}

#[tokio::test]
async fn test_count_on_fresh_cursor_fetches_origin_once() {
    let (client, transport) = mock_client(paged(&[2]));
    let mut cursor = client.device_tokens();
    assert_eq!(cursor.count().await.unwrap(), 100);
    assert!(cursor.has_next().await.unwrap());
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_restart_replays_buffer_without_fetching() {
    let (client, transport) = mock_client(paged(&[2, 2]));
    let mut cursor = client.device_tokens();

    for _ in 0..3 {
        assert!(cursor.has_next().await.unwrap());
        cursor.advance();
    }
    assert_eq!(transport.request_count(), 2);

    cursor.restart();
    assert_eq!(cursor.position(), 0);

    let mut replayed = Vec::new();
    for _ in 0..4 {
        replayed.push(cursor.next_record().await.unwrap().unwrap());
    }
    let tokens: Vec<&str> = replayed.iter().map(token_of).collect();
    assert_eq!(tokens, vec!["p1-0", "p1-1", "p2-0", "p2-1"]);
    assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn test_restart_after_exhaustion_replays_everything() {
    let (client, transport) = mock_client(paged(&[1, 2]));
    let mut cursor = client.device_tokens();
    while cursor.next_record().await.unwrap().is_some() {}
    assert_eq!(cursor.state(), CursorState::Exhausted);

    cursor.restart();
    assert_eq!(cursor.state(), CursorState::Buffered);
    let mut count = 0;
    while cursor.next_record().await.unwrap().is_some() {
        count += 1;
    }
    assert_eq!(count, 3);
    assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn test_current_without_record_is_out_of_bounds() {
    let (client, _) = mock_client(paged(&[1]));
    let mut cursor = client.device_tokens();

    assert!(matches!(
        cursor.current(),
        Err(AirshipError::OutOfBounds { position: 0, buffered: 0 })
    ));

    assert!(cursor.has_next().await.unwrap());
    cursor.advance();
    assert!(matches!(
        cursor.current(),
        Err(AirshipError::OutOfBounds { position: 1, buffered: 1 })
    ));
}

#[tokio::test]
async fn test_page_failure_is_surfaced_and_retryable() {
    let (client, transport) = mock_client(vec![
        page_response("p1", 1, 2, Some(&page_url(2))),
        RawResponse::new(500, "boom"),
        page_response("p2", 1, 2, None),
    ]);
    let mut cursor = client.device_tokens();
    assert!(cursor.next_record().await.unwrap().is_some());

    match cursor.has_next().await {
        Err(AirshipError::AirshipFailure { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(cursor.state(), CursorState::Buffered);

    assert!(cursor.has_next().await.unwrap());
    assert_eq!(token_of(cursor.current().unwrap()), "p2-0");
    assert_eq!(transport.requests()[2].url, page_url(2));
}

#[tokio::test]
async fn test_unauthorized_page_fetch() {
    let (client, _) = mock_client(vec![RawResponse::new(401, "")]);
    let mut cursor = client.device_tokens();
    assert!(matches!(
        cursor.has_next().await,
        Err(AirshipError::Unauthorized)
    ));
    assert_eq!(cursor.state(), CursorState::Fresh);
}

#[tokio::test]
async fn test_malformed_page_is_decode_error() {
    let (client, _) = mock_client(vec![RawResponse::new(200, "<html>")]);
    let mut cursor = client.device_tokens();
    assert!(matches!(
        cursor.has_next().await,
        Err(AirshipError::Decode(_))
    ));
}

#[tokio::test]
async fn test_page_without_device_tokens_is_decode_error() {
    let (client, _) = mock_client(vec![RawResponse::new(200, r#"{"error":"busy"}"#)]);
    let mut cursor = client.device_tokens();
    assert!(matches!(
        cursor.has_next().await,
        Err(AirshipError::Decode(_))
    ));
    assert_eq!(cursor.state(), CursorState::Fresh);
}

#[tokio::test]
async fn test_relative_next_page_is_resolved_against_page_url() {
    let (client, transport) = mock_client(vec![
        page_response("p1", 1, 2, Some("?page=2")),
        page_response("p2", 1, 2, None),
    ]);
    let records = client.device_tokens().collect_remaining().await.unwrap();
    assert_eq!(records.len(), 2);

    let requests = transport.requests();
    assert_eq!(requests[1].url, page_url(2));
}

#[tokio::test]
async fn test_independent_cursors_refetch_from_origin() {
    let (client, transport) = mock_client(paged(&[1]).into_iter().chain(paged(&[1])));
    let first = client.device_tokens().collect_remaining().await.unwrap();
    let second = client.device_tokens().collect_remaining().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(transport.request_count(), 2);
}
