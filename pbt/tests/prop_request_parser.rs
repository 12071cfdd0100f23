//! RequestParser のプロパティテスト (parser/request.rs)

use http11_lite::{ConnectionMode, ErrorKind, Method, ParseEvent, RequestParser};
use pbt::{
    header_block, request_bytes, resource_path, split_points, supported_method, unsupported_method,
};
use proptest::prelude::*;

// ========================================
// ヘルパー
// ========================================

/// 呼び出し側プロトコル (feed → 空 feed で排出 → reset) で 1 チャンクを処理
fn drive(parser: &mut RequestParser, chunk: &[u8]) -> Vec<ParseEvent> {
    let mut events = Vec::new();
    parser.feed(chunk);
    loop {
        if let Some(kind) = parser.error_kind() {
            events.push(ParseEvent::Error(kind));
            parser.reset_for_next_request();
        } else if let Some(request) = parser.take_completed_request() {
            events.push(ParseEvent::Request(request));
            parser.reset_for_next_request();
        } else if !parser.line_just_parsed() {
            break;
        }
        parser.feed(b"");
    }
    events
}

fn drive_split(input: &[u8], splits: &[usize]) -> Vec<ParseEvent> {
    let mut parser = RequestParser::new();
    let mut events = Vec::new();
    let mut start = 0;
    for &end in splits.iter().chain(std::iter::once(&input.len())) {
        events.extend(drive(&mut parser, &input[start..end]));
        start = end;
    }
    events
}

fn concat_with_splits() -> impl Strategy<Value = (Vec<u8>, Vec<usize>)> {
    proptest::collection::vec(request_bytes(), 1..4)
        .prop_map(|requests| requests.concat())
        .prop_flat_map(|input| {
            let len = input.len();
            (Just(input), split_points(len))
        })
}

// ========================================
// 分割耐性
// ========================================

proptest! {
    #[test]
    fn fragmentation_invariance((input, splits) in concat_with_splits()) {
        let expected = drive_split(&input, &[]);
        let actual = drive_split(&input, &splits);
        prop_assert_eq!(actual, expected);
    }
}

proptest! {
    #[test]
    fn byte_by_byte_invariance(input in request_bytes()) {
        let expected = drive_split(&input, &[]);
        let splits: Vec<usize> = (1..input.len()).collect();
        prop_assert_eq!(drive_split(&input, &splits), expected);
    }
}

proptest! {
    #[test]
    fn feed_events_matches_manual_protocol((input, splits) in concat_with_splits()) {
        let expected = drive_split(&input, &[]);

        let mut parser = RequestParser::new();
        let mut events = Vec::new();
        let mut start = 0;
        for &end in splits.iter().chain(std::iter::once(&input.len())) {
            events.extend(parser.feed_events(&input[start..end]));
            start = end;
        }
        prop_assert_eq!(events, expected);
    }
}

// ========================================
// 分類
// ========================================

proptest! {
    #[test]
    fn valid_request_is_parsed(
        method in supported_method(),
        path in resource_path(),
        headers in header_block()
    ) {
        let mut input = format!("{method} {path} HTTP/1.1\r\n");
        for header in &headers {
            input.push_str(header);
            input.push_str("\r\n");
        }
        input.push_str("\r\n");

        let events = drive_split(input.as_bytes(), &[]);
        prop_assert_eq!(events.len(), 1);
        let ParseEvent::Request(request) = &events[0] else {
            return Err(TestCaseError::fail(format!("unexpected event: {:?}", events[0])));
        };

        let expected_method = if method == "GET" { Method::Get } else { Method::Head };
        let expected_connection = if headers
            .iter()
            .any(|h| matches!(h.as_str(), "Connection: close" | "Connection:   close   "))
        {
            ConnectionMode::Close
        } else {
            ConnectionMode::KeepAlive
        };
        prop_assert_eq!(request.method, expected_method);
        prop_assert_eq!(request.connection, expected_connection);
        prop_assert_eq!(&request.path, &path);
    }
}

proptest! {
    #[test]
    fn unsupported_method_is_reported_first(method in unsupported_method(), path in resource_path()) {
        let input = format!("{method} {path} HTTP/1.1\r\n\r\n");
        let events = drive_split(input.as_bytes(), &[]);
        prop_assert_eq!(&events[0], &ParseEvent::Error(ErrorKind::UnsupportedFunctionality));
    }
}

proptest! {
    #[test]
    fn nonzero_content_length_is_malformed(value in "0{0,3}[1-9][0-9]{0,6}") {
        let input = format!("GET / HTTP/1.1\r\nContent-Length: {value}\r\n\r\n");
        let events = drive_split(input.as_bytes(), &[]);
        prop_assert_eq!(&events[0], &ParseEvent::Error(ErrorKind::MalformedRequest));
    }
}

// ========================================
// 任意入力
// ========================================

proptest! {
    #[test]
    fn arbitrary_bytes_are_handled(
        data in proptest::collection::vec(any::<u8>(), 0..256),
        chunk_size in 1usize..32
    ) {
        let mut parser = RequestParser::new();
        let mut fed = 0;
        for chunk in data.chunks(chunk_size) {
            parser.feed_events(chunk);
            fed += chunk.len();
            prop_assert!(parser.pending_len() <= fed);
            prop_assert!(!parser.has_error());
            prop_assert!(parser.take_completed_request().is_none());
        }

        // 分割しても同じ結果になる
        let splits: Vec<usize> = (chunk_size..data.len()).step_by(chunk_size).collect();
        prop_assert_eq!(drive_split(&data, &splits), drive_split(&data, &[]));
    }
}
