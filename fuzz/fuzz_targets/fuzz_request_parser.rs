#![no_main]

use http11_lite::{ParseEvent, RequestParser, Response};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut parser = RequestParser::new();

    // 1 行ずつの API で排出
    parser.feed(data);
    while parser.line_just_parsed() {
        if parser.has_error() || parser.is_request_complete() {
            let _ = parser.take_completed_request();
            parser.reset_for_next_request();
        }
        parser.feed(&[]);
    }

    // イベント API
    parser.reset_connection();
    for event in parser.feed_events(data) {
        let response = match event {
            ParseEvent::Request(request) => {
                assert!(request.path.starts_with('/'));
                Response::new(200, "OK").omit_body(request.is_head())
            }
            ParseEvent::Error(kind) => Response::from_error(kind),
        };
        let _ = response.encode();
    }
    assert!(parser.pending_len() <= data.len());
});
