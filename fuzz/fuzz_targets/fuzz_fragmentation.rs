#![no_main]

use arbitrary::Arbitrary;
use http11_lite::RequestParser;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    data: Vec<u8>,
    splits: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let mut whole = RequestParser::new();
    let expected = whole.feed_events(&input.data);

    // splits の各値をチャンク長として使う (0 は空チャンク)
    let mut parser = RequestParser::new();
    let mut events = Vec::new();
    let mut rest = input.data.as_slice();
    for &n in &input.splits {
        let n = (n as usize).min(rest.len());
        let (chunk, tail) = rest.split_at(n);
        events.extend(parser.feed_events(chunk));
        rest = tail;
    }
    events.extend(parser.feed_events(rest));

    assert_eq!(events, expected);
    assert_eq!(parser.pending_len(), whole.pending_len());
});
