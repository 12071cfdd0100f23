//! PBT テスト共通ユーティリティ

use proptest::prelude::*;

// ========================================
// リクエスト要素の生成
// ========================================

/// パス: `/` の後に英数字と `.` `-` `/` (0-32 文字)
pub fn resource_path() -> impl Strategy<Value = String> {
    "/[a-zA-Z0-9./-]{0,32}".prop_map(|s| s)
}

/// サポートするメソッド
pub fn supported_method() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("GET"), Just("HEAD")]
}

/// サポートしないが空白を含まないメソッドトークン
pub fn unsupported_method() -> impl Strategy<Value = String> {
    "[!-~]{1,10}".prop_filter("supported method", |m| m != "GET" && m != "HEAD")
}

/// パース結果に影響しないヘッダー行
pub fn ignored_header() -> impl Strategy<Value = String> {
    (
        "[A-Za-z][A-Za-z0-9-]{0,15}".prop_filter("special header", |name| {
            name != "Connection" && name != "connection" && name != "Content-Length"
        }),
        // `/` を含めるとリクエストライン形式になり得るので除外する
        "[a-zA-Z0-9 ,;=*]{0,32}",
    )
        .prop_map(|(name, value)| format!("{name}: {value}"))
}

/// 1 リクエスト分のヘッダー行の並び (リクエストラインと空行は含まない)
pub fn header_block() -> impl Strategy<Value = Vec<String>> {
    (
        proptest::collection::vec(ignored_header(), 0..4),
        proptest::option::of(prop_oneof![
            Just("Connection: close".to_string()),
            Just("connection:keep-alive".to_string()),
            Just("Connection:   close   ".to_string()),
        ]),
        proptest::option::of("Content-Length:[ \t]{0,2}0{1,4}[ \t]{0,2}"),
    )
        .prop_map(|(mut headers, connection, content_length)| {
            headers.extend(connection);
            headers.extend(content_length);
            headers
        })
}

/// 任意のリクエスト (有効・無効を問わない) をバイト列として生成
pub fn request_bytes() -> impl Strategy<Value = Vec<u8>> {
    (
        prop_oneof![
            3 => supported_method().prop_map(|m| m.to_string()),
            1 => unsupported_method(),
        ],
        resource_path(),
        header_block(),
        proptest::option::of("[ -~]{0,16}"),
    )
        .prop_map(|(method, path, headers, junk)| {
            let mut out = format!("{method} {path} HTTP/1.1\r\n");
            for header in headers {
                out.push_str(&header);
                out.push_str("\r\n");
            }
            if let Some(junk) = junk {
                out.push_str(&junk);
                out.push_str("\r\n");
            }
            out.push_str("\r\n");
            out.into_bytes()
        })
}

/// 分割位置 (昇順、重複なし) を生成
pub fn split_points(len: usize) -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::btree_set(0..=len, 0..8).prop_map(|set| set.into_iter().collect())
}
