use super::*;
use pretty_assertions::assert_eq;
use std::borrow::Cow;

#[test]
fn test_encode_html_escapes_markup() {
    assert_eq!(
        encode_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
        "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
    );
}

#[test]
fn test_encode_html_borrows_clean_text() {
    assert!(matches!(encode_html("plain text"), Cow::Borrowed(_)));
}

#[test]
fn test_raw_encoder_is_verbatim() {
    assert_eq!(TextEncoder::Raw.encode("<b>"), "<b>");
    assert_eq!(TextEncoder::Html.encode("<b>"), "&lt;b&gt;");
    assert_eq!(TextEncoder::default(), TextEncoder::Html);
}

#[test]
fn test_string_sink_appends() {
    let mut sink = String::from("a");
    sink.write_text("b").unwrap();
    sink.write_text("c").unwrap();
    assert_eq!(sink, "abc");
}

#[test]
fn test_io_sink_writes_utf8() {
    let mut sink = IoSink::new(Vec::new());
    sink.write_text("héllo").unwrap();
    assert_eq!(sink.get_ref().len(), 6);
    assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "héllo");
}
