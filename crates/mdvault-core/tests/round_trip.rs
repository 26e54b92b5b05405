//! Property tests for the frontmatter codec

use mdvault_core::{coerce, parse_document, serialize_document, FrontmatterValue, Metadata};
use proptest::prelude::*;

fn scalar() -> impl Strategy<Value = FrontmatterValue> {
    prop_oneof![
        Just(FrontmatterValue::Null),
        any::<bool>().prop_map(FrontmatterValue::Bool),
        any::<i64>().prop_map(FrontmatterValue::Integer),
        (i64::MAX as u64 + 1..=u64::MAX).prop_map(FrontmatterValue::Unsigned),
        (-1.0e6f64..1.0e6).prop_map(FrontmatterValue::Float),
        "\\PC{0,16}".prop_map(FrontmatterValue::String),
        "[a-z ]{1,12}".prop_map(FrontmatterValue::String),
        (2000i32..2100, 1u32..13, 1u32..29)
            .prop_map(|(y, m, d)| FrontmatterValue::String(format!("{y:04}-{m:02}-{d:02}"))),
        (2000i32..2100, 1u32..13, 1u32..29, 0u32..24, 0u32..60).prop_map(|(y, m, d, h, mi)| {
            FrontmatterValue::String(format!("{y:04}-{m:02}-{d:02}T{h:02}:{mi:02}:00"))
        }),
    ]
}

fn value() -> impl Strategy<Value = FrontmatterValue> {
    scalar().prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(FrontmatterValue::List),
            prop::collection::vec(("[a-z_]{1,8}", inner), 0..4)
                .prop_map(|entries| FrontmatterValue::Map(entries.into_iter().collect())),
        ]
    })
}

fn metadata() -> impl Strategy<Value = Metadata> {
    prop::collection::vec(("[a-z_]{1,10}", value()), 0..6)
        .prop_map(|entries| entries.into_iter().collect())
}

fn body() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-zA-Z #\\-\\[\\]\n]{0,80}",
        Just("---\nnot frontmatter\n".to_string()),
    ]
}

fn coerced(metadata: &Metadata) -> Metadata {
    metadata
        .iter()
        .map(|(k, v)| (k.to_string(), coerce(v.clone())))
        .collect()
}

proptest! {
    #[test]
    fn prop_serialize_then_parse_round_trips(metadata in metadata(), body in body()) {
        let text = serialize_document(&metadata, &body).unwrap();
        let doc = parse_document(&text).unwrap();
        prop_assert_eq!(doc.metadata, coerced(&metadata));
        prop_assert_eq!(doc.body, body);
    }

    #[test]
    fn prop_parse_then_serialize_is_stable(metadata in metadata(), body in body()) {
        let text = serialize_document(&metadata, &body).unwrap();
        let doc = parse_document(&text).unwrap();
        prop_assert_eq!(serialize_document(&doc.metadata, &doc.body).unwrap(), text);
    }
}
