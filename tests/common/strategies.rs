use proptest::prelude::*;

/// Operations on the comment fixture that each carry a condition
pub const CONSTRAINED_OPERATIONS: &[&str] = &[
    "snarky",
    "smart",
    "by_post_title",
    "by_author",
    "by_author_with_post",
    "preloading_author",
];

/// A non-empty, duplicate-free selection of operations in random order
pub fn operation_selection_strategy() -> impl Strategy<Value = Vec<&'static str>> {
    proptest::sample::subsequence(CONSTRAINED_OPERATIONS.to_vec(), 1..=CONSTRAINED_OPERATIONS.len())
        .prop_shuffle()
}

/// Words usable as full-text fragments
pub fn vector_word_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,12}"
}

/// A comma-separated search string with blank fragments sprinkled in, and the
/// non-blank words it contains
pub fn vector_search_strategy() -> impl Strategy<Value = (String, Vec<String>)> {
    prop::collection::vec(prop::option::weighted(0.75, vector_word_strategy()), 0..8).prop_map(
        |fragments| {
            let words: Vec<String> = fragments.iter().flatten().cloned().collect();
            let search = fragments
                .iter()
                .map(|fragment| match fragment {
                    Some(word) => format!(" {word} "),
                    None => "  ".to_string(),
                })
                .collect::<Vec<_>>()
                .join(",");
            (search, words)
        },
    )
}
