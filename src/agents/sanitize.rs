//! Output sanitization for model replies.
//!
//! Reasoning models (DeepSeek-R1 and friends) emit their chain of thought
//! inline, wrapped in `<think>...</think>`. None of it is meant for the user.

use regex::Regex;
use std::sync::LazyLock;

static THINK_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<think>.*?</think>").expect("think-tag pattern is valid"));

/// Remove every `<think>...</think>` block, then trim surrounding whitespace.
///
/// Removal repeats until no block is left, since deleting one block can splice
/// a new one together out of the surrounding text.
pub fn strip_think_tags(raw: &str) -> String {
    let mut text = raw.to_string();
    while THINK_BLOCK.is_match(&text) {
        text = THINK_BLOCK.replace_all(&text, "").into_owned();
    }
    text.trim().to_string()
}
