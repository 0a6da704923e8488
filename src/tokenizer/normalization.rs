// Sentence normalization for line-oriented output.
// Every served sentence must fit on a single protocol line.

/// Normalize a sentence by collapsing interior hard line breaks and whitespace runs
/// into single spaces and trimming both ends. `\r\n` counts as one break.
pub fn normalize_sentence(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    normalize_sentence_into(text, &mut result);
    result
}

/// Normalize into a supplied buffer so batch callers can reuse one allocation.
pub fn normalize_sentence_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    for (i, word) in text.split_whitespace().enumerate() {
        if i > 0 {
            buffer.push(' ');
        }
        buffer.push_str(word);
    }
}
