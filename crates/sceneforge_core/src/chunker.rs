//! Sentence-bounded script chunking.

const TERMINATORS: [char; 3] = ['.', '?', '!'];

/// Split a script into ordered scene chunks of roughly `max_chunk_chars` characters.
///
/// Sentences end after `.`, `?` or `!`. Sentences are joined with a single space
/// until appending the next one would bring the running chunk to the limit, at
/// which point the chunk is closed and the sentence opens a new one. The running
/// length includes the leading separator, so a chunk can exceed the limit by up
/// to one sentence. A single sentence longer than the limit becomes its own
/// chunk and is never cut.
///
/// # Examples
///
/// ```
/// use sceneforge_core::split_script;
///
/// let chunks = split_script("One. Two? Three!", 8);
/// assert_eq!(chunks, vec!["One.", "Two?", "Three!"]);
///
/// assert!(split_script("   ", 100).is_empty());
/// ```
pub fn split_script(script: &str, max_chunk_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for sentence in sentences(script) {
        let sentence_len = sentence.chars().count();
        if current_len + sentence_len < max_chunk_chars {
            current.push(' ');
            current.push_str(sentence);
            current_len += sentence_len + 1;
        } else {
            push_trimmed(&mut chunks, &current);
            current = sentence.to_string();
            current_len = sentence_len;
        }
    }
    push_trimmed(&mut chunks, &current);

    chunks
}

/// Trimmed, non-empty sentence candidates in script order.
fn sentences(script: &str) -> impl Iterator<Item = &str> {
    script
        .split_inclusive(TERMINATORS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn push_trimmed(chunks: &mut Vec<String>, chunk: &str) {
    let chunk = chunk.trim();
    if !chunk.is_empty() {
        chunks.push(chunk.to_string());
    }
}
