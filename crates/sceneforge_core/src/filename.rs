//! Display filenames for generated scene images.

const ILLEGAL: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];
const SUMMARY_WORDS: usize = 6;
const EDGE_WORDS: usize = 3;

/// Derive the image filename for a scene.
///
/// The name is `S` + the zero-padded scene index + `_` + a short summary of the
/// scene text + `.png`. Texts of up to six words are used whole; longer texts
/// keep their first and last three words around an ellipsis. Characters that are
/// illegal in filenames are removed first.
///
/// # Examples
///
/// ```
/// use sceneforge_core::scene_filename;
///
/// assert_eq!(scene_filename(1, "hello world"), "S001_hello world.png");
/// assert_eq!(scene_filename(1, "a b c d e f g h"), "S001_a b c...f g h.png");
/// ```
pub fn scene_filename(index: usize, text: &str) -> String {
    let cleaned: String = text
        .replace('\n', " ")
        .trim()
        .chars()
        .filter(|c| !ILLEGAL.contains(c))
        .collect();
    let words: Vec<&str> = cleaned.split_whitespace().collect();

    let summary = if words.len() <= SUMMARY_WORDS {
        words.join(" ")
    } else {
        format!(
            "{}...{}",
            words[..EDGE_WORDS].join(" "),
            words[words.len() - EDGE_WORDS..].join(" ")
        )
    };

    format!("S{index:03}_{summary}.png")
}
