//! Length limiting for summary text.

/// Longest summary handed to the prompt, in characters.
pub const MAX_CHARS: usize = 1100;

/// Earliest sentence boundary worth cutting at, as a character index.
pub const MIN_PREFERRED_CHARS: usize = 800;

/// Shortens content to at most [`MAX_CHARS`] characters.
///
/// Content that fits is returned unchanged. Otherwise the first
/// [`MAX_CHARS`] characters are kept, and if the last `.` among them sits at
/// index [`MIN_PREFERRED_CHARS`] or later the text is cut right after it.
#[must_use]
pub fn trim_content(content: &str) -> String {
    let Some((cut, _)) = content.char_indices().nth(MAX_CHARS) else {
        return content.to_string();
    };
    let prefix = &content[..cut];

    let last_period = prefix
        .char_indices()
        .enumerate()
        .filter(|(_, (_, ch))| *ch == '.')
        .last();

    match last_period {
        Some((char_index, (byte_index, _))) if char_index >= MIN_PREFERRED_CHARS => {
            prefix[..=byte_index].to_string()
        }
        _ => prefix.to_string(),
    }
}
