//! Localization file filtering.

use pak_common::parent_name;

/// Keeps the `tag=value` lines whose tag starts with `prefix`.
///
/// The tag is the text before the first `=`. Kept lines are copied verbatim
/// and each is terminated by `\n`. Lines without `=` are dropped, as is a
/// leading byte-order mark.
pub fn filter_ui_strings(text: &str, prefix: &str) -> String {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut out = String::new();
    for line in text.lines() {
        if let Some((tag, _)) = line.split_once('=') {
            if tag.starts_with(prefix) {
                out.push_str(line);
                out.push('\n');
            }
        }
    }
    out
}

/// Derives the language code of a localization entry from its parent
/// directory name.
pub fn language_code(entry_path: &str) -> Option<&str> {
    parent_name(entry_path)
}
