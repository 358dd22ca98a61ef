//! Path helpers for archive entry names.
//!
//! Entry paths come from the archive's own directory and use `\` as the
//! separator, while test fixtures and other tools tend to use `/`. These
//! helpers accept both and never touch the filesystem.

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Returns the last component of an entry path.
///
/// `Data\Libs\Config\Mappings\layout_gamepad.xml` yields `layout_gamepad.xml`.
pub fn file_name(path: &str) -> &str {
    path.rsplit(is_separator).next().unwrap_or(path)
}

/// Returns everything before the last separator, or `""` for a bare name.
pub fn parent_dir(path: &str) -> &str {
    match path.rfind(is_separator) {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Returns the name of the directory holding the entry, with any extension
/// removed.
///
/// `Data\Localization\english\global.ini` yields `english`. Returns `None`
/// when the entry sits at the archive root.
pub fn parent_name(path: &str) -> Option<&str> {
    let parent = parent_dir(path);
    if parent.is_empty() {
        return None;
    }
    let name = file_name(parent);
    let stem = match name.rfind('.') {
        Some(0) | None => name,
        Some(idx) => &name[..idx],
    };
    (!stem.is_empty()).then_some(stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_backslash() {
        assert_eq!(
            file_name(r"Data\Libs\Config\Mappings\layout_gamepad.xml"),
            "layout_gamepad.xml"
        );
    }

    #[test]
    fn file_name_forward_slash_and_bare() {
        assert_eq!(file_name("Data/Libs/defaultProfile.xml"), "defaultProfile.xml");
        assert_eq!(file_name("defaultProfile.xml"), "defaultProfile.xml");
    }

    #[test]
    fn parent_dir_variants() {
        assert_eq!(
            parent_dir(r"Data\Localization\english\global.ini"),
            r"Data\Localization\english"
        );
        assert_eq!(parent_dir("global.ini"), "");
    }

    #[test]
    fn parent_name_is_language_directory() {
        assert_eq!(parent_name(r"Data\Localization\english\global.ini"), Some("english"));
        assert_eq!(
            parent_name("Data/Localization/german_(germany)/global.ini"),
            Some("german_(germany)")
        );
    }

    #[test]
    fn parent_name_strips_extension() {
        assert_eq!(parent_name(r"Data\Localization\french.lang\global.ini"), Some("french"));
    }

    #[test]
    fn parent_name_at_root_is_none() {
        assert_eq!(parent_name("global.ini"), None);
        assert_eq!(parent_name(r"\global.ini"), None);
    }
}
