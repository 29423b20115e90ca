//! Filename rules deciding which files belong to a mod and whether it is enabled

/// Extensions the game loads mod content from
pub const VALID_EXTENSIONS: [&str; 3] = [".pak", ".utoc", ".ucas"];

/// Tag the game expects right before the extension of a loadable mod file
pub const ENABLED_TAG: &str = "_P";

/// Marker inserted into the stem to hide a file from the game
pub const DISABLED_MARKER: &str = "_Disabled";

/// Split a file name into stem and extension (extension keeps its dot).
///
/// A leading dot does not start an extension, so `.pak` has no extension.
pub fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => file_name.split_at(idx),
        _ => (file_name, ""),
    }
}

/// Check if the file is a mod file the game will currently load
pub fn is_active(file_name: &str) -> bool {
    VALID_EXTENSIONS
        .iter()
        .any(|ext| {
            file_name
                .strip_suffix(ext)
                .is_some_and(|stem| stem.ends_with(ENABLED_TAG))
        })
}

/// Check if the file carries the disabled marker
pub fn is_disabled(file_name: &str) -> bool {
    file_name.contains(DISABLED_MARKER)
}

/// Check if the file should show up in the mod list at all
pub fn is_tracked(file_name: &str) -> bool {
    is_active(file_name) || is_disabled(file_name)
}

/// Name the file gets once disabled: the marker goes before the extension
pub fn disabled_name(file_name: &str) -> String {
    let (stem, ext) = split_extension(file_name);
    format!("{stem}{DISABLED_MARKER}{ext}")
}

/// Name the file gets once enabled: every marker is removed
pub fn enabled_name(file_name: &str) -> String {
    file_name.replace(DISABLED_MARKER, "")
}

/// Identifier shared by every file of one mod, enabled or not
pub fn mod_identifier(file_name: &str) -> String {
    let enabled = enabled_name(file_name);
    split_extension(&enabled).0.to_string()
}
