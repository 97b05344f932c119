use std::borrow::Cow;

/// Rewrites four-character hydrogen names from the `H###` topology convention to the `###H`
/// convention used by structure files, e.g. `H12A` becomes `12AH`.
///
/// Any other name is returned unchanged.
pub fn normalize_hydrogen_name(name: &str) -> Cow<'_, str> {
    let mut chars = name.chars();
    match (chars.next(), name.chars().count()) {
        (Some('H'), 4) => Cow::Owned(format!("{}H", chars.as_str())),
        _ => Cow::Borrowed(name),
    }
}
