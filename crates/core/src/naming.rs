//! Field-name normalization.
//!
//! Validators report field names in whatever convention the type was written
//! in (`firstName`, `FirstName`, `first-name`). Violations always carry the
//! lower-case snake_case form so clients see one stable key per field.

/// Convert a single identifier to lower-case snake_case.
///
/// Word boundaries are a lower-case letter or digit followed by an upper-case
/// letter, the last capital of an acronym run (`HTTPServer` -> `http_server`),
/// and any non-alphanumeric separator.
///
/// ```
/// use reqcheck_core::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("FirstName"), "first_name");
/// assert_eq!(to_snake_case("avatar-url"), "avatar_url");
/// assert_eq!(to_snake_case("HTTPServer"), "http_server");
/// ```
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }

        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
        }

        out.extend(c.to_lowercase());
    }

    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Normalize a dotted field path (`Address.ZipCode`, `items[2].Name`),
/// converting each segment and leaving list indices untouched.
pub fn normalize_field_path(path: &str) -> String {
    path.split('.')
        .map(|segment| match segment.find('[') {
            Some(idx) => format!("{}{}", to_snake_case(&segment[..idx]), &segment[idx..]),
            None => to_snake_case(segment),
        })
        .collect::<Vec<_>>()
        .join(".")
}
