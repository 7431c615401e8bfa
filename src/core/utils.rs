//! String transformation utilities shared by the generator and its templates

/// Converts a string to snake_case.
///
/// Handles camelCase, PascalCase, kebab-case and space-separated input.
///
/// # Examples
/// ```
/// use protoc_gen_tmpl::core::utils::to_snake_case;
///
/// assert_eq!(to_snake_case("GetUserRequest"), "get_user_request");
/// assert_eq!(to_snake_case("getUserRequest"), "get_user_request");
/// assert_eq!(to_snake_case("get-user-request"), "get_user_request");
/// assert_eq!(to_snake_case("HTTPResponse"), "http_response");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::new();
    let mut prev_is_lowercase = false;
    let mut prev_is_uppercase = false;

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() {
            // `HTTPResponse`: the last capital of a run starts the next word
            let ends_acronym =
                prev_is_uppercase && chars.get(i + 1).is_some_and(|next| next.is_lowercase());
            if prev_is_lowercase || ends_acronym {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
            prev_is_lowercase = false;
            prev_is_uppercase = true;
        } else if ch.is_alphanumeric() {
            result.push(ch);
            prev_is_lowercase = ch.is_lowercase() || ch.is_ascii_digit();
            prev_is_uppercase = false;
        } else if ch == '-' || ch == '_' || ch == ' ' || ch == '.' {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            prev_is_lowercase = false;
            prev_is_uppercase = false;
        }
    }

    result.trim_matches('_').to_string()
}

/// Converts a string to PascalCase by normalizing through snake_case first.
///
/// # Examples
/// ```
/// use protoc_gen_tmpl::core::utils::to_proper_case;
///
/// assert_eq!(to_proper_case("get_user_request"), "GetUserRequest");
/// assert_eq!(to_proper_case("get-user-request"), "GetUserRequest");
/// ```
pub fn to_proper_case(s: &str) -> String {
    to_snake_case(s)
        .split('_')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect()
}

/// Converts a string to lowerCamelCase.
pub fn to_camel_case(s: &str) -> String {
    let proper = to_proper_case(s);
    let mut chars = proper.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// Converts a string to kebab-case.
pub fn to_kebab_case(s: &str) -> String {
    to_snake_case(s).replace('_', "-")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Strips the extension of the final path element.
///
/// Only the last element is considered, so dots in directory names are kept.
///
/// # Examples
/// ```
/// use protoc_gen_tmpl::core::utils::trim_ext;
///
/// assert_eq!(trim_ext("foo/bar.schema"), "foo/bar");
/// assert_eq!(trim_ext("v1.2/service"), "v1.2/service");
/// ```
pub fn trim_ext(path: &str) -> &str {
    let base_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[base_start..].rfind('.') {
        Some(dot) => &path[..base_start + dot],
        None => path,
    }
}

/// Returns the final element of a slash-separated path.
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Returns the directory portion of a slash-separated path, empty for bare names.
pub fn dir_name(path: &str) -> &str {
    path.rfind('/').map_or("", |i| &path[..i])
}

/// Computes the path to `to` relative to the directory `from_dir`.
///
/// Both arguments are slash-separated and relative to the same root. `.`
/// segments are dropped and `..` folds into the segment before it.
pub fn relative_path(from_dir: &str, to: &str) -> String {
    let from = normalize_segments(from_dir);
    let target = normalize_segments(to);

    let common = from
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();
    // the final target element is a file, never a shared directory
    let common = common.min(target.len().saturating_sub(1));

    let mut parts: Vec<&str> = vec![".."; from.len() - common];
    parts.extend(&target[common..]);
    parts.join("/")
}

fn normalize_segments(path: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." if segments.last().is_some_and(|last| *last != "..") => {
                segments.pop();
            }
            segment => segments.push(segment),
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("findPetsByStatus"), "find_pets_by_status");
        assert_eq!(to_snake_case("FindPetsByStatus"), "find_pets_by_status");
        assert_eq!(to_snake_case("find-pets-by-status"), "find_pets_by_status");
        assert_eq!(to_snake_case("find_pets_by_status"), "find_pets_by_status");
        assert_eq!(to_snake_case("HTTPResponse"), "http_response");
        assert_eq!(to_snake_case("GetHTTPRequest"), "get_http_request");
        assert_eq!(to_snake_case("UserID"), "user_id");
        assert_eq!(to_snake_case("get HTTP Response"), "get_http_response");
        assert_eq!(to_snake_case("pkg.UserService"), "pkg_user_service");
    }

    #[test]
    fn test_to_proper_case() {
        assert_eq!(to_proper_case("find_pets_by_status"), "FindPetsByStatus");
        assert_eq!(to_proper_case("findPetsByStatus"), "FindPetsByStatus");
        assert_eq!(to_proper_case("FIND_PETS_BY_STATUS"), "FindPetsByStatus");
        assert_eq!(to_proper_case("http_response"), "HttpResponse");
    }

    #[test]
    fn test_to_camel_and_kebab_case() {
        assert_eq!(to_camel_case("user_service"), "userService");
        assert_eq!(to_camel_case("UserService"), "userService");
        assert_eq!(to_kebab_case("UserService"), "user-service");
        assert_eq!(to_kebab_case("HTTPRequest"), "http-request");
        assert_eq!(to_kebab_case(""), "");
    }

    #[test]
    fn test_trim_ext() {
        assert_eq!(trim_ext("foo/bar.schema"), "foo/bar");
        assert_eq!(trim_ext("a.proto"), "a");
        assert_eq!(trim_ext("archive.tar.gz"), "archive.tar");
        assert_eq!(trim_ext("no_extension"), "no_extension");
        assert_eq!(trim_ext("dir.d/file"), "dir.d/file");
    }

    #[test]
    fn test_base_and_dir_name() {
        assert_eq!(base_name("google/protobuf/any.proto"), "any.proto");
        assert_eq!(base_name("any.proto"), "any.proto");
        assert_eq!(dir_name("google/protobuf/any.proto"), "google/protobuf");
        assert_eq!(dir_name("any.proto"), "");
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(relative_path("", "a.html"), "a.html");
        assert_eq!(relative_path("", "foo/bar.html"), "foo/bar.html");
        assert_eq!(relative_path("foo", "foo/baz.html"), "baz.html");
        assert_eq!(relative_path("foo", "qux.html"), "../qux.html");
        assert_eq!(relative_path("foo/bar", "foo/baz/x.html"), "../baz/x.html");
        assert_eq!(relative_path("foo", "foo"), "../foo");
    }

    #[test]
    fn test_relative_path_normalizes_dot_segments() {
        assert_eq!(relative_path(dir_name("./index.html"), "a.html"), "a.html");
        assert_eq!(relative_path(".", "foo/bar.html"), "foo/bar.html");
        assert_eq!(relative_path("docs/.", "docs/a.html"), "a.html");
        assert_eq!(relative_path("docs/./api", "docs/a.html"), "../a.html");
        assert_eq!(relative_path("docs/api/..", "docs/a.html"), "a.html");
        assert_eq!(relative_path("foo", "./foo/../bar.html"), "../bar.html");
    }
}
