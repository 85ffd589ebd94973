//! Identifier derivation for generated interfaces and request functions.

use convert_case::{Case, Casing};

/// Interface name used when neither the path nor the method gives anything
/// to build on.
pub const DEFAULT_INTERFACE_NAME: &str = "ApiData";

const INTERFACE_SUFFIX: &str = "Data";

/// Upper-case the first character, leaving the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Lower-case the first character, leaving the rest untouched.
pub fn uncapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// `user-info_list` -> `UserInfoList`. A `-` or `_` upper-cases the character
/// after it; other characters that can't appear in an identifier are dropped.
pub fn to_camel_case(s: &str) -> String {
    capitalize(&join_separated(s))
}

/// Same as [`to_camel_case`] with a lower-case first character.
pub fn to_lower_camel_case(s: &str) -> String {
    uncapitalize(&join_separated(s))
}

fn join_separated(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper_next = false;
    for c in s.chars() {
        if c == '-' || c == '_' {
            upper_next = true;
        } else if c.is_alphanumeric() || c == '$' {
            if upper_next {
                out.extend(c.to_uppercase());
                upper_next = false;
            } else {
                out.push(c);
            }
        }
    }
    out
}

/// Remove `{param}` placeholders. An unterminated `{` is kept as-is.
fn strip_placeholders(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut rest = path;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        out.push_str(&rest[..open]);
        rest = &rest[open + close + 1..];
    }
    out.push_str(rest);
    out
}

fn normalize_method(method: &str) -> String {
    match method.trim() {
        "" => "get".to_string(),
        m => m.to_lowercase(),
    }
}

/// Derive the response interface name for an endpoint.
///
/// Placeholders are dropped and the remaining segments camel-cased and
/// joined. `GET` endpoints keep a lower-case first letter and carry no
/// prefix; every other method is prepended in Pascal case. The result always
/// ends in `Data`, and a name that would start with a digit gets a leading
/// `_`.
///
/// ```
/// use yapi_codegen::naming::derive_interface_name;
///
/// assert_eq!(derive_interface_name("/user/{id}", "GET"), "userData");
/// assert_eq!(derive_interface_name("/user/{id}", "POST"), "PostUserData");
/// ```
pub fn derive_interface_name(path: &str, method: &str) -> String {
    let path_name: String = strip_placeholders(path)
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(to_camel_case)
        .collect();

    let method = normalize_method(method);
    let name = if method == "get" {
        if path_name.is_empty() {
            return DEFAULT_INTERFACE_NAME.to_string();
        }
        format!("{}{}", uncapitalize(&path_name), INTERFACE_SUFFIX)
    } else {
        format!(
            "{}{}{}",
            to_camel_case(&method.to_case(Case::Pascal)),
            path_name,
            INTERFACE_SUFFIX
        )
    };

    if name.starts_with(|c: char| c.is_alphabetic() || c == '_' || c == '$') {
        name
    } else {
        format!("_{}", name)
    }
}

/// Derive the request function name for an endpoint.
///
/// ```
/// use yapi_codegen::naming::derive_function_name;
///
/// assert_eq!(derive_function_name("/user/{id}", "get"), "getUser");
/// assert_eq!(derive_function_name("/user/{id}/detail", "DELETE"), "deleteUserDetail");
/// ```
pub fn derive_function_name(path: &str, method: &str) -> String {
    let stripped = strip_placeholders(path);
    let name: String = stripped
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .enumerate()
        .map(|(index, word)| {
            let lower = word.to_lowercase();
            if index == 0 { lower } else { capitalize(&lower) }
        })
        .collect();

    let method = normalize_method(method);
    if method == "get" && name.starts_with("get") {
        return name;
    }

    let prefix: String = method.chars().filter(|c| c.is_alphanumeric()).collect();
    format!("{}{}", prefix, capitalize(&name))
}
