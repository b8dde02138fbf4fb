//! URI template builder.
//!
//! Turns a human-written route pattern plus positional arguments into a
//! well-formed, percent-encoded, absolute URI:
//!
//! ```
//! use mock_requester::uri;
//!
//! let built = uri::build("/users/{id}/posts/{slug}", &[&42, &"first post"]).unwrap();
//! assert_eq!(built, "/users/42/posts/first%20post");
//! ```
//!
//! The pattern is trimmed and resolved as-is first. If the resolved URI does
//! not already start with `/` (either from the pattern itself or from the
//! first substituted argument), the pattern is re-resolved with exactly one
//! leading `/` prepended. `build("{url}/hello", &[&"/test"])` therefore yields
//! `/test/hello`, never `//test/hello`.

use std::fmt::Display;

use crate::error::UriError;

/// Build an absolute, percent-encoded URI from a pattern and positional
/// arguments.
///
/// Placeholders are `{name}` tokens, resolved left to right: the Nth token
/// consumes the Nth argument. Absent and empty argument lists are equivalent.
/// The result is guaranteed to start with `/`.
///
/// # Errors
///
/// Returns [`UriError`] when the pattern references more placeholders than
/// arguments were supplied, or contains an unterminated `{`.
pub fn build(pattern: &str, args: &[&dyn Display]) -> Result<String, UriError> {
    let trimmed = pattern.trim();
    let resolved = resolve(trimmed, args)?;
    if resolved.starts_with('/') {
        Ok(resolved)
    } else {
        resolve(&format!("/{trimmed}"), args)
    }
}

fn resolve(pattern: &str, args: &[&dyn Display]) -> Result<String, UriError> {
    let substituted = substitute(pattern, args)?;
    Ok(encode(&substituted))
}

/// Replace `{name}` tokens with the string form of the positional arguments.
fn substitute(pattern: &str, args: &[&dyn Display]) -> Result<String, UriError> {
    let mut out = String::with_capacity(pattern.len());
    let mut next = args.iter();
    let mut rest = pattern;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or(UriError::UnterminatedPlaceholder {
            position: pattern.len() - rest.len() + open,
        })?;
        let name = &after[..close];
        let value = next.next().ok_or_else(|| UriError::MissingArgument {
            placeholder: name.to_string(),
        })?;
        out.push_str(&value.to_string());
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Percent-encode the resolved URI, keeping `/`, `?`, `&`, `=` structure.
fn encode(uri: &str) -> String {
    let (path, query) = match uri.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (uri, None),
    };

    let mut encoded = path
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");

    if let Some(query) = query {
        encoded.push('?');
        let pairs = query
            .split('&')
            .map(|pair| match pair.split_once('=') {
                Some((name, value)) => {
                    format!("{}={}", urlencoding::encode(name), urlencoding::encode(value))
                }
                None => urlencoding::encode(pair).into_owned(),
            })
            .collect::<Vec<_>>()
            .join("&");
        encoded.push_str(&pairs);
    }

    encoded
}
