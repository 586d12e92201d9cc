//! Resolution of stylesheet references found in the user configuration.

use once_cell::sync::Lazy;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use regex::Regex;
use std::path::{Component, Path, PathBuf};

/// Characters escaped in the path of a `file://` URI.
const PATH_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

// scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
static SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("Invalid scheme regex"));

/// Returns `true` if `href` starts with a URI scheme such as `https:` or `file:`.
///
/// A single letter followed by `:\` or `:/` is a Windows drive, not a scheme.
pub fn has_scheme(href: &str) -> bool {
    let Some(m) = SCHEME_RE.find(href) else {
        return false;
    };
    let is_drive = m.end() == 2 && matches!(href[m.end()..].chars().next(), Some('\\' | '/'));
    !is_drive
}

/// Resolves `href` against the directory containing `base_path`.
///
/// Empty hrefs and hrefs that already carry a scheme are returned unchanged,
/// anything else becomes a `file://` URI. Resolution is purely lexical, the
/// referenced file does not have to exist. A leading `/` doesn't detach the
/// href from the base directory, `/x.css` lands directly under it.
///
/// # Example
///
/// ```
/// use mdpreview_core::resolve_href;
/// use std::path::Path;
///
/// let base = Path::new("/docs/notes.md");
/// assert_eq!(resolve_href(base, "style.css"), "file:///docs/style.css");
/// assert_eq!(resolve_href(base, "https://x/a.css"), "https://x/a.css");
/// ```
pub fn resolve_href(base_path: &Path, href: &str) -> String {
    if href.is_empty() || has_scheme(href) {
        return href.to_string();
    }

    let base_dir = base_path.parent().unwrap_or_else(|| Path::new(""));
    to_file_uri(&normalize(&join_under(base_dir, Path::new(href))))
}

/// Appends the components of `path` to `base`, dropping its root and prefix.
fn join_under(base: &Path, path: &Path) -> PathBuf {
    let mut joined = base.to_path_buf();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {}
            other => joined.push(other.as_os_str()),
        }
    }
    joined
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() && !normalized.has_root() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

fn to_file_uri(path: &Path) -> String {
    let mut path = path.to_string_lossy().replace('\\', "/");
    if !path.starts_with('/') {
        path.insert(0, '/');
    }
    format!("file://{}", utf8_percent_encode(&path, PATH_ENCODE_SET))
}
