//! Materialized-path helpers for the page tree.
//!
//! A page's `path` is its ancestors' steps followed by its own, each step a
//! fixed-width base-36 number. "Is a descendant of" is then a prefix test and
//! ordering by `path` yields a depth-first traversal.

use crate::error::CoreError;

/// Width of a single path step.
pub const STEP_LEN: usize = 4;

const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Largest step value that fits in [`STEP_LEN`] characters.
pub const MAX_STEP: u64 = 36u64.pow(STEP_LEN as u32) - 1;

/// Encode a step number as a zero-padded base-36 string.
pub fn encode_step(value: u64) -> Result<String, CoreError> {
    if value == 0 || value > MAX_STEP {
        return Err(CoreError::Internal(format!(
            "Path step {value} is outside 1..={MAX_STEP}"
        )));
    }
    let mut digits = vec![b'0'; STEP_LEN];
    let mut rest = value;
    for slot in digits.iter_mut().rev() {
        *slot = ALPHABET[(rest % 36) as usize];
        rest /= 36;
    }
    Ok(String::from_utf8_lossy(&digits).into_owned())
}

/// Decode a single step. Returns `None` for malformed input.
pub fn decode_step(step: &str) -> Option<u64> {
    if step.len() != STEP_LEN {
        return None;
    }
    step.bytes().try_fold(0u64, |acc, b| {
        let digit = ALPHABET.iter().position(|&a| a == b)? as u64;
        Some(acc * 36 + digit)
    })
}

/// Path for a new last child of `parent_path`, given the current last child.
pub fn next_child_path(parent_path: &str, last_child: Option<&str>) -> Result<String, CoreError> {
    let next = match last_child {
        None => 1,
        Some(last) => {
            let step = last
                .strip_prefix(parent_path)
                .filter(|s| s.len() == STEP_LEN)
                .and_then(decode_step)
                .ok_or_else(|| {
                    CoreError::Internal(format!(
                        "'{last}' is not a direct child path of '{parent_path}'"
                    ))
                })?;
            step + 1
        }
    };
    Ok(format!("{parent_path}{}", encode_step(next)?))
}

/// Number of steps in a path; the tree root has depth 1.
pub fn depth_of(path: &str) -> i32 {
    (path.len() / STEP_LEN) as i32
}

/// Whether `path` is `root` or lies below it.
pub fn is_within(path: &str, root: &str) -> bool {
    path.starts_with(root)
}

/// Move a descendant path from under `old_root` to under `new_root`.
pub fn rebase(path: &str, old_root: &str, new_root: &str) -> Option<String> {
    path.strip_prefix(old_root)
        .map(|rest| format!("{new_root}{rest}"))
}

/// `url_path` of a child page: the parent's url path plus `slug/`.
pub fn child_url_path(parent_url_path: &str, slug: &str) -> String {
    format!("{parent_url_path}{slug}/")
}

/// Public URL of a page relative to its site root.
///
/// `url_path` values always start and end with `/`. The site root itself maps
/// to `/`. Pages outside the site have no URL.
pub fn page_url(url_path: &str, site_root_url_path: &str) -> Option<String> {
    url_path
        .strip_prefix(site_root_url_path)
        .map(|rest| format!("/{rest}"))
}
