//! Cursor pagination over in-memory listings.
//!
//! Cursors are opaque base64 strings wrapping an absolute offset
//! (`arrayconnection:{offset}`), so a cursor minted on one page stays valid
//! on any other slice of the same listing. [`paginate`] windows an already
//! fetched item vector; the backend's reported total is threaded through
//! untouched so `totalCount` reflects the full result set, not the window.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const CURSOR_PREFIX: &str = "arrayconnection:";

/// Relay-style slicing arguments, all optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionArgs {
    pub first: Option<i32>,
    pub after: Option<String>,
    pub last: Option<i32>,
    pub before: Option<String>,
}

impl ConnectionArgs {
    /// Forward-paging shorthand.
    pub fn first(n: i32) -> Self {
        Self {
            first: Some(n),
            ..Default::default()
        }
    }
}

/// One item plus the cursor addressing its absolute position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge<T> {
    pub cursor: String,
    pub node: T,
}

/// Slice bounds and continuation hints.
///
/// `has_next_page` is only asserted when paging forward (`first` given) and
/// `has_previous_page` only when paging backward (`last` given); in the other
/// direction the flag stays `false` even when more items exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub has_previous_page: bool,
    pub has_next_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

/// A paginated window over a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
    /// Backend-reported size of the whole result set.
    pub total_count: u64,
}

impl<T> Page<T> {
    /// An empty page with a zero total.
    pub fn empty() -> Self {
        Self {
            edges: Vec::new(),
            page_info: PageInfo::default(),
            total_count: 0,
        }
    }
}

/// Encodes an absolute offset as an opaque cursor.
pub fn offset_to_cursor(offset: i64) -> String {
    BASE64.encode(format!("{CURSOR_PREFIX}{offset}"))
}

/// Decodes a cursor back to its offset. Returns `None` for anything that is
/// not a well-formed cursor; callers treat such cursors as absent.
pub fn cursor_to_offset(cursor: &str) -> Option<i64> {
    let bytes = BASE64.decode(cursor).ok()?;
    let decoded = String::from_utf8(bytes).ok()?;
    decoded.strip_prefix(CURSOR_PREFIX)?.parse().ok()
}

fn offset_or(cursor: Option<&str>, default: i64) -> i64 {
    cursor.and_then(cursor_to_offset).unwrap_or(default)
}

/// Windows `items` according to `args`.
///
/// `total_count` is the backend's count for the unwindowed result set and is
/// passed through to the page verbatim. Negative `first` or `last` is an
/// input error; malformed cursors are ignored.
pub fn paginate<T>(items: Vec<T>, args: &ConnectionArgs, total_count: u64) -> Result<Page<T>> {
    let len = items.len() as i64;
    let after_offset = offset_or(args.after.as_deref(), -1);
    let before_offset = offset_or(args.before.as_deref(), len);

    let mut start = (after_offset + 1).max(0);
    let mut end = before_offset.min(len);

    if let Some(first) = args.first {
        if first < 0 {
            return Err(Error::InvalidInput(
                "argument \"first\" must be a non-negative integer".to_string(),
            ));
        }
        end = end.min(start + i64::from(first));
    }
    if let Some(last) = args.last {
        if last < 0 {
            return Err(Error::InvalidInput(
                "argument \"last\" must be a non-negative integer".to_string(),
            ));
        }
        start = start.max(end - i64::from(last));
    }

    let window_start = start.clamp(0, len);
    let window_end = end.clamp(window_start, len);
    let edges: Vec<Edge<T>> = items
        .into_iter()
        .skip(window_start as usize)
        .take((window_end - window_start) as usize)
        .enumerate()
        .map(|(i, node)| Edge {
            cursor: offset_to_cursor(window_start + i as i64),
            node,
        })
        .collect();

    let lower_bound = if args.after.is_some() {
        (after_offset + 1).max(0)
    } else {
        0
    };
    let upper_bound = if args.before.is_some() {
        before_offset
    } else {
        len
    };

    let page_info = PageInfo {
        has_previous_page: args.last.is_some() && start > lower_bound,
        has_next_page: args.first.is_some() && end < upper_bound,
        start_cursor: edges.first().map(|e| e.cursor.clone()),
        end_cursor: edges.last().map(|e| e.cursor.clone()),
    };

    Ok(Page {
        edges,
        page_info,
        total_count,
    })
}
