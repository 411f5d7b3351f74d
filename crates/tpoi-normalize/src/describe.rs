//! Short description synthesis.
//!
//! Sources are tried in priority order and the first non-empty one wins:
//!
//! 1. the curated promotional comment (title and body) of a directory page,
//! 2. a summary constructed from the directory detail table,
//! 3. the page's own description, trimmed to a couple of sentences,
//! 4. a one-line fallback built from what the record already knows.
//!
//! Event dates are appended when missing from the text, then the result is
//! bounded to the run's maximum length. Lengths are counted in chars.

use tpoi_core::{DirectoryDetails, RawPage, SourceKind};

use crate::coerce::{clean_text, first_clean};
use crate::context::RunContext;

/// Bound applied to raw page descriptions before the date is appended.
pub const RAW_DESCRIPTION_MAX_CHARS: usize = 200;
/// A raw description is cut at a period only past this position.
pub const RAW_DESCRIPTION_MIN_BOUNDARY: usize = 100;

const AWARDS_MAX_CHARS: usize = 150;
const REMARKS_MAX_CHARS: usize = 100;
const ELLIPSIS: &str = "...";

/// Build the short description for one page.
///
/// `name`, `neighborhood` and `category` feed the fallback line when the page
/// carries no usable text.
#[must_use]
pub fn synthesize(
    page: &RawPage,
    ctx: &RunContext,
    name: &str,
    neighborhood: &str,
    category: Option<&str>,
) -> String {
    let details = page.directory_details.as_ref();

    let mut desc = details
        .and_then(curated)
        .or_else(|| details.and_then(constructed))
        .or_else(|| {
            first_clean(&page.raw_description_candidates).map(|d| {
                truncate_at_sentence(&d, RAW_DESCRIPTION_MAX_CHARS, RAW_DESCRIPTION_MIN_BOUNDARY)
            })
        })
        .unwrap_or_else(|| fallback(ctx.kind(), name, neighborhood, category));

    let date = clean_text(&page.raw_date_text);
    if !date.is_empty() && !desc.contains(&date) {
        desc = format!("{desc} {date}").trim().to_string();
    }

    let max = ctx.description_max_chars;
    truncate_at_sentence(&desc, max, max / 2)
}

/// Curated promotional copy: `title body`, or whichever of the two exists.
fn curated(details: &DirectoryDetails) -> Option<String> {
    let title = details.pr_comment_title.as_deref().map(clean_text);
    let body = details.pr_comment_body.as_deref().map(clean_text);
    let joined = [title, body]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    (!joined.is_empty()).then_some(joined)
}

/// Summary assembled from the detail table rows.
fn constructed(details: &DirectoryDetails) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();

    if let Some(awards) = non_empty(details.awards.as_deref()) {
        let awards = if awards.chars().count() > AWARDS_MAX_CHARS {
            clip(&awards, AWARDS_MAX_CHARS - ELLIPSIS.len())
        } else {
            awards
        };
        parts.push(format!("Awards: {awards}"));
    }
    if let Some(remarks) = non_empty(details.remarks.as_deref()) {
        let remarks = if remarks.chars().count() > REMARKS_MAX_CHARS {
            clip(&remarks, REMARKS_MAX_CHARS)
        } else {
            remarks
        };
        parts.push(format!("Remarks: {remarks}"));
    }
    if details
        .private_rooms
        .as_deref()
        .is_some_and(|r| r.to_lowercase().contains("available"))
    {
        parts.push("Private rooms available.".to_string());
    }
    if let Some(categories) = non_empty(details.categories.as_deref()) {
        parts.push(format!("Specializes in {categories}."));
    }

    if parts.is_empty() {
        return None;
    }

    let mut out = String::new();
    for part in parts {
        if !out.is_empty() {
            out.push_str(if out.ends_with('.') { " " } else { ". " });
        }
        out.push_str(&part);
    }
    Some(out)
}

fn fallback(kind: SourceKind, name: &str, neighborhood: &str, category: Option<&str>) -> String {
    match kind {
        SourceKind::Directory => {
            format!("{} restaurant in {neighborhood}", category.unwrap_or("Japanese"))
        }
        SourceKind::Event => name.to_string(),
    }
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(clean_text).filter(|s| !s.is_empty())
}

/// First `n` chars of `text` followed by an ellipsis.
fn clip(text: &str, n: usize) -> String {
    let mut out: String = text.chars().take(n).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Bound `text` to `max_chars`.
///
/// Text within the bound is returned unchanged. Otherwise the cut lands on
/// the last sentence-ending period past `min_boundary`; failing that, on the
/// last word boundary with `...` appended. The result never exceeds
/// `max_chars`.
///
/// A period only ends a sentence when whitespace follows it, so `4.5` is
/// never split.
#[must_use]
pub fn truncate_at_sentence(text: &str, max_chars: usize, min_boundary: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    // One char past the bound so the char after a final period is visible.
    let window: Vec<char> = text.chars().take(max_chars + 1).collect();
    let sentence_end = (0..max_chars)
        .rev()
        .find(|&i| window[i] == '.' && window[i + 1].is_whitespace());
    if let Some(pos) = sentence_end {
        if pos > min_boundary {
            return window[..=pos].iter().collect();
        }
    }

    let head = &window[..max_chars];

    let budget = max_chars.saturating_sub(ELLIPSIS.len());
    let mut cut: String = head[..budget.min(head.len())].iter().collect();
    // Back off to a word boundary unless the cut already sits on one.
    let next_is_space = head.get(budget).is_some_and(|c| c.is_whitespace());
    if !next_is_space {
        if let Some(space) = cut.rfind(char::is_whitespace) {
            cut.truncate(space);
        }
    }
    let trimmed = cut.trim_end_matches(|c: char| c.is_whitespace() || ",;:-.".contains(c));
    format!("{trimmed}{ELLIPSIS}")
}
