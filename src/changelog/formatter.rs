//! Bullet list rendering with word wrapping.
use crate::error::{ChangelistError, Result};

/// Column width of the rendered changelog.
pub const DEFAULT_WIDTH: usize = 80;

const BULLET: &str = "- ";
const INDENT: &str = "  ";

/// Render `items` as a markdown bullet list wrapped to `width` columns.
///
/// Each item is wrapped to `width - 2` columns; the first line is prefixed
/// with `- ` and continuation lines are indented by two spaces. Items are
/// separated by a blank line. An empty slice renders as an empty string.
pub fn format_list<S: AsRef<str>>(items: &[S], width: usize) -> Result<String> {
    if width <= BULLET.len() {
        return Err(ChangelistError::InvalidWidth(width));
    }

    let wrap_width = width - BULLET.len();

    Ok(items
        .iter()
        .map(|item| format_item(item.as_ref(), wrap_width))
        .collect::<Vec<_>>()
        .join("\n\n"))
}

fn format_item(text: &str, wrap_width: usize) -> String {
    wrap(text, wrap_width)
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let prefix = if i == 0 { BULLET } else { INDENT };
            format!("{prefix}{line}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Greedily wrap `text` into lines of at most `width` characters.
///
/// Runs of whitespace collapse to a single space and lines only break
/// between words, except that a word longer than `width` is split, filling
/// the rest of the current line first.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = vec![];
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let mut rest = word;

        while !rest.is_empty() {
            let rest_len = rest.chars().count();
            let sep = usize::from(line_len > 0);

            if line_len + sep + rest_len <= width {
                if sep == 1 {
                    line.push(' ');
                }
                line.push_str(rest);
                line_len += sep + rest_len;
                break;
            }

            if rest_len > width {
                let room = width.saturating_sub(line_len + sep);
                if room > 0 {
                    let (head, tail) = split_at_char(rest, room);
                    if sep == 1 {
                        line.push(' ');
                    }
                    line.push_str(head);
                    rest = tail;
                }
            }

            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }

    lines
}

fn split_at_char(s: &str, n: usize) -> (&str, &str) {
    let idx = s.char_indices().nth(n).map_or(s.len(), |(i, _)| i);
    s.split_at(idx)
}
