//! Graphical-mode parser.
//!
//! The graphical export carries one table per day. A day table starts with a
//! caption cell (`<td class="day">Montag, 02.03.2026</td>`); each lecture is
//! a `<td class="block">` cell whose `<br>`-separated lines are title, time
//! span, then organiser and room. A few faculties print the room line before
//! the organiser line, which is what the faculty hint is for.

use chrono::NaiveDate;

use crate::domain::RawLecture;

use super::html::{block_text, decode_entities, inner_text, next_block_ci, normalize_ws, strip_tags};
use super::{ParseError, parse_date, parse_time};

/// Parse a graphical-export page into lectures, in document order.
pub fn parse_graphical(html: &str, faculty: Option<&str>) -> Result<Vec<RawLecture>, ParseError> {
    let room_first = faculty.is_some_and(|f| {
        f.eq_ignore_ascii_case("e") || f.eq_ignore_ascii_case("elektrotechnik")
    });

    let mut lectures = Vec::new();

    let mut table_pos = 0usize;
    while let Some((table_start, table_end)) = next_block_ci(html, "<table", "</table>", table_pos)
    {
        let table = &html[table_start..table_end];
        table_pos = table_end;

        let Some(date) = day_date(table)? else {
            continue; // not a day table
        };

        let mut cell_pos = 0usize;
        while let Some((cell_start, cell_end)) = next_block_ci(table, "<td", "</td>", cell_pos) {
            let cell = &table[cell_start..cell_end];
            cell_pos = cell_end;

            let head = cell[..cell.len().min(120)].to_ascii_lowercase();
            if !head.contains("class=\"block\"") {
                continue;
            }

            let fields = block_fields(cell);
            if fields.len() < 4 {
                continue; // incomplete block, not a lecture
            }

            let span = &fields[1];
            let (start_s, end_s) = span
                .split_once('-')
                .ok_or_else(|| ParseError::InvalidTime(span.clone()))?;
            let start = date.and_time(parse_time(start_s.trim())?);
            let end = date.and_time(parse_time(end_s.trim())?);

            let (organiser, room) = if room_first {
                (&fields[3], &fields[2])
            } else {
                (&fields[2], &fields[3])
            };

            lectures.push(RawLecture {
                title: fields[0].clone(),
                organiser: organiser.clone(),
                start,
                end,
                room: room.clone(),
            });
        }
    }

    Ok(lectures)
}

/// Date from a day table's caption cell, e.g. `Montag, 02.03.2026`.
///
/// Returns `Ok(None)` for tables without a caption cell (layout tables).
fn day_date(table: &str) -> Result<Option<NaiveDate>, ParseError> {
    let mut pos = 0usize;
    while let Some((s, e)) = next_block_ci(table, "<td", "</td>", pos) {
        let cell = &table[s..e];
        pos = e;

        let head = cell[..cell.len().min(120)].to_ascii_lowercase();
        if !head.contains("class=\"day\"") {
            continue;
        }

        // The date follows the weekday name.
        let text = block_text(cell);
        let date_part = text.rsplit(' ').next().unwrap_or_default();
        return parse_date(date_part).map(Some);
    }
    Ok(None)
}

/// The `<br>`-separated lines of a lecture block, cleaned up; empty lines
/// are dropped.
fn block_fields(cell: &str) -> Vec<String> {
    split_lines_ci(inner_text(cell))
        .into_iter()
        .map(|line| normalize_ws(&strip_tags(&decode_entities(line))))
        .filter(|line| !line.is_empty())
        .collect()
}

/// Split on `<br>` tags (any spelling), keeping the raw line fragments.
fn split_lines_ci(inner: &str) -> Vec<&str> {
    let lower = inner.to_ascii_lowercase();
    let mut parts = Vec::new();
    let mut pos = 0usize;
    while let Some(rel) = lower[pos..].find("<br") {
        let tag_start = pos + rel;
        parts.push(&inner[pos..tag_start]);
        pos = match inner[tag_start..].find('>') {
            Some(gt) => tag_start + gt + 1,
            None => inner.len(),
        };
    }
    parts.push(&inner[pos..]);
    parts
}
