//! List-mode parser.
//!
//! The list export is one flat table, one lecture per row, with the columns
//! date / start / end / title / organiser / room. Header rows and decoration
//! rows carry no date in the first cell and are skipped.

use crate::domain::RawLecture;

use super::html::{block_text, next_block_ci};
use super::{ParseError, parse_date, parse_time};

/// Parse a list-export page into lectures, in document order.
pub fn parse_list(html: &str) -> Result<Vec<RawLecture>, ParseError> {
    let mut lectures = Vec::new();

    let mut pos = 0usize;
    while let Some((row_start, row_end)) = next_block_ci(html, "<tr", "</tr>", pos) {
        let row = &html[row_start..row_end];
        pos = row_end;

        let cells = cell_texts(row);
        if cells.len() < 6 || !looks_like_date(&cells[0]) {
            continue; // header, spacer or malformed row
        }

        let date = parse_date(&cells[0])?;
        let start = date.and_time(parse_time(&cells[1])?);
        let end = date.and_time(parse_time(&cells[2])?);

        lectures.push(RawLecture {
            title: cells[3].clone(),
            organiser: cells[4].clone(),
            start,
            end,
            room: cells[5].clone(),
        });
    }

    Ok(lectures)
}

/// Text content of each `<td>` in a row.
fn cell_texts(row: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut pos = 0usize;
    while let Some((s, e)) = next_block_ci(row, "<td", "</td>", pos) {
        cells.push(block_text(&row[s..e]));
        pos = e;
    }
    cells
}

/// Cheap `dd.mm.yyyy` shape check, used to tell lecture rows from headers.
fn looks_like_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b.iter()
            .enumerate()
            .all(|(i, c)| if i == 2 || i == 5 { *c == b'.' } else { c.is_ascii_digit() })
}
