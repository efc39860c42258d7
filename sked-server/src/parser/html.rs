//! Minimal HTML helpers for the sked export formats.
//!
//! The upstream pages are machine-generated table soup; locating tag blocks
//! by case-insensitive substring search is enough, no DOM needed.

/// Locate the next `open ... close` tag block at or after `from`.
///
/// Matching is case-insensitive; the returned byte offsets span the whole
/// block including the closing tag.
pub fn next_block_ci(doc: &str, open: &str, close: &str, from: usize) -> Option<(usize, usize)> {
    let lower = doc.to_ascii_lowercase();
    let open = open.to_ascii_lowercase();
    let close = close.to_ascii_lowercase();

    let start = lower.get(from..)?.find(&open)? + from;
    let body = doc[start..].find('>')? + start + 1;
    let end = lower.get(body..)?.find(&close)? + body + close.len();
    Some((start, end))
}

/// Content between a block's opening tag and its closing tag.
pub fn inner_text(block: &str) -> &str {
    let Some(open_end) = block.find('>') else {
        return "";
    };
    let Some(close_start) = block.rfind('<') else {
        return "";
    };
    if close_start > open_end {
        &block[open_end + 1..close_start]
    } else {
        ""
    }
}

/// Drop every tag, keeping only text content.
pub fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Collapse all whitespace runs into single spaces and trim.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decode the handful of entities the upstream generator emits.
///
/// `&amp;` is decoded last so `&amp;lt;` yields `&lt;` rather than `<`.
pub fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Text content of a block: entities decoded, tags stripped, whitespace
/// collapsed.
pub fn block_text(block: &str) -> String {
    normalize_ws(&strip_tags(&decode_entities(inner_text(block))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_blocks_case_insensitively() {
        let doc = "x<TR><td>a</td></TR>y<tr><td>b</td></tr>";
        let (s, e) = next_block_ci(doc, "<tr", "</tr>", 0).unwrap();
        assert_eq!(&doc[s..e], "<TR><td>a</td></TR>");

        let (s2, e2) = next_block_ci(doc, "<tr", "</tr>", e).unwrap();
        assert_eq!(&doc[s2..e2], "<tr><td>b</td></tr>");

        assert!(next_block_ci(doc, "<tr", "</tr>", e2).is_none());
    }

    #[test]
    fn inner_text_spans_open_to_close() {
        assert_eq!(inner_text("<td class=\"x\">a<b>c</b></td>"), "a<b>c</b>");
        assert_eq!(inner_text("<td/>"), "");
    }

    #[test]
    fn strips_tags_and_normalizes() {
        assert_eq!(
            normalize_ws(&strip_tags("  <b>Mathematik</b>\n 1  ")),
            "Mathematik 1"
        );
    }

    #[test]
    fn decodes_common_entities_once() {
        assert_eq!(decode_entities("A &amp; B"), "A & B");
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
        assert_eq!(decode_entities("R&nbsp;123"), "R 123");
    }

    #[test]
    fn block_text_combines_helpers() {
        assert_eq!(
            block_text("<td> <b>Labor</b> &amp;\nPraxis </td>"),
            "Labor & Praxis"
        );
    }
}
