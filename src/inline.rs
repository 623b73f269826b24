use crate::block::Segment;

/// Inline tags that carry formatting; everything else is dropped silently.
pub const SUPPORTED_TAGS: &[&str] = &["b", "strong", "i", "em", "u"];

/// Split a block's text into runs of uniform bold/italic/underline state.
///
/// Unterminated `<` is literal text. Closing tags only pop when they match
/// the innermost open tag, so interleaved markup degrades instead of failing.
/// No segment has empty text; whitespace-only runs are kept as they are, with
/// the flags open around them (`<u> </u>` yields an underlined `" "`).
pub fn segment(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut stack: Vec<String> = Vec::new();
    let mut buffer = String::new();
    let mut pos = 0;

    while let Some(ch) = text[pos..].chars().next() {
        if ch != '<' {
            buffer.push(ch);
            pos += ch.len_utf8();
            continue;
        }

        let Some(offset) = text[pos..].find('>') else {
            buffer.push('<');
            pos += 1;
            continue;
        };
        let tag_end = pos + offset;

        flush(&mut buffer, &stack, &mut segments);
        apply_tag(&text[pos + 1..tag_end], &mut stack);
        pos = tag_end + 1;
    }

    flush(&mut buffer, &stack, &mut segments);
    segments
}

fn apply_tag(content: &str, stack: &mut Vec<String>) {
    let content = content.to_lowercase();
    let (closing, rest) = match content.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, content.as_str()),
    };
    let name = rest.split(' ').next().unwrap_or("").trim();

    if closing {
        if stack.last().is_some_and(|top| top == name) {
            stack.pop();
        }
    } else if SUPPORTED_TAGS.contains(&name) {
        stack.push(name.to_string());
    }
}

fn flush(buffer: &mut String, stack: &[String], segments: &mut Vec<Segment>) {
    if buffer.is_empty() {
        return;
    }
    let open = |names: &[&str]| stack.iter().any(|tag| names.contains(&tag.as_str()));
    segments.push(Segment {
        text: std::mem::take(buffer),
        bold: open(&["b", "strong"]),
        italic: open(&["i", "em"]),
        underline: open(&["u"]),
    });
}
