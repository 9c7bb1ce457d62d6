use super::Inline;

/// Parse `**bold**`, `*italic*` / `_italic_` and `` `code` `` spans.
/// Unmatched markers are kept as literal text.
pub fn parse(text: &str) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        let span = match c {
            '`' => delimited(rest, "`").map(|(inner, len)| (Inline::Code(inner.to_string()), len)),
            '*' if rest.starts_with("**") => {
                delimited(rest, "**").map(|(inner, len)| (Inline::Bold(parse(inner)), len))
            }
            '*' | '_' => {
                let marker = if c == '*' { "*" } else { "_" };
                delimited(rest, marker).map(|(inner, len)| (Inline::Italic(parse(inner)), len))
            }
            _ => None,
        };

        match span {
            Some((inline, len)) => {
                if !buf.is_empty() {
                    out.push(Inline::Text(std::mem::take(&mut buf)));
                }
                out.push(inline);
                rest = &rest[len..];
            }
            None => {
                buf.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    if !buf.is_empty() {
        out.push(Inline::Text(buf));
    }
    out
}

/// If `s` starts with `marker`, find the closing marker and return the inner
/// text plus the total byte length consumed.
fn delimited<'a>(s: &'a str, marker: &str) -> Option<(&'a str, usize)> {
    let body = s.strip_prefix(marker)?;
    let end = body.find(marker)?;
    if end == 0 {
        return None;
    }
    Some((&body[..end], marker.len() * 2 + end))
}
