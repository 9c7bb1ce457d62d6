/// Split a deck body (front matter already removed) into raw slide strings.
///
/// A slide ends at:
/// 1. a `---` line with blank lines (or the document edge) on both sides
/// 2. a run of three or more blank lines
/// 3. a `# ` heading when the current slide already has content
///
/// Directive lines (`@key: value`) directly above an inferred heading break
/// belong to the heading's slide.
pub fn split(body: &str) -> Vec<String> {
    let body = body.replace("\r\n", "\n");
    let lines: Vec<&str> = body.split('\n').collect();

    let mut slides: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut blank_run = 0;

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            blank_run += 1;
            if blank_run == 3 {
                flush(&mut current, &mut slides);
            } else if blank_run < 3 {
                current.push(line);
            }
            continue;
        }

        let prev_blank = i == 0 || lines[i - 1].trim().is_empty();
        let next_blank = lines.get(i + 1).is_none_or(|l| l.trim().is_empty());
        blank_run = 0;

        if is_dash_separator(trimmed) && prev_blank && next_blank {
            flush(&mut current, &mut slides);
            continue;
        }

        if line.starts_with("# ") && has_content(&current) {
            let carried = take_trailing_directives(&mut current);
            flush(&mut current, &mut slides);
            current = carried;
        }

        current.push(line);
    }
    flush(&mut current, &mut slides);

    slides
}

fn flush(current: &mut Vec<&str>, slides: &mut Vec<String>) {
    let text = current.join("\n").trim().to_string();
    if !text.is_empty() {
        slides.push(text);
    }
    current.clear();
}

fn has_content(lines: &[&str]) -> bool {
    lines.iter().any(|l| {
        let t = l.trim();
        !t.is_empty() && !is_directive(t)
    })
}

/// Remove the contiguous directive lines (and blank lines around them) from the
/// end of `lines`, returning the directive lines in order.
fn take_trailing_directives<'a>(lines: &mut Vec<&'a str>) -> Vec<&'a str> {
    let mut split_at = lines.len();
    while split_at > 0 {
        let t = lines[split_at - 1].trim();
        if t.is_empty() || is_directive(t) {
            split_at -= 1;
        } else {
            break;
        }
    }
    lines
        .split_off(split_at)
        .into_iter()
        .filter(|l| !l.trim().is_empty())
        .collect()
}

fn is_dash_separator(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| c == '-')
}

pub(crate) fn is_directive(line: &str) -> bool {
    let Some(rest) = line.strip_prefix('@') else {
        return false;
    };
    match rest.find(':') {
        Some(colon) if colon > 0 => rest[..colon]
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_'),
        _ => false,
    }
}
