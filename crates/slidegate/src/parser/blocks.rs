use std::sync::LazyLock;

use regex::Regex;

use super::splitter::is_directive;
use super::{Block, Directive, inline};

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^!\[([^\]]*)\]\(([^)\s]+)\)$").expect("valid image regex"));

static ORDERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s+").expect("valid list regex"));

/// Pull leading/standalone `@key: value` lines out of a raw slide.
pub fn extract_directives(raw: &str) -> (Vec<Directive>, String) {
    let mut directives = Vec::new();
    let mut content = Vec::new();
    for line in raw.lines() {
        let trimmed = line.trim();
        if is_directive(trimmed) {
            let (name, value) = trimmed[1..].split_once(':').unwrap_or((trimmed, ""));
            directives.push(Directive {
                name: name.trim().to_string(),
                value: value.trim().to_string(),
            });
        } else {
            content.push(line);
        }
    }
    (directives, content.join("\n"))
}

pub fn parse(content: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut quote: Vec<&str> = Vec::new();
    let mut items: Vec<String> = Vec::new();

    for line in content.lines() {
        let trimmed = line.trim();

        if let Some(rest) = list_item(trimmed) {
            flush_paragraph(&mut paragraph, &mut blocks);
            flush_quote(&mut quote, &mut blocks);
            items.push(rest.to_string());
            continue;
        }
        // indented continuation of the previous item
        if !items.is_empty() && !trimmed.is_empty() && line.starts_with([' ', '\t']) {
            if let Some(last) = items.last_mut() {
                last.push(' ');
                last.push_str(trimmed);
            }
            continue;
        }
        flush_list(&mut items, &mut blocks);

        if let Some(rest) = trimmed.strip_prefix('>') {
            flush_paragraph(&mut paragraph, &mut blocks);
            quote.push(rest.trim());
            continue;
        }
        flush_quote(&mut quote, &mut blocks);

        if trimmed.is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
            continue;
        }

        if let Some((level, text)) = heading(trimmed) {
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(Block::Heading {
                level,
                inlines: inline::parse(text),
            });
            continue;
        }

        if let Some(caps) = IMAGE_RE.captures(trimmed) {
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(Block::Image {
                alt: caps[1].to_string(),
                path: caps[2].to_string(),
            });
            continue;
        }

        paragraph.push(trimmed);
    }

    flush_list(&mut items, &mut blocks);
    flush_quote(&mut quote, &mut blocks);
    flush_paragraph(&mut paragraph, &mut blocks);
    blocks
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if (1..=6).contains(&level) && line[level..].starts_with(' ') {
        Some((level as u8, line[level..].trim()))
    } else {
        None
    }
}

fn list_item(line: &str) -> Option<&str> {
    for marker in ["- ", "* ", "+ "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return Some(rest.trim());
        }
    }
    ORDERED_RE.find(line).map(|m| line[m.end()..].trim())
}

fn flush_paragraph(lines: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    if !lines.is_empty() {
        blocks.push(Block::Paragraph {
            inlines: inline::parse(&lines.join(" ")),
        });
        lines.clear();
    }
}

fn flush_quote(lines: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    if !lines.is_empty() {
        blocks.push(Block::BlockQuote {
            inlines: inline::parse(lines.join(" ").trim()),
        });
        lines.clear();
    }
}

fn flush_list(items: &mut Vec<String>, blocks: &mut Vec<Block>) {
    if !items.is_empty() {
        blocks.push(Block::List {
            items: items.drain(..).map(|i| inline::parse(&i)).collect(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Inline;

    #[test]
    fn test_extract_directives() {
        let (directives, content) =
            extract_directives("@layout: characters\n# Cast\n@poster: p.png");
        assert_eq!(directives.len(), 2);
        assert_eq!(directives[0].name, "layout");
        assert_eq!(directives[0].value, "characters");
        assert_eq!(directives[1].value, "p.png");
        assert_eq!(content, "# Cast");
    }

    #[test]
    fn test_heading_and_paragraph() {
        let blocks = parse("## Log Line\n\nA drifter\nfinds a map.");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[0], Block::Heading { level: 2, .. }));
        assert_eq!(
            blocks[1],
            Block::Paragraph {
                inlines: vec![Inline::Text("A drifter finds a map.".to_string())]
            }
        );
    }

    #[test]
    fn test_list_with_continuation() {
        let blocks = parse("- First\n  continued\n- Second\n1. Third");
        let Block::List { items } = &blocks[0] else {
            panic!("expected list, got {:?}", blocks[0]);
        };
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], vec![Inline::Text("First continued".to_string())]);
    }

    #[test]
    fn test_image_and_quote() {
        let blocks = parse("![Poster](img/poster.png)\n\n> Less is more\n> always");
        assert_eq!(
            blocks[0],
            Block::Image {
                alt: "Poster".to_string(),
                path: "img/poster.png".to_string()
            }
        );
        assert_eq!(
            blocks[1],
            Block::BlockQuote {
                inlines: vec![Inline::Text("Less is more always".to_string())]
            }
        );
    }

    #[test]
    fn test_hash_without_space_is_text() {
        let blocks = parse("#hashtag");
        assert!(matches!(blocks[0], Block::Paragraph { .. }));
    }
}
