pub mod blocks;
pub mod frontmatter;
pub mod inline;
pub mod splitter;

use std::path::Path;

use anyhow::{Context, Result};

pub use frontmatter::{AccessMeta, CharacterOption, PresentationMeta, RoleMeta};

#[derive(Debug, Clone)]
pub struct Presentation {
    pub meta: PresentationMeta,
    pub slides: Vec<Slide>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub directives: Vec<Directive>,
    pub blocks: Vec<Block>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading { level: u8, inlines: Vec<Inline> },
    Paragraph { inlines: Vec<Inline> },
    List { items: Vec<Vec<Inline>> },
    Image { alt: String, path: String },
    BlockQuote { inlines: Vec<Inline> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Bold(Vec<Inline>),
    Italic(Vec<Inline>),
    Code(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Layout {
    Title,
    Section,
    Characters,
    Content,
}

impl Slide {
    pub fn directive(&self, name: &str) -> Option<&str> {
        self.directives
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.value.as_str())
    }

    /// Whether the slide carries `@sensitive: true` (or `yes`).
    pub fn marked_sensitive(&self) -> bool {
        matches!(self.directive("sensitive"), Some("true" | "yes"))
    }

    pub fn poster(&self) -> Option<&str> {
        self.directive("poster").filter(|p| !p.is_empty())
    }

    /// Text of the first heading, if any.
    pub fn title(&self) -> Option<String> {
        self.blocks.iter().find_map(|b| match b {
            Block::Heading { inlines, .. } => Some(inlines_to_text(inlines)),
            _ => None,
        })
    }

    /// Every image path referenced by this slide (blocks and poster).
    pub fn image_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Image { path, .. } => Some(path.as_str()),
                _ => None,
            })
            .collect();
        if let Some(poster) = self.poster() {
            paths.push(poster);
        }
        paths
    }
}

pub fn parse(content: &str) -> Result<Presentation> {
    let (meta, body) = frontmatter::extract(content)?;
    let slides = splitter::split(&body)
        .into_iter()
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| {
            let (directives, content) = blocks::extract_directives(&raw);
            let blocks = blocks::parse(&content);
            let layout = classify_layout(&directives, &blocks);
            Slide {
                directives,
                blocks,
                layout,
            }
        })
        .collect();
    Ok(Presentation { meta, slides })
}

/// Read and parse a deck file. A deck without slides is an error.
pub fn load(file: &Path) -> Result<Presentation> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let presentation =
        parse(&content).with_context(|| format!("Failed to parse {}", file.display()))?;
    if presentation.slides.is_empty() {
        anyhow::bail!("No slides found in {}", file.display());
    }
    Ok(presentation)
}

fn classify_layout(directives: &[Directive], blocks: &[Block]) -> Layout {
    if let Some(d) = directives.iter().find(|d| d.name == "layout") {
        return match d.value.as_str() {
            "title" => Layout::Title,
            "section" => Layout::Section,
            "characters" => Layout::Characters,
            _ => Layout::Content,
        };
    }

    let headings: Vec<u8> = blocks
        .iter()
        .filter_map(|b| match b {
            Block::Heading { level, .. } => Some(*level),
            _ => None,
        })
        .collect();

    if blocks.len() == 1 && headings.len() == 1 {
        return Layout::Section;
    }

    // H1 followed by a single short line reads as a title slide
    if blocks.len() == 2 && headings.first() == Some(&1) {
        let short = match &blocks[1] {
            Block::Heading { level: 2, .. } => true,
            Block::Paragraph { inlines } => inlines_to_text(inlines).len() < 120,
            _ => false,
        };
        if short {
            return Layout::Title;
        }
    }

    Layout::Content
}

/// Extract plain text from inline elements.
pub fn inlines_to_text(inlines: &[Inline]) -> String {
    let mut text = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(s) | Inline::Code(s) => text.push_str(s),
            Inline::Bold(children) | Inline::Italic(children) => {
                text.push_str(&inlines_to_text(children));
            }
        }
    }
    text
}
