//! Slides as the viewer holds them: parsed content plus the swap state used by
//! the access gate.

use std::collections::BTreeSet;

use crate::parser::{Block, Layout, Presentation, Slide};

/// What a slide currently displays.
#[derive(Debug, Clone, PartialEq)]
pub enum SlideContent {
    Blocks(Vec<Block>),
    Locked(LockScreen),
}

/// Generated placeholder shown in place of a hidden sensitive slide.
#[derive(Debug, Clone, PartialEq)]
pub struct LockScreen {
    pub title: String,
}

impl LockScreen {
    pub const HEADLINE: &'static str = "Content Restricted";
    pub const NOTICE: &'static str = "This content contains sensitive information.";
    pub const AUDIENCE: &'static str = "Only Admin Can Access This Content";
    pub const INSTRUCTION: &'static str = "Click the lock icon to enter admin code";
}

#[derive(Debug, Clone)]
pub struct DeckSlide {
    pub number: usize,
    pub layout: Layout,
    pub sensitive: bool,
    pub poster: Option<String>,
    lock_title: String,
    content: SlideContent,
    /// Original blocks, cached the first time the slide is hidden.
    original: Option<Vec<Block>>,
}

impl DeckSlide {
    fn new(number: usize, slide: Slide, sensitive: bool) -> Self {
        let lock_title = slide
            .directive("lock-title")
            .map(str::to_string)
            .or_else(|| slide.title())
            .unwrap_or_else(|| format!("Slide {number}"));
        let poster = slide.poster().map(str::to_string);
        Self {
            number,
            layout: slide.layout,
            sensitive,
            poster,
            lock_title,
            content: SlideContent::Blocks(slide.blocks),
            original: None,
        }
    }

    pub fn content(&self) -> &SlideContent {
        &self.content
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.content, SlideContent::Locked(_))
    }

    /// Replace the content with a lock screen, caching the original first.
    fn hide(&mut self) {
        if let SlideContent::Blocks(blocks) = &self.content {
            if self.original.is_none() {
                self.original = Some(blocks.clone());
            }
        }
        self.content = SlideContent::Locked(LockScreen {
            title: self.lock_title.clone(),
        });
    }

    /// Restore the cached original. A slide that was never hidden is untouched.
    fn reveal(&mut self) {
        if let Some(original) = &self.original {
            self.content = SlideContent::Blocks(original.clone());
        }
    }
}

#[derive(Debug, Clone)]
pub struct Deck {
    slides: Vec<DeckSlide>,
}

impl Deck {
    /// Build the deck, marking slides sensitive from the front matter list and
    /// from `@sensitive` directives. Out-of-range numbers are ignored here and
    /// reported by the compatibility check.
    pub fn new(presentation: &Presentation) -> Self {
        let listed: BTreeSet<usize> = presentation
            .meta
            .access
            .as_ref()
            .map(|a| a.sensitive.iter().copied().collect())
            .unwrap_or_default();

        let slides = presentation
            .slides
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, slide)| {
                let number = i + 1;
                let sensitive = listed.contains(&number) || slide.marked_sensitive();
                DeckSlide::new(number, slide, sensitive)
            })
            .collect();
        Self { slides }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// 1-based lookup.
    pub fn slide(&self, number: usize) -> Option<&DeckSlide> {
        number.checked_sub(1).and_then(|i| self.slides.get(i))
    }

    pub fn sensitive_numbers(&self) -> Vec<usize> {
        self.slides
            .iter()
            .filter(|s| s.sensitive)
            .map(|s| s.number)
            .collect()
    }

    pub fn hide_sensitive(&mut self) {
        for slide in self.slides.iter_mut().filter(|s| s.sensitive) {
            slide.hide();
            tracing::debug!(slide = slide.number, "sensitive slide hidden");
        }
    }

    pub fn reveal_sensitive(&mut self) {
        for slide in self.slides.iter_mut().filter(|s| s.sensitive) {
            slide.reveal();
            tracing::debug!(slide = slide.number, "sensitive slide revealed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    fn deck() -> Deck {
        let pres = parser::parse(
            "---\naccess:\n  sensitive: [2]\n---\n# One\n\nIntro\n\n---\n\n# Log Line\n\nSecret plot\n\n- beat\n\n---\n\n@sensitive: true\n@lock-title: STORY BEATS\nNo heading here",
        )
        .unwrap();
        Deck::new(&pres)
    }

    #[test]
    fn test_sensitive_from_meta_and_directive() {
        assert_eq!(deck().sensitive_numbers(), vec![2, 3]);
    }

    #[test]
    fn test_hide_then_reveal_restores_verbatim() {
        let mut deck = deck();
        let before = deck.slide(2).unwrap().content().clone();

        deck.hide_sensitive();
        let hidden = deck.slide(2).unwrap();
        assert!(hidden.is_locked());
        assert_eq!(
            hidden.content(),
            &SlideContent::Locked(LockScreen {
                title: "Log Line".to_string()
            })
        );

        deck.reveal_sensitive();
        assert_eq!(deck.slide(2).unwrap().content(), &before);
    }

    #[test]
    fn test_hiding_twice_keeps_first_original() {
        let mut deck = deck();
        let before = deck.slide(3).unwrap().content().clone();
        deck.hide_sensitive();
        deck.hide_sensitive();
        deck.reveal_sensitive();
        assert_eq!(deck.slide(3).unwrap().content(), &before);
    }

    #[test]
    fn test_reveal_without_hide_is_noop() {
        let mut deck = deck();
        let before = deck.slide(2).unwrap().content().clone();
        deck.reveal_sensitive();
        assert_eq!(deck.slide(2).unwrap().content(), &before);
    }

    #[test]
    fn test_lock_title_directive_and_fallback() {
        let mut deck = deck();
        deck.hide_sensitive();
        let SlideContent::Locked(lock) = deck.slide(3).unwrap().content() else {
            panic!("slide 3 should be locked");
        };
        assert_eq!(lock.title, "STORY BEATS");
        assert!(!deck.slide(1).unwrap().is_locked());
    }

    #[test]
    fn test_one_based_lookup() {
        let deck = deck();
        assert!(deck.slide(0).is_none());
        assert_eq!(deck.slide(1).unwrap().number, 1);
        assert!(deck.slide(4).is_none());
    }
}
