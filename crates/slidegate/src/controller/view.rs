//! Render-ready snapshot of the presenter, rebuilt every frame.

use crate::deck::DeckSlide;
use crate::parser::CharacterOption;

use super::access::AuthPhase;
use super::characters::Card;
use super::notice::Banner;
use super::poster::OpenPoster;

pub struct View<'a> {
    pub screen: Screen<'a>,
    /// Opacity of the help overlay while it is shown.
    pub help: Option<f32>,
    pub popup: Option<PopupView<'a>>,
    pub poster: Option<&'a OpenPoster>,
    pub notification: Option<&'a str>,
    pub banners: &'a [Banner],
    pub high_contrast: bool,
    pub footer: Option<&'a str>,
}

pub enum Screen<'a> {
    Auth(AuthView<'a>),
    Slide(SlideView<'a>),
    /// Presentation hidden, e.g. behind the help overlay.
    Blank,
}

pub struct AuthView<'a> {
    pub phase: AuthPhase,
    /// Number of characters typed; the code itself is never drawn.
    pub code_len: usize,
    pub error: Option<&'a str>,
    pub locked_out: bool,
}

pub struct SlideView<'a> {
    pub slide: &'a DeckSlide,
    pub current: usize,
    pub total: usize,
    pub progress: f32,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    /// Populated on characters slides.
    pub cards: Vec<Card<'a>>,
    pub focused_card: Option<usize>,
    pub poster_button: Option<PosterButton>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PosterButton {
    pub enabled: bool,
    pub focused: bool,
}

pub struct PopupView<'a> {
    pub title: String,
    pub options: &'a [CharacterOption],
    pub focused: usize,
}
