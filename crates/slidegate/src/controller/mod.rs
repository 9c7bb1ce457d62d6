//! UI-free presentation logic. The egui app feeds [`Input`]s in, applies the
//! returned [`Effect`]s to the window and draws the [`View`].

pub mod access;
pub mod characters;
pub mod fullscreen;
pub mod help;
pub mod input;
pub mod navigation;
pub mod notice;
pub mod poster;
pub mod session;
pub mod view;

#[cfg(test)]
mod tests;

use std::time::Instant;

use crate::deck::{Deck, DeckSlide};
use crate::parser::{Layout, Presentation};

use access::{AccessController, Clock, GateConfig};
use characters::CharacterPicker;
use fullscreen::Fullscreen;
use help::HelpOverlay;
use input::{Input, Key, KeyPress, SWIPE_THRESHOLD, Target};
use navigation::Navigator;
use notice::Notices;
use poster::PosterViewer;
use session::Session;
use view::{AuthView, PopupView, PosterButton, Screen, SlideView, View};

/// Window-level requests the presenter cannot carry out itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    SetFullscreen(bool),
    SetMaximized(bool),
    SetDecorations(bool),
    Quit,
    Reload,
}

/// Keyboard focus on the presentation screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Card(usize),
    PosterButton,
}

pub struct Presenter {
    deck: Deck,
    nav: Navigator,
    gate: Option<AccessController>,
    help: HelpOverlay,
    characters: CharacterPicker,
    poster: PosterViewer,
    /// The poster asked for fullscreen and gives it back on close.
    poster_fullscreen: bool,
    fullscreen: Fullscreen,
    notices: Notices,
    high_contrast: bool,
    focus: Option<Focus>,
    footer: Option<String>,
}

impl Presenter {
    /// Build the presenter for a freshly parsed deck. `session` carries the
    /// mode and lockout across reloads; everything else starts fresh.
    pub fn new(
        presentation: &Presentation,
        session: &Session,
        clock: Box<dyn Clock>,
        start_slide: usize,
        warnings: Vec<String>,
        now: Instant,
    ) -> Self {
        let mut deck = Deck::new(presentation);
        let gate = presentation.meta.access.as_ref().map(|meta| {
            let mut gate = AccessController::new(GateConfig::from_meta(meta), clock);
            gate.start(session, &mut deck);
            gate
        });

        let mut notices = Notices::default();
        for warning in warnings {
            notices.add_banner(warning, now);
        }

        Self {
            nav: Navigator::new(deck.len(), start_slide),
            deck,
            gate,
            help: HelpOverlay::default(),
            characters: CharacterPicker::new(&presentation.meta.characters),
            poster: PosterViewer::default(),
            poster_fullscreen: false,
            fullscreen: Fullscreen::default(),
            notices,
            high_contrast: false,
            focus: None,
            footer: presentation.meta.footer.clone(),
        }
    }

    pub fn current_slide(&self) -> usize {
        self.nav.current()
    }

    #[cfg(test)]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[cfg(test)]
    pub fn high_contrast(&self) -> bool {
        self.high_contrast
    }

    fn auth_visible(&self) -> bool {
        self.gate.as_ref().is_some_and(|g| g.is_page_visible())
    }

    fn entering_code(&self) -> bool {
        self.gate.as_ref().is_some_and(|g| g.is_entering_code())
    }

    pub fn notify(&mut self, message: impl Into<String>, now: Instant) {
        self.notices.notify(message, now);
    }

    /// Any overlay that blocks navigation.
    pub fn modal_open(&self) -> bool {
        self.auth_visible()
            || self.help.is_visible()
            || self.characters.is_open()
            || self.poster.is_open()
    }

    pub fn handle(&mut self, input: Input, session: &mut Session, now: Instant) -> Vec<Effect> {
        match input {
            Input::Key(key) => self.handle_key(key, session, now),
            Input::Text(text) => {
                if let Some(gate) = self.gate.as_mut() {
                    gate.push_text(&text);
                }
                Vec::new()
            }
            Input::Click(target) => self.handle_click(target, session, now),
            Input::Swipe { dx } => {
                if !self.modal_open() {
                    if dx <= -SWIPE_THRESHOLD {
                        self.go(Navigator::next);
                    } else if dx >= SWIPE_THRESHOLD {
                        self.go(Navigator::previous);
                    }
                }
                Vec::new()
            }
        }
    }

    /// Advance timers and reconcile the window state. `actual_fullscreen` is
    /// what the window currently reports, if anything.
    pub fn tick(&mut self, actual_fullscreen: Option<bool>, now: Instant) -> Vec<Effect> {
        self.help.tick(now);
        self.notices.tick(now);
        let effects = self.fullscreen.observe(actual_fullscreen, now);
        if self.fullscreen.is_fallback() {
            self.poster.use_fallback();
        }
        effects
    }

    /// Whether something on screen changes over time without input.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.help.is_animating(now)
            || self.poster.guard_pending(now)
            || self.notices.notification().is_some()
            || !self.notices.banners().is_empty()
            || matches!(
                self.fullscreen.state(),
                fullscreen::WindowState::Requested { .. }
            )
    }

    fn handle_key(&mut self, press: KeyPress, session: &mut Session, now: Instant) -> Vec<Effect> {
        if self.entering_code() {
            self.handle_code_key(press.key, session);
            return Vec::new();
        }

        if press.ctrl {
            return match press.key {
                Key::R => vec![Effect::Reload],
                _ => Vec::new(),
            };
        }

        if press.key == Key::Q {
            return vec![Effect::Quit];
        }

        if self.poster.is_open() {
            if matches!(press.key, Key::Escape | Key::Enter | Key::Space) {
                return self.close_poster(now);
            }
            return Vec::new();
        }

        if self.characters.is_open() {
            self.handle_popup_key(press);
            return Vec::new();
        }

        match press.key {
            Key::P => {
                if let Some(gate) = self.gate.as_mut() {
                    self.help.close_now();
                    gate.show_mode_selection();
                }
                return Vec::new();
            }
            Key::F => {
                let effects = self.fullscreen.toggle(now);
                if effects.contains(&Effect::SetFullscreen(true)) {
                    self.notices.notify(notice::NAVIGATION_HINT, now);
                }
                return effects;
            }
            Key::H => {
                if !self.auth_visible() {
                    self.help.toggle(now);
                }
                return Vec::new();
            }
            Key::Escape => {
                self.help.hide(now);
                return Vec::new();
            }
            _ => {}
        }

        if self.auth_visible() || self.help.is_visible() {
            return Vec::new();
        }

        match press.key {
            Key::A => {
                self.high_contrast = !self.high_contrast;
                let state = if self.high_contrast { "enabled" } else { "disabled" };
                self.notices
                    .notify(format!("Accessibility mode {state}"), now);
                Vec::new()
            }
            Key::Space if self.poster.swallows_space(now) => Vec::new(),
            Key::Space | Key::Enter if self.focus.is_some() => self.activate_focus(now),
            Key::ArrowRight | Key::Space => {
                self.go(Navigator::next);
                Vec::new()
            }
            Key::ArrowLeft => {
                self.go(Navigator::previous);
                Vec::new()
            }
            Key::Home => {
                self.go(Navigator::first);
                Vec::new()
            }
            Key::End => {
                self.go(Navigator::last);
                Vec::new()
            }
            Key::Num(n) => {
                let n = usize::from(n);
                if n <= self.nav.total() {
                    self.go(|nav| nav.go_to(n));
                }
                Vec::new()
            }
            Key::Tab => {
                self.cycle_focus(press.shift);
                Vec::new()
            }
            Key::V => self.open_poster(now),
            _ => Vec::new(),
        }
    }

    fn handle_code_key(&mut self, key: Key, session: &mut Session) {
        let Some(gate) = self.gate.as_mut() else {
            return;
        };
        match key {
            Key::Enter => {
                gate.verify(session, &mut self.deck);
            }
            Key::Escape => gate.cancel_admin_auth(),
            Key::Backspace => gate.pop_char(),
            _ => {}
        }
    }

    fn handle_popup_key(&mut self, press: KeyPress) {
        match press.key {
            Key::Escape => self.characters.close(),
            Key::Tab if press.shift => self.characters.focus_previous(),
            Key::Tab | Key::ArrowRight | Key::ArrowDown => self.characters.focus_next(),
            Key::ArrowLeft | Key::ArrowUp => self.characters.focus_previous(),
            Key::Enter | Key::Space => {
                self.characters.choose_focused();
            }
            _ => {}
        }
    }

    fn handle_click(&mut self, target: Target, session: &mut Session, now: Instant) -> Vec<Effect> {
        match target {
            Target::PublicMode => {
                if let Some(gate) = self.gate.as_mut() {
                    gate.select_public(session, &mut self.deck);
                }
            }
            Target::AdminMode => {
                if let Some(gate) = self.gate.as_mut() {
                    gate.show_admin_auth();
                }
            }
            Target::SubmitCode => {
                if let Some(gate) = self.gate.as_mut() {
                    gate.verify(session, &mut self.deck);
                }
            }
            Target::CancelCode => {
                if let Some(gate) = self.gate.as_mut() {
                    gate.cancel_admin_auth();
                }
            }
            Target::LockIcon => {
                let locked = self
                    .deck
                    .slide(self.nav.current())
                    .is_some_and(|s| s.is_locked());
                if locked && !self.modal_open() {
                    if let Some(gate) = self.gate.as_mut() {
                        gate.show_admin_auth();
                    }
                }
            }
            Target::HelpClose | Target::HelpBackdrop => self.help.hide(now),
            Target::HelpPanel | Target::PopupPanel => {}
            Target::CharacterCard(index) => {
                if !self.modal_open() {
                    self.focus = Some(Focus::Card(index));
                    self.characters.open(index);
                }
            }
            Target::CharacterOption(index) => {
                self.characters.choose(index);
            }
            Target::PopupOverlay | Target::PopupClose => self.characters.close(),
            Target::PosterButton => {
                if !self.modal_open() {
                    return self.open_poster(now);
                }
            }
            Target::PosterViewer => return self.close_poster(now),
            Target::Banner(id) => self.notices.dismiss(id),
            Target::NextButton => {
                if !self.modal_open() {
                    self.go(Navigator::next);
                }
            }
            Target::PrevButton => {
                if !self.modal_open() {
                    self.go(Navigator::previous);
                }
            }
        }
        Vec::new()
    }

    fn go(&mut self, step: impl FnOnce(&mut Navigator) -> bool) {
        if step(&mut self.nav) {
            self.focus = None;
        }
    }

    fn focusables(&self) -> Vec<Focus> {
        let Some(slide) = self.deck.slide(self.nav.current()) else {
            return Vec::new();
        };
        let mut items = Vec::new();
        if slide.layout == Layout::Characters && !slide.is_locked() {
            items.extend((0..self.characters.role_count()).map(Focus::Card));
        }
        if slide.poster.is_some() && !slide.is_locked() {
            items.push(Focus::PosterButton);
        }
        items
    }

    fn cycle_focus(&mut self, backwards: bool) {
        let items = self.focusables();
        if items.is_empty() {
            self.focus = None;
            return;
        }
        let position = self
            .focus
            .and_then(|f| items.iter().position(|&item| item == f));
        let next = match (position, backwards) {
            (None, false) => 0,
            (None, true) => items.len() - 1,
            (Some(i), false) => (i + 1) % items.len(),
            (Some(i), true) => (i + items.len() - 1) % items.len(),
        };
        self.focus = Some(items[next]);
    }

    fn activate_focus(&mut self, now: Instant) -> Vec<Effect> {
        match self.focus {
            Some(Focus::Card(index)) => {
                self.characters.open(index);
                Vec::new()
            }
            Some(Focus::PosterButton) => self.open_poster(now),
            None => Vec::new(),
        }
    }

    fn open_poster(&mut self, now: Instant) -> Vec<Effect> {
        let Some(slide) = self.deck.slide(self.nav.current()) else {
            return Vec::new();
        };
        if slide.is_locked() {
            return Vec::new();
        }
        let Some(path) = slide.poster.clone() else {
            return Vec::new();
        };
        if !self.poster.open(&path, now) {
            return Vec::new();
        }
        tracing::debug!(path = %path, "poster opened");
        if self.fullscreen.is_active() {
            if self.fullscreen.is_fallback() {
                self.poster.use_fallback();
            }
            return Vec::new();
        }
        self.poster_fullscreen = true;
        self.fullscreen.request(now)
    }

    fn close_poster(&mut self, now: Instant) -> Vec<Effect> {
        if !self.poster.close(now) {
            return Vec::new();
        }
        if std::mem::take(&mut self.poster_fullscreen) {
            self.fullscreen.exit()
        } else {
            Vec::new()
        }
    }

    pub fn view(&self, session: &Session, now: Instant) -> View<'_> {
        let help = self.help.is_visible().then(|| self.help.opacity(now));

        let screen = if let Some(gate) = self.gate.as_ref().filter(|g| g.is_page_visible()) {
            Screen::Auth(AuthView {
                phase: gate.phase(),
                code_len: gate.code().chars().count(),
                error: gate.error(),
                locked_out: gate.is_locked_out(session),
            })
        } else if self.help.is_visible() {
            Screen::Blank
        } else {
            match self.deck.slide(self.nav.current()) {
                Some(slide) => Screen::Slide(self.slide_view(slide, now)),
                None => Screen::Blank,
            }
        };

        let popup = self.characters.title().map(|title| PopupView {
            title,
            options: self.characters.options(),
            focused: self.characters.focused().unwrap_or(0),
        });

        View {
            screen,
            help,
            popup,
            poster: self.poster.current(),
            notification: self.notices.notification(),
            banners: self.notices.banners(),
            high_contrast: self.high_contrast,
            footer: self.footer.as_deref(),
        }
    }

    fn slide_view<'a>(&'a self, slide: &'a DeckSlide, now: Instant) -> SlideView<'a> {
        let unlocked = !slide.is_locked();
        let cards = if slide.layout == Layout::Characters && unlocked {
            self.characters.cards()
        } else {
            Vec::new()
        };
        let poster_button = slide.poster.as_ref().filter(|_| unlocked).map(|_| PosterButton {
            enabled: self.poster.button_enabled(now),
            focused: self.focus == Some(Focus::PosterButton),
        });
        SlideView {
            slide,
            current: self.nav.current(),
            total: self.nav.total(),
            progress: self.nav.progress(),
            can_go_previous: self.nav.can_go_previous(),
            can_go_next: self.nav.can_go_next(),
            cards,
            focused_card: match self.focus {
                Some(Focus::Card(i)) => Some(i),
                _ => None,
            },
            poster_button,
        }
    }
}
