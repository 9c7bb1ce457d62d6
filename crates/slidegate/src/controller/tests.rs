use std::time::{Duration, Instant};

use super::access::testing::ManualClock;
use super::access::{AuthPhase, digest_hex};
use super::input::{Input, Key, KeyPress, Target};
use super::session::{Session, SessionMode};
use super::view::Screen;
use super::*;
use crate::parser;

const CODE: &str = "rosebud";

fn deck_source() -> String {
    format!(
        "---
access:
  digest: {}
  salt: pepper
  sensitive: [2]
characters:
  - role: hero
    options:
      - {{ name: Aria, image: aria.png }}
      - {{ name: Bram, image: bram.png }}
---
# Opening

A story

---

# Log Line

The secret twist

- beat

---

@layout: characters
# Cast

---

@poster: poster.png
# Poster

- look
",
        digest_hex(CODE, "pepper")
    )
}

struct Fixture {
    presenter: Presenter,
    session: Session,
    clock: ManualClock,
    now: Instant,
}

impl Fixture {
    fn new(session: Session) -> Self {
        let clock = ManualClock::at(10_000);
        let now = Instant::now();
        let pres = parser::parse(&deck_source()).unwrap();
        let presenter =
            Presenter::new(&pres, &session, Box::new(clock.clone()), 1, Vec::new(), now);
        Self {
            presenter,
            session,
            clock,
            now,
        }
    }

    fn public() -> Self {
        let mut session = Session::new();
        session.set_mode(SessionMode::Public);
        Self::new(session)
    }

    fn send(&mut self, input: impl Into<Input>) -> Vec<Effect> {
        self.presenter.handle(input.into(), &mut self.session, self.now)
    }

    fn type_code(&mut self, code: &str) {
        self.send(Input::Text(code.to_string()));
        self.send(Key::Enter);
    }

    fn wait(&mut self, duration: Duration) -> Vec<Effect> {
        self.now += duration;
        self.presenter.tick(None, self.now)
    }

    /// Rebuild the presenter the way a reload does, keeping the session.
    fn reload(&mut self) {
        let pres = parser::parse(&deck_source()).unwrap();
        self.presenter = Presenter::new(
            &pres,
            &self.session,
            Box::new(self.clock.clone()),
            self.presenter.current_slide(),
            Vec::new(),
            self.now,
        );
    }

    fn auth_phase(&self) -> Option<AuthPhase> {
        match self.presenter.view(&self.session, self.now).screen {
            Screen::Auth(auth) => Some(auth.phase),
            _ => None,
        }
    }

    fn auth_error(&self) -> Option<String> {
        match self.presenter.view(&self.session, self.now).screen {
            Screen::Auth(auth) => auth.error.map(str::to_string),
            _ => None,
        }
    }
}

#[test]
fn test_fresh_session_starts_on_mode_selection() {
    let fx = Fixture::new(Session::new());
    assert_eq!(fx.auth_phase(), Some(AuthPhase::ModeSelection));
    assert!(fx.presenter.modal_open());
}

#[test]
fn test_navigation_suppressed_while_auth_visible() {
    let mut fx = Fixture::new(Session::new());
    fx.send(Key::ArrowRight);
    fx.send(Input::Swipe { dx: -120.0 });
    assert_eq!(fx.presenter.current_slide(), 1);
}

#[test]
fn test_select_public_hides_sensitive_slides() {
    let mut fx = Fixture::new(Session::new());
    fx.send(Target::PublicMode);
    assert_eq!(fx.session.mode(), SessionMode::Public);
    assert_eq!(fx.auth_phase(), None);
    assert!(fx.presenter.deck().slide(2).unwrap().is_locked());
}

#[test]
fn test_public_slides_stay_hidden_until_admin_succeeds() {
    let mut fx = Fixture::public();
    let hidden = |fx: &Fixture| fx.presenter.deck().slide(2).unwrap().is_locked();
    fx.send(Key::Num(2));
    assert!(hidden(&fx));

    fx.send(Key::P);
    assert_eq!(fx.auth_phase(), Some(AuthPhase::ModeSelection));
    fx.send(Target::AdminMode);
    assert_eq!(fx.auth_phase(), Some(AuthPhase::CodeEntry));
    assert!(hidden(&fx));

    fx.type_code("wrong");
    assert!(fx.auth_error().is_some_and(|e| e.starts_with("Invalid code.")));
    assert!(hidden(&fx));

    fx.send(Key::Escape);
    assert_eq!(fx.auth_phase(), Some(AuthPhase::ModeSelection));
    assert!(hidden(&fx));

    fx.send(Target::AdminMode);
    for _ in 0..3 {
        fx.type_code("wrong");
        assert!(hidden(&fx));
    }
    fx.type_code(CODE);
    assert!(fx
        .auth_error()
        .is_some_and(|e| e.starts_with("Too many failed attempts. Try again")));
    assert!(hidden(&fx));

    fx.send(Key::Escape);
    fx.send(Target::PublicMode);
    assert_eq!(fx.auth_phase(), None);
    assert_eq!(fx.session.mode(), SessionMode::Public);
    assert!(hidden(&fx));
}

#[test]
fn test_switching_admin_back_to_public_hides_again() {
    let mut fx = Fixture::public();
    fx.send(Key::P);
    fx.send(Target::AdminMode);
    fx.type_code(CODE);
    assert_eq!(fx.session.mode(), SessionMode::Admin);
    assert!(!fx.presenter.deck().slide(2).unwrap().is_locked());

    fx.send(Key::P);
    fx.send(Target::PublicMode);
    assert_eq!(fx.session.mode(), SessionMode::Public);
    assert!(fx.presenter.deck().slide(2).unwrap().is_locked());
}

#[test]
fn test_keyboard_navigation() {
    let mut fx = Fixture::public();
    fx.send(Key::ArrowRight);
    fx.send(Key::Space);
    assert_eq!(fx.presenter.current_slide(), 3);
    fx.send(Key::ArrowLeft);
    assert_eq!(fx.presenter.current_slide(), 2);
    fx.send(Key::End);
    assert_eq!(fx.presenter.current_slide(), 4);
    fx.send(Key::ArrowRight);
    assert_eq!(fx.presenter.current_slide(), 4);
    fx.send(Key::Num(2));
    assert_eq!(fx.presenter.current_slide(), 2);
    fx.send(Key::Num(9));
    assert_eq!(fx.presenter.current_slide(), 2);
    fx.send(Key::Home);
    assert_eq!(fx.presenter.current_slide(), 1);
}

#[test]
fn test_swipe_respects_threshold() {
    let mut fx = Fixture::public();
    fx.send(Input::Swipe { dx: -30.0 });
    assert_eq!(fx.presenter.current_slide(), 1);
    fx.send(Input::Swipe { dx: -60.0 });
    assert_eq!(fx.presenter.current_slide(), 2);
    fx.send(Input::Swipe { dx: 80.0 });
    assert_eq!(fx.presenter.current_slide(), 1);
}

#[test]
fn test_help_blocks_navigation_and_fades_out() {
    let mut fx = Fixture::public();
    fx.send(Key::H);
    assert!(matches!(
        fx.presenter.view(&fx.session, fx.now).screen,
        Screen::Blank
    ));
    fx.send(Key::ArrowRight);
    assert_eq!(fx.presenter.current_slide(), 1);

    fx.send(Key::Escape);
    fx.wait(Duration::from_millis(100));
    assert!(fx.presenter.modal_open());
    fx.wait(Duration::from_millis(250));
    assert!(!fx.presenter.modal_open());
    fx.send(Key::ArrowRight);
    assert_eq!(fx.presenter.current_slide(), 2);
}

#[test]
fn test_help_does_not_open_over_auth() {
    let mut fx = Fixture::new(Session::new());
    fx.send(Key::H);
    let view = fx.presenter.view(&fx.session, fx.now);
    assert!(view.help.is_none());
    assert!(matches!(view.screen, Screen::Auth(_)));
}

#[test]
fn test_p_closes_help_and_shows_mode_selection() {
    let mut fx = Fixture::public();
    fx.send(Key::H);
    fx.send(Key::P);
    assert_eq!(fx.auth_phase(), Some(AuthPhase::ModeSelection));
    assert!(fx.presenter.view(&fx.session, fx.now).help.is_none());
    assert_eq!(fx.session.mode(), SessionMode::Public);
}

#[test]
fn test_correct_code_reveals() {
    let mut fx = Fixture::public();
    fx.send(Target::LockIcon);
    assert_eq!(fx.presenter.current_slide(), 1);
    assert_eq!(fx.auth_phase(), None);

    fx.send(Key::ArrowRight);
    fx.send(Target::LockIcon);
    assert_eq!(fx.auth_phase(), Some(AuthPhase::CodeEntry));

    fx.type_code(CODE);
    assert_eq!(fx.auth_phase(), None);
    assert_eq!(fx.session.mode(), SessionMode::Admin);
    assert!(!fx.presenter.deck().slide(2).unwrap().is_locked());
}

#[test]
fn test_code_entry_captures_keys() {
    let mut fx = Fixture::new(Session::new());
    fx.send(Target::AdminMode);
    fx.send(Input::Text("qh".to_string()));
    let effects = fx.send(Key::Q);
    assert!(effects.is_empty());
    fx.send(Key::Backspace);
    match fx.presenter.view(&fx.session, fx.now).screen {
        Screen::Auth(auth) => assert_eq!(auth.code_len, 1),
        _ => panic!("auth page should be visible"),
    }
    fx.send(Key::Escape);
    assert_eq!(fx.auth_phase(), Some(AuthPhase::ModeSelection));
}

#[test]
fn test_lockout_survives_reload_but_counter_resets() {
    let mut fx = Fixture::new(Session::new());
    fx.send(Target::AdminMode);
    fx.type_code("one");
    fx.type_code("two");
    assert_eq!(
        fx.auth_error().as_deref(),
        Some("Invalid code. 1 attempts remaining.")
    );
    fx.type_code("three");
    assert_eq!(
        fx.auth_error().as_deref(),
        Some("Too many failed attempts. Access locked for 5 minutes.")
    );

    fx.reload();
    assert_eq!(fx.auth_phase(), Some(AuthPhase::ModeSelection));
    fx.send(Target::AdminMode);
    fx.type_code(CODE);
    assert_eq!(
        fx.auth_error().as_deref(),
        Some("Too many failed attempts. Try again in 5 minutes.")
    );

    fx.clock.advance_minutes(5);
    fx.type_code("wrong");
    assert_eq!(
        fx.auth_error().as_deref(),
        Some("Invalid code. 2 attempts remaining.")
    );
}

#[test]
fn test_public_mode_survives_reload() {
    let mut fx = Fixture::new(Session::new());
    fx.send(Target::PublicMode);
    fx.send(Key::ArrowRight);
    fx.reload();
    assert_eq!(fx.auth_phase(), None);
    assert_eq!(fx.presenter.current_slide(), 2);
    assert!(fx.presenter.deck().slide(2).unwrap().is_locked());
}

#[test]
fn test_character_popup_via_keyboard() {
    let mut fx = Fixture::public();
    fx.send(Key::Num(3));
    fx.send(Key::Tab);
    fx.send(Key::Enter);
    assert!(fx.presenter.modal_open());

    let view = fx.presenter.view(&fx.session, fx.now);
    let popup = view.popup.expect("popup should be open");
    assert_eq!(popup.title, "Select Hero Character");
    assert_eq!(popup.focused, 0);

    fx.send(Key::ArrowRight);
    assert_eq!(fx.presenter.current_slide(), 3);
    fx.send(Key::Space);
    assert!(!fx.presenter.modal_open());

    match fx.presenter.view(&fx.session, fx.now).screen {
        Screen::Slide(slide) => assert_eq!(slide.cards[0].name, "Bram"),
        _ => panic!("slide should be visible"),
    }
}

#[test]
fn test_character_popup_closes_on_overlay_click() {
    let mut fx = Fixture::public();
    fx.send(Key::Num(3));
    fx.send(Target::CharacterCard(0));
    assert!(fx.presenter.modal_open());
    fx.send(Target::PopupOverlay);
    assert!(!fx.presenter.modal_open());
}

#[test]
fn test_popup_panel_click_keeps_popup_open() {
    let mut fx = Fixture::public();
    fx.send(Key::Num(3));
    fx.send(Target::CharacterCard(0));
    fx.send(Target::PopupPanel);
    assert!(fx.presenter.modal_open());
    fx.send(Target::PopupClose);
    assert!(!fx.presenter.modal_open());
}

#[test]
fn test_shift_tab_focuses_from_the_end() {
    let mut fx = Fixture::public();
    fx.send(Key::Num(4));
    fx.send(KeyPress::shift(Key::Tab));
    match fx.presenter.view(&fx.session, fx.now).screen {
        Screen::Slide(slide) => assert!(slide.poster_button.is_some_and(|b| b.focused)),
        _ => panic!("slide should be visible"),
    }
    assert_eq!(fx.send(Key::Enter), vec![Effect::SetFullscreen(true)]);
}

#[test]
fn test_poster_requests_fullscreen_and_swallows_space() {
    let mut fx = Fixture::public();
    fx.send(Key::End);
    let effects = fx.send(Key::V);
    assert_eq!(effects, vec![Effect::SetFullscreen(true)]);
    assert!(fx.presenter.view(&fx.session, fx.now).poster.is_some());

    fx.send(Key::ArrowLeft);
    assert_eq!(fx.presenter.current_slide(), 4);

    let effects = fx.send(Key::Space);
    assert_eq!(effects, vec![Effect::SetFullscreen(false)]);
    assert!(fx.presenter.view(&fx.session, fx.now).poster.is_none());

    fx.wait(Duration::from_millis(500));
    fx.send(Key::ArrowLeft);
    fx.send(Key::Space);
    assert_eq!(fx.presenter.current_slide(), 3);

    fx.wait(Duration::from_millis(600));
    fx.send(Key::Space);
    assert_eq!(fx.presenter.current_slide(), 4);
}

#[test]
fn test_poster_falls_back_without_fullscreen() {
    let mut fx = Fixture::public();
    fx.send(Key::End);
    fx.send(Target::PosterButton);
    let effects = fx.wait(Duration::from_millis(600));
    assert!(effects.contains(&Effect::SetMaximized(true)));
    let view = fx.presenter.view(&fx.session, fx.now);
    assert!(view.poster.expect("poster should be open").fallback);
}

#[test]
fn test_accessibility_toggle_notifies() {
    let mut fx = Fixture::public();
    fx.send(Key::A);
    assert!(fx.presenter.high_contrast());
    assert_eq!(
        fx.presenter.view(&fx.session, fx.now).notification,
        Some("Accessibility mode enabled")
    );
    fx.wait(Duration::from_secs(5));
    assert_eq!(fx.presenter.view(&fx.session, fx.now).notification, None);
}

#[test]
fn test_entering_fullscreen_shows_navigation_hint() {
    let mut fx = Fixture::public();
    assert_eq!(fx.send(Key::F), vec![Effect::SetFullscreen(true)]);
    assert_eq!(
        fx.presenter.view(&fx.session, fx.now).notification,
        Some(notice::NAVIGATION_HINT)
    );
    fx.presenter.tick(Some(true), fx.now);
    fx.wait(Duration::from_secs(5));
    assert_eq!(fx.presenter.view(&fx.session, fx.now).notification, None);

    assert_eq!(fx.send(Key::F), vec![Effect::SetFullscreen(false)]);
    assert_eq!(fx.presenter.view(&fx.session, fx.now).notification, None);
}

#[test]
fn test_reload_and_quit_effects() {
    let mut fx = Fixture::public();
    assert_eq!(fx.send(KeyPress::ctrl(Key::R)), vec![Effect::Reload]);
    assert_eq!(fx.send(Key::Q), vec![Effect::Quit]);
    assert!(fx.send(Key::R).is_empty());
}

#[test]
fn test_deck_without_access_has_no_gate() {
    let pres = parser::parse("# Only\n\nOne slide").unwrap();
    let session = Session::new();
    let mut presenter = Presenter::new(
        &pres,
        &session,
        Box::new(ManualClock::at(0)),
        1,
        vec!["warning".to_string()],
        Instant::now(),
    );
    let mut session = session;
    presenter.handle(Key::P.into(), &mut session, Instant::now());
    let view = presenter.view(&session, Instant::now());
    assert!(matches!(view.screen, Screen::Slide(_)));
    assert_eq!(view.banners.len(), 1);
    assert_eq!(session.mode(), SessionMode::Unset);
}
