//! The access gate: session mode selection, admin code verification with
//! attempt counting and timed lockout, and hiding/revealing sensitive slides.
//!
//! This is an advisory gate, not access control. The expected digest, the
//! salt and the hidden slide content all ship inside the deck file, so anyone
//! holding the file can read everything. It provides no confidentiality
//! guarantee.

use std::time::{SystemTime, UNIX_EPOCH};

use sha2::{Digest, Sha256};

use crate::deck::Deck;
use crate::error::AccessError;
use crate::parser::AccessMeta;

use super::session::{Session, SessionMode};

const MS_PER_MINUTE: u64 = 60_000;

pub const MSG_EMPTY: &str = "Please enter a code.";
pub const MSG_ERROR: &str = "Authentication error occurred.";

/// Wall-clock source for lockout expiry, in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
pub struct GateConfig {
    pub expected_digest: Option<String>,
    pub salt: String,
    pub max_attempts: u32,
    pub lockout_minutes: u64,
}

impl GateConfig {
    pub fn from_meta(meta: &AccessMeta) -> Self {
        Self {
            expected_digest: meta.digest.clone(),
            salt: meta.salt.clone(),
            max_attempts: meta.max_attempts.max(1),
            lockout_minutes: meta.lockout_minutes,
        }
    }

    /// Decode the configured digest.
    pub fn expected_bytes(&self) -> Result<[u8; 32], AccessError> {
        let hex_digest = self
            .expected_digest
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or(AccessError::DigestMissing)?;
        let bytes = hex::decode(hex_digest)
            .map_err(|_| AccessError::DigestMalformed(hex_digest.to_string()))?;
        bytes
            .try_into()
            .map_err(|_| AccessError::DigestMalformed(hex_digest.to_string()))
    }

    fn lockout_ms(&self) -> u64 {
        self.lockout_minutes.saturating_mul(MS_PER_MINUTE)
    }
}

/// Lowercase hex SHA-256 of `code + salt`.
pub fn digest_hex(code: &str, salt: &str) -> String {
    hex::encode(digest(code, salt))
}

fn digest(code: &str, salt: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    hasher.update(salt.as_bytes());
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    /// Auth page not shown.
    Closed,
    /// Auth page shows the public/admin choice.
    ModeSelection,
    /// Auth page shows the code form.
    CodeEntry,
}

/// Outcome of a code submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Admitted,
    Rejected { remaining: u32 },
    LockedOut,
    StillLocked { minutes: u64 },
    Empty,
    Failed,
}

pub struct AccessController {
    config: GateConfig,
    phase: AuthPhase,
    /// Failed submissions since the last success or lockout. Not persisted.
    attempts: u32,
    code: String,
    error: Option<String>,
    clock: Box<dyn Clock>,
}

impl AccessController {
    pub fn new(config: GateConfig, clock: Box<dyn Clock>) -> Self {
        Self {
            config,
            phase: AuthPhase::Closed,
            attempts: 0,
            code: String::new(),
            error: None,
            clock,
        }
    }

    /// Apply the stored session mode to the deck and decide whether the auth
    /// page opens.
    pub fn start(&mut self, session: &Session, deck: &mut Deck) {
        match session.mode() {
            SessionMode::Admin => {
                deck.reveal_sensitive();
                self.phase = AuthPhase::Closed;
            }
            SessionMode::Public => {
                deck.hide_sensitive();
                self.phase = AuthPhase::Closed;
            }
            SessionMode::Unset => self.phase = AuthPhase::ModeSelection,
        }
        tracing::debug!(mode = ?session.mode(), "access gate started");
    }

    pub fn phase(&self) -> AuthPhase {
        self.phase
    }

    pub fn is_page_visible(&self) -> bool {
        self.phase != AuthPhase::Closed
    }

    pub fn is_entering_code(&self) -> bool {
        self.phase == AuthPhase::CodeEntry
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[cfg(test)]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn select_public(&mut self, session: &mut Session, deck: &mut Deck) {
        session.set_mode(SessionMode::Public);
        self.phase = AuthPhase::Closed;
        deck.hide_sensitive();
        tracing::info!("public mode selected");
    }

    /// Open the code form, opening the auth page first if needed.
    pub fn show_admin_auth(&mut self) {
        self.phase = AuthPhase::CodeEntry;
    }

    /// Back to the mode buttons, clearing the form.
    pub fn cancel_admin_auth(&mut self) {
        self.phase = AuthPhase::ModeSelection;
        self.error = None;
        self.code.clear();
    }

    /// Re-open the auth page with the mode buttons. The stored mode is kept
    /// until the user picks again.
    pub fn show_mode_selection(&mut self) {
        self.cancel_admin_auth();
    }

    pub fn push_text(&mut self, text: &str) {
        if self.is_entering_code() {
            self.code.extend(text.chars().filter(|c| !c.is_control()));
        }
    }

    pub fn pop_char(&mut self) {
        if self.is_entering_code() {
            self.code.pop();
        }
    }

    pub fn is_locked_out(&self, session: &Session) -> bool {
        session
            .lockout_until()
            .is_some_and(|until| self.clock.now_millis() < until)
    }

    pub fn verify(&mut self, session: &mut Session, deck: &mut Deck) -> Verdict {
        self.error = None;

        if self.code.trim().is_empty() {
            self.error = Some(MSG_EMPTY.to_string());
            return Verdict::Empty;
        }

        if let Some(until) = session.lockout_until() {
            let now = self.clock.now_millis();
            if now < until {
                let minutes = (until - now).div_ceil(MS_PER_MINUTE);
                self.error = Some(format!(
                    "Too many failed attempts. Try again in {minutes} minutes."
                ));
                return Verdict::StillLocked { minutes };
            }
        }

        let expected = match self.config.expected_bytes() {
            Ok(expected) => expected,
            Err(e) => {
                tracing::error!(error = %e, "error during authentication");
                self.error = Some(MSG_ERROR.to_string());
                return Verdict::Failed;
            }
        };

        if digest(self.code.trim(), &self.config.salt) == expected {
            self.attempts = 0;
            self.code.clear();
            session.clear_lockout();
            session.set_mode(SessionMode::Admin);
            deck.reveal_sensitive();
            self.phase = AuthPhase::Closed;
            tracing::info!("admin mode granted");
            return Verdict::Admitted;
        }

        self.attempts += 1;
        self.code.clear();
        tracing::warn!(attempts = self.attempts, "invalid access code");

        if self.attempts >= self.config.max_attempts {
            let until = self
                .clock
                .now_millis()
                .saturating_add(self.config.lockout_ms());
            session.set_lockout_until(until);
            self.attempts = 0;
            self.error = Some(format!(
                "Too many failed attempts. Access locked for {} minutes.",
                self.config.lockout_minutes
            ));
            return Verdict::LockedOut;
        }

        let remaining = self.config.max_attempts - self.attempts;
        self.error = Some(format!("Invalid code. {remaining} attempts remaining."));
        Verdict::Rejected { remaining }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::Clock;

    /// Clock the test advances by hand.
    #[derive(Clone, Default)]
    pub struct ManualClock(Rc<Cell<u64>>);

    impl ManualClock {
        pub fn at(ms: u64) -> Self {
            Self(Rc::new(Cell::new(ms)))
        }

        pub fn advance_minutes(&self, minutes: u64) {
            self.0.set(self.0.get() + minutes * 60_000);
        }
    }

    impl Clock for ManualClock {
        fn now_millis(&self) -> u64 {
            self.0.get()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ManualClock;
    use super::*;
    use crate::parser;

    const CODE: &str = "open sesame";
    const SALT: &str = "film_salt";

    fn deck() -> Deck {
        let pres = parser::parse(
            "# One\n\nIntro\n\n---\n\n@sensitive: true\n# Log Line\n\nA secret\n\n- beat",
        )
        .unwrap();
        Deck::new(&pres)
    }

    fn gate(clock: &ManualClock) -> AccessController {
        let config = GateConfig {
            expected_digest: Some(digest_hex(CODE, SALT)),
            salt: SALT.to_string(),
            max_attempts: 3,
            lockout_minutes: 5,
        };
        AccessController::new(config, Box::new(clock.clone()))
    }

    fn submit(
        gate: &mut AccessController,
        session: &mut Session,
        deck: &mut Deck,
        code: &str,
    ) -> Verdict {
        gate.show_admin_auth();
        gate.push_text(code);
        gate.verify(session, deck)
    }

    #[test]
    fn test_digest_hex_is_sha256_of_code_and_salt() {
        // sha256("abc")
        assert_eq!(
            digest_hex("ab", "c"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_unset_session_opens_mode_selection() {
        let clock = ManualClock::at(0);
        let mut gate = gate(&clock);
        let mut deck = deck();
        gate.start(&Session::new(), &mut deck);
        assert_eq!(gate.phase(), AuthPhase::ModeSelection);
        assert!(!deck.slide(2).unwrap().is_locked());
    }

    #[test]
    fn test_public_session_hides_on_start() {
        let clock = ManualClock::at(0);
        let mut gate = gate(&clock);
        let mut deck = deck();
        let mut session = Session::new();
        session.set_mode(SessionMode::Public);
        gate.start(&session, &mut deck);
        assert_eq!(gate.phase(), AuthPhase::Closed);
        assert!(deck.slide(2).unwrap().is_locked());
    }

    #[test]
    fn test_correct_code_admits_and_restores() {
        let clock = ManualClock::at(0);
        let mut gate = gate(&clock);
        let mut deck = deck();
        let mut session = Session::new();
        let original = deck.slide(2).unwrap().content().clone();

        gate.select_public(&mut session, &mut deck);
        assert!(deck.slide(2).unwrap().is_locked());

        let verdict = submit(&mut gate, &mut session, &mut deck, &format!("  {CODE} "));
        assert_eq!(verdict, Verdict::Admitted);
        assert_eq!(session.mode(), SessionMode::Admin);
        assert_eq!(gate.phase(), AuthPhase::Closed);
        assert_eq!(deck.slide(2).unwrap().content(), &original);
    }

    #[test]
    fn test_wrong_codes_count_down_then_lock() {
        let clock = ManualClock::at(1_000);
        let mut gate = gate(&clock);
        let mut deck = deck();
        let mut session = Session::new();

        assert_eq!(
            submit(&mut gate, &mut session, &mut deck, "nope"),
            Verdict::Rejected { remaining: 2 }
        );
        assert_eq!(gate.error(), Some("Invalid code. 2 attempts remaining."));
        assert_eq!(gate.code(), "");

        assert_eq!(
            submit(&mut gate, &mut session, &mut deck, "nope"),
            Verdict::Rejected { remaining: 1 }
        );
        assert_eq!(
            submit(&mut gate, &mut session, &mut deck, "nope"),
            Verdict::LockedOut
        );
        assert_eq!(
            gate.error(),
            Some("Too many failed attempts. Access locked for 5 minutes.")
        );
        assert_eq!(session.lockout_until(), Some(1_000 + 5 * 60_000));
        assert!(gate.is_locked_out(&session));
    }

    #[test]
    fn test_huge_lockout_saturates_instead_of_wrapping() {
        let clock = ManualClock::at(1_700_000_000_000);
        let config = GateConfig {
            expected_digest: Some(digest_hex(CODE, SALT)),
            salt: SALT.to_string(),
            max_attempts: 3,
            lockout_minutes: u64::MAX,
        };
        let mut gate = AccessController::new(config, Box::new(clock.clone()));
        let mut deck = deck();
        let mut session = Session::new();

        for _ in 0..2 {
            submit(&mut gate, &mut session, &mut deck, "wrong");
        }
        assert_eq!(
            submit(&mut gate, &mut session, &mut deck, "wrong"),
            Verdict::LockedOut
        );
        assert_eq!(session.lockout_until(), Some(u64::MAX));

        clock.advance_minutes(60 * 24 * 365);
        assert!(gate.is_locked_out(&session));
        assert!(matches!(
            submit(&mut gate, &mut session, &mut deck, CODE),
            Verdict::StillLocked { .. }
        ));
    }

    #[test]
    fn test_lockout_blocks_even_the_right_code_until_expiry() {
        let clock = ManualClock::at(0);
        let mut gate = gate(&clock);
        let mut deck = deck();
        let mut session = Session::new();
        for _ in 0..3 {
            submit(&mut gate, &mut session, &mut deck, "wrong");
        }

        clock.advance_minutes(1);
        assert_eq!(
            submit(&mut gate, &mut session, &mut deck, CODE),
            Verdict::StillLocked { minutes: 4 }
        );
        assert_eq!(
            gate.error(),
            Some("Too many failed attempts. Try again in 4 minutes.")
        );
        assert_eq!(session.mode(), SessionMode::Unset);

        clock.advance_minutes(4);
        gate.cancel_admin_auth();
        assert_eq!(
            submit(&mut gate, &mut session, &mut deck, CODE),
            Verdict::Admitted
        );
        assert_eq!(session.lockout_until(), None);
    }

    #[test]
    fn test_counter_resets_after_lockout() {
        let clock = ManualClock::at(0);
        let mut gate = gate(&clock);
        let mut deck = deck();
        let mut session = Session::new();
        for _ in 0..3 {
            submit(&mut gate, &mut session, &mut deck, "wrong");
        }
        clock.advance_minutes(6);
        assert_eq!(
            submit(&mut gate, &mut session, &mut deck, "wrong"),
            Verdict::Rejected { remaining: 2 }
        );
    }

    #[test]
    fn test_blank_input_is_rejected_without_counting() {
        let clock = ManualClock::at(0);
        let mut gate = gate(&clock);
        let mut deck = deck();
        let mut session = Session::new();
        assert_eq!(
            submit(&mut gate, &mut session, &mut deck, "   "),
            Verdict::Empty
        );
        assert_eq!(gate.error(), Some(MSG_EMPTY));
        assert_eq!(gate.attempts(), 0);
    }

    #[test]
    fn test_missing_digest_is_generic_error() {
        let clock = ManualClock::at(0);
        let config = GateConfig {
            expected_digest: None,
            salt: String::new(),
            max_attempts: 3,
            lockout_minutes: 5,
        };
        let mut gate = AccessController::new(config, Box::new(clock));
        let mut deck = deck();
        let mut session = Session::new();
        assert_eq!(
            submit(&mut gate, &mut session, &mut deck, "anything"),
            Verdict::Failed
        );
        assert_eq!(gate.error(), Some(MSG_ERROR));
        assert_eq!(gate.attempts(), 0);
    }

    #[test]
    fn test_expected_bytes_validation() {
        let mut config = GateConfig {
            expected_digest: Some("xyz".to_string()),
            salt: String::new(),
            max_attempts: 3,
            lockout_minutes: 5,
        };
        assert_eq!(
            config.expected_bytes(),
            Err(AccessError::DigestMalformed("xyz".to_string()))
        );
        config.expected_digest = Some("abcd".to_string());
        assert!(matches!(
            config.expected_bytes(),
            Err(AccessError::DigestMalformed(_))
        ));
        config.expected_digest = Some(digest_hex("a", "b").to_uppercase());
        assert!(config.expected_bytes().is_ok());
    }

    #[test]
    fn test_cancel_clears_form() {
        let clock = ManualClock::at(0);
        let mut gate = gate(&clock);
        let mut deck = deck();
        let mut session = Session::new();
        submit(&mut gate, &mut session, &mut deck, "wrong");
        gate.push_text("abc");
        gate.cancel_admin_auth();
        assert_eq!(gate.phase(), AuthPhase::ModeSelection);
        assert_eq!(gate.code(), "");
        assert!(gate.error().is_none());
    }

    #[test]
    fn test_typing_outside_code_entry_is_ignored() {
        let clock = ManualClock::at(0);
        let mut gate = gate(&clock);
        gate.push_text("abc");
        assert_eq!(gate.code(), "");
        gate.show_admin_auth();
        gate.push_text("ab\u{8}c");
        gate.pop_char();
        assert_eq!(gate.code(), "ab");
    }
}
