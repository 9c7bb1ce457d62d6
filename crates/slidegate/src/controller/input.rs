/// Minimum horizontal travel, in points, for a drag to count as a swipe.
pub const SWIPE_THRESHOLD: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Home,
    End,
    /// Digit keys `1` through `9`.
    Num(u8),
    A,
    F,
    H,
    P,
    Q,
    R,
    V,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
}

impl KeyPress {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
        }
    }

    #[cfg(test)]
    pub fn ctrl(key: Key) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(key)
        }
    }

    #[cfg(test)]
    pub fn shift(key: Key) -> Self {
        Self {
            shift: true,
            ..Self::plain(key)
        }
    }
}

/// Something on screen that reacts to a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    PublicMode,
    AdminMode,
    SubmitCode,
    CancelCode,
    LockIcon,
    HelpClose,
    HelpBackdrop,
    HelpPanel,
    CharacterCard(usize),
    CharacterOption(usize),
    PopupOverlay,
    PopupPanel,
    PopupClose,
    PosterButton,
    PosterViewer,
    Banner(usize),
    NextButton,
    PrevButton,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Key(KeyPress),
    /// Characters typed into a focused text field.
    Text(String),
    Click(Target),
    /// Completed horizontal drag; negative is leftward.
    Swipe { dx: f32 },
}

impl From<KeyPress> for Input {
    fn from(key: KeyPress) -> Self {
        Self::Key(key)
    }
}

impl From<Key> for Input {
    fn from(key: Key) -> Self {
        Self::Key(KeyPress::plain(key))
    }
}

impl From<Target> for Input {
    fn from(target: Target) -> Self {
        Self::Click(target)
    }
}
