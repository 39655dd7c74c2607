//! Keys and modifiers as the host's decoder reports them.

use bitflags::bitflags;

bitflags! {
    /// Modifier keys held during a key press.
    ///
    /// Terminals disagree on Alt versus Meta; bindings treat them alike
    /// through [`KeyEvent::alt`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const SHIFT = 1 << 0;
        const ALT = 1 << 1;
        const CTRL = 1 << 2;
        const SUPER = 1 << 3;
        const META = 1 << 5;
    }
}

/// Key identity, independent of modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Esc,
    /// F1 through F24.
    F(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    #[must_use]
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// `code` pressed without modifiers.
    #[must_use]
    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    #[must_use]
    pub fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }

    #[must_use]
    pub fn with_ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CTRL)
    }

    #[must_use]
    pub fn with_alt(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::ALT)
    }

    #[must_use]
    pub fn ctrl(&self) -> bool {
        self.modifiers.contains(KeyModifiers::CTRL)
    }

    /// Alt or Meta.
    #[must_use]
    pub fn alt(&self) -> bool {
        self.modifiers.intersects(KeyModifiers::ALT | KeyModifiers::META)
    }

    /// Neither Ctrl nor Alt/Meta is held. Shift does not count: it is
    /// already folded into the character.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        !self.ctrl() && !self.alt()
    }

    /// Ctrl + `c`, as in Ctrl+W.
    #[must_use]
    pub fn is_ctrl_char(&self, c: char) -> bool {
        self.ctrl() && self.code == KeyCode::Char(c)
    }

    /// Alt + `c`, as in Alt+B.
    #[must_use]
    pub fn is_alt_char(&self, c: char) -> bool {
        self.alt() && self.code == KeyCode::Char(c)
    }
}

impl From<char> for KeyEvent {
    fn from(c: char) -> Self {
        Self::char(c)
    }
}
