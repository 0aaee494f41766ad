//! PS/2 scancode set 1 decoder.
//!
//! Consumes one scancode at a time and tracks shift, caps-lock and the
//! two-byte extended prefix. Only make codes are mapped to characters;
//! break codes fall outside the layout table and are ignored, except for
//! the shift releases.

use bitflags::bitflags;

/// Left shift make code.
pub const LEFT_SHIFT: u8 = 0x2A;
/// Right shift make code.
pub const RIGHT_SHIFT: u8 = 0x36;
/// Left shift break code.
pub const LEFT_SHIFT_RELEASE: u8 = 0xAA;
/// Right shift break code.
pub const RIGHT_SHIFT_RELEASE: u8 = 0xB6;
/// Caps lock make code.
pub const CAPS_LOCK: u8 = 0x3A;
/// Prefix announcing a two-byte extended key.
pub const EXTENDED_PREFIX: u8 = 0xE0;
/// Backspace make code.
pub const BACKSPACE: u8 = 0x0E;
/// Enter make code.
pub const ENTER: u8 = 0x1C;
/// Arrow left (extended).
pub const ARROW_LEFT: u8 = 0x4B;
/// Arrow right (extended).
pub const ARROW_RIGHT: u8 = 0x4D;
/// Delete (extended).
pub const DELETE: u8 = 0x53;

/// Highest scancode covered by the layout table.
pub const SC_MAX: u8 = 0x39;

/// Table slot with no character.
const UNMAPPED: u8 = 0;

/// US layout, lowercase base characters, indexed by make code.
static SCANCODE_ASCII: [u8; SC_MAX as usize + 1] = [
    UNMAPPED, UNMAPPED, b'1', b'2', b'3', b'4', b'5', b'6', // 0x00
    b'7', b'8', b'9', b'0', b'-', b'=', UNMAPPED, UNMAPPED, // 0x08
    b'q', b'w', b'e', b'r', b't', b'y', b'u', b'i', // 0x10
    b'o', b'p', b'[', b']', UNMAPPED, UNMAPPED, b'a', b's', // 0x18
    b'd', b'f', b'g', b'h', b'j', b'k', b'l', b';', // 0x20
    b'\'', b'`', UNMAPPED, b'\\', b'z', b'x', b'c', b'v', // 0x28
    b'b', b'n', b'm', b',', b'.', b'/', UNMAPPED, UNMAPPED, // 0x30
    UNMAPPED, b' ', // 0x38
];

bitflags! {
    /// Modifier keys currently in effect.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        const SHIFT     = 1 << 0;
        const CAPS_LOCK = 1 << 1;
    }
}

/// Two-state machine for the extended-key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Next byte is an ordinary scancode.
    #[default]
    Normal,
    /// An `0xE0` prefix was seen; the next byte is an extended code.
    ExtendedPending,
}

/// Modifier state owned by the decoder. Caps lock persists until toggled again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifierState {
    keys: Modifiers,
    mode: DecodeMode,
}

impl ModifierState {
    /// All modifiers released, not in extended mode.
    pub const fn new() -> Self {
        Self {
            keys: Modifiers::empty(),
            mode: DecodeMode::Normal,
        }
    }

    /// Whether a shift key is held down.
    pub fn shift_held(&self) -> bool {
        self.keys.contains(Modifiers::SHIFT)
    }

    /// Whether caps lock is toggled on.
    pub fn caps_lock_active(&self) -> bool {
        self.keys.contains(Modifiers::CAPS_LOCK)
    }

    /// Whether the next byte will be decoded as an extended code.
    pub fn extended_prefix_pending(&self) -> bool {
        self.mode == DecodeMode::ExtendedPending
    }

    /// Current extended-prefix state.
    pub fn mode(&self) -> DecodeMode {
        self.mode
    }

    /// Letters are uppercase when exactly one of shift and caps lock applies.
    pub fn uppercase(&self) -> bool {
        self.shift_held() ^ self.caps_lock_active()
    }
}

impl Default for ModifierState {
    fn default() -> Self {
        Self::new()
    }
}

/// Line-edit command produced by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    /// Delete the character before the cursor.
    Backspace,
    /// Delete the character under the cursor.
    Delete,
    /// Move the cursor one position left.
    CursorLeft,
    /// Move the cursor one position right.
    CursorRight,
    /// Hand the line to the dispatcher.
    Submit,
}

/// Outcome of decoding one scancode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedEvent {
    /// Shift or caps lock changed.
    ModifierUpdate,
    /// A line-edit command.
    Edit(EditCommand),
    /// A printable character.
    Character(u8),
    /// Nothing to do.
    Ignored,
}

/// Scancode decoder.
#[derive(Debug, Default)]
pub struct ScancodeDecoder {
    state: ModifierState,
}

impl ScancodeDecoder {
    /// Create a decoder with no modifiers active.
    pub const fn new() -> Self {
        Self {
            state: ModifierState::new(),
        }
    }

    /// Current modifier state.
    pub fn state(&self) -> &ModifierState {
        &self.state
    }

    /// Decode a single scancode.
    pub fn decode(&mut self, code: u8) -> DecodedEvent {
        match code {
            LEFT_SHIFT | RIGHT_SHIFT => {
                self.state.keys.insert(Modifiers::SHIFT);
                return DecodedEvent::ModifierUpdate;
            }
            LEFT_SHIFT_RELEASE | RIGHT_SHIFT_RELEASE => {
                self.state.keys.remove(Modifiers::SHIFT);
                return DecodedEvent::ModifierUpdate;
            }
            CAPS_LOCK => {
                self.state.keys.toggle(Modifiers::CAPS_LOCK);
                log::trace!("keyboard: caps lock {}", self.state.caps_lock_active());
                return DecodedEvent::ModifierUpdate;
            }
            EXTENDED_PREFIX => {
                self.state.mode = DecodeMode::ExtendedPending;
                return DecodedEvent::Ignored;
            }
            _ => {}
        }

        if self.state.mode == DecodeMode::ExtendedPending {
            self.state.mode = DecodeMode::Normal;
            return match code {
                ARROW_LEFT => DecodedEvent::Edit(EditCommand::CursorLeft),
                ARROW_RIGHT => DecodedEvent::Edit(EditCommand::CursorRight),
                DELETE => DecodedEvent::Edit(EditCommand::Delete),
                _ => DecodedEvent::Ignored,
            };
        }

        match code {
            code if code > SC_MAX => DecodedEvent::Ignored,
            BACKSPACE => DecodedEvent::Edit(EditCommand::Backspace),
            ENTER => DecodedEvent::Edit(EditCommand::Submit),
            code => match SCANCODE_ASCII[code as usize] {
                UNMAPPED => DecodedEvent::Ignored,
                base => DecodedEvent::Character(self.resolve(base)),
            },
        }
    }

    fn resolve(&self, base: u8) -> u8 {
        let letter = if self.state.uppercase() {
            base.to_ascii_uppercase()
        } else {
            base
        };

        // Caps lock alone never shifts symbols.
        if !self.state.shift_held() {
            return letter;
        }
        match letter {
            b'1' => b'!',
            b'9' => b'(',
            b'0' => b')',
            b'-' => b'_',
            b'=' => b'+',
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: u8 = 0x1E;
    const ONE: u8 = 0x02;

    fn decode_all(decoder: &mut ScancodeDecoder, codes: &[u8]) -> DecodedEvent {
        let mut last = DecodedEvent::Ignored;
        for &code in codes {
            last = decoder.decode(code);
        }
        last
    }

    #[test]
    fn test_plain_letters_and_digits() {
        let mut decoder = ScancodeDecoder::new();
        assert_eq!(decoder.decode(A), DecodedEvent::Character(b'a'));
        assert_eq!(decoder.decode(0x2C), DecodedEvent::Character(b'z'));
        assert_eq!(decoder.decode(ONE), DecodedEvent::Character(b'1'));
        assert_eq!(decoder.decode(0x39), DecodedEvent::Character(b' '));
        assert_eq!(decoder.decode(0x2B), DecodedEvent::Character(b'\\'));
    }

    #[test]
    fn test_caps_lock_uppercases() {
        let mut decoder = ScancodeDecoder::new();
        assert_eq!(decode_all(&mut decoder, &[CAPS_LOCK, A]), DecodedEvent::Character(b'A'));
    }

    #[test]
    fn test_shift_remaps_symbol() {
        let mut decoder = ScancodeDecoder::new();
        assert_eq!(decode_all(&mut decoder, &[LEFT_SHIFT, ONE]), DecodedEvent::Character(b'!'));
    }

    #[test]
    fn test_uppercase_is_shift_xor_caps() {
        for shift in [false, true] {
            for caps in [false, true] {
                let mut decoder = ScancodeDecoder::new();
                if caps {
                    decoder.decode(CAPS_LOCK);
                }
                if shift {
                    decoder.decode(RIGHT_SHIFT);
                }
                for (code, &base) in SCANCODE_ASCII.iter().enumerate() {
                    if !base.is_ascii_lowercase() {
                        continue;
                    }
                    let expected = if shift ^ caps { base.to_ascii_uppercase() } else { base };
                    assert_eq!(
                        decoder.decode(code as u8),
                        DecodedEvent::Character(expected),
                        "shift={shift} caps={caps} code={code:#x}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_symbol_remap_needs_real_shift() {
        let pairs = [
            (ONE, b'1', b'!'),
            (0x0A, b'9', b'('),
            (0x0B, b'0', b')'),
            (0x0C, b'-', b'_'),
            (0x0D, b'=', b'+'),
        ];

        let mut caps_only = ScancodeDecoder::new();
        caps_only.decode(CAPS_LOCK);
        let mut shift_and_caps = ScancodeDecoder::new();
        shift_and_caps.decode(CAPS_LOCK);
        shift_and_caps.decode(LEFT_SHIFT);

        for (code, plain, shifted) in pairs {
            assert_eq!(caps_only.decode(code), DecodedEvent::Character(plain));
            assert_eq!(shift_and_caps.decode(code), DecodedEvent::Character(shifted));
        }
        // Digits outside the five remapped keys stay as they are.
        assert_eq!(shift_and_caps.decode(0x03), DecodedEvent::Character(b'2'));
    }

    #[test]
    fn test_shift_release_restores_lowercase() {
        let mut decoder = ScancodeDecoder::new();
        assert_eq!(decoder.decode(LEFT_SHIFT), DecodedEvent::ModifierUpdate);
        assert!(decoder.state().shift_held());
        assert_eq!(decoder.decode(LEFT_SHIFT_RELEASE), DecodedEvent::ModifierUpdate);
        assert!(!decoder.state().shift_held());
        assert_eq!(decoder.decode(A), DecodedEvent::Character(b'a'));
    }

    #[test]
    fn test_caps_lock_toggles() {
        let mut decoder = ScancodeDecoder::new();
        decoder.decode(CAPS_LOCK);
        assert!(decoder.state().caps_lock_active());
        decoder.decode(CAPS_LOCK);
        assert!(!decoder.state().caps_lock_active());
    }

    #[test]
    fn test_extended_arrows_and_delete() {
        let mut decoder = ScancodeDecoder::new();
        assert_eq!(decoder.decode(EXTENDED_PREFIX), DecodedEvent::Ignored);
        assert_eq!(decoder.state().mode(), DecodeMode::ExtendedPending);
        assert_eq!(decoder.decode(ARROW_LEFT), DecodedEvent::Edit(EditCommand::CursorLeft));
        assert_eq!(decoder.state().mode(), DecodeMode::Normal);

        assert_eq!(
            decode_all(&mut decoder, &[EXTENDED_PREFIX, ARROW_RIGHT]),
            DecodedEvent::Edit(EditCommand::CursorRight)
        );
        assert_eq!(
            decode_all(&mut decoder, &[EXTENDED_PREFIX, DELETE]),
            DecodedEvent::Edit(EditCommand::Delete)
        );
    }

    #[test]
    fn test_extended_mode_consumes_one_code() {
        let mut decoder = ScancodeDecoder::new();
        decoder.decode(EXTENDED_PREFIX);
        // 0x1E is 'a' in normal mode but means nothing extended.
        assert_eq!(decoder.decode(A), DecodedEvent::Ignored);
        assert!(!decoder.state().extended_prefix_pending());
        assert_eq!(decoder.decode(A), DecodedEvent::Character(b'a'));

        // Extended arrow release codes are swallowed too.
        assert_eq!(decode_all(&mut decoder, &[EXTENDED_PREFIX, 0xCB]), DecodedEvent::Ignored);
    }

    #[test]
    fn test_arrow_codes_without_prefix_are_ignored() {
        let mut decoder = ScancodeDecoder::new();
        assert_eq!(decoder.decode(ARROW_LEFT), DecodedEvent::Ignored);
        assert_eq!(decoder.decode(DELETE), DecodedEvent::Ignored);
    }

    #[test]
    fn test_backspace_and_enter() {
        let mut decoder = ScancodeDecoder::new();
        assert_eq!(decoder.decode(BACKSPACE), DecodedEvent::Edit(EditCommand::Backspace));
        assert_eq!(decoder.decode(ENTER), DecodedEvent::Edit(EditCommand::Submit));
    }

    #[test]
    fn test_unmapped_and_break_codes_ignored() {
        let mut decoder = ScancodeDecoder::new();
        // Escape, tab, ctrl, alt
        for code in [0x01, 0x0F, 0x1D, 0x38] {
            assert_eq!(decoder.decode(code), DecodedEvent::Ignored);
        }
        // Break code for 'a'
        assert_eq!(decoder.decode(A | 0x80), DecodedEvent::Ignored);
        // F1 and keypad 2 sit above the table.
        assert_eq!(decoder.decode(0x3B), DecodedEvent::Ignored);
        assert_eq!(decoder.decode(0x50), DecodedEvent::Ignored);
        assert_eq!(*decoder.state(), ModifierState::new());
    }
}
