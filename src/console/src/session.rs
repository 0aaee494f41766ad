//! Console session: the single owner of decoder, editor, renderer and dispatcher.
//!
//! The keyboard interrupt entry point holds the only reference to the session
//! and feeds it one scancode per interrupt.

use crate::editor::LineEditor;
use crate::line::LineBuffer;
use crate::scancode::{DecodedEvent, EditCommand, ModifierState, ScancodeDecoder};
use crate::screen::Screen;
use eduos_hal::{Console, InterruptController, PortIo, TextBuffer};

/// PS/2 controller data port.
pub const KEYBOARD_DATA_PORT: u16 = 0x60;

/// Receives each submitted line.
///
/// Called synchronously from inside the session; any output goes back through
/// `console`, which is the session's own renderer.
pub trait Dispatcher {
    /// Handle one submitted line.
    fn submit(&mut self, line: &str, console: &mut dyn Console);
}

/// A text console bound to a display and a dispatcher.
pub struct ConsoleSession<B, P, D> {
    decoder: ScancodeDecoder,
    editor: LineEditor,
    screen: Screen<B, P>,
    dispatcher: D,
}

impl<B, P, D> ConsoleSession<B, P, D>
where
    B: TextBuffer,
    P: PortIo,
    D: Dispatcher,
{
    /// Create a session with an empty line and no modifiers active.
    pub fn new(screen: Screen<B, P>, dispatcher: D) -> Self {
        Self {
            decoder: ScancodeDecoder::new(),
            editor: LineEditor::new(),
            screen,
            dispatcher,
        }
    }

    /// Service one keyboard interrupt.
    ///
    /// Reads the scancode, acknowledges `irq` before touching any state, then
    /// processes the code.
    pub fn service_interrupt<K, I>(
        &mut self,
        keyboard: &mut K,
        pic: &mut I,
        irq: u8,
    ) -> DecodedEvent
    where
        K: PortIo,
        I: InterruptController,
    {
        let scancode = keyboard.inb(KEYBOARD_DATA_PORT);
        pic.end_of_interrupt(irq);
        self.handle_scancode(scancode)
    }

    /// Decode one scancode and apply it to the line.
    pub fn handle_scancode(&mut self, scancode: u8) -> DecodedEvent {
        let event = self.decoder.decode(scancode);
        match event {
            DecodedEvent::Character(ch) => self.editor.insert(ch, &mut self.screen),
            DecodedEvent::Edit(EditCommand::Submit) => {
                self.editor.submit(&mut self.screen, &mut self.dispatcher)
            }
            DecodedEvent::Edit(command) => self.editor.apply(command, &mut self.screen),
            DecodedEvent::ModifierUpdate | DecodedEvent::Ignored => {}
        }
        event
    }

    /// The line being edited.
    pub fn line(&self) -> &LineBuffer {
        self.editor.line()
    }

    /// Current modifier state.
    pub fn modifiers(&self) -> &ModifierState {
        self.decoder.state()
    }

    /// The renderer.
    pub fn screen(&self) -> &Screen<B, P> {
        &self.screen
    }

    /// Mutable access to the renderer, for output outside of line editing.
    pub fn screen_mut(&mut self) -> &mut Screen<B, P> {
        &mut self.screen
    }

    /// The dispatcher.
    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Mutable access to the dispatcher.
    pub fn dispatcher_mut(&mut self) -> &mut D {
        &mut self.dispatcher
    }

    /// Split borrow of renderer and dispatcher.
    pub fn parts_mut(&mut self) -> (&mut Screen<B, P>, &mut D) {
        (&mut self.screen, &mut self.dispatcher)
    }
}
