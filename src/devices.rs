//! The device contracts between the interpreter and its host, plus simple devices that
//! fulfill them.
use crate::definitions::{display, keyboard};

#[cfg_attr(test, mockall::automock)]
/// The traits responsible for the display based code. The interpreter only ever reads,
/// flips and clears single pixels, the host renders them whenever the display was marked
/// as dirty.
pub trait DisplayCommands {
    /// Will return if the pixel at the given coordinates is set
    fn get_pixel(&self, x: usize, y: usize) -> bool;
    /// Will set the pixel at the given coordinates
    fn set_pixel(&mut self, x: usize, y: usize);
    /// Will clear the pixel at the given coordinates
    fn clear_pixel(&mut self, x: usize, y: usize);
    /// Will signal the host that the display changed since the last render
    fn mark_dirty(&mut self);
    /// Will clear the display
    fn clear_display(&mut self) {
        for y in 0..display::HEIGHT {
            for x in 0..display::WIDTH {
                self.clear_pixel(x, y);
            }
        }
    }
}

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for reading the keyboard data
pub trait KeyboardCommands {
    /// Will return if the key with the given index (`0x0-0xF`) is currently down
    fn is_pressed(&self, key: usize) -> bool;
}

/// A monochrome display buffer with the chip8 resolution.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pixels: Box<[[bool; display::WIDTH]; display::HEIGHT]>,
    dirty: bool,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self {
            pixels: Box::new([[false; display::WIDTH]; display::HEIGHT]),
            dirty: false,
        }
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer::default()
    }

    /// Will return the display row by row
    pub fn rows(&self) -> &[[bool; display::WIDTH]] {
        &self.pixels[..]
    }

    /// Checks if any pixel is set
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().flatten().all(|pixel| !pixel)
    }

    /// Will return the dirty flag and reset it, the host calls this once per frame.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

impl DisplayCommands for FrameBuffer {
    fn get_pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[y][x]
    }

    fn set_pixel(&mut self, x: usize, y: usize) {
        self.pixels[y][x] = true;
    }

    fn clear_pixel(&mut self, x: usize, y: usize) {
        self.pixels[y][x] = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn clear_display(&mut self) {
        for row in self.pixels.iter_mut() {
            row.fill(false);
        }
    }
}

/// Will represent the last set key with the previous
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    index: usize,
    last: bool,
    current: bool,
}

impl Key {
    fn new(index: usize, last: bool, current: bool) -> Self {
        Self {
            index,
            last,
            current,
        }
    }

    pub fn get_index(&self) -> usize {
        self.index
    }

    pub fn get_last(&self) -> bool {
        self.last
    }

    pub fn get_current(&self) -> bool {
        self.current
    }
}

/// Will store the last change to the given keybord
/// and represent the internal keyboard as well
///
/// Input is done with a hex keyboard that has 16 keys ranging `0-F`. The `8`, `4`, `6`, and
/// `2` keys are typically used for directional input. Three opcodes are used to detect input.
/// One skips an instruction if a specific key is pressed, while another does the same if a
/// specific key is not pressed. The third waits for a key press, and then stores it in one of
/// the data registers.
#[derive(Default, Debug, Clone)]
pub struct Keyboard {
    keys: [bool; keyboard::SIZE],
    last: Option<Key>,
}

impl Keyboard {
    pub fn new() -> Self {
        Keyboard::default()
    }

    pub fn toggle_key(&mut self, key: usize) {
        self.set_key(key, !self.keys[key])
    }

    pub fn set_key(&mut self, key: usize, to: bool) {
        debug_assert!(key < keyboard::SIZE);
        self.last = Some(Key::new(key, self.keys[key], to));
        self.keys[key] = to;
    }

    pub fn set_mult(&mut self, keys: &[bool]) {
        assert!(keys.len() == self.keys.len());
        self.keys.copy_from_slice(keys);
        self.last = None;
    }

    /// Releases every key
    pub fn reset(&mut self) {
        self.keys = [false; keyboard::SIZE];
        self.last = None;
    }

    pub fn get_keys(&self) -> &[bool] {
        &self.keys
    }

    pub fn get_last(&self) -> Option<Key> {
        self.last
    }
}

impl KeyboardCommands for Keyboard {
    fn is_pressed(&self, key: usize) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }
}
