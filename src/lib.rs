//! A chip8 interpreter core.
//!
//! The crate covers the fetch, decode and execute cycle of the chip8 virtual cpu. Rendering
//! and input stay on the host side and reach the core through the
//! [`DisplayCommands`](devices::DisplayCommands) and
//! [`KeyboardCommands`](devices::KeyboardCommands) traits.
pub mod chip8;
pub mod definitions;
pub mod devices;
pub mod opcode;
pub mod resources;
pub mod timer;
mod error;
mod runner;

// reexporting for convinience
pub use error::*;
pub use runner::*;
