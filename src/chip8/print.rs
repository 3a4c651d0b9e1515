//! The pretty print implementation of the [`chipset`](super::ChipSet).
//! This implementation was split up into this file for smaller file sizes and higher
//! cohesion.

use super::*;
use crate::{
    definitions::{cpu, display, keyboard},
    devices::{DisplayCommands, KeyboardCommands},
};
use once_cell::sync::Lazy;
use std::fmt;

/// The length of the pretty print data
/// as a single instruction is u16 the octa
/// size will show how often the block shall
/// be repeated has to be bigger then 0
const HEX_PRINT_STEP: usize = 8;

const END_OF_LINE: char = '\n';
const INDENT_FILLAMENT: char = '\t';
const INDENT_SIZE: usize = 2;

/// The symbols used for a set and a cleared pixel
const PIXEL_ON: char = '#';
const PIXEL_OFF: char = '.';

/// Will add an indent post processing
fn indent_helper(text: &mut String, indent: usize) {
    for _ in 0..indent {
        text.push(INDENT_FILLAMENT);
    }
}

/// Removes the trailing line break of a finished block
fn trim_last_line(text: &mut String) {
    if text.ends_with(END_OF_LINE) {
        text.pop();
    }
}

macro_rules! intformat {
    () => {
        // The formatted string will be 2 sysbols for the prefix (0x)
        // and 4 for the rest long.
        "{:#06X}"
    };
}

/// The width every printed integer takes up
static INTEGER_LEN: Lazy<usize> = Lazy::new(|| format!(intformat!(), 0u8).len());

/// Handles all the printing of the pointer values.
mod pointer_print {
    use std::fmt::Write;
    /// will formatt the pointers according to definition
    pub(super) fn formatter(
        line: &mut String,
        from: usize,
        to: usize,
    ) -> Result<(), std::fmt::Error> {
        write!(
            line,
            concat!(intformat!(), " - ", intformat!(), " :"),
            from, to
        )
    }
}

/// Handles all the opcode prints
mod opcode_print {
    use super::{indent_helper, integer_print, pointer_print, HEX_PRINT_STEP};
    use crate::{definitions::memory, opcode::Opcode};
    use once_cell::sync::Lazy;
    use std::fmt::{self, Write};

    /// The amount of memory cells shown per row
    /// as the data is stored as u8 and an opcode
    /// is u16 long
    const POINTER_INCREMENT: usize = HEX_PRINT_STEP * memory::opcodes::SIZE as usize;
    /// The values that are used when a row only contains zeros.
    const FILLER_BASE: &str = "...";

    /// Prepares the line that will be used, in the case that a row only contains zeros.
    static ZERO_FILLER: Lazy<String> = Lazy::new(|| {
        let formatted = format!(intformat!(), 0u16);
        let lenght = formatted.len() * (HEX_PRINT_STEP - 2) + (HEX_PRINT_STEP - 1)
            - FILLER_BASE.len();
        let filler = " ".repeat(lenght / 2);

        format!(
            "{}{}{}{}{}",
            formatted, filler, FILLER_BASE, filler, formatted
        )
    });

    /// this struct will simulate a single row of opcodes (only in this context)
    struct Row {
        from: usize,
        to: usize,
        data: [Opcode; HEX_PRINT_STEP],
        only_null: bool,
    }

    /// using the fmt::Display` for simple printing of the data later on
    impl fmt::Display for Row {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let mut res = String::new();
            pointer_print::formatter(&mut res, self.from, self.to)?;
            res.push(' ');

            if self.only_null {
                res.push_str(&ZERO_FILLER);
            } else {
                for entry in self.data.iter() {
                    integer_print::formatter(&mut res, *entry)?;
                    res.push(' ');
                }
                res.pop();
            }
            write!(f, "{}", res)
        }
    }

    /// will pretty print the content of the raw memory, following rows that
    /// only contain zeros are folded into a single one
    pub(super) fn printer(memory: &[u8], indent: usize) -> Result<String, fmt::Error> {
        let mut rows: Vec<Row> = Vec::with_capacity(memory.len() / POINTER_INCREMENT);

        for (index, chunk) in memory.chunks(POINTER_INCREMENT).enumerate() {
            let from = index * POINTER_INCREMENT;
            let to = from + chunk.len() - 1;

            let mut data = [0; HEX_PRINT_STEP];
            for (entry, bytes) in data.iter_mut().zip(chunk.chunks(2)) {
                *entry = match *bytes {
                    [high, low] => Opcode::from_be_bytes([high, low]),
                    [high] => Opcode::from_be_bytes([high, 0]),
                    _ => 0,
                };
            }
            let only_null = data.iter().all(|&opcode| opcode == 0);

            match rows.last_mut() {
                Some(last) if last.only_null && only_null => last.to = to,
                _ => rows.push(Row {
                    from,
                    to,
                    data,
                    only_null,
                }),
            }
        }

        let mut res = String::new();
        for row in rows {
            indent_helper(&mut res, indent);
            writeln!(res, "{}", row)?;
        }
        super::trim_last_line(&mut res);
        Ok(res)
    }
}

/// handles printting of any and all of intergers.
mod integer_print {
    use super::{indent_helper, pointer_print, END_OF_LINE, HEX_PRINT_STEP};
    use num_traits::Unsigned;
    use std::fmt::{self, Write};

    /// will format all integer types
    pub(super) fn formatter<T>(line: &mut String, data: T) -> Result<(), fmt::Error>
    where
        T: fmt::UpperHex + Unsigned + Copy,
    {
        write!(line, intformat!(), data)
    }

    /// will pretty print all the integer data given
    pub(super) fn printer<T>(data: &[T], indent: usize) -> Result<String, fmt::Error>
    where
        T: fmt::UpperHex + Unsigned + Copy,
    {
        let mut res = String::new();
        for (index, chunk) in data.chunks(HEX_PRINT_STEP).enumerate() {
            let from = index * HEX_PRINT_STEP;
            indent_helper(&mut res, indent);
            pointer_print::formatter(&mut res, from, from + chunk.len() - 1)?;

            for entry in chunk {
                res.push(' ');
                formatter(&mut res, *entry)?;
            }
            res.push(END_OF_LINE);
        }
        super::trim_last_line(&mut res);
        Ok(res)
    }
}

/// Handles all the boolean data types.
mod bool_print {
    use super::{indent_helper, pointer_print, END_OF_LINE, HEX_PRINT_STEP};
    use once_cell::sync::Lazy;

    /// the prepared true string
    static TRUE: Lazy<String> = Lazy::new(|| formatter("true"));
    /// the prepared false string
    static FALSE: Lazy<String> = Lazy::new(|| formatter("false"));

    /// a function to keep the correct format length
    fn formatter(message: &str) -> String {
        format!("{:width$}", message, width = *super::INTEGER_LEN)
    }

    /// will pretty print all the boolean data given
    /// the offset will be calculated automatically from
    /// the data block
    pub(super) fn printer(data: &[bool], indent: usize) -> Result<String, std::fmt::Error> {
        let mut res = String::new();

        let check_type = |val: bool| if val { &*TRUE } else { &*FALSE };

        for (index, chunk) in data.chunks(HEX_PRINT_STEP).enumerate() {
            let from = index * HEX_PRINT_STEP;
            indent_helper(&mut res, indent);
            pointer_print::formatter(&mut res, from, from + chunk.len() - 1)?;

            let mut line = String::new();
            for value in chunk {
                line.push(' ');
                line.push_str(check_type(*value));
            }
            res.push_str(line.trim_end());
            res.push(END_OF_LINE);
        }
        super::trim_last_line(&mut res);

        Ok(res)
    }
}

/// Will render the display line by line
fn screen_printer<D: DisplayCommands>(screen: &D, indent: usize) -> String {
    let mut res = String::with_capacity(display::HEIGHT * (display::WIDTH + indent + 1));
    for y in 0..display::HEIGHT {
        indent_helper(&mut res, indent);
        for x in 0..display::WIDTH {
            res.push(if screen.get_pixel(x, y) {
                PIXEL_ON
            } else {
                PIXEL_OFF
            });
        }
        res.push(END_OF_LINE);
    }
    trim_last_line(&mut res);
    res
}

/// Will format a single value on its own indented line
fn value_printer<T>(value: T) -> Result<String, fmt::Error>
where
    T: fmt::UpperHex + num_traits::Unsigned + Copy,
{
    let mut res = String::new();
    indent_helper(&mut res, INDENT_SIZE);
    integer_print::formatter(&mut res, value)?;
    Ok(res)
}

impl<D, K> fmt::Display for ChipSet<D, K>
where
    D: DisplayCommands,
    K: KeyboardCommands,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // prepate the rom name
        let mut nam = String::with_capacity(INDENT_SIZE + self.name.len());
        indent_helper(&mut nam, INDENT_SIZE);
        nam.push_str(&self.name);

        let mem = opcode_print::printer(&self.memory[..], INDENT_SIZE)?;
        let reg = integer_print::printer(&self.registers, INDENT_SIZE)?;

        // handle stack specially as it needes to be filled up if empty
        let mut stack = [0u16; cpu::stack::SIZE];
        stack[0..self.stack.len()].copy_from_slice(&self.stack);
        let sta = integer_print::printer(&stack, INDENT_SIZE)?;

        let mut keys = [false; keyboard::SIZE];
        for (index, key) in keys.iter_mut().enumerate() {
            *key = self.keyboard.is_pressed(index);
        }
        let key = bool_print::printer(&keys, INDENT_SIZE)?;

        let scr = screen_printer(&self.display, INDENT_SIZE);

        write!(
            f,
            "Chipset {{\n\
                \tProgram Name :\n{}\n\
                \tOpcode :\n{}\n\
                \tProgram Counter :\n{}\n\
                \tIndex Register :\n{}\n\
                \tDelay Timer :\n{}\n\
                \tSound Timer :\n{}\n\
                \tMemory :\n{}\n\
                \tKeyboard :\n{}\n\
                \tStack :\n{}\n\
                \tRegister :\n{}\n\
                \tScreen :\n{}\n\
                }}",
            nam,
            value_printer(self.opcode)?,
            value_printer(self.program_counter)?,
            value_printer(self.index_register)?,
            value_printer(self.delay_timer.get_value())?,
            value_printer(self.sound_timer.get_value())?,
            mem,
            key,
            sta,
            reg,
            scr
        )
    }
}
