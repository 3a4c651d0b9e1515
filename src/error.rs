use thiserror::Error;

use crate::opcode::Opcode;

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum ProcessError {
    #[error("An unsupported opcode was used {opcode:#06X?} at {pc:#06X?}.")]
    UnknownOpcode { opcode: Opcode, pc: u16 },
    #[error("The RCA 1802 routine call {opcode:#06X?} at {pc:#06X?} can not be executed.")]
    Unsupported { opcode: Opcode, pc: u16 },
    #[error("Invalid stack state '{source}' at {pc:#06X?}.")]
    Stack { source: StackError, pc: u16 },
}

impl ProcessError {
    /// The program counter the failing instruction was fetched from.
    pub fn pc(&self) -> u16 {
        match *self {
            ProcessError::UnknownOpcode { pc, .. }
            | ProcessError::Unsupported { pc, .. }
            | ProcessError::Stack { pc, .. } => pc,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum OpcodeError {
    #[error("An unsupported opcode was used {0:#06X?}.")]
    InvalidOpcode(Opcode),
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum StackError {
    #[error("Stack is full!")]
    Full,
    #[error("Stack is empty!")]
    Empty,
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum LoadError {
    #[error("The program is {len} bytes long, but only {max} bytes fit into memory.")]
    TooLarge { len: usize, max: usize },
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum ConfigError {
    #[error("The {0} frequency has to be above zero.")]
    ZeroRate(&'static str),
    #[error("The {name} frequency of {hertz} hz is above the supported {max} hz.")]
    RateTooHigh {
        name: &'static str,
        hertz: u64,
        max: u64,
    },
}
