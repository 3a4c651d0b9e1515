//! Opcode abstractions, functionality and constants.
use std::convert::TryFrom;

use crate::{
    definitions::memory::{self, ADDRESS_MASK},
    OpcodeError, ProcessError,
};

/// the base mask used for generating all the other sub masks
pub(crate) const OPCODE_MASK_FFFF: u16 = u16::MAX;

/// the mask for the first twelve bits
pub(crate) const OPCODE_MASK_FFF0: u16 = OPCODE_MASK_FFFF << 4;

/// the mask for the first eight bits
pub(crate) const OPCODE_MASK_FF00: u16 = OPCODE_MASK_FFFF << 8;

/// the mask for the first four bits
pub(crate) const OPCODE_MASK_F000: u16 = OPCODE_MASK_FFFF << 12;

/// the mask for the last four bits
pub(crate) const OPCODE_MASK_000F: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FFF0;

/// the mask for the last eight bits
pub(crate) const OPCODE_MASK_00FF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FF00;

/// the mask for the last twelve bits
pub(crate) const OPCODE_MASK_0FFF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_F000;

/// the size of a nibble
const NIBBLE_SIZE: u16 = 0x4;

/// a wrapper type for u16 to make it clear what is meant to be used
pub type Opcode = u16;

/// Will build the opcode found at the given pointer. The opcode is stored big-endian in the
/// cells `pointer` and `pointer + 1`, both addresses are wrapped to twelve bits.
///
/// # Example
/// ```rust
/// # use chip::opcode::*;
/// let mut memory = [0u8; 0x1000];
/// memory[0x200] = 0x1E;
/// memory[0x201] = 0xDA;
/// assert_eq!(fetch(&memory, 0x200), 0x1EDA);
///
/// // the second byte wraps around to the beginning of memory
/// memory[0xFFF] = 0xA2;
/// memory[0x000] = 0x34;
/// assert_eq!(fetch(&memory, 0xFFF), 0xA234);
/// ```
pub fn fetch(memory: &[u8; memory::SIZE], pointer: u16) -> Opcode {
    let high = memory[(pointer & ADDRESS_MASK) as usize];
    let low = memory[(pointer.wrapping_add(1) & ADDRESS_MASK) as usize];
    Opcode::from_be_bytes([high, low])
}

/// These are special traits used to filter out information
/// from opcodes
pub trait OpcodeTrait {
    /// The instruction class, the highest nibble.
    fn t(&self) -> u8;

    /// The twelve bit literal of the opcode type `TNNN`.
    fn nnn(&self) -> u16;

    /// The eight bit literal of the opcode type `TXNN`.
    fn nn(&self) -> u8;

    /// The lowest nibble of the opcode type `TXYN`.
    fn n(&self) -> u8;

    /// The first register index `X` of the opcode type `TXYN`.
    fn x(&self) -> usize;

    /// The second register index `Y` of the opcode type `TXYN`.
    fn y(&self) -> usize;
}

impl OpcodeTrait for Opcode {
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.t(), 0x1);
    /// ```
    fn t(&self) -> u8 {
        ((self & OPCODE_MASK_F000) >> (3 * NIBBLE_SIZE)) as u8
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.nnn(), 0xEDA);
    /// ```
    fn nnn(&self) -> u16 {
        self & OPCODE_MASK_0FFF
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.nn(), 0xDA);
    /// ```
    fn nn(&self) -> u8 {
        (self & OPCODE_MASK_00FF) as u8
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.n(), 0xA);
    /// ```
    fn n(&self) -> u8 {
        (self & OPCODE_MASK_000F) as u8
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.x(), 0xE);
    /// ```
    fn x(&self) -> usize {
        ((self & OPCODE_MASK_0FFF & OPCODE_MASK_FF00) >> (2 * NIBBLE_SIZE)) as usize
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.y(), 0xD);
    /// ```
    fn y(&self) -> usize {
        const MASK: u16 = OPCODE_MASK_00FF ^ OPCODE_MASK_000F;
        ((self & MASK) >> NIBBLE_SIZE) as usize
    }
}

/// The decoded view of a single opcode. Every opcode decodes, if the operands make up a valid
/// instruction is decided by [`Instruction::try_from`](Instruction).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operands {
    /// the raw opcode
    pub value: Opcode,
    /// register index `X`
    pub x: usize,
    /// register index `Y`
    pub y: usize,
    /// twelve bit literal `NNN`
    pub nnn: u16,
    /// eight bit literal `NN`
    pub nn: u8,
    /// the lowest nibble `N`
    pub n: u8,
}

impl From<Opcode> for Operands {
    fn from(value: Opcode) -> Self {
        Self {
            value,
            x: value.x(),
            y: value.y(),
            nnn: value.nnn(),
            nn: value.nn(),
            n: value.n(),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// Represents the program steps that the chip
/// can take.
pub enum ProgramCounterStep {
    /// Will not change the program counter
    None,
    /// Will increment the program counter by one instruction
    Next,
    /// Will increment the program counter by two instructions
    Skip,
    /// Will simply move the program counter to the given location.
    Jump(u16),
}

impl ProgramCounterStep {
    /// Will return a Skip if the condition is true.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Next, ProgramCounterStep::cond(false));
    /// assert_eq!(ProgramCounterStep::Skip, ProgramCounterStep::cond(true));
    /// ```
    #[inline]
    pub fn cond(cond: bool) -> Self {
        if cond {
            ProgramCounterStep::Skip
        } else {
            ProgramCounterStep::Next
        }
    }

    /// Applies the step to the given program counter, the result is always a valid address.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::ProgramCounterStep;
    /// assert_eq!(0x202, ProgramCounterStep::Next.apply(0x200));
    /// assert_eq!(0x204, ProgramCounterStep::Skip.apply(0x200));
    /// assert_eq!(0x200, ProgramCounterStep::None.apply(0x200));
    /// assert_eq!(0x345, ProgramCounterStep::Jump(0x345).apply(0x200));
    /// assert_eq!(0x000, ProgramCounterStep::Next.apply(0xFFE));
    /// ```
    #[inline]
    pub fn apply(&self, pc: u16) -> u16 {
        let next = match *self {
            ProgramCounterStep::None => pc,
            ProgramCounterStep::Next => pc.wrapping_add(memory::opcodes::SIZE),
            ProgramCounterStep::Skip => pc.wrapping_add(2 * memory::opcodes::SIZE),
            ProgramCounterStep::Jump(pointer) => pointer,
        };
        next & ADDRESS_MASK
    }
}

/// Generates the lookup from the sub opcode nibble (or byte) to the corresponding operation.
macro_rules! impl_sub_opcode {
    ($type_name:ident : $type_from:ty : $( $key:literal => $val:ident ),+ $(,)? ) => {
        impl $type_name {
            /// Will look up the operation selected by the given sub opcode.
            pub fn from_code(code: $type_from) -> Option<Self> {
                match code {
                    $(
                        $key => Some($type_name::$val),
                    )+
                    _ => None,
                }
            }
        }
    };
}

/// The register to register operations of the `8XYT` class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Assign,
    Or,
    And,
    Xor,
    AddWithCarry,
    SubYFromX,
    ShiftRight,
    SubXFromY,
    ShiftLeft,
}

impl_sub_opcode!(ArithmeticOp : u8 :
    // 8XY0
    // Sets VX to the value of VY.
    0x0 => Assign,
    // 8XY1
    // Sets VX to VX or VY. (Bitwise OR operation)
    0x1 => Or,
    // 8XY2
    // Sets VX to VX and VY. (Bitwise AND operation)
    0x2 => And,
    // 8XY3
    // Sets VX to VX xor VY.
    0x3 => Xor,
    // 8XY4
    // Adds VY to VX. VF is set to 1 when there's a carry, and to 0 when there isn't.
    0x4 => AddWithCarry,
    // 8XY5
    // VY is subtracted from VX. VF is set to 0 when there's a borrow, and 1 when there
    // isn't.
    0x5 => SubYFromX,
    // 8XY6
    // Stores the least significant bit of VX in VF and then shifts VX to the right by 1.
    0x6 => ShiftRight,
    // 8XY7
    // Sets VX to VY minus VX. VF is set to 0 when there's a borrow, and 1 when there
    // isn't.
    0x7 => SubXFromY,
    // 8XYE
    // Stores the most significant bit of VX in VF and then shifts VX to the left by 1.
    0xE => ShiftLeft,
);

/// The keyboard conditions of the `EXTT` class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOp {
    Pressed,
    NotPressed,
}

impl_sub_opcode!(KeyOp : u8 :
    // EX9E
    // Skips the next instruction if the key stored in VX is pressed.
    0x9E => Pressed,
    // EXA1
    // Skips the next instruction if the key stored in VX isn't pressed.
    0xA1 => NotPressed,
);

/// The timer, keyboard and memory operations of the `FXTT` class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialOp {
    GetDelayTimer,
    AwaitKeyPress,
    SetDelayTimer,
    SetSoundTimer,
    AddVxToI,
    SetIToSprite,
    StoreBCD,
    StoreV0ToVx,
    FillV0ToVx,
}

impl_sub_opcode!(SpecialOp : u8 :
    // FX07
    // Sets VX to the value of the delay timer.
    0x07 => GetDelayTimer,
    // FX0A
    // A key press is awaited, and then stored in VX.
    0x0A => AwaitKeyPress,
    // FX15
    // Sets the delay timer to VX.
    0x15 => SetDelayTimer,
    // FX18
    // Sets the sound timer to VX.
    0x18 => SetSoundTimer,
    // FX1E
    // Adds VX to I. VF is not affected.
    0x1E => AddVxToI,
    // FX29
    // Sets I to the location of the sprite for the character in VX.
    0x29 => SetIToSprite,
    // FX33
    // Stores the binary-coded decimal representation of VX at I, I+1 and I+2.
    0x33 => StoreBCD,
    // FX55
    // Stores V0 to VX (including VX) in memory starting at address I.
    0x55 => StoreV0ToVx,
    // FX65
    // Fills V0 to VX (including VX) with values from memory starting at address I.
    0x65 => FillV0ToVx,
);

/// A single executable instruction, selected by the instruction class first and the sub
/// opcode second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0`
    ClearScreen,
    /// `00EE`
    Return,
    /// `0NNN`
    MachineCall { nnn: u16 },
    /// `1NNN`
    Jump { nnn: u16 },
    /// `2NNN`
    Call { nnn: u16 },
    /// `3XNN`
    SkipEqual { x: usize, nn: u8 },
    /// `4XNN`
    SkipNotEqual { x: usize, nn: u8 },
    /// `5XY0`
    SkipRegistersEqual { x: usize, y: usize },
    /// `6XNN`
    Load { x: usize, nn: u8 },
    /// `7XNN`
    AddConst { x: usize, nn: u8 },
    /// `8XYT`
    Arithmetic { op: ArithmeticOp, x: usize, y: usize },
    /// `9XY0`
    SkipRegistersNotEqual { x: usize, y: usize },
    /// `ANNN`
    LoadIndex { nnn: u16 },
    /// `BNNN`
    JumpOffset { nnn: u16 },
    /// `CXNN`
    Random { x: usize, nn: u8 },
    /// `DXYN`
    Draw { x: usize, y: usize, n: u8 },
    /// `EXTT`
    Key { op: KeyOp, x: usize },
    /// `FXTT`
    Special { op: SpecialOp, x: usize },
}

impl TryFrom<Operands> for Instruction {
    type Error = OpcodeError;

    fn try_from(operands: Operands) -> Result<Self, Self::Error> {
        let Operands {
            value,
            x,
            y,
            nnn,
            nn,
            n,
        } = operands;
        let invalid = || OpcodeError::InvalidOpcode(value);

        let res = match value.t() {
            0x0 => match value {
                0x00E0 => Instruction::ClearScreen,
                0x00EE => Instruction::Return,
                _ => Instruction::MachineCall { nnn },
            },
            0x1 => Instruction::Jump { nnn },
            0x2 => Instruction::Call { nnn },
            0x3 => Instruction::SkipEqual { x, nn },
            0x4 => Instruction::SkipNotEqual { x, nn },
            0x5 => Instruction::SkipRegistersEqual { x, y },
            0x6 => Instruction::Load { x, nn },
            0x7 => Instruction::AddConst { x, nn },
            0x8 => Instruction::Arithmetic {
                op: ArithmeticOp::from_code(n).ok_or_else(invalid)?,
                x,
                y,
            },
            0x9 => Instruction::SkipRegistersNotEqual { x, y },
            0xA => Instruction::LoadIndex { nnn },
            0xB => Instruction::JumpOffset { nnn },
            0xC => Instruction::Random { x, nn },
            0xD => Instruction::Draw { x, y, n },
            0xE => Instruction::Key {
                op: KeyOp::from_code(nn).ok_or_else(invalid)?,
                x,
            },
            0xF => Instruction::Special {
                op: SpecialOp::from_code(nn).ok_or_else(invalid)?,
                x,
            },
            _ => return Err(invalid()),
        };
        Ok(res)
    }
}

impl TryFrom<Opcode> for Instruction {
    type Error = OpcodeError;

    fn try_from(value: Opcode) -> Result<Self, Self::Error> {
        Instruction::try_from(Operands::from(value))
    }
}

/// Represents a step of the program counter
/// this requires the enum ProgramCounterStep
/// to work.
pub trait ProgramCounter {
    /// will move the program counter forward by a step.
    fn step(&mut self, step: ProgramCounterStep);
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
/// Represents a command from the interpreter up to the host. The variants are ordered by
/// their significance, a draw outweighs a wait.
pub enum Operation {
    /// If no action has to be taken.
    None,
    /// The interpreter waits for the next key press
    Wait,
    /// The display changed and has to be redrawn
    Draw,
}

/// These are the traits that have to be full filled for a working opcode
/// table.
///
/// This trait requires the implementation of the [`ProgramCounter`](ProgramCounter) trait, as
/// every handler only reports how the program counter shall move and [`calc`](ChipOpcodes::calc)
/// applies the step after a successful execution.
pub trait ChipOpcodes: ProgramCounter {
    /// will execute the given instruction to completion
    fn calc(&mut self, instruction: &Instruction) -> Result<Operation, ProcessError> {
        let mut operation = Operation::None;
        let step_op = |(step, op)| {
            operation = op;
            step
        };

        let step = match *instruction {
            Instruction::ClearScreen => self.clear_screen().map(step_op),
            Instruction::Return => self.return_subroutine(),
            Instruction::MachineCall { nnn } => self.machine_call(nnn),
            Instruction::Jump { nnn } => self.jump(nnn),
            Instruction::Call { nnn } => self.call_subroutine(nnn),
            Instruction::SkipEqual { x, nn } => self.skip_equal(x, nn),
            Instruction::SkipNotEqual { x, nn } => self.skip_not_equal(x, nn),
            Instruction::SkipRegistersEqual { x, y } => self.skip_registers_equal(x, y),
            Instruction::Load { x, nn } => self.load(x, nn),
            Instruction::AddConst { x, nn } => self.add_const(x, nn),
            Instruction::Arithmetic { op, x, y } => self.arithmetic(op, x, y),
            Instruction::SkipRegistersNotEqual { x, y } => self.skip_registers_not_equal(x, y),
            Instruction::LoadIndex { nnn } => self.load_index(nnn),
            Instruction::JumpOffset { nnn } => self.jump_offset(nnn),
            Instruction::Random { x, nn } => self.random(x, nn),
            Instruction::Draw { x, y, n } => self.draw(x, y, n).map(step_op),
            Instruction::Key { op, x } => self.key(op, x),
            Instruction::Special { op, x } => self.special(op, x).map(step_op),
        }?;

        self.step(step);
        Ok(operation)
    }

    /// - `00E0` - Display  - `disp_clear()`        - Clears the screen.
    fn clear_screen(&mut self) -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// - `00EE` - Flow     - `return;`             - Returns from a subroutine.
    fn return_subroutine(&mut self) -> Result<ProgramCounterStep, ProcessError>;

    /// - `0NNN` - Call     -                       - Calls machine code routine ([RCA 1802](https://en.wikipedia.org/wiki/RCA_1802) for COSMAC VIP) at address `NNN`.
    ///
    /// There is no RCA 1802 to run the routine on, so this always fails.
    fn machine_call(&self, nnn: u16) -> Result<ProgramCounterStep, ProcessError>;

    /// - `1NNN` - Flow     - `goto NNN;`           - Jumps to address `NNN`.
    fn jump(&self, nnn: u16) -> Result<ProgramCounterStep, ProcessError>;

    /// - `2NNN` - Flow     - `*(0xNNN)()`          - Calls subroutine at `NNN`.
    fn call_subroutine(&mut self, nnn: u16) -> Result<ProgramCounterStep, ProcessError>;

    /// - `3XNN` - Cond     - `if(Vx==NN)`          - Skips the next instruction if `VX` equals `NN`.
    fn skip_equal(&self, x: usize, nn: u8) -> Result<ProgramCounterStep, ProcessError>;

    /// - `4XNN` - Cond     - `if(Vx!=NN)`          - Skips the next instruction if `VX` doesn't equal `NN`.
    fn skip_not_equal(&self, x: usize, nn: u8) -> Result<ProgramCounterStep, ProcessError>;

    /// - `5XY0` - Cond     - `if(Vx==Vy)`          - Skips the next instruction if `VX` equals `VY`.
    fn skip_registers_equal(&self, x: usize, y: usize)
        -> Result<ProgramCounterStep, ProcessError>;

    /// - `6XNN` - Const    - `Vx = NN`             - Sets `VX` to `NN`.
    fn load(&mut self, x: usize, nn: u8) -> Result<ProgramCounterStep, ProcessError>;

    /// - `7XNN` - Const    - `Vx += NN`            - Adds `NN` to `VX`. (Carry flag is not changed)
    fn add_const(&mut self, x: usize, nn: u8) -> Result<ProgramCounterStep, ProcessError>;

    /// A mutiuse opcode base for type `8XYT` (T is a sub opcode)
    ///
    /// - `8XY0` - Assign   - `Vx=Vy`               - Sets `VX` to the value of `VY`.
    /// - `8XY1` - BitOp    - `Vx=Vx|Vy`            - Sets `VX` to `VX` or `VY`. (Bitwise OR operation)
    /// - `8XY2` - BitOp    - `Vx=Vx&Vy`            - Sets `VX` to `VX` and `VY`. (Bitwise AND operation)
    /// - `8XY3` - BitOp    - `Vx=Vx^Vy`            - Sets `VX` to `VX` xor `VY`. (Bitwise XOR operation)
    /// - `8XY4` - Math     - `Vx += Vy`            - Adds `VY` to `VX`. `VF` is set to `1` when there's a carry, and to `0` when there isn't.
    /// - `8XY5` - Math     - `Vx -= Vy`            - `VY` is subtracted from `VX`. `VF` is set to `0` when there's a borrow, and `1` when there isn't.
    /// - `8XY6` - BitOp    - `Vx>>=1`              - Stores the least significant bit of `VX` in `VF` and then shifts `VX` to the right by `1`.
    /// - `8XY7` - Math     - `Vx=Vy-Vx`            - Sets `VX` to `VY` minus `VX`. `VF` is set to `0` when there's a borrow, and `1` when there isn't.
    /// - `8XYE` - BitOp    - `Vx<<=1`              - Stores the most significant bit of `VX` in `VF` and then shifts `VX` to the left by `1`.
    fn arithmetic(
        &mut self,
        op: ArithmeticOp,
        x: usize,
        y: usize,
    ) -> Result<ProgramCounterStep, ProcessError>;

    /// - `9XY0` - Cond     - `if(Vx!=Vy)`          - Skips the next instruction if `VX` doesn't equal `VY`.
    fn skip_registers_not_equal(
        &self,
        x: usize,
        y: usize,
    ) -> Result<ProgramCounterStep, ProcessError>;

    /// - `ANNN` - MEM      - `I = NNN`             - Sets `I` to the address `NNN`.
    fn load_index(&mut self, nnn: u16) -> Result<ProgramCounterStep, ProcessError>;

    /// - `BNNN` - Flow     - `PC=V0+NNN`           - Jumps to the address `NNN` plus `V0`.
    fn jump_offset(&self, nnn: u16) -> Result<ProgramCounterStep, ProcessError>;

    /// - `CXNN` - Rand     - `Vx=rand()&NN`        - Sets `VX` to the result of a bitwise and operation on a random number and `NN`.
    fn random(&mut self, x: usize, nn: u8) -> Result<ProgramCounterStep, ProcessError>;

    /// - `DXYN` - Disp     - `draw(Vx,Vy,N)`       - Draws a sprite at coordinate `(VX, VY)` that has a width of `8` pixels and a height of `N` pixels. Each row of `8` pixels is read as bit-coded starting from memory location `I`; `I` value doesn’t change after the execution of this instruction. `VF` is set to `1` if any screen pixels are flipped from set to unset when the sprite is drawn, and to `0` if that doesn’t happen.
    fn draw(
        &mut self,
        x: usize,
        y: usize,
        n: u8,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// A multiuse opcode base for type `EXTT` (T is a sub opcode)
    ///
    /// - `EX9E` - KeyOp    - `if(key()==Vx)`       - Skips the next instruction if the key stored in `VX` is pressed.
    /// - `EXA1` - KeyOp    - `if(key()!=Vx)`       - Skips the next instruction if the key stored in `VX` isn't pressed.
    fn key(&self, op: KeyOp, x: usize) -> Result<ProgramCounterStep, ProcessError>;

    /// A multiuse opcode base for type `FXTT` (T is a sub opcode)
    ///
    /// - `FX07` - Timer    - `Vx = get_delay()`    - Sets `VX` to the value of the delay timer.
    /// - `FX0A` - KeyOp    - `Vx = get_key()`      - A key press is awaited, and then stored in `VX`. The program counter stays put until a key is down.
    /// - `FX15` - Timer    - `delay_timer(Vx)`     - Sets the delay timer to `VX`.
    /// - `FX18` - Sound    - `sound_timer(Vx)`     - Sets the sound timer to `VX`.
    /// - `FX1E` - MEM      - `I +=Vx`              - Adds `VX` to `I`. `VF` is not affected.
    /// - `FX29` - MEM      - `I=sprite_addr[Vx]`   - Sets `I` to the location of the sprite for the character in `VX`.
    /// - `FX33` - BCD      - `246 / 100 => 2` `246 / 10 => 24 % 10 => 4` `246 % 10 => 6` - Stores the [binary-coded decimal](https://en.wikipedia.org/wiki/Binary-coded_decimal) representation of `VX` at `I`, `I+1` and `I+2`.
    /// - `FX55` - MEM      - `reg_dump(Vx,&I)`     - Stores `V0` to `VX` (including `VX`) in memory starting at address `I`. `I` itself is left unmodified.
    /// - `FX65` - MEM      - `reg_load(Vx,&I)`     - Fills `V0` to `VX` (including `VX`) with values from memory starting at address `I`. `I` itself is left unmodified.
    fn special(
        &mut self,
        op: SpecialOp,
        x: usize,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError>;
}

#[cfg(test)]
mod tests {
    use std::convert::TryInto;

    use super::*;

    #[test]
    fn test_operands() {
        let operands = Operands::from(0xD4A7);
        assert_eq!(
            operands,
            Operands {
                value: 0xD4A7,
                x: 0x4,
                y: 0xA,
                nnn: 0x4A7,
                nn: 0xA7,
                n: 0x7,
            }
        );
    }

    #[test]
    fn test_tryfrom_opcode_simple() {
        let value: Opcode = 0x00E0;
        let conv = value.try_into();
        assert_eq!(conv, Ok(Instruction::ClearScreen));
    }

    #[test]
    fn test_tryfrom_opcode_simple_fail() {
        let value: Opcode = 0x8128;
        let conv: Result<Instruction, _> = value.try_into();
        assert_eq!(conv, Err(OpcodeError::InvalidOpcode(value)));
    }

    #[test]
    fn test_tryfrom_opcode_multiple() {
        let tests: Vec<(Opcode, Result<Instruction, ()>)> = vec![
            // Zero
            (0x00E0, Ok(Instruction::ClearScreen)),
            (0x00EE, Ok(Instruction::Return)),
            (0x00E1, Ok(Instruction::MachineCall { nnn: 0x0E1 })),
            (0x0123, Ok(Instruction::MachineCall { nnn: 0x123 })),
            // One
            (0x1919, Ok(Instruction::Jump { nnn: 0x919 })),
            // Two
            (0x2222, Ok(Instruction::Call { nnn: 0x222 })),
            // Three
            (0x3123, Ok(Instruction::SkipEqual { x: 0x1, nn: 0x23 })),
            // Four
            (0x4123, Ok(Instruction::SkipNotEqual { x: 0x1, nn: 0x23 })),
            // Five, the low nibble is not part of the selection
            (0x5120, Ok(Instruction::SkipRegistersEqual { x: 0x1, y: 0x2 })),
            (0x5121, Ok(Instruction::SkipRegistersEqual { x: 0x1, y: 0x2 })),
            // Six
            (0x6123, Ok(Instruction::Load { x: 0x1, nn: 0x23 })),
            // Seven
            (0x7123, Ok(Instruction::AddConst { x: 0x1, nn: 0x23 })),
            // Eight
            (
                0x8120,
                Ok(Instruction::Arithmetic {
                    op: ArithmeticOp::Assign,
                    x: 0x1,
                    y: 0x2,
                }),
            ),
            (
                0x8121,
                Ok(Instruction::Arithmetic {
                    op: ArithmeticOp::Or,
                    x: 0x1,
                    y: 0x2,
                }),
            ),
            (
                0x8122,
                Ok(Instruction::Arithmetic {
                    op: ArithmeticOp::And,
                    x: 0x1,
                    y: 0x2,
                }),
            ),
            (
                0x8123,
                Ok(Instruction::Arithmetic {
                    op: ArithmeticOp::Xor,
                    x: 0x1,
                    y: 0x2,
                }),
            ),
            (
                0x8124,
                Ok(Instruction::Arithmetic {
                    op: ArithmeticOp::AddWithCarry,
                    x: 0x1,
                    y: 0x2,
                }),
            ),
            (
                0x8125,
                Ok(Instruction::Arithmetic {
                    op: ArithmeticOp::SubYFromX,
                    x: 0x1,
                    y: 0x2,
                }),
            ),
            (
                0x8126,
                Ok(Instruction::Arithmetic {
                    op: ArithmeticOp::ShiftRight,
                    x: 0x1,
                    y: 0x2,
                }),
            ),
            (
                0x8127,
                Ok(Instruction::Arithmetic {
                    op: ArithmeticOp::SubXFromY,
                    x: 0x1,
                    y: 0x2,
                }),
            ),
            (
                0x812E,
                Ok(Instruction::Arithmetic {
                    op: ArithmeticOp::ShiftLeft,
                    x: 0x1,
                    y: 0x2,
                }),
            ),
            (0x8128, Err(())),
            (0x812F, Err(())),
            // Nine
            (0x9120, Ok(Instruction::SkipRegistersNotEqual { x: 0x1, y: 0x2 })),
            // A
            (0xA222, Ok(Instruction::LoadIndex { nnn: 0x222 })),
            // B
            (0xB222, Ok(Instruction::JumpOffset { nnn: 0x222 })),
            // C
            (0xC123, Ok(Instruction::Random { x: 0x1, nn: 0x23 })),
            // D
            (
                0xD123,
                Ok(Instruction::Draw {
                    x: 0x1,
                    y: 0x2,
                    n: 0x3,
                }),
            ),
            // E
            (
                0xE19E,
                Ok(Instruction::Key {
                    x: 0x1,
                    op: KeyOp::Pressed,
                }),
            ),
            (
                0xE1A1,
                Ok(Instruction::Key {
                    x: 0x1,
                    op: KeyOp::NotPressed,
                }),
            ),
            (0xE111, Err(())),
            // F
            (
                0xF007,
                Ok(Instruction::Special {
                    x: 0x0,
                    op: SpecialOp::GetDelayTimer,
                }),
            ),
            (
                0xF00A,
                Ok(Instruction::Special {
                    x: 0x0,
                    op: SpecialOp::AwaitKeyPress,
                }),
            ),
            (
                0xF015,
                Ok(Instruction::Special {
                    x: 0x0,
                    op: SpecialOp::SetDelayTimer,
                }),
            ),
            (
                0xF018,
                Ok(Instruction::Special {
                    x: 0x0,
                    op: SpecialOp::SetSoundTimer,
                }),
            ),
            (
                0xF01E,
                Ok(Instruction::Special {
                    x: 0x0,
                    op: SpecialOp::AddVxToI,
                }),
            ),
            (
                0xF029,
                Ok(Instruction::Special {
                    x: 0x0,
                    op: SpecialOp::SetIToSprite,
                }),
            ),
            (
                0xF033,
                Ok(Instruction::Special {
                    x: 0x0,
                    op: SpecialOp::StoreBCD,
                }),
            ),
            (
                0xF555,
                Ok(Instruction::Special {
                    x: 0x5,
                    op: SpecialOp::StoreV0ToVx,
                }),
            ),
            (
                0xFA65,
                Ok(Instruction::Special {
                    x: 0xA,
                    op: SpecialOp::FillV0ToVx,
                }),
            ),
            (0xF0AA, Err(())),
        ];
        for (value, res) in tests {
            let conv: Result<Instruction, _> = value.try_into();
            assert_eq!(conv, res.map_err(|_| OpcodeError::InvalidOpcode(value)));
        }
    }

    #[test]
    fn test_operation_order() {
        assert!(Operation::Draw > Operation::Wait);
        assert!(Operation::Wait > Operation::None);
        assert_eq!(
            Operation::Draw,
            Operation::None.max(Operation::Draw).max(Operation::Wait)
        );
    }
}
