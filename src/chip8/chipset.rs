use std::convert::TryFrom;

use {
    crate::{
        definitions::{cpu, display, memory},
        devices::{DisplayCommands, KeyboardCommands},
        opcode::{
            self, ChipOpcodes, Instruction, Opcode, Operands, Operation, ProgramCounter,
            ProgramCounterStep,
        },
        resources::Rom,
        timer::Timer,
        ProcessError, StackError,
    },
    rand::RngCore,
    tinyvec::ArrayVec,
};

/// The execution state of the chip beside its registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipState {
    /// Executes one instruction after the other.
    Running,
    /// Repeats the key wait opcode until a key is down, the key index
    /// will end up in the given register.
    AwaitingKey(usize),
}

/// The ChipSet struct represents the current state
/// of the system, it contains all the structures
/// needed for emulating an instant on the
/// Chip8 CPU.
pub struct ChipSet<D, K>
where
    D: DisplayCommands,
    K: KeyboardCommands,
{
    /// name of the loaded rom
    pub(super) name: String,
    /// the last fetched opcode, all two bytes long and stored big-endian
    pub(super) opcode: Opcode,
    /// - `0x000-0x04F` - Used for the built in `4x5` pixel font set (`0-F`)
    /// - `0x050-0x1FF` - Reserved for the interpreter
    /// - `0x200-0xFFF` - Program ROM and work RAM
    pub(super) memory: Box<[u8; memory::SIZE]>,
    /// `8-bit` data registers named `V0` to `VF`. The `VF` register doubles as a flag for some
    /// instructions; thus, it should be avoided. In an addition operation, `VF` is the carry flag,
    /// while in subtraction, it is the "no borrow" flag. In the draw instruction `VF` is set upon
    /// pixel collision.
    pub(super) registers: [u8; cpu::register::SIZE],
    /// The index for the register, this is a special register entry
    /// called index `I`
    pub(super) index_register: u16,
    /// The program counter is a CPU register in the computer processor which has the address of the
    /// next instruction to be executed from memory.
    pub(super) program_counter: u16,
    /// The stack is only used to store return addresses when subroutines are called. The original
    /// [RCA 1802](https://de.wikipedia.org/wiki/RCA1802) version allocated `48` bytes for up to
    /// `12` levels of nesting; modern implementations usually have more.
    /// (here we are using `16`)
    pub(super) stack: ArrayVec<[u16; cpu::stack::SIZE]>,
    /// Delay timer: This timer is intended to be used for timing the events of games. Its value
    /// can be set and read.
    /// Counts down at 60 hertz, until it reaches 0.
    pub(super) delay_timer: Timer,
    /// Sound timer: This timer is used for sound effects. When its value is nonzero, a beeping
    /// sound is made.
    /// Counts down at 60 hertz, until it reaches 0.
    pub(super) sound_timer: Timer,
    /// The graphics of the Chip 8 are black and white and the screen has a total of `2048` pixels
    /// `(64 x 32)`. The pixels themself are owned by the host.
    pub(super) display: D,
    /// Input is done with a hex keyboard that has 16 keys ranging `0-F`. The state is owned
    /// by the host, the chip only reads it.
    pub(super) keyboard: K,
    /// This stores the random number generator, used by the chipset.
    /// It is stored into the chipset, so as to enable simple mocking
    /// of the given type.
    pub(super) rng: Box<dyn RngCore + Send>,
    /// Running or waiting for a key press
    pub(super) state: ChipState,
}

impl<D, K> ChipSet<D, K>
where
    D: DisplayCommands,
    K: KeyboardCommands,
{
    /// will create a new chipset object
    pub fn new(rom: Rom, display: D, keyboard: K) -> Self {
        // initialize all the memory with 0
        let mut ram = Box::new([0; memory::SIZE]);

        // load fonts
        ram[display::fontset::LOCATION
            ..(display::fontset::LOCATION + display::fontset::FONTSET.len())]
            .copy_from_slice(&display::fontset::FONTSET);

        // write the rom data into memory
        let start = cpu::PROGRAM_COUNTER as usize;
        ram[start..(start + rom.get_data().len())].copy_from_slice(rom.get_data());

        log::info!(
            "loaded rom '{}' with {} bytes",
            rom.get_name(),
            rom.get_data().len()
        );

        Self {
            name: rom.get_name().to_string(),
            opcode: 0,
            memory: ram,
            registers: [0; cpu::register::SIZE],
            index_register: 0,
            program_counter: cpu::PROGRAM_COUNTER,
            stack: ArrayVec::new(),
            delay_timer: Timer::default(),
            sound_timer: Timer::default(),
            display,
            keyboard,
            rng: Box::new(rand::rngs::OsRng),
            state: ChipState::Running,
        }
    }

    /// Will replace the random number generator.
    pub fn with_rng<R>(mut self, rng: R) -> Self
    where
        R: RngCore + Send + 'static,
    {
        self.rng = Box::new(rng);
        self
    }

    /// will get the next opcode from memory
    pub(super) fn set_opcode(&mut self) {
        self.opcode = opcode::fetch(&self.memory, self.program_counter);
    }

    /// will advance the program by a single step
    pub fn next(&mut self) -> Result<Operation, ProcessError> {
        // get next opcode
        self.set_opcode();
        log::debug!(
            "pc {:#06X} opcode {:#06X}",
            self.program_counter,
            self.opcode
        );

        let instruction = Instruction::try_from(Operands::from(self.opcode)).map_err(|_| {
            ProcessError::UnknownOpcode {
                opcode: self.opcode,
                pc: self.program_counter,
            }
        })?;

        // run the opcode
        self.calc(&instruction)
    }

    /// Will count both timers down by a single step.
    /// Returns if the sound stopped with this step.
    pub fn tick_timers(&mut self) -> bool {
        self.delay_timer.tick();

        let was_active = self.is_sound_active();
        let stopped = was_active && !self.sound_timer.tick();
        if stopped {
            log::trace!("sound timer ran out");
        }
        stopped
    }

    /// Will move the program counter past the current opcode, without executing it.
    pub fn skip_instruction(&mut self) {
        self.state = ChipState::Running;
        self.step(ProgramCounterStep::Next);
    }

    /// will return the name of the loaded rom
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// will return the last fetched opcode
    pub fn get_opcode(&self) -> Opcode {
        self.opcode
    }

    /// will return the full memory
    pub fn get_memory(&self) -> &[u8] {
        &self.memory[..]
    }

    /// will return the registers `V0` to `VF`
    pub fn get_registers(&self) -> &[u8] {
        &self.registers
    }

    /// will return the index register `I`
    pub fn get_index_register(&self) -> u16 {
        self.index_register
    }

    /// will return the program counter
    pub fn get_program_counter(&self) -> u16 {
        self.program_counter
    }

    /// will return the stored return addresses, the last entry is the top of the stack
    pub fn get_stack(&self) -> &[u16] {
        &self.stack
    }

    /// will return the sound timer
    pub fn get_sound_timer(&self) -> u8 {
        self.sound_timer.get_value()
    }

    /// will return the delay timer
    pub fn get_delay_timer(&self) -> u8 {
        self.delay_timer.get_value()
    }

    /// A beep shall be played as long as the sound timer runs.
    pub fn is_sound_active(&self) -> bool {
        self.sound_timer.get_value() > 0
    }

    /// will return the execution state
    pub fn get_state(&self) -> ChipState {
        self.state
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn keyboard(&self) -> &K {
        &self.keyboard
    }

    pub fn keyboard_mut(&mut self) -> &mut K {
        &mut self.keyboard
    }

    /// Will push the current pointer to the stack
    pub(super) fn push_stack(&mut self, pointer: u16) -> Result<(), ProcessError> {
        if self.stack.len() == self.stack.capacity() {
            Err(self.stack_error(StackError::Full))
        } else {
            self.stack.push(pointer);
            Ok(())
        }
    }

    /// Will pop from the stack
    pub(super) fn pop_stack(&mut self) -> Result<u16, ProcessError> {
        match self.stack.pop() {
            Some(pointer) => Ok(pointer),
            None => Err(self.stack_error(StackError::Empty)),
        }
    }

    fn stack_error(&self, source: StackError) -> ProcessError {
        ProcessError::Stack {
            source,
            pc: self.program_counter,
        }
    }

    /// The memory address `I + offset`, wrapped to the memory size.
    pub(super) fn index_address(&self, offset: usize) -> usize {
        (self.index_register as usize + offset) % memory::SIZE
    }
}

impl<D: DisplayCommands, K: KeyboardCommands> ProgramCounter for ChipSet<D, K> {
    fn step(&mut self, step: ProgramCounterStep) {
        self.program_counter = step.apply(self.program_counter);
    }
}
