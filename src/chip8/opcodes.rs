use crate::{
    definitions::{cpu, display, keyboard},
    devices::{DisplayCommands, KeyboardCommands},
    opcode::{ArithmeticOp, ChipOpcodes, KeyOp, Operation, ProgramCounterStep, SpecialOp},
    ProcessError,
};

use super::{ChipSet, ChipState};

impl<D, K> ChipSet<D, K>
where
    D: DisplayCommands,
    K: KeyboardCommands,
{
    /// Will write the given value into `VF`
    #[inline]
    fn set_flag(&mut self, flag: bool) {
        self.registers[cpu::register::LAST] = flag as u8;
    }

    /// The key index stored in `VX`, keys only span a single nibble
    #[inline]
    fn key_index(&self, x: usize) -> usize {
        (self.registers[x] & 0x0F) as usize
    }
}

impl<D, K> ChipOpcodes for ChipSet<D, K>
where
    D: DisplayCommands,
    K: KeyboardCommands,
{
    fn clear_screen(&mut self) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        // 00E0
        // clear display
        self.display.clear_display();
        self.display.mark_dirty();
        Ok((ProgramCounterStep::Next, Operation::Draw))
    }

    fn return_subroutine(&mut self) -> Result<ProgramCounterStep, ProcessError> {
        // 00EE
        // Return from sub routine => pop from stack, the stored address is the call
        // itself so move on to the opcode after it
        let pc = self.pop_stack()?;
        log::debug!("return to {:#06X}", pc);
        Ok(ProgramCounterStep::Jump(ProgramCounterStep::Next.apply(pc)))
    }

    fn machine_call(&self, nnn: u16) -> Result<ProgramCounterStep, ProcessError> {
        // 0NNN
        log::debug!("machine code routine at {:#06X} requested", nnn);
        Err(ProcessError::Unsupported {
            opcode: self.opcode,
            pc: self.program_counter,
        })
    }

    fn jump(&self, nnn: u16) -> Result<ProgramCounterStep, ProcessError> {
        // 1NNN
        // Jumps to address NNN.
        Ok(ProgramCounterStep::Jump(nnn))
    }

    fn call_subroutine(&mut self, nnn: u16) -> Result<ProgramCounterStep, ProcessError> {
        // 2NNN
        // Calls subroutine at NNN, the current location is stored on the stack
        self.push_stack(self.program_counter)?;
        Ok(ProgramCounterStep::Jump(nnn))
    }

    fn skip_equal(&self, x: usize, nn: u8) -> Result<ProgramCounterStep, ProcessError> {
        // 3XNN
        // Skips the next instruction if VX equals NN.
        Ok(ProgramCounterStep::cond(self.registers[x] == nn))
    }

    fn skip_not_equal(&self, x: usize, nn: u8) -> Result<ProgramCounterStep, ProcessError> {
        // 4XNN
        // Skips the next instruction if VX doesn't equal NN.
        Ok(ProgramCounterStep::cond(self.registers[x] != nn))
    }

    fn skip_registers_equal(
        &self,
        x: usize,
        y: usize,
    ) -> Result<ProgramCounterStep, ProcessError> {
        // 5XY0
        // Skips the next instruction if VX equals VY.
        Ok(ProgramCounterStep::cond(
            self.registers[x] == self.registers[y],
        ))
    }

    fn load(&mut self, x: usize, nn: u8) -> Result<ProgramCounterStep, ProcessError> {
        // 6XNN
        // Sets VX to NN.
        self.registers[x] = nn;
        Ok(ProgramCounterStep::Next)
    }

    fn add_const(&mut self, x: usize, nn: u8) -> Result<ProgramCounterStep, ProcessError> {
        // 7XNN
        // Adds NN to VX. (Carry flag is not changed)
        self.registers[x] = self.registers[x].wrapping_add(nn);
        Ok(ProgramCounterStep::Next)
    }

    fn arithmetic(
        &mut self,
        op: ArithmeticOp,
        x: usize,
        y: usize,
    ) -> Result<ProgramCounterStep, ProcessError> {
        let vx = self.registers[x];
        let vy = self.registers[y];
        // the flag is written after the result, so VF as the target ends up with the flag
        match op {
            ArithmeticOp::Assign => self.registers[x] = vy,
            ArithmeticOp::Or => self.registers[x] = vx | vy,
            ArithmeticOp::And => self.registers[x] = vx & vy,
            ArithmeticOp::Xor => self.registers[x] = vx ^ vy,
            ArithmeticOp::AddWithCarry => {
                let (res, carry) = vx.overflowing_add(vy);
                self.registers[x] = res;
                self.set_flag(carry);
            }
            ArithmeticOp::SubYFromX => {
                let (res, borrow) = vx.overflowing_sub(vy);
                self.registers[x] = res;
                self.set_flag(!borrow);
            }
            ArithmeticOp::ShiftRight => {
                const LEAST_SIGNIFICANT: u8 = 1;
                self.registers[x] = vx >> 1;
                self.set_flag(vx & LEAST_SIGNIFICANT == LEAST_SIGNIFICANT);
            }
            ArithmeticOp::SubXFromY => {
                let (res, borrow) = vy.overflowing_sub(vx);
                self.registers[x] = res;
                self.set_flag(!borrow);
            }
            ArithmeticOp::ShiftLeft => {
                const MOST_SIGNIFICANT: u8 = 1 << 7;
                self.registers[x] = vx << 1;
                self.set_flag(vx & MOST_SIGNIFICANT == MOST_SIGNIFICANT);
            }
        }
        Ok(ProgramCounterStep::Next)
    }

    fn skip_registers_not_equal(
        &self,
        x: usize,
        y: usize,
    ) -> Result<ProgramCounterStep, ProcessError> {
        // 9XY0
        // Skips the next instruction if VX doesn't equal VY.
        Ok(ProgramCounterStep::cond(
            self.registers[x] != self.registers[y],
        ))
    }

    fn load_index(&mut self, nnn: u16) -> Result<ProgramCounterStep, ProcessError> {
        // ANNN
        // Sets I to the address NNN.
        self.index_register = nnn;
        Ok(ProgramCounterStep::Next)
    }

    fn jump_offset(&self, nnn: u16) -> Result<ProgramCounterStep, ProcessError> {
        // BNNN
        // Jumps to the address NNN plus V0.
        let v0 = self.registers[0] as u16;
        Ok(ProgramCounterStep::Jump(nnn + v0))
    }

    fn random(&mut self, x: usize, nn: u8) -> Result<ProgramCounterStep, ProcessError> {
        // CXNN
        // Sets VX to the result of a bitwise and operation on a random number and NN.
        // using a fill bytes call here, as the trait RngCore does not
        // support random u8.
        let mut rand: [u8; 1] = [0];
        self.rng.fill_bytes(&mut rand);
        self.registers[x] = nn & rand[0];
        Ok(ProgramCounterStep::Next)
    }

    fn draw(
        &mut self,
        x: usize,
        y: usize,
        n: u8,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        // DXYN
        // see https://tobiasvl.github.io/blog/write-a-chip-8-emulator/
        // The starting position wraps around the screen, the sprite itself is cut off at
        // the edges.
        let coorx = self.registers[x] as usize % display::WIDTH;
        let coory = self.registers[y] as usize % display::HEIGHT;

        let mut collision = false;

        for row in 0..n as usize {
            let y = coory + row;
            if y >= display::HEIGHT {
                break;
            }

            // Get one byte of sprite data from the memory address in the I register
            let sprite = self.memory[self.index_address(row)];

            // - If the current pixel in the sprite row is 'on' and the pixel at coordinates X,Y
            //   on the screen is also 'on', turn 'off' the pixel and remember the collision.
            // - Or if the current pixel in the sprite row is 'on' and the screen pixel is 'not',
            //  draw the pixel at the X and Y coordinates.
            for column in 0..display::SPRITE_WIDTH {
                let x = coorx + column;
                if x >= display::WIDTH {
                    break;
                }

                // most significant bit first
                let mask = 0x80 >> column;
                if sprite & mask == 0 {
                    continue;
                }

                if self.display.get_pixel(x, y) {
                    self.display.clear_pixel(x, y);
                    collision = true;
                } else {
                    self.display.set_pixel(x, y);
                }
            }
        }

        self.set_flag(collision);
        self.display.mark_dirty();

        Ok((ProgramCounterStep::Next, Operation::Draw))
    }

    fn key(&self, op: KeyOp, x: usize) -> Result<ProgramCounterStep, ProcessError> {
        let pressed = self.keyboard.is_pressed(self.key_index(x));
        let step = match op {
            // EX9E
            // Skips the next instruction if the key stored in VX is pressed.
            KeyOp::Pressed => ProgramCounterStep::cond(pressed),
            // EXA1
            // Skips the next instruction if the key stored in VX isn't pressed.
            KeyOp::NotPressed => ProgramCounterStep::cond(!pressed),
        };
        Ok(step)
    }

    fn special(
        &mut self,
        op: SpecialOp,
        x: usize,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        let mut operation = Operation::None;
        let mut pcs = ProgramCounterStep::Next;
        match op {
            SpecialOp::GetDelayTimer => {
                // FX07
                // Sets VX to the value of the delay timer.
                self.registers[x] = self.delay_timer.get_value();
            }
            SpecialOp::AwaitKeyPress => {
                // FX0A
                // A key press is awaited, and then stored in VX. Until then the program
                // counter stays in place and this opcode runs again on the next cycle.
                let keyboard = &self.keyboard;
                match (0..keyboard::SIZE).find(|&key| keyboard.is_pressed(key)) {
                    Some(key) => {
                        self.registers[x] = key as u8;
                        self.state = ChipState::Running;
                    }
                    None => {
                        if self.state == ChipState::Running {
                            log::trace!("waiting for a key press into V{:X}", x);
                        }
                        self.state = ChipState::AwaitingKey(x);
                        operation = Operation::Wait;
                        pcs = ProgramCounterStep::None;
                    }
                }
            }
            SpecialOp::SetDelayTimer => {
                // FX15
                // Sets the delay timer to VX.
                self.delay_timer.set_value(self.registers[x]);
            }
            SpecialOp::SetSoundTimer => {
                // FX18
                // Sets the sound timer to VX.
                self.sound_timer.set_value(self.registers[x]);
            }
            SpecialOp::AddVxToI => {
                // FX1E
                // Adds VX to I. VF is not affected.
                let vx = self.registers[x] as u16;
                self.index_register = self.index_register.wrapping_add(vx);
            }
            SpecialOp::SetIToSprite => {
                // FX29
                // Sets I to the location of the sprite for the character in VX. Characters 0-F (in
                // hexadecimal) are represented by a 4x5 font.
                let glyph = self.registers[x] as usize * display::fontset::GLYPH_SIZE;
                self.index_register = (display::fontset::LOCATION + glyph) as u16;
            }
            SpecialOp::StoreBCD => {
                // FX33
                // Stores the binary-coded decimal representation of VX, with the most significant
                // of three digits at the address in I, the middle digit at I plus 1, and the least
                // significant digit at I plus 2.
                let r = self.registers[x];
                let digits = [r / 100, r / 10 % 10, r % 10]; // 246 => [2, 4, 6]
                for (offset, digit) in digits.iter().enumerate() {
                    let address = self.index_address(offset);
                    self.memory[address] = *digit;
                }
            }
            SpecialOp::StoreV0ToVx => {
                // FX55
                // Stores V0 to VX (including VX) in memory starting at address I. The offset from I
                // is increased by 1 for each value written, but I itself is left unmodified.
                for offset in 0..=x {
                    let address = self.index_address(offset);
                    self.memory[address] = self.registers[offset];
                }
            }
            SpecialOp::FillV0ToVx => {
                // FX65
                // Fills V0 to VX (including VX) with values from memory starting at address I. The
                // offset from I is increased by 1 for each value written, but I itself is left
                // unmodified.
                for offset in 0..=x {
                    self.registers[offset] = self.memory[self.index_address(offset)];
                }
            }
        }
        Ok((pcs, operation))
    }
}
