use std::{
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::{Duration, Instant},
};

use crate::{
    chip8::ChipSet,
    definitions::{cpu, timer},
    devices::{DisplayCommands, KeyboardCommands},
    opcode::Operation,
    timer::Interval,
    ConfigError, ProcessError,
};

/// The amount of the slower period a single loop iteration makes up for at most.
const MAX_LAG_PERIODS: u32 = 4;

/// What the runner does with an instruction that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop and hand the error to the caller.
    Halt,
    /// Log the error, move past the failing opcode and keep going.
    Skip,
}

/// The runtime configuration of the [`Runner`](Runner).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    /// instructions executed per second
    pub cpu_hertz: u64,
    /// timer decrements per second
    pub timer_hertz: u64,
    pub error_policy: ErrorPolicy,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            cpu_hertz: cpu::HERTZ,
            timer_hertz: timer::HERTZ,
            error_policy: ErrorPolicy::Halt,
        }
    }
}

/// Drives the chip, the instructions and the timers each run on their own cadence.
pub struct Runner<D, K>
where
    D: DisplayCommands,
    K: KeyboardCommands,
{
    chip: ChipSet<D, K>,
    cpu: Interval,
    timer: Interval,
    config: RunnerConfig,
}

impl<D, K> Runner<D, K>
where
    D: DisplayCommands,
    K: KeyboardCommands,
{
    pub fn new(chip: ChipSet<D, K>, config: RunnerConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            chip,
            cpu: Interval::from_hertz(config.cpu_hertz, "cpu")?,
            timer: Interval::from_hertz(config.timer_hertz, "timer")?,
            config,
        })
    }

    /// Will execute a single instruction.
    pub fn step(&mut self) -> Result<Operation, ProcessError> {
        match self.chip.next() {
            Ok(operation) => Ok(operation),
            Err(err) => match self.config.error_policy {
                ErrorPolicy::Skip => {
                    log::warn!("skipping the instruction: {}", err);
                    self.chip.skip_instruction();
                    Ok(Operation::None)
                }
                ErrorPolicy::Halt => {
                    log::error!("halting '{}': {}", self.chip.get_name(), err);
                    Err(err)
                }
            },
        }
    }

    /// Will count the timers down once.
    pub fn tick(&mut self) {
        log::trace!(
            "timer tick delay {} sound {}",
            self.chip.get_delay_timer(),
            self.chip.get_sound_timer()
        );
        self.chip.tick_timers();
    }

    /// Will run all the instructions and timer ticks that are due after the given time
    /// passed. The timer ticks are spread out over the instructions.
    ///
    /// Returns the most significant operation of all the executed instructions.
    pub fn advance(&mut self, elapsed: Duration) -> Result<Operation, ProcessError> {
        let cycles = self.cpu.advance(elapsed);
        let ticks = self.timer.advance(elapsed);

        let mut operation = Operation::None;
        let mut ticked = 0;
        for cycle in 1..=cycles {
            operation = operation.max(self.step()?);

            let due = cycle * ticks / cycles;
            while ticked < due {
                self.tick();
                ticked += 1;
            }
        }

        // no instruction was due, but the timers still are
        for _ in ticked..ticks {
            self.tick();
        }

        Ok(operation)
    }

    /// The longest stretch of time a single loop iteration of [`run`](Runner::run) makes up
    /// for, a stalled host is not caught up in one burst.
    pub fn catch_up(&self, elapsed: Duration) -> Duration {
        let limit = self.cpu.period().max(self.timer.period()) * MAX_LAG_PERIODS;
        if elapsed > limit {
            log::debug!("dropping {:?} of lag", elapsed - limit);
            limit
        } else {
            elapsed
        }
    }

    /// Will run the chip until the stop signal is set or an instruction halts the runner.
    /// The signal is checked once per cycle.
    ///
    /// After every cycle the host gets the chip together with the most significant
    /// operation of the cycle, to render the display and to update the keyboard.
    pub fn run<F>(&mut self, stop: &AtomicBool, mut host: F) -> Result<(), ProcessError>
    where
        F: FnMut(&mut ChipSet<D, K>, Operation),
    {
        log::info!(
            "running '{}' at {} hz",
            self.chip.get_name(),
            self.config.cpu_hertz
        );

        let mut last = Instant::now();
        while !stop.load(Ordering::Relaxed) {
            let now = Instant::now();
            let elapsed = self.catch_up(now.duration_since(last));
            last = now;

            let operation = self.advance(elapsed)?;
            host(&mut self.chip, operation);

            if let Some(rest) = self.cpu.period().checked_sub(now.elapsed()) {
                thread::sleep(rest);
            }
        }

        log::info!("stopped '{}'", self.chip.get_name());
        Ok(())
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn chip(&self) -> &ChipSet<D, K> {
        &self.chip
    }

    pub fn chip_mut(&mut self) -> &mut ChipSet<D, K> {
        &mut self.chip
    }

    /// Will hand back the chip.
    pub fn into_chip(self) -> ChipSet<D, K> {
        self.chip
    }
}
