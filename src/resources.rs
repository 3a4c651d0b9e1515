use crate::{definitions::cpu, LoadError};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Represents a single rom with it's information
pub struct Rom {
    /// The rom name
    name: String,
    /// The program data, stored as a u8 slice on the heap
    data: Box<[u8]>,
}

impl Rom {
    /// Will generate a new rom based of the given data, if it fits into the program memory.
    ///
    /// # Example
    /// ```rust
    /// # use chip::resources::Rom;
    /// # use chip::LoadError;
    /// let rom = Rom::new("JUMP", &[0x12, 0x00]).expect("fits into memory");
    /// assert_eq!(rom.get_name(), "JUMP");
    /// assert_eq!(rom.get_data(), &[0x12, 0x00]);
    ///
    /// assert_eq!(
    ///     Rom::new("HUGE", &[0; 4000]),
    ///     Err(LoadError::TooLarge { len: 4000, max: 3584 })
    /// );
    /// ```
    pub fn new(name: &str, data: &[u8]) -> Result<Self, LoadError> {
        if data.len() > cpu::PROGRAM_SIZE {
            return Err(LoadError::TooLarge {
                len: data.len(),
                max: cpu::PROGRAM_SIZE,
            });
        }
        Ok(Rom {
            name: name.to_string(),
            data: data.into(),
        })
    }

    /// Will return a slice internal values of the given data
    pub fn get_data(&self) -> &[u8] {
        &self.data
    }

    /// Will return the name of the rom.
    pub fn get_name(&self) -> &str {
        &self.name
    }
}
