//! Parse Android key layout files (`*.kl`). Only `key <keycode> <name>` lines
//! are understood; comments, malformed lines and other directives are skipped.

use crate::Error;
use log::{trace, warn};
use std::{
    fmt,
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

/// Lowest keycode the driver accepts
pub const KEYCODE_MIN: u32 = 0;
/// Highest keycode the driver accepts
pub const KEYCODE_MAX: u32 = 255;
/// Number of slots in a key map and in a mapping table
pub const KEYCODE_CNT: usize = KEYCODE_MAX as usize + 1;
/// Size of the name buffer, including the nul terminator
pub const MAX_NAME_LEN: usize = 32;

/// Keycode of an unset slot
pub const RESERVE_CODE: u32 = 0;
/// Name of an unset slot
pub const RESERVE_NAME: &str = "!RESERVE";

/// Single slot of a key map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub keycode: u32,
    pub name: String,
}

impl Key {
    fn reserved() -> Self {
        Key {
            keycode: RESERVE_CODE,
            name: RESERVE_NAME.to_owned(),
        }
    }

    /// Slots with the reserved keycode never match anything in the default map.
    /// Note that a key explicitly assigned keycode 0 is reserved too.
    pub fn is_reserved(&self) -> bool {
        self.keycode == RESERVE_CODE
    }

    /// Slot was never assigned by a key layout
    pub fn is_unset(&self) -> bool {
        self.is_reserved() && self.name == RESERVE_NAME
    }
}

/// Key names indexed by keycode. There is always exactly one slot per keycode
/// in `KEYCODE_MIN..=KEYCODE_MAX`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    keys: [Key; KEYCODE_CNT],
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyMap {
    /// Create a key map with all slots reserved
    pub fn new() -> Self {
        KeyMap {
            keys: std::array::from_fn(|_| Key::reserved()),
        }
    }

    /// Parse a key layout file into a new key map
    pub fn parse(path: &Path) -> Result<KeyMap, Error> {
        let mut map = KeyMap::new();

        map.load(path)?;

        Ok(map)
    }

    /// Apply the key layout file at path to this map. On a read error, the
    /// lines read so far have been applied.
    pub fn load(&mut self, path: &Path) -> Result<(), Error> {
        let file = File::open(path).map_err(|e| Error::Open(path.to_owned(), e))?;

        self.read_from(BufReader::new(file), path)
            .map_err(|e| Error::Read(path.to_owned(), e))
    }

    /// Apply key layout lines from reader. The path is only used for messages.
    pub fn read_from<R: BufRead>(&mut self, reader: R, path: &Path) -> io::Result<()> {
        for (line_no, line) in reader.split(b'\n').enumerate() {
            let line = line?;
            let line = String::from_utf8_lossy(&line);

            let line = line.trim_start_matches(' ');

            if line.starts_with('#') {
                continue;
            }

            let tokens: Vec<_> = line.split_whitespace().collect();

            let [label, keycode, name] = tokens[..] else {
                continue;
            };

            if label != "key" {
                continue;
            }

            let Some(keycode) = keycode
                .parse::<u32>()
                .ok()
                .filter(|keycode| (KEYCODE_MIN..=KEYCODE_MAX).contains(keycode))
            else {
                trace!(
                    "{}:{}: keycode ‘{keycode}’ ignored",
                    path.display(),
                    line_no + 1
                );
                continue;
            };

            if let Err(e) = self.insert(keycode, name) {
                warn!("{}:{}: {e}", path.display(), line_no + 1);
            }
        }

        Ok(())
    }

    /// Set the name of a slot, replacing whatever was there before
    pub fn insert(&mut self, keycode: u32, name: &str) -> Result<(), String> {
        if name.len() >= MAX_NAME_LEN {
            return Err(format!(
                "key name ‘{name}’ is longer than {} characters",
                MAX_NAME_LEN - 1
            ));
        }

        let Some(slot) = self.keys.get_mut(keycode as usize) else {
            return Err(format!("keycode {keycode} out of range"));
        };

        *slot = Key {
            keycode,
            name: name.to_owned(),
        };

        Ok(())
    }

    pub fn get(&self, keycode: u32) -> Option<&Key> {
        self.keys.get(keycode as usize)
    }

    /// All slots in keycode order, including reserved ones
    pub fn iter(&self) -> impl Iterator<Item = &Key> {
        self.keys.iter()
    }
}

/// Print the assigned slots in key layout format
impl fmt::Display for KeyMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for key in self.keys.iter().filter(|key| !key.is_unset()) {
            writeln!(f, "key\t{}\t{}", key.keycode, key.name)?;
        }

        Ok(())
    }
}
