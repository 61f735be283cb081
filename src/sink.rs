//! Consumers of finished mapping tables

use crate::{
    keylayout::{KeyMap, RESERVE_NAME},
    mapping::MappingTable,
};
use std::{fmt, io};

/// Something which accepts mapping tables, normally the driver
pub trait MapSink: fmt::Display {
    /// Number of mapping tables which can be set. Zero or less means multiple
    /// tables are not supported.
    fn capacity(&mut self) -> io::Result<i32>;

    /// Hand over a complete mapping table
    fn set_map(&mut self, table: MappingTable) -> io::Result<()>;
}

/// Print mapping tables rather than setting them
pub struct DumpSink<'a, W: io::Write> {
    default: &'a KeyMap,
    out: W,
}

impl<'a, W: io::Write> DumpSink<'a, W> {
    /// The default key map is used for printing key names
    pub fn new(default: &'a KeyMap, out: W) -> Self {
        DumpSink { default, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: io::Write> MapSink for DumpSink<'_, W> {
    fn capacity(&mut self) -> io::Result<i32> {
        Ok(i32::MAX)
    }

    fn set_map(&mut self, table: MappingTable) -> io::Result<()> {
        writeln!(
            self.out,
            "identity: {:#06x} powerkey: {}",
            table.identity, table.powerkey
        )?;

        for (customer, default) in table.mapped() {
            let name = self
                .default
                .get(default)
                .map_or(RESERVE_NAME, |key| key.name.as_str());

            writeln!(self.out, "\t[{customer:3}] --> {{ {default:3}, {name} }}")?;
        }

        self.out.flush()
    }
}

impl<W: io::Write> fmt::Display for DumpSink<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "dump")
    }
}

#[test]
fn dump() {
    let mut default = KeyMap::new();
    default.insert(1, "POWER").unwrap();
    default.insert(2, "VOLUP").unwrap();

    let mut customer = KeyMap::new();
    customer.insert(10, "POWER").unwrap();
    customer.insert(11, "VOLUP").unwrap();
    customer.insert(12, "MUTE").unwrap();

    let mut sink = DumpSink::new(&default, Vec::new());

    assert_eq!(sink.capacity().unwrap(), i32::MAX);

    sink.set_map(MappingTable::build(&default, &customer).with_identity(0x9f00))
        .unwrap();

    assert_eq!(
        String::from_utf8(sink.into_inner()).unwrap(),
        "identity: 0x9f00 powerkey: 10\n\t[ 10] --> {   1, POWER }\n\t[ 11] --> {   2, VOLUP }\n"
    );
}
