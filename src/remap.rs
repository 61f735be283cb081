//! Build a mapping table for every customer key layout and hand them to the
//! driver, one at a time.

use crate::{
    identity,
    keylayout::KeyMap,
    mapping::MappingTable,
    sink::MapSink,
    Error,
};
use log::{debug, error, trace, warn};
use std::{fs, path::Path};

/// Load the default key layout. If it cannot be read, whatever was read is
/// used; if it is missing, no customer key will be mapped.
pub fn load_default(path: &Path) -> KeyMap {
    let mut default = KeyMap::new();

    if let Err(e) = default.load(path) {
        warn!("{e}");
    }

    trace!("default key layout:\n{default}");

    default
}

/// Check that the driver supports multiple mapping tables, and return how many
pub fn check_capacity<S: MapSink>(sink: &mut S) -> Result<i32, Error> {
    let capacity = sink
        .capacity()
        .map_err(|e| Error::Device(sink.to_string(), e))?;

    if capacity <= 0 {
        return Err(Error::Capacity(capacity));
    }

    debug!("{sink}: driver supports {capacity} mapping tables");

    Ok(capacity)
}

/// Set a mapping table for each customer key layout in dir. The first table the
/// sink refuses ends the run. Returns the number of tables set.
pub fn configure<S: MapSink>(
    sink: &mut S,
    default: &KeyMap,
    dir: &Path,
    model: &str,
) -> Result<usize, Error> {
    let capacity = check_capacity(sink)?;

    let mut file_names = Vec::new();

    for entry in fs::read_dir(dir).map_err(|e| Error::Directory(dir.to_owned(), e))? {
        let entry = entry.map_err(|e| Error::Directory(dir.to_owned(), e))?;

        match entry.file_name().into_string() {
            Ok(file_name) => file_names.push(file_name),
            Err(file_name) => trace!("{}: skipped", file_name.to_string_lossy()),
        }
    }

    file_names.sort();

    let mut count = 0;

    for file_name in file_names {
        let Some(identity) = identity::verify(&file_name, model) else {
            continue;
        };

        let path = dir.join(&file_name);

        debug!("{}: identity {identity:#06x}", path.display());

        let customer = match KeyMap::parse(&path) {
            Ok(customer) => customer,
            Err(e) => {
                error!("{e}");
                continue;
            }
        };

        let table = MappingTable::build(default, &customer).with_identity(identity);

        if count == capacity as usize {
            warn!("{sink}: more customer key layouts than the {capacity} mapping tables supported");
        }

        sink.set_map(table)
            .map_err(|error| Error::Sink { identity, error })?;

        count += 1;
    }

    Ok(count)
}
