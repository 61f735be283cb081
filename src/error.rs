use std::{fmt, io, path::PathBuf};

/// Everything that can go wrong while configuring the driver. Malformed lines
/// in a key layout and file names which are not customer layouts are not
/// errors; those are skipped where they are found.
#[derive(Debug)]
pub enum Error {
    /// A key layout file could not be opened
    Open(PathBuf, io::Error),
    /// Reading a key layout file failed before end of file
    Read(PathBuf, io::Error),
    /// The key layout directory could not be listed
    Directory(PathBuf, io::Error),
    /// The device could not be opened or did not answer the capacity query
    Device(String, io::Error),
    /// The driver reports it cannot hold any mapping tables
    Capacity(i32),
    /// The driver rejected a mapping table
    Sink { identity: u16, error: io::Error },
    /// Configuration file could not be read or parsed
    Config(PathBuf, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Open(path, e) | Error::Read(path, e) | Error::Directory(path, e) => {
                write!(f, "{}: {e}", path.display())
            }
            Error::Device(dev, e) => write!(f, "{dev}: {e}"),
            Error::Capacity(count) => write!(
                f,
                "driver supports {count} mapping tables, it is too old to support multi mode"
            ),
            Error::Sink { identity, error } => write!(
                f,
                "failed to set mapping table for identity {identity:#06x}: {error}"
            ),
            Error::Config(path, e) => write!(f, "{}: {e}", path.display()),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open(_, e)
            | Error::Read(_, e)
            | Error::Directory(_, e)
            | Error::Device(_, e)
            | Error::Sink { error: e, .. } => Some(e),
            Error::Capacity(_) | Error::Config(..) => None,
        }
    }
}
