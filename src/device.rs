//! Interface to the sunxi multi ir chardev

use crate::{mapping::MappingTable, sink::MapSink};
use libc::c_int;
use nix::{ioctl_read, ioctl_write_ptr};
use std::{
    fmt,
    fs::{File, OpenOptions},
    io,
    os::unix::io::{AsRawFd, RawFd},
    path::{Path, PathBuf},
};

const MULTI_IR_IOC_MAGIC: u8 = b'M';

const MULTI_IR_IOC_REQ_MAP: u8 = 0x01;
const MULTI_IR_IOC_SET_MAP: u8 = 0x02;

ioctl_read!(
    multi_ir_req_map,
    MULTI_IR_IOC_MAGIC,
    MULTI_IR_IOC_REQ_MAP,
    c_int
);
ioctl_write_ptr!(
    multi_ir_set_map,
    MULTI_IR_IOC_MAGIC,
    MULTI_IR_IOC_SET_MAP,
    MappingTable
);

/// The multi ir device, usually `/dev/sunxi-multi-ir`
pub struct MultiIr {
    path: PathBuf,
    file: File,
}

impl MultiIr {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<MultiIr> {
        let path = path.as_ref();
        let file = OpenOptions::new().read(true).write(true).open(path)?;

        Ok(MultiIr {
            path: PathBuf::from(path),
            file,
        })
    }
}

impl MapSink for MultiIr {
    /// Ask the driver how many mapping tables it supports
    fn capacity(&mut self) -> io::Result<i32> {
        let mut count: c_int = 0;

        unsafe { multi_ir_req_map(self.as_raw_fd(), &mut count)? };

        Ok(count)
    }

    fn set_map(&mut self, table: MappingTable) -> io::Result<()> {
        unsafe { multi_ir_set_map(self.as_raw_fd(), &table)? };

        Ok(())
    }
}

impl AsRawFd for MultiIr {
    fn as_raw_fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }
}

impl fmt::Display for MultiIr {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.path.display())
    }
}

#[test]
fn open_missing() {
    let e = MultiIr::open("testdata/no-such-device").err().unwrap();

    assert_eq!(e.kind(), io::ErrorKind::NotFound);
}

#[test]
fn not_a_multi_ir_device() {
    // a regular file does not understand the ioctl
    let mut dev = MultiIr::open("testdata/keylayout/sunxi-ir.kl");

    if let Ok(dev) = &mut dev {
        assert!(dev.capacity().is_err());
        assert_eq!(dev.to_string(), "testdata/keylayout/sunxi-ir.kl");
    }
}
