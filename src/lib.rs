//! Configure the key mappings of the sunxi multi protocol infrared receiver.
//!
//! The driver can decode several remotes at once. For each customer remote, it
//! needs a table which translates the keycodes of that remote into the keycodes
//! of the default remote. These tables are built from Android key layout files:
//! the default layout `sunxi-ir.kl`, and one `customer_ir_xxxx.kl` per remote,
//! where `xxxx` is the address code (identity) of the remote in hex. Keys are
//! matched by name.

pub mod cmdline;
pub mod config;
pub mod device;
mod error;
pub mod identity;
pub mod keylayout;
pub mod mapping;
pub mod remap;
pub mod sink;

pub use error::Error;
