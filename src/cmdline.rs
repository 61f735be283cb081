//! Find the product model on the kernel command line. The bootloader passes it
//! as `inside_model=<model>`.

use log::{debug, warn};
use regex::Regex;
use std::{fs, path::Path, sync::OnceLock};

pub const CMDLINE: &str = "/proc/cmdline";

static MODEL: OnceLock<Regex> = OnceLock::new();

/// Extract the product model from command line text. Returns an empty string if
/// there is none.
pub fn product_model(cmdline: &str) -> String {
    let re = MODEL.get_or_init(|| Regex::new(r"inside_model=(\S*)").expect("valid regex"));

    re.captures(cmdline)
        .map(|caps| caps[1].to_owned())
        .unwrap_or_default()
}

/// Read the product model from the command line file. Failing to read it is not
/// fatal; the model is empty in that case.
pub fn read_product_model(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(cmdline) => {
            let model = product_model(&cmdline);

            if model.is_empty() {
                debug!("{}: no product model found", path.display());
            } else {
                debug!("{}: product model ‘{model}’", path.display());
            }

            model
        }
        Err(e) => {
            warn!("{}: {e}", path.display());
            String::new()
        }
    }
}

#[test]
fn model() {
    assert_eq!(
        product_model("console=ttyS0,115200 inside_model=foobar loglevel=8\n"),
        "foobar"
    );
    assert_eq!(product_model("root=/dev/mmcblk0p7 inside_model=CanC_X5\n"), "CanC_X5");
    assert_eq!(product_model("inside_model=AMOI_B"), "AMOI_B");
    assert_eq!(product_model("inside_model= console=ttyS0"), "");
    assert_eq!(product_model("console=ttyS0 loglevel=8\n"), "");
    assert_eq!(product_model(""), "");

    assert_eq!(
        read_product_model(Path::new("testdata/cmdline/foobar")),
        "foobar"
    );
    assert_eq!(read_product_model(Path::new("testdata/cmdline/plain")), "");
    assert_eq!(read_product_model(Path::new("testdata/cmdline/missing")), "");
}
