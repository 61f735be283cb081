use clap::{Arg, Command};
use log::{Level, LevelFilter, Metadata, Record};
use multi_ir::{
    cmdline,
    config::Config,
    device::MultiIr,
    remap::{configure, load_default},
    sink::DumpSink,
};
use std::{io, path::PathBuf};

fn main() {
    let matches = Command::new("multi-ir")
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about("Configure key mappings of the sunxi multi ir receiver")
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .multiple_occurrences(true)
                .conflicts_with("quiet")
                .help("Increase message verbosity"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print errors"),
        )
        .arg(
            Arg::new("CONFIG")
                .long("config")
                .short('c')
                .takes_value(true)
                .allow_invalid_utf8(true)
                .help("Configuration file (default /etc/multi_ir.toml)"),
        )
        .arg(
            Arg::new("DEVICE")
                .long("device")
                .short('d')
                .takes_value(true)
                .allow_invalid_utf8(true)
                .conflicts_with("DRYRUN")
                .help("Multi ir device (default /dev/sunxi-multi-ir)"),
        )
        .arg(
            Arg::new("KEYLAYOUTDIR")
                .long("keylayout-dir")
                .short('k')
                .takes_value(true)
                .allow_invalid_utf8(true)
                .help("Directory with key layouts (default /system/usr/keylayout)"),
        )
        .arg(
            Arg::new("DEFAULTLAYOUT")
                .long("default-layout")
                .takes_value(true)
                .allow_invalid_utf8(true)
                .help("Default key layout (default sunxi-ir.kl in key layout directory)"),
        )
        .arg(
            Arg::new("CMDLINE")
                .long("cmdline")
                .takes_value(true)
                .allow_invalid_utf8(true)
                .help("Read product model from file (default /proc/cmdline)"),
        )
        .arg(
            Arg::new("MODEL")
                .long("model")
                .short('m')
                .takes_value(true)
                .help("Set product model rather than reading it from the kernel command line"),
        )
        .arg(
            Arg::new("DRYRUN")
                .long("dry-run")
                .short('n')
                .help("Print mapping tables rather than sending them to the device"),
        )
        .get_matches();

    log::set_logger(&CLI_LOGGER).unwrap();

    let level = if matches.is_present("quiet") {
        LevelFilter::Error
    } else {
        match matches.occurrences_of("verbosity") {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    log::set_max_level(level);

    let config = match Config::load(matches.value_of_os("CONFIG").map(std::path::Path::new)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(2);
        }
    };

    let settings = config
        .merge(Config {
            device: matches.value_of_os("DEVICE").map(PathBuf::from),
            keylayout_dir: matches.value_of_os("KEYLAYOUTDIR").map(PathBuf::from),
            default_layout: matches.value_of_os("DEFAULTLAYOUT").map(PathBuf::from),
            cmdline: matches.value_of_os("CMDLINE").map(PathBuf::from),
            model: matches.value_of("MODEL").map(String::from),
        })
        .settings();

    let model = match settings.model {
        Some(model) => model,
        None => cmdline::read_product_model(&settings.cmdline),
    };

    let default = load_default(&settings.default_layout);

    let res = if matches.is_present("DRYRUN") {
        let mut sink = DumpSink::new(&default, io::stdout().lock());

        configure(&mut sink, &default, &settings.keylayout_dir, &model)
    } else {
        let mut dev = match MultiIr::open(&settings.device) {
            Ok(dev) => dev,
            Err(e) => {
                log::error!("{}: {e}", settings.device.display());
                std::process::exit(1);
            }
        };

        configure(&mut dev, &default, &settings.keylayout_dir, &model)
    };

    match res {
        Ok(count) => log::info!("{count} mapping tables configured"),
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}

static CLI_LOGGER: CliLogger = CliLogger;

struct CliLogger;

impl log::Log for CliLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "{}: {}",
                match record.level() {
                    Level::Trace => "trace",
                    Level::Debug => "debug",
                    Level::Info => "info",
                    Level::Warn => "warn",
                    Level::Error => "error",
                },
                record.args()
            );
        }
    }

    fn flush(&self) {}
}
