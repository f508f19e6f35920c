use std::ffi::OsString;
use std::process::exit;

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, Command};

use hdd_standby::{get_power_state, Error, PowerState};

const EXIT_USAGE: i32 = 101;
const EXIT_NO_ACCESS: i32 = 102;
const EXIT_INVALID_DEVICE_FILE: i32 = 103;

fn cli() -> Command {
    Command::new("hdd_status")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Check the power state of a hdd without spinning it up")
        .arg(Arg::new("quiet")
            .short('q')
            .long("quiet")
            .help("Print nothing, report the state through the exit code only")
            .long_help(
                "Print nothing, report the state through the exit code only
0: active or idle, 1: standby, 3: unknown,
102: cannot open device file, 103: not a device file"
            )
            .action(ArgAction::SetTrue))
        .arg(Arg::new("debug")
            .short('d')
            .long("debug")
            .help("Enable debug output (repeat for trace output)")
            .action(ArgAction::Count))
        .arg(Arg::new("DEVICE")
            .help("Device file of the hdd, e.g. /dev/sda")
            .required(true))
}

fn exit_code(result: &Result<PowerState, Error>) -> i32 {
    match result {
        Err(Error::NoAccess) => EXIT_NO_ACCESS,
        Err(Error::InvalidDeviceFile) => EXIT_INVALID_DEVICE_FILE,
        Ok(PowerState::Active) | Ok(PowerState::Idle) => 0,
        Ok(PowerState::Standby) => 1,
        Ok(PowerState::Unknown) => 3,
    }
}

fn init_logging(debug: u8) {
    let verbosity = if debug > 1 { 4 } else { 3 };
    let result = stderrlog::new()
        .verbosity(verbosity)
        .module(module_path!())
        .module("hdd_standby")
        .init();
    if let Err(e) = result {
        eprintln!("unable to initialize logging: {}", e);
    }
}

// Looked up before parsing, so usage errors honor --quiet as well
fn quiet_requested(args: &[OsString]) -> bool {
    args.iter()
        .skip(1)
        .filter_map(|arg| arg.to_str())
        .take_while(|arg| *arg != "--")
        .any(|arg| {
            arg == "--quiet" ||
                (arg.starts_with('-') && !arg.starts_with("--") && arg[1..].contains('q'))
        })
}

fn run<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let quiet = quiet_requested(&args);

    let matches = match cli().try_get_matches_from(&args) {
        Ok(matches) => matches,
        Err(e) => {
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = e.print();
                    0
                }
                _ => {
                    if !quiet {
                        let _ = e.print();
                    }
                    EXIT_USAGE
                }
            };
        }
    };

    let quiet = matches.get_flag("quiet");
    let debug = matches.get_count("debug");
    if debug > 0 && !quiet {
        init_logging(debug);
    }

    let path = match matches.get_one::<String>("DEVICE") {
        Some(path) => path,
        None => return EXIT_USAGE,
    };
    log::debug!("querying {}", path);

    let result = get_power_state(path);
    if !quiet {
        match &result {
            Ok(state) => println!("{}: {}", path, state),
            Err(Error::NoAccess) => eprintln!("Cannot open device file"),
            Err(Error::InvalidDeviceFile) => eprintln!("Given file is not a device file"),
        }
    }
    exit_code(&result)
}

fn main() {
    exit(run(std::env::args_os()));
}
