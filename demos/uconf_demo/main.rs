//! # uconf demo application
//!
//! A small CLI that registers a handful of options and prints what they
//! resolved to. It exists to exercise the layering by hand.
//!
//! ```sh
//! cargo run --example uconf_demo -- --help
//! cargo run --example uconf_demo -- -v --port 9000 extra args
//! UCONF_DEMO_LOG_LEVEL=debug cargo run --example uconf_demo
//! echo 'port = 4000' > uconf-demo.toml && cargo run --example uconf_demo
//! ```

use std::process::ExitCode;
use std::time::Duration;

use uconf::{Loader, OptionSet, SearchPath, UconfError, help};

fn run() -> Result<(), UconfError> {
    let mut opts = OptionSet::new("uconf-demo");
    let show_help = opts.bool("help", 'h', false, "Print this help.")?;
    let verbose = opts.bool("verbose", 'v', false, "Enable verbose output.")?;
    let host = opts.string("host", None, "127.0.0.1", "Hostname to bind to.")?;
    let port = opts.int("port", 'p', 3000, "Port number.")?;
    let timeout = opts.duration("timeout", 't', Duration::from_secs(30), "Request timeout.")?;
    let tags = opts.list("tags", None, &[], "Comma-separated tags.")?;
    let log_level = opts.string("log.level", 'l', "info", "Minimum log level.")?;

    Loader::new()
        .add_search_path(SearchPath::Cwd)
        .load_process(&mut opts)?;

    if show_help.get() {
        print!("{}", help::render(&opts));
        return Ok(());
    }

    println!("listening on {}:{}", host.borrow(), port.get());
    println!("timeout: {}", humantime_display(timeout.get()));
    println!("log level: {}", log_level.borrow());
    if !tags.borrow().is_empty() {
        println!("tags: {}", tags.borrow().join(", "));
    }
    if verbose.get() {
        println!("\nresolved values:\n{}", help::listing(&opts));
    }
    if !opts.args().is_empty() {
        println!("args: {:?}", opts.args());
    }
    Ok(())
}

fn humantime_display(d: Duration) -> String {
    uconf::Value::Duration(d).to_string()
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}
