//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = happystates_cli::run() {
        eprintln!("happystates: {err}");
        std::process::exit(1);
    }
}
