//! Command: print an example mapping file.
use crate::config::mapping::FORMAT_EXAMPLE;

/// Print [`FORMAT_EXAMPLE`] to stdout, ready to be redirected into a file.
#[allow(clippy::print_stdout)]
pub fn run() {
    print!("{FORMAT_EXAMPLE}");
}
