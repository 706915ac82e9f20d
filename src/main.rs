//! folio - content collections, feed and sitemap for a portfolio site

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = folio_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
