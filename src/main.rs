//! `bw` binary entry point.

use branchwork::ui::output;

fn main() {
    if let Err(err) = branchwork::cli::run() {
        output::error(format!("{:#}", err));
        std::process::exit(1);
    }
}
