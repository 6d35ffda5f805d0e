use std::io;

fn main() {
    headsup_cli::logging::init_logging();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let code = headsup_cli::run(std::env::args(), &mut stdout, &mut stderr);
    std::process::exit(code);
}
