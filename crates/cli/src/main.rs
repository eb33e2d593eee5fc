fn main() {
    if let Err(e) = coffer_cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
