fn main() {
    std::process::exit(shapegen_cli::run_cli(std::env::args().collect()));
}
