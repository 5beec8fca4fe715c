fn main() {
    if let Err(e) = jvmscope_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
