fn main() {
    if let Err(e) = sanjeevan_lib::run() {
        tracing::error!("{e:#}");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
