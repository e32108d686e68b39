use focus::error::FocusError;

fn main() {
    focus::logging::init();

    let args: Vec<String> = std::env::args().collect();
    if let Err(err) = focus::run::run(args, None, None) {
        eprintln!("Error: {err:#}");
        let code = err
            .downcast_ref::<FocusError>()
            .map(FocusError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}
