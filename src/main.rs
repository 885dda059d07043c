use modelex::ui::output;

fn main() {
    if let Err(err) = modelex::cli::run() {
        output::error(format!("{:#}", err));
        std::process::exit(1);
    }
}
