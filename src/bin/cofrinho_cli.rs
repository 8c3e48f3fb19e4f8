use cofrinho::{cli::run, init};

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
