use lc_stp_console::run;

fn main() {
    if let Err(err) = run() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}
