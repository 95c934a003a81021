use boardbot::app::command_handlers;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match command_handlers::run_cli(args) {
        Ok(output) => println!("{output}"),
        Err(failure) => {
            eprintln!("{failure}");
            std::process::exit(failure.exit_code);
        }
    }
}
