use scaffolder::{
    cli::{get_log_level, parse_cli, Runner},
    error::default_error_handler,
};

fn main() {
    let args = parse_cli();
    env_logger::Builder::new().filter_level(get_log_level(args.debug)).init();

    if let Err(err) = Runner::new(args).run() {
        default_error_handler(err);
    }
}
