// src/main.rs

use memotrace::{cli, logging, run};

fn main() {
    let code = match run_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("memotrace error: {err:?}");
            1
        }
    };
    std::process::exit(code);
}

fn run_main() -> anyhow::Result<i32> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args)
}
