use chronicles::{args::Chronicles, handler, utils};
use clap::Parser;
use eyre::Result;

fn main() {
    if let Err(err) = run() {
        let _ = chronicles_common::sh_err!("{err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    handler::install();
    utils::load_dotenv();
    utils::subscriber();

    let args = Chronicles::parse();
    args.run()
}
