use clap::Parser;

mod app;
mod args;
mod assets;
mod clock;
mod host;
mod input;
mod lifecycle;
mod logging;
mod mesh;
mod renderer;

use app::App;
use args::ArgsPlayground;

fn main() {
    // clion needs help in trait annotation
    let args = <ArgsPlayground as Parser>::parse();

    logging::init_logging(args.log.as_deref());

    let app = match App::new(&args) {
        Ok(app) => app,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(-1);
        }
    };

    if let Err(e) = app.run() {
        log::error!("{e}");
        std::process::exit(-1);
    }
}
