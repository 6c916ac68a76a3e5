use clap::Parser;

use gl_wrapper::api::PolygonMode;

use two_triangles::logging::init_logging;
use two_triangles::scene::SceneSettings;

mod app;
mod args;

use app::App;
use args::Args;

fn main() {
    // clion needs help in trait annotation
    let args = <Args as Parser>::parse();

    init_logging(args.log.as_deref());

    let settings = SceneSettings {
        shape: args.shape.into(),
        polygon_mode: if args.fill {
            PolygonMode::Fill
        } else {
            PolygonMode::Line
        },
        ..Default::default()
    };

    let res = App::new().and_then(|app| app.run(&settings));

    if let Err(e) = res {
        log::error!("{e}");
        std::process::exit(-1);
    }
}
