#![deny(warnings)]
#![deny(rust_2018_idioms)]

use tracing::error;
use vessel_proximity::{
    settings::Settings,
    startup::{App, init_tracing},
};

#[tokio::main]
async fn main() {
    let settings = Settings::new().unwrap();
    init_tracing(settings.environment);

    let app = App::build(&settings).unwrap();

    if let Err(e) = app.run().await {
        error!("proximity run failed: {e:?}");
        std::process::exit(1);
    }
}
