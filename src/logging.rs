use std::sync::Once;

static INIT: Once = Once::new();

/// Sets up the global `env_logger` backend. Only the first call has an effect.
///
/// `filter` uses the `env_logger` syntax (`"debug"`, `"two_triangles=trace"`)
/// and wins over `RUST_LOG`. Without either, `info` and above is shown.
pub fn init_logging(filter: Option<&str>) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match (filter, std::env::var("RUST_LOG")) {
            (Some(filter), _) => {
                builder.parse_filters(filter);
            }
            (None, Ok(filter)) => {
                builder.parse_filters(&filter);
            }
            (None, Err(_)) => {
                builder.filter_level(log::LevelFilter::Info);
            }
        }

        builder.init();

        log::debug!("logging initialized");
    });
}
