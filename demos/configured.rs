use zlog::{Level, Policy};

fn process_payment() {
    zlog::info().segment("payment", &["process"]).message("payment started");
}

fn main() {
    // Settings from ZLOG_OUTPUT / ZLOG_CONFIG, if present.
    if let Err(e) = zlog::init::init_from_env() {
        eprintln!("zlog init failed: {}", e);
        std::process::exit(2);
    }

    zlog::error().err("test error").msg("no source or call stack yet");
    zlog::warn().message("no source yet");

    zlog::set_policy(
        Policy::builder()
            .auto_source(Level::Error, true)
            .auto_callstack(Level::Error, true)
            .max_depth(Level::Error, 8)
            .auto_source(Level::Warn, true)
            .auto_source(Level::Info, true)
            .auto_source(Level::Debug, true)
            .auto_callstack(Level::Debug, true)
            .max_depth(Level::Debug, 12)
            .build(),
    );

    zlog::error().err("test error").msg("source and call stack attached automatically");
    zlog::warn().message("source attached automatically");
    zlog::debug().message("source and call stack attached automatically");
    process_payment();
}
