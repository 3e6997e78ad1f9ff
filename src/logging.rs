/// Installs the platform logger.
///
/// Android logs go to logcat under `tag`; everywhere else `env_logger` reads
/// `RUST_LOG`. Calling this more than once keeps the first logger.
pub fn init_logging(tag: &str) {
    #[cfg(target_os = "android")]
    {
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(log::LevelFilter::Debug)
                .with_tag(tag),
        );
    }

    #[cfg(not(target_os = "android"))]
    {
        let _ = tag;
        if env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init()
            .is_err()
        {
            log::debug!("Logger already initialized");
        }
    }
}
