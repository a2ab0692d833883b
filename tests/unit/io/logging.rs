//! Tests for subscriber installation

#[cfg(test)]
mod tests {
    use motifstream::io::configuration::{DEFAULT_LOG_FILTER, QUIET_LOG_FILTER};
    use motifstream::io::logging::init_logging;

    // Tests repeated initialization keeps the first subscriber without panicking
    // Verified by switching try_init to init
    #[test]
    fn test_init_twice() {
        init_logging(DEFAULT_LOG_FILTER);
        init_logging(QUIET_LOG_FILTER);
        tracing::info!("logging initialized");
    }
}
