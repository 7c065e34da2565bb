//! Basic integration tests for the logger crate

use logger::{set_level, set_level_from_str, Level};

#[test]
fn tagged_macros_emit_without_panicking() {
    set_level(Level::Debug);
    logger::error!("integration error {}", 1);
    logger::warn!("integration warn {}", 2);
    logger::info!("integration info {}", 3);
    logger::debug!("integration debug {}", 4);
}

#[test]
fn verbose_is_gated_by_runtime_flag() {
    logger::disable_verbose();
    logger::verbose!("silent");
    logger::enable_verbose();
    logger::verbose!("emitted");
    assert!(logger::is_verbose_enabled() || !cfg!(feature = "verbose"));
    logger::disable_verbose();
}

#[test]
fn runtime_level_can_be_raised_and_lowered() {
    assert!(set_level_from_str("warn"));
    logger::info!("suppressed at warn level");
    assert!(set_level_from_str("debug"));
    logger::info!("visible at debug level");
}
