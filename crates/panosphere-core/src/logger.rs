//! Stderr logging for the panosphere tools.
//!
//! Records from the `panosphere*` crates pass at the requested level; records
//! from every other crate (image decoders, thread pools) are capped at
//! `warn`. Lines look like `[  0.412s  INFO cubemap] split 4000x2000 ...`.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

const OWN_PREFIX: &str = "panosphere";

/// Crate targets whose records follow the requested level.
pub const LOG_TARGETS: [&str; 4] = [
    "panosphere",
    "panosphere_core",
    "panosphere_cubemap",
    "panosphere_projector",
];

/// Level for a count of `-v` flags: warn, info, debug, then trace.
pub fn verbosity_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// `panosphere_cubemap::codec` -> `cubemap`; foreign targets keep their crate name.
fn short_target(target: &str) -> &str {
    let krate = target.split("::").next().unwrap_or(target);
    krate
        .strip_prefix("panosphere_")
        .filter(|rest| !rest.is_empty())
        .unwrap_or(krate)
}

struct PanosphereLogger {
    level: LevelFilter,
    started: Instant,
}

impl PanosphereLogger {
    fn threshold(&self, target: &str) -> LevelFilter {
        if target.starts_with(OWN_PREFIX) {
            self.level
        } else {
            self.level.min(LevelFilter::Warn)
        }
    }
}

impl Log for PanosphereLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.threshold(metadata.target())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let _ = writeln!(
            std::io::stderr().lock(),
            "[{:8.3}s {:>5} {}] {}",
            self.started.elapsed().as_secs_f64(),
            record.level(),
            short_target(record.target()),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<PanosphereLogger> = OnceLock::new();

/// Install the stderr logger at `level`.
///
/// Only the first call has an effect.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| PanosphereLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// [`init_with_level`] for a count of `-v` flags.
pub fn init_verbosity(verbose: u8) -> Result<(), log::SetLoggerError> {
    init_with_level(verbosity_level(verbose))
}

/// `EnvFilter` directives equivalent to the stderr logger at `level`.
pub fn tracing_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    let mut directives = String::from("warn");
    for target in LOG_TARGETS {
        directives.push_str(&format!(",{target}={level}"));
    }
    directives
}

/// Install a `tracing-subscriber` formatter. `RUST_LOG` wins when set;
/// otherwise the filter follows [`tracing_directives`] for `verbose`.
/// Span close events carry their duration.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool, verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing_directives(verbosity_level(verbose))));
    if json {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .json()
            .flatten_event(true)
            .finish()
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    fn logger(level: LevelFilter) -> PanosphereLogger {
        PanosphereLogger {
            level,
            started: Instant::now(),
        }
    }

    fn enabled(l: &PanosphereLogger, level: Level, target: &str) -> bool {
        l.enabled(&Metadata::builder().level(level).target(target).build())
    }

    #[test]
    fn verbosity_steps_through_levels() {
        assert_eq!(verbosity_level(0), LevelFilter::Warn);
        assert_eq!(verbosity_level(1), LevelFilter::Info);
        assert_eq!(verbosity_level(2), LevelFilter::Debug);
        assert_eq!(verbosity_level(9), LevelFilter::Trace);
    }

    #[test]
    fn foreign_crates_are_capped_at_warn() {
        let l = logger(LevelFilter::Debug);
        assert!(enabled(&l, Level::Debug, "panosphere_cubemap::codec"));
        assert!(enabled(&l, Level::Info, "panosphere"));
        assert!(!enabled(&l, Level::Info, "image::codecs::jpeg"));
        assert!(enabled(&l, Level::Warn, "image::codecs::jpeg"));
        assert!(!enabled(&l, Level::Trace, "panosphere_core::crop"));

        let quiet = logger(LevelFilter::Error);
        assert!(!enabled(&quiet, Level::Warn, "rayon_core"));
    }

    #[test]
    fn targets_are_shortened_to_the_crate_role() {
        assert_eq!(short_target("panosphere_cubemap::codec"), "cubemap");
        assert_eq!(short_target("panosphere_projector"), "projector");
        assert_eq!(short_target("panosphere"), "panosphere");
        assert_eq!(short_target("image::codecs::png"), "image");
    }

    #[test]
    fn directives_cover_every_crate() {
        assert_eq!(
            tracing_directives(LevelFilter::Debug),
            "warn,panosphere=debug,panosphere_core=debug,panosphere_cubemap=debug,panosphere_projector=debug"
        );
    }
}
