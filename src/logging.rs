use std::io::Write;

use colored::Colorize;
use env_logger::Builder;
use log::{Level, LevelFilter};

/// Env var holding an `env_logger` filter; Git gives hooks no way to pass `-v`.
pub const LOG_ENV: &str = "HOOKSCRIBE_LOG";

pub fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Error, // default: only errors
        1 => LevelFilter::Info,  // -v: info and up
        2 => LevelFilter::Debug, // -vv: debug and up
        _ => LevelFilter::Trace, // -vvv: trace and up
    };

    let mut builder = Builder::new();
    builder.filter_level(level);
    builder.parse_env(LOG_ENV);

    builder.format(|buf, record| {
        let level = record.level();

        #[rustfmt::skip]
        let level_label = match level {
            Level::Error => "ERROR".red().bold(),
            Level::Warn  => "WARN ".yellow().bold(),
            Level::Info  => "INFO ".white().bold(),
            Level::Debug => "DEBUG".bright_black(),
            Level::Trace => "TRACE".bright_black(),
        };

        writeln!(
            buf,
            "{} hookscribe: {}",
            level_label,
            record.args()
        )
    });

    // A second init (tests, embedding) keeps the first logger.
    let _ = builder.try_init();
}
