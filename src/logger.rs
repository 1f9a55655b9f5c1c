use std::sync::OnceLock;

use log::{LevelFilter, Metadata, Record};

static LOGGER: OnceLock<StdoutLogger> = OnceLock::new();

struct StdoutLogger {
    level: LevelFilter,
}

impl log::Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("{} - {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let logger = LOGGER.get_or_init(|| StdoutLogger { level });
    log::set_logger(logger).map(|()| log::set_max_level(level))
}
