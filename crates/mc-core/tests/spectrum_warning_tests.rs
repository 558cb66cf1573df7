use log::{Level, LevelFilter, Log, Metadata, Record};
use mc_core::{GammaSpectrum, MacroBuilder};
use mc_domain::SeedPair;
use std::sync::Mutex;

struct CaptureLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger { records: Mutex::new(Vec::new()) };

#[test]
fn bundled_spectrum_warns_once() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    for ts in [1, 2] {
        MacroBuilder::gamma_background(ts).seeds(SeedPair { seed1: 1, seed2: 2 })
                                          .num_events(10)
                                          .build()
                                          .unwrap();
    }
    GammaSpectrum::bundled().unwrap();

    let warnings = LOGGER.records
                         .lock()
                         .unwrap()
                         .iter()
                         .filter(|(level, msg)| *level == Level::Warn && msg.contains("placeholder"))
                         .count();
    assert_eq!(warnings, 1);
}
