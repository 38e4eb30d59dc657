//! Integration tests for the logging setup.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use price_cli::logging::{LogConfig, LogFormat, init_logging_with_writer};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct BufferWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .map_err(|_| io::Error::other("buffer lock poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for BufferWriter {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

// One subscriber per process, so everything is checked in a single test.
#[test]
fn json_logging_respects_level() {
    let writer = BufferWriter::default();
    let mut config = LogConfig::default()
        .with_level_filter(LevelFilter::INFO)
        .with_format(LogFormat::Json)
        .with_ansi(false);
    config.use_env_filter = false;
    init_logging_with_writer(&config, writer.clone());

    tracing::info!(target: "price_core", items = 3, "session loaded");
    tracing::debug!(target: "price_core", "per-item detail");
    tracing::info!(target: "other_crate", "external chatter");

    let output = String::from_utf8(writer.buffer.lock().unwrap().clone()).unwrap();
    assert!(output.contains("session loaded"));
    assert!(output.contains("\"items\":3"));
    assert!(!output.contains("per-item detail"));
    assert!(!output.contains("external chatter"));
}
