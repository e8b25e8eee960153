//! 下载请求的结构化日志。

use filedepot_core::domain::{DownloadObserver, DownloadOutcome, PathNumber};
use tracing::info;

/// 将每次下载请求记录为一条 tracing 事件。
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDownloadObserver;

impl DownloadObserver for TracingDownloadObserver {
    fn download_requested(&self, raw_id: &str, id: PathNumber, outcome: DownloadOutcome) {
        info!(
            raw_id = %raw_id,
            coerced = %id,
            matches_two = id.loosely_equals(2),
            outcome = outcome.as_str(),
            "download requested"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    /// 把格式化后的日志写入共享缓冲区。
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn captured_log(raw_id: &str) -> String {
        let buffer = SharedBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let id = PathNumber::coerce(raw_id);
        tracing::subscriber::with_default(subscriber, || {
            TracingDownloadObserver.download_requested(raw_id, id, DownloadOutcome::for_id(id));
        });

        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn logs_raw_id_and_match_against_two() {
        let log = captured_log("2");

        assert!(log.contains("download requested"), "log: {log}");
        assert!(log.contains("raw_id=2"), "log: {log}");
        assert!(log.contains("matches_two=true"), "log: {log}");
        assert!(log.contains("outcome=\"unauthorized\""), "log: {log}");
    }

    #[test]
    fn non_numeric_id_does_not_match_two() {
        let log = captured_log("abc");

        assert!(log.contains("raw_id=abc"), "log: {log}");
        assert!(log.contains("coerced=NaN"), "log: {log}");
        assert!(log.contains("matches_two=false"), "log: {log}");
    }

    #[test]
    fn loose_forms_of_two_still_match() {
        let log = captured_log("2.0");

        assert!(log.contains("raw_id=2.0"), "log: {log}");
        assert!(log.contains("matches_two=true"), "log: {log}");
    }
}
