use std::path::Path;
use std::sync::{Arc, Mutex};

use memotrace::errors::Result;
use memotrace::trace::TraceBackend;

/// A fake tracer that:
/// - records each argv it was asked to trace
/// - writes a canned log to the requested path
/// - returns a scripted exit code.
pub struct FakeTracer {
    log: String,
    exit_code: i32,
    traced: Arc<Mutex<Vec<Vec<String>>>>,
}

impl FakeTracer {
    pub fn new(log: impl Into<String>, exit_code: i32) -> Self {
        Self {
            log: log.into(),
            exit_code,
            traced: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the recorded invocations. Clone this out before moving
    /// the tracer into an engine, then assert on its length afterwards.
    pub fn traced(&self) -> Arc<Mutex<Vec<Vec<String>>>> {
        Arc::clone(&self.traced)
    }
}

impl TraceBackend for FakeTracer {
    fn trace(&self, argv: &[String], log_path: &Path) -> Result<i32> {
        {
            let mut guard = self.traced.lock().unwrap();
            guard.push(argv.to_vec());
        }

        std::fs::write(log_path, &self.log)?;
        Ok(self.exit_code)
    }
}
