// Copyright 2025 The Drasi Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! In-memory `log` capture, shared by every test in one test binary.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Mutex, Once};

struct CapturingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records
            .lock()
            .expect("Log capture poisoned")
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static CAPTURE: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};
static INSTALL: Once = Once::new();

/// Route `log` records into the capture buffer. Safe to call repeatedly.
pub fn capture_logs() {
    INSTALL.call_once(|| {
        log::set_logger(&CAPTURE).expect("Another logger is already installed");
        log::set_max_level(LevelFilter::Trace);
    });
}

/// Messages captured so far at exactly `level`.
///
/// Tests run concurrently, so callers filter for their own subject.
pub fn logged(level: Level) -> Vec<String> {
    CAPTURE
        .records
        .lock()
        .expect("Log capture poisoned")
        .iter()
        .filter(|(recorded, _)| *recorded == level)
        .map(|(_, message)| message.clone())
        .collect()
}
