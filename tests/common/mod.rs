#![allow(dead_code)]

use navrouter::{Navigator, Request};
use std::sync::{Arc, Mutex};

pub mod temp_files {
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Write `content` to a temporary file ending in `.{ext}`
    ///
    /// The file is removed when the returned handle is dropped.
    pub fn create_temp_manifest(content: &str, ext: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("navrouter_test_")
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    pub fn create_temp_yaml(content: &str) -> NamedTempFile {
        create_temp_manifest(content, "yaml")
    }

    pub fn create_temp_json(content: &str) -> NamedTempFile {
        create_temp_manifest(content, "json")
    }
}

/// Navigator that records assigned requests instead of dispatching them
#[derive(Default)]
pub struct RecordingNavigator {
    pub assigned: Vec<Request>,
}

impl Navigator for RecordingNavigator {
    fn assign(&mut self, req: Request) {
        self.assigned.push(req);
    }
}

/// Shared log handlers append to, for asserting execution order
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}
