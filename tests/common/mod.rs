//! Release output fixtures shared by the integration tests.

#![allow(dead_code)]

use kodegen_bundler_npm::bundler::Reporter;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A project root with a `dist/` directory as a release build leaves it.
pub struct ReleaseFixture {
    pub dir: TempDir,
}

impl ReleaseFixture {
    pub fn new(project_name: &str, version: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("dist")).unwrap();
        let fixture = Self { dir };
        fixture.write_json(
            "dist/metadata.json",
            &json!({
                "project_name": project_name,
                "tag": format!("v{version}"),
                "previous_tag": "",
                "version": version,
                "commit": "0123456789abcdef",
                "date": "2024-05-01T12:00:00Z",
                "runtime": { "goos": "linux", "goarch": "amd64" }
            }),
        );
        fixture.write_json("dist/artifacts.json", &json!([]));
        fixture
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn npm_dir(&self) -> PathBuf {
        self.root().join("dist/npm")
    }

    pub fn write_json(&self, relative: &str, value: &Value) {
        let path = self.root().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    }

    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.root().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    /// Writes `artifacts.json` and a placeholder file for every entry with a path.
    pub fn with_artifacts(self, artifacts: Value) -> Self {
        for artifact in artifacts.as_array().unwrap() {
            if let Some(path) = artifact.get("path").and_then(Value::as_str) {
                self.write_file(path, "#!/bin/sh\necho binary\n");
            }
        }
        self.write_json("dist/artifacts.json", &artifacts);
        self
    }

    pub fn read_json(&self, relative: &str) -> Value {
        let content = std::fs::read_to_string(self.root().join(relative)).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.root().join(relative)).unwrap()
    }
}

pub fn binary(name: &str, path: &str, builder: &str) -> Value {
    json!({
        "name": name,
        "path": path,
        "builder": builder,
        "type": "Binary"
    })
}

/// Keeps every message with the name of the channel it was sent on.
#[derive(Default)]
pub struct RecordingReporter {
    pub messages: RefCell<Vec<(&'static str, String)>>,
}

impl RecordingReporter {
    pub fn on(&self, channel: &str) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, m)| m.clone())
            .collect()
    }

    fn record(&self, channel: &'static str, message: &str) -> io::Result<()> {
        self.messages.borrow_mut().push((channel, message.to_string()));
        Ok(())
    }
}

impl Reporter for RecordingReporter {
    fn section(&self, title: &str) -> io::Result<()> {
        self.record("section", title)
    }

    fn verbose(&self, message: &str) -> io::Result<()> {
        self.record("verbose", message)
    }

    fn progress(&self, message: &str) -> io::Result<()> {
        self.record("progress", message)
    }

    fn success(&self, message: &str) -> io::Result<()> {
        self.record("success", message)
    }

    fn warn(&self, message: &str) -> io::Result<()> {
        self.record("warn", message)
    }
}
