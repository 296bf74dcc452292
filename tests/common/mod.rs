// Shared helpers for integration tests.
//
// Provides a temporary base directory plus a separate fake home, in-memory
// doubles for the logger and the prompt, and a fluent builder so each
// integration test can set up an isolated environment without repeating
// filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use dotlink_cli::config::DEFAULT_FILE_NAME;
use dotlink_cli::logging::{LinkEntry, LinkStatus, Log};
use dotlink_cli::prompt::Prompter;
use dotlink_cli::resources::symlink::{ConflictPolicy, SystemLinker};
use dotlink_cli::tasks::Context;

/// A [`Log`] that keeps every message and link record in memory.
#[derive(Debug, Default)]
pub struct RecordingLog {
    lines: Mutex<Vec<String>>,
    links: Mutex<Vec<LinkEntry>>,
}

impl RecordingLog {
    fn push(&self, msg: &str) {
        self.lines.lock().expect("lines lock").push(msg.to_string());
    }

    /// Every message reported so far, in order.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("lines lock").clone()
    }

    /// Returns `true` if any message equals `msg`.
    pub fn contains(&self, msg: &str) -> bool {
        self.lines().iter().any(|line| line == msg)
    }

    /// Statuses of every recorded link, in order.
    pub fn statuses(&self) -> Vec<LinkStatus> {
        self.links
            .lock()
            .expect("links lock")
            .iter()
            .map(|l| l.status)
            .collect()
    }
}

impl Log for RecordingLog {
    fn stage(&self, msg: &str) {
        self.push(msg);
    }
    fn info(&self, msg: &str) {
        self.push(msg);
    }
    fn debug(&self, _msg: &str) {}
    fn warn(&self, msg: &str) {
        self.push(msg);
    }
    fn error(&self, msg: &str) {
        self.push(msg);
    }
    fn dry_run(&self, msg: &str) {
        self.push(msg);
    }
    fn record_link(&self, name: &str, status: LinkStatus, message: Option<&str>) {
        self.links.lock().expect("links lock").push(LinkEntry {
            name: name.to_string(),
            status,
            message: message.map(String::from),
        });
    }
}

/// A [`Prompter`] replaying canned answers; clones share the same script.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAnswers {
    answers: Arc<Mutex<VecDeque<String>>>,
    questions: Arc<Mutex<Vec<String>>>,
}

impl ScriptedAnswers {
    /// Answer with `answers` in order, then report end of input.
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: Arc::new(Mutex::new(
                answers.iter().map(|a| (*a).to_string()).collect(),
            )),
            questions: Arc::default(),
        }
    }

    /// Questions asked so far.
    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().expect("questions lock").clone()
    }
}

impl Prompter for ScriptedAnswers {
    fn read_line(&self, question: &str) -> io::Result<Option<String>> {
        self.questions
            .lock()
            .expect("questions lock")
            .push(question.to_string());
        Ok(self.answers.lock().expect("answers lock").pop_front())
    }
}

/// An isolated base directory and home directory, each backed by a
/// [`tempfile::TempDir`] that is deleted on drop.
pub struct TestRepo {
    /// Directory holding the mapping file and the managed sources.
    pub base: tempfile::TempDir,
    /// Stand-in for the user's home directory.
    pub home: tempfile::TempDir,
}

impl TestRepo {
    /// Path of the mapping file inside the base directory.
    pub fn mapping_path(&self) -> PathBuf {
        self.base.path().join(DEFAULT_FILE_NAME)
    }

    /// Path to the base directory.
    pub fn base_path(&self) -> &Path {
        self.base.path()
    }

    /// `relative` joined onto the home directory.
    pub fn home_join(&self, relative: &str) -> PathBuf {
        self.home.path().join(relative)
    }

    /// A [`Context`] linking on the real filesystem into this repo's home,
    /// answering prompts from `answers`.
    pub fn context(&self, log: Arc<dyn Log>, answers: &ScriptedAnswers) -> Context {
        Context {
            log,
            home: self.home.path().to_path_buf(),
            prompter: Box::new(answers.clone()),
            linker: Box::new(SystemLinker::default()),
            dry_run: false,
            policy: ConflictPolicy::Ask,
        }
    }
}

/// Fluent builder for [`TestRepo`].
pub struct TestRepoBuilder {
    repo: TestRepo,
}

impl TestRepoBuilder {
    /// Begin building an empty base directory and home.
    pub fn new() -> Self {
        Self {
            repo: TestRepo {
                base: tempfile::tempdir().expect("create base dir"),
                home: tempfile::tempdir().expect("create home dir"),
            },
        }
    }

    /// Write the mapping file.
    pub fn with_mapping(self, content: &str) -> Self {
        std::fs::write(self.repo.mapping_path(), content).expect("write mapping");
        self
    }

    /// Create a source file under the base directory.
    pub fn with_source_file(self, relative: &str, content: &str) -> Self {
        write_file(&self.repo.base.path().join(relative), content);
        self
    }

    /// Create a file under the home directory.
    pub fn with_home_file(self, relative: &str, content: &str) -> Self {
        write_file(&self.repo.home.path().join(relative), content);
        self
    }

    /// Finish building and return the repo.
    pub fn build(self) -> TestRepo {
        self.repo
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, content).expect("write file");
}
