//! Workshop publishing wizard
//!
//! [`PublishWizard`] holds what the user has typed across the five steps and
//! the progress log the backend streams back. [`PublishingBackend`] is the
//! distribution service; [`DirectoryPublisher`] is a local stand-in that
//! writes each submission as JSON into an outbox folder and keeps an index of
//! what has been published so updates can reuse the previous id.

use super::ids::{PublishStep, PublishTag};
use chrono::Local;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const INDEX_FILENAME: &str = "published.json";

/// Status codes the outbox answers a submission with
pub const STATUS_OK: i32 = 0;
pub const STATUS_EMPTY_TITLE: i32 = 2;
pub const STATUS_ALREADY_PUBLISHED: i32 = 3;

/// Everything handed to the backend in one submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishSubmission {
    /// Module folder being published, e.g. "Ronin.rte"
    pub module: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Replace an earlier submission of the same module instead of creating a new item
    pub update_existing: bool,
    #[serde(default)]
    pub published_id: Option<String>,
    /// Unix timestamp (seconds)
    #[serde(default)]
    pub submitted_at: i64,
}

#[derive(Debug)]
pub enum PublishError {
    /// Backend returned a nonzero status code
    Status(i32),
    Rejected(String),
    IoError(std::io::Error),
    SerializationError(serde_json::Error),
}

impl PublishError {
    /// Maps a backend status code, 0 meaning success
    pub fn check_status(code: i32) -> Result<(), PublishError> {
        match code {
            0 => Ok(()),
            code => Err(PublishError::Status(code)),
        }
    }
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PublishError::Status(code) => write!(f, "Publishing failed with status {}", code),
            PublishError::Rejected(reason) => write!(f, "Submission rejected: {}", reason),
            PublishError::IoError(e) => write!(f, "IO error: {}", e),
            PublishError::SerializationError(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for PublishError {}

impl From<std::io::Error> for PublishError {
    fn from(err: std::io::Error) -> Self {
        PublishError::IoError(err)
    }
}

impl From<serde_json::Error> for PublishError {
    fn from(err: serde_json::Error) -> Self {
        PublishError::SerializationError(err)
    }
}

/// Receives progress while a submission runs
pub trait PublishProgress {
    /// `new_item` starts a new log line; otherwise the last line is replaced
    fn progress_report(&mut self, text: &str, new_item: bool);

    fn success_report(&mut self, published_id: &str);
}

/// A content distribution service
pub trait PublishingBackend {
    fn submit(
        &mut self,
        submission: &PublishSubmission,
        progress: &mut dyn PublishProgress,
    ) -> Result<(), PublishError>;

    /// Last successful submission of `module`, if any
    fn previous(&self, module: &str) -> Option<PublishSubmission>;

    /// Every module published so far
    fn published(&self) -> Vec<PublishSubmission>;
}

/// State of one pass through the publish steps
#[derive(Debug, Clone, Default)]
pub struct PublishWizard {
    step: PublishStep,
    pub title: String,
    pub description: String,
    pub tags: BTreeSet<PublishTag>,
    pub module: Option<String>,
    /// Updating an item that was published before
    pub updating: bool,
    log: Vec<String>,
    complete: bool,
    published_id: Option<String>,
}

impl PublishWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> PublishStep {
        self.step
    }

    /// Advances one step (clamped) and returns the new step
    pub fn next(&mut self) -> PublishStep {
        self.step = self.step.next();
        self.step()
    }

    /// Goes back one step (clamped) and returns the new step
    pub fn back(&mut self) -> PublishStep {
        self.step = self.step.previous();
        self.step()
    }

    /// Whether the current step's input allows moving on
    pub fn can_advance(&self) -> bool {
        match self.step() {
            PublishStep::First => self.module.is_some(),
            PublishStep::Description => !self.title.trim().is_empty(),
            PublishStep::Tags | PublishStep::Agreement => true,
            PublishStep::Last => false,
        }
    }

    /// Clears every field and the log
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_tag(&mut self, tag: PublishTag, on: bool) {
        if on {
            self.tags.insert(tag);
        } else {
            self.tags.remove(&tag);
        }
    }

    /// Fills the fields from an earlier submission of the same module
    pub fn prefill(&mut self, previous: &PublishSubmission) {
        self.module = Some(previous.module.clone());
        self.title = previous.title.clone();
        self.description = previous.description.clone();
        self.tags = previous.tags.iter().filter_map(|t| PublishTag::from_tag(t)).collect();
        self.updating = true;
    }

    /// Gathers the fields into a submission; None until a module is chosen
    pub fn submission(&self) -> Option<PublishSubmission> {
        let module = self.module.clone()?;
        Some(PublishSubmission {
            module,
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            tags: self.tags.iter().map(|t| t.tag().to_string()).collect(),
            update_existing: self.updating,
            published_id: None,
            submitted_at: Local::now().timestamp(),
        })
    }

    /// Records a failed submission and steps back off the last step
    pub fn fail(&mut self, error: &PublishError) {
        self.log.push(format!("ERROR: {}", error));
        self.complete = false;
        if self.step() == PublishStep::Last {
            self.back();
        }
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn published_id(&self) -> Option<&str> {
        self.published_id.as_deref()
    }
}

impl PublishProgress for PublishWizard {
    fn progress_report(&mut self, text: &str, new_item: bool) {
        match self.log.last_mut() {
            Some(last) if !new_item => *last = text.to_string(),
            _ => self.log.push(text.to_string()),
        }
    }

    /// Keeps the log, id and completion flag; the input fields start over
    fn success_report(&mut self, published_id: &str) {
        self.log.push(format!("Published as {}", published_id));
        self.title.clear();
        self.description.clear();
        self.tags.clear();
        self.module = None;
        self.updating = false;
        self.complete = true;
        self.published_id = Some(published_id.to_string());
    }
}

/// A report a backend made while submitting
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressReport {
    Progress { text: String, new_item: bool },
    Success(String),
}

/// Buffers a backend's reports so the owner can apply them afterwards
#[derive(Debug, Default)]
pub struct ProgressQueue {
    reports: Vec<ProgressReport>,
}

impl ProgressQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports in the order the backend made them
    pub fn drain(&mut self) -> Vec<ProgressReport> {
        std::mem::take(&mut self.reports)
    }
}

impl PublishProgress for ProgressQueue {
    fn progress_report(&mut self, text: &str, new_item: bool) {
        self.reports.push(ProgressReport::Progress {
            text: text.to_string(),
            new_item,
        });
    }

    fn success_report(&mut self, published_id: &str) {
        self.reports.push(ProgressReport::Success(published_id.to_string()));
    }
}

/// Local backend that "publishes" into an outbox directory
pub struct DirectoryPublisher {
    outbox: PathBuf,
    index: BTreeMap<String, PublishSubmission>,
}

impl DirectoryPublisher {
    /// Opens (and creates if needed) the outbox, loading its index
    pub fn new(outbox: impl AsRef<Path>) -> Result<Self, PublishError> {
        let outbox = outbox.as_ref().to_path_buf();
        if !outbox.exists() {
            fs::create_dir_all(&outbox)?;
        }

        let index = match fs::read_to_string(outbox.join(INDEX_FILENAME)) {
            Ok(json) => serde_json::from_str(&json)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(DirectoryPublisher { outbox, index })
    }

    /// Per-user default outbox, falling back to `./outbox`
    pub fn default_directory() -> PathBuf {
        dirs::data_dir()
            .map(|p| p.join("game_menu").join("outbox"))
            .unwrap_or_else(|| PathBuf::from("./outbox"))
    }

    fn write_json(&self, filename: &str, json: &str) -> Result<PathBuf, PublishError> {
        let filepath = self.outbox.join(filename);
        let temp_path = filepath.with_extension("json.tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &filepath)?;
        Ok(filepath)
    }

    /// Validates a submission against the outbox, 0 meaning accepted
    fn status_for(&self, submission: &PublishSubmission) -> i32 {
        if submission.title.trim().is_empty() {
            return STATUS_EMPTY_TITLE;
        }
        let published = self.index.get(&submission.module).is_some_and(|p| p.published_id.is_some());
        if published && !submission.update_existing {
            return STATUS_ALREADY_PUBLISHED;
        }
        STATUS_OK
    }

    fn new_id(module: &str) -> String {
        let stem = module.trim_end_matches(".rte");
        format!("{}-{}", Local::now().format("%Y%m%d%H%M%S%3f"), stem)
    }
}

impl PublishingBackend for DirectoryPublisher {
    fn submit(
        &mut self,
        submission: &PublishSubmission,
        progress: &mut dyn PublishProgress,
    ) -> Result<(), PublishError> {
        progress.progress_report(&format!("Preparing {}...", submission.module), true);

        let status = self.status_for(submission);
        if status != STATUS_OK {
            warn!("Outbox refused {} with status {}", submission.module, status);
        }
        PublishError::check_status(status)?;

        let id = self
            .index
            .get(&submission.module)
            .and_then(|p| p.published_id.clone())
            .unwrap_or_else(|| Self::new_id(&submission.module));

        let mut record = submission.clone();
        record.published_id = Some(id.clone());

        progress.progress_report("Uploading...", true);
        let path = self.write_json(&format!("{}.json", id), &serde_json::to_string_pretty(&record)?)?;
        progress.progress_report("Uploading... done", false);

        self.index.insert(record.module.clone(), record);
        if let Err(e) = self.write_json(INDEX_FILENAME, &serde_json::to_string_pretty(&self.index)?) {
            warn!("Published item written but index update failed: {}", e);
        }

        info!("Published {} to {}", submission.module, path.display());
        progress.success_report(&id);
        Ok(())
    }

    fn previous(&self, module: &str) -> Option<PublishSubmission> {
        self.index.get(module).cloned()
    }

    fn published(&self) -> Vec<PublishSubmission> {
        self.index.values().cloned().collect()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("game_menu_publish_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn filled_wizard() -> PublishWizard {
        let mut wizard = PublishWizard::new();
        wizard.module = Some("Ronin.rte".to_string());
        wizard.title = "Ronin".to_string();
        wizard.description = "Mercenaries".to_string();
        wizard.set_tag(PublishTag::Actors, true);
        wizard
    }

    #[test]
    fn test_step_never_leaves_range() {
        let mut wizard = PublishWizard::new();
        for _ in 0..3 {
            wizard.back();
        }
        assert_eq!(wizard.step(), PublishStep::First);
        for _ in 0..10 {
            wizard.next();
        }
        assert_eq!(wizard.step(), PublishStep::Last);
        wizard.back();
        assert_eq!(wizard.step(), PublishStep::Agreement);
    }

    #[test]
    fn test_can_advance_needs_module_and_title() {
        let mut wizard = PublishWizard::new();
        assert!(!wizard.can_advance());
        wizard.module = Some("Ronin.rte".to_string());
        assert!(wizard.can_advance());
        wizard.next();
        wizard.title = "   ".to_string();
        assert!(!wizard.can_advance());
        wizard.title = "Ronin".to_string();
        assert!(wizard.can_advance());
    }

    #[test]
    fn test_progress_replaces_last_line() {
        let mut wizard = PublishWizard::new();
        wizard.progress_report("Uploading 10%", true);
        wizard.progress_report("Uploading 90%", false);
        wizard.progress_report("Done", true);
        assert_eq!(wizard.log(), ["Uploading 90%".to_string(), "Done".to_string()]);
    }

    #[test]
    fn test_failure_steps_back() {
        let mut wizard = filled_wizard();
        for _ in 0..4 {
            wizard.next();
        }
        wizard.fail(&PublishError::Status(2));
        assert_eq!(wizard.step(), PublishStep::Agreement);
        assert!(wizard.log()[0].contains("status 2"));
        assert!(!wizard.is_complete());
    }

    #[test]
    fn test_progress_queue_keeps_order() {
        let mut queue = ProgressQueue::new();
        let mut publisher = testing::MemoryPublisher::default();
        let submission = filled_wizard().submission().unwrap();
        publisher.submit(&submission, &mut queue).unwrap();

        assert_eq!(
            queue.drain(),
            vec![
                ProgressReport::Progress {
                    text: "Submitting".to_string(),
                    new_item: true,
                },
                ProgressReport::Success("item-1".to_string()),
            ]
        );
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_status_mapping() {
        assert!(PublishError::check_status(0).is_ok());
        assert!(matches!(PublishError::check_status(-3), Err(PublishError::Status(-3))));
    }

    #[test]
    fn test_directory_publisher_publishes_and_updates() {
        let dir = temp_dir("update");
        let mut publisher = DirectoryPublisher::new(&dir).unwrap();
        let mut wizard = filled_wizard();
        let submission = wizard.submission().unwrap();

        publisher.submit(&submission, &mut wizard).unwrap();
        assert!(wizard.is_complete());
        let id = wizard.published_id().unwrap().to_string();
        assert!(dir.join(format!("{}.json", id)).exists());
        assert!(wizard.module.is_none());

        // A second plain publish of the same module is refused
        let mut second = PublishWizard::new();
        assert!(matches!(
            publisher.submit(&submission, &mut second),
            Err(PublishError::Status(STATUS_ALREADY_PUBLISHED))
        ));

        // Updating keeps the id
        let reopened = DirectoryPublisher::new(&dir).unwrap();
        let previous = reopened.previous("Ronin.rte").unwrap();
        let mut update = PublishWizard::new();
        update.prefill(&previous);
        assert!(update.updating);
        assert_eq!(update.tags.iter().next(), Some(&PublishTag::Actors));
        let mut publisher = reopened;
        publisher.submit(&update.submission().unwrap(), &mut update).unwrap();
        assert_eq!(update.published_id(), Some(id.as_str()));
        assert_eq!(publisher.published().len(), 1);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_empty_title_rejected() {
        let dir = temp_dir("empty");
        let mut publisher = DirectoryPublisher::new(&dir).unwrap();
        let mut wizard = filled_wizard();
        wizard.title.clear();
        let result = publisher.submit(&wizard.submission().unwrap(), &mut wizard);
        assert!(matches!(result, Err(PublishError::Status(STATUS_EMPTY_TITLE))));

        wizard.fail(&result.unwrap_err());
        assert!(wizard.log().last().unwrap().contains("status 2"));
        assert!(!dir.join(INDEX_FILENAME).exists());
        fs::remove_dir_all(&dir).unwrap();
    }
}
