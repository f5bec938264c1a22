//! Labeling session: the engine front ends drive.
//!
//! A [`LabelSession`] owns the label and baseline stores, the open dataset,
//! the navigator, and the *draft*: the visibility vector currently shown for
//! the frame under the cursor. The draft is a transient view; only
//! [`LabelSession::commit_current`] writes it into the [`LabelStore`].
//!
//! Step navigation ([`advance`](LabelSession::advance),
//! [`retreat`](LabelSession::retreat)) commits and persists before moving.
//! [`jump_to`](LabelSession::jump_to) and range changes do not: they reload
//! the draft from the store and discard unsaved toggles.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::format::{FormatError, backup_existing, load_baseline, read_labels, write_labels};
use crate::model::{
    FrameKey, OverriddenVector, SeverityVector, StructureSchema, VisibilityVector,
};
use crate::state::{
    BaselineStore, DatasetError, DatasetState, FrameNavigator, LabelStore, NavigationError,
    OverrideOutcome, compute_override, overridden_flags, resolve_default_vector,
};

/// Errors surfaced to the front end. None of them end the session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Reading or writing a label or baseline file failed
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// A navigation or range request was rejected
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// The dataset folder could not be opened
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// The operation needs an open dataset
    #[error("No dataset folder is open")]
    NoDataset,
}

/// Result of a step navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved to this 0-based index
    Moved(usize),
    /// Already at the edge of the active range; the index is unchanged
    AtBoundary,
}

/// What happened when a dataset folder was opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenSummary {
    /// Number of frames discovered
    pub frames: usize,
    /// Number of frames hydrated from an existing label CSV
    pub labeled: usize,
    /// Backup written before reconciliation, if a label CSV existed
    pub backup: Option<PathBuf>,
}

/// Everything a front end needs to render the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    /// 0-based position in the full sequence
    pub index: usize,
    /// Number of frames in the sequence
    pub total: usize,
    /// Active range, both ends inclusive and 0-based
    pub range: (usize, usize),
    /// Image path
    pub path: PathBuf,
    /// Frame key parsed from the path
    pub key: FrameKey,
    /// Draft visibility shown for this frame
    pub visibility: VisibilityVector,
    /// Swallow baseline severities
    pub severities: SeverityVector,
    /// Where the draft departs from the baseline
    pub overridden: OverriddenVector,
}

impl FrameView {
    /// Status line like `3/15 — video 1, swallow 2, frame 40`.
    pub fn status_line(&self) -> String {
        format!("{}/{} — {}", self.index + 1, self.total, self.key)
    }
}

/// A labeling session over one dataset folder at a time.
#[derive(Debug)]
pub struct LabelSession {
    schema: StructureSchema,
    baseline: BaselineStore,
    dataset: Option<DatasetState>,
    labels: LabelStore,
    navigator: FrameNavigator,
    draft: VisibilityVector,
}

impl LabelSession {
    /// Create a session with no dataset open.
    pub fn new(schema: StructureSchema, baseline: BaselineStore) -> Self {
        let draft = VisibilityVector::zeros(schema.len());
        Self {
            schema,
            baseline,
            dataset: None,
            labels: LabelStore::new(),
            navigator: FrameNavigator::new(0),
            draft,
        }
    }

    /// Open a dataset folder and resume any labels saved in it.
    ///
    /// If no frames are found the current session is left untouched and
    /// nothing on disk is modified. Otherwise an existing label CSV is backed
    /// up, then reconciled into a fresh label store. Backup and reconcile
    /// failures are logged and do not abort the open.
    pub fn open_folder(&mut self, root: impl Into<PathBuf>) -> Result<OpenSummary, SessionError> {
        let dataset = DatasetState::from_folder(root)?;
        let labels_path = dataset.labels_path();

        let backup = match backup_existing(&labels_path) {
            Ok(backup) => backup,
            Err(e) => {
                log::warn!("Could not back up {:?}: {}", labels_path, e);
                None
            }
        };

        let labels = if labels_path.exists() {
            read_labels(&labels_path, &self.schema).unwrap_or_else(|e| {
                log::warn!(
                    "Could not read existing labels {:?}, starting empty: {}",
                    labels_path,
                    e
                );
                LabelStore::new()
            })
        } else {
            LabelStore::new()
        };

        let summary = OpenSummary {
            frames: dataset.len(),
            labeled: labels.len(),
            backup,
        };

        self.navigator = FrameNavigator::new(dataset.len());
        self.dataset = Some(dataset);
        self.labels = labels;
        self.load_current();

        log::info!(
            "Opened dataset with {} frames ({} already labeled)",
            summary.frames,
            summary.labeled
        );
        Ok(summary)
    }

    /// Load a new baseline from `path`, discarding the old one on success.
    ///
    /// On failure the current baseline is kept. Returns the number of swallows
    /// in the new baseline.
    pub fn replace_baseline(&mut self, path: &Path) -> Result<usize, SessionError> {
        let baseline = load_baseline(path, &self.schema)?;
        let count = baseline.len();
        self.set_baseline(baseline);
        Ok(count)
    }

    /// Swap in an already-loaded baseline.
    pub fn set_baseline(&mut self, baseline: BaselineStore) {
        self.baseline = baseline;
    }

    /// Flip the draft value of the structure bound to `key`.
    ///
    /// Returns the structure index and its new value, or `None` if no
    /// structure uses the key.
    pub fn toggle_hotkey(&mut self, key: char) -> Option<(usize, bool)> {
        let index = self.schema.index_for_hotkey(key)?;
        self.toggle(index).map(|visible| (index, visible))
    }

    /// Flip the draft value of structure `index`.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        self.draft.toggle(index)
    }

    /// Mark every structure visible in the draft.
    pub fn check_all(&mut self) {
        self.draft.fill(true);
    }

    /// Clear every structure in the draft.
    pub fn uncheck_all(&mut self) {
        self.draft.fill(false);
    }

    /// Record the draft of the current frame in the label store.
    pub fn commit_current(&mut self) -> Option<OverrideOutcome> {
        let key = self.current_key()?;
        Some(compute_override(
            &mut self.labels,
            &self.baseline,
            key,
            self.draft.clone(),
        ))
    }

    /// Write the whole label store to the dataset's label CSV.
    pub fn persist(&self) -> Result<usize, SessionError> {
        let path = self.labels_path().ok_or(SessionError::NoDataset)?;
        Ok(write_labels(&path, &self.labels, &self.baseline, &self.schema)?)
    }

    /// Commit the current frame and persist.
    pub fn save(&mut self) -> Result<usize, SessionError> {
        self.commit_current().ok_or(SessionError::NoDataset)?;
        self.persist()
    }

    /// Commit and persist the current frame, then move one frame forward.
    ///
    /// At the end of the range the frame is still committed and persisted,
    /// but the index does not move.
    pub fn advance(&mut self) -> Result<StepOutcome, SessionError> {
        self.save()?;
        if !self.navigator.step_forward() {
            log::debug!("Already at the end of the range");
            return Ok(StepOutcome::AtBoundary);
        }
        self.load_current();
        Ok(StepOutcome::Moved(self.navigator.index()))
    }

    /// Commit and persist the current frame, then move one frame back.
    ///
    /// At the start of the range this is a no-op and nothing is persisted.
    pub fn retreat(&mut self) -> Result<StepOutcome, SessionError> {
        if self.dataset.is_none() {
            return Err(SessionError::NoDataset);
        }
        if self.navigator.at_range_start() {
            log::debug!("Already at the start of the range");
            return Ok(StepOutcome::AtBoundary);
        }
        self.save()?;
        self.navigator.step_back();
        self.load_current();
        Ok(StepOutcome::Moved(self.navigator.index()))
    }

    /// Move straight to the 0-based `target` without persisting the frame being left.
    pub fn jump_to(&mut self, target: i64) -> Result<usize, SessionError> {
        if self.dataset.is_none() {
            return Err(SessionError::NoDataset);
        }
        let index = self.navigator.jump_to(target)?;
        self.load_current();
        log::debug!("Jumped to frame {}", index);
        Ok(index)
    }

    /// Restrict navigation to the 0-based inclusive range `[min, max]`.
    pub fn set_range(&mut self, min: i64, max: i64) -> Result<(), SessionError> {
        if self.dataset.is_none() {
            return Err(SessionError::NoDataset);
        }
        self.navigator.set_range(min, max)?;
        self.load_current();
        Ok(())
    }

    /// Reset the range to the whole sequence.
    pub fn clear_range(&mut self) {
        self.navigator.clear_range();
        self.load_current();
    }

    /// Render state for the current frame, if a dataset is open.
    pub fn current_view(&self) -> Option<FrameView> {
        let dataset = self.dataset.as_ref()?;
        let index = self.navigator.index();
        let key = dataset.key(index)?;
        let path = dataset.frame(index)?.to_path_buf();
        let severities = self
            .baseline
            .resolve(key.video, key.swallow, self.schema.len());
        let overridden = overridden_flags(&self.draft, &severities);

        Some(FrameView {
            index,
            total: self.navigator.total(),
            range: self.navigator.range(),
            path,
            key,
            visibility: self.draft.clone(),
            severities,
            overridden,
        })
    }

    /// Number of frames with a stored label.
    pub fn labeled_count(&self) -> usize {
        self.labels.len()
    }

    /// Structure schema in use.
    pub fn schema(&self) -> &StructureSchema {
        &self.schema
    }

    /// Current baseline.
    pub fn baseline(&self) -> &BaselineStore {
        &self.baseline
    }

    /// Current label store.
    pub fn labels(&self) -> &LabelStore {
        &self.labels
    }

    /// Open dataset, if any.
    pub fn dataset(&self) -> Option<&DatasetState> {
        self.dataset.as_ref()
    }

    /// Navigation state.
    pub fn navigator(&self) -> &FrameNavigator {
        &self.navigator
    }

    /// Draft visibility of the current frame.
    pub fn draft(&self) -> &VisibilityVector {
        &self.draft
    }

    /// Label CSV path of the open dataset.
    pub fn labels_path(&self) -> Option<PathBuf> {
        self.dataset.as_ref().map(DatasetState::labels_path)
    }

    fn current_key(&self) -> Option<FrameKey> {
        self.dataset.as_ref()?.key(self.navigator.index())
    }

    /// Reset the draft to the stored or carried-forward vector for the current frame.
    fn load_current(&mut self) {
        let width = self.schema.len();
        self.draft = match &self.dataset {
            Some(dataset) => {
                resolve_default_vector(&self.labels, &dataset.keys, self.navigator.index(), width)
            }
            None => VisibilityVector::zeros(width),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    fn two_frame_dataset() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "video1/swallow1/frame_1.png");
        touch(dir.path(), "video1/swallow1/frame_2.png");
        dir
    }

    fn baseline_2_then_zeros() -> BaselineStore {
        let mut severities = vec![0.0; 12];
        severities[0] = 2.0;
        let mut baseline = BaselineStore::empty();
        baseline.insert(1, 1, SeverityVector::from(severities));
        baseline
    }

    fn open(dir: &tempfile::TempDir) -> LabelSession {
        let mut session = LabelSession::new(StructureSchema::reference(), baseline_2_then_zeros());
        session.open_folder(dir.path()).unwrap();
        session
    }

    #[test]
    fn test_carry_forward_scenario() {
        let dir = two_frame_dataset();
        let mut session = open(&dir);

        assert_eq!(session.toggle_hotkey('1'), Some((0, true)));
        assert_eq!(session.advance().unwrap(), StepOutcome::Moved(1));
        assert_eq!(session.draft().bits()[..3], [1, 0, 0]);
        session.save().unwrap();

        let csv = fs::read_to_string(dir.path().join("frame_labels.csv")).unwrap();
        let rows: Vec<&str> = csv.lines().skip(1).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("1,1,1,2,1,0,0,"));
        assert!(rows[1].starts_with("1,1,2,2,1,0,0,"));
    }

    #[test]
    fn test_viewing_does_not_write_entries() {
        let dir = two_frame_dataset();
        let session = open(&dir);
        assert!(session.current_view().is_some());
        assert_eq!(session.labeled_count(), 0);
        assert!(!dir.path().join("frame_labels.csv").exists());
    }

    #[test]
    fn test_advance_at_range_end_persists_without_moving() {
        let dir = two_frame_dataset();
        let mut session = open(&dir);
        session.jump_to(1).unwrap();

        assert_eq!(session.advance().unwrap(), StepOutcome::AtBoundary);
        assert_eq!(session.navigator().index(), 1);
        assert_eq!(session.labeled_count(), 1);
        assert!(session.labels().contains(&FrameKey::new(1, 1, 2)));
        assert!(dir.path().join("frame_labels.csv").exists());
    }

    #[test]
    fn test_retreat_at_range_start_is_a_no_op() {
        let dir = two_frame_dataset();
        let mut session = open(&dir);
        session.toggle_hotkey('3');

        assert_eq!(session.retreat().unwrap(), StepOutcome::AtBoundary);
        assert_eq!(session.navigator().index(), 0);
        assert_eq!(session.labeled_count(), 0);
        assert!(!dir.path().join("frame_labels.csv").exists());
        assert!(session.draft().get(2));
    }

    #[test]
    fn test_retreat_persists_before_moving() {
        let dir = two_frame_dataset();
        let mut session = open(&dir);
        session.jump_to(1).unwrap();
        session.toggle_hotkey('2');

        assert_eq!(session.retreat().unwrap(), StepOutcome::Moved(0));
        let stored = session.labels().get(&FrameKey::new(1, 1, 2)).unwrap();
        assert!(stored.get(1));
        // Frame 1 has no entry and is first in sequence
        assert_eq!(session.draft().count_visible(), 0);
    }

    #[test]
    fn test_jump_does_not_persist() {
        let dir = two_frame_dataset();
        let mut session = open(&dir);
        session.toggle_hotkey('2');

        assert_eq!(session.jump_to(1).unwrap(), 1);
        assert_eq!(session.labeled_count(), 0);
        assert_eq!(session.draft().count_visible(), 0);

        session.jump_to(0).unwrap();
        assert_eq!(session.draft().count_visible(), 0);
    }

    #[test]
    fn test_jump_rejects_out_of_bounds() {
        let dir = two_frame_dataset();
        let mut session = open(&dir);
        let err = session.jump_to(2).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Navigation(NavigationError::OutOfBounds { index: 2, total: 2 })
        ));
        assert_eq!(session.navigator().index(), 0);
    }

    #[test]
    fn test_range_clamps_and_rejects() {
        let dir = two_frame_dataset();
        let mut session = open(&dir);

        assert!(matches!(
            session.set_range(0, 5),
            Err(SessionError::Navigation(NavigationError::InvalidRange { .. }))
        ));
        assert_eq!(session.navigator().range(), (0, 1));

        session.set_range(1, 1).unwrap();
        assert_eq!(session.navigator().index(), 1);
        assert!(matches!(
            session.jump_to(0),
            Err(SessionError::Navigation(NavigationError::OutsideRange { .. }))
        ));
        assert_eq!(session.retreat().unwrap(), StepOutcome::AtBoundary);

        session.clear_range();
        assert_eq!(session.navigator().range(), (0, 1));
        assert_eq!(session.navigator().index(), 1);
    }

    #[test]
    fn test_current_view_reports_overrides() {
        let dir = two_frame_dataset();
        let mut session = open(&dir);
        session.toggle_hotkey('1');
        session.toggle_hotkey('2');

        let view = session.current_view().unwrap();
        assert_eq!(view.status_line(), "1/2 — video 1, swallow 1, frame 1");
        assert_eq!(view.severities.as_written(0), 2);
        assert!(view.overridden.get(0));
        assert!(view.overridden.get(1));
        assert!(!view.overridden.get(2));
    }

    #[test]
    fn test_check_all_and_uncheck_all() {
        let dir = two_frame_dataset();
        let mut session = open(&dir);
        session.check_all();
        assert_eq!(session.draft().count_visible(), 12);
        session.uncheck_all();
        assert_eq!(session.draft().count_visible(), 0);
        assert_eq!(session.toggle_hotkey('x'), None);
    }

    #[test]
    fn test_reopen_backs_up_and_resumes() {
        let dir = two_frame_dataset();
        fs::write(
            dir.path().join("frame_labels.csv"),
            "video,swallow,frame,LPW_PPW,B,VT,LC_LP,RC_RP,PCR,LA_LAF,RA_RAF,IAS,LSE,LSAF_FVF,AC_TVF_PC\n\
             1,1,1,0,1,0,0,0,0,0,0,0,0,0,N/A\n",
        )
        .unwrap();

        let mut session = LabelSession::new(StructureSchema::reference(), BaselineStore::empty());
        let summary = session.open_folder(dir.path()).unwrap();

        assert_eq!(summary.frames, 2);
        assert_eq!(summary.labeled, 1);
        assert!(summary.backup.as_ref().unwrap().exists());
        assert!(session.draft().get(1));
        assert_eq!(session.draft().count_visible(), 1);
    }

    #[test]
    fn test_failed_backup_still_loads_labels() {
        let dir = two_frame_dataset();
        let labels_path = dir.path().join("frame_labels.csv");
        fs::write(
            &labels_path,
            "video,swallow,frame,LPW_PPW,B,VT,LC_LP,RC_RP,PCR,LA_LAF,RA_RAF,IAS,LSE,LSAF_FVF,AC_TVF_PC\n\
             1,1,1,0,1,0,0,0,0,0,0,0,0,0,0\n",
        )
        .unwrap();
        // Directories occupying the next few backup names make the copy fail
        let now = chrono::Local::now();
        for seconds in 0..5 {
            let at = now + chrono::Duration::seconds(seconds);
            fs::create_dir_all(crate::format::backup_path(&labels_path, at)).unwrap();
        }

        let mut session = LabelSession::new(StructureSchema::reference(), BaselineStore::empty());
        let summary = session.open_folder(dir.path()).unwrap();

        assert_eq!(summary.backup, None);
        assert_eq!(summary.labeled, 1);
        assert!(session.draft().get(1));
    }

    #[test]
    fn test_unreadable_labels_start_empty_after_backup() {
        let dir = two_frame_dataset();
        let labels_path = dir.path().join("frame_labels.csv");
        fs::write(&labels_path, b"video,swallow,\xff\xfe\n1,1,1\n").unwrap();

        let mut session = LabelSession::new(StructureSchema::reference(), BaselineStore::empty());
        let summary = session.open_folder(dir.path()).unwrap();

        assert_eq!(summary.frames, 2);
        assert_eq!(summary.labeled, 0);
        let backup = summary.backup.unwrap();
        assert_eq!(fs::read(backup).unwrap(), b"video,swallow,\xff\xfe\n1,1,1\n");
        assert_eq!(session.draft().count_visible(), 0);
    }

    #[test]
    fn test_open_without_frames_keeps_session() {
        let dir = two_frame_dataset();
        let mut session = open(&dir);
        let empty = tempfile::tempdir().unwrap();

        let err = session.open_folder(empty.path()).unwrap_err();
        assert!(matches!(err, SessionError::Dataset(DatasetError::NoFrames(_))));
        assert_eq!(session.dataset().unwrap().root, dir.path());
    }

    #[test]
    fn test_operations_without_dataset() {
        let mut session = LabelSession::new(StructureSchema::reference(), BaselineStore::empty());
        assert!(matches!(session.advance(), Err(SessionError::NoDataset)));
        assert!(matches!(session.retreat(), Err(SessionError::NoDataset)));
        assert!(matches!(session.save(), Err(SessionError::NoDataset)));
        assert!(session.current_view().is_none());
    }

    #[test]
    fn test_failed_baseline_replace_keeps_current() {
        let dir = two_frame_dataset();
        let mut session = open(&dir);
        let bad = dir.path().join("bad_preload.csv");
        fs::write(&bad, "video,swallow,LPW_PPW\n1,1,3\n").unwrap();

        assert!(session.replace_baseline(&bad).is_err());
        assert_eq!(session.baseline().len(), 1);
        assert_eq!(session.current_view().unwrap().severities.as_written(0), 2);
    }

    #[test]
    fn test_replace_baseline_discards_old_rows() {
        let dir = two_frame_dataset();
        let mut session = open(&dir);
        let good = dir.path().join("preload.csv");
        fs::write(
            &good,
            "video ID,swallow number,LPW-PPW,B,V-T,LC-LP,RC-RP,PCR,LA-LAF,RA-RAF,IAS,LSE,LSAF-FVF,AC-TVF-PC\n\
             2,1,4,4,4,4,4,4,4,4,4,4,4,4\n",
        )
        .unwrap();

        assert_eq!(session.replace_baseline(&good).unwrap(), 1);
        assert!(session.baseline().get(1, 1).is_none());
        assert_eq!(session.current_view().unwrap().severities.as_written(0), 0);
    }
}
