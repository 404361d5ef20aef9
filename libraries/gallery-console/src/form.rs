//! Album form: draft editing and the upload-then-submit workflow.

use crate::preview::{PreviewHandle, PreviewRegistry};
use futures_util::stream::{FuturesUnordered, StreamExt};
use gallery_core::{
    Album, AlbumId, GalleryError, ImageStore, LocalImage, Notification, Notifier, Result,
};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Whether the form creates a new album or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: AlbumId },
}

/// Result of a submit attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The callback accepted this merged draft
    Submitted(Album),
    /// The callback failed; draft and pending files were kept
    Failed(GalleryError),
    /// The form could not submit (strict validation failed, or nothing to
    /// submit); nothing was uploaded
    Rejected(GalleryError),
    /// Another submit was already running
    Ignored,
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }
}

/// A selected file waiting to be uploaded.
struct PendingImage {
    image: LocalImage,
    _preview: PreviewHandle,
}

struct FormState {
    draft: Album,
    pending: Vec<PendingImage>,
}

/// Clears the busy flag when the submit ends, however it ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Controlled album form.
///
/// All methods take `&self`: a submit can be in flight while the caller still
/// reads the form (for instance to grey out the submit button).
///
/// By default any draft is submitted as is. `require_fields(true)` makes the
/// form reject drafts that fail `Album::validate` before uploading anything.
pub struct AlbumForm {
    mode: FormMode,
    state: Mutex<FormState>,
    submitting: AtomicBool,
    require_fields: bool,
    images: Arc<dyn ImageStore>,
    notifier: Arc<dyn Notifier>,
    previews: PreviewRegistry,
}

impl AlbumForm {
    /// An empty form for a new album
    pub fn new(images: Arc<dyn ImageStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_draft(FormMode::Create, Album::draft(), images, notifier)
    }

    /// A form pre-filled with an album; saved albums open in edit mode
    pub fn for_album(
        album: Album,
        images: Arc<dyn ImageStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let mode = match &album.id {
            Some(id) => FormMode::Edit { id: id.clone() },
            None => FormMode::Create,
        };
        Self::with_draft(mode, album, images, notifier)
    }

    fn with_draft(
        mode: FormMode,
        draft: Album,
        images: Arc<dyn ImageStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            mode,
            state: Mutex::new(FormState {
                draft,
                pending: Vec::new(),
            }),
            submitting: AtomicBool::new(false),
            require_fields: false,
            images,
            notifier,
            previews: PreviewRegistry::new(),
        }
    }

    /// Reject drafts with a blank title or type, or a malformed date
    pub fn require_fields(mut self, required: bool) -> Self {
        self.require_fields = required;
        self
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Copy of the current draft
    pub fn draft(&self) -> Album {
        self.lock().draft.clone()
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.lock().draft.title = title.into();
    }

    pub fn set_album_type(&self, album_type: impl Into<String>) {
        self.lock().draft.album_type = album_type.into();
    }

    pub fn set_date(&self, date: impl Into<String>) {
        self.lock().draft.date_album = date.into();
    }

    /// Replace the pending file selection. Previews of the previous
    /// selection are released.
    pub fn select_images(&self, files: Vec<LocalImage>) {
        let pending = files
            .into_iter()
            .map(|image| PendingImage {
                _preview: self.previews.create(&image.file_name),
                image,
            })
            .collect();
        self.lock().pending = pending;
    }

    /// Names of the files waiting to be uploaded
    pub fn pending_files(&self) -> Vec<String> {
        self.lock()
            .pending
            .iter()
            .map(|p| p.image.file_name.clone())
            .collect()
    }

    pub fn pending_count(&self) -> usize {
        self.lock().pending.len()
    }

    /// Number of preview handles not yet released
    pub fn live_previews(&self) -> usize {
        self.previews.live_count()
    }

    /// Drop an already-uploaded URL from the draft.
    ///
    /// The stored object is left alone.
    pub fn remove_existing_image(&self, index: usize) -> Option<String> {
        let mut state = self.lock();
        (index < state.draft.img.len()).then(|| state.draft.img.remove(index))
    }

    /// Drop a selected file before it is uploaded, releasing its preview.
    pub fn remove_pending_image(&self, index: usize) -> Option<LocalImage> {
        let mut state = self.lock();
        (index < state.pending.len()).then(|| state.pending.remove(index).image)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Upload pending files, merge their URLs into the draft and hand the
    /// result to `on_submit`.
    ///
    /// Uploads run concurrently; each failure is reported on its own and the
    /// rest carry on. New URLs are appended in completion order. The callback
    /// runs even if every upload failed.
    pub async fn submit<F, Fut>(&self, on_submit: F) -> SubmitOutcome
    where
        F: FnOnce(Album) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let Some(_busy) = BusyGuard::acquire(&self.submitting) else {
            debug!("Submit already in progress, ignoring");
            return SubmitOutcome::Ignored;
        };

        let (draft, files) = {
            let state = self.lock();
            let files: Vec<LocalImage> = state.pending.iter().map(|p| p.image.clone()).collect();
            (state.draft.clone(), files)
        };

        if self.require_fields {
            if let Err(e) = draft.validate() {
                self.notifier.notify(Notification::error(e.to_string()));
                return SubmitOutcome::Rejected(e);
            }
        }

        let uploaded = self.upload_all(&files).await;
        let mut merged = draft;
        merged.img.extend(uploaded);

        let (verb, done) = match self.mode {
            FormMode::Create => ("add", "added"),
            FormMode::Edit { .. } => ("update", "updated"),
        };

        match on_submit(merged.clone()).await {
            Ok(()) => {
                {
                    let mut state = self.lock();
                    state.pending.clear();
                    state.draft = match self.mode {
                        FormMode::Create => Album::draft(),
                        FormMode::Edit { .. } => merged.clone(),
                    };
                }
                info!(
                    title = %merged.title,
                    images = merged.img.len(),
                    "Album {} submitted", verb
                );
                self.notifier
                    .notify(Notification::success(format!("Album {} successfully", done)));
                SubmitOutcome::Submitted(merged)
            }
            Err(e) => {
                warn!(error = %e, "Album {} failed", verb);
                self.notifier
                    .notify(Notification::error(format!("Failed to {} album. {}", verb, e)));
                SubmitOutcome::Failed(e)
            }
        }
    }

    async fn upload_all(&self, files: &[LocalImage]) -> Vec<String> {
        let mut uploads: FuturesUnordered<_> = files
            .iter()
            .map(|file| async move { (file, self.images.upload_image(file).await) })
            .collect();

        let mut urls = Vec::with_capacity(files.len());
        while let Some((file, result)) = uploads.next().await {
            match result {
                Ok(url) => urls.push(url),
                Err(e) => {
                    warn!(file = %file.file_name, error = %e, "Image upload failed");
                    self.notifier.notify(Notification::error(format!(
                        "Failed to upload {}. {}",
                        file.file_name, e
                    )));
                }
            }
        }

        debug!(uploaded = urls.len(), selected = files.len(), "Uploads finished");
        urls
    }
}
