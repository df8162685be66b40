//! Background document uploads
//!
//! [`UploadCoordinator::start`] returns as soon as the work is scheduled.
//! The spawned task stores the file, asks the agent to index it into the
//! target corpus and reports the outcome through a [`NotificationSink`].

use crate::agent::{AgentTransport, TransportError};
use crate::file_search::{FileSearchClient, FileSearchError};
use crate::session::SessionManager;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to store {filename}: {message}")]
    Store { filename: String, message: String },

    #[error("Failed to add {filename} to {corpus}: {source}")]
    Index {
        filename: String,
        corpus: String,
        source: TransportError,
    },

    #[error("Upload of {0} was cancelled")]
    Cancelled(String),
}

/// A file waiting to be uploaded
#[derive(Debug, Clone, PartialEq)]
pub struct PendingUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub mime_type: Option<String>,
}

impl PendingUpload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Read a local file; the upload is named after its final path component
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, UploadError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| UploadError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(filename, bytes))
    }
}

/// Completion notice for one upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadNotification {
    pub filename: String,
    pub corpus: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadNotification {
    pub fn message(&self) -> String {
        match &self.error {
            None => format!("✅ {} was added to {}", self.filename, self.corpus),
            Some(error) => format!("❌ {} could not be added to {}: {error}", self.filename, self.corpus),
        }
    }
}

/// Where a stored file lands before it is indexed
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store the file and return the reference the agent should index
    async fn store(&self, upload: &PendingUpload) -> Result<String, UploadError>;
}

#[async_trait]
impl DocumentStore for FileSearchClient {
    async fn store(&self, upload: &PendingUpload) -> Result<String, UploadError> {
        let receipt = self
            .upload_file(&upload.filename, &upload.bytes, upload.mime_type.as_deref())
            .await
            .map_err(|e: FileSearchError| UploadError::Store {
                filename: upload.filename.clone(),
                message: e.to_string(),
            })?;

        if receipt.filename.is_empty() {
            Ok(upload.filename.clone())
        } else {
            Ok(receipt.filename)
        }
    }
}

/// Receiver of upload completion notices
pub trait NotificationSink: Send + Sync {
    fn publish(&self, notification: UploadNotification);
}

impl NotificationSink for UnboundedSender<UploadNotification> {
    fn publish(&self, notification: UploadNotification) {
        if self.send(notification).is_err() {
            debug!("upload notification dropped, receiver closed");
        }
    }
}

/// Handle returned by [`UploadCoordinator::start`]
#[derive(Debug)]
pub struct UploadTicket {
    pub filename: String,
    pub corpus: String,
    /// Text to show the user while the upload runs
    pub acknowledgement: String,
    handle: JoinHandle<Result<(), UploadError>>,
}

impl UploadTicket {
    /// Wait for the background task to finish
    pub async fn wait(self) -> Result<(), UploadError> {
        match self.handle.await {
            Ok(result) => result,
            Err(_) => Err(UploadError::Cancelled(self.filename)),
        }
    }

    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

pub fn acknowledgement(filename: &str, corpus: &str) -> String {
    format!(
        "✅ Upload started for **{filename}**!\n\nThe document is being processed in the background. You'll receive a notification when it's added to {corpus}."
    )
}

pub struct UploadCoordinator<S, T, N> {
    store: Arc<S>,
    session: Arc<SessionManager<T>>,
    sink: Arc<N>,
}

impl<S, T, N> Clone for UploadCoordinator<S, T, N> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            session: Arc::clone(&self.session),
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<S, T, N> UploadCoordinator<S, T, N>
where
    S: DocumentStore + 'static,
    T: AgentTransport + 'static,
    N: NotificationSink + 'static,
{
    pub fn new(store: Arc<S>, session: Arc<SessionManager<T>>, sink: Arc<N>) -> Self {
        Self {
            store,
            session,
            sink,
        }
    }

    /// Schedule an upload and return immediately
    pub fn start(&self, upload: PendingUpload, corpus: impl Into<String>) -> UploadTicket {
        let corpus = corpus.into();
        let filename = upload.filename.clone();
        let acknowledgement = acknowledgement(&filename, &corpus);
        info!(%filename, %corpus, "upload scheduled");

        let store = Arc::clone(&self.store);
        let session = Arc::clone(&self.session);
        let sink = Arc::clone(&self.sink);
        let task_corpus = corpus.clone();

        let handle = tokio::spawn(async move {
            let result = process(store.as_ref(), session.as_ref(), &upload, &task_corpus).await;

            let notification = UploadNotification {
                filename: upload.filename.clone(),
                corpus: task_corpus,
                success: result.is_ok(),
                error: result.as_ref().err().map(ToString::to_string),
            };
            match &notification.error {
                None => info!(filename = %notification.filename, "upload completed"),
                Some(message) => error!(filename = %notification.filename, %message, "upload failed"),
            }
            sink.publish(notification);
            result
        });

        UploadTicket {
            filename,
            corpus,
            acknowledgement,
            handle,
        }
    }
}

async fn process<S, T>(
    store: &S,
    session: &SessionManager<T>,
    upload: &PendingUpload,
    corpus: &str,
) -> Result<(), UploadError>
where
    S: DocumentStore + ?Sized,
    T: AgentTransport,
{
    let reference = store.store(upload).await?;
    debug!(filename = %upload.filename, %reference, "stored, indexing");

    session
        .add_document(corpus, &[reference])
        .await
        .map_err(|source| UploadError::Index {
            filename: upload.filename.clone(),
            corpus: corpus.to_string(),
            source,
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::models::{AgentIdentity, RawAgentEvent, RunRequest};
    use std::sync::Mutex as StdMutex;
    use tokio::sync::mpsc;

    struct MemoryStore {
        fail: bool,
        stored: StdMutex<Vec<String>>,
    }

    #[async_trait]
    impl DocumentStore for MemoryStore {
        async fn store(&self, upload: &PendingUpload) -> Result<String, UploadError> {
            if self.fail {
                return Err(UploadError::Store {
                    filename: upload.filename.clone(),
                    message: "disk full".into(),
                });
            }
            self.stored.lock().unwrap().push(upload.filename.clone());
            Ok(format!("store/{}", upload.filename))
        }
    }

    #[derive(Default)]
    struct RecordingTransport {
        fail_run: bool,
        runs: StdMutex<Vec<RunRequest>>,
    }

    #[async_trait]
    impl AgentTransport for RecordingTransport {
        async fn create_session(&self, _identity: &AgentIdentity) -> Result<String, TransportError> {
            Ok("s-1".into())
        }

        async fn run(&self, request: &RunRequest) -> Result<Vec<RawAgentEvent>, TransportError> {
            self.runs.lock().unwrap().push(request.clone());
            if self.fail_run {
                return Err(TransportError::Status {
                    status: 500,
                    message: "indexer down".into(),
                });
            }
            Ok(vec![RawAgentEvent::text("Added")])
        }
    }

    fn coordinator(
        fail_store: bool,
        fail_run: bool,
    ) -> (
        UploadCoordinator<MemoryStore, RecordingTransport, UnboundedSender<UploadNotification>>,
        Arc<SessionManager<RecordingTransport>>,
        mpsc::UnboundedReceiver<UploadNotification>,
    ) {
        let store = Arc::new(MemoryStore {
            fail: fail_store,
            stored: StdMutex::new(Vec::new()),
        });
        let transport = RecordingTransport {
            fail_run,
            ..Default::default()
        };
        let session = Arc::new(SessionManager::new(
            transport,
            AgentIdentity {
                app_name: "risk_assessment_agent".into(),
                user_id: "user".into(),
            },
            6,
        ));
        let (tx, rx) = mpsc::unbounded_channel();
        (
            UploadCoordinator::new(store, Arc::clone(&session), Arc::new(tx)),
            session,
            rx,
        )
    }

    #[tokio::test]
    async fn test_successful_upload_notifies_and_indexes() {
        let (coordinator, session, mut rx) = coordinator(false, false);

        let ticket = coordinator.start(PendingUpload::new("policy.pdf", b"%PDF".to_vec()), "data_v1");
        assert!(ticket.acknowledgement.starts_with("✅ Upload started for **policy.pdf**!"));
        ticket.wait().await.unwrap();

        let notification = rx.recv().await.unwrap();
        assert_eq!(
            notification,
            UploadNotification {
                filename: "policy.pdf".into(),
                corpus: "data_v1".into(),
                success: true,
                error: None,
            }
        );

        let runs = session.transport().runs.lock().unwrap().clone();
        assert_eq!(runs.len(), 1);
        assert_eq!(
            runs[0].new_message.parts[0].text.as_deref(),
            Some("Add the following documents to the data_v1 corpus: store/policy.pdf")
        );
    }

    #[tokio::test]
    async fn test_store_failure_is_reported_not_indexed() {
        let (coordinator, session, mut rx) = coordinator(true, false);

        let ticket = coordinator.start(PendingUpload::new("a.txt", Vec::new()), "data_v1");
        assert!(matches!(ticket.wait().await, Err(UploadError::Store { .. })));

        let notification = rx.recv().await.unwrap();
        assert!(!notification.success);
        assert_eq!(
            notification.error.as_deref(),
            Some("Failed to store a.txt: disk full")
        );
        assert!(session.transport().runs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_index_failure_is_reported() {
        let (coordinator, _session, mut rx) = coordinator(false, true);

        let ticket = coordinator.start(PendingUpload::new("b.csv", b"x,y".to_vec()), "finance");
        assert!(matches!(ticket.wait().await, Err(UploadError::Index { .. })));

        let notification = rx.recv().await.unwrap();
        assert!(!notification.success);
        assert_eq!(notification.corpus, "finance");
        assert!(notification.message().starts_with("❌ b.csv could not be added to finance"));
    }

    #[tokio::test]
    async fn test_pending_upload_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        std::fs::write(&path, "# Notes").unwrap();

        let upload = PendingUpload::from_path(&path).await.unwrap();
        assert_eq!(upload.filename, "notes.md");
        assert_eq!(upload.bytes, b"# Notes");

        let missing = PendingUpload::from_path(dir.path().join("missing.md")).await;
        assert!(matches!(missing, Err(UploadError::Read { .. })));
    }
}
