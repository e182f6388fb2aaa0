pub mod backend;
pub mod controller;
pub mod draft;
pub mod fields;
pub mod forms;
pub mod links;
pub mod storage;
pub mod validation;
pub mod view;

pub use self::backend::{Backend, BackendError, SupabaseClient};
pub use self::controller::{FormController, Outcome, SubmissionState};
pub use self::draft::{FieldValue, FormDraft};
pub use self::storage::{FileStore, KeyValueStore, MemoryStore};
pub use self::view::{FormView, RecordingView, TerminalView};
