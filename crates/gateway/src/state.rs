use annotate::Annotator;
use inference::{ClassNameTable, Detector, InferenceBackend};
use std::sync::Arc;

/// Shared per-process resources, cloned into each request handler.
///
/// The detector owns the model session loaded at startup; it is never
/// reloaded during the process lifetime.
pub struct AppState<B: InferenceBackend> {
    pub detector: Arc<Detector<B>>,
    pub annotator: Arc<Annotator>,
    pub class_names: Arc<ClassNameTable>,
}

impl<B: InferenceBackend> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            detector: Arc::clone(&self.detector),
            annotator: Arc::clone(&self.annotator),
            class_names: Arc::clone(&self.class_names),
        }
    }
}
