use thiserror::Error;

/// Data-contract violation between the model's class space and the
/// configured class-name table. Surfaced to the caller, never swallowed.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("class id {class_id} out of range for {num_classes}-entry class-name table")]
    ClassIdOutOfRange { class_id: u32, num_classes: usize },
}
