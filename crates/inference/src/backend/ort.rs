use super::{InferenceBackend, InferenceOutput};
use crate::errors::{InferenceError, ModelLoadError};
use ndarray::{Array, IxDyn};
use ort::{
    session::{Session, builder::GraphOptimizationLevel},
    value::TensorRef,
};

#[derive(Debug, Clone, Copy)]
pub enum ExecutionProvider {
    Cpu,
    #[cfg(feature = "cuda")]
    Cuda,
}

pub struct OrtBackend {
    session: Session,
}

impl OrtBackend {
    /// Load model with specified execution provider
    pub fn load_model_with_provider(
        path: &str,
        provider: ExecutionProvider,
    ) -> Result<Self, ModelLoadError> {
        // Initialize ORT environment (idempotent)
        let _ = ort::init().commit();

        let build = || -> ort::Result<Session> {
            #[allow(unused_mut)]
            let mut builder = Session::builder()?
                .with_optimization_level(GraphOptimizationLevel::Level3)?
                .with_intra_threads(4)?;

            match provider {
                #[cfg(feature = "cuda")]
                ExecutionProvider::Cuda => {
                    tracing::info!("Initializing ONNX Runtime with CUDA execution provider");
                    builder = builder.with_execution_providers([
                        ort::execution_providers::CUDAExecutionProvider::default()
                            .with_device_id(0)
                            .build()
                            .error_on_failure(),
                    ])?;
                }
                ExecutionProvider::Cpu => {
                    tracing::info!("Initializing ONNX Runtime with CPU execution provider");
                }
            }

            builder.commit_from_file(path)
        };

        let session = build().map_err(|e| ModelLoadError::Session {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

        tracing::info!("Model loaded from {}", path);
        Ok(Self { session })
    }
}

impl InferenceBackend for OrtBackend {
    fn load_model(path: &str) -> Result<Self, ModelLoadError> {
        #[cfg(feature = "cuda")]
        let provider = ExecutionProvider::Cuda;
        #[cfg(not(feature = "cuda"))]
        let provider = ExecutionProvider::Cpu;

        Self::load_model_with_provider(path, provider)
    }

    fn infer(&mut self, input: &Array<f32, IxDyn>) -> Result<InferenceOutput, InferenceError> {
        let mut run = || -> ort::Result<ndarray::ArrayD<f32>> {
            let outputs = self.session.run(ort::inputs![
                "images" => TensorRef::from_array_view(input.view())?
            ])?;

            let predictions = outputs["output0"].try_extract_array()?;
            Ok(predictions.into_owned())
        };

        let predictions = run().map_err(|e| InferenceError::Session(e.to_string()))?;

        Ok(InferenceOutput { predictions })
    }
}
