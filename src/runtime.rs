use ort::execution_providers::{CPUExecutionProvider, ExecutionProviderDispatch};
use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use ort::session::Session;
use ort::Result as OrtResult;
use std::sync::Once;

static INIT: Once = Once::new();

#[derive(Debug)]
pub struct RuntimeConfig {
    pub inter_threads: usize,
    pub intra_threads: usize,
    pub optimization_level: GraphOptimizationLevel,
    pub use_accelerator: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            inter_threads: 0, // Let ONNX Runtime decide
            intra_threads: 0, // Let ONNX Runtime decide
            optimization_level: GraphOptimizationLevel::Level3,
            use_accelerator: true,
        }
    }
}

impl Clone for RuntimeConfig {
    fn clone(&self) -> Self {
        Self {
            inter_threads: self.inter_threads,
            intra_threads: self.intra_threads,
            optimization_level: match self.optimization_level {
                GraphOptimizationLevel::Level1 => GraphOptimizationLevel::Level1,
                GraphOptimizationLevel::Level2 => GraphOptimizationLevel::Level2,
                GraphOptimizationLevel::Level3 => GraphOptimizationLevel::Level3,
                GraphOptimizationLevel::Disable => GraphOptimizationLevel::Disable,
            },
            use_accelerator: self.use_accelerator,
        }
    }
}

fn init_onnx_environment() -> OrtResult<()> {
    ort::init()
        .with_name("centavo")
        .commit()?;
    Ok(())
}

pub fn ensure_initialized() -> OrtResult<()> {
    INIT.call_once(|| {
        init_onnx_environment().expect("Failed to initialize ONNX Runtime environment");
    });
    Ok(())
}

/// Probes the hardware once and returns the execution providers to register,
/// strongest first. The CPU provider is always last so sessions fall back to
/// it when no accelerator is usable.
pub fn detect_execution_providers() -> Vec<ExecutionProviderDispatch> {
    let mut providers = Vec::new();

    #[cfg(feature = "cuda")]
    {
        use ort::execution_providers::{CUDAExecutionProvider, ExecutionProvider};
        let cuda = CUDAExecutionProvider::default();
        match cuda.is_available() {
            Ok(true) => {
                log::info!("CUDA execution provider is available");
                providers.push(cuda.build());
            }
            Ok(false) => log::info!("CUDA execution provider is not available"),
            Err(e) => log::warn!("Failed to probe CUDA availability: {}", e),
        }
    }

    #[cfg(feature = "coreml")]
    {
        use ort::execution_providers::{CoreMLExecutionProvider, ExecutionProvider};
        let coreml = CoreMLExecutionProvider::default();
        match coreml.is_available() {
            Ok(true) => {
                log::info!("CoreML execution provider is available");
                providers.push(coreml.build());
            }
            Ok(false) => log::info!("CoreML execution provider is not available"),
            Err(e) => log::warn!("Failed to probe CoreML availability: {}", e),
        }
    }

    providers.push(CPUExecutionProvider::default().build());
    providers
}

pub fn create_session_builder(config: &RuntimeConfig) -> OrtResult<SessionBuilder> {
    ensure_initialized()?;
    let mut builder = Session::builder()?;

    // Configure threading
    if config.inter_threads > 0 {
        builder = builder.with_inter_threads(config.inter_threads)?;
    }
    if config.intra_threads > 0 {
        builder = builder.with_intra_threads(config.intra_threads)?;
    }

    // Set optimization level
    let opt_level = match config.optimization_level {
        GraphOptimizationLevel::Level1 => GraphOptimizationLevel::Level1,
        GraphOptimizationLevel::Level2 => GraphOptimizationLevel::Level2,
        GraphOptimizationLevel::Level3 => GraphOptimizationLevel::Level3,
        GraphOptimizationLevel::Disable => GraphOptimizationLevel::Disable,
    };
    builder = builder.with_optimization_level(opt_level)?;

    if config.use_accelerator {
        let providers = detect_execution_providers();
        log::info!("Registering {} execution providers", providers.len());
        builder = builder.with_execution_providers(providers)?;
    }

    Ok(builder)
}
