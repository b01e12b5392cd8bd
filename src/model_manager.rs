use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info, warn};
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use crate::models::{BuiltinModel, ModelInfo};

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model not downloaded: {0}")]
    NotDownloaded(String),
    #[error("Download error: {0}")]
    DownloadError(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Model verification failed")]
    VerificationFailed,
    #[error("Hash mismatch for {file_name}: expected {expected}, got {actual}")]
    HashMismatch {
        file_name: String,
        expected: String,
        actual: String,
    },
}

/// One file the registry serves for a model, with its expected digest.
struct RegistryFile<'a> {
    name: &'static str,
    url: &'a str,
    sha256: &'a str,
    path: PathBuf,
}

/// Downloads model files from the registry and verifies them against pinned
/// SHA-256 digests. Concurrent downloads of the same model are serialized
/// through an internal lock.
#[derive(Clone)]
pub struct ModelManager {
    models_dir: PathBuf,
    download_lock: Arc<Mutex<()>>,
}

impl ModelManager {
    /// Creates a new ModelManager with the default models directory
    pub fn new_default() -> io::Result<Self> {
        Self::new(Self::get_default_models_dir())
    }

    /// Resolves the directory model files are cached under. `CENTAVO_CACHE`
    /// overrides the platform cache directory.
    pub fn get_default_models_dir() -> PathBuf {
        if let Ok(path) = env::var("CENTAVO_CACHE") {
            return PathBuf::from(path).join("models");
        }
        if let Some(cache_dir) = dirs::cache_dir() {
            return cache_dir.join("centavo").join("models");
        }
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".cache").join("centavo").join("models");
        }
        env::temp_dir().join("centavo").join("models")
    }

    pub fn new<P: AsRef<Path>>(models_dir: P) -> io::Result<Self> {
        let models_dir = models_dir.as_ref().to_path_buf();
        fs::create_dir_all(&models_dir)?;
        Ok(Self {
            models_dir,
            download_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn get_model_path(&self, model: BuiltinModel) -> PathBuf {
        let info = model.get_model_info();
        self.models_dir.join(info.name).join("model.onnx")
    }

    pub fn get_tokenizer_path(&self, model: BuiltinModel) -> PathBuf {
        let info = model.get_model_info();
        self.models_dir.join(info.name).join("tokenizer.json")
    }

    fn registry_files<'a>(&self, model: BuiltinModel, info: &'a ModelInfo) -> [RegistryFile<'a>; 2] {
        [
            RegistryFile {
                name: "model.onnx",
                url: &info.model_url,
                sha256: &info.model_hash,
                path: self.get_model_path(model),
            },
            RegistryFile {
                name: "tokenizer.json",
                url: &info.tokenizer_url,
                sha256: &info.tokenizer_hash,
                path: self.get_tokenizer_path(model),
            },
        ]
    }

    pub fn is_model_downloaded(&self, model: BuiltinModel) -> bool {
        let info = model.get_model_info();
        self.registry_files(model, &info)
            .iter()
            .all(|file| file.path.exists())
    }

    /// Downloads any missing or corrupt registry file for the model. Files
    /// that already exist and match their digest are left untouched.
    pub async fn download_model(&self, model: BuiltinModel) -> Result<(), ModelError> {
        let info = model.get_model_info();
        let _lock = self.download_lock.lock().await;

        fs::create_dir_all(self.models_dir.join(&info.name))?;

        for file in self.registry_files(model, &info) {
            if file.path.exists() {
                if self.verify_file(&file.path, file.sha256)? {
                    info!("Existing {} passed verification, keeping it", file.name);
                    continue;
                }
                warn!("Existing {} failed verification, redownloading", file.name);
            }
            if let Err(e) = self.fetch_file(&file).await {
                // Leave no partial download behind
                let _ = self.remove_download(model);
                return Err(e);
            }
        }

        info!("Model and tokenizer ready to use");
        Ok(())
    }

    async fn fetch_file(&self, file: &RegistryFile<'_>) -> Result<(), ModelError> {
        info!("Downloading {} from {}", file.name, file.url);
        let response = reqwest::get(file.url).await?.error_for_status()?;
        let bytes = response.bytes().await?;
        debug!("Downloaded {} bytes for {}", bytes.len(), file.name);

        let actual = format!("{:x}", Sha256::digest(&bytes));
        if actual != file.sha256 {
            return Err(ModelError::HashMismatch {
                file_name: file.name.to_string(),
                expected: file.sha256.to_string(),
                actual,
            });
        }

        if let Some(parent) = file.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file.path, &bytes)?;

        // Re-verify from disk after writing
        if !self.verify_file(&file.path, file.sha256)? {
            return Err(ModelError::VerificationFailed);
        }

        info!("{} downloaded and verified", file.name);
        Ok(())
    }

    fn verify_file(&self, path: &Path, expected: &str) -> Result<bool, ModelError> {
        let bytes = fs::read(path)?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let actual = format!("{:x}", hasher.finalize());
        debug!("{:?}: calculated {}, expected {}", path, actual, expected);
        Ok(actual == expected)
    }

    pub fn verify_model(&self, model: BuiltinModel) -> Result<bool, ModelError> {
        let info = model.get_model_info();
        for file in self.registry_files(model, &info) {
            if !file.path.exists() {
                info!("{} is missing from {:?}", file.name, self.models_dir);
                return Ok(false);
            }
            if !self.verify_file(&file.path, file.sha256)? {
                warn!("{} failed hash verification", file.name);
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn remove_download(&self, model: BuiltinModel) -> Result<(), ModelError> {
        let info = model.get_model_info();
        for file in self.registry_files(model, &info) {
            if file.path.exists() {
                fs::remove_file(&file.path)?;
            }
        }
        Ok(())
    }

    /// Ensures the model is downloaded and passes verification, downloading
    /// or replacing files as needed.
    pub async fn ensure_model_downloaded(&self, model: BuiltinModel) -> Result<(), ModelError> {
        if !self.is_model_downloaded(model) {
            info!("Model {:?} not found locally, downloading", model);
            return self.download_model(model).await;
        }
        if self.verify_model(model)? {
            debug!("Model {:?} already downloaded and verified", model);
            return Ok(());
        }
        warn!("Cached model {:?} failed verification, re-downloading", model);
        self.remove_download(model)?;
        self.download_model(model).await
    }
}
