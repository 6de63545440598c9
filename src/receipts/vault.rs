use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::fs;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tracing::{debug, warn};

use crate::receipts::ReceiptError;
use crate::types::TransactionId;

pub const MAX_RECEIPT_BYTES: u64 = 5 * 1024 * 1024;
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "pdf"];

//NOTE: Keeps concurrent uploads of the same name from sharing a staging file
static UPLOAD_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// A receipt file written to disk and the reference recorded on its transaction.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StoredReceipt {
    pub path: PathBuf,
    pub reference: String
}

/// Where a stored receipt lives and the name to offer it under.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ReceiptLocation {
    pub path: PathBuf,
    pub file_name: String
}

/// Filesystem storage for receipt files, laid out as `<root>/transactions/<id>/<file name>`.
#[derive(Debug, Clone)]
pub struct ReceiptVault {
    root: PathBuf
}

impl ReceiptVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Reduces an uploaded name to its final component and checks the extension.
    pub fn sanitize_file_name(file_name: &str) -> Result<String, ReceiptError> {
        let base_name = Path::new(file_name).file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| ReceiptError::InvalidName(file_name.to_string()))?;

        let extension = Path::new(base_name).extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ReceiptError::UnsupportedFormat(base_name.to_string()))
        }

        Ok(base_name.to_string())
    }

    /// Copies `source` into the vault.
    ///
    /// Bytes land in a staging file next to the destination and are renamed into place only once
    /// the copy completed within [`MAX_RECEIPT_BYTES`]. A failed upload removes just the staging
    /// file, so a receipt already stored under the same name survives it.
    pub async fn store<R>(&self, transaction_id: TransactionId, file_name: &str, source: R) -> Result<StoredReceipt, ReceiptError>
    where
        R: AsyncRead + Unpin,
    {
        let file_name = Self::sanitize_file_name(file_name)?;
        let directory = self.root.join("transactions").join(transaction_id.to_string());
        fs::create_dir_all(&directory).await?;

        let path = directory.join(&file_name);
        let staging = directory.join(format!(".{file_name}.{}.part", UPLOAD_SEQUENCE.fetch_add(1, Ordering::Relaxed)));

        let written = match Self::write_file(&staging, source).await {
            Ok(written) => written,
            Err(error) => {
                Self::discard(&staging).await;
                return Err(error.into())
            }
        };

        if written > MAX_RECEIPT_BYTES {
            Self::discard(&staging).await;
            return Err(ReceiptError::TooLarge { limit: MAX_RECEIPT_BYTES })
        }

        if let Err(error) = fs::rename(&staging, &path).await {
            Self::discard(&staging).await;
            return Err(error.into())
        }

        debug!("Stored [{written}] receipt bytes for transaction [{transaction_id}]");

        Ok(StoredReceipt {
            reference: path.to_string_lossy().replace('\\', "/"),
            path
        })
    }

    /// Best-effort removal of a previously stored receipt.
    pub async fn remove(&self, receipt: &StoredReceipt) {
        Self::discard(&receipt.path).await;
    }

    /// Resolves a stored reference back to a platform path and the file name to serve it under.
    pub fn locate(reference: &str) -> Option<ReceiptLocation> {
        if reference.trim().is_empty() {
            return None
        }

        let path = PathBuf::from(reference);
        let file_name = path.file_name()?.to_string_lossy().into_owned();

        Some(ReceiptLocation { path, file_name })
    }

    async fn write_file<R>(path: &Path, source: R) -> std::io::Result<u64>
    where
        R: AsyncRead + Unpin,
    {
        let mut file = fs::File::create(path).await?;
        let mut limited = source.take(MAX_RECEIPT_BYTES + 1);
        let written = tokio::io::copy(&mut limited, &mut file).await?;
        file.flush().await?;

        Ok(written)
    }

    async fn discard(path: &Path) {
        if let Err(error) = fs::remove_file(path).await {
            warn!("Could not remove receipt file [{}]: {error}", path.display());
        }
    }
}
