//! Model directory adapter: reads classifier artifacts with integrity checks.
//!
//! # Security
//!
//! - `manifest.json` binds every artifact to its SHA-256 digest
//! - `manifest.sig` is an Ed25519 signature over the exact manifest bytes
//! - With a manifest present, an artifact not listed in it is refused
//! - With `require_signed`, a missing manifest or signature refuses start-up
//!
//! Unsigned directories are accepted only when signing is not required, so
//! a plain export of five JSON files works for local use.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Manifest file name inside the model directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Detached signature over the manifest bytes.
pub const SIGNATURE_FILE: &str = "manifest.sig";

/// Only manifest layout currently understood.
pub const MANIFEST_VERSION: u32 = 1;

/// Allowed clock skew for `created_at`, in seconds.
const MAX_CLOCK_SKEW_SECS: i64 = 300;

/// Errors raised while locating, verifying or reading artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Model artifact not found at {0:?}")]
    Missing(PathBuf),

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid model artifact {file}: {reason}")]
    Parse { file: String, reason: String },

    #[error("File hash mismatch for {0}")]
    HashMismatch(String),

    #[error("Artifact {0} is not bound by manifest.json")]
    Unbound(String),

    #[error("Model signature verification failed: {0}")]
    Signature(String),

    #[error("Invalid manifest: {0}")]
    Manifest(String),
}

/// Signed list of artifact digests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelManifest {
    pub version: u32,
    #[serde(default)]
    pub created_at: Option<i64>,
    pub files: BTreeMap<String, String>,
}

/// How strictly a model directory is verified.
#[derive(Debug, Clone, Default)]
pub struct IntegrityPolicy {
    /// Refuse directories without a verified manifest signature.
    pub require_signed: bool,
    /// Key the manifest signature must verify against.
    pub verifying_key: Option<VerifyingKey>,
}

/// An opened (and, if a manifest exists, verified) model directory.
#[derive(Debug)]
pub struct ModelDirectory {
    root: PathBuf,
    manifest: Option<ModelManifest>,
}

/// Lowercase hex SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Current Unix time in seconds (0 if the clock is before the epoch).
#[must_use]
pub fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

// Constant-time compare for ASCII strings (used for SHA-256 hex digests).
fn constant_time_eq_str(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.as_bytes().iter().zip(b.as_bytes().iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

fn read_file(path: &Path) -> Result<Vec<u8>, ArtifactError> {
    fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl ModelDirectory {
    /// Open `root`, verifying its manifest and signature per `policy`.
    ///
    /// # Errors
    /// Returns error if the directory is missing or integrity checks fail.
    pub fn open(root: &Path, policy: &IntegrityPolicy) -> Result<Self, ArtifactError> {
        if !root.is_dir() {
            return Err(ArtifactError::Missing(root.to_path_buf()));
        }

        let manifest_path = root.join(MANIFEST_FILE);
        let sig_path = root.join(SIGNATURE_FILE);

        if !manifest_path.exists() {
            if policy.require_signed {
                tracing::error!("No {MANIFEST_FILE} in {:?}; signed models are required", root);
                return Err(ArtifactError::Manifest(format!(
                    "{MANIFEST_FILE} required but not found in {root:?}"
                )));
            }
            tracing::warn!("Loading UNVERIFIED models from {:?} (no {MANIFEST_FILE})", root);
            return Ok(Self {
                root: root.to_path_buf(),
                manifest: None,
            });
        }

        let manifest_bytes = read_file(&manifest_path)?;

        match (&policy.verifying_key, sig_path.exists()) {
            (Some(key), true) => verify_signature(key, &manifest_bytes, &read_file(&sig_path)?)?,
            (Some(_), false) => {
                return Err(ArtifactError::Signature(format!(
                    "{SIGNATURE_FILE} not found in {root:?}"
                )));
            }
            (None, _) if policy.require_signed => {
                return Err(ArtifactError::Signature(
                    "signed models required but no verifying key is configured".into(),
                ));
            }
            (None, present) => {
                if present {
                    tracing::warn!("{SIGNATURE_FILE} present but no verifying key configured; signature not checked");
                }
            }
        }

        let manifest: ModelManifest = serde_json::from_slice(&manifest_bytes)
            .map_err(|e| ArtifactError::Manifest(format!("invalid {MANIFEST_FILE} format: {e}")))?;
        validate_manifest(&manifest)?;

        tracing::info!(
            "Verified {MANIFEST_FILE} ({} bound files, signed={})",
            manifest.files.len(),
            policy.verifying_key.is_some()
        );

        Ok(Self {
            root: root.to_path_buf(),
            manifest: Some(manifest),
        })
    }

    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.manifest.is_some()
    }

    /// Read `file`, checking its digest against the manifest when one is present.
    ///
    /// # Errors
    /// Returns error if the file is missing, unbound, or its hash does not match.
    pub fn read(&self, file: &str) -> Result<Vec<u8>, ArtifactError> {
        let path = self.root.join(file);
        if !path.is_file() {
            return Err(ArtifactError::Missing(path));
        }

        let bytes = read_file(&path)?;

        if let Some(manifest) = &self.manifest {
            let expected = manifest
                .files
                .get(file)
                .ok_or_else(|| ArtifactError::Unbound(file.to_string()))?;
            if !constant_time_eq_str(&sha256_hex(&bytes), &expected.to_ascii_lowercase()) {
                return Err(ArtifactError::HashMismatch(file.to_string()));
            }
        }

        Ok(bytes)
    }
}

fn verify_signature(
    key: &VerifyingKey,
    manifest_bytes: &[u8],
    sig_bytes: &[u8],
) -> Result<(), ArtifactError> {
    let raw: [u8; 64] = sig_bytes.try_into().map_err(|_| {
        ArtifactError::Signature("invalid signature length (expected 64 bytes)".into())
    })?;
    let signature = Signature::from_bytes(&raw);
    key.verify(manifest_bytes, &signature)
        .map_err(|_| ArtifactError::Signature("invalid manifest signature".into()))
}

fn validate_manifest(manifest: &ModelManifest) -> Result<(), ArtifactError> {
    if manifest.version != MANIFEST_VERSION {
        return Err(ArtifactError::Manifest(format!(
            "unsupported manifest version {}",
            manifest.version
        )));
    }
    if manifest.files.is_empty() {
        return Err(ArtifactError::Manifest("manifest lists no files".into()));
    }
    if let Some(created_at) = manifest.created_at {
        if created_at > unix_now() + MAX_CLOCK_SKEW_SECS {
            return Err(ArtifactError::Manifest(
                "manifest created_at is in the future".into(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};
    use tempfile::tempdir;

    fn signing_key() -> SigningKey {
        SigningKey::from_bytes(&[7u8; 32])
    }

    fn write_manifest(dir: &Path, files: &[(&str, &[u8])], key: Option<&SigningKey>) {
        let manifest = ModelManifest {
            version: MANIFEST_VERSION,
            created_at: Some(unix_now()),
            files: files
                .iter()
                .map(|(name, bytes)| ((*name).to_string(), sha256_hex(bytes)))
                .collect(),
        };
        let bytes = serde_json::to_vec(&manifest).expect("serialize manifest");
        fs::write(dir.join(MANIFEST_FILE), &bytes).expect("write manifest");
        if let Some(key) = key {
            let sig: Signature = key.sign(&bytes);
            fs::write(dir.join(SIGNATURE_FILE), sig.to_bytes()).expect("write signature");
        }
    }

    #[test]
    fn test_missing_directory() {
        let temp = tempdir().expect("tempdir");
        let err = ModelDirectory::open(&temp.path().join("nope"), &IntegrityPolicy::default())
            .expect_err("must fail");
        assert!(matches!(err, ArtifactError::Missing(_)));
    }

    #[test]
    fn test_unverified_directory_reads_files() {
        let temp = tempdir().expect("tempdir");
        fs::write(temp.path().join("a.json"), b"{}").expect("write");

        let dir = ModelDirectory::open(temp.path(), &IntegrityPolicy::default()).expect("open");
        assert!(!dir.is_verified());
        assert_eq!(dir.read("a.json").expect("read"), b"{}");
        assert!(matches!(dir.read("b.json"), Err(ArtifactError::Missing(_))));
    }

    #[test]
    fn test_require_signed_without_manifest_fails() {
        let temp = tempdir().expect("tempdir");
        let policy = IntegrityPolicy {
            require_signed: true,
            verifying_key: Some(signing_key().verifying_key()),
        };
        let err = ModelDirectory::open(temp.path(), &policy).expect_err("must fail");
        assert!(matches!(err, ArtifactError::Manifest(_)));
    }

    #[test]
    fn test_signed_manifest_verifies_and_binds_hashes() {
        let temp = tempdir().expect("tempdir");
        let key = signing_key();
        fs::write(temp.path().join("a.json"), b"alpha").expect("write");
        fs::write(temp.path().join("extra.json"), b"beta").expect("write");
        write_manifest(temp.path(), &[("a.json", b"alpha")], Some(&key));

        let policy = IntegrityPolicy {
            require_signed: true,
            verifying_key: Some(key.verifying_key()),
        };
        let dir = ModelDirectory::open(temp.path(), &policy).expect("open");
        assert!(dir.is_verified());
        assert_eq!(dir.read("a.json").expect("read"), b"alpha");
        assert!(matches!(dir.read("extra.json"), Err(ArtifactError::Unbound(_))));
    }

    #[test]
    fn test_tampered_artifact_fails_hash_check() {
        let temp = tempdir().expect("tempdir");
        write_manifest(temp.path(), &[("a.json", b"alpha")], None);
        fs::write(temp.path().join("a.json"), b"tampered").expect("write");

        let dir = ModelDirectory::open(temp.path(), &IntegrityPolicy::default()).expect("open");
        assert!(matches!(dir.read("a.json"), Err(ArtifactError::HashMismatch(_))));
    }

    #[test]
    fn test_wrong_key_rejects_signature() {
        let temp = tempdir().expect("tempdir");
        fs::write(temp.path().join("a.json"), b"alpha").expect("write");
        write_manifest(temp.path(), &[("a.json", b"alpha")], Some(&signing_key()));

        let other = SigningKey::from_bytes(&[9u8; 32]);
        let policy = IntegrityPolicy {
            require_signed: false,
            verifying_key: Some(other.verifying_key()),
        };
        let err = ModelDirectory::open(temp.path(), &policy).expect_err("must fail");
        assert!(matches!(err, ArtifactError::Signature(_)));
    }

    #[test]
    fn test_future_manifest_rejected() {
        let temp = tempdir().expect("tempdir");
        let manifest = ModelManifest {
            version: MANIFEST_VERSION,
            created_at: Some(unix_now() + 10_000),
            files: BTreeMap::from([("a.json".to_string(), sha256_hex(b"a"))]),
        };
        fs::write(
            temp.path().join(MANIFEST_FILE),
            serde_json::to_vec(&manifest).expect("serialize"),
        )
        .expect("write");

        let err = ModelDirectory::open(temp.path(), &IntegrityPolicy::default())
            .expect_err("must fail");
        assert!(matches!(err, ArtifactError::Manifest(_)));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq_str("abc", "abc"));
        assert!(!constant_time_eq_str("abc", "abd"));
        assert!(!constant_time_eq_str("abc", "ab"));
    }
}
