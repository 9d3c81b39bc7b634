//! Model signing utility for Riskdesk classifier artifacts.
//!
//! Hashes the five classifier artifacts, writes `manifest.json` and an
//! Ed25519 signature over it (`manifest.sig`) into the model directory.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin sign_models -- <model_dir>
//! ```
//!
//! # Security
//!
//! - Signing key sourced from an inherited FD or a file (env var only in debug builds)
//! - Every artifact the app loads must be present and is bound by SHA-256
//! - Private key material zeroized after use

#![allow(non_snake_case)]

use std::collections::BTreeMap;
use std::env;
use std::fs;
#[cfg(unix)]
use std::os::unix::io::FromRawFd;
use std::path::PathBuf;

use base64::engine::general_purpose;
use base64::Engine;
use ed25519_dalek::{Signature, Signer, SigningKey};
use zeroize::Zeroizing;
use zeroize::{Zeroize, ZeroizeOnDrop};

use Riskdesk::adapters::artifacts::{
    sha256_hex, unix_now, ModelManifest, MANIFEST_FILE, MANIFEST_VERSION, SIGNATURE_FILE,
};
use Riskdesk::Disease;

const KEY_FD_ENV: &str = "RISKDESK_MODEL_SIGNING_KEY_B64_FD";
const KEY_FILE_ENV: &str = "RISKDESK_MODEL_SIGNING_KEY_B64_FILE";
const KEY_ENV: &str = "RISKDESK_MODEL_SIGNING_KEY_B64";

#[derive(Zeroize, ZeroizeOnDrop)]
struct Seed([u8; 32]);

fn non_empty_secret(raw: &str) -> Result<Zeroizing<String>, String> {
    let secret = raw.trim_end_matches(['\n', '\r']).to_string();
    if secret.is_empty() {
        return Err("Empty signing key".to_string());
    }
    Ok(Zeroizing::new(secret))
}

fn read_signing_seed_b64() -> Result<Zeroizing<String>, String> {
    #[cfg(unix)]
    if let Ok(fd_str) = env::var(KEY_FD_ENV) {
        let fd: i32 = fd_str
            .trim()
            .parse()
            .map_err(|_| "Invalid key FD".to_string())?;
        if fd <= 2 {
            return Err("Refusing to read signing key from stdio FD".to_string());
        }
        // SAFETY: take ownership of FD for one-time secret read.
        let mut file = unsafe { std::fs::File::from_raw_fd(fd) };
        let mut buf = Zeroizing::new(String::new());
        use std::io::Read;
        file.read_to_string(&mut buf)
            .map_err(|e| format!("Failed reading signing key from FD: {e}"))?;
        return non_empty_secret(&buf);
    }

    if let Ok(path) = env::var(KEY_FILE_ENV) {
        let content = Zeroizing::new(
            fs::read_to_string(path.trim())
                .map_err(|e| format!("Failed reading signing key file: {e}"))?,
        );
        return non_empty_secret(&content);
    }

    // Dev-only fallback for convenience.
    if cfg!(debug_assertions) {
        if let Ok(v) = env::var(KEY_ENV) {
            return non_empty_secret(&Zeroizing::new(v));
        }
    }

    Err(format!(
        "Missing signing key. Provide {KEY_FD_ENV} or {KEY_FILE_ENV} ({KEY_ENV} only in debug builds)."
    ))
}

fn read_signing_seed() -> Result<Seed, String> {
    let v = read_signing_seed_b64()?;

    let raw = Zeroizing::new(
        general_purpose::STANDARD
            .decode(v.trim())
            .map_err(|e| format!("Invalid base64 in signing key: {e}"))?,
    );

    let seed: [u8; 32] = raw.as_slice().try_into().map_err(|_| {
        format!(
            "Signing key seed must be 32 bytes after base64 decode (got {})",
            raw.len()
        )
    })?;
    Ok(Seed(seed))
}

fn usage() -> String {
    "Usage: sign_models <model_dir>".to_string()
}

fn parse_args() -> Result<PathBuf, String> {
    let mut model_dir: Option<PathBuf> = None;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => return Err(usage()),
            _ if model_dir.is_none() => model_dir = Some(PathBuf::from(arg)),
            _ => return Err(usage()),
        }
    }

    model_dir.ok_or_else(usage)
}

fn main() -> Result<(), String> {
    let model_dir = parse_args()?;
    if !model_dir.is_dir() {
        return Err(format!("{model_dir:?} is not a directory"));
    }

    let mut files: BTreeMap<String, String> = BTreeMap::new();
    for disease in Disease::ALL {
        let name = disease.artifact_file();
        let path = model_dir.join(&name);
        let bytes = fs::read(&path)
            .map_err(|e| format!("Missing {disease} artifact {path:?}: {e}"))?;
        files.insert(name, sha256_hex(&bytes));
    }

    let mut seed = read_signing_seed()?;
    let signing_key = SigningKey::from_bytes(&seed.0);
    let verifying_key = signing_key.verifying_key();

    let manifest = ModelManifest {
        version: MANIFEST_VERSION,
        created_at: Some(unix_now()),
        files,
    };
    let manifest_bytes = serde_json::to_vec_pretty(&manifest)
        .map_err(|e| format!("Failed to serialize {MANIFEST_FILE}: {e}"))?;

    let manifest_path = model_dir.join(MANIFEST_FILE);
    fs::write(&manifest_path, &manifest_bytes)
        .map_err(|e| format!("Failed to write {manifest_path:?}: {e}"))?;

    let sig: Signature = signing_key.sign(&manifest_bytes);
    let sig_path = model_dir.join(SIGNATURE_FILE);
    fs::write(&sig_path, sig.to_bytes())
        .map_err(|e| format!("Failed to write {sig_path:?}: {e}"))?;

    println!("Signed manifest: {manifest_path:?}");
    println!("Wrote signature: {sig_path:?}");
    println!(
        "RISKDESK_MODEL_PUBKEY_B64={}",
        general_purpose::STANDARD.encode(verifying_key.as_bytes())
    );

    // Best-effort: wipe seed from memory.
    seed.zeroize();

    Ok(())
}
