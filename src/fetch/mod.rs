// src/fetch/mod.rs
//! Getting the register onto disk and opening it as a byte stream.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::{
    fs::{self, File},
    io::{BufReader, Read},
    path::{Path, PathBuf},
    thread::sleep,
    time::Duration,
};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Where Ofcom publishes the register.
pub const REGISTER_URL: &str =
    "http://static.ofcom.org.uk/static/radiolicensing/html/register/WTR.csv";

const MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF_MS: u64 = 500;

/// Blocking HTTP client with a timeout; the register is tens of megabytes.
pub fn client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(300))
        .user_agent(concat!("wtr/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("building HTTP client")
}

/// `Some(url)` when `source` is an http(s) URL rather than a path.
pub fn as_http_url(source: &str) -> Option<Url> {
    Url::parse(source)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https"))
}

/// File name a download of `url` is stored under.
pub fn file_name_for(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .unwrap_or("WTR.csv")
        .to_string()
}

/// Download `url` into `dest_dir`, keeping the URL's file name.
/// Returns the path written.
#[instrument(level = "info", skip(client, dest_dir), fields(dest = %dest_dir.as_ref().display()))]
pub fn download_register(client: &Client, url: &str, dest_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dest_dir = dest_dir.as_ref();
    let url = Url::parse(url).with_context(|| format!("parsing URL {}", url))?;
    let dest_path = dest_dir.join(file_name_for(&url));

    fs::create_dir_all(dest_dir).with_context(|| format!("creating {:?}", dest_dir))?;

    // write next to the target, then rename, so a failed download never looks complete
    let tmp_path = dest_dir.join(format!(".{}.part", file_name_for(&url)));
    let mut attempts = 0;
    loop {
        match fetch_to(client, &url, &tmp_path) {
            Ok(bytes) => {
                info!(%url, bytes, "downloaded register");
                break;
            }
            Err(e) if attempts < MAX_RETRIES => {
                attempts += 1;
                let backoff = INITIAL_BACKOFF_MS * 2u64.pow(attempts - 1);
                warn!(%url, attempt = attempts, delay_ms = backoff, error = %e, "Retrying");
                sleep(Duration::from_millis(backoff));
            }
            Err(e) => {
                let _ = fs::remove_file(&tmp_path);
                return Err(e);
            }
        }
    }

    commit(&tmp_path, &dest_path)?;
    Ok(dest_path)
}

/// Move a finished download into place. The partial file never outlives a failure.
fn commit(tmp_path: &Path, dest_path: &Path) -> Result<()> {
    if let Err(e) = fs::rename(tmp_path, dest_path) {
        let _ = fs::remove_file(tmp_path);
        return Err(e).with_context(|| format!("renaming {:?} -> {:?}", tmp_path, dest_path));
    }
    Ok(())
}

fn fetch_to(client: &Client, url: &Url, path: &Path) -> Result<u64> {
    let mut resp = client
        .get(url.clone())
        .send()
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Non-success status {}", url))?;
    let mut out = File::create(path).with_context(|| format!("creating {:?}", path))?;
    resp.copy_to(&mut out)
        .with_context(|| format!("reading body of {}", url))
}

/// Open the register named by `source`.
///
/// A local path is opened directly. An http(s) URL is downloaded into
/// `cache_dir` the first time and read from there afterwards.
pub fn open_source(source: &str, cache_dir: impl AsRef<Path>) -> Result<Box<dyn Read>> {
    let path = match as_http_url(source) {
        Some(url) => {
            let cached = cache_dir.as_ref().join(file_name_for(&url));
            if cached.is_file() {
                debug!(path = %cached.display(), "using cached register");
                cached
            } else {
                download_register(&client()?, source, cache_dir)?
            }
        }
        None => PathBuf::from(source),
    };

    let file = File::open(&path).with_context(|| format!("opening {:?}", path))?;
    Ok(Box::new(BufReader::new(file)))
}
