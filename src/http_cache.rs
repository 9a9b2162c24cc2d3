//! Conditional-GET cache for backend responses. Bodies are kept in one JSON
//! file under the XDG cache dir together with their validators; repeat
//! requests send `If-None-Match`/`If-Modified-Since` and a 304 serves the
//! stored body.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{ETAG, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED};
use serde::{Deserialize, Serialize};

const CACHE_VERSION: u32 = 1;
const CACHE_DIR: &str = "matchday_picks";
const CACHE_FILE: &str = "api_cache.json";

static CACHE: Mutex<Option<ApiCacheFile>> = Mutex::new(None);

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct ApiCacheFile {
    version: u32,
    entries: HashMap<String, CachedResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedResponse {
    body: String,
    etag: Option<String>,
    last_modified: Option<String>,
    fetched_at: u64,
}

pub fn fetch_json_cached(
    client: &Client,
    url: &str,
    extra_headers: &[(&str, &str)],
) -> Result<String> {
    let cached = lookup(url);

    let mut req = client.get(url);
    for (name, value) in extra_headers {
        req = req.header(*name, *value);
    }
    if let Some(entry) = cached.as_ref() {
        if let Some(etag) = entry.etag.as_ref() {
            req = req.header(IF_NONE_MATCH, etag);
        }
        if let Some(last_modified) = entry.last_modified.as_ref() {
            req = req.header(IF_MODIFIED_SINCE, last_modified);
        }
    }

    let resp = req.send().context("request failed")?;
    let status = resp.status();

    if status == StatusCode::NOT_MODIFIED {
        if let Some(entry) = cached {
            store(url, entry.clone());
            return Ok(entry.body);
        }
        return Err(anyhow::anyhow!("received 304 without cache body"));
    }

    let etag = header_string(&resp, ETAG);
    let last_modified = header_string(&resp, LAST_MODIFIED);
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {status}: {body}"));
    }

    store(
        url,
        CachedResponse {
            body: body.clone(),
            etag,
            last_modified,
            fetched_at: unix_seconds(),
        },
    );
    Ok(body)
}

fn header_string(resp: &reqwest::blocking::Response, name: reqwest::header::HeaderName) -> Option<String> {
    resp.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

fn lookup(url: &str) -> Option<CachedResponse> {
    let mut guard = CACHE.lock().expect("api cache lock poisoned");
    let cache = guard.get_or_insert_with(load_cache_file);
    cache.entries.get(url).cloned()
}

fn store(url: &str, entry: CachedResponse) {
    let mut guard = CACHE.lock().expect("api cache lock poisoned");
    let cache = guard.get_or_insert_with(load_cache_file);
    cache.version = CACHE_VERSION;
    cache.entries.insert(url.to_string(), entry);
    let _ = persist_cache_file(cache);
}

fn load_cache_file() -> ApiCacheFile {
    let Some(path) = cache_path() else {
        return ApiCacheFile::default();
    };
    let Ok(raw) = fs::read_to_string(path) else {
        return ApiCacheFile::default();
    };
    let cache = serde_json::from_str::<ApiCacheFile>(&raw).unwrap_or_default();
    if cache.version != CACHE_VERSION {
        return ApiCacheFile::default();
    }
    cache
}

fn persist_cache_file(cache: &ApiCacheFile) -> Result<()> {
    let Some(path) = cache_path() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).ok();
    }
    // Write-then-rename keeps a reader from seeing a half-written file.
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string(cache).context("serialize api cache")?;
    fs::write(&tmp, json).context("write api cache")?;
    fs::rename(&tmp, &path).context("swap api cache")?;
    Ok(())
}

fn cache_path() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("XDG_CACHE_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(CACHE_DIR).join(CACHE_FILE));
        }
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".cache")
            .join(CACHE_DIR)
            .join(CACHE_FILE),
    )
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
