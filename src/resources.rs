//! Static resource loading with graceful fallbacks
//!
//! Text panels and the scheme-definition file. A missing resource is
//! never fatal: text degrades to a placeholder, schemes degrade to the
//! built-in list.

use crate::scheme::{LoadPolicy, SchemeLibrary};

/// Placeholder shown in place of a missing text resource
pub fn missing_text(name: &str) -> String {
    format!("{name} not found")
}

fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Turn scheme-file contents (or its absence) into a library.
///
/// Malformed entries are skipped; a file that yields nothing usable is
/// treated like a missing file and the built-in trio takes over.
pub fn schemes_from_contents(contents: Option<&str>, origin: &str) -> SchemeLibrary {
    match contents {
        None => {
            log::info!("no scheme file at {origin}, using built-in schemes");
            SchemeLibrary::builtin()
        }
        Some(text) => match SchemeLibrary::from_json(text, LoadPolicy::SkipMalformed) {
            Ok(library) => {
                log::info!("loaded {} schemes from {origin}", library.len());
                library
            }
            Err(err) => {
                log::error!("scheme file {origin} unusable ({err}), using built-in schemes");
                SchemeLibrary::builtin()
            }
        },
    }
}

/// Read a text resource from disk
#[cfg(not(target_arch = "wasm32"))]
pub fn load_text(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            log::warn!("text resource {path}: {err}");
            missing_text(basename(path))
        }
    }
}

/// Load the scheme-definition file from disk
#[cfg(not(target_arch = "wasm32"))]
pub fn load_schemes(path: &str) -> SchemeLibrary {
    schemes_from_contents(std::fs::read_to_string(path).ok().as_deref(), path)
}

/// Fetch a text resource over HTTP
#[cfg(target_arch = "wasm32")]
pub async fn fetch_text(url: &str) -> String {
    match try_fetch(url).await {
        Some(text) => text,
        None => {
            log::warn!("text resource {url} missing");
            missing_text(basename(url))
        }
    }
}

/// Fetch the scheme-definition file over HTTP
#[cfg(target_arch = "wasm32")]
pub async fn fetch_schemes(url: &str) -> SchemeLibrary {
    schemes_from_contents(try_fetch(url).await.as_deref(), url)
}

#[cfg(target_arch = "wasm32")]
async fn try_fetch(url: &str) -> Option<String> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window()?;
    let response = JsFuture::from(window.fetch_with_str(url)).await.ok()?;
    let response: web_sys::Response = response.dyn_into().ok()?;
    if !response.ok() {
        return None;
    }
    let text = JsFuture::from(response.text().ok()?).await.ok()?;
    text.as_string()
}
