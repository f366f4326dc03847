//! Serving downloaded game files to the main window in offline mode.
//!
//! The files are exposed under the `game` URI scheme instead of `file://` so the page
//! has a stable origin the IPC capability can grant.

use std::fs;
use std::path::{Component, Path, PathBuf};

use percent_encoding::percent_decode_str;

use crate::config::GAME_ENTRY_FILE;
use crate::error::{Result, ShellError};

pub const GAME_SCHEME: &str = "game";

/// Origin the webview uses for [`GAME_SCHEME`]. Windows serves custom schemes as
/// `http://<scheme>.localhost`.
#[cfg(windows)]
pub const GAME_ORIGIN: &str = "http://game.localhost";
#[cfg(not(windows))]
pub const GAME_ORIGIN: &str = "game://localhost";

/// URL for a file inside the game directory.
pub fn local_url(game_dir: &Path, entry: &Path) -> Result<String> {
    let relative = entry.strip_prefix(game_dir).map_err(|_| {
        let reason = format!("{} is outside {}", entry.display(), game_dir.display());
        ShellError::Window(reason)
    })?;

    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(format!("{}/{}", GAME_ORIGIN, segments.join("/")))
}

/// Maps a request path onto a file below `game_dir`. Paths that would leave the
/// directory are rejected.
pub fn resolve(game_dir: &Path, request_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(request_path).decode_utf8().ok()?;
    let mut resolved = game_dir.to_path_buf();
    let mut depth = 0;

    for segment in decoded.split('/').filter(|s| !s.is_empty()) {
        if segment.contains('\\') {
            return None;
        }
        match Path::new(segment).components().next() {
            Some(Component::Normal(part)) => resolved.push(part),
            Some(Component::CurDir) => continue,
            _ => return None,
        }
        depth += 1;
    }

    if depth == 0 {
        resolved.push(GAME_ENTRY_FILE);
    }
    Some(resolved)
}

/// Reads a requested file and its content type.
pub fn read(game_dir: &Path, request_path: &str) -> Result<(Vec<u8>, &'static str)> {
    let path = resolve(game_dir, request_path)
        .ok_or_else(|| ShellError::Window(format!("rejected game path {}", request_path)))?;
    let bytes = fs::read(&path)?;
    Ok((bytes, content_type(&path)))
}

pub fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "html" | "htm" => "text/html",
        "js" | "mjs" => "text/javascript",
        "css" => "text/css",
        "json" | "map" => "application/json",
        "wasm" => "application/wasm",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "mp3" => "audio/mpeg",
        "ogg" => "audio/ogg",
        "wav" => "audio/wav",
        "m4a" => "audio/mp4",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_nested_and_encoded_paths() {
        let dir = Path::new("/games/pokerogue");
        assert_eq!(
            resolve(dir, "/images/pokemon/icons/1.png"),
            Some(dir.join("images").join("pokemon").join("icons").join("1.png"))
        );
        assert_eq!(
            resolve(dir, "/audio/bgm/title%20screen.mp3"),
            Some(dir.join("audio").join("bgm").join("title screen.mp3"))
        );
        assert_eq!(resolve(dir, "/./index.html"), Some(dir.join("index.html")));
    }

    #[test]
    fn root_serves_entry_file() {
        let dir = Path::new("/games/pokerogue");
        assert_eq!(resolve(dir, "/"), Some(dir.join(GAME_ENTRY_FILE)));
        assert_eq!(resolve(dir, ""), Some(dir.join(GAME_ENTRY_FILE)));
    }

    #[test]
    fn traversal_is_rejected() {
        let dir = Path::new("/games/pokerogue");
        assert_eq!(resolve(dir, "/../settings.json"), None);
        assert_eq!(resolve(dir, "/images/%2E%2E/%2E%2E/secret"), None);
        assert_eq!(resolve(dir, "/images/..%5C..%5Csecret"), None);
    }

    #[test]
    fn reads_file_with_content_type() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<html></html>").unwrap();

        let (bytes, mime) = read(dir.path(), "/").unwrap();
        assert_eq!(bytes, b"<html></html>");
        assert_eq!(mime, "text/html");

        assert!(read(dir.path(), "/missing.js").is_err());
    }

    #[test]
    fn content_types_by_extension() {
        assert_eq!(content_type(Path::new("a/b.JS")), "text/javascript");
        assert_eq!(content_type(Path::new("sprite.png")), "image/png");
        assert_eq!(content_type(Path::new("LICENSE")), "application/octet-stream");
    }

    #[test]
    fn local_url_points_into_game_origin() {
        let dir = Path::new("/games/pokerogue");
        assert_eq!(
            local_url(dir, &dir.join("index.html")).unwrap(),
            format!("{}/index.html", GAME_ORIGIN)
        );
        assert!(local_url(dir, Path::new("/elsewhere/index.html")).is_err());
    }
}
