//! Static extension-to-MIME table for filename-based detection

use std::collections::HashMap;

use lazy_static::lazy_static;

lazy_static! {
    static ref EXTENSION_MIME: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("txt", "text/plain");
        m.insert("text", "text/plain");
        m.insert("md", "text/markdown");
        m.insert("csv", "text/csv");
        m.insert("tsv", "text/tab-separated-values");
        m.insert("html", "text/html");
        m.insert("htm", "text/html");
        m.insert("css", "text/css");
        m.insert("js", "text/javascript");
        m.insert("json", "application/json");
        m.insert("xml", "application/xml");
        m.insert("yaml", "application/yaml");
        m.insert("yml", "application/yaml");
        m.insert("pdf", "application/pdf");
        m.insert("rtf", "application/rtf");
        m.insert("ps", "application/postscript");
        m.insert("png", "image/png");
        m.insert("jpg", "image/jpeg");
        m.insert("jpeg", "image/jpeg");
        m.insert("gif", "image/gif");
        m.insert("bmp", "image/bmp");
        m.insert("tif", "image/tiff");
        m.insert("tiff", "image/tiff");
        m.insert("svg", "image/svg+xml");
        m.insert("webp", "image/webp");
        m.insert("ico", "image/vnd.microsoft.icon");
        m.insert("zip", "application/zip");
        m.insert("gz", "application/gzip");
        m.insert("tar", "application/x-tar");
        m.insert("bz2", "application/x-bzip2");
        m.insert("7z", "application/x-7z-compressed");
        m.insert("rar", "application/x-rar-compressed");
        m.insert("mp3", "audio/mpeg");
        m.insert("wav", "audio/wav");
        m.insert("flac", "audio/flac");
        m.insert("ogg", "application/ogg");
        m.insert("mp4", "video/mp4");
        m.insert("mov", "video/quicktime");
        m.insert("avi", "video/x-msvideo");
        m.insert("webm", "video/webm");
        m.insert("doc", "application/msword");
        m.insert("docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document");
        m.insert("xls", "application/vnd.ms-excel");
        m.insert("xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet");
        m.insert("ppt", "application/vnd.ms-powerpoint");
        m.insert("pptx", "application/vnd.openxmlformats-officedocument.presentationml.presentation");
        m.insert("bin", "application/octet-stream");
        m.insert("wasm", "application/wasm");
        m
    };
}

/// Maps a filename to a MIME type by its extension.
///
/// Returns `None` for names without an extension (including dotfiles
/// like `.bashrc`) and for unrecognized extensions; case-folds before
/// the lookup.
pub(crate) fn mime_for_name(name: &str) -> Option<&'static str> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    EXTENSION_MIME.get(ext.to_ascii_lowercase().as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_map() {
        assert_eq!(mime_for_name("test.txt"), Some("text/plain"));
        assert_eq!(mime_for_name("archive.tar"), Some("application/x-tar"));
        assert_eq!(mime_for_name("photo.JPEG"), Some("image/jpeg"));
    }

    #[test]
    fn missing_or_unknown_extensions_miss() {
        assert_eq!(mime_for_name("README"), None);
        assert_eq!(mime_for_name(".bashrc"), None);
        assert_eq!(mime_for_name("data.xyzzy"), None);
        assert_eq!(mime_for_name("trailing."), None);
    }
}
