//! Static magic-byte table for content-signature detection

/// One content signature: fixed bytes at a fixed offset
pub(crate) struct FileSignature {
    pub magic: &'static [u8],
    pub offset: usize,
    pub mime: &'static str,
    pub description: &'static str,
}

pub(crate) static SIGNATURES: &[FileSignature] = &[
    FileSignature {
        magic: b"%PDF-",
        offset: 0,
        mime: "application/pdf",
        description: "PDF header",
    },
    FileSignature {
        magic: &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A],
        offset: 0,
        mime: "image/png",
        description: "PNG header",
    },
    FileSignature {
        magic: &[0xFF, 0xD8, 0xFF],
        offset: 0,
        mime: "image/jpeg",
        description: "JPEG SOI marker",
    },
    FileSignature {
        magic: b"GIF87a",
        offset: 0,
        mime: "image/gif",
        description: "GIF87a header",
    },
    FileSignature {
        magic: b"GIF89a",
        offset: 0,
        mime: "image/gif",
        description: "GIF89a header",
    },
    FileSignature {
        magic: b"BM",
        offset: 0,
        mime: "image/bmp",
        description: "BMP header",
    },
    FileSignature {
        magic: b"PK\x03\x04",
        offset: 0,
        mime: "application/zip",
        description: "ZIP local file header",
    },
    FileSignature {
        magic: &[0x1F, 0x8B],
        offset: 0,
        mime: "application/gzip",
        description: "gzip header",
    },
    FileSignature {
        magic: b"BZh",
        offset: 0,
        mime: "application/x-bzip2",
        description: "bzip2 header",
    },
    FileSignature {
        magic: &[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C],
        offset: 0,
        mime: "application/x-7z-compressed",
        description: "7-Zip header",
    },
    FileSignature {
        magic: b"Rar!\x1A\x07",
        offset: 0,
        mime: "application/x-rar-compressed",
        description: "RAR header",
    },
    FileSignature {
        magic: &[0x7F, 0x45, 0x4C, 0x46],
        offset: 0,
        mime: "application/x-executable",
        description: "ELF header",
    },
    FileSignature {
        magic: b"%!PS",
        offset: 0,
        mime: "application/postscript",
        description: "PostScript header",
    },
    FileSignature {
        magic: b"<?xml",
        offset: 0,
        mime: "application/xml",
        description: "XML declaration",
    },
    FileSignature {
        magic: b"{\\rtf",
        offset: 0,
        mime: "application/rtf",
        description: "RTF header",
    },
    FileSignature {
        magic: b"OggS",
        offset: 0,
        mime: "application/ogg",
        description: "Ogg container",
    },
    FileSignature {
        magic: b"fLaC",
        offset: 0,
        mime: "audio/flac",
        description: "FLAC stream marker",
    },
    FileSignature {
        magic: b"ID3",
        offset: 0,
        mime: "audio/mpeg",
        description: "MP3 ID3 tag",
    },
    FileSignature {
        magic: b"\0asm",
        offset: 0,
        mime: "application/wasm",
        description: "WebAssembly module",
    },
    FileSignature {
        magic: b"ustar",
        offset: 257,
        mime: "application/x-tar",
        description: "tar ustar magic",
    },
    FileSignature {
        magic: b"ftyp",
        offset: 4,
        mime: "video/mp4",
        description: "ISO media file type box",
    },
];

/// Matches the sampled head of the file against the signature table.
/// RIFF containers carry their real type at offset 8 and are resolved
/// separately.
pub(crate) fn match_signature(sample: &[u8]) -> Option<&'static FileSignature> {
    if sample.starts_with(b"RIFF") && sample.len() >= 12 {
        return match &sample[8..12] {
            b"WAVE" => Some(&RIFF_WAVE),
            b"WEBP" => Some(&RIFF_WEBP),
            b"AVI " => Some(&RIFF_AVI),
            _ => None,
        };
    }
    SIGNATURES.iter().find(|sig| {
        sample.len() >= sig.offset + sig.magic.len()
            && &sample[sig.offset..sig.offset + sig.magic.len()] == sig.magic
    })
}

static RIFF_WAVE: FileSignature = FileSignature {
    magic: b"WAVE",
    offset: 8,
    mime: "audio/wav",
    description: "RIFF WAVE container",
};

static RIFF_WEBP: FileSignature = FileSignature {
    magic: b"WEBP",
    offset: 8,
    mime: "image/webp",
    description: "RIFF WebP container",
};

static RIFF_AVI: FileSignature = FileSignature {
    magic: b"AVI ",
    offset: 8,
    mime: "video/x-msvideo",
    description: "RIFF AVI container",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_header_matches() {
        let sig = match_signature(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n").unwrap();
        assert_eq!(sig.mime, "application/pdf");
    }

    #[test]
    fn riff_wave_resolves_past_the_container() {
        let mut sample = b"RIFF".to_vec();
        sample.extend_from_slice(&[0x24, 0x00, 0x00, 0x00]);
        sample.extend_from_slice(b"WAVEfmt ");
        let sig = match_signature(&sample).unwrap();
        assert_eq!(sig.mime, "audio/wav");
    }

    #[test]
    fn unrecognized_bytes_do_not_match() {
        assert!(match_signature(b"test").is_none());
        assert!(match_signature(b"").is_none());
    }
}
