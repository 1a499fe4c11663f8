//! Media classification for uploaded evidence.
//!
//! Decides each item's ingestion path from its declared name and media type
//! alone. Pure function of two strings; byte inspection (UTF-8 probing for
//! text candidates) happens later in the processor, where the payload is in
//! hand.

use wealthsync_core::defaults;

/// Extensions handled as inline images.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Extensions handled via the provider's remote file ingestion.
const REMOTE_EXTENSIONS: &[&str] = &["pdf", "mp3", "wav", "m4a", "aac", "mp4", "mov"];

/// Ingestion path for one evidence item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaRoute {
    /// Pass the bytes inline to the model.
    InlineImage,
    /// Stage to a temp file and upload out-of-band; `suffix` includes the dot.
    RemoteFile { suffix: String },
    /// Attempt UTF-8 decoding; failure means the item is unsupported.
    TextCandidate,
}

/// Classify an item by filename and declared media type.
///
/// First match wins:
/// 1. image extension or `image/` type → [`MediaRoute::InlineImage`]
/// 2. pdf/audio/video extension or type → [`MediaRoute::RemoteFile`]
/// 3. everything else → [`MediaRoute::TextCandidate`]
///
/// Matching is case-insensitive on both inputs.
pub fn route(filename: &str, media_type: &str) -> MediaRoute {
    let ext = extension(filename);
    let media_type = media_type.to_ascii_lowercase();

    let image_by_ext = ext
        .as_deref()
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e));
    if image_by_ext || media_type.starts_with("image/") {
        return MediaRoute::InlineImage;
    }

    let remote_by_ext = ext
        .as_deref()
        .is_some_and(|e| REMOTE_EXTENSIONS.contains(&e));
    let remote_by_type = media_type == "application/pdf"
        || media_type.starts_with("audio/")
        || media_type.starts_with("video/");
    if remote_by_ext || remote_by_type {
        let suffix = match ext {
            Some(e) => format!(".{}", e),
            None => infer_suffix(&media_type).to_string(),
        };
        return MediaRoute::RemoteFile { suffix };
    }

    MediaRoute::TextCandidate
}

/// Staging suffix for an extensionless filename, from the declared type.
fn infer_suffix(media_type: &str) -> &'static str {
    if media_type.contains("pdf") {
        defaults::PDF_SUFFIX
    } else if media_type.contains("audio") {
        defaults::AUDIO_SUFFIX
    } else if media_type.contains("video") {
        defaults::VIDEO_SUFFIX
    } else {
        defaults::GENERIC_SUFFIX
    }
}

/// Lowercased filename extension, if any. A leading dot alone does not count.
fn extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_extensions_route_inline() {
        for name in ["photo.png", "scan.jpg", "board.jpeg", "BOARD.JPEG"] {
            assert_eq!(route(name, ""), MediaRoute::InlineImage, "{}", name);
        }
    }

    #[test]
    fn image_type_routes_inline_regardless_of_extension() {
        assert_eq!(route("upload.dat", "image/webp"), MediaRoute::InlineImage);
    }

    #[test]
    fn image_type_casing_is_ignored() {
        assert_eq!(route("upload.dat", "IMAGE/PNG"), MediaRoute::InlineImage);
        assert_eq!(route("scan.JPG", "Application/Octet-Stream"), MediaRoute::InlineImage);
    }

    #[test]
    fn image_wins_over_remote_when_both_match() {
        // declared audio type but .jpg extension — rule 1 fires first
        assert_eq!(route("cover.jpg", "audio/mpeg"), MediaRoute::InlineImage);
    }

    #[test]
    fn pdf_routes_remote_with_own_suffix() {
        assert_eq!(
            route("statement.pdf", ""),
            MediaRoute::RemoteFile {
                suffix: ".pdf".to_string()
            }
        );
        assert_eq!(
            route("statement", "application/pdf"),
            MediaRoute::RemoteFile {
                suffix: ".pdf".to_string()
            }
        );
    }

    #[test]
    fn audio_extensions_route_remote() {
        for (name, suffix) in [
            ("meeting.mp3", ".mp3"),
            ("meeting.wav", ".wav"),
            ("meeting.m4a", ".m4a"),
            ("meeting.aac", ".aac"),
        ] {
            assert_eq!(
                route(name, ""),
                MediaRoute::RemoteFile {
                    suffix: suffix.to_string()
                },
                "{}",
                name
            );
        }
    }

    #[test]
    fn video_extensions_route_remote() {
        for (name, suffix) in [("call.mp4", ".mp4"), ("call.mov", ".mov")] {
            assert_eq!(
                route(name, ""),
                MediaRoute::RemoteFile {
                    suffix: suffix.to_string()
                }
            );
        }
    }

    #[test]
    fn extensionless_audio_type_infers_audio_placeholder() {
        assert_eq!(
            route("recording", "audio/ogg"),
            MediaRoute::RemoteFile {
                suffix: ".mp3".to_string()
            }
        );
    }

    #[test]
    fn extensionless_video_type_infers_video_placeholder() {
        assert_eq!(
            route("capture", "video/webm"),
            MediaRoute::RemoteFile {
                suffix: ".mp4".to_string()
            }
        );
    }

    #[test]
    fn explicit_extension_beats_inferred_suffix() {
        // declared audio, but the filename carries its own extension
        assert_eq!(
            route("recording.ogg", "audio/ogg"),
            MediaRoute::RemoteFile {
                suffix: ".ogg".to_string()
            }
        );
    }

    #[test]
    fn unknown_inputs_are_text_candidates() {
        assert_eq!(route("notes.txt", "text/plain"), MediaRoute::TextCandidate);
        assert_eq!(route("data.csv", ""), MediaRoute::TextCandidate);
        assert_eq!(route("mystery", "application/octet-stream"), MediaRoute::TextCandidate);
    }

    #[test]
    fn dotfile_has_no_extension() {
        assert_eq!(route(".gitignore", ""), MediaRoute::TextCandidate);
    }
}
