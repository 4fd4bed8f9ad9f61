//! The `fetch_transcript` capability.
//!
//! Resolves a video id from a URL, gathers metadata and caption text,
//! persists a formatted transcript document into the workspace, and returns
//! a preview plus the saved path. Every failure mode comes back as
//! descriptive text.

use super::files::FileStore;
use super::video::{extract_video_id, VideoProvider};
use tracing::info;

/// Preview length for the returned snippet.
const PREVIEW_CHARS: usize = 500;

/// Fetch and persist a video transcript. Soft failure throughout: URL
/// validation, metadata errors, missing transcripts, and directory problems
/// all return text the requesting agent can read.
pub async fn fetch_transcript(
    provider: &dyn VideoProvider,
    files: &FileStore,
    video_url: &str,
    save_dir: Option<&str>,
) -> String {
    let Some(video_id) = extract_video_id(video_url) else {
        return format!("Error: '{}' is not a valid YouTube URL.", video_url);
    };

    let meta = match provider.fetch_metadata(&video_id).await {
        Ok(meta) => meta,
        Err(e) => {
            return format!("Metadata error: {}\n(Check the API key or quota.)", e);
        }
    };

    let transcript = match provider.fetch_captions(&video_id).await {
        Ok(text) => text,
        Err(e) => return format!("Transcript error: {}", e),
    };
    if transcript.trim().is_empty() {
        return format!("No transcript found for '{}'.", meta.title);
    }

    let directory = match files.ensure_dir(save_dir.unwrap_or("")) {
        Ok(dir) => dir,
        Err(e) => {
            return format!(
                "Error creating directory {}: {}",
                files.resolve(save_dir.unwrap_or("")).display(),
                e
            );
        }
    };

    let file_path = directory.join(format!("{}_transcript.md", video_id));
    let content = format!(
        "# {}\n\
         - **Channel**: {}\n\
         - **Views**: {}\n\
         - **Published**: {}\n\
         - **URL**: {}\n\n\
         ## Transcript\n\
         {}\n",
        meta.title, meta.channel, meta.view_count, meta.published_at, video_url, transcript
    );

    let write_result = files.write(&file_path.to_string_lossy(), &content);
    if !write_result.starts_with("Successfully") {
        return write_result;
    }

    info!("Saved transcript for {} to {}", video_id, file_path.display());

    let preview: String = content
        .chars()
        .take(PREVIEW_CHARS)
        .collect::<String>()
        .replace('\n', " ");

    format!(
        "[Transcript saved]\n\
         - **Video**: {}\n\
         - **Channel**: {}\n\
         - **Saved to**: '{}' (use 'read_file' to read the full text)\n\
         - **Preview**: {}..\n",
        meta.title,
        meta.channel,
        file_path.display(),
        preview
    )
}
