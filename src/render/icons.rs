use std::collections::HashMap;
use std::path::Path;

use futures_util::future::join_all;

use crate::jobs::JobInfo;

const ICON_EXTENSIONS: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("webp", "image/webp"),
    ("jpg", "image/jpeg"),
];

pub(crate) struct IconData {
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Fetch all selected job icons concurrently, keyed by `name_en`.
///
/// Icons are best-effort: a missing or unreadable icon is skipped and never
/// fails the batch, and one failure never cancels the sibling fetches.
pub(crate) async fn load_job_icons(
    icons_dir: &Path,
    jobs: &[JobInfo],
) -> HashMap<String, IconData> {
    let fetches = jobs.iter().map(|job| async move {
        for &(extension, mime) in ICON_EXTENSIONS {
            let path = icons_dir.join(format!("{}.{}", job.name_en, extension));
            match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    return Some((job.name_en.to_string(), IconData { mime, bytes }));
                }
                Err(err) => {
                    tracing::debug!("no icon at {}: {}", path.display(), err);
                }
            }
        }
        None
    });

    join_all(fetches).await.into_iter().flatten().collect()
}
