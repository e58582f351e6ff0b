//! Best-effort item asset loading
//!
//! All reads are issued concurrently and awaited together. A missing or
//! unreadable asset degrades to `None` for that entry - the batch itself
//! never fails, because a catalogue with a few placeholder images is better
//! than no catalogue at all.

use std::path::PathBuf;

use image::RgbaImage;
use tokio::task::JoinSet;

/// Load item images, one slot per input path
///
/// The output is positionally aligned with the input: entry `i` is the
/// decoded image for `paths[i]`, or `None` if the path was absent or the
/// read/decode failed.
pub async fn load_images(paths: &[Option<PathBuf>]) -> Vec<Option<RgbaImage>> {
    let mut join_set = JoinSet::new();

    for (index, path) in paths.iter().enumerate() {
        let path = path.clone();
        join_set.spawn(async move {
            let Some(path) = path else {
                return (index, None);
            };
            (index, load_one(path).await)
        });
    }

    let mut images: Vec<Option<RgbaImage>> = vec![None; paths.len()];
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, image)) => images[index] = image,
            Err(e) => log::warn!("Asset load task failed: {}", e),
        }
    }
    images
}

async fn load_one(path: PathBuf) -> Option<RgbaImage> {
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("Failed to read asset {}: {}", path.display(), e);
            return None;
        }
    };

    let decoded =
        tokio::task::spawn_blocking(move || image::load_from_memory(&bytes)).await;
    match decoded {
        Ok(Ok(image)) => Some(image.to_rgba8()),
        Ok(Err(e)) => {
            log::warn!("Failed to decode asset {}: {}", path.display(), e);
            None
        }
        Err(e) => {
            log::warn!("Asset decode task failed for {}: {}", path.display(), e);
            None
        }
    }
}
