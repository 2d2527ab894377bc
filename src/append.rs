use std::path::{Path, PathBuf};

use rand::Rng;

use crate::{
    element::{ImageElement, Placement},
    embed::{self, EmbeddedFile},
    error::DecalResult,
    scene::Scene,
};

/// Conventional directory bare image names are resolved under.
pub const PNG_ASSETS_DIR: &str = "public/assets/pngs";

/// Summary of a completed append, also the CLI's JSON output.
#[derive(Clone, Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendOutcome {
    pub file_id: String,
    pub element_id: String,
    pub success: bool,
}

/// Append the PNG at `image_path` to the scene at `scene_path`, rewriting the
/// scene in place, and return the ids of the two new records.
pub fn append_image(
    image_path: &Path,
    scene_path: &Path,
    placement: Placement,
) -> DecalResult<AppendOutcome> {
    append_image_with(
        image_path,
        scene_path,
        placement,
        &mut rand::thread_rng(),
        embed::unix_millis(),
    )
}

/// Same pipeline with the randomness source and clock supplied by the caller.
///
/// The write is a whole-document overwrite with no lock against concurrent
/// writers; simultaneous merges of the same scene are last-writer-wins.
#[tracing::instrument(skip(rng))]
pub fn append_image_with(
    image_path: &Path,
    scene_path: &Path,
    placement: Placement,
    rng: &mut impl Rng,
    now_ms: u64,
) -> DecalResult<AppendOutcome> {
    placement.validate()?;

    tracing::debug!("encoding image");
    let file = EmbeddedFile::from_path(image_path, now_ms)?;
    let element = ImageElement::new(&file.id, placement, now_ms, rng);

    tracing::debug!("merging into scene");
    let mut scene = Scene::load(scene_path)?;
    scene.insert_image(&file, &element)?;
    scene.save(scene_path)?;

    tracing::info!(file_id = %file.id, element_id = %element.id, "appended image");
    Ok(AppendOutcome {
        file_id: file.id,
        element_id: element.id,
        success: true,
    })
}

/// Resolve a CLI-supplied image argument: paths that exist are taken
/// verbatim, anything else is looked up under [`PNG_ASSETS_DIR`].
pub fn resolve_image_path(arg: &Path) -> PathBuf {
    if arg.is_file() {
        arg.to_path_buf()
    } else {
        Path::new(PNG_ASSETS_DIR).join(arg)
    }
}
