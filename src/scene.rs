use std::path::Path;

use anyhow::Context as _;
use serde_json::{Map, Value};

use crate::{
    element::ImageElement,
    embed::EmbeddedFile,
    error::{DecalError, DecalResult},
};

/// An Excalidraw-style scene document.
///
/// Only the two collections this tool writes into are modeled; every other
/// top-level field rides along in `extra` untouched. Pre-existing elements
/// are kept as raw JSON so a merge never reshapes them.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub elements: Vec<Value>,
    #[serde(default)]
    pub files: Map<String, Value>,
    #[serde(rename = "appState", default, skip_serializing_if = "Option::is_none")]
    pub app_state: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Scene {
    /// Parse the document at `path`. A missing `elements` or `files`
    /// collection deserializes as empty rather than failing, upgrading older
    /// or partial documents without touching present data.
    pub fn load(path: &Path) -> DecalResult<Self> {
        if !path.is_file() {
            return Err(DecalError::not_found(format!(
                "scene file not found: {}",
                path.display()
            )));
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read scene '{}'", path.display()))?;
        serde_json::from_str(&text).map_err(|e| {
            DecalError::parse(format!("scene '{}' is not valid JSON: {e}", path.display()))
        })
    }

    /// Serialize the whole document pretty-printed and overwrite `path`.
    pub fn save(&self, path: &Path) -> DecalResult<()> {
        let text = serde_json::to_string_pretty(self).context("serialize scene")?;
        std::fs::write(path, text).with_context(|| format!("write scene '{}'", path.display()))?;
        Ok(())
    }

    /// Merge one embedded file and its referencing element into the scene.
    ///
    /// The file record is keyed by its content hash, so re-inserting the same
    /// image overwrites an identical prior entry. The element is appended;
    /// existing elements are never reordered or removed.
    pub fn insert_image(&mut self, file: &EmbeddedFile, element: &ImageElement) -> DecalResult<()> {
        let file_value = serde_json::to_value(file).context("serialize embedded file record")?;
        let element_value = serde_json::to_value(element).context("serialize image element")?;

        self.files.insert(file.id.clone(), file_value);
        self.elements.push(element_value);
        self.apply_app_state_default();
        Ok(())
    }

    // Legacy compatibility: editors expect `currentItemFontFamily` to be set
    // once an `appState` exists. Only fills the field when absent or null.
    fn apply_app_state_default(&mut self) {
        if let Some(Value::Object(state)) = self.app_state.as_mut() {
            let slot = state
                .entry("currentItemFontFamily".to_string())
                .or_insert(Value::Null);
            if slot.is_null() {
                *slot = Value::from(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::element::Placement;

    fn sample_file() -> EmbeddedFile {
        EmbeddedFile::from_bytes(b"0123456789", 1_700_000_000_000)
    }

    fn sample_element(file_id: &str) -> ImageElement {
        let mut rng = StdRng::seed_from_u64(3);
        ImageElement::new(file_id, Placement::default(), 1_700_000_000_000, &mut rng)
    }

    #[test]
    fn missing_collections_deserialize_as_empty() {
        let scene: Scene = serde_json::from_str(r#"{"type":"excalidraw","version":2}"#).unwrap();
        assert!(scene.elements.is_empty());
        assert!(scene.files.is_empty());
        assert!(scene.app_state.is_none());
        assert_eq!(scene.extra["type"], "excalidraw");
    }

    #[test]
    fn insert_appends_element_and_keys_file_by_hash() {
        let mut scene = Scene::default();
        let file = sample_file();
        let element = sample_element(&file.id);
        scene.insert_image(&file, &element).unwrap();

        assert_eq!(scene.elements.len(), 1);
        assert_eq!(scene.files.len(), 1);
        let stored = &scene.files[&file.id];
        assert_eq!(stored["id"], file.id.as_str());
        assert_eq!(scene.elements[0]["fileId"], file.id.as_str());
    }

    #[test]
    fn reinsert_of_same_content_overwrites_file_entry() {
        let mut scene = Scene::default();
        let file = sample_file();
        scene.insert_image(&file, &sample_element(&file.id)).unwrap();
        scene.insert_image(&file, &sample_element(&file.id)).unwrap();

        assert_eq!(scene.elements.len(), 2);
        assert_eq!(scene.files.len(), 1);
    }

    #[test]
    fn existing_elements_keep_their_order_and_shape() {
        let mut scene: Scene = serde_json::from_str(
            r#"{"elements":[{"type":"rectangle","id":"r1","custom":42},{"type":"arrow","id":"a1"}],"files":{}}"#,
        )
        .unwrap();
        let file = sample_file();
        scene.insert_image(&file, &sample_element(&file.id)).unwrap();

        assert_eq!(scene.elements.len(), 3);
        assert_eq!(scene.elements[0]["id"], "r1");
        assert_eq!(scene.elements[0]["custom"], 42);
        assert_eq!(scene.elements[1]["id"], "a1");
        assert_eq!(scene.elements[2]["type"], "image");
    }

    #[test]
    fn unrelated_top_level_fields_round_trip() {
        let input = r#"{"type":"excalidraw","version":2,"source":"https://example.test","elements":[],"files":{}}"#;
        let mut scene: Scene = serde_json::from_str(input).unwrap();
        let file = sample_file();
        scene.insert_image(&file, &sample_element(&file.id)).unwrap();

        let out = serde_json::to_value(&scene).unwrap();
        assert_eq!(out["type"], "excalidraw");
        assert_eq!(out["version"], 2);
        assert_eq!(out["source"], "https://example.test");
    }

    #[test]
    fn app_state_default_fills_only_unset_field() {
        let mut scene: Scene =
            serde_json::from_str(r##"{"appState":{"viewBackgroundColor":"#fff"}}"##).unwrap();
        scene.apply_app_state_default();
        let state = scene.app_state.as_ref().unwrap();
        assert_eq!(state["currentItemFontFamily"], 1);
        assert_eq!(state["viewBackgroundColor"], "#fff");

        let mut scene: Scene =
            serde_json::from_str(r#"{"appState":{"currentItemFontFamily":3}}"#).unwrap();
        scene.apply_app_state_default();
        assert_eq!(scene.app_state.as_ref().unwrap()["currentItemFontFamily"], 3);
    }

    #[test]
    fn absent_app_state_stays_absent() {
        let mut scene: Scene = serde_json::from_str(r#"{"elements":[],"files":{}}"#).unwrap();
        scene.apply_app_state_default();
        let out = serde_json::to_value(&scene).unwrap();
        assert!(out.get("appState").is_none());
    }
}
