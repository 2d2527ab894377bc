//! Decal embeds PNG images into Excalidraw-style scene documents.
//!
//! The pipeline is a single linear pass: encode the image bytes into a
//! content-addressed [`EmbeddedFile`], synthesize an [`ImageElement`] that
//! references it, and merge both into the target [`Scene`], which is
//! rewritten in place.

#![forbid(unsafe_code)]

pub mod append;
pub mod element;
pub mod embed;
pub mod error;
pub mod ids;
pub mod scene;

pub use append::{AppendOutcome, append_image, append_image_with, resolve_image_path};
pub use element::{ImageElement, Placement};
pub use embed::{EmbeddedFile, IMAGE_PNG_MIME, unix_millis};
pub use error::{DecalError, DecalResult};
pub use scene::Scene;
