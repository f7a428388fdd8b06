//! Scene composition: placed props, reference images, and background.
//!
//! Records are kept in insertion order and addressed by their `id`. The store
//! does not enforce id uniqueness: adding a record whose id is already in use
//! appends a second record. Updates and lookups act on the first record with
//! a given id; removal drops every record with it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::lenient;
use crate::math::{clamp, Vec3};

/// Background color after construction.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#1a1a1a";
/// Background opacity after construction.
pub const DEFAULT_BACKGROUND_OPACITY: f32 = 1.0;

fn visible_by_default() -> bool {
    true
}

fn unit_scale() -> f32 {
    1.0
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// A placed scene object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prop {
    /// External identity.
    pub id: String,
    /// Display name or asset name.
    pub name: String,
    /// World position.
    #[serde(default)]
    pub position: Vec3,
    /// Euler rotation in degrees.
    #[serde(default)]
    pub rotation: Vec3,
    /// Uniform scale.
    #[serde(default = "unit_scale")]
    pub scale: f32,
    /// Whether the prop is rendered.
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

impl Prop {
    /// Create a visible prop at the origin with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
            visible: true,
        }
    }
}

/// An image placed in the scene for the artist to pose against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceImage {
    /// External identity.
    pub id: String,
    /// Image location.
    pub url: String,
    /// World position.
    #[serde(default)]
    pub position: Vec3,
    /// Uniform scale.
    #[serde(default = "unit_scale")]
    pub scale: f32,
    /// Opacity in `[0, 1]`.
    #[serde(default = "unit_scale")]
    pub opacity: f32,
    /// Whether the image is rendered.
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

impl ReferenceImage {
    /// Create a fully opaque, visible image at the origin with a fresh id.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            url: url.into(),
            position: Vec3::ZERO,
            scale: 1.0,
            opacity: 1.0,
            visible: true,
        }
    }
}

/// Partial update for a [`Prop`]; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropUpdate {
    /// New name.
    pub name: Option<String>,
    /// New position.
    pub position: Option<Vec3>,
    /// New rotation.
    pub rotation: Option<Vec3>,
    /// New scale.
    pub scale: Option<f32>,
    /// New visibility.
    pub visible: Option<bool>,
}

impl PropUpdate {
    fn apply_to(self, prop: &mut Prop) {
        if let Some(name) = self.name {
            prop.name = name;
        }
        if let Some(position) = self.position {
            prop.position = position;
        }
        if let Some(rotation) = self.rotation {
            prop.rotation = rotation;
        }
        if let Some(scale) = self.scale {
            prop.scale = scale;
        }
        if let Some(visible) = self.visible {
            prop.visible = visible;
        }
    }
}

/// Partial update for a [`ReferenceImage`]; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceImageUpdate {
    /// New image location.
    pub url: Option<String>,
    /// New position.
    pub position: Option<Vec3>,
    /// New scale.
    pub scale: Option<f32>,
    /// New opacity.
    pub opacity: Option<f32>,
    /// New visibility.
    pub visible: Option<bool>,
}

impl ReferenceImageUpdate {
    fn apply_to(self, image: &mut ReferenceImage) {
        if let Some(url) = self.url {
            image.url = url;
        }
        if let Some(position) = self.position {
            image.position = position;
        }
        if let Some(scale) = self.scale {
            image.scale = scale;
        }
        if let Some(opacity) = self.opacity {
            image.opacity = opacity;
        }
        if let Some(visible) = self.visible {
            image.visible = visible;
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SceneDocument<'a> {
    props: &'a [Prop],
    reference_images: &'a [ReferenceImage],
    background_color: &'a str,
    background_opacity: f32,
    active_model_id: Option<&'a str>,
}

/// Props, reference images, background, and the active model.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneStore {
    props: Vec<Prop>,
    reference_images: Vec<ReferenceImage>,
    background_color: String,
    background_opacity: f32,
    active_model_id: Option<String>,
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneStore {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self {
            props: Vec::new(),
            reference_images: Vec::new(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            background_opacity: DEFAULT_BACKGROUND_OPACITY,
            active_model_id: None,
        }
    }

    /// Props in insertion order.
    #[must_use]
    pub fn props(&self) -> &[Prop] {
        &self.props
    }

    /// Reference images in insertion order.
    #[must_use]
    pub fn reference_images(&self) -> &[ReferenceImage] {
        &self.reference_images
    }

    /// Background color (CSS-style string).
    #[must_use]
    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    /// Background opacity in `[0, 1]`.
    #[must_use]
    pub fn background_opacity(&self) -> f32 {
        self.background_opacity
    }

    /// Identifier of the model being posed.
    #[must_use]
    pub fn active_model_id(&self) -> Option<&str> {
        self.active_model_id.as_deref()
    }

    /// Append a prop. Ids are not checked for uniqueness.
    pub fn add_prop(&mut self, prop: Prop) {
        tracing::debug!("Adding prop {} ({})", prop.name, prop.id);
        self.props.push(prop);
    }

    /// Merge `update` into the first prop with `id`. Returns whether one
    /// was found.
    pub fn update_prop(&mut self, id: &str, update: PropUpdate) -> bool {
        match self.props.iter_mut().find(|p| p.id == id) {
            Some(prop) => {
                update.apply_to(prop);
                true
            }
            None => {
                tracing::debug!("No prop with id {id} to update");
                false
            }
        }
    }

    /// Remove every prop with `id`, returning how many were removed.
    pub fn remove_prop(&mut self, id: &str) -> usize {
        let before = self.props.len();
        self.props.retain(|p| p.id != id);
        before - self.props.len()
    }

    /// First prop with `id`.
    #[must_use]
    pub fn get_prop(&self, id: &str) -> Option<&Prop> {
        self.props.iter().find(|p| p.id == id)
    }

    /// Append a reference image. Ids are not checked for uniqueness.
    pub fn add_reference_image(&mut self, image: ReferenceImage) {
        tracing::debug!("Adding reference image {} ({})", image.url, image.id);
        self.reference_images.push(image);
    }

    /// Merge `update` into the first reference image with `id`. Returns
    /// whether one was found.
    pub fn update_reference_image(&mut self, id: &str, update: ReferenceImageUpdate) -> bool {
        match self.reference_images.iter_mut().find(|i| i.id == id) {
            Some(image) => {
                update.apply_to(image);
                true
            }
            None => {
                tracing::debug!("No reference image with id {id} to update");
                false
            }
        }
    }

    /// Remove every reference image with `id`, returning how many were
    /// removed.
    pub fn remove_reference_image(&mut self, id: &str) -> usize {
        let before = self.reference_images.len();
        self.reference_images.retain(|i| i.id != id);
        before - self.reference_images.len()
    }

    /// First reference image with `id`.
    #[must_use]
    pub fn get_reference_image(&self, id: &str) -> Option<&ReferenceImage> {
        self.reference_images.iter().find(|i| i.id == id)
    }

    /// Set or clear the active model.
    pub fn set_active_model(&mut self, model_id: Option<String>) {
        self.active_model_id = model_id;
    }

    /// Change the background color.
    pub fn set_background_color(&mut self, color: impl Into<String>) {
        self.background_color = color.into();
    }

    /// Change the background opacity, clamped to `[0, 1]`.
    ///
    /// NaN is ignored.
    pub fn set_background_opacity(&mut self, opacity: f32) {
        if opacity.is_nan() {
            tracing::warn!("Ignoring NaN background opacity");
            return;
        }
        self.background_opacity = clamp(opacity, 0.0, 1.0);
    }

    /// Remove all props and reference images and clear the active model.
    ///
    /// The background is kept.
    pub fn clear_scene(&mut self) {
        self.props.clear();
        self.reference_images.clear();
        self.active_model_id = None;
        tracing::debug!("Scene cleared");
    }

    /// Serialize the scene to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> EngineResult<String> {
        let doc = SceneDocument {
            props: &self.props,
            reference_images: &self.reference_images,
            background_color: &self.background_color,
            background_opacity: self.background_opacity,
            active_model_id: self.active_model_id.as_deref(),
        };
        Ok(serde_json::to_string(&doc)?)
    }

    /// Replace the scene from JSON produced by [`Self::to_json`].
    ///
    /// Never fails; invalid records are dropped and missing fields take
    /// their defaults.
    pub fn load_json(&mut self, json: &str) {
        *self = Self::new();
        let Some(doc) = lenient::parse_document(json, "scene") else {
            return;
        };

        self.props = lenient::list(&doc, "props");
        self.reference_images = lenient::list(&doc, "referenceImages");
        self.background_color =
            lenient::field(&doc, "backgroundColor", || DEFAULT_BACKGROUND_COLOR.to_string());
        self.set_background_opacity(lenient::field(&doc, "backgroundOpacity", || {
            DEFAULT_BACKGROUND_OPACITY
        }));
        self.active_model_id = lenient::field(&doc, "activeModelId", || None);
    }
}
