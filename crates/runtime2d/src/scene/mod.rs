//! Text scene codec: whole-level save and load.
//!
//! The format is line-oriented with a fixed field order and no version
//! field; this module and the component field I/O are together the
//! single source of truth, and reader and writer stay in lock-step
//! field for field.
//!
//! ```text
//! Level: <name>
//! Bounds: <minX>, <maxX>
//! Name: <object name>
//! Tag: <tag>
//! Layer: <layer>
//! Active: <0|1>
//! {
//! Component: <KindName>
//! <Key: value[, value...]> lines
//! }
//! ###
//! ```
//!
//! Objects on the `UI` visibility layer persist their transform
//! position/scale normalized to the configured reference resolution;
//! the codec rescales on load and back on save.

use crate::core::{Registries, UiConfig};
use crate::factory::parse::LineCursor;
use crate::factory::Factory;
use crate::level::Level;
use crate::object::components::Transform;
use crate::object::{Component, ComponentKind, GameObject, ParseError};
use log::info;
use std::path::Path;
use thiserror::Error;

/// Visibility layer whose objects persist normalized coordinates.
const UI_LAYER: &str = "UI";

/// Structural failure loading or saving a scene. One failed load never
/// takes the process down; the caller decides what a missing scene
/// means.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The file could not be read or written.
    #[error("scene io error: {0}")]
    Io(#[from] std::io::Error),

    /// A required header line was absent or unreadable.
    #[error("missing or unreadable '{0}' header line")]
    MissingHeader(&'static str),

    /// Record-level parse failure surfaced to the caller.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Serialize a whole level to scene text.
pub fn write_level(level: &Level, ui: &UiConfig) -> String {
    let mut out = String::new();
    let (min_x, max_x) = level.bounds();
    out.push_str(&format!("Level: {}\n", level.name()));
    out.push_str(&format!("Bounds: {min_x}, {max_x}\n"));

    for object in level.live_objects() {
        write_object(&mut out, object, ui);
    }
    out
}

fn write_object(out: &mut String, object: &GameObject, ui: &UiConfig) {
    out.push_str(&format!("Name: {}\n", object.name));
    out.push_str(&format!("Tag: {}\n", object.tag));
    out.push_str(&format!("Layer: {}\n", object.layer));
    out.push_str(&format!("Active: {}\n", u8::from(object.active_flag())));

    // Insertion order, so a reload rebuilds each object's component
    // list exactly as it was.
    for component in object.components() {
        if component.kind() == ComponentKind::Transform && object.layer == UI_LAYER {
            let mut normalized = component.clone();
            if let Component::Transform(transform) = &mut normalized {
                rescale(transform, 1.0 / ui.reference_width, 1.0 / ui.reference_height);
            }
            normalized.write_block(out);
        } else {
            component.write_block(out);
        }
    }
    out.push_str("###\n");
}

/// Parse a whole level from scene text. Broken records inside the file
/// are skipped with a log line; only an unreadable header fails the
/// load.
pub fn read_level(
    text: &str,
    factory: &mut Factory,
    registries: &mut Registries,
    ui: &UiConfig,
) -> Result<Level, SceneError> {
    let mut cursor = LineCursor::new(text);

    let name = cursor
        .expect_key("Level")
        .map_err(|_| SceneError::MissingHeader("Level"))?;
    let bounds_value = cursor
        .expect_key("Bounds")
        .map_err(|_| SceneError::MissingHeader("Bounds"))?;
    let bounds = parse_bounds(bounds_value).ok_or(SceneError::MissingHeader("Bounds"))?;

    // A load is an explicit new-level boundary for the id counter.
    factory.reset_ids();

    let mut level = Level::new(name, bounds);
    let keys = factory.parse_all(&mut cursor, &mut level, registries);

    for key in &keys {
        let Some(object) = level.object_mut(*key) else {
            continue;
        };
        if object.layer == UI_LAYER {
            if let Some(transform) = object.get_mut::<Transform>() {
                rescale(transform, ui.reference_width, ui.reference_height);
            }
        }
    }

    info!("loaded level '{}' with {} objects", level.name(), level.len());
    Ok(level)
}

/// Save a level to a scene file.
pub fn save_level(level: &Level, ui: &UiConfig, path: impl AsRef<Path>) -> Result<(), SceneError> {
    std::fs::write(path, write_level(level, ui))?;
    Ok(())
}

/// Load a level from a scene file. An unopenable file is a structural
/// failure returned to the caller.
pub fn load_level(
    path: impl AsRef<Path>,
    factory: &mut Factory,
    registries: &mut Registries,
    ui: &UiConfig,
) -> Result<Level, SceneError> {
    let text = std::fs::read_to_string(path)?;
    read_level(&text, factory, registries, ui)
}

fn parse_bounds(value: &str) -> Option<(f32, f32)> {
    let (min_x, max_x) = value.split_once(',')?;
    Some((
        min_x.trim().parse().ok()?,
        max_x.trim().parse().ok()?,
    ))
}

fn rescale(transform: &mut Transform, x_factor: f32, y_factor: f32) {
    transform.position.x *= x_factor;
    transform.position.y *= y_factor;
    transform.scale.x *= x_factor;
    transform.scale.y *= y_factor;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_level_header_is_structural() {
        let mut factory = Factory::new();
        let mut registries = Registries::default();
        let result = read_level(
            "Bounds: 0, 10\n",
            &mut factory,
            &mut registries,
            &UiConfig::default(),
        );
        assert!(matches!(result, Err(SceneError::MissingHeader("Level"))));
    }

    #[test]
    fn test_bad_bounds_is_structural() {
        let mut factory = Factory::new();
        let mut registries = Registries::default();
        let result = read_level(
            "Level: cave\nBounds: zero, ten\n",
            &mut factory,
            &mut registries,
            &UiConfig::default(),
        );
        assert!(matches!(result, Err(SceneError::MissingHeader("Bounds"))));
    }

    #[test]
    fn test_components_persist_in_insertion_order() {
        use crate::object::components::{Animate, Lighting};
        use crate::object::ComponentData;

        let mut factory = Factory::new();
        let mut registries = Registries::default();
        let ui = UiConfig::default();

        // Lighting attached before Animate, the reverse of their
        // declaration order in the kind set.
        let mut level = Level::new("cave", (0.0, 100.0));
        let mut torch = GameObject::new("torch");
        torch.add_component(Lighting::default().into_component());
        torch.add_component(Animate::default().into_component());
        level.add_object(torch);

        let text = write_level(&level, &ui);
        let lighting_at = text.find("Component: Lighting").unwrap();
        let animate_at = text.find("Component: Animate").unwrap();
        assert!(lighting_at < animate_at);

        let reloaded = read_level(&text, &mut factory, &mut registries, &ui).unwrap();
        let object = reloaded.live_objects().next().unwrap();
        let kinds: Vec<ComponentKind> =
            object.components().iter().map(Component::kind).collect();
        assert_eq!(
            kinds,
            vec![ComponentKind::Lighting, ComponentKind::Animate]
        );
    }

    #[test]
    fn test_empty_level_roundtrip() {
        let mut factory = Factory::new();
        let mut registries = Registries::default();
        let ui = UiConfig::default();

        let level = Level::new("cave", (-10.0, 250.5));
        let text = write_level(&level, &ui);
        let reloaded = read_level(&text, &mut factory, &mut registries, &ui).unwrap();

        assert_eq!(reloaded.name(), "cave");
        assert_eq!(reloaded.bounds(), (-10.0, 250.5));
        assert!(reloaded.is_empty());
    }
}
