//! Component contract: the closed set of attachable data units.
//!
//! Components are a fixed, enumerated set rather than an open plugin
//! registry. Each concrete kind is a plain-data struct; the
//! [`Component`] enum is the tagged variant that owns one of them.
//! Typed access goes through [`ComponentData`]: a lookup by kind tag
//! followed by a checked unwrap, so a kind/type mismatch is an `Option`
//! failure instead of undefined behavior.
//!
//! Every kind honors the same contract:
//! - `write_fields` emits a self-describing textual record;
//! - `read_fields` parses that record back, and on any failing field
//!   leaves the component at its documented defaults and reports the
//!   error to the caller (it never panics);
//! - `copy_from` deep-copies all fields from a component of the same
//!   kind and is a no-op across kinds.

use super::components::{
    Animate, Collision, Controller, EnemyCombat, Inventory, Lifetime, Lighting, Logic,
    LogicTargets, PlayerCombat, Renderer, RigidBody, Transform, UiText,
};
use crate::foundation::math::Vec2;
use thiserror::Error;

/// Recoverable text-format failure at field or record granularity.
///
/// Parse errors never abort an enclosing entity or level load; the
/// owning component falls back to defaults and the factory logs and
/// continues.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A required field was absent from the record.
    #[error("missing field '{0}'")]
    MissingField(String),

    /// A field was present but its value failed to parse.
    #[error("invalid value '{value}' for field '{key}'")]
    InvalidField {
        /// The field key as it appeared in the record.
        key: String,
        /// The unparseable value text.
        value: String,
    },

    /// A line did not match the `Key: value` shape.
    #[error("malformed line '{0}': expected 'Key: value'")]
    MalformedLine(String),

    /// The record ended mid-block.
    #[error("unexpected end of record")]
    UnexpectedEnd,
}

/// Key/value field set of one component block, in record order.
///
/// Keys may contain spaces (`Rotation Angle`); duplicate keys resolve
/// to the first occurrence.
#[derive(Debug, Default)]
pub struct Fields {
    entries: Vec<(String, String)>,
}

impl Fields {
    /// Create an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key/value pair.
    pub fn insert(&mut self, key: &str, value: &str) {
        self.entries.push((key.to_owned(), value.to_owned()));
    }

    /// Raw value lookup, first match.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn require(&self, key: &str) -> Result<&str, ParseError> {
        self.get(key)
            .ok_or_else(|| ParseError::MissingField(key.to_owned()))
    }

    fn invalid(key: &str, value: &str) -> ParseError {
        ParseError::InvalidField {
            key: key.to_owned(),
            value: value.to_owned(),
        }
    }

    /// Required string field.
    pub fn str_field(&self, key: &str) -> Result<String, ParseError> {
        Ok(self.require(key)?.to_owned())
    }

    /// Required `f32` field.
    pub fn f32_field(&self, key: &str) -> Result<f32, ParseError> {
        let raw = self.require(key)?;
        raw.trim()
            .parse()
            .map_err(|_| Self::invalid(key, raw))
    }

    /// Required `u32` field.
    pub fn u32_field(&self, key: &str) -> Result<u32, ParseError> {
        let raw = self.require(key)?;
        raw.trim()
            .parse()
            .map_err(|_| Self::invalid(key, raw))
    }

    /// Required flag field, written as `0` or `1`.
    pub fn bool_field(&self, key: &str) -> Result<bool, ParseError> {
        let raw = self.require(key)?;
        match raw.trim() {
            "0" => Ok(false),
            "1" => Ok(true),
            _ => Err(Self::invalid(key, raw)),
        }
    }

    /// Required two-float field, written as `x, y`.
    pub fn vec2_field(&self, key: &str) -> Result<Vec2, ParseError> {
        let [x, y] = self.float_list(key)?;
        Ok(Vec2::new(x, y))
    }

    /// Required three-float field, written as `x, y, z`.
    pub fn f32_triple(&self, key: &str) -> Result<[f32; 3], ParseError> {
        self.float_list(key)
    }

    /// Comma-separated string list; an empty value is an empty list.
    pub fn list_field(&self, key: &str) -> Result<Vec<String>, ParseError> {
        let raw = self.require(key)?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(raw.split(',').map(|s| s.trim().to_owned()).collect())
    }

    fn float_list<const N: usize>(&self, key: &str) -> Result<[f32; N], ParseError> {
        let raw = self.require(key)?;
        let mut out = [0.0f32; N];
        let mut parts = raw.split(',');
        for slot in &mut out {
            let part = parts.next().ok_or_else(|| Self::invalid(key, raw))?;
            *slot = part
                .trim()
                .parse()
                .map_err(|_| Self::invalid(key, raw))?;
        }
        if parts.next().is_some() {
            return Err(Self::invalid(key, raw));
        }
        Ok(out)
    }
}

/// Typed access to a component's concrete data.
///
/// `GameObject::get::<T>()` resolves through this trait: find the
/// component whose tag is `T::KIND`, then unwrap the matching variant.
pub trait ComponentData: Default + Clone {
    /// The kind tag this data type corresponds to.
    const KIND: ComponentKind;

    /// Checked downcast from the tagged variant.
    fn from_component(component: &Component) -> Option<&Self>;

    /// Checked mutable downcast from the tagged variant.
    fn from_component_mut(component: &mut Component) -> Option<&mut Self>;

    /// Wrap this data into its tagged variant.
    fn into_component(self) -> Component;
}

macro_rules! component_set {
    ($( $kind:ident => $ty:ty, $name:literal ; )+) => {
        /// The closed set of component kinds.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ComponentKind {
            $(
                #[allow(missing_docs)]
                $kind,
            )+
        }

        impl ComponentKind {
            /// Every kind, in declaration order.
            pub const ALL: &'static [ComponentKind] = &[$(ComponentKind::$kind),+];

            /// The kind name as it appears on a `Component:` line.
            pub fn name(self) -> &'static str {
                match self {
                    $(ComponentKind::$kind => $name,)+
                }
            }

            /// Reverse of [`name`](Self::name); `None` outside the set.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(ComponentKind::$kind),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for ComponentKind {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }

        /// A single attached data unit, tagged by kind.
        #[derive(Debug, Clone)]
        pub enum Component {
            $(
                #[allow(missing_docs)]
                $kind($ty),
            )+
        }

        impl Component {
            /// Default-valued component of the given kind.
            pub fn new(kind: ComponentKind) -> Self {
                match kind {
                    $(ComponentKind::$kind => Component::$kind(<$ty>::default()),)+
                }
            }

            /// Kind tag of this component.
            pub fn kind(&self) -> ComponentKind {
                match self {
                    $(Component::$kind(_) => ComponentKind::$kind,)+
                }
            }

            /// Write the component's self-describing block:
            /// `{`, `Component: <Kind>`, one field line each, `}`.
            pub fn write_block(&self, out: &mut String) {
                out.push_str("{\n");
                out.push_str(&format!("Component: {}\n", self.kind().name()));
                match self {
                    $(Component::$kind(data) => data.write_fields(out),)+
                }
                out.push_str("}\n");
            }

            /// Parse the component's fields from a block.
            ///
            /// On failure the component is reset to its defaults before
            /// the error is returned, so a half-parsed state is never
            /// observable.
            pub fn read_fields(&mut self, fields: &Fields) -> Result<(), ParseError> {
                let kind = self.kind();
                let result = match self {
                    $(Component::$kind(data) => data.read_fields(fields),)+
                };
                if result.is_err() {
                    *self = Component::new(kind);
                }
                result
            }

            /// Deep value copy from `other` when the kinds match;
            /// a cross-kind copy is a no-op.
            pub fn copy_from(&mut self, other: &Component) {
                match (self, other) {
                    $((Component::$kind(dst), Component::$kind(src)) => *dst = src.clone(),)+
                    _ => {}
                }
            }
        }

        $(
            impl ComponentData for $ty {
                const KIND: ComponentKind = ComponentKind::$kind;

                fn from_component(component: &Component) -> Option<&Self> {
                    if let Component::$kind(data) = component {
                        Some(data)
                    } else {
                        None
                    }
                }

                fn from_component_mut(component: &mut Component) -> Option<&mut Self> {
                    if let Component::$kind(data) = component {
                        Some(data)
                    } else {
                        None
                    }
                }

                fn into_component(self) -> Component {
                    Component::$kind(self)
                }
            }
        )+
    };
}

component_set! {
    Transform => Transform, "Transform";
    RigidBody => RigidBody, "RigidBody";
    Collision => Collision, "Collision";
    Logic => Logic, "Logic";
    UiText => UiText, "UIText";
    Renderer => Renderer, "Renderer";
    Controller => Controller, "Controller";
    Animate => Animate, "Animate";
    Lighting => Lighting, "Lighting";
    LogicTargets => LogicTargets, "LogicTargets";
    PlayerCombat => PlayerCombat, "PlayerCombat";
    Inventory => Inventory, "Inventory";
    EnemyCombat => EnemyCombat, "EnemyCombat";
    Lifetime => Lifetime, "Lifetime";
}

impl ComponentKind {
    /// The six kinds the level maintains capability layers for.
    pub const INDEXED: &'static [ComponentKind] = &[
        ComponentKind::Transform,
        ComponentKind::RigidBody,
        ComponentKind::Collision,
        ComponentKind::Logic,
        ComponentKind::UiText,
        ComponentKind::Renderer,
    ];
}
