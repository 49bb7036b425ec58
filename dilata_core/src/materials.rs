//! # Materials Catalog
//!
//! Linear expansion coefficients for the solids offered in the lab.
//!
//! The builtin catalog is process-wide immutable state, built once on first
//! use. A session may extend it from the config file with
//! [`MaterialCatalog::with_overrides`], which returns a new catalog.
//!
//! ## Example
//!
//! ```rust
//! use dilata_core::materials::MaterialCatalog;
//!
//! let catalog = MaterialCatalog::builtin();
//! let steel = catalog.lookup("steel").unwrap();
//! assert_eq!(steel.name, "Acero");
//! assert!((steel.coefficient_per_c - 12.0e-6).abs() < 1e-12);
//!
//! assert!(catalog.lookup("unobtainium").is_err());
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{LabError, LabResult};

/// Material selected when a session starts
pub const DEFAULT_MATERIAL_KEY: &str = "steel";

/// (key, display name, α in 1/°C)
const BUILTIN_MATERIALS: [(&str, &str, f64); 5] = [
    ("aluminum", "Aluminio", 23.1e-6),
    ("copper", "Cobre", 16.5e-6),
    ("steel", "Acero", 12.0e-6),
    ("glass", "Vidrio (Pyrex)", 3.3e-6),
    ("diamond", "Diamante", 1.2e-6),
];

static BUILTIN_CATALOG: Lazy<MaterialCatalog> = Lazy::new(|| MaterialCatalog {
    materials: BUILTIN_MATERIALS
        .iter()
        .map(|(key, name, coefficient)| Material::new(*key, *name, *coefficient))
        .collect(),
});

/// A solid with its linear expansion coefficient.
///
/// ## JSON Example
///
/// ```json
/// { "key": "copper", "name": "Cobre", "coefficient_per_c": 1.65e-5 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Identifier used in state and config (lowercase)
    pub key: String,
    /// Name shown to the student
    pub name: String,
    /// Linear expansion coefficient α (1/°C)
    pub coefficient_per_c: f64,
}

impl Material {
    pub fn new(key: impl Into<String>, name: impl Into<String>, coefficient_per_c: f64) -> Self {
        Material {
            key: normalize_key(&key.into()),
            name: name.into(),
            coefficient_per_c,
        }
    }

    /// Coefficient formatted the way the UI and prompt show it (`1.20e-5`)
    pub fn coefficient_label(&self) -> String {
        format!("{:.2e}", self.coefficient_per_c)
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Keys compare trimmed and lowercase
fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase()
}

/// Ordered, immutable set of materials keyed by identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialCatalog {
    materials: Vec<Material>,
}

impl MaterialCatalog {
    /// The reference catalog (aluminum, copper, steel, glass, diamond)
    pub fn builtin() -> &'static MaterialCatalog {
        &BUILTIN_CATALOG
    }

    /// Build a catalog from the builtin set plus extra entries.
    ///
    /// An entry whose key already exists replaces that material in place;
    /// new keys are appended in the order given.
    pub fn with_overrides(entries: impl IntoIterator<Item = Material>) -> LabResult<Self> {
        let mut materials = BUILTIN_CATALOG.materials.clone();

        for entry in entries {
            let entry = Material::new(entry.key, entry.name, entry.coefficient_per_c);
            if entry.key.is_empty() {
                return Err(LabError::invalid_input(
                    "materials.key",
                    "",
                    "Material key must not be empty",
                ));
            }
            if !entry.coefficient_per_c.is_finite() {
                return Err(LabError::invalid_input(
                    format!("materials.{}.coefficient_per_c", entry.key),
                    entry.coefficient_per_c.to_string(),
                    "Coefficient must be a finite number",
                ));
            }

            match materials.iter_mut().find(|m| m.key == entry.key) {
                Some(existing) => *existing = entry,
                None => materials.push(entry),
            }
        }

        Ok(MaterialCatalog { materials })
    }

    /// Find a material by key
    pub fn lookup(&self, key: &str) -> LabResult<&Material> {
        let key = normalize_key(key);
        self.materials
            .iter()
            .find(|m| m.key == key)
            .ok_or_else(|| LabError::material_not_found(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_ok()
    }

    /// All materials in display order
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.materials.iter().map(|m| m.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for MaterialCatalog {
    fn default() -> Self {
        BUILTIN_CATALOG.clone()
    }
}
