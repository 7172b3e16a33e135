//! JSON manifests describing a [Job].
//!
//! ```json
//! {
//!     "Format": "BC7_UNORM",
//!     "Cubemap": true,
//!     "Mipmaps": true,
//!     "SourceFiles": ["px.dds", "nx.dds", "py.dds", "ny.dds", "pz.dds", "nz.dds"]
//! }
//! ```
//!
//! Field names and enumerators ignore ASCII case.
//! Unknown fields are skipped with a warning and `null` leaves a field at its default.
use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{
    de::{self, IgnoredAny, MapAccess, Visitor},
    Deserialize, Deserializer,
};
use tracing::warn;

use crate::{
    error::{DdsError, ManifestError},
    job::{AlphaMode, Job},
    DxgiFormat,
};

const FORMAT_PREFIX: &str = "DXGI_FORMAT_";

// Long lines are shortened to this many characters around the error.
const FRAGMENT_RADIUS: usize = 32;

/// The fields of a manifest before they are applied to a [Job].
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Manifest {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub max_mip_levels: Option<u32>,
    pub array_size: Option<u32>,
    pub format: Option<DxgiFormat>,
    pub alpha_mode: Option<AlphaMode>,
    pub mipmaps: Option<bool>,
    pub cubemap: Option<bool>,
    pub volume: Option<bool>,
    pub force_pow2: Option<bool>,
    pub source_files: Vec<PathBuf>,
}

impl Manifest {
    /// Create a job writing to `output_path` with relative source files resolved against `base_dir`.
    pub fn into_job(self, base_dir: &Path, output_path: PathBuf) -> Job {
        Job {
            width: self.width.unwrap_or_default(),
            height: self.height.unwrap_or_default(),
            base_width: 0,
            base_height: 0,
            max_mip_levels: self.max_mip_levels.unwrap_or_default(),
            array_size: self.array_size,
            format: self.format,
            alpha_mode: self.alpha_mode,
            mipmaps: self.mipmaps.unwrap_or_default(),
            cubemap: self.cubemap.unwrap_or_default(),
            volume: self.volume.unwrap_or_default(),
            force_pow2: self.force_pow2.unwrap_or_default(),
            sources: self
                .source_files
                .into_iter()
                .map(|p| if p.is_relative() { base_dir.join(p) } else { p })
                .collect(),
            output_path,
        }
    }
}

/// Parse the JSON text of a manifest.
pub fn parse_manifest(text: &str) -> Result<Manifest, ManifestError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    serde_json::from_str(text).map_err(|e| manifest_error(text, &e))
}

/// Read the manifest at `path` and create a job writing to `output_path`.
pub fn load_job<P: AsRef<Path>>(path: P, output_path: PathBuf) -> Result<Job, DdsError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let manifest = parse_manifest(&text)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(manifest.into_job(base_dir, output_path))
}

/// Parse a DXGI format name with an optional `DXGI_FORMAT_` prefix.
///
/// `UNKNOWN` is not a valid format for a manifest.
pub fn parse_format(name: &str) -> Option<DxgiFormat> {
    let name = match name.get(..FORMAT_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(FORMAT_PREFIX) => &name[FORMAT_PREFIX.len()..],
        _ => name,
    };
    DxgiFormat::from_str(name)
        .ok()
        .filter(|f| *f != DxgiFormat::Unknown)
}

/// Parse one of the alpha modes that can be requested explicitly.
pub fn parse_alpha_mode(name: &str) -> Option<AlphaMode> {
    AlphaMode::from_str(name)
        .ok()
        .filter(|m| *m != AlphaMode::Unknown)
}

fn manifest_error(text: &str, e: &serde_json::Error) -> ManifestError {
    let message = e.to_string();
    let message = match message.rsplit_once(" at line ") {
        Some((message, _)) => message.to_string(),
        None => message,
    };

    ManifestError {
        line: e.line(),
        column: e.column(),
        fragment: fragment(text, e.line(), e.column()),
        message,
    }
}

fn fragment(text: &str, line: usize, column: usize) -> String {
    let Some(line) = line.checked_sub(1).and_then(|i| text.lines().nth(i)) else {
        return String::new();
    };
    let chars: Vec<char> = line.chars().collect();
    let column = column.min(chars.len());
    let start = column.saturating_sub(FRAGMENT_RADIUS);
    let end = (column + FRAGMENT_RADIUS).min(chars.len());
    chars[start..end].iter().collect::<String>().trim().to_string()
}

impl<'de> Deserialize<'de> for Manifest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ManifestVisitor)
    }
}

struct ManifestVisitor;

impl<'de> Visitor<'de> for ManifestVisitor {
    type Value = Manifest;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a manifest object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut manifest = Manifest::default();
        while let Some(key) = map.next_key::<String>()? {
            match key.to_ascii_lowercase().as_str() {
                "width" => manifest.width = map.next_value()?,
                "height" => manifest.height = map.next_value()?,
                "maxmiplevels" => manifest.max_mip_levels = map.next_value()?,
                "arraysize" => manifest.array_size = map.next_value()?,
                "format" => {
                    manifest.format = map.next_value::<Option<FormatName>>()?.map(|f| f.0)
                }
                "alphamode" => {
                    manifest.alpha_mode = map.next_value::<Option<AlphaModeName>>()?.map(|m| m.0)
                }
                "mipmaps" => manifest.mipmaps = map.next_value()?,
                "cubemap" => manifest.cubemap = map.next_value()?,
                "volume" => manifest.volume = map.next_value()?,
                "forcepow2" => manifest.force_pow2 = map.next_value()?,
                "sourcefiles" => {
                    manifest.source_files = map
                        .next_value::<Option<Vec<PathBuf>>>()?
                        .unwrap_or_default()
                }
                _ => {
                    warn!(field = %key, "Ignoring unrecognized manifest field.");
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(manifest)
    }
}

struct FormatName(DxgiFormat);

impl<'de> Deserialize<'de> for FormatName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        parse_format(&name)
            .map(FormatName)
            .ok_or_else(|| de::Error::custom(format!("unrecognized format {name:?}")))
    }
}

struct AlphaModeName(AlphaMode);

impl<'de> Deserialize<'de> for AlphaModeName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        parse_alpha_mode(&name)
            .map(AlphaModeName)
            .ok_or_else(|| de::Error::custom(format!("unrecognized alpha mode {name:?}")))
    }
}
