use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::foundation::error::{UmagenError, UmagenResult};

/// Immutable configuration for one generation call.
///
/// Built once per invocation by the caller (CLI, service wrapper, test) and never mutated while
/// the pipeline runs.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Character name drawn above the accent line.
    pub name_text: String,
    /// Main caption text; `'\n'` separates lines.
    pub main_text: String,
    /// Pixel size of the name font.
    pub name_size: u32,
    /// Pixel size of the main text font.
    pub text_size: u32,
    /// Draw the name and its accent line.
    pub show_name: bool,
    /// Draw a drop shadow under every glyph.
    pub shadow_enabled: bool,
    /// Shadow offset in pixels, applied to both axes.
    pub shadow_offset: u32,
    /// Add a black letterbox band at the bottom.
    pub add_letterbox: bool,
    /// Keep the original height by trimming the band's height from the image instead of
    /// growing the canvas. Only meaningful with `add_letterbox`.
    pub trim_top: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            name_text: "キャラクター名".to_string(),
            main_text: "ここに本文を入力してください".to_string(),
            name_size: 45,
            text_size: 40,
            show_name: true,
            shadow_enabled: false,
            shadow_offset: 2,
            add_letterbox: false,
            trim_top: false,
        }
    }
}

impl LayoutOptions {
    /// Validate option invariants.
    pub fn validate(&self) -> UmagenResult<()> {
        if self.name_size == 0 {
            return Err(UmagenError::validation("name_size must be > 0"));
        }
        if self.text_size == 0 {
            return Err(UmagenError::validation("text_size must be > 0"));
        }
        Ok(())
    }

    /// Whether the bottom band replaces image rows instead of extending the canvas.
    pub fn trims_top(&self) -> bool {
        self.add_letterbox && self.trim_top
    }
}

/// On-disk configuration: default options plus deployment resources.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Default layout options; CLI flags override individual fields.
    pub options: LayoutOptions,
    /// Deployment default font, used when no font is supplied with a request.
    pub default_font: Option<PathBuf>,
}

impl CardConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> UmagenResult<Self> {
        let cfg: CardConfig = serde_json::from_reader(r)
            .map_err(|e| UmagenError::validation(format!("parse config JSON: {e}")))?;
        cfg.options.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON file on disk.
    ///
    /// A relative `default_font` is resolved against the config file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> UmagenResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            UmagenError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        let mut cfg = Self::from_reader(BufReader::new(f))?;
        if let (Some(font), Some(dir)) = (cfg.default_font.as_ref(), path.parent()) {
            if font.is_relative() {
                cfg.default_font = Some(dir.join(font));
            }
        }
        Ok(cfg)
    }
}

#[cfg(test)]
#[path = "../tests/unit/model.rs"]
mod tests;
