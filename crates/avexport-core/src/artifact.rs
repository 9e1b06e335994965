// File: crates/avexport-core/src/artifact.rs
// Summary: Encoded image artifacts (rendered charts and carried snapshots).

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentType {
    Png,
    Jpeg,
}

impl ContentType {
    pub fn mime(self) -> &'static str {
        match self {
            ContentType::Png => "image/png",
            ContentType::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ContentType::Png => "png",
            ContentType::Jpeg => "jpg",
        }
    }
}

/// Immutable encoded image with its logical name and pixel size.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphicArtifact {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub content_type: ContentType,
    pub bytes: Vec<u8>,
}

/// Snapshots share the graphic value object; only the content type differs.
pub type ImageArtifact = GraphicArtifact;

impl GraphicArtifact {
    pub fn png(name: impl Into<String>, width: u32, height: u32, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), width, height, content_type: ContentType::Png, bytes }
    }

    pub fn jpeg(name: impl Into<String>, width: u32, height: u32, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), width, height, content_type: ContentType::Jpeg, bytes }
    }

    /// `<base>_<name>.<ext>`
    pub fn file_name(&self, base: &str) -> String {
        format!("{base}_{}.{}", self.name, self.content_type.extension())
    }

    /// Inline `data:` URI for self-contained HTML.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.content_type.mime(), STANDARD.encode(&self.bytes))
    }
}
