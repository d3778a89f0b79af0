//! Product images
//!
//! Image references come straight from the catalog's `img` column. They are
//! resolved per product; a reference that cannot be resolved only costs that
//! product its picture, never its place in the catalog or the cart.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;
use url::Url;

/// Why a product image could not be resolved.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageUnavailable {
    /// The catalog row has no image reference.
    #[error("no image reference")]
    Missing,

    /// The reference looks like a URL but does not parse as one.
    #[error("invalid image url {0:?}")]
    InvalidUrl(String),

    /// The reference is a local path that does not exist.
    #[error("image file {} not found", .0.display())]
    NotFound(PathBuf),
}

/// Raw image reference from the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageRef(String);

impl ImageRef {
    /// Create an image reference.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// The reference as written in the catalog.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve the reference. Local paths are taken relative to `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageUnavailable`] when the reference is empty, is a malformed
    /// URL, or points at a file that does not exist.
    pub fn resolve(&self, base_dir: &Path) -> Result<ImageHandle, ImageUnavailable> {
        let reference = self.0.trim();

        if reference.is_empty() {
            return Err(ImageUnavailable::Missing);
        }

        if reference.starts_with("http://") || reference.starts_with("https://") {
            return Url::parse(reference)
                .map(ImageHandle::Remote)
                .map_err(|_err| ImageUnavailable::InvalidUrl(reference.to_string()));
        }

        let path = base_dir.join(reference);

        if path.is_file() {
            Ok(ImageHandle::Local(path))
        } else {
            Err(ImageUnavailable::NotFound(path))
        }
    }
}

/// A resolved product image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageHandle {
    /// Image served from a URL.
    Remote(Url),

    /// Image file on disk.
    Local(PathBuf),
}

/// What the rendering layer shows in a product's picture slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Thumbnail {
    /// The resolved image.
    Image(ImageHandle),

    /// Stand-in shown when the image is unavailable.
    Placeholder,
}

impl Thumbnail {
    /// Text shown in place of a missing image.
    pub const PLACEHOLDER_TEXT: &'static str = "Sem Imagem";

    /// Resolve `image` and fall back to the placeholder, logging the failure.
    pub fn for_image(image: &ImageRef, base_dir: &Path) -> Self {
        let resolved = image.resolve(base_dir);

        if let Err(error) = &resolved {
            warn!(image = image.as_str(), %error, "product image unavailable");
        }

        Self::from(resolved)
    }

    /// Short label for text output.
    pub fn label(&self) -> String {
        match self {
            Thumbnail::Image(ImageHandle::Remote(url)) => url.to_string(),
            Thumbnail::Image(ImageHandle::Local(path)) => path.display().to_string(),
            Thumbnail::Placeholder => Self::PLACEHOLDER_TEXT.to_string(),
        }
    }
}

impl From<Result<ImageHandle, ImageUnavailable>> for Thumbnail {
    fn from(result: Result<ImageHandle, ImageUnavailable>) -> Self {
        match result {
            Ok(handle) => Thumbnail::Image(handle),
            Err(_) => Thumbnail::Placeholder,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn empty_reference_is_missing() {
        let image = ImageRef::new("  ");

        assert_eq!(
            image.resolve(Path::new(".")),
            Err(ImageUnavailable::Missing)
        );
    }

    #[test]
    fn https_reference_resolves_to_remote() -> TestResult {
        let image = ImageRef::new("https://example.com/copo.png");

        let handle = image.resolve(Path::new("."))?;

        assert_eq!(
            handle,
            ImageHandle::Remote(Url::parse("https://example.com/copo.png")?)
        );

        Ok(())
    }

    #[test]
    fn malformed_url_is_invalid() {
        let image = ImageRef::new("https://");

        assert!(matches!(
            image.resolve(Path::new(".")),
            Err(ImageUnavailable::InvalidUrl(_))
        ));
    }

    #[test]
    fn local_reference_must_exist() -> TestResult {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("copo.png"), b"png")?;

        let found = ImageRef::new("copo.png").resolve(dir.path())?;
        let missing = ImageRef::new("prato.png").resolve(dir.path());

        assert_eq!(found, ImageHandle::Local(dir.path().join("copo.png")));
        assert_eq!(
            missing,
            Err(ImageUnavailable::NotFound(dir.path().join("prato.png")))
        );

        Ok(())
    }

    #[test]
    fn unavailable_image_becomes_placeholder() {
        let thumbnail = Thumbnail::for_image(&ImageRef::default(), Path::new("."));

        assert_eq!(thumbnail, Thumbnail::Placeholder);
        assert_eq!(thumbnail.label(), "Sem Imagem");
    }
}
