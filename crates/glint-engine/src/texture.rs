//! Texture loading.
//!
//! Decodes an image file on the CPU and uploads it to the device; the rest
//! of the engine only needs `bind(unit)` to sample it.

use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};

use crate::device::{Device, TextureId};

/// An owned device texture.
pub struct Texture {
    device: Rc<dyn Device>,
    handle: Option<TextureId>,
}

impl Texture {
    /// Decodes `path` and uploads it as an RGBA8 texture with mipmaps.
    ///
    /// The image is flipped vertically: image rows run top-down while GL
    /// texture coordinates have their origin at the bottom-left.
    pub fn from_path(device: Rc<dyn Device>, path: &Path) -> Result<Self> {
        let image = image::open(path)
            .with_context(|| format!("failed to load texture {}", path.display()))?;
        let rgba = image.flipv().to_rgba8();
        let (width, height) = rgba.dimensions();

        let handle = device
            .create_texture_rgba8(width, height, rgba.as_raw())
            .context("failed to create device texture")?;

        Ok(Self {
            device,
            handle: Some(handle),
        })
    }

    /// Binds the texture for sampling on texture unit `unit`.
    pub fn bind(&self, unit: u32) {
        self.device.bind_texture(unit, self.handle);
    }

    /// Releases the device texture. Idempotent.
    pub fn release(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.device.delete_texture(handle);
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        self.release();
    }
}
