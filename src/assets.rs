use crate::error::AssetError;
use crate::mask::Mask;
use log::{info, warn};
use macroquad::prelude::{FilterMode, Image, Texture2D};
use rust_embed::RustEmbed;
use std::borrow::Cow;

#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Asset;

pub fn get_asset_bytes(name: &str) -> Option<Cow<'static, [u8]>> {
    Asset::get(name).map(|f| f.data)
}

/// Decodes an embedded image.
pub fn load_image(name: &str) -> Result<Image, AssetError> {
    let bytes = get_asset_bytes(name).ok_or_else(|| AssetError::Missing(name.to_string()))?;
    Image::from_file_with_format(&bytes, None).map_err(|e| AssetError::Decode {
        name: name.to_string(),
        message: e.to_string(),
    })
}

pub fn image_mask(image: &Image) -> Mask {
    Mask::from_rgba(image.width as usize, image.height as usize, &image.bytes)
}

/// A drawable image together with its collision mask.
pub struct Sprite {
    pub texture: Texture2D,
    pub mask: Mask,
}

impl Sprite {
    // Needs a live graphics context for the texture upload
    fn load(name: &str) -> Option<Sprite> {
        match load_image(name) {
            Ok(image) => {
                let texture = Texture2D::from_image(&image);
                texture.set_filter(FilterMode::Nearest);
                Some(Sprite {
                    mask: image_mask(&image),
                    texture,
                })
            }
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }
}

/// Every image used by the game. Anything that failed to load is `None`.
pub struct Assets {
    pub grass: Option<Sprite>,
    pub track: Option<Sprite>,
    pub finish: Option<Sprite>,
    pub border: Option<Sprite>,
    pub player_car: Option<Sprite>,
    pub computer_car: Option<Sprite>,
}

impl Assets {
    pub fn load() -> Self {
        let assets = Assets {
            grass: Sprite::load("grass.png"),
            track: Sprite::load("track.png"),
            finish: Sprite::load("finish.png"),
            border: Sprite::load("track-border.png"),
            player_car: Sprite::load("red-car.png"),
            computer_car: Sprite::load("green-car.png"),
        };
        info!("Assets loaded.");
        assets
    }

    pub fn border_mask(&self) -> Option<Mask> {
        self.border.as_ref().map(|s| s.mask.clone())
    }

    pub fn finish_mask(&self) -> Option<Mask> {
        self.finish.as_ref().map(|s| s.mask.clone())
    }

    pub fn player_mask(&self) -> Option<Mask> {
        self.player_car.as_ref().map(|s| s.mask.clone())
    }

    pub fn computer_mask(&self) -> Option<Mask> {
        self.computer_car.as_ref().map(|s| s.mask.clone())
    }
}
