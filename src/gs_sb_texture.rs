// ============================================================================
// GS.Phy2D - Open source 2D physics engine
// 2026, Vincent Gsell
//
// This library is free software; you can redistribute it and/or
// modify it under the terms of the GNU Lesser General Public
// License as published by the Free Software Foundation; either
// version 2.1 of the License, or (at your option) any later version.
//
// This library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public
// License along with this library; if not, write to the Free Software
// Foundation, Inc., 51 Franklin Street, Fifth Floor, Boston, MA  02110-1301  USA
//
// Created by Vincent Gsell [https://github.com/VincentGsell]
// ============================================================================

// History
// 20261019 - Sandbox created (rapier2d + macroquad).

// =============================================================================
// gs_sb_texture.rs - Texture loading with placeholder fallback
// =============================================================================
//
// Si une image ne peut pas être chargée, on ne s'arrête pas : l'erreur est
// loggée et on utilise une texture de remplacement 16x16 générée
// (lignes paires rouges, colonnes paires bleues), bien visible à l'écran.
//
// =============================================================================

use std::path::Path;

use log::{error, info};
use macroquad::texture::{load_texture, FilterMode, Texture2D};

/// Côté de la texture de remplacement (pixels)
pub const PLACEHOLDER_SIZE: u16 = 16;

/// Pixels RGBA de la texture de remplacement
pub fn placeholder_pixels() -> Vec<u8> {
    let size = PLACEHOLDER_SIZE as usize;
    let mut pixels = Vec::with_capacity(size * size * 4);
    for y in 0..size {
        for x in 0..size {
            let r = if y % 2 == 0 { 255 } else { 0 };
            let b = if x % 2 == 0 { 255 } else { 0 };
            pixels.extend_from_slice(&[r, 0, b, 255]);
        }
    }
    pixels
}

/// Texture de remplacement (nécessite un contexte graphique)
pub fn placeholder_texture() -> Texture2D {
    let texture = Texture2D::from_rgba8(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, &placeholder_pixels());
    texture.set_filter(FilterMode::Nearest);
    texture
}

/// Charge une texture, ou retourne la texture de remplacement en cas d'échec
pub async fn load_texture_or_placeholder(path: &Path) -> Texture2D {
    let path_str = path.to_string_lossy();
    match load_texture(&path_str).await {
        Ok(texture) => {
            info!("Loaded texture {}", path.display());
            texture
        }
        Err(err) => {
            error!(
                "Failed to load texture {}: {:?}, using placeholder",
                path.display(),
                err
            );
            placeholder_texture()
        }
    }
}

// =============================================================================
// Tests unitaires
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(pixels: &[u8], x: usize, y: usize) -> [u8; 4] {
        let i = (y * PLACEHOLDER_SIZE as usize + x) * 4;
        [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
    }

    #[test]
    fn test_placeholder_size() {
        assert_eq!(placeholder_pixels().len(), 16 * 16 * 4);
    }

    #[test]
    fn test_placeholder_pattern() {
        let pixels = placeholder_pixels();
        assert_eq!(pixel(&pixels, 0, 0), [255, 0, 255, 255]);
        assert_eq!(pixel(&pixels, 1, 0), [255, 0, 0, 255]);
        assert_eq!(pixel(&pixels, 0, 1), [0, 0, 255, 255]);
        assert_eq!(pixel(&pixels, 1, 1), [0, 0, 0, 255]);
        assert_eq!(pixel(&pixels, 15, 14), [255, 0, 0, 255]);
    }
}
