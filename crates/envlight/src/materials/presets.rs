//! Reference materials for the demo scene
//!
//! Four spheres that respond very differently to the same reflection:
//! a rough matte surface barely shows it, a polished metal mirrors it, glass
//! transmits and mirrors, and lacquered plastic adds a clearcoat sheen.

use crate::foundation::math::Rgb;

use super::{Material, PhysicalParams};

/// Rough, non-metallic pale green
pub fn matte() -> Material {
    Material::new("Matte")
        .with_color(Rgb::from_hex(0x98fb98))
        .with_roughness(1.0)
        .with_metalness(0.0)
        .with_env_map_intensity(0.3)
}

/// Polished silver
pub fn silver() -> Material {
    Material::new("Silver")
        .with_color(Rgb::from_hex(0xc0c0c0))
        .with_metalness(0.6)
        .with_roughness(0.1)
        .with_env_map_intensity(1.2)
}

/// Clear glass with a strong clearcoat
pub fn glass() -> Material {
    Material::new("Glass")
        .with_color(Rgb::WHITE)
        .with_metalness(0.0)
        .with_roughness(0.05)
        .with_env_map_intensity(2.0)
        .with_physical(PhysicalParams {
            transmission: 0.95,
            opacity: 0.6,
            reflectivity: 0.9,
            ior: 1.5,
            clearcoat: 1.0,
            clearcoat_roughness: 0.1,
            thickness: 0.5,
        })
}

/// Dark blue lacquered plastic
pub fn plastic() -> Material {
    Material::new("Plastic")
        .with_color(Rgb::from_hex(0x003366))
        .with_metalness(0.0)
        .with_roughness(0.5)
        .with_env_map_intensity(1.5)
        .with_physical(PhysicalParams {
            clearcoat: 0.5,
            clearcoat_roughness: 0.4,
            ..PhysicalParams::default()
        })
}

/// All presets in display order
pub fn all() -> [Material; 4] {
    [matte(), silver(), glass(), plastic()]
}
