//! # Atlas Property Tests
//!
//! Builds fonts through the public API with a deterministic rasterizer and
//! checks the atlas and glyph table they produce.

mod common;

use common::BlockRasterizer;
use tessera_font::{DrawParams, FontConfig, PageSlot, ScalableFont};
use tessera_ui::{Rect, Rgba, TextureRegistry, UIRenderer, Vec2};

fn build(
    size: u32,
    config: FontConfig,
    registry: &mut TextureRegistry,
) -> ScalableFont<BlockRasterizer> {
    ScalableFont::with_config(BlockRasterizer::default(), size, config, registry).unwrap()
}

#[test]
fn uppercase_letters_land_on_valid_pages() {
    let mut registry = TextureRegistry::new();
    let font = build(12, FontConfig::default(), &mut registry);

    for ch in 'A'..='Z' {
        let glyph = font.glyph(ch).unwrap();
        let PageSlot::Page(index) = glyph.page() else {
            panic!("{ch} has no page");
        };
        let page = font.pages()[index];
        let rect = glyph.atlas_rect();

        assert!(!rect.is_empty(), "{ch}");
        assert!(rect.x >= 0 && rect.y >= 0, "{ch}");
        assert!(rect.right() <= page.size() as i32, "{ch}");
        assert!(rect.bottom() <= page.size() as i32, "{ch}");
    }
}

#[test]
fn space_has_no_page() {
    let mut registry = TextureRegistry::new();
    let font = build(12, FontConfig::default(), &mut registry);

    let space = font.glyph(' ').unwrap();
    assert_eq!(space.page(), PageSlot::NoPage);
    assert_eq!(space.atlas_rect(), Rect::EMPTY);
    assert!(space.advance() > 0.0);
}

#[test]
fn small_pages_spill_without_overlap() {
    let mut registry = TextureRegistry::new();
    let config = FontConfig {
        page_size: 128,
        ..FontConfig::default()
    };
    let font = build(16, config, &mut registry);
    assert!(font.pages().len() > 1);

    let mut placed: Vec<(usize, Rect)> = Vec::new();
    for code in config.char_range() {
        let Some(glyph) = char::from_u32(code).and_then(|ch| font.glyph(ch)) else {
            continue;
        };
        let Some(page) = glyph.page().index() else {
            continue;
        };
        let rect = glyph.atlas_rect();
        // Padding keeps the glyph off the far edges
        assert!(rect.right() + 2 < 128 && rect.bottom() + 2 < 128, "{code:#x}");
        for (other_page, other) in &placed {
            assert!(
                *other_page != page || !rect.intersects(other),
                "{code:#x} overlaps {other:?}"
            );
        }
        placed.push((page, rect));
    }
}

#[test]
fn glyph_pixels_are_white_with_coverage_alpha() {
    let mut registry = TextureRegistry::new();
    let font = build(12, FontConfig::default(), &mut registry);

    let glyph = font.glyph('M').unwrap();
    let rect = glyph.atlas_rect();
    let page = font.pages()[glyph.page().index().unwrap()];
    let texture = registry.get(page.texture()).unwrap();

    // Coverage counts up row-major from zero
    let (x, y) = (rect.x as u32, rect.y as u32);
    assert_eq!(texture.pixel(x, y), Some(Rgba::white_alpha(0)));
    assert_eq!(texture.pixel(x + 1, y), Some(Rgba::white_alpha(1)));
    let width = rect.width as u32;
    assert_eq!(texture.pixel(x, y + 1), Some(Rgba::white_alpha(width as u8)));
}

#[test]
fn rebuild_clears_previous_pages() {
    let mut registry = TextureRegistry::new();
    let mut font = build(12, FontConfig::default(), &mut registry);
    let old: Vec<_> = font.pages().iter().map(|page| page.texture()).collect();

    font.set_size(20, &mut registry).unwrap();

    for texture in old {
        assert!(registry.get(texture).is_none());
    }
    assert_eq!(registry.live_count(), font.pages().len());
    assert_eq!(font.reference_height(), 20);

    font.dispose(&mut registry);
    assert_eq!(registry.live_count(), 0);
}

#[test]
fn measuring_nothing_is_zero() {
    let mut registry = TextureRegistry::new();
    let font = build(12, FontConfig::default(), &mut registry);

    assert_eq!(font.measure_string("").unwrap(), Vec2::ZERO);
}

#[test]
fn measurement_is_monotone() {
    let mut registry = TextureRegistry::new();
    let font = build(14, FontConfig::default(), &mut registry);
    let text = "The quick brown fox, ÆØÅ ŒŸ!";

    let mut previous = 0.0;
    for (end, _) in text.char_indices().skip(1).chain([(text.len(), ' ')]) {
        let size = font.measure_string(&text[..end]).unwrap();
        assert!(size.x >= previous, "{:?}", &text[..end]);
        assert!((size.y - 14.0 * 16.0 / 9.0).abs() < 1e-3);
        previous = size.x;
    }
}

#[test]
fn drawn_width_matches_measurement() {
    let mut registry = TextureRegistry::new();
    let font = build(12, FontConfig::default(), &mut registry);
    let mut renderer = UIRenderer::new();

    font.draw_string(&mut renderer, "ab c", Vec2::ZERO, &DrawParams::default()).unwrap();

    assert_eq!(renderer.command_count(), 3);
    let width = font.measure_string("ab c").unwrap().x;
    let advances: f32 = "ab c".chars().map(|ch| font.glyph(ch).unwrap().advance()).sum();
    assert!((width - advances).abs() < 1e-4);
}
