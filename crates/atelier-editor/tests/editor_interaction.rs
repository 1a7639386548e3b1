//! Integration tests for the interactive editor.

use std::io::Cursor;

use atelier_core::geometry::{LogoTransform, TransformUpdate};
use atelier_core::logo::View;
use atelier_editor::{EditorConfig, LogoEditor};

/// A tiny valid PNG generated in memory.
fn png_bytes() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(8, 8, image::Rgba([200, 30, 30, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

fn editor() -> LogoEditor {
    LogoEditor::new(EditorConfig::default())
}

#[test]
fn place_image_accepts_png_and_rejects_garbage() {
    let mut ed = editor();
    ed.place_image(View::Front, png_bytes()).unwrap();
    assert!(!ed.slots().slot(View::Front).is_empty());
    assert!(ed.is_selected(View::Front));

    let mut ed = editor();
    let err = ed.place_image(View::Front, b"definitely not an image".to_vec());
    assert!(err.is_err());
    assert!(ed.slots().slot(View::Front).is_empty());
}

#[test]
fn preset_text_must_come_from_the_catalog() {
    let mut ed = editor();
    ed.place_preset_text(View::Back, "CREW").unwrap();
    assert!(ed.slots().slot(View::Back).payload().unwrap().is_text());

    let err = ed.place_preset_text(View::Front, "NOT-A-PRESET");
    assert!(err.is_err());
    assert!(ed.slots().slot(View::Front).is_empty());
}

#[test]
fn placing_a_payload_resets_only_that_view() {
    let mut ed = editor();
    ed.place_preset_text(View::Back, "STAFF").unwrap();
    ed.update_transform(View::Back, TransformUpdate::position(70.0, 80.0))
        .unwrap();
    let back = ed.slots().slot(View::Back).transform();

    ed.place_image(View::Front, png_bytes()).unwrap();
    assert_eq!(
        ed.slots().slot(View::Front).transform(),
        LogoTransform::default()
    );
    assert_eq!(ed.slots().slot(View::Back).transform(), back);
}

#[test]
fn drag_clamps_continuously_to_the_boundary() {
    let mut ed = editor();
    ed.place_image(View::Front, png_bytes()).unwrap();

    // Grab the object at its placed center.
    let bounds = ed.object_bounds(View::Front).unwrap();
    let (cx, cy) = bounds.center();
    assert!(ed.begin_drag(View::Front, cx, cy));

    // Mid-gesture moves far outside the canvas: each intermediate state
    // must already be clamped, not just the final one.
    for (px, py) in [(5000.0, 5000.0), (-4000.0, 100.0), (200.0, -900.0)] {
        ed.drag_to(View::Front, px, py);
        let boundary = ed.config().boundary(View::Front);
        let object = ed.object_bounds(View::Front).unwrap();
        assert!(object.x >= boundary.x - 1e-9, "left edge escaped at ({px},{py})");
        assert!(object.right() <= boundary.right() + 1e-9);
        assert!(object.y >= boundary.y - 1e-9);
        assert!(object.bottom() <= boundary.bottom() + 1e-9);

        let t = ed.slots().slot(View::Front).transform();
        assert!((0.0..=100.0).contains(&t.x));
        assert!((0.0..=100.0).contains(&t.y));
    }
    ed.end_drag(View::Front);
}

#[test]
fn scale_is_uniform_and_clamped() {
    let mut ed = editor();
    ed.place_image(View::Front, png_bytes()).unwrap();

    ed.scale_selected(View::Front, 1.5).unwrap();
    assert!((ed.slots().slot(View::Front).transform().scale - 1.5).abs() < 1e-12);

    // Runaway zoom stops at the configured maximum.
    for _ in 0..20 {
        ed.scale_selected(View::Front, 2.0).unwrap();
    }
    let t = ed.slots().slot(View::Front).transform();
    assert_eq!(t.scale, ed.config().scale_bounds.max);

    let bounds = ed.object_bounds(View::Front).unwrap();
    assert!((bounds.w - bounds.h).abs() < 1e-9); // aspect ratio locked
}

#[test]
fn delete_clears_payload_and_resets_transform() {
    let mut ed = editor();
    ed.place_preset_text(View::Front, "TEAM").unwrap();
    ed.update_transform(View::Front, TransformUpdate::position(10.0, 90.0))
        .unwrap();

    ed.delete_selected(View::Front).unwrap();
    assert!(ed.slots().slot(View::Front).is_empty());
    assert_eq!(
        ed.slots().slot(View::Front).transform(),
        LogoTransform::default()
    );
    assert!(ed.delete_selected(View::Front).is_err());
}

#[test]
fn disabled_editor_is_inert_but_still_capturable() {
    let mut ed = editor();
    ed.place_image(View::Front, png_bytes()).unwrap();
    let before = ed.slots().slot(View::Front).transform();

    ed.set_enabled(false);
    assert!(ed.place_preset_text(View::Back, "CREW").is_err());
    assert!(ed.scale_selected(View::Front, 2.0).is_err());
    assert!(ed.delete_selected(View::Front).is_err());
    assert!(!ed.begin_drag(View::Front, 200.0, 250.0));
    ed.drag_to(View::Front, 9999.0, 9999.0);
    assert_eq!(ed.slots().slot(View::Front).transform(), before);

    // Objects stay visible and capturable.
    let snapshot = ed.capture_snapshot(View::Front).unwrap();
    assert!(!snapshot.is_empty());
    assert_eq!(snapshot[1..4], *b"PNG");
}

#[test]
fn snapshot_differs_after_move() {
    let mut ed = editor();
    ed.place_image(View::Front, png_bytes()).unwrap();
    let before = ed.capture_snapshot(View::Front).unwrap();

    // This target is within bounds, so the clamp leaves it untouched.
    ed.update_transform(
        View::Front,
        TransformUpdate {
            x: Some(80.0),
            y: Some(10.0),
            scale: Some(2.0),
        },
    )
    .unwrap();
    let t = ed.slots().slot(View::Front).transform();
    assert_eq!(
        t,
        LogoTransform {
            x: 80.0,
            y: 10.0,
            scale: 2.0
        }
    );

    let after = ed.capture_snapshot(View::Front).unwrap();
    assert_ne!(before, after);
}

#[test]
fn snapshot_is_deterministic_for_identical_state() {
    let mut ed = editor();
    ed.place_image(View::Back, png_bytes()).unwrap();
    let a = ed.capture_snapshot(View::Back).unwrap();
    let b = ed.capture_snapshot(View::Back).unwrap();
    assert_eq!(a, b);
}

#[test]
fn logo_color_change_touches_text_on_both_views_but_not_images() {
    // Preset text on both views: one color change repaints both.
    let mut ed = editor();
    ed.place_preset_text(View::Front, "CREW").unwrap();
    ed.place_preset_text(View::Back, "CREW").unwrap();
    let front_before = ed.capture_snapshot(View::Front).unwrap();
    let back_before = ed.capture_snapshot(View::Back).unwrap();

    ed.set_logo_color("#FF0000").unwrap();
    assert_eq!(ed.logo_color(), "#FF0000");
    assert_ne!(front_before, ed.capture_snapshot(View::Front).unwrap());
    assert_ne!(back_before, ed.capture_snapshot(View::Back).unwrap());

    // A raster logo ignores the logo color entirely.
    let mut ed = editor();
    ed.place_image(View::Back, png_bytes()).unwrap();
    let image_before = ed.capture_snapshot(View::Back).unwrap();
    ed.set_logo_color("#FF0000").unwrap();
    assert_eq!(image_before, ed.capture_snapshot(View::Back).unwrap());
}

#[test]
fn hit_test_respects_object_bounds() {
    let mut ed = editor();
    assert!(!ed.hit_test(View::Front, 200.0, 250.0));

    ed.place_image(View::Front, png_bytes()).unwrap();
    let bounds = ed.object_bounds(View::Front).unwrap();
    let (cx, cy) = bounds.center();
    assert!(ed.hit_test(View::Front, cx, cy));
    assert!(!ed.hit_test(View::Front, bounds.x - 50.0, cy));
    // The other view is independent.
    assert!(!ed.hit_test(View::Back, cx, cy));
}
