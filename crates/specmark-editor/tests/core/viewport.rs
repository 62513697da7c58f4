use specmark_editor::transform::{screen_to_world, world_to_screen};
use specmark_editor::viewport::{FixedPixelRatio, Viewport};
use specmark_settings::ViewportSettings;

fn viewport() -> Viewport {
    Viewport::new(960.0, 480.0, ViewportSettings::default())
}

#[test]
fn test_viewport_creation() {
    let vp = viewport();
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(vp.scroll_offset(), 0.0);
    assert_eq!(vp.device_pixel_ratio(), 1.0);
    assert_eq!(vp.max_scroll(), 480.0);
}

#[test]
fn test_set_zoom_clamps_to_bounds() {
    let mut vp = viewport();
    vp.set_zoom(0.2);
    assert_eq!(vp.zoom(), 1.0);
    vp.set_zoom(50.0);
    assert_eq!(vp.zoom(), 6.0);
    vp.set_zoom(f64::NAN);
    assert_eq!(vp.zoom(), 6.0);
}

#[test]
fn test_canvas_preset_allows_zoom_out() {
    let mut vp = Viewport::new(960.0, 480.0, ViewportSettings::canvas());
    assert_eq!(vp.zoom(), 0.5);
    vp.set_zoom(10.0);
    assert_eq!(vp.zoom(), 10.0);
    // Content narrower than the viewport cannot scroll.
    vp.set_zoom(0.5);
    assert_eq!(vp.max_scroll(), 0.0);
}

#[test]
fn test_zoom_to_cursor_uses_live_scroll() {
    let mut vp = viewport();
    vp.set_zoom(2.0);
    vp.set_scroll_offset(300.0);

    let cursor = 120.0;
    let world_before = screen_to_world(cursor + vp.scroll_offset(), vp.zoom());
    vp.zoom_to_cursor(cursor, 3.0);

    let screen_after = world_to_screen(world_before, vp.zoom()) - vp.scroll_offset();
    assert!((screen_after - cursor).abs() < 1.0);
    assert_eq!(vp.scroll_offset(), 510.0);
}

#[test]
fn test_zoom_to_cursor_clamps_scroll_at_left_edge() {
    let mut vp = viewport();
    vp.zoom_to_cursor(0.0, 4.0);
    assert_eq!(vp.zoom(), 4.0);
    assert_eq!(vp.scroll_offset(), 0.0);

    vp.zoom_to_cursor(0.0, 1.0);
    assert_eq!(vp.scroll_offset(), 0.0);
}

#[test]
fn test_zoom_out_clamps_scroll_to_max() {
    let mut vp = viewport();
    vp.set_zoom(6.0);
    vp.set_scroll_offset(vp.max_scroll());
    vp.zoom_to_cursor(480.0, 1.0);
    assert_eq!(vp.scroll_offset(), 480.0);
    assert!(vp.scroll_offset() <= vp.max_scroll());
}

#[test]
fn test_zoom_steps() {
    let mut vp = viewport();
    vp.zoom_in_at(100.0);
    assert!((vp.zoom() - 1.2).abs() < 1e-12);
    vp.zoom_out_at(100.0);
    assert!((vp.zoom() - 1.0).abs() < 1e-12);
    vp.zoom_out_at(100.0);
    assert_eq!(vp.zoom(), 1.0);
}

#[test]
fn test_reset_zoom() {
    let mut vp = viewport();
    vp.set_zoom(5.0);
    vp.scroll_by(1000.0);
    vp.reset_zoom();
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(vp.scroll_offset(), 0.0);
}

#[test]
fn test_width_changes_reclamp_scroll() {
    let mut vp = viewport();
    vp.set_zoom(2.0);
    vp.set_scroll_offset(1440.0);
    vp.set_viewport_width(960.0);
    assert_eq!(vp.scroll_offset(), 960.0);
    vp.set_content_width(600.0);
    assert_eq!(vp.scroll_offset(), 240.0);
}

#[test]
fn test_device_pixel_ratio_source() {
    let mut vp = viewport();
    assert_eq!(vp.update_device_pixel_ratio(&FixedPixelRatio(None)), 1.0);
    assert_eq!(vp.update_device_pixel_ratio(&FixedPixelRatio(Some(2.0))), 2.0);
    assert_eq!(vp.update_device_pixel_ratio(&FixedPixelRatio(Some(8.0))), 4.0);
    assert_eq!(vp.device_pixel_ratio(), 4.0);

    let size = vp.canvas_size(390.0);
    assert_eq!(size.backing_width, 3840);
    assert_eq!(size.style_width, 960.0);
}

#[test]
fn test_display_format() {
    let mut vp = viewport();
    vp.set_zoom(1.5);
    vp.set_scroll_offset(120.0);
    vp.update_device_pixel_ratio(&FixedPixelRatio(Some(2.0)));
    assert_eq!(vp.to_string(), "Zoom: 1.50x | Scroll: 120.0px | DPR: 2.0");
}
