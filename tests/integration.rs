// SPDX-License-Identifier: MPL-2.0
//! End-to-end browsing scenarios against real files in a temporary folder.

use approx::assert_abs_diff_eq;
use handy_lens::config::Config;
use handy_lens::domain::ui::{PaneId, ZoomFactor, ZoomStep};
use handy_lens::session::{Session, ViewMode};
use handy_lens::ui::state::{ZoomMode, ZoomRequest};
use iced::Size;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    image_rs::RgbImage::from_pixel(width, height, image_rs::Rgb([90, 120, 200]))
        .save(&path)
        .expect("write test image");
    path
}

fn folder_with(names: &[&str], width: u32) -> TempDir {
    let dir = tempdir().expect("temp dir");
    for name in names {
        write_png(dir.path(), name, width, 20);
    }
    dir
}

fn current_name(session: &Session) -> String {
    session
        .current_path()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn pane_zoom(session: &Session, index: usize) -> f32 {
    let id = PaneId::new(index).expect("pane id");
    session
        .coordinator()
        .pane(id)
        .expect("pane exists")
        .zoom()
        .value()
}

#[test]
fn natural_order_browsing_wraps_both_ways() {
    let dir = folder_with(&["a10.png", "a2.png", "a1.png", "notes.txt"], 600);
    let mut session = Session::with_filesystem(&Config::default());

    session.open(dir.path()).expect("open folder");
    assert_eq!(session.counter_label(), "[1 / 3] a1.png");

    session.path_browse(1).expect("next");
    assert_eq!(current_name(&session), "a2.png");
    session.path_browse(1).expect("next");
    assert_eq!(current_name(&session), "a10.png");
    session.path_browse(1).expect("wrap forward");
    assert_eq!(current_name(&session), "a1.png");
    session.path_browse(-1).expect("wrap backward");
    assert_eq!(current_name(&session), "a10.png");
}

#[test]
fn opening_a_file_selects_it_in_its_folder() {
    let dir = folder_with(&["b1.png", "b2.png", "b3.png"], 600);
    let mut session = Session::with_filesystem(&Config::default());

    session.open(&dir.path().join("b2.png")).expect("open file");
    assert_eq!(session.counter_label(), "[2 / 3] b2.png");

    assert!(session.goto("").expect("goto first"));
    assert_eq!(current_name(&session), "b1.png");
    assert!(!session.goto("abc").expect("invalid goto"));
    assert_eq!(current_name(&session), "b1.png");
}

#[test]
fn shorter_comparison_folder_clamps_index() {
    let main = folder_with(&["m1.png", "m2.png", "m3.png", "m4.png", "m5.png"], 600);
    let other = folder_with(&["c1.png", "c2.png", "c3.png"], 600);
    let mut session = Session::with_filesystem(&Config::default());

    session.open(main.path()).expect("open main");
    assert!(session.goto("5").expect("goto"));
    assert_eq!(current_name(&session), "m5.png");

    let report = session
        .add_comparison_folder(other.path())
        .expect("add comparison");
    assert!(!report.is_same_length);
    let warning = report.warning().expect("length warning");
    assert!(warning.contains("5, 3"));

    session.reload_current().expect("reload");
    assert_eq!(session.view_mode(), ViewMode::Comparison);
    assert_eq!(session.pane_count(), 2);
    let targets = session.browse().pane_paths(2);
    assert_eq!(
        targets[1].as_deref().and_then(Path::file_name),
        Some("c3.png".as_ref())
    );

    session.folder_browse(1).expect("to comparison folder");
    assert_eq!(current_name(&session), "c3.png");
    assert_eq!(
        session.comparison_label().as_deref(),
        Some("Folder 2 / 2 (5 / 3 images)")
    );
}

#[test]
fn broadcast_zoom_aligns_panes_and_suppression_keeps_siblings() {
    let main = folder_with(&["x1.png", "x2.png"], 600);
    let other = folder_with(&["y1.png", "y2.png"], 600);
    let mut session = Session::with_filesystem(&Config::default());
    session.open(main.path()).expect("open main");
    session
        .add_comparison_folder(other.path())
        .expect("add comparison");
    session.reload_current().expect("reload");

    let step = ZoomStep::new(1.2);
    let zoomed = session
        .zoom(PaneId::FIRST, ZoomRequest::In(step), None, true)
        .expect("zoom first pane");
    assert_abs_diff_eq!(pane_zoom(&session, 0), zoomed.value());
    assert_abs_diff_eq!(pane_zoom(&session, 1), zoomed.value());

    let second = PaneId::new(1).expect("pane id");
    session.zoom(second, ZoomRequest::In(step), None, false);
    assert_abs_diff_eq!(pane_zoom(&session, 0), zoomed.value());
    assert!(pane_zoom(&session, 1) > zoomed.value());
}

#[test]
fn precise_round_trip_at_unity_keeps_original_size() {
    let dir = tempdir().expect("temp dir");
    let path = write_png(dir.path(), "wide.png", 640, 48);
    let mut session = Session::with_filesystem(&Config::default());
    session.open(&path).expect("open");
    session.resize_pane(PaneId::FIRST, Size::new(320.0, 240.0));

    let pane = session.coordinator().pane(PaneId::FIRST).expect("pane");
    assert_eq!(pane.zoom(), ZoomFactor::ONE);
    assert_eq!(pane.display_size(), Size::new(640.0, 48.0));

    assert_eq!(session.toggle_zoom_mode(PaneId::FIRST), Some(ZoomMode::Precise));
    let pane = session.coordinator().pane(PaneId::FIRST).expect("pane");
    assert!(pane.counts_zoom());
    assert_eq!(pane.display_size(), Size::new(640.0, 48.0));

    assert_eq!(session.toggle_zoom_mode(PaneId::FIRST), Some(ZoomMode::Fast));
    let pane = session.coordinator().pane(PaneId::FIRST).expect("pane");
    assert!(!pane.counts_zoom());
    assert_eq!(pane.display_size(), Size::new(640.0, 48.0));
}

#[test]
fn auto_fit_enlarges_small_images_on_open_only() {
    let dir = tempdir().expect("temp dir");
    let small = write_png(dir.path(), "s1.png", 100, 20);
    write_png(dir.path(), "s2.png", 40, 20);
    let mut session = Session::with_filesystem(&Config::default());

    session.open(&small).expect("open");
    assert_abs_diff_eq!(pane_zoom(&session, 0), 5.0);
    assert_eq!(session.zoom_label(), "Zoom: 5.00");

    // Browsing keeps the zoom chosen on open.
    session.path_browse(1).expect("next");
    assert_abs_diff_eq!(pane_zoom(&session, 0), 5.0);
}

#[test]
fn target_width_overrides_auto_fit() {
    let dir = tempdir().expect("temp dir");
    write_png(dir.path(), "t1.png", 100, 20);
    write_png(dir.path(), "t2.png", 400, 20);
    let mut session = Session::with_filesystem(&Config::default());

    session.set_target_width(800.0);
    session.open(dir.path()).expect("open");
    assert_abs_diff_eq!(pane_zoom(&session, 0), 8.0);
    session.path_browse(1).expect("next");
    assert_abs_diff_eq!(pane_zoom(&session, 0), 2.0);
}

#[test]
fn empty_filter_result_keeps_previous_listing() {
    let dir = folder_with(&["cat1.png", "cat2.png", "dog1.png"], 600);
    let mut session = Session::with_filesystem(&Config::default());
    session.open(dir.path()).expect("open");

    session
        .set_include_names(Some(vec!["cat".into()]))
        .expect("include cats");
    assert_eq!(session.browse().path_count(0), 2);

    let err = session
        .set_include_names(Some(vec!["zebra".into()]))
        .expect_err("nothing matches");
    assert!(matches!(
        err,
        handy_lens::error::Error::EmptyResult { .. }
    ));
    assert_eq!(session.browse().path_count(0), 2);
    assert_eq!(
        session.browse().include_names(),
        Some(&["cat".to_string()][..])
    );
}
