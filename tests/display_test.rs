//! 表示ループテスト
//!
//! 最新結果ファイルの検出と、作り直し（リスタート）の挙動を検証

use inspection_visuals::display::{DisplayLoop, FrameOutcome, Phase};
use inspection_visuals::loader::TemplatePaths;
use std::path::Path;
use std::thread::sleep;
use std::time::Duration;
use tempfile::tempdir;

const SHAPES: &str = r#"{"Shapes": [
    {"name": "Hole", "shape": 0, "color": 1, "display_name": 1, "x": 10, "y": 10, "height": 5, "width": 5, "key": "12.3", "image": "1"}
]}"#;

fn result_json(result: &str, name: &str) -> String {
    format!(
        r#"{{"Cameras": [{{
            "Inspections": [{{"ResultParameters": [["Diameter", "12.3"]], "Result": "{result}", "Name": "{name}"}}],
            "ImageLocations": [{{"StorageType": "ID", "ImageType": "Png", "FileName": "live.png"}}]
        }}]}}"#
    )
}

fn setup(dir: &Path) -> DisplayLoop {
    let paths = TemplatePaths {
        static_shapes: dir.join("ShapeData.json"),
        live_shapes: dir.join("LiveImageShapes.json"),
        live_image_dir: dir.to_path_buf(),
    };
    std::fs::write(&paths.static_shapes, SHAPES).unwrap();
    std::fs::write(&paths.live_shapes, SHAPES).unwrap();
    DisplayLoop::with_paths(dir.join("results"), paths, 3)
}

fn write_result(dir: &Path, file_name: &str, body: &str) {
    std::fs::create_dir_all(dir.join("results")).unwrap();
    std::fs::write(dir.join("results").join(file_name), body).unwrap();
    // 作成日時の順序を保証する
    sleep(Duration::from_millis(20));
}

/// 結果ファイルが無い間は待機のまま
#[test]
fn test_waiting_until_result_exists() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut display = setup(dir.path());
    std::fs::create_dir_all(dir.path().join("results")).unwrap();

    assert_eq!(display.tick(Some("SYS_A")).unwrap(), FrameOutcome::Waiting);
    assert_eq!(display.phase(), Phase::Initializing);
}

/// 最新ファイルが同じなら作り直さない
#[test]
fn test_unchanged_file_keeps_state() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut display = setup(dir.path());
    write_result(dir.path(), "SYS_A_001.json", &result_json("F", "first"));

    let first = display.tick(Some("SYS_A")).unwrap();
    let path = dir.path().join("results").join("SYS_A_001.json");
    assert_eq!(first, FrameOutcome::Restarted(path.clone()));
    assert_eq!(display.phase(), Phase::RenderingFrame);

    for _ in 0..5 {
        assert_eq!(display.tick(Some("SYS_A")).unwrap(), FrameOutcome::Unchanged);
    }
    assert_eq!(display.current_file(), Some(path.as_path()));
    assert_eq!(display.frame(), 6);
}

/// 新しいファイルが来たら作り直し、フレームも初期化される
#[test]
fn test_newer_file_restarts() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut display = setup(dir.path());
    write_result(dir.path(), "SYS_A_001.json", &result_json("F", "first"));
    display.tick(Some("SYS_A")).unwrap();
    display.tick(Some("SYS_A")).unwrap();

    write_result(dir.path(), "SYS_A_002.json", &result_json("P", "second"));
    let outcome = display.tick(Some("SYS_A")).unwrap();

    let newer = dir.path().join("results").join("SYS_A_002.json");
    assert_eq!(outcome, FrameOutcome::Restarted(newer.clone()));
    assert_eq!(display.current_file(), Some(newer.as_path()));
    assert_eq!(display.frame(), 1);
    let loaded = display.loaded().expect("読み込み済み");
    assert!(loaded.binding.failed_inspections.is_empty());
    assert!(display.current_detail().is_none());
}

/// 他システムのファイルは対象外
#[test]
fn test_other_system_files_ignored() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut display = setup(dir.path());
    write_result(dir.path(), "SYS_A_001.json", &result_json("F", "a"));
    write_result(dir.path(), "SYS_B_001.json", &result_json("F", "b"));

    let outcome = display.tick(Some("SYS_A")).unwrap();
    assert_eq!(outcome, FrameOutcome::Restarted(dir.path().join("results").join("SYS_A_001.json")));

    // 識別子が切り替わると、そのシステムの最新ファイルで作り直す
    let outcome = display.tick(Some("SYS_B")).unwrap();
    assert_eq!(outcome, FrameOutcome::Restarted(dir.path().join("results").join("SYS_B_001.json")));
}

/// 不合格詳細は最初のフレームで表示され、間隔毎に巡回する
#[test]
fn test_failed_detail_rotation() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut display = setup(dir.path());
    let body = r#"{"Cameras": [{
        "Inspections": [
            {"ResultParameters": [["Diameter", "12.3"]], "Result": "F", "Name": "first"},
            {"ResultParameters": [["Diameter", "12.3"]], "Result": "F", "Name": "second"}
        ],
        "ImageLocations": [{"StorageType": "ID", "ImageType": "Png", "FileName": "live.png"}]
    }]}"#;
    write_result(dir.path(), "SYS_A_001.json", body);

    let mut shown = Vec::new();
    let mut generations = Vec::new();
    for _ in 0..7 {
        display.tick(Some("SYS_A")).unwrap();
        shown.push(display.current_detail().map(|f| f.inspection_name.clone()));
        generations.push(display.detail_generation());
    }

    let expected: Vec<Option<String>> = ["first", "first", "first", "second", "second", "second", "first"]
        .iter()
        .map(|s| Some(s.to_string()))
        .collect();
    assert_eq!(shown, expected);
    assert_eq!(generations, vec![1, 1, 1, 2, 2, 2, 3]);
}

/// 不合格詳細が1件でも、巡回のたびに切り替えとして数える
#[test]
fn test_single_detail_rotation_counts_generations() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut display = setup(dir.path());
    write_result(dir.path(), "SYS_A_001.json", &result_json("F", "only"));

    for _ in 0..4 {
        display.tick(Some("SYS_A")).unwrap();
    }
    assert_eq!(display.current_detail().map(|f| f.inspection_name.as_str()), Some("only"));
    assert_eq!(display.detail_generation(), 2);
}

/// 壊れたファイルの読み込み失敗では表示中の状態を保持する
#[test]
fn test_failed_reload_keeps_previous_state() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut display = setup(dir.path());
    write_result(dir.path(), "SYS_A_001.json", &result_json("F", "good"));
    display.tick(Some("SYS_A")).unwrap();

    write_result(dir.path(), "SYS_A_002.json", "{ broken");
    assert!(display.tick(Some("SYS_A")).is_err());

    let good = dir.path().join("results").join("SYS_A_001.json");
    assert_eq!(display.current_file(), Some(good.as_path()));
    assert_eq!(display.phase(), Phase::RenderingFrame);
}
