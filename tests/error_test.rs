//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use inspection_visuals::error::InspectionError;
use inspection_visuals::loader::{load_inspection, TemplatePaths};
use inspection_visuals::scanner;
use std::path::Path;
use tempfile::tempdir;

fn paths_in(dir: &Path) -> TemplatePaths {
    TemplatePaths {
        static_shapes: dir.join("ShapeData.json"),
        live_shapes: dir.join("LiveImageShapes.json"),
        live_image_dir: dir.to_path_buf(),
    }
}

/// 存在しない結果フォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_result_files(Path::new("/nonexistent/path/12345"), "SYS");
    assert!(matches!(result, Err(InspectionError::FolderNotFound(_))));
}

/// 結果ファイルが存在しない場合
#[test]
fn test_load_missing_result_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = load_inspection(&dir.path().join("missing.json"), &paths_in(dir.path()));
    assert!(matches!(result, Err(InspectionError::FileNotFound(_))));
}

/// テンプレートファイルが存在しない場合
#[test]
fn test_load_missing_template_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result_path = dir.path().join("SYS_001.json");
    std::fs::write(&result_path, r#"{"Cameras": []}"#).unwrap();

    let result = load_inspection(&result_path, &paths_in(dir.path()));
    match result {
        Err(InspectionError::FileNotFound(path)) => assert!(path.ends_with("ShapeData.json")),
        other => panic!("FileNotFound を期待: {:?}", other),
    }
}

/// 結果ファイルのJSONが壊れている場合
#[test]
fn test_load_malformed_result_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result_path = dir.path().join("SYS_001.json");
    std::fs::write(&result_path, "{ not json").unwrap();
    std::fs::write(dir.path().join("ShapeData.json"), r#"{"Shapes": []}"#).unwrap();
    std::fs::write(dir.path().join("LiveImageShapes.json"), r#"{"Shapes": []}"#).unwrap();

    let result = load_inspection(&result_path, &paths_in(dir.path()));
    assert!(matches!(result, Err(InspectionError::Common(inspection_common::Error::Json(_)))));
}

/// InspectionErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        InspectionError::Config("テスト設定エラー".to_string()),
        InspectionError::FileNotFound("ShapeData.json".to_string()),
        InspectionError::FolderNotFound("/path/to/folder".to_string()),
        InspectionError::Listener("0.0.0.0:12345".to_string()),
        InspectionError::NoResultFile("SYS".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: InspectionError = io_err.into();

    assert!(matches!(err, InspectionError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: InspectionError = json_err.into();

    assert!(matches!(err, InspectionError::JsonParse(_)));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_transparent() {
    let common_err = inspection_common::Error::InvalidShape("shape: 9".to_string());
    let err: InspectionError = common_err.into();

    assert!(matches!(err, InspectionError::Common(_)));
    assert_eq!(format!("{}", err), "Invalid shape: shape: 9");
}

