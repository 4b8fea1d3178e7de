// ==========================================
// 导入 API 集成测试
// ==========================================
// 测试目标: 路由解析 → 上级资源检查 → 导入 → 成功消息
// ==========================================

mod test_helpers;

use rusqlite::params;
use school_backoffice::api::ApiError;
use school_backoffice::app::AppState;
use school_backoffice::config::config_keys;
use school_backoffice::domain::UploadedFile;
use school_backoffice::importer::ImportError;
use test_helpers::{count_rows, create_test_db, csv_upload, insert_class, insert_config, insert_school, name_of};

fn setup() -> (tempfile::NamedTempFile, AppState) {
    let (temp_file, db_path) = create_test_db().expect("创建测试数据库失败");
    let state = AppState::new(db_path).expect("创建AppState失败");
    (temp_file, state)
}

#[tokio::test]
async fn test_import_schools_returns_default_message() {
    let (_temp_file, state) = setup();

    let response = state
        .import_api
        .import(
            "master_schools/import",
            Some(csv_upload("id,name,display_order\n,North,1\n,South,2\n")),
        )
        .await
        .expect("导入应成功");

    assert_eq!(response.message, "Data imported successfully");
    assert_eq!(response.summary.inserted, 2);
    assert_eq!(response.summary.target, "schools");

    let conn = state.conn.lock().unwrap();
    assert_eq!(count_rows(&conn, "schools").unwrap(), 2);
}

#[tokio::test]
async fn test_success_message_follows_configured_locale() {
    let (_temp_file, state) = setup();
    {
        let conn = state.conn.lock().unwrap();
        insert_config(&conn, config_keys::LOCALE, "ja").unwrap();
    }

    let response = state
        .import_api
        .import("admin/master_schools/import", Some(csv_upload("name\nNorth\n")))
        .await
        .unwrap();

    assert_eq!(response.message, "データをインポートしました");
}

#[tokio::test]
async fn test_import_classes_pins_school_from_route() {
    let (_temp_file, state) = setup();
    let (school_id, other_school) = {
        let conn = state.conn.lock().unwrap();
        (
            insert_school(&conn, "North").unwrap(),
            insert_school(&conn, "South").unwrap(),
        )
    };

    let route = format!("master_schools/{}/classes/import", school_id);
    let content = format!("name,school_id\nYear 1,{}\nYear 2,\n", other_school);
    let response = state
        .import_api
        .import(&route, Some(csv_upload(&content)))
        .await
        .unwrap();
    assert_eq!(response.summary.inserted, 2);

    let conn = state.conn.lock().unwrap();
    let pinned: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sclasses WHERE school_id = ?1",
            params![school_id],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(pinned, 2);
}

#[tokio::test]
async fn test_import_students_pins_class_and_validates_email() {
    let (_temp_file, state) = setup();
    let (school_id, class_id) = {
        let conn = state.conn.lock().unwrap();
        let school_id = insert_school(&conn, "North").unwrap();
        (school_id, insert_class(&conn, school_id, "Year 1").unwrap())
    };
    let route = format!(
        "master_schools/{}/classes/{}/students/import",
        school_id, class_id
    );

    let ok = state
        .import_api
        .import(
            &route,
            Some(csv_upload(
                "name,email,student_code\nHanako,hanako@example.com,S001\nTaro,,S002\n",
            )),
        )
        .await
        .unwrap();
    assert_eq!(ok.summary.inserted, 2);

    let err = state
        .import_api
        .import(
            &route,
            Some(csv_upload("name,email\nJiro,jiro@example.com\nSaburo,not-an-email\n")),
        )
        .await
        .unwrap_err();

    match err {
        ApiError::Import(ImportError::RowValidation { row, messages }) => {
            assert_eq!(row, 2);
            assert!(messages.iter().any(|m| m.contains("email")));
        }
        other => panic!("Expected row validation error, got {:?}", other),
    }

    // 失败的导入整体回滚: Jiro 未写入
    let conn = state.conn.lock().unwrap();
    assert_eq!(count_rows(&conn, "students").unwrap(), 2);
    let class_ids: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM students WHERE class_id = ?1",
            params![class_id],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(class_ids, 2);
}

#[tokio::test]
async fn test_configured_import_key_drives_updates() {
    let (_temp_file, state) = setup();
    let (school_id, class_id, student_id) = {
        let conn = state.conn.lock().unwrap();
        let school_id = insert_school(&conn, "North").unwrap();
        let class_id = insert_class(&conn, school_id, "Year 1").unwrap();
        conn.execute(
            "INSERT INTO students (class_id, name, student_code) VALUES (?1, 'Old', 'S001')",
            params![class_id],
        )
        .unwrap();
        let student_id = conn.last_insert_rowid();
        insert_config(&conn, config_keys::IMPORT_KEY, "student_code").unwrap();
        (school_id, class_id, student_id)
    };

    let route = format!(
        "master_schools/{}/classes/{}/students/import",
        school_id, class_id
    );
    let response = state
        .import_api
        .import(&route, Some(csv_upload("student_code,name\nS001,Renamed\n")))
        .await
        .unwrap();

    assert_eq!(response.summary.updated, 1);
    assert_eq!(response.summary.inserted, 0);
    let conn = state.conn.lock().unwrap();
    assert_eq!(name_of(&conn, "students", student_id).unwrap(), "Renamed");
}

#[tokio::test]
async fn test_missing_file_is_reported() {
    let (_temp_file, state) = setup();

    let err = state
        .import_api
        .import("master_schools/import", None)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Import(ImportError::FileMissing)));
}

#[tokio::test]
async fn test_empty_upload_is_invalid_input() {
    let (_temp_file, state) = setup();

    let err = state
        .import_api
        .import(
            "master_schools/import",
            Some(UploadedFile::new("empty.csv", Vec::new())),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[tokio::test]
async fn test_unknown_parent_is_not_found() {
    let (_temp_file, state) = setup();
    let school_id = {
        let conn = state.conn.lock().unwrap();
        insert_school(&conn, "North").unwrap()
    };

    let err = state
        .import_api
        .import(
            &format!("master_schools/{}/classes/999/students/import", school_id),
            Some(csv_upload("name\nHanako\n")),
        )
        .await
        .unwrap_err();

    match err {
        ApiError::NotFound(message) => assert!(message.contains("sclasses")),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_route_is_rejected() {
    let (_temp_file, state) = setup();

    for route in ["master_schools", "master_schools/abc/classes/import", "teachers/import"] {
        let err = state
            .import_api
            .import(route, Some(csv_upload("name\nNorth\n")))
            .await
            .unwrap_err();
        assert!(
            matches!(err, ApiError::RouteNotFound(_)),
            "route {} should be rejected",
            route
        );
    }
}
