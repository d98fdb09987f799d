//! Index generation tests
//!
//! Walking a content tree, extracting course records from courses-list
//! blocks, and feeding the generated document back into the search widget's
//! fetcher.

use blockdeck::index::{generate_index, write_index};
use blockdeck::search::{filter_records, FileIndexFetcher, IndexFetcher};
use std::fs;
use tempfile::TempDir;

fn write_courses_page(dir: &std::path::Path, file: &str, page_path: &str, courses: &[[&str; 8]]) {
    let mut rows = vec![
        r#"[{ "text": "Our Courses" }]"#.to_string(),
        r#"[{ "text": "Code" }, { "text": "Title" }, { "text": "Description" }, { "text": "Type" }, { "text": "Mode" }, { "text": "Campus" }, { "text": "Duration" }, { "text": "Area" }]"#.to_string(),
    ];
    for course in courses {
        let cells: Vec<String> = course
            .iter()
            .map(|c| format!(r#"{{ "text": {} }}"#, serde_json::to_string(c).expect("json")))
            .collect();
        rows.push(format!("[{}]", cells.join(", ")));
    }
    let doc = format!(
        r#"{{ "path": "{}", "blocks": [ {{ "name": "courses-list", "rows": [{}] }} ] }}"#,
        page_path,
        rows.join(", ")
    );
    fs::write(dir.join(file), doc).expect("write page");
}

#[test]
fn generate_index_walks_pages_and_skips_headers() {
    let temp_dir = TempDir::new().expect("temp dir");
    let content = temp_dir.path().join("content");
    fs::create_dir_all(&content).expect("mkdir");

    write_courses_page(
        &content,
        "biology.json",
        "/courses/biology",
        &[[
            "BIO101",
            "Intro to Biology",
            "Cells and systems",
            "Undergraduate",
            "On campus",
            "City",
            "3 years",
            "\"Science\"\n",
        ]],
    );
    write_courses_page(
        &content,
        "physics.json",
        "/courses/physics",
        &[[
            "PHY201",
            "Physics",
            "basic concepts",
            "Undergraduate",
            "Online",
            "North",
            "3 years",
            "Science",
        ]],
    );
    // A page without a courses-list contributes nothing.
    fs::write(
        content.join("about.json"),
        r#"{ "path": "/about", "blocks": [] }"#,
    )
    .expect("write about");
    // A malformed page is skipped with a warning, not a failure.
    fs::write(content.join("broken.json"), "{ nope").expect("write broken");

    let index = generate_index(&content).expect("generate");
    assert_eq!(index.data.len(), 2);

    // Deterministic order: biology.json sorts before physics.json.
    assert_eq!(index.data[0].code, "BIO101");
    assert_eq!(index.data[0].path, "/courses/biology");
    assert_eq!(index.data[0].area, "Science", "quotes and newlines stripped");
    assert_eq!(index.data[1].code, "PHY201");
}

#[test]
fn generated_index_feeds_the_search_widget() {
    let temp_dir = TempDir::new().expect("temp dir");
    let content = temp_dir.path().join("content");
    fs::create_dir_all(&content).expect("mkdir");
    write_courses_page(
        &content,
        "courses.json",
        "/courses",
        &[
            [
                "BIO101",
                "Intro to Biology",
                "",
                "UG",
                "On campus",
                "City",
                "3 years",
                "Science",
            ],
            [
                "PHY201",
                "Physics",
                "basic concepts",
                "UG",
                "Online",
                "North",
                "3 years",
                "Science",
            ],
        ],
    );

    let index = generate_index(&content).expect("generate");
    let out = temp_dir.path().join("query-index.json");
    write_index(&index, &out).expect("write");

    // The widget-side fetcher reads the generated document directly.
    let fetcher = FileIndexFetcher::new(&out);
    let query_index = fetcher.fetch().expect("fetch");
    assert_eq!(query_index.data.len(), 2);

    let results = filter_records(&query_index.data, "con");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].path, "/courses");
    assert_eq!(results[0].title, "Physics");
}

#[test]
fn generate_index_rejects_missing_directory() {
    let temp_dir = TempDir::new().expect("temp dir");
    let missing = temp_dir.path().join("nope");
    assert!(generate_index(&missing).is_err());
}
