//! Block decoration tests
//!
//! Page loading, per-block decoration, isolation of failed blocks, and the
//! unified search-bar configuration.

use blockdeck::block::{
    decorate_page, AlertBanner, Block, Cell, DecoratedBlock, Page, SearchBarConfig, Teaser,
    TeaserLayout,
};
use std::fs;
use tempfile::TempDir;

fn text_cell(text: &str) -> Cell {
    Cell {
        text: Some(text.to_string()),
        ..Cell::default()
    }
}

fn image_cell(src: &str) -> Cell {
    Cell {
        image: Some(src.to_string()),
        ..Cell::default()
    }
}

#[test]
fn page_document_round_trips_through_decoration() {
    let temp_dir = TempDir::new().expect("temp dir");
    let page_path = temp_dir.path().join("page.json");
    fs::write(
        &page_path,
        r#"{
  "path": "/study",
  "blocks": [
    { "name": "alertbanner", "rows": [[{ "text": "Applications close soon" }]] },
    {
      "name": "teaser",
      "variants": ["image-right"],
      "rows": [
        [{ "image": "/media/lab.png" }],
        [{ "text": "Research" }, { "text": "Marine Science" }, { "text": "Hands-on field work." }],
        [{ "text": "Explore", "link": "/marine" }]
      ]
    },
    { "name": "search", "rows": [[{ "image": "/icons/search.svg" }], [{ "text": "Find a course" }]] }
  ]
}"#,
    )
    .expect("write page");

    let page = Page::load(&page_path).expect("load page");
    let decorated = decorate_page(&page);

    assert_eq!(decorated.blocks.len(), 2);
    match &decorated.blocks[0] {
        DecoratedBlock::AlertBanner(banner) => {
            assert_eq!(banner.message, "Applications close soon");
        }
        other => panic!("expected banner, got {:?}", other),
    }
    match &decorated.blocks[1] {
        DecoratedBlock::Teaser(teaser) => {
            assert_eq!(teaser.title, "Marine Science");
            assert_eq!(teaser.layout, TeaserLayout::SideBySide { mirrored: true });
            assert_eq!(teaser.cta.as_ref().map(|c| c.href.as_str()), Some("/marine"));
        }
        other => panic!("expected teaser, got {:?}", other),
    }

    let bar = decorated.search_bar.expect("search bar config");
    assert_eq!(bar.label, "Find a course");
    assert_eq!(bar.icon.as_deref(), Some("/icons/search.svg"));
}

#[test]
fn failed_teaser_does_not_crash_siblings() {
    let page = Page {
        path: "/p".to_string(),
        blocks: vec![
            // No image: this teaser's enhancement aborts.
            Block {
                name: "teaser".to_string(),
                variants: vec![],
                rows: vec![vec![text_cell("orphan text")]],
            },
            Block {
                name: "alertbanner".to_string(),
                variants: vec![],
                rows: vec![vec![text_cell("Still here")]],
            },
            Block {
                name: "teaser".to_string(),
                variants: vec![],
                rows: vec![
                    vec![image_cell("/media/ok.png")],
                    vec![text_cell("Valid teaser")],
                ],
            },
        ],
    };

    let decorated = decorate_page(&page);
    assert_eq!(decorated.blocks.len(), 2);
    assert!(matches!(decorated.blocks[0], DecoratedBlock::AlertBanner(_)));
    assert!(matches!(decorated.blocks[1], DecoratedBlock::Teaser(_)));
}

#[test]
fn banner_dismissal_is_visual_only() {
    let block = Block {
        name: "alertbanner".to_string(),
        variants: vec![],
        rows: vec![vec![text_cell("Exam timetable released")]],
    };

    let mut banner = AlertBanner::decorate(&block).expect("decorate");
    assert!(banner.is_visible());
    banner.dismiss();
    assert!(!banner.is_visible());

    // Re-decorating the same authored block yields a fresh, visible banner:
    // dismissal does not persist.
    let fresh = AlertBanner::decorate(&block).expect("decorate again");
    assert!(fresh.is_visible());
}

#[test]
fn teaser_variant_flags_pick_layout_and_mirroring() {
    let rows = vec![
        vec![image_cell("/media/x.png")],
        vec![text_cell("Open Day"), text_cell("Visit Us")],
    ];
    let mk = |variants: &[&str]| Block {
        name: "teaser".to_string(),
        variants: variants.iter().map(|v| v.to_string()).collect(),
        rows: rows.clone(),
    };

    assert_eq!(
        Teaser::decorate(&mk(&[])).expect("bg").layout,
        TeaserLayout::Background
    );
    assert_eq!(
        Teaser::decorate(&mk(&["image-left"])).expect("left").layout,
        TeaserLayout::SideBySide { mirrored: false }
    );
    assert_eq!(
        Teaser::decorate(&mk(&["image-right"])).expect("right").layout,
        TeaserLayout::SideBySide { mirrored: true }
    );
}

#[test]
fn search_bar_defaults_when_rows_absent() {
    let config = SearchBarConfig::from_block(&Block {
        name: "search".to_string(),
        variants: vec![],
        rows: vec![],
    });
    assert_eq!(config.label, "Search");
    assert!(config.icon.is_none());
    assert_eq!(config, SearchBarConfig::default());
}
