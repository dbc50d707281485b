//! End-to-end behaviour of the table through its public API.

use bubbletea_datatable::badges::visible_count;
use bubbletea_datatable::fitter::{FrameScheduler, RowFitter};
use bubbletea_datatable::prelude::*;
use bubbletea_rs::{KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::lipgloss;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
struct Course {
    id: usize,
    title: String,
    topics: Vec<String>,
}

impl Record for Course {
    fn key(&self) -> String {
        self.id.to_string()
    }

    fn value(&self, column: &str) -> CellValue {
        match column {
            "title" => CellValue::Text(self.title.clone()),
            "topics" => CellValue::Relations(self.topics.clone()),
            _ => CellValue::Empty,
        }
    }
}

fn courses(n: usize) -> Vec<Course> {
    (1..=n)
        .map(|id| Course {
            id,
            title: format!("Course {id:02}"),
            topics: Vec::new(),
        })
        .collect()
}

fn columns() -> Vec<Column<Course>> {
    vec![
        Column::text("title", "Title").sortable().searchable(),
        Column::relations("topics", "Topics", "topics"),
    ]
}

fn key(code: KeyCode) -> Msg {
    Box::new(KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    })
}

fn visible_ids(table: &Table<Course>) -> Vec<usize> {
    table.controller().visible_rows().iter().map(|c| c.id).collect()
}

#[test]
fn test_local_table_pages_in_memory() {
    let mut table = Table::local(columns()).with_page_size(PageSize::Fixed(10));
    table.set_rows(courses(23));

    assert_eq!(table.controller().page_count(), 3);
    assert_eq!(visible_ids(&table), (1..=10).collect::<Vec<_>>());

    table.update(key(KeyCode::End));
    assert_eq!(table.controller().page_index(), 2);
    assert_eq!(visible_ids(&table), vec![21, 22, 23]);

    // Already on the last page.
    table.update(key(KeyCode::Right));
    assert_eq!(table.controller().page_index(), 2);
}

#[test]
fn test_delegated_next_page_only_notifies() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&calls);
    let inputs = DelegatedState {
        page_index: 0,
        page_size: 10,
        total_page_count: Some(5),
        ..DelegatedState::default()
    };
    let mut table = Table::delegated(columns(), inputs).with_callbacks(
        Callbacks::new().on_page_change(move |page| {
            if let Ok(mut calls) = seen.lock() {
                calls.push(page);
            }
        }),
    );
    table.set_rows(courses(10));

    table.update(key(KeyCode::Right));

    assert_eq!(*calls.lock().unwrap(), vec![1]);
    // Nothing moves until the caller syncs the fetched page.
    assert_eq!(table.controller().page_index(), 0);
    assert_eq!(visible_ids(&table), (1..=10).collect::<Vec<_>>());

    table.sync_rows(
        (11..=20)
            .map(|id| Course {
                id,
                title: format!("Course {id}"),
                topics: Vec::new(),
            })
            .collect(),
        DelegatedState {
            page_index: 1,
            page_size: 10,
            total_page_count: Some(5),
            ..DelegatedState::default()
        },
    );
    assert_eq!(table.controller().page_index(), 1);
    assert_eq!(visible_ids(&table), (11..=20).collect::<Vec<_>>());
}

#[test]
fn test_delegated_search_is_forwarded_verbatim() {
    let searches = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&searches);
    let mut table = Table::delegated(columns(), DelegatedState::default()).with_callbacks(
        Callbacks::new().on_search_change(move |text: &str| {
            if let Ok(mut searches) = seen.lock() {
                searches.push(text.to_string());
            }
        }),
    );
    table.set_rows(courses(3));

    table.update(key(KeyCode::Char('/')));
    table.update(key(KeyCode::Char('R')));
    table.update(key(KeyCode::Char('u')));

    assert_eq!(*searches.lock().unwrap(), vec!["R".to_string(), "Ru".to_string()]);
    assert_eq!(table.controller().state().search_text, "");
}

#[test]
fn test_fitter_follows_shrinking_container() {
    let fitter = RowFitter::new().with_header_height(48).with_row_height(48);
    let mut frames = FrameScheduler::new();

    let _ = frames.schedule(600);
    let height = frames.take(&frames.frame_msg());
    assert_eq!(height.and_then(|h| fitter.rows_for(h)), Some(11));

    // A burst of observations lands as the last one.
    let _ = frames.schedule(400);
    let stale = frames.frame_msg();
    let _ = frames.schedule(150);
    assert_eq!(frames.take(&stale), None);
    let height = frames.take(&frames.frame_msg());
    assert_eq!(height.and_then(|h| fitter.rows_for(h)), Some(5));
}

#[test]
fn test_badges_reserve_room_for_indicator() {
    let widths = [60; 8];
    let visible = visible_count(&widths, 250, 30, 4);
    assert_eq!(visible, 3);
    assert_eq!(format!("+{}", widths.len() - visible), "+5");
}

#[test]
fn test_relation_cell_shows_overflow_indicator() {
    let topics: Vec<String> = (1..=8).map(|i| format!("t{i}")).collect();
    let lookups = Lookups::new().with_relation(
        "topics",
        topics.iter().map(|k| (k.clone(), format!("Topic number {k}"))),
    );
    let mut table = Table::local(columns())
        .with_page_size(PageSize::Fixed(5))
        .with_lookups(lookups)
        .with_width(60);
    table.set_rows(vec![Course {
        id: 1,
        title: "Rust".to_string(),
        topics,
    }]);

    let view = lipgloss::strip_ansi(&table.view());
    assert!(view.contains("[Topic number t1]"), "{view}");
    assert!(!view.contains("[Topic number t2]"), "{view}");
    assert!(view.contains("+7"), "{view}");
}

#[test]
fn test_empty_search_result_renders_no_results() {
    let mut table = Table::local(columns()).with_page_size(PageSize::Fixed(10));
    table.set_rows(courses(4));
    table.controller_mut().set_search_text("nothing like this");

    assert_eq!(table.controller().page_count(), 0);
    let view = lipgloss::strip_ansi(&table.view());
    assert!(view.contains("No results."), "{view}");
}
