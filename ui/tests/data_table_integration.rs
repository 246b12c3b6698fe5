//! The table widget on its own, over trip rows.

use egui_kittest::Harness;
use kittest::Queryable;
use safari_business::data_table::{ActionKind, Column, RowAction, TableView};
use safari_business::models::Trip;
use safari_ui::pages::trip_columns;
use safari_ui::widgets::{DataTable, NO_ENTRIES};
use ustr::Ustr;

struct Fixture {
    columns: Vec<Column<Trip>>,
    rows: Vec<Trip>,
    revision: u64,
    view: TableView,
    clicked: Vec<RowAction>,
}

fn trips(count: usize) -> Vec<Trip> {
    (1..=count)
        .map(|n| Trip {
            id: Ustr::from(format!("t{n}").as_str()),
            name: Some(format!("Trip {n}")),
            destination: Some("Kenya".to_owned()),
            price: Some(100.0),
            is_active: true,
            ..Trip::default()
        })
        .collect()
}

fn harness<'a>(rows: Vec<Trip>) -> Harness<'a, Fixture> {
    let fixture = Fixture {
        columns: trip_columns(),
        rows,
        revision: 1,
        view: TableView::new(),
        clicked: Vec::new(),
    };
    Harness::new_ui_state(
        |ui, fixture: &mut Fixture| {
            let clicked = DataTable::builder()
                .id("fixture")
                .columns(&fixture.columns)
                .rows(&fixture.rows)
                .revision(fixture.revision)
                .build()
                .show(ui, &mut fixture.view);
            fixture.clicked.extend(clicked);
        },
        fixture,
    )
}

#[test]
fn test_first_page_of_many() {
    let mut harness = harness(trips(25));
    harness.step();

    assert!(harness.query_by_label("Showing 1 to 10 of 25 entries").is_some());
    assert!(harness.query_by_label("Trip 10").is_some());
    assert!(harness.query_by_label("Trip 11").is_none());
    assert!(harness.query_by_label("Search:").is_some());
    assert!(harness.query_by_label("Next").is_some());
}

#[test]
fn test_next_and_page_buttons() {
    let mut harness = harness(trips(25));
    harness.step();

    harness.get_by_label("Next").click();
    harness.step();
    harness.step();
    assert!(harness.query_by_label("Showing 11 to 20 of 25 entries").is_some());
    assert_eq!(harness.state().view.current_page(), 2);

    harness.get_by_label("3").click();
    harness.step();
    harness.step();
    assert!(harness.query_by_label("Showing 21 to 25 of 25 entries").is_some());
    assert!(harness.query_by_label("Trip 25").is_some());
}

#[test]
fn test_search_narrows_rows_and_hides_pagination() {
    let mut harness = harness(trips(25));
    harness.state_mut().view.set_page(3);
    harness.step();

    harness.state_mut().view.set_search_query("Trip 7");
    harness.step();

    assert!(harness.query_by_label("Showing 1 to 1 of 1 entries").is_some());
    assert!(harness.query_by_label("Trip 7").is_some());
    assert!(harness.query_by_label("Next").is_none());
    assert_eq!(harness.state().view.current_page(), 1);
}

#[test]
fn test_zero_matches_shows_placeholder() {
    let mut harness = harness(trips(5));
    harness.state_mut().view.set_search_query("zanzibar");
    harness.step();

    assert!(harness.query_by_label(NO_ENTRIES).is_some());
    assert!(harness.query_by_label("Showing 0 to 0 of 0 entries").is_some());
}

#[test]
fn test_empty_data() {
    let mut harness = harness(Vec::new());
    harness.step();

    assert!(harness.query_by_label(NO_ENTRIES).is_some());
    assert!(harness.query_by_label("Next").is_none());
    assert!(harness.query_by_label("Previous").is_none());
}

#[test]
fn test_new_revision_refilters() {
    let mut harness = harness(trips(3));
    harness.state_mut().view.set_search_query("Trip 4");
    harness.step();
    assert!(harness.query_by_label(NO_ENTRIES).is_some());

    {
        let fixture = harness.state_mut();
        fixture.rows = trips(4);
        fixture.revision = 2;
    }
    harness.step();
    assert!(harness.query_by_label("Trip 4").is_some());
    assert!(harness.query_by_label("Showing 1 to 1 of 1 entries").is_some());
}

#[test]
fn test_row_action_is_reported() {
    let mut harness = harness(trips(1));
    harness.step();

    harness.get_by_label("Edit").click();
    harness.step();

    assert_eq!(
        harness.state().clicked,
        vec![RowAction::new(ActionKind::Edit, Ustr::from("t1"), "Edit")]
    );
}
