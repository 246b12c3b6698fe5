//! Searchable, paginated table over any [`TableRow`] list.
//!
//! All filtering and page arithmetic happens in [`TableView`]; this widget only
//! draws the slice it returns and records clicks back into the view.

use egui::{ComboBox, CornerRadius, Frame, Margin, RichText, TextEdit, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};
use safari_business::data_table::{
    Cell, Column, PageSize, PageSlice, RowAction, TableRow, TableView, Tone,
};

use crate::utils::colors::tone_color;

pub const NO_ENTRIES: &str = "No entries found";

const ROW_HEIGHT: f32 = 28.0;

#[derive(bon::Builder)]
pub struct DataTable<'a, R> {
    /// Salt for widget ids; must be unique per page.
    id: &'a str,
    columns: &'a [Column<R>],
    rows: &'a [R],
    revision: u64,
    #[builder(into)]
    heading: Option<String>,
    #[builder(default = true)]
    show_search: bool,
    #[builder(default = true)]
    show_entries: bool,
    #[builder(default = true)]
    show_pagination: bool,
}

impl<R: TableRow> DataTable<'_, R> {
    /// Draws the table and returns the row actions clicked this frame.
    pub fn show(self, ui: &mut Ui, view: &mut TableView) -> Vec<RowAction> {
        let slice = if self.show_pagination {
            view.slice(self.columns, self.rows, self.revision, self.show_search)
        } else {
            view.unpaginated(self.columns, self.rows, self.revision, self.show_search)
        };
        let mut clicked = Vec::new();

        ui.vertical(|ui| {
            if let Some(heading) = &self.heading {
                ui.heading(heading);
                ui.add_space(4.0);
            }

            if self.show_entries || self.show_search {
                ui.horizontal(|ui| {
                    if self.show_entries {
                        self.entries_selector(ui, view);
                    }
                    if self.show_search {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            search_box(ui, view);
                            ui.label("Search:");
                        });
                    }
                });
                ui.add_space(6.0);
            }

            self.body(ui, &slice, &mut clicked);

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(slice.summary());
                if self.show_pagination && slice.is_paginated() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        pagination(ui, &slice, view);
                    });
                }
            });
        });

        clicked
    }

    fn entries_selector(&self, ui: &mut Ui, view: &mut TableView) {
        let current = view.page_size();
        ui.label("Show");
        ComboBox::from_id_salt((self.id, "entries"))
            .width(60.0)
            .selected_text(current.rows().to_string())
            .show_ui(ui, |ui| {
                for size in PageSize::ALL {
                    if ui
                        .selectable_label(size == current, size.rows().to_string())
                        .clicked()
                    {
                        view.set_page_size(size);
                    }
                }
            });
        ui.label("entries");
    }

    fn body(&self, ui: &mut Ui, slice: &PageSlice, clicked: &mut Vec<RowAction>) {
        let columns = self.columns.len().max(1);

        egui::ScrollArea::horizontal()
            .id_salt((self.id, "scroll"))
            .show(ui, |ui| {
                TableBuilder::new(ui)
                    .id_salt((self.id, "table"))
                    .striped(true)
                    .vscroll(false)
                    .columns(TableColumn::auto().at_least(60.0).resizable(true), columns)
                    .header(ROW_HEIGHT, |mut header| {
                        for column in self.columns {
                            header.col(|ui| {
                                ui.strong(column.header);
                            });
                        }
                    })
                    .body(|mut body| {
                        if slice.rows.is_empty() {
                            body.row(ROW_HEIGHT, |mut row| {
                                row.col(|ui| {
                                    ui.label(RichText::new(NO_ENTRIES).italics().weak());
                                });
                                for _ in 1..columns {
                                    row.col(|_| {});
                                }
                            });
                            return;
                        }

                        for &index in &slice.rows {
                            let Some(data) = self.rows.get(index) else {
                                continue;
                            };
                            body.row(ROW_HEIGHT, |mut row| {
                                for column in self.columns {
                                    row.col(|ui| {
                                        draw_cell(ui, column.render(data), clicked);
                                    });
                                }
                            });
                        }
                    });
            });
    }
}

fn search_box(ui: &mut Ui, view: &mut TableView) {
    let mut query = view.search_query().to_owned();
    let response = ui.add(
        TextEdit::singleline(&mut query)
            .hint_text("Search...")
            .desired_width(180.0),
    );
    if response.changed() {
        view.set_search_query(query);
    }
}

fn pagination(ui: &mut Ui, slice: &PageSlice, view: &mut TableView) {
    // Laid out right to left.
    if ui
        .add_enabled(slice.has_next(), egui::Button::new("Next"))
        .clicked()
    {
        view.set_page(slice.current_page + 1);
    }
    for page in (1..=slice.total_pages).rev() {
        if ui
            .selectable_label(page == slice.current_page, page.to_string())
            .clicked()
        {
            view.set_page(page);
        }
    }
    if ui
        .add_enabled(slice.has_previous(), egui::Button::new("Previous"))
        .clicked()
    {
        view.set_page(slice.current_page - 1);
    }
}

fn draw_cell(ui: &mut Ui, cell: Cell, clicked: &mut Vec<RowAction>) {
    match cell {
        Cell::Text(text) => {
            ui.label(text);
        }
        Cell::Badge { text, tone } => badge(ui, &text, tone),
        Cell::Actions(actions) => {
            ui.horizontal(|ui| {
                for action in actions {
                    if ui.small_button(action.label.as_str()).clicked() {
                        clicked.push(action);
                    }
                }
            });
        }
    }
}

/// Rounded, tinted label used for statuses.
pub fn badge(ui: &mut Ui, text: &str, tone: Tone) {
    let color = tone_color(tone);
    Frame::NONE
        .fill(color.gamma_multiply(0.15))
        .corner_radius(CornerRadius::same(8))
        .inner_margin(Margin::symmetric(8, 2))
        .show(ui, |ui| {
            ui.label(RichText::new(text).color(color).small().strong());
        });
}

/// Inline success / error line under a toolbar.
pub fn notice(ui: &mut Ui, text: &str, ok: bool) {
    let color = tone_color(if ok { Tone::Success } else { Tone::Danger });
    ui.colored_label(color, text);
}
