use crate::board::Board;
use crate::config::Config;
use crate::logview::LogBuffer;
use crate::marker::Marker;
use crate::persist::{self, LoadOutcome};
use crate::store::{MarkerStore, StoreEvent};
use crate::tool::{ResizeDirection, ToolSize};
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

const MARKER_FILL: egui::Color32 = egui::Color32::from_rgb(200, 40, 40);
const MARKER_OUTLINE: egui::Color32 = egui::Color32::from_rgb(40, 60, 220);
const SELECTED_FILL: egui::Color32 = egui::Color32::from_rgb(240, 200, 40);

// ── App ─────────────────────────────────────────────────────────────────────

pub struct MarkerApp {
    board: Board,
    markers_path: PathBuf,
    canvas_size: egui::Vec2,
    logs: LogBuffer,
    dirty: Rc<Cell<bool>>,

    show_list: bool,
    show_log: bool,

    // pointer in canvas coordinates while it hovers the canvas
    pointer: Option<egui::Pos2>,
    // where the context menu was opened
    menu_pos: Option<egui::Pos2>,

    // right-drag panning
    scroll_offset: egui::Vec2,
    panning: bool,
}

impl MarkerApp {
    pub fn new(config: Config, logs: LogBuffer) -> Self {
        let markers = persist::load(&config.markers_path).into_markers(&config.markers_path);
        let store = MarkerStore::from_markers(markers);
        let tool = ToolSize::new(egui::Vec2::splat(config.tool_size));
        Self::with_board(Board::new(store, tool), config, logs)
    }

    fn with_board(mut board: Board, config: Config, logs: LogBuffer) -> Self {
        let dirty = Rc::new(Cell::new(false));
        let flag = dirty.clone();
        board.store.on_change(move |event| {
            log::debug!("store changed: {event:?}");
            if !matches!(event, StoreEvent::SelectionChanged { .. }) {
                flag.set(true);
            }
        });

        Self {
            board,
            markers_path: config.markers_path,
            canvas_size: config.canvas_size,
            logs,
            dirty,
            show_list: false,
            show_log: true,
            pointer: None,
            menu_pos: None,
            scroll_offset: egui::Vec2::ZERO,
            panning: false,
        }
    }

    fn save(&mut self) {
        match persist::save(&self.markers_path, self.board.store.all()) {
            Ok(()) => self.dirty.set(false),
            Err(err) => log::error!("could not save {}: {err}", self.markers_path.display()),
        }
    }

    fn save_as(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("markers", &["json"])
            .set_file_name("markers.json")
            .save_file()
        else {
            return;
        };
        self.markers_path = path;
        self.save();
    }

    fn open(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("markers", &["json"])
            .pick_file()
        else {
            return;
        };
        match persist::load(&path) {
            LoadOutcome::Loaded(markers) => {
                log::info!("opened {} ({} markers)", path.display(), markers.len());
                self.board.store.replace(markers);
                self.markers_path = path;
                self.dirty.set(false);
            }
            LoadOutcome::Absent => log::warn!("{} does not exist", path.display()),
            LoadOutcome::Corrupt(err) => log::warn!("cannot open {}: {err}", path.display()),
        }
    }

    fn copy_to_clipboard(&self, ctx: &egui::Context) {
        match persist::to_json(self.board.store.all()) {
            Ok(json) => {
                ctx.copy_text(json);
                log::info!("copied {} markers to clipboard", self.board.store.len());
            }
            Err(err) => log::error!("could not export markers: {err}"),
        }
    }

    fn toggle_placing(&mut self) {
        let on = self.board.toggle_placing();
        log::info!("placement mode {}", if on { "on" } else { "off" });
    }

    fn delete_last(&mut self) {
        if self.board.remove_last() {
            log::info!("removed last marker, {} left", self.board.store.len());
        }
    }

    fn delete_nearest(&mut self, at: Option<egui::Pos2>) {
        let Some(p) = at else {
            return;
        };
        if self.board.remove_closest_to(p) {
            log::info!("removed marker near ({:.0}, {:.0})", p.x, p.y);
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let (space, back, nearest, list, quit) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Space),
                i.key_pressed(egui::Key::Backspace) || i.key_pressed(egui::Key::Delete),
                i.key_pressed(egui::Key::D),
                i.key_pressed(egui::Key::L),
                i.key_pressed(egui::Key::Q),
            )
        });
        if space {
            self.toggle_placing();
        }
        if back {
            self.delete_last();
        }
        if nearest {
            self.delete_nearest(self.pointer);
        }
        if list {
            self.show_list = !self.show_list;
        }
        if quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    /// In placement mode the wheel resizes the tool instead of scrolling.
    fn take_wheel_for_resize(&mut self, ctx: &egui::Context) {
        if !self.board.placing || self.pointer.is_none() {
            return;
        }
        let (delta, only_x) = ctx.input_mut(|i| {
            let d = i.raw_scroll_delta;
            i.raw_scroll_delta = egui::Vec2::ZERO;
            i.smooth_scroll_delta = egui::Vec2::ZERO;
            (d.x + d.y, i.modifiers.shift)
        });
        if let Some(direction) = ResizeDirection::from_scroll(delta) {
            self.board.resize(direction, only_x);
        }
    }

    fn draw_marker(&self, painter: &egui::Painter, origin: egui::Pos2, m: &Marker) {
        let rect = m.visual_rect().translate(origin.to_vec2());
        let fill = if m.selected { SELECTED_FILL } else { MARKER_FILL };
        painter.rect_filled(rect, 0.0, fill);
        painter.rect_stroke(
            rect,
            0.0,
            egui::Stroke::new(1.0, MARKER_OUTLINE),
            egui::StrokeKind::Middle,
        );
        painter.text(
            rect.right_top() + egui::vec2(3.0, 0.0),
            egui::Align2::LEFT_BOTTOM,
            m.id.to_string(),
            egui::FontId::monospace(11.0),
            egui::Color32::from_gray(220),
        );
        if m.selected {
            self.draw_selection_indicator(painter, rect);
        }
    }

    fn draw_selection_indicator(&self, painter: &egui::Painter, rect: egui::Rect) {
        let expanded = rect.expand(4.0);
        painter.rect_stroke(
            expanded,
            2.0,
            egui::Stroke::new(1.5, egui::Color32::from_rgb(0, 120, 255)),
            egui::StrokeKind::Middle,
        );
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(self.canvas_size, egui::Sense::click_and_drag());
        let origin = response.rect.min;
        let to_canvas = move |p: egui::Pos2| (p - origin).to_pos2();

        self.pointer = response.hover_pos().map(to_canvas);

        painter.rect_filled(response.rect, 0.0, egui::Color32::from_gray(40));
        for m in self.board.store.all() {
            self.draw_marker(&painter, origin, m);
        }

        if self.board.placing {
            if let Some(p) = self.pointer {
                let size = self.board.tool.get();
                let preview = egui::Rect::from_center_size(p, size * 2.0)
                    .translate(origin.to_vec2());
                painter.rect_filled(preview, 0.0, MARKER_FILL.gamma_multiply(0.6));
                painter.rect_stroke(
                    preview,
                    0.0,
                    egui::Stroke::new(1.0, MARKER_OUTLINE),
                    egui::StrokeKind::Middle,
                );
            }
        }

        // Panning (secondary button drag)
        if response.dragged_by(egui::PointerButton::Secondary) {
            self.scroll_offset -= response.drag_delta();
            self.scroll_offset = self.scroll_offset.max(egui::Vec2::ZERO);
            self.panning = true;
        }
        if response.drag_stopped_by(egui::PointerButton::Secondary) {
            self.panning = false;
        }

        // Placement & selection (primary button)
        let press = response.interact_pointer_pos().map(to_canvas);
        if response.clicked_by(egui::PointerButton::Primary) {
            if let Some(p) = press {
                if self.board.placing {
                    let id = self.board.place(p);
                    log::info!("placed marker {id} at ({:.0}, {:.0})", p.x, p.y);
                } else {
                    self.board.store.select_at(p);
                }
            }
        }

        if !self.board.placing {
            if response.drag_started_by(egui::PointerButton::Primary) {
                let start = ui.input(|i| i.pointer.press_origin()).map(to_canvas);
                if let Some(p) = start {
                    self.board.store.select_at(p);
                    self.board.drag_start(p);
                }
            }
            if response.dragged_by(egui::PointerButton::Primary) {
                if let Some(p) = press {
                    self.board.drag_move(p);
                }
            }
        }
        if response.drag_stopped_by(egui::PointerButton::Primary) {
            if let Some(index) = self.board.drag_end() {
                if let Some(m) = self.board.store.get(index) {
                    log::info!("moved marker {} to ({:.0}, {:.0})", m.id, m.pos.x, m.pos.y);
                }
            }
        }

        if response.secondary_clicked() {
            self.menu_pos = press;
        }
        response.context_menu(|ui| self.context_menu(ui));
    }

    fn context_menu(&mut self, ui: &mut egui::Ui) {
        let placing_label = if self.board.placing {
            "Stop placing"
        } else {
            "Place markers"
        };
        if ui.button(placing_label).clicked() {
            self.toggle_placing();
            ui.close_menu();
        }
        if ui.button("Delete nearest").clicked() {
            self.delete_nearest(self.menu_pos);
            ui.close_menu();
        }
        if ui.button("Delete last").clicked() {
            self.delete_last();
            ui.close_menu();
        }
        ui.separator();
        if ui.button("Marker list").clicked() {
            self.show_list = true;
            ui.close_menu();
        }
        if ui.button("Copy as JSON").clicked() {
            self.copy_to_clipboard(ui.ctx());
            ui.close_menu();
        }
        ui.separator();
        if ui.button("Save").clicked() {
            self.save();
            ui.close_menu();
        }
        if ui.button("Save as…").clicked() {
            ui.close_menu();
            self.save_as();
        }
        if ui.button("Open…").clicked() {
            ui.close_menu();
            self.open();
        }
    }

    fn marker_list(&mut self, ctx: &egui::Context) {
        let mut clicked = None;
        let markers = self.board.store.all();
        egui::Window::new("Markers")
            .open(&mut self.show_list)
            .default_width(320.0)
            .show(ctx, |ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                    .column(Column::auto().at_least(32.0))
                    .columns(Column::remainder(), 4)
                    .header(18.0, |mut header| {
                        for title in ["id", "x", "y", "half w", "half h"] {
                            header.col(|ui| {
                                ui.strong(title);
                            });
                        }
                    })
                    .body(|body| {
                        body.rows(18.0, markers.len(), |mut row| {
                            let index = row.index();
                            let m = &markers[index];
                            row.set_selected(m.selected);
                            row.col(|ui| {
                                if ui.selectable_label(m.selected, m.id.to_string()).clicked() {
                                    clicked = Some(index);
                                }
                            });
                            for value in [m.pos.x, m.pos.y, m.size.x, m.size.y] {
                                row.col(|ui| {
                                    ui.label(format!("{value:.1}"));
                                });
                            }
                        });
                    });
            });
        if let Some(index) = clicked {
            self.board.store.select(index);
        }
    }

    fn log_panel(&self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink(false)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for line in self.logs.snapshot() {
                    let color = match line.level {
                        log::Level::Error => egui::Color32::from_rgb(230, 80, 80),
                        log::Level::Warn => egui::Color32::from_rgb(230, 180, 60),
                        log::Level::Info => ui.visuals().text_color(),
                        log::Level::Debug | log::Level::Trace => egui::Color32::GRAY,
                    };
                    ui.label(
                        egui::RichText::new(format!(
                            "{} {:<5} {}",
                            line.time, line.level, line.message
                        ))
                        .monospace()
                        .color(color),
                    );
                }
            });
    }
}

// ── eframe App impl ────────────────────────────────────────────────────────

impl eframe::App for MarkerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) {
            self.save();
        }

        self.handle_shortcuts(ctx);

        // Top toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let mut placing = self.board.placing;
                if ui.toggle_value(&mut placing, "Place (Space)").changed() {
                    self.toggle_placing();
                }
                let size = self.board.tool.get();
                ui.label(format!("Tool: {:.0} × {:.0}", size.x, size.y));
                ui.separator();
                if ui.button("Delete last").clicked() {
                    self.delete_last();
                }
                ui.toggle_value(&mut self.show_list, "List (L)");
                ui.toggle_value(&mut self.show_log, "Log");
                ui.separator();
                if ui.button("Save").clicked() {
                    self.save();
                }
                let unsaved = if self.dirty.get() { " (unsaved)" } else { "" };
                ui.label(format!(
                    "{} markers · {}{unsaved}",
                    self.board.store.len(),
                    self.markers_path.display()
                ));
            });
        });

        if self.show_log {
            egui::TopBottomPanel::bottom("log")
                .resizable(true)
                .default_height(120.0)
                .show(ctx, |ui| self.log_panel(ui));
        }

        self.marker_list(ctx);

        // Canvas
        self.take_wheel_for_resize(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut area = egui::ScrollArea::both().auto_shrink(false);
            if self.panning {
                area = area.scroll_offset(self.scroll_offset);
            }
            let output = area.show(ui, |ui| self.canvas(ui));
            if !self.panning {
                self.scroll_offset = output.state.offset;
            }
        });
    }
}
