use std::{
    collections::{HashMap, HashSet},
    time::Duration,
};

use client_core::{
    ActionKind, Completion, GalleryError, GalleryTile, GalleryView, GenerateStep, UiState,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::dispatch_backend_command};
use crate::media::PreviewImage;

enum Thumbnail {
    Loading,
    Ready(egui::TextureHandle),
    Broken,
}

pub struct GalleryApp {
    state: UiState,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    status: String,
    generate_step: Option<GenerateStep>,
    thumbnails: HashMap<String, Thumbnail>,
    thumbnail_px: f32,
}

impl GalleryApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, thumbnail_px: u32) -> Self {
        Self {
            state: UiState::new(),
            cmd_tx,
            ui_rx,
            status: String::new(),
            generate_step: None,
            thumbnails: HashMap::new(),
            thumbnail_px: thumbnail_px as f32,
        }
    }

    fn start_action(&mut self, kind: ActionKind) {
        let command = match kind {
            ActionKind::Search => self.state.begin_search(),
            ActionKind::Generate => self.state.begin_generate(),
        };
        let token = command.token();
        self.status.clear();
        self.generate_step = None;
        if !dispatch_backend_command(&self.cmd_tx, BackendCommand::Run(command), &mut self.status) {
            self.state.complete(
                token,
                Err(GalleryError::transport("backend worker", &self.status)),
            );
        }
    }

    fn process_ui_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Finished(finished) => {
                    match self.state.complete(finished.token, finished.result) {
                        Completion::Applied => {
                            self.generate_step = None;
                            self.prune_thumbnails();
                        }
                        Completion::Failed => self.generate_step = None,
                        Completion::Stale => {}
                    }
                }
                UiEvent::GenerateProgress { token, step } => {
                    if self.state.in_flight().map(|(current, _)| current) == Some(token) {
                        self.generate_step = Some(step);
                    }
                }
                UiEvent::ThumbnailLoaded { src, image } => {
                    if let Some(slot) = self.thumbnails.get_mut(&src) {
                        *slot = Thumbnail::Ready(load_thumbnail_texture(ctx, &src, &image));
                    }
                }
                UiEvent::ThumbnailFailed { src, .. } => {
                    if let Some(slot) = self.thumbnails.get_mut(&src) {
                        *slot = Thumbnail::Broken;
                    }
                }
                UiEvent::Error(message) => {
                    tracing::error!("{message}");
                    self.status = message;
                }
            }
        }
    }

    fn prune_thumbnails(&mut self) {
        let current: HashSet<&str> = self
            .state
            .gallery()
            .iter()
            .map(|record| record.image_path.as_str())
            .collect();
        self.thumbnails.retain(|src, _| current.contains(src.as_str()));
    }

    fn request_missing_thumbnails(&mut self, view: &GalleryView) {
        for tile in &view.tiles {
            if self.thumbnails.contains_key(&tile.src) {
                continue;
            }
            let queued = dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::FetchThumbnail {
                    src: tile.src.clone(),
                },
                &mut self.status,
            );
            // Retried on a later frame when the queue had no room.
            if queued {
                self.thumbnails.insert(tile.src.clone(), Thumbnail::Loading);
            }
        }
    }

    fn show_prompt_bar(&mut self, ctx: &egui::Context, view: &GalleryView) {
        egui::TopBottomPanel::top("prompt_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.state.input)
                        .hint_text("Describe an image")
                        .desired_width(420.0),
                );
                if ui.button("Search").clicked() {
                    self.start_action(ActionKind::Search);
                }
                if ui.button("Generate").clicked() {
                    self.start_action(ActionKind::Generate);
                }
                if view.loading_visible {
                    ui.add(egui::Spinner::new());
                }
            });
            ui.add_space(6.0);
        });
    }

    fn show_status_bar(&self, ctx: &egui::Context, view: &GalleryView) {
        let text = if let Some(status) = &view.status {
            status.clone()
        } else if let Some(step) = self.generate_step.filter(|_| view.loading_visible) {
            step_label(step).to_string()
        } else {
            self.status.clone()
        };
        if text.is_empty() {
            return;
        }
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(egui::RichText::new(text).weak());
        });
    }

    fn show_gallery(&self, ctx: &egui::Context, view: &GalleryView) {
        let size = egui::vec2(self.thumbnail_px, self.thumbnail_px);
        egui::CentralPanel::default().show(ctx, |ui| {
            if view.tiles.is_empty() {
                ui.label(egui::RichText::new("No images to show yet.").weak());
                return;
            }
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for tile in &view.tiles {
                        self.show_tile(ui, tile, size);
                    }
                });
            });
        });
    }

    fn show_tile(&self, ui: &mut egui::Ui, tile: &GalleryTile, size: egui::Vec2) {
        let response = match self.thumbnails.get(&tile.src) {
            Some(Thumbnail::Ready(texture)) => {
                ui.add(egui::Image::new(texture).fit_to_exact_size(size))
            }
            Some(Thumbnail::Broken) => ui.add_sized(
                size,
                egui::Label::new(egui::RichText::new(format!("🖼 {}", tile.alt)).weak()),
            ),
            Some(Thumbnail::Loading) | None => ui.add_sized(size, egui::Spinner::new()),
        };
        response.on_hover_text(tile.title.as_str());
    }
}

fn step_label(step: GenerateStep) -> &'static str {
    match step {
        GenerateStep::Submitting => "Submitting prompt...",
        GenerateStep::AwaitingConfirmation => "Waiting for the server to confirm...",
        GenerateStep::Refreshing => "Refreshing gallery...",
        GenerateStep::Done => "Done",
        GenerateStep::Failed => "Generation failed",
    }
}

fn load_thumbnail_texture(
    ctx: &egui::Context,
    src: &str,
    image: &PreviewImage,
) -> egui::TextureHandle {
    let color_image =
        egui::ColorImage::from_rgba_unmultiplied([image.width, image.height], &image.rgba);
    ctx.load_texture(
        format!("gallery-thumbnail:{src}"),
        color_image,
        egui::TextureOptions::LINEAR,
    )
}

impl eframe::App for GalleryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events(ctx);

        let view = GalleryView::render(&self.state);
        self.request_missing_thumbnails(&view);
        self.show_prompt_bar(ctx, &view);
        self.show_status_bar(ctx, &view);
        self.show_gallery(ctx, &view);

        if view.loading_visible || self.thumbnails.values().any(|t| matches!(t, Thumbnail::Loading)) {
            ctx.request_repaint_after(Duration::from_millis(50));
        } else {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
