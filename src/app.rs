use std::path::PathBuf;
use std::time::Duration;

use bytes::Bytes;
use iced::Task;

use crate::api::{ApiClient, ApiConfig};
use crate::application::{Debouncer, DownloadCoordinator};
use crate::domain::{AppError, DownloadPlan, OperationStatus, QualityOption};
use crate::ui::{DownloadMessage, DownloadView};

/// Quiescence window before a typed URL triggers a negotiation.
const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

pub struct DownloadApp {
    view: DownloadView,
    coordinator: DownloadCoordinator,
    debouncer: Debouncer,
}

impl Default for DownloadApp {
    fn default() -> Self {
        Self::new()
    }
}

impl DownloadApp {
    pub fn new() -> Self {
        let coordinator = DownloadCoordinator::new(ApiClient::new(ApiConfig::from_env()));

        Self {
            view: DownloadView::default(),
            coordinator,
            debouncer: Debouncer::new(DEBOUNCE_WINDOW),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(DownloadMessage),
    /// A debounce timer fired; the token decides whether it is still live.
    DebounceElapsed(u64),
    QualitiesReceived(Result<Vec<QualityOption>, AppError>),
    DownloadPrepared(Result<DownloadPlan, AppError>),
    /// (Selected save path, fetched payload)
    SavePathChosen(Option<PathBuf>, Bytes),
    SaveCompleted(Result<PathBuf, AppError>),
}

pub fn update(app: &mut DownloadApp, message: Message) -> Task<Message> {
    match message {
        Message::UiMessage(ui_msg) => {
            app.view.update(ui_msg.clone());

            match ui_msg {
                DownloadMessage::UrlChanged(_) => return on_url_changed(app),
                DownloadMessage::DownloadPressed => return on_download_pressed(app),
                DownloadMessage::QualityChosen(_) => {}
            }
        }
        Message::DebounceElapsed(token) => {
            if !app.debouncer.is_current(token) {
                return Task::none();
            }

            let url = app.view.selection.url.trim().to_string();
            if url.is_empty() {
                return Task::none();
            }

            app.view.negotiating = true;
            app.view.status = OperationStatus::Loading("Fetching available qualities...".into());

            let coordinator = app.coordinator.clone();
            return Task::perform(
                async move { coordinator.negotiate(url).await },
                Message::QualitiesReceived,
            );
        }
        Message::QualitiesReceived(result) => {
            // Overlapping negotiations are not cancelled; the last response
            // to arrive wins, which the debouncer makes rare in practice.
            app.view.negotiating = false;
            match result {
                Ok(options) => {
                    app.view.selection.replace_options(options);
                    app.view.status =
                        OperationStatus::Ready("Pick a quality and press Download.".into());
                }
                Err(e) => {
                    app.view.selection.clear_options();
                    app.view.status = OperationStatus::Error(e.to_string());
                }
            }
        }
        Message::DownloadPrepared(result) => match result {
            Ok(plan) => {
                app.view.status = OperationStatus::Loading("Choose where to save...".into());

                let coordinator = app.coordinator.clone();
                return Task::perform(
                    async move {
                        let path = coordinator.choose_save_path(plan.filename).await;
                        (path, plan.payload)
                    },
                    |(path, payload)| Message::SavePathChosen(path, payload),
                );
            }
            Err(e) => {
                app.view.downloading = false;
                app.view.status = OperationStatus::Error(e.to_string());
            }
        },
        Message::SavePathChosen(path_opt, payload) => match path_opt {
            Some(path) => {
                app.view.status = OperationStatus::Loading(format!("Saving to {}...", path.display()));

                let coordinator = app.coordinator.clone();
                return Task::perform(
                    async move { coordinator.save_payload(path, payload).await },
                    Message::SaveCompleted,
                );
            }
            None => {
                // User dismissed the save dialog
                app.view.downloading = false;
                app.view.status = OperationStatus::Ready("Download cancelled".into());
            }
        },
        Message::SaveCompleted(result) => {
            app.view.downloading = false;
            match result {
                Ok(path) => {
                    app.view.status =
                        OperationStatus::Ready(format!("Download started! Saved: {}", path.display()));
                }
                Err(e) => {
                    app.view.status = OperationStatus::Error(e.to_string());
                }
            }
        }
    }
    Task::none()
}

/// Empty input is the distinct idle reset path; anything else arms the
/// debouncer and lets the trailing timer start the negotiation.
fn on_url_changed(app: &mut DownloadApp) -> Task<Message> {
    if app.view.selection.url.trim().is_empty() {
        app.debouncer.cancel();
        app.view.selection.clear_options();
        app.view.negotiating = false;
        app.view.status = OperationStatus::Idle;
        return Task::none();
    }

    let token = app.debouncer.arm();
    let window = app.debouncer.window();
    Task::perform(
        async move {
            tokio::time::sleep(window).await;
            token
        },
        Message::DebounceElapsed,
    )
}

fn on_download_pressed(app: &mut DownloadApp) -> Task<Message> {
    if app.view.downloading {
        return Task::none();
    }

    let url = app.view.selection.url.trim().to_string();
    let itag = match app.view.selection.chosen_identifier() {
        Some(itag) if !url.is_empty() => itag.to_string(),
        _ => {
            app.view.status = OperationStatus::Error(AppError::MissingSelection.to_string());
            return Task::none();
        }
    };

    app.view.downloading = true;
    app.view.status = OperationStatus::Loading("Preparing download...".into());

    let coordinator = app.coordinator.clone();
    Task::perform(
        async move { coordinator.prepare_download(url, itag).await },
        Message::DownloadPrepared,
    )
}

pub fn view(app: &DownloadApp) -> iced::Element<'_, Message> {
    app.view.view().map(Message::UiMessage)
}
