use iced::{
    widget::{button, column, pick_list, text, text_input, Space},
    Element, Length,
};

use crate::domain::{OperationStatus, QualityOption, SelectionState, Severity};

/// Main view state
pub struct DownloadView {
    pub selection: SelectionState,
    pub status: OperationStatus,
    pub negotiating: bool,
    pub downloading: bool,
}

impl Default for DownloadView {
    fn default() -> Self {
        Self {
            selection: SelectionState::default(),
            status: OperationStatus::Idle,
            negotiating: false,
            downloading: false,
        }
    }
}

#[derive(Debug, Clone)]
pub enum DownloadMessage {
    UrlChanged(String),
    QualityChosen(QualityOption),
    DownloadPressed,
}

impl DownloadView {
    pub fn update(&mut self, message: DownloadMessage) {
        match message {
            DownloadMessage::UrlChanged(url) => {
                self.selection.url = url;
            }
            DownloadMessage::QualityChosen(option) => {
                self.selection.choose(&option.identifier);
            }
            DownloadMessage::DownloadPressed => {
                // Will be handled by the app
            }
        }
    }

    pub fn chooser_enabled(&self) -> bool {
        !self.negotiating && !self.selection.options().is_empty()
    }

    pub fn download_enabled(&self) -> bool {
        !self.negotiating && !self.downloading && self.selection.can_download()
    }

    pub fn view(&self) -> Element<'_, DownloadMessage> {
        // An empty option list keeps the chooser inert while negotiating.
        let options: &[QualityOption] = if self.chooser_enabled() {
            self.selection.options()
        } else {
            &[]
        };

        let placeholder = if self.negotiating {
            "Loading qualities..."
        } else {
            "Select quality"
        };

        let chooser = pick_list(
            options,
            self.selection.chosen_option().cloned(),
            DownloadMessage::QualityChosen,
        )
        .placeholder(placeholder)
        .width(Length::Fill);

        let status_style: fn(&iced::Theme) -> text::Style = match self.status.severity() {
            Severity::Neutral => text::base,
            Severity::Loading => text::secondary,
            Severity::Success => text::success,
            Severity::Error => text::danger,
        };

        column![
            text("TubeFetch").size(32),
            Space::new().height(Length::Fixed(20.0)),
            text("Video URL:").size(16),
            text_input("Paste a video URL...", &self.selection.url)
                .on_input(DownloadMessage::UrlChanged)
                .padding(10),
            Space::new().height(Length::Fixed(10.0)),
            chooser,
            Space::new().height(Length::Fixed(10.0)),
            text(self.status.message()).size(14).style(status_style),
            Space::new().height(Length::Fixed(20.0)),
            button("Download")
                .on_press_maybe(self.download_enabled().then_some(DownloadMessage::DownloadPressed))
                .padding([10, 20]),
        ]
        .padding(20)
        .spacing(10)
        .into()
    }
}
