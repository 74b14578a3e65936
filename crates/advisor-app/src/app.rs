//! Main egui application: composes the panels and drives the chat client.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use egui::{self, Align, CentralPanel, Layout, RichText, SidePanel, TopBottomPanel};

use advisor_core::calendar::{CalendarFlow, NO_LINKS_TEXT};
use advisor_core::client::ChatClient;
use advisor_core::event_bus::EventBus;
use advisor_core::ports::{StoragePort, TimerPort};
use advisor_platform::storage::open_storage;
use advisor_platform::{location, BrowserTimer, HttpAdvisoryApi, HttpCalendarApi};
use advisor_types::config::AdvisorConfig;
use advisor_types::AdvisorError;
use advisor_ui::panels::settings::{SaveFeedback, SettingsAction};
use advisor_ui::panels::{calendar, chat, settings, sidebar};
use advisor_ui::state::{CalendarAction, CalendarView, Toast, UiState};
use advisor_ui::theme;

const CONFIG_STORAGE_KEY: &str = "msfeaAdvisor:config";

const LINKS_FAILED: &str = "Failed to generate calendar links. Please try again later.";
const CONNECT_FAILED: &str = "Failed to connect to Google Calendar. Please try again later.";
const ADD_FAILED: &str = "Failed to add events to Google Calendar. Please try again later.";

/// Saved settings, or defaults when there are none or they do not parse
pub async fn load_config(storage: &dyn StoragePort) -> AdvisorConfig {
    match storage.get(CONFIG_STORAGE_KEY).await {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(config) => {
                log::info!("Config restored from storage");
                config
            }
            Err(e) => {
                log::warn!("Ignoring unreadable saved config: {}", e);
                AdvisorConfig::default()
            }
        },
        Ok(None) => AdvisorConfig::default(),
        Err(e) => {
            log::warn!("Could not read saved config: {}", e);
            AdvisorConfig::default()
        }
    }
}

/// Results of background work, picked up on the next frame
#[derive(Default)]
struct Inbox {
    calendar: Option<CalendarView>,
    toast: Option<Toast>,
    save_feedback: Option<SaveFeedback>,
}

pub struct AdvisorApp {
    ui_state: UiState,
    config: AdvisorConfig,
    event_bus: EventBus,
    client: ChatClient,
    calendar: Rc<CalendarFlow>,
    advisory: Rc<HttpAdvisoryApi>,
    calendar_api: Rc<HttpCalendarApi>,
    settings_store: Rc<dyn StoragePort>,
    inbox: Rc<RefCell<Inbox>>,
    save_feedback: Option<SaveFeedback>,
    first_frame: bool,
}

impl AdvisorApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: AdvisorConfig,
        settings_store: Rc<dyn StoragePort>,
    ) -> Self {
        let event_bus = EventBus::new();
        let storage = open_storage(config.storage.backend);
        let advisory = Rc::new(HttpAdvisoryApi::new(config.api.clone()));
        let calendar_api = Rc::new(HttpCalendarApi::new(config.api.clone()));
        let timer: Rc<dyn TimerPort> = Rc::new(BrowserTimer::new());

        let client = ChatClient::new(
            config.clone(),
            advisory.clone(),
            storage,
            timer,
            event_bus.clone(),
        );
        // The pending schedule must outlive the OAuth redirect, so it goes
        // to the persistent settings store whatever the chat backend is
        let calendar = Rc::new(CalendarFlow::new(calendar_api.clone(), settings_store.clone()));

        let mut ui_state = UiState::new();
        ui_state.language = config.language;

        let app = Self {
            ui_state,
            config,
            event_bus,
            client,
            calendar,
            advisory,
            calendar_api,
            settings_store,
            inbox: Rc::new(RefCell::new(Inbox::default())),
            save_feedback: None,
            first_frame: true,
        };

        app.restore_conversation(cc.egui_ctx.clone());
        app.complete_oauth(cc.egui_ctx.clone());
        app
    }

    /// Reload the conversation from an earlier visit (async)
    fn restore_conversation(&self, ctx: egui::Context) {
        let client = self.client.clone();
        wasm_bindgen_futures::spawn_local(async move {
            client.restore().await;
            ctx.request_repaint();
        });
    }

    /// Finish a Google sign-in round trip if the page was opened by it
    fn complete_oauth(&self, ctx: egui::Context) {
        let Some(code) = location::oauth_code() else {
            return;
        };
        let flow = self.calendar.clone();
        let inbox = self.inbox.clone();

        wasm_bindgen_futures::spawn_local(async move {
            if !flow.has_pending().await {
                log::debug!("OAuth code present but no schedule is waiting");
                return;
            }
            let toast = match flow.complete_auth(&code).await {
                Ok(count) => Toast {
                    message: format!("Successfully added {} events to your Google Calendar.", count),
                    success: true,
                },
                Err(_) => Toast {
                    message: ADD_FAILED.to_string(),
                    success: false,
                },
            };
            if let Err(e) = location::clear_query() {
                log::warn!("Could not clear the OAuth code from the URL: {}", e);
            }
            inbox.borrow_mut().toast = Some(toast);
            ctx.request_repaint();
        });
    }

    /// Push edited settings to every adapter that holds a copy
    fn apply_config(&self) {
        self.advisory.set_config(self.config.api.clone());
        self.calendar_api.set_config(self.config.api.clone());
        self.client.set_config(self.config.clone());
    }

    /// Save config to storage (async, fire-and-forget)
    fn save_config(&self) {
        let json = match serde_json::to_string(&self.config) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Could not serialize config: {}", e);
                return;
            }
        };
        let storage = self.settings_store.clone();
        let inbox = self.inbox.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let feedback = match storage.set(CONFIG_STORAGE_KEY, &json).await {
                Ok(()) => {
                    log::info!("Config saved to storage");
                    SaveFeedback {
                        message: "Settings saved".to_string(),
                        success: true,
                    }
                }
                Err(e) => {
                    log::error!("Config save failed: {}", e);
                    SaveFeedback {
                        message: format!("Save failed: {}", e),
                        success: false,
                    }
                }
            };
            inbox.borrow_mut().save_feedback = Some(feedback);
        });
    }

    fn toggle_language(&mut self) {
        self.config.language = self.config.language.toggled();
        self.ui_state.language = self.config.language;
        self.apply_config();
        self.save_config();
    }

    /// Move finished background results into UI state
    fn collect_inbox(&mut self) {
        let mut inbox = self.inbox.borrow_mut();
        if let Some(view) = inbox.calendar.take() {
            self.ui_state.calendar = Some(view);
        }
        if let Some(toast) = inbox.toast.take() {
            self.ui_state.toast = Some(toast);
        }
        if let Some(feedback) = inbox.save_feedback.take() {
            self.save_feedback = Some(feedback);
        }
    }
}

impl eframe::App for AdvisorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        // Drain events from the chat client and its revert timer
        let events = self.event_bus.drain();
        if !events.is_empty() {
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }
        if self.ui_state.take_refresh() {
            self.ui_state.set_messages(self.client.messages());
        }
        self.collect_inbox();

        if self.ui_state.is_busy() {
            ctx.request_repaint();
        }
        // Timer callbacks do not wake egui on their own
        if self.client.has_pending_revert() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("MSFEA Academic Advisor")
                        .strong()
                        .color(theme::MAROON)
                        .size(16.0),
                );
                ui.separator();
                if ui
                    .selectable_label(self.ui_state.show_sidebar, "Departments")
                    .clicked()
                {
                    self.ui_state.show_sidebar = !self.ui_state.show_sidebar;
                }

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui
                        .selectable_label(self.ui_state.show_settings, "Settings")
                        .clicked()
                    {
                        self.ui_state.show_settings = !self.ui_state.show_settings;
                    }
                    if ui.button("New Chat").clicked() {
                        self.dispatch_reset(ctx);
                    }
                    if ui.button(self.config.language.label()).clicked() {
                        self.toggle_language();
                    }
                });
            });
        });

        // ── Toast ────────────────────────────────────────────
        if let Some(toast) = self.ui_state.toast.clone() {
            TopBottomPanel::bottom("toast").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let color = if toast.success { theme::SUCCESS } else { theme::ERROR };
                    ui.label(RichText::new(&toast.message).color(color));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.small_button("×").clicked() {
                            self.ui_state.toast = None;
                        }
                    });
                });
            });
        }

        // ── Department sidebar ───────────────────────────────
        if self.ui_state.show_sidebar {
            SidePanel::left("department_sidebar")
                .min_width(200.0)
                .max_width(260.0)
                .show(ctx, |ui| {
                    sidebar::department_sidebar(ui, &self.ui_state.current_department);
                });
        }

        // ── Settings side panel ──────────────────────────────
        if self.ui_state.show_settings {
            SidePanel::right("settings_panel")
                .min_width(280.0)
                .max_width(350.0)
                .show(ctx, |ui| {
                    match settings::settings_panel(ui, &mut self.config, self.save_feedback.as_ref()) {
                        SettingsAction::Changed => {
                            self.save_feedback = None;
                            self.apply_config();
                        }
                        SettingsAction::SaveClicked => {
                            self.apply_config();
                            self.save_config();
                        }
                        SettingsAction::None => {}
                    }
                });
        }

        // ── Main content ─────────────────────────────────────
        CentralPanel::default().show(ctx, |ui| {
            if let Some(text) = chat::chat_panel(ui, &mut self.ui_state) {
                self.dispatch_message(text, ctx);
            }
        });

        if let Some(action) = calendar::calendar_window(ctx, &mut self.ui_state.calendar) {
            self.dispatch_calendar(action, ctx);
        }
    }
}

impl AdvisorApp {
    /// Send a user message through the chat client (async)
    fn dispatch_message(&self, text: String, ctx: &egui::Context) {
        let client = self.client.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = client.send(&text).await {
                log::error!("Advisor turn failed: {}", e);
            }
            ctx.request_repaint();
        });
    }

    fn dispatch_reset(&mut self, ctx: &egui::Context) {
        self.ui_state.close_calendar();
        let client = self.client.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            client.reset().await;
            ctx.request_repaint();
        });
    }

    /// Run a calendar export; the window shows a spinner until it lands
    fn dispatch_calendar(&mut self, action: CalendarAction, ctx: &egui::Context) {
        self.ui_state.calendar = Some(CalendarView::Loading);
        let flow = self.calendar.clone();
        let inbox = self.inbox.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let view = match action {
                CalendarAction::Links(schedule) => match flow.links_by_course(&schedule).await {
                    Ok(groups) => CalendarView::Links(groups),
                    Err(e) => CalendarView::Failed(links_failure(&e)),
                },
                CalendarAction::SingleLink(schedule) => match flow.single_link(&schedule).await {
                    Ok(url) => CalendarView::Single(url),
                    Err(e) => CalendarView::Failed(links_failure(&e)),
                },
                CalendarAction::Google(schedule) => {
                    let redirected = match flow.start_auth(&schedule).await {
                        Ok(url) => location::redirect(&url),
                        Err(e) => Err(e),
                    };
                    match redirected {
                        // The page is navigating away
                        Ok(()) => CalendarView::Loading,
                        Err(e) => {
                            log::error!("Google Calendar sign-in failed: {}", e);
                            CalendarView::Failed(CONNECT_FAILED.to_string())
                        }
                    }
                }
            };
            inbox.borrow_mut().calendar = Some(view);
            ctx.request_repaint();
        });
    }
}

fn links_failure(e: &AdvisorError) -> String {
    log::error!("Calendar links failed: {}", e);
    match e {
        AdvisorError::Calendar(message) if message == NO_LINKS_TEXT => NO_LINKS_TEXT.to_string(),
        _ => LINKS_FAILED.to_string(),
    }
}
