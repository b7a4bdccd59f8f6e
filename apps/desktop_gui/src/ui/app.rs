//! App shell: one egui application rendering whichever screen the session
//! state selects, per active role. All mutation goes through the backend
//! command queue; this layer never touches the controller directly.

use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use session_core::{IntakePhase, Screen, SessionEvent, SessionState};
use shared::{
    domain::{
        ActiveView, Order, OrderStatus, RiskLevel, ServiceCategory, SystemMode, Urgency, UserRole,
    },
    mock::{disaster_label, MOCK_TERRITORY},
    strings::{ui_strings, UiStrings},
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{classify_startup_failure, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

const QUICK_CATEGORIES: &[ServiceCategory] = &[
    ServiceCategory::Market,
    ServiceCategory::Pharmacy,
    ServiceCategory::Companionship,
    ServiceCategory::ProfessionalCare,
];

pub struct VitaCareApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    state: Option<SessionState>,
    backend_ready: bool,
    status: String,

    need_draft: String,
    alert_draft: String,
    credential_draft: String,
    credential_country: String,
    credential_result: Option<bool>,
    credential_pending: bool,
}

impl VitaCareApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            state: None,
            backend_ready: false,
            status: "Starting backend...".to_string(),
            need_draft: String::new(),
            alert_draft: String::new(),
            credential_draft: String::new(),
            credential_country: "Brasil".to_string(),
            credential_result: None,
            credential_pending: false,
        }
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::BackendReady => {
                    self.backend_ready = true;
                    self.status = "Ready".to_string();
                }
                UiEvent::Info(message) => self.status = message,
                UiEvent::StateRefreshed(state) => self.state = Some(state),
                UiEvent::Session(event) => self.note_session_event(event),
                UiEvent::CredentialChecked { valid } => {
                    self.credential_pending = false;
                    self.credential_result = Some(valid);
                }
                UiEvent::Error(err) => {
                    self.status = if err.context() == UiErrorContext::BackendStartup {
                        classify_startup_failure(err.message())
                    } else {
                        err.message().to_string()
                    };
                }
            }
        }
    }

    fn note_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::OrderCreated(order) => {
                self.status = format!("Order created: {}", order.description);
            }
            SessionEvent::DisasterDeclared(disaster) => {
                self.status = disaster_label(disaster.kind).to_string();
            }
            SessionEvent::DisasterCleared => {
                self.status = "Safety confirmed".to_string();
            }
            SessionEvent::OrientationUpdated => {
                self.status = "Orientation refreshed".to_string();
            }
            _ => {}
        }
    }

    fn strings(state: &SessionState) -> &'static UiStrings {
        ui_strings(state.user.language)
    }

    fn show_role_bar(&mut self, ctx: &egui::Context, state: &SessionState) {
        let labels = Self::strings(state);
        egui::TopBottomPanel::top("role_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(labels.app_name);
                ui.separator();

                let mut role = state.active_role;
                egui::ComboBox::from_id_source("active_role")
                    .selected_text(role_label(role))
                    .show_ui(ui, |ui| {
                        for candidate in [
                            UserRole::User,
                            UserRole::Network,
                            UserRole::Infrastructure,
                            UserRole::Protection,
                            UserRole::Strategy,
                        ] {
                            ui.selectable_value(&mut role, candidate, role_label(candidate));
                        }
                    });
                if role != state.active_role {
                    self.dispatch(BackendCommand::SetRole { role });
                }

                ui.separator();
                ui.label(mode_badge(state.mode, labels));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(egui::RichText::new(&self.status).weak());
                });
            });
        });
    }

    fn show_consent_modal(&mut self, ctx: &egui::Context, state: &SessionState) {
        let labels = Self::strings(state);
        egui::Window::new(labels.consent_request)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(labels.consent_explain);
                ui.add_space(6.0);
                ui.small(labels.ai_warning);
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui
                        .button(egui::RichText::new("Aceitar").strong())
                        .clicked()
                    {
                        self.dispatch(BackendCommand::AcceptConsent);
                    }
                    if ui.button("Agora não").clicked() {
                        self.dispatch(BackendCommand::DeclineConsent);
                    }
                });
            });
    }

    fn show_crisis_overlay(&mut self, ui: &mut egui::Ui, state: &SessionState) {
        let labels = Self::strings(state);
        let Some(disaster) = &state.active_disaster else {
            return;
        };

        ui.vertical_centered(|ui| {
            ui.add_space(30.0);
            ui.heading(
                egui::RichText::new(labels.crisis_title)
                    .color(egui::Color32::from_rgb(255, 180, 60))
                    .size(28.0),
            );
            ui.label(egui::RichText::new(disaster_label(disaster.kind)).strong());
            ui.small(&disaster.location);
            ui.add_space(8.0);
            ui.label(labels.crisis_desc);
            ui.add_space(12.0);

            for (index, step) in disaster.guidance.iter().enumerate() {
                ui.label(format!("{}. {step}", index + 1));
            }

            if let Some(source) = &disaster.official_source {
                ui.add_space(10.0);
                ui.small(format!("Fonte: {source}"));
            }

            ui.add_space(20.0);
            ui.horizontal(|ui| {
                // Placeholder call actions; real dialing lives outside this app.
                if ui.button("📞 Resgate").clicked() {
                    self.status = "Conectando ao resgate...".to_string();
                }
                if ui.button("📞 Família").clicked() {
                    self.status = "Chamando a família...".to_string();
                }
            });
            ui.add_space(10.0);
            if ui
                .button(egui::RichText::new("Estou em segurança").size(18.0))
                .clicked()
            {
                self.dispatch(BackendCommand::ConfirmSafety);
            }
        });
    }

    fn show_home(&mut self, ui: &mut egui::Ui, state: &SessionState) {
        let labels = Self::strings(state);
        ui.heading(format!("Olá, {}", state.patient_name));
        ui.small(labels.presence);
        ui.add_space(10.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(egui::RichText::new(labels.orientation).strong());
            match &state.orientation {
                Some(path) => {
                    ui.label(&path.primary_goal);
                    for step in &path.immediate_steps {
                        ui.small(format!("• {step}"));
                    }
                }
                None => {
                    ui.small(labels.coherence);
                }
            }
        });

        ui.add_space(10.0);
        ui.label(egui::RichText::new(labels.need_support).strong());
        ui.horizontal_wrapped(|ui| {
            for &category in QUICK_CATEGORIES {
                if ui.button(category_label(category)).clicked() {
                    self.dispatch(BackendCommand::Navigate {
                        view: ActiveView::EasyOrder,
                    });
                }
            }
        });

        ui.add_space(10.0);
        ui.small(labels.privacy);
    }

    fn show_easy_order(&mut self, ui: &mut egui::Ui, state: &SessionState) {
        let labels = Self::strings(state);
        ui.heading(labels.need_support);
        ui.add_space(8.0);

        match state.intake_phase {
            IntakePhase::Idle => {
                ui.label(egui::RichText::new("Toque no que você precisa:").strong());
                ui.horizontal_wrapped(|ui| {
                    for &category in QUICK_CATEGORIES {
                        if ui
                            .add_sized([150.0, 60.0], egui::Button::new(category_label(category)))
                            .clicked()
                        {
                            self.dispatch(BackendCommand::CreateQuickOrder { category });
                        }
                    }
                });

                ui.add_space(12.0);
                ui.label(egui::RichText::new("Ou conte para a Luiza:").strong());
                ui.add(
                    egui::TextEdit::multiline(&mut self.need_draft)
                        .hint_text("Estou precisando de...")
                        .desired_rows(3)
                        .desired_width(f32::INFINITY),
                );
                let can_submit = !self.need_draft.trim().is_empty();
                if ui
                    .add_enabled(can_submit, egui::Button::new(labels.ask_guide))
                    .clicked()
                {
                    let text = self.need_draft.trim().to_string();
                    self.need_draft.clear();
                    self.dispatch(BackendCommand::SubmitNeed { text });
                }
            }
            IntakePhase::Analyzing => {
                ui.add_space(30.0);
                ui.vertical_centered(|ui| {
                    ui.spinner();
                    ui.label("Luiza está entendendo sua necessidade...");
                });
            }
            IntakePhase::Matching => {
                ui.add_space(30.0);
                ui.vertical_centered(|ui| {
                    ui.spinner();
                    ui.label("Procurando a melhor pessoa para te ajudar...");
                });
            }
            IntakePhase::Result => {
                if let Some(result) = &state.intake_result {
                    egui::Frame::group(ui.style()).show(ui, |ui| {
                        ui.label(egui::RichText::new(&result.explanation).size(16.0));
                    });
                }
                if let Some(order) = state.orders.last() {
                    ui.add_space(8.0);
                    self.show_order_card(ui, order, false, false);
                }
                ui.add_space(12.0);
                if ui.button("Voltar ao início").clicked() {
                    self.dispatch(BackendCommand::ResetIntake);
                    self.dispatch(BackendCommand::Navigate {
                        view: ActiveView::Home,
                    });
                }
            }
        }
    }

    fn show_orders(&mut self, ui: &mut egui::Ui, state: &SessionState) {
        ui.heading("Seus pedidos");
        ui.add_space(8.0);
        if state.orders.is_empty() {
            ui.small("Nenhum pedido ainda.");
            return;
        }
        let orders = state.orders.clone();
        egui::ScrollArea::vertical().show(ui, |ui| {
            for order in orders.iter().rev() {
                self.show_order_card(ui, order, false, false);
                ui.add_space(6.0);
            }
        });
    }

    fn show_order_card(
        &mut self,
        ui: &mut egui::Ui,
        order: &Order,
        allow_family_approval: bool,
        allow_status_advance: bool,
    ) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(category_label(order.category)).strong());
                ui.label(status_label(order.status));
                if order.urgency == Urgency::Urgent {
                    ui.colored_label(egui::Color32::from_rgb(220, 80, 80), "URGENTE");
                }
                if order.urgency == Urgency::Emotional {
                    ui.colored_label(egui::Color32::from_rgb(220, 150, 60), "emocional");
                }
            });
            ui.small(&order.description);
            if let Some(provider) = &order.matched_provider {
                ui.small(format!("{} · {:.1}★", provider.name, provider.rating));
            }
            ui.small(format!(
                "{} · aprovação familiar: {}",
                order.created_at.format("%d/%m %H:%M"),
                if order.family_approved { "sim" } else { "pendente" }
            ));

            ui.horizontal(|ui| {
                if allow_family_approval && !order.family_approved {
                    if ui.button("Aprovar").clicked() {
                        self.dispatch(BackendCommand::ApproveOrder { id: order.id });
                    }
                }
                if allow_status_advance {
                    if let Some(next) = next_status(order.status) {
                        if ui.button(format!("→ {}", status_label(next))).clicked() {
                            self.dispatch(BackendCommand::UpdateOrderStatus {
                                id: order.id,
                                status: next,
                            });
                        }
                    }
                }
            });
        });
    }

    fn show_profile(&mut self, ui: &mut egui::Ui, state: &SessionState) {
        let labels = Self::strings(state);
        ui.heading(state.patient_name.clone());
        ui.small(format!("{} · {}", state.user.country, labels.privacy));
        ui.add_space(10.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(egui::RichText::new("Gêmeo digital de cuidado").strong());
            metric_row(ui, "Coerência vital", state.user.twin.vital_coherence);
            metric_row(ui, "Densidade social", state.user.twin.social_density);
            metric_row(ui, "Resiliência", state.user.twin.resilience_score);
            ui.small(format!(
                "Humor: {} · Padrão: {}",
                state.user.twin.last_known_mood, state.user.twin.behavioral_pattern
            ));
        });

        ui.add_space(10.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(egui::RichText::new("Simulações (demonstração)").strong());
            ui.horizontal_wrapped(|ui| {
                if ui.button("Falha de infraestrutura").clicked() {
                    self.dispatch(BackendCommand::SimulateInfrastructureFailure);
                }
                if ui.button("Declínio por isolamento").clicked() {
                    self.dispatch(BackendCommand::SimulateIsolationDecline);
                }
                if ui.button("Restaurar coerência").clicked() {
                    self.dispatch(BackendCommand::RestoreCoherence);
                }
            });
        });
    }

    fn show_family_dashboard(&mut self, ui: &mut egui::Ui, state: &SessionState) {
        ui.heading(format!("Rede de cuidado · {}", state.patient_name));
        ui.add_space(8.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(egui::RichText::new("Confiança da rede").strong());
            metric_row(ui, "Confiança", state.user.scores.trust);
            metric_row(ui, "Estabilidade", state.user.scores.stability);
            metric_row(ui, "Engajamento social", state.user.scores.social_engagement);
            metric_row(ui, "Vulnerabilidade", state.user.scores.vulnerability);
        });

        ui.add_space(8.0);
        if let Some(path) = &state.orientation {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.label(egui::RichText::new("Sinais para a rede").strong());
                for signal in &path.network_signals {
                    ui.small(format!("• {signal}"));
                }
                ui.small(&path.ethical_justification);
            });
            ui.add_space(8.0);
        }

        ui.label(egui::RichText::new("Pedidos aguardando aprovação").strong());
        let orders = state.orders.clone();
        egui::ScrollArea::vertical().show(ui, |ui| {
            for order in orders.iter().rev() {
                self.show_order_card(ui, order, true, false);
                ui.add_space(6.0);
            }
        });
    }

    fn show_provider_panel(&mut self, ui: &mut egui::Ui, state: &SessionState) {
        ui.heading("Painel do profissional");
        ui.add_space(8.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(egui::RichText::new("Credenciamento").strong());
            ui.horizontal(|ui| {
                ui.label("Registro:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.credential_draft)
                        .hint_text("CRM-12345")
                        .desired_width(160.0),
                );
                ui.label("País:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.credential_country).desired_width(100.0),
                );
                let can_verify =
                    !self.credential_pending && !self.credential_draft.trim().is_empty();
                if ui.add_enabled(can_verify, egui::Button::new("Verificar")).clicked() {
                    self.credential_pending = true;
                    self.credential_result = None;
                    self.dispatch(BackendCommand::VerifyCredential {
                        credential_id: self.credential_draft.trim().to_string(),
                        country: self.credential_country.trim().to_string(),
                    });
                }
            });
            if self.credential_pending {
                ui.spinner();
            }
            match self.credential_result {
                Some(true) => {
                    ui.colored_label(egui::Color32::from_rgb(80, 180, 90), "Registro validado");
                }
                Some(false) => {
                    ui.colored_label(
                        egui::Color32::from_rgb(220, 80, 80),
                        "Formato de registro inválido",
                    );
                }
                None => {}
            }
        });

        ui.add_space(10.0);
        ui.label(egui::RichText::new("Atendimentos").strong());
        let orders = state.orders.clone();
        egui::ScrollArea::vertical().show(ui, |ui| {
            for order in orders.iter().rev() {
                self.show_order_card(ui, order, false, true);
                ui.add_space(6.0);
            }
        });
    }

    fn show_agent_panel(&mut self, ui: &mut egui::Ui, state: &SessionState) {
        let labels = Self::strings(state);
        ui.heading("Proteção territorial");
        ui.add_space(8.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(egui::RichText::new("Residentes monitorados").strong());
            for resident in MOCK_TERRITORY {
                ui.horizontal(|ui| {
                    ui.label(resident.name);
                    ui.small(resident.id);
                    ui.colored_label(risk_color(resident.risk), risk_label(resident.risk));
                });
            }
        });

        ui.add_space(10.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(egui::RichText::new(labels.mass_alert).strong());
            ui.add(
                egui::TextEdit::multiline(&mut self.alert_draft)
                    .hint_text("Cole aqui o alerta oficial bruto...")
                    .desired_rows(3)
                    .desired_width(f32::INFINITY),
            );
            ui.horizontal(|ui| {
                let can_send = !self.alert_draft.trim().is_empty();
                if ui
                    .add_enabled(can_send, egui::Button::new("Emitir alerta em massa"))
                    .clicked()
                {
                    let raw_message = self.alert_draft.trim().to_string();
                    self.alert_draft.clear();
                    self.dispatch(BackendCommand::TriggerMassAlert { raw_message });
                }
                if state.active_disaster.is_some() && ui.button("Encerrar alerta").clicked() {
                    self.dispatch(BackendCommand::ConfirmSafety);
                }
            });
        });
    }

    fn show_strategy_panel(&mut self, ui: &mut egui::Ui, state: &SessionState) {
        let labels = Self::strings(state);
        ui.heading("Visão estratégica");
        ui.add_space(8.0);

        let open_orders = state
            .orders
            .iter()
            .filter(|order| order.status != OrderStatus::Completed)
            .count();
        let urgent_orders = state
            .orders
            .iter()
            .filter(|order| order.urgency == Urgency::Urgent)
            .count();

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(format!("Modo do sistema: {}", mode_badge(state.mode, labels)));
            ui.label(format!("Estado de vida: {:?}", state.life_state));
            ui.label(format!("Pedidos abertos: {open_orders}"));
            ui.label(format!("Pedidos urgentes: {urgent_orders}"));
            ui.label(format!(
                "Residentes monitorados: {}",
                MOCK_TERRITORY.len()
            ));
        });

        ui.add_space(8.0);
        ui.small(labels.ai_warning);
    }

    fn show_user_nav(&mut self, ctx: &egui::Context, state: &SessionState) {
        egui::TopBottomPanel::bottom("user_nav").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for (view, label) in [
                    (ActiveView::Home, "Início"),
                    (ActiveView::EasyOrder, "Pedir"),
                    (ActiveView::Orders, "Pedidos"),
                    (ActiveView::Profile, "Perfil"),
                ] {
                    let selected = state.active_view == view;
                    if ui.selectable_label(selected, label).clicked() && !selected {
                        self.dispatch(BackendCommand::Navigate { view });
                    }
                }
            });
        });
    }
}

impl eframe::App for VitaCareApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        match self.state.clone() {
            Some(state) => {
                self.show_role_bar(ctx, &state);

                if state.active_role == UserRole::User {
                    self.show_user_nav(ctx, &state);
                }

                egui::CentralPanel::default().show(ctx, |ui| match state.active_role {
                    UserRole::User => match state.visible_screen() {
                        Screen::CrisisOverlay => self.show_crisis_overlay(ui, &state),
                        Screen::Home => self.show_home(ui, &state),
                        Screen::EasyOrder => self.show_easy_order(ui, &state),
                        Screen::Orders => self.show_orders(ui, &state),
                        Screen::Profile => self.show_profile(ui, &state),
                    },
                    UserRole::Network => self.show_family_dashboard(ui, &state),
                    UserRole::Infrastructure => self.show_provider_panel(ui, &state),
                    UserRole::Protection => self.show_agent_panel(ui, &state),
                    UserRole::Strategy => self.show_strategy_panel(ui, &state),
                });

                if state.consent_prompt_open && state.active_role == UserRole::User {
                    self.show_consent_modal(ctx, &state);
                }
            }
            None => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(60.0);
                        ui.spinner();
                        ui.label(&self.status);
                        if !self.backend_ready {
                            ui.small("Preparando o acompanhamento...");
                        }
                    });
                });
            }
        }

        // The backend pushes events from its own thread; poll at a steady
        // cadence instead of waiting for input.
        ctx.request_repaint_after(Duration::from_millis(150));
    }
}

fn metric_row(ui: &mut egui::Ui, label: &str, value: u8) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.add(egui::ProgressBar::new(f32::from(value) / 100.0).text(format!("{value}%")));
    });
}

pub fn role_label(role: UserRole) -> &'static str {
    match role {
        UserRole::User => "Maria (usuária)",
        UserRole::Network => "Família / rede",
        UserRole::Infrastructure => "Profissional",
        UserRole::Protection => "Agente público",
        UserRole::Strategy => "Gestão",
    }
}

pub fn category_label(category: ServiceCategory) -> &'static str {
    match category {
        ServiceCategory::VitalLogistics => "Logística vital",
        ServiceCategory::HealthReinforcement => "Reforço de saúde",
        ServiceCategory::DignifiedPresence => "Presença digna",
        ServiceCategory::Orientation => "Orientação",
        ServiceCategory::Market => "🛒 Mercado",
        ServiceCategory::Pharmacy => "💊 Farmácia",
        ServiceCategory::Companionship => "💛 Companhia",
        ServiceCategory::ProfessionalCare => "🩺 Cuidado profissional",
        ServiceCategory::Help => "Ajuda",
    }
}

pub fn status_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Synchronizing => "Sincronizando",
        OrderStatus::Organizing => "Organizando",
        OrderStatus::ActiveCare => "Cuidado ativo",
        OrderStatus::Sustained => "Sustentado",
        OrderStatus::Matching => "Procurando ajuda",
        OrderStatus::Received => "Recebido",
        OrderStatus::Delivered => "Entregue",
        OrderStatus::Preparing => "Preparando",
        OrderStatus::InProgress => "Em andamento",
        OrderStatus::Completed => "Concluído",
    }
}

/// Provider-side progression for the statuses the panel advances through.
/// Terminal or passive statuses have no next step.
pub fn next_status(status: OrderStatus) -> Option<OrderStatus> {
    match status {
        OrderStatus::Received | OrderStatus::Matching => Some(OrderStatus::Preparing),
        OrderStatus::Preparing => Some(OrderStatus::InProgress),
        OrderStatus::InProgress => Some(OrderStatus::Delivered),
        OrderStatus::Delivered => Some(OrderStatus::Completed),
        _ => None,
    }
}

fn mode_badge(mode: SystemMode, labels: &'static UiStrings) -> &'static str {
    match mode {
        SystemMode::Normal => labels.coherence,
        SystemMode::Crisis => labels.survival,
        SystemMode::Offline => labels.infrastructure,
        SystemMode::Humanitarian => labels.presence,
    }
}

fn risk_label(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::Low => "baixo",
        RiskLevel::Medium => "médio",
        RiskLevel::High => "alto",
        RiskLevel::Critical => "crítico",
    }
}

fn risk_color(risk: RiskLevel) -> egui::Color32 {
    match risk {
        RiskLevel::Low => egui::Color32::from_rgb(80, 180, 90),
        RiskLevel::Medium => egui::Color32::from_rgb(220, 180, 60),
        RiskLevel::High => egui::Color32::from_rgb(230, 130, 50),
        RiskLevel::Critical => egui::Color32::from_rgb(220, 80, 80),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_progression_ends_at_completed() {
        let mut status = OrderStatus::Matching;
        let mut hops = 0;
        while let Some(next) = next_status(status) {
            status = next;
            hops += 1;
            assert!(hops < 10, "progression must terminate");
        }
        assert_eq!(status, OrderStatus::Completed);
    }

    #[test]
    fn passive_statuses_have_no_next_step() {
        assert_eq!(next_status(OrderStatus::Completed), None);
        assert_eq!(next_status(OrderStatus::Sustained), None);
    }

    #[test]
    fn every_role_has_a_label() {
        for role in [
            UserRole::User,
            UserRole::Network,
            UserRole::Infrastructure,
            UserRole::Protection,
            UserRole::Strategy,
        ] {
            assert!(!role_label(role).is_empty());
        }
    }
}
