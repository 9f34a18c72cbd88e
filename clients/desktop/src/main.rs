//! TeleMed desktop client.
//!
//! Every screen is a thin view over the backend REST API: fetch JSON, render
//! it, post user actions back. The one stateful piece of client logic is the
//! chat screen's scroll reconciliation, in [`chat::sync`].

mod chat;
mod config;
mod session_store;
mod theme;
mod ui;

use std::time::{Duration, Instant};

use iced::widget::{container, scrollable};
use iced::{Application, Command, Element, Length, Settings, Subscription, Theme};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use telemed_api_client::ApiClient;
use telemed_api_models::admin::AdminStats;
use telemed_api_models::appointments::{
    Appointment, AppointmentStatus, BookAppointmentRequest, UpdateAppointmentStatusRequest,
};
use telemed_api_models::auth::{LoginRequest, SignupRequest};
use telemed_api_models::chat::{ChatMessage, ConversationSummary};
use telemed_api_models::prescriptions::{CreatePrescriptionRequest, Medication, Prescription};
use telemed_api_models::{ApprovalStatus, PersonRef, User, UserRole};

use chat::sync::{PaneMetrics, ScrollAction};
use chat::ChatState;
use config::ClientConfig;
use session_store::Session;

/// How often the chat screen re-polls the backend.
const CHAT_POLL_INTERVAL: Duration = Duration::from_secs(3);

fn main() -> iced::Result {
    init_tracing();

    TeleMed::run(Settings {
        window: iced::window::Settings {
            size: iced::Size::new(1100.0, 720.0),
            min_size: Some(iced::Size::new(820.0, 560.0)),
            ..Default::default()
        },
        ..Default::default()
    })
}

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Signup,
    PatientHome,
    BrowseDoctors,
    PatientAppointments,
    PatientPrescriptions,
    HealthRecords,
    DoctorHome,
    AdminHome,
    Chat,
}

fn home_screen(role: UserRole) -> Screen {
    match role {
        UserRole::Patient => Screen::PatientHome,
        UserRole::Doctor => Screen::DoctorHome,
        UserRole::Admin => Screen::AdminHome,
    }
}

/// The poll timer exists only while the chat screen is mounted; leaving the
/// screen drops the subscription and with it any further ticks.
fn chat_poll_interval(screen: Screen) -> Option<Duration> {
    (screen == Screen::Chat).then_some(CHAT_POLL_INTERVAL)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupField {
    Name,
    Email,
    Password,
    ConfirmPassword,
    DateOfBirth,
    Phone,
    Address,
    Gender,
    EmergencyContact,
    EmergencyPhone,
    Specialization,
    LicenseNumber,
    YearsOfExperience,
    Hospital,
    Qualifications,
    ConsultationFee,
}

pub struct SignupForm {
    pub role: UserRole,
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub date_of_birth: String,
    pub phone: String,
    pub address: String,
    pub gender: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
    pub specialization: String,
    pub license_number: String,
    pub years_of_experience: String,
    pub hospital: String,
    pub qualifications: String,
    pub consultation_fee: String,
    pub submitting: bool,
    pub error: Option<String>,
}

impl SignupForm {
    fn new() -> Self {
        Self {
            role: UserRole::Patient,
            name: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            date_of_birth: String::new(),
            phone: String::new(),
            address: String::new(),
            gender: String::new(),
            emergency_contact: String::new(),
            emergency_phone: String::new(),
            specialization: String::new(),
            license_number: String::new(),
            years_of_experience: String::new(),
            hospital: String::new(),
            qualifications: String::new(),
            consultation_fee: String::new(),
            submitting: false,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingField {
    Date,
    Time,
    Reason,
}

pub struct BookingDraft {
    pub doctor: User,
    pub date: String,
    pub time: String,
    pub reason: String,
    pub submitting: bool,
    pub error: Option<String>,
}

impl BookingDraft {
    fn new(doctor: User) -> Self {
        Self {
            doctor,
            date: String::new(),
            time: String::new(),
            reason: String::new(),
            submitting: false,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MedicationField {
    Name,
    Dosage,
    Frequency,
    Duration,
    Instructions,
}

#[derive(Default)]
pub struct MedicationRow {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    pub instructions: String,
}

impl MedicationRow {
    fn to_medication(&self) -> Medication {
        Medication {
            name: self.name.trim().to_string(),
            dosage: self.dosage.trim().to_string(),
            frequency: self.frequency.trim().to_string(),
            duration: self.duration.trim().to_string(),
            instructions: match self.instructions.trim() {
                "" => None,
                other => Some(other.to_string()),
            },
        }
    }
}

pub struct PrescriptionDraft {
    pub patient: PersonRef,
    pub appointment_id: Option<String>,
    pub diagnosis: String,
    pub notes: String,
    pub medications: Vec<MedicationRow>,
    pub submitting: bool,
    pub error: Option<String>,
}

impl PrescriptionDraft {
    fn new(patient: PersonRef, appointment_id: Option<String>) -> Self {
        Self {
            patient,
            appointment_id,
            diagnosis: String::new(),
            notes: String::new(),
            medications: vec![MedicationRow::default()],
            submitting: false,
            error: None,
        }
    }
}

/// Inline rejection form: an appointment (doctor home) or a doctor
/// registration (admin) awaiting a reason.
pub struct RejectDraft {
    pub target_id: String,
    pub reason: String,
    pub submitting: bool,
}

impl RejectDraft {
    fn new(target_id: String) -> Self {
        Self {
            target_id,
            reason: String::new(),
            submitting: false,
        }
    }
}

/// Main application state
pub struct TeleMed {
    pub config: ClientConfig,
    pub api: ApiClient,
    pub screen: Screen,
    pub session: Option<Session>,
    /// Transient notice line shown in screen headers.
    pub status: String,
    pub dark_mode: bool,

    // Auth forms
    pub login_email: String,
    pub login_password: String,
    pub login_error: Option<String>,
    pub logging_in: bool,
    pub signup: SignupForm,

    // Patient screens
    pub doctors: Vec<User>,
    pub doctor_search: String,
    pub specializations: Vec<String>,
    pub specialization_filter: Option<String>,
    pub booking: Option<BookingDraft>,
    pub appointments: Vec<Appointment>,
    pub prescriptions: Vec<Prescription>,

    // Doctor screens
    pub doctor_appointments: Vec<Appointment>,
    pub prescription_draft: Option<PrescriptionDraft>,
    pub appointment_reject: Option<RejectDraft>,

    // Admin screens
    pub admin_tab: ApprovalStatus,
    pub admin_stats: Option<AdminStats>,
    pub admin_doctors: Vec<User>,
    pub admin_reject: Option<RejectDraft>,

    // Chat
    pub chat: ChatState,
}

#[derive(Debug, Clone)]
pub enum Message {
    // Auth
    LoginEmailChanged(String),
    LoginPasswordChanged(String),
    SubmitLogin,
    LoginFinished(Result<(String, User), String>),
    SignupFieldChanged(SignupField, String),
    SignupRoleChanged(UserRole),
    SubmitSignup,
    /// Carries the role that registered, for the post-signup notice.
    SignupFinished(Result<UserRole, String>),
    Logout,

    Navigate(Screen),
    ToggleTheme,

    // Browse doctors / booking
    DoctorsLoaded(Result<Vec<User>, String>),
    DoctorSearchChanged(String),
    SpecializationPicked(String),
    OpenBooking(String),
    BookingFieldChanged(BookingField, String),
    CancelBooking,
    SubmitBooking,
    BookingFinished(Result<(), String>),

    // Patient appointments
    AppointmentsLoaded(Result<Vec<Appointment>, String>),
    CancelAppointment(String),
    CancelAppointmentFinished(Result<(), String>),
    JoinConsultation(String),

    // Prescriptions / health records
    PrescriptionsLoaded(Result<Vec<Prescription>, String>),

    // Doctor home
    DoctorAppointmentsLoaded(Result<Vec<Appointment>, String>),
    ConfirmAppointment(String),
    CompleteAppointment(String),
    OpenRejectAppointment(String),
    RejectReasonChanged(String),
    CancelRejectAppointment,
    SubmitRejectAppointment,
    AppointmentStatusFinished(Result<(), String>),
    OpenPrescriptionDraft {
        patient: PersonRef,
        appointment_id: Option<String>,
    },
    PrescriptionDiagnosisChanged(String),
    PrescriptionNotesChanged(String),
    MedicationChanged(usize, MedicationField, String),
    AddMedicationRow,
    RemoveMedicationRow(usize),
    CancelPrescriptionDraft,
    SubmitPrescription,
    PrescriptionSaved(Result<(), String>),

    // Admin
    AdminTabSelected(ApprovalStatus),
    AdminStatsLoaded(Result<AdminStats, String>),
    AdminDoctorsLoaded(Result<Vec<User>, String>),
    ApproveDoctor(String),
    OpenRejectDoctor(String),
    AdminRejectReasonChanged(String),
    CancelRejectDoctor,
    SubmitRejectDoctor,
    AdminActionFinished(Result<(), String>),

    // Chat
    RefreshTick,
    ConversationsLoaded(Result<Vec<ConversationSummary>, String>),
    ChatMessagesLoaded(String, Result<Vec<ChatMessage>, String>),
    UnreadCountLoaded(Result<u32, String>),
    SelectConversation(String),
    ChatInputChanged(String),
    SendChatMessage,
    ChatMessageSent(Result<ChatMessage, String>),
    ChatPaneScrolled(scrollable::Viewport),
}

impl Application for TeleMed {
    type Executor = iced::executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = ();

    fn new(_flags: ()) -> (Self, Command<Message>) {
        let config = ClientConfig::from_env();
        let mut api = ApiClient::new(&config.api_base_url);

        let session = match session_store::load_session() {
            Ok(session) => session,
            Err(error) => {
                tracing::warn!(error = %error, "failed to restore session");
                None
            }
        };

        let screen = match &session {
            Some(session) => {
                api = api.with_token(&session.token);
                home_screen(session.user.role)
            }
            None => Screen::Login,
        };

        let app = Self {
            config,
            api,
            screen,
            session,
            status: String::new(),
            dark_mode: true,
            login_email: String::new(),
            login_password: String::new(),
            login_error: None,
            logging_in: false,
            signup: SignupForm::new(),
            doctors: Vec::new(),
            doctor_search: String::new(),
            specializations: Vec::new(),
            specialization_filter: None,
            booking: None,
            appointments: Vec::new(),
            prescriptions: Vec::new(),
            doctor_appointments: Vec::new(),
            prescription_draft: None,
            appointment_reject: None,
            admin_tab: ApprovalStatus::Pending,
            admin_stats: None,
            admin_doctors: Vec::new(),
            admin_reject: None,
            chat: ChatState::new(),
        };

        let init = app.load_screen(screen);
        (app, init)
    }

    fn title(&self) -> String {
        let unread = if self.chat.aggregate_unread > 0 {
            format!("({}) ", self.chat.aggregate_unread)
        } else {
            String::new()
        };
        match &self.session {
            Some(session) => format!("{}TeleMed - {}", unread, session.user.name),
            None => format!("{}TeleMed", unread),
        }
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            // --- auth ---
            Message::LoginEmailChanged(value) => {
                self.login_email = value;
                Command::none()
            }
            Message::LoginPasswordChanged(value) => {
                self.login_password = value;
                Command::none()
            }
            Message::SubmitLogin => {
                if self.logging_in {
                    return Command::none();
                }
                if self.login_email.trim().is_empty() || self.login_password.is_empty() {
                    self.login_error = Some("Email and password are required".to_string());
                    return Command::none();
                }
                self.logging_in = true;
                self.login_error = None;
                let api = self.api.clone();
                let request = LoginRequest {
                    email: self.login_email.trim().to_string(),
                    password: self.login_password.clone(),
                };
                Command::perform(
                    async move { api.login(&request).await.map_err(|e| e.to_string()) },
                    Message::LoginFinished,
                )
            }
            Message::LoginFinished(result) => {
                self.logging_in = false;
                match result {
                    Ok((token, user)) => {
                        self.api = self.api.with_token(&token);
                        let session = Session {
                            token,
                            user: user.clone(),
                        };
                        if let Err(error) = session_store::save_session(&session) {
                            tracing::warn!(error = %error, "failed to persist session");
                        }
                        self.session = Some(session);
                        self.login_password.clear();
                        self.status.clear();
                        self.screen = home_screen(user.role);
                        self.load_screen(self.screen)
                    }
                    Err(error) => {
                        self.login_error = Some(error);
                        Command::none()
                    }
                }
            }
            Message::SignupFieldChanged(field, value) => {
                let form = &mut self.signup;
                match field {
                    SignupField::Name => form.name = value,
                    SignupField::Email => form.email = value,
                    SignupField::Password => form.password = value,
                    SignupField::ConfirmPassword => form.confirm_password = value,
                    SignupField::DateOfBirth => form.date_of_birth = value,
                    SignupField::Phone => form.phone = value,
                    SignupField::Address => form.address = value,
                    SignupField::Gender => form.gender = value,
                    SignupField::EmergencyContact => form.emergency_contact = value,
                    SignupField::EmergencyPhone => form.emergency_phone = value,
                    SignupField::Specialization => form.specialization = value,
                    SignupField::LicenseNumber => form.license_number = value,
                    SignupField::YearsOfExperience => form.years_of_experience = value,
                    SignupField::Hospital => form.hospital = value,
                    SignupField::Qualifications => form.qualifications = value,
                    SignupField::ConsultationFee => form.consultation_fee = value,
                }
                Command::none()
            }
            Message::SignupRoleChanged(role) => {
                self.signup.role = role;
                self.signup.error = None;
                Command::none()
            }
            Message::SubmitSignup => self.submit_signup(),
            Message::SignupFinished(result) => match result {
                Ok(role) => {
                    self.signup = SignupForm::new();
                    self.screen = Screen::Login;
                    self.status = match role {
                        UserRole::Doctor => {
                            "Registration submitted - you can log in once an administrator approves your credentials"
                                .to_string()
                        }
                        _ => "Account created - log in to continue".to_string(),
                    };
                    Command::none()
                }
                Err(error) => {
                    self.signup.submitting = false;
                    self.signup.error = Some(error);
                    Command::none()
                }
            },
            Message::Logout => {
                if let Err(error) = session_store::clear_session() {
                    tracing::warn!(error = %error, "failed to clear session");
                }
                self.session = None;
                self.api = ApiClient::new(&self.config.api_base_url);
                self.chat = ChatState::new();
                self.login_email.clear();
                self.login_password.clear();
                self.login_error = None;
                self.status.clear();
                self.screen = Screen::Login;
                Command::none()
            }

            // --- navigation ---
            Message::Navigate(screen) => {
                self.screen = screen;
                self.status.clear();
                self.load_screen(screen)
            }
            Message::ToggleTheme => {
                self.dark_mode = !self.dark_mode;
                Command::none()
            }

            // --- browse doctors / booking ---
            Message::DoctorsLoaded(result) => {
                match result {
                    Ok(doctors) => {
                        let mut specs: Vec<String> = doctors
                            .iter()
                            .filter_map(|d| d.specialization.as_ref())
                            .map(|s| s.to_lowercase())
                            .collect();
                        specs.sort();
                        specs.dedup();
                        self.specializations = specs;
                        self.doctors = doctors;
                    }
                    Err(error) => tracing::warn!(error = %error, "failed to load doctors"),
                }
                Command::none()
            }
            Message::DoctorSearchChanged(value) => {
                self.doctor_search = value;
                Command::none()
            }
            Message::SpecializationPicked(value) => {
                self.specialization_filter = if value == ui::doctors::ALL_SPECIALIZATIONS {
                    None
                } else {
                    Some(value)
                };
                Command::none()
            }
            Message::OpenBooking(doctor_id) => {
                if let Some(doctor) = self.doctors.iter().find(|d| d.id == doctor_id) {
                    self.booking = Some(BookingDraft::new(doctor.clone()));
                }
                Command::none()
            }
            Message::BookingFieldChanged(field, value) => {
                if let Some(draft) = &mut self.booking {
                    match field {
                        BookingField::Date => draft.date = value,
                        BookingField::Time => draft.time = value,
                        BookingField::Reason => draft.reason = value,
                    }
                }
                Command::none()
            }
            Message::CancelBooking => {
                self.booking = None;
                Command::none()
            }
            Message::SubmitBooking => {
                let Some(draft) = &mut self.booking else {
                    return Command::none();
                };
                if draft.submitting {
                    return Command::none();
                }
                if draft.date.trim().is_empty()
                    || draft.time.trim().is_empty()
                    || draft.reason.trim().is_empty()
                {
                    draft.error = Some("Please fill in all fields".to_string());
                    return Command::none();
                }
                draft.submitting = true;
                draft.error = None;
                let request = BookAppointmentRequest {
                    doctor_id: draft.doctor.id.clone(),
                    date: draft.date.trim().to_string(),
                    time: draft.time.trim().to_string(),
                    reason: draft.reason.trim().to_string(),
                };
                let api = self.api.clone();
                Command::perform(
                    async move { api.book_appointment(&request).await.map_err(|e| e.to_string()) },
                    Message::BookingFinished,
                )
            }
            Message::BookingFinished(result) => match result {
                Ok(()) => {
                    self.booking = None;
                    self.status =
                        "Appointment requested - the doctor will review it".to_string();
                    Command::none()
                }
                Err(error) => {
                    if let Some(draft) = &mut self.booking {
                        draft.submitting = false;
                        draft.error = Some(error);
                    }
                    Command::none()
                }
            },

            // --- patient appointments ---
            Message::AppointmentsLoaded(result) => {
                match result {
                    Ok(appointments) => self.appointments = appointments,
                    Err(error) => tracing::warn!(error = %error, "failed to load appointments"),
                }
                Command::none()
            }
            Message::CancelAppointment(appointment_id) => {
                let api = self.api.clone();
                Command::perform(
                    async move {
                        api.cancel_appointment(&appointment_id)
                            .await
                            .map_err(|e| e.to_string())
                    },
                    Message::CancelAppointmentFinished,
                )
            }
            Message::CancelAppointmentFinished(result) => match result {
                Ok(()) => {
                    self.status = "Appointment cancelled".to_string();
                    self.fetch_patient_appointments()
                }
                Err(error) => {
                    self.status = format!("Could not cancel: {error}");
                    Command::none()
                }
            },
            Message::JoinConsultation(appointment_id) => {
                let url = self.config.consult_room_url(&appointment_id);
                if let Err(error) = open::that(&url) {
                    tracing::warn!(%url, error = %error, "failed to open consultation room");
                    self.status =
                        "Could not open the consultation room in your browser".to_string();
                }
                Command::none()
            }

            // --- prescriptions / records ---
            Message::PrescriptionsLoaded(result) => {
                match result {
                    Ok(prescriptions) => self.prescriptions = prescriptions,
                    Err(error) => tracing::warn!(error = %error, "failed to load prescriptions"),
                }
                Command::none()
            }

            // --- doctor home ---
            Message::DoctorAppointmentsLoaded(result) => {
                match result {
                    Ok(appointments) => self.doctor_appointments = appointments,
                    Err(error) => tracing::warn!(error = %error, "failed to load appointments"),
                }
                Command::none()
            }
            Message::ConfirmAppointment(appointment_id) => {
                self.update_appointment_status(appointment_id, AppointmentStatus::Confirmed, None)
            }
            Message::CompleteAppointment(appointment_id) => {
                self.update_appointment_status(appointment_id, AppointmentStatus::Completed, None)
            }
            Message::OpenRejectAppointment(appointment_id) => {
                self.appointment_reject = Some(RejectDraft::new(appointment_id));
                Command::none()
            }
            Message::RejectReasonChanged(value) => {
                if let Some(draft) = &mut self.appointment_reject {
                    draft.reason = value;
                }
                Command::none()
            }
            Message::CancelRejectAppointment => {
                self.appointment_reject = None;
                Command::none()
            }
            Message::SubmitRejectAppointment => {
                let Some(draft) = &mut self.appointment_reject else {
                    return Command::none();
                };
                if draft.reason.trim().is_empty() {
                    self.status = "A rejection reason is required".to_string();
                    return Command::none();
                }
                draft.submitting = true;
                let id = draft.target_id.clone();
                let reason = draft.reason.trim().to_string();
                self.update_appointment_status(id, AppointmentStatus::Rejected, Some(reason))
            }
            Message::AppointmentStatusFinished(result) => match result {
                Ok(()) => {
                    self.appointment_reject = None;
                    self.status = "Appointment updated".to_string();
                    self.fetch_doctor_appointments()
                }
                Err(error) => {
                    if let Some(draft) = &mut self.appointment_reject {
                        draft.submitting = false;
                    }
                    self.status = format!("Update failed: {error}");
                    Command::none()
                }
            },
            Message::OpenPrescriptionDraft {
                patient,
                appointment_id,
            } => {
                self.prescription_draft = Some(PrescriptionDraft::new(patient, appointment_id));
                Command::none()
            }
            Message::PrescriptionDiagnosisChanged(value) => {
                if let Some(draft) = &mut self.prescription_draft {
                    draft.diagnosis = value;
                }
                Command::none()
            }
            Message::PrescriptionNotesChanged(value) => {
                if let Some(draft) = &mut self.prescription_draft {
                    draft.notes = value;
                }
                Command::none()
            }
            Message::MedicationChanged(index, field, value) => {
                if let Some(draft) = &mut self.prescription_draft {
                    if let Some(row) = draft.medications.get_mut(index) {
                        match field {
                            MedicationField::Name => row.name = value,
                            MedicationField::Dosage => row.dosage = value,
                            MedicationField::Frequency => row.frequency = value,
                            MedicationField::Duration => row.duration = value,
                            MedicationField::Instructions => row.instructions = value,
                        }
                    }
                }
                Command::none()
            }
            Message::AddMedicationRow => {
                if let Some(draft) = &mut self.prescription_draft {
                    draft.medications.push(MedicationRow::default());
                }
                Command::none()
            }
            Message::RemoveMedicationRow(index) => {
                if let Some(draft) = &mut self.prescription_draft {
                    if draft.medications.len() > 1 && index < draft.medications.len() {
                        draft.medications.remove(index);
                    }
                }
                Command::none()
            }
            Message::CancelPrescriptionDraft => {
                self.prescription_draft = None;
                Command::none()
            }
            Message::SubmitPrescription => {
                let Some(draft) = &mut self.prescription_draft else {
                    return Command::none();
                };
                if draft.submitting {
                    return Command::none();
                }
                let medications: Vec<Medication> = draft
                    .medications
                    .iter()
                    .map(MedicationRow::to_medication)
                    .filter(Medication::is_complete)
                    .collect();
                if medications.is_empty() {
                    draft.error = Some(
                        "Add at least one medication with name, dosage, frequency and duration"
                            .to_string(),
                    );
                    return Command::none();
                }
                draft.submitting = true;
                draft.error = None;
                let request = CreatePrescriptionRequest {
                    patient_id: draft.patient.id.clone(),
                    appointment_id: draft.appointment_id.clone(),
                    medications,
                    diagnosis: match draft.diagnosis.trim() {
                        "" => None,
                        other => Some(other.to_string()),
                    },
                    notes: match draft.notes.trim() {
                        "" => None,
                        other => Some(other.to_string()),
                    },
                };
                let api = self.api.clone();
                Command::perform(
                    async move {
                        api.create_prescription(&request)
                            .await
                            .map_err(|e| e.to_string())
                    },
                    Message::PrescriptionSaved,
                )
            }
            Message::PrescriptionSaved(result) => match result {
                Ok(()) => {
                    self.prescription_draft = None;
                    self.status = "Prescription created".to_string();
                    Command::none()
                }
                Err(error) => {
                    if let Some(draft) = &mut self.prescription_draft {
                        draft.submitting = false;
                        draft.error = Some(error);
                    }
                    Command::none()
                }
            },

            // --- admin ---
            Message::AdminTabSelected(tab) => {
                self.admin_tab = tab;
                self.admin_reject = None;
                Command::batch([self.fetch_admin_stats(), self.fetch_admin_doctors()])
            }
            Message::AdminStatsLoaded(result) => {
                match result {
                    Ok(stats) => self.admin_stats = Some(stats),
                    Err(error) => tracing::warn!(error = %error, "failed to load admin stats"),
                }
                Command::none()
            }
            Message::AdminDoctorsLoaded(result) => {
                match result {
                    Ok(doctors) => self.admin_doctors = doctors,
                    Err(error) => tracing::warn!(error = %error, "failed to load doctors"),
                }
                Command::none()
            }
            Message::ApproveDoctor(doctor_id) => {
                let api = self.api.clone();
                Command::perform(
                    async move { api.approve_doctor(&doctor_id).await.map_err(|e| e.to_string()) },
                    Message::AdminActionFinished,
                )
            }
            Message::OpenRejectDoctor(doctor_id) => {
                self.admin_reject = Some(RejectDraft::new(doctor_id));
                Command::none()
            }
            Message::AdminRejectReasonChanged(value) => {
                if let Some(draft) = &mut self.admin_reject {
                    draft.reason = value;
                }
                Command::none()
            }
            Message::CancelRejectDoctor => {
                self.admin_reject = None;
                Command::none()
            }
            Message::SubmitRejectDoctor => {
                let Some(draft) = &mut self.admin_reject else {
                    return Command::none();
                };
                if draft.reason.trim().is_empty() {
                    self.status = "A rejection reason is required".to_string();
                    return Command::none();
                }
                draft.submitting = true;
                let id = draft.target_id.clone();
                let reason = draft.reason.trim().to_string();
                let api = self.api.clone();
                Command::perform(
                    async move { api.reject_doctor(&id, &reason).await.map_err(|e| e.to_string()) },
                    Message::AdminActionFinished,
                )
            }
            Message::AdminActionFinished(result) => match result {
                Ok(()) => {
                    self.admin_reject = None;
                    self.status = "Doctor review updated".to_string();
                    Command::batch([self.fetch_admin_stats(), self.fetch_admin_doctors()])
                }
                Err(error) => {
                    if let Some(draft) = &mut self.admin_reject {
                        draft.submitting = false;
                    }
                    self.status = format!("Action failed: {error}");
                    Command::none()
                }
            },

            // --- chat ---
            Message::RefreshTick => {
                if self.screen != Screen::Chat {
                    return Command::none();
                }
                let mut commands = vec![self.fetch_conversations(), self.fetch_unread_count()];
                if let Some(peer) = &self.chat.active_peer {
                    commands.push(self.fetch_messages(peer.id.clone()));
                }
                Command::batch(commands)
            }
            Message::ConversationsLoaded(result) => {
                match result {
                    Ok(conversations) => self.chat.apply_conversations(conversations),
                    Err(error) => tracing::warn!(error = %error, "failed to load conversations"),
                }
                Command::none()
            }
            Message::ChatMessagesLoaded(peer_id, result) => match result {
                Ok(history) => {
                    match self.chat.apply_history(&peer_id, history, Instant::now()) {
                        ScrollAction::SnapToBottom => self.snap_chat_to_bottom(),
                        ScrollAction::None => Command::none(),
                    }
                }
                Err(error) => {
                    tracing::warn!(error = %error, "failed to refresh messages");
                    Command::none()
                }
            },
            Message::UnreadCountLoaded(result) => {
                match result {
                    Ok(count) => self.chat.aggregate_unread = count,
                    Err(error) => tracing::warn!(error = %error, "failed to load unread count"),
                }
                Command::none()
            }
            Message::SelectConversation(peer_id) => {
                let peer = self
                    .chat
                    .conversations
                    .iter()
                    .find(|c| c.user.id == peer_id)
                    .map(|c| c.user.clone());
                match peer {
                    Some(peer) => {
                        self.chat.select_peer(peer);
                        self.fetch_messages(peer_id)
                    }
                    None => Command::none(),
                }
            }
            Message::ChatInputChanged(value) => {
                self.chat.input = value;
                Command::none()
            }
            Message::SendChatMessage => {
                if !self.chat.accepts_send(&self.chat.input) {
                    return Command::none();
                }
                let Some(peer) = &self.chat.active_peer else {
                    return Command::none();
                };
                let receiver = peer.id.clone();
                let text = self.chat.input.trim().to_string();
                self.chat.sending = true;
                self.chat.send_error = None;
                let api = self.api.clone();
                Command::perform(
                    async move { api.send_message(&receiver, &text).await.map_err(|e| e.to_string()) },
                    Message::ChatMessageSent,
                )
            }
            Message::ChatMessageSent(result) => {
                // The in-flight flag clears on both arms so a failure can't
                // wedge the input.
                self.chat.sending = false;
                match result {
                    Ok(message) => {
                        let action = self.chat.apply_sent(message, Instant::now());
                        let refresh = self.fetch_conversations();
                        match action {
                            ScrollAction::SnapToBottom => {
                                Command::batch([self.snap_chat_to_bottom(), refresh])
                            }
                            ScrollAction::None => refresh,
                        }
                    }
                    Err(error) => {
                        self.chat.send_error = Some(error);
                        Command::none()
                    }
                }
            }
            Message::ChatPaneScrolled(viewport) => {
                let metrics = PaneMetrics {
                    content_height: viewport.content_bounds().height,
                    viewport_height: viewport.bounds().height,
                    offset_y: viewport.absolute_offset().y,
                };
                self.chat.sync.note_scroll(metrics, Instant::now());
                Command::none()
            }
        }
    }

    fn view(&self) -> Element<Message> {
        let content: Element<Message> = match self.screen {
            Screen::Login => ui::login::view(self),
            Screen::Signup => ui::signup::view(self),
            Screen::PatientHome => ui::patient::view(self),
            Screen::BrowseDoctors => ui::doctors::view(self),
            Screen::PatientAppointments => ui::appointments::view(self),
            Screen::PatientPrescriptions => ui::prescriptions::view(self),
            Screen::HealthRecords => ui::records::view(self),
            Screen::DoctorHome => ui::doctor::view(self),
            Screen::AdminHome => ui::admin::view(self),
            Screen::Chat => ui::chat::view(self),
        };
        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        match chat_poll_interval(self.screen) {
            Some(period) => iced::time::every(period).map(|_| Message::RefreshTick),
            None => Subscription::none(),
        }
    }

    fn theme(&self) -> Theme {
        if self.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

impl TeleMed {
    fn submit_signup(&mut self) -> Command<Message> {
        if self.signup.submitting {
            return Command::none();
        }
        let form = &mut self.signup;
        if form.name.trim().is_empty()
            || form.email.trim().is_empty()
            || form.password.is_empty()
        {
            form.error = Some("Name, email and password are required".to_string());
            return Command::none();
        }
        if form.password != form.confirm_password {
            form.error = Some("Passwords do not match".to_string());
            return Command::none();
        }

        let optional = |value: &str| match value.trim() {
            "" => None,
            other => Some(other.to_string()),
        };

        let mut request = match form.role {
            UserRole::Doctor => SignupRequest::doctor(
                form.name.trim().to_string(),
                form.email.trim().to_string(),
                form.password.clone(),
            ),
            _ => SignupRequest::patient(
                form.name.trim().to_string(),
                form.email.trim().to_string(),
                form.password.clone(),
            ),
        };

        match form.role {
            UserRole::Doctor => {
                if form.specialization.trim().is_empty() || form.license_number.trim().is_empty() {
                    form.error =
                        Some("Specialization and license number are required".to_string());
                    return Command::none();
                }
                request.specialization = optional(&form.specialization);
                request.license_number = optional(&form.license_number);
                request.hospital = optional(&form.hospital);
                request.qualifications = optional(&form.qualifications);
                if !form.years_of_experience.trim().is_empty() {
                    match form.years_of_experience.trim().parse::<u32>() {
                        Ok(years) => request.years_of_experience = Some(years),
                        Err(_) => {
                            form.error =
                                Some("Years of experience must be a whole number".to_string());
                            return Command::none();
                        }
                    }
                }
                if !form.consultation_fee.trim().is_empty() {
                    match form.consultation_fee.trim().parse::<f64>() {
                        Ok(fee) => request.consultation_fee = Some(fee),
                        Err(_) => {
                            form.error = Some("Consultation fee must be a number".to_string());
                            return Command::none();
                        }
                    }
                }
            }
            _ => {
                request.date_of_birth = optional(&form.date_of_birth);
                request.phone = optional(&form.phone);
                request.address = optional(&form.address);
                request.gender = optional(&form.gender);
                request.emergency_contact = optional(&form.emergency_contact);
                request.emergency_phone = optional(&form.emergency_phone);
            }
        }

        form.submitting = true;
        form.error = None;
        let role = form.role;
        let api = self.api.clone();
        Command::perform(
            async move { api.signup(&request).await.map(|_| role).map_err(|e| e.to_string()) },
            Message::SignupFinished,
        )
    }

    fn load_screen(&self, screen: Screen) -> Command<Message> {
        match screen {
            Screen::Login | Screen::Signup => Command::none(),
            Screen::PatientHome => self.fetch_unread_count(),
            Screen::BrowseDoctors => self.fetch_doctors(),
            Screen::PatientAppointments => self.fetch_patient_appointments(),
            Screen::PatientPrescriptions => self.fetch_prescriptions(),
            Screen::HealthRecords => Command::batch([
                self.fetch_patient_appointments(),
                self.fetch_prescriptions(),
            ]),
            Screen::DoctorHome => Command::batch([
                self.fetch_doctor_appointments(),
                self.fetch_unread_count(),
            ]),
            Screen::AdminHome => {
                Command::batch([self.fetch_admin_stats(), self.fetch_admin_doctors()])
            }
            Screen::Chat => {
                Command::batch([self.fetch_conversations(), self.fetch_unread_count()])
            }
        }
    }

    fn update_appointment_status(
        &self,
        appointment_id: String,
        status: AppointmentStatus,
        rejection_reason: Option<String>,
    ) -> Command<Message> {
        let request = UpdateAppointmentStatusRequest {
            status,
            rejection_reason,
        };
        let api = self.api.clone();
        Command::perform(
            async move {
                api.update_appointment_status(&appointment_id, &request)
                    .await
                    .map_err(|e| e.to_string())
            },
            Message::AppointmentStatusFinished,
        )
    }

    fn fetch_conversations(&self) -> Command<Message> {
        let api = self.api.clone();
        Command::perform(
            async move { api.list_conversations().await.map_err(|e| e.to_string()) },
            Message::ConversationsLoaded,
        )
    }

    fn fetch_messages(&self, peer_id: String) -> Command<Message> {
        let api = self.api.clone();
        Command::perform(
            async move {
                let result = api.fetch_messages(&peer_id).await.map_err(|e| e.to_string());
                (peer_id, result)
            },
            |(peer_id, result)| Message::ChatMessagesLoaded(peer_id, result),
        )
    }

    fn fetch_unread_count(&self) -> Command<Message> {
        let api = self.api.clone();
        Command::perform(
            async move { api.unread_count().await.map_err(|e| e.to_string()) },
            Message::UnreadCountLoaded,
        )
    }

    fn fetch_doctors(&self) -> Command<Message> {
        let api = self.api.clone();
        Command::perform(
            async move { api.list_doctors().await.map_err(|e| e.to_string()) },
            Message::DoctorsLoaded,
        )
    }

    fn fetch_patient_appointments(&self) -> Command<Message> {
        let api = self.api.clone();
        Command::perform(
            async move { api.patient_appointments().await.map_err(|e| e.to_string()) },
            Message::AppointmentsLoaded,
        )
    }

    fn fetch_prescriptions(&self) -> Command<Message> {
        let api = self.api.clone();
        Command::perform(
            async move { api.patient_prescriptions().await.map_err(|e| e.to_string()) },
            Message::PrescriptionsLoaded,
        )
    }

    fn fetch_doctor_appointments(&self) -> Command<Message> {
        let api = self.api.clone();
        Command::perform(
            async move { api.doctor_appointments(None).await.map_err(|e| e.to_string()) },
            Message::DoctorAppointmentsLoaded,
        )
    }

    fn fetch_admin_stats(&self) -> Command<Message> {
        let api = self.api.clone();
        Command::perform(
            async move { api.admin_stats().await.map_err(|e| e.to_string()) },
            Message::AdminStatsLoaded,
        )
    }

    fn fetch_admin_doctors(&self) -> Command<Message> {
        let api = self.api.clone();
        let tab = self.admin_tab;
        Command::perform(
            async move { api.admin_doctors(tab).await.map_err(|e| e.to_string()) },
            Message::AdminDoctorsLoaded,
        )
    }

    fn snap_chat_to_bottom(&self) -> Command<Message> {
        scrollable::snap_to(self.chat.scroll_id.clone(), scrollable::RelativeOffset::END)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polling_exists_only_on_the_chat_screen() {
        assert_eq!(chat_poll_interval(Screen::Chat), Some(CHAT_POLL_INTERVAL));
        for screen in [
            Screen::Login,
            Screen::Signup,
            Screen::PatientHome,
            Screen::BrowseDoctors,
            Screen::PatientAppointments,
            Screen::DoctorHome,
            Screen::AdminHome,
        ] {
            assert_eq!(chat_poll_interval(screen), None);
        }
    }

    #[test]
    fn home_screen_follows_role() {
        assert_eq!(home_screen(UserRole::Patient), Screen::PatientHome);
        assert_eq!(home_screen(UserRole::Doctor), Screen::DoctorHome);
        assert_eq!(home_screen(UserRole::Admin), Screen::AdminHome);
    }
}
