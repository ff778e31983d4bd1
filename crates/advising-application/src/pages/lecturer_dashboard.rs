//! Lecturer dashboard.
//!
//! One fetch of `/api/lecturer/data` fills the profile summary, the advisees
//! table and the resource list, and caches every advisee by id. Row actions
//! then work from that cache: the details modal never refetches, while
//! results and notes are fetched per advisee into their own sections, each
//! guarded by its own request epoch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use advising_core::fetch::Endpoint;
use advising_core::form::{FormOutcome, FormState, validate};
use advising_core::payload::{
    Ack, Advisee, AdviseeResult, AdviseeResults, AdvisingNote, ContactGuardianRequest,
    LecturerData, NewNote, NoteCreated, NotesPayload, Resource,
};
use advising_core::session::{Session, SessionGuard, UserRole};
use advising_core::view::{
    decimal_or_fallback, integer_or_fallback, note_timestamp, text_or_fallback,
};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

use super::resources::list_item;
use super::submission::Submission;
use crate::context::{AppContext, Landing};
use crate::error::{PageError, PageResult};
use crate::render::{Cell, NoteItem, RowAction, TableLayout, Tone};

pub const PAGE: &str = "lecturer/dashboard.html";

pub const DASHBOARD_MAIN: &str = "dashboard-main";
pub const WELCOME_NAME: &str = "welcome-lecturer-name";
pub const LECTURER_NAME: &str = "lecturer-name";
pub const LECTURER_EMAIL: &str = "lecturer-email";
pub const LECTURER_DEPT: &str = "lecturer-dept";
pub const LECTURER_OFFICE: &str = "lecturer-office";
pub const ADVISEES_TABLE: &str = "advisees-table-body";
pub const RESOURCE_LIST: &str = "resource-list";

pub const DETAILS_MODAL: &str = "adviseeDetailsModal";
pub const MODAL_ADVISEE_NAME: &str = "modal-advisee-name";
pub const MODAL_ADVISEE_MATRIC: &str = "modal-advisee-matric";
pub const MODAL_ADVISEE_EMAIL: &str = "modal-advisee-email";
pub const MODAL_ADVISEE_DEGREE: &str = "modal-advisee-degree";
pub const MODAL_ADVISEE_GPA: &str = "modal-advisee-gpa";
pub const MODAL_GUARDIAN_NAME: &str = "modal-guardian-name";
pub const MODAL_GUARDIAN_EMAIL: &str = "modal-guardian-email";
pub const MODAL_GUARDIAN_PHONE: &str = "modal-guardian-phone";
pub const MODAL_GUARDIAN_RELATIONSHIP: &str = "modal-guardian-relationship";

pub const RESULTS_SECTION: &str = "view-advisee-results-section";
pub const RESULTS_HEADING: &str = "viewing-results-for-advisee-name";
pub const RESULTS_TABLE: &str = "advisee-results-table-body";

pub const NOTES_SECTION: &str = "view-notes-section";
pub const NOTES_HEADER: &str = "viewing-notes-for-advisee-header";
pub const NOTES_LIST: &str = "view-notes-list";
pub const CURRENT_STUDENT_ATTRIBUTE: &str = "data-current-student-id";

pub const ADD_NOTE_SECTION: &str = "add-note-section";
pub const ADD_NOTE_DESCRIPTION: &str = "add-note-section-description";
pub const ADD_NOTE_FORM: &str = "add-note-form";
pub const NOTE_CONTENT: &str = "note-content";
pub const ADD_NOTE_STATUS: &str = "add-note-status";
pub const ADD_NOTE_SUBMIT: &str = "add-note-submit";
pub const STUDENT_ID_ATTRIBUTE: &str = "data-student-id";

pub const CONTACT_MODAL: &str = "contactGuardianModal";
pub const CONTACT_ADVISEE_NAME: &str = "modal-contact-advisee-name";
pub const CONTACT_EMAIL_DISPLAY: &str = "modal-contact-guardian-email-display";
pub const CONTACT_ADVISEE_ID: &str = "contact-advisee-id";
pub const CONTACT_GUARDIAN_EMAIL: &str = "contact-guardian-email-hidden";
pub const CONTACT_SUBJECT: &str = "contact-subject";
pub const CONTACT_BODY: &str = "contact-message-body";
pub const CONTACT_URGENT: &str = "contact-is-urgent";
pub const CONTACT_STATUS: &str = "contact-guardian-status";
pub const CONTACT_SUBMIT: &str = "contact-guardian-submit";

fn advisees_layout() -> TableLayout<Advisee> {
    TableLayout::<Advisee>::new("No advisees assigned.")
        .column("Matric No.", |a| {
            Cell::text(text_or_fallback(a.matric_number.as_deref()))
        })
        .column("Name", |a| Cell::text(text_or_fallback(a.name.as_deref())))
        .column("Email", |a| Cell::text(text_or_fallback(a.email.as_deref())))
        .column("Degree", |a| Cell::text(text_or_fallback(a.degree.as_deref())))
        .column("GPA", |a| Cell::text(decimal_or_fallback(a.gpa)))
        .column("Actions", |a| {
            let name = a.name.as_deref();
            Cell::Actions(vec![
                RowAction::new("Details", "details", &a.id),
                RowAction::new("Results", "results", &a.id).with_name(name),
                RowAction::new("Add Note", "add-note", &a.id).with_name(name),
                RowAction::new("View Notes", "view-notes", &a.id).with_name(name),
                RowAction::new("Contact Guardian", "contact-guardian", &a.id).with_name(name),
            ])
        })
}

fn results_layout() -> TableLayout<AdviseeResult> {
    TableLayout::<AdviseeResult>::new("No academic results found for this student.")
        .column("Course Code", |r| {
            Cell::text(text_or_fallback(r.course_code.as_deref()))
        })
        .column("Course Title", |r| {
            Cell::text(text_or_fallback(r.course_title.as_deref()))
        })
        .column("Units", |r| Cell::text(integer_or_fallback(r.course_units)))
        .column("Semester", |r| {
            Cell::text(text_or_fallback(r.semester.as_deref()))
        })
        .column("Grade", |r| Cell::text(text_or_fallback(r.grade.as_deref())))
        .column("Grade Points", |r| Cell::text(decimal_or_fallback(r.grade_points)))
}

fn note_item(note: &AdvisingNote) -> NoteItem {
    let author = note
        .author_name
        .as_deref()
        .filter(|a| !a.trim().is_empty())
        .unwrap_or("Unknown");
    NoteItem {
        content: note.content.clone(),
        meta: format!("By: {author} on {}", note_timestamp(note.created_at.as_deref())),
    }
}

fn display_name(advisee: Option<&Advisee>, id: &str) -> String {
    advisee
        .and_then(|a| a.name.clone())
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| format!("Student ID: {id}"))
}

/// Controller for `lecturer/dashboard.html`.
pub struct LecturerDashboardPage {
    ctx: Arc<AppContext>,
    /// Admitted session, set by [`load`](Self::load).
    session: RwLock<Option<Session>>,
    /// Advisees from the last dashboard fetch, keyed by id.
    advisees: RwLock<HashMap<String, Advisee>>,
    note_form: Mutex<FormState>,
    contact_form: Mutex<FormState>,
    /// Pending close of the contact modal after a successful send.
    auto_close: Mutex<Option<JoinHandle<()>>>,
}

impl LecturerDashboardPage {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self {
            ctx,
            session: RwLock::new(None),
            advisees: RwLock::new(HashMap::new()),
            note_form: Mutex::new(FormState::new()),
            contact_form: Mutex::new(FormState::new()),
            auto_close: Mutex::new(None),
        }
    }

    pub async fn load(&self) -> PageResult<()> {
        let session = self
            .ctx
            .enter_page(PAGE, &SessionGuard::for_role(UserRole::Lecturer))
            .await?;
        let token = session.token.clone();
        *self.session.write().await = Some(session);

        self.ctx
            .with_surface(|s| {
                for id in [
                    DETAILS_MODAL,
                    CONTACT_MODAL,
                    RESULTS_SECTION,
                    NOTES_SECTION,
                    ADD_NOTE_SECTION,
                ] {
                    s.hide(id);
                }
            })
            .await;

        let loading = self.ctx.renderer().placeholder_row(
            advisees_layout().colspan(),
            "Loading advisees...",
            Tone::Loading,
        )?;
        self.ctx.with_surface(|s| s.set_html(ADVISEES_TABLE, loading)).await;

        let fetch = self
            .ctx
            .rest()
            .get::<LecturerData>(&Endpoint::LecturerData, Some(&token));

        match self.ctx.land(ADVISEES_TABLE, fetch).await {
            Landing::Fresh(reply) => self.render_dashboard(reply.payload).await,
            Landing::Failed(e) => {
                let message = format!(
                    "Could not load lecturer data: {}",
                    e.inline_message("Unknown server error.")
                );
                let html = self.ctx.renderer().message(&message, Tone::Error)?;
                let row = self.ctx.renderer().placeholder_row(
                    advisees_layout().colspan(),
                    &message,
                    Tone::Error,
                )?;
                self.ctx
                    .with_surface(|s| {
                        s.set_html(DASHBOARD_MAIN, html);
                        s.set_html(ADVISEES_TABLE, row);
                    })
                    .await;
                Ok(())
            }
            Landing::Stale => Ok(()),
        }
    }

    async fn render_dashboard(&self, data: LecturerData) -> PageResult<()> {
        let info = data.lecturer_info.unwrap_or_default();
        let layout = advisees_layout();
        let table = self.ctx.renderer().table(&layout, &data.advisees)?;
        let resources = self.render_resources(&data.resources)?;

        {
            let mut cache = self.advisees.write().await;
            cache.clear();
            cache.extend(data.advisees.into_iter().map(|a| (a.id.clone(), a)));
            tracing::debug!(advisees = cache.len(), "advisee cache replaced");
        }

        let welcome = info
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "[Lecturer]".to_string());
        self.ctx
            .with_surface(|s| {
                s.set_text(WELCOME_NAME, welcome);
                s.set_text(LECTURER_NAME, text_or_fallback(info.name.as_deref()));
                s.set_text(LECTURER_EMAIL, text_or_fallback(info.email.as_deref()));
                s.set_text(LECTURER_DEPT, text_or_fallback(info.department.as_deref()));
                s.set_text(
                    LECTURER_OFFICE,
                    text_or_fallback(info.office_location.as_deref()),
                );
                s.set_html(ADVISEES_TABLE, table);
                s.set_html(RESOURCE_LIST, resources);
            })
            .await;
        Ok(())
    }

    fn render_resources(&self, resources: &[Resource]) -> PageResult<String> {
        if resources.is_empty() {
            return Ok(self
                .ctx
                .renderer()
                .placeholder_item("No resources available.", Tone::Info)?);
        }
        let items: Vec<_> = resources.iter().map(list_item).collect();
        Ok(self.ctx.renderer().list(&items, "No resources available.")?)
    }

    /// Ids of the cached advisees.
    pub async fn advisee_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.advisees.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Fills the details modal from the cache. No request is made.
    pub async fn open_details(&self, advisee_id: &str) -> PageResult<()> {
        let Some(advisee) = self.advisees.read().await.get(advisee_id).cloned() else {
            self.ctx
                .with_surface(|s| s.alert("Could not find details for this advisee."))
                .await;
            return Ok(());
        };

        self.ctx
            .with_surface(|s| {
                let fields = [
                    (MODAL_ADVISEE_NAME, advisee.name.as_deref()),
                    (MODAL_ADVISEE_MATRIC, advisee.matric_number.as_deref()),
                    (MODAL_ADVISEE_EMAIL, advisee.email.as_deref()),
                    (MODAL_ADVISEE_DEGREE, advisee.degree.as_deref()),
                    (MODAL_GUARDIAN_NAME, advisee.guardian_name.as_deref()),
                    (MODAL_GUARDIAN_EMAIL, advisee.guardian_email.as_deref()),
                    (MODAL_GUARDIAN_PHONE, advisee.guardian_phone.as_deref()),
                    (
                        MODAL_GUARDIAN_RELATIONSHIP,
                        advisee.guardian_relationship.as_deref(),
                    ),
                ];
                for (id, value) in fields {
                    s.set_text(id, text_or_fallback(value));
                }
                s.set_text(MODAL_ADVISEE_GPA, decimal_or_fallback(advisee.gpa));
                s.show(DETAILS_MODAL);
            })
            .await;
        Ok(())
    }

    /// Hides a modal (`adviseeDetailsModal` or `contactGuardianModal`).
    pub async fn close_modal(&self, modal: &str) {
        if modal == CONTACT_MODAL {
            self.reset_contact_form().await;
        }
        self.ctx.with_surface(|s| s.hide(modal)).await;
    }

    pub async fn view_results(&self, advisee_id: &str) -> PageResult<()> {
        let token = self.token().await?;
        let heading = display_name(self.advisees.read().await.get(advisee_id), advisee_id);
        let layout = results_layout();
        let loading =
            self.ctx
                .renderer()
                .placeholder_row(layout.colspan(), "Fetching results...", Tone::Loading)?;
        self.ctx
            .with_surface(|s| {
                s.set_text(RESULTS_HEADING, heading);
                s.set_html(RESULTS_TABLE, loading);
                s.show(RESULTS_SECTION);
            })
            .await;

        let endpoint = Endpoint::AdviseeResults {
            advisee_id: advisee_id.to_string(),
        };
        let fetch = self
            .ctx
            .rest()
            .get::<AdviseeResults>(&endpoint, Some(&token));

        let html = match self.ctx.land(RESULTS_TABLE, fetch).await {
            Landing::Fresh(reply) => self.ctx.renderer().table(&layout, &reply.payload.results)?,
            Landing::Failed(e) => self.ctx.renderer().placeholder_row(
                layout.colspan(),
                &e.inline_message("Could not fetch results."),
                Tone::Error,
            )?,
            Landing::Stale => return Ok(()),
        };
        self.ctx.with_surface(|s| s.set_html(RESULTS_TABLE, html)).await;
        Ok(())
    }

    pub async fn view_notes(&self, student_id: &str) -> PageResult<()> {
        let token = self.token().await?;
        let name = display_name(self.advisees.read().await.get(student_id), student_id);
        let loading = self
            .ctx
            .renderer()
            .placeholder_item("Loading notes...", Tone::Loading)?;
        self.ctx
            .with_surface(|s| {
                s.set_text(NOTES_HEADER, format!("Advising Notes for: {name}"));
                s.set_attribute(NOTES_LIST, CURRENT_STUDENT_ATTRIBUTE, student_id);
                s.set_html(NOTES_LIST, loading);
                s.show(NOTES_SECTION);
            })
            .await;

        let endpoint = Endpoint::StudentNotes {
            student_id: student_id.to_string(),
        };
        let fetch = self.ctx.rest().get::<NotesPayload>(&endpoint, Some(&token));

        let html = match self.ctx.land(NOTES_LIST, fetch).await {
            Landing::Fresh(reply) => {
                let notes: Vec<NoteItem> = reply.payload.notes.iter().map(note_item).collect();
                if notes.is_empty() {
                    self.ctx.renderer().placeholder_item(
                        "No advising notes found for this student.",
                        Tone::Info,
                    )?
                } else {
                    self.ctx
                        .renderer()
                        .notes(&notes, "No advising notes found for this student.")?
                }
            }
            Landing::Failed(e) => self.ctx.renderer().placeholder_item(
                &e.inline_message("Could not retrieve notes."),
                Tone::Error,
            )?,
            Landing::Stale => return Ok(()),
        };
        self.ctx.with_surface(|s| s.set_html(NOTES_LIST, html)).await;
        Ok(())
    }

    /// Binds the add-note form to an advisee and clears it.
    pub async fn prepare_add_note(&self, student_id: &str) {
        let name = self
            .advisees
            .read()
            .await
            .get(student_id)
            .and_then(|a| a.name.clone())
            .unwrap_or_else(|| "Student".to_string());
        self.ctx
            .with_surface(|s| {
                s.set_text(
                    ADD_NOTE_DESCRIPTION,
                    format!("Enter note for: {name} (Student ID: {student_id})"),
                );
                s.set_attribute(ADD_NOTE_FORM, STUDENT_ID_ATTRIBUTE, student_id);
                s.set_value(NOTE_CONTENT, "");
                s.set_text(ADD_NOTE_STATUS, "");
                s.show(ADD_NOTE_SECTION);
            })
            .await;
    }

    /// Saves the note typed into `note-content` for the bound advisee.
    ///
    /// Blank content is rejected before any request. On success the notes
    /// list is refetched if it is showing the same advisee.
    pub async fn submit_note(&self) -> PageResult<FormOutcome> {
        let token = self.token().await?;
        let flow = Submission::new(&self.ctx, &self.note_form, ADD_NOTE_STATUS, ADD_NOTE_SUBMIT);
        flow.begin().await?;

        let (student_id, content) = self
            .ctx
            .with_surface(|s| {
                (
                    s.attribute(ADD_NOTE_FORM, STUDENT_ID_ATTRIBUTE)
                        .unwrap_or_default()
                        .to_string(),
                    s.value(NOTE_CONTENT).to_string(),
                )
            })
            .await;

        let checked = validate::required(&student_id, "Please select an advisee first.")
            .and_then(|id| {
                validate::required(&content, "Note content cannot be empty.").map(|c| (id, c))
            });
        let (student_id, content) = match checked {
            Ok(fields) => fields,
            Err(e) => return Ok(flow.reject(e).await),
        };

        flow.start("Saving note...").await?;
        let endpoint = Endpoint::StudentNotes {
            student_id: student_id.clone(),
        };
        let result = self
            .ctx
            .rest()
            .post::<_, NoteCreated>(&endpoint, Some(&token), &NewNote { content })
            .await;
        let outcome = flow
            .complete(result, "Note saved successfully!", "Failed to save note.")
            .await;

        if outcome.is_success() {
            let showing = self
                .ctx
                .with_surface(|s| {
                    s.set_value(NOTE_CONTENT, "");
                    s.is_visible(NOTES_SECTION)
                        && s.attribute(NOTES_LIST, CURRENT_STUDENT_ATTRIBUTE)
                            == Some(student_id.as_str())
                })
                .await;
            if showing {
                self.view_notes(&student_id).await?;
            }
        }
        Ok(outcome)
    }

    /// Opens the contact modal pre-filled for an advisee.
    ///
    /// Advisees without a guardian email get an alert instead.
    pub async fn open_contact_guardian(&self, advisee_id: &str) -> PageResult<()> {
        let Some(advisee) = self.advisees.read().await.get(advisee_id).cloned() else {
            self.ctx
                .with_surface(|s| s.alert("Could not find advisee data to contact guardian."))
                .await;
            return Ok(());
        };

        let name = advisee.name.clone().filter(|n| !n.trim().is_empty());
        if !advisee.has_guardian_email() {
            let who = name.as_deref().unwrap_or("This student");
            let message = format!("{who} does not have a registered guardian email.");
            self.ctx.with_surface(|s| s.alert(message)).await;
            return Ok(());
        }

        self.reset_contact_form().await;
        let guardian_email = advisee.guardian_email.clone().unwrap_or_default();
        self.ctx
            .with_surface(|s| {
                s.set_text(CONTACT_ADVISEE_NAME, name.as_deref().unwrap_or("Student"));
                s.set_text(CONTACT_EMAIL_DISPLAY, guardian_email.as_str());
                s.set_value(CONTACT_ADVISEE_ID, advisee_id);
                s.set_value(CONTACT_GUARDIAN_EMAIL, guardian_email.as_str());
                s.set_value(
                    CONTACT_SUBJECT,
                    format!(
                        "Regarding your ward, {}",
                        name.as_deref().unwrap_or("Student")
                    ),
                );
                s.show(CONTACT_MODAL);
            })
            .await;
        Ok(())
    }

    /// Sends the contact modal's message. A success closes the modal after
    /// the configured delay.
    pub async fn submit_contact_guardian(&self) -> PageResult<FormOutcome> {
        let token = self.token().await?;
        let flow = Submission::new(&self.ctx, &self.contact_form, CONTACT_STATUS, CONTACT_SUBMIT);
        flow.begin().await?;

        let (advisee_id, subject, body, urgent) = self
            .ctx
            .with_surface(|s| {
                (
                    s.value(CONTACT_ADVISEE_ID).to_string(),
                    s.value(CONTACT_SUBJECT).to_string(),
                    s.value(CONTACT_BODY).to_string(),
                    s.value(CONTACT_URGENT) == "true",
                )
            })
            .await;

        let checked = validate::required(&advisee_id, "Error: Advisee ID not set.")
            .and_then(|id| {
                let subject = validate::required(&subject, "Subject cannot be empty.")?;
                let body = validate::required(&body, "Message body cannot be empty.")?;
                Ok((id, subject, body))
            });
        let (advisee_id, subject, message_body) = match checked {
            Ok(fields) => fields,
            Err(e) => return Ok(flow.reject(e).await),
        };

        flow.start("Sending email...").await?;
        let request = ContactGuardianRequest {
            message_body,
            subject,
            is_urgent: urgent,
        };
        let endpoint = Endpoint::ContactGuardian { advisee_id };
        let result = self
            .ctx
            .rest()
            .post::<_, Ack>(&endpoint, Some(&token), &request)
            .await;
        let outcome = flow
            .complete(result, "Email sent successfully!", "Failed to send email.")
            .await;

        if outcome.is_success() {
            self.schedule_auto_close().await;
        }
        Ok(outcome)
    }

    /// Waits for a pending auto-close, if any.
    pub async fn settle_auto_close(&self) {
        let pending = self.auto_close.lock().await.take();
        if let Some(handle) = pending {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "auto-close task failed");
            }
        }
    }

    pub async fn toggle_theme(&self) -> PageResult<()> {
        self.ctx.toggle_theme().await?;
        Ok(())
    }

    pub async fn logout(&self) -> PageResult<()> {
        self.ctx.logout().await
    }

    async fn schedule_auto_close(&self) {
        let surface = self.ctx.surface();
        let delay = Duration::from_millis(self.ctx.config().auto_close_delay_ms);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut surface = surface.lock().await;
            surface.hide(CONTACT_MODAL);
            clear_contact_fields(&mut surface);
        });

        if let Some(previous) = self.auto_close.lock().await.replace(handle) {
            previous.abort();
        }
    }

    async fn reset_contact_form(&self) {
        if let Some(pending) = self.auto_close.lock().await.take() {
            pending.abort();
        }
        self.ctx.with_surface(clear_contact_fields).await;
    }

    async fn token(&self) -> PageResult<String> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.token.clone())
            .ok_or(PageError::NotLoaded)
    }
}

fn clear_contact_fields(surface: &mut crate::surface::PageSurface) {
    for id in [
        CONTACT_ADVISEE_ID,
        CONTACT_GUARDIAN_EMAIL,
        CONTACT_SUBJECT,
        CONTACT_BODY,
    ] {
        surface.set_value(id, "");
    }
    surface.set_value(CONTACT_URGENT, "false");
    surface.set_text(CONTACT_STATUS, "");
}
