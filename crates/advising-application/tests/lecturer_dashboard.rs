mod support;

use std::time::Duration;

use advising_application::PageError;
use advising_application::pages::LecturerDashboardPage;
use advising_application::pages::lecturer_dashboard::*;
use advising_core::fetch::Method;
use advising_core::form::FormError;
use advising_core::session::UserRole;
use serde_json::{Value, json};
use support::{Harness, LOGIN_PAGE};

const DATA: &str = "/api/lecturer/data";

fn lecturer_data() -> Value {
    json!({
        "success": true,
        "lecturer_info": {
            "id": 9,
            "name": "Dr. Bello",
            "email": "bello@uni.edu",
            "department": "Computer Science",
            "office_location": null
        },
        "advisees": [
            {
                "id": 1,
                "name": "Ada Obi",
                "matric_number": "CSC-2020-001",
                "email": "ada@uni.edu",
                "degree": "BSc Computer Science",
                "gpa": 3.5,
                "guardian_name": "Mr Obi",
                "guardian_email": "obi@mail.com",
                "guardian_phone": "0803",
                "guardian_relationship": "Father"
            },
            {
                "id": "2",
                "name": "Tunde Ade",
                "matric_number": "CSC-2020-002",
                "gpa": "N/A"
            }
        ],
        "resources": []
    })
}

async fn loaded() -> (Harness, LecturerDashboardPage) {
    let h = Harness::new();
    h.sign_in(UserRole::Lecturer, "Dr. Bello");
    h.transport.respond(Method::Get, DATA, 200, lecturer_data());
    let page = LecturerDashboardPage::new(h.ctx.clone());
    page.load().await.unwrap();
    (h, page)
}

#[tokio::test]
async fn test_missing_token_makes_no_request() {
    let h = Harness::new();
    let page = LecturerDashboardPage::new(h.ctx.clone());

    let err = page.load().await.unwrap_err();

    assert!(err.is_rejected());
    assert!(h.transport.calls().is_empty());
    assert_eq!(h.location().await.as_deref(), Some(LOGIN_PAGE));
}

#[tokio::test]
async fn test_student_session_is_rejected() {
    let h = Harness::new();
    h.sign_in(UserRole::Student, "Ada Obi");
    let page = LecturerDashboardPage::new(h.ctx.clone());

    assert!(page.load().await.unwrap_err().is_rejected());
    assert!(h.transport.calls().is_empty());
}

#[tokio::test]
async fn test_load_renders_profile_and_advisees() {
    let (h, page) = loaded().await;

    assert_eq!(h.text(WELCOME_NAME).await, "Dr. Bello");
    assert_eq!(h.text(LECTURER_DEPT).await, "Computer Science");
    assert_eq!(h.text(LECTURER_OFFICE).await, "N/A");

    let table = h.html(ADVISEES_TABLE).await;
    assert_eq!(table.matches("<tr>").count(), 2);
    assert!(table.contains("<td>3.50</td>"));
    assert!(table.contains("<td>N/A</td>"));
    assert!(table.contains("data-action=\"contact-guardian\" data-key=\"1\""));

    assert_eq!(page.advisee_ids().await, vec!["1", "2"]);
    let calls = h.transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].bearer.as_deref(), Some("tok-123"));
    assert!(
        h.html(RESOURCE_LIST)
            .await
            .contains("No resources available.")
    );
}

#[tokio::test]
async fn test_rendering_same_payload_twice_is_identical() {
    let (h, page) = loaded().await;
    let first = h.html(ADVISEES_TABLE).await;

    page.load().await.unwrap();

    assert_eq!(h.html(ADVISEES_TABLE).await, first);
}

#[tokio::test]
async fn test_payload_failure_shows_message_and_no_rows() {
    let h = Harness::new();
    h.sign_in(UserRole::Lecturer, "Dr. Bello");
    h.transport.respond(
        Method::Get,
        DATA,
        200,
        json!({"success": false, "message": "Lecturer record missing"}),
    );
    let page = LecturerDashboardPage::new(h.ctx.clone());

    page.load().await.unwrap();

    assert!(
        h.html(DASHBOARD_MAIN)
            .await
            .contains("Could not load lecturer data: Lecturer record missing")
    );
    let table = h.html(ADVISEES_TABLE).await;
    assert_eq!(table.matches("<tr>").count(), 1);
    assert!(table.contains("class=\"error-message\""));
    assert!(page.advisee_ids().await.is_empty());
}

#[tokio::test]
async fn test_unauthorized_clears_storage_and_leaves() {
    let h = Harness::new();
    h.sign_in(UserRole::Lecturer, "Dr. Bello");
    h.transport
        .respond(Method::Get, DATA, 401, json!({"message": "Token expired"}));
    let page = LecturerDashboardPage::new(h.ctx.clone());

    page.load().await.unwrap();

    assert!(h.stored_keys().is_empty());
    assert_eq!(h.location().await.as_deref(), Some(LOGIN_PAGE));
}

#[tokio::test]
async fn test_details_modal_uses_cache() {
    let (h, page) = loaded().await;

    page.open_details("1").await.unwrap();

    let surface = h.ctx.surface_snapshot().await;
    assert!(surface.is_visible(DETAILS_MODAL));
    assert_eq!(surface.text(MODAL_ADVISEE_NAME), Some("Ada Obi"));
    assert_eq!(surface.text(MODAL_ADVISEE_GPA), Some("3.50"));
    assert_eq!(surface.text(MODAL_GUARDIAN_RELATIONSHIP), Some("Father"));
    assert_eq!(h.transport.calls().len(), 1);

    page.close_modal(DETAILS_MODAL).await;
    assert!(!h.ctx.surface_snapshot().await.is_visible(DETAILS_MODAL));
}

#[tokio::test]
async fn test_empty_results_show_placeholder() {
    let (h, page) = loaded().await;
    h.transport.respond(
        Method::Get,
        "/api/lecturer/advisees/1/results",
        200,
        json!({"success": true, "student_name": "Ada Obi", "results": []}),
    );

    page.view_results("1").await.unwrap();

    assert_eq!(h.text(RESULTS_HEADING).await, "Ada Obi");
    assert_eq!(
        h.html(RESULTS_TABLE).await,
        "<tr><td colspan=\"6\" class=\"placeholder\">No academic results found for this student.</td></tr>"
    );
}

#[tokio::test]
async fn test_results_fetch_failure_stays_in_section() {
    let (h, page) = loaded().await;
    h.transport
        .unreachable(Method::Get, "/api/lecturer/advisees/2/results");

    page.view_results("2").await.unwrap();

    let table = h.html(RESULTS_TABLE).await;
    assert!(table.contains("Network error or failed to connect to the server."));
    assert_eq!(h.text(WELCOME_NAME).await, "Dr. Bello");
    assert!(h.location().await.is_none());
}

#[tokio::test]
async fn test_older_results_response_is_discarded() {
    let (h, page) = loaded().await;
    let first_path = "/api/lecturer/advisees/1/results";
    let second_path = "/api/lecturer/advisees/2/results";
    let result = |code: &str| {
        json!({"success": true, "results": [
            {"course_code": code, "course_title": "Course", "course_units": 3,
             "semester": "First", "grade": "A", "grade_points": 5}
        ]})
    };
    h.transport
        .respond(Method::Get, first_path, 200, result("OLD 101"));
    h.transport
        .respond(Method::Get, second_path, 200, result("NEW 202"));
    let first_gate = h.transport.gate(first_path);
    let second_gate = h.transport.gate(second_path);

    let (first, second, _) = tokio::join!(page.view_results("1"), page.view_results("2"), async {
        second_gate.notify_one();
        tokio::task::yield_now().await;
        first_gate.notify_one();
    });
    first.unwrap();
    second.unwrap();

    let table = h.html(RESULTS_TABLE).await;
    assert!(table.contains("NEW 202"));
    assert!(!table.contains("OLD 101"));
    assert_eq!(h.text(RESULTS_HEADING).await, "Tunde Ade");
}

#[tokio::test]
async fn test_older_notes_response_is_discarded() {
    let (h, page) = loaded().await;
    let first_path = "/api/students/1/notes";
    let second_path = "/api/students/2/notes";
    let notes = |content: &str| {
        json!({"success": true, "notes": [
            {"id": 1, "content": content, "created_at": "2024-03-05T14:30:00",
             "author_name": "Dr. Bello"}
        ]})
    };
    h.transport
        .respond(Method::Get, first_path, 200, notes("Older advisee note"));
    h.transport
        .respond(Method::Get, second_path, 200, notes("Newer advisee note"));
    let first_gate = h.transport.gate(first_path);
    let second_gate = h.transport.gate(second_path);

    let (first, second, _) = tokio::join!(page.view_notes("1"), page.view_notes("2"), async {
        second_gate.notify_one();
        tokio::task::yield_now().await;
        first_gate.notify_one();
    });
    first.unwrap();
    second.unwrap();

    let list = h.html(NOTES_LIST).await;
    assert!(list.contains("Newer advisee note"));
    assert!(!list.contains("Older advisee note"));
    assert_eq!(h.text(NOTES_HEADER).await, "Advising Notes for: Tunde Ade");
    assert_eq!(
        h.ctx
            .surface_snapshot()
            .await
            .attribute(NOTES_LIST, CURRENT_STUDENT_ATTRIBUTE),
        Some("2")
    );
}

#[tokio::test]
async fn test_note_before_load_leaves_form_untouched() {
    let h = Harness::new();
    h.sign_in(UserRole::Lecturer, "Dr. Bello");
    h.transport.respond(Method::Get, DATA, 200, lecturer_data());
    h.transport.respond(
        Method::Post,
        "/api/students/1/notes",
        201,
        json!({"success": true, "note": {"content": "Doing well"}}),
    );
    let page = LecturerDashboardPage::new(h.ctx.clone());
    h.ctx
        .with_surface(|s| s.set_text(ADD_NOTE_STATUS, "Note saved successfully!"))
        .await;

    let err = page.submit_note().await.unwrap_err();

    assert!(matches!(err, PageError::NotLoaded));
    assert_eq!(h.text(ADD_NOTE_STATUS).await, "Note saved successfully!");
    assert!(h.transport.calls().is_empty());

    page.load().await.unwrap();
    page.prepare_add_note("1").await;
    h.ctx.fill(NOTE_CONTENT, "Doing well").await;
    assert!(page.submit_note().await.unwrap().is_success());
}

#[tokio::test]
async fn test_blank_note_is_never_sent() {
    let (h, page) = loaded().await;
    page.prepare_add_note("1").await;
    h.ctx.fill(NOTE_CONTENT, "   ").await;

    let outcome = page.submit_note().await.unwrap();

    assert!(!outcome.is_success());
    assert_eq!(h.text(ADD_NOTE_STATUS).await, "Note content cannot be empty.");
    assert!(
        h.transport
            .calls_to(Method::Post, "/api/students/1/notes")
            .is_empty()
    );
}

#[tokio::test]
async fn test_note_without_selected_advisee_is_refused() {
    let (h, page) = loaded().await;
    h.ctx.fill(NOTE_CONTENT, "Doing well").await;

    let outcome = page.submit_note().await.unwrap();

    assert_eq!(outcome.message(), "Please select an advisee first.");
    assert_eq!(h.transport.calls().len(), 1);
}

#[tokio::test]
async fn test_saved_note_refreshes_visible_notes() {
    let (h, page) = loaded().await;
    let notes_path = "/api/students/1/notes";
    h.transport.respond(
        Method::Get,
        notes_path,
        200,
        json!({"success": true, "notes": [
            {"id": 4, "content": "Discussed electives", "created_at": "2024-03-05T14:30:00",
             "author_name": "Dr. Bello"}
        ]}),
    );
    h.transport.respond(
        Method::Post,
        notes_path,
        201,
        json!({"success": true, "message": "Note added", "note": {"content": "Doing well"}}),
    );

    page.view_notes("1").await.unwrap();
    let notes = h.html(NOTES_LIST).await;
    assert!(notes.contains("Discussed electives"));
    assert!(notes.contains("By: Dr. Bello on Mar 05, 2024 02:30 PM"));

    page.prepare_add_note("1").await;
    h.ctx.fill(NOTE_CONTENT, "Doing well").await;
    let outcome = page.submit_note().await.unwrap();

    assert!(outcome.is_success());
    assert_eq!(h.text(ADD_NOTE_STATUS).await, "Note added");
    let surface = h.ctx.surface_snapshot().await;
    assert_eq!(surface.value(NOTE_CONTENT), "");
    assert!(!surface.is_disabled(ADD_NOTE_SUBMIT));

    let posts = h.transport.calls_to(Method::Post, notes_path);
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].body, Some(json!({"content": "Doing well"})));
    assert_eq!(h.transport.calls_to(Method::Get, notes_path).len(), 2);
}

#[tokio::test]
async fn test_empty_notes_placeholder() {
    let (h, page) = loaded().await;
    h.transport.respond(
        Method::Get,
        "/api/students/2/notes",
        200,
        json!({"success": true, "notes": []}),
    );

    page.view_notes("2").await.unwrap();

    assert_eq!(h.text(NOTES_HEADER).await, "Advising Notes for: Tunde Ade");
    assert!(
        h.html(NOTES_LIST)
            .await
            .contains("No advising notes found for this student.")
    );
}

#[tokio::test]
async fn test_duplicate_note_submission_is_refused() {
    let (h, page) = loaded().await;
    let notes_path = "/api/students/1/notes";
    h.transport.respond(
        Method::Post,
        notes_path,
        201,
        json!({"success": true, "note": {"content": "First"}}),
    );
    let gate = h.transport.gate(notes_path);
    page.prepare_add_note("1").await;
    h.ctx.fill(NOTE_CONTENT, "First").await;

    let (first, second) = tokio::join!(page.submit_note(), async {
        while !h.ctx.surface_snapshot().await.is_disabled(ADD_NOTE_SUBMIT) {
            tokio::task::yield_now().await;
        }
        assert_eq!(h.text(ADD_NOTE_STATUS).await, "Saving note...");
        let second = page.submit_note().await;
        gate.notify_one();
        second
    });

    assert!(first.unwrap().is_success());
    assert!(matches!(
        second,
        Err(PageError::Form(FormError::AlreadySubmitting))
    ));
    assert_eq!(h.transport.calls_to(Method::Post, notes_path).len(), 1);
    assert!(!h.ctx.surface_snapshot().await.is_disabled(ADD_NOTE_SUBMIT));
}

#[tokio::test]
async fn test_contact_guardian_requires_guardian_email() {
    let (h, page) = loaded().await;

    page.open_contact_guardian("2").await.unwrap();

    let surface = h.ctx.surface_snapshot().await;
    assert_eq!(
        surface.alerts(),
        ["Tunde Ade does not have a registered guardian email."]
    );
    assert!(!surface.is_visible(CONTACT_MODAL));
}

#[tokio::test]
async fn test_contact_guardian_validation() {
    let (h, page) = loaded().await;
    page.open_contact_guardian("1").await.unwrap();
    assert_eq!(
        h.ctx.surface_snapshot().await.value(CONTACT_SUBJECT),
        "Regarding your ward, Ada Obi"
    );

    let outcome = page.submit_contact_guardian().await.unwrap();

    assert_eq!(outcome.message(), "Message body cannot be empty.");
    assert!(h.transport.calls_to(Method::Post, "/api/advisees/1/contact-guardian").is_empty());
}

#[tokio::test]
async fn test_duplicate_contact_submission_is_refused() {
    let (h, page) = loaded().await;
    let path = "/api/advisees/1/contact-guardian";
    h.transport
        .respond(Method::Post, path, 200, json!({"success": true}));
    let gate = h.transport.gate(path);
    page.open_contact_guardian("1").await.unwrap();
    h.ctx.fill(CONTACT_BODY, "Please call me this week.").await;

    let (first, second) = tokio::join!(page.submit_contact_guardian(), async {
        while !h.ctx.surface_snapshot().await.is_disabled(CONTACT_SUBMIT) {
            tokio::task::yield_now().await;
        }
        assert_eq!(h.text(CONTACT_STATUS).await, "Sending email...");
        let second = page.submit_contact_guardian().await;
        gate.notify_one();
        second
    });

    assert!(first.unwrap().is_success());
    assert!(matches!(
        second,
        Err(PageError::Form(FormError::AlreadySubmitting))
    ));
    assert_eq!(h.transport.calls_to(Method::Post, path).len(), 1);
    assert!(!h.ctx.surface_snapshot().await.is_disabled(CONTACT_SUBMIT));
}

#[tokio::test(start_paused = true)]
async fn test_contact_modal_closes_after_delay() {
    let (h, page) = loaded().await;
    let path = "/api/advisees/1/contact-guardian";
    h.transport
        .respond(Method::Post, path, 200, json!({"success": true}));

    page.open_contact_guardian("1").await.unwrap();
    h.ctx.fill(CONTACT_BODY, "Please call me this week.").await;
    h.ctx.fill(CONTACT_URGENT, "true").await;

    let sent_at = tokio::time::Instant::now();
    let outcome = page.submit_contact_guardian().await.unwrap();

    assert_eq!(outcome.message(), "Email sent successfully!");
    assert!(h.ctx.surface_snapshot().await.is_visible(CONTACT_MODAL));

    let posts = h.transport.calls_to(Method::Post, path);
    assert_eq!(
        posts[0].body,
        Some(json!({
            "message_body": "Please call me this week.",
            "subject": "Regarding your ward, Ada Obi",
            "is_urgent": true
        }))
    );

    page.settle_auto_close().await;

    assert!(sent_at.elapsed() >= Duration::from_millis(2500));
    let surface = h.ctx.surface_snapshot().await;
    assert!(!surface.is_visible(CONTACT_MODAL));
    assert_eq!(surface.value(CONTACT_SUBJECT), "");
    assert_eq!(surface.value(CONTACT_BODY), "");
}

#[tokio::test]
async fn test_theme_preference_is_applied_on_entry() {
    let h = Harness::new();
    h.sign_in(UserRole::Lecturer, "Dr. Bello");
    advising_core::session::SessionStore::new(h.storage.clone())
        .set_theme(advising_core::theme::ThemeMode::Dark)
        .unwrap();
    h.transport.respond(Method::Get, DATA, 200, lecturer_data());
    let page = LecturerDashboardPage::new(h.ctx.clone());

    page.load().await.unwrap();
    let surface = h.ctx.surface_snapshot().await;
    assert!(surface.has_body_class("dark-mode"));
    assert_eq!(surface.text("theme-toggle-button"), Some("☀️"));

    page.toggle_theme().await.unwrap();
    assert!(!h.ctx.surface_snapshot().await.has_body_class("dark-mode"));
}

#[tokio::test]
async fn test_logout_clears_everything() {
    let (h, page) = loaded().await;

    page.logout().await.unwrap();

    assert!(h.stored_keys().is_empty());
    assert_eq!(h.location().await.as_deref(), Some(LOGIN_PAGE));
}
