use anyhow::{Result, ensure};
use mediconnect::{
    APP_USER_AGENT,
    mediconnect::{
        FileStore, FormController, FormDraft, Outcome, RecordingView, SupabaseClient,
        forms::{ContactForm, LoginForm, RegistrationForm, Role, contact, login},
        storage::{CONTACT_DRAFT_KEY, KeyValueStore, REMEMBERED_EMAIL_KEY},
    },
};
use secrecy::SecretString;
use serde_json::json;
use std::{net::TcpListener, sync::Arc, time::Duration};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path, query_param},
};

const ANON_KEY: &str = "anon-key";
const USER_ID: &str = "3b241101-e2bb-4255-8caf-4136c566a962";

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

fn controller(server: &MockServer, storage: &std::path::Path) -> Result<FormController> {
    controller_with_timeout(server, storage, Duration::from_secs(5))
}

fn controller_with_timeout(
    server: &MockServer,
    storage: &std::path::Path,
    timeout: Duration,
) -> Result<FormController> {
    let client = SupabaseClient::new(
        &server.uri(),
        SecretString::from(ANON_KEY.to_string()),
        APP_USER_AGENT,
        timeout,
    )?;
    Ok(FormController::new(
        Arc::new(client),
        Arc::new(FileStore::new(storage)),
    ))
}

#[tokio::test]
async fn doctor_registration_creates_account_and_profile() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    let storage = tempfile::tempdir()?;

    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .and(header("apikey", ANON_KEY))
        .and(body_partial_json(json!({
            "email": "kofi.yao@clinique.ci",
            "data": {"role": "doctor", "specialty": "pediatrie", "phone": "+225 07 12 34 56 78"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "user-token",
            "user": {"id": USER_ID, "email": "kofi.yao@clinique.ci"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/doctors"))
        .and(header("Authorization", "Bearer user-token"))
        .and(header("Prefer", "return=minimal"))
        .and(body_partial_json(json!({"id": USER_ID, "full_name": "Kofi Yao"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller(&server, storage.path())?;
    let form = RegistrationForm::new(Role::Doctor);
    let draft = FormDraft::new("doctorForm")
        .with("doctorFirstName", "Kofi")
        .with("doctorLastName", "Yao")
        .with("doctorEmail", "kofi.yao@clinique.ci")
        .with("doctorPhone", "0712345678")
        .with("doctorPassword", "motdepasse")
        .with("specialty", "pediatrie")
        .with("orderNumber", "CI-2024-118")
        .with("doctorTerms", true);
    let mut view = RecordingView::new("Créer mon compte");

    let outcome = controller.submit(&form, &draft, &mut view).await;

    ensure!(outcome == Outcome::Submitted);
    ensure!(
        view.alerts().first().map(|alert| alert.message.as_str())
            == Some("Compte médecin créé avec succès ! Vérifiez votre email pour l'activation.")
    );
    Ok(())
}

#[tokio::test]
async fn rejected_login_keeps_remembered_email_untouched() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    let storage = tempfile::tempdir()?;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller(&server, storage.path())?;
    controller
        .store()
        .set(REMEMBERED_EMAIL_KEY, "\"awa@clinique.ci\"")?;

    let form = LoginForm::new();
    let draft = controller
        .restore(&form)
        .unwrap_or_else(|| FormDraft::new(login::FORM_ID))
        .with(login::PASSWORD, "mauvais-mdp")
        .with(login::REMEMBER_ME, false);
    ensure!(draft.text(login::EMAIL) == "awa@clinique.ci");

    let mut view = RecordingView::new("Se connecter");
    let outcome = controller.submit(&form, &draft, &mut view).await;

    ensure!(outcome == Outcome::Failed);
    ensure!(
        view.alerts().first().map(|alert| alert.message.as_str())
            == Some("Email ou mot de passe incorrect. Veuillez réessayer.")
    );
    // remember-me is only applied after a successful login
    ensure!(controller.store().get(REMEMBERED_EMAIL_KEY)?.is_some());
    Ok(())
}

#[tokio::test]
async fn contact_message_is_stored_and_draft_file_removed() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    let storage = tempfile::tempdir()?;

    Mock::given(method("POST"))
        .and(path("/rest/v1/contact_messages"))
        .and(header("Authorization", "Bearer anon-key"))
        .and(body_partial_json(json!({
            "email": "awa@exemple.ci",
            "subject": "support",
            "phone": null
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller(&server, storage.path())?;
    let form = ContactForm::new();
    let draft = FormDraft::new(contact::FORM_ID)
        .with(contact::FIRST_NAME, "Awa")
        .with(contact::LAST_NAME, "Koné")
        .with(contact::EMAIL, "awa@exemple.ci")
        .with(contact::SUBJECT, "support")
        .with(contact::MESSAGE, "L'application ne charge plus mon dossier.")
        .with(contact::PRIVACY, true);
    ensure!(controller.autosave(&form, &draft));
    ensure!(storage.path().join("contactFormDraft.json").exists());

    let mut view = RecordingView::new("Envoyer le message");
    ensure!(controller.submit(&form, &draft, &mut view).await == Outcome::Submitted);

    ensure!(controller.store().get(CONTACT_DRAFT_KEY)?.is_none());
    ensure!(!storage.path().join("contactFormDraft.json").exists());
    Ok(())
}

#[tokio::test]
async fn slow_backend_times_out_and_keeps_contact_draft() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    let storage = tempfile::tempdir()?;

    Mock::given(method("POST"))
        .and(path("/rest/v1/contact_messages"))
        .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let controller = controller_with_timeout(&server, storage.path(), Duration::from_millis(200))?;
    let form = ContactForm::new();
    let draft = FormDraft::new(contact::FORM_ID)
        .with(contact::FIRST_NAME, "Awa")
        .with(contact::LAST_NAME, "Koné")
        .with(contact::EMAIL, "awa@exemple.ci")
        .with(contact::SUBJECT, "appointment")
        .with(contact::MESSAGE, "Je souhaite un rendez-vous lundi.")
        .with(contact::PRIVACY, true);
    ensure!(controller.autosave(&form, &draft));

    let mut view = RecordingView::new("Envoyer le message");
    let outcome = controller.submit(&form, &draft, &mut view).await;

    ensure!(outcome == Outcome::Failed);
    ensure!(!view.button.is_busy());
    ensure!(
        view.alerts().first().map(|alert| alert.message.as_str())
            == Some(
                "Une erreur est survenue lors de l'envoi. Veuillez réessayer ou nous contacter directement."
            )
    );
    ensure!(controller.store().get(CONTACT_DRAFT_KEY)?.is_some());
    ensure!(storage.path().join("contactFormDraft.json").exists());
    Ok(())
}
