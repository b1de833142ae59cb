use cb_core::{AppConfig, AppPhase, AuthView};
use coffeebrew_lib::bootstrap;
use coffeebrew_lib::cli::{run_shell, Command, Session};
use serde_json::Value;
use tempfile::TempDir;

fn session(data_dir: &TempDir) -> Session {
    let mut config = AppConfig::with_data_dir(data_dir.path().to_path_buf());
    config.splash_duration_ms = 0;
    Session::new(bootstrap::wire_app(&config))
}

async fn cold_start(data_dir: &TempDir) -> Session {
    let session = session(data_dir);
    session.start(false).await;
    session
}

#[tokio::test]
async fn one_shot_commands_persist_between_runs() {
    let data_dir = TempDir::new().unwrap();

    let output = cold_start(&data_dir)
        .await
        .execute(&Command::CompleteOnboarding)
        .await
        .unwrap();
    assert_eq!(output.phase, AppPhase::Auth(AuthView::SignIn));
    assert_eq!(output.screen, "Auth");

    let output = cold_start(&data_dir)
        .await
        .execute(&Command::SignUp {
            email: "a@b.com".into(),
            password: "secret1".into(),
            confirm: "secret1".into(),
        })
        .await
        .unwrap();
    assert_eq!(output.phase, AppPhase::Home);
    assert!(output.warning.is_none());

    let output = cold_start(&data_dir)
        .await
        .execute(&Command::Status)
        .await
        .unwrap();
    assert_eq!(output.phase, AppPhase::Home);
    assert_eq!(
        output.profile.and_then(|p| p.email),
        Some("a@b.com".to_string())
    );

    let output = cold_start(&data_dir)
        .await
        .execute(&Command::Restart)
        .await
        .unwrap();
    assert_eq!(output.phase, AppPhase::Onboarding);
    assert!(output.warning.is_none());

    let output = cold_start(&data_dir)
        .await
        .execute(&Command::Status)
        .await
        .unwrap();
    assert_eq!(output.phase, AppPhase::Onboarding);
}

#[tokio::test]
async fn launch_passes_through_splash() {
    let data_dir = TempDir::new().unwrap();
    let session = session(&data_dir);

    assert_eq!(session.app().controller.phase().await, AppPhase::Splash);
    assert_eq!(session.start(true).await, AppPhase::Onboarding);
}

#[tokio::test]
async fn rejected_transition_is_reported() {
    let data_dir = TempDir::new().unwrap();
    let session = cold_start(&data_dir).await;

    let err = session.execute(&Command::Logout).await.unwrap_err();

    assert!(format!("{err:#}").contains("cannot logout"));
    assert_eq!(session.app().controller.phase().await, AppPhase::Onboarding);
}

#[tokio::test]
async fn invalid_sign_up_form_keeps_auth_screen() {
    let data_dir = TempDir::new().unwrap();
    let session = cold_start(&data_dir).await;
    session.execute(&Command::CompleteOnboarding).await.unwrap();

    let result = session
        .execute(&Command::SignUp {
            email: "a@b.com".into(),
            password: "secret1".into(),
            confirm: "secret2".into(),
        })
        .await;

    assert!(result.is_err());
    assert_eq!(
        session.app().controller.phase().await,
        AppPhase::Auth(AuthView::SignIn)
    );
}

#[tokio::test]
async fn guest_session_has_no_profile() {
    let data_dir = TempDir::new().unwrap();
    let session = cold_start(&data_dir).await;
    session.execute(&Command::CompleteOnboarding).await.unwrap();

    let output = session.execute(&Command::Guest).await.unwrap();

    assert_eq!(output.phase, AppPhase::Home);
    assert!(output.profile.is_none());
}

#[tokio::test]
async fn shell_runs_a_whole_journey() {
    let data_dir = TempDir::new().unwrap();
    let session = cold_start(&data_dir).await;
    let input = b"complete-onboarding
signup-view

social google
launch
brew --strong
update-profile --display-name \"Head Barista\"
exit
status
";
    let mut out = Vec::new();

    run_shell(&session, &input[..], &mut out).await.unwrap();

    let replies: Vec<Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(replies.len(), 7);
    assert_eq!(replies[0]["screen"], "Onboarding");
    assert_eq!(replies[1]["screen"], "Auth");
    assert_eq!(replies[2]["screen"], "Signup");
    assert_eq!(replies[3]["screen"], "Home");
    assert_eq!(replies[3]["profile"]["email"], "user@google.com");
    assert_eq!(replies[3]["profile"]["signupMethod"], "google");
    assert!(replies[4]["error"].is_string());
    assert!(replies[5]["error"].is_string());
    assert_eq!(replies[6]["profile"]["displayName"], "Head Barista");
    assert_eq!(replies[6]["profile"]["email"], "user@google.com");
}
