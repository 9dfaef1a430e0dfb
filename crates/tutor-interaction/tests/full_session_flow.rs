//! Full wiring test: controller + canned backend + file-backed diary +
//! speech presenter, assembled the way a process would at startup.

use std::sync::Arc;

use tutor_core::agent::{AgentKind, Dispatcher};
use tutor_core::capture::CaptureKind;
use tutor_core::diary::DiaryStore;
use tutor_core::session::{Screen, SessionController};
use tutor_core::subject::Subject;
use tutor_infrastructure::{AppConfig, JsonDiaryRepository};
use tutor_interaction::{CannedAnswerBackend, NullSynthesizer, SpeechPresenter};

#[tokio::test]
async fn full_session_flow_with_persistence_and_speech() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::default();

    // Process wiring: the stand-in backend is chosen here, the controller
    // never knows which backend it talks to.
    let repository = Arc::new(JsonDiaryRepository::new(dir.path()).unwrap());
    let diary = DiaryStore::load(repository.clone()).await;
    let dispatcher = Dispatcher::new(Arc::new(CannedAnswerBackend::default()));
    let controller = SessionController::new(dispatcher, diary, config.crop_settings());
    let mut presenter = SpeechPresenter::new(Arc::new(NullSynthesizer), &config.speech_language);

    // Home -> Input -> dictate -> submit -> Analysis
    controller.select_subject(Subject::Math).await.unwrap();
    controller.set_dictated_text("2x + 10 = 20").await.unwrap();
    let result = controller.submit(AgentKind::Fast).await.unwrap().unwrap();
    assert_eq!(result.tag, AgentKind::Fast);
    assert!(result.text.contains("x = 5"));
    assert_eq!(controller.session().await.screen, Screen::Analysis);

    // Speak the one-sentence summary, then stop it
    let summary = controller.summarize_active_result().await.unwrap();
    assert!(!summary.is_empty());
    assert!(presenter.toggle(&summary));
    assert!(!presenter.toggle(&summary));

    // The capture survived into the durable diary
    let restored = DiaryStore::load(repository).await;
    assert_eq!(restored.entries().len(), 1);
    assert_eq!(restored.entries()[0].kind, CaptureKind::Voice);
    assert_eq!(restored.entries()[0].content, "2x + 10 = 20");
    assert_eq!(restored.entries()[0].subject, Subject::Math);
}
