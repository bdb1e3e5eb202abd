/*!
 * Remote translation through a scripted provider, driven the way the
 * controller drives it: blocking calls on a worker thread
 */

use bisrt::assembler::assemble;
use bisrt::errors::{AssembleError, ProviderError, TranslationError};
use bisrt::providers::mock::{MockBehavior, MockProvider};
use bisrt::providers::ollama::GenerationRequest;
use bisrt::transcript::TimedSegment;
use bisrt::translation::{LanguageRoute, RemoteTranslator, Translator};

fn translator(provider: MockProvider) -> RemoteTranslator<MockProvider> {
    RemoteTranslator::new(
        provider,
        tokio::runtime::Handle::current(),
        "test-model",
        "Translate from English to Chinese.",
        0.1,
    )
}

fn quoted_reply(request: &GenerationRequest) -> String {
    format!("\"{}!\"\nThis line is commentary.", request.prompt())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remote_translator_insideBlockingTask_shouldTranslateEachChunk() {
    let translator = translator(MockProvider::working().with_reply(quoted_reply));

    let (cues, requests) = tokio::task::spawn_blocking(move || {
        let route = LanguageRoute::resolve(Some("en"), "en", "zh");
        let segments = vec![
            TimedSegment::new(0.0, 1.0, "Hello"),
            TimedSegment::new(1.0, 2.0, "World"),
        ];
        let cues = assemble(&segments, route.pair_fn(&translator), 45).unwrap();
        (cues, translator.provider().request_count())
    })
    .await
    .unwrap();

    assert_eq!(requests, 2);
    assert_eq!(cues.cues()[0].line2, "Hello!");
    assert_eq!(cues.cues()[1].line2, "World!");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remote_translator_withServerError_shouldSurfaceProviderError() {
    let translator = translator(MockProvider::new(MockBehavior::FailOnCall(1)));

    let result = tokio::task::spawn_blocking(move || {
        let route = LanguageRoute::resolve(None, "en", "zh");
        let segments = vec![TimedSegment::new(0.0, 1.0, "Hello")];
        assemble(&segments, route.pair_fn(&translator), 45)
    })
    .await
    .unwrap();

    assert!(matches!(
        result,
        Err(AssembleError::Translate(TranslationError::Provider(ProviderError::ApiError {
            status_code: 500,
            ..
        })))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remote_translator_withBlankOutput_shouldReportEmptyTranslation() {
    let translator = translator(MockProvider::new(MockBehavior::Empty));

    let result = tokio::task::spawn_blocking(move || translator.translate("Hello"))
        .await
        .unwrap();

    assert!(matches!(result, Err(TranslationError::EmptyTranslation(text)) if text == "Hello"));
}
