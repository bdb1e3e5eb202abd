/*!
 * Tests for error types and conversions
 */

use bisrt::errors::{AppError, AssembleError, ProviderError, SegmentationError, TranslationError};

#[test]
fn test_segmentation_error_display_shouldDescribePrecondition() {
    assert_eq!(
        SegmentationError::ZeroChunkCount.to_string(),
        "Cannot allocate time windows for zero chunks"
    );
    assert!(SegmentationError::ZeroMaxChars.to_string().contains("positive"));
}

#[test]
fn test_provider_error_shouldConvertToTranslationError() {
    let error: TranslationError = ProviderError::ApiError {
        status_code: 500,
        message: "boom".to_string(),
    }
    .into();
    assert!(matches!(error, TranslationError::Provider(ProviderError::ApiError { status_code: 500, .. })));
    assert_eq!(error.to_string(), "Provider error: API responded with error: 500 - boom");
}

#[test]
fn test_assemble_error_shouldKeepCallbackErrorUntouched() {
    let error: AssembleError<&str> = AssembleError::Translate("backend down");
    match error {
        AssembleError::Translate(inner) => assert_eq!(inner, "backend down"),
        AssembleError::Segmentation(_) => panic!("wrong variant"),
    }
}

#[test]
fn test_app_error_from_assemble_error_shouldMapVariants() {
    let seg: AppError = AssembleError::<TranslationError>::Segmentation(SegmentationError::ZeroMaxChars).into();
    assert!(matches!(seg, AppError::Segmentation(SegmentationError::ZeroMaxChars)));

    let tr: AppError =
        AssembleError::Translate(TranslationError::EmptyTranslation("hi".to_string())).into();
    assert!(matches!(tr, AppError::Translation(TranslationError::EmptyTranslation(_))));
}

#[test]
fn test_app_error_from_io_error_shouldBeFileError() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let error: AppError = io.into();
    assert!(matches!(error, AppError::File(_)));
    assert_eq!(error.to_string(), "File error: missing");
}
