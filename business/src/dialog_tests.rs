//! Behaviour of the create-user dialog against a recording service.

use crate::test_utils::{TestDialog, test_dialog, valid_form};
use crate::{
    ApiError, AvatarFile, CacheEvent, FormField, NewUserForm, Settled, Severity, SubmitOutcome,
    SubmitPhase, ValidationError,
};

async fn submit_and_settle(t: &mut TestDialog) -> Option<Settled> {
    assert_eq!(t.dialog.submit(), SubmitOutcome::Dispatched);
    t.dialog.settle().await
}

#[tokio::test]
async fn test_missing_email_blocks_submission() {
    let mut t = test_dialog(Ok(()));
    *t.dialog.form_mut() = valid_form();
    t.dialog.form_mut().email.clear();

    assert_eq!(t.dialog.submit(), SubmitOutcome::Blocked);
    assert_eq!(
        t.dialog.error(FormField::Email),
        Some(ValidationError::EmailRequired)
    );
    assert!(t.service.calls().is_empty());
    assert_eq!(t.dialog.phase(), SubmitPhase::Idle);
}

#[tokio::test]
async fn test_malformed_email_blocks_submission() {
    let mut t = test_dialog(Ok(()));
    *t.dialog.form_mut() = valid_form();
    t.dialog.form_mut().email = "not-an-email".to_owned();

    assert_eq!(t.dialog.submit(), SubmitOutcome::Blocked);
    assert_eq!(
        t.dialog.error(FormField::Email),
        Some(ValidationError::EmailInvalid)
    );
    assert!(t.service.calls().is_empty());
}

#[tokio::test]
async fn test_short_password_blocks_submission() {
    let mut t = test_dialog(Ok(()));
    *t.dialog.form_mut() = valid_form();
    t.dialog.form_mut().password = "short".to_owned();
    t.dialog.form_mut().confirm_password = "short".to_owned();

    assert_eq!(t.dialog.submit(), SubmitOutcome::Blocked);
    assert_eq!(
        t.dialog.error(FormField::Password),
        Some(ValidationError::PasswordTooShort)
    );
    assert!(t.service.calls().is_empty());
}

#[tokio::test]
async fn test_password_mismatch_blocks_submission() {
    let mut t = test_dialog(Ok(()));
    *t.dialog.form_mut() = valid_form();
    t.dialog.form_mut().confirm_password = "longenough2".to_owned();

    assert_eq!(t.dialog.submit(), SubmitOutcome::Blocked);
    let error = t.dialog.error(FormField::ConfirmPassword).unwrap();
    assert_eq!(error.to_string(), "The passwords do not match");
    assert!(t.service.calls().is_empty());
}

#[tokio::test]
async fn test_empty_roles_blocks_submission() {
    let mut t = test_dialog(Ok(()));
    *t.dialog.form_mut() = valid_form();
    t.dialog.form_mut().roles.clear();

    assert_eq!(t.dialog.submit(), SubmitOutcome::Blocked);
    assert_eq!(
        t.dialog.error(FormField::Roles),
        Some(ValidationError::RolesRequired)
    );
    assert!(t.service.calls().is_empty());
}

#[tokio::test]
async fn test_valid_submit_sends_exactly_one_call() {
    let mut t = test_dialog(Ok(()));
    *t.dialog.form_mut() = valid_form();

    let settled = submit_and_settle(&mut t).await;
    assert_eq!(settled, Some(Settled::Created));

    let calls = t.service.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].text("roles"), Some(r#"["ROLE_PORTAL_USER"]"#));
    assert_eq!(calls[0].text("is_superuser"), Some("false"));
    assert_eq!(calls[0].text("email"), Some("a@b.com"));
}

#[tokio::test]
async fn test_success_resets_closes_and_notifies() {
    let mut t = test_dialog(Ok(()));
    *t.dialog.form_mut() = valid_form();
    t.dialog.form_mut().name = "Aida".to_owned();

    submit_and_settle(&mut t).await;

    assert_eq!(*t.dialog.form(), NewUserForm::default());
    assert!(!t.dialog.is_open());
    assert_eq!(t.close_calls(), 1);
    assert_eq!(t.dialog.phase(), SubmitPhase::Idle);
    assert_eq!(
        t.notifier.toasts(),
        vec![(
            "Success!".to_owned(),
            "User created successfully.".to_owned(),
            Severity::Success
        )]
    );
    assert_eq!(t.events.drain(), vec![CacheEvent::UsersListInvalidated]);
}

#[tokio::test]
async fn test_failure_keeps_values_and_stays_open() {
    let err = ApiError::Server {
        status: 503,
        detail: Some("EMAIL already exists!".to_owned()),
    };
    let mut t = test_dialog(Err(err.clone()));
    *t.dialog.form_mut() = valid_form();
    t.dialog.form_mut().surname = "Bekova".to_owned();
    let before = t.dialog.form().clone();

    let settled = submit_and_settle(&mut t).await;

    assert_eq!(settled, Some(Settled::Failed(err)));
    assert_eq!(*t.dialog.form(), before);
    assert!(t.dialog.is_open());
    assert_eq!(t.close_calls(), 0);
    assert_eq!(
        t.notifier.toasts(),
        vec![(
            "Error".to_owned(),
            "EMAIL already exists!".to_owned(),
            Severity::Error
        )]
    );
    assert_eq!(t.events.drain(), vec![CacheEvent::UsersListInvalidated]);
}

#[tokio::test]
async fn test_failure_allows_retry() {
    let mut t = test_dialog(Err(ApiError::Transport("connection reset".to_owned())));
    *t.dialog.form_mut() = valid_form();

    submit_and_settle(&mut t).await;
    submit_and_settle(&mut t).await;

    assert_eq!(t.service.calls().len(), 2);
    assert_eq!(t.events.drain().len(), 2);
}

#[tokio::test]
async fn test_second_submit_while_in_flight_is_ignored() {
    let mut t = test_dialog(Ok(()));
    *t.dialog.form_mut() = valid_form();

    assert_eq!(t.dialog.submit(), SubmitOutcome::Dispatched);
    assert!(t.dialog.is_submitting());
    assert_eq!(t.dialog.submit(), SubmitOutcome::Busy);

    t.dialog.settle().await;
    assert_eq!(t.service.calls().len(), 1);
    assert_eq!(t.close_calls(), 1);
}

#[tokio::test]
async fn test_poll_is_empty_before_submit() {
    let mut t = test_dialog(Ok(()));
    assert!(t.dialog.poll().is_none());
    assert!(t.dialog.settle().await.is_none());
}

#[tokio::test]
async fn test_poll_applies_settled_result() {
    let mut t = test_dialog(Ok(()));
    *t.dialog.form_mut() = valid_form();
    t.dialog.submit();

    let mut settled = None;
    for _ in 0..100 {
        tokio::task::yield_now().await;
        settled = t.dialog.poll();
        if settled.is_some() {
            break;
        }
    }

    assert_eq!(settled, Some(Settled::Created));
    assert!(!t.dialog.is_submitting());
}

#[tokio::test]
async fn test_latest_avatar_is_attached() {
    let mut t = test_dialog(Ok(()));
    *t.dialog.form_mut() = valid_form();
    t.dialog
        .select_avatar([AvatarFile::new("first.png", "image/png", vec![1])]);
    t.dialog
        .select_avatar([AvatarFile::new("second.jpg", "image/jpeg", vec![2, 2])]);

    submit_and_settle(&mut t).await;

    let calls = t.service.calls();
    let avatars: Vec<_> = calls[0]
        .parts()
        .iter()
        .filter(|part| part.name() == "avatar")
        .collect();
    assert_eq!(avatars.len(), 1);
    assert_eq!(
        calls[0].file("avatar"),
        Some(&crate::PayloadPart::File {
            name: "avatar",
            file_name: "second.jpg".to_owned(),
            mime_type: "image/jpeg".to_owned(),
            bytes: vec![2, 2],
        })
    );
}

#[tokio::test]
async fn test_blur_validates_single_field() {
    let mut t = test_dialog(Ok(()));
    t.dialog.form_mut().email = "bad".to_owned();

    t.dialog.blur(FormField::Email);
    assert_eq!(
        t.dialog.error(FormField::Email),
        Some(ValidationError::EmailInvalid)
    );
    assert!(t.dialog.error(FormField::Password).is_none());

    t.dialog.form_mut().email = "a@b.com".to_owned();
    t.dialog.blur(FormField::Email);
    assert!(t.dialog.errors().is_empty());
}

#[tokio::test]
async fn test_blur_on_optional_field_never_errors() {
    let mut t = test_dialog(Ok(()));
    t.dialog.form_mut().birth_year = "abc".to_owned();
    t.dialog.blur(FormField::BirthYear);
    assert!(t.dialog.errors().is_empty());
}

#[tokio::test]
async fn test_cancel_discards_form_and_calls_close() {
    let mut t = test_dialog(Ok(()));
    *t.dialog.form_mut() = valid_form();
    t.dialog.blur(FormField::Email);

    t.dialog.cancel();

    assert!(!t.dialog.is_open());
    assert_eq!(*t.dialog.form(), NewUserForm::default());
    assert_eq!(t.close_calls(), 1);
    assert!(t.service.calls().is_empty());
    assert!(t.events.drain().is_empty());
}

#[tokio::test]
async fn test_cancel_while_in_flight_closes_once() {
    let mut t = test_dialog(Ok(()));
    *t.dialog.form_mut() = valid_form();
    t.dialog.submit();
    t.dialog.cancel();

    assert_eq!(t.dialog.settle().await, Some(Settled::Created));
    assert_eq!(t.close_calls(), 1);
    assert_eq!(t.events.drain(), vec![CacheEvent::UsersListInvalidated]);
}
