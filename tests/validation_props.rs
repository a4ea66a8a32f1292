//! Property tests for submission validation.

use contact_gateway::domain::NewMessage;
use contact_gateway::domain::new_message::{EMAIL_MAX_CHARS, NAME_MAX_CHARS, SUBJECT_MAX_CHARS};
use contact_gateway::error::ContactError;
use proptest::prelude::*;

fn bounded(max: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<char>(), 1..=max).prop_map(|chars| chars.into_iter().collect())
}

/// A required field as it reaches validation when absent, null, or empty.
fn missing() -> impl Strategy<Value = Option<String>> {
    prop_oneof![Just(None), Just(Some(String::new()))]
}

proptest! {
    #[test]
    fn valid_fields_always_pass_and_are_kept_verbatim(
        name in bounded(NAME_MAX_CHARS),
        email in bounded(EMAIL_MAX_CHARS),
        subject in proptest::option::of(bounded(SUBJECT_MAX_CHARS)),
        message in bounded(2_000),
    ) {
        let result = NewMessage::new(
            Some(name.clone()),
            Some(email.clone()),
            subject.clone(),
            Some(message.clone()),
        );
        prop_assert!(result.is_ok());
        if let Ok(msg) = result {
            prop_assert_eq!(msg.name(), name.as_str());
            prop_assert_eq!(msg.email(), email.as_str());
            prop_assert_eq!(msg.subject(), subject.as_deref());
            prop_assert_eq!(msg.message(), message.as_str());
        }
    }

    #[test]
    fn any_missing_required_field_fails_validation(
        which in 0usize..3,
        gap in missing(),
        filler in bounded(50),
    ) {
        let mut fields = [Some(filler.clone()), Some(filler.clone()), Some(filler)];
        if let Some(slot) = fields.get_mut(which) {
            *slot = gap;
        }
        let [name, email, message] = fields;
        let result = NewMessage::new(name, email, None, message);
        prop_assert!(matches!(result, Err(ContactError::ValidationFailed(_))));
    }
}
