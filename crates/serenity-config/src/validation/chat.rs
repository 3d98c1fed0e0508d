//! Chat section validation.

use crate::schema::SerenityConfig;

use super::helpers::validate_non_blank;

pub(crate) fn validate_chat(errors: &mut Vec<String>, config: &SerenityConfig) {
    validate_non_blank(
        errors,
        "chat.system_instruction",
        &config.chat.system_instruction,
    );
}
