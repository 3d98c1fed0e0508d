//! Model section validation (name, sampling, limits).

use crate::schema::SerenityConfig;

use super::helpers::{validate_non_blank, validate_range, validate_range_f64};

pub(crate) fn validate_model(errors: &mut Vec<String>, config: &SerenityConfig) {
    let model = &config.model;
    validate_non_blank(errors, "model.name", &model.name);
    validate_range_f64(errors, "model.temperature", model.temperature, 0.0, 2.0);
    validate_range_f64(errors, "model.top_p", model.top_p, 0.0, 1.0);
    validate_range(
        errors,
        "model.max_output_tokens",
        model.max_output_tokens,
        1,
        65536,
    );
    validate_range(
        errors,
        "model.request_timeout_secs",
        model.request_timeout_secs,
        5,
        600,
    );
}
