use crate::core::schema::FormSchema;
use crate::core::validate::Validator;
use crate::errors::AppResult;

/// Profile form: all four fields required, email checked by key,
/// mobile must be ten digits.
pub fn schema() -> AppResult<FormSchema> {
    FormSchema::from_pairs(&[
        ("username", "Username"),
        ("fullName", "Full name"),
        ("email", "Email"),
        ("mobile", "Mobile"),
    ])?
    .with_validator("mobile", Validator::mobile())
}
