//! Error conversion glue between the `data` layer and the service layer.
//!
//! The domain and form modules must not depend on service error types, so the
//! conversions live here and are only compiled with the `client` feature.

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(val: FormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_errors_keep_their_message() {
        let err: ServiceError = FormError::InvalidPhoneNumber.into();
        assert_eq!(err.to_string(), "Telefon raqam noto'g'ri");
        assert!(!err.is_auth());
    }

    #[test]
    fn type_constraints_are_wrapped() {
        let err: ServiceError = TypeConstraintError::NonPositiveId.into();
        assert!(matches!(err, ServiceError::TypeConstraint(_)));
    }
}
