use crate::errors::{RegistrarError, Result};
use crate::model::{NewCourse, NewStudent};

/// Validate the shape of a student email
///
/// Requires exactly one `@` with non-empty local and domain parts and no
/// surrounding whitespace. This is a sanity check, not RFC 5322.
///
/// # Errors
/// `InvalidInput` if the email is malformed.
pub fn validate_email(email: &str) -> Result<()> {
    let invalid = |reason: &str| RegistrarError::InvalidEmail {
        email: email.to_string(),
        reason: reason.to_string(),
    };

    if email.trim().is_empty() {
        return Err(invalid("email is empty").into());
    }
    if email.trim() != email {
        return Err(invalid("email has leading or trailing whitespace").into());
    }

    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return Err(invalid("email must contain exactly one '@'").into()),
    };
    if local.is_empty() || domain.is_empty() {
        return Err(invalid("email needs both a local part and a domain").into());
    }

    Ok(())
}

fn require_non_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RegistrarError::BlankField {
            field: field.to_string(),
        }
        .into());
    }
    Ok(())
}

/// The password is stored as given; any string, even empty, is accepted
///
/// # Errors
/// `InvalidInput` if the email is malformed or the name is blank.
pub fn validate_new_student(student: &NewStudent) -> Result<()> {
    validate_email(&student.email)?;
    require_non_blank("name", &student.name)?;
    Ok(())
}

/// # Errors
/// `InvalidInput` if name or instructor are blank.
pub fn validate_new_course(course: &NewCourse) -> Result<()> {
    require_non_blank("name", &course.name)?;
    require_non_blank("instructor", &course.instructor)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;

    #[test]
    fn test_valid_email() {
        assert!(validate_email("reema@gmail.com").is_ok());
        assert!(validate_email("a@x").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        for email in ["", "   ", "no-at-sign", "two@@x.com", "@x.com", "a@", " a@x.com"] {
            let err = validate_email(email).unwrap_err();
            assert_eq!(err.kind(), ExErrorKind::InvalidInput, "email {:?}", email);
        }
    }

    #[test]
    fn test_blank_course_fields() {
        let err = validate_new_course(&NewCourse::new("Algo", "  ")).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert!(err.message().contains("instructor"));
        assert!(validate_new_course(&NewCourse::new("Algo", "Dr. X")).is_ok());
    }

    #[test]
    fn test_any_password_accepted() {
        for password in ["", "   ", "pw"] {
            assert!(validate_new_student(&NewStudent::new("a@x.com", "A", password)).is_ok());
        }
        let err = validate_new_student(&NewStudent::new("a@x.com", " ", "pw")).unwrap_err();
        assert!(err.message().contains("name"));
    }
}
