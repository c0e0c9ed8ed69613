use super::Annotation;
use super::Position;
use crate::domain::models::SessionError;

#[test]
fn it_accepts_positions_within_bounds() {
    assert!(Position::new(0.0, 0.0).validate().is_ok());
    assert!(Position::new(100.0, 100.0).validate().is_ok());
    assert!(Position::new(42.5, 7.25).validate().is_ok());
}

#[test]
fn it_rejects_positions_out_of_bounds() {
    let err = Position::new(150.0, 50.0).validate().unwrap_err();
    assert_eq!(
        err,
        SessionError::InvalidAnnotation("x must be between 0 and 100, got 150".to_string())
    );

    assert!(Position::new(50.0, -0.1).validate().is_err());
}

#[test]
fn it_rejects_non_finite_positions() {
    assert!(Position::new(f64::NAN, 10.0).validate().is_err());
    assert!(Position::new(10.0, f64::INFINITY).validate().is_err());
}

#[test]
fn it_rejects_empty_text() {
    let res = Annotation::validate("   ", &Position::new(10.0, 10.0));
    assert_eq!(
        res,
        Err(SessionError::InvalidAnnotation(
            "annotation text is empty".to_string()
        ))
    );
}

#[test]
fn it_executes_new() {
    let annotation = Annotation::new("a1", "m1", "note", Position::new(12.0, 34.0));
    assert_eq!(annotation.media_id, "m1");
    assert_eq!(annotation.text, "note");
    assert_eq!(annotation.position, Position::new(12.0, 34.0));
}
