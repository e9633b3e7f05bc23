use crate::build::{BUILD_IDENTITY_LEN, BuildIdentity};
use crate::error::SwitchError;

#[test]
fn random_identity_is_fixed_length_uppercase_alphanumeric() {
    let id = BuildIdentity::random();
    assert_eq!(id.as_str().len(), BUILD_IDENTITY_LEN);
    assert!(
        id.as_str()
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()),
        "unexpected identity {id}"
    );
}

#[test]
fn seeded_rng_is_reproducible() {
    let a = BuildIdentity::with_rng(&mut fastrand::Rng::with_seed(42));
    let b = BuildIdentity::with_rng(&mut fastrand::Rng::with_seed(42));
    let c = BuildIdentity::with_rng(&mut fastrand::Rng::with_seed(43));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn parse_accepts_printed_identity_and_rejects_garbage() {
    let id = BuildIdentity::random();
    let parsed: BuildIdentity = id.to_string().parse().expect("parse identity");
    assert_eq!(parsed, id);

    let bad = [
        String::new(),
        "abc".to_string(),
        "a".repeat(BUILD_IDENTITY_LEN),
        "A".repeat(BUILD_IDENTITY_LEN + 1),
    ];
    for raw in &bad {
        assert!(matches!(
            BuildIdentity::parse(raw),
            Err(SwitchError::InvalidBuildIdentity(_))
        ));
    }
}
