mod common;

use brewfinder_core::{Brewery, BreweryFields, ValidationError};
use common::{brewery, fields, HASH, SALT, TOKEN};

#[test]
fn new_brewery_is_not_persisted_and_keeps_normalized_fields() {
    let mut input = fields("  Mill Street Ales ", " Albuquerque ");
    input.state = " nm ".to_string();
    input.hash = HASH.to_ascii_uppercase();
    input.activation_token = Some(TOKEN.to_ascii_uppercase());

    let brewery = Brewery::new(input).unwrap();

    assert_eq!(brewery.id(), None);
    assert!(!brewery.is_persisted());
    assert_eq!(brewery.name(), "Mill Street Ales");
    assert_eq!(brewery.city(), "Albuquerque");
    assert_eq!(brewery.state(), "NM");
    assert_eq!(brewery.hash(), HASH);
    assert_eq!(brewery.activation_token(), Some(TOKEN));
}

#[test]
fn with_id_rejects_non_positive_ids() {
    let brewery = Brewery::with_id(5, fields("Mill", "Albuquerque")).unwrap();
    assert_eq!(brewery.id(), Some(5));

    for id in [0, -1, i64::MIN] {
        let err = Brewery::with_id(id, fields("Mill", "Albuquerque")).unwrap_err();
        assert!(err.is_range_error(), "id {id} gave {err}");
    }
}

#[test]
fn optional_identifier_setters_round_trip_positive_values() {
    let mut brewery = brewery("Mill", "Albuquerque");

    for n in [1, 2, 42, 65_535, i64::MAX] {
        brewery.set_profile_id(Some(n)).unwrap();
        assert_eq!(brewery.profile_id(), Some(n));
        brewery.set_image_id(Some(n)).unwrap();
        assert_eq!(brewery.image_id(), Some(n));
        brewery.set_zip(n).unwrap();
        assert_eq!(brewery.zip(), n);
    }

    brewery.set_image_id(None).unwrap();
    assert_eq!(brewery.image_id(), None);
}

#[test]
fn identifier_setters_reject_zero_and_negatives_without_changing_state() {
    let mut brewery = brewery("Mill", "Albuquerque");

    for n in [0, -1, -87102, i64::MIN] {
        let err = brewery.set_profile_id(Some(n)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotPositive {
                field: "brewery profile id",
                value: n
            }
        );
        assert!(brewery.set_image_id(Some(n)).unwrap_err().is_range_error());
        assert!(brewery.set_zip(n).unwrap_err().is_range_error());
    }

    assert_eq!(brewery.profile_id(), Some(7));
    assert_eq!(brewery.zip(), 87102);
}

#[test]
fn text_setters_enforce_maximum_lengths() {
    let mut brewery = brewery("Mill", "Albuquerque");

    let cases: [(usize, fn(&mut Brewery, &str) -> Result<(), ValidationError>); 6] = [
        (128, Brewery::set_address1),
        (128, Brewery::set_address2),
        (32, Brewery::set_city),
        (750, Brewery::set_content),
        (32, Brewery::set_name),
        (12, Brewery::set_phone),
    ];

    for (max, setter) in cases {
        setter(&mut brewery, &"x".repeat(max)).unwrap();
        let err = setter(&mut brewery, &"x".repeat(max + 1)).unwrap_err();
        assert!(
            matches!(err, ValidationError::TooLong { max: m, actual, .. } if m == max && actual == max + 1),
            "unexpected error: {err}"
        );
    }
}

#[test]
fn text_setters_reject_empty_and_whitespace() {
    let mut brewery = brewery("Mill", "Albuquerque");
    let before = brewery.clone();

    type Setter = fn(&mut Brewery, &str) -> Result<(), ValidationError>;
    let setters: [(&'static str, Setter); 10] = [
        ("brewery address 1", Brewery::set_address1),
        ("brewery address 2", Brewery::set_address2),
        ("brewery city", Brewery::set_city),
        ("brewery content", Brewery::set_content),
        ("brewery email", Brewery::set_email),
        ("brewery hash", Brewery::set_hash),
        ("brewery name", Brewery::set_name),
        ("brewery phone", Brewery::set_phone),
        ("brewery salt", Brewery::set_salt),
        ("brewery state", Brewery::set_state),
    ];

    for (field, set) in setters {
        for value in ["", " ", "\t\n  "] {
            let err = set(&mut brewery, value).unwrap_err();
            assert_eq!(err, ValidationError::Empty { field }, "{field} <- {value:?}");
            assert!(!err.is_range_error());
        }
    }

    assert_eq!(brewery, before);
}

#[test]
fn email_requires_valid_syntax_and_width() {
    let mut brewery = brewery("Mill", "Albuquerque");

    brewery.set_email(" owner@mill-street.example ").unwrap();
    assert_eq!(brewery.email(), "owner@mill-street.example");

    let err = brewery.set_email("owner at mill street").unwrap_err();
    assert!(matches!(err, ValidationError::InvalidFormat { .. }));

    let long = format!("{}@example.com", "a".repeat(120));
    assert!(brewery.set_email(&long).unwrap_err().is_range_error());
}

#[test]
fn hash_and_salt_require_exact_hex_length() {
    let mut brewery = brewery("Mill", "Albuquerque");

    assert!(brewery.set_hash(&HASH[..127]).unwrap_err().is_range_error());
    assert!(brewery
        .set_hash(&format!("{HASH}0"))
        .unwrap_err()
        .is_range_error());
    let non_hex = format!("{}g", &HASH[..127]);
    assert!(matches!(
        brewery.set_hash(&non_hex).unwrap_err(),
        ValidationError::InvalidFormat { .. }
    ));

    assert!(brewery.set_salt(&SALT[..63]).unwrap_err().is_range_error());
    assert!(brewery
        .set_salt(&format!("{SALT}a"))
        .unwrap_err()
        .is_range_error());
    let non_hex = format!("{}z", &SALT[..63]);
    assert!(!brewery.set_salt(&non_hex).unwrap_err().is_range_error());

    assert_eq!(brewery.hash(), HASH);
    assert_eq!(brewery.salt(), SALT);
}

#[test]
fn activation_token_is_optional_hex_of_32() {
    let mut brewery = brewery("Mill", "Albuquerque");

    brewery.set_activation_token(Some(TOKEN)).unwrap();
    assert_eq!(brewery.activation_token(), Some(TOKEN));

    assert!(brewery
        .set_activation_token(Some(&TOKEN[..31]))
        .unwrap_err()
        .is_range_error());
    assert!(brewery
        .set_activation_token(Some("zz23456789abcdef0123456789abcdef"))
        .is_err());

    brewery.set_activation_token(None).unwrap();
    assert_eq!(brewery.activation_token(), None);
}

#[test]
fn coordinates_accept_bounds_and_reject_one_unit_beyond() {
    let mut brewery = brewery("Mill", "Albuquerque");

    for x in [-180.0, 180.0, 0.0] {
        brewery.set_location_x(x).unwrap();
        assert_eq!(brewery.location_x(), x);
    }
    for y in [-90.0, 90.0, 0.0] {
        brewery.set_location_y(y).unwrap();
        assert_eq!(brewery.location_y(), y);
    }

    assert!(brewery.set_location_x(-181.0).unwrap_err().is_range_error());
    assert!(brewery.set_location_x(181.0).unwrap_err().is_range_error());
    assert!(brewery.set_location_y(-91.0).unwrap_err().is_range_error());
    assert!(brewery.set_location_y(91.0).unwrap_err().is_range_error());
    assert!(!brewery.set_location_x(f64::NAN).unwrap_err().is_range_error());
}

#[test]
fn textual_coordinates_are_parsed_before_range_checks() {
    let mut brewery = brewery("Mill", "Albuquerque");

    brewery.set_location_x_str(" -122.68 ").unwrap();
    assert_eq!(brewery.location_x(), -122.68);

    let err = brewery.set_location_y_str("north").unwrap_err();
    assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    assert!(brewery.set_location_y_str("90.5").unwrap_err().is_range_error());
}

#[test]
fn state_must_be_two_letters() {
    let mut brewery = brewery("Mill", "Albuquerque");

    brewery.set_state("or").unwrap();
    assert_eq!(brewery.state(), "OR");
    assert!(brewery.set_state("ORE").unwrap_err().is_range_error());
    assert!(!brewery.set_state("4A").unwrap_err().is_range_error());
}

#[test]
fn constructor_reports_first_violation() {
    let input = BreweryFields {
        city: "".to_string(),
        phone: "x".repeat(13),
        ..fields("Mill", "Albuquerque")
    };

    let err = Brewery::new(input).unwrap_err();
    assert_eq!(err.field(), "brewery city");
}

#[test]
fn serialization_is_flat_and_omits_credentials() {
    let mut input = fields("Mill", "Albuquerque");
    input.activation_token = Some(TOKEN.to_string());
    input.image_id = Some(3);
    let brewery = Brewery::with_id(11, input).unwrap();

    let json = serde_json::to_value(&brewery).unwrap();
    let object = json.as_object().unwrap();

    assert_eq!(json["id"], 11);
    assert_eq!(json["profile_id"], 7);
    assert_eq!(json["name"], "Mill");
    assert_eq!(json["city"], "Albuquerque");
    assert_eq!(json["image_id"], 3);
    assert_eq!(json["location_x"], -106.65);
    assert_eq!(json["state"], "NM");
    assert_eq!(json["zip"], 87102);
    assert!(object.values().all(|value| !value.is_object() && !value.is_array()));
    for secret in ["hash", "salt", "activation_token"] {
        assert!(!object.contains_key(secret), "{secret} must not be serialized");
    }
    assert_eq!(object.len(), 14);
}
