//! Integration tests for `#[derive(LabelledEnum)]`.

use tidyenum_db::enums::{LabelledEnum, PrimitiveKind};
use tidyenum_db::fields::FieldValue;
use tidyenum_db::value::Value;
use tidyenum_macros::LabelledEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, LabelledEnum)]
#[labelled(name = "Status")]
enum Status {
    #[labelled(value = 1, label = "Active")]
    Active,
    #[labelled(value = 2, label = "Done")]
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, LabelledEnum)]
enum Colour {
    #[labelled(value = "r", label = "Red")]
    Red,
    #[labelled(value = "lb")]
    LightBlue,
    #[labelled(value = "x", name = "LEGACY")]
    Retired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, LabelledEnum)]
#[labelled(name = "Rating")]
enum Rating {
    #[labelled(value = -1, label = "Unrated")]
    Unrated,
    #[labelled(value = 5, label = "Top")]
    Top,
}

#[test]
fn test_negative_values() {
    assert_eq!(Rating::MEMBER_TYPE, PrimitiveKind::Integer);
    assert_eq!(Rating::Unrated.value(), Value::Int(-1));
    assert_eq!(Rating::from_value(&Value::Int(-1)).unwrap(), Rating::Unrated);
    assert_eq!(Rating::Top.value(), Value::Int(5));
}

#[test]
fn test_integer_enum_metadata() {
    assert_eq!(Status::ENUM_NAME, "Status");
    assert_eq!(Status::MEMBER_TYPE, PrimitiveKind::Integer);
    assert_eq!(Status::members(), &[Status::Active, Status::Done]);
    assert_eq!(Status::Done.name(), "DONE");
    assert_eq!(Status::Done.value(), Value::Int(2));
    assert_eq!(Status::Done.label(), "Done");
}

#[test]
fn test_text_enum_defaults() {
    assert_eq!(Colour::ENUM_NAME, "Colour");
    assert_eq!(Colour::MEMBER_TYPE, PrimitiveKind::Text);
    assert_eq!(Colour::LightBlue.name(), "LIGHT_BLUE");
    assert_eq!(Colour::LightBlue.label(), "LightBlue");
    assert_eq!(Colour::Retired.name(), "LEGACY");
    assert_eq!(Colour::Red.value(), Value::from("r"));
}

#[test]
fn test_derived_choices() {
    assert_eq!(
        Status::choices(),
        vec![
            (Value::Int(1), "Active".to_string()),
            (Value::Int(2), "Done".to_string()),
        ]
    );
}

#[test]
fn test_lookup_by_name_and_value() {
    assert_eq!(Status::from_name("ACTIVE").unwrap(), Status::Active);
    assert_eq!(Status::from_value(&Value::Int(2)).unwrap(), Status::Done);
    assert!(Status::from_value(&Value::Int(9)).is_err());
    assert_eq!(Colour::from_name("LEGACY").unwrap(), Colour::Retired);
}

#[test]
fn test_into_field_value() {
    let value: FieldValue = Status::Done.into();
    assert!(value.is_member());
    assert_eq!(value.primitive(), &Value::Int(2));
    assert_eq!(value.member_as::<Status>(), Some(Status::Done));
    assert_eq!(value.member_as::<Colour>(), None);
}

#[test]
fn test_enum_type_descriptor() {
    let et = Status::enum_type();
    assert_eq!(et.name(), "Status");
    assert_eq!(et.members().len(), 2);
    assert_eq!(et.first().map(|m| m.qualified_name()), Some("Status.ACTIVE".to_string()));
}
